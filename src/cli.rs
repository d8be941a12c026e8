use crate::model::ParsePolicy;
use crate::ops::{self, Request};
use anyhow::Result;
use clap::Parser;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ")"
);

/// All flags are optional here on purpose: the dispatcher owns required-ness
/// checks so that validation order and error text stay in one place.
#[derive(Parser)]
#[command(
    name = "recfile",
    version,
    long_version = LONG_VERSION,
    about = "Maintain a collection of records in a JSON file"
)]
struct Cli {
    /// Operation to perform: add, list, findById, remove or update
    #[arg(long)]
    operation: Option<String>,
    /// Record as a JSON object, e.g. '{"id":"1","email":"a@b.com","age":30}'
    #[arg(long, value_name = "JSON")]
    item: Option<String>,
    /// Record identifier, for findById and remove
    #[arg(long)]
    id: Option<String>,
    /// Path to the backing JSON file
    #[arg(long = "fileName", alias = "file-name", env = "RECFILE_STORE")]
    file_name: Option<String>,
    /// Fail on malformed stored JSON instead of treating it as empty
    #[arg(long)]
    strict: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let request = Request {
        operation: cli.operation,
        item: cli.item,
        id: cli.id,
        file_name: cli.file_name,
        policy: if cli.strict {
            ParsePolicy::Strict
        } else {
            ParsePolicy::Lenient
        },
    };
    let output = ops::perform(&request)?;
    println!("{output}");
    Ok(())
}
