mod cli;
mod model;
mod ops;
mod store;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    cli::run()
}
