use crate::model::{ParsePolicy, Record};
use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Whole-file JSON store: every load reads the complete collection, every
/// save rewrites it. No locking, so concurrent invocations race (last writer
/// wins).
pub struct JsonFileStore {
    path: PathBuf,
    policy: ParsePolicy,
}

impl JsonFileStore {
    pub fn new(path: PathBuf, policy: ParsePolicy) -> Self {
        Self { path, policy }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<Record>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                touch(&self.path)?;
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("unable to read store {}", self.path.display()));
            }
        };
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str(&data) {
            Ok(records) => Ok(records),
            Err(err) => match self.policy {
                ParsePolicy::Lenient => {
                    warn!(
                        "store {} is not a valid record array ({err}), treating as empty",
                        self.path.display()
                    );
                    Ok(Vec::new())
                }
                ParsePolicy::Strict => Err(err)
                    .with_context(|| format!("unable to parse store {}", self.path.display())),
            },
        }
    }

    pub fn save(&self, records: &[Record]) -> Result<()> {
        let data = serde_json::to_string(records).context("unable to serialize records")?;
        fs::write(&self.path, &data)
            .with_context(|| format!("unable to write store {}", self.path.display()))?;
        debug!(
            "wrote {} record(s) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

// The store file is created on first access so that a fresh path behaves like
// an empty collection.
fn touch(path: &Path) -> Result<()> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .with_context(|| format!("unable to create store {}", path.display()))?;
    Ok(())
}
