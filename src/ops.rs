use crate::model::{ParsePolicy, Record};
use crate::store::JsonFileStore;
use anyhow::{Context, Result};
use std::path::PathBuf;
use thiserror::Error;

/// Flag-validation failures. Business outcomes ("already exists", "not
/// found") are ordinary output text, never errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("-{0} flag has to be specified")]
    MissingFlag(&'static str),
    #[error("Operation {0} not allowed!")]
    OperationNotAllowed(String),
}

/// One invocation's worth of parsed flags, built once by the CLI layer and
/// passed by value. Required-ness is checked here, not by the parser.
#[derive(Debug, Default)]
pub struct Request {
    pub operation: Option<String>,
    pub item: Option<String>,
    pub id: Option<String>,
    pub file_name: Option<String>,
    pub policy: ParsePolicy,
}

/// Validates the always-required flags (operation first, then fileName),
/// then routes to the matching handler. Returns the text to print.
pub fn perform(request: &Request) -> Result<String> {
    let operation = require(&request.operation, "operation")?;
    let file_name = require(&request.file_name, "fileName")?;
    let store = JsonFileStore::new(PathBuf::from(file_name), request.policy);

    match operation {
        "add" => add(&store, request),
        "list" => list(&store),
        "findById" => find_by_id(&store, request),
        "remove" => remove(&store, request),
        "update" => update(&store, request),
        other => Err(UsageError::OperationNotAllowed(other.to_string()).into()),
    }
}

fn add(store: &JsonFileStore, request: &Request) -> Result<String> {
    let item = require(&request.item, "item")?;
    let record = Record::from_json(item, request.policy)?;
    let mut records = store.load()?;
    if records.iter().any(|existing| existing.id == record.id) {
        return Ok(format!("Item with id {} already exists", record.id));
    }
    records.push(record);
    store.save(&records)?;
    serialize(&records)
}

fn list(store: &JsonFileStore) -> Result<String> {
    serialize(&store.load()?)
}

fn find_by_id(store: &JsonFileStore, request: &Request) -> Result<String> {
    let id = require(&request.id, "id")?;
    let records = store.load()?;
    match records.iter().find(|record| record.id == id) {
        Some(record) => serde_json::to_string(record).context("unable to serialize record"),
        None => Ok(String::new()),
    }
}

fn remove(store: &JsonFileStore, request: &Request) -> Result<String> {
    let id = require(&request.id, "id")?;
    let mut records = store.load()?;
    let Some(index) = records.iter().position(|record| record.id == id) else {
        return Ok(format!("Item with id {id} not found"));
    };
    records.remove(index);
    store.save(&records)?;
    serialize(&records)
}

fn update(store: &JsonFileStore, request: &Request) -> Result<String> {
    let item = require(&request.item, "item")?;
    let incoming = Record::from_json(item, request.policy)?;
    let mut records = store.load()?;
    match records.iter_mut().find(|record| record.id == incoming.id) {
        Some(slot) => *slot = incoming,
        None => return Ok(format!("Item with id {} not found", incoming.id)),
    }
    store.save(&records)?;
    serialize(&records)
}

fn require<'a>(value: &'a Option<String>, flag: &'static str) -> Result<&'a str, UsageError> {
    match value.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(UsageError::MissingFlag(flag)),
    }
}

fn serialize(records: &[Record]) -> Result<String> {
    serde_json::to_string(records).context("unable to serialize records")
}
