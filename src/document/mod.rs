//! Access helpers for Dataverse dataset documents
//!
//! Documents are kept as `serde_json::Value` trees so that keys no pipeline
//! reads are passed through untouched. Fields are located by their
//! `typeName` inside the ordered `fields` list of a metadata block.

pub mod field;

use serde_json::{Map, Value};

use crate::error::{RefineError, RefineResult};

pub use field::{Field, FieldRecord, FieldValue, TypeClass};

/// A dataset document as received from the transport layer
pub type Document = Value;

pub const DATASET_VERSION: &str = "datasetVersion";
pub const METADATA_BLOCKS: &str = "metadataBlocks";
pub const FIELDS: &str = "fields";
pub const CITATION: &str = "citation";

fn has_type_name(record: &Map<String, Value>, type_name: &str) -> bool {
    record.get("typeName").and_then(Value::as_str) == Some(type_name)
}

/// First field in `fields` whose `typeName` matches, if any
pub fn find_field<'a>(type_name: &str, fields: &'a mut [Value]) -> Option<Field<'a>> {
    fields
        .iter_mut()
        .filter_map(Value::as_object_mut)
        .find(|record| has_type_name(record, type_name))
        .map(Field::new)
}

/// Read-only variant of [`find_field`]
pub fn find_field_ref<'a>(type_name: &str, fields: &'a [Value]) -> Option<&'a Map<String, Value>> {
    fields
        .iter()
        .filter_map(Value::as_object)
        .find(|record| has_type_name(record, type_name))
}

/// Every field in `fields` whose `typeName` matches
pub fn find_all<'a>(type_name: &str, fields: &'a mut [Value]) -> Vec<Field<'a>> {
    fields
        .iter_mut()
        .filter_map(Value::as_object_mut)
        .filter(|record| has_type_name(record, type_name))
        .map(Field::new)
        .collect()
}

/// Calls `f` on every field named `type_name`, descending into the entries
/// of compound fields.
pub fn visit_fields<F>(type_name: &str, fields: &mut [Value], f: &mut F) -> RefineResult<()>
where
    F: FnMut(&mut Field<'_>) -> RefineResult<()>,
{
    for value in fields.iter_mut() {
        visit_field(type_name, value, f)?;
    }
    Ok(())
}

fn visit_field<F>(type_name: &str, value: &mut Value, f: &mut F) -> RefineResult<()>
where
    F: FnMut(&mut Field<'_>) -> RefineResult<()>,
{
    let Some(record) = value.as_object_mut() else {
        return Ok(());
    };
    if has_type_name(record, type_name) {
        f(&mut Field::new(record))?;
    }
    if let Some(Value::Array(entries)) = record.get_mut("value") {
        for entry in entries.iter_mut().filter_map(Value::as_object_mut) {
            for nested in entry.values_mut() {
                visit_field(type_name, nested, f)?;
            }
        }
    }
    Ok(())
}

/// Resolves a required key path, reporting the first missing segment.
pub fn require<'a>(document: &'a mut Value, path: &[&str]) -> RefineResult<&'a mut Value> {
    let mut current = document;
    for (depth, key) in path.iter().enumerate() {
        current = current
            .get_mut(*key)
            .ok_or_else(|| RefineError::missing_path(&path[..=depth]))?;
    }
    Ok(current)
}

/// `datasetVersion` as an object
pub fn dataset_version(document: &mut Value) -> RefineResult<&mut Map<String, Value>> {
    require(document, &[DATASET_VERSION])?
        .as_object_mut()
        .ok_or_else(|| RefineError::format(DATASET_VERSION, "expected an object"))
}

/// `datasetVersion.metadataBlocks` as an object
pub fn metadata_blocks(document: &mut Value) -> RefineResult<&mut Map<String, Value>> {
    require(document, &[DATASET_VERSION, METADATA_BLOCKS])?
        .as_object_mut()
        .ok_or_else(|| RefineError::format(METADATA_BLOCKS, "expected an object"))
}

/// Field list of an optional metadata block.
///
/// `Ok(None)` when the block is absent. A block that exists without a
/// `fields` list, or a document without `metadataBlocks`, is an error.
pub fn block_fields<'a>(
    document: &'a mut Value,
    block: &str,
) -> RefineResult<Option<&'a mut Vec<Value>>> {
    let blocks = metadata_blocks(document)?;
    let Some(block_value) = blocks.get_mut(block) else {
        return Ok(None);
    };
    match block_value.get_mut(FIELDS) {
        Some(Value::Array(fields)) => Ok(Some(fields)),
        Some(_) => Err(RefineError::format(FIELDS, format!("{block} fields must be a list"))),
        None => Err(RefineError::missing_path(&[
            DATASET_VERSION,
            METADATA_BLOCKS,
            block,
            FIELDS,
        ])),
    }
}

/// Field list of a metadata block that must be present
pub fn require_block_fields<'a>(
    document: &'a mut Value,
    block: &str,
) -> RefineResult<&'a mut Vec<Value>> {
    block_fields(document, block)?.ok_or_else(|| {
        RefineError::missing_path(&[DATASET_VERSION, METADATA_BLOCKS, block])
    })
}

/// A top-level string value, `None` when absent or not a string
pub fn top_level_str<'a>(document: &'a Value, key: &str) -> Option<&'a str> {
    document.get(key).and_then(Value::as_str)
}
