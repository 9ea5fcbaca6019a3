//! Document-level edits: link injection, contact email, cardinality and
//! `datasetVersion` reshaping

use serde_json::{Map, Value};

use crate::document::{
    block_fields, dataset_version, find_field, require_block_fields, FieldRecord, CITATION,
    DATASET_VERSION, METADATA_BLOCKS,
};
use crate::error::{RefineError, RefineResult};

use super::values::{is_blank, resolve_license};

pub const DATA_ACCESS_PLACE: &str = "dataAccessPlace";
pub const DATASET_CONTACT: &str = "datasetContact";
pub const DATASET_CONTACT_EMAIL: &str = "datasetContactEmail";
pub const LICENSE: &str = "license";
pub const METADATA_LANGUAGE: &str = "metadataLanguage";

const NO_LICENSE: &str = "NONE";
const UNDEFINED_LANGUAGE: &str = "undefined";

/// When a `license` entry is dropped instead of resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicensePolicy {
    /// Drop only the literal `"NONE"`
    DropNone,
    /// Drop `"NONE"` and empty values
    DropNoneOrBlank,
}

/// Points `datasetVersion.dataAccessPlace` at the DAB page of `doi`.
///
/// Documents without a `dataAccessPlace` are left alone. Returns whether the
/// link was written.
pub fn inject_dab_link(document: &mut Value, doi: &str, base_url: &str) -> bool {
    let Some(place) = document
        .get_mut(DATASET_VERSION)
        .and_then(|version| version.get_mut(DATA_ACCESS_PLACE))
    else {
        return false;
    };
    let url = format!("{base_url}{doi}");
    *place = Value::String(format!("<a href=\"{url}\">{url}</a>"));
    true
}

/// Sets the contact email on every `datasetContact` entry of the citation
/// block, or adds a `datasetContact` field carrying only the email.
pub fn inject_contact_email(document: &mut Value, email: &str) -> RefineResult<()> {
    let fields = require_block_fields(document, CITATION)?;
    let email_field = || Value::from(FieldRecord::primitive(DATASET_CONTACT_EMAIL, email));

    match find_field(DATASET_CONTACT, fields) {
        Some(mut contact) => {
            if let Some(Value::Array(entries)) = contact.record_mut().get_mut("value") {
                for entry in entries.iter_mut().filter_map(Value::as_object_mut) {
                    entry.insert(DATASET_CONTACT_EMAIL.to_string(), email_field());
                }
            }
        }
        None => {
            let mut entry = Map::new();
            entry.insert(DATASET_CONTACT_EMAIL.to_string(), email_field());
            fields.push(FieldRecord::compound(DATASET_CONTACT, vec![entry]).into());
        }
    }
    Ok(())
}

/// Promotes `type_name` in `block` to a multi-valued field. Absent blocks and
/// fields are skipped.
pub fn promote_field(document: &mut Value, block: &str, type_name: &str) -> RefineResult<bool> {
    let Some(fields) = block_fields(document, block)? else {
        return Ok(false);
    };
    Ok(find_field(type_name, fields)
        .map(|mut field| field.promote_to_multiple())
        .unwrap_or(false))
}

/// Rebuilds `datasetVersion` from `metadataBlocks` plus whichever of `keep`
/// are present, in that order. Everything else is dropped.
pub fn retain_dataset_version(document: &mut Value, keep: &[&str]) -> RefineResult<()> {
    let version = dataset_version(document)?;
    if !version.contains_key(METADATA_BLOCKS) {
        return Err(RefineError::missing_path(&[DATASET_VERSION, METADATA_BLOCKS]));
    }

    let mut previous = std::mem::take(version);
    let mut retained = Map::new();
    for key in std::iter::once(METADATA_BLOCKS).chain(keep.iter().copied()) {
        if let Some(value) = previous.remove(key) {
            retained.insert(key.to_string(), value);
        }
    }
    *version = retained;
    Ok(())
}

/// Resolves `license` inside a `datasetVersion` object, or drops it
/// according to `policy`.
pub fn refine_license(version: &mut Map<String, Value>, policy: LicensePolicy) {
    let Some(license) = version.get(LICENSE) else {
        return;
    };
    let dropped = license.as_str() == Some(NO_LICENSE)
        || (policy == LicensePolicy::DropNoneOrBlank && is_blank(license));

    if dropped {
        version.shift_remove(LICENSE);
    } else {
        let resolved = resolve_license(license);
        version.insert(LICENSE.to_string(), resolved);
    }
}

/// Removes a top-level `metadataLanguage` of `"undefined"`
pub fn drop_undefined_language(document: &mut Value) -> bool {
    let Some(root) = document.as_object_mut() else {
        return false;
    };
    if root.get(METADATA_LANGUAGE).and_then(Value::as_str) == Some(UNDEFINED_LANGUAGE) {
        root.shift_remove(METADATA_LANGUAGE);
        return true;
    }
    false
}
