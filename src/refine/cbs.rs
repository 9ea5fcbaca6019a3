//! CBS (Statistics Netherlands) refinement
//!
//! - alternative titles are mapped through the DSC table or cleaned,
//! - combined keywords are split on `/`,
//! - StatLine table codes become links,
//! - the DAB link is built from the CBS identifier.

use serde_json::{Map, Value};

use crate::config::CbsConfig;
use crate::document::{
    block_fields, find_field, find_field_ref, require_block_fields, Document, FieldRecord,
    FieldValue, CITATION,
};
use crate::error::RefineResult;
use crate::reference::ReferenceTable;

use super::edit::inject_dab_link;
use super::title::normalize_title;
use super::values::{format_statline_url, is_url, split_keywords};

pub const ALTERNATIVE_TITLE: &str = "alternativeTitle";
pub const KEYWORD: &str = "keyword";
pub const KEYWORD_VALUE: &str = "keywordValue";
pub const CBS_METADATA: &str = "CBSMetadata";
pub const STATLINE_TABLE: &str = "statlineTabel";

pub fn refine(
    mut document: Document,
    titles: &ReferenceTable,
    cbs: &CbsConfig,
    dab_base_url: &str,
) -> RefineResult<Document> {
    let citation = require_block_fields(&mut document, CITATION)?;

    if let Some(mut field) = find_field(ALTERNATIVE_TITLE, citation) {
        field.map_text(|title| Ok(normalize_title(title, titles)))?;
    }

    if let Some(mut field) = find_field(KEYWORD, citation) {
        field.map_value(|value| Ok(split_keyword_value(value)))?;
    }

    if let Some(fields) = block_fields(&mut document, CBS_METADATA)? {
        if let Some(mut field) = find_field(STATLINE_TABLE, fields) {
            field.map_value(|value| Ok(format_statline_links(value)))?;
        }
    }

    if let Some(identifier) = cbs_identifier(&document, &cbs.identifier_field) {
        let doi = format!("doi:{}/{}", cbs.doi_prefix, identifier);
        inject_dab_link(&mut document, &doi, dab_base_url);
    }

    Ok(document)
}

/// Splits every keyword of a keyword field.
///
/// String lists are split in place. Each fragment of a compound entry becomes
/// a fresh entry holding only a `keywordValue` sub-field; entries without a
/// `keywordValue` are dropped. A scalar keyword is left alone since splitting
/// it would change the field's cardinality.
fn split_keyword_value(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Multiple(keywords) => FieldValue::Multiple(
            keywords
                .iter()
                .flat_map(|keyword| split_keywords(keyword))
                .collect(),
        ),
        FieldValue::Compound(entries) => {
            FieldValue::Compound(entries.iter().flat_map(split_keyword_entry).collect())
        }
        other => other,
    }
}

fn split_keyword_entry(entry: &Map<String, Value>) -> Vec<Map<String, Value>> {
    let Some(keyword) = entry
        .get(KEYWORD_VALUE)
        .and_then(|sub_field| sub_field.get("value"))
        .and_then(Value::as_str)
    else {
        return Vec::new();
    };

    split_keywords(keyword)
        .into_iter()
        .map(|fragment| {
            let mut split = Map::new();
            split.insert(
                KEYWORD_VALUE.to_string(),
                FieldRecord::primitive(KEYWORD_VALUE, fragment).into(),
            );
            split
        })
        .collect()
}

/// Existing links come first, followed by the links built from table codes.
fn format_statline_links(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Single(link) => FieldValue::Single(format_statline_url(&link)),
        FieldValue::Multiple(links) => {
            let (urls, codes): (Vec<String>, Vec<String>) =
                links.into_iter().partition(|link| is_url(link));
            FieldValue::Multiple(
                urls.into_iter()
                    .chain(codes.iter().map(|code| format_statline_url(code)))
                    .collect(),
            )
        }
        other => other,
    }
}

/// CBS identifier of the dataset, read from the `CBSMetadata` block
fn cbs_identifier(document: &Document, identifier_field: &str) -> Option<String> {
    let fields = document
        .pointer("/datasetVersion/metadataBlocks/CBSMetadata/fields")?
        .as_array()?;
    find_field_ref(identifier_field, fields)?
        .get("value")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|identifier| !identifier.is_empty())
        .map(str::to_owned)
}
