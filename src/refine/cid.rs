//! CID refinement: distribution timestamps are cut down to their date.

use crate::document::{block_fields, find_field, Document, CITATION};
use crate::error::RefineResult;

use super::values::reformat_distribution_date;

pub const DISTRIBUTION_DATE: &str = "distributionDate";

pub fn refine(mut document: Document) -> RefineResult<Document> {
    if let Some(fields) = block_fields(&mut document, CITATION)? {
        if let Some(mut field) = find_field(DISTRIBUTION_DATE, fields) {
            field.map_text(reformat_distribution_date)?;
        }
    }
    Ok(document)
}
