//! DANS Data Station refinement: license labels and the DAB link.

use serde_json::Value;

use crate::document::{dataset_version, Document};
use crate::error::{RefineError, RefineResult};

use super::edit::{inject_dab_link, refine_license, LicensePolicy};

pub const DATASET_PERSISTENT_ID: &str = "datasetPersistentId";

pub fn refine(mut document: Document, dab_base_url: &str) -> RefineResult<Document> {
    let version = dataset_version(&mut document)?;
    refine_license(version, LicensePolicy::DropNoneOrBlank);

    let doi = version
        .get(DATASET_PERSISTENT_ID)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| RefineError::missing_identifier(DATASET_PERSISTENT_ID))?;
    inject_dab_link(&mut document, &doi, dab_base_url);

    Ok(document)
}
