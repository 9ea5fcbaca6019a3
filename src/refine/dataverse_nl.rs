//! DataverseNL refinement
//!
//! Adds the portal contact email, drops an `undefined` metadata language,
//! trims `datasetVersion` down to what the target Dataverse accepts on import
//! and makes a few citation fields multi-valued.

use crate::document::{dataset_version, Document, CITATION};
use crate::error::RefineResult;

use super::cbs::ALTERNATIVE_TITLE;
use super::edit::{
    drop_undefined_language, inject_contact_email, promote_field, refine_license,
    retain_dataset_version, LicensePolicy, LICENSE,
};

pub const TERMS_OF_USE: &str = "termsOfUse";
pub const TERMS_OF_ACCESS: &str = "termsOfAccess";
pub const PRODUCTION_PLACE: &str = "productionPlace";
pub const SERIES: &str = "series";

/// Citation fields that are single-valued in DataverseNL exports
const PROMOTED_FIELDS: [&str; 3] = [PRODUCTION_PLACE, SERIES, ALTERNATIVE_TITLE];

pub fn refine(mut document: Document, contact_email: &str) -> RefineResult<Document> {
    inject_contact_email(&mut document, contact_email)?;
    drop_undefined_language(&mut document);

    retain_dataset_version(&mut document, &[TERMS_OF_USE, TERMS_OF_ACCESS, LICENSE])?;
    refine_license(dataset_version(&mut document)?, LicensePolicy::DropNone);

    for type_name in PROMOTED_FIELDS {
        promote_field(&mut document, CITATION, type_name)?;
    }

    Ok(document)
}
