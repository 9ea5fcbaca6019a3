//! SICADA refinement: fixed contact email and a bare `datasetVersion`.

use crate::document::Document;
use crate::error::RefineResult;

use super::edit::{inject_contact_email, retain_dataset_version};

pub fn refine(mut document: Document, contact_email: &str) -> RefineResult<Document> {
    inject_contact_email(&mut document, contact_email)?;
    retain_dataset_version(&mut document, &[])?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RefineError;
    use serde_json::json;

    #[test]
    fn test_refine_sicada() {
        let input = json!({
            "datasetVersion": {
                "id": 42,
                "termsOfUse": "terms",
                "license": "CC0",
                "metadataBlocks": {
                    "citation": {"fields": [{"typeName": "title", "value": "Survey"}]}
                }
            }
        });
        let output = refine(input, "info@sicada.nl").unwrap();

        let version = output["datasetVersion"].as_object().unwrap();
        assert_eq!(version.len(), 1);
        let fields = &version["metadataBlocks"]["citation"]["fields"];
        assert_eq!(fields[0]["value"], json!("Survey"));
        assert_eq!(
            fields[1]["value"][0]["datasetContactEmail"]["value"],
            json!("info@sicada.nl")
        );
    }

    #[test]
    fn test_missing_citation() {
        let input = json!({"datasetVersion": {"metadataBlocks": {}}});
        assert!(matches!(
            refine(input, "info@sicada.nl"),
            Err(RefineError::MissingPath { .. })
        ));
    }
}
