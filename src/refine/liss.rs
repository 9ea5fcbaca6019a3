//! LISS panel refinement
//!
//! Links the DAB page through the DOI in `persistentUrl`, strips the
//! `(LISS)` style annotations from topic labels and fixes the spelling of
//! the distributor.

use crate::document::{block_fields, top_level_str, visit_fields, Document, CITATION};
use crate::error::{RefineError, RefineResult};

use super::edit::inject_dab_link;
use super::values::{clean_topic_label, extract_doi_from_url, normalize_distributor_name};

pub const PERSISTENT_URL: &str = "persistentUrl";
pub const TOPIC_CLASS_VALUE: &str = "topicClassValue";
pub const DISTRIBUTOR_NAME: &str = "distributorName";

pub fn refine(mut document: Document, dab_base_url: &str) -> RefineResult<Document> {
    let persistent_url = top_level_str(&document, PERSISTENT_URL)
        .ok_or_else(|| RefineError::missing_identifier(PERSISTENT_URL))?;
    let doi = extract_doi_from_url(persistent_url)?;
    inject_dab_link(&mut document, &doi, dab_base_url);

    if let Some(fields) = block_fields(&mut document, CITATION)? {
        visit_fields(TOPIC_CLASS_VALUE, fields, &mut |field| {
            field.map_text(|topic| Ok(clean_topic_label(topic)))
        })?;
        visit_fields(DISTRIBUTOR_NAME, fields, &mut |field| {
            field.map_text(|name| Ok(normalize_distributor_name(name)))
        })?;
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const DAB: &str = "https://dab.surf.nl/dataset?pid=";

    fn document(persistent_url: Option<&str>) -> Document {
        let mut document = json!({
            "datasetVersion": {
                "dataAccessPlace": "<a href=\"https://dab.surf.nl\">https://dab.surf.nl</a>",
                "metadataBlocks": {
                    "citation": {
                        "fields": [
                            {
                                "typeName": "topicClassValue",
                                "value": "Social Sciences (LISS)"
                            },
                            {
                                "typeName": "topicClassification",
                                "typeClass": "compound",
                                "multiple": true,
                                "value": [
                                    {"topicClassValue": {
                                        "typeName": "topicClassValue",
                                        "value": "Health (LISS/ELSST)"
                                    }},
                                    {"topicClassValue": {
                                        "typeName": "topicClassValue",
                                        "value": "Politics"
                                    }}
                                ]
                            },
                            {
                                "typeName": "distributor",
                                "typeClass": "compound",
                                "multiple": true,
                                "value": [
                                    {"distributorName": {
                                        "typeName": "distributorName",
                                        "value": "CentERdata"
                                    }}
                                ]
                            }
                        ]
                    }
                }
            }
        });
        if let Some(url) = persistent_url {
            document["persistentUrl"] = Value::from(url);
        }
        document
    }

    #[test]
    fn test_refine_liss() {
        let output = refine(document(Some("https://doi.org/10.17026/dans-zm4-yfdv")), DAB).unwrap();

        let url = "https://dab.surf.nl/dataset?pid=doi:10.17026/dans-zm4-yfdv";
        assert_eq!(
            output["datasetVersion"]["dataAccessPlace"],
            json!(format!("<a href=\"{url}\">{url}</a>"))
        );

        let fields = &output["datasetVersion"]["metadataBlocks"]["citation"]["fields"];
        assert_eq!(fields[0]["value"], json!("Social Sciences"));
        assert_eq!(fields[1]["value"][0]["topicClassValue"]["value"], json!("Health"));
        assert_eq!(fields[1]["value"][1]["topicClassValue"]["value"], json!("Politics"));
        assert_eq!(fields[2]["value"][0]["distributorName"]["value"], json!("Centerdata"));
    }

    #[test]
    fn test_missing_persistent_url() {
        let err = refine(document(None), DAB).unwrap_err();
        assert_eq!(err, RefineError::missing_identifier(PERSISTENT_URL));
        assert_eq!(err.to_string(), "DOI is missing from the metadata");
    }

    #[test]
    fn test_malformed_persistent_url() {
        let err = refine(document(Some("https://example.org/10.1234/x")), DAB).unwrap_err();
        assert!(matches!(err, RefineError::Format { .. }));
    }
}
