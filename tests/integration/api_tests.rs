//! API integration tests

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use metadata_refiner::{
    api,
    reference::ReferenceTable,
    services::{refinement::RefinementService, Services},
    AppConfig, AppState,
};

fn app() -> Router {
    let config = AppConfig::default();
    let titles: ReferenceTable = [("PS Speur- en ontwikkelingswerk", "PS_SPEURONTWIKKELING")]
        .into_iter()
        .collect();
    let services = Services {
        refinement: RefinementService::with_reference_table(config.refinement.clone(), titles),
    };
    api::router(AppState {
        config: config.into(),
        services: services.into(),
    })
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn post(path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(request).await
}

async fn get(path: &str) -> (StatusCode, Value) {
    send(Request::builder().uri(path).body(Body::empty()).unwrap()).await
}

fn with_citation(fields: Value) -> Value {
    json!({
        "datasetVersion": {
            "dataAccessPlace": "https://dab.surf.nl",
            "metadataBlocks": {
                "citation": { "fields": fields }
            }
        }
    })
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let (status, body) = get("/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_cbs_refinement() {
    let metadata = with_citation(json!([
        {
            "typeName": "alternativeTitle",
            "typeClass": "primitive",
            "multiple": true,
            "value": ["PS Speur- en ontwikkelingswerk", "WoonbasePopulatieWoonruimtenJJJJVV"]
        },
        {
            "typeName": "keyword",
            "typeClass": "primitive",
            "multiple": true,
            "value": ["keyword1/keyword2"]
        }
    ]));
    let (status, body) = post("/metadata-refinement/cbs", json!({ "metadata": metadata })).await;
    assert_eq!(status, StatusCode::OK);

    let fields = &body["datasetVersion"]["metadataBlocks"]["citation"]["fields"];
    assert_eq!(
        fields[0]["value"],
        json!(["PS_SPEURONTWIKKELING", "WOONBASEPOPULATIEWOONRUIMTEN"])
    );
    assert_eq!(fields[1]["value"], json!(["keyword1", "keyword2"]));
}

#[tokio::test]
async fn test_cbs_missing_citation_fields() {
    let metadata = json!({"datasetVersion": {"metadataBlocks": {}}});
    let (status, body) = post("/metadata-refinement/cbs", json!({ "metadata": metadata })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "MissingPath");
    assert_eq!(
        body["message"],
        "Missing required key: datasetVersion.metadataBlocks.citation"
    );
}

#[tokio::test]
async fn test_cid_refinement() {
    let metadata = with_citation(json!([{
        "typeName": "distributionDate",
        "typeClass": "primitive",
        "multiple": false,
        "value": "2023-10-29T07:58:43.398551"
    }]));
    let (status, body) = post("/metadata-refinement/cid", json!({ "metadata": metadata })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["datasetVersion"]["metadataBlocks"]["citation"]["fields"][0]["value"],
        "2023-10-29"
    );
}

#[tokio::test]
async fn test_cid_bad_date() {
    let metadata = with_citation(json!([{
        "typeName": "distributionDate",
        "value": "yesterday"
    }]));
    let (status, body) = post("/metadata-refinement/cid", json!({ "metadata": metadata })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadFormat");
}

#[tokio::test]
async fn test_liss_refinement() {
    let mut metadata = with_citation(json!([{
        "typeName": "distributor",
        "typeClass": "compound",
        "multiple": true,
        "value": [{
            "distributorName": {
                "typeName": "distributorName",
                "multiple": false,
                "typeClass": "primitive",
                "value": "CentERdata"
            }
        }]
    }]));
    metadata["persistentUrl"] = json!("https://doi.org/10.17026/dans-zm4-yfdv");

    let (status, body) = post("/metadata-refinement/liss", json!({ "metadata": metadata })).await;
    assert_eq!(status, StatusCode::OK);

    let url = "https://dab.surf.nl/dataset?pid=doi:10.17026/dans-zm4-yfdv";
    assert_eq!(
        body["datasetVersion"]["dataAccessPlace"],
        format!("<a href=\"{url}\">{url}</a>")
    );
    assert_eq!(
        body["datasetVersion"]["metadataBlocks"]["citation"]["fields"][0]["value"][0]
            ["distributorName"]["value"],
        "Centerdata"
    );
}

#[tokio::test]
async fn test_liss_missing_doi() {
    let metadata = with_citation(json!([]));
    let (status, body) = post("/metadata-refinement/liss", json!({ "metadata": metadata })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "DOI is missing from the metadata");
}

#[tokio::test]
async fn test_datastation_refinement() {
    let mut metadata = with_citation(json!([]));
    metadata["datasetVersion"]["license"] = json!("NONE");
    metadata["datasetVersion"]["datasetPersistentId"] = json!("doi:10.17026/dans-abc");

    let (status, body) =
        post("/metadata-refinement/datastation", json!({ "metadata": metadata })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["datasetVersion"].get("license").is_none());

    let url = "https://dab.surf.nl/dataset?pid=doi:10.17026/dans-abc";
    assert_eq!(
        body["datasetVersion"]["dataAccessPlace"],
        format!("<a href=\"{url}\">{url}</a>")
    );
}

#[tokio::test]
async fn test_datastation_missing_doi() {
    let metadata = with_citation(json!([]));
    let (status, body) =
        post("/metadata-refinement/datastation", json!({ "metadata": metadata })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MissingIdentifier");
}

#[tokio::test]
async fn test_dataverse_nl_refinement() {
    let mut metadata = with_citation(json!([{
        "typeName": "productionPlace",
        "multiple": false,
        "typeClass": "primitive",
        "value": "Tilburg"
    }]));
    metadata["metadataLanguage"] = json!("undefined");
    metadata["datasetVersion"]["license"] = json!("CC0");

    let (status, body) =
        post("/metadata-refinement/dataverse-nl", json!({ "metadata": metadata })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("metadataLanguage").is_none());

    let version = &body["datasetVersion"];
    assert!(version.get("dataAccessPlace").is_none());
    assert_eq!(version["license"], "CC0 1.0");

    let fields = &version["metadataBlocks"]["citation"]["fields"];
    assert_eq!(fields[0]["value"], json!(["Tilburg"]));
    assert_eq!(fields[1]["value"][0]["datasetContactEmail"]["value"], "portal@odissei.nl");
}

#[tokio::test]
async fn test_sicada_refinement() {
    let mut metadata = with_citation(json!([]));
    metadata["datasetVersion"]["license"] = json!("CC0");

    let (status, body) = post("/metadata-refinement/sicada", json!({ "metadata": metadata })).await;
    assert_eq!(status, StatusCode::OK);

    let version = body["datasetVersion"].as_object().unwrap();
    assert_eq!(version.keys().collect::<Vec<_>>(), vec!["metadataBlocks"]);
    assert_eq!(
        version["metadataBlocks"]["citation"]["fields"][0]["value"][0]["datasetContactEmail"]
            ["value"],
        "info@sicada.nl"
    );
}

#[tokio::test]
async fn test_array_metadata() {
    let first = with_citation(json!([{
        "typeName": "distributionDate",
        "value": "2020-01-01T00:00:00.0"
    }]));
    let second = with_citation(json!([]));
    let (status, body) =
        post("/metadata-refinement/cid", json!({ "metadata": [first, second] })).await;
    assert_eq!(status, StatusCode::OK);

    let documents = body.as_array().unwrap();
    assert_eq!(documents.len(), 2);
    assert_eq!(
        documents[0]["datasetVersion"]["metadataBlocks"]["citation"]["fields"][0]["value"],
        "2020-01-01"
    );
}

#[tokio::test]
async fn test_array_metadata_fails_as_a_whole() {
    let good = with_citation(json!([]));
    let (status, _) = post(
        "/metadata-refinement/sicada",
        json!({ "metadata": [good, {"datasetVersion": {}}] }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_scalar_metadata_rejected() {
    let (status, body) = post("/metadata-refinement/cid", json!({ "metadata": 42 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_openapi_document() {
    let (status, body) = get("/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/metadata-refinement/dataverse-nl").is_some());
}
