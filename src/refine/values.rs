//! Value-level transformations shared by the refinement pipelines

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::error::{RefineError, RefineResult};

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://\S+$").expect("URL pattern compiles"));

static ANNOTATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(.*?\)").expect("annotation pattern compiles"));

const STATLINE_DATASET_URL: &str = "https://opendata.cbs.nl/#/CBS/nl/dataset/";
const DISTRIBUTION_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S.%f";
const DOI_HOST: &str = "doi.org";

const CC0_CODE: &str = "CC0";
const CC0_LABEL: &str = "CC0 1.0";

/// URL fragments of the known Creative Commons licences, most specific
/// match first
const CREATIVE_COMMONS_LICENSES: [(&str, &str); 7] = [
    ("/by/4.0", "CC BY 4.0"),
    ("/by-nc/4.0", "CC BY-NC 4.0"),
    ("/by-sa/4.0", "CC BY-SA 4.0"),
    ("/by-nc-sa/4.0", "CC BY-NC-SA 4.0"),
    ("/by-nc-nd/4.0", "CC BY-NC-ND 4.0"),
    ("/by-nd/4.0", "CC BY-ND 4.0"),
    ("zero/1.0", CC0_LABEL),
];

const DANS_LICENSE_ID: &str = "10.17026/fp39-0x58";
const DANS_LICENSE_LABEL: &str = "DANS Licence";

/// Splits a combined keyword on `/`. Empty fragments are kept.
pub fn split_keywords(keyword: &str) -> Vec<String> {
    keyword.split('/').map(String::from).collect()
}

/// Resolves a license code or `{"uri": ...}` object to its display label.
///
/// `"CC0"` becomes `"CC0 1.0"`, a URI is matched against the Creative
/// Commons and DANS licences (unknown URIs resolve to `""`), and anything
/// else is returned unchanged.
pub fn resolve_license(license: &Value) -> Value {
    match license {
        Value::String(code) if code == CC0_CODE => Value::from(CC0_LABEL),
        Value::Object(described) => match described.get("uri").and_then(Value::as_str) {
            Some(uri) => Value::from(license_label(uri)),
            None => license.clone(),
        },
        other => other.clone(),
    }
}

/// Display label for a license URI, `""` when the URI is not recognised
pub fn license_label(uri: &str) -> &'static str {
    if uri.contains("creativecommons") {
        CREATIVE_COMMONS_LICENSES
            .iter()
            .find(|(fragment, _)| uri.contains(fragment))
            .map(|(_, label)| *label)
            .unwrap_or_default()
    } else if uri.contains(DANS_LICENSE_ID) {
        DANS_LICENSE_LABEL
    } else {
        ""
    }
}

/// `2023-10-29T07:58:43.398551` to `2023-10-29`
pub fn reformat_distribution_date(timestamp: &str) -> RefineResult<String> {
    NaiveDateTime::parse_from_str(timestamp, DISTRIBUTION_TIMESTAMP)
        .map(|parsed| parsed.format("%Y-%m-%d").to_string())
        .map_err(|e| {
            RefineError::format(
                "distributionDate",
                format!("{timestamp:?} is not a YYYY-MM-DDTHH:MM:SS.ffffff timestamp ({e})"),
            )
        })
}

/// Removes every parenthesized annotation, e.g. `Politics (LISS)` to `Politics`
pub fn clean_topic_label(topic: &str) -> String {
    ANNOTATION_PATTERN.replace_all(topic, "").into_owned()
}

pub fn normalize_distributor_name(name: &str) -> String {
    match name {
        "CentERdata" => "Centerdata".to_string(),
        other => other.to_string(),
    }
}

/// `https://doi.org/10.17026/dans-zm4-yfdv` to `doi:10.17026/dans-zm4-yfdv`
pub fn extract_doi_from_url(raw: &str) -> RefineResult<String> {
    let url = Url::parse(raw)
        .map_err(|e| RefineError::format("persistentUrl", format!("{raw:?} is not a URL ({e})")))?;

    if url.scheme() != "https" || url.host_str() != Some(DOI_HOST) {
        return Err(RefineError::format(
            "persistentUrl",
            format!("{raw:?} is not an https://{DOI_HOST} link"),
        ));
    }

    let path = url.path().trim_start_matches('/');
    if path.is_empty() {
        return Err(RefineError::format(
            "persistentUrl",
            format!("{raw:?} does not contain a DOI"),
        ));
    }

    Ok(format!("doi:{path}"))
}

pub fn is_url(candidate: &str) -> bool {
    URL_PATTERN.is_match(candidate)
}

/// Turns a StatLine table code into a link to the table. URLs are kept.
pub fn format_statline_url(link: &str) -> String {
    if is_url(link) {
        link.to_string()
    } else {
        format!("{STATLINE_DATASET_URL}{link}")
    }
}

/// Python-style emptiness: `null`, `false`, `""`, `[]` and `{}`
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(_) => false,
    }
}
