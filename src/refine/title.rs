//! Alternative title normalization for CBS datasets
//!
//! CBS titles follow the legacy Dutch StatLine naming scheme where `JJJJ`
//! (year), `MM` (month), `DD` (day) and `VV` (version) placeholders are part
//! of the table name. Regular names are cleaned by stripping those
//! placeholders; irregular historical names are looked up in the DSC
//! reference table first.

use crate::reference::ReferenceTable;

const VERSION_SUFFIX: &str = "VV";
const YEAR_SUFFIX: &str = "JJJJ";
const DAY_TOKEN: &str = "JJJJMMDD";
const MONTH_TOKEN: &str = "JJJJMM";

/// Placeholder prefixes in front of the BUS/TAB table kind
const KIND_REWRITES: [(&str, &str); 4] = [
    ("JJJJBUS", "BUS"),
    ("VVBUS", "BUS"),
    ("JJJJTAB", "TAB"),
    ("VVTAB", "TAB"),
];

/// Canonical form of an alternative title.
///
/// An exact hit in `table` wins and is returned as stored; everything else
/// goes through [`clean`].
pub fn normalize_title(raw: &str, table: &ReferenceTable) -> String {
    match table.get(raw) {
        Some(canonical) => canonical.to_string(),
        None => clean(raw),
    }
}

/// Strips the date and version placeholders from a title.
///
/// The steps run in a fixed order: `VV` before `JJJJ` at the end, `JJJJMMDD`
/// before `JJJJMM`, and the BUS/TAB rewrites only after all date tokens are
/// gone. `CWIJJJJMMDDTABVV` becomes `CWITAB`.
pub fn clean(raw: &str) -> String {
    let mut title = raw.to_uppercase();

    strip_suffix(&mut title, VERSION_SUFFIX);
    strip_suffix(&mut title, YEAR_SUFFIX);

    remove_first(&mut title, DAY_TOKEN);
    remove_first(&mut title, MONTH_TOKEN);

    for (placeholder, kind) in KIND_REWRITES {
        if title.contains(placeholder) {
            title = title.replace(placeholder, kind);
        }
    }

    title.trim_end_matches('_').to_string()
}

fn strip_suffix(title: &mut String, suffix: &str) {
    if title.ends_with(suffix) {
        title.truncate(title.len() - suffix.len());
    }
}

fn remove_first(title: &mut String, token: &str) {
    if let Some(index) = title.find(token) {
        title.replace_range(index..index + token.len(), "");
    }
}
