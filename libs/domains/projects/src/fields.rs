//! Field-name mapping between the HTTP surface and storage.
//!
//! Stored documents keep their historical Croatian field names
//! (`naziv_projekta`, `datum_pocetka`, ...), while clients see English
//! ones (`project_name`, `start_date`, ...). The table below is the
//! single source of truth for that renaming; the serde attributes on
//! [`crate::models::Project`] and [`crate::models::ProjectInput`] are
//! asserted against it in tests.
//!
//! The mapping is pure renaming only: values pass through untouched.

use serde_json::{Map, Value};

/// (external, internal) name pairs for every client-editable field.
pub const FIELD_PAIRS: [(&str, &str); 7] = [
    ("project_name", "naziv_projekta"),
    ("project_description", "opis_projekta"),
    ("jobs_done", "obavljeni_poslovi"),
    ("project_price", "cijena_projekta"),
    ("start_date", "datum_pocetka"),
    ("end_date", "datum_zavrsetka"),
    ("members", "clanovi"),
];

/// Look up the internal (stored) name for an external field name.
pub fn to_internal(external: &str) -> Option<&'static str> {
    FIELD_PAIRS
        .iter()
        .find(|(ext, _)| *ext == external)
        .map(|(_, int)| *int)
}

/// Look up the external (client-facing) name for an internal field name.
pub fn to_external(internal: &str) -> Option<&'static str> {
    FIELD_PAIRS
        .iter()
        .find(|(_, int)| *int == internal)
        .map(|(ext, _)| *ext)
}

/// Rename the keys of an internally-named JSON object to their external
/// names. Keys without a mapping (ids, timestamps) are kept as-is.
pub fn externalize(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| {
            let name = to_external(key).unwrap_or(key.as_str());
            (name.to_string(), value.clone())
        })
        .collect()
}
