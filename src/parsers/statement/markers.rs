use serde::{Deserialize, Serialize};

use crate::errors::StatementParseError;

const NOISE_KEYWORDS: &[&str] = &[
    "Datum",
    "Auszugsnummer",
    "Buchung",
    "Valuta",
    "IBAN",
    "BIC",
    "Seite",
    "ING-DiBa AG",
    "Herrn",
];

const SUMMARY_MARKERS: &[&str] = &[
    "Neuer Saldo",
    "Alter Saldo",
    "Kunden-Information",
    "Kontoüberziehung",
    "Vorliegender Freistellungsauftrag",
    "Bitte beachten",
];

const HEADER_MARKER: &str = "Valuta";

/// Literal markers that drive header removal and fragment cleaning.
///
/// Order matters: the second pass strips at the first summary marker *in list
/// order* that occurs in a fragment.
///
/// ```rust,ignore
/// let markers: Markers = Markers::from_json(r#"{"summary_markers": ["Closing balance"]}"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub noise_keywords: Vec<String>,
    pub summary_markers: Vec<String>,
    pub header_marker: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            noise_keywords: NOISE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            summary_markers: SUMMARY_MARKERS.iter().map(|s| s.to_string()).collect(),
            header_marker: HEADER_MARKER.to_string(),
        }
    }
}

impl Markers {
    /// Missing fields keep their default marker set.
    pub fn from_json(content: &str) -> Result<Self, StatementParseError> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Start of the earliest occurrence of any of `markers` in `text`.
pub fn earliest_marker<S: AsRef<str>>(text: &str, markers: &[S]) -> Option<usize> {
    markers
        .iter()
        .map(AsRef::as_ref)
        .filter(|marker| !marker.is_empty())
        .filter_map(|marker| text.find(marker))
        .min()
}
