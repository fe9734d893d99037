use super::dto::TransactionRecord;
use super::markers::Markers;
use super::reconstruct::reconstruct;
use super::segment::{has_amount, normalize_header, segment};
use crate::parsers::traits::Parser;

/// Recovers transactions from the flattened text of an account statement.
#[derive(Debug, Clone, Default)]
pub struct StatementParser {
    markers: Markers,
}

impl StatementParser {
    pub fn new(markers: Markers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }
}

impl Parser for StatementParser {
    type Output = TransactionRecord;

    fn is_supported(filename: Option<&str>, content: &str) -> bool {
        let has_text_extension = filename
            .map(|name| name.to_lowercase().ends_with(".txt"))
            .unwrap_or(true);

        let looks_like_statement = segment(content)
            .iter()
            .any(|seg| has_amount(seg.body));

        has_text_extension && looks_like_statement
    }

    fn parse(&self, content: &str) -> Vec<Self::Output> {
        let normalized = normalize_header(content, &self.markers.header_marker);
        reconstruct(normalized, &self.markers)
    }
}
