use std::fs;

use crate::{
    errors::StatementParseError,
    parsers::prelude::*,
    pdf::{PdfTextExtractor, TextExtractor, looks_like_pdf},
    types::Transaction,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    #[serde(rename = "pdf")]
    Pdf,
    #[serde(rename = "text")]
    Text,
}

impl FileFormat {
    fn extract_text(
        &self,
        bytes: Vec<u8>,
        extractor: &dyn TextExtractor,
    ) -> Result<String, StatementParseError> {
        match self {
            FileFormat::Pdf => extractor.extract_text(&bytes),
            FileFormat::Text => String::from_utf8(bytes)
                .map_err(|e| StatementParseError::ParseFailed(format!("Invalid UTF-8 text: {}", e))),
        }
    }

    fn detect(filename: Option<&str>, content: Option<&[u8]>) -> Result<Self, StatementParseError> {
        if let Some(content) = content {
            if looks_like_pdf(content) {
                return Ok(FileFormat::Pdf);
            }
            if let Ok(text) = std::str::from_utf8(content) {
                if StatementParser::is_supported(filename, text) {
                    return Ok(FileFormat::Text);
                }
            }
        }

        if let Some(filename) = filename {
            if let Some(ext) = filename.rsplit('.').next() {
                match ext.to_lowercase().as_str() {
                    "pdf" => return Ok(FileFormat::Pdf),
                    "txt" => return Ok(FileFormat::Text),
                    _ => {}
                }
            }
        }

        Err(StatementParseError::UnsupportedFormat)
    }
}

/// ```rust,ignore
/// let records = StatementBuilder::new()
///     .filename("statements/2020-03.pdf")
///     .parse_records()?;
/// ```
#[derive(Default)]
pub struct StatementBuilder {
    content: Option<Vec<u8>>,
    filepath: Option<String>,
    format: Option<FileFormat>,
    markers: Option<Markers>,
    extractor: Option<Box<dyn TextExtractor>>,
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Already extracted statement text.
    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.as_bytes().to_vec());
        self
    }

    /// Raw document bytes, typically a PDF.
    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.content = Some(bytes.to_vec());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn markers(mut self, markers: Markers) -> Self {
        self.markers = Some(markers);
        self
    }

    pub fn extractor<E: TextExtractor + 'static>(mut self, extractor: E) -> Self {
        self.extractor = Some(Box::new(extractor));
        self
    }

    pub fn parse(self) -> Result<Vec<Transaction>, StatementParseError> {
        self.parse_into::<Transaction>()
    }

    pub fn parse_into<T>(self) -> Result<Vec<T>, StatementParseError>
    where
        T: TryFrom<TransactionRecord, Error = StatementParseError>,
    {
        self.parse_records()?.into_iter().map(T::try_from).collect()
    }

    /// Records exactly as found in the text; never fails once text is available.
    pub fn parse_records(self) -> Result<Vec<TransactionRecord>, StatementParseError> {
        let format = self
            .format
            .map(Ok)
            .unwrap_or_else(|| FileFormat::detect(self.filepath.as_deref(), self.content.as_deref()))?;

        let bytes = self.content.map(Ok).unwrap_or_else(|| {
            self.filepath
                .as_deref()
                .ok_or(StatementParseError::MissingContentAndFilepath)
                .and_then(|path| fs::read(path).map_err(Into::into))
        })?;

        let extractor: Box<dyn TextExtractor> = match self.extractor {
            Some(extractor) => extractor,
            None => Box::new(PdfTextExtractor),
        };
        let text = format.extract_text(bytes, extractor.as_ref())?;

        let parser = StatementParser::new(self.markers.unwrap_or_default());
        let records = parser.parse(&text);
        debug!(?format, records = records.len(), "parsed statement");
        Ok(records)
    }
}
