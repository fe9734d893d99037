use std::{any::Any, panic, path::Path};

use crate::errors::StatementParseError;

/// Turns a document into plain UTF-8 text.
pub trait TextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, StatementParseError>;

    fn extract_file(&self, path: &Path) -> Result<String, StatementParseError> {
        let bytes = std::fs::read(path)?;
        self.extract_text(&bytes)
    }
}

/// [`TextExtractor`] backed by the `pdf-extract` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, StatementParseError> {
        contain_panic(|| {
            pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| StatementParseError::PdfExtractFailed(e.to_string()))
        })
    }
}

/// `pdf-extract` panics on some malformed documents; turn that into an error
/// so a single file cannot abort a batch.
fn contain_panic<F>(extract: F) -> Result<String, StatementParseError>
where
    F: FnOnce() -> Result<String, StatementParseError> + panic::UnwindSafe,
{
    panic::catch_unwind(extract).unwrap_or_else(|payload| {
        Err(StatementParseError::PdfExtractFailed(format!(
            "extractor panicked: {}",
            panic_message(payload.as_ref())
        )))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF-")
}
