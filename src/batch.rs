//! Converts every PDF statement below a directory into a CSV file.

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use glob::{MatchOptions, Pattern, glob_with};
use tracing::{error, info, warn};

use crate::{
    errors::StatementParseError,
    parsers::prelude::*,
    pdf::TextExtractor,
    writer::write_csv_file,
};

#[derive(Debug)]
pub enum DocumentOutcome {
    Converted { output: PathBuf, records: usize },
    NoRecords,
    Failed(StatementParseError),
}

#[derive(Debug)]
pub struct DocumentReport {
    pub input: PathBuf,
    pub outcome: DocumentOutcome,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub documents: Vec<DocumentReport>,
}

impl BatchReport {
    pub fn converted(&self) -> usize {
        self.count(|outcome| matches!(outcome, DocumentOutcome::Converted { .. }))
    }

    pub fn without_records(&self) -> usize {
        self.count(|outcome| matches!(outcome, DocumentOutcome::NoRecords))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, DocumentOutcome::Failed(_)))
    }

    fn count(&self, predicate: impl Fn(&DocumentOutcome) -> bool) -> usize {
        self.documents
            .iter()
            .filter(|doc| predicate(&doc.outcome))
            .count()
    }
}

pub struct BatchConverter<E> {
    extractor: E,
    parser: StatementParser,
}

impl<E: TextExtractor> BatchConverter<E> {
    pub fn new(extractor: E, parser: StatementParser) -> Self {
        Self { extractor, parser }
    }

    /// All `*.pdf` files below `input_dir`, extension matched case-insensitively.
    pub fn find_documents(input_dir: &Path) -> Result<Vec<PathBuf>, StatementParseError> {
        if !input_dir.is_dir() {
            return Err(StatementParseError::ReadContentFailed(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory", input_dir.display()),
            )));
        }

        let pattern = format!(
            "{}/**/*.pdf",
            Pattern::escape(&input_dir.to_string_lossy())
        );
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };

        let mut paths: Vec<PathBuf> = glob_with(&pattern, options)
            .map_err(|e| StatementParseError::InputPatternInvalid(e.to_string()))?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Skipping unreadable path: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        Ok(paths)
    }

    pub fn convert_document(&self, pdf_path: &Path, output_dir: &Path) -> DocumentOutcome {
        info!("Processing file: {}", pdf_path.display());

        let text = match self.extractor.extract_file(pdf_path) {
            Ok(text) => text,
            Err(e) => {
                error!("Error extracting text from {}: {}", pdf_path.display(), e);
                return DocumentOutcome::Failed(e);
            }
        };

        let records = self.parser.parse(&text);
        if records.is_empty() {
            info!("No records found in {}", pdf_path.display());
            return DocumentOutcome::NoRecords;
        }

        let output = csv_path_for(pdf_path, output_dir);
        if let Err(e) = write_csv_file(&output, &records) {
            error!("Error creating CSV file {}: {}", output.display(), e);
            return DocumentOutcome::Failed(e);
        }

        info!(
            "Successfully converted {} to {}",
            pdf_path.display(),
            output.display()
        );
        DocumentOutcome::Converted {
            output,
            records: records.len(),
        }
    }

    /// One failing document never aborts the batch; only an unreadable input
    /// directory or an uncreatable output directory is an error.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchReport, StatementParseError> {
        fs::create_dir_all(output_dir).map_err(StatementParseError::WriteContentFailed)?;

        let documents = Self::find_documents(input_dir)?
            .into_iter()
            .map(|input| {
                let outcome = self.convert_document(&input, output_dir);
                DocumentReport { input, outcome }
            })
            .collect();

        Ok(BatchReport { documents })
    }
}

/// `<output_dir>/<input stem>.csv`
pub fn csv_path_for(pdf_path: &Path, output_dir: &Path) -> PathBuf {
    let stem = pdf_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{}.csv", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Treats file contents as already extracted text; `corrupt` fails.
    struct PlainTextExtractor;

    impl TextExtractor for PlainTextExtractor {
        fn extract_text(&self, bytes: &[u8]) -> Result<String, StatementParseError> {
            let text = String::from_utf8_lossy(bytes);
            if text.starts_with("corrupt") {
                return Err(StatementParseError::PdfExtractFailed("malformed xref".to_string()));
            }
            Ok(text.into_owned())
        }
    }

    fn converter() -> BatchConverter<PlainTextExtractor> {
        BatchConverter::new(PlainTextExtractor, StatementParser::default())
    }

    #[test]
    fn test_csv_path_for() {
        let path = csv_path_for(Path::new("in/2020/Statement_03.pdf"), Path::new("out"));
        assert_eq!(path, PathBuf::from("out/Statement_03.csv"));
    }

    #[test]
    fn test_find_documents_recursive_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("2020")).unwrap();
        fs::write(dir.path().join("a.pdf"), "x").unwrap();
        fs::write(dir.path().join("2020").join("b.PDF"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let found = BatchConverter::<PlainTextExtractor>::find_documents(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names.len(), 2);
        assert!(names.contains(&"a.pdf".to_string()));
        assert!(names.contains(&"b.PDF".to_string()));
    }

    #[test]
    fn test_find_documents_missing_directory() {
        let result = BatchConverter::<PlainTextExtractor>::find_documents(Path::new("no/such/dir"));
        assert!(matches!(
            result.unwrap_err(),
            StatementParseError::ReadContentFailed(_)
        ));
    }

    #[test]
    fn test_run_continues_after_failures() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let out_dir = output.path().join("csv");

        fs::write(input.path().join("march.pdf"), "Valuta02.03.2020Miete-111,1102.03.2020Ref 1").unwrap();
        fs::write(input.path().join("broken.pdf"), "corrupt").unwrap();
        fs::write(input.path().join("empty.pdf"), "nothing here").unwrap();

        let report = converter().run(input.path(), &out_dir).unwrap();

        assert_eq!(report.documents.len(), 3);
        assert_eq!(report.converted(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.without_records(), 1);

        let csv = fs::read_to_string(out_dir.join("march.csv")).unwrap();
        assert_eq!(csv, "data;description;value\n02.03.2020;Miete - Ref 1;-111,11\n");
        assert!(!out_dir.join("empty.csv").exists());
        assert!(!out_dir.join("broken.csv").exists());
    }

    #[test]
    fn test_convert_document_reports_record_count() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let pdf = input.path().join("april.pdf");
        fs::write(&pdf, "01.04.2020Rent-700,0002.04.2020Salary 2.500,00").unwrap();

        match converter().convert_document(&pdf, output.path()) {
            DocumentOutcome::Converted { output: path, records } => {
                assert_eq!(records, 2);
                assert_eq!(path, output.path().join("april.csv"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
