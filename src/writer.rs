use std::{
    fs::{self, File},
    io,
    path::Path,
};

use csv::WriterBuilder;
use tracing::warn;

use crate::{errors::StatementParseError, parsers::prelude::TransactionRecord};

pub const CSV_HEADER: [&str; 3] = ["data", "description", "value"];
pub const CSV_DELIMITER: u8 = b';';

/// Writes the header row and one row per record, fields untouched.
pub fn write_records<W: io::Write>(
    records: &[TransactionRecord],
    writer: W,
) -> Result<(), StatementParseError> {
    let mut csv = WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(CSV_HEADER)?;
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush().map_err(csv::Error::from)?;

    Ok(())
}

pub fn write_csv_file(path: &Path, records: &[TransactionRecord]) -> Result<(), StatementParseError> {
    write_new_file(path, |file| write_records(records, file))
}

/// Creates `path` and hands it to `write`; a failed write leaves no file behind.
fn write_new_file<F>(path: &Path, write: F) -> Result<(), StatementParseError>
where
    F: FnOnce(File) -> Result<(), StatementParseError>,
{
    let file = File::create(path).map_err(StatementParseError::WriteContentFailed)?;
    let result = write(file);
    if result.is_err() {
        if let Err(e) = fs::remove_file(path) {
            warn!("Could not remove partial file {}: {}", path.display(), e);
        }
    }
    result
}
