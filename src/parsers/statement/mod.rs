//! Flattened statement text: header normalization, date segmentation and
//! transaction reconstruction.

pub mod clean;
pub mod dto;
pub mod markers;
pub mod parser;
pub mod reconstruct;
pub mod segment;
pub mod types;

pub mod prelude {
    pub use super::dto::{DESCRIPTION_SEPARATOR, TransactionRecord};
    pub use super::markers::Markers;
    pub use super::parser::StatementParser;
    pub use super::types::{StatementAmount, StatementDate};
}
