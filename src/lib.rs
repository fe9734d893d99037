//! Recover bank transactions from the flattened text of PDF account statements.
//!
//! ```rust,ignore
//! use statement_text_rs::StatementBuilder;
//!
//! let records = StatementBuilder::new()
//!     .content(&statement_text)
//!     .parse_records()?;
//! ```

mod builder;
mod types;

pub mod batch;
pub mod errors;
pub mod parsers;
pub mod pdf;
pub mod writer;

pub use builder::{FileFormat, StatementBuilder};
pub use parsers::prelude::*;
pub use types::Transaction;
