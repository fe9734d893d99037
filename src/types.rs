use crate::{errors::StatementParseError, parsers::prelude::*};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Typed view of a [`TransactionRecord`]: calendar date and decimal amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = StatementParseError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Ok(Transaction {
            date: record.statement_date().try_into()?,
            amount: record.statement_amount().try_into()?,
            description: record.description,
        })
    }
}
