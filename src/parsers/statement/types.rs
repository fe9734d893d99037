use std::str::FromStr;

use crate::errors::StatementParseError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::segment::{is_statement_amount, is_statement_date};

/// Data `DD.MM.YYYY` como aparece no extrato.
///
/// O segmentador aceita qualquer `DD.MM.YYYY` (ex.: `31.02.2020`); a validação
/// de calendário só acontece na conversão para `NaiveDate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementDate(String);

impl From<String> for StatementDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StatementDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<StatementDate> for NaiveDate {
    type Error = StatementParseError;

    fn try_from(date: StatementDate) -> Result<Self, Self::Error> {
        let s = date.0.trim();
        if !is_statement_date(s) {
            return Err(StatementParseError::DateInvalidFormat);
        }

        NaiveDate::parse_from_str(s, "%d.%m.%Y").map_err(|_| StatementParseError::DateInvalidFormat)
    }
}

/// Valor no formato do extrato: milhar com `.`, decimal com `,` (ex.: `-1.234,56`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementAmount(String);

impl From<String> for StatementAmount {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StatementAmount {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<StatementAmount> for Decimal {
    type Error = StatementParseError;

    fn try_from(amount: StatementAmount) -> Result<Self, Self::Error> {
        let s = amount.0.trim();
        if !is_statement_amount(s) {
            return Err(StatementParseError::AmountInvalidFormat);
        }

        let normalized = s.replace('.', "").replace(',', ".");
        Decimal::from_str(&normalized).map_err(|_| StatementParseError::AmountInvalidFormat)
    }
}
