use serde::{Deserialize, Serialize};

use super::types::{StatementAmount, StatementDate};

pub const DESCRIPTION_SEPARATOR: &str = " - ";

/// One recovered transaction, fields kept exactly as they appear in the text.
///
/// The serde names match the CSV header `data;description;value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "description")]
    pub description: String,
    #[serde(rename = "value")]
    pub amount: String,
}

impl TransactionRecord {
    pub(super) fn from_parts(date: &str, parts: &[String], amount: &str) -> Self {
        TransactionRecord {
            date: date.to_string(),
            description: parts.join(DESCRIPTION_SEPARATOR),
            amount: amount.to_string(),
        }
    }

    pub fn statement_date(&self) -> StatementDate {
        self.date.as_str().into()
    }

    pub fn statement_amount(&self) -> StatementAmount {
        self.amount.as_str().into()
    }
}

impl From<(&str, &str, &str)> for TransactionRecord {
    fn from((date, description, amount): (&str, &str, &str)) -> Self {
        TransactionRecord {
            date: date.to_string(),
            description: description.to_string(),
            amount: amount.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_joins_in_order() {
        let parts = vec!["LastschriftVENDOR_A1".to_string(), "DESCXPKG".to_string()];
        let record = TransactionRecord::from_parts("02.03.2020", &parts, "-222,22");

        assert_eq!(record.description, "LastschriftVENDOR_A1 - DESCXPKG");
        assert_eq!(record.date, "02.03.2020");
        assert_eq!(record.amount, "-222,22");
    }

    #[test]
    fn test_from_parts_empty_description() {
        let record = TransactionRecord::from_parts("02.03.2020", &[], "1,00");
        assert_eq!(record.description, "");
    }

    #[test]
    fn test_record_serialization_uses_csv_names() {
        let record: TransactionRecord = ("02.03.2020", "Miete", "-111,11").into();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""data":"02.03.2020""#));
        assert!(json.contains(r#""value":"-111,11""#));

        let deserialized: TransactionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, record);
    }
}
