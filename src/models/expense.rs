//! Expense record and the payload sent to create or update one

use std::fmt::Write;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::amount::{sum_amounts, Amount};
use super::ids::ExpenseId;

/// A single tracked expense, as returned by the remote API
///
/// Fields the client does not know about are kept in `extra` so that a
/// record can be echoed back without losing data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Assigned by the API; absent before creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ExpenseId>,

    #[serde(default, skip_serializing_if = "Amount::is_missing")]
    pub amount: Amount,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Expense {
    /// Build a record with the presentational fields filled in
    pub fn new(
        id: impl Into<ExpenseId>,
        amount: impl Into<Amount>,
        description: impl Into<String>,
        date: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            amount: amount.into(),
            description: description.into(),
            date: date.into(),
            category: category.into(),
            extra: Map::new(),
        }
    }

    /// Calendar date of the record, from a plain date or an RFC 3339 timestamp
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(&self.date) {
            return Some(ts.date_naive());
        }
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// The date rendered with a strftime `format`. Falls back to the raw
    /// text when the date does not parse or the format is invalid.
    pub fn formatted_date(&self, format: &str) -> String {
        let Some(date) = self.parsed_date() else {
            return self.date.clone();
        };
        let mut out = String::new();
        if write!(out, "{}", date.format(format)).is_err() {
            return self.date.clone();
        }
        out
    }

    /// The date as `YYYY-MM-DD` when it parses as a date or a timestamp,
    /// otherwise the raw text
    pub fn display_date(&self) -> String {
        self.formatted_date("%Y-%m-%d")
    }

    /// Payload carrying this record's current values
    pub fn to_input(&self) -> ExpenseInput {
        ExpenseInput {
            amount: self.amount.value(),
            description: self.description.clone(),
            date: self.display_date(),
            category: self.category.clone(),
        }
    }
}

/// Payload for create and update requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseInput {
    pub amount: f64,
    pub description: String,
    pub date: String,
    pub category: String,
}

/// Sum of the coerced amounts of `expenses`
pub fn total_amount(expenses: &[Expense]) -> f64 {
    sum_amounts(expenses.iter().map(|e| &e.amount))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}
