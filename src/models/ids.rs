//! Identifier type for expense records
//!
//! Ids are assigned by the remote API and are opaque to the client. Some
//! backends hand out integers, others strings (UUIDs, object ids), so the
//! wrapper keeps whichever JSON shape arrived and writes it back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use std::str::FromStr;

/// Opaque, API-assigned expense identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpenseId {
    Number(i64),
    Text(String),
    /// Integers above `i64::MAX` and fractional ids
    OtherNumber(Number),
}

impl ExpenseId {
    /// Compare against user-typed text, regardless of the JSON shape
    pub fn matches(&self, s: &str) -> bool {
        self.to_string() == s.trim()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
            Self::OtherNumber(n) => write!(f, "{}", n),
        }
    }
}

impl From<i64> for ExpenseId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for ExpenseId {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for ExpenseId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl FromStr for ExpenseId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse::<i64>()
            .map(Self::Number)
            .unwrap_or_else(|_| Self::Text(s.to_string())))
    }
}
