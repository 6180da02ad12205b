//! Amount field of an expense record
//!
//! The API is loose about the amount's JSON type: it may be a number, a
//! numeric string such as `"10.50"`, missing, or something else entirely.
//! `Amount` keeps the raw shape for round-tripping and coerces on demand.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Raw amount as received from the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
    Other(Value),
}

impl Amount {
    /// The amount coerced to a number; missing, non-numeric and non-finite
    /// values count as zero
    pub fn value(&self) -> f64 {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Self::Other(_) => 0.0,
        };
        if n.is_finite() {
            n
        } else {
            0.0
        }
    }

    /// True when the record carried no amount at all
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Other(Value::Null))
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::Other(Value::Null)
    }
}

impl From<f64> for Amount {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Amount {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

/// Sum of the coerced amounts
pub fn sum_amounts<'a, I>(amounts: I) -> f64
where
    I: IntoIterator<Item = &'a Amount>,
{
    amounts.into_iter().map(Amount::value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coercion() {
        assert_eq!(Amount::Number(5.0).value(), 5.0);
        assert_eq!(Amount::from("10.50").value(), 10.5);
        assert_eq!(Amount::from(" 3 ").value(), 3.0);
        assert_eq!(Amount::from("1e2").value(), 100.0);
        assert_eq!(Amount::from("").value(), 0.0);
        assert_eq!(Amount::from("abc").value(), 0.0);
        assert_eq!(Amount::from("NaN").value(), 0.0);
        assert_eq!(Amount::from("inf").value(), 0.0);
        assert_eq!(Amount::Other(Value::Bool(true)).value(), 0.0);
        assert_eq!(Amount::default().value(), 0.0);
    }

    #[test]
    fn test_deserialize_shapes() {
        let a: Amount = serde_json::from_str("5").unwrap();
        assert_eq!(a, Amount::Number(5.0));

        let a: Amount = serde_json::from_str("\"10.50\"").unwrap();
        assert_eq!(a, Amount::Text("10.50".into()));

        let a: Amount = serde_json::from_str("null").unwrap();
        assert!(a.is_missing());

        let a: Amount = serde_json::from_str("{\"value\": 1}").unwrap();
        assert_eq!(a.value(), 0.0);
        assert!(!a.is_missing());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Amount::from("10.50"),
            Amount::Number(5.0),
            Amount::from("oops"),
            Amount::default(),
        ];
        assert_eq!(sum_amounts(&amounts), 15.5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from("10.5").to_string(), "10.50");
        assert_eq!(Amount::from("garbage").to_string(), "0.00");
    }
}
