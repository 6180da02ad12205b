//! Remote expense API
//!
//! The controller talks to the backend only through [`ExpenseApi`]. The
//! production implementation is [`HttpExpenseApi`]; tests plug in doubles.

pub mod http;
#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;

use crate::error::ExpenseResult;
use crate::models::{Expense, ExpenseId, ExpenseInput};

pub use http::HttpExpenseApi;

/// Filter passed to [`ExpenseApi::list`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Free-text search; `None` means no filter
    pub q: Option<String>,
}

impl ListFilter {
    /// Build a filter from the raw query, omitting it when empty
    pub fn from_query(query: &str) -> Self {
        if query.is_empty() {
            Self::default()
        } else {
            Self {
                q: Some(query.to_string()),
            }
        }
    }
}

/// The four round trips the client needs from the backend
#[async_trait]
pub trait ExpenseApi: Send + Sync {
    /// Fetch expenses, in the order the backend returns them
    async fn list(&self, filter: &ListFilter) -> ExpenseResult<Vec<Expense>>;

    async fn create(&self, payload: &ExpenseInput) -> ExpenseResult<Expense>;

    async fn update(&self, id: &ExpenseId, payload: &ExpenseInput) -> ExpenseResult<Expense>;

    async fn delete(&self, id: &ExpenseId) -> ExpenseResult<()>;
}
