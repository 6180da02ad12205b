//! Core data models for the expense tracker
//!
//! Expense records as exchanged with the remote API, their ids and the
//! loosely-typed amount field.

pub mod amount;
pub mod expense;
pub mod ids;

pub use amount::Amount;
pub use expense::{total_amount, Expense, ExpenseInput};
pub use ids::ExpenseId;
