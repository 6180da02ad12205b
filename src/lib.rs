//! Expense Tracker - terminal client for a remote expense API
//!
//! Lists, searches, adds, edits and deletes expense records held by a REST
//! backend, and shows a running total. The backend is the only source of
//! truth: the client never patches its list locally and reloads after every
//! change.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `api`: The `ExpenseApi` trait and its HTTP implementation
//! - `controller`: View state and the load/edit/submit/remove transitions
//! - `models`: Expense records, identifiers and amount coercion
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `display`, `export`: Terminal and machine-readable output
//! - `cli`, `tui`: The two front ends
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::api::HttpExpenseApi;
//! use expense_tracker::config::{paths::ExpensePaths, settings::Settings};
//! use expense_tracker::controller::ViewController;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut controller = ViewController::new(HttpExpenseApi::from_settings(&settings)?);
//! controller.load().await;
//! println!("{} expenses", controller.item_count());
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod tui;

pub use controller::{EditingSlot, ViewController, ViewState};
pub use error::{ExpenseError, ExpenseResult};
