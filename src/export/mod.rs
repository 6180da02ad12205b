//! Export module for the expense tracker
//!
//! Writes a fetched expense list in machine-readable formats:
//! - JSON and YAML: the records as received plus count and total
//! - CSV: one row per expense (spreadsheet-compatible)

pub mod csv;
pub mod json;
pub mod yaml;

use std::io::Write;

use serde::Serialize;

use crate::error::ExpenseResult;
use crate::models::{total_amount, Expense};

pub use self::csv::export_expenses_csv;
pub use self::json::export_expenses_json;
pub use self::yaml::export_expenses_yaml;

/// Output format for `expenses list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Table,
    Json,
    Yaml,
    Csv,
}

/// Document written by the JSON and YAML exporters
#[derive(Debug, Serialize)]
pub struct ExpenseExport<'a> {
    pub count: usize,
    pub total: f64,
    pub expenses: &'a [Expense],
}

impl<'a> ExpenseExport<'a> {
    pub fn new(expenses: &'a [Expense]) -> Self {
        Self {
            count: expenses.len(),
            total: total_amount(expenses),
            expenses,
        }
    }
}

/// Write `expenses` in one of the machine-readable formats
///
/// `ExportFormat::Table` is handled by the display module and writes
/// nothing here.
pub fn export_expenses<W: Write>(
    expenses: &[Expense],
    format: ExportFormat,
    writer: &mut W,
) -> ExpenseResult<()> {
    match format {
        ExportFormat::Table => Ok(()),
        ExportFormat::Json => export_expenses_json(expenses, writer),
        ExportFormat::Yaml => export_expenses_yaml(expenses, writer),
        ExportFormat::Csv => export_expenses_csv(expenses, writer),
    }
}
