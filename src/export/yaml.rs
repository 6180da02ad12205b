//! YAML export

use std::io::Write;

use super::ExpenseExport;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

/// Export the expense list as YAML
pub fn export_expenses_yaml<W: Write>(expenses: &[Expense], writer: &mut W) -> ExpenseResult<()> {
    serde_yaml::to_writer(writer, &ExpenseExport::new(expenses))
        .map_err(|e| ExpenseError::Export(e.to_string()))
}
