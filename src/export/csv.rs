//! CSV export

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

/// Export the expense list to CSV, one row per expense
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: &mut W) -> ExpenseResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["ID", "Date", "Description", "Category", "Amount"])
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    for expense in expenses {
        let id = expense
            .id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let amount = format!("{:.2}", expense.amount.value());

        csv_writer
            .write_record([
                id.as_str(),
                expense.display_date().as_str(),
                expense.description.as_str(),
                expense.category.as_str(),
                amount.as_str(),
            ])
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
