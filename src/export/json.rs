//! JSON export

use std::io::Write;

use super::ExpenseExport;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

/// Export the expense list as pretty-printed JSON
pub fn export_expenses_json<W: Write>(expenses: &[Expense], writer: &mut W) -> ExpenseResult<()> {
    serde_json::to_writer_pretty(&mut *writer, &ExpenseExport::new(expenses))
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_export_json() {
        let expenses = vec![
            Expense::new(1, "10.50", "Lunch", "2024-03-01", "Food"),
            Expense::new(2, 5.0, "Bus", "2024-03-02", "Travel"),
        ];
        let mut output = Vec::new();
        export_expenses_json(&expenses, &mut output).unwrap();

        let parsed: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed["count"], 2);
        assert_eq!(parsed["total"], 15.5);
        // Amounts are written back in the shape they arrived in
        assert_eq!(parsed["expenses"][0]["amount"], "10.50");
        assert_eq!(parsed["expenses"][1]["amount"], 5.0);
    }
}
