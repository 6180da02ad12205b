//! Expense display formatting
//!
//! Formats the expense list and its running total for terminal output.

use tabled::{settings::Style, Table, Tabled};

use crate::models::{total_amount, Expense};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense
                .id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string()),
            date: expense.display_date(),
            description: truncate(&expense.description, 40),
            category: expense.category.clone(),
            amount: expense.amount.to_string(),
        }
    }
}

/// `"1 item"` / `"3 items"`
pub fn format_item_count(count: usize) -> String {
    format!("{} item{}", count, if count == 1 { "" } else { "s" })
}

/// Total with currency symbol and two decimals, e.g. `"₹ 15.50"`
pub fn format_total(symbol: &str, total: f64) -> String {
    format!("{} {:.2}", symbol, total)
}

/// One-line summary: item count and running total
pub fn format_summary(expenses: &[Expense], symbol: &str) -> String {
    format!(
        "Total Expenses: {}  {}",
        format_item_count(expenses.len()),
        format_total(symbol, total_amount(expenses))
    )
}

/// Format the expense list as a table followed by the summary line
pub fn format_expense_table(expenses: &[Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return format!("No expenses found.\n{}\n", format_summary(expenses, symbol));
    }

    let rows: Vec<ExpenseRow> = expenses.iter().map(ExpenseRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::sharp());

    format!("{}\n{}\n", table, format_summary(expenses, symbol))
}

/// Format a single expense for display
pub fn format_expense_details(expense: &Expense, symbol: &str) -> String {
    let mut output = String::new();

    if let Some(id) = &expense.id {
        output.push_str(&format!("Expense:     {}\n", id));
    }
    output.push_str(&format!("Date:        {}\n", expense.display_date()));
    output.push_str(&format!(
        "Amount:      {}\n",
        format_total(symbol, expense.amount.value())
    ));
    if !expense.description.is_empty() {
        output.push_str(&format!("Description: {}\n", expense.description));
    }
    if !expense.category.is_empty() {
        output.push_str(&format!("Category:    {}\n", expense.category));
    }

    output
}

/// Truncate a string to at most `max_len` characters, marking the cut
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
