//! Expense CLI commands
//!
//! One-shot versions of the TUI operations. Every command goes through the
//! view controller, so mutations are followed by a reload exactly as in the
//! interactive interface.

use std::io::Write;

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::api::ExpenseApi;
use crate::config::settings::Settings;
use crate::controller::ViewController;
use crate::display::{format_expense_details, format_expense_table, format_summary};
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_expenses, ExportFormat};
use crate::models::{ExpenseId, ExpenseInput};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List expenses with their total
    #[command(alias = "ls")]
    List {
        /// Search text passed to the API
        #[arg(short, long)]
        query: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Table)]
        format: ExportFormat,
    },
    /// Add a new expense
    Add {
        /// Amount (e.g. "12.50")
        amount: f64,
        /// What the money was spent on
        #[arg(short, long)]
        description: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Edit an expense; omitted fields keep their current value
    Edit {
        /// Expense ID
        id: String,
        #[arg(short, long)]
        amount: Option<f64>,
        #[arg(short, long)]
        description: Option<String>,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete an expense (no confirmation)
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: String,
    },
}

/// Handle an expense command, writing human output to `out`
pub async fn handle_expense_command<W: Write>(
    controller: &mut ViewController<dyn ExpenseApi>,
    settings: &Settings,
    cmd: ExpenseCommands,
    out: &mut W,
) -> ExpenseResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::List { query, format } => {
            controller.set_query(query.unwrap_or_default());
            load(controller).await?;

            match format {
                ExportFormat::Table => {
                    write!(out, "{}", format_expense_table(controller.expenses(), symbol))?;
                }
                other => export_expenses(controller.expenses(), other, out)?,
            }
        }

        ExpenseCommands::Add {
            amount,
            description,
            date,
            category,
        } => {
            let date = match date {
                Some(date) => parse_date(&date)?,
                None => Local::now().date_naive().format("%Y-%m-%d").to_string(),
            };
            let payload = ExpenseInput {
                amount: check_amount(amount)?,
                description,
                date,
                category: category.unwrap_or_default(),
            };

            controller.start_create();
            controller.submit_create(&payload).await?;

            writeln!(out, "Added expense: {}", payload.description)?;
            writeln!(out, "{}", format_summary(controller.expenses(), symbol))?;
        }

        ExpenseCommands::Edit {
            id,
            amount,
            description,
            date,
            category,
        } => {
            load(controller).await?;

            let record = controller
                .expenses()
                .iter()
                .find(|e| e.id.as_ref().is_some_and(|eid| eid.matches(&id)))
                .cloned()
                .ok_or_else(|| ExpenseError::expense_not_found(id.as_str()))?;

            let mut payload = record.to_input();
            if let Some(amount) = amount {
                payload.amount = check_amount(amount)?;
            }
            if let Some(description) = description {
                payload.description = description;
            }
            if let Some(date) = date {
                payload.date = parse_date(&date)?;
            }
            if let Some(category) = category {
                payload.category = category;
            }

            controller.start_edit(&record);
            controller.submit_edit(&payload).await?;

            writeln!(out, "Updated expense:")?;
            let updated = controller
                .expenses()
                .iter()
                .find(|e| e.id.as_ref().is_some_and(|eid| eid.matches(&id)));
            match updated {
                Some(expense) => write!(out, "{}", format_expense_details(expense, symbol))?,
                None => writeln!(out, "  {}", id)?,
            }
        }

        ExpenseCommands::Delete { id } => {
            let id = match id.parse::<ExpenseId>() {
                Ok(id) => id,
                Err(never) => match never {},
            };
            controller.remove(&id).await?;

            writeln!(out, "Deleted expense {}", id)?;
            writeln!(out, "{}", format_summary(controller.expenses(), symbol))?;
        }
    }

    Ok(())
}

/// Run a load and turn a failure into an error for the exit status
async fn load(controller: &mut ViewController<dyn ExpenseApi>) -> ExpenseResult<()> {
    controller.load().await;
    if controller.error().is_empty() {
        Ok(())
    } else {
        Err(ExpenseError::Load(controller.error().to_string()))
    }
}

fn parse_date(raw: &str) -> ExpenseResult<String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| {
            ExpenseError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", raw))
        })
}

fn check_amount(amount: f64) -> ExpenseResult<f64> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(ExpenseError::Validation("Amount must be a number".into()))
    }
}
