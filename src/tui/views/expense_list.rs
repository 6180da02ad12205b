//! Expense list view
//!
//! Rows appear in the order the API returned them.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::{format_total, truncate};
use crate::tui::app::{App, Focus};

/// Render the expense table, or a placeholder while loading or empty
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let border_color = if app.focus == Focus::List && !app.controller.is_editing() {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Expenses ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if app.controller.is_loading() {
        let text = Paragraph::new("Loading...")
            .block(block)
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(text, area);
        return;
    }

    if app.controller.expenses().is_empty() {
        let text = Paragraph::new("No expenses. Press 'a' to add one.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(12), // Date
        Constraint::Min(20),    // Description
        Constraint::Length(16), // Category
        Constraint::Length(14), // Amount
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Date").style(bold),
        Cell::from("Description").style(bold),
        Cell::from("Category").style(bold),
        Cell::from("Amount").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let symbol = app.settings.currency_symbol.as_str();
    let date_format = app.settings.date_format.as_str();

    let rows: Vec<Row> = app
        .controller
        .expenses()
        .iter()
        .map(|expense| {
            let category = if expense.category.is_empty() {
                "-".to_string()
            } else {
                truncate(&expense.category, 16)
            };

            Row::new(vec![
                Cell::from(expense.formatted_date(date_format)),
                Cell::from(truncate(&expense.description, 40)),
                Cell::from(category),
                Cell::from(format_total(symbol, expense.amount.value()))
                    .style(Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(table, area, &mut state);
}
