//! TUI Views module
//!
//! Header with the search box, summary and error lines, the expense list,
//! the status bar and any overlay on top.

pub mod expense_list;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{ActiveDialog, App, Focus};
use super::dialogs;
use super::layout::AppLayout;
use crate::display::{format_item_count, format_total};

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header);
    render_summary(frame, app, layout.summary);
    render_message(frame, app, layout.message);
    expense_list::render(frame, app, layout.main);
    status_bar::render(frame, app, layout.status_bar);

    if app.controller.is_editing() {
        dialogs::expense_form::render(frame, &app.expense_form);
    }

    if app.active_dialog == ActiveDialog::Help {
        dialogs::help::render(frame);
    }
}

/// Title and search box
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let border_color = if app.focus == Focus::Search {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Expense Tracker ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(&app.search_input, inner);
}

/// Item count and total, hidden while a load is outstanding
fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    if app.controller.is_loading() {
        return;
    }

    let line = Line::from(vec![
        Span::styled(" Total Expenses: ", Style::default().fg(Color::White)),
        Span::styled(
            format_item_count(app.controller.item_count()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(
            format_total(&app.settings.currency_symbol, app.controller.total_amount()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_message(frame: &mut Frame, app: &App, area: Rect) {
    let error = app.controller.error();
    if error.is_empty() {
        return;
    }

    let line = Line::from(Span::styled(
        format!(" {}", error),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}
