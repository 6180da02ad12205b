//! Status bar view
//!
//! Shows the API location, the current mode, the last status message and
//! key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::controller::FormMode;
use crate::tui::app::{App, Focus};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let mode = match (app.controller.form_mode(), app.focus) {
        (Some(FormMode::Create), _) => "ADD",
        (Some(FormMode::Edit), _) => "EDIT",
        (None, Focus::Search) => "SEARCH",
        (None, Focus::List) => "LIST",
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            app.settings.api_base_url.clone(),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let hints = match app.focus {
        Focus::Search => " Enter:Search  Esc:Back ",
        Focus::List => " a:Add  e:Edit  d:Delete  /:Search  r:Reload  ?:Help  q:Quit ",
    };

    // Right-align the hints when they fit
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
