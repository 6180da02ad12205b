//! Expense entry/edit dialog
//!
//! Modal form with amount, description, date and category fields, tab
//! navigation and submit/cancel. The form only owns its draft; what a
//! submit means is decided by whoever handles [`FormOutcome`].

use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{Expense, ExpenseInput};
use crate::tui::layout::centered_rect;
use crate::tui::widgets::input::TextInput;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which field is currently focused in the expense form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Amount,
    Description,
    Date,
    Category,
}

impl FormField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::Amount => Self::Description,
            Self::Description => Self::Date,
            Self::Date => Self::Category,
            Self::Category => Self::Amount,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::Amount => Self::Category,
            Self::Description => Self::Amount,
            Self::Date => Self::Description,
            Self::Category => Self::Date,
        }
    }
}

/// What the user did with the form on this key press
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// Still editing
    Continue,
    /// Enter pressed and the draft is valid
    Submit(ExpenseInput),
    /// Esc pressed
    Cancel,
}

/// State for the expense form dialog
#[derive(Debug, Clone)]
pub struct ExpenseFormState {
    pub focused_field: FormField,
    pub amount_input: TextInput,
    pub description_input: TextInput,
    pub date_input: TextInput,
    pub category_input: TextInput,
    /// Whether this is an edit (vs new expense)
    pub is_edit: bool,
    /// Error message to display
    pub error_message: Option<String>,
}

impl Default for ExpenseFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseFormState {
    /// Empty draft dated today
    pub fn new() -> Self {
        Self::dated(Local::now().date_naive())
    }

    /// Empty draft with the given date
    pub fn dated(date: NaiveDate) -> Self {
        let mut state = Self {
            focused_field: FormField::Amount,
            amount_input: TextInput::new().label("Amount").placeholder("0.00"),
            description_input: TextInput::new()
                .label("Description")
                .placeholder("What was it for?"),
            date_input: TextInput::new()
                .label("Date")
                .placeholder("YYYY-MM-DD")
                .content(date.format(DATE_FORMAT).to_string()),
            category_input: TextInput::new()
                .label("Category")
                .placeholder("e.g. Food"),
            is_edit: false,
            error_message: None,
        };
        state.update_focus();
        state
    }

    /// Draft pre-populated from an existing record
    pub fn from_expense(expense: &Expense) -> Self {
        let mut state = Self::new();
        state.is_edit = true;

        let amount = if expense.amount.is_missing() {
            String::new()
        } else {
            // f64 Display drops a zero fraction and never uses exponents
            expense.amount.value().to_string()
        };
        state.amount_input = state.amount_input.clone().content(amount);
        state.description_input = state
            .description_input
            .clone()
            .content(expense.description.as_str());
        state.date_input = state.date_input.clone().content(expense.display_date());
        state.category_input = state
            .category_input
            .clone()
            .content(expense.category.as_str());
        state.update_focus();
        state
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
        self.update_focus();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
        self.update_focus();
    }

    fn update_focus(&mut self) {
        self.amount_input.focused = self.focused_field == FormField::Amount;
        self.description_input.focused = self.focused_field == FormField::Description;
        self.date_input.focused = self.focused_field == FormField::Date;
        self.category_input.focused = self.focused_field == FormField::Category;
    }

    /// Get the currently focused input
    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focused_field {
            FormField::Amount => &mut self.amount_input,
            FormField::Description => &mut self.description_input,
            FormField::Date => &mut self.date_input,
            FormField::Category => &mut self.category_input,
        }
    }

    /// Validate the form and return any error
    pub fn validate(&self) -> Result<(), String> {
        self.parse_amount()?;

        if NaiveDate::parse_from_str(self.date_input.value().trim(), DATE_FORMAT).is_err() {
            return Err("Invalid date format. Use YYYY-MM-DD".to_string());
        }

        Ok(())
    }

    fn parse_amount(&self) -> Result<f64, String> {
        let raw = self.amount_input.value().trim();
        if raw.is_empty() {
            return Err("Enter an amount".to_string());
        }
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err("Amount must be a number".to_string()),
        }
    }

    /// Build the request payload from the draft
    pub fn build_input(&self) -> Result<ExpenseInput, String> {
        self.validate()?;

        Ok(ExpenseInput {
            amount: self.parse_amount()?,
            description: self.description_input.value().trim().to_string(),
            date: self.date_input.value().trim().to_string(),
            category: self.category_input.value().trim().to_string(),
        })
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Handle key input for the expense form
pub fn handle_key(form: &mut ExpenseFormState, key: KeyEvent) -> FormOutcome {
    match key.code {
        KeyCode::Esc => return FormOutcome::Cancel,

        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                form.prev_field();
            } else {
                form.next_field();
            }
        }
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Down => form.next_field(),

        KeyCode::Enter => match form.build_input() {
            Ok(input) => {
                form.clear_error();
                return FormOutcome::Submit(input);
            }
            Err(e) => form.set_error(e),
        },

        KeyCode::Backspace => {
            form.clear_error();
            form.focused_input().backspace();
        }
        KeyCode::Delete => {
            form.clear_error();
            form.focused_input().delete();
        }
        KeyCode::Left => form.focused_input().move_left(),
        KeyCode::Right => form.focused_input().move_right(),
        KeyCode::Home => form.focused_input().move_start(),
        KeyCode::End => form.focused_input().move_end(),

        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.clear_error();
            form.focused_input().insert(c);
        }

        _ => {}
    }

    FormOutcome::Continue
}

/// Render the expense dialog
pub fn render(frame: &mut Frame, form: &ExpenseFormState) {
    let area = centered_rect(60, 50, frame.area());

    frame.render_widget(Clear, area);

    let title = if form.is_edit {
        " Edit Expense "
    } else {
        " Add Expense "
    };

    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Description
            Constraint::Length(1), // Date
            Constraint::Length(1), // Category
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(&form.amount_input, chunks[0]);
    frame.render_widget(&form.description_input, chunks[1]);
    frame.render_widget(&form.date_input, chunks[2]);
    frame.render_widget(&form.category_input, chunks[3]);

    if let Some(ref error) = form.error_message {
        let error_line = Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(error_line), chunks[5]);
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[Shift+Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Prev  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(if form.is_edit { " Update  " } else { " Save  " }),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[6]);
}
