//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Domain state (the list, query, editing slot, loading and error flags)
//! lives in the [`ViewController`]; everything else here is presentation.

use crate::api::ExpenseApi;
use crate::config::settings::Settings;
use crate::controller::{EditingSlot, ViewController};
use crate::models::{Expense, ExpenseId, ExpenseInput};

use super::dialogs::expense_form::ExpenseFormState;
use super::widgets::input::TextInput;

/// Which part of the screen receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    List,
    Search,
}

/// Currently active dialog (if any)
///
/// The expense form is not listed here: it is shown exactly when the
/// controller's editing slot is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
}

/// Remote work requested by a key press, carried out by the main loop
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Fetch the list for the current query
    Load,
    /// Submit the form in its current mode
    Submit(ExpenseInput),
    /// Delete a record
    Remove(ExpenseId),
}

/// Main application state
pub struct App<'a> {
    /// Canonical view state and the API behind it
    pub controller: ViewController<dyn ExpenseApi>,

    /// Application settings
    pub settings: &'a Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    pub focus: Focus,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Selected row in the expense list
    pub selected_index: usize,

    /// Search box, mirrored into the controller's query
    pub search_input: TextInput,

    /// Draft of the expense form
    pub expense_form: ExpenseFormState,

    /// Status message to display
    pub status_message: Option<String>,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(controller: ViewController<dyn ExpenseApi>, settings: &'a Settings) -> Self {
        let search_input = TextInput::new()
            .label("Search")
            .placeholder("Press / to search")
            .content(controller.query());

        Self {
            controller,
            settings,
            should_quit: false,
            focus: Focus::default(),
            active_dialog: ActiveDialog::default(),
            selected_index: 0,
            search_input,
            expense_form: ExpenseFormState::new(),
            status_message: None,
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    pub fn focus_search(&mut self) {
        self.focus = Focus::Search;
        self.search_input.focused = true;
    }

    pub fn focus_list(&mut self) {
        self.focus = Focus::List;
        self.search_input.focused = false;
    }

    /// Copy the search box into the controller's query
    pub fn sync_query(&mut self) {
        self.controller.set_query(self.search_input.value());
    }

    /// Ask for a fetch of the current query, unless one is already running
    pub fn request_search(&mut self) -> Option<Action> {
        if self.controller.is_loading() {
            return None;
        }
        self.sync_query();
        Some(Action::Load)
    }

    /// The expense under the cursor
    pub fn selected_expense(&self) -> Option<&Expense> {
        self.controller.expenses().get(self.selected_index)
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let count = self.controller.item_count();
        if self.selected_index < count.saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.controller.item_count().saturating_sub(1);
    }

    /// Keep the cursor inside the list after it was replaced
    pub fn clamp_selection(&mut self) {
        let count = self.controller.item_count();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    /// Open an empty form
    pub fn start_create(&mut self) {
        self.controller.start_create();
        self.expense_form = ExpenseFormState::new();
    }

    /// Open the form on the selected expense. Returns false when the list
    /// is empty.
    pub fn start_edit_selected(&mut self) -> bool {
        let Some(record) = self.selected_expense().cloned() else {
            return false;
        };
        self.expense_form = ExpenseFormState::from_expense(&record);
        self.controller.start_edit(&record);
        true
    }

    pub fn cancel_edit(&mut self) {
        self.controller.cancel_edit();
        self.expense_form.clear_error();
    }

    /// Submit the form. A failure keeps the form open and shows the error
    /// inside it.
    pub async fn submit_form(&mut self, input: ExpenseInput) {
        let created = matches!(self.controller.editing(), EditingSlot::Create);

        match self.controller.submit(&input).await {
            Ok(()) => {
                self.clamp_selection();
                self.set_status(if created {
                    "Expense added"
                } else {
                    "Expense updated"
                });
            }
            Err(e) => self.expense_form.set_error(e.to_string()),
        }
    }

    /// Delete a record, reporting a failure in the status bar
    pub async fn remove(&mut self, id: ExpenseId) {
        match self.controller.remove(&id).await {
            Ok(()) => {
                self.clamp_selection();
                self.set_status(format!("Deleted expense {}", id));
            }
            Err(e) => self.set_status(format!("Delete failed: {}", e)),
        }
    }
}
