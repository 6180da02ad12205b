//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the current
//! application state, and applies finished list fetches to the controller.
//! Anything that needs a round trip is handed back as an [`Action`].

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{Action, ActiveDialog, App, Focus};
use super::dialogs::expense_form::{self, FormOutcome};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<Option<Action>> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Loaded { ticket, result } => {
            if app.controller.finish_load(&ticket, result) {
                app.clamp_selection();
            }
            Ok(None)
        }
        Event::Tick => Ok(None),
        Event::Resize(_, _) => Ok(None),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<Option<Action>> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(None);
    }

    // The form sits above everything else while it is open
    if app.controller.is_editing() {
        return Ok(handle_form_key(app, key));
    }

    if app.has_dialog() {
        return Ok(handle_dialog_key(app, key));
    }

    match app.focus {
        Focus::Search => Ok(handle_search_key(app, key)),
        Focus::List => Ok(handle_list_key(app, key)),
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match expense_form::handle_key(&mut app.expense_form, key) {
        FormOutcome::Continue => None,
        FormOutcome::Submit(input) => Some(Action::Submit(input)),
        FormOutcome::Cancel => {
            app.cancel_edit();
            None
        }
    }
}

fn handle_dialog_key(app: &mut App, _key: KeyEvent) -> Option<Action> {
    match app.active_dialog {
        // Any key closes help
        ActiveDialog::Help => app.close_dialog(),
        ActiveDialog::None => {}
    }
    None
}

fn handle_search_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => {
            app.focus_list();
            return None;
        }
        KeyCode::Enter => return app.request_search(),

        KeyCode::Backspace => app.search_input.backspace(),
        KeyCode::Delete => app.search_input.delete(),
        KeyCode::Left => app.search_input.move_left(),
        KeyCode::Right => app.search_input.move_right(),
        KeyCode::Home => app.search_input.move_start(),
        KeyCode::End => app.search_input.move_end(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input.clear()
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input.insert(c)
        }
        _ => return None,
    }

    app.sync_query();
    None
}

fn handle_list_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    app.clear_status();

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),
        KeyCode::Char('/') => app.focus_search(),
        KeyCode::Char('r') => return Some(Action::Load),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),

        // Rows are not shown while loading, so they cannot be acted on
        KeyCode::Char('e') | KeyCode::Enter | KeyCode::Char('d') | KeyCode::Delete
            if app.controller.is_loading() => {}

        // Form
        KeyCode::Char('a') => app.start_create(),
        KeyCode::Char('e') | KeyCode::Enter => {
            if !app.start_edit_selected() {
                app.set_status("No expense selected");
            }
        }

        // Delete, without confirmation
        KeyCode::Char('d') | KeyCode::Delete => {
            let id = app.selected_expense().map(|expense| expense.id.clone());
            match id {
                Some(Some(id)) => return Some(Action::Remove(id)),
                Some(None) => app.set_status("Selected expense has no id"),
                None => app.set_status("No expense selected"),
            }
        }

        _ => {}
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{sample_expenses, FakeApi};
    use crate::api::ExpenseApi;
    use crate::config::settings::Settings;
    use crate::controller::{EditingSlot, ViewController, LOAD_ERROR_MESSAGE};
    use crate::error::ExpenseError;
    use crate::models::{ExpenseId, ExpenseInput};
    use std::sync::Arc;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app(settings: &Settings) -> App<'_> {
        let api: Arc<dyn ExpenseApi> = Arc::new(FakeApi::default());
        App::new(ViewController::with_shared_api(api), settings)
    }

    /// Feed a loaded list through the event path
    fn loaded(app: &mut App) {
        let ticket = app.controller.begin_load();
        handle_event(
            app,
            Event::Loaded {
                ticket,
                result: Ok(sample_expenses()),
            },
        )
        .unwrap();
    }

    #[test]
    fn test_loaded_event_applies_list() {
        let settings = Settings::default();
        let mut app = app(&settings);

        loaded(&mut app);

        assert_eq!(app.controller.item_count(), 2);
        assert!(!app.controller.is_loading());
    }

    #[test]
    fn test_failed_load_event_sets_error() {
        let settings = Settings::default();
        let mut app = app(&settings);
        loaded(&mut app);

        let ticket = app.controller.begin_load();
        let event = Event::Loaded {
            ticket,
            result: Err(ExpenseError::Network("down".into())),
        };
        handle_event(&mut app, event).unwrap();

        assert_eq!(app.controller.error(), LOAD_ERROR_MESSAGE);
        assert_eq!(app.controller.item_count(), 2);
    }

    #[test]
    fn test_quit_and_help() {
        let settings = Settings::default();
        let mut app = app(&settings);

        handle_event(&mut app, key(KeyCode::Char('?'))).unwrap();
        assert_eq!(app.active_dialog, ActiveDialog::Help);

        // Any key closes help without quitting
        handle_event(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(!app.has_dialog());
        assert!(!app.should_quit);

        handle_event(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_reload_key() {
        let settings = Settings::default();
        let mut app = app(&settings);
        assert_eq!(
            handle_event(&mut app, key(KeyCode::Char('r'))).unwrap(),
            Some(Action::Load)
        );
    }

    #[test]
    fn test_search_typing_and_enter() {
        let settings = Settings::default();
        let mut app = app(&settings);

        handle_event(&mut app, key(KeyCode::Char('/'))).unwrap();
        assert_eq!(app.focus, Focus::Search);

        for c in "food".chars() {
            handle_event(&mut app, key(KeyCode::Char(c))).unwrap();
        }
        // 'q' inside the search box is text, not quit
        handle_event(&mut app, key(KeyCode::Char('q'))).unwrap();
        handle_event(&mut app, key(KeyCode::Backspace)).unwrap();
        assert!(!app.should_quit);
        assert_eq!(app.controller.query(), "food");

        let action = handle_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(action, Some(Action::Load));

        handle_event(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)),
        )
        .unwrap();
        assert_eq!(app.controller.query(), "");

        handle_event(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.focus, Focus::List);
    }

    #[test]
    fn test_search_enter_ignored_while_loading() {
        let settings = Settings::default();
        let mut app = app(&settings);
        app.focus_search();
        let _ticket = app.controller.begin_load();

        assert_eq!(handle_event(&mut app, key(KeyCode::Enter)).unwrap(), None);
    }

    #[test]
    fn test_add_opens_form_and_escape_closes() {
        let settings = Settings::default();
        let mut app = app(&settings);

        handle_event(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.controller.editing(), &EditingSlot::Create);

        handle_event(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.controller.editing(), &EditingSlot::Closed);
    }

    #[test]
    fn test_form_submit_produces_action() {
        let settings = Settings::default();
        let mut app = app(&settings);
        handle_event(&mut app, key(KeyCode::Char('a'))).unwrap();
        app.expense_form.date_input = app.expense_form.date_input.clone().content("2024-02-02");

        for c in "7.5".chars() {
            handle_event(&mut app, key(KeyCode::Char(c))).unwrap();
        }
        let action = handle_event(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(
            action,
            Some(Action::Submit(ExpenseInput {
                amount: 7.5,
                description: String::new(),
                date: "2024-02-02".into(),
                category: String::new(),
            }))
        );
        // The form stays open until the submit succeeds
        assert!(app.controller.is_editing());
    }

    #[test]
    fn test_edit_and_delete_selected() {
        let settings = Settings::default();
        let mut app = app(&settings);

        handle_event(&mut app, key(KeyCode::Char('d'))).unwrap();
        assert_eq!(app.status_message.as_deref(), Some("No expense selected"));

        loaded(&mut app);
        handle_event(&mut app, key(KeyCode::Char('j'))).unwrap();

        let action = handle_event(&mut app, key(KeyCode::Char('d'))).unwrap();
        assert_eq!(action, Some(Action::Remove(ExpenseId::from(2))));

        handle_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(
            app.controller.editing().record().map(|e| e.description.as_str()),
            Some("Bus")
        );
    }

    #[test]
    fn test_edit_and_delete_ignored_while_loading() {
        let settings = Settings::default();
        let mut app = app(&settings);
        loaded(&mut app);
        let _ticket = app.controller.begin_load();

        for code in [KeyCode::Char('d'), KeyCode::Delete, KeyCode::Char('e'), KeyCode::Enter] {
            assert_eq!(handle_event(&mut app, key(code)).unwrap(), None);
        }
        assert!(!app.controller.is_editing());
        assert_eq!(app.status_message, None);

        // Reload still works
        assert_eq!(
            handle_event(&mut app, key(KeyCode::Char('r'))).unwrap(),
            Some(Action::Load)
        );
    }
}
