//! View controller
//!
//! Owns the canonical view state (expense list, search query, editing slot,
//! loading and error flags) and keeps it in sync with the remote API. The
//! list is never patched locally: every successful mutation is followed by
//! a fresh `load()`.
//!
//! Only list failures are translated into the user-facing error message.
//! Create, update and delete failures are returned to the caller untouched,
//! with the editing slot and the list left as they were.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::{ExpenseApi, ListFilter};
use crate::error::ExpenseResult;
use crate::models::{total_amount, Expense, ExpenseId, ExpenseInput};

/// Message shown when a list fetch fails
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load expenses";

/// What the expense form is doing, if anything
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditingSlot {
    /// No form shown
    #[default]
    Closed,
    /// Form shown empty, submitting creates a record
    Create,
    /// Form shown pre-populated, submitting updates this record
    Edit(Expense),
}

impl EditingSlot {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn mode(&self) -> Option<FormMode> {
        match self {
            Self::Closed => None,
            Self::Create => Some(FormMode::Create),
            Self::Edit(_) => Some(FormMode::Edit),
        }
    }

    /// The record being edited, if in edit mode
    pub fn record(&self) -> Option<&Expense> {
        match self {
            Self::Edit(expense) => Some(expense),
            _ => None,
        }
    }
}

/// Mode the form is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Canonical application state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub expenses: Vec<Expense>,
    pub query: String,
    pub editing: EditingSlot,
    pub loading: bool,
    pub error: String,
}

/// Handle for one list fetch, produced by [`ViewController::begin_load`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    filter: ListFilter,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn filter(&self) -> &ListFilter {
        &self.filter
    }
}

/// Mediates every transition between loading, list display and form display
pub struct ViewController<A: ExpenseApi + ?Sized> {
    api: Arc<A>,
    state: ViewState,
    /// Generation of the newest list fetch issued
    generation: u64,
}

impl<A: ExpenseApi> ViewController<A> {
    pub fn new(api: A) -> Self {
        Self::with_shared_api(Arc::new(api))
    }
}

impl<A: ExpenseApi + ?Sized> ViewController<A> {
    /// Build a controller around an API handle that may also be used
    /// elsewhere, e.g. `Arc<dyn ExpenseApi>`
    pub fn with_shared_api(api: Arc<A>) -> Self {
        Self {
            api,
            state: ViewState::default(),
            generation: 0,
        }
    }

    /// Shared handle to the API, for running fetches off the controller
    pub fn api(&self) -> Arc<A> {
        Arc::clone(&self.api)
    }

    /// Read-only snapshot for presentational code
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.state.expenses
    }

    pub fn query(&self) -> &str {
        &self.state.query
    }

    pub fn editing(&self) -> &EditingSlot {
        &self.state.editing
    }

    pub fn item_count(&self) -> usize {
        self.state.expenses.len()
    }

    pub fn is_editing(&self) -> bool {
        self.state.editing.is_open()
    }

    pub fn form_mode(&self) -> Option<FormMode> {
        self.state.editing.mode()
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> &str {
        &self.state.error
    }

    /// Sum of the coerced amounts of the current list
    pub fn total_amount(&self) -> f64 {
        total_amount(&self.state.expenses)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
    }

    /// Fetch the list for the current query and replace the canonical copy
    ///
    /// Never fails: a failed fetch leaves the previous list in place and
    /// sets [`LOAD_ERROR_MESSAGE`]. `loading` is false afterwards unless a
    /// newer fetch has been started in the meantime.
    pub async fn load(&mut self) {
        let ticket = self.begin_load();
        let result = self.api.list(ticket.filter()).await;
        self.finish_load(&ticket, result);
    }

    /// First half of [`load`](Self::load): flag loading, clear the error and
    /// hand out a ticket that supersedes every earlier one
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state.loading = true;
        self.state.error.clear();

        let ticket = LoadTicket {
            generation: self.generation,
            filter: ListFilter::from_query(&self.state.query),
        };
        debug!(generation = ticket.generation, q = ?ticket.filter.q, "load started");
        ticket
    }

    /// Second half of [`load`](Self::load). Results for superseded tickets
    /// are dropped and leave the state untouched.
    ///
    /// Returns whether the result was applied.
    pub fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        result: ExpenseResult<Vec<Expense>>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                "dropping stale list response"
            );
            return false;
        }

        match result {
            Ok(expenses) => {
                debug!(count = expenses.len(), "load finished");
                self.state.expenses = expenses;
            }
            Err(err) => {
                warn!(error = %err, "failed to load expenses");
                self.state.error = LOAD_ERROR_MESSAGE.to_string();
            }
        }
        self.state.loading = false;
        true
    }

    /// Open the form in create mode
    pub fn start_create(&mut self) {
        self.state.editing = EditingSlot::Create;
    }

    /// Open the form in edit mode for a copy of `record`, replacing any draft
    pub fn start_edit(&mut self, record: &Expense) {
        self.state.editing = EditingSlot::Edit(record.clone());
    }

    /// Close the form, discarding the draft
    pub fn cancel_edit(&mut self) {
        self.state.editing = EditingSlot::Closed;
    }

    /// Create a record, close the form and reload
    pub async fn submit_create(&mut self, payload: &ExpenseInput) -> ExpenseResult<()> {
        self.api.create(payload).await?;
        self.state.editing = EditingSlot::Closed;
        self.load().await;
        Ok(())
    }

    /// Update the record being edited, close the form and reload
    ///
    /// Does nothing unless the form is in edit mode.
    pub async fn submit_edit(&mut self, payload: &ExpenseInput) -> ExpenseResult<()> {
        let id = match &self.state.editing {
            EditingSlot::Edit(record) => record.id.clone(),
            _ => return Ok(()),
        };

        match id {
            Some(id) => {
                self.api.update(&id, payload).await?;
            }
            None => {
                // A record without an id cannot be addressed; treat it as a
                // new one, as the form would for an empty draft.
                self.api.create(payload).await?;
            }
        }

        self.state.editing = EditingSlot::Closed;
        self.load().await;
        Ok(())
    }

    /// Submit the form according to its current mode
    pub async fn submit(&mut self, payload: &ExpenseInput) -> ExpenseResult<()> {
        match self.state.editing {
            EditingSlot::Closed => Ok(()),
            EditingSlot::Create => self.submit_create(payload).await,
            EditingSlot::Edit(_) => self.submit_edit(payload).await,
        }
    }

    /// Delete a record and reload
    pub async fn remove(&mut self, id: &ExpenseId) -> ExpenseResult<()> {
        self.api.delete(id).await?;
        self.load().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeApi;
    use crate::error::ExpenseError;

    fn sample() -> Vec<Expense> {
        crate::api::testing::sample_expenses()
    }

    fn input(description: &str) -> ExpenseInput {
        ExpenseInput {
            amount: 3.0,
            description: description.into(),
            date: "2024-03-03".into(),
            category: "Misc".into(),
        }
    }

    fn network_error() -> ExpenseError {
        ExpenseError::Network("connection refused".into())
    }

    #[tokio::test]
    async fn load_replaces_list_and_totals() {
        let mut ctl = ViewController::new(FakeApi::with_lists(vec![Ok(sample())]));

        ctl.load().await;

        assert_eq!(ctl.item_count(), 2);
        assert_eq!(ctl.total_amount(), 15.5);
        assert!(!ctl.is_loading());
        assert_eq!(ctl.error(), "");
        assert_eq!(ctl.api().calls(), vec!["list None"]);
    }

    #[tokio::test]
    async fn load_passes_query_when_set() {
        let mut ctl = ViewController::new(FakeApi::default());

        ctl.set_query("food");
        ctl.load().await;

        assert_eq!(ctl.api().calls(), vec!["list Some(\"food\")"]);
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_list() {
        let mut ctl = ViewController::new(FakeApi::with_lists(vec![
            Ok(sample()),
            Err(network_error()),
        ]));

        ctl.load().await;
        ctl.load().await;

        assert_eq!(ctl.error(), LOAD_ERROR_MESSAGE);
        assert_eq!(ctl.error(), "Failed to load expenses");
        assert!(!ctl.is_loading());
        assert_eq!(ctl.expenses(), sample().as_slice());
    }

    #[tokio::test]
    async fn successful_load_clears_previous_error() {
        let mut ctl = ViewController::new(FakeApi::with_lists(vec![
            Err(network_error()),
            Ok(sample()),
        ]));

        ctl.load().await;
        assert_eq!(ctl.error(), LOAD_ERROR_MESSAGE);

        ctl.load().await;
        assert_eq!(ctl.error(), "");
        assert_eq!(ctl.expenses().len(), 2);
    }

    #[test]
    fn begin_load_sets_flags() {
        let mut ctl = ViewController::new(FakeApi::default());
        ctl.state.error = LOAD_ERROR_MESSAGE.into();

        let ticket = ctl.begin_load();

        assert!(ctl.is_loading());
        assert_eq!(ctl.error(), "");
        assert_eq!(ticket.generation(), 1);
        assert_eq!(ticket.filter(), &ListFilter::default());
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut ctl = ViewController::new(FakeApi::default());

        let first = ctl.begin_load();
        let second = ctl.begin_load();

        // The newer request answers first
        assert!(ctl.finish_load(&second, Ok(sample())));
        assert!(!ctl.is_loading());

        // The older one arrives late and must not clobber the list
        assert!(!ctl.finish_load(&first, Ok(Vec::new())));
        assert_eq!(ctl.expenses().len(), 2);
        assert!(!ctl.is_loading());
    }

    #[test]
    fn stale_response_does_not_end_newer_load() {
        let mut ctl = ViewController::new(FakeApi::default());

        let first = ctl.begin_load();
        let _second = ctl.begin_load();

        assert!(!ctl.finish_load(&first, Err(network_error())));
        assert!(ctl.is_loading());
        assert_eq!(ctl.error(), "");
    }

    #[test]
    fn editing_slot_transitions() {
        let mut ctl = ViewController::new(FakeApi::default());
        assert_eq!(ctl.editing(), &EditingSlot::Closed);

        assert_eq!(ctl.form_mode(), None);

        ctl.start_create();
        ctl.start_create();
        assert_eq!(ctl.editing(), &EditingSlot::Create);
        assert_eq!(ctl.form_mode(), Some(FormMode::Create));

        let record = sample().remove(0);
        ctl.start_edit(&record);
        assert_eq!(ctl.editing(), &EditingSlot::Edit(record.clone()));
        assert_eq!(ctl.form_mode(), Some(FormMode::Edit));

        let other = sample().remove(1);
        ctl.start_edit(&other);
        assert_eq!(ctl.editing().record(), Some(&other));

        ctl.cancel_edit();
        assert!(!ctl.is_editing());
    }

    #[test]
    fn create_then_cancel_makes_no_calls() {
        let mut ctl = ViewController::new(FakeApi::default());

        ctl.start_create();
        ctl.cancel_edit();

        assert_eq!(ctl.editing(), &EditingSlot::Closed);
        assert!(ctl.api().calls().is_empty());
    }

    #[tokio::test]
    async fn submit_create_closes_form_and_reloads() {
        let mut ctl = ViewController::new(FakeApi::with_lists(vec![Ok(sample())]));
        ctl.start_create();

        ctl.submit_create(&input("Coffee")).await.unwrap();

        assert_eq!(ctl.editing(), &EditingSlot::Closed);
        assert_eq!(ctl.api().calls(), vec!["create Coffee", "list None"]);
        // The list comes from the reload, not from a local insert
        assert_eq!(ctl.expenses(), sample().as_slice());
    }

    #[tokio::test]
    async fn submit_edit_updates_by_record_id() {
        let mut ctl = ViewController::new(FakeApi::default());
        ctl.start_edit(&Expense::new(42, 1.0, "Old", "", ""));

        ctl.submit_edit(&input("New")).await.unwrap();

        assert_eq!(ctl.editing(), &EditingSlot::Closed);
        assert_eq!(ctl.api().calls(), vec!["update 42 New", "list None"]);
    }

    #[tokio::test]
    async fn submit_edit_without_form_is_noop() {
        let mut ctl = ViewController::new(FakeApi::default());

        ctl.submit_edit(&input("Nothing")).await.unwrap();
        ctl.start_create();
        ctl.submit_edit(&input("Nothing")).await.unwrap();

        assert!(ctl.api().calls().is_empty());
        assert_eq!(ctl.editing(), &EditingSlot::Create);
    }

    #[tokio::test]
    async fn submit_dispatches_on_mode() {
        let mut ctl = ViewController::new(FakeApi::default());

        ctl.submit(&input("Ignored")).await.unwrap();
        ctl.start_create();
        ctl.submit(&input("Fresh")).await.unwrap();
        ctl.start_edit(&Expense::new(5, 1.0, "x", "", ""));
        ctl.submit(&input("Edited")).await.unwrap();

        assert_eq!(
            ctl.api().calls(),
            vec!["create Fresh", "list None", "update 5 Edited", "list None"]
        );
    }

    #[tokio::test]
    async fn remove_deletes_then_loads_once() {
        let mut ctl = ViewController::new(FakeApi::default());

        ctl.remove(&ExpenseId::Number(3)).await.unwrap();

        assert_eq!(ctl.api().calls(), vec!["delete 3", "list None"]);
    }

    #[tokio::test]
    async fn mutation_failures_propagate_and_leave_state() {
        let mut ctl = ViewController::new(FakeApi::failing_mutations());
        let record = Expense::new(8, 2.0, "Keep", "", "");
        ctl.start_edit(&record);

        let err = ctl.submit_edit(&input("Change")).await.unwrap_err();
        assert!(matches!(err, ExpenseError::Http { status: 500, .. }));
        assert_eq!(ctl.editing(), &EditingSlot::Edit(record));

        ctl.start_create();
        assert!(ctl.submit_create(&input("New")).await.is_err());
        assert_eq!(ctl.editing(), &EditingSlot::Create);

        assert!(ctl.remove(&ExpenseId::Number(8)).await.is_err());

        // No reload after any failed mutation, and no load error either
        assert!(!ctl.api().calls().iter().any(|c| c.starts_with("list")));
        assert_eq!(ctl.error(), "");
    }
}
