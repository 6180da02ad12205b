//! In-process API double shared by unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ExpenseApi, ListFilter};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId, ExpenseInput};

/// Scripted API double: records every call and answers list requests
/// from a queue, then with an empty list once the queue runs dry.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<String>>,
    list_results: Mutex<VecDeque<ExpenseResult<Vec<Expense>>>>,
    fail_mutations: bool,
}

impl FakeApi {
    pub fn with_lists(results: Vec<ExpenseResult<Vec<Expense>>>) -> Self {
        Self {
            list_results: Mutex::new(results.into()),
            ..Self::default()
        }
    }

    pub fn failing_mutations() -> Self {
        Self {
            fail_mutations: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn mutation_result<T>(&self, ok: T) -> ExpenseResult<T> {
        if self.fail_mutations {
            Err(ExpenseError::Http {
                status: 500,
                body: "boom".into(),
            })
        } else {
            Ok(ok)
        }
    }
}

#[async_trait]
impl ExpenseApi for FakeApi {
    async fn list(&self, filter: &ListFilter) -> ExpenseResult<Vec<Expense>> {
        self.record(format!("list {:?}", filter.q));
        self.list_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create(&self, payload: &ExpenseInput) -> ExpenseResult<Expense> {
        self.record(format!("create {}", payload.description));
        self.mutation_result(Expense::new(100, payload.amount, "", "", ""))
    }

    async fn update(&self, id: &ExpenseId, payload: &ExpenseInput) -> ExpenseResult<Expense> {
        self.record(format!("update {} {}", id, payload.description));
        self.mutation_result(Expense::new(1, payload.amount, "", "", ""))
    }

    async fn delete(&self, id: &ExpenseId) -> ExpenseResult<()> {
        self.record(format!("delete {}", id));
        self.mutation_result(())
    }
}

/// Two records whose amounts total 15.5
pub fn sample_expenses() -> Vec<Expense> {
    vec![
        Expense::new(1, "10.50", "Lunch", "2024-03-01", "Food"),
        Expense::new(2, 5.0, "Bus", "2024-03-02", "Travel"),
    ]
}
