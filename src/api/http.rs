//! reqwest-backed implementation of [`ExpenseApi`]
//!
//! Routes, relative to the configured base URL:
//!
//! | call     | request                     |
//! |----------|-----------------------------|
//! | `list`   | `GET    /expenses[?q=...]`  |
//! | `create` | `POST   /expenses`          |
//! | `update` | `PUT    /expenses/{id}`     |
//! | `delete` | `DELETE /expenses/{id}`     |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::{ExpenseApi, ListFilter};
use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId, ExpenseInput};

const RESOURCE: &str = "expenses";

/// HTTP client for the expense API
#[derive(Debug, Clone)]
pub struct HttpExpenseApi {
    http: Client,
    base: Url,
}

impl HttpExpenseApi {
    /// Create a client rooted at `base` with a per-request timeout
    pub fn new(base: Url, timeout: Duration) -> ExpenseResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExpenseError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base })
    }

    /// Create a client from user settings
    pub fn from_settings(settings: &Settings) -> ExpenseResult<Self> {
        Self::new(settings.api_url()?, settings.request_timeout())
    }

    fn collection_url(&self) -> ExpenseResult<Url> {
        self.url_with(&[RESOURCE])
    }

    fn item_url(&self, id: &ExpenseId) -> ExpenseResult<Url> {
        self.url_with(&[RESOURCE, &id.to_string()])
    }

    fn url_with(&self, segments: &[&str]) -> ExpenseResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ExpenseError::Config(format!("API URL '{}' cannot be a base", self.base))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Turn non-2xx responses into [`ExpenseError::Http`], keeping the body text
async fn check_status(response: Response) -> ExpenseResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ExpenseError::Http {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> ExpenseResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ExpenseError::Decode(e.to_string()))
}

#[async_trait]
impl ExpenseApi for HttpExpenseApi {
    async fn list(&self, filter: &ListFilter) -> ExpenseResult<Vec<Expense>> {
        let url = self.collection_url()?;
        debug!(%url, q = ?filter.q, "listing expenses");

        let mut request = self.http.get(url);
        if let Some(q) = &filter.q {
            request = request.query(&[("q", q)]);
        }

        let response = check_status(request.send().await?).await?;
        decode(response).await
    }

    async fn create(&self, payload: &ExpenseInput) -> ExpenseResult<Expense> {
        let url = self.collection_url()?;
        debug!(%url, "creating expense");

        let response = check_status(self.http.post(url).json(payload).send().await?).await?;
        decode(response).await
    }

    async fn update(&self, id: &ExpenseId, payload: &ExpenseInput) -> ExpenseResult<Expense> {
        let url = self.item_url(id)?;
        debug!(%url, "updating expense");

        let response = check_status(self.http.put(url).json(payload).send().await?).await?;
        decode(response).await
    }

    async fn delete(&self, id: &ExpenseId) -> ExpenseResult<()> {
        let url = self.item_url(id)?;
        debug!(%url, "deleting expense");

        check_status(self.http.delete(url).send().await?).await?;
        Ok(())
    }
}
