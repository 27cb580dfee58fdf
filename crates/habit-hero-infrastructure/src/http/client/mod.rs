mod auth;
mod types;
mod user_data;

pub use types::{AuthMode, AuthSession, RetryConfig};

use anyhow::{Context, Result};
use habit_hero_domain::session::AuthToken;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tokio::time::sleep;

use super::error::HttpStatusError;
use crate::config::{ApiConfig, TimeoutConfig};
use types::{ErrorBody, USER_AGENT};

/// Client for the Habit Hero backend
pub struct HttpClient {
    client: Client,
    api: ApiConfig,
    retry_config: RetryConfig,
    timeouts: TimeoutConfig,
}

impl HttpClient {
    pub fn new(api: ApiConfig) -> Result<Self> {
        Self::with_config(api, RetryConfig::default(), TimeoutConfig::default())
    }

    pub fn with_config(
        api: ApiConfig,
        retry_config: RetryConfig,
        timeouts: TimeoutConfig,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(timeouts.http_request)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api,
            retry_config,
            timeouts,
        })
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    /// Attach the bearer token when one is stored
    fn authorize(request: RequestBuilder, token: Option<&AuthToken>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        }
    }

    /// Turn a non-2xx response into `HttpStatusError`
    async fn ensure_success(operation: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail)
            .unwrap_or_else(|| format!("{} failed: {}", operation, status.as_u16()));

        Err(HttpStatusError {
            operation: operation.to_string(),
            status,
            detail,
        }
        .into())
    }

    /// Execute a request with retry logic
    ///
    /// Retries on:
    /// - Network errors (connection failures, timeouts)
    /// - 5xx server errors
    /// - 429 Too Many Requests
    ///
    /// Any other failure is returned straight away.
    async fn execute_with_retry<F, Fut, T>(
        &self,
        operation_name: &str,
        mut request_fn: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        let mut backoff_ms = self.retry_config.initial_backoff_ms;

        loop {
            attempt += 1;

            match request_fn().await {
                Ok(response) => {
                    if attempt > 1 {
                        debug!("[http] {} succeeded after {} attempts", operation_name, attempt);
                    }
                    return Ok(response);
                }
                Err(e) => {
                    let should_retry =
                        attempt <= self.retry_config.max_retries && Self::is_retryable_error(&e);

                    if !should_retry {
                        if attempt > self.retry_config.max_retries {
                            warn!("[http] {} failed after {} attempts", operation_name, attempt);
                        }
                        return Err(e);
                    }

                    warn!(
                        "[http] {} failed (attempt {}/{}): {:#}. Retrying in {}ms",
                        operation_name,
                        attempt,
                        self.retry_config.max_retries + 1,
                        e,
                        backoff_ms
                    );

                    sleep(Duration::from_millis(backoff_ms)).await;

                    backoff_ms = ((backoff_ms as f64 * self.retry_config.backoff_multiplier) as u64)
                        .min(self.retry_config.max_backoff_ms);
                }
            }
        }
    }

    fn is_retryable_error(error: &anyhow::Error) -> bool {
        if let Some(status_err) = error.downcast_ref::<HttpStatusError>() {
            return status_err.is_retryable();
        }

        if let Some(reqwest_err) = error.downcast_ref::<reqwest::Error>() {
            if reqwest_err.is_connect() || reqwest_err.is_timeout() || reqwest_err.is_request() {
                return true;
            }
        }

        false
    }
}
