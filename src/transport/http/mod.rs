use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::core::error::{BackendError, ConfigError};
use crate::core::types::BackendId;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub retryable_status_codes: Vec<u16>,
}

impl RetryPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidRetryPolicy {
                reason: "max_attempts must be >= 1".to_string(),
            });
        }
        if self.max_backoff_ms < self.initial_backoff_ms {
            return Err(ConfigError::InvalidRetryPolicy {
                reason: "max_backoff_ms must be >= initial_backoff_ms".to_string(),
            });
        }
        if let Some(status) = self
            .retryable_status_codes
            .iter()
            .copied()
            .find(|status| !(100..=599).contains(status))
        {
            return Err(ConfigError::InvalidRetryPolicy {
                reason: format!("retryable status code must be in 100..=599: {status}"),
            });
        }
        Ok(())
    }

    /// Single attempt, no backoff.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff_ms: 0,
            max_backoff_ms: 0,
            retryable_status_codes: Vec::new(),
        }
    }

    fn should_retry_status(&self, status_code: u16) -> bool {
        self.retryable_status_codes.contains(&status_code)
    }

    pub(crate) fn backoff_duration_for_retry(&self, retry_index: u32) -> Duration {
        let shift = retry_index.min(63);
        let multiplier = 1_u64.checked_shl(shift).unwrap_or(u64::MAX);
        let backoff_ms = self
            .initial_backoff_ms
            .saturating_mul(multiplier)
            .min(self.max_backoff_ms);
        Duration::from_millis(backoff_ms)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 2_000,
            retryable_status_codes: vec![408, 429, 500, 502, 503, 504],
        }
    }
}

/// JSON POST client with a per-request timeout and bounded retries.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    retry_policy: RetryPolicy,
    timeout_ms: u64,
}

impl HttpTransport {
    pub fn new(timeout_ms: u64, retry_policy: RetryPolicy) -> Result<Self, ConfigError> {
        Self::with_client(reqwest::Client::new(), timeout_ms, retry_policy)
    }

    pub fn with_client(
        client: reqwest::Client,
        timeout_ms: u64,
        retry_policy: RetryPolicy,
    ) -> Result<Self, ConfigError> {
        Self::validate_timeout(timeout_ms)?;
        retry_policy.validate()?;

        Ok(Self {
            client,
            retry_policy,
            timeout_ms,
        })
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Posts `body` as JSON and decodes a successful response as `TResp`.
    ///
    /// Non-success statuses come back as `BackendError::Status` carrying the
    /// response body, after any retries the policy allows.
    pub async fn post_json<TReq, TResp>(
        &self,
        backend: BackendId,
        url: &str,
        body: &TReq,
        bearer_token: Option<&str>,
    ) -> Result<TResp, BackendError>
    where
        TReq: Serialize + ?Sized,
        TResp: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body).map_err(|error| BackendError::Serialization {
            backend: backend.clone(),
            request_id: None,
            message: error.to_string(),
        })?;
        let headers = build_headers(&backend, bearer_token)?;
        let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let request_builder = self
                .client
                .post(url)
                .timeout(Duration::from_millis(self.timeout_ms))
                .headers(headers.clone())
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(payload.clone());

            debug!(%backend, attempt, url, "sending request");

            match request_builder.send().await {
                Ok(response) => {
                    let status = response.status();
                    let request_id = extract_request_id(response.headers(), &request_id_header);

                    if !status.is_success() {
                        let status_error =
                            build_status_error(&backend, status, request_id, response).await;

                        if attempt < self.retry_policy.max_attempts
                            && self.retry_policy.should_retry_status(status.as_u16())
                        {
                            warn!(
                                %backend,
                                attempt,
                                status_code = status.as_u16(),
                                "retrying after status error"
                            );
                            self.sleep_before_retry(attempt).await;
                            continue;
                        }

                        return Err(status_error);
                    }

                    let parsed = response.json::<TResp>().await.map_err(|error| {
                        BackendError::Serialization {
                            backend: backend.clone(),
                            request_id,
                            message: error.to_string(),
                        }
                    })?;

                    return Ok(parsed);
                }
                Err(error) => {
                    let transport_error = if error.is_timeout() {
                        BackendError::Timeout {
                            backend: backend.clone(),
                            timeout_ms: self.timeout_ms,
                        }
                    } else {
                        BackendError::Transport {
                            backend: backend.clone(),
                            request_id: None,
                            message: error.to_string(),
                        }
                    };

                    if attempt < self.retry_policy.max_attempts && is_retryable_transport(&error) {
                        warn!(%backend, attempt, error = %error, "retrying after transport error");
                        self.sleep_before_retry(attempt).await;
                        continue;
                    }

                    return Err(transport_error);
                }
            }
        }
    }

    fn validate_timeout(timeout_ms: u64) -> Result<(), ConfigError> {
        if timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout { timeout_ms });
        }
        Ok(())
    }

    async fn sleep_before_retry(&self, attempt: u32) {
        let retry_index = attempt.saturating_sub(1);
        let backoff = self.retry_policy.backoff_duration_for_retry(retry_index);
        tokio::time::sleep(backoff).await;
    }
}

async fn build_status_error(
    backend: &BackendId,
    status: StatusCode,
    request_id: Option<String>,
    response: Response,
) -> BackendError {
    let status_code = status.as_u16();
    let message = match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        Ok(_) => format!("http status {status_code}"),
        Err(error) => {
            format!("http status {status_code}; failed to read response body: {error}")
        }
    };

    BackendError::Status {
        backend: backend.clone(),
        status_code,
        request_id,
        message,
    }
}

fn build_headers(
    backend: &BackendId,
    bearer_token: Option<&str>,
) -> Result<HeaderMap, BackendError> {
    let mut headers = HeaderMap::new();
    if let Some(token) = bearer_token {
        let auth_value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|error| {
            BackendError::Protocol {
                backend: backend.clone(),
                request_id: None,
                message: format!("invalid bearer token header value: {error}"),
            }
        })?;
        headers.insert(AUTHORIZATION, auth_value);
    }
    Ok(headers)
}

fn extract_request_id(headers: &HeaderMap, request_id_header: &HeaderName) -> Option<String> {
    headers
        .get(request_id_header)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn is_retryable_transport(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect() || error.is_request()
}
