// HTTP client for the Drill API execution proxy

use anyhow::{bail, Context, Result};
use drill_common::config::run_url;
use drill_common::types::{SubmissionRequest, SubmissionResult};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    run_url: String,
}

impl ProxyClient {
    pub fn new(server_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            run_url: run_url(server_url),
        }
    }

    /// Submit code through the proxy.
    ///
    /// Transport failures and non-2xx answers from the proxy are errors;
    /// the proxy's `details` field is carried in the message when present.
    /// A 500 from the proxy therefore shows as `Error: ...` with no verdict,
    /// not as empty output judged Incorrect.
    pub async fn execute(&self, request: &SubmissionRequest) -> Result<SubmissionResult> {
        let response = self
            .http
            .post(&self.run_url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("could not reach {}", self.run_url))?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let error = body["error"].as_str().unwrap_or("Request failed");
            match body["details"].as_str() {
                Some(details) => bail!("{} (HTTP {}): {}", error, status.as_u16(), details),
                None => bail!("{} (HTTP {})", error, status.as_u16()),
            }
        }

        response
            .json::<SubmissionResult>()
            .await
            .context("proxy returned an unreadable response")
    }
}
