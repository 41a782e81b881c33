//! Judge Client - Outbound Call to the Execution Service
//!
//! **Responsibility:**
//! Forward one submission to the judge and hand back its JSON body.
//!
//! **Contract:**
//! - `base64_encoded=false`: source and stdin travel as plain JSON strings
//! - `wait=true`: the judge answers once execution finishes, no polling
//! - No client-side timeout and no retry
//! - Any JSON body is returned as-is, whatever the HTTP status

use crate::config::Config;
use drill_common::types::SubmissionRequest;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("judge returned a non-JSON body (HTTP {status}): {source}")]
    InvalidBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct JudgeClient {
    http: reqwest::Client,
    config: Config,
}

impl JudgeClient {
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn submit(&self, request: &SubmissionRequest) -> Result<Value, JudgeError> {
        let response = self
            .http
            .post(self.config.submissions_url())
            .query(&[("base64_encoded", "false"), ("wait", "true")])
            .header("X-RapidAPI-Key", &self.config.api_key)
            .header("X-RapidAPI-Host", &self.config.judge_host)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), body_bytes = bytes.len(), "Judge responded");

        serde_json::from_slice(&bytes).map_err(|source| JudgeError::InvalidBody {
            status: status.as_u16(),
            source,
        })
    }
}
