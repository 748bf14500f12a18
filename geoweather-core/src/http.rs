use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::{error::Error, time::Duration};
use tracing::{debug, warn};

use crate::error::{OperationResult, Stage, StageError};

/// Build the HTTP client shared by both stages.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("Failed to build HTTP client")
}

/// Issue one GET and decode the JSON body into `T`.
///
/// Send and body-read failures become [`StageError::Request`], non-2xx answers
/// become [`StageError::Status`] and undecodable bodies become
/// [`StageError::Parse`]. Nothing is retried.
pub async fn get_json<T: DeserializeOwned>(
    http: &Client,
    stage: Stage,
    url: &str,
    query: &[(&str, &str)],
) -> OperationResult<T> {
    debug!(%stage, url, "sending request");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| request_error(stage, e))?;

    let status = res.status();
    let body = res.text().await.map_err(|e| request_error(stage, e))?;

    if !status.is_success() {
        warn!(%stage, status = status.as_u16(), body = %truncate_body(&body), "request failed");
        return Err(StageError::Status { stage, status: status.as_u16() });
    }

    serde_json::from_str(&body).map_err(|e| StageError::parse(stage, e.to_string()))
}

// The URL carries the credential, so it is stripped from the message.
fn request_error(stage: Stage, err: reqwest::Error) -> StageError {
    StageError::Request { stage, cause: error_chain(&err.without_url()) }
}

/// Top-level message followed by every `source()`, joined with `": "`.
fn error_chain(err: &dyn Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        source = inner.source();
    }
    text
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
