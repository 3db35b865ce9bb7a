use anyhow::Context;
use reqwest::StatusCode;
use serde_json::Value;

use crate::models::SurveyResponse;

/// Client for the survey backend. The dashboard downloads the whole response
/// set once per session and filters in memory, so this surface is just a
/// liveness probe plus one bulk fetch.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Probe `GET {base}/test/`; any 2xx counts as reachable.
    pub async fn check(&self) -> anyhow::Result<()> {
        let response = self
            .client
            .get(format!("{}/test/", self.base_url))
            .send()
            .await
            .context("failed to reach the survey API")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "survey API test endpoint returned {}",
                response.status()
            );
        }
        Ok(())
    }

    /// Download the full response set from `GET {base}/responses/`.
    pub async fn fetch_responses(&self) -> anyhow::Result<Vec<SurveyResponse>> {
        let response = self
            .client
            .get(format!("{}/responses/", self.base_url))
            .send()
            .await
            .context("failed to reach the survey API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{}", error_message(&body, status));
        }

        let payload: Value = response
            .json()
            .await
            .context("survey API returned a non-JSON body")?;
        Ok(parse_response_payload(&payload))
    }
}

/// Failed requests are expected to carry a JSON body with an `error` string;
/// anything else falls back to a generic transport message.
fn error_message(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("survey API request failed with status {status}"))
}

/// The backend serves either a bare array of records or a pagination
/// envelope with a `results` array; both shapes are equivalent here.
fn parse_response_payload(payload: &Value) -> Vec<SurveyResponse> {
    let empty: &[Value] = &[];
    let records = match payload {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(empty),
        _ => empty,
    };

    records
        .iter()
        .filter_map(SurveyResponse::from_value)
        .collect()
}
