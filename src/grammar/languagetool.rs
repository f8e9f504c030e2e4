use std::time::Duration;

use serde::Deserialize;

use crate::grammar::{GrammarChecker, GrammarError, GrammarIssue};

/// Client for a LanguageTool-compatible `/v2/check` endpoint.
pub struct LanguageToolClient {
    endpoint: String,
    language: String,
    #[cfg(feature = "network")]
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<RawMatch>,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    message: String,
    #[serde(default)]
    offset: usize,
    #[serde(default)]
    length: usize,
    #[serde(default)]
    rule: Option<RawRule>,
    #[serde(default)]
    replacements: Vec<RawReplacement>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RawReplacement {
    value: String,
}

impl LanguageToolClient {
    #[cfg(feature = "network")]
    pub fn new(server_url: &str, language: &str, timeout: Duration) -> Result<Self, GrammarError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GrammarError::Unavailable(e.to_string()))?;
        Ok(Self {
            endpoint: check_endpoint(server_url),
            language: language.to_string(),
            client,
        })
    }

    #[cfg(not(feature = "network"))]
    pub fn new(server_url: &str, language: &str, _timeout: Duration) -> Result<Self, GrammarError> {
        Ok(Self {
            endpoint: check_endpoint(server_url),
            language: language.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

fn check_endpoint(server_url: &str) -> String {
    format!("{}/v2/check", server_url.trim_end_matches('/'))
}

/// Decode a `/v2/check` response body into issues, preserving server order.
pub fn parse_response(body: &str) -> Result<Vec<GrammarIssue>, GrammarError> {
    let response: CheckResponse = serde_json::from_str(body)?;
    Ok(response
        .matches
        .into_iter()
        .map(|m| GrammarIssue {
            message: m.message,
            offset: m.offset,
            length: m.length,
            rule_id: m.rule.map(|r| r.id),
            replacements: m.replacements.into_iter().map(|r| r.value).collect(),
        })
        .collect())
}

impl GrammarChecker for LanguageToolClient {
    #[cfg(feature = "network")]
    fn check(&self, text: &str) -> Result<Vec<GrammarIssue>, GrammarError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("text", text), ("language", self.language.as_str())])
            .send()
            .map_err(|e| GrammarError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GrammarError::Status(status.as_u16()));
        }
        let body = response
            .text()
            .map_err(|e| GrammarError::Http(e.to_string()))?;
        parse_response(&body)
    }

    #[cfg(not(feature = "network"))]
    fn check(&self, _text: &str) -> Result<Vec<GrammarIssue>, GrammarError> {
        Err(GrammarError::Unavailable(
            "built without network support".to_string(),
        ))
    }
}
