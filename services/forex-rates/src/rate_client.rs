//! Rate Quote Client
//!
//! Fetches "1 base = N code" quotes from an open exchange-rate endpoint.

use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Raw quote map: `1 base = rates[code] code`.
pub type RawRates = HashMap<String, f64>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForexError {
    #[error("Rate request failed: {0}")]
    Transport(String),

    #[error("Rate source responded with HTTP {0}")]
    Status(u16),

    #[error("Malformed rate payload: {0}")]
    Malformed(String),

    #[error("Rate source reported an error: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for ForexError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

/// Anything that can quote rates for a base currency.
pub trait RateSource: Send + Sync {
    fn fetch_rates(&self, base: &str) -> impl Future<Output = Result<RawRates, ForexError>> + Send;
}

/// HTTP rate source
pub struct HttpRateSource {
    client: Client,
    base_url: String,
}

impl HttpRateSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ForexError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn quote_url(&self, base: &str) -> String {
        format!("{}/{}", self.base_url, base)
    }
}

impl RateSource for HttpRateSource {
    async fn fetch_rates(&self, base: &str) -> Result<RawRates, ForexError> {
        let url = self.quote_url(base);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ForexError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        parse_quote(&body)
    }
}

/// Quote payload. Providers flag success either as `"result": "success"` or as
/// `"success": true`.
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    success: Option<bool>,
    #[serde(default, rename = "error-type")]
    error_type: Option<String>,
    #[serde(default)]
    rates: Option<RawRates>,
}

/// Validates the payload shape and returns the raw quote map.
pub fn parse_quote(body: &str) -> Result<RawRates, ForexError> {
    let quote: QuoteResponse =
        serde_json::from_str(body).map_err(|e| ForexError::Malformed(e.to_string()))?;

    let succeeded = quote.result.as_deref() == Some("success") || quote.success == Some(true);
    if !succeeded {
        let reason = quote
            .error_type
            .or(quote.result)
            .unwrap_or_else(|| "missing success flag".to_string());
        return Err(ForexError::Rejected(reason));
    }

    quote
        .rates
        .ok_or_else(|| ForexError::Malformed("missing rates".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_payloads() {
        let rates = parse_quote(r#"{"result":"success","base_code":"RUB","rates":{"USD":0.011,"EUR":0.0102}}"#).unwrap();
        assert_eq!(rates.get("USD"), Some(&0.011));

        let rates = parse_quote(r#"{"success":true,"rates":{"CNY":0.079}}"#).unwrap();
        assert_eq!(rates.len(), 1);
    }

    #[test]
    fn test_parse_rejections() {
        assert_eq!(
            parse_quote(r#"{"result":"error","error-type":"unsupported-code"}"#),
            Err(ForexError::Rejected("unsupported-code".to_string()))
        );
        assert_eq!(
            parse_quote(r#"{"rates":{"USD":1.0}}"#),
            Err(ForexError::Rejected("missing success flag".to_string()))
        );
        assert!(matches!(parse_quote(r#"{"result":"success"}"#), Err(ForexError::Malformed(_))));
        assert!(matches!(parse_quote("<html>"), Err(ForexError::Malformed(_))));
        assert!(matches!(
            parse_quote(r#"{"result":"success","rates":{"USD":"n/a"}}"#),
            Err(ForexError::Malformed(_))
        ));
    }

    #[test]
    fn test_quote_url() {
        let source = HttpRateSource::new("https://open.er-api.com/v6/latest/", Duration::from_secs(1)).unwrap();
        assert_eq!(source.quote_url("RUB"), "https://open.er-api.com/v6/latest/RUB");
    }
}
