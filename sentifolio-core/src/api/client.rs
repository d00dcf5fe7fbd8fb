//! Blocking HTTP client for the portfolio-returns and news endpoints.

use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use super::config::ApiConfig;
use crate::filter::FilterSelection;
use crate::news::Article;

/// Structured error types for API calls.
///
/// Non-2xx responses and transport failures both land here; nothing from
/// the network is allowed to propagate as a panic or unhandled error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server returned HTTP {status}")]
    Http { status: u16 },

    #[error("response decode failed: {0}")]
    Decode(String),
}

/// Query parameters for the portfolio-returns endpoint, built from an
/// applied filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnsQuery {
    pub start_date: String,
    pub end_date: String,
    pub market_index: String,
    pub indicator: String,
}

impl ReturnsQuery {
    pub fn from_selection(selection: &FilterSelection) -> Self {
        Self {
            start_date: selection.range.start.format("%Y-%m-%d").to_string(),
            end_date: selection.range.end.format("%Y-%m-%d").to_string(),
            market_index: selection.benchmark.as_symbol().to_string(),
            indicator: selection.indicator.as_param().to_string(),
        }
    }
}

/// News endpoint response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(rename = "totalResults", default)]
    pub total_results: u64,
    #[serde(default)]
    pub tickers: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Client for the sentiment backend.
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the returns payload for the applied filter.
    ///
    /// Returned as untyped JSON: the benchmark column is named after the
    /// benchmark symbol, and shape validation belongs to the metrics
    /// engine (`series::clean`), which types a bad shape as
    /// `MalformedPayload` rather than failing here.
    pub fn portfolio_returns(&self, query: &ReturnsQuery) -> Result<Value, ApiError> {
        let url = format!("{}/portfolio-returns/", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("start_date", query.start_date.as_str()),
                ("end_date", query.end_date.as_str()),
                ("market_index", query.market_index.as_str()),
                ("indicator", query.indicator.as_str()),
            ])
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Fetch recent news for a set of tickers (comma-joined on the wire).
    pub fn news(&self, tickers: &[String]) -> Result<NewsResponse, ApiError> {
        let url = format!("{}/news/", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("tickers", tickers.join(","))])
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Benchmark, DateRange, Indicator};
    use chrono::NaiveDate;

    #[test]
    fn query_built_from_selection() {
        let selection = FilterSelection {
            range: DateRange::new(
                NaiveDate::from_ymd_opt(2021, 1, 28).unwrap(),
                NaiveDate::from_ymd_opt(2021, 8, 2).unwrap(),
            ),
            indicator: Indicator::TotalSentiment,
            benchmark: Benchmark::Aapl,
        };
        let query = ReturnsQuery::from_selection(&selection);
        assert_eq!(query.start_date, "2021-01-28");
        assert_eq!(query.end_date, "2021-08-02");
        assert_eq!(query.market_index, "AAPL");
        assert_eq!(query.indicator, "total_sentiment");
    }

    #[test]
    fn news_response_decodes() {
        let json = r#"{
            "status": "ok",
            "articles": [
                {"title": "GME up", "source": "AP", "publishedAt": "2021-03-31T09:30:00Z",
                 "url": "https://example.com", "description": "d", "urlToImage": ""}
            ],
            "totalResults": 1,
            "tickers": ["GME", "AMC"]
        }"#;
        let resp: NewsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.total_results, 1);
        assert_eq!(resp.articles.len(), 1);
        assert_eq!(resp.tickers, vec!["GME", "AMC"]);
        assert_eq!(resp.message, None);
    }

    #[test]
    fn news_error_envelope_decodes() {
        let json = r#"{"status": "error", "message": "rate limited"}"#;
        let resp: NewsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, "error");
        assert!(resp.articles.is_empty());
        assert_eq!(resp.message.as_deref(), Some("rate limited"));
    }

    #[test]
    fn error_display_is_stable() {
        assert_eq!(
            ApiError::Http { status: 502 }.to_string(),
            "server returned HTTP 502"
        );
        assert_eq!(
            ApiError::Network("connection refused".into()).to_string(),
            "network error: connection refused"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client =
            ApiClient::new(&ApiConfig::default().with_base_url("http://host/api_v1/")).unwrap();
        assert_eq!(client.base_url, "http://host/api_v1");
    }
}
