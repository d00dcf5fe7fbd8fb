//! Per-rebalancing-date news cache with fetch deduplication.
//!
//! Expanding a table row asks for news about that date's tickers at most
//! once per session. The cache itself performs no I/O: `toggle` returns the
//! fetch the caller must issue (if any), and `resolve` delivers the
//! completion back. Every date's state is fully independent — a slow or
//! failed fetch on one row never touches another.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// One news article, as served by the news endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(rename = "publishedAt", default)]
    pub published_at: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "urlToImage", default)]
    pub url_to_image: String,
}

/// Fetch state for one date key.
///
/// Idle is represented by the key being absent from the cache. A key moves
/// Idle → Loading on first expand and Loading → Loaded/Failed on
/// completion; terminal states never transition again this session (the
/// cache is never invalidated, so Failed is not retried either).
#[derive(Debug, Clone, PartialEq)]
pub enum NewsState {
    Loading,
    Loaded(Vec<Article>),
    Failed(String),
}

/// A fetch the caller must issue on behalf of the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRequest {
    pub date: String,
    pub tickers: Vec<String>,
}

/// Expand/collapse state plus the per-date fetch cache.
#[derive(Debug, Default)]
pub struct NewsCache {
    entries: HashMap<String, NewsState>,
    expanded: HashSet<String>,
}

impl NewsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a row. Collapsing is a pure UI-state change: any in-flight
    /// fetch keeps running and will still populate the cache. Expanding
    /// returns `Some(NewsRequest)` exactly when this date has never been
    /// fetched; `Loading`, `Loaded` and `Failed` entries are never
    /// re-triggered.
    pub fn toggle(&mut self, date: &str, tickers: &[String]) -> Option<NewsRequest> {
        if self.expanded.remove(date) {
            return None;
        }
        self.expanded.insert(date.to_string());

        if self.entries.contains_key(date) {
            return None;
        }
        self.entries.insert(date.to_string(), NewsState::Loading);
        Some(NewsRequest {
            date: date.to_string(),
            tickers: tickers.to_vec(),
        })
    }

    /// Deliver a fetch completion. Applied regardless of whether the row is
    /// still expanded (no lost updates); only a `Loading` entry
    /// transitions, so a terminal state is never overwritten.
    pub fn resolve(&mut self, date: &str, result: Result<Vec<Article>, String>) {
        // Completions for unknown or already-settled keys are dropped.
        if matches!(self.entries.get(date), Some(NewsState::Loading)) {
            let state = match result {
                Ok(articles) => NewsState::Loaded(articles),
                Err(message) => NewsState::Failed(message),
            };
            self.entries.insert(date.to_string(), state);
        }
    }

    pub fn is_expanded(&self, date: &str) -> bool {
        self.expanded.contains(date)
    }

    /// Snapshot of a date's fetch state; `None` means Idle.
    pub fn state(&self, date: &str) -> Option<&NewsState> {
        self.entries.get(date)
    }
}
