//! Sentifolio core — domain logic for the sentiment-portfolio dashboard.
//!
//! Three cooperating pieces, all rendering-agnostic:
//! - [`filter`] — two-phase pending/applied filter controller over the date
//!   range, ranking indicator and benchmark;
//! - [`series`] — pure metrics engine: sanitize the raw returns payload
//!   into a chart-ready series and derive the summary statistics;
//! - [`news`] — per-rebalancing-date news cache with fetch deduplication
//!   and independent per-key loading/error state.
//!
//! [`api`] is the only module that touches the network.

pub mod api;
pub mod filter;
pub mod news;
pub mod series;

pub use api::{ApiClient, ApiConfig, ApiError, NewsResponse, ReturnsQuery};
pub use filter::{Benchmark, DateRange, FilterController, FilterSelection, Indicator};
pub use news::{Article, NewsCache, NewsRequest, NewsState};
pub use series::{
    clean, summarize, ticker_selections, CleanedSeries, MetricsError, PerformanceSummary,
    TickerSelection,
};
