//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels;
//! everything it sends back is applied through the `apply_*` methods so the
//! staleness and cache rules live in one (testable) place.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use sentifolio_core::filter::FilterController;
use sentifolio_core::news::NewsCache;
use sentifolio_core::series::{
    clean, summarize, ticker_selections, CleanedSeries, PerformanceSummary, TickerSelection,
};
use sentifolio_core::ReturnsQuery;

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Filters,
    Chart,
    Summary,
    Tickers,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Filters => 0,
            Panel::Chart => 1,
            Panel::Summary => 2,
            Panel::Tickers => 3,
            Panel::Help => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Filters),
            1 => Some(Panel::Chart),
            2 => Some(Panel::Summary),
            3 => Some(Panel::Tickers),
            4 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Filters => "Filters",
            Panel::Chart => "Chart",
            Panel::Summary => "Summary",
            Panel::Tickers => "Tickers",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 5).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 4) % 5).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// Filters panel: the pending/applied controller plus a field cursor.
#[derive(Debug)]
pub struct FiltersPanelState {
    pub controller: FilterController,
    /// 0 = start date, 1 = end date, 2 = indicator, 3 = benchmark.
    pub cursor: usize,
}

impl FiltersPanelState {
    pub const FIELD_COUNT: usize = 4;

    pub fn new() -> Self {
        Self {
            controller: FilterController::default(),
            cursor: 0,
        }
    }
}

/// The cleaned returns series and its summary, shared by the Chart and
/// Summary panels.
#[derive(Debug, Default)]
pub struct ReturnsState {
    pub series: Option<CleanedSeries>,
    pub summary: Option<PerformanceSummary>,
    pub loading: bool,
    /// Terminal error for the last request (network or malformed payload).
    pub error: Option<String>,
    /// Id of the most recently issued returns request. Responses carrying
    /// any other id are stale and discarded.
    pub request_seq: u64,
}

/// Tickers panel: rebalancing table rows plus the per-date news cache.
#[derive(Debug)]
pub struct TickersPanelState {
    pub rows: Vec<TickerSelection>,
    pub cursor: usize,
    pub scroll_offset: usize,
    pub news: NewsCache,
}

impl TickersPanelState {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            news: NewsCache::new(),
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Panel states
    pub filters: FiltersPanelState,
    pub returns: ReturnsState,
    pub tickers: TickersPanelState,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(worker_tx: Sender<WorkerCommand>, worker_rx: Receiver<WorkerResponse>) -> Self {
        Self {
            active_panel: Panel::Filters,
            running: true,
            filters: FiltersPanelState::new(),
            returns: ReturnsState::default(),
            tickers: TickersPanelState::new(),
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    /// Issue a returns fetch for the currently applied filter. Each call
    /// gets a fresh request id; older in-flight requests become stale.
    pub fn request_returns(&mut self) {
        self.returns.request_seq += 1;
        self.returns.loading = true;
        self.returns.error = None;

        let query = ReturnsQuery::from_selection(self.filters.controller.applied());
        let _ = self.worker_tx.send(WorkerCommand::FetchReturns {
            request_id: self.returns.request_seq,
            query,
        });
        self.set_status("Fetching portfolio returns...");
    }

    /// Commit pending filter edits and refetch. No-op when nothing changed.
    pub fn apply_filters(&mut self) {
        if self.filters.controller.commit().is_some() {
            self.request_returns();
        } else {
            self.set_warning("No pending filter changes");
        }
    }

    /// Apply a returns response from the worker.
    ///
    /// Responses for anything but the latest issued request are discarded:
    /// with overlapping commits the later-resolving response must not
    /// overwrite state with data for an older filter.
    pub fn apply_returns_response(&mut self, request_id: u64, result: Result<Value, String>) {
        if request_id != self.returns.request_seq {
            return;
        }
        self.returns.loading = false;

        let payload = match result {
            Ok(payload) => payload,
            Err(error) => {
                self.returns.error = Some(error.clone());
                self.push_error(ErrorCategory::Network, error, "portfolio returns".into());
                return;
            }
        };

        let benchmark = self.filters.controller.applied().benchmark;
        match clean(&payload, benchmark) {
            Ok(series) => {
                self.returns.summary = Some(summarize(&series));
                self.returns.error = None;

                self.tickers.rows = ticker_selections(&payload);
                if self.tickers.cursor >= self.tickers.rows.len() {
                    self.tickers.cursor = 0;
                    self.tickers.scroll_offset = 0;
                }

                self.set_status(format!("Loaded {} return periods", series.len()));
                self.returns.series = Some(series);
            }
            Err(err) => {
                self.returns.series = None;
                self.returns.summary = None;
                self.tickers.rows.clear();
                self.returns.error = Some(err.to_string());
                self.push_error(ErrorCategory::Data, err.to_string(), "portfolio returns".into());
            }
        }
    }

    /// Toggle the ticker row under the cursor, issuing a news fetch if the
    /// cache has never seen this date.
    pub fn toggle_selected_ticker_row(&mut self) {
        let Some(row) = self.tickers.rows.get(self.tickers.cursor) else {
            return;
        };
        if let Some(request) = self.tickers.news.toggle(&row.date, &row.tickers) {
            let _ = self.worker_tx.send(WorkerCommand::FetchNews {
                date: request.date,
                tickers: request.tickers,
            });
        }
    }

    /// Apply a news completion. Always lands in the cache, expanded or not.
    pub fn apply_news_response(
        &mut self,
        date: String,
        result: Result<Vec<sentifolio_core::Article>, String>,
    ) {
        if let Err(error) = &result {
            self.push_error(ErrorCategory::Network, error.clone(), format!("news {date}"));
        }
        self.tickers.news.resolve(&date, result);
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentifolio_core::filter::Indicator;
    use sentifolio_core::news::NewsState;
    use serde_json::json;
    use std::sync::mpsc;

    fn test_app() -> (AppState, Receiver<WorkerCommand>) {
        let (tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, rx) = mpsc::channel();
        (AppState::new(tx, rx), cmd_rx)
    }

    fn returns_payload() -> Value {
        json!({
            "portfolio_returns": [
                {"date": "2021-01-29", "portfolio_return": 0.05, "QQQ": 0.02},
                {"date": "2021-02-26", "portfolio_return": 0.12, "QQQ": 0.10},
            ],
            "tickers_by_date": [
                {"date": "2021-01-29", "tickers": ["GME", "AMC"]},
            ]
        })
    }

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Filters.next(), Panel::Chart);
        assert_eq!(Panel::Help.next(), Panel::Filters);
        assert_eq!(Panel::Filters.prev(), Panel::Help);
        assert_eq!(Panel::Chart.prev(), Panel::Filters);
    }

    #[test]
    fn panel_from_index() {
        for i in 0..5 {
            let p = Panel::from_index(i).unwrap();
            assert_eq!(p.index(), i);
        }
        assert!(Panel::from_index(5).is_none());
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _cmd_rx) = test_app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Other, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn apply_filters_sends_one_fetch_per_commit() {
        let (mut app, cmd_rx) = test_app();

        // Clean controller: no fetch.
        app.apply_filters();
        assert!(cmd_rx.try_recv().is_err());

        app.filters.controller.set_pending_indicator(Indicator::Score);
        app.apply_filters();
        match cmd_rx.try_recv() {
            Ok(WorkerCommand::FetchReturns { request_id, query }) => {
                assert_eq!(request_id, 1);
                assert_eq!(query.indicator, "score");
            }
            other => panic!("expected FetchReturns, got {other:?}"),
        }
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn returns_response_populates_state() {
        let (mut app, _cmd_rx) = test_app();
        app.request_returns();
        app.apply_returns_response(1, Ok(returns_payload()));

        assert!(!app.returns.loading);
        let series = app.returns.series.as_ref().unwrap();
        assert_eq!(series.len(), 2);
        let summary = app.returns.summary.as_ref().unwrap();
        assert_eq!(summary.peak_return, 0.12);
        assert_eq!(app.tickers.rows.len(), 1);
    }

    #[test]
    fn stale_returns_response_is_discarded() {
        let (mut app, _cmd_rx) = test_app();
        app.request_returns(); // id 1
        app.request_returns(); // id 2 — latest

        // The id-1 response resolves late; it must not overwrite anything.
        app.apply_returns_response(1, Ok(returns_payload()));
        assert!(app.returns.series.is_none());
        assert!(app.returns.loading);

        app.apply_returns_response(2, Ok(returns_payload()));
        assert!(app.returns.series.is_some());
        assert!(!app.returns.loading);
    }

    #[test]
    fn malformed_payload_becomes_typed_error_state() {
        let (mut app, _cmd_rx) = test_app();
        app.request_returns();
        app.apply_returns_response(1, Ok(json!({"portfolio_returns": "oops"})));

        assert!(app.returns.series.is_none());
        assert!(app.returns.summary.is_none());
        assert!(app.returns.error.as_deref().unwrap().contains("malformed"));
        assert_eq!(app.error_history[0].category, ErrorCategory::Data);
    }

    #[test]
    fn fetch_failure_keeps_previous_series() {
        let (mut app, _cmd_rx) = test_app();
        app.request_returns();
        app.apply_returns_response(1, Ok(returns_payload()));

        app.request_returns();
        app.apply_returns_response(2, Err("connection refused".into()));

        // Last good series stays on screen next to the error banner.
        assert!(app.returns.series.is_some());
        assert_eq!(app.returns.error.as_deref(), Some("connection refused"));
        assert_eq!(app.error_history[0].category, ErrorCategory::Network);
    }

    #[test]
    fn ticker_row_toggle_issues_single_news_fetch() {
        let (mut app, cmd_rx) = test_app();
        app.request_returns();
        app.apply_returns_response(1, Ok(returns_payload()));
        while cmd_rx.try_recv().is_ok() {} // drop the FetchReturns command

        app.toggle_selected_ticker_row(); // expand → fetch
        app.toggle_selected_ticker_row(); // collapse
        app.toggle_selected_ticker_row(); // re-expand, still loading

        let mut news_fetches = 0;
        while let Ok(cmd) = cmd_rx.try_recv() {
            if let WorkerCommand::FetchNews { date, tickers } = cmd {
                assert_eq!(date, "2021-01-29");
                assert_eq!(tickers, vec!["GME", "AMC"]);
                news_fetches += 1;
            }
        }
        assert_eq!(news_fetches, 1);
    }

    #[test]
    fn news_completion_lands_while_collapsed() {
        let (mut app, _cmd_rx) = test_app();
        app.request_returns();
        app.apply_returns_response(1, Ok(returns_payload()));

        app.toggle_selected_ticker_row(); // expand, Loading
        app.toggle_selected_ticker_row(); // collapse before resolution

        app.apply_news_response("2021-01-29".into(), Ok(Vec::new()));
        assert!(matches!(
            app.tickers.news.state("2021-01-29"),
            Some(NewsState::Loaded(_))
        ));

        // Failed news lands in the error history too.
        app.toggle_selected_ticker_row();
        app.apply_news_response("2021-02-26".into(), Err("timeout".into()));
        assert_eq!(app.error_history[0].category, ErrorCategory::Network);
    }
}
