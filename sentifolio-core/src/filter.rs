//! Filter selection and the two-phase pending/applied controller.
//!
//! The dashboard stages edits to three parameters (date range, ranking
//! indicator, benchmark) and applies them in one atomic step. Only the
//! applied selection drives data fetching; pending edits are local until
//! `commit`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ranking indicator used by the server to select the monthly top tickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Indicator {
    EngagementRatio,
    TotalSentiment,
    Score,
    CommsNum,
}

/// All indicators in display order.
pub const INDICATORS: [Indicator; 4] = [
    Indicator::EngagementRatio,
    Indicator::TotalSentiment,
    Indicator::Score,
    Indicator::CommsNum,
];

impl Indicator {
    /// Wire value for the `indicator` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            Indicator::EngagementRatio => "engagement_ratio",
            Indicator::TotalSentiment => "total_sentiment",
            Indicator::Score => "score",
            Indicator::CommsNum => "comms_num",
        }
    }

    /// Human-readable name for menus and table headers.
    pub fn label(self) -> &'static str {
        match self {
            Indicator::EngagementRatio => "Engagement Ratio",
            Indicator::TotalSentiment => "Sentiment",
            Indicator::Score => "Total Score of Posts",
            Indicator::CommsNum => "Total Number of Comments",
        }
    }

    pub fn index(self) -> usize {
        INDICATORS.iter().position(|i| *i == self).unwrap_or(0)
    }

    pub fn next(self) -> Indicator {
        INDICATORS[(self.index() + 1) % INDICATORS.len()]
    }

    pub fn prev(self) -> Indicator {
        INDICATORS[(self.index() + INDICATORS.len() - 1) % INDICATORS.len()]
    }
}

/// Market-index series the portfolio is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Benchmark {
    Qqq,
    Aapl,
}

/// All benchmarks in display order.
pub const BENCHMARKS: [Benchmark; 2] = [Benchmark::Qqq, Benchmark::Aapl];

impl Benchmark {
    /// Ticker symbol; doubles as the `market_index` query parameter and the
    /// name of the benchmark column in the returns payload.
    pub fn as_symbol(self) -> &'static str {
        match self {
            Benchmark::Qqq => "QQQ",
            Benchmark::Aapl => "AAPL",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Benchmark::Qqq => "QQQ",
            Benchmark::Aapl => "Apple",
        }
    }

    pub fn index(self) -> usize {
        BENCHMARKS.iter().position(|b| *b == self).unwrap_or(0)
    }

    pub fn next(self) -> Benchmark {
        BENCHMARKS[(self.index() + 1) % BENCHMARKS.len()]
    }

    pub fn prev(self) -> Benchmark {
        BENCHMARKS[(self.index() + BENCHMARKS.len() - 1) % BENCHMARKS.len()]
    }
}

/// Inclusive date window for the returns query.
///
/// `start <= end` is the intended invariant but is not enforced at edit
/// time; an inverted range simply yields an empty series from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }
}

/// One complete parameter set for the portfolio-returns query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub range: DateRange,
    pub indicator: Indicator,
    pub benchmark: Benchmark,
}

impl Default for FilterSelection {
    fn default() -> Self {
        // The window the bundled sentiment dataset covers.
        Self {
            range: DateRange::new(
                NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2021, 12, 31).unwrap(),
            ),
            indicator: Indicator::EngagementRatio,
            benchmark: Benchmark::Qqq,
        }
    }
}

/// Two-phase filter state: freely editable `pending` vs the committed
/// `applied` selection that drives fetching.
///
/// Per field pair the controller is either Clean (pending == applied) or
/// Dirty; `commit` is the only Dirty→Clean transition and any setter the
/// only Clean→Dirty one. If the applied selection changes through any path
/// other than `commit` (see [`FilterController::reset`]), pending is
/// resynchronized so it never silently diverges from a fresh value.
#[derive(Debug, Clone)]
pub struct FilterController {
    pending: FilterSelection,
    applied: FilterSelection,
}

impl FilterController {
    pub fn new(initial: FilterSelection) -> Self {
        Self {
            pending: initial,
            applied: initial,
        }
    }

    pub fn pending(&self) -> &FilterSelection {
        &self.pending
    }

    pub fn applied(&self) -> &FilterSelection {
        &self.applied
    }

    pub fn set_pending_start(&mut self, start: NaiveDate) {
        self.pending.range.start = start;
    }

    pub fn set_pending_end(&mut self, end: NaiveDate) {
        self.pending.range.end = end;
    }

    pub fn set_pending_range(&mut self, range: DateRange) {
        self.pending.range = range;
    }

    pub fn set_pending_indicator(&mut self, indicator: Indicator) {
        self.pending.indicator = indicator;
    }

    pub fn set_pending_benchmark(&mut self, benchmark: Benchmark) {
        self.pending.benchmark = benchmark;
    }

    /// True iff any pending field differs from its applied counterpart.
    pub fn has_pending_change(&self) -> bool {
        self.pending != self.applied
    }

    /// Atomically promote pending → applied. Returns the newly applied
    /// selection so the caller can trigger a refetch, or `None` when there
    /// is nothing to commit.
    pub fn commit(&mut self) -> Option<FilterSelection> {
        if !self.has_pending_change() {
            return None;
        }
        self.applied = self.pending;
        Some(self.applied)
    }

    /// Replace the applied selection from outside the commit path (e.g. a
    /// programmatic reset or restored state) and resynchronize pending.
    pub fn reset(&mut self, selection: FilterSelection) {
        self.applied = selection;
        self.pending = selection;
    }

    /// Discard pending edits, returning to the applied selection.
    pub fn revert_pending(&mut self) {
        self.pending = self.applied;
    }
}

impl Default for FilterController {
    fn default() -> Self {
        Self::new(FilterSelection::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn indicator_cycle_covers_all() {
        let mut seen = Vec::new();
        let mut i = Indicator::EngagementRatio;
        for _ in 0..INDICATORS.len() {
            seen.push(i);
            i = i.next();
        }
        assert_eq!(seen, INDICATORS);
        assert_eq!(i, Indicator::EngagementRatio);
        assert_eq!(Indicator::EngagementRatio.prev(), Indicator::CommsNum);
    }

    #[test]
    fn benchmark_wire_names() {
        assert_eq!(Benchmark::Qqq.as_symbol(), "QQQ");
        assert_eq!(Benchmark::Aapl.as_symbol(), "AAPL");
        assert_eq!(Benchmark::Aapl.label(), "Apple");
    }

    #[test]
    fn fresh_controller_is_clean() {
        let ctl = FilterController::default();
        assert!(!ctl.has_pending_change());
        assert_eq!(ctl.pending(), ctl.applied());
    }

    #[test]
    fn single_setter_marks_dirty_and_commit_applies() {
        let mut ctl = FilterController::default();
        ctl.set_pending_indicator(Indicator::Score);
        assert!(ctl.has_pending_change());

        let applied = ctl.commit().expect("dirty controller should commit");
        assert_eq!(applied.indicator, Indicator::Score);
        assert_eq!(ctl.applied().indicator, Indicator::Score);
        assert!(!ctl.has_pending_change());
    }

    #[test]
    fn commit_is_noop_when_clean() {
        let mut ctl = FilterController::default();
        assert!(ctl.commit().is_none());

        // Editing back to the applied value is also clean.
        let indicator = ctl.applied().indicator;
        ctl.set_pending_indicator(indicator.next());
        ctl.set_pending_indicator(indicator);
        assert!(!ctl.has_pending_change());
        assert!(ctl.commit().is_none());
    }

    #[test]
    fn commit_moves_all_three_fields_together() {
        let mut ctl = FilterController::default();
        ctl.set_pending_range(DateRange::new(date(2021, 3, 1), date(2021, 9, 30)));
        ctl.set_pending_indicator(Indicator::TotalSentiment);
        ctl.set_pending_benchmark(Benchmark::Aapl);

        let applied = ctl.commit().unwrap();
        assert_eq!(applied.range.start, date(2021, 3, 1));
        assert_eq!(applied.range.end, date(2021, 9, 30));
        assert_eq!(applied.indicator, Indicator::TotalSentiment);
        assert_eq!(applied.benchmark, Benchmark::Aapl);
    }

    #[test]
    fn reset_resynchronizes_pending() {
        let mut ctl = FilterController::default();
        ctl.set_pending_benchmark(Benchmark::Aapl);

        let restored = FilterSelection {
            indicator: Indicator::CommsNum,
            ..FilterSelection::default()
        };
        ctl.reset(restored);

        assert!(!ctl.has_pending_change());
        assert_eq!(ctl.pending().indicator, Indicator::CommsNum);
        assert_eq!(ctl.applied().indicator, Indicator::CommsNum);
    }

    #[test]
    fn revert_discards_pending_edits() {
        let mut ctl = FilterController::default();
        ctl.set_pending_start(date(2020, 6, 1));
        assert!(ctl.has_pending_change());

        ctl.revert_pending();
        assert!(!ctl.has_pending_change());
        assert_eq!(ctl.pending(), ctl.applied());
    }

    #[test]
    fn inverted_range_is_representable() {
        // Ordering is not enforced at edit time; the server just returns an
        // empty series for an inverted window.
        let mut ctl = FilterController::default();
        ctl.set_pending_start(date(2022, 1, 1));
        ctl.set_pending_end(date(2021, 1, 1));
        assert!(!ctl.pending().range.is_ordered());
        assert!(ctl.commit().is_some());
    }
}
