//! Keyboard input dispatch — global keys → overlays → panel-specific handlers.

use chrono::{Days, Months, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, FiltersPanelState, Overlay, Panel};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Filters; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::Chart; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::Summary; return; }
        KeyCode::Char('4') => { app.active_panel = Panel::Tickers; return; }
        KeyCode::Char('5') => { app.active_panel = Panel::Help; return; }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Filters => handle_filters_key(app, key),
        Panel::Chart => {}   // display only
        Panel::Summary => {} // display only
        Panel::Tickers => handle_tickers_key(app, key),
        Panel::Help => handle_help_key(app, key),
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_filters_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.filters.cursor + 1 < FiltersPanelState::FIELD_COUNT {
                app.filters.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.filters.cursor = app.filters.cursor.saturating_sub(1);
        }
        // Step by day, or cycle the enum under the cursor.
        KeyCode::Char('h') | KeyCode::Left => adjust_filter(app, -1, false),
        KeyCode::Char('l') | KeyCode::Right => adjust_filter(app, 1, false),
        // Month-sized steps on the date rows.
        KeyCode::Char('H') => adjust_filter(app, -1, true),
        KeyCode::Char('L') => adjust_filter(app, 1, true),
        KeyCode::Enter | KeyCode::Char('a') => {
            app.apply_filters();
        }
        KeyCode::Esc => {
            if app.filters.controller.has_pending_change() {
                app.filters.controller.revert_pending();
                app.set_status("Pending filter edits discarded");
            }
        }
        _ => {}
    }
}

/// Adjust the filter field under the cursor. Dates step by one day (or one
/// month with `coarse`); indicator and benchmark cycle through their fixed
/// sets. Edits touch pending state only — nothing refetches until apply.
fn adjust_filter(app: &mut AppState, direction: i32, coarse: bool) {
    let ctl = &mut app.filters.controller;
    match app.filters.cursor {
        0 => {
            let start = step_date(ctl.pending().range.start, direction, coarse);
            ctl.set_pending_start(start);
        }
        1 => {
            let end = step_date(ctl.pending().range.end, direction, coarse);
            ctl.set_pending_end(end);
        }
        2 => {
            let indicator = ctl.pending().indicator;
            ctl.set_pending_indicator(if direction > 0 {
                indicator.next()
            } else {
                indicator.prev()
            });
        }
        3 => {
            let benchmark = ctl.pending().benchmark;
            ctl.set_pending_benchmark(if direction > 0 {
                benchmark.next()
            } else {
                benchmark.prev()
            });
        }
        _ => {}
    }
}

fn step_date(date: NaiveDate, direction: i32, coarse: bool) -> NaiveDate {
    let stepped = if coarse {
        if direction > 0 {
            date.checked_add_months(Months::new(1))
        } else {
            date.checked_sub_months(Months::new(1))
        }
    } else if direction > 0 {
        date.checked_add_days(Days::new(1))
    } else {
        date.checked_sub_days(Days::new(1))
    };
    stepped.unwrap_or(date)
}

fn handle_tickers_key(app: &mut AppState, key: KeyEvent) {
    let row_count = app.tickers.rows.len();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if row_count > 0 && app.tickers.cursor + 1 < row_count {
                app.tickers.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.tickers.cursor = app.tickers.cursor.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.toggle_selected_ticker_row();
        }
        _ => {}
    }
}

fn handle_help_key(app: &mut AppState, key: KeyEvent) {
    if let KeyCode::Char('e') = key.code {
        app.overlay = Overlay::ErrorHistory;
        app.error_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::WorkerCommand;
    use sentifolio_core::filter::{Benchmark, Indicator};
    use std::sync::mpsc;

    fn test_app() -> (AppState, mpsc::Receiver<WorkerCommand>) {
        let (tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, rx) = mpsc::channel();
        (AppState::new(tx, rx), cmd_rx)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn number_keys_switch_panels() {
        let (mut app, _rx) = test_app();
        handle_key(&mut app, press(KeyCode::Char('4')));
        assert_eq!(app.active_panel, Panel::Tickers);
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.active_panel, Panel::Help);
    }

    #[test]
    fn filters_hl_edits_pending_only() {
        let (mut app, rx) = test_app();
        app.filters.cursor = 2; // indicator row
        handle_key(&mut app, press(KeyCode::Char('l')));

        assert_eq!(
            app.filters.controller.pending().indicator,
            Indicator::TotalSentiment
        );
        assert_eq!(
            app.filters.controller.applied().indicator,
            Indicator::EngagementRatio
        );
        // No fetch until apply.
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn enter_applies_and_fetches() {
        let (mut app, rx) = test_app();
        app.filters.cursor = 3; // benchmark row
        handle_key(&mut app, press(KeyCode::Char('l')));
        handle_key(&mut app, press(KeyCode::Enter));

        assert_eq!(app.filters.controller.applied().benchmark, Benchmark::Aapl);
        assert!(matches!(
            rx.try_recv(),
            Ok(WorkerCommand::FetchReturns { .. })
        ));
    }

    #[test]
    fn esc_reverts_pending_edits() {
        let (mut app, _rx) = test_app();
        app.filters.cursor = 0;
        handle_key(&mut app, press(KeyCode::Char('h')));
        assert!(app.filters.controller.has_pending_change());

        handle_key(&mut app, press(KeyCode::Esc));
        assert!(!app.filters.controller.has_pending_change());
    }

    #[test]
    fn date_steps_day_and_month() {
        let d = NaiveDate::from_ymd_opt(2021, 3, 31).unwrap();
        assert_eq!(
            step_date(d, 1, false),
            NaiveDate::from_ymd_opt(2021, 4, 1).unwrap()
        );
        // Month arithmetic clamps to the end of the shorter month.
        assert_eq!(
            step_date(d, -1, true),
            NaiveDate::from_ymd_opt(2021, 2, 28).unwrap()
        );
    }

    #[test]
    fn welcome_overlay_dismisses_on_any_key() {
        let (mut app, _rx) = test_app();
        app.overlay = Overlay::Welcome;
        handle_key(&mut app, press(KeyCode::Char('x')));
        assert_eq!(app.overlay, Overlay::None);
    }
}
