//! Panel 4 — Tickers: monthly rebalancing rows with inline news per date.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use sentifolio_core::news::NewsState;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    if app.tickers.rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "No rebalancing data. Apply filters in panel 1.",
            theme::muted(),
        )));
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    lines.push(Line::from(Span::styled(
        "[j/k] move  [Enter/Space] expand news",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    let visible = area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(app.tickers.cursor, app.tickers.scroll_offset, visible);

    let mut remaining = visible;
    for (i, row) in app.tickers.rows.iter().enumerate().skip(offset) {
        if remaining == 0 {
            break;
        }
        let is_cursor = i == app.tickers.cursor;
        let expanded = app.tickers.news.is_expanded(&row.date);
        let arrow = if expanded { "\u{25bc}" } else { "\u{25b6}" };

        let row_style = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::accent()
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {arrow} {} ", row.date), row_style),
            Span::styled(row.tickers.join(", "), theme::neutral()),
        ]));
        remaining -= 1;

        if expanded {
            remaining = render_news(&mut lines, app, &row.date, remaining);
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// Append the news lines for an expanded date, spending at most `remaining`
/// lines. Returns how many lines are left.
fn render_news(lines: &mut Vec<Line>, app: &AppState, date: &str, mut remaining: usize) -> usize {
    if remaining == 0 {
        return 0;
    }
    match app.tickers.news.state(date) {
        None | Some(NewsState::Loading) => {
            lines.push(Line::from(Span::styled(
                "     loading news...",
                theme::muted(),
            )));
            remaining -= 1;
        }
        Some(NewsState::Failed(message)) => {
            lines.push(Line::from(Span::styled(
                format!("     news unavailable: {message}"),
                theme::negative(),
            )));
            remaining -= 1;
        }
        Some(NewsState::Loaded(articles)) if articles.is_empty() => {
            lines.push(Line::from(Span::styled(
                "     no articles for these tickers",
                theme::muted(),
            )));
            remaining -= 1;
        }
        Some(NewsState::Loaded(articles)) => {
            for article in articles {
                if remaining == 0 {
                    break;
                }
                let date_part = article.published_at.get(..10).unwrap_or("");
                lines.push(Line::from(vec![
                    Span::styled(format!("     {} ", date_part), theme::muted()),
                    Span::styled(article.title.clone(), theme::positive()),
                    Span::styled(format!("  ({})", article.source), theme::muted()),
                ]));
                remaining -= 1;
            }
        }
    }
    remaining
}

/// Keep the cursor row inside the visible window.
fn scroll_offset(cursor: usize, current: usize, visible: usize) -> usize {
    if visible == 0 {
        return current;
    }
    if cursor < current {
        cursor
    } else if cursor >= current + visible {
        cursor + 1 - visible
    } else {
        current
    }
}
