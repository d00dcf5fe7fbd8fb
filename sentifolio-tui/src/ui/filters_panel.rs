//! Panel 1 — Filters: staged date range, indicator and benchmark edits.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let ctl = &app.filters.controller;
    let pending = ctl.pending();
    let applied = ctl.applied();
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Pending edits apply together. ", theme::muted()),
        Span::styled(
            "[j/k]field [h/l]step [H/L]month [Enter]apply [Esc]discard",
            theme::muted(),
        ),
    ]));
    lines.push(Line::from(""));

    let rows: [(&str, String, bool); 4] = [
        (
            "Start date",
            pending.range.start.format("%Y-%m-%d").to_string(),
            pending.range.start != applied.range.start,
        ),
        (
            "End date",
            pending.range.end.format("%Y-%m-%d").to_string(),
            pending.range.end != applied.range.end,
        ),
        (
            "Indicator",
            pending.indicator.label().to_string(),
            pending.indicator != applied.indicator,
        ),
        (
            "Benchmark",
            pending.benchmark.label().to_string(),
            pending.benchmark != applied.benchmark,
        ),
    ];

    for (i, (label, value, dirty)) in rows.iter().enumerate() {
        let is_cursor = i == app.filters.cursor;
        let marker = if *dirty { "*" } else { " " };

        let value_style = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else if *dirty {
            theme::warning()
        } else {
            theme::accent()
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} {label:>10}: "), theme::muted()),
            Span::styled(value.clone(), value_style),
        ]));
    }

    lines.push(Line::from(""));
    if !pending.range.is_ordered() {
        lines.push(Line::from(Span::styled(
            "Start is after end — the server will return no data.",
            theme::warning(),
        )));
    }

    if ctl.has_pending_change() {
        lines.push(Line::from(vec![
            Span::styled("[Enter] ", theme::accent_bold()),
            Span::styled("Apply changes and refetch", theme::accent()),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "No pending changes — Apply disabled",
            theme::muted(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Applied: ", theme::muted()),
        Span::styled(
            format!(
                "{} .. {} | {} vs {}",
                applied.range.start.format("%Y-%m-%d"),
                applied.range.end.format("%Y-%m-%d"),
                applied.indicator.label(),
                applied.benchmark.label(),
            ),
            theme::neutral(),
        ),
    ]));

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}
