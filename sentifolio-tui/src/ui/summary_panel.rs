//! Panel 3 — Summary: peak return and outperformance for the applied filter.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    if app.returns.loading {
        lines.push(Line::from(Span::styled(
            "Fetching portfolio returns...",
            theme::muted(),
        )));
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    let applied = app.filters.controller.applied();
    lines.push(Line::from(vec![
        Span::styled("Period    ", theme::muted()),
        Span::styled(
            format!(
                "{} .. {}",
                applied.range.start.format("%Y-%m-%d"),
                applied.range.end.format("%Y-%m-%d")
            ),
            theme::accent(),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Indicator ", theme::muted()),
        Span::styled(applied.indicator.label(), theme::accent()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Benchmark ", theme::muted()),
        Span::styled(applied.benchmark.label(), theme::accent()),
    ]));
    lines.push(Line::from(""));

    match (&app.returns.summary, &app.returns.series) {
        (Some(summary), Some(series)) => {
            // Fallback label rendered as a dash when every field was absent.
            let peak_label = summary.peak_label.as_deref().unwrap_or("\u{2014}");
            lines.push(Line::from(vec![
                Span::styled("Peak return     ", theme::muted()),
                Span::styled(
                    format!("{:+.2}%", summary.peak_return * 100.0),
                    theme::metric_color(summary.peak_return),
                ),
                Span::styled(format!("  on {peak_label}"), theme::muted()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Outperformance  ", theme::muted()),
                Span::styled(
                    format!("{:.2}%", summary.outperformance_pct),
                    theme::metric_color(summary.outperformance_pct - 50.0),
                ),
                Span::styled(
                    format!(
                        "  of periods beat {}",
                        applied.benchmark.label()
                    ),
                    theme::muted(),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Periods         ", theme::muted()),
                Span::styled(series.len().to_string(), theme::accent()),
            ]));
        }
        _ => {
            let msg = match &app.returns.error {
                Some(error) => format!("Error: {error}"),
                None => "No data loaded.".to_string(),
            };
            let style = if app.returns.error.is_some() {
                theme::negative()
            } else {
                theme::muted()
            };
            lines.push(Line::from(Span::styled(msg, style)));
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}
