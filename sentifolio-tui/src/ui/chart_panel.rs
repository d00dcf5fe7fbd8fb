//! Panel 2 — Chart: cumulative portfolio vs benchmark returns.

use ratatui::layout::{Alignment, Rect};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    if app.returns.loading {
        render_placeholder(f, area, "Fetching portfolio returns...", theme::muted());
        return;
    }
    if let Some(error) = &app.returns.error {
        if app.returns.series.is_none() {
            render_placeholder(f, area, &format!("Error: {error}"), theme::negative());
            return;
        }
    }
    let Some(series) = &app.returns.series else {
        render_placeholder(f, area, "No data. Apply filters in panel 1.", theme::muted());
        return;
    };
    if series.is_empty() {
        render_placeholder(f, area, "No return periods in this date range.", theme::muted());
        return;
    }

    let portfolio: Vec<(f64, f64)> = series
        .portfolio
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();
    let benchmark: Vec<(f64, f64)> = series
        .benchmark
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();

    let applied = app.filters.controller.applied();
    let benchmark_name = applied.benchmark.label();

    let datasets = vec![
        Dataset::default()
            .name("Portfolio")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme::accent())
            .data(&portfolio),
        Dataset::default()
            .name(benchmark_name)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme::neutral())
            .data(&benchmark),
    ];

    let (y_min, y_max) = y_bounds(series.portfolio.iter().chain(series.benchmark.iter()));
    let x_max = (series.len().saturating_sub(1)).max(1) as f64;

    let first_label = label_at(series, 0);
    let last_label = label_at(series, series.len() - 1);

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled(first_label, theme::muted()),
                    Span::styled(last_label, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("return", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{:.1}%", y_min * 100.0), theme::muted()),
                    Span::styled(
                        format!("{:.1}%", (y_min + y_max) / 2.0 * 100.0),
                        theme::muted(),
                    ),
                    Span::styled(format!("{:.1}%", y_max * 100.0), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

/// Min/max across both series with 5% padding so lines keep off the frame.
fn y_bounds<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for v in values {
        min = min.min(*v);
        max = max.max(*v);
    }
    if min > max {
        return (0.0, 1.0);
    }
    let span = (max - min).abs().max(1e-9);
    (min - span * 0.05, max + span * 0.05)
}

fn label_at(series: &sentifolio_core::CleanedSeries, i: usize) -> String {
    series
        .labels
        .get(i)
        .and_then(|l| l.clone())
        .unwrap_or_else(|| i.to_string())
}

fn render_placeholder(f: &mut Frame, area: Rect, message: &str, style: ratatui::style::Style) {
    let para = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), style)),
    ])
    .alignment(Alignment::Center);
    f.render_widget(para, area);
}
