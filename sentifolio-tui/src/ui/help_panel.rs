//! Panel 5 — Help: keyboard reference.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1-5", "jump to panel");
    key(&mut lines, "Tab / Shift-Tab", "next / previous panel");
    key(&mut lines, "q", "quit (state is saved)");

    section(&mut lines, "Filters");
    key(&mut lines, "j/k", "move between fields");
    key(&mut lines, "h/l", "step a day, or cycle indicator/benchmark");
    key(&mut lines, "H/L", "step a month");
    key(&mut lines, "Enter / a", "apply pending edits and refetch");
    key(&mut lines, "Esc", "discard pending edits");

    section(&mut lines, "Tickers");
    key(&mut lines, "j/k", "move between rebalancing dates");
    key(&mut lines, "Enter / Space", "expand or collapse news for a date");

    section(&mut lines, "Diagnostics");
    key(&mut lines, "e", "open error history (from this panel)");

    f.render_widget(Paragraph::new(lines), area);
}

fn section(lines: &mut Vec<Line>, title: &str) {
    if !lines.is_empty() {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        title.to_string(),
        theme::accent_bold(),
    )));
}

fn key(lines: &mut Vec<Line>, keys: &str, action: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:<16}"), theme::accent()),
        Span::styled(action.to_string(), theme::muted()),
    ]));
}
