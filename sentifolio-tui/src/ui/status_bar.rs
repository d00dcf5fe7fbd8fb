//! One-line status bar: panel shortcuts on the left, last message on the right.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, Panel, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(46), Constraint::Min(0)])
        .split(area);

    // Panel shortcuts, active one highlighted.
    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for i in 0..5 {
        let panel = Panel::from_index(i).unwrap();
        let style = if panel == app.active_panel {
            theme::accent_bold()
        } else {
            theme::muted()
        };
        spans.push(Span::styled(format!("{}:{} ", i + 1, panel.label()), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    // Last status message.
    if let Some((message, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::muted(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(message.clone(), style))),
            chunks[1],
        );
    }
}
