//! Modal overlays — first-run welcome and the error history viewer.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Welcome to Sentifolio ")
        .title_style(theme::accent_bold());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "A dashboard for a Reddit-sentiment stock portfolio.",
            theme::accent(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Each month the portfolio holds the tickers ranked highest by",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "the chosen sentiment indicator. Compare its cumulative returns",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "against QQQ or Apple over any date range.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Set filters in panel 1, then Enter to apply. Panel 5 lists",
            theme::muted(),
        )),
        Line::from(Span::styled("every shortcut.", theme::muted())),
        Line::from(""),
        Line::from(Span::styled("Press any key to begin.", theme::accent_bold())),
    ];

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::warning())
        .title(format!(" Error History ({}) ", app.error_history.len()))
        .title_style(theme::warning());

    let mut lines: Vec<Line> = Vec::new();
    if app.error_history.is_empty() {
        lines.push(Line::from(Span::styled(
            "No errors this session.",
            theme::muted(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "[j/k] scroll  [Esc] close",
            theme::muted(),
        )));
        lines.push(Line::from(""));
        for record in app.error_history.iter().skip(app.error_scroll) {
            lines.push(Line::from(vec![
                Span::styled(
                    record.timestamp.format("%H:%M:%S ").to_string(),
                    theme::muted(),
                ),
                Span::styled(format!("[{:<4}] ", record.category.label()), theme::warning()),
                Span::styled(record.message.clone(), theme::negative()),
                Span::styled(
                    if record.context.is_empty() {
                        String::new()
                    } else {
                        format!("  ({})", record.context)
                    },
                    theme::muted(),
                ),
            ]));
        }
    }

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}
