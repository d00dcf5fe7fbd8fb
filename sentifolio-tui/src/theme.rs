//! Neon-on-dark theme tokens shared by every panel.
//!
//! Style helpers are free functions so render code stays terse:
//! `theme::muted()`, `theme::accent()`, and so on.

use ratatui::style::{Color, Modifier, Style};

/// Electric cyan — focus, highlights, the portfolio series.
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
/// Neon green — gains, success.
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
/// Hot pink — losses, failures.
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
/// Neon orange — warnings.
pub const WARNING: Color = Color::Rgb(255, 140, 0);
/// Cool purple — secondary info, the benchmark series.
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
/// Steel blue — muted text, disabled controls.
pub const MUTED: Color = Color::Rgb(100, 149, 237);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

/// Green for gains, pink for losses.
pub fn metric_color(value: f64) -> Style {
    if value >= 0.0 {
        positive()
    } else {
        negative()
    }
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}
