//! App state persistence — JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use sentifolio_core::filter::FilterSelection;

use crate::app::Panel;

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedState {
    pub selection: FilterSelection,
    pub active_panel: Panel,
    pub welcome_dismissed: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            selection: FilterSelection::default(),
            active_panel: Panel::Filters,
            welcome_dismissed: false,
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &crate::app::AppState) -> PersistedState {
    PersistedState {
        selection: *app.filters.controller.applied(),
        active_panel: app.active_panel,
        welcome_dismissed: app.overlay != crate::app::Overlay::Welcome,
    }
}

/// Apply persisted state to AppState.
pub fn apply(app: &mut crate::app::AppState, state: PersistedState) {
    // Restored state is an applied change outside the commit path, so the
    // controller resynchronizes pending alongside it.
    app.filters.controller.reset(state.selection);
    app.active_panel = state.active_panel;
    if !state.welcome_dismissed {
        app.overlay = crate::app::Overlay::Welcome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentifolio_core::filter::Indicator;

    #[test]
    fn roundtrip() {
        let dir = std::env::temp_dir().join("sentifolio_persist_test");
        let path = dir.join("state.json");

        let mut state = PersistedState::default();
        state.selection.indicator = Indicator::CommsNum;
        state.active_panel = Panel::Tickers;
        state.welcome_dismissed = true;

        save(&path, &state).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.selection.indicator, Indicator::CommsNum);
        assert_eq!(loaded.active_panel, Panel::Tickers);
        assert!(loaded.welcome_dismissed);

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert_eq!(loaded.selection, FilterSelection::default());
        assert!(!loaded.welcome_dismissed);
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = std::env::temp_dir().join("sentifolio_persist_corrupt");
        let path = dir.join("state.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert_eq!(loaded.selection, FilterSelection::default());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn apply_resynchronizes_pending() {
        let (tx, _rx) = std::sync::mpsc::channel();
        let (_tx2, rx2) = std::sync::mpsc::channel();
        let mut app = crate::app::AppState::new(tx, rx2);

        let mut state = PersistedState::default();
        state.selection.indicator = Indicator::Score;
        state.welcome_dismissed = true;
        apply(&mut app, state);

        assert!(!app.filters.controller.has_pending_change());
        assert_eq!(app.filters.controller.pending().indicator, Indicator::Score);
    }
}
