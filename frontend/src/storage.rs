use shared::reveal_session::{RewardAssignment, SessionKeys};
use web_sys::window;

fn session_storage() -> Option<web_sys::Storage> {
    window().and_then(|w| w.session_storage().ok().flatten())
}

/// The persisted reveal for a widget, if one already happened in this
/// browser session. Absent or unreadable storage means "not yet revealed".
pub fn load_session(keys: &SessionKeys) -> Option<RewardAssignment> {
    let storage = session_storage()?;
    RewardAssignment::from_session(keys, |key| storage.get_item(key).ok().flatten())
}

/// Freezes a completed reveal into session storage. Write failures are
/// ignored; some private browsing modes reject them and the widget still
/// has the reward in memory for the current page view.
pub fn save_session(keys: &SessionKeys, result: &RewardAssignment) {
    if let Some(storage) = session_storage() {
        for (key, value) in result.session_entries(keys) {
            let _ = storage.set_item(key, &value);
        }
    }
}
