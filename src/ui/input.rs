//! Key-to-message mapping for the picker and panel.

use super::messages::{PanelMsg, PickerMsg};

/// Maps a key event to a picker message.
///
/// Printable characters feed the filter field, so navigation uses arrow
/// keys rather than vi-style letters. Returns `None` for unrecognised keys.
#[must_use]
pub fn map_picker_key(key: &bubbletea_rs::event::KeyMsg) -> Option<PickerMsg> {
    use crossterm::event::KeyCode;

    match key.key {
        KeyCode::Up => Some(PickerMsg::CursorUp),
        KeyCode::Down => Some(PickerMsg::CursorDown),
        KeyCode::Enter => Some(PickerMsg::Accept),
        KeyCode::Esc => Some(PickerMsg::Dismiss),
        KeyCode::Backspace => Some(PickerMsg::FilterBackspace),
        KeyCode::Char(ch) => Some(PickerMsg::FilterInput(ch)),
        _ => None,
    }
}

/// Maps a key event to a panel message.
#[must_use]
pub fn map_panel_key(key: &bubbletea_rs::event::KeyMsg) -> Option<PanelMsg> {
    use crossterm::event::KeyCode;

    match key.key {
        KeyCode::Char('k') | KeyCode::Up => Some(PanelMsg::CursorUp),
        KeyCode::Char('j') | KeyCode::Down => Some(PanelMsg::CursorDown),
        KeyCode::Enter => Some(PanelMsg::Accept),
        KeyCode::Char('q') | KeyCode::Esc => Some(PanelMsg::Dismiss),
        KeyCode::Char('r') => Some(PanelMsg::Refresh),
        _ => None,
    }
}
