use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use wrapped_core::ShareTarget;

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    NextSection,
    PrevSection,
    SkipToShare,
    /// Section by position, zero based
    JumpToSection(usize),
    OpenShareMenu,
    ToggleMotion,
    Retry,
    ShowHelp,
    ExitMode,
    // Share menu
    MenuUp,
    MenuDown,
    Confirm,
    ShareWith(ShareTarget),
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    // Handle special modes
    match &app.mode {
        Mode::Help => {
            // Any key exits help
            return Action::ExitMode;
        }
        Mode::ShareMenu { .. } => return handle_share_menu(key),
        Mode::Normal => {}
    }

    let binding = normalize(key);

    // gg requires double press
    if keymap.is_g_prefix(&binding) {
        if app.pending_key == Some('g') {
            if let Some(action) = keymap.get_pending_g_action() {
                return action.clone();
            }
        }
        return Action::PendingG;
    }

    keymap.get(&binding).cloned().unwrap_or(Action::None)
}

/// Terminals disagree on the SHIFT flag for printable characters; uppercase
/// letters always carry it, other characters never do
fn normalize(key: KeyEvent) -> KeyBinding {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_uppercase() => {
            KeyBinding::new(key.code, key.modifiers | KeyModifiers::SHIFT)
        }
        KeyCode::Char(_) => KeyBinding::new(key.code, key.modifiers - KeyModifiers::SHIFT),
        _ => KeyBinding::new(key.code, key.modifiers),
    }
}

/// Handle key events in the share menu
fn handle_share_menu(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => Action::MenuDown,
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => Action::MenuUp,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Confirm,
        KeyCode::Char('q') | KeyCode::Esc => Action::ExitMode,
        KeyCode::Char(c) => c
            .to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(|i| ShareTarget::ALL.get(i).copied())
            .map(Action::ShareWith)
            .unwrap_or(Action::None),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wrapped_core::AppConfig;

    fn app() -> App {
        App::new(
            Arc::new(AppConfig::default()),
            crate::theme::Theme::default(),
            wrapped_core::MotionController::new(false),
        )
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_normal_mode_bindings() {
        let app = app();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j'), KeyModifiers::NONE), &app, &keymap),
            Action::ScrollDown
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('n'), KeyModifiers::NONE), &app, &keymap),
            Action::NextSection
        );
        // Uppercase without the SHIFT flag still resolves
        assert_eq!(
            handle_key_event(key(KeyCode::Char('G'), KeyModifiers::NONE), &app, &keymap),
            Action::JumpToBottom
        );
        // '?' arrives with SHIFT on most terminals
        assert_eq!(
            handle_key_event(key(KeyCode::Char('?'), KeyModifiers::SHIFT), &app, &keymap),
            Action::ShowHelp
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('z'), KeyModifiers::NONE), &app, &keymap),
            Action::None
        );
    }

    #[test]
    fn test_gg_sequence() {
        let mut app = app();
        let keymap = Keymap::default();
        let g = key(KeyCode::Char('g'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(g, &app, &keymap), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(g, &app, &keymap), Action::JumpToTop);
    }

    #[test]
    fn test_share_menu_keys() {
        let mut app = app();
        app.mode = Mode::ShareMenu { selected: 0 };
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j'), KeyModifiers::NONE), &app, &keymap),
            Action::MenuDown
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Enter, KeyModifiers::NONE), &app, &keymap),
            Action::Confirm
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('3'), KeyModifiers::NONE), &app, &keymap),
            Action::ShareWith(ShareTarget::ALL[2])
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('9'), KeyModifiers::NONE), &app, &keymap),
            Action::None
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Esc, KeyModifiers::NONE), &app, &keymap),
            Action::ExitMode
        );
    }

    #[test]
    fn test_any_key_leaves_help() {
        let mut app = app();
        app.mode = Mode::Help;
        assert_eq!(
            handle_key_event(
                key(KeyCode::Char('j'), KeyModifiers::NONE),
                &app,
                &Keymap::default()
            ),
            Action::ExitMode
        );
    }
}
