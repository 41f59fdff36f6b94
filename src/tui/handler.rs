use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    NextPage,
    PrevPage,
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    OpenWebsite,
    Reload,
    ShowHelp,
    HideHelp,
}

pub fn handle_key_event(key: KeyEvent, show_help: bool) -> Option<AppAction> {
    // If help is showing, any key closes it
    if show_help {
        return Some(AppAction::HideHelp);
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => Some(AppAction::Quit),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppAction::Quit),

        (KeyCode::Tab, _) | (KeyCode::Char('l'), _) | (KeyCode::Right, _) => {
            Some(AppAction::NextPage)
        }
        (KeyCode::BackTab, _) | (KeyCode::Char('h'), _) | (KeyCode::Left, _) => {
            Some(AppAction::PrevPage)
        }

        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(AppAction::MoveDown),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(AppAction::MoveUp),
        (KeyCode::Char('<'), _) => Some(AppAction::MoveToTop),
        (KeyCode::Char('>'), _) => Some(AppAction::MoveToBottom),

        (KeyCode::Char('o'), _) => Some(AppAction::OpenWebsite),
        (KeyCode::Char('r'), _) => Some(AppAction::Reload),

        (KeyCode::Char('?'), _) => Some(AppAction::ShowHelp),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Tab), false), Some(AppAction::NextPage));
        assert_eq!(handle_key_event(key(KeyCode::Char('h')), false), Some(AppAction::PrevPage));
        assert_eq!(handle_key_event(key(KeyCode::Down), false), Some(AppAction::MoveDown));
        assert_eq!(handle_key_event(key(KeyCode::Char('r')), false), Some(AppAction::Reload));
        assert_eq!(handle_key_event(key(KeyCode::Char('z')), false), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ev, false), Some(AppAction::Quit));
    }

    #[test]
    fn any_key_closes_help() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), true), Some(AppAction::HideHelp));
    }
}
