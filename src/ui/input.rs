//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode};

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Normal => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Char('a') => Some(Action::StartAddItem),
            KeyCode::Char('e') => Some(Action::StartEditItem),
            KeyCode::Char('d') => Some(Action::StartDeleteItem),
            _ => None,
        },
        AppMode::AddingItem | AppMode::EditingItem(_) => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchField),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        AppMode::Confirm(_) => match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Submit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        },
    }
}

/// 处理按键事件，返回是否退出
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    match get_action(&app.mode, key) {
        Some(action) => app.dispatch(action),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::state::ConfirmAction;

    #[test]
    fn test_normal_mode_keys() {
        let mode = AppMode::Normal;
        assert_eq!(get_action(&mode, KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(get_action(&mode, KeyCode::Down), Some(Action::MoveSelectionDown));
        assert_eq!(get_action(&mode, KeyCode::Char('k')), Some(Action::MoveSelectionUp));
        assert_eq!(get_action(&mode, KeyCode::Char('a')), Some(Action::StartAddItem));
        assert_eq!(get_action(&mode, KeyCode::Char('e')), Some(Action::StartEditItem));
        assert_eq!(get_action(&mode, KeyCode::Char('d')), Some(Action::StartDeleteItem));
        assert_eq!(get_action(&mode, KeyCode::Char('x')), None);
    }

    #[test]
    fn test_form_keys_capture_text() {
        for mode in [AppMode::AddingItem, AppMode::EditingItem(1)] {
            // 'q' 在表单中是普通字符
            assert_eq!(get_action(&mode, KeyCode::Char('q')), Some(Action::Input('q')));
            assert_eq!(get_action(&mode, KeyCode::Tab), Some(Action::SwitchField));
            assert_eq!(get_action(&mode, KeyCode::Enter), Some(Action::Submit));
            assert_eq!(get_action(&mode, KeyCode::Esc), Some(Action::Cancel));
            assert_eq!(get_action(&mode, KeyCode::Backspace), Some(Action::DeleteChar));
        }
    }

    #[test]
    fn test_confirm_keys() {
        let mode = AppMode::Confirm(ConfirmAction::Delete(1));
        assert_eq!(get_action(&mode, KeyCode::Char('y')), Some(Action::Submit));
        assert_eq!(get_action(&mode, KeyCode::Char('N')), Some(Action::Cancel));
        assert_eq!(get_action(&mode, KeyCode::Esc), Some(Action::Cancel));
        assert_eq!(get_action(&mode, KeyCode::Char('d')), None);
    }
}
