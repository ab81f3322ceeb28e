//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode};

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Browsing => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::OpenEditor),
            _ => None,
        },
        AppMode::Editing => match key {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                Some(Action::SwitchPane)
            }
            KeyCode::Char(' ') => Some(Action::ToggleSelected),
            KeyCode::Char('J') => Some(Action::MoveItemDown),
            KeyCode::Char('K') => Some(Action::MoveItemUp),
            KeyCode::Char('/') => Some(Action::StartSearch),
            KeyCode::Char('r') => Some(Action::Reset),
            KeyCode::Enter => Some(Action::Apply),
            KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        },
        AppMode::Searching => match key {
            KeyCode::Enter | KeyCode::Esc => Some(Action::FinishSearch),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
    }
}

/// 处理按键事件，返回是否退出
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    get_action(app.mode, key).is_some_and(|action| app.dispatch(action))
}
