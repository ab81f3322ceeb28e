//! 业务逻辑处理 (Update/Dispatch)
//!
//! 宿主本身不包含编辑规则，所有修改都交给 ColumnEditor

use chrono::Local;
use log::{info, warn};

use super::actions::Action;
use super::state::{App, AppMode};
use crate::editor::{ColumnEditor, EditorEvent, Group};

impl App {
    /// 核心逻辑分发，返回是否退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::OpenEditor => self.open_editor(),

            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),
            Action::SwitchPane => self.switch_pane(),

            Action::ToggleSelected => self.toggle_selected(),
            Action::MoveItemUp => self.move_selected(-1),
            Action::MoveItemDown => self.move_selected(1),
            Action::StartSearch => self.start_search(),
            Action::Reset => self.reset(),

            Action::Input(c) => {
                if self.mode == AppMode::Searching {
                    self.edit_query(|q| q.push(c));
                }
            }
            Action::DeleteChar => {
                if self.mode == AppMode::Searching {
                    self.edit_query(|q| {
                        q.pop();
                    });
                }
            }
            Action::FinishSearch => {
                if self.mode == AppMode::Searching {
                    self.mode = AppMode::Editing;
                }
            }

            Action::Apply => {
                if let Some(event) = self.editor.as_ref().map(ColumnEditor::commit) {
                    self.close_editor(event);
                }
            }
            Action::Cancel => {
                if let Some(event) = self.editor.as_ref().map(ColumnEditor::discard) {
                    self.close_editor(event);
                }
            }
        }
        false
    }

    // ============ 打开/关闭编辑器 ============

    /// 以当前规范列表打开编辑器
    pub fn open_editor(&mut self) {
        if self.mode != AppMode::Browsing {
            return;
        }
        match ColumnEditor::new(&self.columns) {
            Ok(editor) => {
                self.editor = Some(editor);
                self.mode = AppMode::Editing;
                self.focus = Group::Active;
                self.selected_index = 0;
                self.message = None;
            }
            Err(e) => {
                warn!("cannot open editor: {}", e);
                self.message = Some(e.to_string());
            }
        }
    }

    /// 处理编辑器发出的事件
    pub fn close_editor(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::Apply(result) => {
                info!("applied {} columns", result.columns.len());
                self.message = Some(format!(
                    "已应用 {} 列 ({})",
                    result.columns.len(),
                    Local::now().format("%H:%M:%S")
                ));
                self.columns = result.columns;
            }
            EditorEvent::Cancel => {
                info!("editor cancelled");
                self.message = Some("已取消".to_string());
            }
        }
        self.editor = None;
        self.mode = AppMode::Browsing;
        self.selected_index = 0;
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.pane_items().len() {
            self.selected_index += 1;
        }
    }

    /// 切换活动/隐藏面板
    pub fn switch_pane(&mut self) {
        self.focus = match self.focus {
            Group::Active => Group::Inactive,
            Group::Inactive => Group::Active,
        };
        self.selected_index = 0;
    }

    // ============ 编辑相关 ============

    /// 切换选中列的可见性
    pub fn toggle_selected(&mut self) {
        let Some(column) = self.selected_column() else {
            return;
        };
        if column.mandatory {
            self.message = Some(format!("必选列 \"{}\" 不能隐藏", column.name));
            return;
        }
        let id = column.id.clone();
        if let Some(editor) = self.editor.as_mut() {
            editor.toggle(&id);
        }
        self.message = None;
        self.clamp_selection();
    }

    /// 将选中列与视图中的相邻列交换位置（模拟拖动一格）。
    ///
    /// 搜索时视图是过滤后的，这里按 ID 换算成完整分组中的拖动索引。
    pub fn move_selected(&mut self, step: isize) {
        let Some(column) = self.selected_column() else {
            return;
        };
        if column.mandatory {
            self.message = Some(format!("必选列 \"{}\" 不能移动", column.name));
            return;
        }
        let id = column.id.clone();

        let Some(target) = self.selected_index.checked_add_signed(step) else {
            return;
        };
        let Some(neighbour) = self.pane_items().get(target) else {
            return;
        };
        if neighbour.mandatory {
            return;
        }
        let neighbour_id = neighbour.id.clone();

        let group = self.focus;
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let (Some(from), Some(to)) = (
            editor.drag_index(group, &id),
            editor.drag_index(group, &neighbour_id),
        ) else {
            return;
        };

        match editor.reorder(group, from, to) {
            Ok(_) => self.message = None,
            Err(e) => {
                warn!("move failed: {}", e);
                self.message = Some(e.to_string());
            }
        }
        self.select_by_id(&id);
    }

    /// 恢复到打开编辑器时的状态
    pub fn reset(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.reset();
            self.mode = AppMode::Editing;
            self.message = Some("已恢复原始设置".to_string());
            self.clamp_selection();
        }
    }

    // ============ 搜索相关 ============

    /// 开始输入搜索
    pub fn start_search(&mut self) {
        if self.editor.is_some() {
            self.mode = AppMode::Searching;
        }
    }

    fn edit_query(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let mut query = editor.search_query().to_string();
        edit(&mut query);
        editor.set_search_query(&query);
        self.clamp_selection();
    }
}
