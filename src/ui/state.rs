//! App 状态定义 (Model)
//!
//! 宿主持有规范列表，打开编辑器时交给 ColumnEditor 处理

use crate::editor::{ColumnEditor, Group};
use crate::models::{Column, ColumnSetData};

/// 应用状态
pub struct App {
    pub title: String,
    pub columns: Vec<Column>, // 规范列表，只在应用编辑结果时替换
    pub editor: Option<ColumnEditor>,
    pub mode: AppMode,
    pub focus: Group,
    pub selected_index: usize,
    pub message: Option<String>,
}

/// 应用模式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMode {
    Browsing,
    Editing,
    Searching,
}

impl App {
    /// 创建新的应用实例
    pub fn new(data: ColumnSetData) -> Self {
        Self {
            title: data.meta.title,
            columns: data.columns,
            editor: None,
            mode: AppMode::Browsing,
            focus: Group::Active,
            selected_index: 0,
            message: None,
        }
    }

    /// 当前焦点面板中显示的列
    pub fn pane_items(&self) -> &[Column] {
        match (&self.editor, self.focus) {
            (Some(editor), Group::Active) => editor.active_items(),
            (Some(editor), Group::Inactive) => editor.inactive_items(),
            (None, _) => &[],
        }
    }

    /// 获取当前选中的列
    pub fn selected_column(&self) -> Option<&Column> {
        self.pane_items().get(self.selected_index)
    }

    /// 确保选中索引有效
    pub fn clamp_selection(&mut self) {
        let len = self.pane_items().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// 选中指定 ID 的列（若在当前面板中可见）
    pub fn select_by_id(&mut self, id: &str) {
        if let Some(index) = self.pane_items().iter().position(|c| c.id == id) {
            self.selected_index = index;
        } else {
            self.clamp_selection();
        }
    }
}
