//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    OpenEditor,

    // 编辑器内导航
    MoveSelectionUp,
    MoveSelectionDown,
    SwitchPane,

    // 编辑操作
    ToggleSelected,
    MoveItemUp,   // 相当于向上拖动一格
    MoveItemDown, // 相当于向下拖动一格
    StartSearch,
    Reset,

    // 搜索输入
    Input(char),
    DeleteChar,
    FinishSearch,

    // 关闭编辑器
    Apply,  // Enter
    Cancel, // Esc
}
