//! 通用 UI 组件
//!
//! 弹窗框架、搜索框、列条目

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, ListItem, Paragraph},
};

use crate::models::Column;

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 搜索框
pub fn render_search_widget(frame: &mut Frame, area: Rect, query: &str, is_focused: bool) {
    let style = if is_focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let text = if query.is_empty() && !is_focused {
        "按 / 搜索列".to_string()
    } else {
        format!("🔍 {}", query)
    };

    let input = Paragraph::new(text)
        .style(style)
        .block(Block::default().title("搜索").borders(Borders::ALL));
    frame.render_widget(input, area);
}

/// [组件] 列条目：复选框 + 名称，必选列带锁标记，可拖动列带把手
pub fn column_item(column: &Column, is_selected: bool) -> ListItem<'static> {
    let checkbox = if column.visible { "[x]" } else { "[ ]" };
    let marker = if column.mandatory {
        "🔒"
    } else if column.visible {
        "≡ "
    } else {
        "  "
    };

    let style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else if column.mandatory {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    ListItem::new(Line::from(vec![Span::styled(
        format!("{} {} {}", marker, checkbox, column.name),
        style,
    )]))
}
