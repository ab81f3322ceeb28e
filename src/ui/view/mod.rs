//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{App, AppMode};
use crate::editor::{ColumnEditor, Group};
use crate::models::Column;
use components::{column_item, render_dialog_framework, render_search_widget};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Length(3), // 表头预览
            Constraint::Min(6),    // 列清单
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);
    render_header_preview(frame, app, chunks[1]);
    render_column_summary(frame, app, chunks[2]);
    render_help(frame, app, chunks[3]);

    if let Some(editor) = &app.editor {
        render_editor_dialog(frame, app, editor);
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(format!("▦ {} 列设置", app.title))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

/// 按规范列表渲染表头（必选列在前）
fn render_header_preview(frame: &mut Frame, app: &App, area: Rect) {
    let mut visible: Vec<_> = app.columns.iter().filter(|c| c.visible).collect();
    visible.sort_by_key(|c| !c.mandatory);

    let spans: Vec<Span> = visible
        .iter()
        .enumerate()
        .flat_map(|(i, c)| {
            let sep = if i == 0 { "" } else { " │ " };
            [
                Span::raw(sep),
                Span::styled(c.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]
        })
        .collect();

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().title("表头").borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_column_summary(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.columns.iter().filter(|c| c.visible).count();
    let hidden: Vec<&str> = app
        .columns
        .iter()
        .filter(|c| !c.visible)
        .map(|c| c.name.as_str())
        .collect();

    let content = format!(
        "共 {} 列，显示 {} 列\n隐藏: {}",
        app.columns.len(),
        visible,
        if hidden.is_empty() {
            "(无)".to_string()
        } else {
            hidden.join(", ")
        }
    );

    let summary = Paragraph::new(content)
        .block(Block::default().title("详情").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(summary, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.mode {
        AppMode::Browsing => "[e] 编辑列  [q] 退出",
        AppMode::Editing => {
            "[j/k] 导航  [Tab] 切换面板  [Space] 显示/隐藏  [J/K] 移动  [/] 搜索  [r] 重置  [Enter] 应用  [Esc] 取消"
        }
        AppMode::Searching => "输入关键字过滤  [Enter/Esc] 结束搜索",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_editor_dialog(frame: &mut Frame, app: &App, editor: &ColumnEditor) {
    let area = centered_rect(70, 70, frame.area());
    let title = format!(
        "编辑列 ({}){}",
        editor.columns().len(),
        if editor.is_modified() { " *" } else { "" }
    );
    let inner = render_dialog_framework(frame, area, &title);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(inner);

    render_search_widget(
        frame,
        rows[0],
        editor.search_query(),
        app.mode == AppMode::Searching,
    );

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let active_title = format!(
        "{}列 ({} 必选 + {})",
        Group::Active,
        editor.mandatory_active_items().count(),
        editor.draggable_active_items().count()
    );
    let inactive_title = format!("{}列 ({})", Group::Inactive, editor.inactive_items().len());

    render_pane(frame, app, panes[0], Group::Active, &active_title, editor.active_items());
    render_pane(frame, app, panes[1], Group::Inactive, &inactive_title, editor.inactive_items());
}

fn render_pane(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    group: Group,
    title: &str,
    columns: &[Column],
) {
    let focused = app.focus == group && app.mode == AppMode::Editing;

    let items: Vec<ListItem> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| column_item(c, focused && i == app.selected_index))
        .collect();

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.selected_index));
    }

    frame.render_stateful_widget(list, area, &mut state);
}
