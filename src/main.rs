mod config;
mod editor;
mod error;
mod logging;
mod models;
mod ui;

use std::env;
use std::io;
use std::path::PathBuf;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::prelude::*;

use crate::config::{data_dir, default_seed_path, load_columns};
use crate::ui::{App, render};

fn main() -> io::Result<()> {
    // 日志文件 (~/.local/share/colsmith/colsmith.log)
    logging::init(&data_dir()?.join("colsmith.log"))?;

    // 种子文件：命令行参数优先，否则使用 ~/.config/colsmith/columns.toml
    let seed_path = match env::args_os().nth(1) {
        Some(path) => PathBuf::from(path),
        None => default_seed_path()?,
    };

    // 加载列集合
    let data = load_columns(&seed_path)?;

    // 创建应用状态
    let mut app = App::new(data);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("exit with {} columns", app.columns.len());
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
            if key.kind == crossterm::event::KeyEventKind::Press && ui::handle_key_event(app, key.code) {
                break;
            }
        }
    }
    Ok(())
}
