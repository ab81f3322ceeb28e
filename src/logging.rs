//! 文件日志
//!
//! 终端被 TUI 占用，日志写入 ~/.local/share/colsmith/colsmith.log

use std::env;
use std::fs::File;
use std::io;
use std::path::Path;

use simplelog::{Config, LevelFilter, WriteLogger};

/// 日志级别环境变量
pub const LOG_ENV: &str = "COLSMITH_LOG";

/// 解析日志级别，无法识别时使用 Info
pub fn level_from(value: Option<&str>) -> LevelFilter {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// 初始化文件日志
pub fn init(log_path: &Path) -> io::Result<()> {
    let level = level_from(env::var(LOG_ENV).ok().as_deref());
    let log_file = File::create(log_path)?;
    WriteLogger::init(level, Config::default(), log_file)
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}
