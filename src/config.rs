//! 列配置加载
//!
//! 只读取种子文件，编辑结果不写回磁盘

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::editor::ColumnEditor;
use crate::error::ConfigError;
use crate::models::ColumnSetData;

pub const APP_NAME: &str = "colsmith";

/// 获取配置目录路径 (~/.config/colsmith/)
pub fn config_dir() -> io::Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_NAME))
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户配置目录"))
}

/// 获取数据目录路径 (~/.local/share/colsmith/)，不存在时创建
pub fn data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
        .join(APP_NAME);

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 默认种子文件 (~/.config/colsmith/columns.toml)
pub fn default_seed_path() -> io::Result<PathBuf> {
    Ok(config_dir()?.join("columns.toml"))
}

/// 从TOML文件加载列集合，文件不存在时返回内置默认值
pub fn load_columns(path: &Path) -> Result<ColumnSetData, ConfigError> {
    if !path.exists() {
        info!("{} not found, using built-in columns", path.display());
        return Ok(ColumnSetData::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data = parse_columns(&content)?;

    info!("loaded {} columns from {}", data.columns.len(), path.display());
    Ok(data)
}

/// 解析并校验列集合
pub fn parse_columns(content: &str) -> Result<ColumnSetData, ConfigError> {
    let data: ColumnSetData = toml::from_str(content)?;
    // 借用编辑器的输入校验（重复 ID 等）
    ColumnEditor::new(&data.columns)?;
    Ok(data)
}
