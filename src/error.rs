//! 错误类型

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::editor::Group;

/// 编辑器调用方违反约定时返回的错误，状态不会被修改
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("重复的列 ID: {0}")]
    DuplicateId(String),

    #[error("{group}分组索引越界: {index}（长度 {len}）")]
    IndexOutOfRange { group: Group, index: usize, len: usize },
}

/// 读取列配置文件时的错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("无法读取 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("配置文件格式错误: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("列配置无效: {0}")]
    Invalid(#[from] EditorError),
}

impl From<ConfigError> for io::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Io { source, .. } => source,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
