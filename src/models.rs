use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_visible() -> bool {
    true
}

/// 表格列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub mandatory: bool, // 必选列：始终可见，且排在最前
}

impl Column {
    pub fn new(id: impl Into<String>, name: impl Into<String>, visible: bool, mandatory: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            visible,
            mandatory,
        }
    }

    /// 是否可拖动（可见且非必选）
    pub fn is_draggable(&self) -> bool {
        self.visible && !self.mandatory
    }

    /// 名称是否匹配查询（`query` 须已小写并去除首尾空白）
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.name.to_lowercase().contains(query)
    }
}

/// TOML文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSetData {
    #[serde(default)]
    pub meta: SetMeta,
    #[serde(default)]
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetMeta {
    pub title: String,
}

impl Default for SetMeta {
    fn default() -> Self {
        Self {
            title: "Fixtures".to_string(),
        }
    }
}

impl Default for ColumnSetData {
    fn default() -> Self {
        Self {
            meta: SetMeta::default(),
            columns: default_columns(),
        }
    }
}

/// 内置的默认列集合
pub fn default_columns() -> Vec<Column> {
    [
        ("1", "Location", true, true),
        ("2", "Competition", true, true),
        ("3", "Fixture", true, true),
        ("4", "Start Date", true, false),
        ("5", "Settings Level", true, false),
        ("6", "Template", true, false),
        ("7", "Scout", true, false),
        ("8", "Order status", true, false),
        ("9", "Uncovered Markets", false, false),
        ("10", "Fixture Status", false, false),
    ]
    .into_iter()
    .map(|(id, name, visible, mandatory)| Column::new(id, name, visible, mandatory))
    .collect()
}
