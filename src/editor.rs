//! 列编辑器状态引擎
//!
//! 持有原始快照与工作快照，派生出活动/隐藏两个视图，
//! 所有修改操作都以整体替换工作快照的方式完成。

use std::cell::OnceCell;
use std::collections::HashSet;
use std::fmt;

use log::{debug, info, warn};

use crate::error::EditorError;
use crate::models::Column;

/// 拖动分组
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Active,   // 可见列（仅非必选列可拖动）
    Inactive, // 隐藏列
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Active => f.write_str("活动"),
            Group::Inactive => f.write_str("隐藏"),
        }
    }
}

/// 应用结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub columns: Vec<Column>,
}

/// 编辑器关闭时发出的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    Apply(ApplyResult),
    Cancel,
}

#[derive(Debug, Default)]
struct Views {
    active: Vec<Column>,
    inactive: Vec<Column>,
}

impl Views {
    fn compute(columns: &[Column], query: &str) -> Self {
        let needle = query.trim().to_lowercase();

        let mut active: Vec<Column> = columns
            .iter()
            .filter(|c| c.visible && c.matches(&needle))
            .cloned()
            .collect();
        // 稳定排序：必选列在前，组内保持原有顺序
        active.sort_by_key(|c| !c.mandatory);

        let inactive = columns
            .iter()
            .filter(|c| !c.visible && c.matches(&needle))
            .cloned()
            .collect();

        Self { active, inactive }
    }
}

/// 列编辑器
#[derive(Debug, Default)]
pub struct ColumnEditor {
    original: Vec<Column>,
    working: Vec<Column>,
    search_query: String,
    views: OnceCell<Views>,
}

impl ColumnEditor {
    pub fn new(columns: &[Column]) -> Result<Self, EditorError> {
        let mut editor = Self::default();
        editor.set_input(columns)?;
        Ok(editor)
    }

    /// 设置输入列，同时作为原始快照与工作快照。
    ///
    /// ID 重复时返回错误，原有状态保持不变。被标记为隐藏的必选列会被修正为可见。
    pub fn set_input(&mut self, columns: &[Column]) -> Result<(), EditorError> {
        let mut seen = HashSet::with_capacity(columns.len());
        if let Some(dup) = columns.iter().find(|c| !seen.insert(c.id.as_str())) {
            warn!("set_input rejected: duplicate id {:?}", dup.id);
            return Err(EditorError::DuplicateId(dup.id.clone()));
        }

        let snapshot: Vec<Column> = columns
            .iter()
            .map(|c| {
                let mut c = c.clone();
                if c.mandatory && !c.visible {
                    warn!("mandatory column {:?} was hidden, forcing visible", c.id);
                    c.visible = true;
                }
                c
            })
            .collect();

        debug!("set_input: {} columns", snapshot.len());
        self.original = snapshot.clone();
        self.search_query.clear();
        self.replace_working(snapshot);
        Ok(())
    }

    /// 工作快照
    pub fn columns(&self) -> &[Column] {
        &self.working
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// 工作快照是否与原始快照不同
    pub fn is_modified(&self) -> bool {
        self.working != self.original
    }

    /// 活动列：可见、匹配搜索，必选列在前
    pub fn active_items(&self) -> &[Column] {
        &self.views().active
    }

    /// 隐藏列：不可见、匹配搜索，保持工作快照顺序
    pub fn inactive_items(&self) -> &[Column] {
        &self.views().inactive
    }

    pub fn draggable_active_items(&self) -> impl Iterator<Item = &Column> {
        self.active_items().iter().filter(|c| !c.mandatory)
    }

    pub fn mandatory_active_items(&self) -> impl Iterator<Item = &Column> {
        self.active_items().iter().filter(|c| c.mandatory)
    }

    /// 列在分组拖动范围内的索引。
    ///
    /// 拖动索引始终针对工作快照的完整分组，而不是搜索过滤后的视图。
    pub fn drag_index(&self, group: Group, id: &str) -> Option<usize> {
        self.drag_population(group).position(|c| c.id == id)
    }

    /// 切换列的可见性，返回工作快照是否发生变化。
    ///
    /// 必选列与未知 ID 均为空操作。
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.working.iter().find(|c| c.id == id) {
            None => {
                debug!("toggle: unknown id {:?}", id);
                return false;
            }
            Some(c) if c.mandatory => {
                debug!("toggle: {:?} is mandatory, ignored", id);
                return false;
            }
            Some(_) => {}
        }

        let next = self
            .working
            .iter()
            .map(|c| {
                if c.id == id {
                    Column {
                        visible: !c.visible,
                        ..c.clone()
                    }
                } else {
                    c.clone()
                }
            })
            .collect();

        debug!("toggle: {:?}", id);
        self.replace_working(next);
        true
    }

    /// 在分组内移动一列，返回顺序是否发生变化。
    ///
    /// 索引越界时返回错误，状态保持不变。
    pub fn reorder(&mut self, group: Group, from: usize, to: usize) -> Result<bool, EditorError> {
        let mut population: Vec<Column> = self.drag_population(group).cloned().collect();
        let len = population.len();
        for index in [from, to] {
            if index >= len {
                warn!("reorder rejected: {} index {} out of range ({})", group, index, len);
                return Err(EditorError::IndexOutOfRange { group, index, len });
            }
        }

        if from == to {
            return Ok(false);
        }

        move_item(&mut population, from, to);

        let next: Vec<Column> = match group {
            Group::Active => self
                .working
                .iter()
                .filter(|c| c.visible && c.mandatory)
                .cloned()
                .chain(population)
                .chain(self.working.iter().filter(|c| !c.visible).cloned())
                .collect(),
            Group::Inactive => self
                .working
                .iter()
                .filter(|c| c.visible)
                .cloned()
                .chain(population)
                .collect(),
        };

        debug!("reorder: {} {} -> {}", group, from, to);
        self.replace_working(next);
        Ok(true)
    }

    /// 恢复到原始快照并清空搜索
    pub fn reset(&mut self) {
        debug!("reset");
        self.search_query.clear();
        self.replace_working(self.original.clone());
    }

    pub fn set_search_query(&mut self, text: &str) {
        if self.search_query != text {
            self.search_query = text.to_string();
            self.views.take();
        }
    }

    pub fn commit(&self) -> EditorEvent {
        info!("commit: {} columns", self.working.len());
        EditorEvent::Apply(ApplyResult {
            columns: self.working.clone(),
        })
    }

    pub fn discard(&self) -> EditorEvent {
        info!("discard");
        EditorEvent::Cancel
    }

    fn views(&self) -> &Views {
        self.views
            .get_or_init(|| Views::compute(&self.working, &self.search_query))
    }

    fn drag_population(&self, group: Group) -> impl Iterator<Item = &Column> {
        self.working.iter().filter(move |c| match group {
            Group::Active => c.is_draggable(),
            Group::Inactive => !c.visible,
        })
    }

    fn replace_working(&mut self, next: Vec<Column>) {
        self.working = next;
        self.views.take();
    }
}

/// 将 `from` 处的元素移到 `to`，中间元素顺移。调用方保证索引有效。
fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Vec<Column> {
        vec![
            Column::new("1", "Location", true, true),
            Column::new("2", "Template", true, false),
            Column::new("3", "Scout", false, false),
        ]
    }

    fn ids(columns: &[Column]) -> Vec<&str> {
        columns.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_move_item() {
        let mut v = vec!['a', 'b', 'c', 'd'];
        move_item(&mut v, 0, 2);
        assert_eq!(v, ['b', 'c', 'a', 'd']);
        move_item(&mut v, 3, 0);
        assert_eq!(v, ['d', 'b', 'c', 'a']);
        move_item(&mut v, 1, 1);
        assert_eq!(v, ['d', 'b', 'c', 'a']);
    }

    #[test]
    fn test_toggle_hidden_column_joins_active_group() {
        let mut editor = ColumnEditor::new(&sample()).unwrap();

        assert!(editor.toggle("3"));
        assert_eq!(ids(editor.active_items()), ["1", "2", "3"]);
        assert!(editor.inactive_items().is_empty());

        let EditorEvent::Apply(result) = editor.commit() else {
            panic!("commit must apply");
        };
        assert_eq!(result.columns.len(), 3);
        assert!(result.columns.iter().all(|c| c.visible));
        assert_eq!(result.columns[2].id, "3");
    }

    #[test]
    fn test_toggle_mandatory_and_unknown_are_noops() {
        let mut editor = ColumnEditor::new(&sample()).unwrap();

        assert!(!editor.toggle("1"));
        assert!(!editor.toggle("nope"));
        assert_eq!(editor.columns(), sample().as_slice());
        assert!(!editor.is_modified());
    }

    #[test]
    fn test_search_filters_both_views() {
        let mut editor = ColumnEditor::new(&sample()).unwrap();

        editor.set_search_query("sc");
        assert!(editor.active_items().is_empty());
        assert_eq!(ids(editor.inactive_items()), ["3"]);

        editor.set_search_query("  TEMP  ");
        assert_eq!(ids(editor.active_items()), ["2"]);
        assert!(editor.inactive_items().is_empty());

        // 搜索不改变工作快照
        assert_eq!(editor.columns(), sample().as_slice());
    }

    #[test]
    fn test_active_view_puts_mandatory_first() {
        let editor = ColumnEditor::new(&[
            Column::new("b", "B", true, false),
            Column::new("a", "A", true, true),
            Column::new("c", "C", true, false),
            Column::new("d", "D", true, true),
        ])
        .unwrap();

        assert_eq!(ids(editor.active_items()), ["a", "d", "b", "c"]);
        assert_eq!(ids(&editor.mandatory_active_items().cloned().collect::<Vec<_>>()), ["a", "d"]);
        assert_eq!(ids(&editor.draggable_active_items().cloned().collect::<Vec<_>>()), ["b", "c"]);
    }

    #[test]
    fn test_reorder_active_group() {
        let mut editor = ColumnEditor::new(&[
            Column::new("a", "MandatoryA", true, true),
            Column::new("b", "NonMandB", true, false),
            Column::new("c", "NonMandC", true, false),
        ])
        .unwrap();

        assert_eq!(editor.reorder(Group::Active, 0, 1), Ok(true));
        assert_eq!(ids(editor.columns()), ["a", "c", "b"]);
        assert_eq!(ids(editor.active_items()), ["a", "c", "b"]);
    }

    #[test]
    fn test_reorder_active_rebuilds_partition() {
        let mut editor = ColumnEditor::new(&[
            Column::new("h1", "Hidden1", false, false),
            Column::new("b", "B", true, false),
            Column::new("m", "M", true, true),
            Column::new("c", "C", true, false),
            Column::new("h2", "Hidden2", false, false),
        ])
        .unwrap();

        assert_eq!(editor.reorder(Group::Active, 1, 0), Ok(true));
        assert_eq!(ids(editor.columns()), ["m", "c", "b", "h1", "h2"]);
    }

    #[test]
    fn test_reorder_inactive_group() {
        let mut editor = ColumnEditor::new(&[
            Column::new("h1", "Hidden1", false, false),
            Column::new("m", "M", true, true),
            Column::new("h2", "Hidden2", false, false),
            Column::new("v", "V", true, false),
            Column::new("h3", "Hidden3", false, false),
        ])
        .unwrap();

        assert_eq!(editor.reorder(Group::Inactive, 2, 0), Ok(true));
        assert_eq!(ids(editor.columns()), ["m", "v", "h3", "h1", "h2"]);
        assert_eq!(ids(editor.inactive_items()), ["h3", "h1", "h2"]);
    }

    #[test]
    fn test_reorder_same_index_is_noop() {
        let mut editor = ColumnEditor::new(&sample()).unwrap();
        assert_eq!(editor.reorder(Group::Inactive, 0, 0), Ok(false));
        assert_eq!(editor.columns(), sample().as_slice());
    }

    #[test]
    fn test_reorder_out_of_range_leaves_state() {
        let mut editor = ColumnEditor::new(&sample()).unwrap();

        assert_eq!(
            editor.reorder(Group::Active, 0, 1),
            Err(EditorError::IndexOutOfRange {
                group: Group::Active,
                index: 1,
                len: 1
            })
        );
        assert_eq!(
            editor.reorder(Group::Inactive, 4, 0),
            Err(EditorError::IndexOutOfRange {
                group: Group::Inactive,
                index: 4,
                len: 1
            })
        );
        assert_eq!(editor.columns(), sample().as_slice());
    }

    #[test]
    fn test_reorder_while_searching_uses_full_population() {
        let mut editor = ColumnEditor::new(&[
            Column::new("a", "Alpha", true, false),
            Column::new("b", "Beta", true, false),
            Column::new("c", "Gamma", true, false),
        ])
        .unwrap();
        editor.set_search_query("ga");
        assert_eq!(ids(editor.active_items()), ["c"]);

        let from = editor.drag_index(Group::Active, "c").unwrap();
        assert_eq!(from, 2);
        assert_eq!(editor.reorder(Group::Active, from, 0), Ok(true));
        assert_eq!(ids(editor.columns()), ["c", "a", "b"]);
        assert_eq!(editor.search_query(), "ga");
    }

    #[test]
    fn test_reset_restores_original_and_clears_search() {
        let mut editor = ColumnEditor::new(&sample()).unwrap();
        editor.toggle("2");
        editor.toggle("3");
        editor.set_search_query("x");
        assert!(editor.is_modified());

        editor.reset();
        assert!(!editor.is_modified());
        assert_eq!(editor.search_query(), "");
        assert_eq!(
            editor.commit(),
            EditorEvent::Apply(ApplyResult { columns: sample() })
        );
    }

    #[test]
    fn test_set_input_rejects_duplicates() {
        let mut editor = ColumnEditor::new(&sample()).unwrap();
        editor.toggle("3");

        let dup = vec![
            Column::new("x", "X", true, false),
            Column::new("x", "Y", true, false),
        ];
        assert_eq!(
            editor.set_input(&dup),
            Err(EditorError::DuplicateId("x".to_string()))
        );
        // 原有状态不变
        assert_eq!(editor.columns().len(), 3);
        assert!(editor.columns()[2].visible);
    }

    #[test]
    fn test_set_input_forces_mandatory_visible() {
        let editor = ColumnEditor::new(&[Column::new("m", "M", false, true)]).unwrap();
        assert!(editor.columns()[0].visible);
        assert!(editor.inactive_items().is_empty());
    }

    #[test]
    fn test_set_input_replaces_snapshots() {
        let mut editor = ColumnEditor::new(&sample()).unwrap();
        editor.toggle("2");
        editor.set_search_query("loc");

        let next = vec![Column::new("z", "Zone", true, false)];
        editor.set_input(&next).unwrap();
        assert_eq!(editor.search_query(), "");
        assert!(!editor.is_modified());
        editor.reset();
        assert_eq!(editor.columns(), next.as_slice());
    }

    #[test]
    fn test_commit_is_decoupled() {
        let mut editor = ColumnEditor::new(&sample()).unwrap();
        let EditorEvent::Apply(mut result) = editor.commit() else {
            panic!("commit must apply");
        };
        result.columns[1].visible = false;
        result.columns[1].name.push_str("!");

        assert_eq!(editor.columns(), sample().as_slice());
        assert_eq!(editor.discard(), EditorEvent::Cancel);
        assert!(editor.toggle("2"));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Toggle(usize),
        Reorder(bool, usize, usize),
        Search(String),
        Reset,
    }

    fn columns_strategy() -> impl Strategy<Value = Vec<Column>> {
        prop::collection::vec(("[A-Za-z ]{1,8}", any::<bool>(), any::<bool>()), 0..12).prop_map(
            |rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (name, visible, mandatory))| {
                        Column::new(i.to_string(), name, visible || mandatory, mandatory)
                    })
                    .collect()
            },
        )
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..14).prop_map(Op::Toggle),
            (any::<bool>(), 0usize..14, 0usize..14).prop_map(|(a, f, t)| Op::Reorder(a, f, t)),
            "[a-z ]{0,3}".prop_map(Op::Search),
            Just(Op::Reset),
        ]
    }

    fn apply(editor: &mut ColumnEditor, op: &Op) {
        match op {
            Op::Toggle(i) => {
                editor.toggle(&i.to_string());
            }
            Op::Reorder(active, from, to) => {
                let group = if *active { Group::Active } else { Group::Inactive };
                let before = editor.columns().to_vec();
                if editor.reorder(group, *from, *to).is_err() {
                    assert_eq!(editor.columns(), before.as_slice());
                }
            }
            Op::Search(q) => editor.set_search_query(q),
            Op::Reset => editor.reset(),
        }
    }

    fn sorted_ids(columns: &[Column]) -> Vec<String> {
        let mut ids: Vec<String> = columns.iter().map(|c| c.id.clone()).collect();
        ids.sort();
        ids
    }

    proptest! {
        #[test]
        fn mandatory_columns_stay_visible(
            columns in columns_strategy(),
            ops in prop::collection::vec(op_strategy(), 0..24),
        ) {
            let mut editor = ColumnEditor::new(&columns).unwrap();
            for op in &ops {
                apply(&mut editor, op);
                prop_assert!(editor.columns().iter().filter(|c| c.mandatory).all(|c| c.visible));
            }
        }

        #[test]
        fn active_view_orders_mandatory_first(
            columns in columns_strategy(),
            ops in prop::collection::vec(op_strategy(), 0..24),
        ) {
            let mut editor = ColumnEditor::new(&columns).unwrap();
            for op in &ops {
                apply(&mut editor, op);
            }
            editor.set_search_query("");
            let active = editor.active_items();
            let first_optional = active.iter().position(|c| !c.mandatory).unwrap_or(active.len());
            prop_assert!(active[first_optional..].iter().all(|c| !c.mandatory));
        }

        #[test]
        fn reset_then_commit_returns_input(
            columns in columns_strategy(),
            ops in prop::collection::vec(op_strategy(), 0..24),
        ) {
            let mut editor = ColumnEditor::new(&columns).unwrap();
            for op in &ops {
                apply(&mut editor, op);
            }
            editor.reset();
            prop_assert_eq!(editor.commit(), EditorEvent::Apply(ApplyResult { columns }));
        }

        #[test]
        fn double_toggle_round_trips(columns in columns_strategy(), pick in 0usize..12) {
            let mut editor = ColumnEditor::new(&columns).unwrap();
            let id = pick.to_string();
            editor.toggle(&id);
            editor.toggle(&id);
            prop_assert_eq!(editor.columns(), columns.as_slice());
        }

        #[test]
        fn search_never_mutates(
            columns in columns_strategy(),
            queries in prop::collection::vec("[a-zA-Z ]{0,4}", 0..6),
        ) {
            let mut editor = ColumnEditor::new(&columns).unwrap();
            let active = editor.active_items().to_vec();
            let inactive = editor.inactive_items().to_vec();
            for q in &queries {
                editor.set_search_query(q);
            }
            editor.set_search_query("");
            prop_assert_eq!(editor.active_items(), active.as_slice());
            prop_assert_eq!(editor.inactive_items(), inactive.as_slice());
            prop_assert_eq!(editor.columns(), columns.as_slice());
        }

        #[test]
        fn reorder_preserves_membership(
            columns in columns_strategy(),
            ops in prop::collection::vec(op_strategy(), 0..24),
        ) {
            let mut editor = ColumnEditor::new(&columns).unwrap();
            let expected = sorted_ids(&columns);
            for op in &ops {
                apply(&mut editor, op);
                prop_assert_eq!(sorted_ids(editor.columns()), expected.clone());
            }
        }
    }
}
