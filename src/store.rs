//! 购物清单状态容器
//!
//! ListStore 持有条目序列以及添加对话框的草稿状态，所有修改都通过意图方法完成。
//! 每次修改都会整体替换条目切片（写时复制），已取出的快照不受后续修改影响。

use std::sync::Arc;

use tracing::{debug, info};

use crate::models::{IdStrategy, Item, parse_quantity};

/// 提交添加对话框的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added(u32),
    DiscardedBlankName,
    InvalidQuantity,
    DialogClosed,
}

/// 渲染用的只读快照
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub items: Arc<[Item]>,
    pub dialog_open: bool,
    pub draft_name: String,
    pub draft_quantity: String,
}

#[derive(Debug, Clone)]
pub struct ListStore {
    items: Arc<[Item]>,
    dialog_open: bool,
    draft_name: String,
    draft_quantity: String,
    id_strategy: IdStrategy,
    next_id: u32,
}

impl ListStore {
    pub fn new(id_strategy: IdStrategy) -> Self {
        Self {
            items: Arc::from(Vec::new()),
            dialog_open: false,
            draft_name: String::new(),
            draft_quantity: String::new(),
            id_strategy,
            next_id: 1,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            items: Arc::clone(&self.items),
            dialog_open: self.dialog_open,
            draft_name: self.draft_name.clone(),
            draft_quantity: self.draft_quantity.clone(),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    fn position(&self, id: u32) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 当前处于编辑状态的条目 ID
    pub fn editing_id(&self) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.is_editing)
            .map(|item| item.id)
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn draft_name(&self) -> &str {
        &self.draft_name
    }

    pub fn draft_quantity(&self) -> &str {
        &self.draft_quantity
    }

    // ============ 添加对话框 ============

    pub fn open_add_dialog(&mut self) {
        self.dialog_open = true;
        debug!("add dialog opened");
    }

    /// 关闭对话框并清空草稿，重复调用无副作用
    pub fn cancel_add_dialog(&mut self) {
        self.dialog_open = false;
        self.draft_name.clear();
        self.draft_quantity.clear();
        debug!("add dialog cancelled");
    }

    pub fn set_draft_name(&mut self, text: impl Into<String>) {
        self.draft_name = text.into();
    }

    pub fn set_draft_quantity(&mut self, text: impl Into<String>) {
        self.draft_quantity = text.into();
    }

    /// 提交添加对话框
    ///
    /// 名称为空白时丢弃并关闭对话框；数量无法解析时整个添加失败，状态保持不变。
    pub fn commit_add(&mut self) -> AddOutcome {
        if !self.dialog_open {
            debug!("commit_add ignored: dialog closed");
            return AddOutcome::DialogClosed;
        }

        if self.draft_name.trim().is_empty() {
            self.cancel_add_dialog();
            debug!("add discarded: blank name");
            return AddOutcome::DiscardedBlankName;
        }

        let Some(quantity) = parse_quantity(&self.draft_quantity) else {
            debug!(quantity = %self.draft_quantity, "add rejected: invalid quantity");
            return AddOutcome::InvalidQuantity;
        };

        let id = self.allocate_id();
        let name = std::mem::take(&mut self.draft_name);
        info!(id, name = %name, quantity, "item added");

        let mut next = self.items.to_vec();
        next.push(Item::new(id, name, quantity));
        self.items = next.into();

        self.dialog_open = false;
        self.draft_quantity.clear();
        AddOutcome::Added(id)
    }

    fn allocate_id(&mut self) -> u32 {
        match self.id_strategy {
            IdStrategy::Monotonic => {
                let id = self.next_id;
                self.next_id = self.next_id.saturating_add(1);
                id
            }
            IdStrategy::Length => u32::try_from(self.items.len())
                .unwrap_or(u32::MAX)
                .saturating_add(1),
        }
    }

    // ============ 编辑 ============

    /// 将指定条目切换到编辑状态，其余条目一律退出编辑
    ///
    /// ID 重复时只作用于第一个匹配项。
    pub fn begin_edit(&mut self, id: u32) -> bool {
        let Some(index) = self.position(id) else {
            debug!(id, "begin_edit ignored: unknown item");
            return false;
        };

        self.items = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| item.with_editing(i == index))
            .collect();
        debug!(id, index, "editing item");
        true
    }

    /// 提交编辑：先让所有条目退出编辑，再更新目标条目
    ///
    /// 数量无法解析时回落为 1；名称为空白时保留原名称。
    pub fn commit_edit(&mut self, id: u32, new_name: &str, new_quantity: &str) -> bool {
        let mut next: Vec<Item> = self
            .items
            .iter()
            .map(|item| item.with_editing(false))
            .collect();

        let found = match self.position(id).and_then(|index| next.get_mut(index)) {
            Some(item) => {
                if !new_name.trim().is_empty() {
                    item.name = new_name.to_string();
                }
                item.quantity = parse_quantity(new_quantity).unwrap_or(1);
                info!(id, name = %item.name, quantity = item.quantity, "item updated");
                true
            }
            None => {
                debug!(id, "commit_edit: item no longer exists");
                false
            }
        };

        self.items = next.into();
        found
    }

    /// 放弃编辑，名称与数量不变
    pub fn cancel_edit(&mut self) {
        if self.editing_id().is_none() {
            return;
        }
        self.items = self
            .items
            .iter()
            .map(|item| item.with_editing(false))
            .collect();
        debug!("edit cancelled");
    }

    // ============ 删除 ============

    /// 按 ID 删除条目，ID 重复时只删除第一个匹配项
    pub fn delete_item(&mut self, id: u32) -> bool {
        let Some(index) = self.position(id) else {
            debug!(id, "delete ignored: unknown item");
            return false;
        };

        let mut next = self.items.to_vec();
        next.remove(index);
        self.items = next.into();
        info!(id, index, "item deleted");
        true
    }
}

impl Default for ListStore {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(store: &mut ListStore, name: &str, quantity: &str) -> AddOutcome {
        store.open_add_dialog();
        store.set_draft_name(name);
        store.set_draft_quantity(quantity);
        store.commit_add()
    }

    fn editing_count(store: &ListStore) -> usize {
        store.items().iter().filter(|item| item.is_editing).count()
    }

    #[test]
    fn test_end_to_end_add() {
        let mut store = ListStore::default();
        store.open_add_dialog();
        store.set_draft_name("Bread");
        store.set_draft_quantity("2");
        assert_eq!(store.commit_add(), AddOutcome::Added(1));

        let snapshot = store.snapshot();
        assert_eq!(
            snapshot.items.as_ref(),
            &[Item {
                id: 1,
                name: "Bread".to_string(),
                quantity: 2,
                is_editing: false,
            }]
        );
        assert!(!snapshot.dialog_open);
        assert!(snapshot.draft_name.is_empty());
        assert!(snapshot.draft_quantity.is_empty());
    }

    #[test]
    fn test_add_appends_with_next_id() {
        for strategy in [IdStrategy::Monotonic, IdStrategy::Length] {
            let mut store = ListStore::new(strategy);
            add(&mut store, "Bread", "1");
            add(&mut store, "Eggs", "12");
            assert_eq!(add(&mut store, "Milk", "3"), AddOutcome::Added(3));

            let last = store.items().last().unwrap();
            assert_eq!(last, &Item::new(3, "Milk".to_string(), 3));
            assert_eq!(store.len(), 3);
        }
    }

    #[test]
    fn test_blank_name_is_discarded() {
        let mut store = ListStore::default();
        add(&mut store, "Bread", "1");

        assert_eq!(add(&mut store, "   ", "4"), AddOutcome::DiscardedBlankName);
        assert_eq!(store.len(), 1);
        assert!(!store.dialog_open());
        assert!(store.draft_name().is_empty());
        assert!(store.draft_quantity().is_empty());
    }

    #[test]
    fn test_invalid_quantity_fails_add_without_changes() {
        let mut store = ListStore::default();
        store.open_add_dialog();
        store.set_draft_name("Milk");
        store.set_draft_quantity("lots");
        let before = store.snapshot();

        assert_eq!(store.commit_add(), AddOutcome::InvalidQuantity);
        assert_eq!(store.snapshot(), before);
        assert!(store.dialog_open());
        assert_eq!(store.draft_name(), "Milk");
    }

    #[test]
    fn test_commit_add_requires_open_dialog() {
        let mut store = ListStore::default();
        store.set_draft_name("Milk");
        store.set_draft_quantity("1");
        assert_eq!(store.commit_add(), AddOutcome::DialogClosed);
        assert!(store.is_empty());
    }

    #[test]
    fn test_cancel_add_dialog_is_idempotent() {
        let mut store = ListStore::default();
        store.open_add_dialog();
        store.set_draft_name("Milk");
        store.set_draft_quantity("2");

        store.cancel_add_dialog();
        let once = store.snapshot();
        store.cancel_add_dialog();
        assert_eq!(store.snapshot(), once);
        assert!(!once.dialog_open);
        assert!(once.draft_name.is_empty());
        assert!(once.draft_quantity.is_empty());
        assert!(once.items.is_empty());
    }

    #[test]
    fn test_begin_edit_is_mutually_exclusive() {
        let mut store = ListStore::default();
        add(&mut store, "Bread", "1");
        add(&mut store, "Eggs", "6");
        add(&mut store, "Milk", "2");

        assert!(store.begin_edit(1));
        assert!(store.begin_edit(2));
        assert!(!store.get(1).unwrap().is_editing);
        assert!(store.get(2).unwrap().is_editing);
        assert_eq!(editing_count(&store), 1);
        assert_eq!(store.editing_id(), Some(2));
    }

    #[test]
    fn test_begin_edit_unknown_id_is_noop() {
        let mut store = ListStore::default();
        add(&mut store, "Bread", "1");
        store.begin_edit(1);
        let before = store.snapshot();

        assert!(!store.begin_edit(42));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_commit_edit_defaults_quantity_to_one() {
        let mut store = ListStore::default();
        add(&mut store, "Bread", "5");
        store.begin_edit(1);

        assert!(store.commit_edit(1, "Eggs", "abc"));
        let item = store.get(1).unwrap();
        assert_eq!(item.name, "Eggs");
        assert_eq!(item.quantity, 1);
        assert_eq!(editing_count(&store), 0);
    }

    #[test]
    fn test_commit_edit_keeps_name_when_blank() {
        let mut store = ListStore::default();
        add(&mut store, "Bread", "5");
        store.begin_edit(1);

        store.commit_edit(1, "  ", "7");
        let item = store.get(1).unwrap();
        assert_eq!(item.name, "Bread");
        assert_eq!(item.quantity, 7);
    }

    #[test]
    fn test_commit_edit_missing_item_only_clears_flags() {
        let mut store = ListStore::default();
        add(&mut store, "Bread", "1");
        add(&mut store, "Milk", "2");
        store.begin_edit(2);
        store.delete_item(1);

        assert!(!store.commit_edit(1, "Eggs", "3"));
        assert_eq!(editing_count(&store), 0);
        assert_eq!(store.items(), &[Item::new(2, "Milk".to_string(), 2)]);
    }

    #[test]
    fn test_cancel_edit_leaves_values() {
        let mut store = ListStore::default();
        add(&mut store, "Bread", "1");
        store.begin_edit(1);
        store.cancel_edit();

        assert_eq!(store.items(), &[Item::new(1, "Bread".to_string(), 1)]);
        assert_eq!(store.editing_id(), None);
    }

    #[test]
    fn test_delete_by_id() {
        let mut store = ListStore::default();
        add(&mut store, "Milk", "1");
        add(&mut store, "Milk", "1");
        add(&mut store, "Bread", "2");

        assert!(store.delete_item(2));
        assert_eq!(store.len(), 2);
        let ids: Vec<u32> = store.items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 3]);

        assert!(!store.delete_item(2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_delete_editing_item() {
        let mut store = ListStore::default();
        add(&mut store, "Milk", "1");
        store.begin_edit(1);
        assert!(store.delete_item(1));
        assert!(store.is_empty());
        assert_eq!(store.editing_id(), None);
    }

    #[test]
    fn test_monotonic_ids_are_not_reused() {
        let mut store = ListStore::new(IdStrategy::Monotonic);
        add(&mut store, "A", "1");
        add(&mut store, "B", "1");
        add(&mut store, "C", "1");
        store.delete_item(2);

        assert_eq!(add(&mut store, "D", "1"), AddOutcome::Added(4));
        let ids: Vec<u32> = store.items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_length_ids_collide_after_delete() {
        let mut store = ListStore::new(IdStrategy::Length);
        add(&mut store, "A", "1");
        add(&mut store, "B", "1");
        add(&mut store, "C", "1");
        store.delete_item(2);

        assert_eq!(add(&mut store, "D", "1"), AddOutcome::Added(3));
        let ids: Vec<u32> = store.items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 3, 3]);
    }

    #[test]
    fn test_length_ids_edit_and_delete_touch_one_item() {
        let mut store = ListStore::new(IdStrategy::Length);
        add(&mut store, "A", "1");
        add(&mut store, "B", "1");
        add(&mut store, "C", "1");
        store.delete_item(2);
        add(&mut store, "D", "1");

        assert!(store.begin_edit(3));
        assert_eq!(editing_count(&store), 1);
        assert!(store.items()[1].is_editing);
        assert!(!store.items()[2].is_editing);

        assert!(store.commit_edit(3, "Cheese", "2"));
        assert_eq!(store.items()[1].name, "Cheese");
        assert_eq!(store.items()[2].name, "D");

        let len = store.len();
        assert!(store.delete_item(3));
        assert_eq!(store.len(), len - 1);
        assert_eq!(
            store.items(),
            &[
                Item::new(1, "A".to_string(), 1),
                Item::new(3, "D".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_intents() {
        let mut store = ListStore::default();
        add(&mut store, "Bread", "1");
        let before = store.snapshot();

        store.begin_edit(1);
        store.commit_edit(1, "Rye", "2");
        add(&mut store, "Milk", "1");
        store.delete_item(1);

        assert_eq!(
            before.items.as_ref(),
            &[Item::new(1, "Bread".to_string(), 1)]
        );
        assert_ne!(store.snapshot().items, before.items);
    }

    #[test]
    fn test_at_most_one_editing_across_sequence() {
        let mut store = ListStore::default();
        for name in ["A", "B", "C", "D"] {
            add(&mut store, name, "1");
            assert!(editing_count(&store) <= 1);
        }
        for id in [3, 1, 4, 4, 2] {
            store.begin_edit(id);
            assert_eq!(editing_count(&store), 1);
        }
        store.delete_item(2);
        assert_eq!(editing_count(&store), 0);
        store.begin_edit(1);
        store.commit_edit(1, "Z", "9");
        assert_eq!(editing_count(&store), 0);
    }
}
