//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use crate::config::ListConfig;
use crate::models::Item;
use crate::store::ListStore;

/// 应用状态
pub struct App {
    pub store: ListStore,
    pub selected_index: usize,
    pub mode: AppMode,
    pub input_field: InputField,
    pub edit_name: String, // 行内编辑器的名称缓冲
    pub edit_quantity: String,
    pub message: Option<String>,
    pub confirm_delete: bool,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    AddingItem,
    EditingItem(u32), // 正在编辑的条目 ID
    Confirm(ConfirmAction),
}

/// 确认操作类型
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    Delete(u32),
}

/// 输入字段类型
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputField {
    Name,
    Quantity,
}

impl InputField {
    pub fn toggle(self) -> Self {
        match self {
            InputField::Name => InputField::Quantity,
            InputField::Quantity => InputField::Name,
        }
    }
}

impl App {
    /// 创建新的应用实例
    pub fn new(config: &ListConfig) -> Self {
        Self {
            store: ListStore::new(config.id_strategy),
            selected_index: 0,
            mode: AppMode::Normal,
            input_field: InputField::Name,
            edit_name: String::new(),
            edit_quantity: String::new(),
            message: None,
            confirm_delete: config.confirm_delete,
        }
    }

    /// 确保选中索引有效
    pub fn clamp_selection(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// 选中指定 ID 的条目
    pub fn select_id(&mut self, id: u32) {
        if let Some(index) = self.store.items().iter().position(|item| item.id == id) {
            self.selected_index = index;
        }
    }

    /// 获取当前选中的条目
    pub fn selected_item(&self) -> Option<&Item> {
        self.store.items().get(self.selected_index)
    }

    /// 获取当前选中的条目 ID
    pub fn selected_item_id(&self) -> Option<u32> {
        self.selected_item().map(|item| item.id)
    }
}
