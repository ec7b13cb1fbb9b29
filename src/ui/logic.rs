//! 业务逻辑处理 (Update/Dispatch)
//!
//! 把 Action 转换为 ListStore 的意图调用，并维护选中项和提示信息

use super::actions::Action;
use super::state::{App, AppMode, ConfirmAction, InputField};
use crate::store::AddOutcome;

impl App {
    /// 核心逻辑分发，返回是否退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::StartAddItem => self.start_add_item(),
            Action::StartEditItem => self.start_edit_item(),
            Action::StartDeleteItem => self.start_delete_item(),

            Action::Cancel => self.cancel(),

            Action::Submit => match self.mode {
                AppMode::AddingItem | AppMode::EditingItem(_) => match self.input_field {
                    InputField::Name => self.input_field = InputField::Quantity,
                    InputField::Quantity => self.submit_form(),
                },
                AppMode::Confirm(_) => self.execute_confirm(),
                AppMode::Normal => {}
            },

            Action::SwitchField => {
                if self.is_form_mode() {
                    self.input_field = self.input_field.toggle();
                }
            }

            Action::Input(c) => self.edit_focused_field(|buffer| buffer.push(c)),
            Action::DeleteChar => self.edit_focused_field(|buffer| {
                buffer.pop();
            }),
        }
        false
    }

    fn is_form_mode(&self) -> bool {
        matches!(self.mode, AppMode::AddingItem | AppMode::EditingItem(_))
    }

    /// 修改当前聚焦的输入框，添加模式下写回 store 的草稿
    fn edit_focused_field(&mut self, edit: impl FnOnce(&mut String)) {
        match self.mode {
            AppMode::AddingItem => match self.input_field {
                InputField::Name => {
                    let mut text = self.store.draft_name().to_string();
                    edit(&mut text);
                    self.store.set_draft_name(text);
                }
                InputField::Quantity => {
                    let mut text = self.store.draft_quantity().to_string();
                    edit(&mut text);
                    self.store.set_draft_quantity(text);
                }
            },
            AppMode::EditingItem(_) => match self.input_field {
                InputField::Name => edit(&mut self.edit_name),
                InputField::Quantity => edit(&mut self.edit_quantity),
            },
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        match self.mode {
            AppMode::AddingItem => self.confirm_add_item(),
            AppMode::EditingItem(id) => self.confirm_edit_item(id),
            _ => {}
        }
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.store.len() {
            self.selected_index += 1;
        }
    }

    // ============ 添加条目相关 ============

    /// 开始添加条目
    pub fn start_add_item(&mut self) {
        self.store.open_add_dialog();
        self.mode = AppMode::AddingItem;
        self.input_field = InputField::Name;
        self.message = None;
    }

    /// 确认添加条目
    pub fn confirm_add_item(&mut self) {
        match self.store.commit_add() {
            AddOutcome::Added(id) => {
                self.select_id(id);
                self.message = self
                    .store
                    .get(id)
                    .map(|item| format!("Added {} ×{}", item.name, item.quantity));
                self.mode = AppMode::Normal;
            }
            AddOutcome::DiscardedBlankName => {
                self.message = Some("Nothing added: name was blank".to_string());
                self.mode = AppMode::Normal;
            }
            AddOutcome::InvalidQuantity => {
                // 保持对话框打开，让用户修正数量
                self.input_field = InputField::Quantity;
                self.message = Some("Quantity must be a whole number ≥ 1".to_string());
            }
            AddOutcome::DialogClosed => self.mode = AppMode::Normal,
        }
    }

    // ============ 编辑条目相关 ============

    /// 开始编辑选中的条目
    pub fn start_edit_item(&mut self) {
        let Some(id) = self.selected_item_id() else {
            return;
        };
        if !self.store.begin_edit(id) {
            return;
        }
        if let Some(item) = self.store.get(id) {
            self.edit_name = item.name.clone();
            self.edit_quantity = item.quantity.to_string();
        }
        self.mode = AppMode::EditingItem(id);
        self.input_field = InputField::Name;
        self.message = None;
    }

    /// 确认编辑条目
    pub fn confirm_edit_item(&mut self, id: u32) {
        let updated = self
            .store
            .commit_edit(id, &self.edit_name, &self.edit_quantity);
        self.message = if updated {
            self.store
                .get(id)
                .map(|item| format!("Updated {} ×{}", item.name, item.quantity))
        } else {
            Some("Item no longer exists".to_string())
        };
        self.clear_edit_buffers();
        self.clamp_selection();
        self.mode = AppMode::Normal;
    }

    fn clear_edit_buffers(&mut self) {
        self.edit_name.clear();
        self.edit_quantity.clear();
    }

    // ============ 删除条目相关 ============

    /// 开始删除条目
    pub fn start_delete_item(&mut self) {
        if let Some(id) = self.selected_item_id() {
            if self.confirm_delete {
                self.mode = AppMode::Confirm(ConfirmAction::Delete(id));
            } else {
                self.delete_item(id);
            }
        }
    }

    /// 执行确认操作
    pub fn execute_confirm(&mut self) {
        if let AppMode::Confirm(ConfirmAction::Delete(id)) = self.mode {
            self.delete_item(id);
        }
        self.mode = AppMode::Normal;
    }

    fn delete_item(&mut self, id: u32) {
        let name = self.store.get(id).map(|item| item.name.clone());
        if self.store.delete_item(id) {
            self.message = name.map(|name| format!("Deleted {}", name));
        }
        self.clamp_selection();
    }

    // ============ 通用操作 ============

    /// 取消当前操作
    pub fn cancel(&mut self) {
        match self.mode {
            AppMode::AddingItem => self.store.cancel_add_dialog(),
            AppMode::EditingItem(_) => {
                self.store.cancel_edit();
                self.clear_edit_buffers();
            }
            _ => {}
        }
        self.mode = AppMode::Normal;
        self.input_field = InputField::Name;
        self.message = None;
    }
}
