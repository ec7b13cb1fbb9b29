use serde::Deserialize;

/// 购物清单条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub quantity: u32,
    pub is_editing: bool,
}

impl Item {
    pub fn new(id: u32, name: String, quantity: u32) -> Self {
        Self {
            id,
            name,
            quantity,
            is_editing: false,
        }
    }

    /// 返回一份修改了编辑标记的副本
    pub fn with_editing(&self, is_editing: bool) -> Self {
        Self {
            is_editing,
            ..self.clone()
        }
    }
}

/// 新条目 ID 的分配方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// 单调递增计数器，删除后不复用
    #[default]
    Monotonic,
    /// 当前条目数 + 1，删除后再添加可能与现存 ID 冲突
    Length,
}

/// 解析数量文本：去除首尾空白后按十进制解析，0 视为无效
pub fn parse_quantity(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok().filter(|q| *q >= 1)
}
