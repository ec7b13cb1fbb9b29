//! 通用 UI 组件
//!
//! 条目对话框及其输入框

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const CURSOR: &str = "▏";

/// [组件] 弹窗框架：清空区域、绘制边框，底部一行显示提示，返回正文区域
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str, hint: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::Gray)),
        chunks[1],
    );
    chunks[0]
}

/// [组件] 单行字段，聚焦时显示光标
fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, is_focused: bool) {
    let (border, text) = if is_focused {
        (
            Style::default().fg(Color::Yellow),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (Style::default().fg(Color::Gray), Style::default().fg(Color::Gray))
    };

    let mut spans = vec![Span::styled(value.to_string(), text)];
    if is_focused {
        spans.push(Span::styled(CURSOR, text));
    }

    let field = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(label.to_string())
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(field, area);
}

/// [组件] 名称 + 数量表单
pub fn render_item_form(
    frame: &mut Frame,
    area: Rect,
    name: &str,
    quantity: &str,
    name_focused: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_field(frame, chunks[0], "Item", name, name_focused);
    render_field(frame, chunks[1], "Quantity", quantity, !name_focused);
}
