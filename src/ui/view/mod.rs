//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{App, AppMode, ConfirmAction, InputField};
use crate::models::Item;
use crate::store::Snapshot;
use components::{render_dialog_framework, render_item_form};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(8),    // 清单
            Constraint::Length(4), // 详情
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    let snapshot = app.store.snapshot();

    render_title(frame, &snapshot, chunks[0]);
    render_list(frame, app, &snapshot, chunks[1]);
    render_details(frame, app, chunks[2]);
    render_help(frame, app, chunks[3]);

    // 渲染弹窗
    if snapshot.dialog_open {
        render_add_dialog(frame, app, &snapshot);
    }
    match &app.mode {
        AppMode::EditingItem(_) => render_edit_dialog(frame, app),
        AppMode::Confirm(action) => render_confirm_dialog(frame, app, action),
        AppMode::AddingItem | AppMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let total: u64 = snapshot
        .items
        .iter()
        .map(|item| u64::from(item.quantity))
        .sum();
    let title = Paragraph::new(format!(
        "🛒 Shopping List  ({} items, {} total)",
        snapshot.items.len(),
        total
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn item_line(item: &Item, selected: bool) -> Line<'static> {
    let marker = if item.is_editing { "✎ " } else { "  " };
    let content = format!(
        "{}Name: {:<24} Quantity: {}",
        marker, item.name, item.quantity
    );

    let style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else if item.is_editing {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default().fg(Color::Green)
    };

    Line::from(vec![Span::styled(content, style)])
}

fn render_list(frame: &mut Frame, app: &App, snapshot: &Snapshot, area: Rect) {
    let items: Vec<ListItem> = snapshot
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| ListItem::new(item_line(item, i == app.selected_index)))
        .collect();

    let list_widget = List::new(items)
        .block(Block::default().title("Items").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if !snapshot.items.is_empty() {
        state.select(Some(app.selected_index));
    }

    frame.render_stateful_widget(list_widget, area, &mut state);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.selected_item() {
        Some(item) => format!(
            "#{}  {}  ×{}{}",
            item.id,
            item.name,
            item.quantity,
            if item.is_editing { "  (editing)" } else { "" }
        ),
        None => "The list is empty, press 'a' to add the first item".to_string(),
    };

    let details = Paragraph::new(content)
        .block(Block::default().title("Details").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(details, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.mode {
        AppMode::Normal => "[a] add  [e] edit  [d] delete  [j/k] move  [q] quit",
        AppMode::AddingItem | AppMode::EditingItem(_) => match app.input_field {
            InputField::Name => "[Enter/Tab] next field  [Esc] cancel",
            InputField::Quantity => "[Enter] save  [Tab] previous field  [Esc] cancel",
        },
        AppMode::Confirm(_) => "[y] confirm  [n] cancel",
    };

    let text = match app.message.as_deref() {
        Some(message) if !message.is_empty() => format!("{}  |  {}", help_text, message),
        _ => help_text.to_string(),
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_add_dialog(frame: &mut Frame, app: &App, snapshot: &Snapshot) {
    let area = centered_rect(60, 40, frame.area());
    let hint = match app.input_field {
        InputField::Name => "Type a name, then press Enter",
        InputField::Quantity => "Type a quantity, then press Enter to add",
    };
    let body = render_dialog_framework(frame, area, "Add Shopping Item", hint);

    render_item_form(
        frame,
        body,
        &snapshot.draft_name,
        &snapshot.draft_quantity,
        app.input_field == InputField::Name,
    );
}

fn render_edit_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 40, frame.area());
    let body = render_dialog_framework(
        frame,
        area,
        "Edit Item",
        "Invalid quantities are saved as 1",
    );

    render_item_form(
        frame,
        body,
        &app.edit_name,
        &app.edit_quantity,
        app.input_field == InputField::Name,
    );
}

fn render_confirm_dialog(frame: &mut Frame, app: &App, action: &ConfirmAction) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);

    let message = match action {
        ConfirmAction::Delete(id) => match app.store.get(*id) {
            Some(item) => format!("Delete '{}' from the list?", item.name),
            None => "Delete this item?".to_string(),
        },
    };

    let dialog = Paragraph::new(format!("{}\n\n[y] confirm  [n] cancel", message))
        .style(Style::default().fg(Color::Red))
        .block(Block::default().title("⚠️ Confirm").borders(Borders::ALL));

    frame.render_widget(dialog, area);
}
