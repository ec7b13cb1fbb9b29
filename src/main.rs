mod config;
mod logging;
mod models;
mod store;
mod terminal;
mod ui;

use std::io;

use anyhow::Context;
use ratatui::prelude::*;
use tracing::info;

use crate::config::Config;
use crate::logging::init_tracing;
use crate::terminal::setup_terminal;
use crate::ui::{App, render};

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    init_tracing(&config.log);
    info!(?config, "starting shoplist");

    // 创建应用状态（仅保存在内存中）
    let mut app = App::new(&config.list);

    // 设置终端，guard 析构时恢复
    let (mut terminal, guard) = setup_terminal().context("setting up terminal")?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    drop(guard);

    info!(items = app.store.len(), "session ended");
    result.context("running event loop")
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
            if key.kind == crossterm::event::KeyEventKind::Press && ui::handle_key_event(app, key.code)
            {
                break;
            }
        }
    }
    Ok(())
}
