//! 终端设置与恢复
//!
//! 开启 raw mode 后立即持有 TerminalGuard，之后任何一步失败（或 panic 展开）
//! 都会在 guard 析构时恢复终端。

use std::io::{self, Stdout};

use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub struct TerminalGuard {
    restore: fn(),
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show);
}

fn enter_screen() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// 开启 raw mode 后再执行其余设置，失败时 guard 随错误一起析构
fn setup_with<T>(
    enable: impl FnOnce() -> io::Result<()>,
    restore: fn(),
    rest: impl FnOnce() -> io::Result<T>,
) -> io::Result<(T, TerminalGuard)> {
    enable()?;
    let guard = TerminalGuard { restore };
    let value = rest()?;
    Ok((value, guard))
}

/// 进入 raw mode 与备用屏幕，返回终端及其恢复 guard
pub fn setup_terminal() -> io::Result<(Terminal<CrosstermBackend<Stdout>>, TerminalGuard)> {
    setup_with(enable_raw_mode, restore_terminal, enter_screen)
}
