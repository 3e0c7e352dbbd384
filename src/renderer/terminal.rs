//! Terminal setup and teardown.
//!
//! Handles entering/exiting raw mode, the alternate screen and cursor
//! visibility. The guard restores the terminal when dropped so a panic on the
//! owning thread still leaves a usable shell behind.

use std::io::{self, Write};

use crossterm::{cursor, execute, terminal};

/// Terminal setup/teardown handle.
#[derive(Debug, Default)]
pub struct TerminalSetup {
    is_raw: bool,
    alternate_screen: bool,
}

impl TerminalSetup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter raw mode, optionally switch to the alternate screen, hide the
    /// cursor and clear.
    pub fn enter(&mut self, alternate_screen: bool) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.is_raw = true;

        let mut out = io::stdout();
        if alternate_screen {
            execute!(out, terminal::EnterAlternateScreen)?;
            self.alternate_screen = true;
        }
        execute!(
            out,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        tracing::debug!(alternate_screen, "terminal entered");
        Ok(())
    }

    /// Undo everything [`Self::enter`] did. Safe to call twice.
    pub fn exit(&mut self) -> io::Result<()> {
        if !self.is_raw && !self.alternate_screen {
            return Ok(());
        }
        let mut out = io::stdout();
        execute!(out, crossterm::style::ResetColor, cursor::Show)?;
        if self.alternate_screen {
            execute!(out, terminal::LeaveAlternateScreen)?;
            self.alternate_screen = false;
        }
        if self.is_raw {
            terminal::disable_raw_mode()?;
            self.is_raw = false;
        }
        out.flush()?;
        tracing::debug!("terminal restored");
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.is_raw
    }
}

impl Drop for TerminalSetup {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            tracing::warn!(error = %e, "failed to restore terminal");
        }
    }
}

/// Best-effort restore for paths that never return (process exit).
pub fn emergency_restore() {
    let mut out = io::stdout();
    let _ = execute!(
        out,
        crossterm::style::ResetColor,
        cursor::Show,
        terminal::LeaveAlternateScreen
    );
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}

/// Terminal size in cells (columns, rows).
pub fn size() -> io::Result<(u16, u16)> {
    terminal::size()
}
