//! Keyboard input.
//!
//! A dedicated thread blocks on terminal input and turns key presses into
//! Key events for the focused component. It never touches the tree: it reads
//! the focus through a [`FocusSnapshot`] and hands work to the pump through
//! the task queue.
//!
//! The interrupt combination (Ctrl+C by default) bypasses the queue and
//! terminates the process after restoring the terminal.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self as term, KeyEventKind, KeyModifiers};

use crate::component::ComponentId;
use crate::config::KeyBinding;
use crate::event::{Event, KeyCode, KeyInput, Lane, Modifiers, TaskQueue};
use crate::focus::FocusSnapshot;
use crate::renderer::terminal;
use crate::window::{Task, Ui};

/// How often the reader wakes to check for shutdown while no key arrives.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Message printed when the interrupt combination ends the process.
pub const INTERRUPT_MESSAGE: &str = "CONTROL-C  --  EXITING NOW";

// =============================================================================
// Key conversion
// =============================================================================

/// Convert a crossterm key event. Releases and unsupported keys yield `None`.
pub fn convert_key(event: &term::KeyEvent) -> Option<KeyInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let code = match event.code {
        term::KeyCode::Char(c) => KeyCode::Char(c),
        term::KeyCode::Enter => KeyCode::Enter,
        term::KeyCode::Tab => KeyCode::Tab,
        term::KeyCode::BackTab => KeyCode::BackTab,
        term::KeyCode::Backspace => KeyCode::Backspace,
        term::KeyCode::Delete => KeyCode::Delete,
        term::KeyCode::Insert => KeyCode::Insert,
        term::KeyCode::Esc => KeyCode::Escape,
        term::KeyCode::Up => KeyCode::Up,
        term::KeyCode::Down => KeyCode::Down,
        term::KeyCode::Left => KeyCode::Left,
        term::KeyCode::Right => KeyCode::Right,
        term::KeyCode::Home => KeyCode::Home,
        term::KeyCode::End => KeyCode::End,
        term::KeyCode::PageUp => KeyCode::PageUp,
        term::KeyCode::PageDown => KeyCode::PageDown,
        term::KeyCode::F(n) => KeyCode::F(n),
        term::KeyCode::Null => KeyCode::Null,
        _ => return None,
    };
    Some(KeyInput::with_modifiers(code, convert_modifiers(event.modifiers)))
}

fn convert_modifiers(modifiers: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if modifiers.contains(KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if modifiers.contains(KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        out |= Modifiers::CONTROL;
    }
    out
}

// =============================================================================
// Routing
// =============================================================================

/// What happened to one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRoute {
    /// The interrupt combination; the caller must terminate.
    Interrupt,
    /// Queued as a Key event for this component.
    Queued(ComponentId),
    /// Nothing was focused.
    Dropped,
}

/// Route one key press: interrupt check, then a Key event for the focused
/// component on the main lane.
pub fn route_key(
    key: KeyInput,
    interrupt: &KeyBinding,
    focus: &FocusSnapshot,
    queue: &TaskQueue<Task>,
) -> KeyRoute {
    if interrupt.matches(&key) {
        return KeyRoute::Interrupt;
    }
    match focus.get() {
        Some(target) => {
            queue.push(Lane::Main, Ui::event_task(Event::key(target, key)));
            KeyRoute::Queued(target)
        }
        None => {
            tracing::debug!(?key, "keystroke dropped, nothing focused");
            KeyRoute::Dropped
        }
    }
}

/// Restore the terminal and end the process.
pub fn interrupt_exit() -> ! {
    terminal::emergency_restore();
    let mut out = io::stdout();
    let _ = writeln!(out, "{INTERRUPT_MESSAGE}");
    let _ = out.flush();
    std::process::exit(0)
}

// =============================================================================
// Reader thread
// =============================================================================

/// The input reader thread.
pub struct InputReader {
    handle: Option<JoinHandle<()>>,
    running: Arc<AtomicBool>,
}

impl InputReader {
    /// Spawn the reader. It runs until [`Self::stop`] or until input fails.
    pub fn spawn(
        queue: TaskQueue<Task>,
        focus: FocusSnapshot,
        interrupt: KeyBinding,
    ) -> io::Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let handle = thread::Builder::new()
            .name("console-ui-input".to_string())
            .spawn(move || Self::read_loop(&flag, &queue, &focus, &interrupt))?;
        Ok(Self {
            handle: Some(handle),
            running,
        })
    }

    fn read_loop(
        running: &AtomicBool,
        queue: &TaskQueue<Task>,
        focus: &FocusSnapshot,
        interrupt: &KeyBinding,
    ) {
        while running.load(Ordering::SeqCst) {
            match term::poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    tracing::error!(error = %e, "input poll failed, reader stopping");
                    break;
                }
            }
            let key = match term::read() {
                Ok(term::Event::Key(event)) => convert_key(&event),
                Ok(_) => None,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => None,
                Err(e) => {
                    tracing::error!(error = %e, "input read failed, reader stopping");
                    break;
                }
            };
            if let Some(key) = key {
                if route_key(key, interrupt, focus, queue) == KeyRoute::Interrupt {
                    interrupt_exit();
                }
            }
        }
        running.store(false, Ordering::SeqCst);
    }

    /// Ask the reader to stop and wait for it.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("input reader panicked");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.stop();
    }
}
