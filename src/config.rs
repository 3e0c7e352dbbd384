//! Window configuration.

use std::time::Duration;

use crate::event::{KeyCode, KeyInput, Modifiers};
use crate::types::Color;

/// A key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyBinding {
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// Ctrl+C.
    pub const fn ctrl_c() -> Self {
        Self::new(KeyCode::Char('c'), Modifiers::CONTROL)
    }

    /// True when `key` is this combination. Character keys match case-insensitively
    /// since terminals report Ctrl+Shift+C and Ctrl+C differently.
    pub fn matches(&self, key: &KeyInput) -> bool {
        if !key.modifiers.contains(self.modifiers) {
            return false;
        }
        match (self.code, key.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        }
    }
}

/// Settings for [`crate::window::Window`].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    /// Render pump period: resize check + queue drain once per wake.
    pub wake_interval: Duration,
    /// Renderer default foreground for components that inherit.
    pub foreground: Color,
    /// Renderer default background for components that inherit.
    pub background: Color,
    /// Reserved combination that terminates the process without touching the queue.
    pub interrupt: KeyBinding,
    /// Catch panics raised by queued tasks, log them, keep the pump alive.
    pub isolate_task_panics: bool,
    /// Render into the alternate screen buffer.
    pub alternate_screen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            wake_interval: Duration::from_millis(100),
            foreground: Color::White,
            background: Color::Black,
            interrupt: KeyBinding::ctrl_c(),
            isolate_task_panics: false,
            alternate_screen: true,
        }
    }
}

impl WindowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wake_interval(mut self, interval: Duration) -> Self {
        self.wake_interval = interval;
        self
    }

    pub fn with_colors(mut self, foreground: Color, background: Color) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    pub fn with_interrupt(mut self, binding: KeyBinding) -> Self {
        self.interrupt = binding;
        self
    }

    pub fn with_task_isolation(mut self, isolate: bool) -> Self {
        self.isolate_task_panics = isolate;
        self
    }

    pub fn with_alternate_screen(mut self, enabled: bool) -> Self {
        self.alternate_screen = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WindowConfig::default();
        assert_eq!(config.wake_interval, Duration::from_millis(100));
        assert_eq!(config.background, Color::Black);
        assert_eq!(config.foreground, Color::White);
        assert!(!config.isolate_task_panics);
    }

    #[test]
    fn test_ctrl_c_matching() {
        let binding = KeyBinding::ctrl_c();
        assert!(binding.matches(&KeyInput::with_modifiers(KeyCode::Char('c'), Modifiers::CONTROL)));
        assert!(binding.matches(&KeyInput::with_modifiers(
            KeyCode::Char('C'),
            Modifiers::CONTROL | Modifiers::SHIFT
        )));
        assert!(!binding.matches(&KeyInput::new(KeyCode::Char('c'))));
        assert!(!binding.matches(&KeyInput::with_modifiers(KeyCode::Char('v'), Modifiers::CONTROL)));
    }

    #[test]
    fn test_builder() {
        let config = WindowConfig::new()
            .with_wake_interval(Duration::from_millis(16))
            .with_colors(Color::Yellow, Color::Blue)
            .with_task_isolation(true);
        assert_eq!(config.wake_interval, Duration::from_millis(16));
        assert_eq!(config.foreground, Color::Yellow);
        assert_eq!(config.background, Color::Blue);
        assert!(config.isolate_task_panics);
    }
}
