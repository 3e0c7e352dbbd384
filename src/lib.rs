//! # console-ui
//!
//! Character-cell terminal UI toolkit.
//!
//! ## Architecture
//!
//! Widgets form a tree rooted at the window. Geometry flows top-down: each
//! component's layout manager (border, grid or stack) assigns its children
//! rectangles from their preferred sizes. Painting walks the tree into a
//! drawing buffer through a clipped, translatable [`Surface`], and the
//! [`DiffRenderer`] emits only the cells that changed since the last frame.
//!
//! ```text
//! tasks → Ui (tree, focus) → validate → paint → FrameBuffer → diff → terminal
//! ```
//!
//! All UI state is owned by the pump thread. Other threads submit work
//! through a three-lane task queue (immediate, main, deferred) via a
//! [`WindowHandle`]. Key presses are read on their own thread and become Key
//! events for the focused component; unconsumed events bubble one ancestor
//! per queue turn. Arrow keys move focus between visually adjacent
//! interactive components.
//!
//! ## Modules
//!
//! - [`types`] - Geometry, colors and cells
//! - [`layout`] - Border, grid and stack layout managers
//! - [`component`] - Component contract and the tree arena
//! - [`renderer`] - Frame buffers, drawing surface, diff output
//! - [`event`] - Events, listeners and the task queue
//! - [`focus`] - Focus state and directional navigation
//! - [`input`] - Key conversion and the input reader thread
//! - [`window`] - Pump-owned UI state and the running window
//! - [`widgets`] - Panel, Label and Button

pub mod component;
pub mod config;
pub mod error;
pub mod event;
pub mod focus;
pub mod input;
pub mod layout;
pub mod renderer;
pub mod types;
pub mod widgets;
pub mod window;

pub use types::*;

pub use component::{Component, ComponentId, PaintContext, Tree};
pub use config::{KeyBinding, WindowConfig};
pub use error::{Error, Result};
pub use event::{
    Event, EventKind, EventVariant, FocusChange, KeyCode, KeyInput, Lane, ListenerId, Modifiers,
    TaskQueue,
};
pub use focus::{FocusSnapshot, FocusState};
pub use layout::{BorderLayout, Constraint, GridLayout, LayoutManager, Slot, StackLayout};
pub use renderer::{DiffRenderer, FrameBuffer, Surface};
pub use widgets::{Align, Button, Label, Panel};
pub use window::{Task, Ui, Window, WindowHandle};
