//! Reference widgets.
//!
//! Small components built only on the [`Component`](crate::component::Component)
//! contract: a background-filling container, a one-line label and a
//! focusable button.

mod button;
mod label;
mod panel;

pub use button::Button;
pub use label::{Align, Label};
pub use panel::Panel;
