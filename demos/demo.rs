//! Demo - buttons in a grid, a status line and focus navigation
//!
//! Arrow keys move focus, Enter or Space presses the focused button,
//! Ctrl+C exits immediately. Logs go to `console-ui-demo.log`; set
//! `RUST_LOG=console_ui=debug` for more detail.
//!
//! Run with: cargo run --example demo

use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use console_ui::{
    Align, Button, Color, ComponentId, Constraint, FocusChange, Label, LayoutManager, Panel, Slot,
    Ui, Window, WindowConfig,
};

fn set_status(ui: &mut Ui, status: ComponentId, text: String) {
    if let Some(label) = ui.tree_mut().widget_mut::<Label>(status) {
        label.set_text(text);
    }
    ui.paint_later();
}

fn build(ui: &mut Ui) -> console_ui::Result<()> {
    let root = ui.root();

    let title = ui.add(root, Label::new("console-ui demo").aligned(Align::Center), Slot::Top.into())?;
    ui.tree_mut().set_foreground(title, Color::Cyan)?;

    let status = ui.add(root, Label::new("ready"), Slot::Bottom.into())?;
    ui.tree_mut().set_background(status, Color::Blue)?;

    let board = ui.add(root, Panel::with_layout(LayoutManager::grid(2, 2)?), Slot::Center.into())?;
    ui.tree_mut().set_background(board, Color::Black)?;

    for (n, caption) in ["One", "Two", "Three"].into_iter().enumerate() {
        let button = ui.add(board, Button::new(caption), Constraint::None)?;
        ui.on_action(button, move |ui, event| {
            set_status(ui, status, format!("pressed button {} ({caption})", n + 1));
            event.consume();
        })?;
        ui.on_focus(button, move |ui, event| {
            if event.focus_change() == Some(FocusChange::Gained) {
                set_status(ui, status, format!("focus on {caption}"));
            }
        })?;
    }

    let quit = ui.add(board, Button::new("Quit"), Constraint::None)?;
    ui.tree_mut().set_foreground(quit, Color::Pink)?;
    ui.on_action(quit, |ui, event| {
        tracing::info!("quit pressed");
        ui.close();
        event.consume();
    })?;
    Ok(())
}

fn main() -> console_ui::Result<()> {
    let file = tracing_appender::rolling::never(".", "console-ui-demo.log");
    let (writer, _guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = WindowConfig::new()
        .with_wake_interval(Duration::from_millis(50))
        .with_task_isolation(true);
    let window = Window::open(config, build)?;
    window.join()
}
