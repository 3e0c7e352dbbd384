//! The window: root of the component tree and owner of the pump.
//!
//! [`Ui`] is everything the pump thread owns: the tree, focus, both render
//! buffers and the output. Listener callbacks and queued tasks receive
//! `&mut Ui`, so code already running on the pump calls it directly.
//!
//! [`Window`] starts the two long-lived threads:
//!
//! - **pump** (`console-ui-pump`): once per wake interval, checks the terminal
//!   size and drains the task queue
//! - **input** (`console-ui-input`): blocks on key input and queues Key events
//!   for the focused component
//!
//! Other threads talk to the pump through a [`WindowHandle`], which only ever
//! enqueues.

use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossterm::{queue, terminal as term};

use crate::component::{Component, ComponentId, PaintDefaults, Tree};
use crate::config::WindowConfig;
use crate::error::{Error, Result};
use crate::event::{Event, EventVariant, FocusChange, Lane, ListenerId, TaskQueue};
use crate::focus::{FocusSnapshot, FocusState, FocusTransition};
use crate::input::InputReader;
use crate::layout::Constraint;
use crate::renderer::{terminal, DiffRenderer, FrameBuffer, Surface, TerminalSetup};
use crate::types::{Direction, Size};

/// A unit of work for the pump.
pub type Task = Box<dyn FnOnce(&mut Ui) + Send>;

/// Root component of every tree. Paints nothing itself; the frame is
/// cleared to the window background before each paint pass.
#[derive(Debug, Default)]
pub struct WindowRoot;

impl Component for WindowRoot {}

// =============================================================================
// Ui
// =============================================================================

/// Pump-owned UI state.
pub struct Ui {
    tree: Tree,
    focus: FocusState,
    queue: TaskQueue<Task>,
    drawing: FrameBuffer,
    renderer: DiffRenderer,
    out: Box<dyn Write + Send>,
    config: WindowConfig,
    open: Arc<AtomicBool>,
    paint_queued: Arc<AtomicBool>,
}

fn buffer_extent(size: Size) -> (u16, u16) {
    let clamp = |v: i32| v.clamp(0, u16::MAX as i32) as u16;
    (clamp(size.width), clamp(size.height))
}

impl Ui {
    /// UI state for a screen of `size`, writing frames to `out`.
    ///
    /// Nothing is spawned; tasks run when [`Self::run_pending`] is called.
    pub fn new(size: Size, config: WindowConfig, out: Box<dyn Write + Send>) -> Self {
        let (width, height) = buffer_extent(size);
        let mut ui = Self {
            tree: Tree::new(WindowRoot, size),
            focus: FocusState::new(),
            queue: TaskQueue::new(),
            drawing: FrameBuffer::new(width, height, config.foreground, config.background),
            renderer: DiffRenderer::new(width, height, config.foreground, config.background),
            out,
            config,
            open: Arc::new(AtomicBool::new(true)),
            paint_queued: Arc::new(AtomicBool::new(false)),
        };
        let root = ui.tree.root();
        if let Some(listeners) = ui.tree.listeners_mut(root) {
            listeners.add(EventVariant::Key, Box::new(navigation_listener));
        }
        ui
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// The window component.
    pub fn root(&self) -> ComponentId {
        self.tree.root()
    }

    pub fn size(&self) -> Size {
        self.tree.root_size()
    }

    /// Another handle to the task queue.
    pub fn queue(&self) -> TaskQueue<Task> {
        self.queue.clone()
    }

    /// A handle listeners can pass to worker threads.
    pub fn handle(&self) -> WindowHandle {
        WindowHandle {
            queue: self.queue.clone(),
            open: Arc::clone(&self.open),
            paint_queued: Arc::clone(&self.paint_queued),
        }
    }

    /// Insert `widget` and attach it to `parent`.
    pub fn add<C: Component>(&mut self, parent: ComponentId, widget: C, constraint: Constraint) -> Result<ComponentId> {
        let id = self.tree.insert(widget);
        if let Err(e) = self.tree.attach(parent, id, constraint) {
            self.tree.destroy(id)?;
            return Err(e);
        }
        Ok(id)
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    fn listen(
        &mut self,
        id: ComponentId,
        variant: EventVariant,
        listener: impl FnMut(&mut Ui, &mut Event) + Send + 'static,
    ) -> Result<ListenerId> {
        let listeners = self
            .tree
            .listeners_mut(id)
            .ok_or_else(|| Error::invalid(format!("stale component handle {id:?}")))?;
        Ok(listeners.add(variant, Box::new(listener)))
    }

    pub fn on_action(
        &mut self,
        id: ComponentId,
        listener: impl FnMut(&mut Ui, &mut Event) + Send + 'static,
    ) -> Result<ListenerId> {
        self.listen(id, EventVariant::Action, listener)
    }

    pub fn on_focus(
        &mut self,
        id: ComponentId,
        listener: impl FnMut(&mut Ui, &mut Event) + Send + 'static,
    ) -> Result<ListenerId> {
        self.listen(id, EventVariant::Focus, listener)
    }

    pub fn on_key(
        &mut self,
        id: ComponentId,
        listener: impl FnMut(&mut Ui, &mut Event) + Send + 'static,
    ) -> Result<ListenerId> {
        self.listen(id, EventVariant::Key, listener)
    }

    pub fn remove_listener(&mut self, id: ComponentId, listener: ListenerId) -> bool {
        self.tree
            .listeners_mut(id)
            .is_some_and(|l| l.remove(listener))
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Queue `event` for its source. Unconsumed, it then bubbles to one
    /// ancestor per queue turn, up to and including the window.
    pub fn enqueue_event(&mut self, event: Event) {
        self.queue.push(Lane::Main, Self::event_task(event));
    }

    pub(crate) fn event_task(event: Event) -> Task {
        Box::new(move |ui: &mut Ui| ui.deliver(event))
    }

    fn deliver(&mut self, mut event: Event) {
        let current = event.current();
        if !self.tree.contains(current) {
            tracing::debug!(?current, "event target is gone, dropping event");
            return;
        }
        self.dispatch(current, &mut event);
        if event.is_consumed() || current == self.tree.root() {
            return;
        }
        if let Some(parent) = self.tree.parent(current) {
            event.set_current(parent);
            self.enqueue_event(event);
        }
    }

    /// Run `target`'s listeners for the event's variant, in registration
    /// order. No bubbling.
    pub fn dispatch(&mut self, target: ComponentId, event: &mut Event) {
        let variant = event.variant();
        let Some(listeners) = self.tree.listeners_mut(target) else {
            return;
        };
        let mut taken = listeners.take(variant);
        for (_, listener) in taken.iter_mut() {
            listener(self, event);
        }
        if let Some(listeners) = self.tree.listeners_mut(target) {
            listeners.restore(variant, taken);
        }
    }

    // =========================================================================
    // Scheduling
    // =========================================================================

    /// Run `f` now. Code holding `&mut Ui` is already on the pump.
    pub fn invoke(&mut self, f: impl FnOnce(&mut Ui)) {
        f(self)
    }

    /// Run `f` once the immediate and main lanes are empty.
    pub fn invoke_later(&mut self, f: impl FnOnce(&mut Ui) + Send + 'static) {
        self.queue.push(Lane::Deferred, Box::new(f));
    }

    /// Queue a repaint behind all pending non-deferred work. Requests made
    /// before that pass runs share it.
    pub fn paint_later(&mut self) {
        schedule_paint(&self.queue, &self.paint_queued);
    }

    /// Pop and run one task. Returns false when the queue was empty.
    pub fn run_one(&mut self) -> bool {
        let Some(task) = self.queue.pop() else {
            return false;
        };
        if self.config.isolate_task_panics {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| task(self))) {
                tracing::error!(panic = panic_message(payload.as_ref()), "task panicked");
            }
        } else {
            task(self);
        }
        true
    }

    /// Drain the queue, including work queued while draining. Returns the
    /// number of tasks run.
    pub fn run_pending(&mut self) -> usize {
        let mut count = 0;
        while self.run_one() {
            count += 1;
        }
        count
    }

    // =========================================================================
    // Focus
    // =========================================================================

    pub fn focused(&self) -> Option<ComponentId> {
        self.focus.focused()
    }

    pub fn focus_snapshot(&self) -> FocusSnapshot {
        self.focus.snapshot()
    }

    /// Focus `id`. Fails for components outside the window or that are not
    /// interactive.
    pub fn set_focus(&mut self, id: ComponentId) -> Result<()> {
        let transition = self.focus.assign(&self.tree, id)?;
        self.announce(transition);
        Ok(())
    }

    /// Focus the first interactive component in pre-order.
    pub fn focus_first(&mut self) -> Option<ComponentId> {
        let first = FocusState::first_interactive(&self.tree)?;
        let transition = self.focus.assign(&self.tree, first).ok()?;
        self.announce(transition);
        Some(first)
    }

    /// Move focus one step. Returns true if it moved.
    pub fn move_focus(&mut self, direction: Direction) -> bool {
        self.focus.prune(&self.tree);
        let transition = self.focus.navigate(&self.tree, direction);
        let moved = transition.is_some();
        self.announce(transition);
        moved
    }

    pub fn focus_up(&mut self) -> bool {
        self.move_focus(Direction::Up)
    }

    pub fn focus_down(&mut self) -> bool {
        self.move_focus(Direction::Down)
    }

    pub fn focus_left(&mut self) -> bool {
        self.move_focus(Direction::Left)
    }

    pub fn focus_right(&mut self) -> bool {
        self.move_focus(Direction::Right)
    }

    fn announce(&mut self, transition: Option<FocusTransition>) {
        let Some(FocusTransition { lost, gained }) = transition else {
            return;
        };
        if let Some(lost) = lost {
            self.enqueue_event(Event::focus(lost, FocusChange::Lost));
        }
        self.enqueue_event(Event::focus(gained, FocusChange::Gained));
        self.paint_later();
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Validate if needed, paint the tree and flush the difference.
    ///
    /// Returns the number of cells written to the output.
    pub fn paint(&mut self) -> Result<usize> {
        self.focus.prune(&self.tree);
        if self.tree.is_dirty() {
            self.tree.validate_tree();
        }
        let root = self.tree.root();
        let defaults = PaintDefaults {
            foreground: self.config.foreground,
            background: self.config.background,
            focused: self.focus.focused(),
        };
        let background = self.tree.background(root).or(self.config.background);
        self.drawing.clear(self.config.foreground, background);
        self.drawing.set_active_fg(self.config.foreground);
        self.drawing.set_active_bg(background);
        {
            let mut surface = Surface::new(&mut self.drawing);
            self.tree.paint(root, &mut surface, &defaults)?;
        }
        let written = self.renderer.flush(&self.drawing, &mut self.out)?;
        Ok(written)
    }

    /// Last frame flushed to the output.
    pub fn screen(&self) -> &FrameBuffer {
        self.renderer.current()
    }

    /// Rebuild buffers for a new screen size and repaint everything.
    pub fn resize(&mut self, size: Size) {
        tracing::debug!(width = size.width, height = size.height, "resized");
        let (width, height) = buffer_extent(size);
        let (fg, bg) = (self.config.foreground, self.config.background);
        self.drawing = FrameBuffer::new(width, height, fg, bg);
        self.renderer.resize(width, height, fg, bg);
        self.tree.set_root_size(size);
        // A zero-height terminal can refuse the clear; the next wake retries.
        if let Err(e) = queue!(self.out, term::Clear(term::ClearType::All)) {
            tracing::debug!(error = %e, "screen clear failed during resize");
        }
        if let Err(e) = self.paint() {
            tracing::debug!(error = %e, "repaint after resize failed");
        }
    }

    /// Force the next flush to rewrite every cell.
    pub fn invalidate_screen(&mut self) {
        self.renderer.invalidate();
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Ask the pump to stop after the current drain.
    pub fn close(&mut self) {
        self.open.store(false, Ordering::SeqCst);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for Ui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ui")
            .field("tree", &self.tree)
            .field("focused", &self.focus.focused())
            .field("pending", &self.queue.pending())
            .finish()
    }
}

fn schedule_paint(queue: &TaskQueue<Task>, queued: &AtomicBool) {
    if !queued.swap(true, Ordering::SeqCst) {
        queue.push(Lane::Deferred, Box::new(paint_task));
    }
}

fn paint_task(ui: &mut Ui) {
    ui.paint_queued.store(false, Ordering::SeqCst);
    if let Err(e) = ui.paint() {
        tracing::error!(error = %e, "paint failed");
    }
}

/// Built-in window key listener: arrows move focus, Enter/Space activate.
fn navigation_listener(ui: &mut Ui, event: &mut Event) {
    let Some(key) = event.key_input() else {
        return;
    };
    if let Some(direction) = key.direction() {
        ui.move_focus(direction);
    } else if key.is_activation() {
        if let Some(focused) = ui.focused() {
            ui.enqueue_event(Event::action(focused));
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

// =============================================================================
// WindowHandle
// =============================================================================

/// Thread-safe access to a running window. Every call enqueues.
#[derive(Clone)]
pub struct WindowHandle {
    queue: TaskQueue<Task>,
    open: Arc<AtomicBool>,
    paint_queued: Arc<AtomicBool>,
}

impl WindowHandle {
    /// Run `f` on the pump soon (immediate lane).
    pub fn invoke(&self, f: impl FnOnce(&mut Ui) + Send + 'static) {
        self.queue.push(Lane::Immediate, Box::new(f));
    }

    /// Run `f` on the pump once no immediate or main work is pending.
    pub fn invoke_later(&self, f: impl FnOnce(&mut Ui) + Send + 'static) {
        self.queue.push(Lane::Deferred, Box::new(f));
    }

    pub fn paint(&self) {
        self.queue.push(Lane::Immediate, Box::new(paint_task));
    }

    pub fn paint_later(&self) {
        schedule_paint(&self.queue, &self.paint_queued);
    }

    /// Focus `id`; invalid targets are logged and ignored.
    pub fn set_focus(&self, id: ComponentId) {
        self.invoke(move |ui| {
            if let Err(e) = ui.set_focus(id) {
                tracing::warn!(error = %e, "focus request rejected");
            }
        });
    }

    /// Stop the pump after its current drain.
    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for WindowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowHandle")
            .field("open", &self.is_open())
            .field("pending", &self.queue.pending())
            .finish()
    }
}

// =============================================================================
// Window
// =============================================================================

static OPENED: AtomicBool = AtomicBool::new(false);

/// The running terminal window.
pub struct Window {
    handle: WindowHandle,
    pump: Option<JoinHandle<()>>,
}

impl Window {
    /// Take over the terminal, build the tree and start the pump and input
    /// threads.
    ///
    /// `build` runs before the threads start; the first interactive
    /// component gets focus afterwards. Fails with
    /// [`Error::AlreadyInitialized`] on a second call in the same process.
    pub fn open<F>(config: WindowConfig, build: F) -> Result<Self>
    where
        F: FnOnce(&mut Ui) -> Result<()>,
    {
        if OPENED.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyInitialized);
        }

        let mut setup = TerminalSetup::new();
        setup.enter(config.alternate_screen)?;
        let (width, height) = terminal::size()?;

        let mut ui = Ui::new(
            Size::new(width as i32, height as i32),
            config.clone(),
            Box::new(std::io::stdout()),
        );
        build(&mut ui)?;
        ui.focus_first();
        ui.invalidate_screen();
        ui.paint_later();

        let handle = ui.handle();
        let reader = InputReader::spawn(ui.queue(), ui.focus_snapshot(), config.interrupt)?;

        let pump = thread::Builder::new()
            .name("console-ui-pump".to_string())
            .spawn(move || run_pump(ui, reader, setup))?;

        tracing::debug!(width, height, "window opened");
        Ok(Self {
            handle,
            pump: Some(pump),
        })
    }

    pub fn handle(&self) -> WindowHandle {
        self.handle.clone()
    }

    /// Wait for the pump to finish (after [`WindowHandle::close`]).
    ///
    /// A panic on the pump is resumed on the caller.
    pub fn join(mut self) -> Result<()> {
        self.wait();
        Ok(())
    }

    fn wait(&mut self) {
        if let Some(pump) = self.pump.take() {
            if let Err(payload) = pump.join() {
                panic::resume_unwind(payload);
            }
        }
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if self.pump.is_some() {
            self.handle.close();
            if let Some(pump) = self.pump.take() {
                let _ = pump.join();
            }
        }
    }
}

/// Pump loop: resize check, drain, sleep. Owns the terminal guard so the
/// terminal is restored however the loop ends.
fn run_pump(mut ui: Ui, mut reader: InputReader, mut setup: TerminalSetup) {
    let wake = ui.config.wake_interval;
    while ui.is_open() {
        match terminal::size() {
            Ok((width, height)) => {
                let size = Size::new(width as i32, height as i32);
                if size != ui.size() {
                    ui.resize(size);
                }
            }
            Err(e) => tracing::debug!(error = %e, "terminal size unavailable"),
        }
        ui.run_pending();
        thread::sleep(wake);
    }
    reader.stop();
    if let Err(e) = setup.exit() {
        tracing::warn!(error = %e, "failed to restore terminal");
    }
    tracing::debug!("pump stopped");
}
