//! Component arena.
//!
//! Nodes live in a flat `Vec` indexed by [`ComponentId`]; freed slots are
//! reused with a bumped generation. Forward ownership runs through layout
//! managers (a node's layout lists its children); the back-reference to the
//! parent is a plain id, so teardown is just freeing slots.

use super::{Component, ComponentId, PaintContext};
use crate::error::{Error, Result};
use crate::event::Listeners;
use crate::layout::{Constraint, LayoutManager};
use crate::renderer::Surface;
use crate::types::{Color, ColorChoice, Point, Rect, Size};

struct Node {
    widget: Box<dyn Component>,
    layout: Option<LayoutManager>,
    parent: Option<ComponentId>,
    foreground: ColorChoice,
    background: ColorChoice,
    listeners: Listeners,
}

struct Entry {
    generation: u32,
    node: Option<Node>,
}

/// Renderer defaults and focus, shared by one paint pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintDefaults {
    pub foreground: Color,
    pub background: Color,
    pub focused: Option<ComponentId>,
}

/// The component tree, rooted at the window.
pub struct Tree {
    entries: Vec<Entry>,
    free: Vec<u32>,
    root: ComponentId,
    root_size: Size,
    dirty: bool,
}

fn stale(id: ComponentId) -> Error {
    Error::invalid(format!("stale component handle {id:?}"))
}

impl Tree {
    /// A tree holding only `root`, which is as large as `size`.
    pub fn new<C: Component>(root: C, size: Size) -> Self {
        let mut tree = Self {
            entries: Vec::new(),
            free: Vec::new(),
            root: ComponentId::new(0, 0),
            root_size: size,
            dirty: true,
        };
        tree.root = tree.insert(root);
        tree
    }

    pub fn root(&self) -> ComponentId {
        self.root
    }

    pub fn root_size(&self) -> Size {
        self.root_size
    }

    /// Resize the root; invalidates the whole tree when the size changes.
    pub fn set_root_size(&mut self, size: Size) {
        if size != self.root_size {
            self.root_size = size;
            self.invalidate(self.root);
        }
    }

    /// Number of live components, root included.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Node access
    // =========================================================================

    /// Add a detached component. It gets its default layout manager.
    pub fn insert<C: Component>(&mut self, widget: C) -> ComponentId {
        self.insert_boxed(Box::new(widget))
    }

    pub fn insert_boxed(&mut self, widget: Box<dyn Component>) -> ComponentId {
        let node = Node {
            layout: widget.default_layout(),
            widget,
            parent: None,
            foreground: ColorChoice::Inherit,
            background: ColorChoice::Inherit,
            listeners: Listeners::new(),
        };
        match self.free.pop() {
            Some(index) => {
                let entry = &mut self.entries[index as usize];
                entry.node = Some(node);
                ComponentId::new(index, entry.generation)
            }
            None => {
                let index = self.entries.len() as u32;
                self.entries.push(Entry {
                    generation: 0,
                    node: Some(node),
                });
                ComponentId::new(index, 0)
            }
        }
    }

    fn node(&self, id: ComponentId) -> Option<&Node> {
        self.entries
            .get(id.index())
            .filter(|e| e.generation == id.generation())
            .and_then(|e| e.node.as_ref())
    }

    fn node_mut(&mut self, id: ComponentId) -> Option<&mut Node> {
        self.entries
            .get_mut(id.index())
            .filter(|e| e.generation == id.generation())
            .and_then(|e| e.node.as_mut())
    }

    fn require(&self, id: ComponentId) -> Result<&Node> {
        self.node(id).ok_or_else(|| stale(id))
    }

    fn require_mut(&mut self, id: ComponentId) -> Result<&mut Node> {
        self.node_mut(id).ok_or_else(|| stale(id))
    }

    /// Whether `id` refers to a live component.
    pub fn contains(&self, id: ComponentId) -> bool {
        self.node(id).is_some()
    }

    /// Typed access to a widget.
    pub fn widget<T: Component>(&self, id: ComponentId) -> Option<&T> {
        (*self.node(id)?.widget).as_any().downcast_ref::<T>()
    }

    pub fn widget_mut<T: Component>(&mut self, id: ComponentId) -> Option<&mut T> {
        (*self.node_mut(id)?.widget).as_any_mut().downcast_mut::<T>()
    }

    pub fn is_interactive(&self, id: ComponentId) -> bool {
        self.node(id).is_some_and(|n| n.widget.is_interactive())
    }

    pub fn foreground(&self, id: ComponentId) -> ColorChoice {
        self.node(id).map(|n| n.foreground).unwrap_or_default()
    }

    pub fn background(&self, id: ComponentId) -> ColorChoice {
        self.node(id).map(|n| n.background).unwrap_or_default()
    }

    pub fn set_foreground(&mut self, id: ComponentId, color: impl Into<ColorChoice>) -> Result<()> {
        self.require_mut(id)?.foreground = color.into();
        Ok(())
    }

    pub fn set_background(&mut self, id: ComponentId, color: impl Into<ColorChoice>) -> Result<()> {
        self.require_mut(id)?.background = color.into();
        Ok(())
    }

    pub fn listeners(&self, id: ComponentId) -> Option<&Listeners> {
        self.node(id).map(|n| &n.listeners)
    }

    pub fn listeners_mut(&mut self, id: ComponentId) -> Option<&mut Listeners> {
        self.node_mut(id).map(|n| &mut n.listeners)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children in the layout's component order.
    pub fn children(&self, id: ComponentId) -> Vec<ComponentId> {
        self.layout(id).map(LayoutManager::components).unwrap_or_default()
    }

    pub fn layout(&self, id: ComponentId) -> Option<&LayoutManager> {
        self.node(id).and_then(|n| n.layout.as_ref())
    }

    /// Ancestors of `id`, nearest first. Excludes `id`.
    pub fn ancestors(&self, id: ComponentId) -> impl Iterator<Item = ComponentId> + '_ {
        std::iter::successors(self.parent(id), move |p| self.parent(*p))
    }

    pub fn is_ancestor(&self, ancestor: ComponentId, id: ComponentId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Whether `id` is the root or hangs below it.
    pub fn is_reachable(&self, id: ComponentId) -> bool {
        self.contains(id) && (id == self.root || self.is_ancestor(self.root, id))
    }

    /// `from` and every descendant, parents before children.
    pub fn preorder(&self, from: ComponentId) -> Vec<ComponentId> {
        let mut order = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if !self.contains(id) {
                continue;
            }
            order.push(id);
            stack.extend(self.children(id).into_iter().rev());
        }
        order
    }

    /// Put `child` into `parent`'s layout manager.
    ///
    /// A child attached elsewhere is moved. A component already sitting in
    /// the requested border slot or grid cell is displaced and left detached.
    pub fn attach(&mut self, parent: ComponentId, child: ComponentId, constraint: Constraint) -> Result<()> {
        self.require(child)?;
        let parent_node = self.require(parent)?;
        if child == self.root {
            return Err(Error::invalid("the window can not be added to a component"));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(Error::invalid("a component can not contain itself"));
        }
        let Some(layout) = parent_node.layout.as_ref() else {
            return Err(Error::invalid("the parent has no layout manager"));
        };
        layout.check(constraint)?;

        self.detach(child)?;
        let displaced = self
            .require_mut(parent)?
            .layout
            .as_mut()
            .ok_or_else(|| Error::invalid("the parent has no layout manager"))?
            .add(child, constraint)?;
        for old in displaced {
            if let Some(node) = self.node_mut(old) {
                node.parent = None;
            }
        }
        self.require_mut(child)?.parent = Some(parent);
        self.invalidate(parent);
        Ok(())
    }

    /// Take `child` out of its parent's layout. Returns false if it had none.
    pub fn detach(&mut self, child: ComponentId) -> Result<bool> {
        let Some(parent) = self.require(child)?.parent else {
            return Ok(false);
        };
        if let Some(layout) = self.node_mut(parent).and_then(|n| n.layout.as_mut()) {
            layout.remove(child);
        }
        self.require_mut(child)?.parent = None;
        self.invalidate(parent);
        Ok(true)
    }

    /// Detach `child` if `parent` holds it.
    pub fn remove(&mut self, parent: ComponentId, child: ComponentId) -> Result<bool> {
        if self.parent(child) != Some(parent) {
            return Ok(false);
        }
        self.detach(child)
    }

    /// Detach every child of `parent`, returning them.
    pub fn remove_all(&mut self, parent: ComponentId) -> Result<Vec<ComponentId>> {
        let removed = match self.require_mut(parent)?.layout.as_mut() {
            Some(layout) => layout.remove_all(),
            None => Vec::new(),
        };
        for child in &removed {
            if let Some(node) = self.node_mut(*child) {
                node.parent = None;
            }
        }
        self.invalidate(parent);
        Ok(removed)
    }

    /// Detach `id` and free it with its whole subtree.
    pub fn destroy(&mut self, id: ComponentId) -> Result<()> {
        if id == self.root {
            return Err(Error::invalid("the window can not be destroyed"));
        }
        self.detach(id)?;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            stack.extend(self.children(current));
            let entry = &mut self.entries[current.index()];
            entry.node = None;
            entry.generation = entry.generation.wrapping_add(1);
            self.free.push(current.index() as u32);
        }
        Ok(())
    }

    /// Replace the layout manager. Current children are detached first and
    /// the previous (now empty) layout is returned.
    pub fn set_layout(&mut self, id: ComponentId, layout: Option<LayoutManager>) -> Result<Option<LayoutManager>> {
        if layout.as_ref().is_some_and(|l| !l.is_empty()) {
            return Err(Error::invalid("a new layout manager must be empty"));
        }
        self.remove_all(id)?;
        let previous = std::mem::replace(&mut self.require_mut(id)?.layout, layout);
        self.invalidate(id);
        Ok(previous)
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Allocated size. Valid only after validation.
    pub fn size_of(&self, id: ComponentId) -> Size {
        if id == self.root {
            return self.root_size;
        }
        self.parent(id)
            .and_then(|p| self.layout(p))
            .map(|l| l.size_of(id))
            .unwrap_or(Size::ZERO)
    }

    /// Location relative to the parent. Valid only after validation.
    pub fn location_of(&self, id: ComponentId) -> Point {
        if id == self.root {
            return Point::ORIGIN;
        }
        self.parent(id)
            .and_then(|p| self.layout(p))
            .map(|l| l.location_of(id))
            .unwrap_or(Point::ORIGIN)
    }

    pub fn bounds_of(&self, id: ComponentId) -> Rect {
        Rect::from_parts(self.location_of(id), self.size_of(id))
    }

    /// Location relative to the window.
    pub fn location_in_window(&self, id: ComponentId) -> Point {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .fold(Point::ORIGIN, |acc, c| acc.offset(self.location_of(c)))
    }

    /// Intrinsic size, bottom-up.
    pub fn preferred_size(&self, id: ComponentId) -> Size {
        let Some(node) = self.node(id) else {
            return Size::ZERO;
        };
        let from_layout = node
            .layout
            .as_ref()
            .map(|l| l.preferred_size(&|c| self.preferred_size(c)))
            .unwrap_or(Size::ZERO);
        node.widget.preferred_size(from_layout)
    }

    /// Mark `id`'s layout and every layout below it stale.
    pub fn invalidate(&mut self, id: ComponentId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(layout) = self.node_mut(current).and_then(|n| n.layout.as_mut()) {
                layout.invalidate();
                stack.extend(layout.components());
            }
        }
        self.dirty = true;
    }

    /// Recompute geometry below `id`, top-down.
    pub fn validate(&mut self, id: ComponentId) {
        let area = self.size_of(id);
        let Some(node) = self.node_mut(id) else {
            return;
        };
        node.widget.validated(area);
        let Some(mut layout) = node.layout.take() else {
            return;
        };
        layout.validate(area, &|c| self.preferred_size(c));
        let children = layout.components();
        if let Some(node) = self.node_mut(id) {
            node.layout = Some(layout);
        }
        for child in children {
            self.validate(child);
        }
    }

    /// Validate from the root and clear the dirty flag.
    pub fn validate_tree(&mut self) {
        self.validate(self.root);
        self.dirty = false;
    }

    /// Invalidate then validate `id`.
    pub fn revalidate(&mut self, id: ComponentId) {
        self.invalidate(id);
        if id == self.root {
            self.validate_tree();
        } else {
            self.validate(id);
        }
    }

    /// Whether some invalidation happened since the last tree validation.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // =========================================================================
    // Paint
    // =========================================================================

    /// Paint `id` and its subtree. The surface must already be translated and
    /// clipped to `id`'s rectangle.
    ///
    /// Children are painted in layout order; a child with no width or height
    /// is skipped. A widget whose own paint fails is logged and left partly
    /// drawn; its children and siblings are still painted. Only surface
    /// translation errors abort the pass.
    pub fn paint(&self, id: ComponentId, surface: &mut Surface<'_>, defaults: &PaintDefaults) -> Result<()> {
        let node = self.require(id)?;
        let ctx = PaintContext {
            size: surface.size(),
            foreground: node.foreground.or(defaults.foreground),
            background: node.background.or(defaults.background),
            focused: defaults.focused == Some(id),
            explicit_background: !node.background.is_inherit(),
        };
        if let Err(e) = node.widget.paint(&ctx, surface) {
            tracing::warn!(?id, error = %e, "component paint failed");
        }

        let Some(layout) = node.layout.as_ref() else {
            return Ok(());
        };
        for child in layout.components() {
            let rect = Rect::from_parts(layout.location_of(child), layout.size_of(child));
            if rect.width <= 0 || rect.height <= 0 {
                continue;
            }
            let parent = surface.size();
            surface.enter(rect)?;
            let painted = self.paint(child, surface, defaults);
            surface.leave(rect, parent)?;
            painted?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("root_size", &self.root_size)
            .field("len", &self.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Slot;
    use crate::renderer::FrameBuffer;
    use crate::types::Axis;
    use pretty_assertions::assert_eq;

    struct Container;
    impl Component for Container {}

    struct Leaf {
        size: Size,
        glyph: char,
    }

    impl Leaf {
        fn new(width: i32, height: i32, glyph: char) -> Self {
            Self {
                size: Size::new(width, height),
                glyph,
            }
        }
    }

    impl Component for Leaf {
        fn paint(&self, ctx: &PaintContext, surface: &mut Surface<'_>) -> Result<()> {
            surface.set_color(ctx.foreground);
            surface.fill_rect_with(self.glyph, 0, 0, ctx.size.width, ctx.size.height)
        }

        fn preferred_size(&self, _: Size) -> Size {
            self.size
        }

        fn default_layout(&self) -> Option<LayoutManager> {
            None
        }
    }

    fn tree() -> Tree {
        Tree::new(Container, Size::new(20, 10))
    }

    #[test]
    fn test_attach_sets_parent_and_layout() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.insert(Leaf::new(2, 2, 'a'));
        tree.attach(root, a, Slot::Top.into()).unwrap();

        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.children(root), vec![a]);
        assert!(tree.is_reachable(a));
        assert!(tree.is_dirty());
    }

    #[test]
    fn test_attach_moves_between_parents() {
        let mut tree = tree();
        let root = tree.root();
        let left = tree.insert(Container);
        let right = tree.insert(Container);
        let leaf = tree.insert(Leaf::new(1, 1, 'x'));
        tree.attach(root, left, Slot::Left.into()).unwrap();
        tree.attach(root, right, Slot::Right.into()).unwrap();
        tree.attach(left, leaf, Constraint::None).unwrap();
        tree.attach(right, leaf, Constraint::None).unwrap();

        assert_eq!(tree.parent(leaf), Some(right));
        assert!(tree.children(left).is_empty());
        assert_eq!(tree.children(right), vec![leaf]);
    }

    #[test]
    fn test_attach_rejects_cycles_and_root() {
        let mut tree = tree();
        let root = tree.root();
        let outer = tree.insert(Container);
        let inner = tree.insert(Container);
        tree.attach(root, outer, Constraint::None).unwrap();
        tree.attach(outer, inner, Constraint::None).unwrap();

        assert!(tree.attach(inner, outer, Constraint::None).is_err());
        assert!(tree.attach(outer, outer, Constraint::None).is_err());
        assert!(tree.attach(inner, root, Constraint::None).is_err());

        let leaf = tree.insert(Leaf::new(1, 1, 'x'));
        let other = tree.insert(Leaf::new(1, 1, 'y'));
        assert!(tree.attach(leaf, other, Constraint::None).is_err());
    }

    #[test]
    fn test_displaced_component_is_detached() {
        let mut tree = tree();
        let root = tree.root();
        let first = tree.insert(Container);
        let second = tree.insert(Container);
        tree.attach(root, first, Constraint::None).unwrap();
        tree.attach(root, second, Constraint::None).unwrap();

        assert_eq!(tree.parent(first), None);
        assert!(!tree.is_reachable(first));
        assert_eq!(tree.children(root), vec![second]);
    }

    #[test]
    fn test_bad_constraint_leaves_tree_untouched() {
        let mut tree = tree();
        let root = tree.root();
        let grid = tree.insert(Container);
        tree.attach(root, grid, Constraint::None).unwrap();
        tree.set_layout(grid, Some(LayoutManager::grid(1, 1).unwrap())).unwrap();

        let leaf = tree.insert(Leaf::new(1, 1, 'x'));
        tree.attach(root, leaf, Slot::Top.into()).unwrap();
        assert!(tree.attach(grid, leaf, Constraint::Cell { column: 3, row: 0 }).is_err());
        assert_eq!(tree.parent(leaf), Some(root));
    }

    #[test]
    fn test_destroy_frees_subtree() {
        let mut tree = tree();
        let root = tree.root();
        let outer = tree.insert(Container);
        let inner = tree.insert(Leaf::new(1, 1, 'x'));
        tree.attach(root, outer, Constraint::None).unwrap();
        tree.attach(outer, inner, Constraint::None).unwrap();
        assert_eq!(tree.len(), 3);

        tree.destroy(outer).unwrap();
        assert!(!tree.contains(outer));
        assert!(!tree.contains(inner));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.len(), 1);

        let reused = tree.insert(Container);
        assert!(!tree.contains(outer) && !tree.contains(inner));
        assert!(tree.contains(reused));
        assert!(tree.destroy(root).is_err());
    }

    #[test]
    fn test_set_layout_detaches_children() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.insert(Leaf::new(1, 1, 'a'));
        tree.attach(root, a, Constraint::None).unwrap();

        let previous = tree.set_layout(root, Some(LayoutManager::stack(Axis::Vertical))).unwrap();
        assert!(previous.is_some_and(|l| l.is_empty()));
        assert_eq!(tree.parent(a), None);
        assert!(matches!(tree.layout(root), Some(LayoutManager::Stack(_))));
    }

    #[test]
    fn test_validate_and_location_in_window() {
        let mut tree = tree();
        let root = tree.root();
        let column = tree.insert(Container);
        tree.set_layout(column, Some(LayoutManager::stack(Axis::Vertical))).unwrap();
        let top = tree.insert(Leaf::new(3, 2, 't'));
        let a = tree.insert(Leaf::new(1, 1, 'a'));
        let b = tree.insert(Leaf::new(1, 3, 'b'));
        tree.attach(root, top, Slot::Top.into()).unwrap();
        tree.attach(root, column, Slot::Center.into()).unwrap();
        tree.attach(column, a, Constraint::None).unwrap();
        tree.attach(column, b, Constraint::None).unwrap();

        tree.validate_tree();
        assert!(!tree.is_dirty());
        assert_eq!(tree.size_of(column), Size::new(20, 8));
        assert_eq!(tree.location_of(b), Point::new(0, 1));
        assert_eq!(tree.location_in_window(b), Point::new(0, 3));
        assert_eq!(tree.preferred_size(column), Size::new(1, 4));
    }

    /// Draws one cell past its clip.
    struct Overflowing;
    impl Component for Overflowing {
        fn paint(&self, ctx: &PaintContext, surface: &mut Surface<'_>) -> Result<()> {
            surface.draw_text(ctx.size.width, 0, "x")
        }

        fn preferred_size(&self, _: Size) -> Size {
            Size::new(6, 1)
        }

        fn default_layout(&self) -> Option<LayoutManager> {
            None
        }
    }

    #[test]
    fn test_failing_widget_does_not_abort_siblings() {
        let mut tree = Tree::new(Container, Size::new(6, 3));
        let root = tree.root();
        tree.set_layout(root, Some(LayoutManager::stack(Axis::Vertical))).unwrap();
        let broken = tree.insert(Overflowing);
        let after = tree.insert(Leaf::new(6, 2, 'z'));
        tree.attach(root, broken, Constraint::None).unwrap();
        tree.attach(root, after, Constraint::None).unwrap();
        tree.validate_tree();

        let mut buffer = FrameBuffer::new(6, 3, Color::White, Color::Black);
        let defaults = PaintDefaults {
            foreground: Color::White,
            background: Color::Black,
            focused: None,
        };
        let mut surface = Surface::new(&mut buffer);
        tree.paint(root, &mut surface, &defaults).unwrap();
        assert_eq!(surface.size(), Size::new(6, 3));
        drop(surface);

        assert_eq!(buffer.get(0, 0).unwrap().glyph, ' ');
        assert_eq!(buffer.get(0, 1).unwrap().glyph, 'z');
        assert_eq!(buffer.get(5, 2).unwrap().glyph, 'z');
    }

    #[test]
    fn test_paint_translates_and_skips_empty_children() {
        let mut tree = Tree::new(Container, Size::new(6, 4));
        let root = tree.root();
        tree.set_layout(root, Some(LayoutManager::stack(Axis::Vertical))).unwrap();
        let a = tree.insert(Leaf::new(6, 3, 'a'));
        let b = tree.insert(Leaf::new(6, 2, 'b'));
        let c = tree.insert(Leaf::new(6, 2, 'c'));
        for id in [a, b, c] {
            tree.attach(root, id, Constraint::None).unwrap();
        }
        tree.set_foreground(b, Color::Lime).unwrap();
        tree.validate_tree();
        assert_eq!(tree.size_of(c).height, 0);

        let mut buffer = FrameBuffer::new(6, 4, Color::White, Color::Black);
        {
            let mut surface = Surface::new(&mut buffer);
            let defaults = PaintDefaults {
                foreground: Color::White,
                background: Color::Black,
                focused: None,
            };
            tree.paint(root, &mut surface, &defaults).unwrap();
            assert_eq!(surface.size(), Size::new(6, 4));
        }
        assert_eq!(buffer.get(0, 2).unwrap().glyph, 'a');
        assert_eq!(buffer.get(5, 3).unwrap().glyph, 'b');
        assert_eq!(buffer.get(5, 3).unwrap().fg, Color::Lime);
        assert!(buffer.iter().all(|(_, _, cell)| cell.glyph != 'c'));
    }

    #[test]
    fn test_widget_downcast() {
        let mut tree = tree();
        let leaf = tree.insert(Leaf::new(1, 1, 'q'));
        assert_eq!(tree.widget::<Leaf>(leaf).map(|l| l.glyph), Some('q'));
        assert!(tree.widget::<Container>(leaf).is_none());
        if let Some(l) = tree.widget_mut::<Leaf>(leaf) {
            l.glyph = 'r';
        }
        assert_eq!(tree.widget::<Leaf>(leaf).map(|l| l.glyph), Some('r'));
    }
}
