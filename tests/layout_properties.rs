//! Layout allocation properties, checked through the component tree.

use console_ui::{
    Axis, Component, ComponentId, Constraint, LayoutManager, Panel, Size, Slot, Tree,
};
use pretty_assertions::assert_eq;

/// Leaf with a fixed preferred size.
struct Fixed(Size);

impl Component for Fixed {
    fn preferred_size(&self, _: Size) -> Size {
        self.0
    }

    fn default_layout(&self) -> Option<LayoutManager> {
        None
    }
}

fn fixed(tree: &mut Tree, width: i32, height: i32) -> ComponentId {
    tree.insert(Fixed(Size::new(width, height)))
}

#[test]
fn test_border_overflow_even_split() {
    let mut tree = Tree::new(Panel::new(), Size::new(4, 12));
    let root = tree.root();
    let top = fixed(&mut tree, 1, 10);
    let bottom = fixed(&mut tree, 1, 8);
    tree.attach(root, top, Slot::Top.into()).unwrap();
    tree.attach(root, bottom, Slot::Bottom.into()).unwrap();
    tree.validate_tree();

    assert_eq!(tree.size_of(top).height, 6);
    assert_eq!(tree.size_of(bottom).height, 6);
    assert_eq!(tree.location_of(bottom).y, 6);
}

#[test]
fn test_border_overflow_complement() {
    let mut tree = Tree::new(Panel::new(), Size::new(4, 12));
    let root = tree.root();
    let top = fixed(&mut tree, 1, 3);
    let bottom = fixed(&mut tree, 1, 10);
    tree.attach(root, top, Slot::Top.into()).unwrap();
    tree.attach(root, bottom, Slot::Bottom.into()).unwrap();
    tree.validate_tree();

    assert_eq!(tree.size_of(bottom).height, 10);
    assert_eq!(tree.size_of(top).height, 2);
}

#[test]
fn test_border_center_absorbs_remaining_space() {
    let mut tree = Tree::new(Panel::new(), Size::new(20, 10));
    let root = tree.root();
    let ids: Vec<_> = [(0, 2), (3, 0), (0, 1), (4, 0), (1, 1)]
        .into_iter()
        .map(|(w, h)| fixed(&mut tree, w, h))
        .collect();
    for (id, slot) in ids.iter().zip([Slot::Top, Slot::Right, Slot::Bottom, Slot::Left, Slot::Center]) {
        tree.attach(root, *id, slot.into()).unwrap();
    }
    tree.validate_tree();

    let center = ids[4];
    assert_eq!(tree.size_of(center), Size::new(13, 7));
    assert_eq!(tree.location_of(center), console_ui::Point::new(4, 2));
}

#[test]
fn test_grid_remainder_goes_to_leading_cells() {
    let mut tree = Tree::new(Panel::new(), Size::new(10, 10));
    let root = tree.root();
    tree.set_layout(root, Some(LayoutManager::grid(3, 3).unwrap())).unwrap();
    let cells: Vec<_> = (0..9).map(|_| fixed(&mut tree, 1, 1)).collect();
    for id in &cells {
        tree.attach(root, *id, Constraint::None).unwrap();
    }
    tree.validate_tree();

    let widths: Vec<_> = cells[0..3].iter().map(|id| tree.size_of(*id).width).collect();
    let heights: Vec<_> = [0, 3, 6].iter().map(|i| tree.size_of(cells[*i]).height).collect();
    assert_eq!(widths, vec![4, 3, 3]);
    assert_eq!(heights, vec![4, 3, 3]);
}

#[test]
fn test_stack_truncates_in_order() {
    let mut tree = Tree::new(Panel::new(), Size::new(6, 8));
    let root = tree.root();
    tree.set_layout(root, Some(LayoutManager::stack(Axis::Vertical))).unwrap();
    let children: Vec<_> = (0..3).map(|_| fixed(&mut tree, 2, 5)).collect();
    for id in &children {
        tree.attach(root, *id, Constraint::None).unwrap();
    }
    tree.validate_tree();

    let heights: Vec<_> = children.iter().map(|id| tree.size_of(*id).height).collect();
    assert_eq!(heights, vec![5, 3, 0]);
}

#[test]
fn test_validate_is_idempotent() {
    let mut tree = Tree::new(Panel::new(), Size::new(30, 12));
    let root = tree.root();
    let column = tree.insert(Panel::with_layout(LayoutManager::stack(Axis::Vertical)));
    tree.attach(root, column, Slot::Left.into()).unwrap();
    let grid = tree.insert(Panel::with_layout(LayoutManager::grid(2, 3).unwrap()));
    tree.attach(root, grid, Slot::Center.into()).unwrap();
    let mut all = vec![column, grid];
    for n in 0..4 {
        let id = fixed(&mut tree, 3 + n, 2);
        tree.attach(column, id, Constraint::None).unwrap();
        all.push(id);
    }
    for n in 0..5 {
        let id = fixed(&mut tree, 2, 1 + n);
        tree.attach(grid, id, Constraint::None).unwrap();
        all.push(id);
    }

    tree.validate_tree();
    let first: Vec<_> = all.iter().map(|id| tree.bounds_of(*id)).collect();
    tree.validate(root);
    let second: Vec<_> = all.iter().map(|id| tree.bounds_of(*id)).collect();
    assert_eq!(first, second);
}
