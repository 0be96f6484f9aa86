// ABOUTME: Shared test panel and tree inspection helpers.
// ABOUTME: Panels are shared handles so tests can read back rendered boxes.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use sg_layout::{GridTree, Orientation, Panel, Point, Size, SizeConstraints, ViewTree};

#[derive(Debug)]
pub struct TestView {
    pub id: u32,
    pub constraints: SizeConstraints,
    pub offset: Option<Point>,
    pub size: Option<Size>,
    pub layouts: usize,
}

impl Panel for TestView {
    fn constraints(&self) -> SizeConstraints {
        self.constraints
    }

    fn layout(&mut self, offset: Point, size: Size) {
        self.offset = Some(offset);
        self.size = Some(size);
        self.layouts += 1;
    }
}

pub type Handle = Rc<RefCell<TestView>>;

pub fn view(id: u32, constraints: SizeConstraints) -> Handle {
    Rc::new(RefCell::new(TestView {
        id,
        constraints,
        offset: None,
        size: None,
        layouts: 0,
    }))
}

/// Minimum 50 on both axes, unbounded maximum
pub fn flexible(id: u32) -> Handle {
    view(id, SizeConstraints::flexible(50, 50))
}

/// Exactly 20x20
pub fn fixed(id: u32) -> Handle {
    view(id, SizeConstraints::fixed(20, 20))
}

/// Last rendered (width, height) of a panel
pub fn rendered(handle: &Handle) -> Option<(u32, u32)> {
    handle.borrow().size.map(|s| (s.width, s.height))
}

pub fn rendered_at(handle: &Handle) -> Option<(u32, u32)> {
    handle.borrow().offset.map(|p| (p.x, p.y))
}

/// Panel ids in tree form, for comparing structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ids {
    V(u32),
    B(Vec<Ids>),
}

pub fn ids(grid: &GridTree<Handle>) -> Vec<Ids> {
    let tree = grid.views().expect("grid not disposed");
    tree.children().iter().map(to_ids).collect()
}

fn to_ids(tree: &ViewTree<&Handle>) -> Ids {
    match tree {
        ViewTree::Leaf(handle) => Ids::V(handle.borrow().id),
        ViewTree::Branch { children, .. } => Ids::B(children.iter().map(to_ids).collect()),
    }
}

pub fn v(id: u32) -> Ids {
    Ids::V(id)
}

/// One entry per node: location, box size, panel id for leaves
pub type Snapshot = Vec<(Vec<usize>, Size, Option<u32>)>;

pub fn snapshot(grid: &GridTree<Handle>) -> Snapshot {
    let mut out = Vec::new();
    if let Ok(tree) = grid.views() {
        let mut location = Vec::new();
        walk(grid, &tree, &mut location, &mut out);
    }
    out
}

fn walk(grid: &GridTree<Handle>, tree: &ViewTree<&Handle>, location: &mut Vec<usize>, out: &mut Snapshot) {
    let size = grid.view_size(location).expect("location from views() resolves");
    let id = match tree {
        ViewTree::Leaf(handle) => Some(handle.borrow().id),
        ViewTree::Branch { .. } => None,
    };
    out.push((location.clone(), size, id));
    for (index, child) in tree.children().iter().enumerate() {
        location.push(index);
        walk(grid, child, location, out);
        location.pop();
    }
}

/// Smallest extent a subtree can take along `axis`
pub fn min_along(tree: &ViewTree<&Handle>, axis: Orientation) -> u64 {
    match tree {
        ViewTree::Leaf(handle) => u64::from(handle.borrow().constraints.min_along(axis)),
        ViewTree::Branch {
            orientation,
            children,
        } if *orientation == axis => children.iter().map(|c| min_along(c, axis)).sum(),
        ViewTree::Branch { children, .. } => {
            children.iter().map(|c| min_along(c, axis)).max().unwrap_or(0)
        }
    }
}
