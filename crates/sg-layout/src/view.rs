// ABOUTME: Read-only mirror of the grid's split structure.
// ABOUTME: Leaves carry panels (or references to them), branches their orientation.

use sg_core::Orientation;

/// Nested mirror of a grid: one `Branch` per split container, one `Leaf`
/// per panel, children in view order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewTree<T> {
    Leaf(T),
    Branch {
        orientation: Orientation,
        children: Vec<ViewTree<T>>,
    },
}

impl<T> ViewTree<T> {
    /// Children of a branch; empty for leaves
    pub fn children(&self) -> &[ViewTree<T>] {
        match self {
            ViewTree::Leaf(_) => &[],
            ViewTree::Branch { children, .. } => children,
        }
    }

    /// Leaves in view order (depth first, left to right)
    pub fn leaves(&self) -> Vec<&T> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }

    pub fn into_leaves(self) -> Vec<T> {
        let mut out = Vec::new();
        drain_leaves(self, &mut out);
        out
    }

    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> ViewTree<U> {
        self.map_with(&mut f)
    }

    fn map_with<U, F: FnMut(T) -> U>(self, f: &mut F) -> ViewTree<U> {
        match self {
            ViewTree::Leaf(value) => ViewTree::Leaf(f(value)),
            ViewTree::Branch {
                orientation,
                children,
            } => ViewTree::Branch {
                orientation,
                children: children.into_iter().map(|c| c.map_with(f)).collect(),
            },
        }
    }
}

fn collect_leaves<'a, T>(tree: &'a ViewTree<T>, out: &mut Vec<&'a T>) {
    match tree {
        ViewTree::Leaf(value) => out.push(value),
        ViewTree::Branch { children, .. } => {
            for child in children {
                collect_leaves(child, out);
            }
        }
    }
}

fn drain_leaves<T>(tree: ViewTree<T>, out: &mut Vec<T>) {
    match tree {
        ViewTree::Leaf(value) => out.push(value),
        ViewTree::Branch { children, .. } => {
            for child in children {
                drain_leaves(child, out);
            }
        }
    }
}
