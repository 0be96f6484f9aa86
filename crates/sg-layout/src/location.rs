// ABOUTME: Location path validation shared by the grid and its dry runs.
// ABOUTME: Checks insert and lookup paths before any node is touched.

use crate::error::LocationFault;
use crate::node::Node;

/// A level of a split tree: either real nodes or a bare shape.
pub(crate) trait Hierarchy: Sized {
    /// Children of a branch, `None` for a leaf
    fn branch_children(&self) -> Option<&[Self]>;
}

impl<P> Hierarchy for Node<P> {
    fn branch_children(&self) -> Option<&[Self]> {
        match self {
            Node::Leaf(_) => None,
            Node::Branch(branch) => Some(&branch.children),
        }
    }
}

/// Structure of a tree without sizes or panels, used to validate the
/// second half of a move against the tree as it will be after the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Shape {
    Leaf,
    Branch(Vec<Shape>),
}

impl Hierarchy for Shape {
    fn branch_children(&self) -> Option<&[Self]> {
        match self {
            Shape::Leaf => None,
            Shape::Branch(children) => Some(children),
        }
    }
}

impl Shape {
    pub(crate) fn of<P>(node: &Node<P>) -> Self {
        match node {
            Node::Leaf(_) => Shape::Leaf,
            Node::Branch(branch) => Shape::Branch(branch.children.iter().map(Shape::of).collect()),
        }
    }

    /// Remove the node at a checked `location` from the root's `children`,
    /// then replace the root by its only child if that child is a branch.
    pub(crate) fn remove_from_root(children: &mut Vec<Shape>, location: &[usize]) {
        Shape::remove(children, location);
        if let [Shape::Branch(_)] = children.as_slice() {
            if let Some(Shape::Branch(inner)) = children.pop() {
                *children = inner;
            }
        }
    }

    /// Remove the node at a checked `location` from `children`, collapsing
    /// single-child branches the way the grid does.
    pub(crate) fn remove(children: &mut Vec<Shape>, location: &[usize]) {
        let Some((&index, rest)) = location.split_first() else {
            return;
        };
        if index >= children.len() {
            return;
        }
        if rest.is_empty() {
            children.remove(index);
            return;
        }

        let Shape::Branch(grandchildren) = &mut children[index] else {
            return;
        };
        Shape::remove(grandchildren, rest);
        if grandchildren.len() == 1 {
            if let Some(only) = grandchildren.pop() {
                children.remove(index);
                match only {
                    Shape::Leaf => children.insert(index, Shape::Leaf),
                    Shape::Branch(inner) => {
                        children.splice(index..index, inner);
                    }
                }
            }
        }
    }
}

/// Check that `location` can receive a new node under a root with
/// `children`. The last element is an insertion index (`<= len`); a leaf
/// met on the way may be split, but only by the final element.
pub(crate) fn check_insert<T: Hierarchy>(children: &[T], location: &[usize]) -> Result<(), LocationFault> {
    let (&last, path) = location.split_last().ok_or(LocationFault::Empty)?;

    let mut level = children;
    for (depth, &index) in path.iter().enumerate() {
        let node = level.get(index).ok_or(LocationFault::IndexOutOfBounds {
            depth,
            index,
            len: level.len(),
        })?;
        match node.branch_children() {
            Some(next) => level = next,
            None if depth + 1 < path.len() => {
                return Err(LocationFault::NotABranch { depth: depth + 1 });
            }
            // Splitting a leaf yields a branch holding just that leaf.
            None if last > 1 => {
                return Err(LocationFault::IndexOutOfBounds {
                    depth: depth + 1,
                    index: last,
                    len: 1,
                });
            }
            None => return Ok(()),
        }
    }

    if last > level.len() {
        return Err(LocationFault::IndexOutOfBounds {
            depth: path.len(),
            index: last,
            len: level.len(),
        });
    }
    Ok(())
}

/// Resolve `location` to an existing node under a root with `children`.
pub(crate) fn resolve<'a, T: Hierarchy>(children: &'a [T], location: &[usize]) -> Result<&'a T, LocationFault> {
    let (&first, rest) = location.split_first().ok_or(LocationFault::Empty)?;

    let mut node = children.get(first).ok_or(LocationFault::IndexOutOfBounds {
        depth: 0,
        index: first,
        len: children.len(),
    })?;
    for (offset, &index) in rest.iter().enumerate() {
        let depth = offset + 1;
        let level = node
            .branch_children()
            .ok_or(LocationFault::NotABranch { depth })?;
        node = level.get(index).ok_or(LocationFault::IndexOutOfBounds {
            depth,
            index,
            len: level.len(),
        })?;
    }
    Ok(node)
}
