// ABOUTME: Root of the split tree, addressed by location paths.
// ABOUTME: Inserts, removes, moves and resizes views, then re-renders changed boxes.

use sg_core::{GridOptions, Orientation, Panel, Point, Rect, Size};

use crate::distribute::Fit;
use crate::error::{GridError, LocationFault};
use crate::location::{check_insert, resolve, Shape};
use crate::node::{BranchNode, LeafNode, Node, ResizeMode};
use crate::view::ViewTree;

/// Result of an explicit resize: what was asked for and what the
/// neighbours' constraints allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOutcome {
    pub requested: i64,
    pub realized: i64,
}

impl ResizeOutcome {
    pub fn is_saturated(&self) -> bool {
        self.realized != self.requested
    }
}

/// A resizable container of nested horizontal and vertical splits.
///
/// The root starts out splitting vertically and every level below
/// alternates. A root left holding a single split after a removal is
/// replaced by that split, taking its orientation. Locations
/// are paths of child indexes from the root, `[1, 0]` being the first
/// child of the root's second child.
#[derive(Debug)]
pub struct GridTree<P> {
    /// `None` once disposed
    root: Option<BranchNode<P>>,
    options: GridOptions,
}

impl<P: Panel> GridTree<P> {
    pub fn new(size: Size, options: GridOptions) -> Self {
        let orientation = Orientation::Vertical;
        Self {
            root: Some(BranchNode::new(
                orientation,
                size.along(orientation),
                size.across(orientation),
            )),
            options,
        }
    }

    pub fn options(&self) -> GridOptions {
        self.options
    }

    fn mode(&self) -> ResizeMode {
        if self.options.proportional_layout {
            ResizeMode::Proportional
        } else {
            ResizeMode::FromEnd
        }
    }

    fn root(&self) -> Result<&BranchNode<P>, GridError> {
        self.root.as_ref().ok_or(GridError::Disposed)
    }

    fn root_mut(&mut self) -> Result<&mut BranchNode<P>, GridError> {
        self.root.as_mut().ok_or(GridError::Disposed)
    }

    pub fn is_disposed(&self) -> bool {
        self.root.is_none()
    }

    /// Number of views in the grid
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, BranchNode::leaf_count)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overall container extents
    pub fn size(&self) -> Result<Size, GridError> {
        let root = self.root()?;
        Ok(Size::from_axes(root.orientation, root.size, root.orthogonal_size))
    }

    /// Resize the container and lay out every view again.
    pub fn layout(&mut self, width: u32, height: u32) -> Result<Fit, GridError> {
        let mode = self.mode();
        let root = self.root_mut()?;
        let size = Size::new(width, height);
        let fit = root.layout(size.along(root.orientation), size.across(root.orientation), mode);

        tracing::debug!(width, height, ?fit, "Laid out grid");
        self.render();
        Ok(fit)
    }

    /// Insert `panel` before `location`'s last index, `preferred_size`
    /// pixels long along the axis of the split it lands in.
    ///
    /// Descending onto a view splits it: `[1, 1]` on a root whose second
    /// child is a view puts that view and the new one side by side.
    pub fn add_view(&mut self, panel: P, preferred_size: u32, location: &[usize]) -> Result<Fit, GridError> {
        let mode = self.mode();
        let root = self.root_mut()?;
        check_insert(&root.children, location).map_err(|r| GridError::invalid(location, r))?;
        panel.constraints().validate()?;

        let node = Node::Leaf(LeafNode::new(panel));
        let fit = insert_at(root, node, preferred_size, location, mode)
            .ok_or_else(|| stale(location))?
            .merge(root.refit(mode));

        tracing::debug!(?location, preferred_size, ?fit, "Added view");
        self.render();
        Ok(fit)
    }

    /// Remove the view or split at `location`, handing its panels back.
    pub fn remove_view(&mut self, location: &[usize]) -> Result<ViewTree<P>, GridError> {
        let mode = self.mode();
        let root = self.root_mut()?;
        if location.is_empty() {
            return Err(GridError::CannotRemoveRoot);
        }
        resolve(&root.children, location).map_err(|r| GridError::invalid(location, r))?;

        let (node, removed) = remove_at(root, location, mode).ok_or_else(|| stale(location))?;
        root.promote_lone_branch();
        let fit = removed.merge(root.refit(mode));

        tracing::debug!(?location, ?fit, "Removed view");
        self.render();
        Ok(node.into_view())
    }

    /// Move the node at `from` to `to`. `to` is read against the tree as
    /// it is once `from` has been removed; nothing changes if either
    /// location is invalid.
    pub fn move_view(&mut self, from: &[usize], to: &[usize]) -> Result<Fit, GridError> {
        let mode = self.mode();
        let root = self.root_mut()?;
        if from.is_empty() {
            return Err(GridError::CannotRemoveRoot);
        }
        resolve(&root.children, from).map_err(|r| GridError::invalid(from, r))?;

        let mut shape: Vec<Shape> = root.children.iter().map(Shape::of).collect();
        Shape::remove_from_root(&mut shape, from);
        check_insert(&shape, to).map_err(|r| GridError::invalid(to, r))?;

        let (node, removed) = remove_at(root, from, mode).ok_or_else(|| stale(from))?;
        root.promote_lone_branch();
        let preferred = node.size_in_parent();
        let inserted = insert_at(root, node, preferred, to, mode).ok_or_else(|| stale(to))?;
        let fit = removed.merge(inserted).merge(root.refit(mode));

        tracing::debug!(?from, ?to, ?fit, "Moved view");
        self.render();
        Ok(fit)
    }

    /// Drive the node at `location` to `size` pixels along its parent's
    /// axis. Space is traded with the following siblings (the preceding
    /// ones for a last child); constraints may cap the change.
    pub fn resize_view(&mut self, location: &[usize], size: u32) -> Result<ResizeOutcome, GridError> {
        let mode = self.mode();
        let root = self.root_mut()?;
        let current = resolve(&root.children, location)
            .map_err(|r| GridError::invalid(location, r))?
            .size_in_parent();

        let (&index, path) = location.split_last().ok_or_else(|| stale(location))?;
        let parent = branch_at_mut(root, path).ok_or_else(|| stale(location))?;
        let (realized, fit) = parent.resize_child(index, size, mode);
        let outcome = ResizeOutcome {
            requested: i64::from(size) - i64::from(current),
            realized,
        };

        if outcome.is_saturated() || fit.is_saturated() {
            tracing::debug!(?location, ?outcome, ?fit, "Resize saturated");
        } else {
            tracing::debug!(?location, size, "Resized view");
        }
        self.render();
        Ok(outcome)
    }

    /// Mirror of the split structure with references to the panels
    pub fn views(&self) -> Result<ViewTree<&P>, GridError> {
        Ok(self.root()?.view())
    }

    /// Current box size of the node at `location`; the empty location is
    /// the whole container.
    pub fn view_size(&self, location: &[usize]) -> Result<Size, GridError> {
        let root = self.root()?;
        let Some((_, path)) = location.split_last() else {
            return self.size();
        };

        let node = resolve(&root.children, location).map_err(|r| GridError::invalid(location, r))?;
        let parent = branch_at(root, path).ok_or_else(|| stale(location))?;
        Ok(Size::from_axes(
            parent.orientation,
            node.size_in_parent(),
            node.orthogonal_in_parent(),
        ))
    }

    /// Orientation of the split at `location`; the empty location is the root.
    pub fn orientation_at(&self, location: &[usize]) -> Result<Orientation, GridError> {
        let root = self.root()?;
        if location.is_empty() {
            return Ok(root.orientation);
        }
        match resolve(&root.children, location).map_err(|r| GridError::invalid(location, r))? {
            Node::Branch(branch) => Ok(branch.orientation),
            Node::Leaf(_) => Err(GridError::invalid(
                location,
                LocationFault::NotABranch {
                    depth: location.len(),
                },
            )),
        }
    }

    pub fn panel(&self, location: &[usize]) -> Result<&P, GridError> {
        let root = self.root()?;
        match resolve(&root.children, location).map_err(|r| GridError::invalid(location, r))? {
            Node::Leaf(leaf) => Ok(&leaf.panel),
            Node::Branch(_) => Err(not_a_leaf(location)),
        }
    }

    pub fn panel_mut(&mut self, location: &[usize]) -> Result<&mut P, GridError> {
        let root = self.root_mut()?;
        resolve(&root.children, location).map_err(|r| GridError::invalid(location, r))?;

        let (&index, path) = location.split_last().ok_or_else(|| stale(location))?;
        let parent = branch_at_mut(root, path).ok_or_else(|| stale(location))?;
        match parent.children.get_mut(index) {
            Some(Node::Leaf(leaf)) => Ok(&mut leaf.panel),
            Some(Node::Branch(_)) => Err(not_a_leaf(location)),
            None => Err(stale(location)),
        }
    }

    /// Tear the grid down, handing every panel back in view order.
    /// Later calls return nothing; every other operation fails with
    /// [`GridError::Disposed`].
    pub fn dispose(&mut self) -> Vec<P> {
        match self.root.take() {
            Some(root) => {
                tracing::debug!(views = root.leaf_count(), "Disposed grid");
                root.into_view().into_leaves()
            }
            None => Vec::new(),
        }
    }

    fn render(&mut self) {
        if let Some(root) = &mut self.root {
            let size = Size::from_axes(root.orientation, root.size, root.orthogonal_size);
            root.render(Rect::new(Point::default(), size));
        }
    }
}

/// A location that passed validation but no longer matches the tree.
fn stale(location: &[usize]) -> GridError {
    GridError::invalid(
        location,
        LocationFault::NotABranch {
            depth: location.len().saturating_sub(1),
        },
    )
}

fn not_a_leaf(location: &[usize]) -> GridError {
    GridError::invalid(
        location,
        LocationFault::NotALeaf {
            depth: location.len().saturating_sub(1),
        },
    )
}

fn branch_at<'a, P>(root: &'a BranchNode<P>, path: &[usize]) -> Option<&'a BranchNode<P>> {
    let mut branch = root;
    for &index in path {
        branch = match branch.children.get(index)? {
            Node::Branch(child) => child,
            Node::Leaf(_) => return None,
        };
    }
    Some(branch)
}

fn branch_at_mut<'a, P>(root: &'a mut BranchNode<P>, path: &[usize]) -> Option<&'a mut BranchNode<P>> {
    let mut branch = root;
    for &index in path {
        branch = match branch.children.get_mut(index)? {
            Node::Branch(child) => child,
            Node::Leaf(_) => return None,
        };
    }
    Some(branch)
}

/// Insert `node` at a location already accepted by `check_insert`,
/// splitting the leaf the path ends on if there is one.
fn insert_at<P: Panel>(
    root: &mut BranchNode<P>,
    node: Node<P>,
    preferred: u32,
    location: &[usize],
    mode: ResizeMode,
) -> Option<Fit> {
    let (&last, path) = location.split_last()?;

    let mut branch = root;
    for (step, &index) in path.iter().enumerate() {
        let splits_leaf = step + 1 == path.len() && matches!(branch.children.get(index)?, Node::Leaf(_));
        branch = if splits_leaf {
            branch.split_leaf(index)?
        } else {
            match branch.children.get_mut(index)? {
                Node::Branch(child) => child,
                Node::Leaf(_) => return None,
            }
        };
    }
    Some(branch.insert(last, node, preferred, mode))
}

/// Remove the node at a resolved location, collapsing its parent if that
/// leaves the parent with a single child. The root is normalized by the
/// caller, see [`BranchNode::promote_lone_branch`].
fn remove_at<P: Panel>(branch: &mut BranchNode<P>, location: &[usize], mode: ResizeMode) -> Option<(Node<P>, Fit)> {
    let (&index, rest) = location.split_first()?;
    if index >= branch.children.len() {
        return None;
    }
    if rest.is_empty() {
        return Some(branch.remove(index, mode));
    }

    let Node::Branch(child) = &mut branch.children[index] else {
        return None;
    };
    let removed = remove_at(child, rest, mode)?;
    branch.collapse(index);
    Some(removed)
}
