// ABOUTME: Split tree nodes: leaves wrapping panels, branches owning children.
// ABOUTME: Branches apportion their axis among children and push cross sizes down.

use sg_core::{Orientation, Panel, Rect, Size};

use crate::distribute::{self, Bounds, Fit, Weighting, UNBOUNDED};
use crate::view::ViewTree;

/// How a branch absorbs a change of its own size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResizeMode {
    Proportional,
    FromEnd,
}

#[derive(Debug)]
pub(crate) enum Node<P> {
    Leaf(LeafNode<P>),
    Branch(BranchNode<P>),
}

#[derive(Debug)]
pub(crate) struct LeafNode<P> {
    pub(crate) panel: P,
    /// Extent along the parent's axis
    pub(crate) size: u32,
    /// Extent across the parent's axis
    pub(crate) orthogonal_size: u32,
    rendered: Option<Rect>,
}

#[derive(Debug)]
pub(crate) struct BranchNode<P> {
    pub(crate) orientation: Orientation,
    pub(crate) children: Vec<Node<P>>,
    /// Extent along `orientation`; children sizes sum to this unless saturated
    pub(crate) size: u32,
    pub(crate) orthogonal_size: u32,
}

impl<P> Node<P> {
    pub(crate) fn size_in_parent(&self) -> u32 {
        match self {
            Node::Leaf(leaf) => leaf.size,
            Node::Branch(branch) => branch.orthogonal_size,
        }
    }

    pub(crate) fn orthogonal_in_parent(&self) -> u32 {
        match self {
            Node::Leaf(leaf) => leaf.orthogonal_size,
            Node::Branch(branch) => branch.size,
        }
    }

    fn set_size_in_parent(&mut self, size: u32) {
        match self {
            Node::Leaf(leaf) => leaf.size = size,
            Node::Branch(branch) => branch.orthogonal_size = size,
        }
    }

    pub(crate) fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Branch(branch) => branch.leaf_count(),
        }
    }

    pub(crate) fn view(&self) -> ViewTree<&P> {
        match self {
            Node::Leaf(leaf) => ViewTree::Leaf(&leaf.panel),
            Node::Branch(branch) => branch.view(),
        }
    }

    pub(crate) fn into_view(self) -> ViewTree<P> {
        match self {
            Node::Leaf(leaf) => ViewTree::Leaf(leaf.panel),
            Node::Branch(branch) => branch.into_view(),
        }
    }
}

impl<P: Panel> Node<P> {
    /// Size bounds of this node along `axis`
    pub(crate) fn bounds(&self, axis: Orientation) -> Bounds {
        match self {
            Node::Leaf(leaf) => leaf.bounds(axis),
            Node::Branch(branch) => branch.bounds(axis),
        }
    }

    fn render(&mut self, rect: Rect) {
        match self {
            Node::Leaf(leaf) => leaf.render(rect),
            Node::Branch(branch) => branch.render(rect),
        }
    }
}

impl<P> LeafNode<P> {
    pub(crate) fn new(panel: P) -> Self {
        Self {
            panel,
            size: 0,
            orthogonal_size: 0,
            rendered: None,
        }
    }
}

impl<P: Panel> LeafNode<P> {
    fn bounds(&self, axis: Orientation) -> Bounds {
        let constraints = self.panel.constraints();
        Bounds::new(
            constraints.min_along(axis),
            constraints.max_along(axis).unwrap_or(UNBOUNDED),
        )
    }

    /// Hand the panel its box, skipping boxes it already has
    fn render(&mut self, rect: Rect) {
        if self.rendered != Some(rect) {
            self.panel.layout(rect.origin(), rect.size());
            self.rendered = Some(rect);
        }
    }
}

impl<P> BranchNode<P> {
    pub(crate) fn new(orientation: Orientation, size: u32, orthogonal_size: u32) -> Self {
        Self {
            orientation,
            children: Vec::new(),
            size,
            orthogonal_size,
        }
    }

    /// A branch of `orientation` holding `leaf`, taking over the leaf's box
    fn wrap(mut leaf: LeafNode<P>, orientation: Orientation) -> Self {
        let size = leaf.orthogonal_size;
        let orthogonal_size = leaf.size;
        leaf.size = size;
        leaf.orthogonal_size = orthogonal_size;
        Self {
            orientation,
            children: vec![Node::Leaf(leaf)],
            size,
            orthogonal_size,
        }
    }

    pub(crate) fn leaf_count(&self) -> usize {
        self.children.iter().map(Node::leaf_count).sum()
    }

    pub(crate) fn view(&self) -> ViewTree<&P> {
        ViewTree::Branch {
            orientation: self.orientation,
            children: self.children.iter().map(Node::view).collect(),
        }
    }

    pub(crate) fn into_view(self) -> ViewTree<P> {
        ViewTree::Branch {
            orientation: self.orientation,
            children: self.children.into_iter().map(Node::into_view).collect(),
        }
    }

    fn child_sizes(&self) -> Vec<u32> {
        self.children.iter().map(Node::size_in_parent).collect()
    }

    fn apply_sizes(&mut self, sizes: &[u32]) {
        for (child, &size) in self.children.iter_mut().zip(sizes) {
            child.set_size_in_parent(size);
        }
    }

    /// Rotate this subtree so its children run along the other axis.
    /// Sizes are kept as weights for the next layout pass.
    fn flip(&mut self) {
        self.orientation = self.orientation.perpendicular();
        std::mem::swap(&mut self.size, &mut self.orthogonal_size);
        for child in &mut self.children {
            if let Node::Branch(branch) = child {
                branch.flip();
            }
        }
    }

    /// Replace the leaf at `index` by a perpendicular branch holding it.
    /// Returns the branch now at `index`, `None` when out of bounds.
    pub(crate) fn split_leaf(&mut self, index: usize) -> Option<&mut BranchNode<P>> {
        let orientation = self.orientation.perpendicular();
        let slot = self.children.get_mut(index)?;
        if let Node::Leaf(_) = slot {
            let placeholder = Node::Branch(BranchNode::new(orientation, 0, 0));
            if let Node::Leaf(leaf) = std::mem::replace(slot, placeholder) {
                *slot = Node::Branch(BranchNode::wrap(leaf, orientation));
            }
        }
        match slot {
            Node::Branch(branch) => Some(branch),
            Node::Leaf(_) => None,
        }
    }

    /// Collapse the child branch at `index` if it is left with one child.
    /// A lone leaf takes the branch's place; a lone branch shares this
    /// branch's orientation, so its children are spliced in directly.
    pub(crate) fn collapse(&mut self, index: usize) {
        let only = match self.children.get_mut(index) {
            Some(Node::Branch(child)) if child.children.len() == 1 => child.children.pop(),
            _ => None,
        };
        let Some(only) = only else {
            return;
        };

        let emptied = self.children.remove(index);
        match only {
            Node::Leaf(mut leaf) => {
                leaf.size = emptied.size_in_parent();
                leaf.orthogonal_size = emptied.orthogonal_in_parent();
                self.children.insert(index, Node::Leaf(leaf));
            }
            Node::Branch(inner) => {
                self.children.splice(index..index, inner.children);
            }
        }
    }

    /// Replace this branch by its only child when that child is a branch,
    /// keeping the container extents. The promoted branch keeps its own
    /// orientation. Returns whether anything changed.
    pub(crate) fn promote_lone_branch(&mut self) -> bool {
        if !matches!(self.children.as_slice(), [Node::Branch(_)]) {
            return false;
        }
        let Some(Node::Branch(mut inner)) = self.children.pop() else {
            return false;
        };

        let container = Size::from_axes(self.orientation, self.size, self.orthogonal_size);
        inner.size = container.along(inner.orientation);
        inner.orthogonal_size = container.across(inner.orientation);
        *self = inner;
        true
    }
}

impl<P: Panel> BranchNode<P> {
    /// Along its own axis a branch needs room for every child; across it,
    /// every child receives the full extent.
    fn bounds(&self, axis: Orientation) -> Bounds {
        if self.children.is_empty() {
            return Bounds::unbounded();
        }
        if axis == self.orientation {
            let (min, max) = self.children.iter().fold((0u64, 0u64), |(min, max), child| {
                let b = child.bounds(axis);
                (min + u64::from(b.min), max + u64::from(b.max))
            });
            Bounds::new(
                u32::try_from(min).unwrap_or(UNBOUNDED),
                u32::try_from(max).unwrap_or(UNBOUNDED),
            )
        } else {
            let min = self.children.iter().map(|c| c.bounds(axis).min).max();
            let max = self.children.iter().map(|c| c.bounds(axis).max).min();
            Bounds::new(min.unwrap_or(0), max.unwrap_or(UNBOUNDED))
        }
    }

    fn child_bounds(&self) -> Vec<Bounds> {
        self.children
            .iter()
            .map(|c| c.bounds(self.orientation))
            .collect()
    }

    fn redistribute(&mut self, low_priority: Option<usize>, weighting: Weighting) -> Fit {
        if self.children.is_empty() {
            return Fit::Exact;
        }
        let mut sizes = self.child_sizes();
        let bounds = self.child_bounds();
        let fit = distribute::distribute(&mut sizes, &bounds, self.size, low_priority, weighting);
        self.apply_sizes(&sizes);
        fit
    }

    /// Lay this branch out at `size` along its axis and `orthogonal_size`
    /// across it, recursing into every child.
    pub(crate) fn layout(&mut self, size: u32, orthogonal_size: u32, mode: ResizeMode) -> Fit {
        self.size = size;
        self.orthogonal_size = orthogonal_size;

        let fit = match mode {
            ResizeMode::Proportional => self.redistribute(None, Weighting::Size),
            ResizeMode::FromEnd if self.children.is_empty() => Fit::Exact,
            ResizeMode::FromEnd => {
                let mut sizes = self.child_sizes();
                let bounds = self.child_bounds();
                let fit = distribute::absorb_from_end(&mut sizes, &bounds, size);
                self.apply_sizes(&sizes);
                fit
            }
        };
        fit.merge(self.propagate(mode))
    }

    /// Lay out again at the current size. Leaves a consistent tree as it
    /// is; retries splits whose children no longer fit after an edit
    /// elsewhere changed their bounds.
    pub(crate) fn refit(&mut self, mode: ResizeMode) -> Fit {
        self.layout(self.size, self.orthogonal_size, mode)
    }

    /// Hand the cross size to every child and lay out child branches at
    /// their current sizes. Views whose cross-axis bounds exclude the
    /// cross size still get it, and the excess is reported.
    fn propagate(&mut self, mode: ResizeMode) -> Fit {
        let orthogonal_size = self.orthogonal_size;
        let across = self.orientation.perpendicular();
        let mut fit = Fit::Exact;
        for child in &mut self.children {
            match child {
                Node::Leaf(leaf) => {
                    leaf.orthogonal_size = orthogonal_size;
                    let excess = leaf.bounds(across).excess(orthogonal_size);
                    if excess != 0 {
                        fit = fit.merge(Fit::Saturated { unresolved: excess });
                    }
                }
                // A split's extent across this axis is its own axis; its
                // layout reports what its children cannot absorb.
                Node::Branch(branch) => {
                    let across = branch.orthogonal_size;
                    fit = fit.merge(branch.layout(orthogonal_size, across, mode));
                }
            }
        }
        fit
    }

    /// Insert `node` at `index` with `preferred` pixels along this branch's
    /// axis (clamped to the node's bounds). Existing children make room in
    /// proportion to their slack; the new node gives way only when they
    /// are pinned at their minimums.
    pub(crate) fn insert(
        &mut self,
        index: usize,
        mut node: Node<P>,
        preferred: u32,
        mode: ResizeMode,
    ) -> Fit {
        if let Node::Branch(branch) = &mut node {
            if branch.orientation == self.orientation {
                branch.flip();
            }
        }

        let index = index.min(self.children.len());
        let size = node.bounds(self.orientation).clamp(i64::from(preferred));
        node.set_size_in_parent(size);
        self.children.insert(index, node);

        let fit = self.redistribute(Some(index), Weighting::Slack);
        fit.merge(self.propagate(mode))
    }

    /// Remove the child at `index`, giving its space to the remaining
    /// children in proportion to their sizes.
    pub(crate) fn remove(&mut self, index: usize, mode: ResizeMode) -> (Node<P>, Fit) {
        let node = self.children.remove(index);
        let fit = self.redistribute(None, Weighting::Size);
        (node, fit.merge(self.propagate(mode)))
    }

    /// Drive child `index` towards `size`, trading space with its
    /// neighbours. Returns the realized change.
    pub(crate) fn resize_child(&mut self, index: usize, size: u32, mode: ResizeMode) -> (i64, Fit) {
        let mut sizes = self.child_sizes();
        let bounds = self.child_bounds();
        let Some(&current) = sizes.get(index) else {
            return (0, Fit::Exact);
        };

        let delta = i64::from(size) - i64::from(current);
        let realized = distribute::resize_with_priority(&mut sizes, &bounds, index, delta);
        self.apply_sizes(&sizes);
        (realized, self.propagate(mode))
    }

    /// Compute every descendant's box inside `rect` and report changed
    /// boxes to their panels.
    pub(crate) fn render(&mut self, rect: Rect) {
        let mut offset = 0u32;
        for child in &mut self.children {
            let extent = child.size_in_parent();
            child.render(rect.slice(self.orientation, offset, extent));
            offset = offset.saturating_add(extent);
        }
    }
}
