// ABOUTME: Split-tree grid layout for resizable panel containers.
// ABOUTME: Nested splits addressed by location paths, sized within panel constraints.

pub mod distribute;
mod error;
mod grid;
mod location;
mod node;
mod view;

pub use distribute::{Bounds, Fit};
pub use error::{GridError, LocationFault};
pub use grid::{GridTree, ResizeOutcome};
pub use view::ViewTree;

pub use sg_core::{GridOptions, Orientation, Panel, Point, Rect, Size, SizeConstraints};
