// ABOUTME: Shared types and configuration for splitgrid.
// ABOUTME: Defines geometry, the panel contract, and config file handling.

pub mod config;
pub mod geometry;
pub mod panel;

pub use config::{Config, ConfigError, GridOptions};
pub use geometry::{Orientation, Point, Rect, Size};
pub use panel::{ConstraintError, Panel, SizeConstraints};
