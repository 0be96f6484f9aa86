// ABOUTME: Contract between the layout engine and the panels it arranges.
// ABOUTME: Panels report size constraints and receive their rendered box.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::geometry::{Orientation, Point, Size};

/// Per-panel size bounds in pixels. `None` maximums are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeConstraints {
    pub min_width: u32,
    pub max_width: Option<u32>,
    pub min_height: u32,
    pub max_height: Option<u32>,
}

impl SizeConstraints {
    /// Minimum size with no upper bound
    pub const fn flexible(min_width: u32, min_height: u32) -> Self {
        Self {
            min_width,
            max_width: None,
            min_height,
            max_height: None,
        }
    }

    pub const fn fixed(width: u32, height: u32) -> Self {
        Self {
            min_width: width,
            max_width: Some(width),
            min_height: height,
            max_height: Some(height),
        }
    }

    pub const fn bounded(min_width: u32, max_width: u32, min_height: u32, max_height: u32) -> Self {
        Self {
            min_width,
            max_width: Some(max_width),
            min_height,
            max_height: Some(max_height),
        }
    }

    pub fn validate(&self) -> Result<(), ConstraintError> {
        if let Some(max) = self.max_width {
            if max < self.min_width {
                return Err(ConstraintError {
                    axis: "width",
                    min: self.min_width,
                    max,
                });
            }
        }
        if let Some(max) = self.max_height {
            if max < self.min_height {
                return Err(ConstraintError {
                    axis: "height",
                    min: self.min_height,
                    max,
                });
            }
        }
        Ok(())
    }

    pub const fn min_along(&self, orientation: Orientation) -> u32 {
        match orientation {
            Orientation::Vertical => self.min_height,
            Orientation::Horizontal => self.min_width,
        }
    }

    pub const fn max_along(&self, orientation: Orientation) -> Option<u32> {
        match orientation {
            Orientation::Vertical => self.max_height,
            Orientation::Horizontal => self.max_width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Maximum {axis} {max} is below minimum {min}")]
pub struct ConstraintError {
    pub axis: &'static str,
    pub min: u32,
    pub max: u32,
}

/// A unit of content laid out by the grid.
///
/// The grid owns only the layout box; rendering stays with the panel.
pub trait Panel {
    fn constraints(&self) -> SizeConstraints;

    /// Called whenever the panel's box changes.
    fn layout(&mut self, offset: Point, size: Size);
}

impl<T: Panel + ?Sized> Panel for Box<T> {
    fn constraints(&self) -> SizeConstraints {
        (**self).constraints()
    }

    fn layout(&mut self, offset: Point, size: Size) {
        (**self).layout(offset, size)
    }
}

/// Lets a host keep a handle to a panel it hands to the grid.
impl<T: Panel + ?Sized> Panel for Rc<RefCell<T>> {
    fn constraints(&self) -> SizeConstraints {
        self.borrow().constraints()
    }

    fn layout(&mut self, offset: Point, size: Size) {
        self.borrow_mut().layout(offset, size)
    }
}
