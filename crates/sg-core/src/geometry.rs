// ABOUTME: Pixel geometry shared by the layout engine and its hosts.
// ABOUTME: Converts between axis-relative extents and width/height pairs.

use serde::{Deserialize, Serialize};

/// Axis along which a split container lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Children stacked top to bottom; the axis measures height.
    Vertical,
    /// Children placed left to right; the axis measures width.
    Horizontal,
}

impl Orientation {
    pub const fn perpendicular(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build a size from an extent along `orientation` and one across it.
    pub const fn from_axes(orientation: Orientation, along: u32, across: u32) -> Self {
        match orientation {
            Orientation::Vertical => Self::new(across, along),
            Orientation::Horizontal => Self::new(along, across),
        }
    }

    /// Extent along the axis of `orientation`
    pub const fn along(self, orientation: Orientation) -> u32 {
        match orientation {
            Orientation::Vertical => self.height,
            Orientation::Horizontal => self.width,
        }
    }

    /// Extent across the axis of `orientation`
    pub const fn across(self, orientation: Orientation) -> u32 {
        self.along(orientation.perpendicular())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Rectangle in pixels, origin at the top-left of the grid container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Slice of this rectangle starting `offset` pixels along `orientation`,
    /// `extent` pixels long and spanning the full cross axis.
    pub fn slice(&self, orientation: Orientation, offset: u32, extent: u32) -> Rect {
        match orientation {
            Orientation::Vertical => Rect {
                x: self.x,
                y: self.y.saturating_add(offset),
                width: self.width,
                height: extent,
            },
            Orientation::Horizontal => Rect {
                x: self.x.saturating_add(offset),
                y: self.y,
                width: extent,
                height: self.height,
            },
        }
    }
}
