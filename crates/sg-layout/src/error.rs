// ABOUTME: Hard failures of grid operations.
// ABOUTME: Constraint saturation is not an error and never appears here.

use sg_core::ConstraintError;

/// Why a location path does not fit the tree.
///
/// `depth` is the position in the location path of the offending element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocationFault {
    #[error("location is empty")]
    Empty,

    #[error("index {index} at depth {depth} is out of bounds for {len} children")]
    IndexOutOfBounds { depth: usize, index: usize, len: usize },

    #[error("element at depth {depth} indexes into a view, which has no children")]
    NotABranch { depth: usize },

    #[error("node at depth {depth} is a split, not a view")]
    NotALeaf { depth: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Invalid location {location:?}: {reason}")]
    InvalidLocation {
        location: Vec<usize>,
        reason: LocationFault,
    },

    #[error("The root container cannot be removed")]
    CannotRemoveRoot,

    #[error("Grid has been disposed")]
    Disposed,

    #[error("Invalid panel constraints: {0}")]
    InvalidConstraints(#[from] ConstraintError),
}

impl GridError {
    pub(crate) fn invalid(location: &[usize], reason: LocationFault) -> Self {
        GridError::InvalidLocation {
            location: location.to_vec(),
            reason,
        }
    }

    /// The fault behind an `InvalidLocation`, if that is what this is
    pub fn location_fault(&self) -> Option<LocationFault> {
        match self {
            GridError::InvalidLocation { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}
