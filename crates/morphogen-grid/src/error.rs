//! Error type for grid construction.

use std::fmt;

/// Errors arising from grid construction or resizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The requested side length cannot host an interior: the stencil and
    /// the boundary copies both need at least two cells per axis.
    SizeTooSmall {
        /// The rejected side length.
        size: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeTooSmall { size } => {
                write!(f, "grid side must be at least 2, got {size}")
            }
        }
    }
}

impl std::error::Error for GridError {}
