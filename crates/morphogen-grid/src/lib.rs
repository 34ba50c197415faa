//! Double-buffered concentration grid for the morphogen simulator.
//!
//! [`GridField`] owns the four `size * size` buffers (current and next state
//! for each of the two species), seeds the deterministic initial condition,
//! applies the zero-gradient boundary, and tracks running extrema. It knows
//! nothing about time stepping; the solver crate drives it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod extrema;
mod field;

pub use error::GridError;
pub use extrema::Extrema;
pub use field::{boundary_pass, FieldViews, GridField};
