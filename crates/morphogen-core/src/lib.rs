//! Core types for the morphogen reaction-diffusion simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! model vocabulary shared by the rest of the workspace: tunable parameters,
//! the [`Model`] value type (parameter map plus the two reaction-term
//! expressions), and the [`Species`] selector.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod model;
mod species;

pub use model::{Model, Param, DIFFUSION_U, DIFFUSION_V};
pub use species::Species;
