//! Morphogen: a two-species reaction-diffusion simulator with
//! runtime-compiled kinetics.
//!
//! This is the top-level facade crate re-exporting the public API from the
//! morphogen sub-crates. For most users, adding `morphogen` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use morphogen::prelude::*;
//!
//! // Size, model, time step — then step.
//! let mut solver = Solver::new();
//! solver.set_size(64).unwrap();
//! solver.set_model(Model::gray_scott()).unwrap();
//! solver.set_time_step(1.0);
//!
//! for _ in 0..100 {
//!     solver.solve().unwrap();
//! }
//!
//! // Read a frame: the U field normalized to [0, 1] for a colormap.
//! let grid = solver.grid().unwrap();
//! let frame = grid.normalized(Species::U);
//! assert_eq!(frame.len(), 64 * 64);
//! assert!(frame.iter().all(|v| (0.0..=1.0).contains(v)));
//! ```
//!
//! Reaction terms are plain text compiled at `set_model` time: any infix
//! arithmetic over the model's parameter names and the implicit
//! concentrations `x` (species U) and `y` (species V). Tune a parameter
//! between steps through [`Solver::param_mut`](prelude::Solver::param_mut);
//! the next step sees the new value without recompilation.
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`model`] | `morphogen-core` | `Model`, `Param`, `Species`, presets |
//! | [`expr`] | `morphogen-expr` | Expression compiler and programs |
//! | [`grid`] | `morphogen-grid` | `GridField`, extrema, boundary pass |
//! | [`solver`] | `morphogen-solver` | `Solver`, stepping, errors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Model vocabulary: parameters, models, species (`morphogen-core`).
pub use morphogen_core as model;

/// The runtime expression compiler (`morphogen-expr`).
pub use morphogen_expr as expr;

/// The double-buffered concentration grid (`morphogen-grid`).
pub use morphogen_grid as grid;

/// The reaction-diffusion stepper (`morphogen-solver`).
pub use morphogen_solver as solver;

/// The types most callers need.
pub mod prelude {
    pub use morphogen_core::{Model, Param, Species};
    pub use morphogen_grid::{Extrema, GridError, GridField};
    pub use morphogen_solver::{ModelError, Solver, SolverState, StepError};
}
