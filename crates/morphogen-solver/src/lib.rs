//! Explicit finite-difference reaction-diffusion solver.
//!
//! [`Solver`] advances the two concentration fields of a [`GridField`] under
//! diffusion plus reaction, where the reaction terms are arithmetic
//! expressions compiled at model-set time by `morphogen-expr` and evaluated
//! per interior cell. Two stepping modes are offered per step: plain
//! explicit Euler ([`Solver::solve`]) and a trapezoidal predictor-corrector
//! refinement ([`Solver::correct`]).
//!
//! The scheme is deliberately unchecked: any time step is accepted, and a
//! caller choosing an unstable `dt` for the grid spacing and diffusion
//! coefficients gets the divergence (up to non-finite values) the explicit
//! scheme produces. Stability is the caller's contract.
//!
//! [`GridField`]: morphogen_grid::GridField

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod kinetics;
mod solver;
mod stencil;

pub use error::{ModelError, StepError};
pub use solver::{Solver, SolverState};
pub use stencil::laplace;
