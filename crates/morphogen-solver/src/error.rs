//! Error types for model binding and stepping.

use morphogen_core::Species;
use morphogen_expr::ExprError;
use std::error::Error;
use std::fmt;

/// Errors from [`Solver::set_model`](crate::Solver::set_model).
///
/// A model must compile as a whole: if either expression fails, the solver
/// holds no evaluator at all and stepping reports [`StepError::NoModel`]
/// until a valid model is set.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelError {
    /// One of the reaction-term expressions failed to compile.
    Compile {
        /// Which species' term failed.
        species: Species,
        /// The underlying parse/resolution error.
        source: ExprError,
    },
    /// A parameter is named like one of the implicit variables (`x`, `y`),
    /// which would make the expression binding ambiguous.
    ShadowedImplicitVar {
        /// The conflicting parameter name.
        name: String,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compile { species, source } => {
                let term = match species {
                    Species::U => "fu",
                    Species::V => "fv",
                };
                write!(f, "reaction term {term} failed to compile: {source}")
            }
            Self::ShadowedImplicitVar { name } => {
                write!(f, "parameter '{name}' shadows an implicit variable")
            }
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Compile { source, .. } => Some(source),
            Self::ShadowedImplicitVar { .. } => None,
        }
    }
}

/// Errors from [`Solver::solve`](crate::Solver::solve) and
/// [`Solver::correct`](crate::Solver::correct).
///
/// Both conditions are safe no-ops: the grid is left exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepError {
    /// `set_size` has not succeeded yet; there is no grid to advance.
    Unsized,
    /// No validly compiled model is bound (never set, or the last
    /// `set_model` failed).
    NoModel,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsized => write!(f, "solver has no grid; call set_size first"),
            Self::NoModel => write!(f, "solver has no compiled model; call set_model first"),
        }
    }
}

impl Error for StepError {}
