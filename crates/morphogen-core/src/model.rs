//! Model and parameter definitions.
//!
//! A [`Model`] is immutable value data exchanged between the caller and the
//! solver by clone; the solver never aliases the caller's copy. The solver
//! re-reads parameter *values* every step, so editing `value` on the copy the
//! solver owns (via [`Model::param_mut`] through the solver) takes effect on
//! the next step without recompilation. Adding or removing parameters changes
//! the shape of the slot table and requires a fresh `set_model`.

use indexmap::IndexMap;

/// One tunable scalar of a reaction-diffusion model.
///
/// `min` and `max` are advisory display/range hints for UI sliders; they are
/// never enforced on write. Only `value` feeds the simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Param {
    /// Lower display bound (advisory).
    pub min: f64,
    /// Upper display bound (advisory).
    pub max: f64,
    /// Current value, read by the reaction-term evaluator on every cell.
    pub value: f64,
}

impl Param {
    /// Convenience constructor.
    pub fn new(min: f64, max: f64, value: f64) -> Self {
        Self { min, max, value }
    }
}

/// Reserved name of the diffusion coefficient for species U.
pub const DIFFUSION_U: &str = "du";

/// Reserved name of the diffusion coefficient for species V.
pub const DIFFUSION_V: &str = "dv";

/// A named parameter set plus the two reaction-term expressions.
///
/// `fu` and `fv` are infix arithmetic over the parameter names and the two
/// implicit variables `x` (concentration of U) and `y` (concentration of V).
/// An expression referencing any other identifier fails compilation, which
/// invalidates the model as a whole.
///
/// Parameter iteration order is insertion order ([`IndexMap`]), which keeps
/// slot assignment in the compiled evaluator deterministic.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    /// Parameter name to parameter, keys unique, order stable.
    pub params: IndexMap<String, Param>,
    /// Reaction term for species U, `fu(x, y)`.
    pub fu: String,
    /// Reaction term for species V, `fv(x, y)`.
    pub fv: String,
}

impl Model {
    /// Build a model from `(name, min, max, value)` tuples and the two
    /// reaction-term expressions.
    pub fn new<N, I>(params: I, fu: impl Into<String>, fv: impl Into<String>) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, f64, f64, f64)>,
    {
        Self {
            params: params
                .into_iter()
                .map(|(name, min, max, value)| (name.into(), Param { min, max, value }))
                .collect(),
            fu: fu.into(),
            fv: fv.into(),
        }
    }

    /// Current value of a parameter, if present.
    pub fn param_value(&self, name: &str) -> Option<f64> {
        self.params.get(name).map(|p| p.value)
    }

    /// Mutable access to a parameter, for between-step tuning.
    pub fn param_mut(&mut self, name: &str) -> Option<&mut Param> {
        self.params.get_mut(name)
    }

    /// The classic Gray-Scott system with the feed/kill variant and default
    /// coefficients used by the original desktop tool.
    ///
    /// `fu = -x*y*y + b - b*x`, `fv = x*y*y - d*y`.
    pub fn gray_scott() -> Self {
        Self::new(
            [
                (DIFFUSION_U, 0.0, 0.001, 0.00002),
                (DIFFUSION_V, 0.0, 0.001, 0.00001),
                ("b", 0.0, 0.1, 0.04),
                ("d", 0.0, 0.2, 0.1),
            ],
            "-x*y*y+b-b*x",
            "x*y*y-d*y",
        )
    }

    /// A FitzHugh-Nagumo activator-inhibitor system.
    ///
    /// `fu = lambda*x - x*x*x - k - sigma*y`, `fv = (x - y)/tau`.
    pub fn fitzhugh_nagumo() -> Self {
        Self::new(
            [
                (DIFFUSION_U, 0.0, 0.01, 0.00028),
                (DIFFUSION_V, 0.0, 0.05, 0.005),
                ("lambda", 0.0, 3.0, 1.0),
                ("sigma", 0.0, 2.0, 1.0),
                ("tau", 0.01, 50.0, 10.0),
                ("k", -0.2, 0.2, -0.005),
            ],
            "lambda*x-x*x*x-k-sigma*y",
            "(x-y)/tau",
        )
    }
}
