//! Compiled reaction kinetics bound to parameter slots.

use crate::error::ModelError;
use morphogen_core::{Model, Species};
use morphogen_expr::{compile, Program, VarTable};

/// Both reaction-term programs plus the slot array they evaluate against.
///
/// Slot layout: one slot per model parameter in map order, then the two
/// implicit variables `x` (U concentration) and `y` (V concentration).
/// Parameter slots are refilled from the live model once per step, so
/// between-step edits to a parameter's `value` are visible on the next step
/// with no recompilation. Adding or removing parameters reshapes the table
/// and requires a fresh compile, which `set_model` performs wholesale.
#[derive(Clone, Debug)]
pub(crate) struct CompiledKinetics {
    fu: Program,
    fv: Program,
    slots: Vec<f64>,
    param_count: usize,
}

impl CompiledKinetics {
    /// Build the slot table from `model` and compile both expressions.
    ///
    /// Fails if a parameter shadows `x`/`y` or if either expression is
    /// malformed or references an unknown identifier.
    pub fn compile(model: &Model) -> Result<Self, ModelError> {
        let mut table = VarTable::new();
        for name in model.params.keys() {
            // Model keys are unique, so a rejected push can only mean a
            // collision with a name pushed before it; with params first,
            // that cannot happen yet, but keep the check for clarity.
            if table.push(name.as_str()).is_none() {
                return Err(ModelError::ShadowedImplicitVar { name: name.clone() });
            }
        }
        let param_count = table.len();
        for implicit in [Species::U.implicit_var(), Species::V.implicit_var()] {
            if table.push(implicit).is_none() {
                return Err(ModelError::ShadowedImplicitVar {
                    name: implicit.to_string(),
                });
            }
        }

        let fu = compile(&model.fu, &table).map_err(|source| ModelError::Compile {
            species: Species::U,
            source,
        })?;
        let fv = compile(&model.fv, &table).map_err(|source| ModelError::Compile {
            species: Species::V,
            source,
        })?;

        Ok(Self {
            fu,
            fv,
            slots: vec![0.0; table.len()],
            param_count,
        })
    }

    /// Refill the parameter slots from the model's current values.
    ///
    /// Called once per step: the live link of the arena+index binding.
    /// Caller contract: `model` has the same parameter set (names and
    /// order) as the one this was compiled from.
    pub fn refresh(&mut self, model: &Model) {
        debug_assert_eq!(model.params.len(), self.param_count);
        for (slot, param) in model.params.values().enumerate() {
            self.slots[slot] = param.value;
        }
    }

    /// Evaluate both reaction terms at concentrations `(u, v)`.
    pub fn eval_at(&mut self, u: f64, v: f64) -> (f64, f64) {
        self.slots[self.param_count] = u;
        self.slots[self.param_count + 1] = v;
        (self.fu.eval(&self.slots), self.fv.eval(&self.slots))
    }
}
