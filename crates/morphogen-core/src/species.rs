//! The two-species selector used by read-out APIs.

/// Selects one of the two chemical species tracked by the simulation.
///
/// The reaction-term expressions see the concentration of `U` through the
/// implicit variable `x` and the concentration of `V` through `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Species {
    /// First species (substrate in Gray-Scott terms).
    U,
    /// Second species (activator in Gray-Scott terms).
    V,
}

impl Species {
    /// Name of the implicit expression variable carrying this species'
    /// concentration at the cell being evaluated.
    pub fn implicit_var(self) -> &'static str {
        match self {
            Self::U => "x",
            Self::V => "y",
        }
    }
}
