//! Running per-species extrema.

use morphogen_core::Species;

/// Running minimum and maximum observed for each species since the last
/// full reinitialization.
///
/// Comparisons are non-strict (`>=`/`<=`): ties refresh the stored bound
/// without changing its numeric meaning. A freshly reset tracker holds the
/// `+inf`/`-inf` sentinels, so the first observation always sticks.
///
/// The tracker is a value type with an associative, commutative [`merge`],
/// so a parallel sweep can fold per-worker trackers at its barrier instead
/// of sharing mutable counters.
///
/// [`merge`]: Extrema::merge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extrema {
    /// Smallest U observed.
    pub min_u: f64,
    /// Largest U observed.
    pub max_u: f64,
    /// Smallest V observed.
    pub min_v: f64,
    /// Largest V observed.
    pub max_v: f64,
}

impl Extrema {
    /// A tracker holding the sentinels: every real observation replaces them.
    pub fn reset() -> Self {
        Self {
            min_u: f64::INFINITY,
            max_u: f64::NEG_INFINITY,
            min_v: f64::INFINITY,
            max_v: f64::NEG_INFINITY,
        }
    }

    /// Fold one cell's freshly written concentrations into the tracker.
    pub fn update(&mut self, u: f64, v: f64) {
        if u >= self.max_u {
            self.max_u = u;
        }
        if u <= self.min_u {
            self.min_u = u;
        }
        if v >= self.max_v {
            self.max_v = v;
        }
        if v <= self.min_v {
            self.min_v = v;
        }
    }

    /// Combine another tracker into this one (min/max reduction).
    pub fn merge(&mut self, other: &Extrema) {
        if other.max_u >= self.max_u {
            self.max_u = other.max_u;
        }
        if other.min_u <= self.min_u {
            self.min_u = other.min_u;
        }
        if other.max_v >= self.max_v {
            self.max_v = other.max_v;
        }
        if other.min_v <= self.min_v {
            self.min_v = other.min_v;
        }
    }

    /// `(min, max)` for one species.
    pub fn range(&self, species: Species) -> (f64, f64) {
        match species {
            Species::U => (self.min_u, self.max_u),
            Species::V => (self.min_v, self.max_v),
        }
    }
}

impl Default for Extrema {
    fn default() -> Self {
        Self::reset()
    }
}
