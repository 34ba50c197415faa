//! The double-buffered square concentration grid.

use crate::error::GridError;
use crate::extrema::Extrema;
use morphogen_core::Species;

/// Sharpness of the seeding Gaussians.
const SEED_FALLOFF: f64 = 80.0;

/// Off-center displacement of the seeding bumps, so the two species do not
/// start co-located.
const SEED_OFFSET: (f64, f64) = (0.05, 0.02);

/// A square grid of side `size` holding the two species' concentrations,
/// double-buffered: `u0`/`v0` are the current (read) state, `u`/`v` the next
/// (write) state.
///
/// The physical domain is fixed to `[-1, 1] x [-1, 1]`; cell `(i, j)` sits at
/// `x = -1 + i * 2/(size-1)`, `y = -1 + j * 2/(size-1)`. Buffers are flat
/// row-major, index `i * size + j`.
///
/// Invariant: `size >= 2`. Construction and [`resize`](GridField::resize)
/// reject anything smaller without touching existing state.
#[derive(Clone, Debug, PartialEq)]
pub struct GridField {
    size: usize,
    u0: Vec<f64>,
    v0: Vec<f64>,
    u: Vec<f64>,
    v: Vec<f64>,
    extrema: Extrema,
}

/// Disjoint borrows of the four buffers for one sweep: read-only current
/// state, mutable next state.
///
/// Handing the sweep this view (instead of `&mut GridField`) makes the
/// read/write separation a compile-time fact: a step can only read `u0`/`v0`
/// and only write `u`/`v`, which is what makes the interior update safe to
/// traverse in any order.
pub struct FieldViews<'a> {
    /// Grid side length.
    pub size: usize,
    /// Current U concentrations (read).
    pub u0: &'a [f64],
    /// Current V concentrations (read).
    pub v0: &'a [f64],
    /// Next U concentrations (write).
    pub u: &'a mut [f64],
    /// Next V concentrations (write).
    pub v: &'a mut [f64],
}

impl GridField {
    /// Create a seeded grid of side `n`.
    pub fn new(n: usize) -> Result<Self, GridError> {
        if n <= 1 {
            return Err(GridError::SizeTooSmall { size: n });
        }
        let mut grid = Self {
            size: n,
            u0: vec![0.0; n * n],
            v0: vec![0.0; n * n],
            u: Vec::new(),
            v: Vec::new(),
            extrema: Extrema::reset(),
        };
        grid.seed();
        Ok(grid)
    }

    /// Throw away all state and reinitialize at side `n`.
    ///
    /// Fails without any state change for `n <= 1`. On success the previous
    /// contents and extrema are discarded and the grid is reseeded with the
    /// deterministic initial condition.
    pub fn resize(&mut self, n: usize) -> Result<(), GridError> {
        if n <= 1 {
            return Err(GridError::SizeTooSmall { size: n });
        }
        self.size = n;
        self.u0 = vec![0.0; n * n];
        self.v0 = vec![0.0; n * n];
        self.extrema = Extrema::reset();
        self.seed();
        Ok(())
    }

    /// Seed `u0`/`v0` with the two off-center Gaussian bumps, fold every
    /// seeded cell into the extrema, overwrite the border with the
    /// zero-gradient copies, and mirror into `u`/`v`.
    fn seed(&mut self) {
        let n = self.size;
        let h = 2.0 / (n - 1) as f64;
        let (dx, dy) = SEED_OFFSET;

        for i in 0..n {
            let x = -1.0 + i as f64 * h;
            for j in 0..n {
                let y = -1.0 + j as f64 * h;
                let u = 1.0 - (-SEED_FALLOFF * ((x + dx).powi(2) + (y + dy).powi(2))).exp();
                let v = (-SEED_FALLOFF * ((x - dx).powi(2) + (y - dy).powi(2))).exp();
                self.u0[i * n + j] = u;
                self.v0[i * n + j] = v;
                self.extrema.update(u, v);
            }
        }

        boundary_pass(&mut self.u0, n);
        boundary_pass(&mut self.v0, n);

        self.u = self.u0.clone();
        self.v = self.v0.clone();
    }

    /// Grid side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current (read-state) U concentrations, flat row-major.
    pub fn u0(&self) -> &[f64] {
        &self.u0
    }

    /// Current (read-state) V concentrations, flat row-major.
    pub fn v0(&self) -> &[f64] {
        &self.v0
    }

    /// Current concentration of `species` at cell `(i, j)`.
    pub fn get(&self, species: Species, i: usize, j: usize) -> f64 {
        let buf = match species {
            Species::U => &self.u0,
            Species::V => &self.v0,
        };
        buf[i * self.size + j]
    }

    /// Running extrema since the last reinitialization.
    pub fn extrema(&self) -> &Extrema {
        &self.extrema
    }

    /// Fold a locally accumulated tracker into the running extrema.
    ///
    /// The solver accumulates per-sweep extrema off to the side and merges
    /// once after the barrier, keeping the sweep free of shared mutable
    /// state.
    pub fn merge_extrema(&mut self, local: &Extrema) {
        self.extrema.merge(local);
    }

    /// Disjoint read/write views over the four buffers for one sweep.
    pub fn views(&mut self) -> FieldViews<'_> {
        FieldViews {
            size: self.size,
            u0: &self.u0,
            v0: &self.v0,
            u: &mut self.u,
            v: &mut self.v,
        }
    }

    /// Apply the zero-gradient boundary to both write buffers.
    ///
    /// Each border cell copies its adjacent interior neighbour. The row
    /// copies run first and the column copies second, so the corner cells
    /// (written by both) keep the column result. Idempotent.
    pub fn apply_boundary(&mut self) {
        boundary_pass(&mut self.u, self.size);
        boundary_pass(&mut self.v, self.size);
    }

    /// Adopt the write buffers as the new current state.
    ///
    /// A logical swap: no copy, no reallocation. The old current state
    /// remains in the (now stale) write buffers and is fully overwritten by
    /// the next sweep plus boundary pass.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.u0, &mut self.u);
        std::mem::swap(&mut self.v0, &mut self.v);
    }

    /// Replace the write buffers outright, then adopt them.
    ///
    /// Used by the corrector, which builds the refined state in scratch
    /// storage. The displaced buffers are returned for reuse.
    pub fn adopt(&mut self, u: Vec<f64>, v: Vec<f64>) -> (Vec<f64>, Vec<f64>) {
        debug_assert_eq!(u.len(), self.size * self.size);
        debug_assert_eq!(v.len(), self.size * self.size);
        let old_u = std::mem::replace(&mut self.u, u);
        let old_v = std::mem::replace(&mut self.v, v);
        self.swap();
        (old_u, old_v)
    }

    /// The current field of `species` normalized to `[0, 1]` against its
    /// running extrema, for the rendering interface.
    ///
    /// Returns all zeros when the observed range is degenerate (flat field),
    /// rather than dividing by zero.
    pub fn normalized(&self, species: Species) -> Vec<f64> {
        let (min, max) = self.extrema.range(species);
        let buf = match species {
            Species::U => &self.u0,
            Species::V => &self.v0,
        };
        let range = max - min;
        if range <= 0.0 || !range.is_finite() {
            return vec![0.0; buf.len()];
        }
        buf.iter().map(|&value| (value - min) / range).collect()
    }
}

/// One zero-gradient boundary pass over a flat `n * n` buffer.
///
/// Row copies first (`[i][0] <- [i][1]`, `[i][n-1] <- [i][n-2]`), then
/// column copies (`[0][j] <- [1][j]`, `[n-1][j] <- [n-2][j]`). Corners are
/// written by both; the column copy lands last and wins.
pub fn boundary_pass(buf: &mut [f64], n: usize) {
    for i in 0..n {
        buf[i * n] = buf[i * n + 1];
        buf[i * n + (n - 1)] = buf[i * n + (n - 2)];
    }
    for j in 0..n {
        buf[j] = buf[n + j];
        buf[(n - 1) * n + j] = buf[(n - 2) * n + j];
    }
}
