//! The reaction-diffusion solver and its lifecycle.

use crate::error::{ModelError, StepError};
use crate::kinetics::CompiledKinetics;
use crate::stencil::laplace;
use morphogen_core::{Model, Param, DIFFUSION_U, DIFFUSION_V};
use morphogen_grid::{boundary_pass, Extrema, GridError, GridField};

/// Where the solver sits in its lifecycle.
///
/// `solve()`/`correct()` only advance state in `Ready`; earlier states make
/// them inert. A successful `set_size` while `Ready` reseeds the grid but
/// keeps the compiled model (the expressions bind parameter slots, not grid
/// cells), so the simulation restarts without a new `set_model`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverState {
    /// No grid yet; `set_size` has never succeeded.
    Unsized,
    /// Grid present, no validly compiled model.
    Sized,
    /// Grid and compiled model present; stepping advances the field.
    Ready,
}

/// Explicit-Euler reaction-diffusion stepper over a [`GridField`].
///
/// Construction gives an inert solver; drive it through the lifecycle with
/// [`set_size`](Solver::set_size) and [`set_model`](Solver::set_model), then
/// call [`solve`](Solver::solve) (or [`correct`](Solver::correct)) once per
/// time unit. Between steps, read the field through
/// [`grid`](Solver::grid) and tune parameter values through
/// [`param_mut`](Solver::param_mut).
#[derive(Clone, Debug)]
pub struct Solver {
    grid: Option<GridField>,
    model: Option<Model>,
    kinetics: Option<CompiledKinetics>,
    dt: f64,
    // Corrector scratch, recycled across steps.
    scratch_u: Vec<f64>,
    scratch_v: Vec<f64>,
}

impl Solver {
    /// An unsized solver with the default unit time step.
    pub fn new() -> Self {
        Self {
            grid: None,
            model: None,
            kinetics: None,
            dt: 1.0,
            scratch_u: Vec::new(),
            scratch_v: Vec::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SolverState {
        match (&self.grid, &self.kinetics) {
            (None, _) => SolverState::Unsized,
            (Some(_), None) => SolverState::Sized,
            (Some(_), Some(_)) => SolverState::Ready,
        }
    }

    /// Create or reinitialize the grid at side `n`.
    ///
    /// `n <= 1` fails with no state change at all: the previous grid (if
    /// any), model, and compiled expressions survive untouched. On success
    /// the grid is reseeded, which restarts the simulation.
    pub fn set_size(&mut self, n: usize) -> Result<(), GridError> {
        match &mut self.grid {
            Some(grid) => grid.resize(n),
            None => {
                self.grid = Some(GridField::new(n)?);
                Ok(())
            }
        }
    }

    /// Store the time step for subsequent steps.
    ///
    /// Deliberately unvalidated: the explicit scheme has no built-in CFL
    /// check, and a `dt` violating the stability bound simply diverges.
    pub fn set_time_step(&mut self, dt: f64) {
        self.dt = dt;
    }

    /// Current time step.
    pub fn time_step(&self) -> f64 {
        self.dt
    }

    /// Replace the model and recompile both reaction terms.
    ///
    /// The previous evaluator is dropped before compilation, so a failure
    /// leaves the solver with no evaluator at all: stepping reports
    /// [`StepError::NoModel`] until a valid model is set. The grid is never
    /// touched here.
    pub fn set_model(&mut self, model: Model) -> Result<(), ModelError> {
        self.kinetics = None;
        let compiled = CompiledKinetics::compile(&model);
        self.model = Some(model);
        self.kinetics = Some(compiled?);
        Ok(())
    }

    /// The model last passed to `set_model`, compiled or not.
    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    /// Mutable access to one parameter for between-step tuning.
    ///
    /// Only `value` matters to the running simulation; the next step reads
    /// it through the slot binding with no recompilation. The parameter
    /// *set* cannot be reshaped this way, which is what keeps the compiled
    /// slot indices valid.
    pub fn param_mut(&mut self, name: &str) -> Option<&mut Param> {
        self.model.as_mut()?.param_mut(name)
    }

    /// The grid, once sized.
    pub fn grid(&self) -> Option<&GridField> {
        self.grid.as_ref()
    }

    /// Advance one explicit-Euler step.
    ///
    /// For every interior cell:
    /// `u' = u0 + dt * (du * lap(u0) / (3 h^2) + fu(u0, v0))`, symmetrically
    /// for `v`. Reads come only from the current buffers and writes go only
    /// to the next buffers, so traversal order is immaterial. Afterwards the
    /// boundary is re-established, the interior extrema are folded in, and
    /// the next buffers become current.
    ///
    /// Absent diffusion parameters (`du`/`dv`) default to zero diffusion.
    pub fn solve(&mut self) -> Result<(), StepError> {
        let grid = self.grid.as_mut().ok_or(StepError::Unsized)?;
        let (model, kinetics) = match (&self.model, &mut self.kinetics) {
            (Some(model), Some(kinetics)) => (model, kinetics),
            _ => return Err(StepError::NoModel),
        };

        // Re-read every step: parameters are a live link, not a snapshot.
        let du = model.param_value(DIFFUSION_U).unwrap_or(0.0);
        let dv = model.param_value(DIFFUSION_V).unwrap_or(0.0);
        kinetics.refresh(model);

        let n = grid.size();
        let h = 2.0 / (n - 1) as f64;
        let invh = 1.0 / (3.0 * h * h);
        let dt = self.dt;

        let mut local = Extrema::reset();
        {
            let views = grid.views();
            for i in 1..n - 1 {
                for j in 1..n - 1 {
                    let idx = i * n + j;
                    let (fu, fv) = kinetics.eval_at(views.u0[idx], views.v0[idx]);
                    let u_next =
                        views.u0[idx] + dt * (invh * du * laplace(views.u0, n, i, j) + fu);
                    let v_next =
                        views.v0[idx] + dt * (invh * dv * laplace(views.v0, n, i, j) + fv);
                    views.u[idx] = u_next;
                    views.v[idx] = v_next;
                    local.update(u_next, v_next);
                }
            }
        }

        grid.apply_boundary();
        grid.merge_extrema(&local);
        grid.swap();
        Ok(())
    }

    /// Advance one trapezoidal predictor-corrector step.
    ///
    /// Runs the Euler update as a predictor, then recomputes the step using
    /// the average of the Laplacian and reaction terms evaluated at the old
    /// and the predicted state:
    /// `u' = u0 + dt * (du * (lap(u0) + lap(u*)) / (6 h^2)
    ///                  + (fu(u0, v0) + fu(u*, v*)) / 2)`.
    ///
    /// An alternative per-step mode to [`solve`](Solver::solve), not a
    /// refinement applied on top of it: call one or the other each step.
    pub fn correct(&mut self) -> Result<(), StepError> {
        let grid = self.grid.as_mut().ok_or(StepError::Unsized)?;
        let (model, kinetics) = match (&self.model, &mut self.kinetics) {
            (Some(model), Some(kinetics)) => (model, kinetics),
            _ => return Err(StepError::NoModel),
        };

        let du = model.param_value(DIFFUSION_U).unwrap_or(0.0);
        let dv = model.param_value(DIFFUSION_V).unwrap_or(0.0);
        kinetics.refresh(model);

        let n = grid.size();
        let h = 2.0 / (n - 1) as f64;
        let invh = 1.0 / (3.0 * h * h);
        let dt = self.dt;

        // Predictor: the plain Euler update into the write buffers, with a
        // boundary pass so the corrector's Laplacian reads sane border
        // values. Extrema wait for the corrected field.
        {
            let views = grid.views();
            for i in 1..n - 1 {
                for j in 1..n - 1 {
                    let idx = i * n + j;
                    let (fu, fv) = kinetics.eval_at(views.u0[idx], views.v0[idx]);
                    views.u[idx] =
                        views.u0[idx] + dt * (invh * du * laplace(views.u0, n, i, j) + fu);
                    views.v[idx] =
                        views.v0[idx] + dt * (invh * dv * laplace(views.v0, n, i, j) + fv);
                }
            }
        }
        grid.apply_boundary();

        // Corrector: average old and predicted terms, writing into scratch.
        self.scratch_u.resize(n * n, 0.0);
        self.scratch_v.resize(n * n, 0.0);
        let mut local = Extrema::reset();
        {
            let views = grid.views();
            for i in 1..n - 1 {
                for j in 1..n - 1 {
                    let idx = i * n + j;
                    let (fu0, fv0) = kinetics.eval_at(views.u0[idx], views.v0[idx]);
                    let (fu1, fv1) = kinetics.eval_at(views.u[idx], views.v[idx]);
                    let lap_u = 0.5 * (laplace(views.u0, n, i, j) + laplace(views.u, n, i, j));
                    let lap_v = 0.5 * (laplace(views.v0, n, i, j) + laplace(views.v, n, i, j));
                    let u_next =
                        views.u0[idx] + dt * (invh * du * lap_u + 0.5 * (fu0 + fu1));
                    let v_next =
                        views.v0[idx] + dt * (invh * dv * lap_v + 0.5 * (fv0 + fv1));
                    self.scratch_u[idx] = u_next;
                    self.scratch_v[idx] = v_next;
                    local.update(u_next, v_next);
                }
            }
        }

        boundary_pass(&mut self.scratch_u, n);
        boundary_pass(&mut self.scratch_v, n);
        grid.merge_extrema(&local);

        let corrected_u = std::mem::take(&mut self.scratch_u);
        let corrected_v = std::mem::take(&mut self.scratch_v);
        let (spare_u, spare_v) = grid.adopt(corrected_u, corrected_v);
        self.scratch_u = spare_u;
        self.scratch_v = spare_v;
        Ok(())
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphogen_core::Species;
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;

    fn ready_solver(n: usize) -> Solver {
        let mut solver = Solver::new();
        solver.set_size(n).unwrap();
        solver.set_model(Model::gray_scott()).unwrap();
        solver
    }

    #[test]
    fn lifecycle_states() {
        let mut solver = Solver::new();
        assert_eq!(solver.state(), SolverState::Unsized);
        assert_eq!(solver.solve(), Err(StepError::Unsized));

        solver.set_size(16).unwrap();
        assert_eq!(solver.state(), SolverState::Sized);
        assert_eq!(solver.solve(), Err(StepError::NoModel));

        solver.set_model(Model::gray_scott()).unwrap();
        assert_eq!(solver.state(), SolverState::Ready);
        assert!(solver.solve().is_ok());
    }

    #[test]
    fn set_size_failure_changes_nothing() {
        let mut solver = ready_solver(8);
        solver.solve().unwrap();
        let before = solver.grid().unwrap().clone();

        assert!(solver.set_size(1).is_err());
        assert_eq!(solver.state(), SolverState::Ready);
        assert_eq!(solver.grid().unwrap(), &before);
    }

    #[test]
    fn resize_keeps_compiled_model() {
        let mut solver = ready_solver(8);
        solver.solve().unwrap();
        solver.set_size(12).unwrap();
        // Still Ready: expressions bind parameter slots, not grid size.
        assert_eq!(solver.state(), SolverState::Ready);
        assert!(solver.solve().is_ok());
        assert_eq!(solver.grid().unwrap().size(), 12);
    }

    #[test]
    fn failed_model_leaves_solver_inert_and_grid_unchanged() {
        let mut solver = ready_solver(8);
        solver.solve().unwrap();
        let before = solver.grid().unwrap().clone();

        let bad = Model::new([("b", 0.0, 1.0, 0.5)], "b*x", "nope*y");
        assert!(solver.set_model(bad).is_err());
        assert_eq!(solver.state(), SolverState::Sized);
        assert_eq!(solver.solve(), Err(StepError::NoModel));
        assert_eq!(solver.grid().unwrap(), &before);
    }

    #[test]
    fn zero_kinetics_zero_diffusion_is_identity() {
        let mut solver = Solver::new();
        solver.set_size(9).unwrap();
        solver
            .set_model(Model::new(
                [("du", 0.0, 1.0, 0.0), ("dv", 0.0, 1.0, 0.0)],
                "0",
                "0",
            ))
            .unwrap();
        let before = solver.grid().unwrap().u0().to_vec();
        let before_v = solver.grid().unwrap().v0().to_vec();
        for _ in 0..5 {
            solver.solve().unwrap();
        }
        assert_eq!(solver.grid().unwrap().u0(), &before[..]);
        assert_eq!(solver.grid().unwrap().v0(), &before_v[..]);
    }

    #[test]
    fn missing_diffusion_params_mean_zero_diffusion() {
        let mut solver = Solver::new();
        solver.set_size(7).unwrap();
        solver
            .set_model(Model::new::<&str, _>([], "0", "0"))
            .unwrap();
        let before = solver.grid().unwrap().u0().to_vec();
        solver.solve().unwrap();
        assert_eq!(solver.grid().unwrap().u0(), &before[..]);
    }

    #[test]
    fn boundary_invariant_after_each_step() {
        let mut solver = ready_solver(5);
        solver.set_time_step(1.0);
        for _ in 0..3 {
            solver.solve().unwrap();
            let grid = solver.grid().unwrap();
            let n = grid.size();
            for buf in [grid.u0(), grid.v0()] {
                for i in 0..n {
                    assert_eq!(buf[i * n], buf[i * n + 1]);
                    assert_eq!(buf[i * n + (n - 1)], buf[i * n + (n - 2)]);
                }
                for j in 0..n {
                    assert_eq!(buf[j], buf[n + j]);
                    assert_eq!(buf[(n - 1) * n + j], buf[(n - 2) * n + j]);
                }
            }
        }
    }

    #[test]
    fn extrema_bracket_the_field_after_stepping() {
        let mut solver = ready_solver(5);
        solver.solve().unwrap();
        let grid = solver.grid().unwrap();
        let (min_u, max_u) = grid.extrema().range(Species::U);
        for &value in grid.u0() {
            assert!(value >= min_u && value <= max_u);
        }
        let (min_v, max_v) = grid.extrema().range(Species::V);
        for &value in grid.v0() {
            assert!(value >= min_v && value <= max_v);
        }
    }

    #[test]
    fn parameter_edits_apply_on_the_next_step() {
        // With fu = b (a pure source) and no diffusion, each step adds
        // dt * b to every interior U cell.
        let mut solver = Solver::new();
        solver.set_size(5).unwrap();
        solver
            .set_model(Model::new([("b", 0.0, 10.0, 1.0)], "b", "0"))
            .unwrap();
        solver.set_time_step(1.0);

        let u_before = solver.grid().unwrap().get(Species::U, 2, 2);
        solver.solve().unwrap();
        let after_one = solver.grid().unwrap().get(Species::U, 2, 2);
        assert!((after_one - (u_before + 1.0)).abs() < 1e-12);

        solver.param_mut("b").unwrap().value = 5.0;
        solver.solve().unwrap();
        let after_two = solver.grid().unwrap().get(Species::U, 2, 2);
        assert!((after_two - (after_one + 5.0)).abs() < 1e-12);
    }

    #[test]
    fn correct_is_inert_in_early_states() {
        let mut solver = Solver::new();
        assert_eq!(solver.correct(), Err(StepError::Unsized));
        solver.set_size(6).unwrap();
        assert_eq!(solver.correct(), Err(StepError::NoModel));
    }

    #[test]
    fn correct_matches_solve_for_constant_kinetics() {
        // With fu = b constant and zero diffusion, predictor and corrector
        // coincide: the averaged term equals the term itself.
        let model = Model::new([("b", 0.0, 10.0, 0.5)], "b", "0");

        let mut euler = Solver::new();
        euler.set_size(6).unwrap();
        euler.set_model(model.clone()).unwrap();
        euler.solve().unwrap();

        let mut trapezoid = Solver::new();
        trapezoid.set_size(6).unwrap();
        trapezoid.set_model(model).unwrap();
        trapezoid.correct().unwrap();

        assert_eq!(euler.grid().unwrap().u0(), trapezoid.grid().unwrap().u0());
    }

    #[test]
    fn correct_damps_linear_decay_toward_the_exact_solution() {
        // du/dt = -u with u(0) = 1: exact e^{-dt}. For dt = 0.1, Euler gives
        // 0.9; the trapezoidal correction gives 0.905, strictly closer.
        let model = Model::new(
            [("du", 0.0, 1.0, 0.0), ("dv", 0.0, 1.0, 0.0)],
            "-x",
            "0",
        );
        let dt = 0.1;

        let mut euler = Solver::new();
        euler.set_size(6).unwrap();
        euler.set_model(model.clone()).unwrap();
        euler.set_time_step(dt);

        let mut trapezoid = euler.clone();

        let start = euler.grid().unwrap().get(Species::U, 3, 3);
        euler.solve().unwrap();
        trapezoid.correct().unwrap();

        let exact = start * (-dt).exp();
        let euler_err = (euler.grid().unwrap().get(Species::U, 3, 3) - exact).abs();
        let trap_err = (trapezoid.grid().unwrap().get(Species::U, 3, 3) - exact).abs();
        assert!(
            trap_err < euler_err,
            "trapezoid {trap_err} should beat euler {euler_err}"
        );
    }

    #[test]
    fn unstable_time_steps_are_accepted_and_diverge() {
        let mut solver = Solver::new();
        solver.set_size(16).unwrap();
        solver
            .set_model(Model::new(
                [("du", 0.0, 1.0, 0.5), ("dv", 0.0, 1.0, 0.5)],
                "0",
                "0",
            ))
            .unwrap();
        // Grossly violates the explicit stability bound for this spacing.
        solver.set_time_step(1.0e6);
        for _ in 0..50 {
            solver.solve().unwrap();
        }
        // Divergence (or non-finite blow-up) is accepted behavior, never an
        // error or a panic.
        let grid = solver.grid().unwrap();
        assert!(grid
            .u0()
            .iter()
            .any(|value| value.is_nan() || value.abs() > 1.0e3));
    }

    #[test]
    fn minimum_grid_has_no_interior_and_stays_fixed() {
        let mut solver = ready_solver(2);
        let before = solver.grid().unwrap().u0().to_vec();
        solver.solve().unwrap();
        assert_eq!(solver.grid().unwrap().u0(), &before[..]);
    }

    fn assert_step_invariants(solver: &Solver) -> Result<(), TestCaseError> {
        let grid = solver.grid().unwrap();
        let n = grid.size();
        for (species, buf) in [(Species::U, grid.u0()), (Species::V, grid.v0())] {
            for i in 0..n {
                prop_assert_eq!(buf[i * n], buf[i * n + 1]);
                prop_assert_eq!(buf[i * n + (n - 1)], buf[i * n + (n - 2)]);
                prop_assert_eq!(buf[i], buf[n + i]);
                prop_assert_eq!(buf[(n - 1) * n + i], buf[(n - 2) * n + i]);
            }
            let (min, max) = grid.extrema().range(species);
            for &value in buf {
                prop_assert!(value >= min && value <= max);
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn solve_preserves_boundary_and_extrema_invariants(
            n in 3usize..16,
            dt in 0.01f64..1.0,
            steps in 1usize..6,
        ) {
            let mut solver = ready_solver(n);
            solver.set_time_step(dt);
            for _ in 0..steps {
                solver.solve().unwrap();
                assert_step_invariants(&solver)?;
            }
        }

        #[test]
        fn correct_preserves_boundary_and_extrema_invariants(
            n in 3usize..16,
            dt in 0.01f64..1.0,
            steps in 1usize..6,
        ) {
            let mut solver = ready_solver(n);
            solver.set_time_step(dt);
            for _ in 0..steps {
                solver.correct().unwrap();
                assert_step_invariants(&solver)?;
            }
        }
    }
}
