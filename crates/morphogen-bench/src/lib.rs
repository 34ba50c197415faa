//! Benchmark profiles for the morphogen simulator.
//!
//! Provides pre-built solver setups shared by the bench targets:
//!
//! - [`reference_solver`]: 128x128 grid with the Gray-Scott preset
//! - [`stress_solver`]: 512x512 grid for throughput stress runs

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use morphogen_core::Model;
use morphogen_solver::Solver;

/// A ready 128x128 Gray-Scott solver at unit time step.
pub fn reference_solver() -> Solver {
    sized_solver(128)
}

/// A ready 512x512 Gray-Scott solver for stress runs.
pub fn stress_solver() -> Solver {
    sized_solver(512)
}

fn sized_solver(n: usize) -> Solver {
    let mut solver = Solver::new();
    solver.set_size(n).expect("bench sizes are valid");
    solver
        .set_model(Model::gray_scott())
        .expect("preset compiles");
    solver.set_time_step(1.0);
    solver
}
