//! Run the Gray-Scott system headless and print ASCII density frames,
//! standing in for the GUI frontend's colormap rendering.
//!
//! ```sh
//! cargo run --example gray_scott
//! ```

use morphogen::prelude::*;

const SIZE: usize = 48;
const STEPS: usize = 4000;
const FRAME_EVERY: usize = 1000;
const SHADES: &[u8] = b" .:-=+*#%@";

fn print_frame(grid: &GridField, step: usize) {
    let frame = grid.normalized(Species::V);
    println!("-- step {step} --");
    for i in 0..SIZE {
        let row: String = (0..SIZE)
            .map(|j| {
                let level = (frame[i * SIZE + j] * (SHADES.len() - 1) as f64) as usize;
                SHADES[level.min(SHADES.len() - 1)] as char
            })
            .collect();
        println!("{row}");
    }
}

fn main() {
    let mut solver = Solver::new();
    solver.set_size(SIZE).expect("valid grid size");
    solver.set_model(Model::gray_scott()).expect("preset compiles");
    solver.set_time_step(1.0);

    print_frame(solver.grid().expect("sized"), 0);
    for step in 1..=STEPS {
        solver.solve().expect("solver is ready");
        if step % FRAME_EVERY == 0 {
            print_frame(solver.grid().expect("sized"), step);
        }
    }
}
