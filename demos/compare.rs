use grid_visualizer::{Algorithm, CellState, GridConfig, Headless, Pathfinder};
use rand::prelude::*;

// Runs all three searches on the same randomly scattered grid and prints the
// report line of each, the way the visualizer shows them side by side.
// The cell size can be given as first argument.

fn main() {
    let cell_size = match std::env::args().nth(1) {
        Some(arg) => match GridConfig::parse_cell_size(&arg) {
            Ok(size) => size,
            Err(err) => {
                eprintln!("{}", err);
                return;
            }
        },
        None => 20,
    };
    let config = GridConfig::with_cell_size(cell_size).unwrap();
    let mut pathfinder = Pathfinder::from_config(&config).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    pathfinder.grid.scatter_barriers(&mut rng);
    let (rows, cols) = (pathfinder.grid.rows(), pathfinder.grid.cols());
    pathfinder.grid.set_state(1, 1, CellState::Start).unwrap();
    pathfinder
        .grid
        .set_state(rows - 2, cols - 2, CellState::Finish)
        .unwrap();

    for algorithm in Algorithm::ALL {
        let report = pathfinder.run(algorithm, &mut Headless).unwrap();
        println!("{}", pathfinder.grid);
        println!("{}\n", report);
    }
}
