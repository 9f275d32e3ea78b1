use grid_visualizer::{Algorithm, Pathfinder, PathingGrid, StepEvent};

// Drives a greedy best-first search by hand, printing the grid after every
// step the way a render loop would redraw it. Queued cells are printed as o,
// visited cells as . and path cells as *.

fn main() {
    let grid: PathingGrid = "
        ++++++++
        +S__#__+
        +__##__+
        +______+
        +___#_F+
        ++++++++"
        .parse()
        .unwrap();
    let mut pathfinder = Pathfinder::new(grid);
    let mut search = pathfinder.search(Algorithm::GreedyBestFirst);
    let report = loop {
        match search.step() {
            StepEvent::Expanded(id) => {
                let cell = search.grid().cell(id);
                println!("Expanded ({}, {}):", cell.row(), cell.col());
            }
            StepEvent::Backtracked(id) => {
                let cell = search.grid().cell(id);
                println!("Path through ({}, {}):", cell.row(), cell.col());
            }
            StepEvent::Finished(report) => break report,
        }
        println!("{}", search.grid());
    };
    println!("{}", report);
}
