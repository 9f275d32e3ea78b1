use grid_visualizer::{Algorithm, Headless, Pathfinder, PathingGrid};

// In this example A* finds a path on a small painted grid with shape
// ++++++++++
// +S_______+
// +_######_+
// +______#_+
// +_####_#F+
// ++++++++++
// where
// - + marks the border
// - # marks a barrier
// - S marks the start
// - F marks the finish
//
// Path cells are printed as *.

fn main() {
    let grid: PathingGrid = "
        ++++++++++
        +S_______+
        +_######_+
        +______#_+
        +_####_#F+
        ++++++++++"
        .parse()
        .unwrap();
    let mut pathfinder = Pathfinder::new(grid);
    println!("{}", pathfinder.grid);
    let report = pathfinder.run(Algorithm::AStar, &mut Headless).unwrap();
    println!("{}", pathfinder.grid);
    println!("{}", report);
    println!("Path:");
    for id in pathfinder.path().unwrap() {
        let cell = &pathfinder.grid[id];
        println!("({}, {})", cell.row(), cell.col());
    }
}
