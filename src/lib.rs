//! # grid_visualizer
//!
//! The search engine behind an interactive grid pathfinding visualizer. A user
//! paints a start, a finish and barriers on a bordered 4-connected grid, then
//! runs one of three searches and watches it cell by cell:
//!
//! - [Dijkstra](solver::dijkstra::DijkstraSolver): first-in first-out
//!   expansion, shortest paths under unit step cost.
//! - [A*](solver::astar::AstarSolver) with the
//!   [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as
//!   heuristic, also shortest.
//! - [Greedy best-first](solver::greedy::GreedySolver), which only looks at the
//!   heuristic and trades path quality for fewer expansions.
//!
//! Every run is a [Search] that performs exactly one expansion per
//! [step](Search::step), so a render loop can draw the grid in between, pause
//! by not stepping, or cancel through the shared [RunningFlag]. When the finish
//! is reached the path is reconstructed one cell per step as well, and a
//! [RunReport] summarises the run.
pub mod backtrack;
pub mod cell;
pub mod config;
pub mod error;
pub mod pathing_grid;
pub mod report;
pub mod search;
pub mod solver;

pub use crate::cell::{Cell, CellId, CellState};
pub use crate::config::GridConfig;
pub use crate::error::{ConfigError, GridError, Quit};
pub use crate::pathing_grid::PathingGrid;
pub use crate::report::{Algorithm, Outcome, RunReport};
pub use crate::search::{Headless, RunningFlag, Search, Signal, StepEvent, StepObserver};

use crate::solver::astar::AstarSolver;
use crate::solver::dijkstra::DijkstraSolver;
use crate::solver::greedy::GreedySolver;
use crate::solver::FrontierStrategy;
use log::info;

/// Owns a grid, the running flag and one instance of each strategy; this is
/// what a visualizer page holds on to. Runs borrow the grid for their duration,
/// so at most one search touches it at a time.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    pub grid: PathingGrid,
    flag: RunningFlag,
    dijkstra: DijkstraSolver,
    astar: AstarSolver,
    greedy: GreedySolver,
}

impl Pathfinder {
    pub fn new(grid: PathingGrid) -> Pathfinder {
        Pathfinder {
            grid,
            flag: RunningFlag::new(),
            dijkstra: DijkstraSolver::new(),
            astar: AstarSolver::new(),
            greedy: GreedySolver::new(),
        }
    }

    pub fn from_config(config: &GridConfig) -> Result<Pathfinder, ConfigError> {
        let grid = PathingGrid::from_config(config)?;
        info!(
            "Created {}x{} grid with cell size {}",
            grid.rows(),
            grid.cols(),
            config.cell_size
        );
        Ok(Pathfinder::new(grid))
    }

    /// A handle on the running flag, for a stop control to hold.
    pub fn flag(&self) -> RunningFlag {
        self.flag.clone()
    }

    pub fn is_running(&self) -> bool {
        self.flag.is_running()
    }

    pub fn stop(&self) {
        self.flag.stop();
    }

    /// Prepares a run of `algorithm` between the painted start and finish, to
    /// be stepped by the caller.
    pub fn search(&mut self, algorithm: Algorithm) -> Search<'_, dyn FrontierStrategy> {
        let strategy: &mut (dyn FrontierStrategy + 'static) = match algorithm {
            Algorithm::Dijkstra => &mut self.dijkstra,
            Algorithm::AStar => &mut self.astar,
            Algorithm::GreedyBestFirst => &mut self.greedy,
        };
        Search::new(&mut self.grid, strategy, self.flag.clone())
    }

    /// Runs `algorithm` to completion, calling `observer` after every step.
    pub fn run<O: StepObserver + ?Sized>(
        &mut self,
        algorithm: Algorithm,
        observer: &mut O,
    ) -> Result<RunReport, Quit> {
        self.search(algorithm).run(observer)
    }

    /// The path left on the grid by the last successful run, start and finish
    /// included. [None] once any cell between them is no longer marked as path.
    pub fn path(&self) -> Option<Vec<CellId>> {
        let start = self.grid.find_state(CellState::Start)?;
        let finish = self.grid.find_state(CellState::Finish)?;
        let path = backtrack::trace_path(&self.grid, start, finish)?;
        let inner = &path[1..path.len() - 1];
        inner
            .iter()
            .all(|id| self.grid.state(*id) == CellState::Path)
            .then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_every_algorithm_on_the_same_grid() {
        let grid: PathingGrid = "
            ++++++++
            +S_____+
            +_####_+
            +_____F+
            ++++++++"
            .parse()
            .unwrap();
        let mut pathfinder = Pathfinder::new(grid);
        for algorithm in Algorithm::ALL {
            let report = pathfinder.run(algorithm, &mut Headless).unwrap();
            assert_eq!(report.algorithm, algorithm);
            assert!(report.found());
            assert_eq!(report.path_length, 7);
            let path = pathfinder.path().unwrap();
            assert_eq!(path.len(), 8);
            assert!(!pathfinder.is_running());
        }
    }

    #[test]
    fn stop_handle_cancels_a_stepped_search() {
        let mut pathfinder = Pathfinder::from_config(&GridConfig::default()).unwrap();
        pathfinder.grid.place(1, 1).unwrap();
        pathfinder.grid.place(40, 60).unwrap();
        let stop = pathfinder.flag();
        let mut search = pathfinder.search(Algorithm::Dijkstra);
        assert!(matches!(search.step(), StepEvent::Expanded(_)));
        stop.stop();
        match search.step() {
            StepEvent::Finished(report) => assert_eq!(report.outcome, Outcome::Cancelled),
            other => panic!("expected the run to end, got {:?}", other),
        }
        drop(search);
        assert_eq!(pathfinder.grid.count_state(CellState::Visited), 0);
        assert!(pathfinder.path().is_none());
    }

    fn short_row() -> PathingGrid {
        "
        ++++++
        +S_F_+
        ++++++"
            .parse()
            .unwrap()
    }

    #[test]
    fn cancelled_run_leaves_no_path() {
        let mut pathfinder = Pathfinder::new(short_row());
        let stop = pathfinder.flag();
        let mut steps = 0;
        let report = pathfinder
            .run(Algorithm::GreedyBestFirst, &mut |_: &StepEvent, _: &PathingGrid| {
                steps += 1;
                if steps == 2 {
                    stop.stop();
                }
                Signal::Continue
            })
            .unwrap();
        assert_eq!(report.outcome, Outcome::Cancelled);
        assert_eq!(pathfinder.path(), None);
    }

    #[test]
    fn painting_over_a_path_invalidates_it() {
        let mut pathfinder = Pathfinder::new(short_row());
        let report = pathfinder.run(Algorithm::AStar, &mut Headless).unwrap();
        assert!(report.found());
        assert_eq!(pathfinder.path().map(|path| path.len()), Some(3));
        pathfinder.grid.set_state(1, 2, CellState::Barrier).unwrap();
        assert_eq!(pathfinder.path(), None);
    }

    #[test]
    fn dropped_search_lowers_the_flag() {
        let mut pathfinder = Pathfinder::new(short_row());
        let mut search = pathfinder.search(Algorithm::Dijkstra);
        assert!(matches!(search.step(), StepEvent::Expanded(_)));
        drop(search);
        assert!(!pathfinder.is_running());
        assert_eq!(pathfinder.grid.count_state(CellState::Queued), 0);
    }
}
