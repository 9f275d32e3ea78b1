use crate::cell::{CellId, CellState};
use crate::error::Quit;
use crate::pathing_grid::PathingGrid;
use crate::report::{Algorithm, RunReport};
use crate::search::{RunningFlag, Search, StepObserver};
use fxhash::FxBuildHasher;
use indexmap::IndexSet;

pub mod astar;
pub mod dijkstra;
pub mod greedy;

/// Insertion-ordered open set. Removal goes through `shift_remove_index` so that
/// ties in the selection rules are always broken by discovery order.
pub type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// A node selection policy plus a neighbour admission rule. The step loop,
/// cancellation, resets and backtracking are shared and live in [Search]; a
/// strategy only owns its frontier.
pub trait FrontierStrategy {
    fn algorithm(&self) -> Algorithm;

    /// Empties the frontier, puts `start` in it and initialises whichever cost
    /// fields the strategy reads. The grid has already been reset.
    fn seed(&mut self, grid: &mut PathingGrid, start: CellId, finish: CellId);

    /// Removes and returns the next cell to expand, [None] once the frontier
    /// is empty.
    fn select(&mut self, grid: &PathingGrid) -> Option<CellId>;

    /// Admits (or relaxes) the neighbours of `current`, recording predecessors.
    fn admit_neighbours(&mut self, grid: &mut PathingGrid, current: CellId);

    fn frontier_len(&self) -> usize;

    /// Drops the partial frontier once a run is over.
    fn clear(&mut self);

    /// Starts a search on `grid` between its painted start and finish cells.
    fn search<'g>(&'g mut self, grid: &'g mut PathingGrid, flag: &RunningFlag) -> Search<'g, Self>
    where
        Self: Sized,
    {
        Search::new(grid, self, flag.clone())
    }

    /// Runs a search to completion, calling `observer` after every expansion
    /// and every backtracked path cell.
    fn run<O>(
        &mut self,
        grid: &mut PathingGrid,
        flag: &RunningFlag,
        observer: &mut O,
    ) -> Result<RunReport, Quit>
    where
        Self: Sized,
        O: StepObserver + ?Sized,
    {
        self.search(grid, flag).run(observer)
    }
}

/// Admission rule shared by the strategies without relaxation: a Blank cell
/// becomes Queued, the finish is taken the first time it is seen. Either way the
/// predecessor is set exactly once. Returns whether the cell was admitted.
pub(crate) fn discover(grid: &mut PathingGrid, current: CellId, neighbour: CellId) -> bool {
    let cell = grid.cell_mut(neighbour);
    match cell.state {
        CellState::Blank => {
            cell.state = CellState::Queued;
            cell.predecessor = Some(current);
            true
        }
        CellState::Finish if cell.predecessor.is_none() => {
            cell.predecessor = Some(current);
            true
        }
        _ => false,
    }
}

/// Fills in the Manhattan distance to `finish` as every cell's h cost.
pub(crate) fn assign_heuristic(grid: &mut PathingGrid, finish: CellId) {
    let (row, col) = (grid[finish].row(), grid[finish].col());
    for ix in 0..grid.len() {
        let cell = grid.cell_mut(CellId(ix));
        cell.h_cost = cell.manhattan_distance(row, col);
        cell.update_costs();
    }
}
