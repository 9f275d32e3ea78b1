use crate::cell::CellId;
use crate::pathing_grid::PathingGrid;
use crate::report::Algorithm;
use crate::solver::{assign_heuristic, discover, FrontierStrategy, FxIndexSet};
use itertools::Itertools;

/// Greedy best-first search: always expands the queued cell closest to the
/// finish by Manhattan distance, ignoring how far it is from the start. Fast on
/// open grids but the path it finds is not necessarily the shortest.
#[derive(Clone, Debug, Default)]
pub struct GreedySolver {
    open: FxIndexSet<CellId>,
}

impl GreedySolver {
    pub fn new() -> GreedySolver {
        GreedySolver::default()
    }
}

impl FrontierStrategy for GreedySolver {
    fn algorithm(&self) -> Algorithm {
        Algorithm::GreedyBestFirst
    }

    fn seed(&mut self, grid: &mut PathingGrid, start: CellId, finish: CellId) {
        assign_heuristic(grid, finish);
        self.open.clear();
        self.open.insert(start);
    }

    fn select(&mut self, grid: &PathingGrid) -> Option<CellId> {
        let ix = self.open.iter().position_min_by_key(|id| grid[**id].h_cost)?;
        self.open.shift_remove_index(ix)
    }

    fn admit_neighbours(&mut self, grid: &mut PathingGrid, current: CellId) {
        let neighbours = grid[current].neighbours.clone();
        for n in neighbours {
            if discover(grid, current, n) {
                self.open.insert(n);
            }
        }
    }

    fn frontier_len(&self) -> usize {
        self.open.len()
    }

    fn clear(&mut self) {
        self.open.clear();
    }
}
