use std::collections::VecDeque;

use crate::cell::CellId;
use crate::pathing_grid::PathingGrid;
use crate::report::Algorithm;
use crate::solver::{discover, FrontierStrategy};

/// Expands cells first-in first-out. With every step costing 1 the order of
/// expansion is non-decreasing distance from the start, which makes this
/// Dijkstra's algorithm without a priority queue. Each cell keeps the first
/// predecessor it was discovered from.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver {
    open: VecDeque<CellId>,
}

impl DijkstraSolver {
    pub fn new() -> DijkstraSolver {
        DijkstraSolver::default()
    }
}

impl FrontierStrategy for DijkstraSolver {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn seed(&mut self, _: &mut PathingGrid, start: CellId, _: CellId) {
        self.open.clear();
        self.open.push_back(start);
    }

    fn select(&mut self, _: &PathingGrid) -> Option<CellId> {
        self.open.pop_front()
    }

    fn admit_neighbours(&mut self, grid: &mut PathingGrid, current: CellId) {
        let neighbours = grid[current].neighbours.clone();
        for n in neighbours {
            if discover(grid, current, n) {
                self.open.push_back(n);
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
