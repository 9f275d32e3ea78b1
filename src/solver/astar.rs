use crate::cell::{CellId, CellState};
use crate::pathing_grid::PathingGrid;
use crate::report::Algorithm;
use crate::solver::{assign_heuristic, FrontierStrategy, FxIndexSet};
use itertools::Itertools;

/// A* with the Manhattan distance as heuristic. The open set is scanned
/// linearly for the lowest f cost, ties going to the lowest g cost and then to
/// the earliest discovered cell. Because the scan reads the live cost fields, a
/// cell whose g cost is lowered while queued is reprioritised without any
/// decrease-key bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver {
    open: FxIndexSet<CellId>,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver::default()
    }
}

impl FrontierStrategy for AstarSolver {
    fn algorithm(&self) -> Algorithm {
        Algorithm::AStar
    }

    fn seed(&mut self, grid: &mut PathingGrid, start: CellId, finish: CellId) {
        assign_heuristic(grid, finish);
        let start_cell = grid.cell_mut(start);
        start_cell.g_cost = 0;
        start_cell.update_costs();
        self.open.clear();
        self.open.insert(start);
    }

    fn select(&mut self, grid: &PathingGrid) -> Option<CellId> {
        let ix = self
            .open
            .iter()
            .position_min_by_key(|id| (grid[**id].f_cost, grid[**id].g_cost))?;
        self.open.shift_remove_index(ix)
    }

    fn admit_neighbours(&mut self, grid: &mut PathingGrid, current: CellId) {
        let g_cost = grid[current].g_cost.saturating_add(1);
        let neighbours = grid[current].neighbours.clone();
        for n in neighbours {
            let cell = grid.cell_mut(n);
            if !matches!(
                cell.state,
                CellState::Blank | CellState::Queued | CellState::Finish
            ) {
                continue;
            }
            if g_cost < cell.g_cost {
                cell.g_cost = g_cost;
                cell.predecessor = Some(current);
                cell.update_costs();
                if cell.state == CellState::Blank {
                    cell.state = CellState::Queued;
                }
                // Already queued cells keep their place and are updated in place.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{RunningFlag, Signal, StepEvent};

    fn expansions(grid: &mut PathingGrid) -> (crate::RunReport, Vec<CellId>) {
        let mut solver = AstarSolver::new();
        let mut order = Vec::new();
        let report = solver
            .run(grid, &RunningFlag::new(), &mut |event: &StepEvent, _: &PathingGrid| {
                if let StepEvent::Expanded(id) = event {
                    order.push(*id);
                }
                Signal::Continue
            })
            .unwrap();
        (report, order)
    }

    /// On an open row A* never leaves the straight line.
    #[test]
    fn heads_straight_for_the_finish() {
        let mut grid: PathingGrid = "
            ++++++++
            +S____F+
            +______+
            ++++++++"
            .parse()
            .unwrap();
        let (report, order) = expansions(&mut grid);
        assert!(report.found());
        assert_eq!(report.path_length, 5);
        assert_eq!(report.nodes_explored, 5);
        assert!(order.iter().all(|id| grid[*id].row() == 1));
    }

    /// Has to walk around a wall, still optimal.
    #[test]
    fn detours_optimally() {
        let mut grid: PathingGrid = "
            +++++++
            +__#__+
            +S_#_F+
            +_____+
            +++++++"
            .parse()
            .unwrap();
        let (report, _) = expansions(&mut grid);
        assert!(report.found());
        assert_eq!(report.path_length, 6);
        assert_eq!(grid.count_state(CellState::Path), 5);
    }

    /// Equal f cost goes to the lower g cost, equal g cost to the earlier cell.
    #[test]
    fn ties_prefer_lower_g_then_discovery_order() {
        let mut grid = PathingGrid::new(5, 5).unwrap();
        let a = grid.id(1, 1).unwrap();
        let b = grid.id(1, 2).unwrap();
        let c = grid.id(2, 1).unwrap();
        for (id, g, h) in [(a, 3, 2), (b, 2, 3), (c, 2, 3)] {
            let cell = grid.cell_mut(id);
            cell.g_cost = g;
            cell.h_cost = h;
            cell.update_costs();
        }
        let mut solver = AstarSolver::new();
        solver.open.extend([a, b, c]);
        assert_eq!(solver.select(&grid), Some(b));
        assert_eq!(solver.select(&grid), Some(c));
        assert_eq!(solver.select(&grid), Some(a));
        assert_eq!(solver.select(&grid), None);
    }

    #[test]
    fn relaxation_updates_queued_cells_in_place() {
        let mut grid = PathingGrid::new(5, 6).unwrap();
        let current = grid.id(2, 2).unwrap();
        let queued = grid.id(2, 3).unwrap();
        let other = grid.id(1, 1).unwrap();
        {
            let cell = grid.cell_mut(current);
            cell.g_cost = 1;
        }
        {
            let cell = grid.cell_mut(queued);
            cell.state = CellState::Queued;
            cell.g_cost = 5;
            cell.h_cost = 0;
            cell.predecessor = Some(other);
        }
        let mut solver = AstarSolver::new();
        solver.open.extend([other, queued]);
        solver.admit_neighbours(&mut grid, current);
        assert_eq!(grid[queued].g_cost, 2);
        assert_eq!(grid[queued].f_cost, 2);
        assert_eq!(grid[queued].predecessor, Some(current));
        // no duplicate entry, position kept
        assert_eq!(solver.open.get_index_of(&queued), Some(1));
        // up, down, left were blank and are now queued behind it
        assert_eq!(solver.frontier_len(), 5);
    }
}
