use crate::cell::{CellId, CellState};
use crate::pathing_grid::PathingGrid;

/// Walks predecessor links from the finish back to the start, one cell per
/// [step](Backtrack::step), so the reconstruction can be rendered the same way
/// as the search itself.
#[derive(Clone, Debug)]
pub struct Backtrack {
    start: CellId,
    cursor: Option<CellId>,
    path_length: usize,
}

impl Backtrack {
    pub fn new(grid: &PathingGrid, start: CellId, finish: CellId) -> Backtrack {
        Backtrack {
            start,
            cursor: grid[finish].predecessor,
            path_length: 0,
        }
    }

    /// Marks the next cell on the path and returns it. Returns [None] once the
    /// start has been reached; the start and finish keep their own states.
    pub fn step(&mut self, grid: &mut PathingGrid) -> Option<CellId> {
        let current = self.cursor?;
        self.path_length += 1;
        if current == self.start {
            self.cursor = None;
            return None;
        }
        grid.set_state_of(current, CellState::Path);
        self.cursor = grid[current].predecessor;
        Some(current)
    }

    pub fn is_done(&self) -> bool {
        self.cursor.is_none()
    }

    /// Number of moves walked so far; the full path length once done.
    pub fn path_length(&self) -> usize {
        self.path_length
    }
}

/// Collects the path from `start` to `finish` (both included) from the
/// predecessor links left by the last run, without touching any cell. Returns
/// [None] if the links do not lead back to `start`.
pub fn trace_path(grid: &PathingGrid, start: CellId, finish: CellId) -> Option<Vec<CellId>> {
    let mut path: Vec<CellId> = std::iter::successors(Some(finish), |id| grid[*id].predecessor)
        .take(grid.len())
        .collect();
    if path.last() != Some(&start) {
        return None;
    }
    path.reverse();
    Some(path)
}
