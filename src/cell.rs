use core::fmt;
use smallvec::SmallVec;

/// Cost value used for the g, h and f fields. [UNREACHED] marks a cell whose
/// distance from the start is not known yet.
pub type Cost = u32;

pub const UNREACHED: Cost = Cost::MAX;

/// Index of a cell in the arena owned by [PathingGrid](crate::PathingGrid).
/// Cells are stored row-major, so the id of `(row, col)` is `row * cols + col`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) usize);

impl CellId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display and search state of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Blank,
    Border,
    Barrier,
    Start,
    Finish,
    Queued,
    Visited,
    Path,
}

impl CellState {
    /// Queued, Visited and Path only exist as a by-product of a search.
    pub fn is_transient(self) -> bool {
        matches!(self, CellState::Queued | CellState::Visited | CellState::Path)
    }

    /// Whether a search may step onto a cell in this state at all.
    pub fn is_passable(self) -> bool {
        !matches!(self, CellState::Border | CellState::Barrier)
    }

    pub fn glyph(self) -> char {
        match self {
            CellState::Blank => ' ',
            CellState::Border => '+',
            CellState::Barrier => '#',
            CellState::Start => 'S',
            CellState::Finish => 'F',
            CellState::Queued => 'o',
            CellState::Visited => '.',
            CellState::Path => '*',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<CellState> {
        Some(match glyph {
            ' ' | '_' => CellState::Blank,
            '+' => CellState::Border,
            '#' => CellState::Barrier,
            'S' => CellState::Start,
            'F' => CellState::Finish,
            'o' => CellState::Queued,
            '.' => CellState::Visited,
            '*' => CellState::Path,
            _ => return None,
        })
    }
}

/// A single grid square. Its coordinates never change; everything else is
/// mutated in place between and during runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    col: usize,
    pub state: CellState,
    pub(crate) neighbours: SmallVec<[CellId; 4]>,
    /// Cell this one was reached from during the current run. Only read when
    /// backtracking.
    pub predecessor: Option<CellId>,
    pub g_cost: Cost,
    pub h_cost: Cost,
    pub f_cost: Cost,
}

impl Cell {
    pub fn new(row: usize, col: usize, state: CellState) -> Cell {
        Cell {
            row,
            col,
            state,
            neighbours: SmallVec::new(),
            predecessor: None,
            g_cost: UNREACHED,
            h_cost: UNREACHED,
            f_cost: UNREACHED,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn neighbours(&self) -> &[CellId] {
        &self.neighbours
    }

    /// Recomputes `f = g + h`, saturating at [UNREACHED].
    pub fn update_costs(&mut self) {
        self.f_cost = self.g_cost.saturating_add(self.h_cost);
    }

    /// Manhattan distance to `(row, col)`, admissible and consistent on a
    /// 4-connected unit-cost grid.
    pub fn manhattan_distance(&self, row: usize, col: usize) -> Cost {
        (self.row.abs_diff(row) + self.col.abs_diff(col)) as Cost
    }

    pub(crate) fn reset_search_fields(&mut self) {
        self.predecessor = None;
        self.g_cost = UNREACHED;
        self.h_cost = UNREACHED;
        self.f_cost = UNREACHED;
    }
}
