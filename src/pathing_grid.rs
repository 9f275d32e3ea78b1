use crate::cell::{Cell, CellId, CellState};
use crate::config::GridConfig;
use crate::error::{ConfigError, GridError};
use core::fmt;
use log::debug;
use petgraph::unionfind::UnionFind;
use rand::Rng;
use smallvec::SmallVec;
use std::ops::Index;
use std::str::FromStr;

/// One in this many Blank or Path cells becomes a barrier in [PathingGrid::scatter_barriers].
pub const SCATTER_ODDS: u32 = 15;

/// [PathingGrid] owns every [Cell] in a flat row-major arena. The outermost ring
/// of cells is permanently [CellState::Border]. Predecessor links are [CellId]s
/// into the arena, so no cell ever owns another.
///
/// Connected components of passable cells are kept in a [UnionFind] that is
/// regenerated lazily whenever painting has changed which cells are passable.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl PathingGrid {
    /// Creates a grid of blank cells surrounded by a border, with neighbours
    /// already linked.
    pub fn new(rows: usize, cols: usize) -> Result<PathingGrid, GridError> {
        if rows < 3 || cols < 3 {
            return Err(GridError::TooSmall { rows, cols });
        }
        let mut grid = PathingGrid {
            rows,
            cols,
            cells: Vec::new(),
            components: UnionFind::new(0),
            components_dirty: true,
        };
        grid.build_cells();
        Ok(grid)
    }

    pub fn from_config(config: &GridConfig) -> Result<PathingGrid, ConfigError> {
        config.validate()?;
        PathingGrid::new(config.rows(), config.cols()).map_err(|_| ConfigError::ViewportTooSmall {
            width: config.width,
            height: config.height,
            cell_size: config.cell_size,
        })
    }

    fn build_cells(&mut self) {
        self.cells = (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .map(|(row, col)| {
                let state = if self.is_perimeter(row, col) {
                    CellState::Border
                } else {
                    CellState::Blank
                };
                Cell::new(row, col, state)
            })
            .collect();
        self.update_neighbours();
    }

    /// Rebuilds the grid with new dimensions. All painting is lost.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), GridError> {
        if rows < 3 || cols < 3 {
            return Err(GridError::TooSmall { rows, cols });
        }
        debug!("Resizing grid from {}x{} to {}x{}", self.rows, self.cols, rows, cols);
        self.rows = rows;
        self.cols = cols;
        self.build_cells();
        Ok(())
    }

    /// Links every cell to its in-grid cardinal neighbours, in up, down, left,
    /// right order. Only needed after a change of dimensions.
    pub fn update_neighbours(&mut self) {
        let (rows, cols) = (self.rows, self.cols);
        for cell in self.cells.iter_mut() {
            let (row, col) = (cell.row(), cell.col());
            let mut neighbours = SmallVec::new();
            if row > 0 {
                neighbours.push(CellId((row - 1) * cols + col));
            }
            if row + 1 < rows {
                neighbours.push(CellId((row + 1) * cols + col));
            }
            if col > 0 {
                neighbours.push(CellId(row * cols + col - 1));
            }
            if col + 1 < cols {
                neighbours.push(CellId(row * cols + col + 1));
            }
            cell.neighbours = neighbours;
        }
        self.components_dirty = true;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells that are not part of the border.
    pub fn interior_len(&self) -> usize {
        (self.rows - 2) * (self.cols - 2)
    }

    fn is_perimeter(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row + 1 == self.rows || col + 1 == self.cols
    }

    pub fn id(&self, row: usize, col: usize) -> Option<CellId> {
        (row < self.rows && col < self.cols).then(|| CellId(row * self.cols + col))
    }

    /// Like [id](Self::id) but rejects border cells, which can never be painted.
    pub fn interior_id(&self, row: usize, col: usize) -> Result<CellId, GridError> {
        let id = self.id(row, col).ok_or(GridError::OutOfBounds { row, col })?;
        if self.is_perimeter(row, col) {
            return Err(GridError::BorderCell { row, col });
        }
        Ok(id)
    }

    /// Maps a pixel position inside the grid area to the interior cell under it.
    pub fn cell_at_pixel(&self, x: u32, y: u32, cell_size: u32) -> Option<CellId> {
        if cell_size == 0 {
            return None;
        }
        let row = (y / cell_size) as usize;
        let col = (x / cell_size) as usize;
        self.interior_id(row, col).ok()
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    pub(crate) fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.0]
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells.iter().enumerate().map(|(ix, cell)| (CellId(ix), cell))
    }

    pub fn state(&self, id: CellId) -> CellState {
        self.cells[id.0].state
    }

    pub(crate) fn set_state_of(&mut self, id: CellId, state: CellState) {
        let cell = &mut self.cells[id.0];
        if cell.state.is_passable() != state.is_passable() {
            self.components_dirty = true;
        }
        cell.state = state;
    }

    /// All cell states in arena order, for comparing grids.
    pub fn states(&self) -> Vec<CellState> {
        self.cells.iter().map(|cell| cell.state).collect()
    }

    pub fn count_state(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| cell.state == state).count()
    }

    /// Returns the first cell in the given state, scanning row by row.
    pub fn find_state(&self, state: CellState) -> Option<CellId> {
        self.cells
            .iter()
            .position(|cell| cell.state == state)
            .map(CellId)
    }

    /// Clears Queued, Visited and Path cells back to Blank. Barrier, Start,
    /// Finish and Border cells are left alone.
    pub fn reset_transient_state(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.state.is_transient() {
                cell.state = CellState::Blank;
            }
        }
    }

    /// [reset_transient_state](Self::reset_transient_state) plus fresh
    /// predecessor and cost fields, as done at the start of every run.
    pub(crate) fn prepare_search(&mut self) {
        self.reset_transient_state();
        for cell in self.cells.iter_mut() {
            cell.reset_search_fields();
        }
    }

    /// Sets every non-border cell back to Blank.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.state != CellState::Border {
                cell.state = CellState::Blank;
            }
            cell.reset_search_fields();
        }
        self.components_dirty = true;
    }

    /// Primary paint action. The first painted cell becomes the start, the
    /// next one the finish and every following one a barrier. Cells touched by
    /// a search in progress are ignored. Returns the new state if the cell
    /// changed.
    pub fn place(&mut self, row: usize, col: usize) -> Result<Option<CellState>, GridError> {
        let id = self.interior_id(row, col)?;
        let current = self.state(id);
        if matches!(current, CellState::Queued | CellState::Visited) {
            return Ok(None);
        }
        let next = if self.find_state(CellState::Start).is_none() {
            CellState::Start
        } else if self.find_state(CellState::Finish).is_none() && current != CellState::Start {
            CellState::Finish
        } else if current != CellState::Start && current != CellState::Finish {
            CellState::Barrier
        } else {
            return Ok(None);
        };
        if next == current {
            return Ok(None);
        }
        self.set_state_of(id, next);
        Ok(Some(next))
    }

    /// Secondary paint action: makes the cell Blank unless a search is using it.
    pub fn erase(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        let id = self.interior_id(row, col)?;
        if !matches!(self.state(id), CellState::Queued | CellState::Visited) {
            self.set_state_of(id, CellState::Blank);
        }
        Ok(())
    }

    /// Sets an interior cell directly. Placing a Start or Finish demotes any
    /// existing one to Blank so each stays unique. Border can be neither
    /// written nor overwritten.
    pub fn set_state(&mut self, row: usize, col: usize, state: CellState) -> Result<(), GridError> {
        let id = self.interior_id(row, col)?;
        if state == CellState::Border {
            return Err(GridError::BorderCell { row, col });
        }
        if matches!(state, CellState::Start | CellState::Finish) {
            if let Some(previous) = self.find_state(state) {
                self.set_state_of(previous, CellState::Blank);
            }
        }
        self.set_state_of(id, state);
        Ok(())
    }

    /// Turns roughly one in [SCATTER_ODDS] Blank or Path cells into barriers.
    /// Returns how many cells changed.
    pub fn scatter_barriers<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let mut placed = 0;
        for ix in 0..self.cells.len() {
            let state = self.cells[ix].state;
            if matches!(state, CellState::Blank | CellState::Path)
                && rng.gen_range(1..=SCATTER_ODDS) == 1
            {
                self.set_state_of(CellId(ix), CellState::Barrier);
                placed += 1;
            }
        }
        placed
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable neighbours.
    pub fn generate_components(&mut self) {
        let mut components = UnionFind::new(self.cells.len());
        for (ix, cell) in self.cells.iter().enumerate() {
            if !cell.state.is_passable() {
                continue;
            }
            for n in cell.neighbours.iter().filter(|n| n.0 > ix) {
                if self.cells[n.0].state.is_passable() {
                    components.union(ix, n.0);
                }
            }
        }
        self.components = components;
        self.components_dirty = false;
    }

    /// Checks if both cells are passable and on the same connected component.
    pub fn reachable(&mut self, a: CellId, b: CellId) -> bool {
        self.update();
        self.state(a).is_passable()
            && self.state(b).is_passable()
            && self.components.equiv(a.0, b.0)
    }

    /// Number of passable cells connected to `id`, including itself.
    pub fn region_size(&mut self, id: CellId) -> usize {
        self.update();
        if !self.state(id).is_passable() {
            return 0;
        }
        let root = self.components.find(id.0);
        self.cells
            .iter()
            .enumerate()
            .filter(|(ix, cell)| cell.state.is_passable() && self.components.find(*ix) == root)
            .count()
    }
}

impl Index<CellId> for PathingGrid {
    type Output = Cell;

    fn index(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: String = row.iter().map(|cell| cell.state.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses the glyph layout produced by [Display](fmt::Display). Lines are
/// trimmed and empty lines skipped, `_` is accepted for blank cells, and the
/// outer ring always becomes border whatever its glyphs say.
impl FromStr for PathingGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<PathingGrid, GridError> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let cols = lines.first().ok_or(GridError::Empty)?.chars().count();
        let mut grid = PathingGrid::new(lines.len(), cols)?;
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                if grid.is_perimeter(row, col) {
                    continue;
                }
                let state = CellState::from_glyph(glyph)
                    .filter(|state| *state != CellState::Border)
                    .ok_or(GridError::UnknownGlyph { glyph, row, col })?;
                grid.cells[row * cols + col].state = state;
            }
        }
        grid.components_dirty = true;
        Ok(grid)
    }
}
