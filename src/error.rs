use thiserror::Error;

/// Errors raised while building or painting a [PathingGrid](crate::PathingGrid).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },
    #[error("cell ({row}, {col}) is part of the border")]
    BorderCell { row: usize, col: usize },
    #[error("unknown glyph {glyph:?} at ({row}, {col})")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("grid description is empty")]
    Empty,
    #[error("a {rows}x{cols} grid has no interior, at least 3x3 is required")]
    TooSmall { rows: usize, cols: usize },
}

/// Errors raised while validating a [GridConfig](crate::config::GridConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no cell size given")]
    Missing,
    #[error("cell size {0:?} is not an integer")]
    NotAnInteger(String),
    #[error("cell size {size} must be between {min} and {max} inclusive")]
    CellSizeOutOfRange { size: u32, min: u32, max: u32 },
    #[error("viewport {width}x{height} is too small for cell size {cell_size}")]
    ViewportTooSmall {
        width: u32,
        height: u32,
        cell_size: u32,
    },
}

/// Returned by a run when the step observer asks for the whole process to
/// terminate. No report exists for such a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("quit requested during search")]
pub struct Quit;
