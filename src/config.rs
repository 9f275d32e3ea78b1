use crate::error::ConfigError;

pub const MIN_CELL_SIZE: u32 = 5;
pub const MAX_CELL_SIZE: u32 = 50;

/// Viewport and cell size from which the grid dimensions are derived. The grid
/// takes `grid_fraction` of the viewport width; the remainder belongs to the
/// control panel.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub grid_fraction: f32,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            width: 1000,
            height: 500,
            cell_size: 10,
            grid_fraction: 0.75,
        }
    }
}

impl GridConfig {
    pub fn with_cell_size(cell_size: u32) -> Result<GridConfig, ConfigError> {
        let config = GridConfig {
            cell_size,
            ..GridConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses user input for the cell size: presence, integer and range checks
    /// in that order.
    pub fn parse_cell_size(input: &str) -> Result<u32, ConfigError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ConfigError::Missing);
        }
        let size = input
            .parse::<u32>()
            .map_err(|_| ConfigError::NotAnInteger(input.to_owned()))?;
        check_cell_size(size)?;
        Ok(size)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_cell_size(self.cell_size)?;
        if self.rows() < 3 || self.cols() < 3 {
            return Err(ConfigError::ViewportTooSmall {
                width: self.width,
                height: self.height,
                cell_size: self.cell_size,
            });
        }
        Ok(())
    }

    /// Width in pixels of the grid area.
    pub fn grid_width(&self) -> u32 {
        (self.width as f32 * self.grid_fraction) as u32
    }

    pub fn rows(&self) -> usize {
        (self.height / self.cell_size.max(1)) as usize
    }

    pub fn cols(&self) -> usize {
        (self.grid_width() / self.cell_size.max(1)) as usize
    }
}

fn check_cell_size(size: u32) -> Result<(), ConfigError> {
    if (MIN_CELL_SIZE..=MAX_CELL_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(ConfigError::CellSizeOutOfRange {
            size,
            min: MIN_CELL_SIZE,
            max: MAX_CELL_SIZE,
        })
    }
}
