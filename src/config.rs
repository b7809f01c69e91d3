use log::warn;

use crate::error::{PathError, PathingResult};
use crate::grid::Grid;
use crate::{DEFAULT_ROWS, DEFAULT_WIDTH_PX};

/// Size of the grid and of the square surface it is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub rows: usize,
    pub width_px: u32,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            rows: DEFAULT_ROWS,
            width_px: DEFAULT_WIDTH_PX,
        }
    }
}

impl GridConfig {
    pub fn new(rows: usize, width_px: u32) -> PathingResult<GridConfig> {
        let config = GridConfig { rows, width_px };
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations whose cells would be zero pixels wide. A width that is not a
    /// multiple of the row count is accepted, the remainder is left undrawn.
    pub fn validate(&self) -> PathingResult<()> {
        if self.rows == 0 || self.cell_width() == 0 {
            return Err(PathError::InvalidDimension {
                rows: self.rows,
                cell_width: self.cell_width(),
            });
        }
        if self.width_px as usize % self.rows != 0 {
            warn!(
                "Surface width {} is not a multiple of {} rows, cells will not fill it exactly",
                self.width_px, self.rows
            );
        }
        Ok(())
    }

    pub fn cell_width(&self) -> u32 {
        match u32::try_from(self.rows) {
            Ok(rows) if rows > 0 => self.width_px / rows,
            _ => 0,
        }
    }

    pub fn build_grid(&self) -> PathingResult<Grid> {
        self.validate()?;
        Grid::build(self.rows, self.cell_width())
    }
}
