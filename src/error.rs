use thiserror::Error;

/// Errors produced while building grids, looking up cells or running a search.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PathError {
    /// The grid would have no cells, or cells zero pixels wide.
    #[error("invalid grid dimension: {rows} rows with cells {cell_width} px wide")]
    InvalidDimension { rows: usize, cell_width: u32 },

    #[error("cell ({row}, {col}) is outside a grid of {rows} rows")]
    OutOfBounds { row: usize, col: usize, rows: usize },

    /// A search was requested without two distinct endpoints.
    #[error("search needs both a start and a distinct end cell")]
    MissingEndpoints,

    /// The step callback asked the search to stop.
    #[error("search cancelled")]
    Cancelled,
}

pub type PathingResult<T> = Result<T, PathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PathError::OutOfBounds {
            row: 7,
            col: 2,
            rows: 5,
        };
        assert_eq!(format!("{err}"), "cell (7, 2) is outside a grid of 5 rows");
        assert_eq!(format!("{}", PathError::Cancelled), "search cancelled");
    }
}
