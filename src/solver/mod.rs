use std::ops::ControlFlow;

use crate::cell::Coord;

pub mod astar;

/// Returned by the step callback, `Break` cancels the running search.
pub type StepFlow = ControlFlow<()>;

/// A path from start to end, both included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Coord>,
}

impl Path {
    pub(crate) fn new(cells: Vec<Coord>) -> Path {
        debug_assert!(cells.len() >= 2);
        Path { cells }
    }
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }
    /// Number of moves, one less than the number of cells.
    pub fn len(&self) -> usize {
        self.cells.len() - 1
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn start(&self) -> Coord {
        self.cells[0]
    }
    pub fn end(&self) -> Coord {
        self.cells[self.cells.len() - 1]
    }
    /// The cells strictly between start and end, the ones marked as path.
    pub fn intermediate(&self) -> &[Coord] {
        &self.cells[1..self.cells.len() - 1]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathResult {
    Found(Path),
    NotFound,
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }
    pub fn path(&self) -> Option<&Path> {
        match self {
            PathResult::Found(path) => Some(path),
            PathResult::NotFound => None,
        }
    }
}

/// What a search did, in order: the cells it expanded and the predecessor links it ended up
/// with, listed in the order the cells were first reached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchTrace {
    pub expanded: Vec<Coord>,
    pub came_from: Vec<(Coord, Coord)>,
}
