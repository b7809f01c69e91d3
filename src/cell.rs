use core::fmt;

use crate::frontend::Rgb;

/// Position of a cell on the grid. `row` selects the vertical axis, `col` the horizontal one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }
    pub fn manhattan_distance(&self, other: &Coord) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// What a cell currently is. Only [Role::Wall] influences the search; the other roles are
/// display state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    Visited,
    Frontier,
    Path,
}

impl Role {
    pub fn traversable(self) -> bool {
        self != Role::Wall
    }

    /// Roles written by the search engine, cleared before the next run.
    pub fn is_search_mark(self) -> bool {
        matches!(self, Role::Visited | Role::Frontier | Role::Path)
    }

    /// Fill color used by pixel renderers.
    pub fn color(self) -> Rgb {
        match self {
            Role::Empty => Rgb::WHITE,
            Role::Wall => Rgb::BLACK,
            Role::Start => Rgb::BLUE,
            Role::End => Rgb::PURPLE,
            Role::Frontier => Rgb::YELLOW,
            Role::Visited => Rgb::GREEN,
            Role::Path => Rgb::RED,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Role::Empty => '.',
            Role::Wall => '#',
            Role::Start => 'S',
            Role::End => 'E',
            Role::Frontier => 'o',
            Role::Visited => 'x',
            Role::Path => '*',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    pub(crate) role: Role,
}

impl Cell {
    pub(crate) fn new(coord: Coord) -> Cell {
        Cell {
            coord,
            role: Role::Empty,
        }
    }
    pub fn coord(&self) -> Coord {
        self.coord
    }
    pub fn row(&self) -> usize {
        self.coord.row
    }
    pub fn col(&self) -> usize {
        self.coord.col
    }
    pub fn role(&self) -> Role {
        self.role
    }
}
