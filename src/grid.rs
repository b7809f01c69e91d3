use core::fmt;

use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::{Cell, Coord, Role};
use crate::error::{PathError, PathingResult};
use crate::frontend::PixelPos;

pub type Neighbours = SmallVec<[Coord; 4]>;

/// Square grid of [Cell]s stored row-major. Besides the cell roles it keeps a [UnionFind]
/// over the non-wall cells so that reachability can be answered without searching.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cell_width: u32,
    cells: Vec<Cell>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Grid {
    /// Builds a `rows × rows` grid of empty cells, each `cell_width` pixels wide.
    pub fn build(rows: usize, cell_width: u32) -> PathingResult<Grid> {
        if rows == 0 || cell_width == 0 {
            return Err(PathError::InvalidDimension { rows, cell_width });
        }
        let cells = (0..rows)
            .flat_map(|row| (0..rows).map(move |col| Cell::new(Coord::new(row, col))))
            .collect::<Vec<Cell>>();
        let mut grid = Grid {
            rows,
            cell_width,
            cells,
            components: UnionFind::new(rows * rows),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    /// A fresh grid with the same dimensions, every cell [Role::Empty].
    pub fn reset(&self) -> Grid {
        let cells = self
            .cells
            .iter()
            .map(|c| Cell::new(c.coord()))
            .collect::<Vec<Cell>>();
        let mut grid = Grid {
            rows: self.rows,
            cell_width: self.cell_width,
            cells,
            components: UnionFind::new(self.rows * self.rows),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.rows
    }

    fn check(&self, coord: Coord) -> PathingResult<usize> {
        if self.in_bounds(coord) {
            Ok(self.index_of(coord))
        } else {
            Err(PathError::OutOfBounds {
                row: coord.row,
                col: coord.col,
                rows: self.rows,
            })
        }
    }

    /// Stable integer key of a coordinate, `row * rows + col`. Only meaningful in bounds.
    pub fn index_of(&self, coord: Coord) -> usize {
        coord.row * self.rows + coord.col
    }
    pub fn coord_of(&self, ix: usize) -> Coord {
        Coord::new(ix / self.rows, ix % self.rows)
    }

    pub fn cell_at(&self, coord: Coord) -> PathingResult<&Cell> {
        let ix = self.check(coord)?;
        Ok(&self.cells[ix])
    }

    pub fn role_at(&self, coord: Coord) -> PathingResult<Role> {
        self.cell_at(coord).map(Cell::role)
    }

    /// Changes the role of a cell. A wall has to be turned back into [Role::Empty] before it can
    /// take any other role; such a request is refused and `Ok(false)` returned.
    pub fn set_role(&mut self, coord: Coord, role: Role) -> PathingResult<bool> {
        let ix = self.check(coord)?;
        let old = self.cells[ix].role;
        if old == Role::Wall && !matches!(role, Role::Wall | Role::Empty) {
            debug!("Refusing to turn wall {} into {:?}", coord, role);
            return Ok(false);
        }
        if old.traversable() && !role.traversable() {
            self.components_dirty = true;
        } else if !old.traversable() && role.traversable() {
            for n in self.neighbors_of(coord) {
                let n_ix = self.index_of(n);
                self.components.union(ix, n_ix);
            }
        }
        self.cells[ix].role = role;
        Ok(true)
    }

    /// Marks a cell on behalf of the search. Endpoints and walls keep their role.
    pub(crate) fn mark(&mut self, ix: usize, role: Role) {
        let cell = &mut self.cells[ix];
        if !matches!(cell.role, Role::Start | Role::End | Role::Wall) {
            cell.role = role;
        }
    }

    /// Up, down, left and right neighbours of `coord` that are inside the grid and not walls,
    /// always in that order.
    pub fn neighbors_of(&self, coord: Coord) -> Neighbours {
        let mut neighbours = Neighbours::new();
        if !self.in_bounds(coord) {
            return neighbours;
        }
        let Coord { row, col } = coord;
        let candidates = [
            row.checked_sub(1).map(|r| Coord::new(r, col)),
            (row + 1 < self.rows).then(|| Coord::new(row + 1, col)),
            col.checked_sub(1).map(|c| Coord::new(row, c)),
            (col + 1 < self.rows).then(|| Coord::new(row, col + 1)),
        ];
        for n in candidates.into_iter().flatten() {
            if self.cells[self.index_of(n)].role.traversable() {
                neighbours.push(n);
            }
        }
        neighbours
    }

    /// Neighbour sets of every cell, indexed by [index_of](Self::index_of). Walls get an empty set.
    pub fn refresh_neighbors(&self) -> Vec<Neighbours> {
        self.cells
            .iter()
            .map(|c| {
                if c.role.traversable() {
                    self.neighbors_of(c.coord())
                } else {
                    Neighbours::new()
                }
            })
            .collect()
    }

    /// Turns every visited, frontier and path cell back into an empty one.
    pub fn clear_search_marks(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.role.is_search_mark()) {
            cell.role = Role::Empty;
        }
    }

    /// Maps a pixel position to the cell under it; `y` selects the row, `x` the column.
    pub fn cell_at_pixel(&self, pos: PixelPos) -> PathingResult<Coord> {
        let coord = Coord::new(
            (pos.y / self.cell_width) as usize,
            (pos.x / self.cell_width) as usize,
        );
        self.check(coord).map(|_| coord)
    }

    /// Top-left pixel of a cell, the inverse of [cell_at_pixel](Self::cell_at_pixel).
    pub fn cell_origin(&self, coord: Coord) -> PixelPos {
        PixelPos::new(
            coord.col as u32 * self.cell_width,
            coord.row as u32 * self.cell_width,
        )
    }

    /// Retrieves the component id a given [Coord] belongs to.
    pub fn get_component(&self, coord: Coord) -> usize {
        self.components.find(self.index_of(coord))
    }

    /// Checks if both cells are in bounds, open and on the same component. Placing a wall can
    /// split components, so [update](Self::update) has to run after walls were added.
    pub fn reachable(&self, start: Coord, goal: Coord) -> bool {
        debug_assert!(
            !self.components_dirty,
            "components are stale, call update() first"
        );
        self.in_bounds(start)
            && self.in_bounds(goal)
            && self.cells[self.index_of(start)].role.traversable()
            && self.cells[self.index_of(goal)].role.traversable()
            && self
                .components
                .equiv(self.index_of(start), self.index_of(goal))
    }

    pub fn unreachable(&self, start: Coord, goal: Coord) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open orthogonal neighbours.
    pub fn generate_components(&mut self) {
        debug!("Generating connected components for {} cells", self.len());
        self.components = UnionFind::new(self.len());
        self.components_dirty = false;
        for ix in 0..self.len() {
            if !self.cells[ix].role.traversable() {
                continue;
            }
            let Coord { row, col } = self.coord_of(ix);
            // Down and right cover every edge once
            let forward = [
                (row + 1 < self.rows).then(|| Coord::new(row + 1, col)),
                (col + 1 < self.rows).then(|| Coord::new(row, col + 1)),
            ];
            for n in forward.into_iter().flatten() {
                let n_ix = self.index_of(n);
                if self.cells[n_ix].role.traversable() {
                    self.components.union(ix, n_ix);
                }
            }
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.rows) {
            let line = row.iter().map(|c| c.role.glyph()).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
