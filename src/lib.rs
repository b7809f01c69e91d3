//! # grid_astar_visualizer
//!
//! The core of an interactive [A*](https://en.wikipedia.org/wiki/A*_search_algorithm)
//! visualizer. A user places a start, an end and walls on a square [Grid], then watches the
//! search expand step by step until the shortest path is highlighted. Movement is restricted
//! to the 4-neighbourhood with unit cost and the [Manhattan] distance is used as heuristic, so
//! returned paths are optimal. Equal estimates are expanded in insertion order, which makes
//! every run reproducible.
//!
//! Drawing and input polling are left to the embedding application through the [Renderer] and
//! [InputSource] traits; [Session::run] ties them together in a frame loop.
//!
//! ```
//! use grid_astar_visualizer::{AstarSolver, Coord, Grid, Role, StepFlow};
//!
//! let mut grid = Grid::build(5, 10).unwrap();
//! let (start, end) = (Coord::new(0, 0), Coord::new(4, 4));
//! grid.set_role(start, Role::Start).unwrap();
//! grid.set_role(end, Role::End).unwrap();
//! let result = AstarSolver::new()
//!     .run(&mut grid, Some(start), Some(end), |_| StepFlow::Continue(()))
//!     .unwrap();
//! assert_eq!(result.path().unwrap().len(), 8);
//! ```
pub mod cell;
pub mod config;
pub mod error;
pub mod frontend;
pub mod grid;
pub mod heuristic;
pub mod session;
pub mod solver;

pub use cell::{Cell, Coord, Role};
pub use config::GridConfig;
pub use error::{PathError, PathingResult};
pub use frontend::{InputEvent, InputSource, PixelPos, Renderer, Rgb, ScriptedInput, TextRenderer};
pub use grid::Grid;
pub use heuristic::{Heuristic, Manhattan};
pub use session::{Flow, Mode, Session};
pub use solver::astar::AstarSolver;
pub use solver::{Path, PathResult, SearchTrace, StepFlow};

/// Row count of the default grid.
pub const DEFAULT_ROWS: usize = 50;
/// Side of the default square drawing surface in pixels.
pub const DEFAULT_WIDTH_PX: u32 = 1000;
