use log::{debug, info, trace};

use crate::cell::{Coord, Role};
use crate::config::GridConfig;
use crate::error::{PathError, PathingResult};
use crate::frontend::{InputEvent, InputSource, PixelPos, Renderer};
use crate::grid::Grid;
use crate::solver::astar::AstarSolver;
use crate::solver::{PathResult, StepFlow};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// The grid accepts edits.
    Editing,
    /// A search owns the grid; edits are ignored.
    Running,
}

/// Whether the frame loop should keep going after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The interactive part of the visualizer. Owns the [Grid] and the chosen endpoints and decides
/// which input is legal: the first primary press places the start, the second the end, later
/// ones place walls; a secondary press clears a cell; a trigger runs a search once both
/// endpoints exist.
#[derive(Clone, Debug)]
pub struct Session {
    grid: Grid,
    start: Option<Coord>,
    end: Option<Coord>,
    mode: Mode,
    solver: AstarSolver,
    last_result: Option<PathResult>,
}

impl Session {
    pub fn new(config: GridConfig) -> PathingResult<Session> {
        Ok(Session::from_grid(config.build_grid()?))
    }

    /// Starts editing an existing grid. Cells already marked as start or end are not adopted as
    /// endpoints, so the grid is expected to hold neither.
    pub fn from_grid(grid: Grid) -> Session {
        Session {
            grid,
            start: None,
            end: None,
            mode: Mode::Editing,
            solver: AstarSolver::new(),
            last_result: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn start(&self) -> Option<Coord> {
        self.start
    }
    pub fn end(&self) -> Option<Coord> {
        self.end
    }
    pub fn mode(&self) -> Mode {
        self.mode
    }
    /// Outcome of the most recent search that ran to completion.
    pub fn last_result(&self) -> Option<&PathResult> {
        self.last_result.as_ref()
    }

    /// Places the start, then the end, then walls. Returns whether the grid changed.
    pub fn primary_press(&mut self, coord: Coord) -> PathingResult<bool> {
        if self.mode != Mode::Editing {
            trace!("Ignoring primary press on {} while running", coord);
            return Ok(false);
        }
        if self.grid.role_at(coord)? == Role::Wall {
            debug!("{} is a wall, clear it before placing anything", coord);
            return Ok(false);
        }
        match (self.start, self.end) {
            (None, end) if end != Some(coord) => {
                self.grid.set_role(coord, Role::Start)?;
                self.start = Some(coord);
                info!("Start placed at {}", coord);
            }
            (Some(start), None) if start != coord => {
                self.grid.set_role(coord, Role::End)?;
                self.end = Some(coord);
                info!("End placed at {}", coord);
            }
            (Some(start), Some(end)) if start != coord && end != coord => {
                self.grid.set_role(coord, Role::Wall)?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Clears a cell, forgetting it as an endpoint if it was one.
    pub fn secondary_press(&mut self, coord: Coord) -> PathingResult<bool> {
        if self.mode != Mode::Editing {
            trace!("Ignoring secondary press on {} while running", coord);
            return Ok(false);
        }
        self.grid.set_role(coord, Role::Empty)?;
        if self.start == Some(coord) {
            self.start = None;
            info!("Start cleared");
        }
        if self.end == Some(coord) {
            self.end = None;
            info!("End cleared");
        }
        Ok(true)
    }

    /// Runs a search with `on_step` called after every step. Returns `Ok(None)` without touching
    /// the grid unless the session is editing and both endpoints are placed.
    pub fn trigger<F>(&mut self, on_step: F) -> PathingResult<Option<PathResult>>
    where
        F: FnMut(&Grid) -> StepFlow,
    {
        if self.mode != Mode::Editing {
            return Ok(None);
        }
        let (Some(start), Some(end)) = (self.start, self.end) else {
            debug!("Search needs a start and an end");
            return Ok(None);
        };
        self.mode = Mode::Running;
        self.grid.clear_search_marks();
        let neighbours = self.grid.refresh_neighbors();
        self.grid.update();
        info!(
            "Search triggered: {} open edges, end reachable: {}",
            neighbours.iter().map(|n| n.len()).sum::<usize>() / 2,
            self.grid.reachable(start, end)
        );
        self.last_result = None;
        let outcome = self
            .solver
            .run(&mut self.grid, Some(start), Some(end), on_step);
        self.mode = Mode::Editing;
        let result = outcome?;
        self.last_result = Some(result.clone());
        Ok(Some(result))
    }

    /// Forgets both endpoints and replaces the grid with an empty one of the same size.
    pub fn reset(&mut self) {
        self.grid = self.grid.reset();
        self.start = None;
        self.end = None;
        self.mode = Mode::Editing;
        self.last_result = None;
        info!("Grid reset");
    }

    fn cell_under(&self, pos: PixelPos) -> Option<Coord> {
        match self.grid.cell_at_pixel(pos) {
            Ok(coord) => Some(coord),
            Err(err) => {
                debug!("Ignoring press at {:?}: {}", pos, err);
                None
            }
        }
    }

    /// Applies one input event. A trigger runs the search right away, drawing through `renderer`
    /// and polling `input` between steps.
    pub fn handle<R, I>(
        &mut self,
        event: InputEvent,
        renderer: &mut R,
        input: &mut I,
    ) -> PathingResult<Flow>
    where
        R: Renderer,
        I: InputSource,
    {
        match event {
            InputEvent::Quit => return Ok(Flow::Quit),
            InputEvent::PrimaryPress(pos) => {
                if let Some(coord) = self.cell_under(pos) {
                    self.primary_press(coord)?;
                }
            }
            InputEvent::SecondaryPress(pos) => {
                if let Some(coord) = self.cell_under(pos) {
                    self.secondary_press(coord)?;
                }
            }
            InputEvent::KeyTrigger => return self.search(renderer, input),
            InputEvent::KeyReset => self.reset(),
        }
        Ok(Flow::Continue)
    }

    /// Quit and reset interrupt a running search, everything else that arrives meanwhile is
    /// dropped. A reset is applied once the search has given the grid back.
    fn search<R, I>(&mut self, renderer: &mut R, input: &mut I) -> PathingResult<Flow>
    where
        R: Renderer,
        I: InputSource,
    {
        let mut interrupt = None;
        let outcome = self.trigger(|grid| {
            renderer.present(grid);
            for event in input.poll() {
                match event {
                    InputEvent::Quit | InputEvent::KeyReset => {
                        interrupt = Some(event);
                        return StepFlow::Break(());
                    }
                    other => trace!("Ignoring {:?} during search", other),
                }
            }
            StepFlow::Continue(())
        });
        match outcome {
            Ok(_) => Ok(Flow::Continue),
            Err(PathError::Cancelled) if interrupt == Some(InputEvent::KeyReset) => {
                self.reset();
                Ok(Flow::Continue)
            }
            Err(PathError::Cancelled) => Ok(Flow::Quit),
            Err(err) => Err(err),
        }
    }

    /// The frame loop: present the grid, then handle every polled event, until a quit arrives.
    pub fn run<R, I>(&mut self, mut renderer: R, mut input: I) -> PathingResult<()>
    where
        R: Renderer,
        I: InputSource,
    {
        info!(
            "Session started on a {0}x{0} grid of {1} px cells",
            self.grid.rows(),
            self.grid.cell_width()
        );
        loop {
            renderer.present(&self.grid);
            for event in input.poll() {
                if self.handle(event, &mut renderer, &mut input)? == Flow::Quit {
                    info!("Quit requested");
                    return Ok(());
                }
            }
        }
    }
}
