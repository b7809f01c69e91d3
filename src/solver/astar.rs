use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::{FxBuildHasher, FxHashMap, FxHashSet};
use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, info, trace};

use crate::cell::{Coord, Role};
use crate::error::{PathError, PathingResult};
use crate::grid::Grid;
use crate::heuristic::{Heuristic, Manhattan};
use crate::solver::{Path, PathResult, SearchTrace, StepFlow};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Open set entry. Ordered so that the [BinaryHeap] pops the smallest estimated cost first and,
/// among equal estimates, the entry that was pushed first.
struct SmallestCostHolder {
    estimated_cost: u32,
    seq: u64,
    index: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.seq == other.seq
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Bookkeeping of a single run, keyed by [Grid::index_of]. Dropped when the run ends.
struct SearchState {
    open_set: BinaryHeap<SmallestCostHolder>,
    open_membership: FxHashSet<usize>,
    came_from: FxIndexMap<usize, usize>,
    g_score: FxHashMap<usize, u32>,
    seq: u64,
}

impl SearchState {
    fn new(start: usize) -> SearchState {
        let mut state = SearchState {
            open_set: BinaryHeap::new(),
            open_membership: FxHashSet::default(),
            came_from: FxIndexMap::default(),
            g_score: FxHashMap::default(),
            seq: 0,
        };
        state.open_set.push(SmallestCostHolder {
            estimated_cost: 0,
            seq: 0,
            index: start,
        });
        state.open_membership.insert(start);
        state.g_score.insert(start, 0);
        state
    }

    /// Missing entries are unreached, i.e. infinitely far away.
    fn g(&self, ix: usize) -> u32 {
        self.g_score.get(&ix).copied().unwrap_or(u32::MAX)
    }

    /// Records a better way to reach `ix`; predecessor and cost always change together.
    fn relax(&mut self, ix: usize, parent: usize, cost: u32) {
        self.came_from.insert(ix, parent);
        self.g_score.insert(ix, cost);
    }

    /// Pushes `ix` unless it is already queued. Returns whether it was pushed.
    fn enqueue(&mut self, ix: usize, estimated_cost: u32) -> bool {
        if !self.open_membership.insert(ix) {
            return false;
        }
        self.seq += 1;
        self.open_set.push(SmallestCostHolder {
            estimated_cost,
            seq: self.seq,
            index: ix,
        });
        true
    }

    /// Follows the predecessor links back from `end` and returns the chain from the start.
    fn reverse_path(&self, end: usize) -> Vec<usize> {
        let mut path =
            std::iter::successors(Some(end), |ix| self.came_from.get(ix).copied()).collect_vec();
        path.reverse();
        path
    }

    fn trace_links(&self, grid: &Grid) -> Vec<(Coord, Coord)> {
        self.came_from
            .iter()
            .map(|(&ix, &parent)| (grid.coord_of(ix), grid.coord_of(parent)))
            .collect()
    }
}

/// A* over the 4-neighbourhood of a [Grid] with unit move cost. The run mutates the cell roles
/// as it goes: queued cells become [Role::Frontier], expanded ones [Role::Visited] and the final
/// path [Role::Path]. The step callback is invoked after each expansion and after each path cell
/// is marked, so a caller can draw intermediate states and cancel.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver<H = Manhattan> {
    pub heuristic: H,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic: Manhattan,
        }
    }
}

impl<H: Heuristic> AstarSolver<H> {
    pub fn with_heuristic(heuristic: H) -> AstarSolver<H> {
        AstarSolver { heuristic }
    }

    /// Searches a path from `start` to `end`. Fails with [PathError::MissingEndpoints] unless both
    /// are given and distinct, and with [PathError::Cancelled] as soon as `on_step` breaks.
    pub fn run<F>(
        &self,
        grid: &mut Grid,
        start: Option<Coord>,
        end: Option<Coord>,
        on_step: F,
    ) -> PathingResult<PathResult>
    where
        F: FnMut(&Grid) -> StepFlow,
    {
        self.run_traced(grid, start, end, on_step)
            .map(|(result, _trace)| result)
    }

    /// Like [run](Self::run), additionally reporting the expansion order and the predecessor links.
    pub fn run_traced<F>(
        &self,
        grid: &mut Grid,
        start: Option<Coord>,
        end: Option<Coord>,
        mut on_step: F,
    ) -> PathingResult<(PathResult, SearchTrace)>
    where
        F: FnMut(&Grid) -> StepFlow,
    {
        let (start, end) = match (start, end) {
            (Some(start), Some(end)) if start != end => (start, end),
            _ => return Err(PathError::MissingEndpoints),
        };
        grid.cell_at(start)?;
        grid.cell_at(end)?;
        let start_ix = grid.index_of(start);
        let end_ix = grid.index_of(end);
        info!("Searching a path from {} to {}", start, end);

        let mut state = SearchState::new(start_ix);
        let mut trace = SearchTrace::default();
        while let Some(SmallestCostHolder { index, .. }) = state.open_set.pop() {
            state.open_membership.remove(&index);
            let current = grid.coord_of(index);
            trace!("Expanding {}", current);
            trace.expanded.push(current);

            if index == end_ix {
                let chain = state.reverse_path(end_ix);
                // Marked walking back from the end
                for &ix in chain[1..chain.len() - 1].iter().rev() {
                    grid.mark(ix, Role::Path);
                    if on_step(&*grid).is_break() {
                        debug!("Cancelled while marking the path");
                        return Err(PathError::Cancelled);
                    }
                }
                let path = Path::new(chain.iter().map(|&ix| grid.coord_of(ix)).collect());
                info!(
                    "Found a path of length {} after {} expansions",
                    path.len(),
                    trace.expanded.len()
                );
                debug!("Path: {}", path.cells().iter().join(" -> "));
                trace.came_from = state.trace_links(grid);
                return Ok((PathResult::Found(path), trace));
            }

            let tentative_g = state.g(index) + 1;
            for neighbour in grid.neighbors_of(current) {
                let n_ix = grid.index_of(neighbour);
                if tentative_g < state.g(n_ix) {
                    state.relax(n_ix, index, tentative_g);
                    let f = tentative_g + self.heuristic.estimate(neighbour, end);
                    if state.enqueue(n_ix, f) && n_ix != end_ix {
                        grid.mark(n_ix, Role::Frontier);
                    }
                }
            }

            if on_step(&*grid).is_break() {
                debug!("Cancelled after expanding {}", current);
                return Err(PathError::Cancelled);
            }
            if index != start_ix {
                grid.mark(index, Role::Visited);
            }
        }
        info!(
            "No path from {} to {} after {} expansions",
            start,
            end,
            trace.expanded.len()
        );
        trace.came_from = state.trace_links(grid);
        Ok((PathResult::NotFound, trace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go(_: &Grid) -> StepFlow {
        StepFlow::Continue(())
    }

    fn grid_with_endpoints(rows: usize, start: Coord, end: Coord) -> Grid {
        let mut grid = Grid::build(rows, 10).unwrap();
        grid.set_role(start, Role::Start).unwrap();
        grid.set_role(end, Role::End).unwrap();
        grid
    }

    /// Asserts that the optimal 8 step solution is found on an open 5x5 grid.
    #[test]
    fn solve_open_grid() {
        let (start, end) = (Coord::new(0, 0), Coord::new(4, 4));
        let mut grid = grid_with_endpoints(5, start, end);
        let result = AstarSolver::new()
            .run(&mut grid, Some(start), Some(end), go)
            .unwrap();
        let path = result.path().unwrap();
        assert_eq!(path.len(), 8);
        assert_eq!(path.start(), start);
        assert_eq!(path.end(), end);
        for &c in path.intermediate() {
            assert_eq!(grid.role_at(c).unwrap(), Role::Path);
        }
        assert_eq!(grid.role_at(start).unwrap(), Role::Start);
        assert_eq!(grid.role_at(end).unwrap(), Role::End);
    }

    /// Asserts that the walls force a detour.
    #[test]
    fn solve_simple_problem() {
        // |S#E|
        // |.#.|
        // |...|
        let (start, end) = (Coord::new(0, 0), Coord::new(0, 2));
        let mut grid = grid_with_endpoints(3, start, end);
        grid.set_role(Coord::new(0, 1), Role::Wall).unwrap();
        grid.set_role(Coord::new(1, 1), Role::Wall).unwrap();
        let result = AstarSolver::new()
            .run(&mut grid, Some(start), Some(end), go)
            .unwrap();
        assert_eq!(result.path().unwrap().len(), 6);
        assert_eq!(format!("{}", grid), "S#E\n*#*\n***\n");
    }

    #[test]
    fn missing_or_equal_endpoints() {
        let mut grid = Grid::build(3, 10).unwrap();
        let c = Coord::new(1, 1);
        let solver = AstarSolver::new();
        for (start, end) in [(None, Some(c)), (Some(c), None), (None, None), (Some(c), Some(c))] {
            assert_eq!(
                solver.run(&mut grid, start, end, go),
                Err(PathError::MissingEndpoints)
            );
        }
        assert!(matches!(
            solver.run(&mut grid, Some(c), Some(Coord::new(3, 3)), go),
            Err(PathError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn walled_in_start_is_not_found() {
        // |S#.|
        // |#..|
        // |..E|
        let (start, end) = (Coord::new(0, 0), Coord::new(2, 2));
        let mut grid = grid_with_endpoints(3, start, end);
        grid.set_role(Coord::new(0, 1), Role::Wall).unwrap();
        grid.set_role(Coord::new(1, 0), Role::Wall).unwrap();
        let mut steps = 0;
        let (result, trace) = AstarSolver::new()
            .run_traced(&mut grid, Some(start), Some(end), |_| {
                steps += 1;
                StepFlow::Continue(())
            })
            .unwrap();
        assert_eq!(result, PathResult::NotFound);
        assert_eq!(trace.expanded, vec![start]);
        assert_eq!(steps, 1);
    }

    #[test]
    fn cancel_stops_promptly() {
        let (start, end) = (Coord::new(0, 0), Coord::new(4, 4));
        let mut grid = grid_with_endpoints(5, start, end);
        let mut steps = 0;
        let result = AstarSolver::new().run(&mut grid, Some(start), Some(end), |_| {
            steps += 1;
            if steps == 3 {
                StepFlow::Break(())
            } else {
                StepFlow::Continue(())
            }
        });
        assert_eq!(result, Err(PathError::Cancelled));
        assert_eq!(steps, 3);
        assert!(grid.cells().all(|c| c.role() != Role::Path));
    }

    /// Among equal estimates the cell queued first is expanded first.
    #[test]
    fn ties_are_broken_in_insertion_order() {
        let (start, end) = (Coord::new(1, 1), Coord::new(0, 0));
        let mut grid = grid_with_endpoints(3, start, end);
        let (_, trace) = AstarSolver::new()
            .run_traced(&mut grid, Some(start), Some(end), go)
            .unwrap();
        // Up (0,1) and left (1,0) both estimate 2, up was queued first
        assert_eq!(
            trace.expanded,
            vec![start, Coord::new(0, 1), Coord::new(1, 0), end]
        );
        assert_eq!(grid.role_at(Coord::new(0, 1)).unwrap(), Role::Path);
    }

    #[test]
    fn frontier_and_visited_marks() {
        let (start, end) = (Coord::new(0, 0), Coord::new(0, 2));
        let mut grid = grid_with_endpoints(3, start, end);
        let mut frames = Vec::new();
        AstarSolver::new()
            .run(&mut grid, Some(start), Some(end), |g| {
                frames.push(g.to_string());
                StepFlow::Continue(())
            })
            .unwrap();
        // First frame: start expanded, its neighbours queued
        assert_eq!(frames[0], "So.\no..\n...\n");
        assert_eq!(frames.last().unwrap(), "S*E\noo.\n...\n");
    }

    /// The path is marked from the end back towards the start, one frame per cell.
    #[test]
    fn path_marked_from_the_end() {
        // |S..E|
        let mut grid = Grid::build(4, 10).unwrap();
        let (start, end) = (Coord::new(0, 0), Coord::new(0, 3));
        for row in 1..4 {
            for col in 0..4 {
                grid.set_role(Coord::new(row, col), Role::Wall).unwrap();
            }
        }
        grid.set_role(start, Role::Start).unwrap();
        grid.set_role(end, Role::End).unwrap();
        let mut frames = Vec::new();
        AstarSolver::new()
            .run(&mut grid, Some(start), Some(end), |g| {
                frames.push(g.to_string().lines().next().unwrap().to_owned());
                StepFlow::Continue(())
            })
            .unwrap();
        assert_eq!(frames, vec!["So.E", "SooE", "SxoE", "Sx*E", "S**E"]);
    }

    #[test]
    fn zero_heuristic_still_finds_shortest() {
        let (start, end) = (Coord::new(0, 0), Coord::new(3, 2));
        let mut grid = grid_with_endpoints(4, start, end);
        let solver = AstarSolver::with_heuristic(|_: Coord, _: Coord| 0u32);
        let result = solver.run(&mut grid, Some(start), Some(end), go).unwrap();
        assert_eq!(result.path().unwrap().len(), 5);
    }
}
