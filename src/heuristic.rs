use crate::cell::Coord;

/// Estimates the remaining cost between two cells.
pub trait Heuristic {
    fn estimate(&self, a: Coord, b: Coord) -> u32;
}

/// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry). Admissible and
/// consistent for unit-cost moves on a 4-neighbourhood, so A* returns shortest paths with it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    fn estimate(&self, a: Coord, b: Coord) -> u32 {
        a.manhattan_distance(&b)
    }
}

impl<F> Heuristic for F
where
    F: Fn(Coord, Coord) -> u32,
{
    fn estimate(&self, a: Coord, b: Coord) -> u32 {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_estimate() {
        assert_eq!(Manhattan.estimate(Coord::new(0, 0), Coord::new(4, 4)), 8);
        assert_eq!(Manhattan.estimate(Coord::new(2, 3), Coord::new(2, 2)), 1);
    }

    #[test]
    fn closures_are_heuristics() {
        let zero = |_: Coord, _: Coord| 0u32;
        assert_eq!(zero.estimate(Coord::new(0, 0), Coord::new(9, 9)), 0);
    }
}
