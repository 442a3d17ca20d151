use gridwalk_core::Pos;

use crate::distance::{chebyshev, manhattan};

/// Estimate of the remaining cost from `from` to `to`.
///
/// The engine does not require admissibility; an overestimating heuristic
/// still terminates but may return a longer path.
pub trait Heuristic {
    fn estimate(&self, from: Pos, to: Pos) -> i32;
}

/// `|Δrow| + |Δcol|`. The default strategy.
///
/// With unit-cost diagonals this overestimates, so paths are deterministic
/// but not always shortest.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Manhattan;

impl Heuristic for Manhattan {
    #[inline]
    fn estimate(&self, from: Pos, to: Pos) -> i32 {
        manhattan(from, to)
    }
}

/// `max(|Δrow|, |Δcol|)`. Admissible and consistent for 8-connected unit
/// moves, so searches with it return shortest paths.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chebyshev;

impl Heuristic for Chebyshev {
    #[inline]
    fn estimate(&self, from: Pos, to: Pos) -> i32 {
        chebyshev(from, to)
    }
}

impl<F> Heuristic for F
where
    F: Fn(Pos, Pos) -> i32,
{
    #[inline]
    fn estimate(&self, from: Pos, to: Pos) -> i32 {
        self(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies_match_distances() {
        let a = Pos::new(0, 0);
        let b = Pos::new(2, 5);
        assert_eq!(Manhattan.estimate(a, b), 7);
        assert_eq!(Chebyshev.estimate(a, b), 5);
    }

    #[test]
    fn closures_are_heuristics() {
        let zero = |_: Pos, _: Pos| 0;
        assert_eq!(zero.estimate(Pos::new(9, 9), Pos::ZERO), 0);
    }
}
