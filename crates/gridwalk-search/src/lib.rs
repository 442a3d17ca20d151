//! Step-wise A* search over a [`gridwalk_core::Grid`].
//!
//! The engine paints its progress into the grid as it goes: relaxed
//! neighbors become `Open`, expanded cells `Closed`, and once the end is
//! reached the route is marked `Path` from the end back to the start. A
//! caller-supplied callback runs after every such step and may abort the
//! search.
//!
//! - [`run_search`] runs to completion with the default [`Manhattan`]
//!   heuristic; [`run_search_with`] takes any [`Heuristic`].
//! - [`Search`] exposes the same engine one [`Step`] at a time, for callers
//!   that interleave the search with their own frame loop.
//!
//! Moves go to all eight neighbors at unit cost. The frontier breaks `f`
//! ties by insertion order, so runs are fully deterministic.

mod astar;
mod distance;
mod error;
mod frontier;
mod heuristic;
mod outcome;
mod reconstruct;

pub use astar::{Search, UNREACHABLE, run_search, run_search_with};
pub use distance::{chebyshev, manhattan};
pub use error::{EndpointFault, SearchError};
pub use frontier::Frontier;
pub use heuristic::{Chebyshev, Heuristic, Manhattan};
pub use outcome::{SearchOutcome, Step, StepControl};
pub use reconstruct::{Path, reconstruct_path};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use gridwalk_core::{Grid, Pos};

    #[test]
    fn outcome_roundtrip() {
        let mut g = Grid::new(4);
        g.mark_start(Pos::new(0, 0));
        g.mark_end(Pos::new(3, 2));
        g.recompute_all_neighbors();
        let outcome = run_search(
            &mut g,
            Some(Pos::new(0, 0)),
            Some(Pos::new(3, 2)),
            |_| StepControl::Continue,
        )
        .unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        let back: SearchOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }
}
