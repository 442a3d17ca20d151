//! **gridwalk-core**: grid model and terminal app plumbing for gridwalk.
//!
//! This crate provides the square [`Grid`] of tagged [`Cell`]s that a search
//! paints into, the [`Pos`] geometry with its fixed eight-direction order,
//! and the Elm-architecture application loop ([`App`], [`Model`], [`Driver`])
//! that the interactive visualizer runs on.

pub mod app;
pub mod cell;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod screen;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use cell::{Cell, CellState};
pub use geom::{DIRECTIONS, Pos};
pub use grid::Grid;
pub use messages::*;
pub use screen::{Frame, FrameGlyph, Glyph, Screen, ScreenPos, compute_frame};
pub use style::{AttrMask, Color, Style};

/// Build an `n` x `n` grid of empty cells.
///
/// Adjacency is not computed yet; call
/// [`Grid::recompute_all_neighbors`] after placing barriers. Panics if `n`
/// is negative.
#[track_caller]
pub fn build_grid(n: i32) -> Grid {
    Grid::new(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_grid_shape() {
        let g = build_grid(4);
        assert_eq!(g.size(), 4);
        assert_eq!(g.len(), 16);
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
        assert!(g.barrier_coordinates().is_empty());
    }

    #[test]
    fn zero_grid_has_no_cells() {
        let mut g = build_grid(0);
        assert!(g.is_empty());
        g.recompute_all_neighbors();
        assert_eq!(g.to_string(), "");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip_pos_and_state() {
        let p = Pos::new(3, -1);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(serde_json::from_str::<Pos>(&json).unwrap(), p);

        let s = CellState::Barrier;
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(serde_json::from_str::<CellState>(&json).unwrap(), s);
    }
}
