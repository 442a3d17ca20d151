//! The [`Cell`] type: one grid position with a state tag and cached adjacency.

use crate::geom::Pos;

/// What a cell currently is. Exactly one tag applies at a time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    /// Discovered by a search, waiting in the frontier.
    Open,
    /// Expanded by a search.
    Closed,
    /// Impassable.
    Barrier,
    Start,
    End,
    /// Part of a reconstructed path.
    Path,
}

impl CellState {
    /// Single-character glyph used by the text rendering of a grid.
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Open => 'o',
            Self::Closed => 'x',
            Self::Barrier => '#',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Path => '*',
        }
    }

    /// Whether the tag is one a search paints (`Open`, `Closed`, `Path`).
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Open | Self::Closed | Self::Path)
    }
}

/// A single grid position.
///
/// The position is fixed at creation. The state is mutated through
/// [`Grid`](crate::Grid), which keeps its barrier list in sync, and the
/// neighbor list is only meaningful after
/// [`Grid::recompute_all_neighbors`](crate::Grid::recompute_all_neighbors).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Pos,
    state: CellState,
    neighbors: Vec<Pos>,
}

impl Cell {
    pub(crate) fn new(pos: Pos) -> Self {
        Self {
            pos,
            state: CellState::Empty,
            neighbors: Vec::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.pos.row
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.pos.col
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    /// Cached adjacency, in [`DIRECTIONS`](crate::geom::DIRECTIONS) order.
    #[inline]
    pub fn neighbors(&self) -> &[Pos] {
        &self.neighbors
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.state == CellState::Empty
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == CellState::Open
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == CellState::Closed
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.state == CellState::Start
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.state == CellState::End
    }

    #[inline]
    pub fn is_path(&self) -> bool {
        self.state == CellState::Path
    }

    #[inline]
    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    /// Replace the neighbor list with every in-bounds position around this
    /// cell in a grid of side `n`.
    ///
    /// Diagonals are kept even when both flanking orthogonal cells are
    /// barriers; barriers themselves are filtered by the search, not here.
    pub(crate) fn recompute_neighbors(&mut self, n: i32) {
        self.neighbors.clear();
        self.neighbors
            .extend(self.pos.around().into_iter().filter(|p| p.in_square(n)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_empty() {
        let c = Cell::new(Pos::new(2, 3));
        assert_eq!(c.position(), Pos::new(2, 3));
        assert_eq!((c.row(), c.col()), (2, 3));
        assert!(c.is_empty());
        assert!(c.neighbors().is_empty());
    }

    #[test]
    fn predicates_follow_state() {
        let mut c = Cell::new(Pos::ZERO);
        c.set_state(CellState::Barrier);
        assert!(c.is_barrier());
        assert!(!c.is_empty());
        c.set_state(CellState::Path);
        assert!(c.is_path());
        assert!(!c.is_barrier());
    }

    #[test]
    fn corner_has_three_neighbors() {
        let mut c = Cell::new(Pos::new(0, 0));
        c.recompute_neighbors(4);
        assert_eq!(
            c.neighbors(),
            &[Pos::new(1, 0), Pos::new(1, 1), Pos::new(0, 1)]
        );
    }

    #[test]
    fn interior_has_eight_neighbors() {
        let mut c = Cell::new(Pos::new(1, 1));
        c.recompute_neighbors(3);
        assert_eq!(c.neighbors().len(), 8);
        assert_eq!(c.neighbors()[0], Pos::new(2, 1));
    }

    #[test]
    fn search_marks() {
        assert!(CellState::Open.is_search_mark());
        assert!(CellState::Path.is_search_mark());
        assert!(!CellState::Barrier.is_search_mark());
        assert!(!CellState::Start.is_search_mark());
    }
}
