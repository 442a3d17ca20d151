//! The [`Grid`] type: a square matrix of [`Cell`]s addressed by [`Pos`].
//!
//! The grid owns every cell, the list of barrier coordinates and the
//! designated start/end positions. Cells are stored row-major, so iteration
//! order is deterministic.

use std::fmt;

use crate::cell::{Cell, CellState};
use crate::geom::Pos;

/// An N x N grid of cells.
#[derive(Clone, Debug)]
pub struct Grid {
    size: i32,
    cells: Vec<Cell>,
    // Distinct barrier positions, in the order they were first marked.
    barriers: Vec<Pos>,
    start: Option<Pos>,
    end: Option<Pos>,
    adjacency_ready: bool,
}

impl Grid {
    /// Build a `size` x `size` grid of empty cells with no adjacency yet.
    ///
    /// # Panics
    ///
    /// If `size` is negative.
    #[track_caller]
    pub fn new(size: i32) -> Self {
        assert!(size >= 0, "grid size must not be negative, got {size}");
        let mut cells = Vec::with_capacity((size as usize) * (size as usize));
        for row in 0..size {
            for col in 0..size {
                cells.push(Cell::new(Pos::new(row, col)));
            }
        }
        Self {
            size,
            cells,
            barriers: Vec::new(),
            start: None,
            end: None,
            adjacency_ready: false,
        }
    }

    /// Side length N.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Total number of cells (N * N).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.in_square(self.size)
    }

    /// Flat row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.size as usize + p.col as usize)
    }

    /// Position of the flat index `idx`.
    #[inline]
    pub fn pos(&self, idx: usize) -> Pos {
        let n = self.size as usize;
        Pos::new((idx / n) as i32, (idx % n) as i32)
    }

    #[inline]
    #[track_caller]
    fn expect_index(&self, p: Pos) -> usize {
        match self.index(p) {
            Some(i) => i,
            None => panic!(
                "position {p} is outside the {0}x{0} grid",
                self.size
            ),
        }
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, p: Pos) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// The cell at `p`.
    ///
    /// # Panics
    ///
    /// If `p` is outside the grid.
    #[inline]
    #[track_caller]
    pub fn cell(&self, p: Pos) -> &Cell {
        &self.cells[self.expect_index(p)]
    }

    /// The state of the cell at `p`. Panics if `p` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn state(&self, p: Pos) -> CellState {
        self.cell(p).state()
    }

    /// Overwrite the state of the cell at `p`.
    ///
    /// The barrier list follows: a cell entering `Barrier` is appended once,
    /// a cell leaving it is removed. Writing `Barrier` or `Empty` over the
    /// designated start or end drops the designation; search marks
    /// (`Open`, `Closed`, `Path`) leave it in place.
    ///
    /// # Panics
    ///
    /// If `p` is out of bounds, or if `state` is `Start`/`End` and `p` is not
    /// the designated start/end. Use [`mark_start`](Self::mark_start) and
    /// [`mark_end`](Self::mark_end) to move a designation.
    #[track_caller]
    pub fn set_state(&mut self, p: Pos, state: CellState) {
        self.expect_index(p);
        match state {
            CellState::Start if self.start != Some(p) => {
                panic!("{p} is not the start; designate it with mark_start")
            }
            CellState::End if self.end != Some(p) => {
                panic!("{p} is not the end; designate it with mark_end")
            }
            CellState::Barrier | CellState::Empty => self.release_endpoint(p),
            _ => {}
        }
        self.write(p, state);
    }

    #[track_caller]
    fn write(&mut self, p: Pos, state: CellState) {
        let i = self.expect_index(p);
        let prev = self.cells[i].state();
        if prev == CellState::Barrier && state != CellState::Barrier {
            self.barriers.retain(|&b| b != p);
        } else if state == CellState::Barrier && prev != CellState::Barrier {
            self.barriers.push(p);
        }
        self.cells[i].set_state(state);
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Make `p` impassable. A start or end designation on `p` is dropped.
    #[track_caller]
    pub fn mark_barrier(&mut self, p: Pos) {
        self.set_state(p, CellState::Barrier);
    }

    /// Designate `p` as the start. A previous start cell is reset to empty,
    /// and `p` stops being the end if it was.
    #[track_caller]
    pub fn mark_start(&mut self, p: Pos) {
        self.expect_index(p);
        if let Some(old) = self.start.take() {
            if old != p && self.state(old) == CellState::Start {
                self.write(old, CellState::Empty);
            }
        }
        if self.end == Some(p) {
            self.end = None;
        }
        self.write(p, CellState::Start);
        self.start = Some(p);
    }

    /// Designate `p` as the end. A previous end cell is reset to empty, and
    /// `p` stops being the start if it was.
    #[track_caller]
    pub fn mark_end(&mut self, p: Pos) {
        self.expect_index(p);
        if let Some(old) = self.end.take() {
            if old != p && self.state(old) == CellState::End {
                self.write(old, CellState::Empty);
            }
        }
        if self.start == Some(p) {
            self.start = None;
        }
        self.write(p, CellState::End);
        self.end = Some(p);
    }

    /// Reset `p` to empty, dropping any start/end designation on it.
    #[track_caller]
    pub fn clear_cell(&mut self, p: Pos) {
        self.set_state(p, CellState::Empty);
    }

    fn release_endpoint(&mut self, p: Pos) {
        if self.start == Some(p) {
            self.start = None;
        }
        if self.end == Some(p) {
            self.end = None;
        }
    }

    /// The designated start, if any.
    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    /// The designated end, if any.
    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    /// Barrier coordinates, deduplicated, in the order first marked.
    #[inline]
    pub fn barrier_coordinates(&self) -> &[Pos] {
        &self.barriers
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Recompute the neighbor list of every cell.
    pub fn recompute_all_neighbors(&mut self) {
        let n = self.size;
        for cell in &mut self.cells {
            cell.recompute_neighbors(n);
        }
        self.adjacency_ready = true;
    }

    /// Whether [`recompute_all_neighbors`](Self::recompute_all_neighbors) has
    /// run since the grid was built or cleared.
    #[inline]
    pub fn adjacency_ready(&self) -> bool {
        self.adjacency_ready
    }

    // -----------------------------------------------------------------------
    // Resets
    // -----------------------------------------------------------------------

    /// Replace the whole grid with a fresh one of the same size: every cell
    /// empty, no endpoints, no barriers, no adjacency.
    pub fn clear(&mut self) {
        *self = Grid::new(self.size);
    }

    /// Wipe the `Open`/`Closed`/`Path` marks left by a search and repaint the
    /// designated endpoints. Barriers and adjacency are kept.
    pub fn reset_search_marks(&mut self) {
        for cell in &mut self.cells {
            if cell.state().is_search_mark() {
                cell.set_state(CellState::Empty);
            }
        }
        if let Some(s) = self.start {
            self.write(s, CellState::Start);
        }
        if let Some(e) = self.end {
            self.write(e, CellState::End);
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Row-major iterator over the cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Count how many cells are in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state() == state).count()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Grid {
    /// One line per row, one [`CellState::glyph`] per cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1) as usize) {
            for cell in row {
                write!(f, "{}", cell.state().glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
