use gridwalk_core::{CellState, Grid, Pos};
use log::{debug, trace, warn};

use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::heuristic::{Heuristic, Manhattan};
use crate::outcome::{SearchOutcome, Step, StepControl};
use crate::reconstruct::{Path, reconstruct_path};

/// Sentinel value meaning "no score yet" in the g/f arrays.
pub const UNREACHABLE: i32 = i32::MAX;

const NO_PARENT: usize = usize::MAX;

enum Phase {
    Expanding,
    // Route found; `remaining` interior cells, counted from the start, are
    // still to be painted, walking back from the end.
    Tracing { path: Path, remaining: usize },
    Arrived(Path),
    Done(SearchOutcome),
}

/// A resumable A* search over one [`Grid`].
///
/// Each [`step`](Self::step) does one unit of visible work and paints the
/// grid accordingly: an expansion marks relaxed neighbors `Open` and, on the
/// following step, the expanded cell `Closed`; once the end is popped, each
/// step marks one route cell `Path`, walking back from the end. The scores
/// live here, never on the grid.
///
/// The same grid must be passed to every step, and its barriers must not
/// change while the search runs.
pub struct Search<H = Manhattan> {
    size: i32,
    start: Pos,
    end: Pos,
    heuristic: H,
    g: Vec<i32>,
    f: Vec<i32>,
    came_from: Vec<usize>,
    frontier: Frontier,
    phase: Phase,
    // The last expanded cell; painted Closed at the start of the next step so
    // observers see it once in its expanded state.
    pending_close: Option<Pos>,
    nbuf: Vec<Pos>,
    expansions: usize,
}

impl Search<Manhattan> {
    /// Prepare a search with the default Manhattan heuristic.
    ///
    /// Fails without touching the grid if either endpoint is missing or they
    /// coincide. Panics if an endpoint lies outside the grid.
    #[track_caller]
    pub fn new(grid: &Grid, start: Option<Pos>, end: Option<Pos>) -> Result<Self, SearchError> {
        Self::with_heuristic(grid, start, end, Manhattan)
    }
}

impl<H: Heuristic> Search<H> {
    /// Prepare a search that ranks the frontier with `heuristic`.
    #[track_caller]
    pub fn with_heuristic(
        grid: &Grid,
        start: Option<Pos>,
        end: Option<Pos>,
        heuristic: H,
    ) -> Result<Self, SearchError> {
        let (start, end) = SearchError::check_endpoints(start, end)?;
        let _ = grid.cell(start);
        let _ = grid.cell(end);

        if !grid.adjacency_ready() {
            warn!("searching a grid whose adjacency was never computed; no cell has neighbors");
        }

        let size = grid.size();
        let len = grid.len();
        let mut search = Self {
            size,
            start,
            end,
            heuristic,
            g: vec![UNREACHABLE; len],
            f: vec![UNREACHABLE; len],
            came_from: vec![NO_PARENT; len],
            frontier: Frontier::new(),
            phase: Phase::Expanding,
            pending_close: None,
            nbuf: Vec::with_capacity(8),
            expansions: 0,
        };

        let si = search.slot(start);
        search.g[si] = 0;
        search.f[si] = search.heuristic.estimate(start, end);
        search.frontier.push(start, search.f[si]);

        debug!("A* from {start} to {end} on a {size}x{size} grid");
        Ok(search)
    }

    #[inline]
    pub fn start(&self) -> Pos {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Pos {
        self.end
    }

    /// Number of cells expanded so far.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Number of cells waiting in the frontier.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Done(_))
    }

    /// Best known cost from the start to `p`, if `p` has been reached.
    pub fn g_score(&self, p: Pos) -> Option<i32> {
        self.lookup(p).map(|i| self.g[i]).filter(|&g| g != UNREACHABLE)
    }

    /// `g + h` for `p`, if `p` has been reached.
    pub fn f_score(&self, p: Pos) -> Option<i32> {
        self.lookup(p).map(|i| self.f[i]).filter(|&f| f != UNREACHABLE)
    }

    /// The predecessor recorded for `p`. Only cells whose cost was improved
    /// have one; the start never does.
    pub fn came_from(&self, p: Pos) -> Option<Pos> {
        let parent = self.came_from[self.lookup(p)?];
        (parent != NO_PARENT).then(|| self.pos(parent))
    }

    /// Advance the search by one unit of work.
    pub fn step(&mut self, grid: &mut Grid) -> Step {
        debug_assert_eq!(grid.size(), self.size, "search stepped on a different grid");
        match std::mem::replace(&mut self.phase, Phase::Expanding) {
            Phase::Expanding => self.expand(grid),
            Phase::Tracing { path, remaining } => self.trace(grid, path, remaining),
            Phase::Arrived(path) => self.finish(SearchOutcome::Found(path)),
            Phase::Done(outcome) => {
                self.phase = Phase::Done(outcome.clone());
                Step::Finished(outcome)
            }
        }
    }

    /// Stop the search. Marks already painted stay on the grid.
    ///
    /// Returns [`SearchOutcome::Aborted`], or the earlier outcome if the
    /// search had already finished.
    pub fn abort(&mut self) -> SearchOutcome {
        if let Phase::Done(outcome) = &self.phase {
            return outcome.clone();
        }
        match self.finish(SearchOutcome::Aborted) {
            Step::Finished(outcome) => outcome,
            _ => SearchOutcome::Aborted,
        }
    }

    fn expand(&mut self, grid: &mut Grid) -> Step {
        if let Some(p) = self.pending_close.take() {
            if p != self.start {
                grid.set_state(p, CellState::Closed);
            }
        }

        let Some(current) = self.frontier.pop() else {
            return self.finish(SearchOutcome::NotFound);
        };

        if current == self.end {
            let Some(path) = reconstruct_path(self.start, self.end, |p| self.came_from(p)) else {
                return self.finish(SearchOutcome::NotFound);
            };
            let remaining = path.interior().len();
            return self.trace(grid, path, remaining);
        }

        self.expansions += 1;
        let ci = self.slot(current);
        let tentative = self.g[ci] + 1;

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        nbuf.extend_from_slice(grid.cell(current).neighbors());

        for &np in nbuf.iter() {
            if grid.cell(np).is_barrier() {
                continue;
            }
            let ni = self.slot(np);
            if tentative >= self.g[ni] {
                continue;
            }
            self.came_from[ni] = ci;
            self.g[ni] = tentative;
            self.f[ni] = tentative + self.heuristic.estimate(np, self.end);
            if !self.frontier.contains(np) {
                self.frontier.push(np, self.f[ni]);
                grid.set_state(np, CellState::Open);
            }
        }

        self.nbuf = nbuf;
        trace!(
            "expanded {current} (g={}, f={}), {} in frontier",
            self.g[ci],
            self.f[ci],
            self.frontier.len()
        );

        self.pending_close = Some(current);
        Step::Expanded(current)
    }

    fn trace(&mut self, grid: &mut Grid, path: Path, remaining: usize) -> Step {
        if remaining == 0 {
            // An end that is not the grid's designated one keeps its search mark.
            if grid.end() == Some(self.end) {
                grid.set_state(self.end, CellState::End);
            }
            self.phase = Phase::Arrived(path);
            return Step::Arrived;
        }
        let remaining = remaining - 1;
        let p = path.interior()[remaining];
        grid.set_state(p, CellState::Path);
        self.phase = Phase::Tracing { path, remaining };
        Step::Traced(p)
    }

    fn finish(&mut self, outcome: SearchOutcome) -> Step {
        match &outcome {
            SearchOutcome::Found(path) => debug!(
                "path found: cost {} after {} expansions",
                path.cost(),
                self.expansions
            ),
            SearchOutcome::NotFound => {
                debug!("no path after {} expansions", self.expansions)
            }
            SearchOutcome::Aborted => {
                debug!("search aborted after {} expansions", self.expansions)
            }
        }
        self.phase = Phase::Done(outcome.clone());
        Step::Finished(outcome)
    }

    #[inline]
    fn lookup(&self, p: Pos) -> Option<usize> {
        p.in_square(self.size).then(|| self.slot(p))
    }

    // Endpoints are validated and neighbors come from in-bounds adjacency.
    #[inline]
    fn slot(&self, p: Pos) -> usize {
        flat_index(self.size, p)
    }

    #[inline]
    fn pos(&self, idx: usize) -> Pos {
        let n = self.size as usize;
        Pos::new((idx / n) as i32, (idx % n) as i32)
    }
}

/// Row-major index of an in-bounds `p`, computed in `usize`.
#[inline]
fn flat_index(size: i32, p: Pos) -> usize {
    p.row as usize * size as usize + p.col as usize
}

/// Run A* with the Manhattan heuristic from `start` to `end`, painting
/// progress into `grid`.
///
/// `on_step` is called once after every expansion, once after every route
/// cell is painted, and once more after the end cell is restored; returning
/// [`StepControl::Abort`] stops the search with [`SearchOutcome::Aborted`].
///
/// The grid's adjacency must have been computed with
/// [`Grid::recompute_all_neighbors`].
#[track_caller]
pub fn run_search<F>(
    grid: &mut Grid,
    start: Option<Pos>,
    end: Option<Pos>,
    on_step: F,
) -> Result<SearchOutcome, SearchError>
where
    F: FnMut(&Grid) -> StepControl,
{
    run_search_with(grid, start, end, Manhattan, on_step)
}

/// [`run_search`] with a caller-chosen heuristic.
#[track_caller]
pub fn run_search_with<H, F>(
    grid: &mut Grid,
    start: Option<Pos>,
    end: Option<Pos>,
    heuristic: H,
    mut on_step: F,
) -> Result<SearchOutcome, SearchError>
where
    H: Heuristic,
    F: FnMut(&Grid) -> StepControl,
{
    let mut search = Search::with_heuristic(grid, start, end, heuristic)?;
    loop {
        match search.step(grid) {
            Step::Finished(outcome) => return Ok(outcome),
            _ => {
                if on_step(&*grid) == StepControl::Abort {
                    return Ok(search.abort());
                }
            }
        }
    }
}
