//! The campus street map: a fixed set of wall segments on a 40x40 grid.
//!
//! Segments are given in (row, col) grid coordinates. The visualizer draws
//! rows as terminal lines, so the map appears transposed relative to a
//! renderer that lays rows out along the x axis.

use gridwalk_core::{Grid, Pos};
use log::warn;

use crate::config::DemoConfig;

/// A straight run of barrier cells. Ranges are half-open.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Column `col`, rows `from..to`.
    Col { col: i32, from: i32, to: i32 },
    /// Row `row`, columns `from..to`.
    Row { row: i32, from: i32, to: i32 },
    Cell(Pos),
}

impl Segment {
    /// Cells covered by the segment, in marking order.
    pub fn cells(self) -> impl Iterator<Item = Pos> {
        let (fixed, from, to, vertical) = match self {
            Self::Col { col, from, to } => (col, from, to, true),
            Self::Row { row, from, to } => (row, from, to, false),
            Self::Cell(p) => (p.row, p.col, p.col + 1, false),
        };
        (from..to).map(move |i| {
            if vertical {
                Pos::new(i, fixed)
            } else {
                Pos::new(fixed, i)
            }
        })
    }
}

const fn col(col: i32, from: i32, to: i32) -> Segment {
    Segment::Col { col, from, to }
}

const fn row(row: i32, from: i32, to: i32) -> Segment {
    Segment::Row { row, from, to }
}

/// Side length the campus map was drawn for.
pub const CAMPUS_ROWS: i32 = 40;

/// Wall segments of the campus map, in the order they are marked.
pub const CAMPUS: [Segment; 33] = [
    col(18, 1, 12),
    col(18, 0, 12),
    col(20, 0, 7),
    col(20, 8, 12),
    Segment::Cell(Pos::new(0, 19)),
    row(11, 20, 32),
    row(13, 20, 32),
    col(31, 14, 32),
    col(33, 13, 32),
    row(31, 20, 32),
    row(33, 23, 32),
    col(31, 33, 40),
    col(33, 32, 40),
    row(11, 33, 39),
    row(13, 33, 39),
    row(6, 20, 34),
    row(8, 20, 31),
    col(33, 7, 12),
    col(31, 8, 12),
    row(31, 7, 18),
    row(33, 5, 18),
    col(18, 33, 37),
    row(36, 18, 23),
    col(23, 34, 37),
    col(19, 33, 36),
    col(20, 33, 36),
    col(22, 33, 37),
    col(18, 14, 32),
    col(20, 14, 32),
    row(11, 5, 19),
    row(13, 7, 19),
    col(5, 11, 33),
    col(7, 13, 31),
];

/// Mark every campus wall that fits in `grid`. Returns how many cells were
/// skipped for lying outside a smaller grid.
pub fn apply_campus(grid: &mut Grid) -> usize {
    let mut skipped = 0;
    for p in CAMPUS.iter().flat_map(|s| s.cells()) {
        if grid.contains(p) {
            grid.mark_barrier(p);
        } else {
            skipped += 1;
        }
    }
    if skipped > 0 {
        warn!(
            "campus layout is {CAMPUS_ROWS}x{CAMPUS_ROWS}; skipped {skipped} walls outside the {0}x{0} grid",
            grid.size()
        );
    }
    skipped
}

/// Build the grid a demo starts from: the campus walls if enabled, then the
/// configured start/end presets.
pub fn prepare_grid(config: &DemoConfig) -> Grid {
    let mut grid = Grid::new(config.rows);
    if config.campus_layout {
        apply_campus(&mut grid);
    }
    if let Some(p) = config.start {
        grid.mark_start(p);
    }
    if let Some(p) = config.end {
        grid.mark_end(p);
    }
    grid
}
