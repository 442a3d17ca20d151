use gridwalk_core::Pos;

/// A found route, start to end inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Pos>,
}

impl Path {
    /// Every position on the route, start first.
    #[inline]
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    /// Number of moves, i.e. edges, along the route.
    #[inline]
    pub fn cost(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.cells.first().copied()
    }

    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.cells.last().copied()
    }

    /// Cells strictly between start and end.
    pub fn interior(&self) -> &[Pos] {
        match self.cells.len() {
            0..=2 => &[],
            n => &self.cells[1..n - 1],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn into_vec(self) -> Vec<Pos> {
        self.cells
    }
}

/// Rebuild the full route from `end` back to `start` through `came_from`.
///
/// Returns `None` if the chain breaks before reaching `start`.
pub fn reconstruct_path<F>(start: Pos, end: Pos, came_from: F) -> Option<Path>
where
    F: Fn(Pos) -> Option<Pos>,
{
    let mut cells = vec![end];
    let mut cursor = end;
    while cursor != start {
        cursor = came_from(cursor)?;
        cells.push(cursor);
    }
    cells.reverse();
    Some(Path { cells })
}
