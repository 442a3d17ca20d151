//! Geometry primitive: [`Pos`], a `(row, col)` grid coordinate.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// A grid coordinate. Rows grow downward, columns grow to the right.
///
/// Coordinates are signed so that neighbor offsets can step outside the grid
/// and be rejected by a bounds check instead of wrapping.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

/// The eight neighbor offsets in adjacency order.
///
/// Order matters: neighbors are pushed onto the frontier in this order, and
/// the insertion sequence breaks `f_score` ties.
pub const DIRECTIONS: [Pos; 8] = [
    Pos::new(1, 0),   // down
    Pos::new(1, 1),   // down-right
    Pos::new(1, -1),  // down-left
    Pos::new(-1, 0),  // up
    Pos::new(-1, 1),  // up-right
    Pos::new(-1, -1), // up-left
    Pos::new(0, 1),   // right
    Pos::new(0, -1),  // left
];

impl Pos {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The `(row, col)` pair.
    #[inline]
    pub const fn as_tuple(self) -> (i32, i32) {
        (self.row, self.col)
    }

    /// All eight surrounding positions in [`DIRECTIONS`] order, without any
    /// bounds check.
    #[inline]
    pub fn around(self) -> [Pos; 8] {
        DIRECTIONS.map(|d| self + d)
    }

    /// Whether `self` is within the `[0, n)` square on both axes.
    #[inline]
    pub const fn in_square(self, n: i32) -> bool {
        self.row >= 0 && self.row < n && self.col >= 0 && self.col < n
    }
}

// --- trait impls for Pos ---

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    /// Row-major order.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Pos {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Pos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Pos {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_arithmetic() {
        let a = Pos::new(1, 2);
        let b = Pos::new(3, 4);
        assert_eq!(a + b, Pos::new(4, 6));
        assert_eq!(b - a, Pos::new(2, 2));
        assert_eq!(a.shift(-1, 3), Pos::new(0, 5));
    }

    #[test]
    fn ordering_is_row_major() {
        let mut v = vec![Pos::new(1, 0), Pos::new(0, 2), Pos::new(0, 1)];
        v.sort();
        assert_eq!(v, vec![Pos::new(0, 1), Pos::new(0, 2), Pos::new(1, 0)]);
    }

    #[test]
    fn around_follows_direction_order() {
        let around = Pos::new(5, 5).around();
        assert_eq!(around[0], Pos::new(6, 5));
        assert_eq!(around[1], Pos::new(6, 6));
        assert_eq!(around[2], Pos::new(6, 4));
        assert_eq!(around[3], Pos::new(4, 5));
        assert_eq!(around[7], Pos::new(5, 4));
    }

    #[test]
    fn in_square_bounds() {
        assert!(Pos::new(0, 0).in_square(3));
        assert!(Pos::new(2, 2).in_square(3));
        assert!(!Pos::new(3, 0).in_square(3));
        assert!(!Pos::new(0, -1).in_square(3));
    }

    #[test]
    fn display_and_tuple() {
        let p = Pos::from((4, 7));
        assert_eq!(p.to_string(), "(4, 7)");
        assert_eq!(p.as_tuple(), (4, 7));
    }
}
