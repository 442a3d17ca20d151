use gridwalk_core::Pos;

/// Manhattan (L1) distance between two positions.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

/// Chebyshev (L∞) distance between two positions: the number of unit moves
/// between them when diagonals cost the same as orthogonal steps.
#[inline]
pub fn chebyshev(a: Pos, b: Pos) -> i32 {
    (a.row - b.row).abs().max((a.col - b.col).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Pos::new(1, 1);
        let b = Pos::new(4, 3);
        assert_eq!(manhattan(a, b), 5);
        assert_eq!(chebyshev(a, b), 3);
        assert_eq!(manhattan(b, a), 5);
        assert_eq!(chebyshev(a, a), 0);
    }
}
