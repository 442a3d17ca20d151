//! Visual styling: [`Color`], [`AttrMask`], [`Style`], and the palette for
//! cell states.

use std::ops::BitOr;

use crate::cell::CellState;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGB colour packed into a `u32` (0x00RRGGBB).
///
/// `Color::DEFAULT` means "terminal default"; pure black is therefore
/// written as `from_rgb(0, 0, 1)` where it must be explicit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    /// The default / unset colour (0).
    pub const DEFAULT: Self = Self(0);

    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const BLACK: Self = Self::from_rgb(0, 0, 1);
    pub const RED: Self = Self::from_rgb(255, 0, 0);
    pub const GREEN: Self = Self::from_rgb(0, 255, 0);
    pub const ORANGE: Self = Self::from_rgb(255, 165, 0);
    pub const PURPLE: Self = Self::from_rgb(128, 0, 128);
    pub const DARK_BLUE: Self = Self::from_rgb(0, 0, 139);
    pub const GREY: Self = Self::from_rgb(128, 128, 128);

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// The `(r, g, b)` components.
    pub const fn to_rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }

    /// The colour a cell in `state` is painted with.
    pub const fn for_state(state: CellState) -> Self {
        match state {
            CellState::Empty => Self::WHITE,
            CellState::Open => Self::GREEN,
            CellState::Closed => Self::RED,
            CellState::Barrier => Self::BLACK,
            CellState::Start => Self::ORANGE,
            CellState::End => Self::DARK_BLUE,
            CellState::Path => Self::PURPLE,
        }
    }
}

// ---------------------------------------------------------------------------
// AttrMask
// ---------------------------------------------------------------------------

/// Bitmask of text attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttrMask(pub u32);

impl AttrMask {
    pub const NONE: Self = Self(0);
    pub const BOLD: Self = Self(1 << 0);
    pub const DIM: Self = Self(1 << 1);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for AttrMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Complete visual style for a single glyph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub attrs: AttrMask,
}

impl Style {
    /// Set the foreground colour (builder).
    #[inline]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background colour (builder).
    #[inline]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    pub const fn with_attrs(mut self, attrs: AttrMask) -> Self {
        self.attrs = attrs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_components() {
        assert_eq!(Color::from_rgb(0xAB, 0xCD, 0xEF).to_rgb(), (0xAB, 0xCD, 0xEF));
        assert_eq!(Color::DARK_BLUE.to_rgb(), (0, 0, 139));
    }

    #[test]
    fn black_is_not_the_default_colour() {
        assert_ne!(Color::BLACK, Color::DEFAULT);
        assert_eq!(Color::for_state(CellState::Barrier), Color::BLACK);
    }

    #[test]
    fn every_state_has_a_distinct_colour() {
        let states = [
            CellState::Empty,
            CellState::Open,
            CellState::Closed,
            CellState::Barrier,
            CellState::Start,
            CellState::End,
            CellState::Path,
        ];
        for (i, a) in states.iter().enumerate() {
            for b in &states[i + 1..] {
                assert_ne!(Color::for_state(*a), Color::for_state(*b));
            }
        }
    }

    #[test]
    fn attr_mask_ops() {
        let m = AttrMask::BOLD | AttrMask::DIM;
        assert!(m.contains(AttrMask::BOLD));
        assert!(!AttrMask::BOLD.contains(m));
        assert!(AttrMask::NONE.is_empty());
    }
}
