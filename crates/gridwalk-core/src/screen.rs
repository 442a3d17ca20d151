//! The [`Screen`] type: a character buffer a [`Model`](crate::Model) draws
//! into, and the [`Frame`] diff a [`Driver`](crate::Driver) flushes.

use crate::style::Style;

/// A terminal position: `x` is the column, `y` the line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreenPos {
    pub x: i32,
    pub y: i32,
}

impl ScreenPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Glyph
// ---------------------------------------------------------------------------

/// A styled character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    /// Set the character (builder).
    #[inline]
    pub const fn with_char(mut self, ch: char) -> Self {
        self.ch = ch;
        self
    }

    /// Set the style (builder).
    #[inline]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Default for Glyph {
    #[inline]
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// A fixed-size buffer of [`Glyph`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    glyphs: Vec<Glyph>,
    width: i32,
    height: i32,
}

impl Screen {
    /// Create a blank screen of the given dimensions.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            glyphs: vec![Glyph::default(); (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn index(&self, p: ScreenPos) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height {
            Some((p.y as usize) * (self.width as usize) + (p.x as usize))
        } else {
            None
        }
    }

    /// Read the glyph at `p`. Returns `Glyph::default()` if `p` is outside.
    pub fn at(&self, p: ScreenPos) -> Glyph {
        self.index(p).map(|i| self.glyphs[i]).unwrap_or_default()
    }

    /// Set the glyph at `p`. No-op if `p` is outside.
    pub fn set(&mut self, p: ScreenPos, glyph: Glyph) {
        if let Some(i) = self.index(p) {
            self.glyphs[i] = glyph;
        }
    }

    /// Fill every position with `glyph`.
    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Write `text` starting at `p`, clipped at the right edge. Returns the
    /// number of characters written.
    pub fn print(&mut self, p: ScreenPos, text: &str, style: Style) -> i32 {
        let mut written = 0;
        for (i, ch) in text.chars().enumerate() {
            let x = p.x + i as i32;
            if x >= self.width {
                break;
            }
            self.set(
                ScreenPos::new(x, p.y),
                Glyph::default().with_char(ch).with_style(style),
            );
            written += 1;
        }
        written
    }

    /// Copy every glyph from `src`, which must have the same dimensions.
    pub fn copy_from(&mut self, src: &Screen) {
        if self.width == src.width && self.height == src.height {
            self.glyphs.copy_from_slice(&src.glyphs);
        }
    }

    /// Row-major iterator over `(ScreenPos, Glyph)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ScreenPos, Glyph)> + '_ {
        let w = self.width.max(1) as usize;
        self.glyphs
            .iter()
            .enumerate()
            .map(move |(i, g)| (ScreenPos::new((i % w) as i32, (i / w) as i32), *g))
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameGlyph / compute_frame
// ---------------------------------------------------------------------------

/// A single glyph that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameGlyph {
    pub glyph: Glyph,
    pub pos: ScreenPos,
}

/// A set of glyph changes (a diff frame).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub glyphs: Vec<FrameGlyph>,
    pub width: i32,
    pub height: i32,
}

/// Compute the difference between two same-sized screens.
///
/// Returns a [`Frame`] containing only the glyphs that differ.
pub fn compute_frame(prev: &Screen, curr: &Screen) -> Frame {
    let glyphs = curr
        .iter()
        .filter(|&(p, g)| prev.at(p) != g)
        .map(|(pos, glyph)| FrameGlyph { glyph, pos })
        .collect();
    Frame {
        glyphs,
        width: curr.width(),
        height: curr.height(),
    }
}
