//! Inclusive integer rectangles: the `randomize` input and the
//! `occupied_bounds` result.

use std::fmt;
use std::str::FromStr;

use super::coord::Coord;
use super::error::Error;

/// `[x_low..=x_high] × [y_low..=y_high]`. A rectangle with a low bound
/// above its high bound on either axis is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x_low: i32,
    pub x_high: i32,
    pub y_low: i32,
    pub y_high: i32,
}

impl Rect {
    /// The single cell at the origin. Starting point for clamped bounds.
    pub const ORIGIN: Rect = Rect::new(0, 0, 0, 0);

    /// Argument order follows `(minX, maxX, minY, maxY)`.
    pub const fn new(x_low: i32, x_high: i32, y_low: i32, y_high: i32) -> Self {
        Self {
            x_low,
            x_high,
            y_low,
            y_high,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x_low > self.x_high || self.y_low > self.y_high
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        (self.x_low..=self.x_high).contains(&c.x()) && (self.y_low..=self.y_high).contains(&c.y())
    }

    #[inline]
    pub fn width(&self) -> u64 {
        span(self.x_low, self.x_high)
    }

    #[inline]
    pub fn height(&self) -> u64 {
        span(self.y_low, self.y_high)
    }

    /// Number of cells covered.
    #[inline]
    pub fn area(&self) -> u64 {
        self.width().saturating_mul(self.height())
    }

    /// Grow to cover `c`.
    #[inline]
    pub fn include(&mut self, c: Coord) {
        self.x_low = self.x_low.min(c.x());
        self.x_high = self.x_high.max(c.x());
        self.y_low = self.y_low.min(c.y());
        self.y_high = self.y_high.max(c.y());
    }

    /// Every cell, row-major: most negative `y` first, then most negative `x`.
    pub fn cells(self) -> impl Iterator<Item = Coord> {
        (self.y_low..=self.y_high)
            .flat_map(move |y| (self.x_low..=self.x_high).map(move |x| Coord::new(x, y)))
    }

    /// `(minX, maxX, minY, maxY)`.
    #[inline]
    pub fn as_tuple(&self) -> (i32, i32, i32, i32) {
        (self.x_low, self.x_high, self.y_low, self.y_high)
    }
}

#[inline]
fn span(low: i32, high: i32) -> u64 {
    if low > high {
        0
    } else {
        (high as i64 - low as i64) as u64 + 1
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{},{}..{}",
            self.x_low, self.x_high, self.y_low, self.y_high
        )
    }
}

/// Parses `x0..x1,y0..y1` with inclusive bounds, e.g. `-20..20,-10..10`.
impl FromStr for Rect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidRect {
            input: s.to_owned(),
        };
        let parse_range = |part: &str| -> Result<(i32, i32), Error> {
            let (low, high) = part.split_once("..").ok_or_else(invalid)?;
            let low = low.trim().parse().map_err(|_| invalid())?;
            let high = high.trim().parse().map_err(|_| invalid())?;
            Ok((low, high))
        };

        let (xs, ys) = s.split_once(',').ok_or_else(invalid)?;
        let (x_low, x_high) = parse_range(xs)?;
        let (y_low, y_high) = parse_range(ys)?;
        Ok(Rect::new(x_low, x_high, y_low, y_high))
    }
}
