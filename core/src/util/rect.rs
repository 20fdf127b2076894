//! Rectangular regions; essentially two-dimensional ranges.

use core::ops::Range;

/// A rectangle with inclusive top-left and exclusive bottom-right bounds.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Rect<T = usize> {
    /// The left bound of `self`, inclusive.
    pub left: T,
    /// The top bound of `self`, inclusive.
    pub top: T,
    /// The right bound of `self`, exclusive.
    pub right: T,
    /// The bottom bound of `self`, exclusive.
    pub bottom: T,
}

impl Rect {
    /// Returns a rectangle with the top-left corner at the origin and
    /// the given width and height.
    pub const fn of_size(w: usize, h: usize) -> Self {
        Self { left: 0, top: 0, right: w, bottom: h }
    }

    /// Returns the width of `self`, or zero if `self` is empty.
    pub fn width(&self) -> usize {
        self.right.saturating_sub(self.left)
    }
    /// Returns the height of `self`, or zero if `self` is empty.
    pub fn height(&self) -> usize {
        self.bottom.saturating_sub(self.top)
    }

    /// Returns whether `self` contains no points.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Returns whether the point (x, y) lies inside `self`.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.xs().contains(&x) && self.ys().contains(&y)
    }

    /// Returns the horizontal extent of `self`.
    pub fn xs(&self) -> Range<usize> {
        self.left..self.right
    }
    /// Returns the vertical extent of `self`.
    pub fn ys(&self) -> Range<usize> {
        self.top..self.bottom
    }

    /// Returns the intersection of `self` and `other`.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }
}

impl From<(Range<usize>, Range<usize>)> for Rect {
    fn from((xs, ys): (Range<usize>, Range<usize>)) -> Self {
        Self {
            left: xs.start,
            top: ys.start,
            right: xs.end,
            bottom: ys.end,
        }
    }
}
