// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid-unit geometry.

use kurbo::Rect;

/// A rectangle of grid cells: `width × height` cells starting at cell `(x, y)`.
///
/// Cell `(i, j)` covers the screen rectangle
/// `[i * cell_size, (i + 1) * cell_size) × [j * cell_size, (j + 1) * cell_size)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellRect {
    /// First column.
    pub x: i32,
    /// First row.
    pub y: i32,
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl CellRect {
    /// Create a cell rect.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest cell rect covering `rect`.
    ///
    /// Lower bounds round down and upper bounds round up, so a rect ending
    /// exactly on a cell boundary does not reach into the next cell. A
    /// zero-size rect still covers the one cell it sits in.
    pub fn covering(rect: Rect, cell_size: f64) -> Self {
        let (x0, x1) = cell_span(rect.x0, rect.x1, cell_size);
        let (y0, y1) = cell_span(rect.y0, rect.y1, cell_size);
        Self::from_bounds(x0, y0, x1, y1)
    }

    /// Exclusive upper column.
    pub fn x_end(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    /// Exclusive upper row.
    pub fn y_end(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    /// Number of cells covered.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether cell `(cx, cy)` is inside this rect.
    pub fn contains_cell(&self, cx: i32, cy: i32) -> bool {
        cx >= self.x && cx < self.x_end() && cy >= self.y && cy < self.y_end()
    }

    /// Overlap of two cell rects, or `None` if they share no cell.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.x_end().min(other.x_end());
        let y1 = self.y_end().min(other.y_end());
        (x0 < x1 && y0 < y1).then(|| Self::from_bounds(x0, y0, x1, y1))
    }

    /// Iterate covered cells row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.y..self.y_end()).flat_map(move |cy| (self.x..self.x_end()).map(move |cx| (cx, cy)))
    }

    fn from_bounds(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1.abs_diff(x0),
            height: y1.abs_diff(y0),
        }
    }
}

/// Half-open cell range `[floor(min / cs), ceil(max / cs))` along one axis,
/// widened to at least one cell.
pub(crate) fn cell_span(min: f64, max: f64, cell_size: f64) -> (i32, i32) {
    let c0 = floor_coord(min, cell_size);
    let c1 = ceil_coord(max, cell_size).max(c0.saturating_add(1));
    (c0, c1)
}

/// Cell containing `value` along one axis.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Cell coordinates are i32 and `as` saturates out-of-range floats."
)]
#[inline]
pub(crate) fn floor_coord(value: f64, cell_size: f64) -> i32 {
    debug_assert!(cell_size > 0.0, "cell_size must be strictly positive");
    let t = value / cell_size;
    let coord = t as i32;

    // `as` truncates toward zero; negative fractions need one more step down.
    if t < 0.0 && f64::from(coord) > t {
        coord.saturating_sub(1)
    } else {
        coord
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Cell coordinates are i32 and `as` saturates out-of-range floats."
)]
#[inline]
fn ceil_coord(value: f64, cell_size: f64) -> i32 {
    debug_assert!(cell_size > 0.0, "cell_size must be strictly positive");
    let t = value / cell_size;
    let coord = t as i32;

    // Positive fractions need one more step up.
    if t > 0.0 && f64::from(coord) < t {
        coord.saturating_add(1)
    } else {
        coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn boundaries_round_outward() {
        assert_eq!(cell_span(200.0, 600.0, 128.0), (1, 5));
        assert_eq!(cell_span(128.0, 256.0, 128.0), (1, 2));
        assert_eq!(cell_span(-1.0, 1.0, 128.0), (-1, 1));
        // Zero-size spans still occupy their cell.
        assert_eq!(cell_span(256.0, 256.0, 128.0), (2, 3));
    }

    #[test]
    fn covering_matches_floor_ceil_math() {
        let r = CellRect::covering(Rect::new(200.0, 200.0, 600.0, 600.0), 128.0);
        assert_eq!(r, CellRect::new(1, 1, 4, 4));
        assert_eq!(r.cell_count(), 16);
        assert!(r.contains_cell(4, 4));
        assert!(!r.contains_cell(5, 4));
    }

    #[test]
    fn intersect_and_iterate() {
        let a = CellRect::new(0, 0, 3, 2);
        let b = CellRect::new(2, 1, 4, 4);
        let i = a.intersect(&b).unwrap();
        assert_eq!(i, CellRect::new(2, 1, 1, 1));
        assert!(a.intersect(&CellRect::new(3, 0, 1, 1)).is_none());
        let cells: Vec<_> = a.cells().collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }
}
