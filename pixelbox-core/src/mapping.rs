//! Touch-to-cell coordinate mapping
//!
//! Raw panel coordinates go through a fixed pipeline:
//!
//! 1. linear scale onto the grid, rounding half up
//! 2. optional row/column swap
//! 3. clockwise rotation about the grid's own axes
//! 4. optional horizontal flip, then vertical flip
//! 5. clamp into the grid
//!
//! Every step works on the output of the previous one; reordering the
//! steps changes the result.

use crate::config::{GridGeometry, Rotation};

/// A logical grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cell {
    pub row: u16,
    pub col: u16,
}

impl Cell {
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

/// Scale a raw coordinate onto `cells` grid positions
///
/// Computes `v / max(1, extent - 1) * (cells - 1) + 0.5` exactly and
/// truncates toward zero.
pub fn scale(value: i32, extent: i32, cells: u16) -> i64 {
    let span = i64::from(extent.saturating_sub(1).max(1));
    let last = i64::from(cells.saturating_sub(1));
    (2 * i64::from(value) * last + span) / (2 * span)
}

/// Rotate `(row, col)` clockwise by `rotation`
pub fn rotate(row: i64, col: i64, rotation: Rotation, rows: u16, cols: u16) -> (i64, i64) {
    let last_row = i64::from(rows) - 1;
    let last_col = i64::from(cols) - 1;
    match rotation {
        Rotation::Deg0 => (row, col),
        Rotation::Deg90 => (col, last_col - row),
        Rotation::Deg180 => (last_row - row, last_col - col),
        Rotation::Deg270 => (last_row - col, row),
    }
}

/// Map a raw canvas touch to its grid cell
pub fn map(x: i32, y: i32, geometry: &GridGeometry) -> Cell {
    let rows = geometry.rows;
    let cols = geometry.cols;

    let mut col = scale(x, geometry.touch_width, cols);
    let mut row = scale(y, geometry.touch_height, rows);

    if geometry.swap_axes {
        core::mem::swap(&mut row, &mut col);
    }

    (row, col) = rotate(row, col, geometry.rotate, rows, cols);

    if geometry.hflip {
        col = i64::from(cols) - 1 - col;
    }
    if geometry.vflip {
        row = i64::from(rows) - 1 - row;
    }

    Cell {
        row: clamp(row, rows),
        col: clamp(col, cols),
    }
}

fn clamp(value: i64, len: u16) -> u16 {
    value.clamp(0, i64::from(len.saturating_sub(1))) as u16
}
