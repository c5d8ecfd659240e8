//! Column/row bit packing, the mathematical core shared by both
//! conversion directions.
//!
//! A glyph's pixels travel as an 8-row boolean grid. [`pack`] folds the
//! grid into column bytes (bit 0 = top row); [`unpack`] expands column
//! bytes back into the grid. The two are mutual inverses over the declared
//! width, and neither touches columns at or beyond it.

use crate::glyph::{MAX_WIDTH, ROWS};

/// An 8-row pixel grid, `true` for lit.
pub type ArtGrid = [[bool; MAX_WIDTH]; ROWS];

/// Packs the first `width` columns of `rows` into column bytes.
///
/// Bit `r` of `columns[c]` is set iff `rows[r][c]` is lit. Columns at
/// index >= `width` are left zero and never read.
pub fn pack(rows: &ArtGrid, width: usize) -> [u8; MAX_WIDTH] {
    let mut columns = [0u8; MAX_WIDTH];
    for (r, row) in rows.iter().enumerate() {
        for (c, column) in columns.iter_mut().enumerate().take(width) {
            if row[c] {
                *column |= 1 << r;
            }
        }
    }
    columns
}

/// Expands the first `width` column bytes back into an 8-row grid.
///
/// `rows[r][c]` is lit iff bit `r` of `columns[c]` is set. Columns at
/// index >= `width` are never read.
pub fn unpack(columns: &[u8; MAX_WIDTH], width: usize) -> ArtGrid {
    let mut rows = [[false; MAX_WIDTH]; ROWS];
    for (r, row) in rows.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate().take(width) {
            *cell = columns[c] & (1 << r) != 0;
        }
    }
    rows
}
