//! The packing algorithm and the packed byte container.

use crate::grid::{Grid, GridError};

/// A packed byte sequence derived from a grid.
///
/// Each grid row occupies `ceil(width / 8)` consecutive bytes; rows are
/// emitted top to bottom. Within a byte, bit 0 (least significant) is the
/// leftmost cell of its 8-cell chunk. Rows whose width is not a multiple of
/// 8 are right-padded with clear cells, so the trailing bits of a row's last
/// byte are always 0.
///
/// The bitmap carries its grid dimensions so every textual view can be
/// produced from it without re-reading the source grid. It is derived fresh
/// by [`pack`] and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBitmap {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
}

impl PackedBitmap {
    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Packed bytes, row-major.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total byte count, `height * ceil(width / 8)`.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes per grid row, `ceil(width / 8)`.
    pub fn bytes_per_row(&self) -> usize {
        self.width.div_ceil(8)
    }

    /// Expand the packed bytes back into a grid.
    ///
    /// Padding bits beyond the grid width are dropped. For any grid `g`,
    /// `pack(&g).unwrap().to_grid() == g`.
    pub fn to_grid(&self) -> Grid {
        let mut grid = Grid::new(self.width, self.height);
        let bpr = self.bytes_per_row();
        for y in 0..self.height {
            for x in 0..self.width {
                let byte = self.bytes[y * bpr + x / 8];
                grid.set(x, y, byte & (1 << (x % 8)) != 0);
            }
        }
        grid
    }
}

/// Pack a grid into its byte sequence.
///
/// For each row, cells are consumed left to right in chunks of at most 8;
/// each chunk produces one byte with bit `p` set when cell `p` of the chunk
/// is set. A final chunk shorter than 8 cells leaves its missing high bits
/// clear, which is the row-padding rule. The operation is pure: equal grids
/// pack to byte-identical sequences.
///
/// # Errors
/// [`GridError::InvalidDimensions`] when the grid has zero width or height,
/// or when a row's length disagrees with the declared width. Grids built by
/// this crate's own constructors cannot be ragged, but the contract is kept
/// explicit for caller-supplied matrices.
pub fn pack(grid: &Grid) -> Result<PackedBitmap, GridError> {
    let width = grid.width();
    let height = grid.height();
    if width == 0 || height == 0 {
        return Err(GridError::InvalidDimensions {
            width,
            height,
            ragged_row: None,
        });
    }
    for (y, row) in grid.rows().enumerate() {
        if row.len() != width {
            return Err(GridError::InvalidDimensions {
                width,
                height,
                ragged_row: Some(y),
            });
        }
    }

    let bytes_per_row = width.div_ceil(8);
    let mut bytes = Vec::with_capacity(height * bytes_per_row);
    for row in grid.rows() {
        for chunk in row.chunks(8) {
            let mut byte = 0u8;
            for (p, &cell) in chunk.iter().enumerate() {
                if cell {
                    byte |= 1 << p;
                }
            }
            bytes.push(byte);
        }
    }

    log::debug!(
        "packed {}x{} grid into {} bytes ({} per row)",
        width,
        height,
        bytes.len(),
        bytes_per_row
    );

    Ok(PackedBitmap {
        width,
        height,
        bytes,
    })
}
