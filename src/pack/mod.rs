//! Grid to byte-array packing for monochrome display routines.
//!
//! The packer turns a boolean cell grid into the packed byte sequence small
//! monochrome displays consume (u8g2-style byte arrays):
//!
//! 1. **Packing** - each grid row is split into chunks of at most 8 cells,
//!    one output byte per chunk, bit 0 = leftmost cell of the chunk
//! 2. **Readback** - a packed bitmap can be expanded back into a grid
//! 3. **Rendering** - hex tokens, binary digit rows, and a C array snippet,
//!    all derived from the packed bytes alone

mod bitmap;
mod render;

pub use bitmap::{pack, PackedBitmap};
