//! Image import: decoding, per-pixel classification, and grid resampling.
//!
//! The import pipeline turns a raster image into a cell grid:
//!
//! 1. **Decoding** - load the file into a [`SourceImage`] (1, 3, or 4
//!    channels; anything else is rejected)
//! 2. **Classification** - every source pixel is classified as colored,
//!    white, or transparent ([`Classification`])
//! 3. **Resampling** - the classification is sampled down to the target grid
//!    by nearest-center mapping; colored pixels become set cells, white and
//!    transparent pixels become clear cells
//!
//! A non-canonical fallback ([`threshold_resize`]) skips the classification
//! and thresholds an area-averaged resize instead; it may disagree with the
//! canonical path at edges.

mod classify;
mod resample;
mod source;

pub use classify::{
    classify_gray, classify_rgb, classify_rgba, luma, region_counts, ClassCounts, Classification,
    PixelClass,
};
pub use resample::{resample, threshold_resize};
pub use source::{ChannelLayout, ImportError, SourceImage};
