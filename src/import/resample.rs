//! Sampling a classified image down to a target grid.

use crate::grid::Grid;

use super::classify::{luma, Classification};
use super::source::{ChannelLayout, SourceImage};

/// Map a classification onto a target grid by nearest-center sampling.
///
/// Every target cell `(gx, gy)` samples the source pixel at
/// `sx = floor((gx + 0.5) * W / w)`, `sy = floor((gy + 0.5) * H / h)`,
/// clamped into the source bounds. The cell is set when that pixel is
/// colored; white and transparent pixels both map to clear. This is a point
/// sample, not an area-weighted resize: with a much coarser target some
/// source pixels are never visited, which is the intended behavior for
/// small display glyphs.
///
/// A target width or height of zero yields an empty grid; callers are
/// expected to reject degenerate sizes before getting here.
pub fn resample(classification: &Classification, target_w: usize, target_h: usize) -> Grid {
    if target_w == 0 || target_h == 0 {
        return Grid::new(target_w, target_h);
    }

    let src_w = classification.source_width();
    let src_h = classification.source_height();
    let mut grid = Grid::new(target_w, target_h);

    for gy in 0..target_h {
        for gx in 0..target_w {
            let sx = ((gx as f64 + 0.5) * src_w as f64 / target_w as f64) as u32;
            let sy = ((gy as f64 + 0.5) * src_h as f64 / target_h as f64) as u32;
            let sx = sx.min(src_w - 1);
            let sy = sy.min(src_h - 1);
            grid.set(gx, gy, classification.is_colored(sx, sy));
        }
    }

    log::debug!(
        "resampled {}x{} classification to {}x{} grid ({} set cells)",
        src_w,
        src_h,
        target_w,
        target_h,
        grid.set_count()
    );

    grid
}

/// Fallback conversion without a precomputed classification: area-average
/// the raster down to the target resolution, then threshold each cell.
///
/// A cell is clear when its averaged alpha is below 128 or its averaged
/// luminance exceeds 240, and set otherwise. This resize-then-threshold
/// strategy is not the canonical path and may disagree with [`resample`]
/// at edges; it is kept for callers that skip classification.
pub fn threshold_resize(img: &SourceImage, target_w: usize, target_h: usize) -> Grid {
    if target_w == 0 || target_h == 0 {
        return Grid::new(target_w, target_h);
    }

    let src_w = img.width();
    let src_h = img.height();
    let cell_w = src_w as f32 / target_w as f32;
    let cell_h = src_h as f32 / target_h as f32;
    let mut grid = Grid::new(target_w, target_h);

    for gy in 0..target_h {
        for gx in 0..target_w {
            let start_x = (gx as f32 * cell_w) as u32;
            let end_x = ((gx + 1) as f32 * cell_w) as u32;
            let start_y = (gy as f32 * cell_h) as u32;
            let end_y = ((gy + 1) as f32 * cell_h) as u32;

            // Average every channel over the cell block. When the target is
            // finer than the source the block can be empty; fall back to the
            // single nearest pixel so upscaling still works.
            let mut sums = [0u64; 4];
            let mut count = 0u64;
            for py in start_y..end_y.min(src_h) {
                for px in start_x..end_x.min(src_w) {
                    accumulate(img, px, py, &mut sums);
                    count += 1;
                }
            }
            if count == 0 {
                accumulate(img, start_x.min(src_w - 1), start_y.min(src_h - 1), &mut sums);
                count = 1;
            }

            let avg = |i: usize| (sums[i] / count) as u8;
            let on = match img.layout() {
                ChannelLayout::Gray => avg(0) <= 240,
                ChannelLayout::Rgb => luma(avg(0), avg(1), avg(2)) <= 240,
                ChannelLayout::Rgba => {
                    avg(3) >= 128 && luma(avg(0), avg(1), avg(2)) <= 240
                }
            };
            grid.set(gx, gy, on);
        }
    }

    grid
}

fn accumulate(img: &SourceImage, x: u32, y: u32, sums: &mut [u64; 4]) {
    for (i, &v) in img.pixel(x, y).iter().enumerate() {
        sums[i] += v as u64;
    }
}
