//! Per-pixel classification into colored / white / transparent.
//!
//! The classification decides which source pixels survive the conversion to
//! a monochrome grid: colored pixels become set cells, white and transparent
//! pixels become clear cells. The rules are threshold-based and total over
//! the 0-255 channel domain; no input can make them fail.

use std::collections::HashSet;

use super::source::{ChannelLayout, ImportError, SourceImage};

/// Classification of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClass {
    /// Carries visible color; becomes a set cell.
    Colored,
    /// White or near-white; becomes a clear cell.
    White,
    /// Alpha below 128; becomes a clear cell. Only reachable with an alpha
    /// channel.
    Transparent,
}

/// Classify an opaque RGB pixel.
///
/// A pixel is white when all three channels exceed 240. Otherwise a channel
/// spread above 30 means visible color; below that, all three channels above
/// 200 still count as white (near-white grays), and everything else is
/// colored.
pub fn classify_rgb(r: u8, g: u8, b: u8) -> PixelClass {
    if r > 240 && g > 240 && b > 240 {
        return PixelClass::White;
    }
    let spread = r.max(g).max(b) - r.min(g).min(b);
    if spread > 30 {
        PixelClass::Colored
    } else if r > 200 && g > 200 && b > 200 {
        PixelClass::White
    } else {
        PixelClass::Colored
    }
}

/// Classify an RGBA pixel. Alpha below 128 is transparent regardless of the
/// color channels; opaque pixels follow [`classify_rgb`].
pub fn classify_rgba(r: u8, g: u8, b: u8, a: u8) -> PixelClass {
    if a < 128 {
        PixelClass::Transparent
    } else {
        classify_rgb(r, g, b)
    }
}

/// Classify a single-channel gray pixel: values above 240 are white,
/// everything else is colored. No spread test, no transparency.
pub fn classify_gray(value: u8) -> PixelClass {
    if value > 240 {
        PixelClass::White
    } else {
        PixelClass::Colored
    }
}

/// Luminance of an RGB pixel, `0.299*R + 0.587*G + 0.114*B`, computed with
/// truncating integer math.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

/// Per-class pixel counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub colored: usize,
    pub white: usize,
    pub transparent: usize,
}

impl ClassCounts {
    /// All pixels counted.
    pub fn total(&self) -> usize {
        self.colored + self.white + self.transparent
    }

    /// Share of a count against the total, in percent. Zero when empty.
    pub fn percent(&self, count: usize) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / total as f64
        }
    }
}

/// Whole-image classification result.
///
/// Holds the per-class coordinate sets; the sets are disjoint and together
/// cover every pixel of the source. Computed once per imported image and
/// reused for both the statistics report and grid resampling, then
/// discarded with the import operation.
#[derive(Debug)]
pub struct Classification {
    width: u32,
    height: u32,
    colored: HashSet<(u32, u32)>,
    white: HashSet<(u32, u32)>,
    transparent: HashSet<(u32, u32)>,
}

impl Classification {
    /// Classify every pixel of the image.
    pub fn analyze(img: &SourceImage) -> Self {
        let mut colored = HashSet::new();
        let mut white = HashSet::new();
        let mut transparent = HashSet::new();

        for y in 0..img.height() {
            for x in 0..img.width() {
                let px = img.pixel(x, y);
                let class = match img.layout() {
                    ChannelLayout::Gray => classify_gray(px[0]),
                    ChannelLayout::Rgb => classify_rgb(px[0], px[1], px[2]),
                    ChannelLayout::Rgba => classify_rgba(px[0], px[1], px[2], px[3]),
                };
                match class {
                    PixelClass::Colored => colored.insert((x, y)),
                    PixelClass::White => white.insert((x, y)),
                    PixelClass::Transparent => transparent.insert((x, y)),
                };
            }
        }

        log::debug!(
            "classified {}x{}: {} colored, {} white, {} transparent",
            img.width(),
            img.height(),
            colored.len(),
            white.len(),
            transparent.len()
        );

        Classification {
            width: img.width(),
            height: img.height(),
            colored,
            white,
            transparent,
        }
    }

    /// Width of the classified image.
    pub fn source_width(&self) -> u32 {
        self.width
    }

    /// Height of the classified image.
    pub fn source_height(&self) -> u32 {
        self.height
    }

    /// Class of the pixel at `(x, y)`.
    pub fn class_at(&self, x: u32, y: u32) -> PixelClass {
        if self.colored.contains(&(x, y)) {
            PixelClass::Colored
        } else if self.transparent.contains(&(x, y)) {
            PixelClass::Transparent
        } else {
            PixelClass::White
        }
    }

    /// True when the pixel at `(x, y)` is colored. This is the membership
    /// test the resampler drives.
    pub fn is_colored(&self, x: u32, y: u32) -> bool {
        self.colored.contains(&(x, y))
    }

    /// Per-class counts.
    pub fn counts(&self) -> ClassCounts {
        ClassCounts {
            colored: self.colored.len(),
            white: self.white.len(),
            transparent: self.transparent.len(),
        }
    }
}

/// Classify only the pixels inside `(x1, y1)..(x2, y2)` (exclusive upper
/// bounds) and return their counts.
///
/// # Errors
/// [`ImportError::RegionOutOfBounds`] when the rectangle is inverted or
/// extends past the image.
pub fn region_counts(
    img: &SourceImage,
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
) -> Result<ClassCounts, ImportError> {
    if x1 > x2 || y1 > y2 || x2 > img.width() || y2 > img.height() {
        return Err(ImportError::RegionOutOfBounds {
            x1,
            y1,
            x2,
            y2,
            width: img.width(),
            height: img.height(),
        });
    }

    let mut counts = ClassCounts::default();
    for y in y1..y2 {
        for x in x1..x2 {
            let px = img.pixel(x, y);
            let class = match img.layout() {
                ChannelLayout::Gray => classify_gray(px[0]),
                ChannelLayout::Rgb => classify_rgb(px[0], px[1], px[2]),
                ChannelLayout::Rgba => classify_rgba(px[0], px[1], px[2], px[3]),
            };
            match class {
                PixelClass::Colored => counts.colored += 1,
                PixelClass::White => counts.white += 1,
                PixelClass::Transparent => counts.transparent += 1,
            }
        }
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bright_white_above_240() {
        assert_eq!(classify_rgb(241, 241, 241), PixelClass::White);
        assert_eq!(classify_rgb(255, 255, 255), PixelClass::White);
    }

    #[test]
    fn test_near_white_via_200_fallback() {
        // Spread 0, below the 240 threshold, above 200 on all channels.
        assert_eq!(classify_rgb(239, 239, 239), PixelClass::White);
        assert_eq!(classify_rgb(201, 201, 201), PixelClass::White);
    }

    #[test]
    fn test_spread_beats_brightness() {
        // Bright but strongly colored: spread 240.
        assert_eq!(classify_rgb(250, 10, 10), PixelClass::Colored);
        // 240 on one channel keeps it out of the >240 branch; spread 40.
        assert_eq!(classify_rgb(240, 240, 200), PixelClass::Colored);
    }

    #[test]
    fn test_dark_gray_is_colored() {
        assert_eq!(classify_rgb(100, 100, 100), PixelClass::Colored);
        assert_eq!(classify_rgb(0, 0, 0), PixelClass::Colored);
        assert_eq!(classify_rgb(200, 200, 200), PixelClass::Colored);
    }

    #[test]
    fn test_spread_boundary_is_exclusive() {
        // Spread exactly 30 is not "has color"; 230 on all-above-200 -> white.
        assert_eq!(classify_rgb(230, 210, 200), PixelClass::Colored); // 200 fails >200
        assert_eq!(classify_rgb(231, 211, 201), PixelClass::White); // spread 30, all >200
    }

    #[test]
    fn test_transparency_precedence() {
        // Alpha below 128 wins over any color, even pure white.
        assert_eq!(classify_rgba(255, 255, 255, 50), PixelClass::Transparent);
        assert_eq!(classify_rgba(255, 255, 255, 127), PixelClass::Transparent);
        assert_eq!(classify_rgba(255, 255, 255, 128), PixelClass::White);
        assert_eq!(classify_rgba(10, 200, 30, 0), PixelClass::Transparent);
    }

    #[test]
    fn test_gray_split_at_240() {
        assert_eq!(classify_gray(241), PixelClass::White);
        assert_eq!(classify_gray(240), PixelClass::Colored);
        assert_eq!(classify_gray(0), PixelClass::Colored);
    }

    #[test]
    fn test_luma_truncates() {
        // 0.299*255 = 76.245 -> 76
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 149);
        assert_eq!(luma(0, 0, 255), 29);
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(0, 0, 0), 0);
    }

    #[test]
    fn test_classification_is_deterministic_and_total() {
        for v in [0u8, 31, 128, 200, 201, 240, 241, 255] {
            assert_eq!(classify_rgb(v, v, v), classify_rgb(v, v, v));
        }
    }

    fn rgba_image(pixels: &[[u8; 4]], width: u32, height: u32) -> SourceImage {
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        SourceImage::from_raw(width, height, ChannelLayout::Rgba, data).unwrap()
    }

    #[test]
    fn test_analyze_sets_are_disjoint_and_cover() {
        let img = rgba_image(
            &[
                [255, 0, 0, 255],     // colored
                [255, 255, 255, 255], // white
                [0, 0, 0, 10],        // transparent
                [50, 50, 50, 255],    // colored
            ],
            2,
            2,
        );
        let classification = Classification::analyze(&img);
        let counts = classification.counts();
        assert_eq!(counts.colored, 2);
        assert_eq!(counts.white, 1);
        assert_eq!(counts.transparent, 1);
        assert_eq!(counts.total(), 4);

        assert_eq!(classification.class_at(0, 0), PixelClass::Colored);
        assert_eq!(classification.class_at(1, 0), PixelClass::White);
        assert_eq!(classification.class_at(0, 1), PixelClass::Transparent);
        assert!(classification.is_colored(1, 1));
    }

    #[test]
    fn test_region_counts_subrectangle() {
        let img = rgba_image(
            &[
                [255, 0, 0, 255],
                [255, 255, 255, 255],
                [0, 0, 0, 10],
                [50, 50, 50, 255],
            ],
            2,
            2,
        );
        // Right column only.
        let counts = region_counts(&img, 1, 0, 2, 2).unwrap();
        assert_eq!(counts.white, 1);
        assert_eq!(counts.colored, 1);
        assert_eq!(counts.transparent, 0);
    }

    #[test]
    fn test_region_counts_rejects_out_of_bounds() {
        let img = rgba_image(&[[0, 0, 0, 255]], 1, 1);
        assert!(matches!(
            region_counts(&img, 0, 0, 2, 1),
            Err(ImportError::RegionOutOfBounds { .. })
        ));
        assert!(matches!(
            region_counts(&img, 1, 0, 0, 1),
            Err(ImportError::RegionOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_percent_of_zero_total() {
        let counts = ClassCounts::default();
        assert_eq!(counts.percent(0), 0.0);
    }
}
