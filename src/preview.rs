//! Terminal preview rendering for imported images.
//!
//! The preview scales an image down to a character box and renders each
//! sampled pixel with a 9-level density ramp, darkest to brightest.
//! Transparent pixels render as spaces. This is a human-inspection aid; the
//! actual conversion runs through classification and resampling.

use crate::import::{luma, ChannelLayout, SourceImage};

/// Density ramp, darkest to brightest.
pub const DENSITY_RAMP: &[char] = &[' ', '.', ':', ';', 'o', 'O', '8', '@', '#'];

/// Default preview box width in characters.
pub const DEFAULT_MAX_WIDTH: u16 = 80;
/// Default preview box height in characters.
pub const DEFAULT_MAX_HEIGHT: u16 = 40;

/// Render the image into the given character box, one string per output row.
///
/// The image is scaled by `min(max_width / W, max_height / H, 1.0)` - it is
/// never upscaled - and each output character samples the nearest source
/// pixel by center mapping. Opaque pixels map their luminance onto
/// [`DENSITY_RAMP`]; pixels with alpha below 128 become spaces.
pub fn render_image(img: &SourceImage, max_width: u16, max_height: u16) -> Vec<String> {
    if max_width == 0 || max_height == 0 {
        return Vec::new();
    }

    let src_w = img.width();
    let src_h = img.height();
    let scale = (max_width as f32 / src_w as f32)
        .min(max_height as f32 / src_h as f32)
        .min(1.0);
    let out_w = ((src_w as f32 * scale) as u32).max(1);
    let out_h = ((src_h as f32 * scale) as u32).max(1);

    let mut lines = Vec::with_capacity(out_h as usize);
    for y in 0..out_h {
        let mut line = String::with_capacity(out_w as usize);
        for x in 0..out_w {
            let sx = (((x as f64 + 0.5) * src_w as f64 / out_w as f64) as u32).min(src_w - 1);
            let sy = (((y as f64 + 0.5) * src_h as f64 / out_h as f64) as u32).min(src_h - 1);
            line.push(ramp_char(img, sx, sy));
        }
        lines.push(line);
    }
    lines
}

/// Preview dimensions for an image in a character box, without rendering.
pub fn preview_size(img: &SourceImage, max_width: u16, max_height: u16) -> (u32, u32) {
    let scale = (max_width as f32 / img.width() as f32)
        .min(max_height as f32 / img.height() as f32)
        .min(1.0);
    (
        ((img.width() as f32 * scale) as u32).max(1),
        ((img.height() as f32 * scale) as u32).max(1),
    )
}

fn ramp_char(img: &SourceImage, x: u32, y: u32) -> char {
    let px = img.pixel(x, y);
    let value = match img.layout() {
        ChannelLayout::Gray => px[0],
        ChannelLayout::Rgb => luma(px[0], px[1], px[2]),
        ChannelLayout::Rgba => {
            if px[3] < 128 {
                return ' ';
            }
            luma(px[0], px[1], px[2])
        }
    };
    let idx = value as usize * (DENSITY_RAMP.len() - 1) / 255;
    DENSITY_RAMP[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::{ChannelLayout, SourceImage};

    fn gray_image(values: Vec<u8>, width: u32, height: u32) -> SourceImage {
        SourceImage::from_raw(width, height, ChannelLayout::Gray, values).unwrap()
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let img = gray_image(vec![0; 4], 2, 2);
        let lines = render_image(&img, 80, 40);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].chars().count(), 2);
    }

    #[test]
    fn test_large_image_fits_the_box() {
        let img = gray_image(vec![128; 200 * 100], 200, 100);
        let lines = render_image(&img, 80, 40);
        assert!(lines.len() <= 40);
        assert!(lines.iter().all(|l| l.chars().count() <= 80));
    }

    #[test]
    fn test_ramp_extremes() {
        let img = gray_image(vec![0, 255], 2, 1);
        let lines = render_image(&img, 10, 10);
        assert_eq!(lines[0].chars().next().unwrap(), ' ');
        assert_eq!(lines[0].chars().nth(1).unwrap(), '#');
    }

    #[test]
    fn test_transparent_pixels_render_as_space() {
        let data = vec![
            255, 255, 255, 0, // transparent white
            128, 128, 128, 255, // opaque mid-gray
        ];
        let img = SourceImage::from_raw(2, 1, ChannelLayout::Rgba, data).unwrap();
        let lines = render_image(&img, 10, 10);
        // Transparent renders as a space even though its color is bright white.
        assert_eq!(lines[0], " o");
    }

    #[test]
    fn test_preview_size_matches_render() {
        let img = gray_image(vec![0; 160 * 80], 160, 80);
        let (w, h) = preview_size(&img, 80, 40);
        let lines = render_image(&img, 80, 40);
        assert_eq!(lines.len(), h as usize);
        assert_eq!(lines[0].chars().count(), w as usize);
    }
}
