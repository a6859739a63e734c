//! Decoded raster images and the errors the importer can report.

use std::path::{Path, PathBuf};

use image::DynamicImage;

/// Channel layout of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// Single gray channel.
    Gray,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl ChannelLayout {
    /// Bytes per pixel for this layout.
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Gray => 1,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }
}

/// An immutable decoded raster image.
///
/// Loaded once per import operation and treated as read-only afterwards.
/// Pixel values are 8-bit per channel, row-major.
#[derive(Debug, Clone)]
pub struct SourceImage {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    data: Vec<u8>,
}

impl SourceImage {
    /// Wrap a raw pixel buffer.
    ///
    /// # Errors
    /// [`ImportError::EmptyImage`] when a dimension is zero,
    /// [`ImportError::BufferSizeMismatch`] when the buffer length does not
    /// equal `width * height * channels`.
    pub fn from_raw(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        data: Vec<u8>,
    ) -> Result<Self, ImportError> {
        if width == 0 || height == 0 {
            return Err(ImportError::EmptyImage { width, height });
        }
        let expected = width as usize * height as usize * layout.channels();
        if data.len() != expected {
            return Err(ImportError::BufferSizeMismatch {
                width,
                height,
                channels: layout.channels(),
                actual: data.len(),
            });
        }
        Ok(SourceImage {
            width,
            height,
            layout,
            data,
        })
    }

    /// Decode an image file.
    ///
    /// Format support is whatever the decoding library provides; the result
    /// is normalized to 8-bit channels. Two-channel (gray + alpha) layouts
    /// are rejected with [`ImportError::UnsupportedChannelLayout`].
    pub fn open(path: &Path) -> Result<Self, ImportError> {
        let reader = image::ImageReader::open(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let decoded = reader.decode().map_err(|source| ImportError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!(
            "decoded '{}': {}x{}, {:?}",
            path.display(),
            decoded.width(),
            decoded.height(),
            decoded.color()
        );
        Self::from_dynamic(decoded)
    }

    /// Normalize a decoded image into a 1-, 3-, or 4-channel raster.
    pub fn from_dynamic(decoded: DynamicImage) -> Result<Self, ImportError> {
        let (width, height) = (decoded.width(), decoded.height());
        match decoded.color().channel_count() {
            1 => Self::from_raw(width, height, ChannelLayout::Gray, decoded.into_luma8().into_raw()),
            3 => Self::from_raw(width, height, ChannelLayout::Rgb, decoded.into_rgb8().into_raw()),
            4 => Self::from_raw(width, height, ChannelLayout::Rgba, decoded.into_rgba8().into_raw()),
            channels => Err(ImportError::UnsupportedChannelLayout { channels }),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout.
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Channel values of the pixel at `(x, y)`. Panics if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.layout.channels();
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &self.data[idx..idx + c]
    }
}

/// Errors the importer reports back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// Channel count other than 1, 3, or 4 (e.g. gray + alpha).
    #[error("Unsupported channel layout: {channels} channel(s) (expected 1, 3, or 4)")]
    UnsupportedChannelLayout { channels: u8 },

    #[error("Failed to read image '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image dimensions {width}x{height} must both be at least 1")]
    EmptyImage { width: u32, height: u32 },

    #[error(
        "Pixel buffer holds {actual} byte(s), expected {width}x{height} at {channels} channel(s)"
    )]
    BufferSizeMismatch {
        width: u32,
        height: u32,
        channels: usize,
        actual: usize,
    },

    /// Analysis region outside the image bounds.
    #[error("Region ({x1},{y1})-({x2},{y2}) is outside the {width}x{height} image")]
    RegionOutOfBounds {
        x1: u32,
        y1: u32,
        x2: u32,
        y2: u32,
        width: u32,
        height: u32,
    },
}
