//! Monochrome raster images for logo printing
//!
//! Logos are downscaled to the printable width, thresholded to 1 bit per
//! pixel and packed for the GS v 0 raster command.

use crate::escpos::RASTER_COMMAND;

/// Largest width in bytes, and height in rows, the raster header can carry
pub const MAX_RASTER_DIMENSION: usize = u16::MAX as usize;

/// A packed 1-bit image
///
/// Row-major, 8 pixels per byte, most significant bit = leftmost pixel.
/// A set bit prints black. Bits past the right edge of each row are 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Pack an image from a per-pixel predicate returning `true` for black
    pub fn from_fn(width: u32, height: u32, is_black: impl Fn(u32, u32) -> bool) -> Self {
        let width_bytes = width.div_ceil(8);
        let mut data = Vec::with_capacity((width_bytes * height) as usize);

        for y in 0..height {
            for x_byte in 0..width_bytes {
                let mut byte = 0u8;
                for bit in 0..8 {
                    let x = x_byte * 8 + bit;
                    if x < width && is_black(x, y) {
                        byte |= 1 << (7 - bit);
                    }
                }
                data.push(byte);
            }
        }

        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row: ceil(width / 8)
    pub fn width_bytes(&self) -> u32 {
        self.width.div_ceil(8)
    }

    /// Packed bitmap bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Encode as a centered GS v 0 raster command
    ///
    /// Layout: ESC a 1, GS v 0 m xL xH yL yH, bitmap, LF, ESC a 0.
    /// Both header fields are 16-bit; rows past [`MAX_RASTER_DIMENSION`]
    /// and bytes past it in a row are dropped so the payload always
    /// matches the header.
    pub fn to_escpos(&self) -> Vec<u8> {
        let stride = self.width_bytes() as usize;
        let x_bytes = stride.min(MAX_RASTER_DIMENSION);
        let rows = (self.height as usize).min(MAX_RASTER_DIMENSION);
        let mut out = Vec::with_capacity(x_bytes * rows + 16);

        // Center align for image
        out.extend_from_slice(&[0x1B, 0x61, 0x01]);

        // GS v 0 m xL xH yL yH (m = 0, normal density)
        out.extend_from_slice(&RASTER_COMMAND);
        out.push(0x00);
        out.extend_from_slice(&(x_bytes as u16).to_le_bytes());
        out.extend_from_slice(&(rows as u16).to_le_bytes());
        for row in self.data.chunks(stride.max(1)).take(rows) {
            out.extend_from_slice(&row[..x_bytes]);
        }

        // Newline after image, back to left alignment
        out.push(0x0A);
        out.extend_from_slice(&[0x1B, 0x61, 0x00]);
        out
    }
}

/// Luminance below this prints black
#[cfg(feature = "image")]
const LUMA_THRESHOLD: f32 = 128.0;

/// Alpha below this is treated as white paper
#[cfg(feature = "image")]
const ALPHA_THRESHOLD: u8 = 128;

/// Convert a decoded image into a printable raster
///
/// Images wider than `max_width` are downscaled with a Lanczos3 filter,
/// keeping the aspect ratio; narrower images are never upscaled.
/// Binarization happens after scaling: transparent pixels are white,
/// opaque pixels are black when their BT.601 luma is below 128.
#[cfg(feature = "image")]
pub fn rasterize(img: &image::DynamicImage, max_width: u32) -> RasterImage {
    use image::imageops::FilterType;

    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    let (new_w, new_h) = scaled_dimensions(w, h, max_width);
    let scaled = if (new_w, new_h) == (w, h) {
        rgba
    } else {
        image::imageops::resize(&rgba, new_w, new_h, FilterType::Lanczos3)
    };

    RasterImage::from_fn(new_w, new_h, |x, y| {
        let pixel = scaled.get_pixel(x, y);
        if pixel[3] < ALPHA_THRESHOLD {
            return false;
        }
        let luma = 0.299 * pixel[0] as f32 + 0.587 * pixel[1] as f32 + 0.114 * pixel[2] as f32;
        luma < LUMA_THRESHOLD
    })
}

#[cfg(feature = "image")]
fn scaled_dimensions(w: u32, h: u32, max_width: u32) -> (u32, u32) {
    if w <= max_width || w == 0 {
        return (w, h);
    }
    let ratio = max_width as f64 / w as f64;
    let new_h = ((h as f64 * ratio).round() as u32).max(1);
    (max_width, new_h)
}

/// Open and rasterize a logo file
///
/// Fails with [`PrintError::AssetUnavailable`](crate::PrintError::AssetUnavailable)
/// when the file is missing or cannot be decoded.
#[cfg(feature = "image")]
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn load_logo(path: &std::path::Path, max_width: u32) -> crate::PrintResult<RasterImage> {
    use image::GenericImageView;
    use tracing::{debug, warn};

    let img = image::open(path).map_err(|e| crate::PrintError::AssetUnavailable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    debug!(dimensions = ?img.dimensions(), "logo image opened");

    let raster = rasterize(&img, max_width);
    debug!(
        width = raster.width(),
        height = raster.height(),
        bytes = raster.data().len(),
        "logo rasterized"
    );
    if raster.height() as usize > MAX_RASTER_DIMENSION {
        warn!(height = raster.height(), "logo taller than the raster command allows, cropped");
    }
    Ok(raster)
}
