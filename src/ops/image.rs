//! Image operations built on the `image` crate: resize, format conversion,
//! recompression, thumbnails, and DPI metadata rewrites (PNG via the `png`
//! crate's pHYs chunk).

use crate::error::ImageError;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};
pub use image::ImageFormat;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Byte sizes before and after recompression.
#[derive(Debug, Clone, Copy)]
pub struct CompressionStats {
    pub original: u64,
    pub compressed: u64,
}

impl CompressionStats {
    /// Percentage size reduction; negative when the output grew.
    pub fn reduction_pct(&self) -> f64 {
        if self.original == 0 {
            return 0.0;
        }
        (self.original as f64 - self.compressed as f64) / self.original as f64 * 100.0
    }
}

fn io_err(path: &Path, source: std::io::Error) -> ImageError {
    ImageError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Resize an image. With `keep_aspect` the image is bounded within
/// `width`×`height` preserving its ratio (one axis may come out smaller than
/// requested); without it the exact size is forced and the ratio distorts.
/// Lanczos3 resampling in both cases.
pub fn resize_image(
    input: &Path,
    output: &Path,
    width: u32,
    height: u32,
    keep_aspect: bool,
) -> Result<(), ImageError> {
    let img = image::open(input)?;
    let resized = if keep_aspect {
        img.resize(width, height, FilterType::Lanczos3)
    } else {
        img.resize_exact(width, height, FilterType::Lanczos3)
    };
    save_for_target(&resized, output, None)?;
    Ok(())
}

/// Convert an image to another format. The target is the explicit `format`
/// when given, otherwise inferred from the output extension. JPEG targets
/// flatten any alpha channel onto an opaque white background first, since
/// JPEG cannot represent transparency.
pub fn convert_image(
    input: &Path,
    output: &Path,
    format: Option<ImageFormat>,
) -> Result<(), ImageError> {
    let img = image::open(input)?;
    save_for_target(&img, output, format)
}

/// Re-save pixel data unchanged with new horizontal/vertical DPI metadata.
/// Only PNG output carries the metadata (pHYs chunk); other targets report
/// [`ImageError::DpiUnsupported`].
pub fn update_resolution(
    input: &Path,
    output: &Path,
    dpi: (u32, u32),
) -> Result<(), ImageError> {
    let target = target_format(output, None)?;
    if target != ImageFormat::Png {
        return Err(ImageError::DpiUnsupported {
            format: format!("{target:?}"),
        });
    }

    let img = image::open(input)?;
    let rgba = img.to_rgba8();
    let file = File::create(output).map_err(|e| io_err(output, e))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), rgba.width(), rgba.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: dpi_to_ppm(dpi.0),
        yppu: dpi_to_ppm(dpi.1),
        unit: png::Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&rgba)?;
    Ok(())
}

/// Recompress an image at the given quality (1..=100). Quality drives the
/// JPEG encoder; for other targets the image is simply re-encoded. JPEG
/// targets flatten alpha onto white as in [`convert_image`].
pub fn compress_image(
    input: &Path,
    output: &Path,
    quality: u8,
) -> Result<CompressionStats, ImageError> {
    if !(1..=100).contains(&quality) {
        return Err(ImageError::InvalidQuality { quality });
    }

    let original = fs::metadata(input).map_err(|e| io_err(input, e))?.len();
    let img = image::open(input)?;
    let target = target_format(output, None)?;

    if target == ImageFormat::Jpeg {
        let flat = flatten_to_white(&img);
        let file = File::create(output).map_err(|e| io_err(output, e))?;
        let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality);
        encoder.encode_image(&flat)?;
    } else {
        img.save_with_format(output, target)?;
    }

    let compressed = fs::metadata(output).map_err(|e| io_err(output, e))?.len();
    Ok(CompressionStats {
        original,
        compressed,
    })
}

/// Create a thumbnail bounded within `max_width`×`max_height`, preserving
/// aspect ratio.
pub fn create_thumbnail(
    input: &Path,
    output: &Path,
    max_width: u32,
    max_height: u32,
) -> Result<(), ImageError> {
    let img = image::open(input)?;
    let thumb = img.thumbnail(max_width, max_height);
    save_for_target(&thumb, output, None)?;
    Ok(())
}

/// Resolve the output format from an explicit choice or the file extension.
fn target_format(output: &Path, format: Option<ImageFormat>) -> Result<ImageFormat, ImageError> {
    if let Some(format) = format {
        return Ok(format);
    }
    ImageFormat::from_path(output).map_err(|_| ImageError::UnknownFormat {
        path: output.display().to_string(),
    })
}

/// Encode to the target format, flattening alpha for JPEG.
fn save_for_target(
    img: &DynamicImage,
    output: &Path,
    format: Option<ImageFormat>,
) -> Result<(), ImageError> {
    let target = target_format(output, format)?;
    if target == ImageFormat::Jpeg && img.color().has_alpha() {
        let flat = flatten_to_white(img);
        flat.save_with_format(output, target)?;
    } else {
        img.save_with_format(output, target)?;
    }
    Ok(())
}

/// Composite onto an opaque white background, returning an RGB image.
fn flatten_to_white(img: &DynamicImage) -> DynamicImage {
    let rgba = img.to_rgba8();
    let mut flat = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let a = a as u16;
        let blend = |c: u8| ((c as u16 * a + 255 * (255 - a)) / 255) as u8;
        flat.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    DynamicImage::ImageRgb8(flat)
}

fn dpi_to_ppm(dpi: u32) -> u32 {
    // 1 inch = 0.0254 m, so pixels per metre = dpi / 0.0254.
    (dpi as f64 / 0.0254).round() as u32
}
