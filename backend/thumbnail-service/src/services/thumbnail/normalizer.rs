//! Image normalizer - decodes uploads into opaque 8-bit RGB
//!
//! JPEG cannot carry transparency, so every decoded image is classified into a
//! [`ColorMode`] and flattened onto a white canvas when it has alpha. Each mode
//! has exactly one normalization function.

use crate::error::{AppError, Result};
use image::{ColorType, DynamicImage, ImageFormat, Rgb, RgbImage, RgbaImage};
use tracing::debug;

/// Canvas color transparent pixels are flattened onto
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";
const PNG_COLOR_TYPE_INDEXED: u8 = 3;

/// Color representation of a decoded source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    OpaqueRgb,
    Grayscale,
    RgbWithAlpha,
    GrayscaleWithAlpha,
    /// Palette source (indexed PNG, GIF); `has_alpha` when the palette carries transparency
    PaletteIndexed { has_alpha: bool },
}

impl ColorMode {
    /// Classify a decoded image, using the raw bytes to recognise palette sources
    pub fn detect(raw: &[u8], image: &DynamicImage) -> Self {
        let color = image.color();

        if is_palette_source(raw) {
            return ColorMode::PaletteIndexed {
                has_alpha: color.has_alpha(),
            };
        }

        match color {
            ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => ColorMode::OpaqueRgb,
            ColorType::L8 | ColorType::L16 => ColorMode::Grayscale,
            ColorType::La8 | ColorType::La16 => ColorMode::GrayscaleWithAlpha,
            ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => ColorMode::RgbWithAlpha,
            other if other.has_alpha() => ColorMode::RgbWithAlpha,
            _ => ColorMode::OpaqueRgb,
        }
    }
}

/// Decoded, flattened source image
#[derive(Debug)]
pub struct NormalizedImage {
    pub image: RgbImage,
    pub source_mode: ColorMode,
}

/// Decode raw upload bytes and normalize them to opaque RGB
pub fn decode_and_normalize(raw: &[u8]) -> Result<NormalizedImage> {
    let decoded = image::load_from_memory(raw).map_err(|e| AppError::Decode(e.to_string()))?;
    let source_mode = ColorMode::detect(raw, &decoded);

    debug!(
        width = decoded.width(),
        height = decoded.height(),
        color = ?decoded.color(),
        mode = ?source_mode,
        "Decoded source image"
    );

    Ok(NormalizedImage {
        image: normalize(decoded, source_mode),
        source_mode,
    })
}

/// Convert a decoded image to opaque RGB according to its color mode
pub fn normalize(image: DynamicImage, mode: ColorMode) -> RgbImage {
    match mode {
        ColorMode::OpaqueRgb => pass_through(image),
        ColorMode::Grayscale => expand_grayscale(&image),
        ColorMode::RgbWithAlpha => flatten_rgba(&image.to_rgba8()),
        ColorMode::GrayscaleWithAlpha => flatten_grayscale_alpha(&image),
        ColorMode::PaletteIndexed { has_alpha } => flatten_palette(&image, has_alpha),
    }
}

fn pass_through(image: DynamicImage) -> RgbImage {
    match image {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    }
}

fn expand_grayscale(image: &DynamicImage) -> RgbImage {
    image.to_rgb8()
}

fn flatten_grayscale_alpha(image: &DynamicImage) -> RgbImage {
    flatten_rgba(&image.to_rgba8())
}

fn flatten_palette(image: &DynamicImage, has_alpha: bool) -> RgbImage {
    if has_alpha {
        flatten_rgba(&image.to_rgba8())
    } else {
        let mut canvas = RgbImage::from_pixel(image.width(), image.height(), BACKGROUND);
        image::imageops::replace(&mut canvas, &image.to_rgb8(), 0, 0);
        canvas
    }
}

/// Composite onto a white canvas using each pixel's own alpha as the mask
fn flatten_rgba(source: &RgbaImage) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(source.width(), source.height(), BACKGROUND);

    for (x, y, pixel) in source.enumerate_pixels() {
        let alpha = pixel[3] as u32;
        let background = canvas.get_pixel(x, y).0;
        let out = [0, 1, 2].map(|c| blend(pixel[c] as u32, background[c] as u32, alpha));
        canvas.put_pixel(x, y, Rgb(out));
    }

    canvas
}

fn blend(foreground: u32, background: u32, alpha: u32) -> u8 {
    ((foreground * alpha + background * (255 - alpha) + 127) / 255) as u8
}

fn is_palette_source(raw: &[u8]) -> bool {
    match image::guess_format(raw) {
        Ok(ImageFormat::Gif) => true,
        Ok(ImageFormat::Png) => png_color_type(raw) == Some(PNG_COLOR_TYPE_INDEXED),
        _ => false,
    }
}

/// Color type byte from the IHDR chunk, which always follows the signature
fn png_color_type(raw: &[u8]) -> Option<u8> {
    if raw.len() < 26 || &raw[..8] != PNG_SIGNATURE || &raw[12..16] != b"IHDR" {
        return None;
    }
    Some(raw[25])
}
