use image::codecs::png::PngEncoder;
use image::{Rgba, RgbaImage};

use crate::{Error, Rgb555};

/// Per-pixel conversion used in place of [`Rgb555::to_rgba`].
pub type Convert<'a> = &'a dyn Fn(Rgb555) -> Rgba<u8>;

/// Builds a `width` x `height` bitmap from row-major `pixels`.
///
/// Pixels beyond `width * height` are ignored; fewer is an error.
pub fn rasterize(
    pixels: &[Rgb555],
    width: u32,
    height: u32,
    convert: Option<Convert>,
) -> Result<RgbaImage, Error> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or(Error::InsufficientPixels {
            expected: usize::MAX,
            actual: pixels.len(),
        })?;
    if pixels.len() < expected {
        return Err(Error::InsufficientPixels {
            expected,
            actual: pixels.len(),
        });
    }

    let mut img = RgbaImage::new(width, height);
    for (pixel, color) in img.pixels_mut().zip(pixels) {
        *pixel = match convert {
            Some(convert) => convert(*color),
            None => color.to_rgba(),
        };
    }

    Ok(img)
}

pub fn export_png(img: &RgbaImage) -> Result<Vec<u8>, Error> {
    let mut png_data = Vec::new();
    let encoder = PngEncoder::new(&mut png_data);
    img.write_with_encoder(encoder)?;

    Ok(png_data)
}
