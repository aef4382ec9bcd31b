//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate. Grayscale (8 and 16
//! bit) and RGB streams are supported; CMYK is rejected. Writing is not
//! supported because `jpeg-decoder` is decode-only.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use pixfilter_core::{Image, ImageMut, Rgb};
use std::io::Read;

/// Read a JPEG image from a reader positioned at the SOI marker (`FF D8`).
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Image> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing after decode".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let mut img = ImageMut::new(width, height)?;

    let bytes_per_pixel = match info.pixel_format {
        PixelFormat::L8 => 1,
        // Big-endian, keep the high byte
        PixelFormat::L16 => 2,
        PixelFormat::RGB24 => 3,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "JPEG pixel format {:?} is not supported",
                other
            )));
        }
    };

    let expected = width as usize * height as usize * bytes_per_pixel;
    if data.len() < expected {
        return Err(IoError::InvalidData(format!(
            "JPEG data too short: expected {} bytes, got {}",
            expected,
            data.len()
        )));
    }

    for (dst, src) in img
        .pixels_mut()
        .iter_mut()
        .zip(data.chunks_exact(bytes_per_pixel))
    {
        *dst = match info.pixel_format {
            PixelFormat::RGB24 => Rgb::new(src[0], src[1], src[2]),
            _ => Rgb::gray(src[0]),
        };
    }

    Ok(img.into())
}
