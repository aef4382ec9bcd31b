//! PNG image format support
//!
//! Any PNG color type is accepted. Palette and low bit depth images are
//! expanded to 8 bits by the decoder, 16-bit samples keep their high byte,
//! gray is replicated to three channels and alpha is dropped.

use crate::{IoError, IoResult};
use pixfilter_core::{Image, ImageMut, Rgb};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Image> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_sample = match output_info.bit_depth {
        BitDepth::Eight => 1,
        BitDepth::Sixteen => 2,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unexpected PNG output depth after expansion: {:?}",
                other
            )));
        }
    };
    let samples = match output_info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let pixel_bytes = samples * bytes_per_sample;

    let mut img = ImageMut::new(width, height)?;
    for y in 0..height {
        let row_start = y as usize * bytes_per_row;
        for x in 0..width {
            let idx = row_start + x as usize * pixel_bytes;
            // Big-endian samples: the first byte is the most significant
            let sample = |i: usize| data[idx + i * bytes_per_sample];
            let pixel = if samples < 3 {
                Rgb::gray(sample(0))
            } else {
                Rgb::new(sample(0), sample(1), sample(2))
            };
            img.put_pixel(x, y, pixel);
        }
    }

    Ok(img.into())
}

/// Write a PNG image as 8-bit RGB
pub fn write_png<W: Write>(img: &Image, writer: W) -> IoResult<()> {
    let width = img.width();
    let height = img.height();

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let data: Vec<u8> = img.pixels().iter().flat_map(|p| p.channels()).collect();

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_raw(width: u32, height: u32, color: ColorType, depth: BitDepth, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(depth);
            if color == ColorType::Indexed {
                encoder.set_palette(vec![255, 0, 0, 0, 0, 255]);
            }
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
            writer.finish().unwrap();
        }
        out
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let img = Image::from_fn(7, 4, |x, y| Rgb::new(x as u8 * 30, y as u8 * 60, 200)).unwrap();

        let mut buffer = Vec::new();
        write_png(&img, &mut buffer).unwrap();

        let img2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(img2, img);
    }

    #[test]
    fn test_read_grayscale() {
        let data = encode_raw(3, 1, ColorType::Grayscale, BitDepth::Eight, &[0, 128, 255]);
        let img = read_png(Cursor::new(data)).unwrap();
        assert_eq!(img.pixel(1, 0), Rgb::gray(128));
        assert_eq!(img.pixel(2, 0), Rgb::WHITE);
    }

    #[test]
    fn test_read_rgba_drops_alpha() {
        let data = encode_raw(1, 1, ColorType::Rgba, BitDepth::Eight, &[10, 20, 30, 0]);
        let img = read_png(Cursor::new(data)).unwrap();
        assert_eq!(img.pixel(0, 0), Rgb::new(10, 20, 30));
    }

    #[test]
    fn test_read_indexed_expands_palette() {
        // 1-bit indices: 0 1 1 0 -> red blue blue red
        let data = encode_raw(4, 1, ColorType::Indexed, BitDepth::One, &[0b0110_0000]);
        let img = read_png(Cursor::new(data)).unwrap();
        assert_eq!(img.pixel(0, 0), Rgb::new(255, 0, 0));
        assert_eq!(img.pixel(1, 0), Rgb::new(0, 0, 255));
        assert_eq!(img.pixel(3, 0), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_read_16bit_keeps_high_byte() {
        let data = encode_raw(1, 1, ColorType::Rgb, BitDepth::Sixteen, &[0x12, 0x34, 0xAB, 0xCD, 0xFF, 0x00]);
        let img = read_png(Cursor::new(data)).unwrap();
        assert_eq!(img.pixel(0, 0), Rgb::new(0x12, 0xAB, 0xFF));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = read_png(Cursor::new(b"\x89PNG\r\n\x1a\nnot really".to_vec()));
        assert!(matches!(result, Err(IoError::DecodeError(_))));
    }
}
