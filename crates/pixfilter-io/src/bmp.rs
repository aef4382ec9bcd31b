//! BMP image format support
//!
//! Reads uncompressed Windows Bitmap files at 1, 4, 8 (palette), 24 and
//! 32 bits per pixel, bottom-up or top-down. Writes 24-bit bottom-up.

use crate::{IoError, IoResult};
use pixfilter_core::{Image, ImageMut, Rgb};
use std::io::{self, Read, Write};

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: u32 = 40;

/// Largest info header in use (BITMAPV5HEADER)
const BMP_MAX_INFO_HEADER_SIZE: u32 = 124;

fn le_u16(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

fn le_u32(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

fn le_i32(b: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

/// Discard `count` bytes without buffering them.
fn skip<R: Read>(reader: &mut R, count: u64) -> IoResult<()> {
    let skipped = io::copy(&mut reader.by_ref().take(count), &mut io::sink())?;
    if skipped < count {
        return Err(IoError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("BMP ended {skipped} bytes into a {count} byte gap"),
        )));
    }
    Ok(())
}

/// Read a BMP image
pub fn read_bmp<R: Read>(mut reader: R) -> IoResult<Image> {
    // Read file header (14 bytes)
    let mut file_header = [0u8; BMP_FILE_HEADER_SIZE];
    reader.read_exact(&mut file_header).map_err(IoError::Io)?;

    if &file_header[0..2] != b"BM" {
        return Err(IoError::InvalidData("not a BMP file".to_string()));
    }

    let pixel_offset = u64::from(le_u32(&file_header, 10));

    // Read info header (minimum 40 bytes)
    let mut info_header = [0u8; BMP_INFO_HEADER_SIZE as usize];
    reader.read_exact(&mut info_header).map_err(IoError::Io)?;

    let header_size = le_u32(&info_header, 0);
    if !(BMP_INFO_HEADER_SIZE..=BMP_MAX_INFO_HEADER_SIZE).contains(&header_size) {
        return Err(IoError::InvalidData(format!(
            "unsupported BMP header size: {}",
            header_size
        )));
    }

    let width = le_i32(&info_header, 4);
    let height = le_i32(&info_header, 8);

    let planes = le_u16(&info_header, 12);
    if planes != 1 {
        return Err(IoError::InvalidData(format!(
            "unsupported number of planes: {}",
            planes
        )));
    }

    let bits_per_pixel = le_u16(&info_header, 14);
    let compression = le_u32(&info_header, 16);
    let colors_used = le_u32(&info_header, 32) as usize;

    // BI_RGB, or BI_BITFIELDS with the standard masks
    if compression != 0 && compression != 3 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP compression: {}",
            compression
        )));
    }

    if !matches!(bits_per_pixel, 1 | 4 | 8 | 24 | 32) {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP bit depth: {}",
            bits_per_pixel
        )));
    }

    let width = width.unsigned_abs();
    let top_down = height < 0;
    let height = height.unsigned_abs();

    let mut consumed = (BMP_FILE_HEADER_SIZE as u64) + u64::from(header_size);
    if pixel_offset < consumed {
        return Err(IoError::InvalidData(format!(
            "BMP pixel data offset {pixel_offset} lies inside the {consumed} header bytes"
        )));
    }
    skip(&mut reader, u64::from(header_size - BMP_INFO_HEADER_SIZE))?;

    // Palette for 1, 4 and 8 bit images
    let palette: Vec<Rgb> = if bits_per_pixel <= 8 {
        let max_colors = 1usize << bits_per_pixel;
        let num_colors = if colors_used == 0 || colors_used > max_colors {
            max_colors
        } else {
            colors_used
        };
        let mut raw = vec![0u8; num_colors * 4];
        reader.read_exact(&mut raw).map_err(IoError::Io)?;
        consumed += raw.len() as u64;
        raw.chunks_exact(4)
            .map(|bgra| Rgb::new(bgra[2], bgra[1], bgra[0]))
            .collect()
    } else {
        Vec::new()
    };

    // Skip to pixel data
    if pixel_offset > consumed {
        skip(&mut reader, pixel_offset - consumed)?;
    }

    let mut img = ImageMut::new(width, height)?;
    let lookup = |index: u8| palette.get(index as usize).copied().unwrap_or(Rgb::BLACK);

    // BMP rows are 4-byte aligned
    let row_stride = (width as usize * bits_per_pixel as usize).div_ceil(32) * 4;
    let mut row_buffer = vec![0u8; row_stride];

    for row in 0..height {
        reader.read_exact(&mut row_buffer).map_err(IoError::Io)?;

        let y = if top_down { row } else { height - 1 - row };

        for x in 0..width {
            let xi = x as usize;
            let pixel = match bits_per_pixel {
                1 => lookup((row_buffer[xi / 8] >> (7 - (xi % 8))) & 1),
                4 => {
                    let byte = row_buffer[xi / 2];
                    lookup(if xi % 2 == 0 { byte >> 4 } else { byte & 0xF })
                }
                8 => lookup(row_buffer[xi]),
                24 => {
                    let idx = xi * 3;
                    Rgb::new(row_buffer[idx + 2], row_buffer[idx + 1], row_buffer[idx])
                }
                _ => {
                    let idx = xi * 4;
                    Rgb::new(row_buffer[idx + 2], row_buffer[idx + 1], row_buffer[idx])
                }
            };
            img.put_pixel(x, y, pixel);
        }
    }

    Ok(img.into())
}

/// Write a BMP image as 24-bit bottom-up RGB
pub fn write_bmp<W: Write>(img: &Image, mut writer: W) -> IoResult<()> {
    let width = img.width();
    let height = img.height();
    let bits_per_pixel: u16 = 24;

    let row_stride = (width as usize * bits_per_pixel as usize).div_ceil(32) * 4;
    let pixel_data_size = row_stride * height as usize;
    let pixel_offset = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE as usize;
    let file_size = pixel_offset + pixel_data_size;

    let to_u32 = |v: usize| {
        u32::try_from(v).map_err(|_| IoError::EncodeError("image too large for BMP".to_string()))
    };

    // File header
    writer.write_all(b"BM").map_err(IoError::Io)?;
    writer
        .write_all(&to_u32(file_size)?.to_le_bytes())
        .map_err(IoError::Io)?;
    writer.write_all(&[0u8; 4]).map_err(IoError::Io)?; // Reserved
    writer
        .write_all(&(pixel_offset as u32).to_le_bytes())
        .map_err(IoError::Io)?;

    // Info header
    writer
        .write_all(&BMP_INFO_HEADER_SIZE.to_le_bytes())
        .map_err(IoError::Io)?;
    writer
        .write_all(&(width as i32).to_le_bytes())
        .map_err(IoError::Io)?;
    writer
        .write_all(&(height as i32).to_le_bytes())
        .map_err(IoError::Io)?; // Bottom-up
    writer.write_all(&1u16.to_le_bytes()).map_err(IoError::Io)?; // Planes
    writer
        .write_all(&bits_per_pixel.to_le_bytes())
        .map_err(IoError::Io)?;
    writer.write_all(&0u32.to_le_bytes()).map_err(IoError::Io)?; // Compression
    writer
        .write_all(&to_u32(pixel_data_size)?.to_le_bytes())
        .map_err(IoError::Io)?;
    writer.write_all(&0i32.to_le_bytes()).map_err(IoError::Io)?; // X pixels per meter
    writer.write_all(&0i32.to_le_bytes()).map_err(IoError::Io)?; // Y pixels per meter
    writer.write_all(&0u32.to_le_bytes()).map_err(IoError::Io)?; // Colors used
    writer.write_all(&0u32.to_le_bytes()).map_err(IoError::Io)?; // Important colors

    let mut row_buffer = vec![0u8; row_stride];
    for row in 0..height {
        let y = height - 1 - row;
        for x in 0..width {
            let p = img.pixel(x, y);
            let idx = (x as usize) * 3;
            row_buffer[idx] = p.b;
            row_buffer[idx + 1] = p.g;
            row_buffer[idx + 2] = p.r;
        }
        writer.write_all(&row_buffer).map_err(IoError::Io)?;
    }

    Ok(())
}
