//! pixfilter-io - Image and kernel file I/O
//!
//! Decodes raster files into [`Image`] and encodes them back, and loads and
//! stores kernel authoring text.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | BMP    | 1/4/8-bit palette, 24, 32 | 24-bit | `bmp` |
//! | PNG    | all color types | 8-bit RGB | `png-format` |
//! | JPEG   | gray, RGB | - | `jpeg` |
//!
//! All decoded images are 8-bit RGB; alpha is discarded.

#[cfg(feature = "bmp")]
pub mod bmp;
mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use log::debug;
use pixfilter_core::{Image, Kernel};
use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// File name the kernel authoring text is stored under by default.
pub const DEFAULT_KERNEL_FILE: &str = "kernel.txt";

/// Read an image from a file, detecting the format from its contents.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(IoError::Io)?;
    let img = read_image_from_bytes(&data)?;
    debug!(
        "read {}x{} image from {}",
        img.width(),
        img.height(),
        path.display()
    );
    Ok(img)
}

/// Decode an image held in memory, detecting the format from its contents.
pub fn read_image_from_bytes(data: &[u8]) -> IoResult<Image> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(data, format)
}

/// Decode an image held in memory as the given format.
pub fn read_image_format(data: &[u8], format: ImageFormat) -> IoResult<Image> {
    match format {
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::read_bmp(Cursor::new(data)),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(Cursor::new(data)),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support is not enabled",
            other
        ))),
    }
}

/// Write an image to a file in the given format.
pub fn write_image<P: AsRef<Path>>(img: &Image, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(IoError::Io)?;
    let mut writer = BufWriter::new(file);
    write_image_to(img, &mut writer, format)?;
    writer.flush().map_err(IoError::Io)?;
    debug!(
        "wrote {}x{} {:?} image to {}",
        img.width(),
        img.height(),
        format,
        path.display()
    );
    Ok(())
}

/// Encode an image into memory in the given format.
pub fn write_image_to_bytes(img: &Image, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    write_image_to(img, &mut out, format)?;
    Ok(out)
}

fn write_image_to<W: Write>(img: &Image, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::write_bmp(img, writer),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(img, writer),
        ImageFormat::Jpeg => Err(IoError::UnsupportedFormat(
            "JPEG writing is not supported".to_string(),
        )),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support is not enabled",
            other
        ))),
    }
}

/// Read kernel authoring text from a file.
pub fn read_kernel_text<P: AsRef<Path>>(path: P) -> IoResult<String> {
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Read and parse a kernel file.
pub fn read_kernel<P: AsRef<Path>>(path: P) -> IoResult<Kernel> {
    let text = read_kernel_text(path)?;
    Ok(Kernel::parse(&text)?)
}

/// Store kernel authoring text, replacing any existing file.
pub fn write_kernel_text<P: AsRef<Path>>(path: P, text: &str) -> IoResult<()> {
    fs::write(path, text).map_err(IoError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfilter_core::Rgb;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("pixfilter-io-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_bytes_roundtrip_by_detection() {
        let img = Image::from_fn(4, 4, |x, y| Rgb::new(x as u8, y as u8, 7)).unwrap();
        for format in [ImageFormat::Bmp, ImageFormat::Png] {
            let bytes = write_image_to_bytes(&img, format).unwrap();
            assert_eq!(detect_format_from_bytes(&bytes).unwrap(), format);
            assert_eq!(read_image_from_bytes(&bytes).unwrap(), img);
        }
    }

    #[test]
    fn test_jpeg_write_unsupported() {
        let img = Image::new(1, 1).unwrap();
        assert!(matches!(
            write_image_to_bytes(&img, ImageFormat::Jpeg),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_kernel_text_file() {
        let path = temp_path(DEFAULT_KERNEL_FILE);
        write_kernel_text(&path, "0 1 0\r\n1 1 1\r\n0 1 0\r\n").unwrap();
        assert!(read_kernel_text(&path).unwrap().starts_with("0 1 0"));
        let kernel = read_kernel(&path).unwrap();
        assert_eq!((kernel.width(), kernel.height()), (3, 3));
        assert_eq!(kernel.sum(), 5.0);

        write_kernel_text(&path, "1 x").unwrap();
        assert!(matches!(read_kernel(&path), Err(IoError::Core(_))));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_image(temp_path("does-not-exist.png")),
            Err(IoError::Io(_))
        ));
    }
}
