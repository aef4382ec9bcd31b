//! Image - The RGB raster container
//!
//! `Image` is the image type every filter reads from and produces.
//! It holds a dense, row-major grid of 8-bit RGB triples.
//!
//! # Ownership model
//!
//! `Image` uses `Arc` for cheap cloning (shared ownership) and is never
//! modified in place. To build or edit pixel data, work on an [`ImageMut`]
//! (from [`ImageMut::new`], [`Image::try_into_mut`] or [`Image::to_mut`]),
//! then convert back with `Into<Image>`.
//!
//! A filter pass always allocates its own output `ImageMut`, so the source
//! image a caller holds is untouched whether the pass completes or not.

mod access;

use crate::error::{Error, Result};
use std::sync::Arc;

/// An 8-bit-per-channel RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Black `(0, 0, 0)`, the value of every pixel in a fresh image.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// White `(255, 255, 255)`.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Compose a pixel from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// A gray pixel with all three channels equal to `v`.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Rgb { r: v, g: v, b: v }
    }

    /// Build a pixel from integer channel values, clamping each to [0, 255].
    #[inline]
    pub fn from_clamped(r: i32, g: i32, b: i32) -> Self {
        Rgb {
            r: clamp(r, 0, 255) as u8,
            g: clamp(g, 0, 255) as u8,
            b: clamp(b, 0, 255) as u8,
        }
    }

    /// Channels as an array, in `[r, g, b]` order.
    #[inline]
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb { r, g, b }
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(p: Rgb) -> Self {
        (p.r, p.g, p.b)
    }
}

/// Clamp `value` into `[min_val, max_val]`.
///
/// Every channel computation passes through this before being stored, so
/// a stored channel is never outside [0, 255]. Also used to pull neighbour
/// coordinates back inside the image (edge-replicate borders).
#[inline]
pub fn clamp(value: i32, min_val: i32, max_val: i32) -> i32 {
    if value < min_val {
        return min_val;
    }
    if value > max_val {
        return max_val;
    }
    value
}

/// Internal image data
#[derive(Debug, Clone, PartialEq, Eq)]
struct ImageData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Row-major pixels, `width * height` entries
    data: Vec<Rgb>,
}

impl ImageData {
    fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = (width as usize) * (height as usize);
        Ok(ImageData {
            width,
            height,
            data: vec![Rgb::BLACK; len],
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

/// Immutable RGB image
///
/// # Examples
///
/// ```
/// use pixfilter_core::{Image, Rgb};
///
/// let img = Image::new(64, 48).unwrap();
/// assert_eq!(img.width(), 64);
/// assert_eq!(img.get_pixel(0, 0), Some(Rgb::BLACK));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    inner: Arc<ImageData>,
}

impl Image {
    /// Create a new all-black image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(ImageMut::new(width, height)?.into())
    }

    /// Create an image filled with a single color.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self> {
        let mut img = ImageMut::new(width, height)?;
        img.fill(color);
        Ok(img.into())
    }

    /// Create an image from a row-major pixel vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if pixels.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Image {
            inner: Arc::new(ImageData {
                width,
                height,
                data: pixels,
            }),
        })
    }

    /// Create an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Rgb,
    {
        let mut img = ImageMut::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                img.put_pixel(x, y, f(x, y));
            }
        }
        Ok(img.into())
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Row-major pixel data.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.inner.data
    }

    /// Get the number of strong references to the shared buffer.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Try to take unique ownership of the buffer for modification.
    ///
    /// Fails (returning `self`) when the buffer is shared.
    pub fn try_into_mut(self) -> std::result::Result<ImageMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(ImageMut { inner: data }),
            Err(arc) => Err(Image { inner: arc }),
        }
    }

    /// Create a mutable copy of this image.
    pub fn to_mut(&self) -> ImageMut {
        ImageMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable RGB image
///
/// Produced by filters while they build their output; converted into an
/// [`Image`] once the pass completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMut {
    inner: ImageData,
}

impl ImageMut {
    /// Create a new all-black mutable image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(ImageMut {
            inner: ImageData::new(width, height)?,
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Row-major pixel data.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.inner.data
    }

    /// Mutable row-major pixel data.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.inner.data
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Rgb) {
        self.inner.data.fill(color);
    }
}

impl From<ImageMut> for Image {
    fn from(img: ImageMut) -> Self {
        Image {
            inner: Arc::new(img.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let img = Image::new(3, 2).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert!(img.pixels().iter().all(|&p| p == Rgb::BLACK));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            Image::new(0, 5),
            Err(Error::InvalidDimension {
                width: 0,
                height: 5
            })
        ));
        assert!(ImageMut::new(5, 0).is_err());
    }

    #[test]
    fn test_from_pixels_length_checked() {
        let err = Image::from_pixels(2, 2, vec![Rgb::WHITE; 3]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferLength {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_clone_shares_buffer() {
        let img = Image::new(4, 4).unwrap();
        let copy = img.clone();
        assert_eq!(img.ref_count(), 2);
        // Shared buffers cannot be taken mutably
        let img = img.try_into_mut().unwrap_err();
        drop(copy);
        assert!(img.try_into_mut().is_ok());
    }

    #[test]
    fn test_to_mut_leaves_original() {
        let img = Image::filled(2, 2, Rgb::WHITE).unwrap();
        let mut edit = img.to_mut();
        edit.fill(Rgb::BLACK);
        assert_eq!(img.get_pixel(1, 1), Some(Rgb::WHITE));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-4, 0, 255), 0);
        assert_eq!(clamp(300, 0, 255), 255);
        assert_eq!(clamp(17, 0, 255), 17);
    }

    #[test]
    fn test_rgb_from_clamped() {
        assert_eq!(Rgb::from_clamped(-1, 128, 999), Rgb::new(0, 128, 255));
    }
}
