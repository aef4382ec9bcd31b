//! Pixel access functions
//!
//! Bounds-checked, unchecked and border-clamped reads, plus writes.
//!
//! # Border policy
//!
//! Neighbourhood filters read through [`Image::pixel_clamped`], which pulls
//! each coordinate independently into `[0, width-1] x [0, height-1]`
//! (edge-replicate). Out-of-range reads never wrap and never see zero padding.

use super::{Image, ImageMut, Rgb, clamp};
use crate::error::{Error, Result};

impl Image {
    /// Get the pixel at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[self.inner.index(x, y)])
    }

    /// Get the pixel at (x, y) without returning an `Option`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        assert!(
            x < self.inner.width && y < self.inner.height,
            "pixel ({x}, {y}) outside {}x{} image",
            self.inner.width,
            self.inner.height
        );
        self.inner.data[self.inner.index(x, y)]
    }

    /// Get the pixel at signed coordinates, clamping each axis into the image.
    #[inline]
    pub fn pixel_clamped(&self, x: i32, y: i32) -> Rgb {
        let cx = clamp(x, 0, self.inner.width as i32 - 1) as u32;
        let cy = clamp(y, 0, self.inner.height as i32 - 1) as u32;
        self.inner.data[self.inner.index(cx, cy)]
    }
}

impl ImageMut {
    /// Get the pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[self.inner.index(x, y)])
    }

    /// Set the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width: self.inner.width,
                height: self.inner.height,
            });
        }
        let idx = self.inner.index(x, y);
        self.inner.data[idx] = color;
        Ok(())
    }

    /// Set the pixel at (x, y) without returning a `Result`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        assert!(
            x < self.inner.width && y < self.inner.height,
            "pixel ({x}, {y}) outside {}x{} image",
            self.inner.width,
            self.inner.height
        );
        let idx = self.inner.index(x, y);
        self.inner.data[idx] = color;
    }
}
