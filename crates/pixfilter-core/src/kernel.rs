//! Convolution kernels
//!
//! Defines the weight grid shared by the convolution engine and, as a
//! structuring element, by the morphological operators.
//!
//! # Geometry
//!
//! The first index of a kernel is the horizontal offset: `get(x, y)` is the
//! weight applied to the neighbour `x - radius_x` columns and `y - radius_y`
//! rows away, with the radius on each axis `dimension / 2`. Values are
//! stored x-major, so each run of `height` values in [`Kernel::data`]
//! belongs to one `x`. An even-sized kernel reaches one cell less on the
//! positive side than on the negative side.
//!
//! # Text format
//!
//! [`Kernel::parse`] reads whitespace-separated numbers. Line `i` holds the
//! weights for `x = i` and token `j` on that line is `y = j`, so
//! `"1 2 3\n4 5 6"` is 2 wide and 3 high:
//!
//! ```text
//! 0 1 0
//! 1 1 1
//! 0 1 0
//! ```

use crate::error::{Error, Result};
use std::str::FromStr;

/// A 2D grid of filter weights
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Horizontal extent
    width: u32,
    /// Vertical extent
    height: u32,
    /// Kernel data, x-major: index `x * height + y`
    data: Vec<f32>,
}

impl Kernel {
    /// Create a zero-filled kernel with the given dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidKernel(format!(
                "kernel dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Kernel {
            width,
            height,
            data: vec![0.0; (width as usize) * (height as usize)],
        })
    }

    /// Create a kernel from x-major values (`height` values per `x`).
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> Result<Self> {
        let mut kernel = Self::new(width, height)?;
        if data.len() != kernel.data.len() {
            return Err(Error::InvalidKernel(format!(
                "expected {} values for a {width}x{height} kernel, got {}",
                kernel.data.len(),
                data.len()
            )));
        }
        kernel.data.copy_from_slice(data);
        Ok(kernel)
    }

    /// Create a kernel from nested arrays indexed `[x][y]`, as written in
    /// kernel text.
    pub fn from_rows<const N: usize>(rows: &[[f32; N]]) -> Result<Self> {
        let flat: Vec<f32> = rows.iter().flatten().copied().collect();
        Self::from_slice(rows.len() as u32, N as u32, &flat)
    }

    /// Parse kernel text.
    ///
    /// Carriage returns are ignored and one trailing newline is dropped.
    /// Each remaining line is one `x`; every line must hold the same number
    /// of whitespace-separated values, which becomes the kernel height.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KernelParse`] for empty text, lines of unequal
    /// length, or a token that is not a number.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixfilter_core::Kernel;
    ///
    /// let k = Kernel::parse("1 2 3\r\n4 5 6\r\n").unwrap();
    /// assert_eq!((k.width(), k.height()), (2, 3));
    /// assert_eq!(k.get(1, 0), Some(4.0));
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let normalized: String = text.chars().filter(|&c| c != '\r').collect();
        let body = normalized.strip_suffix('\n').unwrap_or(&normalized);

        let lines: Vec<Vec<&str>> = body
            .split('\n')
            .map(|line| line.split_whitespace().collect())
            .collect();
        let cols = lines[0].len();
        if lines.iter().all(|tokens| tokens.is_empty()) {
            return Err(Error::KernelParse("kernel text is empty".to_string()));
        }
        if let Some((i, tokens)) = lines.iter().enumerate().find(|(_, t)| t.len() != cols) {
            return Err(Error::KernelParse(format!(
                "line {} has {} values, line 1 has {}",
                i + 1,
                tokens.len(),
                cols
            )));
        }

        let mut data = Vec::with_capacity(lines.len() * cols);
        for (i, tokens) in lines.iter().enumerate() {
            for (j, token) in tokens.iter().enumerate() {
                let value: f32 = token.parse().map_err(|_| {
                    Error::KernelParse(format!(
                        "line {}, value {}: '{}' is not a number",
                        i + 1,
                        j + 1,
                        token
                    ))
                })?;
                data.push(value);
            }
        }

        Self::from_slice(lines.len() as u32, cols as u32, &data)
    }

    /// The 1x1 identity kernel `[[1]]`.
    pub fn identity() -> Self {
        Kernel {
            width: 1,
            height: 1,
            data: vec![1.0],
        }
    }

    /// Create a box (averaging) kernel.
    ///
    /// All values are `1/(size*size)`.
    pub fn box_kernel(size: u32) -> Result<Self> {
        let mut kernel = Self::new(size, size)?;
        let weight = 1.0 / (size * size) as f32;
        kernel.data.fill(weight);
        Ok(kernel)
    }

    /// The 3x3 uniform blur kernel (weight 1/9).
    pub fn box_blur() -> Self {
        Kernel {
            width: 3,
            height: 3,
            data: vec![1.0 / 9.0; 9],
        }
    }

    /// Create a normalized Gaussian kernel of size `2*radius + 1`.
    ///
    /// Weight at offset `(i, j)` is `exp(-(i^2 + j^2) / (2 sigma^2))` before
    /// normalization; the weights sum to 1.
    pub fn gaussian(radius: u32, sigma: f32) -> Result<Self> {
        if !(sigma > 0.0) || !sigma.is_finite() {
            return Err(Error::InvalidKernel(format!(
                "gaussian sigma must be positive, got {sigma}"
            )));
        }
        let size = 2 * radius + 1;
        let mut kernel = Self::new(size, size)?;
        let r = radius as i32;
        let denom = 2.0 * sigma * sigma;
        for j in -r..=r {
            for i in -r..=r {
                let weight = (-((i * i + j * j) as f32) / denom).exp();
                kernel.set((i + r) as u32, (j + r) as u32, weight);
            }
        }
        kernel.normalize();
        Ok(kernel)
    }

    /// Create the 3x3 sharpening kernel.
    pub fn sharpen() -> Self {
        Kernel {
            width: 3,
            height: 3,
            data: vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0],
        }
    }

    /// Create an `n x n` motion blur kernel with `1/n` on the main diagonal.
    pub fn motion_blur(n: u32) -> Result<Self> {
        let mut kernel = Self::new(n, n)?;
        let weight = 1.0 / n as f32;
        for i in 0..n {
            kernel.set(i, i, weight);
        }
        Ok(kernel)
    }

    /// Sobel `Gx` kernel `[[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]]`.
    pub fn sobel_x() -> Self {
        Kernel {
            width: 3,
            height: 3,
            data: vec![-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
        }
    }

    /// Sobel `Gy` kernel `[[-1, -2, -1], [0, 0, 0], [1, 2, 1]]`.
    pub fn sobel_y() -> Self {
        Kernel {
            width: 3,
            height: 3,
            data: vec![-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0],
        }
    }

    /// Create the 3x3 emboss kernel.
    pub fn emboss() -> Self {
        Kernel {
            width: 3,
            height: 3,
            data: vec![0.0, 1.0, 0.0, 1.0, 0.0, -1.0, 0.0, -1.0, 0.0],
        }
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Horizontal radius, `width / 2`.
    #[inline]
    pub fn radius_x(&self) -> u32 {
        self.width / 2
    }

    /// Vertical radius, `height / 2`.
    #[inline]
    pub fn radius_y(&self) -> u32 {
        self.height / 2
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(x * self.height + y) as usize])
    }

    /// Set a value at (x, y). Out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        if x < self.width && y < self.height {
            self.data[(x * self.height + y) as usize] = value;
        }
    }

    /// Iterate over `(dx, dy, weight)` for every cell, offsets relative to
    /// the center.
    pub fn taps(&self) -> impl Iterator<Item = (i32, i32, f32)> + '_ {
        let rx = self.radius_x() as i32;
        let ry = self.radius_y() as i32;
        let height = self.height;
        self.data.iter().enumerate().map(move |(idx, &w)| {
            let kx = (idx as u32 / height) as i32;
            let ky = (idx as u32 % height) as i32;
            (kx - rx, ky - ry, w)
        })
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// A kernel summing to zero is left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum != 0.0 {
            for v in &mut self.data {
                *v /= sum;
            }
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

impl FromStr for Kernel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Kernel::parse(s)
    }
}
