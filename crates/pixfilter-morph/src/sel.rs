//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. The origin sits at `(width / 2, height / 2)`, the same
//! center a [`Kernel`] uses, so an even-sized element reaches one cell
//! further toward the top-left than toward the bottom-right.
//!
//! The morphological operators scan the half-open window
//! `[-origin, origin)` on each axis (see [`Sel::window_offsets`]): the last
//! column and row of an odd-sized element are never read, and an element one
//! cell wide on either axis has an empty window.

use crate::{MorphError, MorphResult};
use pixfilter_core::Kernel;

/// Element type in a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SelElement {
    /// Don't care - this position is ignored
    #[default]
    DontCare = 0,
    /// Hit - this position takes part in the min/max
    Hit = 1,
}

/// Structuring Element (SEL)
///
/// Defines the neighborhood pattern for morphological operations.
/// The origin (cx, cy) is the reference point for the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<SelElement>,
}

impl Sel {
    /// Create a new structuring element with every position don't-care
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Sel {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![SelElement::DontCare; (width as usize) * (height as usize)],
        })
    }

    /// Build a structuring element from a kernel
    ///
    /// A position is a hit iff its weight is strictly positive; zero and
    /// negative weights are don't-care. Kernel cell `(x, y)` becomes element
    /// `(x, y)`.
    pub fn from_kernel(kernel: &Kernel) -> MorphResult<Self> {
        let mut sel = Self::new(kernel.width(), kernel.height())?;
        for y in 0..sel.height {
            for x in 0..sel.width {
                if kernel.get(x, y).is_some_and(|w| w > 0.0) {
                    sel.set_element(x, y, SelElement::Hit);
                }
            }
        }
        Ok(sel)
    }

    /// Create a rectangular "brick" structuring element with all hits
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::new(width, height)?;
        sel.data.fill(SelElement::Hit);
        Ok(sel)
    }

    /// Create a square structuring element with all hits
    pub fn create_square(size: u32) -> MorphResult<Self> {
        Self::create_brick(size, size)
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate (also the horizontal radius)
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate (also the vertical radius)
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Get an element at (x, y)
    #[inline]
    pub fn get_element(&self, x: u32, y: u32) -> Option<SelElement> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set an element at (x, y). Out-of-range positions are ignored.
    #[inline]
    pub fn set_element(&mut self, x: u32, y: u32, elem: SelElement) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = elem;
        }
    }

    /// Get raw element data
    pub fn data(&self) -> &[SelElement] {
        &self.data
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Hit).count()
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width;

        self.data
            .iter()
            .enumerate()
            .filter_map(move |(idx, &elem)| {
                if elem == SelElement::Hit {
                    let x = (idx as u32 % width) as i32;
                    let y = (idx as u32 / width) as i32;
                    Some((x - cx, y - cy))
                } else {
                    None
                }
            })
    }

    /// Hit offsets inside the scan window `[-origin, origin)` on each axis
    pub fn window_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        self.hit_offsets().filter(move |&(dx, dy)| dx < cx && dy < cy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kernel_positive_weights_only() {
        let kernel = Kernel::parse("0 1 0\n1 -1 1\n0 0.5 0\n").unwrap();
        let sel = Sel::from_kernel(&kernel).unwrap();
        assert_eq!(sel.hit_count(), 4);
        assert_eq!(sel.get_element(1, 1), Some(SelElement::DontCare));
        assert_eq!(sel.get_element(1, 2), Some(SelElement::Hit));
        let offsets: Vec<_> = sel.hit_offsets().collect();
        assert_eq!(offsets, vec![(0, -1), (-1, 0), (1, 0), (0, 1)]);
    }

    #[test]
    fn test_origin_is_half_size() {
        let sel = Sel::create_brick(5, 2).unwrap();
        assert_eq!((sel.origin_x(), sel.origin_y()), (2, 1));
        assert_eq!(sel.hit_count(), 10);
        let min = sel.hit_offsets().min().unwrap();
        assert_eq!(min, (-2, -1));
    }

    #[test]
    fn test_from_kernel_follows_kernel_axes() {
        // Line 1 is x = 0: hits at (0, 1) and (0, 2)
        let kernel = Kernel::parse("0 1 1\n0 0 0\n").unwrap();
        let sel = Sel::from_kernel(&kernel).unwrap();
        assert_eq!((sel.width(), sel.height()), (2, 3));
        assert_eq!(sel.get_element(0, 1), Some(SelElement::Hit));
        assert_eq!(sel.get_element(1, 0), Some(SelElement::DontCare));
        assert_eq!(sel.hit_offsets().collect::<Vec<_>>(), vec![(-1, 0), (-1, 1)]);
    }

    #[test]
    fn test_window_offsets_half_open() {
        let square = Sel::create_square(3).unwrap();
        let window: Vec<_> = square.window_offsets().collect();
        assert_eq!(window, vec![(-1, -1), (0, -1), (-1, 0), (0, 0)]);

        // Even sizes already end at origin - 1
        let even = Sel::create_brick(4, 2).unwrap();
        assert_eq!(even.window_offsets().count(), even.hit_count());

        // A single line has no window on that axis
        assert_eq!(Sel::create_brick(1, 5).unwrap().window_offsets().count(), 0);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(Sel::new(0, 3), Err(MorphError::InvalidSel(_))));
    }

    #[test]
    fn test_set_element() {
        let mut sel = Sel::new(3, 3).unwrap();
        sel.set_element(2, 0, SelElement::Hit);
        sel.set_element(9, 9, SelElement::Hit);
        assert_eq!(sel.hit_offsets().collect::<Vec<_>>(), vec![(1, -1)]);
    }
}
