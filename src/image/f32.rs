//! Float plane for edge responses, channel sums and normalized maps.
use super::check_shape;
use crate::error::Result;
use crate::image::traits::{ImageView, ImageViewMut};

/// Owned `h × w` plane of `f32`, tightly packed in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    pub w: usize,
    pub h: usize,
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Zero-filled plane.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Wrap a row-major buffer described by a `[height, width]` shape.
    ///
    /// Fails with `InvalidInput` for any rank other than two or when the
    /// buffer length does not match the shape.
    pub fn from_shape_vec(shape: &[usize], data: Vec<f32>) -> Result<Self> {
        let (h, w) = check_shape(shape, 2, None, data.len())?;
        Ok(Self { w, h, data })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        self.data[y * self.w + x] = v;
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Smallest and largest value, `None` for an empty plane.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut it = self.data.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        &self.data[y * self.w..(y + 1) * self.w]
    }
}

impl ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        &mut self.data[y * self.w..(y + 1) * self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_row_major_layout() {
        let mut plane = ImageF32::from_shape_vec(&[2, 3], vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(plane.row(1), &[3.0, 4.0, 5.0]);
        plane.row_mut(0)[2] = 9.0;
        assert_eq!(plane.get(2, 0), 9.0);
        assert_eq!(plane.min_max(), Some((0.0, 9.0)));
        assert_eq!(ImageF32::new(0, 0).min_max(), None);
    }
}
