//! 8-bit single-channel planes: a borrowed strided view and an owned buffer.
use super::check_shape;
use crate::error::Result;
use image::{GrayImage, Luma};

/// Borrowed 8-bit plane (one channel of an image).
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

/// Owned, tightly packed 8-bit plane.
///
/// Used for binary edge masks, the decolorized density and the final maps
/// returned by the pipelines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Zero-filled plane of size `width × height`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Wrap a row-major buffer described by a `[height, width]` shape.
    ///
    /// Fails with `InvalidInput` unless the shape has exactly two dimensions
    /// and matches the buffer length.
    pub fn from_shape_vec(shape: &[usize], data: Vec<u8>) -> Result<Self> {
        let (height, width) = check_shape(shape, 2, None, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub(crate) fn from_raw_parts(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.width + x] = v;
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

impl crate::image::traits::ImageView for GrayImageU8 {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

impl crate::image::traits::ImageViewMut for GrayImageU8 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }
}

impl From<GrayImageU8> for GrayImage {
    fn from(plane: GrayImageU8) -> Self {
        GrayImage::from_fn(plane.width as u32, plane.height as u32, |x, y| {
            Luma([plane.get(x as usize, y as usize)])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::image::ImageView;

    #[test]
    fn from_shape_vec_rejects_three_dimensions() {
        let err = GrayImageU8::from_shape_vec(&[2, 2, 1], vec![0; 4]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn view_rows_match_buffer() {
        let plane = GrayImageU8::from_shape_vec(&[2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
        let view = plane.as_view();
        assert_eq!(view.row(1), &[4, 5, 6]);
        assert_eq!(view.get(2, 0), 3);
    }

    #[test]
    fn converts_into_image_crate_buffer() {
        let plane = GrayImageU8::from_shape_vec(&[1, 2], vec![7, 9]).unwrap();
        let gray: GrayImage = plane.into();
        assert_eq!(gray.dimensions(), (2, 1));
        assert_eq!(gray.get_pixel(1, 0)[0], 9);
    }
}
