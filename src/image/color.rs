//! Interleaved 8-bit RGB image.
use super::{check_shape, GrayImageU8, CHANNELS};
use crate::error::Result;
use image::RgbImage;

/// Owned `height × width × 3` color image, row-major, channels interleaved.
///
/// Channel 0 is red. Only the decolorization stage interprets the channel
/// order; the edge extractors treat the three channels independently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl ColorImage {
    /// Black image of size `width × height`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * CHANNELS],
        }
    }

    /// Wrap a buffer described by a `[height, width, channels]` shape.
    ///
    /// Fails with `InvalidInput` unless the array is three-dimensional, has
    /// exactly three channels and matches the buffer length.
    pub fn from_shape_vec(shape: &[usize], data: Vec<u8>) -> Result<Self> {
        let (height, width) = check_shape(shape, 3, Some(CHANNELS), data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub(crate) fn from_raw_parts(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height * CHANNELS);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, px: [u8; 3]) {
        let i = (y * self.width + x) * CHANNELS;
        self.data[i..i + CHANNELS].copy_from_slice(&px);
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(CHANNELS)
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Copy channel `c` out as a standalone plane.
    pub fn channel(&self, c: usize) -> GrayImageU8 {
        debug_assert!(c < CHANNELS);
        let plane = self.data.iter().skip(c).step_by(CHANNELS).copied().collect();
        GrayImageU8::from_raw_parts(self.width, self.height, plane)
    }
}

impl From<RgbImage> for ColorImage {
    fn from(img: RgbImage) -> Self {
        let (w, h) = img.dimensions();
        Self::from_raw_parts(w as usize, h as usize, img.into_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn rejects_two_channel_buffers() {
        let err = ColorImage::from_shape_vec(&[4, 4, 2], vec![0; 32]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn rejects_planar_buffers() {
        assert!(ColorImage::from_shape_vec(&[4, 4], vec![0; 16]).is_err());
    }

    #[test]
    fn channel_extracts_interleaved_plane() {
        let img = ColorImage::from_fn(3, 2, |x, y| [x as u8, y as u8, 9]);
        let green = img.channel(1);
        assert_eq!(green.as_raw(), &[0, 0, 0, 1, 1, 1]);
        assert_eq!(img.channel(2).as_raw(), &[9; 6]);
    }

    #[test]
    fn converts_from_image_crate_buffer() {
        let rgb = RgbImage::from_fn(2, 1, |x, _| image::Rgb([x as u8, 1, 2]));
        let img = ColorImage::from(rgb);
        assert_eq!((img.width(), img.height()), (2, 1));
        assert_eq!(img.pixel(1, 0), [1, 1, 2]);
    }
}
