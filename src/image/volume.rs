//! Three-channel float edge response at one pyramid resolution.
use super::{ImageF32, CHANNELS};
use crate::error::{Error, Result};
use crate::filters::resample::resize_linear_f32;

/// `height × width × 3` float volume with interleaved channels.
///
/// Produced by the color edge extractor (values in {0, 1}) and carried as the
/// pyramid accumulator (values in [0, 1]).
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeVolume {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl EdgeVolume {
    /// Stack three planes of identical size along a trailing channel axis.
    pub fn from_planes(planes: [ImageF32; 3]) -> Result<Self> {
        let (w, h) = (planes[0].w, planes[0].h);
        if planes.iter().any(|p| p.w != w || p.h != h) {
            return Err(Error::invalid(format!(
                "edge planes differ in size: {:?}",
                planes.iter().map(|p| (p.w, p.h)).collect::<Vec<_>>()
            )));
        }
        let mut data = Vec::with_capacity(w * h * CHANNELS);
        for i in 0..w * h {
            data.extend(planes.iter().map(|p| p.data[i]));
        }
        Ok(Self {
            width: w,
            height: h,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> f32 {
        self.data[(y * self.width + x) * CHANNELS + c]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Copy channel `c` out as a standalone plane.
    pub fn channel(&self, c: usize) -> ImageF32 {
        let mut out = ImageF32::new(self.width, self.height);
        for (dst, px) in out.data.iter_mut().zip(self.data.chunks_exact(CHANNELS)) {
            *dst = px[c];
        }
        out
    }

    /// Collapse the channel axis by summation.
    pub fn sum_channels(&self) -> ImageF32 {
        let mut out = ImageF32::new(self.width, self.height);
        for (dst, px) in out.data.iter_mut().zip(self.data.chunks_exact(CHANNELS)) {
            *dst = px.iter().sum();
        }
        out
    }

    /// Bilinear resample to `width × height`.
    pub fn resize_linear(&self, width: usize, height: usize) -> Self {
        if width == self.width && height == self.height {
            return self.clone();
        }
        let data = resize_linear_f32(
            &self.data,
            self.width,
            self.height,
            CHANNELS,
            width,
            height,
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// Weighted blend `self * self_weight + other * other_weight`, in place.
    pub fn blend(mut self, other: &EdgeVolume, self_weight: f32, other_weight: f32) -> Result<Self> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::invalid(format!(
                "cannot blend {}x{} volume with {}x{}",
                self.width, self.height, other.width, other.height
            )));
        }
        for (acc, &v) in self.data.iter_mut().zip(&other.data) {
            *acc = *acc * self_weight + v * other_weight;
        }
        Ok(self)
    }

    /// Fraction of pixels with a non-zero response in any channel.
    pub fn coverage(&self) -> f32 {
        let n = self.width * self.height;
        if n == 0 {
            return 0.0;
        }
        let hits = self
            .data
            .chunks_exact(CHANNELS)
            .filter(|px| px.iter().any(|&v| v > 0.0))
            .count();
        hits as f32 / n as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(w: usize, h: usize, v: f32) -> ImageF32 {
        ImageF32::from_shape_vec(&[h, w], vec![v; w * h]).unwrap()
    }

    #[test]
    fn stacks_planes_in_channel_order() {
        let vol = EdgeVolume::from_planes([plane(2, 2, 0.0), plane(2, 2, 1.0), plane(2, 2, 0.5)])
            .unwrap();
        assert_eq!(vol.get(1, 1, 0), 0.0);
        assert_eq!(vol.get(1, 1, 1), 1.0);
        assert_eq!(vol.get(1, 1, 2), 0.5);
        assert_eq!(vol.sum_channels().get(0, 0), 1.5);
        assert_eq!(vol.channel(2), plane(2, 2, 0.5));
    }

    #[test]
    fn rejects_mismatched_planes() {
        let err = EdgeVolume::from_planes([plane(2, 2, 0.0), plane(3, 2, 0.0), plane(2, 2, 0.0)]);
        assert!(err.is_err());
    }

    #[test]
    fn blend_weights_both_operands() {
        let a = EdgeVolume::from_planes([plane(1, 1, 1.0), plane(1, 1, 0.0), plane(1, 1, 1.0)])
            .unwrap();
        let b = EdgeVolume::from_planes([plane(1, 1, 0.0), plane(1, 1, 1.0), plane(1, 1, 1.0)])
            .unwrap();
        let out = a.blend(&b, 0.75, 0.25).unwrap();
        assert_eq!(out.as_slice(), &[0.75, 0.25, 1.0]);
        assert_eq!(out.coverage(), 1.0);
    }
}
