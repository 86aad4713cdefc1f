//! Owned 4D activation tensor in `(batch, width, height, channels)` layout.
//!
//! Element `(b, x, y, c)` lives at `((b * width + x) * height + y) * channels + c`.
//! The shape is fixed at construction; only element values can change.
use super::traits::FeatureView;
use crate::descriptor::DescriptorError;
use crate::types::Region;

#[derive(Clone, Debug, PartialEq)]
pub struct FeatureMap {
    batch: usize,
    /// Spatial extent along tensor axis 1
    width: usize,
    /// Spatial extent along tensor axis 2
    height: usize,
    channels: usize,
    /// Backing storage, channels fastest
    data: Vec<f32>,
}

impl FeatureMap {
    /// Construct a zero-initialized tensor.
    pub fn new(batch: usize, width: usize, height: usize, channels: usize) -> Self {
        Self {
            batch,
            width,
            height,
            channels,
            data: vec![0.0; batch * width * height * channels],
        }
    }

    /// Wrap an existing buffer, checking it matches the shape.
    pub fn from_vec(
        batch: usize,
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<f32>,
    ) -> Result<Self, DescriptorError> {
        let expected = batch * width * height * channels;
        if data.len() != expected {
            return Err(DescriptorError::DataLength {
                expected,
                found: data.len(),
            });
        }
        Ok(Self {
            batch,
            width,
            height,
            channels,
            data,
        })
    }

    #[inline]
    pub fn batch(&self) -> usize {
        self.batch
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Activations per spatial position.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn shape(&self) -> (usize, usize, usize, usize) {
        (self.batch, self.width, self.height, self.channels)
    }

    #[inline]
    pub fn has_spatial_extent(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[inline]
    pub fn idx(&self, b: usize, x: usize, y: usize, c: usize) -> usize {
        ((b * self.width + x) * self.height + y) * self.channels + c
    }

    #[inline]
    pub fn get(&self, b: usize, x: usize, y: usize, c: usize) -> f32 {
        self.data[self.idx(b, x, y, c)]
    }

    #[inline]
    pub fn set(&mut self, b: usize, x: usize, y: usize, c: usize, v: f32) {
        let i = self.idx(b, x, y, c);
        self.data[i] = v;
    }

    #[inline]
    pub fn channels_at(&self, b: usize, x: usize, y: usize) -> &[f32] {
        let start = self.idx(b, x, y, 0);
        &self.data[start..start + self.channels]
    }

    /// Copy sample `b` into a batch of one.
    pub fn sample(&self, b: usize) -> FeatureMap {
        let len = self.width * self.height * self.channels;
        let start = b * len;
        FeatureMap {
            batch: 1,
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: self.data[start..start + len].to_vec(),
        }
    }

    /// Borrow sample `b` over its full spatial extent.
    pub fn full_window(&self, b: usize) -> SampleWindow<'_> {
        SampleWindow {
            map: self,
            sample: b,
            x0: 0,
            y0: 0,
            w: self.width,
            h: self.height,
        }
    }

    /// Borrow sample `b` restricted to `region`.
    ///
    /// The window end is clipped to the map extent; an empty result is an error.
    pub fn window(&self, b: usize, region: &Region) -> Result<SampleWindow<'_>, DescriptorError> {
        let (x0, x1) = clip_span(region.x, region.x_end(), self.width);
        let (y0, y1) = clip_span(region.y, region.y_end(), self.height);
        if x1 <= x0 || y1 <= y0 {
            return Err(DescriptorError::EmptyRegion {
                region: *region,
                width: self.width,
                height: self.height,
            });
        }
        Ok(SampleWindow {
            map: self,
            sample: b,
            x0,
            y0,
            w: x1 - x0,
            h: y1 - y0,
        })
    }

    /// Slice every sample to `region`, producing an owned map.
    pub fn crop(&self, region: &Region) -> Result<FeatureMap, DescriptorError> {
        let (w, h) = {
            let probe = self.window(0, region)?;
            (probe.width(), probe.height())
        };
        let mut data = Vec::with_capacity(self.batch * w * h * self.channels);
        for b in 0..self.batch {
            let window = self.window(b, region)?;
            for channels in window.positions() {
                data.extend_from_slice(channels);
            }
        }
        FeatureMap::from_vec(self.batch, w, h, self.channels, data)
    }
}

#[inline]
fn clip_span(start: usize, end: usize, limit: usize) -> (usize, usize) {
    (start.min(limit), end.min(limit))
}

/// Borrowed view of one sample over a rectangular spatial window.
#[derive(Clone, Copy, Debug)]
pub struct SampleWindow<'a> {
    map: &'a FeatureMap,
    sample: usize,
    x0: usize,
    y0: usize,
    w: usize,
    h: usize,
}

impl FeatureView for SampleWindow<'_> {
    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn channels(&self) -> usize {
        self.map.channels
    }
    #[inline]
    fn channels_at(&self, x: usize, y: usize) -> &[f32] {
        self.map
            .channels_at(self.sample, self.x0 + x, self.y0 + y)
    }
}
