//! Convolutional activation tensors.
//!
//! A [`FeatureMap`] owns a `(batch, width, height, channels)` tensor in a
//! contiguous buffer with channels varying fastest. Pooling code reads it
//! through [`FeatureView`], which exposes a single sample restricted to a
//! spatial window without copying.
pub mod map;
pub mod traits;

pub use self::map::{FeatureMap, SampleWindow};
pub use self::traits::FeatureView;
