//! Workspace memoizing region tilings.
//!
//! The tiling depends only on `(width, height, levels)`, so repeated batches
//! with the same spatial extent reuse one allocation.
use super::compute_regions;
use crate::descriptor::DescriptorError;
use crate::types::Region;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RegionCache {
    entries: HashMap<(usize, usize, usize), Vec<Region>>,
}

impl RegionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the tiling for `(width, height, levels)`, computing it on first use.
    pub fn get_or_compute(
        &mut self,
        width: usize,
        height: usize,
        levels: usize,
    ) -> Result<&[Region], DescriptorError> {
        let key = (width, height, levels);
        if !self.entries.contains_key(&key) {
            let regions = compute_regions(width, height, levels)?;
            self.entries.insert(key, regions);
        }
        Ok(self.entries.get(&key).map(Vec::as_slice).unwrap_or(&[]))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
