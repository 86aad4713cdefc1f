/// Read-only access to one sample of a feature map over a spatial window.
pub trait FeatureView {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn channels(&self) -> usize;

    /// Channel activations at window-local position `(x, y)`.
    fn channels_at(&self, x: usize, y: usize) -> &[f32];

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    fn positions(&self) -> Positions<'_, Self>
    where
        Self: Sized,
    {
        Positions {
            view: self,
            x: 0,
            y: 0,
        }
    }
}

/// Iterates the channel slices of a view, `x` outer and `y` inner.
pub struct Positions<'a, V: ?Sized + FeatureView> {
    view: &'a V,
    x: usize,
    y: usize,
}

impl<'a, V: FeatureView> Iterator for Positions<'a, V> {
    type Item = &'a [f32];

    fn next(&mut self) -> Option<Self::Item> {
        if self.view.is_empty() || self.x >= self.view.width() {
            return None;
        }
        let item = self.view.channels_at(self.x, self.y);
        self.y += 1;
        if self.y >= self.view.height() {
            self.y = 0;
            self.x += 1;
        }
        Some(item)
    }
}
