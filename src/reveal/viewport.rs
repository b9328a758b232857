use crate::reveal::observer::IntersectionSource;
use indexmap::IndexMap;
use std::hash::Hash;

/// Row span of a laid-out element within the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub top: usize,
    pub height: usize,
}

impl Bounds {
    pub fn new(top: usize, height: usize) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> usize {
        self.top.saturating_add(self.height)
    }
}

/// The window of page rows currently on screen. Elements span the full
/// width, so the row fraction is also the area fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub offset: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(offset: usize, height: usize) -> Self {
        Self { offset, height }
    }

    pub fn bottom(&self) -> usize {
        self.offset.saturating_add(self.height)
    }

    pub fn visible_fraction(&self, bounds: Bounds) -> f32 {
        if bounds.height == 0 || self.height == 0 {
            return 0.0;
        }
        let start = bounds.top.max(self.offset);
        let end = bounds.bottom().min(self.bottom());
        let overlap = end.saturating_sub(start);
        overlap as f32 / bounds.height as f32
    }
}

/// Intersection source backed by a page layout and the terminal viewport.
pub struct ViewportSource<'a, K: Eq + Hash> {
    viewport: Viewport,
    layout: &'a IndexMap<K, Bounds>,
}

impl<'a, K: Eq + Hash> ViewportSource<'a, K> {
    pub fn new(viewport: Viewport, layout: &'a IndexMap<K, Bounds>) -> Self {
        Self { viewport, layout }
    }
}

impl<K: Eq + Hash> IntersectionSource<K> for ViewportSource<'_, K> {
    fn visible_fraction(&self, element: &K) -> Option<f32> {
        self.layout
            .get(element)
            .map(|bounds| self.viewport.visible_fraction(*bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_inside_is_one() {
        let vp = Viewport::new(10, 20);
        assert_eq!(vp.visible_fraction(Bounds::new(12, 5)), 1.0);
    }

    #[test]
    fn partial_overlap_at_bottom_edge() {
        let vp = Viewport::new(0, 24);
        // rows 20..40, 4 of 20 visible
        assert!((vp.visible_fraction(Bounds::new(20, 20)) - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_overlap_at_top_edge() {
        let vp = Viewport::new(30, 10);
        assert!((vp.visible_fraction(Bounds::new(25, 10)) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn outside_or_empty_is_zero() {
        let vp = Viewport::new(0, 10);
        assert_eq!(vp.visible_fraction(Bounds::new(10, 5)), 0.0);
        assert_eq!(vp.visible_fraction(Bounds::new(3, 0)), 0.0);
        assert_eq!(Viewport::new(0, 0).visible_fraction(Bounds::new(0, 3)), 0.0);
    }

    #[test]
    fn source_reports_only_laid_out_elements() {
        let mut layout = IndexMap::new();
        layout.insert("a", Bounds::new(0, 10));
        let source = ViewportSource::new(Viewport::new(5, 10), &layout);
        assert_eq!(source.visible_fraction(&"a"), Some(0.5));
        assert_eq!(source.visible_fraction(&"b"), None);
    }
}
