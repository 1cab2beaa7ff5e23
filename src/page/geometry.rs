//! Geometry for viewport intersection

/// Rectangle in document coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create an empty rectangle
    pub fn empty() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Area of the rectangle
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlap of two rectangles. Edge-adjacent rectangles overlap with zero
    /// area; disjoint ones give `None`.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < x || bottom < y {
            return None;
        }
        Some(Rect::new(x, y, right - x, bottom - y))
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::empty()
    }
}

/// Margins around the viewport, CSS order. Negative values shrink it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RootMargin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl RootMargin {
    /// Only a bottom margin, like `0px 0px -100px 0px`
    pub fn bottom(bottom: f32) -> Self {
        Self {
            bottom,
            ..Default::default()
        }
    }

    /// Grow (or shrink) a rectangle by the margins
    pub fn apply(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x - self.left,
            rect.y - self.top,
            (rect.width + self.left + self.right).max(0.0),
            (rect.height + self.top + self.bottom).max(0.0),
        )
    }
}

/// Visible area of the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Vertical scroll offset
    pub scroll_y: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    /// The visible area in document coordinates
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
    }

    #[test]
    fn test_intersection_edge_and_disjoint() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let edge = Rect::new(0.0, 100.0, 100.0, 10.0);
        assert_eq!(a.intersection(&edge).map(|r| r.area()), Some(0.0));
        assert_eq!(a.intersection(&Rect::new(0.0, 101.0, 10.0, 10.0)), None);
    }

    #[test]
    fn test_negative_bottom_margin_shrinks_viewport() {
        let viewport = Viewport::new(1280.0, 720.0);
        let root = RootMargin::bottom(-100.0).apply(viewport.rect());
        assert_eq!(root, Rect::new(0.0, 0.0, 1280.0, 620.0));
    }
}
