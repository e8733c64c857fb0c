//! Viewport dimensions.

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Surface area in square pixels.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// A surface with no drawable area. Frames against it are skipped.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn max_side(&self) -> f32 {
        self.width.max(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_viewport() {
        assert!(Viewport::default().is_empty());
        assert!(Viewport::new(100.0, 0.0).is_empty());
        assert!(Viewport::new(f32::NAN, 10.0).is_empty());
        assert!(!Viewport::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_area_and_max_side() {
        let vp = Viewport::new(1920.0, 1080.0);
        assert_eq!(vp.area(), 2_073_600.0);
        assert_eq!(vp.max_side(), 1920.0);
    }
}
