//! Cosmic gradient and nebula wisps behind the stars (stateless).

use glam::Vec2;
use skyglow_core::{ColorStop, DrawCommand, DrawList, Hsla, Viewport};

/// Base fill behind everything.
pub const BASE_COLOR: Hsla = Hsla::hsl(220.0, 0.2, 0.04);

/// A faint coloured cloud, positioned relative to the viewport.
struct Nebula {
    /// Centre as a fraction of width and height.
    at: (f32, f32),
    radius: f32,
    hue: f32,
    saturation: f32,
    lightness: f32,
}

const NEBULAE: [Nebula; 4] = [
    // Teal
    Nebula {
        at: (0.2, 0.3),
        radius: 300.0,
        hue: 175.0,
        saturation: 0.8,
        lightness: 0.5,
    },
    // Purple
    Nebula {
        at: (0.8, 0.6),
        radius: 350.0,
        hue: 280.0,
        saturation: 0.7,
        lightness: 0.6,
    },
    // Deep blue
    Nebula {
        at: (0.5, 0.8),
        radius: 280.0,
        hue: 220.0,
        saturation: 0.5,
        lightness: 0.3,
    },
    // Muted purple
    Nebula {
        at: (0.15, 0.7),
        radius: 200.0,
        hue: 280.0,
        saturation: 0.6,
        lightness: 0.4,
    },
];

/// Append the backdrop: base fill, radial cosmic gradient, then nebulae.
pub fn draw_backdrop(viewport: Viewport, list: &mut DrawList) {
    let (w, h) = (viewport.width, viewport.height);

    list.push(DrawCommand::FillRect {
        origin: Vec2::ZERO,
        size: Vec2::new(w, h),
        color: BASE_COLOR,
    });

    list.push(DrawCommand::RadialGradient {
        center: Vec2::new(w * 0.5, h * 0.4),
        radius: viewport.max_side() * 0.8,
        stops: vec![
            ColorStop::new(0.0, Hsla::hsl(240.0, 0.25, 0.08)),
            ColorStop::new(0.3, Hsla::hsl(230.0, 0.22, 0.06)),
            ColorStop::new(0.6, Hsla::hsl(225.0, 0.2, 0.05)),
            ColorStop::new(1.0, BASE_COLOR),
        ],
    });

    for nebula in &NEBULAE {
        let color = Hsla::new(nebula.hue, nebula.saturation, nebula.lightness, 0.04);
        list.push(DrawCommand::RadialGradient {
            center: Vec2::new(w * nebula.at.0, h * nebula.at.1),
            radius: nebula.radius,
            stops: vec![
                ColorStop::new(0.0, color),
                ColorStop::new(0.5, color.with_alpha(0.02)),
                ColorStop::new(1.0, Hsla::TRANSPARENT),
            ],
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backdrop_layers() {
        let mut list = DrawList::new();
        draw_backdrop(Viewport::new(1920.0, 1080.0), &mut list);
        // base + gradient + four nebulae
        assert_eq!(list.len(), 6);
        assert!(matches!(
            list.iter().next(),
            Some(DrawCommand::FillRect { color, .. }) if *color == BASE_COLOR
        ));
    }

    #[test]
    fn test_gradient_scales_with_viewport() {
        let mut list = DrawList::new();
        draw_backdrop(Viewport::new(1000.0, 2000.0), &mut list);
        match list.iter().nth(1) {
            Some(DrawCommand::RadialGradient { center, radius, .. }) => {
                assert_eq!(*center, Vec2::new(500.0, 800.0));
                assert_eq!(*radius, 1600.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
