//! Colour conversion for the terminal backend.

use ratatui::style::Color;
use skyglow_core::Hsla;

/// Linear RGB with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Composite `over` onto `self` with the given alpha.
    pub fn blend(self, over: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        Rgb {
            r: self.r + (over.r - self.r) * a,
            g: self.g + (over.g - self.g) * a,
            b: self.b + (over.b - self.b) * a,
        }
    }

    /// Multiply every channel, saturating at white.
    pub fn scale(self, factor: f32) -> Rgb {
        Rgb {
            r: (self.r * factor).clamp(0.0, 1.0),
            g: (self.g * factor).clamp(0.0, 1.0),
            b: (self.b * factor).clamp(0.0, 1.0),
        }
    }

    pub fn to_color(self) -> Color {
        Color::Rgb(
            (self.r.clamp(0.0, 1.0) * 255.0) as u8,
            (self.g.clamp(0.0, 1.0) * 255.0) as u8,
            (self.b.clamp(0.0, 1.0) * 255.0) as u8,
        )
    }
}

impl From<Hsla> for Rgb {
    fn from(c: Hsla) -> Self {
        hsl_to_rgb(c.h, c.s, c.l)
    }
}

/// Convert HSL (hue in degrees) to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    if s == 0.0 {
        return Rgb::new(l, l, l);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    Rgb::new(
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgb, b: Rgb) -> bool {
        (a.r - b.r).abs() < 1e-3 && (a.g - b.g).abs() < 1e-3 && (a.b - b.b).abs() < 1e-3
    }

    #[test]
    fn test_primary_hues() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), Rgb::new(1.0, 0.0, 0.0)));
        assert!(close(hsl_to_rgb(120.0, 1.0, 0.5), Rgb::new(0.0, 1.0, 0.0)));
        assert!(close(hsl_to_rgb(240.0, 1.0, 0.5), Rgb::new(0.0, 0.0, 1.0)));
        assert!(close(hsl_to_rgb(360.0, 1.0, 0.5), Rgb::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_greyscale() {
        assert_eq!(hsl_to_rgb(200.0, 0.0, 0.25), Rgb::new(0.25, 0.25, 0.25));
    }

    #[test]
    fn test_blend() {
        let mixed = Rgb::BLACK.blend(Rgb::new(1.0, 1.0, 1.0), 0.25);
        assert!(close(mixed, Rgb::new(0.25, 0.25, 0.25)));
        assert_eq!(
            Rgb::BLACK.blend(Rgb::new(1.0, 0.0, 0.0), 5.0),
            Rgb::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_to_color() {
        assert_eq!(Rgb::new(1.0, 0.5, 0.0).to_color(), Color::Rgb(255, 127, 0));
    }
}
