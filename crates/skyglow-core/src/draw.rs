//! 2D draw list primitives.

use glam::Vec2;

/// Colour in HSL space with alpha.
///
/// Hue is in degrees, saturation and lightness in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    /// Fully transparent. Takes the colour of its neighbour when sampled in a gradient.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Opaque colour.
    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self::new(h, s, l, 1.0)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    fn lerp(self, other: Self, t: f32) -> Self {
        // Fading into transparency keeps the visible colour.
        let (from, to) = match (self.is_transparent(), other.is_transparent()) {
            (true, false) => (other.with_alpha(0.0), other),
            (false, true) => (self, self.with_alpha(0.0)),
            _ => (self, other),
        };
        Self {
            h: from.h + (to.h - from.h) * t,
            s: from.s + (to.s - from.s) * t,
            l: from.l + (to.l - from.l) * t,
            a: from.a + (to.a - from.a) * t,
        }
    }
}

/// A colour at a fractional offset along a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Hsla,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Hsla) -> Self {
        Self { offset, color }
    }

    /// Sample a sorted list of stops at `t`.
    ///
    /// Values before the first stop or after the last take that stop's colour.
    pub fn sample(stops: &[ColorStop], t: f32) -> Hsla {
        let Some(first) = stops.first() else {
            return Hsla::TRANSPARENT;
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                let local = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
                return a.color.lerp(b.color, local);
            }
        }
        stops[stops.len() - 1].color
    }
}

/// A single raster operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Solid axis-aligned rectangle.
    FillRect { origin: Vec2, size: Vec2, color: Hsla },
    /// Radial gradient painted over the whole surface. Points farther than
    /// `radius` from `center` take the last stop.
    RadialGradient {
        center: Vec2,
        radius: f32,
        stops: Vec<ColorStop>,
    },
    /// Filled circle.
    Circle { center: Vec2, radius: f32, color: Hsla },
    /// Line stroked with a gradient running from `from` (offset 0) to `to` (offset 1).
    GradientLine {
        from: Vec2,
        to: Vec2,
        width: f32,
        stops: Vec<ColorStop>,
    },
}

/// Ordered list of draw commands for one frame. Later commands paint over earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }
}

impl Extend<DrawCommand> for DrawList {
    fn extend<T: IntoIterator<Item = DrawCommand>>(&mut self, iter: T) {
        self.commands.extend(iter);
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
