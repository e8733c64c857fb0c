//! Rasterizes draw lists onto terminal cells.
//!
//! Coordinates are virtual pixels. One cell covers `cell_width` by
//! `cell_height` pixels, so a 100x30 terminal with 8x16 cells is an
//! 800x480 surface. Each cell keeps a background colour and at most one
//! glyph.

use std::ops::Range;

use glam::Vec2;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use skyglow_core::{ColorStop, DrawCommand, DrawList, Hsla, Viewport};

use super::color::Rgb;

/// Sub-samples per cell axis for gradients.
const GRADIENT_SAMPLES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Glyph {
    ch: char,
    color: Rgb,
    alpha: f32,
    bold: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct Cell {
    bg: Rgb,
    glyph: Option<Glyph>,
}

/// A grid of terminal cells painted with pixel-space primitives.
#[derive(Debug, Clone)]
pub struct CellCanvas {
    columns: u16,
    rows: u16,
    cell_size: Vec2,
    cells: Vec<Cell>,
}

impl CellCanvas {
    pub fn new(columns: u16, rows: u16, cell_width: u16, cell_height: u16) -> Self {
        Self {
            columns,
            rows,
            cell_size: Vec2::new(f32::from(cell_width.max(1)), f32::from(cell_height.max(1))),
            cells: vec![Cell::default(); usize::from(columns) * usize::from(rows)],
        }
    }

    /// Pixel surface covered by the grid.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            f32::from(self.columns) * self.cell_size.x,
            f32::from(self.rows) * self.cell_size.y,
        )
    }

    /// Cell containing pixel `p`.
    pub fn cell_at(&self, p: Vec2) -> Option<(u16, u16)> {
        if !p.is_finite() || p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let column = (p.x / self.cell_size.x) as u32;
        let row = (p.y / self.cell_size.y) as u32;
        if column >= u32::from(self.columns) || row >= u32::from(self.rows) {
            return None;
        }
        Some((column as u16, row as u16))
    }

    #[cfg(test)]
    pub fn glyph(&self, column: u16, row: u16) -> Option<char> {
        self.cell(column, row).and_then(|c| c.glyph).map(|g| g.ch)
    }

    #[cfg(test)]
    pub fn background(&self, column: u16, row: u16) -> Option<Rgb> {
        self.cell(column, row).map(|c| c.bg)
    }

    #[cfg(test)]
    fn cell(&self, column: u16, row: u16) -> Option<&Cell> {
        self.index(column, row).map(|i| &self.cells[i])
    }

    fn index(&self, column: u16, row: u16) -> Option<usize> {
        (column < self.columns && row < self.rows)
            .then(|| usize::from(row) * usize::from(self.columns) + usize::from(column))
    }

    fn cell_origin(&self, column: u16, row: u16) -> Vec2 {
        Vec2::new(f32::from(column), f32::from(row)) * self.cell_size
    }

    fn cell_center(&self, column: u16, row: u16) -> Vec2 {
        self.cell_origin(column, row) + self.cell_size * 0.5
    }

    /// Column and row ranges of the cells touched by a pixel rectangle.
    fn cell_span(&self, min: Vec2, max: Vec2) -> Option<(Range<u16>, Range<u16>)> {
        let lo = (min / self.cell_size).floor().max(Vec2::ZERO);
        let hi = (max / self.cell_size)
            .ceil()
            .min(Vec2::new(f32::from(self.columns), f32::from(self.rows)));
        if !lo.is_finite() || !hi.is_finite() || lo.x >= hi.x || lo.y >= hi.y {
            return None;
        }
        Some((lo.x as u16..hi.x as u16, lo.y as u16..hi.y as u16))
    }

    /// Paint every command in order.
    pub fn paint(&mut self, list: &DrawList) {
        for command in list {
            match command {
                DrawCommand::FillRect {
                    origin,
                    size,
                    color,
                } => self.fill_rect(*origin, *size, *color),
                DrawCommand::RadialGradient {
                    center,
                    radius,
                    stops,
                } => self.radial_gradient(*center, *radius, stops),
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => self.circle(*center, *radius, *color),
                DrawCommand::GradientLine {
                    from,
                    to,
                    width,
                    stops,
                } => self.gradient_line(*from, *to, *width, stops),
            }
        }
    }

    pub fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Hsla) {
        let Some((columns, rows)) = self.cell_span(origin, origin + size) else {
            return;
        };
        let rgb = Rgb::from(color);
        for row in rows {
            for column in columns.clone() {
                let center = self.cell_center(column, row);
                if center.cmpge(origin).all() && center.cmplt(origin + size).all() {
                    self.blend_background(column, row, rgb, color.a);
                }
            }
        }
    }

    /// Radial gradient. Cells beyond `radius` take the last stop, so a
    /// transparent last stop limits painting to the gradient's bounds.
    pub fn radial_gradient(&mut self, center: Vec2, radius: f32, stops: &[ColorStop]) {
        let Some(last) = stops.last() else {
            return;
        };
        if radius.is_nan() || radius <= 0.0 || !center.is_finite() {
            return;
        }
        let span = if last.color.a <= 0.0 {
            self.cell_span(center - Vec2::splat(radius), center + Vec2::splat(radius))
        } else {
            self.cell_span(Vec2::ZERO, self.viewport_size())
        };
        let Some((columns, rows)) = span else {
            return;
        };

        let step = self.cell_size / GRADIENT_SAMPLES as f32;
        let samples = (GRADIENT_SAMPLES * GRADIENT_SAMPLES) as f32;
        for row in rows {
            for column in columns.clone() {
                let origin = self.cell_origin(column, row);
                let mut weighted = Rgb::BLACK;
                let mut alpha = 0.0;
                for sy in 0..GRADIENT_SAMPLES {
                    for sx in 0..GRADIENT_SAMPLES {
                        let p = origin + step * Vec2::new(sx as f32 + 0.5, sy as f32 + 0.5);
                        let color = ColorStop::sample(stops, p.distance(center) / radius);
                        let rgb = Rgb::from(color);
                        weighted.r += rgb.r * color.a;
                        weighted.g += rgb.g * color.a;
                        weighted.b += rgb.b * color.a;
                        alpha += color.a;
                    }
                }
                if alpha <= 0.0 {
                    continue;
                }
                let rgb = Rgb::new(weighted.r / alpha, weighted.g / alpha, weighted.b / alpha);
                self.blend_background(column, row, rgb, alpha / samples);
            }
        }
    }

    /// Circles narrower than a cell become a glyph sized by radius; larger
    /// ones also fill the cells they cover.
    pub fn circle(&mut self, center: Vec2, radius: f32, color: Hsla) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        if radius * 2.0 >= self.cell_size.min_element() {
            let rgb = Rgb::from(color);
            if let Some((columns, rows)) =
                self.cell_span(center - Vec2::splat(radius), center + Vec2::splat(radius))
            {
                for row in rows {
                    for column in columns.clone() {
                        if self.cell_center(column, row).distance(center) <= radius {
                            self.blend_background(column, row, rgb, color.a);
                        }
                    }
                }
            }
        }
        self.stamp(center, circle_glyph(radius), color, false);
    }

    /// Stroke a line with glyphs pointing along its direction.
    pub fn gradient_line(&mut self, from: Vec2, to: Vec2, width: f32, stops: &[ColorStop]) {
        let delta = to - from;
        if !delta.is_finite() {
            return;
        }
        let ch = line_glyph(delta / self.cell_size);
        let step = self.cell_size.min_element() * 0.5;
        let steps = (delta.length() / step).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let color = ColorStop::sample(stops, t);
            self.stamp(from.lerp(to, t), ch, color, width >= 2.0);
        }
    }

    /// Place a glyph unless a brighter one already sits in the cell.
    fn stamp(&mut self, p: Vec2, ch: char, color: Hsla, bold: bool) {
        let Some((column, row)) = self.cell_at(p) else {
            return;
        };
        if color.a <= 0.0 {
            return;
        }
        if let Some(i) = self.index(column, row) {
            let cell = &mut self.cells[i];
            if cell.glyph.is_none_or(|g| color.a >= g.alpha) {
                cell.glyph = Some(Glyph {
                    ch,
                    color: Rgb::from(color),
                    alpha: color.a,
                    bold,
                });
            }
        }
    }

    /// Place a glyph over whatever the cell holds.
    pub fn put_glyph(&mut self, p: Vec2, ch: char, color: Rgb, alpha: f32, bold: bool) {
        let Some((column, row)) = self.cell_at(p) else {
            return;
        };
        if let Some(i) = self.index(column, row) {
            self.cells[i].glyph = Some(Glyph {
                ch,
                color,
                alpha: alpha.clamp(0.0, 1.0),
                bold,
            });
        }
    }

    fn blend_background(&mut self, column: u16, row: u16, color: Rgb, alpha: f32) {
        if let Some(i) = self.index(column, row) {
            let cell = &mut self.cells[i];
            cell.bg = cell.bg.blend(color, alpha);
        }
    }

    fn viewport_size(&self) -> Vec2 {
        let viewport = self.viewport();
        Vec2::new(viewport.width, viewport.height)
    }

    /// Convert the grid into styled lines, one per row.
    pub fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .chunks(usize::from(self.columns.max(1)))
            .take(usize::from(self.rows))
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .iter()
                    .map(|cell| {
                        let style = Style::new().bg(cell.bg.to_color());
                        match cell.glyph {
                            Some(glyph) => {
                                let fg = cell.bg.blend(glyph.color, glyph.alpha);
                                let style = style.fg(fg.to_color());
                                let style = if glyph.bold {
                                    style.add_modifier(Modifier::BOLD)
                                } else {
                                    style
                                };
                                Span::styled(glyph.ch.to_string(), style)
                            }
                            None => Span::styled(" ", style),
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// Glyph for a circle of the given pixel radius.
fn circle_glyph(radius: f32) -> char {
    match radius {
        r if r < 1.0 => '·',
        r if r < 1.5 => '+',
        r if r < 2.5 => '*',
        _ => '✦',
    }
}

/// Box-drawing glyph closest to a direction given in cell units.
fn line_glyph(direction: Vec2) -> char {
    use std::f32::consts::PI;

    // Screen y grows downward, so a positive angle slopes down and right.
    let angle = direction.y.atan2(direction.x).rem_euclid(PI);
    match angle {
        a if !(PI / 8.0..PI * 7.0 / 8.0).contains(&a) => '─',
        a if a < PI * 3.0 / 8.0 => '╲',
        a if a < PI * 5.0 / 8.0 => '│',
        _ => '╱',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_canvas() -> CellCanvas {
        CellCanvas::new(10, 5, 8, 16)
    }

    #[test]
    fn test_viewport_in_pixels() {
        let canvas = test_canvas();
        assert_eq!(canvas.viewport(), Viewport::new(80.0, 80.0));
    }

    #[test]
    fn test_cell_at() {
        let canvas = test_canvas();
        assert_eq!(canvas.cell_at(Vec2::new(0.0, 0.0)), Some((0, 0)));
        assert_eq!(canvas.cell_at(Vec2::new(15.9, 16.0)), Some((1, 1)));
        assert_eq!(canvas.cell_at(Vec2::new(80.0, 10.0)), None);
        assert_eq!(canvas.cell_at(Vec2::new(-1.0, 10.0)), None);
        assert_eq!(canvas.cell_at(Vec2::new(f32::NAN, 10.0)), None);
    }

    #[test]
    fn test_fill_rect_paints_covered_cells() {
        let mut canvas = test_canvas();
        canvas.fill_rect(Vec2::ZERO, Vec2::new(16.0, 16.0), Hsla::hsl(0.0, 0.0, 1.0));
        assert_eq!(canvas.background(0, 0), Some(Rgb::new(1.0, 1.0, 1.0)));
        assert_eq!(canvas.background(1, 0), Some(Rgb::new(1.0, 1.0, 1.0)));
        assert_eq!(canvas.background(2, 0), Some(Rgb::BLACK));
        assert_eq!(canvas.background(0, 1), Some(Rgb::BLACK));
    }

    #[test]
    fn test_transparent_gradient_stays_local() {
        let mut canvas = test_canvas();
        let stops = [
            ColorStop::new(0.0, Hsla::new(0.0, 0.0, 1.0, 0.5)),
            ColorStop::new(1.0, Hsla::TRANSPARENT),
        ];
        canvas.radial_gradient(Vec2::new(4.0, 8.0), 12.0, &stops);
        let near = canvas.background(0, 0).unwrap();
        assert!(near.r > 0.1);
        assert_eq!(canvas.background(9, 4), Some(Rgb::BLACK));
    }

    #[test]
    fn test_opaque_gradient_covers_surface() {
        let mut canvas = test_canvas();
        let stops = [
            ColorStop::new(0.0, Hsla::hsl(0.0, 0.0, 1.0)),
            ColorStop::new(1.0, Hsla::hsl(0.0, 0.0, 0.5)),
        ];
        canvas.radial_gradient(Vec2::ZERO, 8.0, &stops);
        let far = canvas.background(9, 4).unwrap();
        assert!((far.r - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_circle_glyph_by_radius() {
        let mut canvas = test_canvas();
        canvas.circle(Vec2::new(4.0, 8.0), 0.5, Hsla::hsl(200.0, 0.5, 0.9));
        canvas.circle(Vec2::new(12.0, 8.0), 2.0, Hsla::hsl(200.0, 0.5, 0.9));
        assert_eq!(canvas.glyph(0, 0), Some('·'));
        assert_eq!(canvas.glyph(1, 0), Some('*'));
    }

    #[test]
    fn test_brighter_glyph_wins() {
        let mut canvas = test_canvas();
        let white = Hsla::hsl(0.0, 0.0, 1.0);
        canvas.circle(Vec2::new(4.0, 8.0), 2.0, white);
        canvas.circle(Vec2::new(5.0, 9.0), 0.5, white.with_alpha(0.2));
        assert_eq!(canvas.glyph(0, 0), Some('*'));
    }

    #[test]
    fn test_gradient_line_direction() {
        let mut canvas = test_canvas();
        let stops = [
            ColorStop::new(0.0, Hsla::hsl(0.0, 0.0, 1.0)),
            ColorStop::new(1.0, Hsla::TRANSPARENT),
        ];
        canvas.gradient_line(Vec2::new(4.0, 8.0), Vec2::new(76.0, 8.0), 2.0, &stops);
        assert_eq!(canvas.glyph(0, 0), Some('─'));
        assert_eq!(canvas.glyph(5, 0), Some('─'));
        assert_eq!(canvas.glyph(0, 1), None);
    }

    #[test]
    fn test_line_glyphs() {
        assert_eq!(line_glyph(Vec2::new(1.0, 0.0)), '─');
        assert_eq!(line_glyph(Vec2::new(-1.0, 0.0)), '─');
        assert_eq!(line_glyph(Vec2::new(1.0, 1.0)), '╲');
        assert_eq!(line_glyph(Vec2::new(-1.0, -1.0)), '╲');
        assert_eq!(line_glyph(Vec2::new(0.0, 1.0)), '│');
        assert_eq!(line_glyph(Vec2::new(1.0, -1.0)), '╱');
        // Shallow slopes on either side of horizontal.
        assert_eq!(line_glyph(Vec2::new(1.0, 0.3)), '─');
        assert_eq!(line_glyph(Vec2::new(-1.0, 0.1)), '─');
        assert_eq!(line_glyph(Vec2::new(1.0, 0.5)), '╲');
    }

    #[test]
    fn test_into_lines_shape() {
        let mut canvas = test_canvas();
        canvas.put_glyph(
            Vec2::new(4.0, 8.0),
            '◆',
            Rgb::new(1.0, 1.0, 1.0),
            1.0,
            true,
        );
        let lines = canvas.into_lines();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|line| line.spans.len() == 10));
        assert_eq!(lines[0].spans[0].content, "◆");
        assert_eq!(lines[0].spans[1].content, " ");
    }
}
