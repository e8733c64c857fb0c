//! Draws the workspace scene onto a cell canvas.

use std::cmp::Ordering;

use glam::{Mat4, Vec2, Vec3};
use skyglow_core::{CameraPose, ColorStop, Hsla, NodeRole, NodeUpdate, SceneFrame, Viewport};
use skyglow_orbit::{LAPTOP_GLOW, SCREEN, orbit::ModuleKind, panels::PanelKind};

use super::{canvas::CellCanvas, color::Rgb};

/// Vertical field of view in degrees.
pub const FOV_Y_DEGREES: f32 = 50.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;

const CYAN: Hsla = Hsla::hsl(188.0, 0.86, 0.53);
const PURPLE: Hsla = Hsla::hsl(271.0, 0.91, 0.65);
const PANEL_FILL: Hsla = Hsla::hsl(214.0, 0.52, 0.11);
const ANCHOR_COLOR: Hsla = Hsla::hsl(210.0, 0.3, 0.85);

/// Panel size in world units.
const PANEL_SIZE: Vec2 = Vec2::new(0.8, 0.5);

/// A point projected onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Position in virtual pixels.
    pub screen: Vec2,
    /// Distance in front of the camera.
    pub depth: f32,
}

/// Perspective projection from world space onto the canvas.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    view_projection: Mat4,
    viewport: Viewport,
    focal: f32,
}

impl Projector {
    pub fn new(camera: &CameraPose, viewport: Viewport) -> Self {
        let fov = FOV_Y_DEGREES.to_radians();
        let aspect = if viewport.is_empty() {
            1.0
        } else {
            viewport.width / viewport.height
        };
        let projection = Mat4::perspective_rh(fov, aspect, NEAR, FAR);
        let view = Mat4::look_at_rh(camera.eye, camera.target, Vec3::Y);
        Self {
            view_projection: projection * view,
            viewport,
            focal: viewport.height * 0.5 / (fov * 0.5).tan(),
        }
    }

    /// Project `p`. Points behind the near plane have no projection.
    pub fn project(&self, p: Vec3) -> Option<Projected> {
        let clip = self.view_projection * p.extend(1.0);
        if clip.w < NEAR {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Projected {
            screen: Vec2::new(
                (ndc.x + 1.0) * 0.5 * self.viewport.width,
                (1.0 - ndc.y) * 0.5 * self.viewport.height,
            ),
            depth: clip.w,
        })
    }

    /// Pixels covered by one world unit at `depth`.
    pub fn pixels_per_unit(&self, depth: f32) -> f32 {
        self.focal / depth.max(NEAR)
    }
}

/// Where a module landed on screen, for mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTarget {
    pub name: &'static str,
    pub column: u16,
    pub row: u16,
}

/// Name of the module drawn nearest to a cell, if any is close enough.
pub fn hit_test(targets: &[HitTarget], column: u16, row: u16) -> Option<&'static str> {
    targets
        .iter()
        .filter(|t| t.column.abs_diff(column) <= 2 && t.row.abs_diff(row) <= 1)
        .min_by_key(|t| t.column.abs_diff(column) + t.row.abs_diff(row) * 2)
        .map(|t| t.name)
}

fn module_kind(name: &str) -> Option<(usize, ModuleKind)> {
    ModuleKind::ALL
        .iter()
        .copied()
        .enumerate()
        .find(|(_, kind)| kind.name() == name)
}

fn module_glyph(kind: ModuleKind) -> char {
    match kind {
        ModuleKind::Frontend => '▣',
        ModuleKind::Backend => '◉',
        ModuleKind::Database => '≡',
        ModuleKind::AuthSecurity => '◎',
        ModuleKind::CloudStorage => '⌂',
        ModuleKind::DataRecovery => '◍',
    }
}

fn panel_glyph(name: &str) -> char {
    match PanelKind::ALL.iter().find(|kind| kind.name() == name) {
        Some(PanelKind::Analytics) => '▄',
        Some(PanelKind::CodeReview) => '±',
        Some(PanelKind::Wireframe) => '▭',
        Some(PanelKind::Content) => '≣',
        Some(PanelKind::Design) => '◆',
        None => '▪',
    }
}

/// Brightness falloff with distance from the camera.
fn depth_fade(depth: f32) -> f32 {
    (1.6 - depth / 12.0).clamp(0.35, 1.0)
}

/// Draw `frame` at `t` seconds. Returns the screen cells of every visible module.
pub fn draw_scene(canvas: &mut CellCanvas, frame: &SceneFrame, t: f32) -> Vec<HitTarget> {
    let viewport = canvas.viewport();
    if viewport.is_empty() {
        return Vec::new();
    }
    let projector = Projector::new(&frame.camera, viewport);

    for light in &frame.lights {
        let Some(at) = projector.project(light.position) else {
            continue;
        };
        let unit = projector.pixels_per_unit(at.depth);
        if light.name == LAPTOP_GLOW {
            let stops = [
                ColorStop::new(0.0, CYAN.with_alpha(0.18 * light.intensity)),
                ColorStop::new(1.0, Hsla::TRANSPARENT),
            ];
            canvas.radial_gradient(at.screen, unit * 1.2, &stops);
        } else if light.name == SCREEN {
            canvas.put_glyph(
                at.screen,
                '▬',
                Rgb::from(CYAN).scale(0.6 + light.intensity),
                1.0,
                false,
            );
        } else if let Some((index, _)) =
            light.name.strip_suffix("/glow").and_then(module_kind)
        {
            let color = module_color(index);
            let stops = [
                ColorStop::new(0.0, color.with_alpha(0.15 * light.intensity)),
                ColorStop::new(1.0, Hsla::TRANSPARENT),
            ];
            canvas.radial_gradient(at.screen, unit * 0.75, &stops);
        }
    }

    let mut nodes: Vec<(&NodeUpdate, Projected)> = frame
        .nodes
        .iter()
        .filter_map(|node| projector.project(node.position).map(|p| (node, p)))
        .collect();
    // Far to near
    nodes.sort_by(|a, b| b.1.depth.partial_cmp(&a.1.depth).unwrap_or(Ordering::Equal));

    let mut targets = Vec::new();
    for (node, at) in nodes {
        let fade = depth_fade(at.depth);
        match node.role {
            NodeRole::Anchor => {
                canvas.put_glyph(
                    at.screen,
                    '◆',
                    Rgb::from(ANCHOR_COLOR).scale(fade * node.scale),
                    1.0,
                    true,
                );
            }
            NodeRole::Module => {
                let Some((index, kind)) = module_kind(node.name) else {
                    continue;
                };
                // Spin shows as a slow shimmer.
                let shimmer = 0.9 + node.rotation.length().sin() * 0.1;
                let brightness = (shimmer + kind.accent(t)) * fade * node.scale;
                let hovered = node.scale > 1.05;
                canvas.put_glyph(
                    at.screen,
                    module_glyph(kind),
                    Rgb::from(module_color(index)).scale(brightness),
                    1.0,
                    hovered,
                );
                if let Some((column, row)) = canvas.cell_at(at.screen) {
                    targets.push(HitTarget {
                        name: node.name,
                        column,
                        row,
                    });
                }
            }
            NodeRole::Panel => {
                let size = PANEL_SIZE * projector.pixels_per_unit(at.depth);
                draw_panel(canvas, at.screen, size, node, fade);
            }
            NodeRole::Pulse => {
                let half = 1.5 * node.scale * projector.pixels_per_unit(at.depth);
                let stops = [
                    ColorStop::new(0.0, Hsla::TRANSPARENT),
                    ColorStop::new(0.5, CYAN.with_alpha(node.opacity)),
                    ColorStop::new(1.0, Hsla::TRANSPARENT),
                ];
                canvas.gradient_line(
                    at.screen - Vec2::new(half, 0.0),
                    at.screen + Vec2::new(half, 0.0),
                    2.0,
                    &stops,
                );
            }
        }
    }
    targets
}

fn module_color(index: usize) -> Hsla {
    if index.is_multiple_of(2) { CYAN } else { PURPLE }
}

/// A translucent box with a border and a content glyph in the middle.
fn draw_panel(
    canvas: &mut CellCanvas,
    center: Vec2,
    size: Vec2,
    node: &NodeUpdate,
    fade: f32,
) {
    let alpha = node.opacity.clamp(0.0, 1.0);
    let origin = center - size * 0.5;
    canvas.fill_rect(origin, size, PANEL_FILL.with_alpha(0.7 * alpha));

    let border = Rgb::from(CYAN).scale(fade);
    let corners = [
        (origin, '┌'),
        (Vec2::new(origin.x + size.x, origin.y), '┐'),
        (Vec2::new(origin.x, origin.y + size.y), '└'),
        (origin + size, '┘'),
    ];
    for (p, ch) in corners {
        canvas.put_glyph(p, ch, border, 0.5 * alpha, false);
    }
    canvas.put_glyph(
        center,
        panel_glyph(node.name),
        Rgb::from(PURPLE).scale(fade),
        alpha,
        false,
    );
}

#[cfg(test)]
mod tests {
    use skyglow_orbit::{
        WorkspaceState,
        camera::{LOOK_AT, camera_pose},
    };

    use super::*;

    #[test]
    fn test_look_at_target_projects_to_center() {
        let viewport = Viewport::new(800.0, 480.0);
        let projector = Projector::new(&camera_pose(0.0), viewport);
        let at = projector.project(LOOK_AT).unwrap();
        assert!((at.screen - Vec2::new(400.0, 240.0)).length() < 1e-2);
        let distance = camera_pose(0.0).eye.distance(LOOK_AT);
        assert!((at.depth - distance).abs() < 1e-3);
    }

    #[test]
    fn test_points_behind_camera_are_dropped() {
        let projector = Projector::new(&camera_pose(0.0), Viewport::new(800.0, 480.0));
        assert!(projector.project(Vec3::new(0.0, 2.5, 20.0)).is_none());
    }

    #[test]
    fn test_higher_points_project_higher() {
        let projector = Projector::new(&camera_pose(0.0), Viewport::new(800.0, 480.0));
        let low = projector.project(Vec3::new(0.0, 0.0, 0.0)).unwrap();
        let high = projector.project(Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert!(high.screen.y < low.screen.y);
    }

    #[test]
    fn test_hit_test() {
        let targets = [
            HitTarget {
                name: "frontend",
                column: 10,
                row: 5,
            },
            HitTarget {
                name: "backend",
                column: 14,
                row: 5,
            },
        ];
        assert_eq!(hit_test(&targets, 10, 5), Some("frontend"));
        assert_eq!(hit_test(&targets, 12, 6), Some("frontend"));
        assert_eq!(hit_test(&targets, 15, 4), Some("backend"));
        assert_eq!(hit_test(&targets, 30, 5), None);
    }

    #[test]
    fn test_draw_scene_targets_modules() {
        let mut workspace = WorkspaceState::new();
        let frame = workspace.frame(0.0);
        let mut canvas = CellCanvas::new(120, 40, 8, 16);
        let targets = draw_scene(&mut canvas, &frame, 0.0);
        assert_eq!(targets.len(), ModuleKind::ALL.len());
        let frontend = targets.iter().find(|t| t.name == "frontend").unwrap();
        assert_eq!(canvas.glyph(frontend.column, frontend.row), Some('▣'));
    }

    #[test]
    fn test_draw_scene_on_empty_canvas() {
        let mut workspace = WorkspaceState::new();
        let frame = workspace.frame(1.0);
        let mut canvas = CellCanvas::new(0, 0, 8, 16);
        assert!(draw_scene(&mut canvas, &frame, 1.0).is_empty());
    }
}
