//! ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3};
use prismview_core::scene::{GridLine, GridLineKind};
use prismview_core::{Camera, Lighting, Material, Mesh, Rgb};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f32 = 0.5;

/// Lines are pulled slightly towards the viewer so they win against the
/// surfaces they lie on.
const LINE_DEPTH_BIAS: f32 = 1e-4;

/// Background the terminal is assumed to draw on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Dark,
    Light,
}

impl Background {
    /// Terminal color for a material color, inverting colors that would be
    /// invisible against this background.
    pub fn contrast(self, color: Rgb) -> Color {
        let luminance = color.luminance();
        let visible = match self {
            Background::Dark => luminance > 0.15,
            Background::Light => luminance < 0.85,
        };
        let color = if visible {
            color
        } else {
            Rgb {
                r: 255 - color.r,
                g: 255 - color.g,
                b: 255 - color.b,
            }
        };
        Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    color: Color,
    depth: f32,
}

impl Cell {
    const EMPTY: Cell = Cell {
        character: ' ',
        color: Color::Reset,
        depth: f32::INFINITY,
    };
}

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    background: Background,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width * height],
            background: Background::default(),
        }
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::EMPTY; width * height];
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Character at a cell, mostly for inspection in tests.
    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).map(|cell| cell.character)
    }

    pub fn render_grid(&mut self, lines: &[GridLine], grid_colors: (Rgb, Rgb), camera: &Camera) {
        let identity = Matrix4::identity();
        for line in lines {
            let (character, rgb) = match line.kind {
                GridLineKind::Cell => ('.', grid_colors.0),
                GridLineKind::Section => (':', grid_colors.1),
            };
            let color = self.background.contrast(rgb);
            self.render_line(&line.start, &line.end, &identity, camera, Some(character), color);
        }
    }

    pub fn render_mesh(
        &mut self,
        mesh: &Mesh,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        material: &Material,
        lighting: &Lighting,
    ) {
        if material.wireframe {
            let color = self.background.contrast(material.color);
            for triangle in &mesh.triangles {
                for k in 0..3 {
                    let a = mesh.positions[triangle[k] as usize];
                    let b = mesh.positions[triangle[(k + 1) % 3] as usize];
                    self.render_line(&a, &b, model_matrix, camera, None, color);
                }
            }
        } else {
            for index in 0..mesh.triangle_count() {
                self.render_triangle(mesh, index, model_matrix, camera, material, lighting);
            }
        }
    }

    fn project(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
    ) -> Option<(f32, f32, f32)> {
        camera.project_to_screen(point, model_matrix, self.width as u32, self.height as u32)
    }

    fn render_triangle(
        &mut self,
        mesh: &Mesh,
        index: usize,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        material: &Material,
        lighting: &Lighting,
    ) {
        let corners = mesh.triangle(index);

        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, corner) in screen_coords.iter_mut().zip(&corners) {
            match self.project(corner, model_matrix, camera) {
                Some(projected) => *slot = projected,
                None => return, // Triangle is clipped
            }
        }

        // Shade with the world-space face normal at the face centroid
        let normal = model_matrix.transform_vector(&mesh.triangle_normal(index));
        let centroid = Point3::from((corners[0].coords + corners[1].coords + corners[2].coords) / 3.0);
        let centroid = model_matrix.transform_point(&centroid);
        let brightness = lighting.illuminance(&centroid, &normal) * material.opacity;

        // Map brightness to character
        let ramp_index = (brightness * material.color.luminance() * (LUMINOSITY_RAMP.len() - 1) as f32)
            .round() as usize;
        let character = LUMINOSITY_RAMP[ramp_index.clamp(1, LUMINOSITY_RAMP.len() - 1)];
        let color = self.background.contrast(material.color.scaled(brightness));

        // Rasterize triangle using scanline algorithm
        self.rasterize_triangle(&screen_coords, character, color);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char, color: Color) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        self.plot(x, y, depth, character, color);
                    }
                }
            }
        }
    }

    /// Draw a 3D segment. Without an explicit character the glyph follows the
    /// on-screen slope.
    fn render_line(
        &mut self,
        start: &Point3<f32>,
        end: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        character: Option<char>,
        color: Color,
    ) {
        let (Some(a), Some(b)) = (
            self.project(start, model_matrix, camera),
            self.project(end, model_matrix, camera),
        ) else {
            return;
        };

        let character = character.unwrap_or_else(|| slope_glyph(b.0 - a.0, b.1 - a.1));
        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0) as usize;

        // Skip segments far outside the viewport
        if steps > 8 * (self.width + self.height) {
            return;
        }

        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let x = (a.0 + (b.0 - a.0) * t).floor() as i32;
            let y = (a.1 + (b.1 - a.1) * t).floor() as i32;
            let depth = a.2 + (b.2 - a.2) * t - LINE_DEPTH_BIAS;
            self.plot(x, y, depth, character, color);
        }
    }

    fn plot(&mut self, x: i32, y: i32, depth: f32, character: char, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if depth < self.cells[idx].depth {
            self.cells[idx] = Cell {
                character,
                color,
                depth,
            };
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                writer.queue(SetForegroundColor(cell.color))?;
                writer.queue(Print(cell.character))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn slope_glyph(dx: f32, dy: f32) -> char {
    let (ax, ay) = (dx.abs(), dy.abs() / CELL_ASPECT);
    if ax > 2.0 * ay {
        '-'
    } else if ay > 2.0 * ax {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prismview_core::generate_mesh;
    use prismview_core::scene::SceneConfig;

    fn camera(width: usize, height: usize) -> Camera {
        Camera::from_config(
            &SceneConfig::default().camera,
            width as f32 * CELL_ASPECT / height as f32,
        )
    }

    fn painted(renderer: &AsciiRenderer) -> usize {
        (0..renderer.height())
            .flat_map(|y| (0..renderer.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| renderer.char_at(x, y) != Some(' '))
            .count()
    }

    #[test]
    fn test_barycentric_inside_and_degenerate() {
        let w = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (1.0, 1.0)).unwrap();
        assert!(w.0 >= 0.0 && w.1 >= 0.0 && w.2 >= 0.0);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 1.0)).is_none());
    }

    #[test]
    fn test_solid_mesh_paints_cells() {
        let mut renderer = AsciiRenderer::new(80, 40);
        let mesh = generate_mesh("hexagonal");
        renderer.render_mesh(
            &mesh,
            &Matrix4::identity(),
            &camera(80, 40),
            &Material::SOLID,
            &Lighting::default(),
        );
        assert!(painted(&renderer) > 50);
    }

    #[test]
    fn test_wireframe_paints_fewer_cells_than_solid() {
        let mesh = generate_mesh("rectangular");
        let cam = camera(80, 40);

        let mut solid = AsciiRenderer::new(80, 40);
        solid.render_mesh(&mesh, &Matrix4::identity(), &cam, &Material::SOLID, &Lighting::default());
        let mut wire = AsciiRenderer::new(80, 40);
        wire.render_mesh(&mesh, &Matrix4::identity(), &cam, &Material::WIREFRAME, &Lighting::default());

        assert!(painted(&wire) > 0);
        assert!(painted(&wire) < painted(&solid));
    }

    #[test]
    fn test_clear_resets_cells() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let scene = SceneConfig::default();
        renderer.render_grid(
            &scene.grid.lines(),
            (scene.grid.cell_color, scene.grid.section_color),
            &camera(40, 20),
        );
        assert!(painted(&renderer) > 0);
        renderer.clear();
        assert_eq!(painted(&renderer), 0);
    }

    #[test]
    fn test_contrast_inverts_black_on_dark() {
        assert_eq!(
            Background::Dark.contrast(Rgb::BLACK),
            Color::Rgb { r: 255, g: 255, b: 255 }
        );
        assert_eq!(
            Background::Light.contrast(Rgb::BLACK),
            Color::Rgb { r: 0, g: 0, b: 0 }
        );
    }

    #[test]
    fn test_slope_glyphs() {
        assert_eq!(slope_glyph(10.0, 0.0), '-');
        assert_eq!(slope_glyph(0.0, 10.0), '|');
        assert_eq!(slope_glyph(4.0, 2.0), '\\');
        assert_eq!(slope_glyph(4.0, -2.0), '/');
    }

    #[test]
    fn test_draw_emits_output() {
        let renderer = AsciiRenderer::new(4, 2);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        assert!(!out.is_empty());
    }

    #[test]
    fn test_char_at_out_of_bounds() {
        let renderer = AsciiRenderer::new(10, 4);
        assert_eq!(renderer.char_at(9, 3), Some(' '));
        assert_eq!(renderer.char_at(10, 0), None);
        assert_eq!(renderer.char_at(0, 4), None);
    }
}
