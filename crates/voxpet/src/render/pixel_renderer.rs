//! CPU-based pixel buffer renderer
//!
//! Rasterizes flat-shaded boxes and triangles into an RGBA buffer with a
//! depth buffer, without GPU dependencies.

use glam::{Mat4, Vec3, Vec4};
use voxpet_creature::{Color, WorldBox};

/// Direction light comes from (normalized at use)
const LIGHT_DIR: Vec3 = Vec3::new(0.5, 1.0, 0.3);
const AMBIENT: f32 = 0.55;
const DIFFUSE: f32 = 0.45;

/// Unit cube corners, centred on the origin
const CUBE_CORNERS: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
];

/// Cube faces as corner indices
const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 3, 2, 1], // -Z
    [4, 5, 6, 7], // +Z
    [0, 4, 7, 3], // -X
    [1, 2, 6, 5], // +X
    [0, 1, 5, 4], // -Y
    [3, 7, 6, 2], // +Y
];

/// Camera matrices needed to rasterize one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameCamera {
    pub view_projection: Mat4,
    pub eye: Vec3,
}

/// CPU renderer that outputs to a pixel buffer
pub struct PixelRenderer {
    /// Width of the viewport in pixels
    pub width: usize,
    /// Height of the viewport in pixels
    pub height: usize,
    /// RGBA pixel buffer (4 bytes per pixel)
    pub buffer: Vec<u8>,
    depth: Vec<f32>,
    /// Keep the last frame readable after `present`
    preserve_drawing_buffer: bool,
}

impl PixelRenderer {
    pub fn new(width: usize, height: usize, preserve_drawing_buffer: bool) -> Self {
        Self {
            width,
            height,
            buffer: vec![0u8; width * height * 4],
            depth: vec![f32::INFINITY; width * height],
            preserve_drawing_buffer,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.buffer = vec![0u8; width * height * 4];
        self.depth = vec![f32::INFINITY; width * height];
    }

    pub fn preserves_drawing_buffer(&self) -> bool {
        self.preserve_drawing_buffer
    }

    /// Fill with a solid colour and reset depth
    pub fn clear(&mut self, color: Color) {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
        self.depth.fill(f32::INFINITY);
    }

    /// Hand the frame to the display; without a preserved drawing buffer
    /// the pixels are gone afterwards
    pub fn present(&mut self) {
        if !self.preserve_drawing_buffer {
            self.buffer.fill(0);
            self.depth.fill(f32::INFINITY);
        }
    }

    /// Free the pixel storage
    pub fn release(&mut self) {
        self.width = 0;
        self.height = 0;
        self.buffer = Vec::new();
        self.depth = Vec::new();
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut color = [0u8; 4];
        color.copy_from_slice(&self.buffer[idx..idx + 4]);
        Some(color)
    }

    /// Set a single pixel at screen coordinates
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let idx = (y as usize * self.width + x as usize) * 4;
            self.buffer[idx..idx + 4].copy_from_slice(&color);
        }
    }

    /// Draw one box with flat shading and back-face culling
    pub fn draw_box(&mut self, camera: &FrameCamera, world_box: &WorldBox) {
        let corners = CUBE_CORNERS.map(|c| world_box.transform.transform_point3(c));
        let center = world_box.transform.transform_point3(Vec3::ZERO);

        for face in CUBE_FACES {
            let quad = face.map(|i| corners[i]);
            let face_center = (quad[0] + quad[1] + quad[2] + quad[3]) * 0.25;
            let normal = (face_center - center).normalize_or_zero();
            if normal.dot(camera.eye - face_center) <= 0.0 {
                continue;
            }
            let color = shade(world_box.color, normal);
            self.draw_triangle(camera, [quad[0], quad[1], quad[2]], color);
            self.draw_triangle(camera, [quad[0], quad[2], quad[3]], color);
        }
    }

    /// Rasterize a world-space triangle in a single colour
    ///
    /// Translucent colours blend over what is already drawn and leave depth
    /// untouched. Triangles reaching behind the near plane are skipped.
    pub fn draw_triangle(&mut self, camera: &FrameCamera, tri: [Vec3; 3], color: Color) {
        let mut screen = [Vec3::ZERO; 3];
        for (out, p) in screen.iter_mut().zip(tri) {
            let clip = camera.view_projection * Vec4::new(p.x, p.y, p.z, 1.0);
            if clip.w <= 1e-4 {
                return;
            }
            let ndc = clip.truncate() / clip.w;
            *out = Vec3::new(
                (ndc.x + 1.0) * 0.5 * self.width as f32,
                (1.0 - ndc.y) * 0.5 * self.height as f32,
                ndc.z,
            );
        }

        let [a, b, c] = screen;
        let area = edge(a, b, c);
        if area.abs() < 1e-8 {
            return;
        }

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as usize;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as usize;
        let max_x = (a.x.max(b.x).max(c.x).ceil() as i64).min(self.width as i64 - 1);
        let max_y = (a.y.max(b.y).max(c.y).ceil() as i64).min(self.height as i64 - 1);
        if max_x < 0 || max_y < 0 {
            return;
        }

        let opaque = color[3] == u8::MAX;
        for y in min_y..=max_y as usize {
            for x in min_x..=max_x as usize {
                let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);
                let w0 = edge(b, c, p) / area;
                let w1 = edge(c, a, p) / area;
                let w2 = edge(a, b, p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let z = w0 * a.z + w1 * b.z + w2 * c.z;
                let di = y * self.width + x;
                if z >= self.depth[di] {
                    continue;
                }
                let idx = di * 4;
                if opaque {
                    self.depth[di] = z;
                    self.buffer[idx..idx + 4].copy_from_slice(&color);
                } else {
                    blend(&mut self.buffer[idx..idx + 4], color);
                }
            }
        }
    }
}

/// Signed area of the parallelogram (a, b, p) in screen space
fn edge(a: Vec3, b: Vec3, p: Vec3) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Lambert shading with an ambient floor
pub fn shade(color: Color, normal: Vec3) -> Color {
    let light = AMBIENT + DIFFUSE * normal.dot(LIGHT_DIR.normalize()).max(0.0);
    [
        (color[0] as f32 * light).min(255.0) as u8,
        (color[1] as f32 * light).min(255.0) as u8,
        (color[2] as f32 * light).min(255.0) as u8,
        color[3],
    ]
}

/// Source-over blend of `src` onto an RGBA pixel
fn blend(dst: &mut [u8], src: Color) {
    let alpha = src[3] as f32 / 255.0;
    for i in 0..3 {
        dst[i] = (src[i] as f32 * alpha + dst[i] as f32 * (1.0 - alpha)).round() as u8;
    }
    dst[3] = u8::MAX;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Affine3A, Quat};
    use voxpet_core::PerspectiveCamera;

    fn camera() -> FrameCamera {
        let camera = PerspectiveCamera::default();
        FrameCamera {
            view_projection: camera.view_projection(),
            eye: camera.eye,
        }
    }

    fn centre(renderer: &PixelRenderer) -> Color {
        renderer
            .pixel(renderer.width / 2, renderer.height / 2)
            .expect("in bounds")
    }

    #[test]
    fn test_box_at_origin_covers_centre() {
        let mut renderer = PixelRenderer::new(64, 64, true);
        renderer.clear([0, 0, 0, 255]);
        renderer.draw_box(
            &camera(),
            &WorldBox {
                transform: Affine3A::from_scale_rotation_translation(
                    Vec3::splat(4.0),
                    Quat::IDENTITY,
                    Vec3::ZERO,
                ),
                color: [200, 100, 50, 255],
            },
        );
        let pixel = centre(&renderer);
        assert_ne!(pixel, [0, 0, 0, 255]);
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn test_nearer_box_wins_depth_test() {
        let mut renderer = PixelRenderer::new(64, 64, true);
        renderer.clear([0, 0, 0, 255]);
        let near = WorldBox {
            transform: Affine3A::from_scale_rotation_translation(
                Vec3::splat(2.0),
                Quat::IDENTITY,
                Vec3::new(0.0, 4.0, 4.0),
            ),
            color: [255, 0, 0, 255],
        };
        let far = WorldBox {
            transform: Affine3A::from_scale_rotation_translation(
                Vec3::splat(6.0),
                Quat::IDENTITY,
                Vec3::ZERO,
            ),
            color: [0, 0, 255, 255],
        };
        renderer.draw_box(&camera(), &near);
        renderer.draw_box(&camera(), &far);
        let pixel = centre(&renderer);
        assert!(pixel[0] > 0 && pixel[2] == 0, "got {:?}", pixel);
    }

    #[test]
    fn test_translucent_blends() {
        let mut renderer = PixelRenderer::new(4, 4, true);
        renderer.clear([0, 0, 0, 255]);
        let mut px = [0u8, 0, 0, 255];
        blend(&mut px, [255, 255, 255, 128]);
        assert!(px[0] > 120 && px[0] < 135);
    }

    #[test]
    fn test_present_discards_unless_preserved() {
        let mut kept = PixelRenderer::new(2, 2, true);
        kept.clear([10, 20, 30, 255]);
        kept.present();
        assert_eq!(kept.pixel(0, 0), Some([10, 20, 30, 255]));

        let mut lost = PixelRenderer::new(2, 2, false);
        lost.clear([10, 20, 30, 255]);
        lost.present();
        assert_eq!(lost.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_shade_keeps_alpha_and_darkens_underside() {
        let top = shade([200, 200, 200, 77], Vec3::Y);
        let bottom = shade([200, 200, 200, 77], Vec3::NEG_Y);
        assert_eq!(top[3], 77);
        assert!(top[0] > bottom[0]);
    }
}
