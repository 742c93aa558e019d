use egui::emath::Rot2;
use egui::epaint::Mesh;
use egui::{pos2, Color32, ColorImage, Context, Painter, Pos2, Rect, Shape, TextureHandle, TextureId, TextureOptions, Vec2};
use rustc_hash::FxHashMap;

use crate::sprite::algebra_2d::Vector2D;
use crate::sprite::surface::{DrawStyle, Surface};
use crate::sprite::texture::{Texture, TextureKey};

/// GPU side textures, uploaded once per texture image.
/// Keep it alive across frames.
#[derive(Default)]
pub struct TextureCache {
    handles: FxHashMap<TextureKey, TextureHandle>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texture_id(&mut self, ctx: &Context, texture: &Texture) -> TextureId {
        self.handles
            .entry(texture.key())
            .or_insert_with(|| {
                let image = texture.image();
                let size = [image.width() as usize, image.height() as usize];
                log::debug!("uploading {:?} ({}x{})", texture.key(), size[0], size[1]);
                ctx.load_texture(
                    format!("{:?}", texture.key()),
                    ColorImage::from_rgba_unmultiplied(size, image.as_raw()),
                    TextureOptions::NEAREST,
                )
            })
            .id()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Draws sprites with an egui painter, scaling the world onto the painter's clip rect
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    cache: &'a mut TextureCache,
    world_size: Vec2,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, cache: &'a mut TextureCache, world_size: Vec2) -> Self {
        Self { painter, cache, world_size }
    }

    /// pos / world_size = result / canvas_size
    /// => result = pos * canvas_size / world_size
    fn scale(&self, pos: Vector2D) -> Pos2 {
        let canvas = self.painter.clip_rect();
        canvas.min + self.scale_len(Vec2::from(pos))
    }

    fn scale_len(&self, len: Vec2) -> Vec2 {
        let canvas_size = self.painter.clip_rect().size();
        Vec2::new(
            len.x * canvas_size.x / self.world_size.x,
            len.y * canvas_size.y / self.world_size.y,
        )
    }
}

/// texture coordinates of the region; mirrored/flipped by swapping the uv edges
fn region_uv(texture: &Texture, style: &DrawStyle) -> Rect {
    let image = texture.image();
    let region = texture.region();
    let (w, h) = (image.width() as f32, image.height() as f32);
    let mut uv = Rect::from_min_max(
        pos2(region.x as f32 / w, region.y as f32 / h),
        pos2((region.x + region.width) as f32 / w, (region.y + region.height) as f32 / h),
    );
    if style.mirrored {
        std::mem::swap(&mut uv.min.x, &mut uv.max.x);
    }
    if style.flipped {
        std::mem::swap(&mut uv.min.y, &mut uv.max.y);
    }
    uv
}

impl Surface for PainterSurface<'_> {
    fn draw_image(&mut self, texture: &Texture, center: Vector2D, style: &DrawStyle) {
        if texture.width() <= 0.0 || texture.height() <= 0.0 {
            return;
        }
        let texture_id = self.cache.texture_id(self.painter.ctx(), texture);
        let rect = Rect::from_center_size(
            self.scale(center),
            self.scale_len(Vec2::new(texture.width(), texture.height())),
        );
        let tint = Color32::from_white_alpha((style.opacity.clamp(0.0, 1.0) * 255.0).round() as u8);

        let mut mesh = Mesh::with_texture(texture_id);
        mesh.add_rect_with_uv(rect, region_uv(texture, style), tint);
        if style.angle != 0.0 {
            let rotation = Rot2::from_angle(style.angle.to_radians());
            let origin = rect.center();
            for vertex in mesh.vertices.iter_mut() {
                vertex.pos = origin + rotation * (vertex.pos - origin);
            }
        }
        self.painter.add(Shape::mesh(mesh));
    }
}
