use image::{imageops, Rgba, RgbaImage};

use crate::sprite::algebra_2d::Vector2D;
use crate::sprite::texture::Texture;

/// How a sprite wants its texture to be drawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawStyle {
    /// degrees, clockwise
    pub angle: f32,
    /// 0.0 = invisible .. 1.0 = opaque
    pub opacity: f32,
    /// mirrored left/right
    pub mirrored: bool,
    /// flipped upside down
    pub flipped: bool,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            angle: 0.0,
            opacity: 1.0,
            mirrored: false,
            flipped: false,
        }
    }
}

/// Something sprites can be drawn on
pub trait Surface {
    /// Draw the texture's region with its center at `center` (world units).
    fn draw_image(&mut self, texture: &Texture, center: Vector2D, style: &DrawStyle);
}

/// Headless surface, which renders into an RGBA frame (1 world unit = 1 pixel).
///
/// Rotation is not supported here; `DrawStyle::angle` is ignored.
pub struct FrameSurface {
    frame: RgbaImage,
}

impl FrameSurface {
    pub fn new(frame_size_x: u32, frame_size_y: u32) -> Self {
        Self {
            frame: RgbaImage::new(frame_size_x, frame_size_y),
        }
    }

    pub fn clear(&mut self, color: Rgba<u8>) {
        for pixel in self.frame.pixels_mut() {
            *pixel = color;
        }
    }

    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    pub fn into_frame(self) -> RgbaImage {
        self.frame
    }
}

impl Surface for FrameSurface {
    fn draw_image(&mut self, texture: &Texture, center: Vector2D, style: &DrawStyle) {
        let mut sprite = texture.region_view().to_image();
        if style.mirrored {
            imageops::flip_horizontal_in_place(&mut sprite);
        }
        if style.flipped {
            imageops::flip_vertical_in_place(&mut sprite);
        }
        let opacity = style.opacity.clamp(0.0, 1.0);
        if opacity < 1.0 {
            for pixel in sprite.pixels_mut() {
                pixel.0[3] = (pixel.0[3] as f32 * opacity).round() as u8;
            }
        }
        let left = (center.x - texture.width() / 2.0).round() as i64;
        let top = (center.y - texture.height() / 2.0).round() as i64;
        log::trace!("blit {:?} at {left}/{top}", texture.key());
        imageops::overlay(&mut self.frame, &sprite, left, top);
    }
}
