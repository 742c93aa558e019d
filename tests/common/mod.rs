#![allow(dead_code)]

use image::{Rgba, RgbaImage};

use sprite_kit::prelude::{DrawStyle, Surface, Texture, Vector2D};
use sprite_kit::sprite::texture::TextureKey;

#[ctor::ctor]
fn init_test_logging() {
    let _ = env_logger::builder()
        .format_timestamp_secs()
        .filter_level(log::LevelFilter::Debug)
        .parse_default_env()
        .is_test(true)
        .try_init();
}

/// remembers every draw call in order
#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<(TextureKey, Vector2D)>,
}

impl Surface for RecordingSurface {
    fn draw_image(&mut self, texture: &Texture, center: Vector2D, _style: &DrawStyle) {
        self.calls.push((texture.key(), center));
    }
}

pub fn solid_texture(width: u32, height: u32, color: Rgba<u8>) -> Texture {
    Texture::from_image(RgbaImage::from_pixel(width, height, color))
}
