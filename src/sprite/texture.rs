use std::fmt::{Debug, Formatter};
use std::path::Path;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use image::{GenericImageView, RgbaImage, SubImage};

static NEXT_TEXTURE_KEY: AtomicU64 = AtomicU64::new(1);

/// Identity of the image behind a texture; clones share it
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TextureKey(u64);

/// Pixel rectangle within the texture image. TOP / LEFT corner is 0/0
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// An image plus the region of it, which gets drawn.
///
/// Cloning is cheap; the pixels are shared.
#[derive(Clone)]
pub struct Texture {
    key: TextureKey,
    image: Rc<RgbaImage>,
    region: Region,
}

impl Texture {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("failed to load texture from {}", path.display()))?
            .into_rgba8();
        log::debug!("loaded texture {} ({}x{})", path.display(), image.width(), image.height());
        Ok(Self::from_image(image))
    }

    pub fn from_image(image: RgbaImage) -> Self {
        let region = Region {
            x: 0,
            y: 0,
            width: image.width(),
            height: image.height(),
        };
        Self {
            key: TextureKey(NEXT_TEXTURE_KEY.fetch_add(1, Ordering::Relaxed)),
            image: Rc::new(image),
            region,
        }
    }

    pub fn key(&self) -> TextureKey {
        self.key
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// width of the drawn region
    pub fn width(&self) -> f32 {
        self.region.width as f32
    }

    /// height of the drawn region
    pub fn height(&self) -> f32 {
        self.region.height as f32
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Select the part of the image to draw (e.g. one cell of a sprite sheet).
    /// The region is cut off at the image bounds.
    pub fn set_region(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let x = x.min(self.image.width());
        let y = y.min(self.image.height());
        self.region = Region {
            x,
            y,
            width: width.min(self.image.width() - x),
            height: height.min(self.image.height() - y),
        };
    }

    /// the pixels of the drawn region
    pub fn region_view(&self) -> SubImage<&RgbaImage> {
        self.image.view(self.region.x, self.region.y, self.region.width, self.region.height)
    }
}

impl Debug for Texture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("key", &self.key)
            .field("image_size", &self.image.dimensions())
            .field("region", &self.region)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn checkerboard(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| match (x + y) % 2 {
            0 => Rgba([255, 255, 255, 255]),
            _ => Rgba([0, 0, 0, 255]),
        })
    }

    #[test]
    fn size_is_reported_without_transposition() {
        let texture = Texture::from_image(checkerboard(30, 10));
        assert_eq!((texture.width(), texture.height()), (30.0, 10.0));
    }

    #[test]
    fn region_is_clamped_to_the_image() {
        let mut texture = Texture::from_image(checkerboard(16, 8));
        texture.set_region(8, 4, 16, 16);
        assert_eq!(texture.region(), Region { x: 8, y: 4, width: 8, height: 4 });
        assert_eq!((texture.width(), texture.height()), (8.0, 4.0));
        assert_eq!(texture.region_view().dimensions(), (8, 4));

        texture.set_region(20, 20, 1, 1);
        assert_eq!((texture.width(), texture.height()), (0.0, 0.0));
    }

    #[test]
    fn clones_share_the_key_but_new_textures_do_not() {
        let a = Texture::from_image(checkerboard(2, 2));
        let b = a.clone();
        let c = Texture::from_image(checkerboard(2, 2));
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn load_reports_missing_file() {
        let error = Texture::load("does/not/exist.png").unwrap_err();
        assert!(error.to_string().contains("does/not/exist.png"));
    }
}
