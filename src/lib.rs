pub mod sprite;
pub mod util;

pub mod prelude {
    pub use crate::sprite::algebra_2d::{Aabb, SharedVector, Vector2D};
    pub use crate::sprite::clock::Clock;
    pub use crate::sprite::error::SpriteError;
    pub use crate::sprite::game_object::{GameObject, ObjectId, ZonePolicy};
    pub use crate::sprite::group::{GroupId, ObjectGroup};
    pub use crate::sprite::physics::KinematicBody;
    pub use crate::sprite::surface::{DrawStyle, FrameSurface, Surface};
    pub use crate::sprite::texture::Texture;
}

#[cfg(test)]
#[ctor::ctor]
fn init() {
    use log::LevelFilter;
    let _ = env_logger::builder()
        .format_timestamp_secs()
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .is_test(true)
        .try_init();
}
