pub mod algebra_2d;
pub mod app_surface;
pub mod clock;
pub mod error;
pub mod game_object;
pub mod group;
pub mod physics;
pub mod surface;
pub mod texture;
