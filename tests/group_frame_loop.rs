use image::Rgba;

use common::{solid_texture, RecordingSurface};
use sprite_kit::prelude::*;

mod common;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

fn textured_object(texture: Texture, x: f32, y: f32) -> GameObject {
    let mut object = GameObject::new();
    object.set_texture(texture);
    object.set_position(x, y);
    object
}

#[test]
fn group_draws_in_insertion_order() {
    let a = solid_texture(4, 4, RED);
    let b = solid_texture(4, 4, GREEN);
    let (a_key, b_key) = (a.key(), b.key());

    let mut group = ObjectGroup::new();
    group.add(textured_object(a, 10.0, 10.0));
    group.add(textured_object(b, 20.0, 20.0));

    let mut surface = RecordingSurface::default();
    group.draw(&mut surface);
    assert_eq!(
        surface.calls,
        vec![(a_key, Vector2D::new(10.0, 10.0)), (b_key, Vector2D::new(20.0, 20.0))]
    );
}

#[test]
fn later_members_paint_on_top() {
    let mut group = ObjectGroup::new();
    group.add(textured_object(solid_texture(4, 4, RED), 5.0, 5.0));
    group.add(textured_object(solid_texture(2, 2, GREEN), 6.0, 6.0));

    let mut surface = FrameSurface::new(10, 10);
    surface.clear(BLACK);
    group.draw(&mut surface);
    let frame = surface.into_frame();
    assert_eq!(*frame.get_pixel(3, 3), RED);
    assert_eq!(*frame.get_pixel(5, 5), GREEN);
    assert_eq!(*frame.get_pixel(6, 6), GREEN);
    assert_eq!(*frame.get_pixel(8, 8), BLACK);
}

#[test]
fn frame_loop_moves_wraps_and_destroys() -> Result<(), SpriteError> {
    let mut group = ObjectGroup::new();

    // accelerating ship, kept on screen
    let mut ship = textured_object(solid_texture(10, 10, RED), 50.0, 50.0);
    ship.set_physics(400.0, 100.0, 50.0);
    ship.set_bound_zone(100.0, 100.0);
    let ship = group.add(ship);

    // drifting rock, wrapping around
    let mut rock = textured_object(solid_texture(10, 10, GREEN), 95.0, 50.0);
    rock.set_physics(0.0, 100.0, 0.0);
    rock.physics_mut().unwrap().set_velocity(100.0, 0.0);
    rock.set_wrap_zone(100.0, 100.0);
    let rock = group.add(rock);

    // bullet, gone once off screen
    let mut bullet = textured_object(solid_texture(2, 2, RED), 50.0, 5.0);
    bullet.set_physics(0.0, 200.0, 0.0);
    bullet.physics_mut().unwrap().set_velocity(0.0, - 200.0);
    bullet.set_destroy_zone(100.0, 100.0);
    let bullet = group.add(bullet);

    for _ in 0..10 {
        group.get_mut(ship).unwrap().physics_mut().unwrap().accelerate_at_angle(0.0)?;
        group.update(0.1)?;
    }

    let ship = group.get(ship).unwrap();
    assert_eq!(ship.position().x, 95.0, "ship stopped at the right edge");
    assert_eq!(ship.physics().unwrap().acceleration(), Vector2D::default());

    let rock = group.get(rock).unwrap();
    assert!(rock.position().x >= - 5.0 && rock.position().x <= 105.0, "rock x = {}", rock.position().x);

    assert!(!group.contains(bullet));
    assert_eq!(group.count(), 2);
    Ok(())
}

#[test]
fn texture_round_trips_through_a_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sprite.png");
    image::RgbaImage::from_pixel(12, 6, GREEN).save(&path)?;

    let texture = Texture::load(&path)?;
    assert_eq!((texture.width(), texture.height()), (12.0, 6.0));

    let mut object = GameObject::new();
    object.set_texture(texture);
    assert_eq!(object.bounding_box().width(), 12.0);
    assert_eq!(object.bounding_box().height(), 6.0);
    Ok(())
}
