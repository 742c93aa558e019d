use eframe::glow;
use egui::{Context, Id, LayerId, Order, Vec2};
use image::{Rgba, RgbaImage};
use rand::Rng;

use sprite_kit::prelude::*;
use sprite_kit::sprite::app_surface::{PainterSurface, TextureCache};
use sprite_kit::util::init_logging;

/// TOP / LEFT corner is 0/0
const WORLD_LEN_X: f32 = 800.0;
const WORLD_LEN_Y: f32 = 600.0;

/// longest frame time fed into the simulation (e.g. after the window was dragged)
const MAX_DELTA_TIME: f32 = 0.1;

const SHIP_EDGE_LEN: u32 = 32;
const SHIP_ACCEL_PER_SECOND: f32 = 400.0;
const SHIP_MAX_SPEED_PER_SECOND: f32 = 250.0;
/// slow down if not accelerated
const SHIP_SLOW_DOWN_ACCEL_PER_SECOND: f32 = 150.0;
const SHIP_TURN_DEGREES_PER_SECOND: f32 = 180.0;

const ROCK_COUNT: usize = 6;
const ROCK_EDGE_LEN: u32 = 48;
const ROCK_MIN_SPEED_PER_SECOND: f32 = 40.0;
const ROCK_MAX_SPEED_PER_SECOND: f32 = 120.0;

const BULLET_EDGE_LEN: u32 = 6;
const BULLET_SPEED_PER_SECOND: f32 = 500.0;

#[derive(Copy, Clone, PartialEq, Eq)]
enum ShipControl {
    None,
    TurnLeft,
    TurnRight,
}

#[derive(Copy, Clone)]
struct PlayerInput {
    control: ShipControl,
    thrust: bool,
    fire: bool,
    exit: bool,
}

struct Textures {
    ship: Texture,
    rock: Texture,
    bullet: Texture,
}

impl Textures {
    fn generate() -> Self {
        // ship: arrow pointing to the right (angle 0)
        let ship = RgbaImage::from_fn(SHIP_EDGE_LEN, SHIP_EDGE_LEN, |x, y| {
            let half = SHIP_EDGE_LEN as i32 / 2;
            let dy = (y as i32 - half).abs();
            if dy <= (SHIP_EDGE_LEN as i32 - x as i32) / 2 {
                Rgba([230, 230, 255, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let rock = RgbaImage::from_fn(ROCK_EDGE_LEN, ROCK_EDGE_LEN, |x, y| {
            let r = ROCK_EDGE_LEN as f32 / 2.0;
            let (dx, dy) = (x as f32 + 0.5 - r, y as f32 + 0.5 - r);
            if dx * dx + dy * dy <= r * r {
                Rgba([140, 120, 100, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let bullet = RgbaImage::from_pixel(BULLET_EDGE_LEN, BULLET_EDGE_LEN, Rgba([255, 220, 0, 255]));
        Self {
            ship: Texture::from_image(ship),
            rock: Texture::from_image(rock),
            bullet: Texture::from_image(bullet),
        }
    }
}

pub struct SpriteDemoApp {
    clock: Clock,
    textures: Textures,
    texture_cache: TextureCache,
    sprites: ObjectGroup,
    ship: ObjectId,
    rocks: Vec<ObjectId>,
    bullets: Vec<ObjectId>,
    score: u32,
}

impl SpriteDemoApp {
    pub fn new() -> Result<Self, SpriteError> {
        let textures = Textures::generate();
        let mut sprites = ObjectGroup::new();

        let mut rocks = Vec::with_capacity(ROCK_COUNT);
        for _ in 0..ROCK_COUNT {
            rocks.push(sprites.add(Self::create_rock(&textures)?));
        }

        let mut ship = GameObject::new();
        ship.set_texture(textures.ship.clone());
        ship.set_position(WORLD_LEN_X / 2.0, WORLD_LEN_Y / 2.0);
        ship.set_angle(-90.0);
        ship.set_physics(SHIP_ACCEL_PER_SECOND, SHIP_MAX_SPEED_PER_SECOND, SHIP_SLOW_DOWN_ACCEL_PER_SECOND);
        ship.set_bound_zone(WORLD_LEN_X, WORLD_LEN_Y);
        let ship = sprites.add(ship);

        Ok(Self {
            clock: Clock::new(),
            textures,
            texture_cache: TextureCache::new(),
            sprites,
            ship,
            rocks,
            bullets: vec![],
            score: 0,
        })
    }

    fn create_rock(textures: &Textures) -> Result<GameObject, SpriteError> {
        let mut rng = rand::thread_rng();
        let mut rock = GameObject::new();
        rock.set_texture(textures.rock.clone());
        rock.set_position(rng.gen_range(0.0..WORLD_LEN_X), rng.gen_range(0.0..WORLD_LEN_Y * 0.25));
        rock.set_physics(0.0, ROCK_MAX_SPEED_PER_SECOND, 0.0);
        if let Some(body) = rock.physics_mut() {
            body.set_speed(rng.gen_range(ROCK_MIN_SPEED_PER_SECOND..ROCK_MAX_SPEED_PER_SECOND))?;
            body.set_motion_angle(rng.gen_range(0.0..360.0));
        }
        rock.set_wrap_zone(WORLD_LEN_X, WORLD_LEN_Y);
        Ok(rock)
    }

    fn read_ui_control(&self, ctx: &Context) -> PlayerInput {
        let control = if ctx.input(|i| i.key_down(egui::Key::ArrowLeft) && !i.key_down(egui::Key::ArrowRight)) {
            ShipControl::TurnLeft
        } else if ctx.input(|i| i.key_down(egui::Key::ArrowRight) && !i.key_down(egui::Key::ArrowLeft)) {
            ShipControl::TurnRight
        } else {
            ShipControl::None
        };
        PlayerInput {
            control,
            thrust: ctx.input(|i| i.key_down(egui::Key::ArrowUp)),
            fire: ctx.input(|i| i.key_pressed(egui::Key::Space)),
            exit: ctx.input(|i| i.key_down(egui::Key::Escape)),
        }
    }

    /// one frame of game mechanics
    fn time_step(&mut self, input: PlayerInput) -> Result<(), SpriteError> {
        self.clock.update();
        let dt = self.clock.delta_time().min(MAX_DELTA_TIME);

        if let Some(ship) = self.sprites.get_mut(self.ship) {
            match input.control {
                ShipControl::None => {}
                ShipControl::TurnLeft => ship.rotate_by(-SHIP_TURN_DEGREES_PER_SECOND * dt),
                ShipControl::TurnRight => ship.rotate_by(SHIP_TURN_DEGREES_PER_SECOND * dt),
            }
            if input.thrust {
                let angle = ship.angle();
                if let Some(body) = ship.physics_mut() {
                    body.accelerate_at_angle(angle)?;
                }
            }
        }
        if input.fire {
            self.fire_bullet()?;
        }

        self.sprites.update(dt)?;
        self.check_hits();
        Ok(())
    }

    fn fire_bullet(&mut self) -> Result<(), SpriteError> {
        let Some(ship) = self.sprites.get(self.ship) else {
            return Ok(());
        };
        let mut bullet = GameObject::new();
        bullet.set_texture(self.textures.bullet.clone());
        let position = ship.position();
        bullet.set_position(position.x, position.y);
        bullet.set_angle(ship.angle());
        bullet.move_forward(SHIP_EDGE_LEN as f32 / 2.0);
        bullet.set_physics(0.0, BULLET_SPEED_PER_SECOND, 0.0);
        if let Some(body) = bullet.physics_mut() {
            body.set_speed(BULLET_SPEED_PER_SECOND)?;
            body.set_motion_angle(ship.angle());
        }
        bullet.set_destroy_zone(WORLD_LEN_X, WORLD_LEN_Y);
        self.bullets.push(self.sprites.add(bullet));
        Ok(())
    }

    fn check_hits(&mut self) {
        let sprites = &mut self.sprites;
        self.bullets.retain(|id| sprites.contains(*id));

        let mut hits = vec![];
        for bullet_id in &self.bullets {
            for rock_id in &self.rocks {
                if let (Some(bullet), Some(rock)) = (sprites.get(*bullet_id), sprites.get(*rock_id)) {
                    if !rock.is_destroyed() && bullet.overlaps(rock) {
                        hits.push((*bullet_id, *rock_id));
                    }
                }
            }
        }
        for (bullet_id, rock_id) in hits {
            for id in [bullet_id, rock_id] {
                if let Some(object) = sprites.get_mut(id) {
                    object.destroy();
                }
            }
        }

        if sprites.purge() > 0 {
            self.rocks.retain(|id| sprites.contains(*id));
            self.bullets.retain(|id| sprites.contains(*id));
            self.score = (ROCK_COUNT - self.rocks.len()) as u32;
            log::info!("score: {}", self.score);
        }
    }

    fn draw_game_content(&mut self, ctx: &Context) {
        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("sprites")));
        let mut surface = PainterSurface::new(&painter, &mut self.texture_cache, Vec2::new(WORLD_LEN_X, WORLD_LEN_Y));
        self.sprites.draw(&mut surface);
    }
}

impl eframe::App for SpriteDemoApp {
    fn update(&mut self, ctx: &Context, frame: &mut eframe::Frame) {
        let input = self.read_ui_control(ctx);
        if input.exit {
            frame.close();
            return;
        }
        if let Err(e) = self.time_step(input) {
            log::error!("stopping: {e}");
            frame.close();
            return;
        }
        if self.rocks.is_empty() {
            log::info!("all rocks destroyed");
            frame.close();
        }
        self.draw_game_content(ctx);
        ctx.request_repaint();
    }

    fn on_exit(&mut self, _: Option<&glow::Context>) {
        log::info!("final score: {} after {:.1}s", self.score, self.clock.elapsed_time());
    }
}

fn sprite_demo(app: SpriteDemoApp) -> eframe::Result<()> {
    let mut native_options = eframe::NativeOptions::default();
    native_options.default_theme = eframe::Theme::Dark;
    native_options.initial_window_size = Some(Vec2::new(WORLD_LEN_X, WORLD_LEN_Y));
    eframe::run_native("Sprites", native_options, Box::new(move |_cc| Box::new(app)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    sprite_demo(SpriteDemoApp::new()?)?;
    Ok(())
}
