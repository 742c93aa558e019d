use crate::sprite::algebra_2d::{SharedVector, Vector2D};
use crate::sprite::error::SpriteError;

/// below this acceleration length a body is considered coasting and slows down
pub const MIN_ACCELERATION: f32 = 0.001;

/// Position-velocity-acceleration integrator for a single object.
///
/// Acceleration is accumulated per frame via [`KinematicBody::accelerate_at_angle`] and
/// consumed by [`KinematicBody::update`]. Without acceleration the body slows down by
/// `deceleration_value` per second. Speed never exceeds `max_speed`.
///
/// The position is not owned: it is bound to the owner's position handle, so `update`
/// moves the owner directly.
#[derive(Debug)]
pub struct KinematicBody {
    acceleration_value: f32,
    max_speed: f32,
    deceleration_value: f32,
    position: Option<SharedVector>,
    velocity: Vector2D,
    acceleration: Vector2D,
}

impl KinematicBody {
    /// acceleration_value: magnitude used by `accelerate_at_angle` (LEN per sec²)
    /// max_speed: LEN per sec
    /// deceleration_value: slow down while not accelerated (LEN per sec²)
    pub fn new(acceleration_value: f32, max_speed: f32, deceleration_value: f32) -> Self {
        Self {
            acceleration_value,
            max_speed,
            deceleration_value,
            position: None,
            velocity: Vector2D::default(),
            acceleration: Vector2D::default(),
        }
    }

    pub fn set_values(&mut self, acceleration_value: f32, max_speed: f32, deceleration_value: f32) {
        self.acceleration_value = acceleration_value;
        self.max_speed = max_speed;
        self.deceleration_value = deceleration_value;
    }

    /// Use `position` as this body's position from now on.
    /// Only the owning game object binds its body, see [`GameObject::set_physics`](super::game_object::GameObject::set_physics).
    pub(crate) fn bind_position(&mut self, position: SharedVector) {
        self.position = Some(position);
    }

    pub fn is_bound(&self) -> bool {
        self.position.is_some()
    }

    pub fn position(&self) -> Result<Vector2D, SpriteError> {
        let position = self.position.as_ref().ok_or(SpriteError::UnboundState)?;
        let value = position.try_borrow().map_err(|_| SpriteError::PositionInUse)?;
        Ok(*value)
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// changes the speed without touching the direction of motion
    pub fn set_speed(&mut self, speed: f32) -> Result<(), SpriteError> {
        self.ensure_bound()?;
        self.velocity.set_length(speed);
        Ok(())
    }

    pub fn motion_angle(&self) -> f32 {
        self.velocity.angle_degrees()
    }

    /// changes the direction of motion without touching the speed
    pub fn set_motion_angle(&mut self, angle_degrees: f32) {
        self.velocity.set_angle(angle_degrees);
    }

    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    pub fn set_velocity(&mut self, x: f32, y: f32) {
        self.velocity.set_values(x, y);
    }

    /// acceleration accumulated in the current frame
    pub fn acceleration(&self) -> Vector2D {
        self.acceleration
    }

    /// Accelerate in the given direction with the configured acceleration value.
    /// Calls within one frame add up, so two perpendicular calls give a diagonal.
    pub fn accelerate_at_angle(&mut self, angle_degrees: f32) -> Result<(), SpriteError> {
        self.ensure_bound()?;
        let mut v = Vector2D::default();
        v.set_length(self.acceleration_value);
        v.set_angle(angle_degrees);
        self.acceleration.combine(&v);
        Ok(())
    }

    /// physically move one time step forward
    pub fn update(&mut self, delta_time: f32) -> Result<(), SpriteError> {
        let position = self.position.as_ref().ok_or(SpriteError::UnboundState)?;
        let mut position = position.try_borrow_mut().map_err(|_| SpriteError::PositionInUse)?;

        self.velocity.add_values(self.acceleration.x * delta_time, self.acceleration.y * delta_time);

        let mut speed = self.velocity.length();
        if self.acceleration.length() < MIN_ACCELERATION {
            speed -= self.deceleration_value * delta_time;
        }
        let speed = speed.max(0.0).min(self.max_speed);
        self.velocity.set_length(speed);

        position.add_values(self.velocity.x * delta_time, self.velocity.y * delta_time);

        self.acceleration.set_values(0.0, 0.0);
        Ok(())
    }

    fn ensure_bound(&self) -> Result<(), SpriteError> {
        match self.position {
            Some(_) => Ok(()),
            None => Err(SpriteError::UnboundState),
        }
    }
}
