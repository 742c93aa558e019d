use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::sprite::algebra_2d::{Aabb, SharedVector, Vector2D};
use crate::sprite::error::SpriteError;
use crate::sprite::group::GroupId;
use crate::sprite::physics::KinematicBody;
use crate::sprite::surface::{DrawStyle, Surface};
use crate::sprite::texture::Texture;

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct ObjectId(u64);

/// What happens to an object in relation to its world zone
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ZonePolicy {
    None,
    /// stay completely inside the zone
    Bound,
    /// leaving on one side means entering on the opposite side
    Wrap,
    /// get destroyed when completely outside
    Destroy,
}

/// A sprite: position, bounding box, texture and optional physics.
///
/// The bounding box is centered on the position and follows it.
#[derive(Debug)]
pub struct GameObject {
    id: ObjectId,
    position: SharedVector,
    bounding_box: Aabb,
    texture: Option<Texture>,
    body: Option<KinematicBody>,
    bound_zone: Option<Aabb>,
    wrap_zone: Option<Aabb>,
    destroy_zone: Option<Aabb>,
    angle: f32,
    opacity: f32,
    mirrored: bool,
    flipped: bool,
    visible: bool,
    group: Option<GroupId>,
    destroyed: bool,
}

impl GameObject {
    pub fn new() -> Self {
        Self {
            id: ObjectId(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed)),
            position: Vector2D::default().shared(),
            bounding_box: Aabb::default(),
            texture: None,
            body: None,
            bound_zone: None,
            wrap_zone: None,
            destroy_zone: None,
            angle: 0.0,
            opacity: 1.0,
            mirrored: false,
            flipped: false,
            visible: true,
            group: None,
            destroyed: false,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn position(&self) -> Vector2D {
        *self.position.borrow()
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position.borrow_mut().set_values(x, y);
        self.sync_bounding_box();
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.position.borrow_mut().add_values(dx, dy);
        self.sync_bounding_box();
    }

    /// moves `distance` from the current position in direction `angle_degrees`
    pub fn move_at_angle(&mut self, distance: f32, angle_degrees: f32) {
        let mut offset = Vector2D::new(distance, 0.0);
        offset.set_angle(angle_degrees);
        self.move_by(offset.x, offset.y);
    }

    /// moves in the direction the object is facing
    pub fn move_forward(&mut self, distance: f32) {
        self.move_at_angle(distance, self.angle);
    }

    /// the box, centered on the current position
    pub fn bounding_box(&self) -> Aabb {
        let position = self.position();
        let mut bounding_box = self.bounding_box;
        bounding_box.set_position(position.x, position.y);
        bounding_box
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.bounding_box.set_size(width, height);
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    /// Binds the texture and takes over its size for the bounding box.
    pub fn set_texture(&mut self, texture: Texture) {
        self.bounding_box.set_size(texture.width(), texture.height());
        self.texture = Some(texture);
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle_degrees: f32) {
        self.angle = angle_degrees;
    }

    pub fn rotate_by(&mut self, angle_degrees: f32) {
        self.angle += angle_degrees;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.mirrored = mirrored;
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn set_flipped(&mut self, flipped: bool) {
        self.flipped = flipped;
    }

    /// Attaches a kinematic body, which moves this object's position.
    pub fn set_physics(&mut self, acceleration_value: f32, max_speed: f32, deceleration_value: f32) {
        let mut body = KinematicBody::new(acceleration_value, max_speed, deceleration_value);
        body.bind_position(Rc::clone(&self.position));
        self.body = Some(body);
    }

    pub fn physics(&self) -> Option<&KinematicBody> {
        self.body.as_ref()
    }

    pub fn physics_mut(&mut self) -> Option<&mut KinematicBody> {
        self.body.as_mut()
    }

    /// keep inside the area (0, 0) .. (width, height)
    pub fn set_bound_zone(&mut self, width: f32, height: f32) {
        self.bound_zone = Some(zone(width, height));
    }

    /// wrap around the edges of the area (0, 0) .. (width, height)
    pub fn set_wrap_zone(&mut self, width: f32, height: f32) {
        self.wrap_zone = Some(zone(width, height));
    }

    /// destroy when completely outside the area (0, 0) .. (width, height)
    pub fn set_destroy_zone(&mut self, width: f32, height: f32) {
        self.destroy_zone = Some(zone(width, height));
    }

    pub fn clear_zones(&mut self) {
        self.bound_zone = None;
        self.wrap_zone = None;
        self.destroy_zone = None;
    }

    /// The policy applied during update. Bound wins over wrap, wrap over destroy.
    pub fn zone_policy(&self) -> ZonePolicy {
        self.active_zone().map_or(ZonePolicy::None, |(policy, _)| policy)
    }

    fn active_zone(&self) -> Option<(ZonePolicy, Aabb)> {
        if let Some(zone) = self.bound_zone {
            Some((ZonePolicy::Bound, zone))
        } else if let Some(zone) = self.wrap_zone {
            Some((ZonePolicy::Wrap, zone))
        } else {
            self.destroy_zone.map(|zone| (ZonePolicy::Destroy, zone))
        }
    }

    pub fn overlaps(&self, other: &GameObject) -> bool {
        self.bounding_box().overlaps(&other.bounding_box())
    }

    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    /// A new membership (or none) starts alive; a pending destroy belonged to the old group.
    pub(crate) fn set_group(&mut self, group: Option<GroupId>) {
        self.group = group;
        self.destroyed = false;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Removes this object from its group (at the end of the group's update).
    /// Without a group there is nothing to do.
    pub fn destroy(&mut self) {
        match self.group {
            Some(group) => {
                log::debug!("{:?} destroyed, leaving {:?}", self.id, group);
                self.destroyed = true;
            }
            None => log::trace!("{:?} has no group to be removed from", self.id),
        }
    }

    /// physically move one time step forward, then apply the zone policy
    pub fn update(&mut self, delta_time: f32) -> Result<(), SpriteError> {
        if self.destroyed {
            return Ok(());
        }
        if let Some(body) = self.body.as_mut() {
            body.update(delta_time)?;
        }
        self.sync_bounding_box();

        match self.active_zone() {
            None => {}
            Some((ZonePolicy::Bound, zone)) => self.bound_within(&zone),
            Some((ZonePolicy::Wrap, zone)) => self.wrap_around(&zone),
            Some((ZonePolicy::Destroy, zone)) => self.destroy_outside(&zone),
            Some((ZonePolicy::None, _)) => {}
        }
        Ok(())
    }

    pub fn draw_style(&self) -> DrawStyle {
        DrawStyle {
            angle: self.angle,
            opacity: self.opacity,
            mirrored: self.mirrored,
            flipped: self.flipped,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if !self.visible || self.destroyed {
            return;
        }
        if let Some(texture) = &self.texture {
            surface.draw_image(texture, self.position(), &self.draw_style());
        }
    }

    fn sync_bounding_box(&mut self) {
        let position = self.position();
        self.bounding_box.set_position(position.x, position.y);
    }

    /// clamp into the zone; motion towards a touched edge stops
    fn bound_within(&mut self, zone: &Aabb) {
        let half_width = self.bounding_box.width / 2.0;
        let half_height = self.bounding_box.height / 2.0;
        let mut position = self.position();
        let (mut stop_x, mut stop_y) = (false, false);

        if self.bounding_box.left() < zone.left() {
            position.x = zone.left() + half_width;
            stop_x = true;
        } else if self.bounding_box.right() > zone.right() {
            position.x = zone.right() - half_width;
            stop_x = true;
        }
        if self.bounding_box.top() < zone.top() {
            position.y = zone.top() + half_height;
            stop_y = true;
        } else if self.bounding_box.bottom() > zone.bottom() {
            position.y = zone.bottom() - half_height;
            stop_y = true;
        }

        if stop_x || stop_y {
            self.set_position(position.x, position.y);
            if let Some(body) = self.body.as_mut() {
                let velocity = body.velocity();
                body.set_velocity(
                    if stop_x { 0.0 } else { velocity.x },
                    if stop_y { 0.0 } else { velocity.y },
                );
            }
        }
    }

    /// once completely beyond an edge, reappear just beyond the opposite edge
    fn wrap_around(&mut self, zone: &Aabb) {
        let half_width = self.bounding_box.width / 2.0;
        let half_height = self.bounding_box.height / 2.0;
        let mut position = self.position();

        if self.bounding_box.right() < zone.left() {
            position.x = zone.right() + half_width;
        } else if self.bounding_box.left() > zone.right() {
            position.x = zone.left() - half_width;
        }
        if self.bounding_box.bottom() < zone.top() {
            position.y = zone.bottom() + half_height;
        } else if self.bounding_box.top() > zone.bottom() {
            position.y = zone.top() - half_height;
        }

        if position != self.position() {
            log::trace!("{:?} wrapped to {:?}", self.id, position);
            self.set_position(position.x, position.y);
        }
    }

    fn destroy_outside(&mut self, zone: &Aabb) {
        if self.bounding_box.is_outside(zone) {
            self.destroy();
        }
    }
}

impl Default for GameObject {
    fn default() -> Self {
        Self::new()
    }
}

fn zone(width: f32, height: f32) -> Aabb {
    Aabb::new(width / 2.0, height / 2.0, width, height)
}
