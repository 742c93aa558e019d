use std::cell::RefCell;
use std::rc::Rc;

use egui::{Pos2, Vec2};

/// Position handle shared between a [`GameObject`](super::game_object::GameObject)
/// and its [`KinematicBody`](super::physics::KinematicBody).
pub type SharedVector = Rc<RefCell<Vector2D>>;

/// A pair of values (x, y), used for positions, velocities and accelerations.
///
/// The y axis points down, so angles grow clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn shared(self) -> SharedVector {
        Rc::new(RefCell::new(self))
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_values(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn add_values(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn combine(&mut self, other: &Vector2D) {
        self.x += other.x;
        self.y += other.y;
    }

    pub fn scale(&mut self, factor: f32) {
        self.x *= factor;
        self.y *= factor;
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Angle between this vector and the positive x-axis in degrees, within (-180, 180].
    /// A zero vector has angle 0.
    pub fn angle_degrees(&self) -> f32 {
        if self.length() == 0.0 {
            return 0.0;
        }
        let angle = self.y.atan2(self.x).to_degrees();
        if angle <= -180.0 {
            180.0
        } else {
            angle
        }
    }

    /// keeps the direction
    pub fn set_length(&mut self, length: f32) {
        self.set_polar(length, self.angle_degrees());
    }

    /// keeps the length
    pub fn set_angle(&mut self, angle_degrees: f32) {
        self.set_polar(self.length(), angle_degrees);
    }

    fn set_polar(&mut self, length: f32, angle_degrees: f32) {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        self.x = length * cos;
        self.y = length * sin;
    }
}

impl From<Vector2D> for Pos2 {
    fn from(value: Vector2D) -> Self {
        Pos2::new(value.x, value.y)
    }
}

impl From<Vector2D> for Vec2 {
    fn from(value: Vector2D) -> Self {
        Vec2::new(value.x, value.y)
    }
}

impl From<Pos2> for Vector2D {
    fn from(value: Pos2) -> Self {
        Vector2D::new(value.x, value.y)
    }
}

/// Axis-aligned Bounding Box, given by its center and full extents
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub center: Vector2D,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            center: Vector2D::new(x, y),
            width,
            height,
        }
    }

    pub fn set_values(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.center.set_values(x, y);
        self.set_size(width, height);
    }

    pub fn position(&self) -> Vector2D {
        self.center
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.center.set_values(x, y);
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.width / 2.0
    }

    /// TOP is the smaller y value
    pub fn top(&self) -> f32 {
        self.center.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.height / 2.0
    }

    fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Closed intervals: touching edges count as overlap.
    /// A box without area never overlaps anything.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        let separated = other.right() < self.left()
            || self.right() < other.left()
            || other.bottom() < self.top()
            || self.bottom() < other.top();
        !separated
    }

    /// true, if this box lies completely beyond one of the edges of `zone`
    pub fn is_outside(&self, zone: &Aabb) -> bool {
        self.right() < zone.left()
            || self.left() > zone.right()
            || self.bottom() < zone.top()
            || self.top() > zone.bottom()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn assert_eq_roughly(what: &str, a: f32, b: f32, tolerance: f32) {
        assert!((a - b).abs() <= tolerance, "'{what}' difference between {a} and {b} more than {tolerance}");
    }

    #[test]
    fn zero_vector_has_angle_zero() {
        assert_eq!(Vector2D::default().angle_degrees(), 0.0);
    }

    #[rstest]
    #[case(Vector2D::new(1.0, 0.0), 0.0)]
    #[case(Vector2D::new(0.0, 2.0), 90.0)]
    #[case(Vector2D::new(- 3.0, 0.0), 180.0)]
    #[case(Vector2D::new(- 3.0, - 0.0), 180.0)]
    #[case(Vector2D::new(0.0, - 1.0), - 90.0)]
    #[case(Vector2D::new(1.0, 1.0), 45.0)]
    fn angle_degrees(#[case] v: Vector2D, #[case] expected: f32) {
        assert_eq_roughly("angle", v.angle_degrees(), expected, 0.0001);
    }

    #[test]
    fn length_is_euclidean() {
        assert_eq!(Vector2D::new(3.0, - 4.0).length(), 5.0);
    }

    #[test]
    fn set_length_of_zero_vector_points_along_x() {
        let mut v = Vector2D::default();
        v.set_length(7.0);
        assert_eq_roughly("x", v.x, 7.0, 0.0001);
        assert_eq_roughly("y", v.y, 0.0, 0.0001);
    }

    #[rstest]
    #[case(5.0, 30.0)]
    #[case(0.5, - 135.0)]
    #[case(120.0, 179.0)]
    #[case(1.0, - 90.0)]
    fn length_and_angle_round_trip(#[case] length: f32, #[case] angle: f32) {
        let mut v = Vector2D::new(1.0, 0.0);
        v.set_length(length);
        v.set_angle(angle);
        assert_eq_roughly("length", v.length(), length, 0.001);
        assert_eq_roughly("angle", v.angle_degrees(), angle, 0.01);

        let mut w = Vector2D::new(1.0, 1.0);
        w.set_angle(v.angle_degrees());
        w.set_length(v.length());
        assert_eq_roughly("length", w.length(), length, 0.001);
        assert_eq_roughly("angle", w.angle_degrees(), angle, 0.01);
    }

    #[test]
    fn set_angle_keeps_length() {
        let mut v = Vector2D::new(3.0, 4.0);
        v.set_angle(90.0);
        assert_eq_roughly("x", v.x, 0.0, 0.0001);
        assert_eq_roughly("y", v.y, 5.0, 0.0001);
    }

    #[test]
    fn scale_is_uniform() {
        let mut v = Vector2D::new(2.0, - 3.0);
        v.scale(2.0);
        assert_eq!(v, Vector2D::new(4.0, - 6.0));
    }

    #[test]
    fn translation_and_combination() {
        let mut v = Vector2D::new(1.0, 1.0);
        v.add_values(2.0, - 1.0);
        v.combine(&Vector2D::new(0.5, 0.5));
        assert_eq!(v, Vector2D::new(3.5, 0.5));
        v.set_values(- 1.0, 2.0);
        assert_eq!((v.x(), v.y()), (- 1.0, 2.0));
    }

    #[rstest]
    #[case(Aabb::new(0.0, 0.0, 1.0, 1.0), Aabb::new(1.0, 0.0, 1.0, 1.0), true)]
    #[case(Aabb::new(0.0, 0.0, 1.0, 1.0), Aabb::new(2.0, 0.0, 1.0, 1.0), false)]
    #[case(Aabb::new(0.0, 0.0, 1.0, 1.0), Aabb::new(0.0, 1.0, 1.0, 1.0), true)]
    #[case(Aabb::new(0.0, 0.0, 1.0, 1.0), Aabb::new(0.0, - 1.01, 1.0, 1.0), false)]
    #[case(Aabb::new(0.0, 0.0, 10.0, 10.0), Aabb::new(1.0, 1.0, 2.0, 2.0), true)]
    #[case(Aabb::new(0.0, 0.0, 4.0, 4.0), Aabb::new(2.5, - 2.5, 1.0, 1.0), true)]
    #[case(Aabb::new(0.0, 0.0, 4.0, 4.0), Aabb::new(3.0, 0.0, 1.0, 0.0), false)]
    #[case(Aabb::new(0.0, 0.0, 4.0, 4.0), Aabb::new(0.0, 0.0, 0.0, 0.0), false)]
    fn overlaps(#[case] a: Aabb, #[case] b: Aabb, #[case] expected: bool) {
        assert_eq!(a.overlaps(&b), expected);
        assert_eq!(b.overlaps(&a), expected, "overlap must be symmetric");
    }

    #[test]
    fn setters_update_edges() {
        let mut aabb = Aabb::default();
        aabb.set_values(10.0, 20.0, 4.0, 6.0);
        assert_eq!((aabb.left(), aabb.right(), aabb.top(), aabb.bottom()), (8.0, 12.0, 17.0, 23.0));
        aabb.set_position(0.0, 0.0);
        aabb.set_width(2.0);
        aabb.set_height(2.0);
        assert_eq!((aabb.left(), aabb.bottom()), (- 1.0, 1.0));
        assert_eq!(aabb.position(), Vector2D::new(0.0, 0.0));
    }

    #[rstest]
    #[case(Aabb::new(- 6.0, 50.0, 10.0, 10.0), true)]
    #[case(Aabb::new(- 5.0, 50.0, 10.0, 10.0), false)]
    #[case(Aabb::new(50.0, 50.0, 10.0, 10.0), false)]
    #[case(Aabb::new(50.0, 100.5, 0.0, 0.0), true)]
    #[case(Aabb::new(50.0, 100.0, 0.0, 0.0), false)]
    fn is_outside(#[case] aabb: Aabb, #[case] expected: bool) {
        let zone = Aabb::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(aabb.is_outside(&zone), expected);
    }
}
