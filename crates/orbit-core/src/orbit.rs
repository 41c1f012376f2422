//! Orbital (3D) placement of ring items.
//!
//! Items orbit on the y = 0 plane. Their positions come from the same polar
//! primitives as the flat menu, with the 2D pair read as (x, z).

use crate::polar::{Point, polar_to_cartesian, sector_span};
use std::ops::{Add, Mul, Sub};

const NEAR_PLANE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 { self } else { self * (1.0 / len) }
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Where item `index` of `total` sits on an orbit of `radius`.
pub fn orbit_position(index: usize, total: usize, radius: f64) -> Vec3 {
    let angle = sector_span(index, total, 0.0).start;
    let p = polar_to_cartesian(radius, angle);
    Vec3::new(p.x, 0.0, p.y)
}

/// A screen position relative to the viewport centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Point,
    pub depth: f64,
    /// Screen units per world unit at this depth.
    pub scale: f64,
}

/// Fixed perspective camera looking at `target` with +y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view.
    pub fov_degrees: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 15.0, 20.0),
            target: Vec3::ZERO,
            fov_degrees: 50.0,
        }
    }
}

impl Camera {
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.eye).normalized();
        let right = forward.cross(Vec3::Y).normalized();
        let up = right.cross(forward);
        (forward, right, up)
    }

    /// Projects onto a viewport `viewport_height` pixels tall. Points behind
    /// the near plane give `None`.
    pub fn project(&self, point: Vec3, viewport_height: f64) -> Option<Projected> {
        let (forward, right, up) = self.basis();
        let rel = point - self.eye;
        let depth = rel.dot(forward);
        if depth <= NEAR_PLANE {
            return None;
        }

        let focal = (viewport_height / 2.0) / (self.fov_degrees.to_radians() / 2.0).tan();
        let scale = focal / depth;
        Some(Projected {
            screen: Point::new(rel.dot(right) * scale, -rel.dot(up) * scale),
            depth,
            scale,
        })
    }
}

/// Front-most body of world radius `body_radius` under `pointer`.
pub fn pick(bodies: &[Projected], pointer: Point, body_radius: f64) -> Option<usize> {
    bodies
        .iter()
        .enumerate()
        .filter(|(_, b)| b.screen.distance(pointer) <= body_radius * b.scale)
        .min_by(|(_, a), (_, b)| a.depth.total_cmp(&b.depth))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn orbits_lie_on_the_ground_plane() {
        for total in 1..=9 {
            for index in 0..total {
                let p = orbit_position(index, total, 8.0);
                assert_eq!(p.y, 0.0);
                assert!((p.length() - 8.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn first_item_sits_at_the_far_side() {
        let p = orbit_position(0, 4, 8.0);
        assert!(p.x.abs() < EPS);
        assert!((p.z + 8.0).abs() < EPS);

        let p = orbit_position(1, 4, 8.0);
        assert!((p.x - 8.0).abs() < EPS);
        assert!(p.z.abs() < EPS);
    }

    #[test]
    fn camera_target_projects_to_the_centre() {
        let camera = Camera::default();
        let p = camera.project(Vec3::ZERO, 600.0).unwrap();
        assert!(p.screen.x.abs() < EPS);
        assert!(p.screen.y.abs() < EPS);
        assert!((p.depth - 25.0).abs() < EPS);
    }

    #[test]
    fn near_side_is_lower_and_larger() {
        let camera = Camera::default();
        let far = camera.project(orbit_position(0, 2, 8.0), 600.0).unwrap();
        let near = camera.project(orbit_position(1, 2, 8.0), 600.0).unwrap();

        assert!(near.screen.y > 0.0);
        assert!(far.screen.y < 0.0);
        assert!(near.scale > far.scale);

        let right = camera.project(orbit_position(1, 4, 8.0), 600.0).unwrap();
        assert!(right.screen.x > 0.0);
    }

    #[test]
    fn points_behind_the_camera_are_dropped() {
        let camera = Camera::default();
        assert_eq!(camera.project(Vec3::new(0.0, 30.0, 40.0), 600.0), None);
    }

    #[test]
    fn pick_prefers_the_front_body() {
        let bodies = [
            Projected {
                screen: Point::new(0.0, 0.0),
                depth: 30.0,
                scale: 10.0,
            },
            Projected {
                screen: Point::new(4.0, 0.0),
                depth: 20.0,
                scale: 10.0,
            },
        ];
        assert_eq!(pick(&bodies, Point::new(2.0, 0.0), 1.0), Some(1));
        assert_eq!(pick(&bodies, Point::new(-9.0, 0.0), 1.0), Some(0));
        assert_eq!(pick(&bodies, Point::new(50.0, 50.0), 1.0), None);
    }
}
