//! Off-screen target indicator
//!
//! Projects the camera-to-target vector onto the camera plane so the overlay
//! can point an arrow toward a satellite the player cannot see.

use glam::{Vec2, Vec3};

/// Component of `v` along `onto`
#[inline]
pub fn project_onto(v: Vec3, onto: Vec3) -> Vec3 {
    let len_sq = onto.length_squared();
    if len_sq <= f32::EPSILON {
        return Vec3::ZERO;
    }
    onto * (v.dot(onto) / len_sq)
}

/// Component of `v` lying in the plane with the given normal
#[inline]
pub fn project_onto_plane(v: Vec3, normal: Vec3) -> Vec3 {
    v - project_onto(v, normal)
}

/// Camera pose needed for indicator math
#[derive(Debug, Clone, Copy)]
pub struct CameraPose {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
}

impl CameraPose {
    pub fn right(&self) -> Vec3 {
        self.forward.cross(self.up).normalize_or_zero()
    }

    /// Whether `target` is in front of the camera
    pub fn faces(&self, target: Vec3) -> bool {
        (target - self.position).dot(self.forward) > 0.0
    }

    /// Unit screen direction (x right, y up) toward `target`
    ///
    /// `None` when the target sits on the view axis.
    pub fn indicator_direction(&self, target: Vec3) -> Option<Vec2> {
        let to_target = target - self.position;
        let on_plane = project_onto_plane(to_target, self.forward);
        let screen = Vec2::new(on_plane.dot(self.right()), on_plane.dot(self.up.normalize_or_zero()));
        if screen.length_squared() <= 1e-8 {
            None
        } else {
            Some(screen.normalize())
        }
    }

    /// Arrow rotation in radians, counter-clockwise from screen right
    pub fn indicator_angle(&self, target: Vec3) -> Option<f32> {
        self.indicator_direction(target).map(|d| d.y.atan2(d.x))
    }
}
