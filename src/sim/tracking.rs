//! Drag-and-drop bookkeeping
//!
//! A touch on a satellite makes it travel to a point in front of the camera
//! and follow the camera from then on. Lifting the finger throws it along
//! the view direction.

use glam::Vec3;

use crate::point_in_front_of;
use crate::settings::InteractionSettings;

/// A satellite thrown by the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    pub index: usize,
    /// Impulse to apply to the satellite's physics body
    pub impulse: Vec3,
}

/// Which satellite, if any, is stuck to the camera
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    grabbed: Option<usize>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grabbed(&self) -> Option<usize> {
        self.grabbed
    }

    /// Start tracking `index`, replacing any previous grab
    pub fn grab(&mut self, index: usize) {
        self.grabbed = Some(index);
    }

    /// Stop tracking and compute the throw along `camera_forward`
    pub fn release(&mut self, camera_forward: Vec3, settings: &InteractionSettings) -> Option<Release> {
        let index = self.grabbed.take()?;
        Some(Release {
            index,
            impulse: camera_forward.normalize_or_zero() * settings.release_power,
        })
    }

    /// Drop the grab if it refers to `index`
    pub fn clear_if(&mut self, index: usize) -> bool {
        if self.grabbed == Some(index) {
            self.grabbed = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.grabbed = None;
    }

    /// Where a grabbed satellite should sit this frame
    pub fn held_position(
        &self,
        camera_pos: Vec3,
        camera_forward: Vec3,
        settings: &InteractionSettings,
    ) -> Option<Vec3> {
        self.grabbed
            .map(|_| point_in_front_of(camera_pos, camera_forward, settings.grab_distance))
    }
}
