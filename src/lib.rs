//! Retrieve To Base - gameplay core for an AR retrieval game
//!
//! The player walks around a room, finds floating satellites, drags them to
//! the base and releases them. Satellites must be delivered in index order.
//!
//! Core modules:
//! - `sim`: Deterministic gameplay (levels, collision policy, level sequencing)
//! - `indicator`: Camera-plane math for the off-screen target arrow
//! - `settings`: Data-driven configuration
//! - `error`: Crate error type
//!
//! Rendering, physics, AR tracking and UI are owned by the host application.
//! The host reports contacts and animation completions, and drains
//! [`sim::GameEvent`]s to rebuild its scene.

pub mod error;
pub mod indicator;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::Settings;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Satellite counts of the built-in difficulty tiers
    pub const DEFAULT_CATALOGUE: [usize; 3] = [1, 2, 10];

    /// Room walls, as distances from the world origin (meters)
    pub const WALL_DISTANCE_TOP: f32 = 0.3;
    pub const WALL_DISTANCE_BOTTOM: f32 = 0.6;
    pub const WALL_DISTANCE_HORIZONTAL: f32 = 2.0;
    pub const WALL_THICKNESS: f32 = 0.05;
    /// Keep satellites this far away from any wall
    pub const PLACEMENT_MARGIN: f32 = 0.2;
    /// Keep satellites this far away from the base at the origin
    pub const BASE_CLEARANCE: f32 = 0.5;

    /// Distance in front of the camera a grabbed satellite is held at
    pub const GRAB_DISTANCE: f32 = 0.3;
    /// Travel time of a satellite snapping to the camera (seconds)
    pub const GRAB_TRAVEL_SECS: f32 = 0.2;
    /// Impulse applied along the camera direction on release
    pub const RELEASE_POWER: f32 = 1.0;

    /// Wall flash on contact
    pub const WALL_FLASH_OPACITY: f32 = 0.7;
    pub const WALL_FLASH_RAMP_UP_SECS: f32 = 0.2;
    pub const WALL_FLASH_RAMP_DOWN_SECS: f32 = 0.4;
    /// Satellite fade-out after a correct delivery (seconds)
    pub const FADE_OUT_SECS: f32 = 0.5;
    /// How long the host keeps the completion banner up (seconds)
    pub const COMPLETION_BANNER_SECS: f32 = 2.0;
}

/// Cue colors, RGBA in 0..=1
pub mod palette {
    pub const BASE: [f32; 4] = [66.0 / 255.0, 162.0 / 255.0, 245.0 / 255.0, 1.0];
    pub const DEFAULT_SATELLITE: [f32; 4] = [0.667, 0.667, 0.667, 1.0];
    pub const NEXT_SATELLITE: [f32; 4] = [48.0 / 255.0, 176.0 / 255.0, 199.0 / 255.0, 1.0];
    pub const WALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const INCORRECT: [f32; 4] = [168.0 / 255.0, 41.0 / 255.0, 41.0 / 255.0, 1.0];
}

/// Point `distance` meters along the camera's forward axis
#[inline]
pub fn point_in_front_of(camera_pos: Vec3, forward: Vec3, distance: f32) -> Vec3 {
    camera_pos + forward.normalize_or_zero() * distance
}
