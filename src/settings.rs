//! Game settings and tuning
//!
//! Persisted as JSON next to the host application. Every field has a default,
//! so partial files are accepted.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Room walls around the world origin, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomBounds {
    pub top: f32,
    pub bottom: f32,
    pub front: f32,
    pub back: f32,
    pub left: f32,
    pub right: f32,
    pub wall_thickness: f32,
}

impl Default for RoomBounds {
    fn default() -> Self {
        Self {
            top: WALL_DISTANCE_TOP,
            bottom: WALL_DISTANCE_BOTTOM,
            front: WALL_DISTANCE_HORIZONTAL,
            back: WALL_DISTANCE_HORIZONTAL,
            left: WALL_DISTANCE_HORIZONTAL,
            right: WALL_DISTANCE_HORIZONTAL,
            wall_thickness: WALL_THICKNESS,
        }
    }
}

impl RoomBounds {
    /// Uniformly scale every wall distance (thickness is kept)
    pub fn scaled(&self, scale: f32) -> Self {
        Self {
            top: self.top * scale,
            bottom: self.bottom * scale,
            front: self.front * scale,
            back: self.back * scale,
            left: self.left * scale,
            right: self.right * scale,
            wall_thickness: self.wall_thickness,
        }
    }

    /// Lowest corner of the placement volume (walls shrunk by `margin`)
    pub fn inner_min(&self, margin: f32) -> Vec3 {
        Vec3::new(-self.left + margin, -self.bottom + margin, -self.front + margin)
    }

    /// Highest corner of the placement volume (walls shrunk by `margin`)
    pub fn inner_max(&self, margin: f32) -> Vec3 {
        Vec3::new(self.right - margin, self.top - margin, self.back - margin)
    }

    /// Whether a non-empty volume is left after shrinking by `margin`
    pub fn fits(&self, margin: f32) -> bool {
        let min = self.inner_min(margin);
        let max = self.inner_max(margin);
        min.cmplt(max).all()
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.inner_min(0.0)).all() && point.cmple(self.inner_max(0.0)).all()
    }
}

/// Drag-and-drop tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Distance in front of the camera a grabbed satellite is held at
    pub grab_distance: f32,
    /// Seconds for a grabbed satellite to travel to the camera
    pub grab_travel_secs: f32,
    /// Impulse magnitude applied on release
    pub release_power: f32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            grab_distance: GRAB_DISTANCE,
            grab_travel_secs: GRAB_TRAVEL_SECS,
            release_power: RELEASE_POWER,
        }
    }
}

/// Visual feedback timings, forwarded to the host with each effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackSettings {
    pub wall_flash_opacity: f32,
    pub wall_flash_ramp_up_secs: f32,
    pub wall_flash_ramp_down_secs: f32,
    pub fade_out_secs: f32,
    pub completion_banner_secs: f32,
    /// Reduced motion (skip base expansion, keep color cues)
    pub reduced_motion: bool,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            wall_flash_opacity: WALL_FLASH_OPACITY,
            wall_flash_ramp_up_secs: WALL_FLASH_RAMP_UP_SECS,
            wall_flash_ramp_down_secs: WALL_FLASH_RAMP_DOWN_SECS,
            fade_out_secs: FADE_OUT_SECS,
            completion_banner_secs: COMPLETION_BANNER_SECS,
            reduced_motion: false,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Satellite count of each tier, in play order
    pub catalogue: Vec<usize>,
    /// Placement seed for reproducible runs
    pub seed: u64,
    pub room: RoomBounds,
    pub interaction: InteractionSettings,
    pub feedback: FeedbackSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalogue: DEFAULT_CATALOGUE.to_vec(),
            seed: 0x5a7e_111e,
            room: RoomBounds::default(),
            interaction: InteractionSettings::default(),
            feedback: FeedbackSettings::default(),
        }
    }
}

impl Settings {
    /// Default settings with a custom catalogue
    pub fn with_catalogue(catalogue: impl Into<Vec<usize>>) -> Self {
        Self {
            catalogue: catalogue.into(),
            ..Self::default()
        }
    }

    /// Check the settings can build a playable game
    pub fn validate(&self) -> Result<(), GameError> {
        if self.catalogue.is_empty() {
            return Err(GameError::EmptyCatalogue);
        }
        if let Some(tier) = self.catalogue.iter().position(|&count| count == 0) {
            return Err(GameError::EmptyTier { tier });
        }
        if !self.room.fits(PLACEMENT_MARGIN) {
            return Err(GameError::RoomTooSmall);
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(GameError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GameError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
