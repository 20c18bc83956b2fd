//! Visual feedback commands
//!
//! The core never animates anything itself. It emits these commands and the
//! host plays them; only `FadeOutSatellite` expects a completion callback.

use serde::{Deserialize, Serialize};

use super::level::PendingAdvance;
use crate::palette;
use crate::settings::FeedbackSettings;

/// One of the six room walls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallSide {
    Top,
    Bottom,
    Left,
    Right,
    Front,
    Back,
}

impl WallSide {
    pub const ALL: [WallSide; 6] = [
        WallSide::Top,
        WallSide::Bottom,
        WallSide::Left,
        WallSide::Right,
        WallSide::Front,
        WallSide::Back,
    ];
}

/// Which color cue the base flashes with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashCue {
    Correct,
    Incorrect,
}

impl FlashCue {
    pub fn color(&self) -> [f32; 4] {
        match self {
            FlashCue::Correct => palette::BASE,
            FlashCue::Incorrect => palette::INCORRECT,
        }
    }
}

/// Command for the host's animation system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Fade a delivered satellite out, then call back with `token`
    FadeOutSatellite {
        index: usize,
        token: PendingAdvance,
        duration_secs: f32,
    },
    /// Flash the base; `expand` adds the scale pulse of a correct delivery
    FlashBase { cue: FlashCue, expand: bool },
    /// Ramp a wall's opacity up, then back down to invisible
    FlashWall {
        wall: WallSide,
        opacity: f32,
        ramp_up_secs: f32,
        ramp_down_secs: f32,
    },
}

impl Effect {
    pub fn fade_out(index: usize, token: PendingAdvance, feedback: &FeedbackSettings) -> Self {
        Effect::FadeOutSatellite {
            index,
            token,
            duration_secs: feedback.fade_out_secs,
        }
    }

    pub fn flash_base(cue: FlashCue, feedback: &FeedbackSettings) -> Self {
        Effect::FlashBase {
            cue,
            expand: cue == FlashCue::Correct && !feedback.reduced_motion,
        }
    }

    pub fn flash_wall(wall: WallSide, feedback: &FeedbackSettings) -> Self {
        Effect::FlashWall {
            wall,
            opacity: feedback.wall_flash_opacity,
            ramp_up_secs: feedback.wall_flash_ramp_up_secs,
            ramp_down_secs: feedback.wall_flash_ramp_down_secs,
        }
    }

    /// The animation-completion token this effect carries, if any
    pub fn token(&self) -> Option<PendingAdvance> {
        match self {
            Effect::FadeOutSatellite { token, .. } => Some(*token),
            _ => None,
        }
    }
}
