//! Deterministic gameplay module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (by satellite index)
//! - No rendering, physics or platform dependencies
//!
//! Every mutation runs on the host's main thread; contact and animation
//! callbacks must be marshaled there before calling in.

pub mod collision;
pub mod effects;
pub mod game;
pub mod level;
pub mod satellite;
pub mod tracking;

pub use collision::{Body, Contact, ContactKind, HitOutcome};
pub use effects::{Effect, FlashCue, WallSide};
pub use game::{Game, GameEvent, Hud, TierId};
pub use level::{Highlight, Level, LevelState, PendingAdvance, Transition};
pub use satellite::{SatelliteEntity, generate_satellites, placement_seed};
pub use tracking::{Release, Tracker};
