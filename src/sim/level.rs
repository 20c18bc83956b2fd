//! Level state machine
//!
//! A level owns its satellites and tracks which one must be delivered next.
//! Advancing is two-phase: a correct hit hands out a [`PendingAdvance`]
//! token, and the state only moves once the host reports that the fade-out
//! for that token has finished.

use serde::{Deserialize, Serialize};

use super::satellite::{SatelliteEntity, generate_satellites, placement_seed};
use crate::palette;
use crate::settings::RoomBounds;

/// Progress through a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelState {
    /// Index of the next satellite to deliver
    CurrentSatellite(usize),
    /// Every satellite delivered
    Completed,
}

/// How the host should draw a satellite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// The one to deliver now
    Next,
    /// Still in play, later in the order
    Waiting,
    /// Already delivered
    Retrieved,
}

impl Highlight {
    pub fn color(&self) -> [f32; 4] {
        match self {
            Highlight::Next => palette::NEXT_SATELLITE,
            Highlight::Waiting | Highlight::Retrieved => palette::DEFAULT_SATELLITE,
        }
    }
}

/// An advance waiting on a fade-out animation
///
/// Only valid for the level generation (`epoch`) that issued it; a reset
/// makes every outstanding token stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingAdvance {
    pub tier: usize,
    pub epoch: u32,
    pub index: usize,
}

/// A state change produced by [`Level::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: LevelState,
    pub to: LevelState,
}

impl Transition {
    /// True when this transition entered `Completed`
    pub fn completed_level(&self) -> bool {
        self.to == LevelState::Completed && self.from != LevelState::Completed
    }
}

/// One difficulty tier
#[derive(Debug, Clone)]
pub struct Level {
    tier: usize,
    total_satellite_count: usize,
    state: LevelState,
    satellites: Vec<SatelliteEntity>,
    pending: Option<PendingAdvance>,
    /// Bumped on every reset
    epoch: u32,
    run_seed: u64,
    room: RoomBounds,
}

impl Level {
    /// Create a level at catalogue position `tier` holding `total_satellite_count` satellites
    pub fn new(tier: usize, total_satellite_count: usize, room: RoomBounds, run_seed: u64) -> Self {
        debug_assert!(total_satellite_count >= 1, "a level needs at least one satellite");
        let satellites = generate_satellites(
            total_satellite_count,
            &room,
            placement_seed(run_seed, tier, 0),
        );
        Self {
            tier,
            total_satellite_count,
            state: LevelState::CurrentSatellite(0),
            satellites,
            pending: None,
            epoch: 0,
            run_seed,
            room,
        }
    }

    pub fn tier(&self) -> usize {
        self.tier
    }

    pub fn total_satellite_count(&self) -> usize {
        self.total_satellite_count
    }

    pub fn state(&self) -> LevelState {
        self.state
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn is_completed(&self) -> bool {
        self.state == LevelState::Completed
    }

    /// Index of the next expected satellite, `None` once completed
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            LevelState::CurrentSatellite(i) => Some(i),
            LevelState::Completed => None,
        }
    }

    /// Number of satellites delivered so far
    pub fn retrieved_count(&self) -> usize {
        self.current_index().unwrap_or(self.total_satellite_count)
    }

    /// Every satellite of this generation, ascending by index
    pub fn satellites(&self) -> &[SatelliteEntity] {
        &self.satellites
    }

    /// Satellites still in play: the suffix starting at the current index
    pub fn active_satellites(&self) -> &[SatelliteEntity] {
        let start = self.retrieved_count().min(self.satellites.len());
        &self.satellites[start..]
    }

    pub fn satellite(&self, index: usize) -> Option<&SatelliteEntity> {
        self.satellites.get(index)
    }

    /// The satellite the player must deliver next
    pub fn target_satellite(&self) -> Option<&SatelliteEntity> {
        self.current_index().and_then(|i| self.satellite(i))
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active_satellites().iter().any(|s| s.index == index)
    }

    /// `None` for an index that is not a satellite of this level
    pub fn highlight(&self, index: usize) -> Option<Highlight> {
        if index >= self.total_satellite_count {
            return None;
        }
        Some(match self.current_index() {
            Some(current) if index == current => Highlight::Next,
            Some(current) if index > current => Highlight::Waiting,
            _ => Highlight::Retrieved,
        })
    }

    /// Outstanding fade-out token, if any
    pub fn pending(&self) -> Option<PendingAdvance> {
        self.pending
    }

    /// Issue a token for the current index, unless one is already out
    pub(super) fn begin_advance(&mut self) -> Option<PendingAdvance> {
        let index = self.current_index()?;
        if self.pending.is_some() {
            return None;
        }
        let token = PendingAdvance {
            tier: self.tier,
            epoch: self.epoch,
            index,
        };
        self.pending = Some(token);
        Some(token)
    }

    /// Whether `token` was issued by this generation and is still outstanding
    pub fn accepts(&self, token: &PendingAdvance) -> bool {
        // reset() clears `pending`, so tokens from an earlier epoch never match
        self.pending.as_ref() == Some(token)
            && self.current_index() == Some(token.index)
    }

    /// Resolve a fade-out token; stale tokens are ignored
    pub fn complete_advance(&mut self, token: PendingAdvance) -> Option<Transition> {
        if !self.accepts(&token) {
            log::debug!(
                "Ignoring stale advance token {:?} (tier {}, epoch {}, state {:?})",
                token,
                self.tier,
                self.epoch,
                self.state
            );
            return None;
        }
        self.advance()
    }

    /// Move to the next satellite, or to `Completed` after the last one
    ///
    /// No-op on a completed level.
    pub fn advance(&mut self) -> Option<Transition> {
        let from = self.state;
        let LevelState::CurrentSatellite(i) = from else {
            return None;
        };
        let next = i + 1;
        self.state = if next >= self.total_satellite_count {
            LevelState::Completed
        } else {
            LevelState::CurrentSatellite(next)
        };
        self.pending = None;
        Some(Transition {
            from,
            to: self.state,
        })
    }

    /// Back to the first satellite with a fresh layout
    pub fn reset(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.state = LevelState::CurrentSatellite(0);
        self.pending = None;
        self.satellites = generate_satellites(
            self.total_satellite_count,
            &self.room,
            placement_seed(self.run_seed, self.tier, self.epoch),
        );
    }
}

/// Levels compare equal when they hold the same number of satellites
impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.total_satellite_count == other.total_satellite_count
    }
}
