//! Contact classification and the delivery policy
//!
//! Physics reports raw body pairs. A pair containing a wall makes the wall
//! flash; a base/satellite pair is a delivery attempt that the current level
//! judges against its expected index.

use serde::{Deserialize, Serialize};

use super::effects::WallSide;
use super::level::{Level, PendingAdvance};

/// A physics body the host tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Base,
    Wall(WallSide),
    Satellite(usize),
}

/// A contact-began report from the physics engine (order of the pair is arbitrary)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub a: Body,
    pub b: Body,
}

/// What a contact means for gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Something hit a wall
    Wall(WallSide),
    /// A satellite touched the base
    Delivery(usize),
    /// Satellite/satellite and other pairs
    Other,
}

impl Contact {
    pub fn new(a: Body, b: Body) -> Self {
        Self { a, b }
    }

    pub fn classify(&self) -> ContactKind {
        match (self.a, self.b) {
            (Body::Wall(wall), _) | (_, Body::Wall(wall)) => ContactKind::Wall(wall),
            (Body::Base, Body::Satellite(index)) | (Body::Satellite(index), Body::Base) => {
                ContactKind::Delivery(index)
            }
            _ => ContactKind::Other,
        }
    }
}

/// Result of judging a delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Expected satellite; the level advances once `token` is completed
    Correct(PendingAdvance),
    /// Expected satellite, but its fade-out is already running
    Pending(PendingAdvance),
    /// Any other index, including ones that do not exist
    Incorrect { expected: usize, got: usize },
    /// The level is already completed
    Ignored,
}

impl Level {
    /// Judge a delivery of satellite `hit` to the base
    ///
    /// Only a correct hit changes anything: it reserves the advance and
    /// returns the token the fade-out must complete.
    pub fn resolve_collision(&mut self, hit: usize) -> HitOutcome {
        let Some(expected) = self.current_index() else {
            return HitOutcome::Ignored;
        };
        if hit != expected {
            return HitOutcome::Incorrect { expected, got: hit };
        }
        match self.pending() {
            Some(token) => HitOutcome::Pending(token),
            None => match self.begin_advance() {
                Some(token) => HitOutcome::Correct(token),
                None => HitOutcome::Ignored,
            },
        }
    }
}
