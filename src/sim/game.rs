//! Level sequencing
//!
//! `Game` owns the level catalogue, routes contacts to the current level and
//! moves to the next tier when one completes. Everything the host must react
//! to is queued as a [`GameEvent`] and collected with [`Game::drain_events`].

use std::fmt;

use glam::Vec3;

use super::collision::{Contact, ContactKind, HitOutcome};
use super::effects::{Effect, FlashCue};
use super::level::{Level, PendingAdvance};
use super::satellite::SatelliteEntity;
use super::tracking::{Release, Tracker};
use crate::error::GameError;
use crate::settings::Settings;

/// Position of a level in the catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TierId(pub usize);

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            write!(f, "Tutorial")
        } else {
            write!(f, "Level {}", self.0)
        }
    }
}

/// Notifications for the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Rebuild the scene from [`Game::current_level`]
    LevelChanged { tier: TierId },
    /// A level delivered its last satellite
    LevelCompleted { tier: TierId },
    /// The last tier of the catalogue was completed
    GameCompleted,
    /// Play a feedback animation
    Effect(Effect),
}

/// Text for the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub title: String,
    pub retrieved: usize,
    pub total: usize,
    /// Shown after a level completes, until the next delivery or reset
    pub completion: Option<String>,
}

/// A whole play session
#[derive(Debug)]
pub struct Game {
    levels: Vec<Level>,
    current: usize,
    settings: Settings,
    tracker: Tracker,
    events: Vec<GameEvent>,
    completion_banner: Option<TierId>,
    finished: bool,
}

impl Game {
    /// Game over the given tier sizes with default settings
    pub fn new(catalogue: &[usize]) -> Result<Self, GameError> {
        Self::from_settings(Settings::with_catalogue(catalogue))
    }

    pub fn from_settings(settings: Settings) -> Result<Self, GameError> {
        settings.validate()?;
        let levels = settings
            .catalogue
            .iter()
            .enumerate()
            .map(|(tier, &count)| Level::new(tier, count, settings.room, settings.seed))
            .collect();
        log::info!("New game with tiers {:?}", settings.catalogue);
        Ok(Self {
            levels,
            current: 0,
            settings,
            tracker: Tracker::new(),
            events: Vec::new(),
            completion_banner: None,
            finished: false,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, tier: TierId) -> Option<&Level> {
        self.levels.get(tier.0)
    }

    pub fn current_tier(&self) -> TierId {
        TierId(self.current)
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.current]
    }

    /// Whether the last tier has been completed
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Next satellite to deliver, for the minimap marker
    pub fn target_satellite(&self) -> Option<&SatelliteEntity> {
        self.current_level().target_satellite()
    }

    /// Take every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Route a physics contact
    ///
    /// Returns the delivery outcome when the contact was base/satellite.
    pub fn handle_contact(&mut self, contact: Contact) -> Option<HitOutcome> {
        match contact.classify() {
            ContactKind::Wall(wall) => {
                self.emit(GameEvent::Effect(Effect::flash_wall(wall, &self.settings.feedback)));
                None
            }
            ContactKind::Delivery(index) => Some(self.report_collision(index)),
            ContactKind::Other => None,
        }
    }

    /// Satellite `index` touched the base
    pub fn report_collision(&mut self, index: usize) -> HitOutcome {
        let feedback = self.settings.feedback;
        let level = &mut self.levels[self.current];
        let outcome = level.resolve_collision(index);
        match outcome {
            HitOutcome::Correct(token) => {
                log::debug!("Correct delivery of satellite {} in {}", index, TierId(self.current));
                self.completion_banner = None;
                self.emit(GameEvent::Effect(Effect::fade_out(index, token, &feedback)));
                self.emit(GameEvent::Effect(Effect::flash_base(FlashCue::Correct, &feedback)));
            }
            HitOutcome::Incorrect { expected, got } => {
                log::debug!("Incorrect delivery: got {}, expected {}", got, expected);
                self.emit(GameEvent::Effect(Effect::flash_base(FlashCue::Incorrect, &feedback)));
            }
            HitOutcome::Pending(_) | HitOutcome::Ignored => {}
        }
        outcome
    }

    /// The fade-out carrying `token` finished
    ///
    /// Returns false for stale tokens (level reset or already advanced).
    pub fn complete_fade(&mut self, token: PendingAdvance) -> bool {
        let Some(level) = self.levels.get_mut(token.tier) else {
            log::warn!("Fade token for unknown tier {}", token.tier);
            return false;
        };
        let Some(transition) = level.complete_advance(token) else {
            return false;
        };
        self.tracker.clear_if(token.index);
        if transition.completed_level() {
            let tier = TierId(token.tier);
            log::info!("{} complete", tier);
            self.completion_banner = Some(tier);
            self.emit(GameEvent::LevelCompleted { tier });
            self.on_level_completed(tier);
        }
        true
    }

    /// Move on after `tier` completed
    ///
    /// Arms and activates the next tier; after the last tier the game stays
    /// on it and reports [`GameEvent::GameCompleted`] once. Calls for a tier
    /// that is not the current, completed one are ignored.
    pub fn on_level_completed(&mut self, tier: TierId) {
        assert!(
            tier.0 < self.levels.len(),
            "completed tier {} is not in the catalogue of {} levels",
            tier.0,
            self.levels.len()
        );
        if tier.0 != self.current || !self.levels[tier.0].is_completed() {
            log::debug!(
                "Ignoring completion of {} while playing {} ({:?})",
                tier,
                TierId(self.current),
                self.current_level().state()
            );
            return;
        }
        let next = tier.0 + 1;
        if next < self.levels.len() {
            self.levels[next].reset();
            self.set_current(next);
        } else if !self.finished {
            self.finished = true;
            log::info!("All {} levels complete", self.levels.len());
            self.emit(GameEvent::GameCompleted);
        }
    }

    /// "Restart Level": fresh layout for the current tier
    pub fn reset_current_level(&mut self) {
        self.levels[self.current].reset();
        self.tracker.clear();
        self.completion_banner = None;
        if self.current + 1 == self.levels.len() {
            self.finished = false;
        }
        log::info!("Restarting {}", TierId(self.current));
        self.emit(GameEvent::LevelChanged {
            tier: TierId(self.current),
        });
    }

    /// "Tutorial": reset every tier and go back to the first
    pub fn restart_from_beginning(&mut self) {
        for level in &mut self.levels {
            level.reset();
        }
        self.current = 0;
        self.tracker.clear();
        self.completion_banner = None;
        self.finished = false;
        log::info!("Restarting from the tutorial");
        self.emit(GameEvent::LevelChanged { tier: TierId(0) });
    }

    /// Start dragging satellite `index`; only satellites still in play qualify
    pub fn grab(&mut self, index: usize) -> bool {
        if !self.current_level().is_active(index) {
            return false;
        }
        self.tracker.grab(index);
        true
    }

    pub fn grabbed(&self) -> Option<usize> {
        self.tracker.grabbed()
    }

    /// Let go of the dragged satellite, throwing it along `camera_forward`
    pub fn release(&mut self, camera_forward: Vec3) -> Option<Release> {
        self.tracker.release(camera_forward, &self.settings.interaction)
    }

    /// Where the dragged satellite should be held this frame
    pub fn held_position(&self, camera_pos: Vec3, camera_forward: Vec3) -> Option<Vec3> {
        self.tracker
            .held_position(camera_pos, camera_forward, &self.settings.interaction)
    }

    pub fn dismiss_completion_banner(&mut self) {
        self.completion_banner = None;
    }

    pub fn hud(&self) -> Hud {
        let level = self.current_level();
        let completion = if self.finished && self.current_level().is_completed() {
            Some("All levels complete".to_string())
        } else {
            self.completion_banner.map(|tier| format!("{} complete", tier))
        };
        Hud {
            title: self.current_tier().to_string(),
            retrieved: level.retrieved_count(),
            total: level.total_satellite_count(),
            completion,
        }
    }

    fn set_current(&mut self, tier: usize) {
        if tier == self.current {
            return;
        }
        self.current = tier;
        log::info!("Now playing {}", TierId(tier));
        self.emit(GameEvent::LevelChanged { tier: TierId(tier) });
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::LevelState;
    use crate::sim::collision::Body;
    use crate::sim::effects::WallSide;
    use proptest::prelude::*;

    fn game() -> Game {
        Game::new(&[1, 2, 10]).unwrap()
    }

    /// Deliver `index` and finish its fade-out; returns the outcome
    fn deliver(game: &mut Game, index: usize) -> HitOutcome {
        let outcome = game.report_collision(index);
        if let HitOutcome::Correct(token) = outcome {
            assert!(game.complete_fade(token));
        }
        outcome
    }

    fn level_changes(events: &[GameEvent]) -> Vec<TierId> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::LevelChanged { tier } => Some(*tier),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_rejects_bad_catalogue() {
        assert!(matches!(Game::new(&[]), Err(GameError::EmptyCatalogue)));
        assert!(matches!(Game::new(&[2, 0]), Err(GameError::EmptyTier { tier: 1 })));
    }

    #[test]
    fn test_catalogue_scenario() {
        let mut game = game();
        assert_eq!(game.current_tier(), TierId(0));

        assert!(matches!(deliver(&mut game, 0), HitOutcome::Correct(_)));
        assert_eq!(game.level(TierId(0)).unwrap().state(), LevelState::Completed);
        assert_eq!(game.current_tier(), TierId(1));
        assert_eq!(game.current_level().state(), LevelState::CurrentSatellite(0));

        assert_eq!(
            deliver(&mut game, 1),
            HitOutcome::Incorrect { expected: 0, got: 1 }
        );
        assert_eq!(game.current_level().state(), LevelState::CurrentSatellite(0));

        deliver(&mut game, 0);
        assert_eq!(game.current_level().state(), LevelState::CurrentSatellite(1));

        deliver(&mut game, 1);
        assert_eq!(game.level(TierId(1)).unwrap().state(), LevelState::Completed);
        assert_eq!(game.current_tier(), TierId(2));
        assert_eq!(game.current_level().total_satellite_count(), 10);
    }

    #[test]
    fn test_completion_events_in_order() {
        let mut game = game();
        deliver(&mut game, 0);
        let events = game.drain_events();
        let tail: Vec<_> = events
            .iter()
            .filter(|e| !matches!(e, GameEvent::Effect(_)))
            .copied()
            .collect();
        assert_eq!(
            tail,
            vec![
                GameEvent::LevelCompleted { tier: TierId(0) },
                GameEvent::LevelChanged { tier: TierId(1) },
            ]
        );
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_correct_hit_effects() {
        let mut game = game();
        let HitOutcome::Correct(token) = game.report_collision(0) else {
            panic!("expected a correct hit");
        };
        let events = game.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            GameEvent::Effect(Effect::FadeOutSatellite { index: 0, token: t, .. }) if t == token
        ));
        assert!(matches!(
            events[1],
            GameEvent::Effect(Effect::FlashBase { cue: FlashCue::Correct, .. })
        ));
        // Nothing moves until the fade is done
        assert_eq!(game.current_tier(), TierId(0));
    }

    #[test]
    fn test_incorrect_hit_only_flashes() {
        let mut game = Game::new(&[3]).unwrap();
        game.report_collision(2);
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::Effect(Effect::flash_base(
                FlashCue::Incorrect,
                &game.settings().feedback
            ))]
        );
        assert_eq!(game.current_level().current_index(), Some(0));
    }

    #[test]
    fn test_last_level_stays() {
        let mut game = Game::new(&[1, 1]).unwrap();
        deliver(&mut game, 0);
        deliver(&mut game, 0);
        assert_eq!(game.current_tier(), TierId(1));
        assert!(game.current_level().is_completed());
        assert!(game.is_finished());
        assert_eq!(deliver(&mut game, 0), HitOutcome::Ignored);
        assert_eq!(game.current_tier(), TierId(1));

        let events = game.drain_events();
        let completions = events.iter().filter(|e| **e == GameEvent::GameCompleted).count();
        assert_eq!(completions, 1);
        // A late duplicate notification does not re-announce completion
        game.on_level_completed(TierId(1));
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_late_completion_keeps_next_tier_progress() {
        let mut game = game();
        deliver(&mut game, 0);
        deliver(&mut game, 0);
        assert_eq!(game.current_level().state(), LevelState::CurrentSatellite(1));
        game.drain_events();

        game.on_level_completed(TierId(0));
        assert_eq!(game.current_tier(), TierId(1));
        assert_eq!(game.current_level().state(), LevelState::CurrentSatellite(1));
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_completion_of_unfinished_tier_ignored() {
        let mut game = game();
        deliver(&mut game, 0);
        game.drain_events();

        game.on_level_completed(TierId(1));
        assert_eq!(game.current_tier(), TierId(1));
        assert_eq!(game.current_level().state(), LevelState::CurrentSatellite(0));
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_replay_last_tier_rearms_completion() {
        let mut game = Game::new(&[1, 2]).unwrap();
        deliver(&mut game, 0);
        deliver(&mut game, 0);
        deliver(&mut game, 1);
        assert!(game.is_finished());
        assert_eq!(game.hud().completion.as_deref(), Some("All levels complete"));
        game.drain_events();

        game.reset_current_level();
        assert!(!game.is_finished());
        assert_eq!(game.hud().completion, None);
        assert_eq!(game.current_tier(), TierId(1));
        deliver(&mut game, 0);
        deliver(&mut game, 1);
        assert!(game.is_finished());
        let completions = game
            .drain_events()
            .iter()
            .filter(|e| **e == GameEvent::GameCompleted)
            .count();
        assert_eq!(completions, 1);

        game.restart_from_beginning();
        assert!(!game.is_finished());
        assert_eq!(game.hud().title, "Tutorial");
        for (tier, count) in [(0, 1), (1, 2)] {
            assert_eq!(game.current_tier(), TierId(tier));
            for i in 0..count {
                deliver(&mut game, i);
            }
        }
        assert!(game.is_finished());
        let completions = game
            .drain_events()
            .iter()
            .filter(|e| **e == GameEvent::GameCompleted)
            .count();
        assert_eq!(completions, 1);
    }

    #[test]
    #[should_panic(expected = "not in the catalogue")]
    fn test_unknown_tier_completion_panics() {
        let mut game = game();
        game.on_level_completed(TierId(7));
    }

    #[test]
    fn test_reset_mid_fade_discards_token() {
        let mut game = Game::new(&[3]).unwrap();
        let HitOutcome::Correct(token) = game.report_collision(0) else {
            panic!("expected a correct hit");
        };
        game.reset_current_level();
        assert!(!game.complete_fade(token));
        assert_eq!(game.current_level().current_index(), Some(0));
    }

    #[test]
    fn test_reset_current_level_always_notifies() {
        let mut game = game();
        game.reset_current_level();
        game.reset_current_level();
        assert_eq!(level_changes(&game.drain_events()), vec![TierId(0), TierId(0)]);
    }

    #[test]
    fn test_restart_from_beginning() {
        let mut game = game();
        deliver(&mut game, 0);
        deliver(&mut game, 0);
        game.drain_events();

        game.restart_from_beginning();
        assert_eq!(game.current_tier(), TierId(0));
        assert!(
            game.levels()
                .iter()
                .all(|l| l.state() == LevelState::CurrentSatellite(0))
        );
        assert_eq!(level_changes(&game.drain_events()), vec![TierId(0)]);
    }

    #[test]
    fn test_grab_cleared_on_delivery() {
        let mut game = Game::new(&[2]).unwrap();
        assert!(game.grab(0));
        deliver(&mut game, 0);
        assert_eq!(game.grabbed(), None);
        assert!(!game.grab(0), "delivered satellites cannot be grabbed");
        assert!(game.grab(1));
        let release = game.release(Vec3::NEG_Z).unwrap();
        assert_eq!(release.index, 1);
        assert_eq!(game.grabbed(), None);
    }

    #[test]
    fn test_contacts() {
        let mut game = game();
        assert_eq!(
            game.handle_contact(Contact::new(Body::Wall(WallSide::Front), Body::Satellite(0))),
            None
        );
        assert!(matches!(
            game.drain_events().as_slice(),
            [GameEvent::Effect(Effect::FlashWall { wall: WallSide::Front, .. })]
        ));
        assert!(matches!(
            game.handle_contact(Contact::new(Body::Satellite(0), Body::Base)),
            Some(HitOutcome::Correct(_))
        ));
        assert_eq!(
            game.handle_contact(Contact::new(Body::Satellite(0), Body::Satellite(1))),
            None
        );
    }

    #[test]
    fn test_hud() {
        let mut game = game();
        let hud = game.hud();
        assert_eq!(hud.title, "Tutorial");
        assert_eq!((hud.retrieved, hud.total), (0, 1));
        assert_eq!(hud.completion, None);

        deliver(&mut game, 0);
        let hud = game.hud();
        assert_eq!(hud.title, "Level 1");
        assert_eq!((hud.retrieved, hud.total), (0, 2));
        assert_eq!(hud.completion.as_deref(), Some("Tutorial complete"));

        deliver(&mut game, 0);
        assert_eq!(game.hud().completion, None);
    }

    #[test]
    fn test_target_satellite() {
        let mut game = Game::new(&[2]).unwrap();
        assert_eq!(game.target_satellite().map(|s| s.index), Some(0));
        deliver(&mut game, 0);
        assert_eq!(game.target_satellite().map(|s| s.index), Some(1));
        deliver(&mut game, 1);
        assert!(game.target_satellite().is_none());
    }

    proptest! {
        #[test]
        fn prop_completing_tier_arms_next(catalogue in prop::collection::vec(1usize..6, 1..5)) {
            let mut game = Game::new(&catalogue).unwrap();
            for (tier, &count) in catalogue.iter().enumerate() {
                prop_assert_eq!(game.current_tier(), TierId(tier));
                prop_assert_eq!(game.current_level().state(), LevelState::CurrentSatellite(0));
                for i in 0..count {
                    deliver(&mut game, i);
                }
            }
            prop_assert_eq!(game.current_tier(), TierId(catalogue.len() - 1));
            prop_assert!(game.is_finished());
            let changes = level_changes(&game.drain_events());
            prop_assert_eq!(changes.len(), catalogue.len() - 1);
        }
    }
}
