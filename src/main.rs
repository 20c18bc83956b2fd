//! Retrieve To Base headless driver
//!
//! Plays a scripted session against the gameplay core and logs what a host
//! would render. Usage: `retrieve-to-base [settings.json]`

use retrieve_to_base::Settings;
use retrieve_to_base::sim::{Body, Contact, Effect, Game, GameEvent, WallSide};

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    let mut game = match Game::from_settings(settings) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot start game: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Retrieve To Base (headless) starting...");
    log_hud(&game);

    // A throw that bounces off a wall first
    game.handle_contact(Contact::new(Body::Satellite(0), Body::Wall(WallSide::Front)));
    flush(&mut game);

    while !game.is_finished() {
        let level = game.current_level();
        let Some(expected) = level.current_index() else {
            break;
        };

        // Deliver the wrong one first when there is one to choose
        if level.total_satellite_count() > expected + 1 {
            game.report_collision(expected + 1);
            flush(&mut game);
        }

        if !game.grab(expected) {
            log::warn!("Satellite {} is not grabbable", expected);
        }
        if let Some(release) = game.release(glam::Vec3::NEG_Z) {
            log::debug!("Threw satellite {} with impulse {}", release.index, release.impulse);
        }
        game.handle_contact(Contact::new(Body::Base, Body::Satellite(expected)));
        flush(&mut game);
    }

    log::info!("Session finished");
}

/// Play every queued effect instantly and report the rest
fn flush(game: &mut Game) {
    loop {
        let events = game.drain_events();
        if events.is_empty() {
            break;
        }
        for event in events {
            match event {
                GameEvent::Effect(Effect::FadeOutSatellite { index, token, .. }) => {
                    log::info!("Fading out satellite {}", index);
                    game.complete_fade(token);
                }
                GameEvent::Effect(effect) => log::info!("Effect: {:?}", effect),
                GameEvent::LevelCompleted { tier } => log::info!("{} complete!", tier),
                GameEvent::LevelChanged { tier } => {
                    let level = game.current_level();
                    log::info!(
                        "Building scene for {} with {} satellites",
                        tier,
                        level.active_satellites().len()
                    );
                    log_hud(game);
                }
                GameEvent::GameCompleted => log::info!("Game complete!"),
            }
        }
    }
}

fn log_hud(game: &Game) {
    let hud = game.hud();
    log::info!("[{}] {}/{}", hud.title, hud.retrieved, hud.total);
    if let Some(target) = game.target_satellite() {
        log::info!("Minimap target: satellite {} at {}", target.index, target.position);
    }
}
