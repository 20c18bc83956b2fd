//! Crate error types.

/// Errors raised while building a game or loading its configuration.
///
/// Gameplay input (contacts, animation callbacks) never fails; unknown or
/// stale input is reported through [`crate::sim::HitOutcome`] instead.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The level catalogue has no tiers.
    #[error("level catalogue is empty")]
    EmptyCatalogue,

    /// A tier was configured with zero satellites.
    #[error("tier {tier} has no satellites")]
    EmptyTier { tier: usize },

    /// Room bounds leave no space to place satellites.
    #[error("room bounds are too small for satellite placement")]
    RoomTooSmall,

    /// Reading or writing a settings file failed.
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings JSON could not be parsed or produced.
    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
