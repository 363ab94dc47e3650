//! One-way event notifications emitted by the simulation
//!
//! Drained from `tick` once per frame. The audio collaborator maps these to
//! sound effects; the shell watches `GameOver` to drive the high score store.
//! Events never feed back into the simulation.

use super::state::{AsteroidSize, SaucerSize};

/// A discrete event produced during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player fired a bullet
    Fire,
    /// A saucer fired a bullet
    UfoFire,
    /// An asteroid was destroyed (pitch keyed to size)
    AsteroidExplosion(AsteroidSize),
    /// The ship was destroyed
    ShipExplosion,
    /// A saucer entered the field
    UfoSpawned(SaucerSize),
    /// A saucer was destroyed (also silences the drone)
    UfoDestroyed,
    /// Score crossed an extra-life threshold
    ExtraLife,
    /// Periodic background pulse; quickens as the field thins
    Heartbeat {
        /// Suggested ms until the next beat
        tempo_ms: u32,
    },
    /// Session ended; emitted exactly once per Playing -> GameOver transition
    GameOver {
        /// Final session score
        score: u32,
        /// New record, if the session beat the stored high score
        new_high_score: Option<u32>,
    },
}
