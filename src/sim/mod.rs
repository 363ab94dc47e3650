//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete tick per rendered frame
//! - Seeded RNG only
//! - Wall-clock timers measured on a pause-frozen clock derived from the
//!   monotonic reading injected into `tick`
//! - No rendering, audio, or platform dependencies

pub mod collision;
pub mod events;
pub mod physics;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use events::GameEvent;
pub use state::{
    Asteroid, AsteroidSize, Bullet, GamePhase, GameState, Particle, Saucer, SaucerSize, ShapePoint,
    Ship,
};
pub use tick::{TickInput, tick};
