//! Vectoroids - a classic vector-arcade asteroids game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `input`: Named-action sampler with edge dedup
//! - `snapshot`: Read-only per-tick view for rendering and audio
//! - `highscores`: High score persistence
//!
//! The simulation is pure with respect to its collaborators: rendering and
//! audio consume the snapshot and the event stream, input feeds a sampled
//! `TickInput`, and the high score store is only touched at session
//! boundaries. Everything random flows through one seeded RNG owned by the
//! game state, so a run is reproducible from its seed.

pub mod highscores;
pub mod input;
pub mod sim;
pub mod snapshot;

pub use highscores::{FileHighScore, HighScoreStore, MemoryHighScore};
pub use input::{Action, InputState};
pub use sim::{GameEvent, GamePhase, GameState, TickInput, tick};
pub use snapshot::{AudioSignals, Snapshot};

/// Game tuning constants
pub mod consts {
    /// Ship collision radius (also the hull size for rendering)
    pub const SHIP_RADIUS: f32 = 15.0;
    /// Thrust acceleration per tick
    pub const SHIP_THRUST: f32 = 0.12;
    /// Velocity retained each tick (applied whether or not thrusting)
    pub const SHIP_FRICTION: f32 = 0.99;
    /// Turn rate in radians per tick
    pub const SHIP_TURN_RATE: f32 = 0.07;
    /// Invincibility window after spawn/respawn (ms, simulation clock)
    pub const SHIP_INVINCIBLE_MS: f64 = 3000.0;
    /// Blink half-period while invincible (ms)
    pub const SHIP_BLINK_MS: f64 = 100.0;
    /// Ticks between ship destruction and respawn
    pub const SHIP_RESPAWN_TICKS: u32 = 120;

    /// Player bullet muzzle speed, pixels per tick
    pub const BULLET_SPEED: f32 = 7.0;
    /// Bullet lifetime in ticks
    pub const BULLET_LIFETIME: u32 = 60;
    /// Bullet collision radius
    pub const BULLET_RADIUS: f32 = 2.0;
    /// Player bullets alive at once
    pub const MAX_BULLETS: usize = 4;
    /// Minimum ticks between player shots
    pub const FIRE_COOLDOWN_TICKS: u32 = 8;
    /// Saucer bullets fly at this fraction of player bullet speed
    pub const ENEMY_BULLET_SPEED_SCALE: f32 = 0.8;

    /// Hyperspace cooldown (ms, simulation clock)
    pub const HYPERSPACE_COOLDOWN_MS: f64 = 3000.0;
    /// Re-entry inset from every world edge
    pub const HYPERSPACE_MARGIN: f32 = 50.0;
    /// Chance the jump destroys the ship on re-entry
    pub const HYPERSPACE_MISHAP_ODDS: f64 = 1.0 / 8.0;

    /// Base asteroid speed at level 1, pixels per tick
    pub const ASTEROID_SPEED: f32 = 1.5;
    /// Per-level speed increase factor
    pub const ASTEROID_LEVEL_SPEED_STEP: f32 = 0.1;
    /// Vertex count range for the jagged polygon, half-open
    pub const ASTEROID_VERTICES_MIN: usize = 7;
    pub const ASTEROID_VERTICES_MAX: usize = 12;
    /// Vertex radius-ratio spread around 1.0
    pub const ASTEROID_JAGGEDNESS: f32 = 0.4;
    /// Minimum wave-spawn distance from the ship
    pub const ASTEROID_SAFE_DIST: f32 = 150.0;
    /// Placement rejection-sampling retry cap
    pub const ASTEROID_PLACEMENT_TRIES: u32 = 32;
    /// Asteroid rotation speed spread, radians per tick
    pub const ASTEROID_ROT_SPEED: f32 = 0.02;
    /// Large asteroids in the first wave
    pub const STARTING_ASTEROIDS: u32 = 4;

    /// Saucer horizontal speed, pixels per tick
    pub const SAUCER_SPEED: f32 = 2.0;
    /// Per-saucer fire interval (ms, simulation clock)
    pub const SAUCER_FIRE_INTERVAL_MS: f64 = 2000.0;
    /// Cooldown between saucer spawns (ms, simulation clock)
    pub const SAUCER_SPAWN_COOLDOWN_MS: f64 = 15000.0;
    /// Score above which small saucers join the rotation
    pub const SAUCER_SMALL_SCORE_GATE: u32 = 10_000;
    /// Angular noise on small-saucer aimed shots, radians
    pub const SAUCER_AIM_JITTER: f32 = 0.15;
    /// Vertical drift speed spread, pixels per tick
    pub const SAUCER_DRIFT_SPEED: f32 = 1.5;
    /// Ticks between vertical drift resamples, half-open range
    pub const SAUCER_DRIFT_MIN_TICKS: u32 = 60;
    pub const SAUCER_DRIFT_MAX_TICKS: u32 = 150;
    /// Vertical band kept clear of the top/bottom edges
    pub const SAUCER_EDGE_MARGIN: f32 = 30.0;
    /// Horizontal overshoot at which a saucer despawns
    pub const SAUCER_DESPAWN_MARGIN: f32 = 50.0;
    /// Horizontal inset outside the edge where a saucer enters
    pub const SAUCER_ENTRY_MARGIN: f32 = 20.0;
    /// Vertical inset for the entry row
    pub const SAUCER_ENTRY_INSET: f32 = 50.0;

    /// Particle lifetime upper bound in ticks (drives fade)
    pub const PARTICLE_MAX_LIFE: f32 = 50.0;
    /// Particle lifetime lower bound
    pub const PARTICLE_MIN_LIFE: f32 = 20.0;
    /// Particle speed range, pixels per tick
    pub const PARTICLE_MIN_SPEED: f32 = 1.0;
    pub const PARTICLE_MAX_SPEED: f32 = 4.0;
    /// Cosmetic particle pool cap
    pub const MAX_PARTICLES: usize = 512;
    /// Burst sizes per destruction kind
    pub const SHIP_BURST: usize = 15;
    pub const ASTEROID_BURST: usize = 6;
    pub const SAUCER_BURST: usize = 10;

    /// Lives at session start
    pub const STARTING_LIVES: u32 = 3;
    /// Score step between extra lives
    pub const EXTRA_LIFE_STEP: u32 = 10_000;

    /// Heartbeat floor (ms between beats)
    pub const HEARTBEAT_MIN_MS: f64 = 150.0;
    /// Heartbeat base interval (ms)
    pub const HEARTBEAT_BASE_MS: f64 = 200.0;
    /// Added interval per live asteroid (ms)
    pub const HEARTBEAT_PER_ASTEROID_MS: f64 = 40.0;
}
