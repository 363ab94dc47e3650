//! Game state and core simulation types
//!
//! One `GameState` owns every entity collection and session scalar for the
//! lifetime of a session; `start` discards and recreates them. All motion
//! constants are per-tick; all cooldowns are milliseconds on the pause-frozen
//! simulation clock.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::events::GameEvent;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the start command
    StartScreen,
    /// Active gameplay
    Playing,
    /// Frozen; no tick reaches the world and the simulation clock holds
    Paused,
    /// Run ended; waiting for acknowledge
    GameOver,
}

/// Asteroid size class; fixes radius, speed scale, score, and split behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    /// Collision radius for this class
    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Large => 40.0,
            AsteroidSize::Medium => 20.0,
            AsteroidSize::Small => 10.0,
        }
    }

    /// Points awarded on destruction
    pub fn score(self) -> u32 {
        match self {
            AsteroidSize::Large => 20,
            AsteroidSize::Medium => 50,
            AsteroidSize::Small => 100,
        }
    }

    /// Child class spawned on destruction; Small fragments vanish
    pub fn split(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

/// Saucer size class; fixes radius, score, and aim accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaucerSize {
    Large,
    Small,
}

impl SaucerSize {
    /// Collision radius for this class
    pub fn radius(self) -> f32 {
        match self {
            SaucerSize::Large => 20.0,
            SaucerSize::Small => 10.0,
        }
    }

    /// Points awarded on destruction
    pub fn score(self) -> u32 {
        match self {
            SaucerSize::Large => 200,
            SaucerSize::Small => 1000,
        }
    }
}

/// The player ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading angle in radians; 0 points +x, -PI/2 points up
    pub heading: f32,
    pub radius: f32,
    /// Thrust input active this tick (drives flame render and rumble)
    pub thrusting: bool,
    /// While dead the ship is out of play except for the respawn countdown
    pub dead: bool,
    /// Ticks until respawn while dead
    pub respawn_ticks: u32,
}

impl Ship {
    /// Ship at rest, pointing up
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            heading: -std::f32::consts::FRAC_PI_2,
            radius: SHIP_RADIUS,
            thrusting: false,
            dead: false,
            respawn_ticks: 0,
        }
    }
}

/// A bullet, player or enemy
#[derive(Debug, Clone, Copy)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in ticks
    pub life: u32,
    pub radius: f32,
}

/// One vertex of an asteroid's jagged outline, fixed at creation
#[derive(Debug, Clone, Copy)]
pub struct ShapePoint {
    /// Angle around the body, radians
    pub angle: f32,
    /// Radius ratio relative to the class radius
    pub ratio: f32,
}

/// A drifting, spinning rock
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: AsteroidSize,
    /// Immutable outline descriptor
    pub shape: Vec<ShapePoint>,
    /// Current rotation angle, radians
    pub rot: f32,
    /// Rotation speed, radians per tick
    pub rot_speed: f32,
}

impl Asteroid {
    /// Collision radius, fixed by the size class
    pub fn radius(&self) -> f32 {
        self.size.radius()
    }
}

/// The enemy saucer
#[derive(Debug, Clone)]
pub struct Saucer {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: SaucerSize,
    /// Simulation-clock ms of the last shot
    pub last_fire_ms: f64,
    /// Ticks until the vertical drift is resampled
    pub dir_change_ticks: u32,
}

impl Saucer {
    /// Collision radius, fixed by the size class
    pub fn radius(&self) -> f32 {
        self.size.radius()
    }
}

/// A cosmetic explosion fragment; never collides
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in ticks
    pub life: f32,
    /// Starting life; `life / max_life` drives the fade
    pub max_life: f32,
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// World extent; positions live in [0, world.x] x [0, world.y]
    pub world: Vec2,
    /// Current phase
    pub phase: GamePhase,

    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    /// At most one saucer is ever alive
    pub saucer: Option<Saucer>,
    pub particles: Vec<Particle>,

    /// Session score; never decreases
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    /// Next score threshold that grants a life
    pub next_extra_life: u32,
    /// Best score seen by the store; committed back at game over
    pub high_score: u32,

    /// Simulation tick counter
    pub time_ticks: u64,

    /// Pause-frozen simulation clock, ms
    pub(crate) clock_ms: f64,
    /// Last monotonic reading handed to `tick`
    pub(crate) last_real_ms: Option<f64>,
    /// Ship ignores lethal collisions while the clock is below this
    pub(crate) invincible_until_ms: f64,
    /// Saucer spawn cooldown anchor
    pub(crate) last_saucer_spawn_ms: f64,
    /// Hyperspace cooldown anchor; None means never used this session
    pub(crate) last_hyperspace_ms: Option<f64>,
    /// Next scheduled heartbeat
    pub(crate) next_beat_ms: f64,
    /// Ticks until the player may fire again
    pub(crate) fire_cooldown: u32,

    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session shell on the start screen
    pub fn new(seed: u64, world: Vec2) -> Self {
        Self {
            seed,
            world,
            phase: GamePhase::StartScreen,
            ship: Ship::new(world * 0.5),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            asteroids: Vec::new(),
            saucer: None,
            particles: Vec::new(),
            score: 0,
            lives: STARTING_LIVES,
            level: 0,
            next_extra_life: EXTRA_LIFE_STEP,
            high_score: 0,
            time_ticks: 0,
            clock_ms: 0.0,
            last_real_ms: None,
            invincible_until_ms: 0.0,
            last_saucer_spawn_ms: 0.0,
            last_hyperspace_ms: None,
            next_beat_ms: 0.0,
            fire_cooldown: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Pause-frozen simulation clock, ms
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Lethal collisions only land while this holds
    pub fn ship_vulnerable(&self) -> bool {
        !self.ship.dead && self.clock_ms >= self.invincible_until_ms
    }

    /// True while the post-respawn invincibility window is open
    pub fn ship_invincible(&self) -> bool {
        self.clock_ms < self.invincible_until_ms
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
