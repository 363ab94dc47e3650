//! Read-only per-tick view for the rendering and audio collaborators
//!
//! Built fresh after each `tick`; borrows the entity collections rather than
//! copying them. Nothing here feeds back into the simulation.

use crate::consts::*;
use crate::sim::state::{Asteroid, Bullet, GamePhase, GameState, Particle, Saucer, SaucerSize, Ship};

/// Continuous audio signal levels, as opposed to the discrete event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSignals {
    /// Thrust rumble while the ship burns
    pub thrust_rumble: bool,
    /// Saucer drone while one is on screen, keyed to its size
    pub saucer_drone: Option<SaucerSize>,
}

/// One frame's worth of world to draw
#[derive(Debug)]
pub struct Snapshot<'a> {
    /// The ship, absent while dead or blinked off by invincibility
    pub ship: Option<&'a Ship>,
    pub bullets: &'a [Bullet],
    pub enemy_bullets: &'a [Bullet],
    pub asteroids: &'a [Asteroid],
    pub saucer: Option<&'a Saucer>,
    pub particles: &'a [Particle],
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    pub level: u32,
    pub phase: GamePhase,
    pub audio: AudioSignals,
}

impl GameState {
    /// Invincibility blink: visible on alternating 100 ms half-periods while
    /// the window is open, steady otherwise
    pub fn ship_blink_visible(&self) -> bool {
        if !self.ship_invincible() {
            return true;
        }
        (self.clock_ms() / SHIP_BLINK_MS) as i64 % 2 == 1
    }

    /// Borrow the world for rendering and audio
    pub fn snapshot(&self) -> Snapshot<'_> {
        let playing = self.phase == GamePhase::Playing;
        let ship_visible = !self.ship.dead && self.ship_blink_visible();
        Snapshot {
            ship: ship_visible.then_some(&self.ship),
            bullets: &self.bullets,
            enemy_bullets: &self.enemy_bullets,
            asteroids: &self.asteroids,
            saucer: self.saucer.as_ref(),
            particles: &self.particles,
            score: self.score,
            high_score: self.high_score,
            lives: self.lives,
            level: self.level,
            phase: self.phase,
            audio: AudioSignals {
                thrust_rumble: playing && !self.ship.dead && self.ship.thrusting,
                saucer_drone: if playing {
                    self.saucer.as_ref().map(|s| s.size)
                } else {
                    None
                },
            },
        }
    }
}

impl Particle {
    /// Fade alpha in [0, 1] for rendering
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}
