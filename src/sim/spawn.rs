//! Spawn logic: asteroid waves, saucers, bullets, particle bursts
//!
//! Everything random here flows through the state-owned RNG so a wave, a
//! saucer roll, or a burst replays identically from the same seed.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::events::GameEvent;
use super::state::{Asteroid, AsteroidSize, Bullet, GameState, Particle, Saucer, SaucerSize, ShapePoint};
use crate::consts::*;

/// Build one asteroid at `pos` with a freshly randomized outline, drift, and
/// spin. Linear speed scales with the current level.
pub(crate) fn make_asteroid(rng: &mut Pcg32, pos: Vec2, size: AsteroidSize, level: u32) -> Asteroid {
    let vertices = rng.random_range(ASTEROID_VERTICES_MIN..ASTEROID_VERTICES_MAX);
    let mut shape = Vec::with_capacity(vertices);
    for i in 0..vertices {
        shape.push(ShapePoint {
            angle: (i as f32 / vertices as f32) * std::f32::consts::TAU,
            ratio: 1.0 + rng.random_range(-ASTEROID_JAGGEDNESS..ASTEROID_JAGGEDNESS),
        });
    }

    let speed = ASTEROID_SPEED * (1.0 + (level.saturating_sub(1)) as f32 * ASTEROID_LEVEL_SPEED_STEP);
    let direction = rng.random_range(0.0..std::f32::consts::TAU);

    Asteroid {
        pos,
        vel: Vec2::new(
            direction.cos() * speed * rng.random_range(0.5..1.5),
            direction.sin() * speed * rng.random_range(0.5..1.5),
        ),
        size,
        shape,
        rot: 0.0,
        rot_speed: rng.random_range(-ASTEROID_ROT_SPEED..ASTEROID_ROT_SPEED),
    }
}

/// Spawn the wave for the current level: `4 + (level - 1)` large rocks, each
/// placed by rejection sampling at least `ASTEROID_SAFE_DIST` from the ship.
/// The retry loop is capped; on a saturated world the farthest candidate
/// seen is accepted.
pub(crate) fn spawn_wave(state: &mut GameState) {
    let count = STARTING_ASTEROIDS + state.level.saturating_sub(1);
    log::info!(
        "level {}: spawning {} asteroids (seed {})",
        state.level,
        count,
        state.seed
    );

    for _ in 0..count {
        let mut best = Vec2::ZERO;
        let mut best_dist = f32::NEG_INFINITY;
        for _ in 0..ASTEROID_PLACEMENT_TRIES {
            let candidate = Vec2::new(
                state.rng.random_range(0.0..state.world.x),
                state.rng.random_range(0.0..state.world.y),
            );
            let dist = candidate.distance(state.ship.pos);
            if dist > best_dist {
                best = candidate;
                best_dist = dist;
            }
            if dist > ASTEROID_SAFE_DIST {
                break;
            }
        }
        let rock = make_asteroid(&mut state.rng, best, AsteroidSize::Large, state.level);
        state.asteroids.push(rock);
    }
}

/// Spawn a saucer if none is alive and the cooldown has elapsed. Size stays
/// Large until the score clears the gate, then goes 50/50.
pub(crate) fn maybe_spawn_saucer(state: &mut GameState) {
    if state.saucer.is_some() {
        return;
    }
    if state.clock_ms - state.last_saucer_spawn_ms < SAUCER_SPAWN_COOLDOWN_MS {
        return;
    }
    state.last_saucer_spawn_ms = state.clock_ms;

    let size = if state.score > SAUCER_SMALL_SCORE_GATE && state.rng.random_bool(0.5) {
        SaucerSize::Small
    } else {
        SaucerSize::Large
    };
    let from_left = state.rng.random_bool(0.5);

    let saucer = Saucer {
        pos: Vec2::new(
            if from_left {
                -SAUCER_ENTRY_MARGIN
            } else {
                state.world.x + SAUCER_ENTRY_MARGIN
            },
            state
                .rng
                .random_range(SAUCER_ENTRY_INSET..state.world.y - SAUCER_ENTRY_INSET),
        ),
        vel: Vec2::new(if from_left { SAUCER_SPEED } else { -SAUCER_SPEED }, 0.0),
        size,
        last_fire_ms: state.clock_ms,
        dir_change_ticks: 0,
    };
    log::debug!("saucer enters: {:?}", saucer.size);
    state.saucer = Some(saucer);
    state.push_event(GameEvent::UfoSpawned(size));
}

/// Fire the saucer gun when its interval elapses and the ship is alive.
/// Small saucers aim with jitter; large ones spray at random.
pub(crate) fn saucer_fire(state: &mut GameState) {
    if state.ship.dead {
        return;
    }
    let ship_pos = state.ship.pos;
    let clock = state.clock_ms;
    let Some(saucer) = state.saucer.as_mut() else {
        return;
    };
    if clock - saucer.last_fire_ms <= SAUCER_FIRE_INTERVAL_MS {
        return;
    }
    saucer.last_fire_ms = clock;

    let angle = match saucer.size {
        SaucerSize::Small => {
            let aim = (ship_pos - saucer.pos).to_angle();
            aim + state.rng.random_range(-SAUCER_AIM_JITTER..SAUCER_AIM_JITTER)
        }
        SaucerSize::Large => state.rng.random_range(0.0..std::f32::consts::TAU),
    };

    let pos = saucer.pos;
    state.enemy_bullets.push(Bullet {
        pos,
        vel: Vec2::from_angle(angle) * BULLET_SPEED * ENEMY_BULLET_SPEED_SCALE,
        life: BULLET_LIFETIME,
        radius: BULLET_RADIUS,
    });
    state.push_event(GameEvent::UfoFire);
}

/// Fire the ship gun if the rate gate and the live-bullet cap allow it.
/// The bullet leaves the nose and inherits half the ship velocity.
pub(crate) fn player_fire(state: &mut GameState) {
    if state.ship.dead {
        return;
    }
    if state.fire_cooldown > 0 {
        return;
    }
    if state.bullets.len() >= MAX_BULLETS {
        return;
    }
    state.fire_cooldown = FIRE_COOLDOWN_TICKS;

    let nose = Vec2::from_angle(state.ship.heading);
    state.bullets.push(Bullet {
        pos: state.ship.pos + nose * state.ship.radius,
        vel: nose * BULLET_SPEED + state.ship.vel * 0.5,
        life: BULLET_LIFETIME,
        radius: BULLET_RADIUS,
    });
    state.push_event(GameEvent::Fire);
}

/// Emit an explosion burst at `pos`. Purely cosmetic; the pool is capped and
/// overflow is dropped.
pub(crate) fn burst(state: &mut GameState, pos: Vec2, count: usize) {
    for _ in 0..count {
        if state.particles.len() >= MAX_PARTICLES {
            return;
        }
        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = state.rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
        state.particles.push(Particle {
            pos,
            vel: Vec2::from_angle(angle) * speed,
            life: state.rng.random_range(PARTICLE_MIN_LIFE..PARTICLE_MAX_LIFE),
            max_life: PARTICLE_MAX_LIFE,
        });
    }
}
