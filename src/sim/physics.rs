//! Per-tick motion integration and toroidal wraparound
//!
//! Position updates are Euler steps in per-tick units. Two wrap rules exist
//! on purpose: body entities wrap using their own radius as margin, bullets
//! wrap at the exact boundary.

use glam::Vec2;
use rand::Rng;

use super::state::{Bullet, GameState, Particle};
use super::tick::TickInput;
use crate::consts::*;

/// Wrap a body position using its radius as margin: leaving one edge by more
/// than the radius re-enters just past the opposite edge.
pub fn wrap_with_margin(pos: &mut Vec2, radius: f32, world: Vec2) {
    if pos.x < -radius {
        pos.x = world.x + radius;
    } else if pos.x > world.x + radius {
        pos.x = -radius;
    }
    if pos.y < -radius {
        pos.y = world.y + radius;
    } else if pos.y > world.y + radius {
        pos.y = -radius;
    }
}

/// Bullet wrap: exact boundary, zero margin
pub fn wrap_exact(pos: &mut Vec2, world: Vec2) {
    if pos.x < 0.0 {
        pos.x = world.x;
    } else if pos.x > world.x {
        pos.x = 0.0;
    }
    if pos.y < 0.0 {
        pos.y = world.y;
    } else if pos.y > world.y {
        pos.y = 0.0;
    }
}

/// Advance the ship one tick: countdown/respawn while dead, otherwise
/// turn, thrust, friction, move, wrap.
pub(crate) fn update_ship(state: &mut GameState, input: &TickInput) {
    if state.ship.dead {
        state.ship.respawn_ticks = state.ship.respawn_ticks.saturating_sub(1);
        if state.ship.respawn_ticks == 0 {
            respawn_ship(state);
        }
        return;
    }

    if input.turn_left {
        state.ship.heading -= SHIP_TURN_RATE;
    }
    if input.turn_right {
        state.ship.heading += SHIP_TURN_RATE;
    }

    state.ship.thrusting = input.thrust;
    if state.ship.thrusting {
        state.ship.vel += Vec2::from_angle(state.ship.heading) * SHIP_THRUST;
    }

    // Friction applies whether or not thrusting
    state.ship.vel *= SHIP_FRICTION;

    state.ship.pos += state.ship.vel;
    let radius = state.ship.radius;
    wrap_with_margin(&mut state.ship.pos, radius, state.world);
}

/// Put the ship back at world center with a fresh invincibility window
fn respawn_ship(state: &mut GameState) {
    state.ship.pos = state.world * 0.5;
    state.ship.vel = Vec2::ZERO;
    state.ship.heading = -std::f32::consts::FRAC_PI_2;
    state.ship.dead = false;
    state.invincible_until_ms = state.clock_ms + SHIP_INVINCIBLE_MS;
}

/// Advance one bullet collection: move, exact wrap, expire
pub(crate) fn update_bullets(bullets: &mut Vec<Bullet>, world: Vec2) {
    for bullet in bullets.iter_mut() {
        bullet.pos += bullet.vel;
        wrap_exact(&mut bullet.pos, world);
        bullet.life = bullet.life.saturating_sub(1);
    }
    bullets.retain(|b| b.life > 0);
}

/// Advance asteroids: drift, spin, margin wrap
pub(crate) fn update_asteroids(state: &mut GameState) {
    let world = state.world;
    for rock in state.asteroids.iter_mut() {
        rock.pos += rock.vel;
        rock.rot += rock.rot_speed;
        let radius = rock.radius();
        wrap_with_margin(&mut rock.pos, radius, world);
    }
}

/// Advance the saucer: constant horizontal drift, randomized vertical
/// wander forced inward near the edges, despawn once fully off screen.
pub(crate) fn update_saucer(state: &mut GameState) {
    let world = state.world;
    let Some(saucer) = state.saucer.as_mut() else {
        return;
    };

    saucer.pos += saucer.vel;

    saucer.dir_change_ticks = saucer.dir_change_ticks.saturating_sub(1);
    if saucer.dir_change_ticks == 0 {
        saucer.vel.y = state.rng.random_range(-SAUCER_DRIFT_SPEED..SAUCER_DRIFT_SPEED);
        saucer.dir_change_ticks = state
            .rng
            .random_range(SAUCER_DRIFT_MIN_TICKS..SAUCER_DRIFT_MAX_TICKS);
    }

    if saucer.pos.y < SAUCER_EDGE_MARGIN {
        saucer.vel.y = saucer.vel.y.abs();
    }
    if saucer.pos.y > world.y - SAUCER_EDGE_MARGIN {
        saucer.vel.y = -saucer.vel.y.abs();
    }

    // No horizontal wrap: the saucer crosses the field once and leaves
    if saucer.pos.x < -SAUCER_DESPAWN_MARGIN || saucer.pos.x > world.x + SAUCER_DESPAWN_MARGIN {
        state.saucer = None;
    }
}

/// Advance particles; they drift, expire, and never wrap
pub(crate) fn update_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.life -= 1.0;
    }
    particles.retain(|p| p.life > 0.0);
}
