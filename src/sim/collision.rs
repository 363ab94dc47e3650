//! Pairwise collision detection and resolution
//!
//! Every test is a circle-proximity check. Passes run in a fixed order, each
//! outer loop scanned in reverse so in-place removal never invalidates an
//! index, and each outer element resolves at most once per tick.
//!
//! Pass order:
//! 1. player bullet x asteroid
//! 2. ship x asteroid (vulnerability gated, 0.7-scaled asteroid radius)
//! 3. player bullet x saucer
//! 4. enemy bullet x ship (gated)
//! 5. ship x saucer (gated)

use super::events::GameEvent;
use super::score;
use super::spawn;
use super::state::{Asteroid, GameState};
use crate::consts::*;

/// Run all collision passes for one tick
pub(crate) fn resolve(state: &mut GameState) {
    bullets_vs_asteroids(state);
    ship_vs_asteroids(state);
    bullets_vs_saucer(state);
    enemy_bullets_vs_ship(state);
    ship_vs_saucer(state);
}

fn bullets_vs_asteroids(state: &mut GameState) {
    let mut i = state.bullets.len();
    while i > 0 {
        i -= 1;
        let bullet_pos = state.bullets[i].pos;
        let mut j = state.asteroids.len();
        while j > 0 {
            j -= 1;
            if bullet_pos.distance(state.asteroids[j].pos) < state.asteroids[j].radius() {
                let rock = state.asteroids.remove(j);
                state.bullets.remove(i);
                split_asteroid(state, &rock);
                break;
            }
        }
    }
}

fn ship_vs_asteroids(state: &mut GameState) {
    if !state.ship_vulnerable() {
        return;
    }
    let ship_pos = state.ship.pos;
    let ship_radius = state.ship.radius;
    let mut i = state.asteroids.len();
    while i > 0 {
        i -= 1;
        // Balance constant: the asteroid radius is scaled, not a plain sum
        let threshold = ship_radius + state.asteroids[i].radius() * 0.7;
        if ship_pos.distance(state.asteroids[i].pos) < threshold {
            destroy_ship(state);
            break;
        }
    }
}

fn bullets_vs_saucer(state: &mut GameState) {
    let mut i = state.bullets.len();
    while i > 0 {
        i -= 1;
        let Some(saucer) = state.saucer.as_ref() else {
            return;
        };
        if state.bullets[i].pos.distance(saucer.pos) < saucer.radius() {
            state.bullets.remove(i);
            destroy_saucer(state);
            return;
        }
    }
}

fn enemy_bullets_vs_ship(state: &mut GameState) {
    if !state.ship_vulnerable() {
        return;
    }
    let ship_pos = state.ship.pos;
    let ship_radius = state.ship.radius;
    let mut i = state.enemy_bullets.len();
    while i > 0 {
        i -= 1;
        if state.enemy_bullets[i].pos.distance(ship_pos) < ship_radius {
            state.enemy_bullets.remove(i);
            destroy_ship(state);
            break;
        }
    }
}

fn ship_vs_saucer(state: &mut GameState) {
    if !state.ship_vulnerable() {
        return;
    }
    let Some(saucer) = state.saucer.as_ref() else {
        return;
    };
    if state.ship.pos.distance(saucer.pos) < state.ship.radius + saucer.radius() {
        destroy_saucer(state);
        destroy_ship(state);
    }
}

/// Split a removed asteroid: two children one class smaller with independent
/// velocity and outline, score award, burst, explosion event.
fn split_asteroid(state: &mut GameState, rock: &Asteroid) {
    if let Some(child_size) = rock.size.split() {
        for _ in 0..2 {
            let child = spawn::make_asteroid(&mut state.rng, rock.pos, child_size, state.level);
            state.asteroids.push(child);
        }
    }
    spawn::burst(state, rock.pos, ASTEROID_BURST);
    state.push_event(GameEvent::AsteroidExplosion(rock.size));
    score::award(state, rock.size.score());
}

/// Remove the saucer with its score, burst, and silence event
fn destroy_saucer(state: &mut GameState) {
    let Some(saucer) = state.saucer.take() else {
        return;
    };
    score::award(state, saucer.size.score());
    spawn::burst(state, saucer.pos, SAUCER_BURST);
    state.push_event(GameEvent::UfoDestroyed);
}

/// Ship destruction procedure, shared by collisions and the hyperspace
/// mishap. No-op while already dead; losing the last life ends the session.
pub(crate) fn destroy_ship(state: &mut GameState) {
    if state.ship.dead {
        return;
    }
    state.ship.dead = true;
    state.ship.thrusting = false;
    state.ship.respawn_ticks = SHIP_RESPAWN_TICKS;

    let pos = state.ship.pos;
    spawn::burst(state, pos, SHIP_BURST);
    state.push_event(GameEvent::ShipExplosion);

    state.lives = state.lives.saturating_sub(1);
    if state.lives == 0 {
        score::finish_game(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{AsteroidSize, Bullet, GamePhase, Saucer, SaucerSize};
    use glam::Vec2;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42, Vec2::new(1280.0, 720.0));
        state.phase = GamePhase::Playing;
        state.level = 1;
        state
    }

    fn rock_at(state: &mut GameState, pos: Vec2, size: AsteroidSize) {
        let rock = spawn::make_asteroid(&mut state.rng, pos, size, 1);
        state.asteroids.push(rock);
    }

    fn bullet_at(pos: Vec2) -> Bullet {
        Bullet {
            pos,
            vel: Vec2::ZERO,
            life: BULLET_LIFETIME,
            radius: BULLET_RADIUS,
        }
    }

    fn saucer_at(pos: Vec2, size: SaucerSize) -> Saucer {
        Saucer {
            pos,
            vel: Vec2::ZERO,
            size,
            last_fire_ms: 0.0,
            dir_change_ticks: 100,
        }
    }

    #[test]
    fn test_bullet_splits_large_into_two_medium_children() {
        let mut state = playing_state();
        let pos = Vec2::new(300.0, 300.0);
        rock_at(&mut state, pos, AsteroidSize::Large);
        state.bullets.push(bullet_at(pos));

        resolve(&mut state);

        assert_eq!(state.asteroids.len(), 2);
        for child in &state.asteroids {
            assert_eq!(child.size, AsteroidSize::Medium);
            assert_eq!(child.pos, pos);
        }
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, AsteroidSize::Large.score());
        assert!(
            state
                .events
                .contains(&GameEvent::AsteroidExplosion(AsteroidSize::Large))
        );
    }

    #[test]
    fn test_small_asteroid_leaves_no_children() {
        let mut state = playing_state();
        let pos = Vec2::new(300.0, 300.0);
        rock_at(&mut state, pos, AsteroidSize::Small);
        state.bullets.push(bullet_at(pos));

        resolve(&mut state);

        assert!(state.asteroids.is_empty());
        assert_eq!(state.score, AsteroidSize::Small.score());
    }

    #[test]
    fn test_one_bullet_hits_one_asteroid() {
        let mut state = playing_state();
        let pos = Vec2::new(300.0, 300.0);
        rock_at(&mut state, pos, AsteroidSize::Small);
        rock_at(&mut state, pos, AsteroidSize::Small);
        state.bullets.push(bullet_at(pos));

        resolve(&mut state);

        // First-match-wins: a single bullet removes a single rock
        assert_eq!(state.asteroids.len(), 1);
    }

    #[test]
    fn test_ship_asteroid_threshold_uses_scaled_radius() {
        // Just outside the scaled threshold: no hit
        let mut state = playing_state();
        let gap = SHIP_RADIUS + AsteroidSize::Large.radius() * 0.7;
        let rock_pos = state.ship.pos + Vec2::new(gap + 0.5, 0.0);
        rock_at(
            &mut state,
            rock_pos,
            AsteroidSize::Large,
        );
        resolve(&mut state);
        assert!(!state.ship.dead);

        // Just inside it: hit, even though an unscaled radius sum would
        // already have fired at the distance above
        let mut state = playing_state();
        let rock_pos = state.ship.pos + Vec2::new(gap - 0.5, 0.0);
        rock_at(
            &mut state,
            rock_pos,
            AsteroidSize::Large,
        );
        resolve(&mut state);
        assert!(state.ship.dead);
    }

    #[test]
    fn test_invincible_ship_ignores_lethal_collisions() {
        let mut state = playing_state();
        state.invincible_until_ms = 3000.0;
        state.clock_ms = 2999.0;
        let ship_pos = state.ship.pos;
        rock_at(&mut state, ship_pos, AsteroidSize::Large);
        state.enemy_bullets.push(bullet_at(state.ship.pos));
        state.saucer = Some(saucer_at(state.ship.pos, SaucerSize::Large));

        resolve(&mut state);
        assert!(!state.ship.dead);
        assert_eq!(state.lives, STARTING_LIVES);

        // Window closed: the same layout kills
        state.clock_ms = 3000.0;
        resolve(&mut state);
        assert!(state.ship.dead);
    }

    #[test]
    fn test_bullet_kills_saucer_and_awards_score() {
        let mut state = playing_state();
        let pos = Vec2::new(500.0, 300.0);
        state.saucer = Some(saucer_at(pos, SaucerSize::Small));
        state.bullets.push(bullet_at(pos));

        resolve(&mut state);

        assert!(state.saucer.is_none());
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, SaucerSize::Small.score());
        assert!(state.events.contains(&GameEvent::UfoDestroyed));
    }

    #[test]
    fn test_ramming_saucer_destroys_both() {
        let mut state = playing_state();
        state.saucer = Some(saucer_at(state.ship.pos, SaucerSize::Large));

        resolve(&mut state);

        assert!(state.saucer.is_none());
        assert!(state.ship.dead);
        assert_eq!(state.score, SaucerSize::Large.score());
        assert_eq!(state.lives, STARTING_LIVES - 1);
    }

    #[test]
    fn test_enemy_bullet_kills_ship() {
        let mut state = playing_state();
        state.enemy_bullets.push(bullet_at(state.ship.pos));

        resolve(&mut state);

        assert!(state.ship.dead);
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.ship.respawn_ticks, SHIP_RESPAWN_TICKS);
        assert!(state.events.contains(&GameEvent::ShipExplosion));
    }

    #[test]
    fn test_destroy_ship_is_noop_while_dead() {
        let mut state = playing_state();
        destroy_ship(&mut state);
        assert_eq!(state.lives, STARTING_LIVES - 1);
        destroy_ship(&mut state);
        assert_eq!(state.lives, STARTING_LIVES - 1);
    }

    #[test]
    fn test_last_life_ends_the_game() {
        let mut state = playing_state();
        state.lives = 1;
        destroy_ship(&mut state);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }
}
