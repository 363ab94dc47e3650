//! Per-frame simulation tick and the session state machine
//!
//! `tick` is the only entry point that mutates a `GameState`. The caller
//! hands in the sampled input and a monotonic millisecond reading; the
//! pause-frozen simulation clock is derived here, so Paused freezes every
//! wall-clock deadline without the collaborators doing anything.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::events::GameEvent;
use super::physics;
use super::spawn;
use super::state::{GamePhase, GameState, Ship};
use crate::consts::*;

/// Input commands for a single tick
///
/// Level-triggered fields hold while the key is down; edge-triggered fields
/// must already be deduplicated to one activation per physical press (see
/// `crate::input`).
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub fire: bool,
    /// Edge: jump to a random position, 1-in-8 mishap
    pub hyperspace: bool,
    /// Edge: toggle Playing <-> Paused
    pub pause: bool,
    /// Edge: start a session, or acknowledge game over
    pub start: bool,
}

/// Advance the world by one tick and drain the events it produced
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> Vec<GameEvent> {
    // The simulation clock follows the monotonic reading only while Playing;
    // every other phase freezes it, which freezes every ms-based deadline.
    if state.phase == GamePhase::Playing {
        if let Some(last) = state.last_real_ms {
            state.clock_ms += (now_ms - last).max(0.0);
        }
    }
    state.last_real_ms = Some(now_ms);

    match state.phase {
        GamePhase::StartScreen => {
            if input.start {
                start_game(state);
            }
        }
        GamePhase::GameOver => {
            if input.start {
                state.phase = GamePhase::StartScreen;
            }
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
            }
        }
        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
            } else {
                run_tick(state, input);
            }
        }
    }

    state.drain_events()
}

/// One full Playing update: physics, spawns, collisions, level/game-over
/// re-evaluation. Atomic with respect to observers.
fn run_tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;
    if state.fire_cooldown > 0 {
        state.fire_cooldown -= 1;
    }

    heartbeat(state);

    physics::update_ship(state, input);
    if input.fire {
        spawn::player_fire(state);
    }
    if input.hyperspace {
        hyperspace(state);
    }

    let world = state.world;
    physics::update_bullets(&mut state.bullets, world);
    physics::update_bullets(&mut state.enemy_bullets, world);
    physics::update_asteroids(state);
    physics::update_saucer(state);
    spawn::saucer_fire(state);
    physics::update_particles(&mut state.particles);

    collision::resolve(state);

    // Level clear needs the field empty and the sky clear of saucers
    if state.phase == GamePhase::Playing
        && state.asteroids.is_empty()
        && state.saucer.is_none()
    {
        state.level += 1;
        spawn::spawn_wave(state);
    }

    if state.phase == GamePhase::Playing {
        spawn::maybe_spawn_saucer(state);
    }
}

/// StartScreen -> Playing: rebuild every collection and scalar, grant the
/// opening invincibility window, arm the saucer cooldown, spawn wave 1.
/// The high score survives; everything else is a fresh session.
fn start_game(state: &mut GameState) {
    log::info!(
        "new session: seed {} world {}x{}",
        state.seed,
        state.world.x,
        state.world.y
    );
    state.phase = GamePhase::Playing;
    state.ship = Ship::new(state.world * 0.5);
    state.bullets.clear();
    state.enemy_bullets.clear();
    state.asteroids.clear();
    state.saucer = None;
    state.particles.clear();

    state.score = 0;
    state.lives = STARTING_LIVES;
    state.next_extra_life = EXTRA_LIFE_STEP;
    state.time_ticks = 0;
    state.fire_cooldown = 0;

    state.invincible_until_ms = state.clock_ms + SHIP_INVINCIBLE_MS;
    state.last_saucer_spawn_ms = state.clock_ms;
    state.last_hyperspace_ms = None;
    state.next_beat_ms = state.clock_ms;

    state.level = 1;
    spawn::spawn_wave(state);
}

/// Emit the background pulse and schedule the next one. More rocks, slower
/// pulse; the floor keeps the endgame from buzzing.
fn heartbeat(state: &mut GameState) {
    if state.clock_ms >= state.next_beat_ms {
        let tempo = (HEARTBEAT_BASE_MS
            + HEARTBEAT_PER_ASTEROID_MS * state.asteroids.len() as f64)
            .max(HEARTBEAT_MIN_MS);
        state.push_event(GameEvent::Heartbeat {
            tempo_ms: tempo as u32,
        });
        state.next_beat_ms = state.clock_ms + tempo;
    }
}

/// Hyperspace jump: random re-entry inside the edge inset, velocity zeroed,
/// then the mishap roll. A cooldown-blocked attempt consumes nothing, not
/// even the roll.
fn hyperspace(state: &mut GameState) {
    if state.ship.dead {
        return;
    }
    if let Some(last) = state.last_hyperspace_ms {
        if state.clock_ms - last < HYPERSPACE_COOLDOWN_MS {
            return;
        }
    }
    state.last_hyperspace_ms = Some(state.clock_ms);

    state.ship.pos = Vec2::new(
        state
            .rng
            .random_range(HYPERSPACE_MARGIN..state.world.x - HYPERSPACE_MARGIN),
        state
            .rng
            .random_range(HYPERSPACE_MARGIN..state.world.y - HYPERSPACE_MARGIN),
    );
    state.ship.vel = Vec2::ZERO;

    if state.rng.random_bool(HYPERSPACE_MISHAP_ODDS) {
        collision::destroy_ship(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::AsteroidSize;

    const TICK_MS: f64 = 1000.0 / 60.0;

    fn new_state() -> GameState {
        GameState::new(12345, Vec2::new(1280.0, 720.0))
    }

    fn started(now_ms: f64) -> GameState {
        let mut state = new_state();
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, now_ms);
        state
    }

    #[test]
    fn test_new_game_initial_state() {
        let state = started(0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.asteroids.len(), 4);
        assert!(state.asteroids.iter().all(|a| a.size == AsteroidSize::Large));
        assert!(state.saucer.is_none());
    }

    #[test]
    fn test_ship_starts_invincible() {
        let mut state = started(0.0);
        // Drop a rock on the ship right away: the opening window holds
        let pos = state.ship.pos;
        let rock = spawn::make_asteroid(&mut state.rng, pos, AsteroidSize::Large, 1);
        state.asteroids.push(rock);

        tick(&mut state, &TickInput::default(), TICK_MS);
        assert!(!state.ship.dead);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_level_clear_spawns_next_wave() {
        let mut state = started(0.0);
        state.asteroids.clear();

        tick(&mut state, &TickInput::default(), TICK_MS);
        assert_eq!(state.level, 2);
        assert_eq!(state.asteroids.len(), 5);
        assert!(state.asteroids.iter().all(|a| a.size == AsteroidSize::Large));
    }

    #[test]
    fn test_level_clear_waits_for_saucer() {
        let mut state = started(0.0);
        // Field is empty but a saucer lingers: no advance
        state.clock_ms = SAUCER_SPAWN_COOLDOWN_MS + 1.0;
        spawn::maybe_spawn_saucer(&mut state);
        assert!(state.saucer.is_some());
        state.asteroids.clear();

        let next_clock = state.clock_ms + TICK_MS;
        tick(&mut state, &TickInput::default(), next_clock);
        assert_eq!(state.level, 1);
        assert!(state.asteroids.is_empty());
    }

    #[test]
    fn test_last_life_transitions_to_game_over_and_commits_high_score() {
        let mut state = started(0.0);
        state.lives = 1;
        state.score = 900;
        state.high_score = 500;

        // Past the opening window, with a rock parked on the ship
        let pos = state.ship.pos;
        let rock = spawn::make_asteroid(&mut state.rng, pos, AsteroidSize::Large, 1);
        state.asteroids.push(rock);
        let events = tick(&mut state, &TickInput::default(), SHIP_INVINCIBLE_MS + 100.0);

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 900);
        assert!(events.contains(&GameEvent::GameOver {
            score: 900,
            new_high_score: Some(900),
        }));
    }

    #[test]
    fn test_game_over_without_beating_high_score() {
        let mut state = started(0.0);
        state.lives = 1;
        state.high_score = 5000;

        let pos = state.ship.pos;
        let rock = spawn::make_asteroid(&mut state.rng, pos, AsteroidSize::Large, 1);
        state.asteroids.push(rock);
        let events = tick(&mut state, &TickInput::default(), SHIP_INVINCIBLE_MS + 100.0);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 5000);
        assert!(events.contains(&GameEvent::GameOver {
            score: 0,
            new_high_score: None,
        }));
    }

    #[test]
    fn test_acknowledge_returns_to_start_screen_keeping_high_score() {
        let mut state = started(0.0);
        state.high_score = 7777;
        state.lives = 1;
        crate::sim::collision::destroy_ship(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, 100.0);
        assert_eq!(state.phase, GamePhase::StartScreen);
        assert_eq!(state.high_score, 7777);
    }

    #[test]
    fn test_pause_freezes_the_simulation_clock() {
        let mut state = started(0.0);
        tick(&mut state, &TickInput::default(), 1000.0);
        assert_eq!(state.clock_ms(), 1000.0);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, 1016.0);
        assert_eq!(state.phase, GamePhase::Paused);

        // A long paused span moves nothing
        for i in 0..10 {
            tick(&mut state, &TickInput::default(), 2000.0 + i as f64 * 1000.0);
        }
        assert_eq!(state.clock_ms(), 1016.0);

        tick(&mut state, &pause, 60_000.0);
        assert_eq!(state.phase, GamePhase::Playing);
        tick(&mut state, &TickInput::default(), 60_016.0);
        assert_eq!(state.clock_ms(), 1032.0);

        // The opening invincibility window survived the pause intact
        assert!(state.ship_invincible());
    }

    #[test]
    fn test_paused_world_does_not_move() {
        let mut state = started(0.0);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, TICK_MS);

        let rock_positions: Vec<_> = state.asteroids.iter().map(|a| a.pos).collect();
        let ticks_before = state.time_ticks;
        for i in 0..20 {
            tick(&mut state, &TickInput::default(), 100.0 + i as f64 * TICK_MS);
        }
        let rock_positions_after: Vec<_> = state.asteroids.iter().map(|a| a.pos).collect();
        assert_eq!(rock_positions, rock_positions_after);
        assert_eq!(state.time_ticks, ticks_before);
    }

    #[test]
    fn test_saucer_spawns_after_cooldown() {
        let mut state = started(0.0);
        let events = tick(
            &mut state,
            &TickInput::default(),
            SAUCER_SPAWN_COOLDOWN_MS + 1.0,
        );
        assert!(state.saucer.is_some());
        let size = state.saucer.as_ref().map(|s| s.size).expect("saucer alive");
        assert!(events.contains(&GameEvent::UfoSpawned(size)));
    }

    #[test]
    fn test_fire_spawns_bullet_and_event() {
        let mut state = started(0.0);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input, TICK_MS);
        assert_eq!(state.bullets.len(), 1);
        assert!(events.contains(&GameEvent::Fire));

        // Bullet leaves the nose with inherited velocity
        let bullet = state.bullets[0];
        assert!(bullet.life > 0);
        assert!(bullet.vel.length() > 0.0);
    }

    #[test]
    fn test_hyperspace_moves_ship_and_cooldown_blocks_retry() {
        let mut state = started(0.0);
        let center = state.world * 0.5;
        let input = TickInput {
            hyperspace: true,
            ..Default::default()
        };

        // First jump of a session is always available
        tick(&mut state, &input, TICK_MS);
        let jumped_to = state.ship.pos;
        assert_ne!(jumped_to, center);
        assert_eq!(state.ship.vel, Vec2::ZERO);

        // Second attempt inside the cooldown: no move, no mishap roll
        let rng_before = state.rng.clone();
        let lives_before = state.lives;
        tick(&mut state, &input, 2.0 * TICK_MS);
        assert_eq!(state.ship.pos, jumped_to);
        assert_eq!(state.rng, rng_before);
        assert_eq!(state.lives, lives_before);
    }

    #[test]
    fn test_hyperspace_lands_inside_the_margin() {
        for seed in 0..50 {
            let mut state = GameState::new(seed, Vec2::new(1280.0, 720.0));
            let start = TickInput {
                start: true,
                ..Default::default()
            };
            tick(&mut state, &start, 0.0);
            let input = TickInput {
                hyperspace: true,
                ..Default::default()
            };
            tick(&mut state, &input, TICK_MS);
            if state.ship.dead {
                // Mishap roll fired; position still re-entered in bounds
                assert_eq!(state.lives, STARTING_LIVES - 1);
            }
            assert!(state.ship.pos.x >= HYPERSPACE_MARGIN);
            assert!(state.ship.pos.x <= state.world.x - HYPERSPACE_MARGIN);
            assert!(state.ship.pos.y >= HYPERSPACE_MARGIN);
            assert!(state.ship.pos.y <= state.world.y - HYPERSPACE_MARGIN);
        }
    }

    #[test]
    fn test_heartbeat_quickens_as_the_field_thins() {
        let mut state = started(0.0);
        let events = tick(&mut state, &TickInput::default(), TICK_MS);
        let full_field = events.iter().find_map(|e| match e {
            GameEvent::Heartbeat { tempo_ms } => Some(*tempo_ms),
            _ => None,
        });

        state.asteroids.clear();
        state.next_beat_ms = state.clock_ms;
        // One lone rock left (wave respawn is held off by keeping one)
        let pos = Vec2::new(100.0, 100.0);
        let rock = spawn::make_asteroid(&mut state.rng, pos, AsteroidSize::Small, 1);
        state.asteroids.push(rock);
        let events = tick(&mut state, &TickInput::default(), 2.0 * TICK_MS);
        let thin_field = events.iter().find_map(|e| match e {
            GameEvent::Heartbeat { tempo_ms } => Some(*tempo_ms),
            _ => None,
        });

        let (full, thin) = (full_field.expect("beat"), thin_field.expect("beat"));
        assert!(thin < full, "thin field should beat faster: {thin} vs {full}");
    }

    #[test]
    fn test_determinism_same_seed_same_script() {
        let mut a = new_state();
        let mut b = new_state();

        let script = [
            TickInput {
                start: true,
                ..Default::default()
            },
            TickInput {
                thrust: true,
                fire: true,
                ..Default::default()
            },
            TickInput {
                turn_left: true,
                thrust: true,
                ..Default::default()
            },
            TickInput {
                hyperspace: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for (i, input) in script.iter().enumerate() {
            let now = i as f64 * TICK_MS;
            let ea = tick(&mut a, input, now);
            let eb = tick(&mut b, input, now);
            assert_eq!(ea, eb);
        }

        assert_eq!(a.ship.pos, b.ship.pos);
        assert_eq!(a.score, b.score);
        assert_eq!(a.asteroids.len(), b.asteroids.len());
        for (ra, rb) in a.asteroids.iter().zip(&b.asteroids) {
            assert_eq!(ra.pos, rb.pos);
            assert_eq!(ra.vel, rb.vel);
        }
    }
}
