//! Score accumulation, extra lives, and the game-over commit
//!
//! Score only moves through `award`. The extra-life check loops, so one
//! resolution batch that jumps several thresholds grants one life per
//! threshold crossed.

use super::events::GameEvent;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Add points and grant any extra lives the new total has earned
pub(crate) fn award(state: &mut GameState, points: u32) {
    state.score += points;
    while state.score >= state.next_extra_life {
        state.lives += 1;
        state.next_extra_life += EXTRA_LIFE_STEP;
        state.push_event(GameEvent::ExtraLife);
    }
}

/// Playing -> GameOver transition. The high score is compared and committed
/// here and nowhere else, so the store sees at most one write per session.
pub(crate) fn finish_game(state: &mut GameState) {
    state.phase = GamePhase::GameOver;

    let new_high_score = if state.score > state.high_score {
        state.high_score = state.score;
        Some(state.score)
    } else {
        None
    };
    log::info!(
        "game over: score {} level {} (high score {})",
        state.score,
        state.level,
        state.high_score
    );
    state.push_event(GameEvent::GameOver {
        score: state.score,
        new_high_score,
    });
}
