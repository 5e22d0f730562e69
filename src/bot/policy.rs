//! Move policies for computer-controlled seats.
//!
//! Policies are trait-based so hosts and the simulator can swap opponents:
//! - `GreedyBot`: the standard opponent (see [`decide`])
//! - `RandomBot`: uniform baseline for simulation

use tracing::{debug, warn};

use super::greedy::{decide, Decision};
use crate::cards::Suit;
use crate::core::{Action, GameRng, GameState, PlayerId};
use crate::error::{EngineError, Result};
use crate::games::crazy_eights::{apply_draw, apply_pass, legal_moves, CrazyEights};
use crate::rules::RulesEngine;

/// Chooses a move for a seat.
pub trait BotPolicy: Send + Sync {
    /// Short label for logs and reports.
    fn name(&self) -> &'static str;

    /// Decide what `player` does in `state`.
    ///
    /// `rng` is the policy's own stream, separate from the deck's, so a
    /// policy's coin flips never change the cards dealt.
    fn decide(&self, state: &GameState, player: PlayerId, rng: &mut GameRng) -> Decision;
}

/// The greedy opponent.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyBot;

impl BotPolicy for GreedyBot {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn decide(&self, state: &GameState, player: PlayerId, _rng: &mut GameRng) -> Decision {
        match state.top_card() {
            Some(top) => decide(state.hand(player), top),
            None => Decision::Draw,
        }
    }
}

/// Uniform random policy.
///
/// Picks uniformly among the legal plays and drawing; an 8 gets a random
/// suit.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomBot;

impl BotPolicy for RandomBot {
    fn name(&self) -> &'static str {
        "random"
    }

    fn decide(&self, state: &GameState, player: PlayerId, rng: &mut GameRng) -> Decision {
        let moves = legal_moves(state);
        // One extra slot for drawing.
        let pick = rng.gen_range_usize(0..moves.len() + 1);
        let Some(&index) = moves.get(pick) else {
            return Decision::Draw;
        };

        let is_wild = state
            .hand(player)
            .get(index)
            .is_some_and(|card| card.is_wild());
        let declared_suit = if is_wild {
            rng.choose(&Suit::ALL).copied()
        } else {
            None
        };
        Decision::PlayCard {
            index,
            declared_suit,
        }
    }
}

/// Let `policy` take the turn of whoever is on turn in `state`.
///
/// Returns the next state and the action actually applied. A draw that
/// fails because the hand is full or no card is left becomes a pass.
pub fn play_turn<P>(policy: &P, state: &GameState, rng: &mut GameRng) -> Result<(GameState, Action)>
where
    P: BotPolicy + ?Sized,
{
    let player = state.active_player().ok_or(EngineError::GameOver)?;
    let action = policy.decide(state, player, rng).into_action();
    debug!(%player, policy = policy.name(), ?action, "policy decided");

    match action {
        Action::Draw => match apply_draw(state) {
            Ok(next) => Ok((next, Action::Draw)),
            Err(err @ (EngineError::HandFull { .. } | EngineError::EmptyDeck)) => {
                warn!(%player, %err, "draw failed, passing instead");
                Ok((apply_pass(state)?, Action::Pass))
            }
            Err(err) => Err(err),
        },
        action => Ok((CrazyEights.apply_action(state, &action)?, action)),
    }
}
