//! Turn state machine for hosts.
//!
//! A `Session` owns the current `GameState` and the bot's policy. The host
//! feeds it `Command`s (the human's clicks, "let the bot move now", "new
//! game") and renders the `Event`s it returns. Commands arriving out of turn
//! are rejected and leave the session untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::game::{apply_draw, apply_pass, apply_play, is_game_over, new_game, reset};
use crate::bot::{play_turn, BotPolicy, GreedyBot};
use crate::cards::{Card, Suit};
use crate::core::{Action, GameConfig, GameRng, GameState, Phase, PlayerId};
use crate::error::{EngineError, Result};

/// Mixed into the game seed to give the bot its own random stream.
const POLICY_STREAM: u64 = 0x5851_F42D_4C95_7F2D;

/// Input from the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// The human plays a card; an 8 needs a suit.
    Play {
        index: usize,
        declared_suit: Option<Suit>,
    },
    /// The human draws.
    Draw,
    /// The human passes.
    Pass,
    /// The bot takes its turn.
    BotMove,
    /// Abandon or finish the current game and deal a new one.
    NewGame,
}

/// Something that happened, for the host to display.
///
/// `Display` renders the status line shown to the human.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A plain card was played.
    Played {
        player: PlayerId,
        name: String,
        card: Card,
    },
    /// An 8 was played and a suit declared.
    Declared {
        player: PlayerId,
        name: String,
        card: Card,
        suit: Suit,
    },
    Drew {
        player: PlayerId,
        name: String,
    },
    Passed {
        player: PlayerId,
        name: String,
    },
    /// A hand was emptied.
    Won {
        player: PlayerId,
        name: String,
    },
    /// Fresh deal; the human opens.
    NewGame,
}

/// "You" for the human, the display name otherwise.
fn subject(player: PlayerId, name: &str) -> &str {
    if player == PlayerId::HUMAN {
        "You"
    } else {
        name
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Played { player, name, card } => {
                write!(f, "{} played {card}", subject(*player, name))
            }
            Event::Declared {
                player, name, suit, ..
            } => write!(
                f,
                "{} played an 8 and changed suit to {suit}",
                subject(*player, name)
            ),
            Event::Drew { player, name } => {
                write!(f, "{} drew a card", subject(*player, name))
            }
            Event::Passed { player, name } => {
                if *player == PlayerId::HUMAN {
                    write!(f, "You passed your turn")
                } else {
                    write!(f, "{name} passed")
                }
            }
            Event::Won { player, .. } if *player == PlayerId::HUMAN => {
                write!(f, "Congratulations! You won the game!")
            }
            Event::Won { name, .. } => {
                write!(f, "{name} won this time. Better luck next game!")
            }
            Event::NewGame => write!(f, "New game started. Your turn."),
        }
    }
}

/// Events describing the most recent action in `state`.
fn events_for_last_action(state: &GameState) -> Vec<Event> {
    let Some(record) = state.history().last() else {
        return vec![];
    };
    let player = record.player;
    let name = state.name(player).to_string();

    let mut events = Vec::with_capacity(2);
    match (record.action, record.card) {
        (Action::Play { .. }, Some(card)) => match card.declared_suit() {
            Some(suit) => events.push(Event::Declared {
                player,
                name,
                card,
                suit,
            }),
            None => events.push(Event::Played {
                player,
                name,
                card,
            }),
        },
        (Action::Play { .. }, None) => {}
        (Action::Draw, _) => events.push(Event::Drew {
            player,
            name,
        }),
        (Action::Pass, _) => events.push(Event::Passed {
            player,
            name,
        }),
    }

    if let Some(winner) = is_game_over(state) {
        events.push(Event::Won {
            player: winner,
            name: state.name(winner).to_string(),
        });
    }
    events
}

/// A human-versus-bot game driven by commands.
#[derive(Clone, Debug)]
pub struct Session<P: BotPolicy = GreedyBot> {
    state: GameState,
    policy: P,
    rng: GameRng,
}

impl<P: BotPolicy> Session<P> {
    /// Deal a new game for `names` against `policy`.
    pub fn new<S: AsRef<str>>(names: [S; 2], config: GameConfig, policy: P) -> Result<Self> {
        Ok(Self::with_state(new_game(names, config)?, policy))
    }

    /// Drive an existing game.
    #[must_use]
    pub fn with_state(state: GameState, policy: P) -> Self {
        let rng = GameRng::new(state.seed() ^ POLICY_STREAM);
        Self { state, policy, rng }
    }

    /// Current game.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Phase of the current game.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Apply one command.
    ///
    /// On error the session is unchanged and the host should re-prompt.
    pub fn handle(&mut self, command: Command) -> Result<Vec<Event>> {
        debug!(?command, phase = ?self.state.phase(), "handling command");

        let next = match command {
            Command::NewGame => {
                self.state = reset(&self.state)?;
                return Ok(vec![Event::NewGame]);
            }
            Command::BotMove => {
                self.expect_turn(PlayerId::BOT)?;
                let (next, _) = play_turn(&self.policy, &self.state, &mut self.rng)?;
                next
            }
            Command::Play {
                index,
                declared_suit,
            } => {
                self.expect_turn(PlayerId::HUMAN)?;
                apply_play(&self.state, index, declared_suit)?
            }
            Command::Draw => {
                self.expect_turn(PlayerId::HUMAN)?;
                apply_draw(&self.state)?
            }
            Command::Pass => {
                self.expect_turn(PlayerId::HUMAN)?;
                apply_pass(&self.state)?
            }
        };

        self.state = next;
        Ok(events_for_last_action(&self.state))
    }

    fn expect_turn(&self, player: PlayerId) -> Result<()> {
        match self.state.active_player() {
            None => Err(EngineError::GameOver),
            Some(active) if active == player => Ok(()),
            Some(_) => Err(EngineError::NotYourTurn { player }),
        }
    }
}
