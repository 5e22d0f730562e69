//! Crazy 8s rules over an explicit `GameState`.
//!
//! Every operation takes the current state by reference and returns the
//! next one. On error the caller keeps its old state, which is exactly the
//! "reject and re-prompt" recovery the host needs.

use tracing::{debug, info, warn};

use crate::cards::Suit;
use crate::core::{
    default_name, Action, EmptyDeckPolicy, GameConfig, GameRng, GameState, Phase, PlayerId,
    PlayerMap,
};
use crate::error::{EngineError, Result};
use crate::rules::{is_legal, playable_indices, GameResult, MoveList, RulesEngine};

/// Start a game: shuffle, deal both hands and turn up the starter card.
///
/// `names` are the human's and the bot's display names; blank names fall
/// back to "Player" and "Bot".
pub fn new_game<S: AsRef<str>>(names: [S; 2], config: GameConfig) -> Result<GameState> {
    let rng = match config.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    let names = PlayerMap::new(|player| {
        let name = names[player.index()].as_ref().trim();
        if name.is_empty() {
            default_name(player).to_string()
        } else {
            name.to_string()
        }
    });
    GameState::deal(config, names, rng)
}

/// Start the next game with the same names and config.
///
/// The deck is shuffled with a generator forked from the finished game's,
/// so a seeded session replays identically.
pub fn reset(state: &GameState) -> Result<GameState> {
    let mut rng = state.rng.clone();
    GameState::deal(state.config, state.names.clone(), rng.fork())
}

/// Hand indices the participant on turn may legally play.
///
/// Empty once the game is over.
#[must_use]
pub fn legal_moves(state: &GameState) -> MoveList {
    let Some(player) = state.active_player() else {
        return MoveList::new();
    };
    match state.top_card() {
        Some(top) => playable_indices(state.hand(player), top),
        None => (0..state.hand(player).len()).collect(),
    }
}

/// Whether the participant on turn could draw a card right now.
#[must_use]
pub fn can_draw(state: &GameState) -> bool {
    let Some(player) = state.active_player() else {
        return false;
    };
    let deck = state.deck();
    !state.hand(player).is_full()
        && (deck.draw_len() > 0
            || (state.config().empty_deck == EmptyDeckPolicy::Reshuffle && deck.discard_len() > 1))
}

/// Play the card at `index` for the participant on turn.
///
/// An 8 needs `declared_suit`; for any other card it is ignored. Emptying
/// the hand ends the game, otherwise the turn passes.
pub fn apply_play(state: &GameState, index: usize, declared_suit: Option<Suit>) -> Result<GameState> {
    let player = state.active_player().ok_or(EngineError::GameOver)?;
    let hand = state.hand(player);
    let card = *hand.get(index).ok_or(EngineError::InvalidIndex {
        index,
        len: hand.len(),
    })?;

    if let Some(top) = state.top_card() {
        if !is_legal(&card, top) {
            return Err(EngineError::IllegalPlay { card, top: *top });
        }
    }
    let declared_suit = if card.is_wild() {
        Some(declared_suit.ok_or(EngineError::SuitRequired)?)
    } else {
        None
    };

    let mut next = state.clone();
    let mut played = next.deck.play(&mut next.hands[player], index)?;
    if let Some(suit) = declared_suit {
        played = next.deck.declare_top(suit)?;
    }
    debug!(%player, card = %played, "played card");

    next.record(
        player,
        Action::Play {
            index,
            declared_suit,
        },
        Some(played),
    );

    if next.hands[player].is_empty() {
        info!(winner = %player, name = next.name(player), turns = next.turn_number, "game over");
        next.phase = Phase::GameOver { winner: player };
    } else {
        next.advance_turn(player);
    }

    debug_assert!(next.is_conserved());
    Ok(next)
}

/// Draw one card for the participant on turn; the turn then passes.
///
/// With [`EmptyDeckPolicy::Reshuffle`] an exhausted draw pile is refilled
/// from the discard pile (minus its top) first.
pub fn apply_draw(state: &GameState) -> Result<GameState> {
    let player = state.active_player().ok_or(EngineError::GameOver)?;
    let capacity = state.hand(player).capacity();
    if state.hand(player).is_full() {
        return Err(EngineError::HandFull { capacity });
    }

    let mut next = state.clone();
    let card = match next.deck.deal() {
        Ok(card) => card,
        Err(EngineError::EmptyDeck) if next.config.empty_deck == EmptyDeckPolicy::Reshuffle => {
            let moved = next.deck.recycle_discard(&mut next.rng);
            if moved == 0 {
                return Err(EngineError::EmptyDeck);
            }
            warn!(moved, "draw pile exhausted, recycled discard pile");
            next.deck.deal()?
        }
        Err(err) => return Err(err),
    };
    next.hands[player].push(card)?;
    debug!(%player, hand = next.hands[player].len(), "drew card");

    next.record(player, Action::Draw, None);
    next.advance_turn(player);

    debug_assert!(next.is_conserved());
    Ok(next)
}

/// Yield the turn without touching the deck.
pub fn apply_pass(state: &GameState) -> Result<GameState> {
    let player = state.active_player().ok_or(EngineError::GameOver)?;

    let mut next = state.clone();
    debug!(%player, "passed");
    next.record(player, Action::Pass, None);
    next.advance_turn(player);
    Ok(next)
}

/// The winner, once a hand has been emptied.
#[must_use]
pub fn is_game_over(state: &GameState) -> Option<PlayerId> {
    match state.phase() {
        Phase::GameOver { winner } => Some(winner),
        Phase::HumanTurn | Phase::BotTurn => None,
    }
}

/// Crazy 8s as a [`RulesEngine`].
///
/// Stateless: all game data lives in `GameState`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CrazyEights;

impl RulesEngine for CrazyEights {
    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        let Some(player) = state.active_player() else {
            return vec![];
        };
        let hand = state.hand(player);

        let mut actions = Vec::new();
        for index in legal_moves(state) {
            let is_wild = hand.get(index).is_some_and(|card| card.is_wild());
            if is_wild {
                actions.extend(Suit::ALL.iter().map(|&suit| Action::play_wild(index, suit)));
            } else {
                actions.push(Action::play(index));
            }
        }
        if can_draw(state) {
            actions.push(Action::Draw);
        }
        actions.push(Action::Pass);
        actions
    }

    fn apply_action(&self, state: &GameState, action: &Action) -> Result<GameState> {
        match *action {
            Action::Play {
                index,
                declared_suit,
            } => apply_play(state, index, declared_suit),
            Action::Draw => apply_draw(state),
            Action::Pass => apply_pass(state),
        }
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        is_game_over(state).map(GameResult::Winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, DECK_SIZE};

    fn seeded(seed: u64) -> GameConfig {
        GameConfig::default().with_seed(seed)
    }

    fn c(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    #[test]
    fn test_new_game_defaults_blank_names() {
        let state = new_game(["  ", ""], seeded(1)).unwrap();
        assert_eq!(state.name(PlayerId::HUMAN), "Player");
        assert_eq!(state.name(PlayerId::BOT), "Bot");

        let state = new_game([" Ada ", "Hal"], seeded(1)).unwrap();
        assert_eq!(state.name(PlayerId::HUMAN), "Ada");
        assert_eq!(state.name(PlayerId::BOT), "Hal");
    }

    #[test]
    fn test_new_game_is_seeded() {
        let a = new_game(["a", "b"], seeded(99)).unwrap();
        let b = new_game(["a", "b"], seeded(99)).unwrap();
        assert_eq!(a.deck(), b.deck());
        assert_eq!(a.hand(PlayerId::HUMAN), b.hand(PlayerId::HUMAN));
        assert_eq!(a.hand(PlayerId::BOT), b.hand(PlayerId::BOT));
    }

    #[test]
    fn test_play_passes_turn_and_records() {
        let state = GameState::arranged(
            GameConfig::default(),
            &[c(Suit::Hearts, Rank::Nine), c(Suit::Clubs, Rank::Two)],
            &[c(Suit::Spades, Rank::Two)],
            c(Suit::Hearts, Rank::Five),
            3,
        )
        .unwrap();

        let next = apply_play(&state, 0, None).unwrap();

        assert_eq!(next.top_card(), Some(&c(Suit::Hearts, Rank::Nine)));
        assert_eq!(next.hand(PlayerId::HUMAN).len(), 1);
        assert_eq!(next.phase(), Phase::BotTurn);
        assert_eq!(next.history().len(), 1);
        assert_eq!(next.history()[0].card, Some(c(Suit::Hearts, Rank::Nine)));

        // The input state is untouched.
        assert_eq!(state.hand(PlayerId::HUMAN).len(), 2);
        assert_eq!(state.phase(), Phase::HumanTurn);
    }

    #[test]
    fn test_illegal_play_is_rejected() {
        let state = GameState::arranged(
            GameConfig::default(),
            &[c(Suit::Clubs, Rank::Two)],
            &[c(Suit::Spades, Rank::Two)],
            c(Suit::Diamonds, Rank::Seven),
            3,
        )
        .unwrap();

        assert_eq!(
            apply_play(&state, 0, None).unwrap_err(),
            EngineError::IllegalPlay {
                card: c(Suit::Clubs, Rank::Two),
                top: c(Suit::Diamonds, Rank::Seven),
            }
        );
        assert_eq!(
            apply_play(&state, 4, None).unwrap_err(),
            EngineError::InvalidIndex { index: 4, len: 1 }
        );
    }

    #[test]
    fn test_eight_requires_suit() {
        let state = GameState::arranged(
            GameConfig::default(),
            &[c(Suit::Clubs, Rank::Eight), c(Suit::Clubs, Rank::Two)],
            &[c(Suit::Spades, Rank::Two)],
            c(Suit::Diamonds, Rank::Seven),
            3,
        )
        .unwrap();

        assert_eq!(apply_play(&state, 0, None).unwrap_err(), EngineError::SuitRequired);

        let next = apply_play(&state, 0, Some(Suit::Spades)).unwrap();
        let top = next.top_card().unwrap();
        assert_eq!(top.effective_suit(), Suit::Spades);
        assert_eq!(top.identity(), (Suit::Clubs, Rank::Eight));
    }

    #[test]
    fn test_declared_suit_ignored_for_plain_cards() {
        let state = GameState::arranged(
            GameConfig::default(),
            &[c(Suit::Diamonds, Rank::Two), c(Suit::Clubs, Rank::Two)],
            &[c(Suit::Spades, Rank::Two)],
            c(Suit::Diamonds, Rank::Seven),
            3,
        )
        .unwrap();

        let next = apply_play(&state, 0, Some(Suit::Spades)).unwrap();
        assert_eq!(next.top_card().unwrap().effective_suit(), Suit::Diamonds);
        assert_eq!(next.history()[0].action, Action::play(0));
    }

    #[test]
    fn test_last_card_wins() {
        let state = GameState::arranged(
            GameConfig::default(),
            &[c(Suit::Hearts, Rank::King)],
            &[c(Suit::Spades, Rank::Two)],
            c(Suit::Hearts, Rank::Five),
            3,
        )
        .unwrap();

        let next = apply_play(&state, 0, None).unwrap();
        assert_eq!(is_game_over(&next), Some(PlayerId::HUMAN));
        assert!(legal_moves(&next).is_empty());
        assert_eq!(apply_pass(&next).unwrap_err(), EngineError::GameOver);
        assert_eq!(apply_draw(&next).unwrap_err(), EngineError::GameOver);
    }

    #[test]
    fn test_draw_at_capacity() {
        let config = GameConfig::default().with_deal_size(1).with_hand_capacity(2);
        let state = GameState::arranged(
            config,
            &[c(Suit::Clubs, Rank::Two), c(Suit::Clubs, Rank::Three)],
            &[c(Suit::Spades, Rank::Two)],
            c(Suit::Diamonds, Rank::Seven),
            3,
        )
        .unwrap();

        assert_eq!(
            apply_draw(&state).unwrap_err(),
            EngineError::HandFull { capacity: 2 }
        );
        assert_eq!(state.hand(PlayerId::HUMAN).len(), 2);
        assert!(!can_draw(&state));
    }

    #[test]
    fn test_draw_passes_turn() {
        let state = new_game(["a", "b"], seeded(5)).unwrap();
        let next = apply_draw(&state).unwrap();

        assert_eq!(next.hand(PlayerId::HUMAN).len(), 9);
        assert_eq!(next.deck().draw_len(), state.deck().draw_len() - 1);
        assert_eq!(next.phase(), Phase::BotTurn);
        assert_eq!(next.card_count(), DECK_SIZE);
    }

    #[test]
    fn test_pass_yields_turn_without_touching_deck() {
        let state = new_game(["a", "b"], seeded(5)).unwrap();
        let next = apply_pass(&state).unwrap();

        assert_eq!(next.deck(), state.deck());
        assert_eq!(next.phase(), Phase::BotTurn);
        assert_eq!(next.turn_number(), 2);
    }

    #[test]
    fn test_reset_deals_fresh_game() {
        let state = GameState::arranged(
            GameConfig::default(),
            &[c(Suit::Hearts, Rank::King)],
            &[c(Suit::Spades, Rank::Two)],
            c(Suit::Hearts, Rank::Five),
            3,
        )
        .unwrap();
        let finished = apply_play(&state, 0, None).unwrap();

        let fresh = reset(&finished).unwrap();
        assert_eq!(fresh.phase(), Phase::HumanTurn);
        assert_eq!(fresh.hand(PlayerId::HUMAN).len(), 8);
        assert_eq!(fresh.hand(PlayerId::BOT).len(), 8);
        assert!(fresh.history().is_empty());
        assert!(fresh.is_conserved());

        // Deterministic from the finished state.
        assert_eq!(reset(&finished).unwrap().deck(), fresh.deck());
    }

    #[test]
    fn test_legal_actions_expand_wild_suits() {
        let state = GameState::arranged(
            GameConfig::default(),
            &[c(Suit::Hearts, Rank::Nine), c(Suit::Spades, Rank::Eight)],
            &[c(Suit::Spades, Rank::Two)],
            c(Suit::Hearts, Rank::Five),
            3,
        )
        .unwrap();

        let actions = CrazyEights.legal_actions(&state);
        // One plain play, four wild declarations, draw, pass.
        assert_eq!(actions.len(), 7);
        assert!(actions.contains(&Action::play(0)));
        assert!(actions.contains(&Action::play_wild(1, Suit::Clubs)));
        assert!(actions.contains(&Action::Draw));
        assert!(actions.contains(&Action::Pass));
        assert!(CrazyEights.is_legal_action(&state, &Action::Pass));
        assert!(!CrazyEights.is_legal_action(&state, &Action::play(1)));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` and return what it logged at `warn` and above.
    fn warnings_during(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    /// Every card is in a hand except K♣, the only discard.
    fn exhausted_table() -> GameState {
        let human: Vec<Card> = [Suit::Hearts, Suit::Diamonds]
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| c(suit, rank)))
            .collect();
        let bot: Vec<Card> = Rank::ALL[..12]
            .iter()
            .map(|&rank| c(Suit::Clubs, rank))
            .chain(Rank::ALL.iter().map(|&rank| c(Suit::Spades, rank)))
            .collect();
        let config = GameConfig::default().with_deal_size(1).with_hand_capacity(30);
        GameState::arranged(config, &human, &bot, c(Suit::Clubs, Rank::King), 3).unwrap()
    }

    #[test]
    fn test_empty_recycle_is_not_logged() {
        let state = exhausted_table();
        assert_eq!(state.deck().draw_len(), 0);

        let logs = warnings_during(|| {
            assert_eq!(apply_draw(&state).unwrap_err(), EngineError::EmptyDeck);
        });
        assert!(!logs.contains("recycled"), "unexpected log: {logs}");
    }

    #[test]
    fn test_recycle_is_logged() {
        // K♥ on K♣ leaves one card to recycle for the bot's draw.
        let state = apply_play(&exhausted_table(), 12, None).unwrap();

        let logs = warnings_during(|| {
            let next = apply_draw(&state).unwrap();
            assert_eq!(next.hand(PlayerId::BOT).len(), 26);
        });
        assert!(logs.contains("recycled discard pile"), "missing log: {logs}");
    }

    #[test]
    fn test_apply_action_dispatch() {
        let state = new_game(["a", "b"], seeded(8)).unwrap();
        let next = CrazyEights.apply_action(&state, &Action::Pass).unwrap();
        assert_eq!(next.phase(), Phase::BotTurn);
        assert_eq!(CrazyEights.is_terminal(&next), None);
    }
}
