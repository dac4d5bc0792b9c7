//! Main game state structure

use crate::core::catalog::CardCatalog;
use crate::core::player::{PlayerId, PlayerState};
use crate::game::combat::GameOutcome;
use crate::game::draft::Deck;
use crate::game::phase::{GamePhase, InputMode, LockedAction, TurnState};
use crate::{ClashError, Result};
use rand_chacha::ChaCha12Rng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// One turn's pair of locked actions, appended to history after every
/// resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub actions: [LockedAction; 2],
}

/// Complete game state.
///
/// Everything needed to continue the game lives here, including the
/// current RNG state, so a serialized `GameState` is a faithful replica
/// for a mirroring peer and games replay bit-for-bit from a seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Both players, seat order (index == PlayerId)
    pub players: Vec<PlayerState>,

    pub turn: TurnState,

    pub phase: GamePhase,

    /// Set once the game resolves
    pub outcome: Option<GameOutcome>,

    /// Append-only log of locked action pairs
    pub history: Vec<TurnRecord>,

    pub mode: InputMode,

    /// RNG for AI decisions during play; serialized with the state so
    /// snapshot/restore never forks the random stream.
    pub rng: ChaCha12Rng,
}

impl GameState {
    /// Create a game from two finished decks. Decks are validated here -
    /// a malformed deck is a hard error, never a playable game.
    pub fn new_game(
        catalog: &CardCatalog,
        p1_name: impl Into<String>,
        deck1: &Deck,
        p2_name: impl Into<String>,
        deck2: &Deck,
        mode: InputMode,
        seed: u64,
    ) -> Result<Self> {
        deck1.validate(catalog)?;
        deck2.validate(catalog)?;

        let players = vec![
            PlayerState::new(PlayerId::P1, p1_name, &deck1.cards),
            PlayerState::new(PlayerId::P2, p2_name, &deck2.cards),
        ];

        Ok(GameState {
            players,
            turn: TurnState::new(mode),
            phase: GamePhase::Playing,
            outcome: None,
            history: Vec::new(),
            mode,
            rng: ChaCha12Rng::seed_from_u64(seed),
        })
    }

    pub fn player(&self, id: PlayerId) -> Result<&PlayerState> {
        self.players
            .get(id.index())
            .ok_or(ClashError::PlayerNotFound(id.as_u8()))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut PlayerState> {
        self.players
            .get_mut(id.index())
            .ok_or(ClashError::PlayerNotFound(id.as_u8()))
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Reseed the play RNG (before the first turn, for reproducible games).
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = ChaCha12Rng::seed_from_u64(seed);
    }
}
