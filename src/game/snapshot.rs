//! Game snapshot for host-authoritative replication
//!
//! The host peer runs the canonical engine and ships opaque snapshots to
//! the mirroring client (and to reconnecting peers catching up). A
//! snapshot is the complete `GameState`, RNG included, so the restored
//! instance continues bit-for-bit. Restoring validates against the card
//! catalog: a corrupt or adversarial payload is a hard error, never a
//! silently broken game.

use crate::core::catalog::CardCatalog;
use crate::game::state::GameState;
use crate::{ClashError, Result};
use serde::{Deserialize, Serialize};

/// A serializable copy of the full game state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    state: GameState,
}

impl GameSnapshot {
    /// Capture the current state.
    pub fn capture(state: &GameState) -> Self {
        GameSnapshot {
            state: state.clone(),
        }
    }

    /// Serialize to the opaque wire form.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ClashError::SerializationError(e.to_string()))
    }

    /// Parse the opaque wire form. Structural validation happens later,
    /// in [`GameSnapshot::into_state`].
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ClashError::SerializationError(e.to_string()))
    }

    /// Validate against the catalog and unwrap into a playable state.
    pub fn into_state(self, catalog: &CardCatalog) -> Result<GameState> {
        let state = self.state;
        if state.players.len() != 2 {
            return Err(ClashError::InvalidSnapshot(format!(
                "expected 2 players, got {}",
                state.players.len()
            )));
        }
        for player in &state.players {
            for &id in &player.hand {
                if !catalog.contains(id) {
                    return Err(ClashError::InvalidSnapshot(format!(
                        "hand card {} not in catalog",
                        id
                    )));
                }
            }
            if let Some(wall) = &player.wall {
                if !catalog.contains(wall.card) {
                    return Err(ClashError::InvalidSnapshot(format!(
                        "wall card {} not in catalog",
                        wall.card
                    )));
                }
            }
            if let Some(m) = &player.miner {
                if !catalog.contains(m.card) {
                    return Err(ClashError::InvalidSnapshot(format!(
                        "miner card {} not in catalog",
                        m.card
                    )));
                }
            }
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::CardId;
    use crate::game::draft::Deck;
    use crate::game::phase::InputMode;

    fn state() -> GameState {
        let catalog = CardCatalog::builtin();
        let deck = Deck::new(&[1, 6, 11, 16, 21, 22].map(CardId::new));
        GameState::new_game(
            &catalog,
            "Alice",
            &deck,
            "Bob",
            &deck,
            InputMode::Simultaneous,
            42,
        )
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let catalog = CardCatalog::builtin();
        let original = state();
        let json = GameSnapshot::capture(&original).to_json().unwrap();

        let restored = GameSnapshot::from_json(&json)
            .unwrap()
            .into_state(&catalog)
            .unwrap();

        assert_eq!(restored.turn.turn_number, original.turn.turn_number);
        assert_eq!(restored.players[0].hand, original.players[0].hand);
        assert_eq!(restored.players[1].hp, original.players[1].hp);
        assert_eq!(restored.rng, original.rng);
    }

    #[test]
    fn test_garbage_json_is_rejected() {
        assert!(GameSnapshot::from_json("not json at all").is_err());
        assert!(GameSnapshot::from_json("{\"state\": 3}").is_err());
    }

    #[test]
    fn test_unknown_card_id_is_rejected() {
        let catalog = CardCatalog::builtin();
        let mut tampered = state();
        tampered.players[0].hand.push(CardId::new(999));

        let snap = GameSnapshot::capture(&tampered);
        assert!(snap.into_state(&catalog).is_err());
    }

    #[test]
    fn test_wrong_player_count_is_rejected() {
        let catalog = CardCatalog::builtin();
        let mut tampered = state();
        tampered.players.pop();

        let snap = GameSnapshot::capture(&tampered);
        assert!(snap.into_state(&catalog).is_err());
    }
}
