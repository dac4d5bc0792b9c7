//! Player state and per-player field units

use crate::core::card::{CardId, Element, MinerKind};
use crate::core::rules::{ENERGY_CAP, STARTING_ENERGY, STARTING_HP};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Seat identifier; exactly two players, ids 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const P1: PlayerId = PlayerId(0);
    pub const P2: PlayerId = PlayerId(1);

    pub fn new(id: u8) -> Self {
        PlayerId(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// The opposing seat.
    pub fn opponent(&self) -> PlayerId {
        PlayerId(1 - self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

/// A player's defensive wall. At most one per player; destroyed at 0 HP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallInstance {
    /// Catalog id of the card that placed this wall
    pub card: CardId,
    pub element: Element,
    pub hp: i32,
    pub max_hp: i32,
    /// Turn the wall was placed
    pub placed_turn: u32,
}

/// A player's resource miner. At most one per player.
///
/// A miner placed on turn T is immune to death-by-base-damage during turn
/// T only (placement-grace), and does not tick its payout countdown on
/// that turn either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinerInstance {
    /// Catalog id of the card that placed this miner
    pub card: CardId,
    pub kind: MinerKind,
    pub element: Element,
    /// Turns until the next payout fires
    pub countdown: u8,
    /// Payout interval the countdown resets to after firing
    pub interval: u8,
    pub placed_turn: u32,
}

/// Full per-player game state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,

    pub name: String,

    /// The deck is emptied into the hand once at game start; there is no
    /// draw mechanic. A revealed card is consumed from the hand.
    pub hand: SmallVec<[CardId; 6]>,

    pub hp: i32,
    pub max_hp: i32,

    pub energy: u8,
    pub max_energy: u8,

    /// Card picked this turn, cleared during resolution
    pub selected_card: Option<CardId>,

    pub wall: Option<WallInstance>,
    pub miner: Option<MinerInstance>,

    /// One-turn flag: a deflection card was played this turn
    pub active_deflection: bool,

    /// One-turn flag: a deflection miner paid out this turn
    pub active_deflection_miner: bool,
}

impl PlayerState {
    pub fn new(id: PlayerId, name: impl Into<String>, deck: &[CardId]) -> Self {
        PlayerState {
            id,
            name: name.into(),
            hand: SmallVec::from_slice(deck),
            hp: STARTING_HP,
            max_hp: STARTING_HP,
            energy: STARTING_ENERGY,
            max_energy: ENERGY_CAP,
            selected_card: None,
            wall: None,
            miner: None,
            active_deflection: false,
            active_deflection_miner: false,
        }
    }

    pub fn has_card(&self, card: CardId) -> bool {
        self.hand.contains(&card)
    }

    /// Remove one copy of a card from the hand; false if absent.
    pub fn remove_from_hand(&mut self, card: CardId) -> bool {
        if let Some(pos) = self.hand.iter().position(|&c| c == card) {
            self.hand.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn lose_hp(&mut self, amount: i32) {
        self.hp -= amount;
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Clear the one-turn flags and the selection slot at turn end.
    pub fn end_of_turn_cleanup(&mut self) {
        self.active_deflection = false;
        self.active_deflection_miner = false;
        self.selected_card = None;
    }
}
