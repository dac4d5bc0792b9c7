//! Card types and definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a card definition in the catalog.
///
/// Id 0 is reserved for virtual payout cards synthesized by the combat
/// resolver; catalog ids start at 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CardId(u32);

impl CardId {
    /// Id of the virtual zero-cost card used for free miner-payout attacks.
    pub const VIRTUAL: CardId = CardId(0);

    pub fn new(id: u32) -> Self {
        CardId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Card element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
}

/// Top-level card type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardType {
    Attack,
    Defense,
    Miner,
}

/// The four persistent-miner kinds, each with its own payout cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinerKind {
    /// Grants one-turn projectile immunity on payout.
    Deflection,
    /// Fires a free projectile attack on payout.
    Projectile,
    /// Fires a free continuous attack on payout.
    Continuous,
    /// Restores the owner's wall to full HP on payout.
    Repair,
}

impl MinerKind {
    /// Turns between payouts; distinct per kind. The countdown resets to
    /// this after firing, not after placement.
    pub fn payout_interval(&self) -> u8 {
        match self {
            MinerKind::Projectile => 2,
            MinerKind::Deflection => 3,
            MinerKind::Repair => 4,
            MinerKind::Continuous => 5,
        }
    }
}

/// Card subtype, determining which resolution rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subtype {
    /// Persistent defensive unit that absorbs continuous damage and decays.
    Wall,
    /// One-turn effect: full projectile block, partial continuous reduction.
    Deflection,
    /// Attack that walls absorb.
    Continuous,
    /// Attack that bypasses walls but deflection fully blocks.
    Projectile,
    DeflectionMiner,
    ProjectileMiner,
    ContinuousMiner,
    RepairMiner,
}

impl Subtype {
    /// Get the top-level type this subtype belongs to
    pub fn card_type(&self) -> CardType {
        match self {
            Subtype::Continuous | Subtype::Projectile => CardType::Attack,
            Subtype::Wall | Subtype::Deflection => CardType::Defense,
            Subtype::DeflectionMiner
            | Subtype::ProjectileMiner
            | Subtype::ContinuousMiner
            | Subtype::RepairMiner => CardType::Miner,
        }
    }

    /// The miner kind, for miner subtypes
    pub fn miner_kind(&self) -> Option<MinerKind> {
        match self {
            Subtype::DeflectionMiner => Some(MinerKind::Deflection),
            Subtype::ProjectileMiner => Some(MinerKind::Projectile),
            Subtype::ContinuousMiner => Some(MinerKind::Continuous),
            Subtype::RepairMiner => Some(MinerKind::Repair),
            _ => None,
        }
    }
}

/// Immutable card definition from the catalog.
///
/// Loaded once at startup and shared by reference; gameplay state refers
/// to definitions by `CardId` and never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,

    /// Display name (e.g. "Flame Torrent")
    pub name: String,

    pub element: Element,

    pub subtype: Subtype,

    /// Energy cost to play
    pub cost: u8,

    /// Attack damage, wall max HP, or miner payout power
    pub power: i32,

    /// Flavor/description text for the presentation layer
    pub text: String,
}

impl CardDefinition {
    pub fn new(
        id: u32,
        name: &str,
        element: Element,
        subtype: Subtype,
        cost: u8,
        power: i32,
        text: &str,
    ) -> Self {
        CardDefinition {
            id: CardId::new(id),
            name: name.to_string(),
            element,
            subtype,
            cost,
            power,
            text: text.to_string(),
        }
    }

    /// Synthesize the zero-cost virtual card for a free miner-payout
    /// attack. It runs through the exact same combat resolution path as a
    /// player-played card, so payouts and attacks share one rule
    /// implementation.
    pub fn free_payout(subtype: Subtype, element: Element, power: i32) -> Self {
        debug_assert!(matches!(subtype, Subtype::Continuous | Subtype::Projectile));
        CardDefinition {
            id: CardId::VIRTUAL,
            name: "Payout".to_string(),
            element,
            subtype,
            cost: 0,
            power,
            text: String::new(),
        }
    }

    pub fn card_type(&self) -> CardType {
        self.subtype.card_type()
    }

    pub fn is_attack(&self) -> bool {
        self.card_type() == CardType::Attack
    }

    pub fn is_wall(&self) -> bool {
        self.subtype == Subtype::Wall
    }

    pub fn is_deflection(&self) -> bool {
        self.subtype == Subtype::Deflection
    }

    pub fn is_miner(&self) -> bool {
        self.card_type() == CardType::Miner
    }
}
