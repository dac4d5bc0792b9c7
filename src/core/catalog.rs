//! Static card catalog
//!
//! The catalog is loaded once at process start and shared by reference.
//! Lookup of an unknown id is a hard failure, not a silent default: an
//! unresolvable id means a programming error or a corrupted remote
//! payload, and tolerating it would desynchronize mirrored game copies.

use crate::core::card::{CardDefinition, CardId, Element, Subtype};
use crate::{ClashError, Result};
use rustc_hash::FxHashMap;

/// Immutable id -> definition table.
#[derive(Debug, Clone)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardDefinition>,
    /// Stable insertion order, for deterministic iteration.
    ordered: Vec<CardId>,
}

impl CardCatalog {
    /// Build a catalog from a list of definitions.
    pub fn from_cards(defs: Vec<CardDefinition>) -> Self {
        let ordered: Vec<CardId> = defs.iter().map(|c| c.id).collect();
        let cards = defs.into_iter().map(|c| (c.id, c)).collect();
        CardCatalog { cards, ordered }
    }

    /// The built-in card table: five of each non-miner category and one
    /// card per miner kind.
    pub fn builtin() -> Self {
        use Element::*;
        use Subtype::*;

        let defs = vec![
            // Walls - power is the wall's max HP
            CardDefinition::new(1, "Stone Rampart", Earth, Wall, 3, 10, "A dependable slab of granite."),
            CardDefinition::new(2, "Tidal Barrier", Water, Wall, 3, 10, "Holds the line until the tide turns."),
            CardDefinition::new(3, "Ember Palisade", Fire, Wall, 4, 12, "Smolders, but stands."),
            CardDefinition::new(4, "Gale Bulwark", Air, Wall, 2, 8, "Thin as wind, tough as a storm front."),
            CardDefinition::new(5, "Frost Bastion", Water, Wall, 4, 12, "Cold comfort for attackers."),
            // Deflections - one-turn shields, power unused
            CardDefinition::new(6, "Mirror Veil", Water, Deflection, 2, 0, "Turns projectiles back the way they came."),
            CardDefinition::new(7, "Ash Shroud", Fire, Deflection, 2, 0, "Hard to hit what you cannot see."),
            CardDefinition::new(8, "Granite Ward", Earth, Deflection, 2, 0, "A moment of stone-skin."),
            CardDefinition::new(9, "Wind Shear", Air, Deflection, 2, 0, "Shots drift wide in the crosswind."),
            CardDefinition::new(10, "Static Guard", Air, Deflection, 3, 0, "Crackles when touched."),
            // Continuous attacks
            CardDefinition::new(11, "Flame Torrent", Fire, Continuous, 3, 8, "A steady stream of fire."),
            CardDefinition::new(12, "Rockslide", Earth, Continuous, 4, 9, "The mountain comes to you."),
            CardDefinition::new(13, "Riptide", Water, Continuous, 2, 6, "Pulls defenses under."),
            CardDefinition::new(14, "Sandstorm", Air, Continuous, 4, 10, "Grinds walls to dust."),
            CardDefinition::new(15, "Magma Flow", Fire, Continuous, 5, 12, "Slow, inevitable, molten."),
            // Projectile attacks
            CardDefinition::new(16, "Fire Bolt", Fire, Projectile, 2, 5, "Arcs clean over any wall."),
            CardDefinition::new(17, "Ice Lance", Water, Projectile, 3, 6, "Finds the gap in the battlements."),
            CardDefinition::new(18, "Shard Volley", Earth, Projectile, 4, 7, "A hail of splintered stone."),
            CardDefinition::new(19, "Lightning Dart", Air, Projectile, 1, 3, "Cheap, fast, annoying."),
            CardDefinition::new(20, "Sunspear", Fire, Projectile, 5, 9, "One shot, straight down."),
            // Miners - power is the payout attack power where applicable
            CardDefinition::new(21, "Prism Drone", Air, DeflectionMiner, 4, 0, "Charges a deflection field on a cycle."),
            CardDefinition::new(22, "Ballista Rig", Fire, ProjectileMiner, 4, 3, "Loads and looses on its own schedule."),
            CardDefinition::new(23, "Magma Bore", Earth, ContinuousMiner, 5, 4, "Taps the mantle every few turns."),
            CardDefinition::new(24, "Mason Drone", Water, RepairMiner, 3, 0, "Patches the wall back to new."),
        ];

        CardCatalog::from_cards(defs)
    }

    /// Look up a card definition by id. Unknown ids are hard errors.
    pub fn get(&self, id: CardId) -> Result<&CardDefinition> {
        self.cards
            .get(&id)
            .ok_or(ClashError::CardNotFound(id.as_u32()))
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// All cards of a subtype, in stable catalog order.
    pub fn of_subtype(&self, subtype: Subtype) -> Vec<&CardDefinition> {
        self.ordered
            .iter()
            .filter_map(|id| self.cards.get(id))
            .filter(|c| c.subtype == subtype)
            .collect()
    }

    /// All miner cards, in stable catalog order.
    pub fn miners(&self) -> Vec<&CardDefinition> {
        self.ordered
            .iter()
            .filter_map(|id| self.cards.get(id))
            .filter(|c| c.is_miner())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
