//! Draft allocator
//!
//! Six fixed rounds, one category per round, producing the six-card deck.
//! Options are drawn as a seeded shuffled subset of the category, so two
//! allocators with the same seed present identical rounds - required for
//! cross-peer agreement during online drafting.

use crate::core::card::{CardDefinition, CardId, Subtype};
use crate::core::catalog::CardCatalog;
use crate::core::rules::{
    DECK_SIZE, DRAFT_OPTIONS_PER_ROUND, DRAFT_TIMER_LONG_SECS, DRAFT_TIMER_SECS,
};
use crate::{ClashError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

/// The category each draft round draws from, in round order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftCategory {
    Wall,
    Deflection,
    Continuous,
    Projectile,
    MinerFirst,
    MinerSecond,
}

impl DraftCategory {
    /// Fixed six-round order.
    pub const ROUNDS: [DraftCategory; DECK_SIZE] = [
        DraftCategory::Wall,
        DraftCategory::Deflection,
        DraftCategory::Continuous,
        DraftCategory::Projectile,
        DraftCategory::MinerFirst,
        DraftCategory::MinerSecond,
    ];

    /// The two miner rounds run on the longer timer.
    pub fn timer_secs(&self) -> u32 {
        match self {
            DraftCategory::MinerFirst | DraftCategory::MinerSecond => DRAFT_TIMER_LONG_SECS,
            _ => DRAFT_TIMER_SECS,
        }
    }
}

/// One round's presented options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRound {
    pub category: DraftCategory,
    pub options: SmallVec<[CardId; 4]>,
    pub timer_secs: u32,
}

/// A recorded pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPick {
    pub card: CardId,
    /// Chosen by timer expiry rather than the player
    pub auto_selected: bool,
}

/// A finished six-card deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub cards: SmallVec<[CardId; 6]>,
}

impl Deck {
    pub fn new(cards: &[CardId]) -> Self {
        Deck {
            cards: SmallVec::from_slice(cards),
        }
    }

    /// Enforce the draft contract: exactly one wall, one deflection, one
    /// continuous, one projectile, and two distinct miners. A violation
    /// is a hard error - a malformed deck from a remote peer must never
    /// reach play.
    pub fn validate(&self, catalog: &CardCatalog) -> Result<()> {
        if self.cards.len() != DECK_SIZE {
            return Err(ClashError::InvalidDeck(format!(
                "expected {} cards, got {}",
                DECK_SIZE,
                self.cards.len()
            )));
        }
        let mut walls = 0;
        let mut deflections = 0;
        let mut continuous = 0;
        let mut projectiles = 0;
        let mut miners: Vec<CardId> = Vec::new();
        for &id in &self.cards {
            let card = catalog.get(id)?;
            match card.subtype {
                Subtype::Wall => walls += 1,
                Subtype::Deflection => deflections += 1,
                Subtype::Continuous => continuous += 1,
                Subtype::Projectile => projectiles += 1,
                _ => miners.push(id),
            }
        }
        if walls != 1 || deflections != 1 || continuous != 1 || projectiles != 1 {
            return Err(ClashError::InvalidDeck(format!(
                "category counts off: {} wall, {} deflection, {} continuous, {} projectile",
                walls, deflections, continuous, projectiles
            )));
        }
        if miners.len() != 2 || miners[0] == miners[1] {
            return Err(ClashError::InvalidDeck(
                "deck needs two distinct miners".to_string(),
            ));
        }
        Ok(())
    }
}

/// Runs the six-round draft for one player.
#[derive(Debug)]
pub struct DraftAllocator {
    catalog: Arc<CardCatalog>,
    rng: ChaCha12Rng,
    round_index: usize,
    picks: SmallVec<[DraftPick; 6]>,
    current: Option<DraftRound>,
}

impl DraftAllocator {
    pub fn new(catalog: Arc<CardCatalog>, seed: u64) -> Self {
        let mut allocator = DraftAllocator {
            catalog,
            rng: ChaCha12Rng::seed_from_u64(seed),
            round_index: 0,
            picks: SmallVec::new(),
            current: None,
        };
        allocator.current = Some(allocator.build_round(DraftCategory::ROUNDS[0]));
        allocator
    }

    /// The round currently awaiting a pick, None once complete.
    pub fn current_round(&self) -> Option<&DraftRound> {
        self.current.as_ref()
    }

    pub fn picks(&self) -> &[DraftPick] {
        &self.picks
    }

    pub fn is_complete(&self) -> bool {
        self.picks.len() == DECK_SIZE
    }

    fn build_round(&mut self, category: DraftCategory) -> DraftRound {
        let options: SmallVec<[CardId; 4]> = match category {
            DraftCategory::MinerFirst => {
                // All four distinct kinds, shuffled for display order
                let mut ids: Vec<CardId> = self.catalog.miners().iter().map(|c| c.id).collect();
                ids.shuffle(&mut self.rng);
                ids.into_iter().collect()
            }
            DraftCategory::MinerSecond => {
                // The already-drafted kind is filtered out
                let taken: Vec<CardId> = self.picks.iter().map(|p| p.card).collect();
                let mut ids: Vec<CardId> = self
                    .catalog
                    .miners()
                    .iter()
                    .map(|c| c.id)
                    .filter(|id| !taken.contains(id))
                    .collect();
                ids.shuffle(&mut self.rng);
                ids.into_iter().collect()
            }
            DraftCategory::Wall
            | DraftCategory::Deflection
            | DraftCategory::Continuous
            | DraftCategory::Projectile => {
                let subtype = match category {
                    DraftCategory::Wall => Subtype::Wall,
                    DraftCategory::Deflection => Subtype::Deflection,
                    DraftCategory::Continuous => Subtype::Continuous,
                    _ => Subtype::Projectile,
                };
                let mut ids: Vec<CardId> = self
                    .catalog
                    .of_subtype(subtype)
                    .iter()
                    .map(|c| c.id)
                    .collect();
                ids.shuffle(&mut self.rng);
                ids.truncate(DRAFT_OPTIONS_PER_ROUND);
                ids.into_iter().collect()
            }
        };
        DraftRound {
            category,
            options,
            timer_secs: category.timer_secs(),
        }
    }

    fn record(&mut self, pick: DraftPick) {
        self.picks.push(pick);
        self.round_index += 1;
        self.current = if self.round_index < DECK_SIZE {
            Some(self.build_round(DraftCategory::ROUNDS[self.round_index]))
        } else {
            None
        };
    }

    /// Pick a card from the current round's options, advancing to the
    /// next round. `Ok(false)` if the card is not among the options or
    /// the draft is already complete.
    pub fn pick(&mut self, card: CardId) -> Result<bool> {
        let Some(round) = self.current.as_ref() else {
            return Ok(false);
        };
        if !round.options.contains(&card) {
            return Ok(false);
        }
        // Validate against the catalog before committing
        self.catalog.get(card)?;
        self.record(DraftPick {
            card,
            auto_selected: false,
        });
        Ok(true)
    }

    /// Timer expiry: auto-select uniformly at random from the current
    /// options and flag the pick. No-op returning None once complete.
    pub fn expire_timer(&mut self) -> Option<CardId> {
        let options = self.current.as_ref()?.options.clone();
        let card = *options.choose(&mut self.rng)?;
        self.record(DraftPick {
            card,
            auto_selected: true,
        });
        Some(card)
    }

    /// The accumulated deck, validated. Errors before round six.
    pub fn finish(&self) -> Result<Deck> {
        if !self.is_complete() {
            return Err(ClashError::InvalidDeck(format!(
                "draft incomplete: {} of {} picks",
                self.picks.len(),
                DECK_SIZE
            )));
        }
        let cards: Vec<CardId> = self.picks.iter().map(|p| p.card).collect();
        let deck = Deck::new(&cards);
        deck.validate(&self.catalog)?;
        Ok(deck)
    }

    /// Convenience for tests and AI opponents: auto-pick a full deck.
    pub fn auto_draft(catalog: Arc<CardCatalog>, seed: u64) -> Result<Deck> {
        let mut allocator = DraftAllocator::new(catalog, seed);
        while allocator.expire_timer().is_some() {}
        allocator.finish()
    }
}

/// Look up the definitions of a round's options, for display layers.
pub fn round_options<'a>(
    round: &DraftRound,
    catalog: &'a CardCatalog,
) -> Result<Vec<&'a CardDefinition>> {
    round.options.iter().map(|&id| catalog.get(id)).collect()
}
