//! Opponent decision-maker
//!
//! Three difficulty tiers over the same `playable_cards` query. Easy is
//! deliberately anti-optimal (it hunts for the worst move on a checklist)
//! to guarantee a high player win rate; Medium is an ordered heuristic;
//! Hard scores every playable card with a weighted feature function.
//! Every tier passes only when nothing is playable - a pass is never a
//! strategic choice.

use crate::core::card::{CardDefinition, CardId, CardType, Subtype};
use crate::core::catalog::CardCatalog;
use crate::core::player::{PlayerId, PlayerState};
use crate::game::energy;
use crate::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// AI difficulty, chosen by the player at game start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Probability that the Easy tier runs its worst-pick checklist instead
/// of the simpler heuristic.
const EASY_WORST_PICK_CHANCE: f64 = 0.8;

/// Probability that the Hard tier takes the runner-up for variety.
const HARD_RUNNER_UP_CHANCE: f64 = 0.1;

/// Computer-controlled card chooser for one seat.
#[derive(Debug, Clone, Copy)]
pub struct AiOpponent {
    pub difficulty: Difficulty,
}

impl AiOpponent {
    pub fn new(difficulty: Difficulty) -> Self {
        AiOpponent { difficulty }
    }

    /// Choose a card for `player` given both players' visible state.
    /// Returns `None` only when zero cards are playable.
    pub fn choose_card(
        &self,
        players: &[PlayerState],
        player: PlayerId,
        catalog: &CardCatalog,
        rng: &mut ChaCha12Rng,
    ) -> Result<Option<CardId>> {
        let me = &players[player.index()];
        let opp = &players[player.opponent().index()];
        let playable = energy::playable_cards(me, catalog)?;
        if playable.is_empty() {
            return Ok(None);
        }
        let choice = match self.difficulty {
            Difficulty::Easy => easy_choice(me, opp, &playable, rng),
            Difficulty::Medium => medium_choice(me, opp, &playable, rng),
            Difficulty::Hard => hard_choice(me, opp, &playable, rng),
        };
        Ok(Some(choice))
    }
}

fn random_playable(playable: &[&CardDefinition], rng: &mut ChaCha12Rng) -> CardId {
    playable
        .choose(rng)
        .map(|c| c.id)
        .expect("caller guarantees a non-empty playable list")
}

// ---------------------------------------------------------------------------
// Easy
// ---------------------------------------------------------------------------

/// Near-optimal-inverted: walk a checklist of known-bad moves and take
/// the first that applies. Kept this way on purpose - the tier exists to
/// lose convincingly, not to play badly at random.
fn easy_choice(
    me: &PlayerState,
    opp: &PlayerState,
    playable: &[&CardDefinition],
    rng: &mut ChaCha12Rng,
) -> CardId {
    if !rng.gen_bool(EASY_WORST_PICK_CHANCE) {
        // The milder branch: an affordable attack, else anything
        return playable
            .iter()
            .find(|c| c.is_attack())
            .map(|c| c.id)
            .unwrap_or_else(|| random_playable(playable, rng));
    }

    // Feed the weakest attack into a standing wall
    if opp.wall.is_some() {
        if let Some(card) = playable
            .iter()
            .filter(|c| c.is_attack())
            .min_by_key(|c| c.power)
        {
            return card.id;
        }
    }
    // Build an economy piece while nearly dead
    if me.hp <= 6 {
        if let Some(card) = playable.iter().find(|c| c.is_miner()) {
            return card.id;
        }
    }
    // Blow a starved energy pool on the most expensive option
    if me.energy <= 4 {
        if let Some(card) = playable.iter().max_by_key(|c| c.cost) {
            return card.id;
        }
    }
    // Attack at low HP when a defense was available
    if me.hp <= 10 && playable.iter().any(|c| c.card_type() == CardType::Defense) {
        if let Some(card) = playable.iter().find(|c| c.is_attack()) {
            return card.id;
        }
    }
    // A wall at full health is energy down the drain
    if me.hp == me.max_hp {
        if let Some(card) = playable.iter().find(|c| c.is_wall()) {
            return card.id;
        }
    }
    random_playable(playable, rng)
}

// ---------------------------------------------------------------------------
// Medium
// ---------------------------------------------------------------------------

/// Ordered heuristic with a guaranteed non-pass fallback.
fn medium_choice(
    me: &PlayerState,
    opp: &PlayerState,
    playable: &[&CardDefinition],
    rng: &mut ChaCha12Rng,
) -> CardId {
    let attacks: Vec<&&CardDefinition> = playable.iter().filter(|c| c.is_attack()).collect();

    // An enemy miner is a priority target; projectiles reach past walls
    if opp.miner.is_some() && !attacks.is_empty() {
        if let Some(card) = attacks
            .iter()
            .filter(|c| c.subtype == Subtype::Projectile)
            .max_by_key(|c| c.power)
        {
            return card.id;
        }
        if let Some(card) = attacks.iter().max_by_key(|c| c.power) {
            return card.id;
        }
    }
    // Undefended and hurting: get a wall up
    if me.wall.is_none() && me.hp < 10 {
        if let Some(card) = playable.iter().find(|c| c.is_wall()) {
            return card.id;
        }
    }
    // Finish a nearly-broken wall with the biggest hit available
    if opp.wall.as_ref().is_some_and(|w| w.hp <= 4) {
        if let Some(card) = attacks.iter().max_by_key(|c| c.power) {
            return card.id;
        }
    }
    // Weighted category choice: attack 50%, defense 30%, miner 20%
    let roll = rng.gen::<f64>();
    let preferred = if roll < 0.5 {
        CardType::Attack
    } else if roll < 0.8 {
        CardType::Defense
    } else {
        CardType::Miner
    };
    let in_category: Vec<&CardDefinition> = playable
        .iter()
        .copied()
        .filter(|c| c.card_type() == preferred)
        .collect();
    if !in_category.is_empty() {
        return random_playable(&in_category, rng);
    }
    // Unconditional fallback: never an involuntary pass
    random_playable(playable, rng)
}

// ---------------------------------------------------------------------------
// Hard
// ---------------------------------------------------------------------------

/// Weighted feature score for one playable card.
fn score_card(card: &CardDefinition, me: &PlayerState, opp: &PlayerState) -> i32 {
    let mut score = match card.subtype {
        Subtype::Projectile => 30,
        Subtype::Continuous => 28,
        Subtype::Wall => 22,
        Subtype::Deflection => 18,
        _ => 20, // miners
    };

    match card.subtype {
        Subtype::Projectile => {
            // Base damage kills miners, and walls don't help
            if opp.miner.is_some() {
                score += 25;
            }
            if opp.wall.is_some() {
                score += 20;
            }
        }
        Subtype::Continuous => {
            match &opp.wall {
                Some(w) if card.power >= w.hp => score += 30, // breaks through
                Some(_) => score -= 5,                        // soaked by the wall
                None => score += 8,                           // clean face damage
            }
        }
        Subtype::Wall => {
            if me.wall.is_some() {
                score -= 100;
            }
            if me.hp < 10 {
                score += 15;
            }
        }
        Subtype::Deflection => {
            if me.hp < 8 {
                score += 12;
            }
        }
        _ => {
            // Miners pay off over time; pointless when duplicated or desperate
            if me.miner.is_some() {
                score -= 100;
            }
            if me.hp < 8 {
                score -= 10;
            } else {
                score += 6;
            }
        }
    }

    // Spending most of the pool on one card forfeits next turn's options
    score -= (card.cost as i32 * 20) / (me.energy.max(1) as i32);
    score
}

/// Score everything, take the best - or occasionally the runner-up.
fn hard_choice(
    me: &PlayerState,
    opp: &PlayerState,
    playable: &[&CardDefinition],
    rng: &mut ChaCha12Rng,
) -> CardId {
    let mut scored: Vec<(i32, CardId)> = playable
        .iter()
        .map(|c| (score_card(c, me, opp), c.id))
        .collect();
    // Stable ordering: score desc, then catalog id for determinism
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    if scored.len() >= 2 && rng.gen_bool(HARD_RUNNER_UP_CHANCE) {
        return scored[1].1;
    }
    scored[0].1
}
