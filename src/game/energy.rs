//! Energy economy
//!
//! Affordability and playability checks, the non-negative spend rule, and
//! the odd/even regeneration schedule. `playable_cards` is the single
//! query shared by selection validation and every AI tier.

use crate::core::card::{CardDefinition, CardType};
use crate::core::catalog::CardCatalog;
use crate::core::player::PlayerState;
use crate::core::rules::{REGEN_EVEN_TURN, REGEN_ODD_TURN};
use crate::game::events::{EventBus, GameEvent};
use crate::Result;
use smallvec::SmallVec;

/// Does the player have the energy for this card?
pub fn can_afford(player: &PlayerState, card: &CardDefinition) -> bool {
    player.energy >= card.cost
}

/// Affordable and passes the singleton rules: a wall card is unplayable
/// with a wall on the field, a miner card with a miner.
pub fn is_playable(player: &PlayerState, card: &CardDefinition) -> bool {
    if !can_afford(player, card) {
        return false;
    }
    match card.card_type() {
        CardType::Defense if card.is_wall() => player.wall.is_none(),
        CardType::Miner => player.miner.is_none(),
        _ => true,
    }
}

/// Deduct the card's cost. A no-op returning false when unaffordable -
/// energy never goes negative.
pub fn spend_energy(player: &mut PlayerState, card: &CardDefinition, bus: &mut EventBus) -> bool {
    if !can_afford(player, card) {
        return false;
    }
    let before = player.energy;
    player.energy -= card.cost;
    bus.emit(GameEvent::EnergySpent {
        player: player.id,
        before,
        after: player.energy,
        card: card.id,
    });
    true
}

/// Grant the new turn's energy: a smaller amount on odd turns, a larger
/// one on even turns, clamped at the cap. Overflow is discarded, never
/// banked.
pub fn regenerate(player: &mut PlayerState, turn_number: u32, bus: &mut EventBus) {
    let gain = if turn_number % 2 == 1 {
        REGEN_ODD_TURN
    } else {
        REGEN_EVEN_TURN
    };
    let before = player.energy;
    player.energy = (player.energy + gain).min(player.max_energy);
    bus.emit(GameEvent::EnergyGained {
        player: player.id,
        before,
        after: player.energy,
    });
}

/// All cards in hand the player could legally play right now.
pub fn playable_cards<'a>(
    player: &PlayerState,
    catalog: &'a CardCatalog,
) -> Result<SmallVec<[&'a CardDefinition; 6]>> {
    let mut out = SmallVec::new();
    for &id in &player.hand {
        let card = catalog.get(id)?;
        if is_playable(player, card) {
            out.push(card);
        }
    }
    Ok(out)
}
