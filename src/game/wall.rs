//! Wall lifecycle
//!
//! Placement, absorb/overflow damage, per-turn decay, and repair. Repair
//! payouts run before decay in the pipeline so a repair can rescue a wall
//! that decay would otherwise destroy.

use crate::core::card::CardDefinition;
use crate::core::player::{PlayerState, WallInstance};
use crate::core::rules::WALL_DECAY_PER_TURN;
use crate::game::events::{EventBus, GameEvent};

/// Place a wall from a wall card at full HP.
///
/// A no-op returning false when the slot is occupied or the card is not a
/// wall - the card was still played, it just has no board effect.
pub fn place_wall(
    player: &mut PlayerState,
    card: &CardDefinition,
    turn_number: u32,
    bus: &mut EventBus,
) -> bool {
    if player.wall.is_some() || !card.is_wall() {
        return false;
    }
    player.wall = Some(WallInstance {
        card: card.id,
        element: card.element,
        hp: card.power,
        max_hp: card.power,
        placed_turn: turn_number,
    });
    bus.emit(GameEvent::WallPlaced {
        player: player.id,
        card: card.id,
        hp: card.power,
    });
    true
}

/// Apply damage to the wall, returning the overflow that passes through
/// to the player's base. With no wall the full amount overflows; the wall
/// is destroyed when its HP is exhausted.
pub fn damage_wall(player: &mut PlayerState, amount: i32, bus: &mut EventBus) -> i32 {
    if amount <= 0 {
        return 0;
    }
    let Some(wall) = player.wall.as_mut() else {
        return amount;
    };

    if wall.hp > amount {
        wall.hp -= amount;
        bus.emit(GameEvent::WallDamaged {
            player: player.id,
            amount,
            remaining: wall.hp,
        });
        0
    } else {
        let overflow = amount - wall.hp;
        let absorbed = wall.hp;
        player.wall = None;
        bus.emit(GameEvent::WallDamaged {
            player: player.id,
            amount: absorbed,
            remaining: 0,
        });
        bus.emit(GameEvent::WallDestroyed { player: player.id });
        overflow
    }
}

/// End-of-pipeline decay; destroys the wall at 0 HP.
pub fn apply_decay(player: &mut PlayerState, bus: &mut EventBus) {
    let Some(wall) = player.wall.as_mut() else {
        return;
    };
    wall.hp -= WALL_DECAY_PER_TURN;
    if wall.hp > 0 {
        let remaining = wall.hp;
        bus.emit(GameEvent::WallDecayed {
            player: player.id,
            amount: WALL_DECAY_PER_TURN,
            remaining,
        });
    } else {
        player.wall = None;
        bus.emit(GameEvent::WallDecayed {
            player: player.id,
            amount: WALL_DECAY_PER_TURN,
            remaining: 0,
        });
        bus.emit(GameEvent::WallDestroyed { player: player.id });
    }
}

/// Restore an existing wall to max HP (repair-miner payout). False with
/// no wall to repair.
pub fn repair_wall(player: &mut PlayerState, bus: &mut EventBus) -> bool {
    let Some(wall) = player.wall.as_mut() else {
        return false;
    };
    wall.hp = wall.max_hp;
    bus.emit(GameEvent::WallRepaired {
        player: player.id,
        hp: wall.hp,
    });
    true
}
