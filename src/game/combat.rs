//! Combat resolution
//!
//! `resolve_attack` is the single rules engine for every attack in the
//! game: player-played cards and free miner payouts both go through it
//! (payouts via a synthesized zero-cost virtual card), so the interaction
//! rules live in exactly one place.

use crate::core::card::{CardDefinition, Subtype};
use crate::core::player::{PlayerId, PlayerState};
use crate::core::rules::DEFLECTION_REDUCTION;
use crate::game::events::{BlockReason, EventBus, GameEvent};
use crate::game::{miner, wall};
use crate::{ClashError, Result};
use serde::{Deserialize, Serialize};

/// Outcome of one attack against one defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackResult {
    /// Damage absorbed by the defender's wall
    pub damage_to_wall: i32,
    /// Damage applied to the defender's HP
    pub damage_to_base: i32,
    /// Damage removed before it landed anywhere
    pub blocked: i32,
    /// What removed it, when something did
    pub block_reason: Option<BlockReason>,
    pub wall_destroyed: bool,
    pub miner_killed: bool,
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// None on a draw
    pub winner: Option<PlayerId>,
    /// Both players fell in the same resolution pass
    pub double_knockout: bool,
}

/// Resolve one attack card against the defender.
///
/// Branches on the attacking card's subtype:
/// - Continuous: an active deflection shaves a flat amount first, then
///   the wall absorbs up to its HP, then overflow hits the base.
/// - Projectile: fully blocked by an active deflection (checked before
///   any wall logic) or an active deflection-miner charge; otherwise the
///   full damage bypasses the wall entirely.
///
/// Base damage > 0 kills the defender's miner, subject to placement-grace.
pub fn resolve_attack(
    players: &mut [PlayerState],
    attacker_idx: usize,
    defender_idx: usize,
    card: &CardDefinition,
    turn_number: u32,
    bus: &mut EventBus,
) -> Result<AttackResult> {
    if !card.is_attack() {
        return Err(ClashError::InvalidAction(format!(
            "{} is not an attack card",
            card.name
        )));
    }
    let attacker_id = players[attacker_idx].id;
    let defender = &mut players[defender_idx];
    let defender_id = defender.id;
    let had_wall = defender.wall.is_some();

    let mut result = AttackResult {
        damage_to_wall: 0,
        damage_to_base: 0,
        blocked: 0,
        block_reason: None,
        wall_destroyed: false,
        miner_killed: false,
    };

    match card.subtype {
        Subtype::Continuous => {
            let mut damage = card.power;
            if defender.active_deflection {
                let reduced = DEFLECTION_REDUCTION.min(damage);
                damage -= reduced;
                result.blocked = reduced;
                result.block_reason = Some(BlockReason::Deflection);
                bus.emit(GameEvent::DamageBlocked {
                    defender: defender_id,
                    amount: reduced,
                    reason: BlockReason::Deflection,
                });
            }
            let overflow = wall::damage_wall(defender, damage, bus);
            result.damage_to_wall = damage - overflow;
            result.damage_to_base = overflow;
        }
        Subtype::Projectile => {
            if defender.active_deflection {
                result.blocked = card.power;
                result.block_reason = Some(BlockReason::Deflection);
                bus.emit(GameEvent::DamageBlocked {
                    defender: defender_id,
                    amount: card.power,
                    reason: BlockReason::Deflection,
                });
            } else if miner::has_active_deflection_miner(defender) {
                result.blocked = card.power;
                result.block_reason = Some(BlockReason::DeflectionMiner);
                bus.emit(GameEvent::DamageBlocked {
                    defender: defender_id,
                    amount: card.power,
                    reason: BlockReason::DeflectionMiner,
                });
            } else {
                result.damage_to_base = card.power;
            }
        }
        _ => unreachable!("is_attack() filtered non-attack subtypes"),
    }

    if result.damage_to_base > 0 {
        defender.lose_hp(result.damage_to_base);
        bus.emit(GameEvent::DamageDealt {
            attacker: attacker_id,
            defender: defender_id,
            amount: result.damage_to_base,
            card: card.id,
        });
        if defender.miner.is_some() {
            result.miner_killed = miner::kill_miner(defender, turn_number, bus);
        }
    }
    result.wall_destroyed = had_wall && players[defender_idx].wall.is_none();

    Ok(result)
}

/// Evaluate victory: both players at 0 or less in the same pass is a
/// double-knockout draw; exactly one is a win for the other; otherwise
/// the game continues.
pub fn check_victory(players: &[PlayerState]) -> Option<GameOutcome> {
    let p1_down = players[0].is_defeated();
    let p2_down = players[1].is_defeated();
    match (p1_down, p2_down) {
        (true, true) => Some(GameOutcome {
            winner: None,
            double_knockout: true,
        }),
        (true, false) => Some(GameOutcome {
            winner: Some(players[1].id),
            double_knockout: false,
        }),
        (false, true) => Some(GameOutcome {
            winner: Some(players[0].id),
            double_knockout: false,
        }),
        (false, false) => None,
    }
}
