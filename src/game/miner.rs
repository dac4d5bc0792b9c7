//! Miner lifecycle
//!
//! Placement, payout countdown, and the placement-grace kill rule. A
//! miner neither ticks nor can be killed by base damage on the turn it
//! was placed; the countdown resets to the kind's interval after each
//! payout, not after placement.

use crate::core::card::{CardDefinition, MinerKind};
use crate::core::player::{MinerInstance, PlayerState};
use crate::game::events::{EventBus, GameEvent};

/// Place a miner from a miner card, countdown initialized to the kind's
/// interval. Same no-op rules as walls: occupied slot or wrong card type
/// returns false with no state change.
pub fn place_miner(
    player: &mut PlayerState,
    card: &CardDefinition,
    turn_number: u32,
    bus: &mut EventBus,
) -> bool {
    let Some(kind) = card.subtype.miner_kind() else {
        return false;
    };
    if player.miner.is_some() {
        return false;
    }
    let interval = kind.payout_interval();
    player.miner = Some(MinerInstance {
        card: card.id,
        kind,
        element: card.element,
        countdown: interval,
        interval,
        placed_turn: turn_number,
    });
    bus.emit(GameEvent::MinerPlaced {
        player: player.id,
        card: card.id,
        kind,
    });
    true
}

/// Advance the payout countdown for this turn. Returns true when the
/// payout fires (countdown reached 0 and was reset to the interval).
/// Skips the placement turn entirely.
pub fn tick_miner(player: &mut PlayerState, turn_number: u32) -> bool {
    let Some(miner) = player.miner.as_mut() else {
        return false;
    };
    if miner.placed_turn == turn_number {
        return false;
    }
    miner.countdown = miner.countdown.saturating_sub(1);
    if miner.countdown == 0 {
        miner.countdown = miner.interval;
        true
    } else {
        false
    }
}

/// Remove the miner, unless placement-grace protects it (placed this
/// exact turn): then it survives and this returns false.
pub fn kill_miner(player: &mut PlayerState, turn_number: u32, bus: &mut EventBus) -> bool {
    let Some(miner) = player.miner.as_ref() else {
        return false;
    };
    if miner.placed_turn == turn_number {
        return false;
    }
    let kind = miner.kind;
    player.miner = None;
    bus.emit(GameEvent::MinerKilled {
        player: player.id,
        kind,
    });
    true
}

/// Is the miner inside its placement-grace window?
pub fn is_miner_protected(player: &PlayerState, turn_number: u32) -> bool {
    player
        .miner
        .as_ref()
        .is_some_and(|m| m.placed_turn == turn_number)
}

/// Will the miner's payout fire during this turn's pipeline?
///
/// Used before the attack step so a deflection miner's protection can go
/// live ahead of incoming projectiles the same turn it pays out.
pub fn will_payout_this_turn(player: &PlayerState, turn_number: u32) -> bool {
    player
        .miner
        .as_ref()
        .is_some_and(|m| m.placed_turn != turn_number && m.countdown == 1)
}

pub fn has_deflection_miner(player: &PlayerState) -> bool {
    player
        .miner
        .as_ref()
        .is_some_and(|m| m.kind == MinerKind::Deflection)
}

pub fn has_active_deflection_miner(player: &PlayerState) -> bool {
    player.active_deflection_miner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::CardId;
    use crate::core::catalog::CardCatalog;
    use crate::core::player::PlayerId;

    fn setup() -> (CardCatalog, PlayerState, EventBus) {
        let catalog = CardCatalog::builtin();
        let deck: Vec<CardId> = [1, 6, 11, 16, 21, 22].map(CardId::new).to_vec();
        let player = PlayerState::new(PlayerId::P1, "Alice", &deck);
        (catalog, player, EventBus::new())
    }

    #[test]
    fn test_place_miner() {
        let (catalog, mut player, mut bus) = setup();
        let rig = catalog.get(CardId::new(22)).unwrap(); // projectile miner

        assert!(place_miner(&mut player, rig, 3, &mut bus));
        let miner = player.miner.as_ref().unwrap();
        assert_eq!(miner.kind, MinerKind::Projectile);
        assert_eq!(miner.countdown, 2);
        assert_eq!(miner.placed_turn, 3);

        // Slot occupied
        let drone = catalog.get(CardId::new(21)).unwrap();
        assert!(!place_miner(&mut player, drone, 3, &mut bus));
        assert_eq!(player.miner.as_ref().unwrap().kind, MinerKind::Projectile);

        // Wrong card type
        player.miner = None;
        let wall = catalog.get(CardId::new(1)).unwrap();
        assert!(!place_miner(&mut player, wall, 3, &mut bus));
        assert!(player.miner.is_none());
    }

    #[test]
    fn test_payout_schedule_matches_interval() {
        let (catalog, mut player, mut bus) = setup();
        let rig = catalog.get(CardId::new(22)).unwrap(); // interval 2
        place_miner(&mut player, rig, 3, &mut bus);

        // Placement turn: no tick
        assert!(!tick_miner(&mut player, 3));
        assert_eq!(player.miner.as_ref().unwrap().countdown, 2);
        // Turn 4: counts down
        assert!(!tick_miner(&mut player, 4));
        // Turn 5: pays out, counter resets to the interval
        assert!(tick_miner(&mut player, 5));
        assert_eq!(player.miner.as_ref().unwrap().countdown, 2);
        // Next payout two turns after firing, on turn 7
        assert!(!tick_miner(&mut player, 6));
        assert!(tick_miner(&mut player, 7));
    }

    #[test]
    fn test_placement_grace() {
        let (catalog, mut player, mut bus) = setup();
        let rig = catalog.get(CardId::new(22)).unwrap();
        place_miner(&mut player, rig, 3, &mut bus);

        // Same turn: survives
        assert!(is_miner_protected(&player, 3));
        assert!(!kill_miner(&mut player, 3, &mut bus));
        assert!(player.miner.is_some());

        // Any later turn: dies
        assert!(!is_miner_protected(&player, 4));
        assert!(kill_miner(&mut player, 4, &mut bus));
        assert!(player.miner.is_none());
        assert!(!kill_miner(&mut player, 5, &mut bus));
    }

    #[test]
    fn test_will_payout_this_turn() {
        let (catalog, mut player, mut bus) = setup();
        let drone = catalog.get(CardId::new(21)).unwrap(); // deflection, interval 3
        place_miner(&mut player, drone, 1, &mut bus);
        assert!(has_deflection_miner(&player));

        assert!(!will_payout_this_turn(&player, 1));
        tick_miner(&mut player, 2);
        assert!(!will_payout_this_turn(&player, 3));
        tick_miner(&mut player, 3);
        // Countdown now 1: turn 4's tick fires
        assert!(will_payout_this_turn(&player, 4));
        assert!(tick_miner(&mut player, 4));
    }
}
