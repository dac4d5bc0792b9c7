//! End-to-end resolution pipeline scenarios
//!
//! Each test drives a full engine through the public input surface only
//! (select, lock, timer expiry) and checks the resulting state and
//! emitted events.

use elemclash::core::{CardCatalog, CardId, MinerKind, PlayerId};
use elemclash::game::{
    BlockReason, Deck, EventBus, GameEngine, GameEvent, GamePhase, InputMode,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// One wall, one deflection, one continuous, one projectile, two miners.
fn standard_deck() -> Deck {
    Deck::new(&[1, 6, 11, 16, 21, 22].map(CardId::new))
}

/// Deck whose miners are the repair and deflection kinds.
fn support_deck() -> Deck {
    Deck::new(&[1, 6, 11, 16, 24, 21].map(CardId::new))
}

fn new_engine(deck1: &Deck, deck2: &Deck) -> (GameEngine, Rc<RefCell<Vec<GameEvent>>>) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let mut bus = EventBus::new();
    bus.subscribe(move |e| sink.borrow_mut().push(e.clone()));

    let engine = GameEngine::new(
        Arc::new(CardCatalog::builtin()),
        bus,
        "Alice",
        deck1,
        "Bob",
        deck2,
        InputMode::Simultaneous,
        42,
    )
    .unwrap();
    (engine, events)
}

/// Play one turn: each player selects (None passes) and locks.
fn play_turn(engine: &mut GameEngine, p1: Option<u32>, p2: Option<u32>) {
    assert!(engine
        .select_card(PlayerId::P1, p1.map(CardId::new))
        .unwrap());
    assert!(engine
        .select_card(PlayerId::P2, p2.map(CardId::new))
        .unwrap());
    assert!(engine.lock_action(PlayerId::P1).unwrap());
    assert!(engine.lock_action(PlayerId::P2).unwrap());
}

/// Pass both players through a turn without playing anything.
fn pass_turn(engine: &mut GameEngine) {
    engine.on_timer_expired().unwrap();
}

#[test]
fn scenario_continuous_attack_into_open_base() {
    // Fresh game: 20 HP, 5 energy after the turn-1 regen. A 3-cost
    // 8-power continuous attack against no wall lands in full.
    let (mut engine, _) = new_engine(&standard_deck(), &standard_deck());
    assert_eq!(engine.state().players[0].energy, 5);

    play_turn(&mut engine, Some(11), None); // Flame Torrent

    assert_eq!(engine.state().players[1].hp, 12);
    // Energy went 5 -> 2, then turn 2 regenerated +3
    assert_eq!(engine.state().players[0].energy, 5);
    assert_eq!(engine.state().turn.turn_number, 2);
}

#[test]
fn scenario_wall_overflow() {
    // P2's wall sits at 6 HP; an 8-power continuous attack destroys it
    // and 2 damage passes through.
    let (mut engine, events) = new_engine(&standard_deck(), &standard_deck());

    play_turn(&mut engine, None, Some(1)); // P2 walls up (10 HP)
    // Decay has taken it to 8; two more turns of decay bring it to 4,
    // so instead attack while it sits at 6 after one more pass
    pass_turn(&mut engine);
    assert_eq!(engine.state().players[1].wall.as_ref().unwrap().hp, 6);

    let hp_before = engine.state().players[1].hp;
    play_turn(&mut engine, Some(11), None); // 8 power into a 6 HP wall

    assert!(engine.state().players[1].wall.is_none());
    assert_eq!(engine.state().players[1].hp, hp_before - 2);
    assert!(events
        .borrow()
        .iter()
        .any(|e| matches!(e, GameEvent::WallDestroyed { player } if *player == PlayerId::P2)));
}

#[test]
fn scenario_deflection_blocks_projectile_completely() {
    let (mut engine, events) = new_engine(&standard_deck(), &standard_deck());

    let hp_before = engine.state().players[1].hp;
    play_turn(&mut engine, Some(16), Some(6)); // Fire Bolt vs Mirror Veil

    assert_eq!(engine.state().players[1].hp, hp_before);
    let blocked = events
        .borrow()
        .iter()
        .find_map(|e| match e {
            GameEvent::DamageBlocked { defender, amount, reason }
                if *defender == PlayerId::P2 =>
            {
                Some((*amount, *reason))
            }
            _ => None,
        })
        .expect("a block event must fire");
    assert_eq!(blocked, (5, BlockReason::Deflection));
}

#[test]
fn scenario_double_knockout_is_a_draw() {
    // Both players run the heavy deck and trade their biggest hits.
    let heavy = Deck::new(&[1, 6, 15, 20, 21, 22].map(CardId::new));
    let (mut engine, events) = new_engine(&heavy, &heavy);

    play_turn(&mut engine, Some(20), Some(20)); // Sunspear, 11 each: 9/9
    assert_eq!(engine.state().players[0].hp, 9);
    assert_eq!(engine.state().players[1].hp, 9);
    assert_eq!(engine.state().phase, GamePhase::Playing);

    pass_turn(&mut engine); // rebuild energy
    pass_turn(&mut engine);

    // Both attacks resolve even though the first is already lethal -
    // victory is only evaluated after the attack step
    play_turn(&mut engine, Some(15), Some(15)); // Magma Flow, 12 each

    let state = engine.state();
    assert_eq!(state.phase, GamePhase::GameOver);
    let outcome = state.outcome.unwrap();
    assert_eq!(outcome.winner, None);
    assert!(outcome.double_knockout);
    assert!(events.borrow().iter().any(|e| matches!(
        e,
        GameEvent::GameEnded { winner: None, double_knockout: true }
    )));

    // Nothing is accepted after game over
    assert!(!engine.select_card(PlayerId::P1, None).unwrap());
    assert!(!engine.on_timer_expired().unwrap());
}

#[test]
fn scenario_miner_interval_resets_after_payout() {
    // An interval-2 projectile miner placed on turn 3 pays out on turns
    // 5 and 7 - the countdown resets after firing, not after placement.
    let (mut engine, events) = new_engine(&standard_deck(), &standard_deck());

    pass_turn(&mut engine); // turn 1
    pass_turn(&mut engine); // turn 2
    play_turn(&mut engine, Some(22), None); // turn 3: Ballista Rig
    assert!(engine.state().players[0].miner.is_some());

    let payout_turns = |events: &Rc<RefCell<Vec<GameEvent>>>| -> Vec<u32> {
        let mut turns = Vec::new();
        let mut current = 0;
        for e in events.borrow().iter() {
            match e {
                GameEvent::TurnStarted { turn } => current = *turn,
                GameEvent::MinerPayout { player, kind }
                    if *player == PlayerId::P1 && *kind == MinerKind::Projectile =>
                {
                    turns.push(current)
                }
                _ => {}
            }
        }
        turns
    };

    pass_turn(&mut engine); // turn 4
    assert_eq!(payout_turns(&events), Vec::<u32>::new());
    pass_turn(&mut engine); // turn 5: payout
    assert_eq!(payout_turns(&events), vec![5]);
    pass_turn(&mut engine); // turn 6
    pass_turn(&mut engine); // turn 7: payout again
    assert_eq!(payout_turns(&events), vec![5, 7]);

    // The free projectile actually landed each time
    assert_eq!(engine.state().players[1].hp, 20 - 2 * 3);
}

#[test]
fn repair_payout_rescues_wall_from_decay() {
    // Mason Drone (interval 4) placed turn 1 pays out on turn 5. A 10 HP
    // wall placed turn 2 decays to 2 by the end of turn 4, so turn 5's
    // decay would kill it - but the repair runs first.
    let (mut engine, _) = new_engine(&support_deck(), &standard_deck());

    play_turn(&mut engine, Some(24), None); // turn 1: repair miner
    play_turn(&mut engine, Some(1), None); // turn 2: wall, decays to 8
    pass_turn(&mut engine); // turn 3: wall 6
    pass_turn(&mut engine); // turn 4: wall 4

    assert_eq!(engine.state().players[0].wall.as_ref().unwrap().hp, 4);
    // Turn 5: the payout restores the wall to 10 before decay takes 2.
    // Without the repair this decay pass would leave it at 2.
    pass_turn(&mut engine);

    let wall = engine.state().players[0].wall.as_ref().unwrap();
    assert_eq!(wall.hp, 8);
    assert_eq!(wall.max_hp, 10);
}

#[test]
fn deflection_miner_blocks_projectile_on_its_payout_turn() {
    // Prism Drone (interval 3) placed turn 1 pays out on turn 4; its
    // protection must arm before the attack step that same turn.
    let (mut engine, events) = new_engine(
        &Deck::new(&[1, 6, 11, 16, 21, 24].map(CardId::new)),
        &standard_deck(),
    );

    play_turn(&mut engine, Some(21), None); // turn 1: Prism Drone
    pass_turn(&mut engine); // turn 2
    pass_turn(&mut engine); // turn 3

    let hp_before = engine.state().players[0].hp;
    play_turn(&mut engine, None, Some(16)); // turn 4: Fire Bolt into the charge

    assert_eq!(engine.state().players[0].hp, hp_before);
    assert!(events.borrow().iter().any(|e| matches!(
        e,
        GameEvent::DamageBlocked { defender: PlayerId::P1, reason: BlockReason::DeflectionMiner, .. }
    )));
    // The miner survived (no base damage landed)
    assert!(engine.state().players[0].miner.is_some());
}

#[test]
fn miner_placed_this_turn_survives_base_damage() {
    let (mut engine, events) = new_engine(&standard_deck(), &standard_deck());

    pass_turn(&mut engine); // build energy
    // P1 places the miner the same turn P2's projectile hits the base
    play_turn(&mut engine, Some(22), Some(16));

    assert!(engine.state().players[0].miner.is_some());
    assert!(engine.state().players[0].hp < 20);
    assert!(!events
        .borrow()
        .iter()
        .any(|e| matches!(e, GameEvent::MinerKilled { player: PlayerId::P1, .. })));

    // Equivalent base damage one turn later kills it
    play_turn(&mut engine, None, Some(11)); // 8 continuous, no wall

    assert!(engine.state().players[0].miner.is_none());
    assert!(events
        .borrow()
        .iter()
        .any(|e| matches!(e, GameEvent::MinerKilled { player: PlayerId::P1, .. })));
}

#[test]
fn energy_is_spent_on_success_and_passes_are_free() {
    let (mut engine, _) = new_engine(&standard_deck(), &standard_deck());

    play_turn(&mut engine, Some(1), None);
    // Wall cost 3 was spent from 5; +3 is the turn-2 regen
    assert_eq!(engine.state().players[0].energy, 2 + 3);

    // A pass spends nothing
    let before = engine.state().players[0].energy;
    pass_turn(&mut engine);
    assert_eq!(engine.state().players[0].energy, (before + 2).min(10));
}

#[test]
fn history_records_every_turn() {
    let (mut engine, _) = new_engine(&standard_deck(), &standard_deck());

    play_turn(&mut engine, Some(16), None);
    pass_turn(&mut engine);
    play_turn(&mut engine, None, Some(16));

    let history = &engine.state().history;
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].turn, 1);
    assert_eq!(history[0].actions[0].card, Some(CardId::new(16)));
    assert_eq!(history[0].actions[1].card, None);
    assert!(history[1].actions[0].auto_locked);
    assert_eq!(history[2].actions[1].card, Some(CardId::new(16)));
}
