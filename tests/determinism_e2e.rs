//! End-to-end determinism tests
//!
//! Two engines fed the same seed and the same inputs must stay
//! bit-for-bit identical - the contract the host-authoritative transport
//! relies on when mirroring state to a client peer.

use elemclash::core::{CardCatalog, PlayerId};
use elemclash::game::{
    Deck, Difficulty, DraftAllocator, EventBus, GameEngine, GameSnapshot, InputMode,
};
use similar_asserts::assert_eq;
use std::sync::Arc;

fn catalog() -> Arc<CardCatalog> {
    Arc::new(CardCatalog::builtin())
}

/// Drive a full AI-vs-AI game and return the final snapshot JSON.
fn run_ai_game(seed: u64, p1: Difficulty, p2: Difficulty, max_turns: u32) -> String {
    let cat = catalog();
    let deck1 = DraftAllocator::auto_draft(Arc::clone(&cat), seed ^ 0xD1).unwrap();
    let deck2 = DraftAllocator::auto_draft(Arc::clone(&cat), seed ^ 0xD2).unwrap();

    let mut engine = GameEngine::new(
        Arc::clone(&cat),
        EventBus::new(),
        "North",
        &deck1,
        "South",
        &deck2,
        InputMode::Simultaneous,
        seed,
    )
    .unwrap();

    while !engine.state().is_over() && engine.state().turn.turn_number <= max_turns {
        for (difficulty, id) in [(p1, PlayerId::P1), (p2, PlayerId::P2)] {
            let pick = engine.ai_select(id, difficulty).unwrap();
            engine.select_card(id, pick).unwrap();
            engine.lock_action(id).unwrap();
            if engine.state().is_over() {
                break;
            }
        }
    }

    engine.snapshot().to_json().unwrap()
}

#[test]
fn same_seed_same_game() {
    for seed in [7u64, 42, 1234] {
        let a = run_ai_game(seed, Difficulty::Hard, Difficulty::Medium, 60);
        let b = run_ai_game(seed, Difficulty::Hard, Difficulty::Medium, 60);
        assert_eq!(a, b, "seed {seed} diverged");
    }
}

#[test]
fn different_seeds_diverge() {
    // Not a hard guarantee, but with these seeds the drafts differ and
    // so must the games
    let a = run_ai_game(1, Difficulty::Medium, Difficulty::Medium, 40);
    let b = run_ai_game(2, Difficulty::Medium, Difficulty::Medium, 40);
    assert_ne!(a, b);
}

#[test]
fn snapshot_restore_mirrors_exactly() {
    let cat = catalog();
    let deck = Deck::new(&[1, 6, 11, 16, 21, 22].map(elemclash::core::CardId::new));

    let mut host = GameEngine::new(
        Arc::clone(&cat),
        EventBus::new(),
        "Host",
        &deck,
        "Guest",
        &deck,
        InputMode::Simultaneous,
        99,
    )
    .unwrap();

    // A few turns of play on the host
    host.select_card(PlayerId::P1, Some(elemclash::core::CardId::new(16)))
        .unwrap();
    host.lock_action(PlayerId::P1).unwrap();
    host.lock_action(PlayerId::P2).unwrap();
    host.on_timer_expired().unwrap();

    // Ship the snapshot to a client peer
    let wire = host.snapshot().to_json().unwrap();
    let mut client = GameEngine::restore(
        Arc::clone(&cat),
        EventBus::new(),
        GameSnapshot::from_json(&wire).unwrap(),
    )
    .unwrap();

    // Identical inputs keep both sides identical
    for engine in [&mut host, &mut client] {
        engine
            .select_card(PlayerId::P1, Some(elemclash::core::CardId::new(11)))
            .unwrap();
        engine.lock_action(PlayerId::P1).unwrap();
        engine.lock_action(PlayerId::P2).unwrap();
    }
    assert_eq!(
        host.snapshot().to_json().unwrap(),
        client.snapshot().to_json().unwrap()
    );
}

#[test]
fn draft_is_reproducible_and_games_finish() {
    // A sanity sweep: drafted decks always validate, and AI games reach
    // a conclusion or the turn cap without errors at every difficulty
    let cat = catalog();
    for seed in 0..5u64 {
        let deck = DraftAllocator::auto_draft(Arc::clone(&cat), seed).unwrap();
        deck.validate(&cat).unwrap();
    }
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let json = run_ai_game(5, difficulty, difficulty, 50);
        assert!(!json.is_empty());
    }
}
