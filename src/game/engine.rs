//! Turn resolution engine
//!
//! Drives the selection/reveal/resolution/turn-end state machine and the
//! fixed resolution pipeline. The engine is single-threaded and
//! step-driven: every state transition happens synchronously inside one
//! of the three inbound calls (`select_card`, `lock_action`,
//! `on_timer_expired`). The event bus is injected and the catalog is
//! shared by reference - there is no ambient global instance.

use crate::core::card::{CardDefinition, CardId, MinerKind, Subtype};
use crate::core::catalog::CardCatalog;
use crate::core::player::PlayerId;
use crate::core::rules::{CONTINUOUS_MINER_POWER, PROJECTILE_MINER_POWER};
use crate::game::ai::{AiOpponent, Difficulty};
use crate::game::combat;
use crate::game::draft::Deck;
use crate::game::energy;
use crate::game::events::{EventBus, GameEvent};
use crate::game::miner;
use crate::game::phase::{GamePhase, InputMode, LockedAction, TurnPhase};
use crate::game::snapshot::GameSnapshot;
use crate::game::state::{GameState, TurnRecord};
use crate::game::wall;
use crate::{ClashError, Result};
use std::sync::Arc;

/// The orchestrator owning one game.
#[derive(Debug)]
pub struct GameEngine {
    catalog: Arc<CardCatalog>,
    state: GameState,
    bus: EventBus,
}

impl GameEngine {
    /// Create a game from two validated decks and open turn one.
    ///
    /// Subscribe listeners on the bus *before* constructing the engine:
    /// turn one's start and energy events fire from here.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        catalog: Arc<CardCatalog>,
        bus: EventBus,
        p1_name: impl Into<String>,
        deck1: &Deck,
        p2_name: impl Into<String>,
        deck2: &Deck,
        mode: InputMode,
        seed: u64,
    ) -> Result<Self> {
        let state = GameState::new_game(&catalog, p1_name, deck1, p2_name, deck2, mode, seed)?;
        let mut engine = GameEngine { catalog, state, bus };
        engine.open_turn();
        Ok(engine)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Select (or clear, with `None`) a card for this turn.
    ///
    /// `Ok(false)` rejects without state change: wrong phase, seat not
    /// active (hot-seat), already locked, card not in hand, or card not
    /// currently playable. The caller re-prompts; there is no retry here.
    pub fn select_card(&mut self, player: PlayerId, card: Option<CardId>) -> Result<bool> {
        // An unknown seat id is a corrupt payload, not a rejectable input
        self.state.player(player)?;
        if !self.accepting_input(player) {
            return Ok(false);
        }

        if let Some(id) = card {
            if !self.state.player(player)?.has_card(id) {
                return Ok(false);
            }
            // An in-hand id that the catalog cannot resolve is corrupt state
            let def = self.catalog.get(id)?;
            if !energy::is_playable(self.state.player(player)?, def) {
                return Ok(false);
            }
        }
        self.state.player_mut(player)?.selected_card = card;
        self.bus.emit(GameEvent::CardSelected { player, card });
        Ok(true)
    }

    /// Lock the current selection for the turn. Locking is explicit and
    /// immutable; re-locking returns `Ok(false)`. When both seats are
    /// locked, reveal and resolution run synchronously inside this call.
    pub fn lock_action(&mut self, player: PlayerId) -> Result<bool> {
        let selected = self.state.player(player)?.selected_card;
        if !self.accepting_input(player) {
            return Ok(false);
        }
        if !self.state.turn.lock(
            player,
            LockedAction {
                card: selected,
                auto_locked: false,
            },
        ) {
            return Ok(false);
        }
        self.bus.emit(GameEvent::ActionLocked { player, auto: false });

        // Hot-seat: the first lock hands control to the other seat
        if self.state.mode == InputMode::HotSeat {
            let next = player.opponent();
            self.state.turn.hot_seat_selector = if self.state.turn.is_locked(next) {
                None
            } else {
                Some(next)
            };
        }

        if self.state.turn.both_locked() {
            self.begin_resolution()?;
        }
        Ok(true)
    }

    /// Timer expiry: auto-lock whichever seats have not locked, using
    /// their current selection (or a pass), then resolve. Idempotent -
    /// outside the selection phase this is a no-op returning `Ok(false)`.
    pub fn on_timer_expired(&mut self) -> Result<bool> {
        if self.state.phase != GamePhase::Playing
            || self.state.turn.phase != TurnPhase::Selection
        {
            return Ok(false);
        }
        let mut any_locked = false;
        for idx in 0..self.state.players.len() {
            let player = self.state.players[idx].id;
            if self.state.turn.is_locked(player) {
                continue;
            }
            let selected = self.state.players[idx].selected_card;
            self.state.turn.lock(
                player,
                LockedAction {
                    card: selected,
                    auto_locked: true,
                },
            );
            self.bus.emit(GameEvent::ActionLocked { player, auto: true });
            any_locked = true;
        }
        if any_locked {
            self.begin_resolution()?;
        }
        Ok(any_locked)
    }

    /// Let the computer opponent pick a card for `player`, drawing from
    /// the game's own RNG stream so replays stay deterministic. The
    /// returned pick still goes through `select_card`/`lock_action` like
    /// any other input.
    pub fn ai_select(
        &mut self,
        player: PlayerId,
        difficulty: Difficulty,
    ) -> Result<Option<CardId>> {
        let ai = AiOpponent::new(difficulty);
        let state = &mut self.state;
        ai.choose_card(&state.players, player, &self.catalog, &mut state.rng)
    }

    /// Serialize the full game state for a mirroring peer.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state)
    }

    /// Rebuild an engine from a snapshot, validating it against the
    /// catalog first. The restored instance continues mid-game; no turn
    /// is re-opened and no energy is re-granted.
    pub fn restore(
        catalog: Arc<CardCatalog>,
        bus: EventBus,
        snapshot: GameSnapshot,
    ) -> Result<Self> {
        let state = snapshot.into_state(&catalog)?;
        Ok(GameEngine { catalog, state, bus })
    }

    fn accepting_input(&self, player: PlayerId) -> bool {
        if self.state.phase != GamePhase::Playing
            || self.state.turn.phase != TurnPhase::Selection
        {
            return false;
        }
        if self.state.turn.is_locked(player) {
            return false;
        }
        // Hot-seat: only the active seat may act
        if self.state.mode == InputMode::HotSeat
            && self.state.turn.hot_seat_selector != Some(player)
        {
            return false;
        }
        true
    }

    /// Open a fresh selection phase: regenerate both players' energy for
    /// the new turn number.
    fn open_turn(&mut self) {
        let turn = self.state.turn.turn_number;
        self.bus.emit(GameEvent::TurnStarted { turn });
        for p in &mut self.state.players {
            energy::regenerate(p, turn, &mut self.bus);
        }
        self.bus.emit(GameEvent::PhaseChanged {
            phase: TurnPhase::Selection,
        });
    }

    /// Selection -> Reveal -> Resolution. Guarded so resolution fires
    /// exactly once per turn even if inputs race in from the transport.
    fn begin_resolution(&mut self) -> Result<()> {
        if self.state.turn.phase != TurnPhase::Selection || !self.state.turn.both_locked() {
            return Ok(());
        }
        self.state.turn.phase = TurnPhase::Reveal;
        self.bus.emit(GameEvent::PhaseChanged {
            phase: TurnPhase::Reveal,
        });

        let cards = self.locked_cards();
        // Revealed cards are consumed from the hands; energy, by
        // contrast, is only spent when a pipeline step succeeds.
        for (idx, card) in cards.iter().enumerate() {
            if let Some(id) = card {
                if !self.state.players[idx].remove_from_hand(*id) {
                    return Err(ClashError::InvalidAction(format!(
                        "locked card {} not in hand",
                        id
                    )));
                }
            }
        }
        self.bus.emit(GameEvent::CardsRevealed { cards });

        self.state.turn.phase = TurnPhase::Resolution;
        self.bus.emit(GameEvent::PhaseChanged {
            phase: TurnPhase::Resolution,
        });
        self.resolve_actions()
    }

    fn locked_cards(&self) -> [Option<CardId>; 2] {
        [
            self.state.turn.locked[0].and_then(|a| a.card),
            self.state.turn.locked[1].and_then(|a| a.card),
        ]
    }

    fn locked_card_of(&self, idx: usize, subtype_check: fn(&CardDefinition) -> bool) -> Result<Option<CardDefinition>> {
        match self.state.turn.locked[idx].and_then(|a| a.card) {
            Some(id) => {
                let def = self.catalog.get(id)?;
                Ok(subtype_check(def).then(|| def.clone()))
            }
            None => Ok(None),
        }
    }

    /// The fixed resolution pipeline. Runs to completion once entered;
    /// no step is interruptible or partially applied.
    fn resolve_actions(&mut self) -> Result<()> {
        let turn = self.state.turn.turn_number;

        // 1. Wall placement (energy only on success - an occupied slot
        //    means the card simply had no board effect)
        for idx in 0..2 {
            if let Some(card) = self.locked_card_of(idx, CardDefinition::is_wall)? {
                if wall::place_wall(&mut self.state.players[idx], &card, turn, &mut self.bus) {
                    energy::spend_energy(&mut self.state.players[idx], &card, &mut self.bus);
                }
            }
        }

        // 2. Deflection activation (always succeeds)
        for idx in 0..2 {
            if let Some(card) = self.locked_card_of(idx, CardDefinition::is_deflection)? {
                self.state.players[idx].active_deflection = true;
                energy::spend_energy(&mut self.state.players[idx], &card, &mut self.bus);
            }
        }

        // 3. Miner placement (energy only on success)
        for idx in 0..2 {
            if let Some(card) = self.locked_card_of(idx, CardDefinition::is_miner)? {
                if miner::place_miner(&mut self.state.players[idx], &card, turn, &mut self.bus) {
                    energy::spend_energy(&mut self.state.players[idx], &card, &mut self.bus);
                }
            }
        }

        // 4. Deflection-miner protection goes live ahead of the attack
        //    step, so it blocks projectiles the same turn it pays out
        for idx in 0..2 {
            let p = &self.state.players[idx];
            if miner::has_deflection_miner(p) && miner::will_payout_this_turn(p, turn) {
                let id = p.id;
                self.state.players[idx].active_deflection_miner = true;
                self.bus.emit(GameEvent::MinerProtected { player: id });
            }
        }

        // 5. Attack resolution (always succeeds; spend, then resolve)
        for idx in 0..2 {
            if let Some(card) = self.locked_card_of(idx, CardDefinition::is_attack)? {
                energy::spend_energy(&mut self.state.players[idx], &card, &mut self.bus);
                combat::resolve_attack(
                    &mut self.state.players,
                    idx,
                    1 - idx,
                    &card,
                    turn,
                    &mut self.bus,
                )?;
            }
        }

        // 6. Repair payouts run before decay so a repair can rescue a
        //    wall that decay would otherwise destroy this turn
        for idx in 0..2 {
            let is_repair = self.state.players[idx]
                .miner
                .as_ref()
                .is_some_and(|m| m.kind == MinerKind::Repair);
            if is_repair && miner::tick_miner(&mut self.state.players[idx], turn) {
                let id = self.state.players[idx].id;
                self.bus.emit(GameEvent::MinerPayout {
                    player: id,
                    kind: MinerKind::Repair,
                });
                wall::repair_wall(&mut self.state.players[idx], &mut self.bus);
            }
        }

        // 7. Wall decay
        for idx in 0..2 {
            wall::apply_decay(&mut self.state.players[idx], &mut self.bus);
        }

        // 8. Remaining miner payouts
        for idx in 0..2 {
            let Some(m) = self.state.players[idx].miner.clone() else {
                continue;
            };
            if m.kind == MinerKind::Repair {
                continue;
            }
            if !miner::tick_miner(&mut self.state.players[idx], turn) {
                continue;
            }
            let id = self.state.players[idx].id;
            self.bus.emit(GameEvent::MinerPayout {
                player: id,
                kind: m.kind,
            });
            match m.kind {
                MinerKind::Deflection => {
                    // Already armed in step 4; the flag is one-turn either way
                    self.state.players[idx].active_deflection_miner = true;
                }
                MinerKind::Projectile => {
                    let virt = CardDefinition::free_payout(
                        Subtype::Projectile,
                        m.element,
                        PROJECTILE_MINER_POWER,
                    );
                    combat::resolve_attack(
                        &mut self.state.players,
                        idx,
                        1 - idx,
                        &virt,
                        turn,
                        &mut self.bus,
                    )?;
                }
                MinerKind::Continuous => {
                    let virt = CardDefinition::free_payout(
                        Subtype::Continuous,
                        m.element,
                        CONTINUOUS_MINER_POWER,
                    );
                    combat::resolve_attack(
                        &mut self.state.players,
                        idx,
                        1 - idx,
                        &virt,
                        turn,
                        &mut self.bus,
                    )?;
                }
                MinerKind::Repair => unreachable!("filtered above"),
            }
        }

        let record = TurnRecord {
            turn,
            actions: [
                self.state.turn.locked[0].expect("both locked at resolution"),
                self.state.turn.locked[1].expect("both locked at resolution"),
            ],
        };

        // 9. Victory check: on a result the game ends here
        if let Some(outcome) = combat::check_victory(&self.state.players) {
            self.state.outcome = Some(outcome);
            self.state.phase = GamePhase::GameOver;
            self.state.history.push(record);
            self.bus.emit(GameEvent::GameEnded {
                winner: outcome.winner,
                double_knockout: outcome.double_knockout,
            });
            return Ok(());
        }

        // 10. Clear the one-turn flags and selection slots
        for p in &mut self.state.players {
            p.end_of_turn_cleanup();
        }

        // 11. History, turn end, next selection
        self.state.turn.phase = TurnPhase::TurnEnd;
        self.bus.emit(GameEvent::PhaseChanged {
            phase: TurnPhase::TurnEnd,
        });
        self.state.history.push(record);
        self.bus.emit(GameEvent::TurnEnded { turn });

        let mode = self.state.mode;
        self.state.turn.advance(mode);
        self.open_turn();
        Ok(())
    }
}
