//! Typed game event bus
//!
//! The engine reports everything that happens through a closed set of
//! tagged event variants. Consumers (rendering, audio, the network
//! mirror) subscribe to all events or to a single kind; the engine does
//! not know or care whether anything is listening. A panicking subscriber
//! must never take the engine down, so dispatch catches unwinds at the
//! boundary.

use crate::core::card::{CardId, MinerKind};
use crate::core::player::PlayerId;
use crate::game::phase::TurnPhase;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// What stopped incoming damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockReason {
    Wall,
    Deflection,
    DeflectionMiner,
}

/// Everything the engine reports to the outside world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    TurnStarted { turn: u32 },
    TurnEnded { turn: u32 },
    PhaseChanged { phase: TurnPhase },
    CardSelected { player: PlayerId, card: Option<CardId> },
    ActionLocked { player: PlayerId, auto: bool },
    CardsRevealed { cards: [Option<CardId>; 2] },
    EnergyGained { player: PlayerId, before: u8, after: u8 },
    EnergySpent { player: PlayerId, before: u8, after: u8, card: CardId },
    WallPlaced { player: PlayerId, card: CardId, hp: i32 },
    WallDamaged { player: PlayerId, amount: i32, remaining: i32 },
    WallRepaired { player: PlayerId, hp: i32 },
    WallDecayed { player: PlayerId, amount: i32, remaining: i32 },
    WallDestroyed { player: PlayerId },
    MinerPlaced { player: PlayerId, card: CardId, kind: MinerKind },
    MinerPayout { player: PlayerId, kind: MinerKind },
    /// A deflection miner's protection is live for this turn.
    MinerProtected { player: PlayerId },
    MinerKilled { player: PlayerId, kind: MinerKind },
    DamageDealt { attacker: PlayerId, defender: PlayerId, amount: i32, card: CardId },
    DamageBlocked { defender: PlayerId, amount: i32, reason: BlockReason },
    GameEnded { winner: Option<PlayerId>, double_knockout: bool },
}

/// Discriminant of a [`GameEvent`], used for per-kind subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    TurnStarted,
    TurnEnded,
    PhaseChanged,
    CardSelected,
    ActionLocked,
    CardsRevealed,
    EnergyGained,
    EnergySpent,
    WallPlaced,
    WallDamaged,
    WallRepaired,
    WallDecayed,
    WallDestroyed,
    MinerPlaced,
    MinerPayout,
    MinerProtected,
    MinerKilled,
    DamageDealt,
    DamageBlocked,
    GameEnded,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::TurnStarted { .. } => EventKind::TurnStarted,
            GameEvent::TurnEnded { .. } => EventKind::TurnEnded,
            GameEvent::PhaseChanged { .. } => EventKind::PhaseChanged,
            GameEvent::CardSelected { .. } => EventKind::CardSelected,
            GameEvent::ActionLocked { .. } => EventKind::ActionLocked,
            GameEvent::CardsRevealed { .. } => EventKind::CardsRevealed,
            GameEvent::EnergyGained { .. } => EventKind::EnergyGained,
            GameEvent::EnergySpent { .. } => EventKind::EnergySpent,
            GameEvent::WallPlaced { .. } => EventKind::WallPlaced,
            GameEvent::WallDamaged { .. } => EventKind::WallDamaged,
            GameEvent::WallRepaired { .. } => EventKind::WallRepaired,
            GameEvent::WallDecayed { .. } => EventKind::WallDecayed,
            GameEvent::WallDestroyed { .. } => EventKind::WallDestroyed,
            GameEvent::MinerPlaced { .. } => EventKind::MinerPlaced,
            GameEvent::MinerPayout { .. } => EventKind::MinerPayout,
            GameEvent::MinerProtected { .. } => EventKind::MinerProtected,
            GameEvent::MinerKilled { .. } => EventKind::MinerKilled,
            GameEvent::DamageDealt { .. } => EventKind::DamageDealt,
            GameEvent::DamageBlocked { .. } => EventKind::DamageBlocked,
            GameEvent::GameEnded { .. } => EventKind::GameEnded,
        }
    }
}

type Callback = Box<dyn FnMut(&GameEvent)>;

struct Subscriber {
    /// None subscribes to every event
    filter: Option<EventKind>,
    callback: Callback,
}

/// Explicit subscription registry.
///
/// Constructed by the caller and injected into the engine - there is no
/// ambient global bus, so tests can run many isolated engine instances
/// concurrently.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus::default()
    }

    /// Subscribe to every event.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.subscribers.push(Subscriber {
            filter: None,
            callback: Box::new(callback),
        });
    }

    /// Subscribe to a single event kind.
    pub fn subscribe_kind<F>(&mut self, kind: EventKind, callback: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.subscribers.push(Subscriber {
            filter: Some(kind),
            callback: Box::new(callback),
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Dispatch one event to every matching subscriber.
    ///
    /// A subscriber that panics is caught here and skipped; the engine's
    /// own state is never touched by subscribers, so it stays consistent.
    pub fn emit(&mut self, event: GameEvent) {
        let kind = event.kind();
        for sub in &mut self.subscribers {
            if sub.filter.is_none() || sub.filter == Some(kind) {
                let cb = &mut sub.callback;
                let _ = catch_unwind(AssertUnwindSafe(|| cb(&event)));
            }
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
