//! Turn phases and the per-turn selection state

use crate::core::card::CardId;
use crate::core::player::PlayerId;
use crate::core::rules::SELECTION_TIMER_SECS;
use serde::{Deserialize, Serialize};

/// Phases of one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Both (or either) player choosing a card
    Selection,
    /// Both actions fixed and exposed
    Reveal,
    /// The resolution pipeline is running
    Resolution,
    /// Bookkeeping before the next selection
    TurnEnd,
}

impl TurnPhase {
    /// Get the next phase; TurnEnd wraps to the next turn's Selection.
    pub fn next(&self) -> TurnPhase {
        match self {
            TurnPhase::Selection => TurnPhase::Reveal,
            TurnPhase::Reveal => TurnPhase::Resolution,
            TurnPhase::Resolution => TurnPhase::TurnEnd,
            TurnPhase::TurnEnd => TurnPhase::Selection,
        }
    }
}

/// Overall game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Menu,
    Draft,
    Playing,
    GameOver,
}

/// How player input arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    /// Online play: both inputs may arrive in any order.
    Simultaneous,
    /// Single device: players select alternately, P1 first.
    HotSeat,
}

/// An action fixed for the rest of the turn. `card: None` is a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedAction {
    pub card: Option<CardId>,
    /// Locked by timer expiry rather than an explicit player lock
    pub auto_locked: bool,
}

/// Per-turn selection and lock state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnState {
    /// Current turn number (starts at 1)
    pub turn_number: u32,

    pub phase: TurnPhase,

    /// Locked-in action per seat, once committed
    pub locked: [Option<LockedAction>; 2],

    /// Selection timer duration; the clock itself lives with the caller
    pub timer_secs: u32,

    /// Hot-seat only: the seat currently allowed to select
    pub hot_seat_selector: Option<PlayerId>,
}

impl TurnState {
    pub fn new(mode: InputMode) -> Self {
        TurnState {
            turn_number: 1,
            phase: TurnPhase::Selection,
            locked: [None, None],
            timer_secs: SELECTION_TIMER_SECS,
            hot_seat_selector: match mode {
                InputMode::HotSeat => Some(PlayerId::P1),
                InputMode::Simultaneous => None,
            },
        }
    }

    pub fn is_locked(&self, player: PlayerId) -> bool {
        self.locked[player.index()].is_some()
    }

    pub fn both_locked(&self) -> bool {
        self.locked.iter().all(Option::is_some)
    }

    /// Commit a player's action for this turn. Returns false if already
    /// locked (locking is explicit and immutable).
    pub fn lock(&mut self, player: PlayerId, action: LockedAction) -> bool {
        let slot = &mut self.locked[player.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(action);
        true
    }

    /// Reset for the next turn.
    pub fn advance(&mut self, mode: InputMode) {
        self.turn_number += 1;
        self.phase = TurnPhase::Selection;
        self.locked = [None, None];
        self.hot_seat_selector = match mode {
            InputMode::HotSeat => Some(PlayerId::P1),
            InputMode::Simultaneous => None,
        };
    }
}
