//! Deterministic replay: rebuild market state at any point in history.
//!
//! [`seek`] always folds from the empty state over `history[0..=index]`,
//! never incrementally from a prior seek point, so the replayed state at
//! any index is bit-for-bit reproducible regardless of where the cursor
//! was before. [`ReplayCursor`] holds the play/pause/step mechanics.

use log::debug;

use crate::events::MarketEvent;
use crate::reducer::reduce;
use crate::types::MarketState;

/// Rebuilds the state at `index` by folding the reducer over
/// `history[0..=index]` from the default state. The index is clamped to
/// the history; an empty history yields the default state.
pub fn seek(history: &[MarketEvent], index: usize) -> MarketState {
    if history.is_empty() {
        return MarketState::default();
    }
    let index = index.min(history.len() - 1);
    debug!("replay seek index={} history_len={}", index, history.len());
    history[..=index]
        .iter()
        .fold(MarketState::default(), |state, event| reduce(&state, event))
}

/// Replay position and auto-play flag. The cursor knows nothing about the
/// state itself; callers re-run [`seek`] after every move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayCursor {
    index: usize,
    playing: bool,
}

impl ReplayCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Moves to `index`, clamped to `[0, history_len - 1]`. Returns the
    /// clamped position.
    pub fn seek_to(&mut self, history_len: usize, index: usize) -> usize {
        self.index = index.min(history_len.saturating_sub(1));
        self.index
    }

    /// Steps one event forward, clamped to the end of history.
    pub fn step_forward(&mut self, history_len: usize) -> usize {
        self.seek_to(history_len, self.index.saturating_add(1))
    }

    /// Steps one event back, clamped to the start.
    pub fn step_back(&mut self) -> usize {
        self.index = self.index.saturating_sub(1);
        self.index
    }

    /// Auto-play tick: advances by one while playing and not at the end.
    /// Returns the new index, or `None` (and pauses) once the end is
    /// reached or the cursor was not playing.
    pub fn advance(&mut self, history_len: usize) -> Option<usize> {
        if self.playing && self.index + 1 < history_len {
            self.index += 1;
            Some(self.index)
        } else {
            self.playing = false;
            None
        }
    }
}
