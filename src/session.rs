//! Single-entry session facade.
//!
//! Owns the current [`MarketState`], the append-only event history, the
//! replay cursor, and the generator context, so the API layer can drive
//! the system without wiring the reducer, replay, and generator modules
//! together itself. All state mutation is whole-snapshot replacement; the
//! session is the sole owner of the snapshot and the history log.

use log::info;

use crate::events::MarketEvent;
use crate::generator::Generator;
use crate::reducer::reduce;
use crate::replay::{seek, ReplayCursor};
use crate::types::{MarketState, Mode};

/// Market session: live feed or deterministic replay over the recorded
/// history.
///
/// In live mode a periodic driver calls [`Session::live_tick`]; in replay
/// mode it calls [`Session::replay_tick`]. Both are no-ops outside their
/// mode, which keeps the two timers mutually exclusive without any
/// cross-task coordination.
pub struct Session {
    mode: Mode,
    connected: bool,
    state: MarketState,
    history: Vec<MarketEvent>,
    cursor: ReplayCursor,
    generator: Generator,
}

impl Session {
    /// Creates a session in live mode, connected, with `seed_events`
    /// pre-generated history events. The visible state starts at the
    /// default snapshot; the seed history only matters to replay.
    pub fn new(mut generator: Generator, seed_events: usize) -> Self {
        let history = generator.history(seed_events);
        info!("session created seed_events={}", history.len());
        Self {
            mode: Mode::Live,
            connected: true,
            state: MarketState::default(),
            history,
            cursor: ReplayCursor::new(),
            generator,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches mode. State and history are left as they are; only the
    /// tick drivers change which path is active.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            info!("mode changed mode={:?}", mode);
            self.mode = mode;
        }
    }

    pub fn connected(&self) -> bool {
        self.connected
    }

    /// Toggles the live feed. Disconnecting suspends tick generation
    /// without resetting state; reconnecting resumes from where it was.
    pub fn set_connected(&mut self, connected: bool) {
        if self.connected != connected {
            info!("connection changed connected={}", connected);
            self.connected = connected;
        }
    }

    pub fn state(&self) -> &MarketState {
        &self.state
    }

    pub fn history(&self) -> &[MarketEvent] {
        &self.history
    }

    pub fn replay_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn is_playing(&self) -> bool {
        self.cursor.is_playing()
    }

    /// Live tick: generates one order event, applies it incrementally, and
    /// appends it to the history log. Returns `false` (and does nothing)
    /// unless the session is in live mode and connected.
    pub fn live_tick(&mut self) -> bool {
        if self.mode != Mode::Live || !self.connected {
            return false;
        }
        let event = self.generator.order_event();
        info!(
            "live event applied type={} timestamp={} history_len={}",
            event.label(),
            event.timestamp,
            self.history.len() + 1
        );
        self.state = reduce(&self.state, &event);
        self.history.push(event);
        true
    }

    /// Rebuilds state at `index` (clamped) from the start of history.
    /// Usable in any mode; replay views seek while scrubbing.
    pub fn seek(&mut self, index: usize) -> usize {
        let clamped = self.cursor.seek_to(self.history.len(), index);
        self.state = seek(&self.history, clamped);
        clamped
    }

    /// Auto-play tick: advances the cursor by one and rebuilds state.
    /// Returns `false` outside replay mode, while paused, or at the end
    /// of history (which also pauses).
    pub fn replay_tick(&mut self) -> bool {
        if self.mode != Mode::Replay {
            return false;
        }
        match self.cursor.advance(self.history.len()) {
            Some(index) => {
                self.state = seek(&self.history, index);
                true
            }
            None => false,
        }
    }

    pub fn play(&mut self) {
        info!("replay play index={}", self.cursor.index());
        self.cursor.play();
    }

    pub fn pause(&mut self) {
        info!("replay pause index={}", self.cursor.index());
        self.cursor.pause();
    }

    /// Steps one event forward and rebuilds state. Clamped at history end.
    pub fn step_forward(&mut self) -> usize {
        let index = self.cursor.step_forward(self.history.len());
        self.state = seek(&self.history, index);
        index
    }

    /// Steps one event back and rebuilds state. Clamped at zero.
    pub fn step_back(&mut self) -> usize {
        let index = self.cursor.step_back();
        self.state = seek(&self.history, index);
        index
    }
}
