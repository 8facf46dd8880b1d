//! Per-tick event buffer and the sink trait observers implement.
//!
//! The simulation never calls out while it is mutating itself. Events are
//! collected in a fixed-capacity buffer during a tick and drained afterwards
//! with [`GameState::take_events`](crate::GameState::take_events) or
//! [`GameState::drain_events_into`](crate::GameState::drain_events_into).

use arrayvec::ArrayVec;
use log::warn;

use crate::types::GameEvent;

/// Upper bound on events produced between two drains
pub const EVENT_CAPACITY: usize = 32;

pub type EventBuffer = ArrayVec<GameEvent, EVENT_CAPACITY>;

/// Receives one-shot game events (audio, logging, effects).
///
/// Implementations must not affect the simulation; a failing sink only loses
/// its own output.
pub trait EventSink {
    fn notify(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> EventSink for F {
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Push without panicking; overflow drops the event and logs it.
pub(crate) fn push_event(buffer: &mut EventBuffer, event: GameEvent) {
    if buffer.try_push(event).is_err() {
        warn!("event buffer full, dropping {:?}", event);
    }
}
