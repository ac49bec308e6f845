#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for the vds scanner stages
//!
//! Library crates report progress and diagnostics as domain events over an
//! unbounded channel; the binary decides how to render or log them.
//!
//! - **Domain events**: grouped by functional area (`Scan`, `Feed`)
//! - **`EventEmitter` trait**: one API for any holder of an optional sender
//! - **Metadata**: every message carries an [`EventMeta`] with a tracing level

pub mod meta;
pub use meta::{EventLevel, EventMessage, EventMeta, EventSource};

pub mod events;
pub use events::{AppEvent, FailureContext, FeedEvent, ScanEvent};

use tokio::sync::mpsc::UnboundedSender;

/// Sending half of the event channel
pub type EventSender = UnboundedSender<EventMessage>;

/// Receiving half of the event channel
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<EventMessage>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        self.emit_message(EventMessage::from_event(event));
    }

    /// Emit a pre-built message (used when metadata needs a correlation id)
    fn emit_message(&self, message: EventMessage) {
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(message);
        }
    }
}

/// Lets a raw `EventSender` be used wherever an `EventEmitter` is expected
impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}
