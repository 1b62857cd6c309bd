//! Inbound message channel.
//!
//! Uses an `embassy-sync` bounded channel to bridge whatever context
//! receives control messages (stdin reader, broker callback) with the
//! synchronous control loop.  The loop drains it before each tick, so
//! message handling and rule evaluation never overlap.
//!
//! ```text
//! ┌──────────────┐  PropertyMessage  ┌──────────────┐
//! │   Reader     │──────────────────▶│ Control Loop │
//! └──────────────┘                   └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use super::commands::PropertyMessage;

/// Channel depth for inbound messages.
const INBOX_DEPTH: usize = 8;

/// Inbound message channel: reader → control loop.
pub static INBOX: Channel<CriticalSectionRawMutex, PropertyMessage, INBOX_DEPTH> = Channel::new();

/// Queue a message for the control loop.  Drops it with a warning if the
/// inbox is full.
pub fn post(msg: PropertyMessage) -> bool {
    match INBOX.try_send(msg) {
        Ok(()) => true,
        Err(_) => {
            warn!("Inbox full, dropping message");
            false
        }
    }
}

/// Take the next queued message, if any.
pub fn next() -> Option<PropertyMessage> {
    INBOX.try_receive().ok()
}
