//! # Events Module
//!
//! Event-driven progress reporting for scans.
//!
//! The core engine emits events through a channel so any front end (CLI
//! progress bar, GUI, nothing at all) can subscribe without the engine
//! knowing about it.

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::{Event, ListEvent, ScanEvent, ScanSummary};
