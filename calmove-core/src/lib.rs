//! Core types for calmove.
//!
//! This crate holds everything that does not touch the network:
//! - `event`: the Google Calendar wire-level `Event` model and the
//!   sanitized creation payload derived from it
//! - `migrate`: the copy-then-delete migration engine with its retry
//!   policy and failure bookkeeping
//! - `error`: shared error types

pub mod error;
pub mod event;
pub mod migrate;

pub use error::{CalMoveError, CalMoveResult};
pub use event::{Event, EventActor, EventAttendee, EventDateTime, EventReminders, ReminderOverride};
pub use migrate::{migrate, EventSink, MigrationReport, RetryPolicy};
