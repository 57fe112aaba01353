//! `vf-schedule` — deferred events, provider shifts, and CSV shift loading.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`event`]   | `DeferredEvent`, `EventKind`                            |
//! | [`queue`]   | `EventQueue` (`BTreeMap<Tick, Vec<DeferredEvent>>`)     |
//! | [`shift`]   | `Shift` working-hours window                            |
//! | [`loader`]  | `load_shifts_csv`, `load_shifts_reader`                 |
//! | [`error`]   | `ScheduleError`, `ScheduleResult<T>`                    |
//!
//! # Event model (summary)
//!
//! Events are plain data: `{due, provider, kind}`.  Nothing captures a live
//! agent reference across ticks.  At the start of every step the model drains
//! all events with `due ≤ now` and resolves each against the agent store.

pub mod error;
pub mod event;
pub mod loader;
pub mod queue;
pub mod shift;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use event::{DeferredEvent, EventKind};
pub use loader::{load_shifts_csv, load_shifts_reader};
pub use queue::EventQueue;
pub use shift::Shift;
