//! `vf-behavior` — per-agent state machines.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`steppable`]  | `Steppable` trait — one behavioural update per tick         |
//! | [`context`]    | `StepContext<'a>` (mutable shared state), `FlowCounters`    |
//! | [`intent`]     | `Intent`, `PeerEffect`, `apply_intents`                     |
//! | [`patient`]    | patient journey: arrival → check-in → waiting → treatment   |
//! | [`provider`]   | provider loop: shift gate, wellbeing, breaks, selection     |
//! | [`treatment`]  | pairing, duration, quality, completion                      |
//! | [`triage`]     | one-shot AI urgency reassessment                            |
//! | [`error`]      | `AgentFault`                                                |
//!
//! # Stepping model
//!
//! Agents step one at a time.  A step gets `&mut self`, `&mut` access to the
//! *other* agent kind (patients pair with providers and vice versa, and the
//! two live in disjoint `Vec`s), and a [`StepContext`] holding the facility,
//! event queue, RNG, and counters.  Effects on agents of the *same* kind
//! (word of mouth between patients) come back as [`Intent`]s, which the
//! scheduler applies before the next agent runs.  Each step therefore
//! observes every earlier step of the tick.

pub mod context;
pub mod error;
pub mod intent;
pub mod patient;
pub mod provider;
pub mod steppable;
pub mod treatment;
pub mod triage;


pub use context::{FlowCounters, StepContext};
pub use error::{AgentFault, FaultResult};
pub use intent::{apply_intents, Intent, PeerEffect};
pub use steppable::Steppable;
pub use triage::TriageOutcome;
