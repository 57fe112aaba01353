//! `vf-sim` — the hospital model and its tick loop.
//!
//! # Tick loop
//!
//! ```text
//! step():
//!   ① Check     — an unusable topology is swapped for the minimal layout.
//!   ② Snapshot  — MetricsSnapshot appended to the history.
//!   ③ Events    — due ReturnFromBreak / TreatmentComplete fire.
//!   ④ Agents    — Scheduler shuffles the live set and steps each agent once;
//!                 word-of-mouth intents apply before the next agent runs.
//!   ⑤ Boundary  — clock += 1, VR / telehealth / reception pools refill,
//!                 emergency and regular arrivals join the scheduler.
//!   ⑥ Insights  — every insight_interval_ticks the detectors run.
//! ```
//!
//! # Crate layout
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`model`]      | `HospitalModel`, `RunStatus`, arrival rates           |
//! | [`builder`]    | `ModelBuilder`                                        |
//! | [`scheduler`]  | `Scheduler`, `AgentRef`, `StepReport`                 |
//! | [`metrics`]    | `MetricsSnapshot` and the pure aggregates behind it   |
//! | [`sampling`]   | `AgentSummary`, bounded agent samples                 |
//! | [`config`]     | `Innovations`                                         |
//! | [`observer`]   | `SimObserver`, `NoopObserver`                         |
//! | [`error`]      | `SimError`                                            |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `serde`    | Serde derives on snapshots, summaries and config.      |
//! | `parallel` | Runs the insight detectors on Rayon's thread pool.     |
//! | `fx-hash`  | FxHash grouping maps in the detectors.                 |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vf_core::SimConfig;
//! use vf_sim::{Innovations, ModelBuilder, NoopObserver};
//!
//! let mut model = ModelBuilder::new(100, 30)
//!     .innovations(Innovations { vr_stations: 8, ..Innovations::default() })
//!     .config(SimConfig { seed: 42, ..SimConfig::default() })
//!     .build()?;
//! let last = model.run(&mut NoopObserver);
//! println!("treated {} / walked out {}", last.patients_treated, last.left_without_treatment);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod observer;
pub mod sampling;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use builder::ModelBuilder;
pub use config::Innovations;
pub use error::{SimError, SimResult};
pub use metrics::MetricsSnapshot;
pub use model::{HospitalModel, RunStatus};
pub use observer::{NoopObserver, SimObserver};
pub use sampling::{AgentKind, AgentSummary};
pub use scheduler::{AgentRef, Scheduler, StepReport};
