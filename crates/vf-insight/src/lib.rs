//! `vf-insight` — statistical pattern detection over the live population.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`insight`]     | `Insight`, `InsightKind`, `Severity`, `ImpactValue`    |
//! | [`census`]      | `Census<'a>` — the read-only view detectors consume    |
//! | [`thresholds`]  | `InsightThresholds` (all detector constants)           |
//! | [`detectors`]   | the seven detector passes                              |
//! | [`stats`]       | mean, population std-dev, Pearson correlation          |
//! | [`engine`]      | `InsightEngine`, `filter_insights`                     |
//!
//! Detectors never mutate the population.  Below their minimum sample size
//! they return nothing rather than a noisy finding.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                |
//! |------------|-------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on insight types.   |
//! | `parallel` | Runs the detector passes on Rayon.                    |
//! | `fx-hash`  | FxHash grouping maps instead of SipHash.              |

pub mod census;
pub mod detectors;
pub mod engine;
pub mod insight;
pub mod stats;
pub mod thresholds;


pub use census::Census;
pub use engine::{filter_insights, InsightEngine};
pub use insight::{ImpactValue, Insight, InsightKind, Severity};
pub use thresholds::InsightThresholds;
