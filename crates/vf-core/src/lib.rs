//! `vf-core` — foundational types for the `vetflow` hospital simulation.
//!
//! Every other `vf-*` crate depends on this one.  It has no `vf-*`
//! dependencies and only `rand` and `thiserror` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                           |
//! |----------------|----------------------------------------------------|
//! | [`ids`]        | `PatientId`, `ProviderId`, `AreaId`                |
//! | [`geo`]        | `Position`, the 2D presentation coordinate         |
//! | [`time`]       | `Tick`, `SimClock`, `SimConfig`                    |
//! | [`rng`]        | `SimRng`, the single seedable random source        |
//! | [`modality`]   | `Modality` (VR / telehealth / traditional)         |
//! | [`error`]      | `CoreError`, `CoreResult`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod geo;
pub mod ids;
pub mod modality;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::Position;
pub use ids::{AreaId, PatientId, ProviderId};
pub use modality::Modality;
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
