//! `vf-agent` — patient and provider entities and their storage.
//!
//! # Crate layout
//!
//! | Module            | Contents                                              |
//! |-------------------|-------------------------------------------------------|
//! | [`patient`]       | `Patient`, `Condition`, `PatientState`, `ServiceEra`  |
//! | [`provider`]      | `Provider`, `ProviderType`, `Specialty`, `ProviderActivity` |
//! | [`fault`]         | `FaultTracker`, `AgentStatus`                         |
//! | [`store`]         | `AgentStore` (dense id-indexed `Vec`s)                |
//! | [`demographics`]  | stochastic patient/provider/social-network generation |
//! | [`builder`]       | `ProviderRole`, `ProviderMix`, `PopulationBuilder`    |
//! | [`error`]         | `AgentError`, `AgentResult<T>`                        |
//!
//! Entities are plain data.  Behaviour lives in `vf-behavior`.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on enums and the mix. |

pub mod builder;
pub mod demographics;
pub mod error;
pub mod fault;
pub mod patient;
pub mod provider;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::{PopulationBuilder, ProviderMix, ProviderRole};
pub use error::{AgentError, AgentResult};
pub use fault::{AgentStatus, FaultTracker};
pub use patient::{Comorbidity, Condition, Patient, PatientState, ServiceEra};
pub use provider::{Provider, ProviderActivity, ProviderType, Specialty};
pub use store::AgentStore;
