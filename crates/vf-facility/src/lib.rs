//! `vf-facility` — the physical hospital: area graph, per-tick resource
//! pools, and the shared state every agent reads and mutates.
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`area`]      | `AreaKind`, `AreaSpec`, standard area names           |
//! | [`topology`]  | `FacilityTopology` (CSR digraph), `TopologyBuilder`   |
//! | [`pool`]      | `ResourcePool` with `try_acquire` / `replenish`       |
//! | [`state`]     | `FacilityState`, `WaitingRoom`                        |
//! | [`error`]     | `FacilityError`, `FacilityResult`                     |
//!
//! Stepping is strictly sequential, so `FacilityState` is handed to one
//! agent at a time by `&mut` and needs no interior locking.

pub mod area;
pub mod error;
pub mod pool;
pub mod state;
pub mod topology;


pub use area::{AreaKind, AreaSpec};
pub use error::{FacilityError, FacilityResult};
pub use pool::ResourcePool;
pub use state::{FacilityState, WaitingRoom};
pub use topology::{FacilityTopology, TopologyBuilder};
