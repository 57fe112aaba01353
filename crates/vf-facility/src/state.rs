//! Shared facility state.
//!
//! One `FacilityState` exists per run.  Agents receive it by `&mut` during
//! their step; the orchestrator touches it only between agent steps.

use vf_core::{AreaId, PatientId, Tick};

use crate::area::names;
use crate::{FacilityResult, FacilityTopology, ResourcePool};

/// Reception throughput when the topology omits a reception capacity.
const DEFAULT_RECEPTION_SLOTS: u32 = 5;

// ── WaitingRoom ───────────────────────────────────────────────────────────────

/// Ordered membership list of patients awaiting a provider.
///
/// Holds ids only; the patients themselves live in the agent store.  Order
/// is arrival order and is the tie-breaker for patient selection.
#[derive(Clone, Debug, Default)]
pub struct WaitingRoom {
    queue: Vec<PatientId>,
    /// Patients ever removed, for the "removed exactly once" audit.
    removed_total: u64,
}

impl WaitingRoom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `patient`.  Returns `false` if already present.
    pub fn join(&mut self, patient: PatientId) -> bool {
        if self.contains(patient) {
            return false;
        }
        self.queue.push(patient);
        true
    }

    /// Remove `patient`, keeping the order of the others.  Returns `false`
    /// if it was not waiting.
    pub fn remove(&mut self, patient: PatientId) -> bool {
        match self.queue.iter().position(|&p| p == patient) {
            Some(i) => {
                self.queue.remove(i);
                self.removed_total += 1;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, patient: PatientId) -> bool {
        self.queue.contains(&patient)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn as_slice(&self) -> &[PatientId] {
        &self.queue
    }

    pub fn iter(&self) -> impl Iterator<Item = PatientId> + '_ {
        self.queue.iter().copied()
    }

    pub fn removed_total(&self) -> u64 {
        self.removed_total
    }
}

// ── FacilityState ─────────────────────────────────────────────────────────────

pub struct FacilityState {
    topology:  FacilityTopology,
    occupancy: Vec<u32>,

    pub waiting_room:     WaitingRoom,
    pub vr_stations:      ResourcePool,
    pub telehealth_rooms: ResourcePool,
    pub reception:        ResourcePool,
}

impl FacilityState {
    pub fn new(topology: FacilityTopology, vr_stations: u32, telehealth_rooms: u32) -> Self {
        let reception_slots = topology
            .lookup(names::RECEPTION)
            .map(|r| topology.capacity(r))
            .unwrap_or(DEFAULT_RECEPTION_SLOTS);
        Self {
            occupancy: vec![0; topology.area_count()],
            topology,
            waiting_room: WaitingRoom::new(),
            vr_stations: ResourcePool::new(vr_stations),
            telehealth_rooms: ResourcePool::new(telehealth_rooms),
            reception: ResourcePool::new(reception_slots),
        }
    }

    pub fn topology(&self) -> &FacilityTopology {
        &self.topology
    }

    /// Replace the topology.  Occupancy counters are reset because area ids
    /// do not carry over; callers re-place agents afterwards.
    pub fn install_topology(&mut self, topology: FacilityTopology) {
        self.occupancy = vec![0; topology.area_count()];
        self.topology = topology;
    }

    /// Validate the installed topology.
    pub fn check(&self) -> FacilityResult<()> {
        self.topology.validate()
    }

    #[inline]
    pub fn area(&self, name: &str) -> Option<AreaId> {
        self.topology.lookup(name)
    }

    /// Refill every per-tick pool.  Returns `false` if `tick` was already
    /// replenished.
    pub fn replenish_pools(&mut self, tick: Tick) -> bool {
        let vr = self.vr_stations.replenish(tick);
        let tele = self.telehealth_rooms.replenish(tick);
        let desk = self.reception.replenish(tick);
        vr || tele || desk
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    pub fn occupancy(&self, area: AreaId) -> u32 {
        self.occupancy.get(area.index()).copied().unwrap_or(0)
    }

    /// Move one occupant between areas.  Either side may be `None` for
    /// entering or leaving the facility.  Unknown ids are ignored.
    pub fn relocate(&mut self, from: Option<AreaId>, to: Option<AreaId>) {
        if from == to {
            return;
        }
        if let Some(slot) = from.and_then(|a| self.occupancy.get_mut(a.index())) {
            *slot = slot.saturating_sub(1);
        }
        if let Some(slot) = to.and_then(|a| self.occupancy.get_mut(a.index())) {
            *slot += 1;
        }
    }

    pub fn total_occupancy(&self) -> u32 {
        self.occupancy.iter().sum()
    }
}
