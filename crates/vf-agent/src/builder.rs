//! Provider mix and fluent population construction.
//!
//! # Usage
//!
//! ```rust
//! use vf_agent::{PopulationBuilder, ProviderMix};
//! use vf_core::SimRng;
//!
//! let mut rng = SimRng::new(42);
//! let store = PopulationBuilder::new(50, ProviderMix::va_default())
//!     .build(&mut rng)
//!     .unwrap();
//!
//! assert_eq!(store.patient_count(), 50);
//! assert_eq!(store.provider_count(), 30);
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use vf_core::{SimRng, Tick};
use vf_schedule::Shift;

use crate::demographics::{self, INITIAL_CONDITION_WEIGHTS};
use crate::{AgentError, AgentResult, AgentStore, ProviderType, Specialty};

// ── ProviderRole ──────────────────────────────────────────────────────────────

/// Staffing category.  Each maps to one provider type and specialty.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProviderRole {
    EmergencyPhysicians,
    PrimaryCarePhysicians,
    MentalHealthProviders,
    Specialists,
    Nurses,
    NursePractitioners,
    Technicians,
}

impl ProviderRole {
    pub const ALL: [ProviderRole; 7] = [
        ProviderRole::EmergencyPhysicians,
        ProviderRole::PrimaryCarePhysicians,
        ProviderRole::MentalHealthProviders,
        ProviderRole::Specialists,
        ProviderRole::Nurses,
        ProviderRole::NursePractitioners,
        ProviderRole::Technicians,
    ];

    pub fn staffing(self) -> (ProviderType, Specialty) {
        use ProviderType::*;
        match self {
            ProviderRole::EmergencyPhysicians   => (Physician, Specialty::Emergency),
            ProviderRole::PrimaryCarePhysicians => (Physician, Specialty::PrimaryCare),
            ProviderRole::MentalHealthProviders => (Therapist, Specialty::MentalHealth),
            ProviderRole::Specialists           => (Physician, Specialty::Specialist),
            ProviderRole::Nurses                => (Nurse, Specialty::General),
            ProviderRole::NursePractitioners    => (NursePractitioner, Specialty::PrimaryCare),
            ProviderRole::Technicians           => (Technician, Specialty::General),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ProviderRole::EmergencyPhysicians   => "emergency_physicians",
            ProviderRole::PrimaryCarePhysicians => "primary_care_physicians",
            ProviderRole::MentalHealthProviders => "mental_health_providers",
            ProviderRole::Specialists           => "specialists",
            ProviderRole::Nurses                => "nurses",
            ProviderRole::NursePractitioners    => "nurse_practitioners",
            ProviderRole::Technicians           => "technicians",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.key() == key)
    }
}

// ── ProviderMix ───────────────────────────────────────────────────────────────

/// Head count per staffing role.  Providers are created in role order, so
/// ids are stable for a given mix.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ProviderMix(BTreeMap<ProviderRole, u32>);

impl ProviderMix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard VA staffing: 30 providers.
    pub fn va_default() -> Self {
        Self::new()
            .with(ProviderRole::EmergencyPhysicians, 3)
            .with(ProviderRole::PrimaryCarePhysicians, 5)
            .with(ProviderRole::MentalHealthProviders, 4)
            .with(ProviderRole::Specialists, 3)
            .with(ProviderRole::Nurses, 8)
            .with(ProviderRole::NursePractitioners, 3)
            .with(ProviderRole::Technicians, 4)
    }

    pub fn with(mut self, role: ProviderRole, count: u32) -> Self {
        self.0.insert(role, count);
        self
    }

    pub fn count(&self, role: ProviderRole) -> u32 {
        self.0.get(&role).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProviderRole, u32)> + '_ {
        self.0.iter().map(|(&r, &c)| (r, c))
    }

    /// Rescale to exactly `total` providers, keeping proportions by the
    /// largest-remainder method.  Ties go to the earlier role.
    pub fn scaled_to(&self, total: u32) -> Self {
        let current = self.total();
        if current == 0 || total == 0 {
            return Self(self.0.keys().map(|&r| (r, 0)).collect());
        }
        let mut shares: Vec<(ProviderRole, u32, f64)> = self
            .iter()
            .map(|(role, c)| {
                let exact = c as f64 * total as f64 / current as f64;
                (role, exact.floor() as u32, exact - exact.floor())
            })
            .collect();
        let assigned: u32 = shares.iter().map(|s| s.1).sum();
        let mut order: Vec<usize> = (0..shares.len()).collect();
        order.sort_by(|&a, &b| shares[b].2.total_cmp(&shares[a].2));
        for &i in order.iter().take((total - assigned) as usize) {
            shares[i].1 += 1;
        }
        Self(shares.into_iter().map(|(r, c, _)| (r, c)).collect())
    }
}

// ── PopulationBuilder ─────────────────────────────────────────────────────────

/// Fluent builder for the initial [`AgentStore`].
pub struct PopulationBuilder {
    num_patients:   usize,
    provider_mix:   ProviderMix,
    shifts:         Option<Vec<Shift>>,
    social_network: bool,
}

impl PopulationBuilder {
    pub fn new(num_patients: usize, provider_mix: ProviderMix) -> Self {
        Self { num_patients, provider_mix, shifts: None, social_network: true }
    }

    /// Per-provider shifts, indexed by `ProviderId`.  Length must equal the
    /// mix total.
    pub fn shifts(mut self, shifts: Vec<Shift>) -> Self {
        self.shifts = Some(shifts);
        self
    }

    /// Skip the O(n²) social-network pass.
    pub fn without_social_network(mut self) -> Self {
        self.social_network = false;
        self
    }

    pub fn build(self, rng: &mut SimRng) -> AgentResult<AgentStore> {
        let provider_total = self.provider_mix.total() as usize;
        if let Some(shifts) = &self.shifts {
            if shifts.len() != provider_total {
                return Err(AgentError::ShiftCountMismatch {
                    expected: provider_total,
                    got:      shifts.len(),
                });
            }
        }

        let mut store = AgentStore::with_capacity(self.num_patients, provider_total);

        for (role, count) in self.provider_mix.iter() {
            let (provider_type, specialty) = role.staffing();
            for _ in 0..count {
                let id = store.next_provider_id();
                let mut p = demographics::generate_provider(id, provider_type, specialty, rng);
                if let Some(shifts) = &self.shifts {
                    p.shift = shifts[id.index()];
                }
                store.push_provider(p);
            }
        }

        for _ in 0..self.num_patients {
            let id = store.next_patient_id();
            let condition = demographics::sample_condition(&INITIAL_CONDITION_WEIGHTS, rng);
            store.push_patient(demographics::generate_patient(id, condition, Tick::ZERO, rng));
        }

        let links = if self.social_network {
            demographics::link_social_network(&mut store.patients, rng)
        } else {
            0
        };

        debug!(
            patients = store.patient_count(),
            providers = store.provider_count(),
            social_links = links,
            "population built"
        );
        Ok(store)
    }
}
