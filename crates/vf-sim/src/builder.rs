//! Fluent builder for constructing a [`HospitalModel`].

use std::path::PathBuf;

use tracing::info;

use vf_agent::{PopulationBuilder, ProviderActivity, ProviderMix};
use vf_behavior::treatment::station_for;
use vf_core::{SimConfig, SimRng};
use vf_facility::{FacilityState, FacilityTopology};
use vf_insight::{InsightEngine, InsightThresholds};
use vf_schedule::{load_shifts_csv, Shift};

use crate::model::entrance_position;
use crate::{AgentRef, HospitalModel, Innovations, Scheduler, SimError, SimResult};

/// `SimRng::child` offset for population generation.
const POPULATION_STREAM: u64 = 1;

/// Fluent builder for [`HospitalModel`].
///
/// # Optional inputs (have defaults)
///
/// | Method                        | Default                                      |
/// |-------------------------------|----------------------------------------------|
/// | `.provider_mix(m)`            | VA default mix scaled to `num_providers`     |
/// | `.shifts(v)` / `.shifts_csv(p)` | Everyone on the 08:00–17:00 day shift      |
/// | `.innovations(i)`             | 5 VR stations, 10 telehealth rooms, no AI triage |
/// | `.config(c)`                  | `SimConfig::default()`                       |
/// | `.thresholds(t)`              | `InsightThresholds::default()`               |
/// | `.without_social_network()`   | Network is generated                         |
///
/// # Example
///
/// ```rust,ignore
/// let mut model = ModelBuilder::new(100, 30)
///     .innovations(Innovations { ai_triage_enabled: true, ..Innovations::default() })
///     .config(SimConfig { seed: 42, ..SimConfig::default() })
///     .build()?;
/// let last = model.run(&mut NoopObserver);
/// ```
pub struct ModelBuilder {
    num_patients:   usize,
    num_providers:  u32,
    provider_mix:   Option<ProviderMix>,
    shifts:         Option<Vec<Shift>>,
    shifts_csv:     Option<PathBuf>,
    innovations:    Innovations,
    config:         SimConfig,
    thresholds:     InsightThresholds,
    social_network: bool,
}

impl ModelBuilder {
    pub fn new(num_patients: usize, num_providers: u32) -> Self {
        Self {
            num_patients,
            num_providers,
            provider_mix:   None,
            shifts:         None,
            shifts_csv:     None,
            innovations:    Innovations::default(),
            config:         SimConfig::default(),
            thresholds:     InsightThresholds::default(),
            social_network: true,
        }
    }

    /// Explicit head count per role.  Takes precedence over `num_providers`.
    pub fn provider_mix(mut self, mix: ProviderMix) -> Self {
        self.provider_mix = Some(mix);
        self
    }

    /// Per-provider shifts, indexed by provider id.
    pub fn shifts(mut self, shifts: Vec<Shift>) -> Self {
        self.shifts = Some(shifts);
        self
    }

    /// Load shifts from a roster CSV at build time.
    pub fn shifts_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.shifts_csv = Some(path.into());
        self
    }

    pub fn innovations(mut self, innovations: Innovations) -> Self {
        self.innovations = innovations;
        self
    }

    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    pub fn thresholds(mut self, thresholds: InsightThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn without_social_network(mut self) -> Self {
        self.social_network = false;
        self
    }

    /// Validate inputs and assemble the model.
    ///
    /// # Errors
    ///
    /// - [`SimError::Core`] for an invalid [`SimConfig`].
    /// - [`SimError::Config`] if both a shift list and a roster file are set.
    /// - [`SimError::Facility`] if the standard layout cannot be built.
    /// - [`SimError::Schedule`] for an unreadable or malformed roster.
    /// - [`SimError::Agent`] if the shift count differs from the head count.
    pub fn build(self) -> SimResult<HospitalModel> {
        self.config.validate()?;
        if self.shifts.is_some() && self.shifts_csv.is_some() {
            return Err(SimError::Config(
                "set either an explicit shift list or a roster file, not both".into(),
            ));
        }

        let Innovations { vr_stations, telehealth_rooms, .. } = self.innovations;
        let topology = FacilityTopology::standard(vr_stations, telehealth_rooms)?;

        let mix = self
            .provider_mix
            .unwrap_or_else(|| ProviderMix::va_default().scaled_to(self.num_providers));
        let provider_count = mix.total() as usize;

        let shifts = match self.shifts_csv {
            Some(path) => Some(load_shifts_csv(&path, provider_count)?),
            None       => self.shifts,
        };

        // The initial population draws from its own stream so the tick
        // loop's draws do not depend on how many agents were generated.
        let mut rng = SimRng::new(self.config.seed);
        let mut population_rng = rng.child(POPULATION_STREAM);
        let mut population = PopulationBuilder::new(self.num_patients, mix);
        if let Some(shifts) = shifts {
            population = population.shifts(shifts);
        }
        if !self.social_network {
            population = population.without_social_network();
        }
        let mut agents = population.build(&mut population_rng)?;

        let facility = FacilityState::new(topology, vr_stations, telehealth_rooms);
        let start_hour = self.config.make_clock().hour_of_day();

        for p in &mut agents.providers {
            p.station = facility.area(station_for(p.specialty));
            if let Some(pos) = p.station.and_then(|s| facility.topology().position(s)) {
                p.position = pos;
            }
            p.activity = if p.shift.on_shift(start_hour) {
                ProviderActivity::Idle
            } else {
                ProviderActivity::OffShift
            };
        }
        let entrance = entrance_position(facility.topology());
        for p in &mut agents.patients {
            p.position = entrance;
        }

        let mut scheduler = Scheduler::with_capacity(agents.provider_count() + agents.patient_count());
        for p in &agents.providers {
            scheduler.add(AgentRef::Provider(p.id));
        }
        for p in &agents.patients {
            scheduler.add(AgentRef::Patient(p.id));
        }

        info!(
            patients = agents.patient_count(),
            providers = agents.provider_count(),
            vr_stations,
            telehealth_rooms,
            ai_triage = self.innovations.ai_triage_enabled,
            mobile_units = self.innovations.mobile_units,
            robotic_assistants = self.innovations.robotic_assistants,
            seed = self.config.seed,
            "hospital model built"
        );

        Ok(HospitalModel::from_parts(
            self.config,
            agents,
            facility,
            rng,
            scheduler,
            InsightEngine::new(self.thresholds),
            self.innovations,
        ))
    }
}
