//! The `HospitalModel` struct and its tick loop.

use tracing::{debug, info, warn};

use vf_agent::demographics::{generate_patient, sample_condition, ARRIVAL_CONDITION_WEIGHTS};
use vf_agent::{AgentStore, Condition, Patient, PatientState};
use vf_behavior::provider::handle_event;
use vf_behavior::treatment::{area_for, relocate_patient, station_for};
use vf_behavior::{FlowCounters, StepContext, Steppable};
use vf_core::{PatientId, Position, SimClock, SimConfig, SimRng, Tick};
use vf_facility::area::names;
use vf_facility::{FacilityError, FacilityState, FacilityTopology};
use vf_insight::{Census, Insight, InsightEngine};
use vf_schedule::EventQueue;

use crate::metrics::{self, MetricsSnapshot};
use crate::sampling::{self, AgentSummary};
use crate::{AgentRef, Innovations, NoopObserver, Scheduler, SimObserver};

/// Independent per-tick probability of an emergency arrival.
pub const EMERGENCY_ARRIVAL_P: f64 = 0.05;

/// Probability of a regular arrival in a tick during `hour`.
pub fn arrival_rate(hour: u32) -> f64 {
    match hour {
        8..17  => 0.3,
        17..22 => 0.2,
        _      => 0.1,
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RunStatus {
    Running,
    /// The step budget was reached.
    Completed,
    /// [`HospitalModel::stop`] was called.
    Stopped,
}

// ── HospitalModel ─────────────────────────────────────────────────────────────

/// The whole simulated hospital.
///
/// Each [`step`](Self::step) runs, in order:
///
/// 1. **Fault check**: an unusable topology is replaced by
///    [`FacilityTopology::minimal`] and every agent is re-placed.
/// 2. **Snapshot**: a [`MetricsSnapshot`] is appended to the history.
/// 3. **Events**: due breaks and treatment completions fire.
/// 4. **Agents**: the [`Scheduler`] steps every live agent once.
/// 5. **Boundary**: the clock advances, per-tick pools refill and new
///    patients arrive.
/// 6. **Insights**: every `insight_interval_ticks` the detectors run.
///
/// Create via [`ModelBuilder`][crate::ModelBuilder].
pub struct HospitalModel {
    pub config: SimConfig,
    pub clock:  SimClock,

    /// Every patient and provider of the run, retired patients included.
    pub agents: AgentStore,

    pub facility: FacilityState,

    /// Pending breaks and treatment completions.
    pub events: EventQueue,

    /// The run's single random source.
    pub rng: SimRng,

    pub counters:    FlowCounters,
    pub scheduler:   Scheduler,
    pub insights:    InsightEngine,
    pub innovations: Innovations,

    status:          RunStatus,
    metrics_history: Vec<MetricsSnapshot>,
    model_faults:    u64,
}

impl HospitalModel {
    pub(crate) fn from_parts(
        config:      SimConfig,
        agents:      AgentStore,
        facility:    FacilityState,
        rng:         SimRng,
        scheduler:   Scheduler,
        insights:    InsightEngine,
        innovations: Innovations,
    ) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            agents,
            facility,
            events: EventQueue::new(),
            rng,
            counters: FlowCounters::default(),
            scheduler,
            insights,
            innovations,
            status: RunStatus::Running,
            metrics_history: Vec::new(),
            model_faults: 0,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Advance one tick.  Does nothing once the run has completed or been
    /// stopped.
    pub fn step(&mut self) {
        self.step_observed(&mut NoopObserver);
    }

    /// [`step`](Self::step) with observer callbacks.
    pub fn step_observed<O: SimObserver>(&mut self, observer: &mut O) {
        if self.status != RunStatus::Running {
            return;
        }
        let tick = self.clock.current_tick;
        let hour = self.clock.hour_of_day();
        observer.on_tick_start(tick);

        // ── Phase 1: structural fault check ───────────────────────────────
        if let Err(err) = self.facility.check() {
            self.install_fallback_topology(tick, &err);
        }

        // ── Phase 2: snapshot ─────────────────────────────────────────────
        let snapshot = self.get_state();
        self.metrics_history.push(snapshot.clone());

        // ── Phase 3: deferred events ──────────────────────────────────────
        self.fire_due_events(tick, hour);

        // ── Phase 4: agents ───────────────────────────────────────────────
        let report = {
            let mut ctx = StepContext::new(
                tick,
                hour,
                &mut self.facility,
                &mut self.events,
                &mut self.rng,
                &mut self.counters,
            )
            .with_ai_triage(self.innovations.ai_triage_enabled);
            self.scheduler.step(&mut self.agents, &mut ctx)
        };
        debug!(
            tick = tick.0,
            stepped = report.stepped,
            skipped = report.skipped,
            faults = report.faults,
            retired = report.retired,
            "agents stepped"
        );

        // ── Phase 5: tick boundary ────────────────────────────────────────
        self.clock.advance();
        let now = self.clock.current_tick;
        self.facility.replenish_pools(now);
        self.spawn_arrivals(now);

        // ── Phase 6: insights ─────────────────────────────────────────────
        if now.is_multiple_of(self.config.insight_interval_ticks) {
            let census = census(now, &self.agents, &self.facility, &self.counters);
            let found = self.insights.run(&census);
            if !found.is_empty() {
                observer.on_insights(now, &found);
            }
        }

        if now.is_multiple_of(self.config.log_interval_ticks) {
            info!(
                tick = now.0,
                clock = %self.clock,
                live = self.scheduler.len(),
                waiting = self.facility.waiting_room.len(),
                treated = self.counters.treated,
                lwot = self.counters.left_without_treatment,
                "progress"
            );
        }

        observer.on_tick_end(tick, &snapshot);

        if now >= self.config.end_tick() {
            self.status = RunStatus::Completed;
            let last = self.get_state();
            info!(
                tick = now.0,
                treated = last.patients_treated,
                lwot = last.left_without_treatment,
                avg_wait = last.avg_wait_time,
                "run completed"
            );
            observer.on_run_end(now, &last);
        }
    }

    /// Step until the run completes or is stopped.  Returns the final
    /// snapshot.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> MetricsSnapshot {
        while self.status == RunStatus::Running {
            self.step_observed(observer);
        }
        self.get_state()
    }

    /// Step at most `n` ticks.  Stops early if the run ends.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            if self.status != RunStatus::Running {
                break;
            }
            self.step_observed(observer);
        }
    }

    /// Stop between ticks.  Later calls to `step` are no-ops.
    pub fn stop(&mut self) {
        if self.status == RunStatus::Running {
            self.status = RunStatus::Stopped;
            info!(tick = self.clock.current_tick.0, "run stopped");
        }
    }

    /// Current metrics.  Reads only; calling it twice without a step in
    /// between gives equal snapshots.
    pub fn get_state(&self) -> MetricsSnapshot {
        metrics::collect(
            self.clock.current_tick,
            &self.agents,
            &self.facility,
            &self.counters,
            self.scheduler.len(),
        )
    }

    /// Run the detectors over the current population without recording the
    /// result.
    pub fn detect_insights(&self) -> Vec<Insight> {
        let census = census(self.clock.current_tick, &self.agents, &self.facility, &self.counters);
        self.insights.detect(&census)
    }

    /// At most `limit` agents, four patients for every provider.
    pub fn sample_agents(&self, limit: usize) -> Vec<AgentSummary> {
        sampling::sample_agents(&self.agents, self.facility.topology(), limit)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn tick(&self) -> Tick {
        self.clock.current_tick
    }

    #[inline]
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// One snapshot per executed step, taken at the start of that step.
    pub fn metrics_history(&self) -> &[MetricsSnapshot] {
        &self.metrics_history
    }

    /// Every insight surfaced by the periodic passes.
    pub fn insight_history(&self) -> &[Insight] {
        self.insights.history()
    }

    /// Model-level faults absorbed so far.
    pub fn model_faults(&self) -> u64 {
        self.model_faults
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    fn install_fallback_topology(&mut self, tick: Tick, err: &FacilityError) {
        self.model_faults += 1;
        warn!(tick = tick.0, error = %err, "facility topology unusable, installing minimal layout");
        self.facility.install_topology(FacilityTopology::minimal());

        for p in &mut self.agents.patients {
            // Old area ids do not carry over.
            p.location = None;
            let to = resting_area(p).and_then(|name| self.facility.area(name));
            relocate_patient(p, &mut self.facility, to);
        }
        for p in &mut self.agents.providers {
            p.station = self.facility.area(station_for(p.specialty));
        }
    }

    fn fire_due_events(&mut self, tick: Tick, hour: u32) {
        let due = self.events.drain_due(tick);
        if due.is_empty() {
            return;
        }
        let AgentStore { patients, providers } = &mut self.agents;
        let mut ctx = StepContext::new(
            tick,
            hour,
            &mut self.facility,
            &mut self.events,
            &mut self.rng,
            &mut self.counters,
        )
        .with_ai_triage(self.innovations.ai_triage_enabled);

        for event in due {
            let Some(provider) = providers.get_mut(event.provider.index()) else {
                self.model_faults += 1;
                warn!(tick = tick.0, provider = %event.provider, "event for unknown provider dropped");
                continue;
            };
            if let Err(fault) = handle_event(provider, patients, event.kind, &mut ctx) {
                let status = provider.on_fault(&fault, tick);
                warn!(tick = tick.0, provider = %provider.id, ?status, %fault, "event handling failed");
            }
        }
    }

    fn spawn_arrivals(&mut self, now: Tick) {
        if self.rng.gen_bool(EMERGENCY_ARRIVAL_P) {
            self.admit(Condition::Emergency, now);
        }
        if self.rng.gen_bool(arrival_rate(self.clock.hour_of_day())) {
            let condition = sample_condition(&ARRIVAL_CONDITION_WEIGHTS, &mut self.rng);
            self.admit(condition, now);
        }
    }

    /// Add a new patient at the entrance.  Only called between ticks.
    fn admit(&mut self, condition: Condition, now: Tick) -> PatientId {
        let id = self.agents.next_patient_id();
        let mut patient = generate_patient(id, condition, now, &mut self.rng);
        patient.position = entrance_position(self.facility.topology());
        self.agents.push_patient(patient);
        self.scheduler.add(AgentRef::Patient(id));
        debug!(tick = now.0, patient = %id, %condition, "arrival");
        id
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Read-only detector input built from disjoint model fields.
fn census<'a>(
    tick:     Tick,
    agents:   &'a AgentStore,
    facility: &'a FacilityState,
    counters: &FlowCounters,
) -> Census<'a> {
    Census {
        tick,
        patients: &agents.patients,
        providers: &agents.providers,
        waiting_room: facility.waiting_room.as_slice(),
        vr_stations: facility.vr_stations.capacity(),
        vr_sessions_completed: counters.vr_sessions,
        current_average_wait: metrics::average_wait(&agents.patients),
    }
}

/// Where a patient belongs for its current state, by area name.
fn resting_area(p: &Patient) -> Option<&'static str> {
    match p.state {
        PatientState::Arrival | PatientState::LeftWithoutTreatment | PatientState::Discharged => None,
        PatientState::CheckIn => Some(names::ENTRANCE),
        PatientState::Waiting | PatientState::Triage => Some(names::WAITING_ROOM),
        PatientState::Treatment => Some(area_for(p.condition, p.modality.unwrap_or_default())),
    }
}

pub(crate) fn entrance_position(topology: &FacilityTopology) -> Position {
    topology
        .lookup(names::ENTRANCE)
        .and_then(|a| topology.position(a))
        .unwrap_or_default()
}
