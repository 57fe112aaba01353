//! Integration tests for vf-sim.

use vf_core::SimConfig;
use vf_schedule::Shift;

use crate::{HospitalModel, ModelBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64, seed: u64) -> SimConfig {
    SimConfig { total_ticks, seed, ..SimConfig::default() }
}

/// Shifts that cover every hour, so providers work from tick 0.
fn round_the_clock(n: usize) -> Vec<Shift> {
    vec![Shift::new(0, 24); n]
}

/// Default mix scaled to `providers`, everyone on shift.
fn staffed(patients: usize, providers: u32, seed: u64) -> HospitalModel {
    ModelBuilder::new(patients, providers)
        .shifts(round_the_clock(providers as usize))
        .config(test_config(5_000, seed))
        .build()
        .unwrap()
}

fn step_n(model: &mut HospitalModel, n: usize) {
    for _ in 0..n {
        model.step();
    }
}

// ── ModelBuilder ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use vf_agent::{ProviderActivity, ProviderMix, ProviderRole};
    use vf_core::Tick;

    use super::*;
    use crate::{RunStatus, SimError};

    #[test]
    fn builds_with_defaults() {
        let model = ModelBuilder::new(20, 30).config(test_config(100, 1)).build().unwrap();
        assert_eq!(model.agents.patient_count(), 20);
        assert_eq!(model.agents.provider_count(), 30);
        assert_eq!(model.scheduler.len(), 50);
        assert_eq!(model.tick(), Tick(0));
        assert_eq!(model.status(), RunStatus::Running);
        assert_eq!(model.facility.vr_stations.capacity(), 5);
        assert_eq!(model.facility.telehealth_rooms.capacity(), 10);
    }

    #[test]
    fn day_shift_starts_off_shift_at_midnight() {
        let model = ModelBuilder::new(0, 10).build().unwrap();
        assert!(model.agents.providers.iter().all(|p| p.activity == ProviderActivity::OffShift));
        assert!(model.agents.providers.iter().all(|p| p.station.is_some()));
    }

    #[test]
    fn round_the_clock_shifts_start_idle() {
        let model = staffed(0, 10, 1);
        assert!(model.agents.providers.iter().all(|p| p.activity == ProviderActivity::Idle));
        assert_eq!(model.get_state().provider_utilization, 0.0);
    }

    #[test]
    fn explicit_mix_wins_over_head_count() {
        let mix = ProviderMix::new().with(ProviderRole::MentalHealthProviders, 2);
        let model = ModelBuilder::new(5, 30).provider_mix(mix).build().unwrap();
        assert_eq!(model.agents.provider_count(), 2);
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SimConfig { ticks_per_hour: 0, ..SimConfig::default() };
        let err = ModelBuilder::new(5, 5).config(config).build().err().unwrap();
        assert!(matches!(err, SimError::Core(_)));
    }

    #[test]
    fn shift_count_mismatch_rejected() {
        let err = ModelBuilder::new(5, 30).shifts(round_the_clock(3)).build().err().unwrap();
        assert!(matches!(err, SimError::Agent(_)));
    }

    #[test]
    fn shift_list_and_roster_file_conflict() {
        let err = ModelBuilder::new(5, 3)
            .shifts(round_the_clock(3))
            .shifts_csv("roster.csv")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn missing_roster_file_rejected() {
        let err = ModelBuilder::new(5, 3)
            .shifts_csv("/definitely/not/here/roster.csv")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Schedule(_)));
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use std::collections::{HashMap, HashSet};

    use vf_agent::{AgentStatus, PatientState, ProviderActivity};
    use vf_core::{AreaId, Tick};
    use vf_facility::area::names;
    use vf_facility::FacilityTopology;

    use super::*;
    use crate::{NoopObserver, RunStatus, SimObserver};

    #[test]
    fn clock_and_history_advance_per_step() {
        let mut model = staffed(10, 5, 2);
        step_n(&mut model, 5);
        assert_eq!(model.tick(), Tick(5));
        assert_eq!(model.metrics_history().len(), 5);
        assert_eq!(model.metrics_history()[0].tick, Tick(0));
        assert_eq!(model.metrics_history()[4].tick, Tick(4));
    }

    #[test]
    fn get_state_is_idempotent() {
        let mut model = staffed(40, 10, 3);
        step_n(&mut model, 25);
        let a = model.get_state();
        let b = model.get_state();
        assert_eq!(a, b);
        assert_eq!(model.tick(), Tick(25));
    }

    #[test]
    fn vr_pool_bounded_and_replenished_once_per_tick() {
        let mut model = ModelBuilder::new(80, 20)
            .shifts(round_the_clock(20))
            .config(test_config(5_000, 4))
            .build()
            .unwrap();
        for _ in 0..200 {
            model.step();
            let vr = &model.facility.vr_stations;
            assert!(vr.available() <= vr.capacity());
            assert_eq!(vr.replenished_at(), Some(model.tick()));
            let now = model.tick();
            assert!(!model.facility.replenish_pools(now));
        }
    }

    /// wait_time only counts while a patient queues at reception or in the
    /// waiting room, and is frozen in every other state.
    #[test]
    fn wait_time_grows_only_while_queued() {
        let mut model = staffed(60, 10, 5);
        let mut last: HashMap<usize, (PatientState, u64)> = HashMap::new();
        let mut frozen_checks = 0;
        for _ in 0..300 {
            model.step();
            for (i, p) in model.agents.patients.iter().enumerate() {
                let Some((state, prev)) = last.insert(i, (p.state, p.wait_time)) else { continue };
                match state {
                    PatientState::CheckIn | PatientState::Waiting => {
                        assert!(p.wait_time >= prev, "{} wait went {} -> {}", p.id, prev, p.wait_time);
                    }
                    _ => {
                        frozen_checks += 1;
                        assert_eq!(p.wait_time, prev, "{} wait moved while {}", p.id, state);
                    }
                }
            }
        }
        assert!(frozen_checks > 0);
        assert!(model.counters.treated > 0);
    }

    #[test]
    fn faulting_provider_is_isolated_then_disabled() {
        let mut model = staffed(40, 5, 15);
        let broken = &mut model.agents.providers[0];
        broken.activity = ProviderActivity::Treating;
        broken.current_patient = None;

        step_n(&mut model, 10);

        // Faults at ticks 0, 1, 2, 4 and 6; skipped while deactivated.
        let broken = &model.agents.providers[0];
        assert_eq!(broken.faults.status(), AgentStatus::Error);
        assert_eq!(broken.faults.total(), 5);

        assert_eq!(model.tick(), Tick(10));
        assert_eq!(model.status(), RunStatus::Running);
        assert!(model.counters.arrivals >= 40);
        assert!(model.agents.patients.iter().any(|p| p.state != PatientState::Arrival));
        assert!(model.agents.providers[1..]
            .iter()
            .all(|p| p.faults.status() == AgentStatus::Active && p.faults.total() == 0));
    }

    #[test]
    fn occupancy_tracks_patients_in_the_building() {
        let mut model = staffed(60, 10, 16);
        step_n(&mut model, 300);
        assert!(model.counters.treated > 0);

        let areas = model.facility.topology().area_count();
        for i in 0..areas {
            let area = AreaId(i as u16);
            let inside = model.agents.patients.iter().filter(|p| p.location == Some(area)).count();
            assert_eq!(model.facility.occupancy(area) as usize, inside, "{area}");
        }
        assert!(model
            .agents
            .patients
            .iter()
            .filter(|p| p.is_terminal())
            .all(|p| p.location.is_none()));
        let discharge = model.facility.area(names::DISCHARGE).unwrap();
        assert_eq!(model.facility.occupancy(discharge), 0);
    }

    #[test]
    fn pairing_is_exclusive() {
        let mut model = staffed(60, 10, 6);
        for _ in 0..300 {
            model.step();

            let mut claimed = HashSet::new();
            for prov in &model.agents.providers {
                if let Some(pid) = prov.current_patient {
                    assert!(claimed.insert(pid), "{pid} paired with two providers");
                }
            }
            for &id in model.facility.waiting_room.as_slice() {
                assert_eq!(model.agents.patients[id.index()].state, PatientState::Waiting);
            }
            for p in &model.agents.patients {
                if p.state == PatientState::Treatment {
                    assert!(p.provider.is_some());
                    assert!(!model.facility.waiting_room.contains(p.id));
                }
            }
        }
        assert!(model.counters.treated > 0);
    }

    #[test]
    fn ai_triage_runs_at_check_in() {
        let mut model = ModelBuilder::new(20, 5)
            .innovations(crate::Innovations { ai_triage_enabled: true, ..Default::default() })
            .config(test_config(5_000, 7))
            .build()
            .unwrap();
        step_n(&mut model, 10);
        assert!(model.counters.ai_triage_assessments > 0);
        assert!(model.agents.patients.iter().any(|p| p.ai_triaged));
    }

    #[test]
    fn broken_topology_falls_back_to_minimal() {
        let mut model = staffed(30, 5, 8);
        step_n(&mut model, 3);
        model.facility.install_topology(FacilityTopology::empty());

        model.step();
        assert_eq!(model.model_faults(), 1);
        assert_eq!(model.facility.topology().area_count(), 4);
        assert_eq!(model.tick(), Tick(4));

        model.step();
        assert_eq!(model.model_faults(), 1);
        assert_eq!(model.tick(), Tick(5));
    }

    #[test]
    fn stop_freezes_the_run() {
        let mut model = staffed(10, 5, 9);
        step_n(&mut model, 3);
        model.stop();
        model.step();
        assert_eq!(model.status(), RunStatus::Stopped);
        assert_eq!(model.tick(), Tick(3));
    }

    #[test]
    fn run_completes_at_step_budget() {
        let mut model = ModelBuilder::new(10, 5).config(test_config(60, 10)).build().unwrap();
        let last = model.run(&mut NoopObserver);
        assert_eq!(model.status(), RunStatus::Completed);
        assert_eq!(last.tick, Tick(60));
        assert_eq!(model.metrics_history().len(), 60);
        model.step();
        assert_eq!(model.tick(), Tick(60));
    }

    #[test]
    fn run_ticks_stops_at_budget() {
        let mut model = ModelBuilder::new(5, 2).config(test_config(10, 10)).build().unwrap();
        model.run_ticks(25, &mut NoopObserver);
        assert_eq!(model.tick(), Tick(10));
    }

    #[test]
    fn observer_hooks_fire() {
        #[derive(Default)]
        struct Counter {
            starts: usize,
            ends:   usize,
            runs:   usize,
        }
        impl SimObserver for Counter {
            fn on_tick_start(&mut self, _t: Tick) { self.starts += 1; }
            fn on_tick_end(&mut self, _t: Tick, _m: &crate::MetricsSnapshot) { self.ends += 1; }
            fn on_run_end(&mut self, _t: Tick, _m: &crate::MetricsSnapshot) { self.runs += 1; }
        }

        let mut model = ModelBuilder::new(10, 5).config(test_config(120, 11)).build().unwrap();
        let mut obs = Counter::default();
        model.run(&mut obs);
        assert_eq!(obs.starts, 120);
        assert_eq!(obs.ends, 120);
        assert_eq!(obs.runs, 1);
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = staffed(50, 10, 12);
        let mut b = staffed(50, 10, 12);
        step_n(&mut a, 200);
        step_n(&mut b, 200);
        assert_eq!(a.get_state(), b.get_state());
        assert_eq!(a.agents.patient_count(), b.agents.patient_count());
    }

    #[test]
    fn detect_insights_does_not_record() {
        let mut model = staffed(60, 10, 13);
        step_n(&mut model, 30);
        let before = model.insight_history().len();
        let first = model.detect_insights();
        let second = model.detect_insights();
        assert_eq!(first, second);
        assert_eq!(model.insight_history().len(), before);
    }

    /// 100 patients and nobody to treat them.
    #[test]
    fn unstaffed_hospital_only_loses_patients() {
        let mut model = ModelBuilder::new(100, 0)
            .config(test_config(5_000, 14))
            .without_social_network()
            .build()
            .unwrap();
        let last = model.run(&mut NoopObserver);
        assert_eq!(model.status(), RunStatus::Completed);
        assert_eq!(last.tick, Tick(5_000));
        assert_eq!(last.patients_treated, 0);
        assert!(last.left_without_treatment > 0);
        assert_eq!(last.lwot_rate, 1.0);
    }
}

// ── Metrics & sampling ────────────────────────────────────────────────────────

#[cfg(test)]
mod metrics_tests {
    use vf_agent::{Condition, Patient, PatientState};
    use vf_behavior::FlowCounters;
    use vf_core::{PatientId, Tick};

    use super::*;
    use crate::metrics::{
        average_satisfaction, average_wait, cost_per_visit, lwot_rate, mental_health_access_pct,
    };
    use crate::AgentKind;

    fn patient(i: u32, condition: Condition, state: PatientState, wait: u64) -> Patient {
        let mut p = Patient::new(PatientId(i), condition, 3, Tick(0));
        p.state = state;
        p.wait_time = wait;
        p
    }

    #[test]
    fn empty_population_defaults() {
        assert_eq!(average_wait(&[]), 0.0);
        assert_eq!(average_satisfaction(&[]), 50.0);
        assert_eq!(mental_health_access_pct(&[]), 0.0);
        assert_eq!(lwot_rate(&FlowCounters::default()), 0.0);
    }

    #[test]
    fn averages_include_finished_patients() {
        let ps = vec![
            patient(0, Condition::Routine, PatientState::Waiting, 10),
            patient(1, Condition::Routine, PatientState::Discharged, 30),
        ];
        assert_eq!(average_wait(&ps), 20.0);
    }

    #[test]
    fn mental_health_access_counts_treated_and_discharged() {
        let ps = vec![
            patient(0, Condition::MentalHealth, PatientState::Waiting, 0),
            patient(1, Condition::MentalHealth, PatientState::Treatment, 0),
            patient(2, Condition::MentalHealth, PatientState::Discharged, 0),
            patient(3, Condition::MentalHealth, PatientState::LeftWithoutTreatment, 0),
            patient(4, Condition::Routine, PatientState::Discharged, 0),
        ];
        assert_eq!(mental_health_access_pct(&ps), 50.0);
    }

    #[test]
    fn cost_spreads_innovation_spend_over_treated() {
        let mut c = FlowCounters::default();
        assert_eq!(cost_per_visit(&c), 150.0);
        c.vr_sessions = 2;
        c.telehealth_sessions = 4;
        assert_eq!(cost_per_visit(&c), 350.0);
        c.treated = 4;
        assert_eq!(cost_per_visit(&c), 200.0);
    }

    #[test]
    fn lwot_rate_over_finished_journeys() {
        let c = FlowCounters { treated: 3, left_without_treatment: 1, ..Default::default() };
        assert_eq!(lwot_rate(&c), 0.25);
    }

    #[test]
    fn sample_splits_four_to_one() {
        let model = ModelBuilder::new(20, 30).build().unwrap();
        let s = model.sample_agents(10);
        assert_eq!(s.len(), 10);
        assert_eq!(s.iter().filter(|a| a.kind == AgentKind::Patient).count(), 8);
        assert_eq!(s.iter().filter(|a| a.kind == AgentKind::Provider).count(), 2);
        for a in &s {
            match a.kind {
                AgentKind::Patient => {
                    assert!(a.wait_time.is_some() && a.stress.is_none());
                    assert!(a.condition.is_some() && a.specialty.is_none());
                }
                AgentKind::Provider => {
                    assert!(a.wait_time.is_none());
                    assert_eq!(a.stress, Some(model.agents.providers[0].stress));
                    assert!(a.condition.is_none() && a.specialty.is_some());
                }
            }
        }
        assert!(model.sample_agents(0).is_empty());
        assert_eq!(model.sample_agents(1_000).len(), 50);
    }

    #[test]
    fn sample_fills_with_providers_when_patients_are_few() {
        let model = ModelBuilder::new(3, 30).build().unwrap();
        let s = model.sample_agents(10);
        assert_eq!(s.len(), 10);
        assert_eq!(s.iter().filter(|a| a.kind == AgentKind::Provider).count(), 7);
        let prov = s.iter().find(|a| a.kind == AgentKind::Provider).unwrap();
        assert_eq!(prov.state, "off_shift");
        assert!(prov.location.is_some());
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod props {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn satisfaction_stays_bounded(seed in any::<u64>(), steps in 1usize..150) {
            let mut model = staffed(40, 8, seed);
            for _ in 0..steps {
                model.step();
                for p in &model.agents.patients {
                    prop_assert!((0.0..=100.0).contains(&p.satisfaction()));
                }
            }
        }

        #[test]
        fn snapshot_rates_stay_in_range(seed in any::<u64>()) {
            let mut model = staffed(40, 8, seed);
            step_n(&mut model, 120);
            let s = model.get_state();
            prop_assert!((0.0..=1.0).contains(&s.provider_utilization));
            prop_assert!((0.0..=1.0).contains(&s.lwot_rate));
            prop_assert!((0.0..=100.0).contains(&s.mental_health_access_pct));
            prop_assert!(s.cost_per_visit >= 150.0);
        }
    }
}
