//! Unit tests for vf-agent.

#[cfg(test)]
mod patient {
    use vf_core::{PatientId, Tick};

    use crate::{Condition, Patient, PatientState};

    fn patient() -> Patient {
        Patient::new(PatientId(0), Condition::Routine, 4, Tick(0))
    }

    #[test]
    fn satisfaction_is_clamped() {
        let mut p = patient();
        p.adjust_satisfaction(500.0);
        assert_eq!(p.satisfaction(), 100.0);
        p.adjust_satisfaction(-1_000.0);
        assert_eq!(p.satisfaction(), 0.0);
        p.adjust_satisfaction(f64::NAN);
        assert_eq!(p.satisfaction(), 0.0);
    }

    #[test]
    fn urgency_and_pain_are_clamped() {
        let mut p = patient();
        p.set_urgency(9);
        assert_eq!(p.urgency(), 5);
        p.set_urgency(-3);
        assert_eq!(p.urgency(), 1);
        p.set_pain_level(4.0);
        p.relieve_pain(10.0);
        assert_eq!(p.pain_level(), 0.0);
    }

    #[test]
    fn forward_progression_only() {
        use PatientState::*;
        assert!(Arrival.can_advance_to(CheckIn));
        assert!(Waiting.can_advance_to(Treatment));
        assert!(Waiting.can_advance_to(LeftWithoutTreatment));
        assert!(!Waiting.can_advance_to(CheckIn));
        assert!(!Discharged.can_advance_to(LeftWithoutTreatment));
        assert!(!LeftWithoutTreatment.can_advance_to(Treatment));
    }

    #[test]
    fn base_durations() {
        assert_eq!(Condition::MentalHealth.base_duration(), 50);
        assert_eq!(Condition::Preventive.base_duration(), 15);
    }
}

#[cfg(test)]
mod provider {
    use vf_core::{PatientId, ProviderId, Tick};

    use crate::{Condition, Patient, Provider, ProviderActivity, ProviderType, Specialty};

    #[test]
    fn base_efficiency_formula() {
        let eff = Provider::base_efficiency_for(ProviderType::Nurse, 5);
        assert!((eff - 0.85 * 0.8).abs() < 1e-9);
        // Experience factor caps at 1.0 from 15 years on.
        assert_eq!(Provider::base_efficiency_for(ProviderType::Physician, 25), 1.0);
    }

    #[test]
    fn eligibility_matrix() {
        use Condition::*;
        assert!(Specialty::Emergency.can_treat(Urgent, 2));
        assert!(!Specialty::Emergency.can_treat(Urgent, 3));
        assert!(Specialty::MentalHealth.can_treat(MentalHealth, 4));
        assert!(!Specialty::MentalHealth.can_treat(Routine, 4));
        assert!(Specialty::PrimaryCare.can_treat(Preventive, 5));
        assert!(!Specialty::PrimaryCare.can_treat(Urgent, 3));
        assert!(Specialty::Specialist.can_treat(Chronic, 4));
        assert!(Specialty::General.can_treat(MentalHealth, 3));
        assert!(!Specialty::General.can_treat(Emergency, 1));
    }

    #[test]
    fn availability_is_derived() {
        let mut p = Provider::new(ProviderId(0), ProviderType::Physician, Specialty::General, 10);
        assert!(!p.is_available(), "starts off shift");
        p.activity = ProviderActivity::Idle;
        assert!(p.is_available());
        p.current_patient = Some(PatientId(3));
        assert!(!p.is_available());

        let pt = Patient::new(PatientId(3), Condition::Routine, 4, Tick(0));
        assert!(p.can_treat(&pt));
    }
}

#[cfg(test)]
mod fault {
    use vf_core::Tick;

    use crate::{AgentStatus, FaultTracker};

    #[test]
    fn escalation_ladder() {
        let mut f = FaultTracker::new();
        assert_eq!(f.record_fault(Tick(1), "x"), AgentStatus::Active);
        assert_eq!(f.record_fault(Tick(2), "x"), AgentStatus::Active);
        assert_eq!(f.record_fault(Tick(3), "x"), AgentStatus::Inactive { until: Tick(5) });

        assert!(!f.is_runnable(Tick(4)));
        assert!(f.is_runnable(Tick(5)));
        assert_eq!(f.status(), AgentStatus::Active);

        f.record_fault(Tick(5), "x");
        assert_eq!(f.record_fault(Tick(7), "boom"), AgentStatus::Error);
        assert!(!f.is_runnable(Tick(1_000)));
        assert_eq!(f.last_error(), Some("boom"));
        assert_eq!(f.total(), 5);
    }

    #[test]
    fn success_resets_consecutive() {
        let mut f = FaultTracker::new();
        f.record_fault(Tick(1), "x");
        f.record_fault(Tick(2), "x");
        f.record_success();
        assert_eq!(f.record_fault(Tick(3), "x"), AgentStatus::Active);
        assert_eq!(f.consecutive(), 1);
        assert_eq!(f.total(), 3);
    }
}

#[cfg(test)]
mod demographics {
    use vf_core::{PatientId, ProviderId, SimRng, Tick};

    use crate::demographics::*;
    use crate::{Condition, Patient, ProviderType, ServiceEra, Specialty};

    #[test]
    fn generated_patients_respect_ranges() {
        let mut rng = SimRng::new(11);
        for i in 0..500 {
            let cond = sample_condition(&INITIAL_CONDITION_WEIGHTS, &mut rng);
            let p = generate_patient(PatientId(i), cond, Tick(0), &mut rng);
            assert!((25..=85).contains(&p.age));
            assert!([0, 30, 50, 70, 100].contains(&p.disability_rating));
            assert!((1..=5).contains(&p.urgency()));
            assert!((0.0..=10.0).contains(&p.pain_level()));
            assert!(p.comorbidities.len() <= 8);
            assert_eq!(
                p.comorbidities.len() as u32,
                (p.age / 20 + p.disability_rating as u32 / 30).min(8)
            );
            assert!((0.1..=1.0).contains(&p.influence_strength));
            assert_eq!(p.satisfaction(), 50.0);
            if p.vr_willing {
                assert_eq!(p.condition, Condition::MentalHealth);
                assert!(p.tech_comfort > 60.0);
            }
        }
    }

    #[test]
    fn urgency_by_condition() {
        let mut rng = SimRng::new(2);
        for _ in 0..200 {
            assert_eq!(initial_urgency(Condition::Emergency, &mut rng), 1);
            assert_eq!(initial_urgency(Condition::Preventive, &mut rng), 5);
            assert!((4..=5).contains(&initial_urgency(Condition::Routine, &mut rng)));
            assert!((2..=4).contains(&initial_urgency(Condition::MentalHealth, &mut rng)));
        }
    }

    #[test]
    fn preventive_has_no_pain() {
        let mut rng = SimRng::new(4);
        for i in 0..50 {
            let p = generate_patient(PatientId(i), Condition::Preventive, Tick(0), &mut rng);
            assert_eq!(p.pain_level(), 0.0);
        }
    }

    #[test]
    fn tech_comfort_by_era() {
        assert_eq!(tech_comfort(30, ServiceEra::OefOif), 90.0);
        assert_eq!(tech_comfort(85, ServiceEra::Korea), 0.0);
        assert_eq!(tech_comfort(25, ServiceEra::OefOif), 95.0);
    }

    #[test]
    fn providers_within_bounds() {
        let mut rng = SimRng::new(8);
        for i in 0..100 {
            let p = generate_provider(ProviderId(i), ProviderType::Therapist, Specialty::MentalHealth, &mut rng);
            assert!((1..=25).contains(&p.experience_years));
            assert!(p.innovation_adoption <= 1.0);
            assert!(p.innovation_adoption >= 0.3 + 0.2 - 0.1 - 1e-9);
        }
    }

    #[test]
    fn social_links_are_symmetric() {
        let mut rng = SimRng::new(21);
        let mut patients: Vec<Patient> = (0..40)
            .map(|i| generate_patient(PatientId(i), Condition::Routine, Tick(0), &mut rng))
            .collect();
        let links = link_social_network(&mut patients, &mut rng);
        assert!(links > 0);
        let degree_sum: usize = patients.iter().map(|p| p.social_connections.len()).sum();
        assert_eq!(degree_sum, links * 2);
        for p in &patients {
            for &c in &p.social_connections {
                assert!(patients[c.index()].social_connections.contains(&p.id));
                assert_ne!(c, p.id);
            }
        }
    }
}

#[cfg(test)]
mod builder {
    use vf_core::SimRng;
    use vf_schedule::Shift;

    use crate::{AgentError, PopulationBuilder, ProviderMix, ProviderRole, Specialty};

    #[test]
    fn default_mix_totals_thirty() {
        let mix = ProviderMix::va_default();
        assert_eq!(mix.total(), 30);
        assert_eq!(mix.count(ProviderRole::Nurses), 8);
    }

    #[test]
    fn scaling_preserves_total() {
        let mix = ProviderMix::va_default();
        for n in [0, 1, 7, 15, 30, 61] {
            assert_eq!(mix.scaled_to(n).total(), n, "n = {n}");
        }
        assert_eq!(mix.scaled_to(60).count(ProviderRole::Nurses), 16);
    }

    #[test]
    fn role_keys_roundtrip() {
        for role in ProviderRole::ALL {
            assert_eq!(ProviderRole::from_key(role.key()), Some(role));
        }
        assert_eq!(ProviderRole::from_key("janitors"), None);
    }

    #[test]
    fn builds_providers_in_role_order() {
        let mut rng = SimRng::new(1);
        let store = PopulationBuilder::new(10, ProviderMix::va_default())
            .without_social_network()
            .build(&mut rng)
            .unwrap();
        assert_eq!(store.provider_count(), 30);
        assert_eq!(store.providers[0].specialty, Specialty::Emergency);
        assert_eq!(store.providers[29].specialty, Specialty::General);
        assert!(store.patients.iter().all(|p| p.social_connections.is_empty()));
        for (i, p) in store.patients.iter().enumerate() {
            assert_eq!(p.id.index(), i);
        }
    }

    #[test]
    fn shifts_are_applied() {
        let mut rng = SimRng::new(1);
        let mix = ProviderMix::new().with(ProviderRole::Nurses, 2);
        let store = PopulationBuilder::new(0, mix.clone())
            .shifts(vec![Shift::DAY, Shift::new(22, 6)])
            .build(&mut rng)
            .unwrap();
        assert_eq!(store.providers[1].shift, Shift::new(22, 6));

        let err = PopulationBuilder::new(0, mix)
            .shifts(vec![Shift::DAY])
            .build(&mut rng)
            .err()
            .unwrap();
        assert!(matches!(err, AgentError::ShiftCountMismatch { expected: 2, got: 1 }));
    }

    #[test]
    fn same_seed_same_population() {
        let build = |seed| {
            let mut rng = SimRng::new(seed);
            PopulationBuilder::new(20, ProviderMix::va_default()).build(&mut rng).unwrap()
        };
        let a = build(99);
        let b = build(99);
        let ages_a: Vec<u32> = a.patients.iter().map(|p| p.age).collect();
        let ages_b: Vec<u32> = b.patients.iter().map(|p| p.age).collect();
        assert_eq!(ages_a, ages_b);
    }
}
