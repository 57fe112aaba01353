//! Unit tests for vf-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AreaId, PatientId, ProviderId};

    #[test]
    fn index_roundtrip() {
        let id = PatientId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(PatientId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn display_uses_prefix() {
        assert_eq!(PatientId(7).to_string(), "patient_7");
        assert_eq!(ProviderId(0).to_string(), "provider_0");
        assert_eq!(AreaId(3).to_string(), "area_3");
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(PatientId::INVALID.0, u32::MAX);
        assert_eq!(AreaId::default().0, u16::MAX);
    }
}

#[cfg(test)]
mod geo {
    use crate::Position;

    #[test]
    fn step_is_capped_per_axis() {
        let mut p = Position::new(0.0, 0.0);
        p.step_toward(Position::new(100.0, -100.0), 1.0);
        assert_eq!(p, Position::new(0.5, -0.5));
    }

    #[test]
    fn converges_on_target() {
        let mut p = Position::new(0.0, 0.0);
        let target = Position::new(3.0, 4.0);
        let arrived = (0..200).any(|_| p.step_toward(target, 1.0));
        assert!(arrived, "never arrived, ended at {p}");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(3).since(Tick(10)), 0);
    }

    #[test]
    fn interval_excludes_zero() {
        assert!(!Tick(0).is_multiple_of(50));
        assert!(Tick(50).is_multiple_of(50));
        assert!(!Tick(51).is_multiple_of(50));
        assert!(!Tick(50).is_multiple_of(0));
    }

    #[test]
    fn hour_of_day_wraps() {
        let clock = SimClock::new(60);
        assert_eq!(clock.hour_at(Tick(0)), 0);
        assert_eq!(clock.hour_at(Tick(59)), 0);
        assert_eq!(clock.hour_at(Tick(60 * 9)), 9);
        assert_eq!(clock.hour_at(Tick(60 * 25)), 1);
    }

    #[test]
    fn clock_dhm() {
        let mut clock = SimClock::default();
        for _ in 0..(60 * 25 + 30) {
            clock.advance();
        }
        assert_eq!(clock.elapsed_dhm(), (1, 1, 30));
        assert_eq!(clock.to_string(), "T1530 (day 1 01:30)");
    }

    #[test]
    fn default_config() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.end_tick(), Tick(5_000));
        assert_eq!(cfg.insight_interval_ticks, 50);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = SimConfig { ticks_per_hour: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = SimConfig { insight_interval_ticks: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn children_diverge() {
        let mut root = SimRng::new(1);
        let mut a = root.child(0);
        let mut b = root.child(1);
        assert_ne!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn gen_bool_clamps() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(-0.5));
        assert!(rng.gen_bool(1.004));
    }

    #[test]
    fn noise_in_bounds() {
        let mut rng = SimRng::new(9);
        for _ in 0..1000 {
            let v = rng.noise(0.1);
            assert!((-0.1..=0.1).contains(&v));
        }
        assert_eq!(rng.noise(0.0), 0.0);
    }

    #[test]
    fn weighted_draw_skips_zero_weights() {
        let mut rng = SimRng::new(3);
        let items = [("never", 0.0), ("always", 1.0)];
        for _ in 0..100 {
            assert_eq!(rng.choose_weighted(&items), Some(&"always"));
        }
        assert_eq!(rng.weighted_index(&[]), None);
        assert_eq!(rng.weighted_index(&[0.0, 0.0]), None);
    }

    #[test]
    fn choose_multiple_is_distinct() {
        let mut rng = SimRng::new(5);
        let picked = rng.choose_multiple(&[1, 2, 3, 4, 5], 3);
        assert_eq!(picked.len(), 3);
        let mut sorted = picked.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
        assert_eq!(rng.choose_multiple(&[1, 2], 5).len(), 2);
    }
}

#[cfg(test)]
mod modality {
    use crate::Modality;

    #[test]
    fn display() {
        assert_eq!(Modality::Vr.to_string(), "vr");
        assert_eq!(Modality::default(), Modality::Traditional);
        assert!(Modality::Telehealth.is_innovation());
        assert!(!Modality::Traditional.is_innovation());
    }
}
