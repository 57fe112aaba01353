//! Stochastic generation of patients, providers, and the veteran social
//! network.  Every draw goes through the run's [`SimRng`].

use vf_core::{PatientId, ProviderId, SimRng, Tick};

use crate::{Comorbidity, Condition, Patient, Provider, ProviderType, ServiceEra, Specialty};

/// Condition mix of the population present when a run starts.
pub const INITIAL_CONDITION_WEIGHTS: [(Condition, f64); 6] = [
    (Condition::Emergency,    0.05),
    (Condition::Urgent,       0.15),
    (Condition::Routine,      0.40),
    (Condition::MentalHealth, 0.25),
    (Condition::Chronic,      0.10),
    (Condition::Preventive,   0.05),
];

/// Condition mix of regular (non-emergency) arrivals.
pub const ARRIVAL_CONDITION_WEIGHTS: [(Condition, f64); 4] = [
    (Condition::Urgent,       0.2),
    (Condition::Routine,      0.5),
    (Condition::MentalHealth, 0.2),
    (Condition::Chronic,      0.1),
];

const DISABILITY_RATINGS: [(u8, f64); 5] = [(0, 0.3), (30, 0.2), (50, 0.2), (70, 0.2), (100, 0.1)];

/// Same-era and cross-era connection probabilities per unordered pair.
const SAME_ERA_LINK_P: f64 = 0.3;
const CROSS_ERA_LINK_P: f64 = 0.1;

pub fn sample_condition(weights: &[(Condition, f64)], rng: &mut SimRng) -> Condition {
    rng.choose_weighted(weights).copied().unwrap_or(Condition::Routine)
}

/// Triage urgency implied by a condition (1 = most urgent).
pub fn initial_urgency(condition: Condition, rng: &mut SimRng) -> u8 {
    match condition {
        Condition::Emergency    => 1,
        Condition::Urgent       => rng.gen_range(2..=3),
        Condition::MentalHealth => rng.gen_range(2..=4),
        Condition::Chronic      => rng.gen_range(3..=4),
        Condition::Routine      => rng.gen_range(4..=5),
        Condition::Preventive   => 5,
    }
}

/// `clamp(100 − age + era_modifier, 0, 100)`.
pub fn tech_comfort(age: u32, era: ServiceEra) -> f64 {
    (100.0 - age as f64 + era.tech_modifier()).clamp(0.0, 100.0)
}

/// Build a fully populated patient at `Arrival`.
pub fn generate_patient(id: PatientId, condition: Condition, arrival: Tick, rng: &mut SimRng) -> Patient {
    let urgency = initial_urgency(condition, rng);
    let mut p = Patient::new(id, condition, urgency, arrival);

    p.age = rng.gen_range(25..=85);
    p.service_era = *rng.choose(&ServiceEra::ALL).unwrap_or(&ServiceEra::Peacetime);
    p.disability_rating = rng.choose_weighted(&DISABILITY_RATINGS).copied().unwrap_or(0);

    let n_comorbid = (p.age / 20 + p.disability_rating as u32 / 30).min(Comorbidity::ALL.len() as u32);
    p.comorbidities = rng.choose_multiple(&Comorbidity::ALL, n_comorbid as usize);

    if condition != Condition::Preventive {
        p.set_pain_level(rng.gen_range(0..=10) as f64);
    }

    p.tech_comfort = tech_comfort(p.age, p.service_era);
    p.vr_willing = p.tech_comfort > 60.0 && condition == Condition::MentalHealth;
    p.prefers_telehealth = p.tech_comfort > 50.0;
    p.influence_strength = rng.gen_range(0.1..=1.0);
    p
}

/// Likelihood of adopting new technology; falls with experience, higher
/// for mental-health staff.
pub fn innovation_adoption(experience_years: u32, specialty: Specialty, rng: &mut SimRng) -> f64 {
    let age_factor = (1.0 - experience_years as f64 / 40.0).max(0.3);
    let specialty_bonus = if specialty == Specialty::MentalHealth { 0.2 } else { 0.0 };
    (age_factor + specialty_bonus + rng.noise(0.1)).min(1.0)
}

pub fn generate_provider(
    id: ProviderId,
    provider_type: ProviderType,
    specialty: Specialty,
    rng: &mut SimRng,
) -> Provider {
    let experience = rng.gen_range(1..=25);
    let mut p = Provider::new(id, provider_type, specialty, experience);
    p.innovation_adoption = innovation_adoption(experience, specialty, rng);
    p.vr_certified = rng.gen_bool(0.3);
    p.telehealth_certified = rng.gen_bool(0.6);
    p
}

/// Connect every unordered pair of patients with an era-dependent
/// probability.  Links are symmetric.  Returns the number of links made.
pub fn link_social_network(patients: &mut [Patient], rng: &mut SimRng) -> usize {
    let mut links = Vec::new();
    for i in 0..patients.len() {
        for j in (i + 1)..patients.len() {
            let p = if patients[i].service_era == patients[j].service_era {
                SAME_ERA_LINK_P
            } else {
                CROSS_ERA_LINK_P
            };
            if rng.gen_bool(p) {
                links.push((i, j));
            }
        }
    }
    for &(i, j) in &links {
        let (a, b) = (patients[i].id, patients[j].id);
        patients[i].social_connections.push(b);
        patients[j].social_connections.push(a);
    }
    links.len()
}
