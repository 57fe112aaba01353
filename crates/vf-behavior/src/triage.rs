//! One-shot AI urgency reassessment at check-in.
//!
//! The score blends five normalised factors, each in `[0, 1]`:
//!
//! | Factor          | Weight | Normalisation          |
//! |-----------------|--------|------------------------|
//! | urgency         | 0.35   | `(5 − urgency) / 4`    |
//! | pain            | 0.25   | `pain / 10`            |
//! | comorbidities   | 0.15   | `count / 8`            |
//! | inverse age     | 0.10   | `1 − age / 100`        |
//! | emergency flag  | 0.15   | 1 if Emergency         |
//!
//! plus `U(−0.1, 0.1)` noise, clamped to `[0, 1]`.  The model is right
//! [`ACCURACY`] of the time; otherwise urgency is nudged one step either way.

use vf_agent::{Comorbidity, Condition, Patient};
use vf_core::SimRng;

pub const ACCURACY: f64 = 0.85;

const W_URGENCY:     f64 = 0.35;
const W_PAIN:        f64 = 0.25;
const W_COMORBIDITY: f64 = 0.15;
const W_AGE:         f64 = 0.10;
const W_EMERGENCY:   f64 = 0.15;

/// What one assessment did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriageOutcome {
    pub score:    f64,
    pub accurate: bool,
    pub before:   u8,
    pub after:    u8,
    pub satisfaction_boost: f64,
}

/// Deterministic part of the score (no noise, not clamped).
pub fn base_score(patient: &Patient) -> f64 {
    let urgency = (5.0 - patient.urgency() as f64) / 4.0;
    let pain = patient.pain_level() / 10.0;
    let comorbid = patient.comorbidities.len() as f64 / Comorbidity::ALL.len() as f64;
    let age = (1.0 - patient.age as f64 / 100.0).clamp(0.0, 1.0);
    let emergency = if patient.condition == Condition::Emergency { 1.0 } else { 0.0 };

    W_URGENCY * urgency + W_PAIN * pain + W_COMORBIDITY * comorbid + W_AGE * age + W_EMERGENCY * emergency
}

/// Urgency the accurate branch assigns for a score.
pub fn remap_urgency(score: f64, urgency: u8) -> u8 {
    if score > 0.7 {
        urgency.min(2)
    } else if score > 0.4 {
        urgency.clamp(2, 3)
    } else {
        urgency.max(3)
    }
}

/// Run the assessment on `patient`, revising its urgency and satisfaction.
pub fn assess(patient: &mut Patient, rng: &mut SimRng) -> TriageOutcome {
    let before = patient.urgency();
    let score = (base_score(patient) + rng.noise(0.1)).clamp(0.0, 1.0);
    let accurate = rng.gen_bool(ACCURACY);

    if accurate {
        patient.set_urgency(remap_urgency(score, before) as i32);
    } else {
        let delta = if rng.gen_bool(0.5) { 1 } else { -1 };
        patient.set_urgency(before as i32 + delta);
    }

    let boost = rng.gen_range(2..=5) as f64;
    patient.adjust_satisfaction(boost);
    patient.ai_triaged = true;

    TriageOutcome { score, accurate, before, after: patient.urgency(), satisfaction_boost: boost }
}
