//! The seven detector passes.
//!
//! Each detector is a plain `fn(&Census, &InsightThresholds) -> Vec<Insight>`
//! returning unfiltered findings with empty ids.  Group iteration is sorted
//! by key so a pass is deterministic for a given census.

use vf_agent::{Condition, Specialty};

use crate::stats::{mean, pearson, std_dev, title_case};
use crate::{Census, Insight, InsightKind, InsightThresholds, Severity};

#[cfg(feature = "fx-hash")]
type GroupMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type GroupMap<K, V> = std::collections::HashMap<K, V>;

pub type Detector = fn(&Census<'_>, &InsightThresholds) -> Vec<Insight>;

/// All passes, in pooling order.
pub const DETECTORS: [Detector; 7] = [
    wait_time_patterns,
    satisfaction_drivers,
    bottlenecks,
    innovation_effectiveness,
    social_network_effects,
    temporal_patterns,
    resource_optimization,
];

/// Share of the population that is mental-health × VR speed-up, capped.
const VR_WAIT_REDUCTION_PCT: f64 = 0.25 * 0.25 * 100.0;
const VR_WAIT_REDUCTION_CAP: f64 = 40.0;
/// Nominal VR sessions per station per day.
const VR_SESSIONS_PER_STATION: u32 = 8;
/// Annual cost basis for an idle specialty.
const STAFF_COST_BASIS: f64 = 50_000.0;

fn sorted<K: Ord, V>(groups: GroupMap<K, V>) -> Vec<(K, V)> {
    let mut v: Vec<(K, V)> = groups.into_iter().collect();
    v.sort_by(|a, b| a.0.cmp(&b.0));
    v
}

// ── Wait time ─────────────────────────────────────────────────────────────────

pub fn wait_time_patterns(census: &Census<'_>, th: &InsightThresholds) -> Vec<Insight> {
    let live: Vec<_> = census.live_patients().collect();
    if live.len() < th.min_wait_sample {
        return Vec::new();
    }

    let mut groups: GroupMap<Condition, Vec<f64>> = GroupMap::default();
    for p in &live {
        groups.entry(p.condition).or_default().push(p.wait_time as f64);
    }

    let mut out = Vec::new();
    for (condition, waits) in sorted(groups) {
        if waits.len() < th.min_group_size {
            continue;
        }
        let (Some(avg), Some(std)) = (mean(&waits), std_dev(&waits)) else { continue };
        let max = waits.iter().copied().fold(0.0, f64::max);

        if condition == Condition::MentalHealth && avg > th.mental_health_wait_crisis {
            let potential = VR_WAIT_REDUCTION_PCT.min(VR_WAIT_REDUCTION_CAP);
            out.push(
                Insight::new(InsightKind::WaitTimeCrisis, Severity::High, 0.88,
                    "Mental Health Wait Times at Critical Level")
                    .describe(format!(
                        "Mental health patients experiencing {avg:.0} minute average wait times, \
                         significantly above acceptable threshold"
                    ))
                    .recommend(format!(
                        "Immediate intervention needed. VR therapy expansion could reduce waits by {potential:.0}%"
                    ))
                    .with_impact("patients_affected", waits.len())
                    .with_impact("current_wait", avg)
                    .with_impact("potential_reduction", avg * potential / 100.0)
                    .support("sample_size", waits.len() as f64)
                    .support("standard_deviation", std)
                    .support("max_wait", max),
            );
        } else if avg > th.excessive_wait {
            out.push(
                Insight::new(InsightKind::ExcessiveWait, Severity::Medium, 0.82,
                    format!("{} Patients Experiencing Long Waits", title_case(condition.as_str())))
                    .describe(format!("Average wait time of {avg:.0} minutes indicates capacity mismatch"))
                    .recommend("Consider adding providers or implementing express care pathway")
                    .with_impact("patients_affected", waits.len()),
            );
        }
    }
    out
}

// ── Satisfaction ──────────────────────────────────────────────────────────────

pub fn satisfaction_drivers(census: &Census<'_>, th: &InsightThresholds) -> Vec<Insight> {
    let (sat, wait): (Vec<f64>, Vec<f64>) = census
        .live_patients()
        .map(|p| (p.satisfaction(), p.wait_time as f64))
        .unzip();
    if sat.len() < th.min_correlation_sample {
        return Vec::new();
    }
    let Some(r) = pearson(&sat, &wait) else { return Vec::new() };
    if r.abs() <= th.correlation_strength {
        return Vec::new();
    }
    vec![
        Insight::new(InsightKind::CorrelationFound, Severity::Medium, 0.85,
            "Wait Time Strongly Impacts Satisfaction")
            .describe(format!(
                "Statistical analysis shows {:.0}% correlation between wait time and satisfaction",
                r.abs() * 100.0
            ))
            .recommend("Focus on wait time reduction as primary satisfaction improvement strategy")
            .support("correlation", r)
            .support("sample_size", sat.len() as f64),
    ]
}

// ── Bottlenecks ───────────────────────────────────────────────────────────────

/// Mean `patients_seen_today` per specialty.
fn specialty_loads(census: &Census<'_>) -> Vec<(Specialty, f64)> {
    let mut groups: GroupMap<Specialty, Vec<f64>> = GroupMap::default();
    for p in census.providers {
        groups.entry(p.specialty).or_default().push(p.patients_seen_today as f64);
    }
    sorted(groups)
        .into_iter()
        .filter_map(|(s, loads)| mean(&loads).map(|m| (s, m)))
        .collect()
}

pub fn bottlenecks(census: &Census<'_>, th: &InsightThresholds) -> Vec<Insight> {
    let mut out = Vec::new();

    let loads = specialty_loads(census);
    let means: Vec<f64> = loads.iter().map(|&(_, m)| m).collect();
    if let Some(overall) = mean(&means) {
        for (specialty, load) in loads {
            if load <= overall * th.bottleneck_factor {
                continue;
            }
            let factor = load / overall;
            let name = specialty.as_str();
            out.push(
                Insight::new(InsightKind::ResourceBottleneck, Severity::High, 0.86,
                    format!("{} Department Overwhelmed", title_case(name)))
                    .describe(format!(
                        "{name} providers seeing {factor:.1}x more patients than average, creating system bottleneck"
                    ))
                    .recommend(format!(
                        "Urgently add {name} capacity or redistribute appropriate cases to other departments"
                    ))
                    .with_impact("department_load", load)
                    .with_impact("system_average", overall)
                    .with_impact("overload_factor", factor),
            );
        }
    }

    let waiting = census.waiting_room.len();
    if waiting > th.congestion_waiting {
        // Most common condition; ties go to the first seen in queue order.
        let mut counts: Vec<(Condition, usize)> = Vec::new();
        for p in census.waiting_patients() {
            match counts.iter_mut().find(|(c, _)| *c == p.condition) {
                Some((_, n)) => *n += 1,
                None => counts.push((p.condition, 1)),
            }
        }
        let (primary, count) = counts
            .iter()
            .fold(None::<(Condition, usize)>, |best, &(c, n)| match best {
                Some((_, bn)) if bn >= n => best,
                _ => Some((c, n)),
            })
            .map(|(c, n)| (c.as_str(), n))
            .unwrap_or(("unknown", 0));

        out.push(
            Insight::new(InsightKind::CapacityCrisis, Severity::High, 0.92,
                "Waiting Room Reaching Critical Capacity")
                .describe(format!("{waiting} patients waiting, with {primary} cases most prevalent"))
                .recommend(
                    "Activate surge protocols: open overflow areas, call in additional staff, \
                     implement fast-track for low-acuity cases",
                )
                .with_impact("patients_waiting", waiting)
                .with_impact("primary_condition", primary)
                .with_impact("condition_count", count),
        );
    }
    out
}

// ── Innovation ────────────────────────────────────────────────────────────────

pub fn innovation_effectiveness(census: &Census<'_>, th: &InsightThresholds) -> Vec<Insight> {
    if census.vr_stations == 0 {
        return Vec::new();
    }
    let utilization = census.vr_sessions_completed as f64 / census.tick.0.max(1) as f64;
    if utilization >= th.vr_underuse {
        return Vec::new();
    }
    let potential = census.vr_stations * VR_SESSIONS_PER_STATION;
    let missed = ((1.0 - utilization) * potential as f64) as usize;
    vec![
        Insight::new(InsightKind::InnovationUnderutilization, Severity::Medium, 0.81,
            "VR Therapy Stations Underutilized")
            .describe(format!("Only {:.0}% utilization of expensive VR equipment", utilization * 100.0))
            .recommend("Implement provider training program and patient education campaign to increase adoption")
            .with_impact("current_utilization", utilization)
            .with_impact("potential_sessions", potential as f64)
            .with_impact("missed_opportunities", missed),
    ]
}

// ── Social network ────────────────────────────────────────────────────────────

pub fn social_network_effects(census: &Census<'_>, th: &InsightThresholds) -> Vec<Insight> {
    let adopters: Vec<_> = census.live_patients().filter(|p| p.vr_willing).collect();
    if adopters.len() <= th.min_vr_adopters {
        return Vec::new();
    }

    let mut influenced: Vec<_> = adopters
        .iter()
        .flat_map(|p| p.social_connections.iter().copied())
        .filter(|&id| census.patient(id).is_some_and(|c| c.vr_willing))
        .collect();
    influenced.sort_unstable();
    influenced.dedup();
    if influenced.is_empty() {
        return Vec::new();
    }

    let n = influenced.len();
    vec![
        Insight::new(InsightKind::SocialNetworkPattern, Severity::Low, 0.76,
            "Peer Influence Driving VR Therapy Adoption")
            .describe(format!(
                "Veterans who try VR therapy are influencing {n} connected peers to also try it"
            ))
            .recommend("Leverage peer champions and success stories to accelerate adoption")
            .with_impact("influenced_veterans", n)
            .with_impact("network_effect_multiplier", n as f64 / adopters.len() as f64),
    ]
}

// ── Temporal ──────────────────────────────────────────────────────────────────

/// Reported at 0.73 confidence, so the default filter drops it.
pub fn temporal_patterns(census: &Census<'_>, th: &InsightThresholds) -> Vec<Insight> {
    let wait = census.current_average_wait;
    if wait <= th.temporal_wait {
        return Vec::new();
    }
    vec![
        Insight::new(InsightKind::TemporalPattern, Severity::Medium, 0.73, "Extended Wait Times Detected")
            .describe(format!("Current average wait time of {wait:.0} minutes indicates system stress"))
            .recommend("Monitor for recurring patterns and implement dynamic staffing adjustments")
            .with_impact("current_wait", wait)
            .with_impact("threshold_exceeded", wait - 30.0),
    ]
}

// ── Resource optimisation ─────────────────────────────────────────────────────

pub fn resource_optimization(census: &Census<'_>, th: &InsightThresholds) -> Vec<Insight> {
    // Patients per provider, by specialty.
    let mut workload: GroupMap<Specialty, (u32, u32)> = GroupMap::default();
    for p in census.providers {
        let entry = workload.entry(p.specialty).or_default();
        entry.0 += 1;
        entry.1 += p.patients_seen_today;
    }
    let ratios: Vec<(Specialty, f64)> = sorted(workload)
        .into_iter()
        .filter(|&(_, (providers, _))| providers > 0)
        .map(|(s, (providers, patients))| (s, patients as f64 / providers as f64))
        .collect();
    let values: Vec<f64> = ratios.iter().map(|&(_, r)| r).collect();
    let Some(avg) = mean(&values) else { return Vec::new() };

    let mut out = Vec::new();
    for (specialty, ratio) in ratios {
        if ratio >= avg * th.underuse_factor {
            continue;
        }
        let name = specialty.as_str();
        let relative = ratio / avg;
        out.push(
            Insight::new(InsightKind::ResourceOptimization, Severity::Medium, 0.78,
                format!("{} Staff Underutilized", title_case(name)))
                .describe(format!(
                    "{name} providers seeing only {ratio:.1} patients each while system average is {avg:.1}"
                ))
                .recommend(format!(
                    "Cross-train {name} staff for other departments or reduce {name} staffing during low-demand periods"
                ))
                .with_impact("current_utilization", relative)
                .with_impact("potential_savings", format!("${:.0} annually", (1.0 - relative) * STAFF_COST_BASIS)),
        );
    }
    out
}
