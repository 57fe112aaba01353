//! Area taxonomy and the standard VA facility layout.

use vf_core::Position;

/// Functional category of an area.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AreaKind {
    Access,
    Admin,
    Waiting,
    Clinical,
    Treatment,
    Support,
    Innovation,
}

/// Declaration of one area, consumed by [`TopologyBuilder`](crate::TopologyBuilder).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaSpec {
    pub name:     String,
    pub kind:     AreaKind,
    /// Maximum simultaneous occupants.
    pub capacity: u32,
    /// Floor-plan coordinate used for presentation.
    pub position: Position,
}

impl AreaSpec {
    pub fn new(name: impl Into<String>, kind: AreaKind, capacity: u32, position: Position) -> Self {
        Self { name: name.into(), kind, capacity, position }
    }
}

/// Names of the areas the simulation addresses directly.
pub mod names {
    pub const ENTRANCE:          &str = "entrance";
    pub const RECEPTION:         &str = "reception";
    pub const WAITING_ROOM:      &str = "waiting_room";
    pub const TRIAGE:            &str = "triage";
    pub const EMERGENCY:         &str = "emergency";
    pub const PRIMARY_CARE:      &str = "primary_care";
    pub const MENTAL_HEALTH:     &str = "mental_health";
    pub const SPECIALIST:        &str = "specialist";
    pub const PHARMACY:          &str = "pharmacy";
    pub const LAB:               &str = "lab";
    pub const IMAGING:           &str = "imaging";
    pub const VR_THERAPY_SUITE:  &str = "vr_therapy_suite";
    pub const TELEHEALTH_CENTER: &str = "telehealth_center";
    pub const DISCHARGE:         &str = "discharge";

    /// Areas every valid topology must contain, all reachable from the
    /// entrance.
    pub const REQUIRED: [&str; 4] = [ENTRANCE, RECEPTION, WAITING_ROOM, DISCHARGE];
}

/// The fourteen areas of the standard facility.  Innovation areas take their
/// capacity from the configured station and room counts.
pub fn standard_areas(vr_stations: u32, telehealth_rooms: u32) -> Vec<AreaSpec> {
    use names::*;
    use AreaKind::*;

    let p = Position::new;
    vec![
        AreaSpec::new(ENTRANCE,          Access,     100,              p(0.0, 5.0)),
        AreaSpec::new(RECEPTION,         Admin,      5,                p(2.0, 5.0)),
        AreaSpec::new(WAITING_ROOM,      Waiting,    50,               p(4.0, 5.0)),
        AreaSpec::new(TRIAGE,            Clinical,   5,                p(6.0, 5.0)),
        AreaSpec::new(EMERGENCY,         Treatment,  10,               p(8.0, 8.0)),
        AreaSpec::new(PRIMARY_CARE,      Treatment,  20,               p(8.0, 6.0)),
        AreaSpec::new(MENTAL_HEALTH,     Treatment,  15,               p(8.0, 4.0)),
        AreaSpec::new(SPECIALIST,        Treatment,  10,               p(8.0, 2.0)),
        AreaSpec::new(PHARMACY,          Support,    5,                p(10.0, 7.0)),
        AreaSpec::new(LAB,               Support,    8,                p(10.0, 5.0)),
        AreaSpec::new(IMAGING,           Support,    4,                p(10.0, 3.0)),
        AreaSpec::new(VR_THERAPY_SUITE,  Innovation, vr_stations,      p(10.0, 1.0)),
        AreaSpec::new(TELEHEALTH_CENTER, Innovation, telehealth_rooms, p(6.0, 1.0)),
        AreaSpec::new(DISCHARGE,         Access,     10,               p(12.0, 5.0)),
    ]
}

/// Directed walkways of the standard facility.
pub const STANDARD_CONNECTIONS: [(&str, &str); 22] = {
    use names::*;
    [
        (ENTRANCE,          RECEPTION),
        (RECEPTION,         WAITING_ROOM),
        (RECEPTION,         TRIAGE),
        (WAITING_ROOM,      TRIAGE),
        (TRIAGE,            EMERGENCY),
        (TRIAGE,            PRIMARY_CARE),
        (TRIAGE,            MENTAL_HEALTH),
        (TRIAGE,            SPECIALIST),
        (PRIMARY_CARE,      LAB),
        (PRIMARY_CARE,      IMAGING),
        (PRIMARY_CARE,      PHARMACY),
        (EMERGENCY,         LAB),
        (EMERGENCY,         IMAGING),
        (MENTAL_HEALTH,     VR_THERAPY_SUITE),
        (SPECIALIST,        LAB),
        (SPECIALIST,        IMAGING),
        (PHARMACY,          DISCHARGE),
        (PRIMARY_CARE,      DISCHARGE),
        (EMERGENCY,         DISCHARGE),
        (MENTAL_HEALTH,     DISCHARGE),
        (SPECIALIST,        DISCHARGE),
        (TELEHEALTH_CENTER, DISCHARGE),
    ]
};
