//! Facility area graph and builder.
//!
//! # Data layout
//!
//! Walkways use **Compressed Sparse Row (CSR)** format.  Given an
//! `AreaId a`, its outgoing walkways occupy
//!
//! ```text
//! edge_to[ area_out_start[a] .. area_out_start[a+1] ]
//! ```
//!
//! The graph is placement metadata only: agents never pathfind over it.  It
//! answers "where is area X", "how many may stand there", and "can a patient
//! get from the entrance to X at all" (checked once at construction).

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use vf_core::{AreaId, Position};

use crate::area::{self, names, AreaKind, AreaSpec, STANDARD_CONNECTIONS};
use crate::{FacilityError, FacilityResult};

// ── FacilityTopology ──────────────────────────────────────────────────────────

/// Directed area graph in CSR format.  Read-only once built.
///
/// Construct through [`TopologyBuilder`], [`FacilityTopology::standard`], or
/// [`FacilityTopology::minimal`].
#[derive(Clone, Debug)]
pub struct FacilityTopology {
    // ── Area data (indexed by AreaId) ─────────────────────────────────────
    pub area_name:     Vec<String>,
    pub area_kind:     Vec<AreaKind>,
    pub area_capacity: Vec<u32>,
    pub area_pos:      Vec<Position>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// Length = `area_count + 1`.
    pub area_out_start: Vec<u32>,
    pub edge_to:        Vec<AreaId>,

    by_name: HashMap<String, AreaId>,
}

impl FacilityTopology {
    /// A topology with no areas.  Fails every lookup; only useful as a
    /// placeholder.
    pub fn empty() -> Self {
        Self {
            area_name:      Vec::new(),
            area_kind:      Vec::new(),
            area_capacity:  Vec::new(),
            area_pos:       Vec::new(),
            area_out_start: vec![0],
            edge_to:        Vec::new(),
            by_name:        HashMap::new(),
        }
    }

    /// The standard fourteen-area VA facility.
    pub fn standard(vr_stations: u32, telehealth_rooms: u32) -> FacilityResult<Self> {
        let mut b = TopologyBuilder::new();
        for spec in area::standard_areas(vr_stations, telehealth_rooms) {
            b.add_area(spec)?;
        }
        for (from, to) in STANDARD_CONNECTIONS {
            b.connect(from, to)?;
        }
        b.build()
    }

    /// The smallest topology that keeps a run alive: entrance → reception →
    /// waiting room → discharge.  Installed when the configured topology
    /// turns out to be unusable mid-run.
    pub fn minimal() -> Self {
        use names::*;
        let p = Position::new;
        let areas = [
            AreaSpec::new(ENTRANCE,     AreaKind::Access,  100, p(0.0, 5.0)),
            AreaSpec::new(RECEPTION,    AreaKind::Admin,   5,   p(2.0, 5.0)),
            AreaSpec::new(WAITING_ROOM, AreaKind::Waiting, 50,  p(4.0, 5.0)),
            AreaSpec::new(DISCHARGE,    AreaKind::Access,  10,  p(6.0, 5.0)),
        ];
        let mut b = TopologyBuilder::with_capacity(areas.len(), 3);
        for (i, spec) in areas.into_iter().enumerate() {
            b.push_unchecked(spec);
            if i > 0 {
                b.raw_edges.push((AreaId(i as u16 - 1), AreaId(i as u16)));
            }
        }
        b.assemble()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn area_count(&self) -> usize {
        self.area_name.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.area_name.is_empty()
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<AreaId> {
        self.by_name.get(name).copied()
    }

    /// Like [`lookup`](Self::lookup) but as an error for `?` chains.
    pub fn require(&self, name: &'static str) -> FacilityResult<AreaId> {
        self.lookup(name).ok_or(FacilityError::MissingArea(name))
    }

    pub fn name(&self, area: AreaId) -> Option<&str> {
        self.area_name.get(area.index()).map(String::as_str)
    }

    pub fn capacity(&self, area: AreaId) -> u32 {
        self.area_capacity.get(area.index()).copied().unwrap_or(0)
    }

    pub fn position(&self, area: AreaId) -> Option<Position> {
        self.area_pos.get(area.index()).copied()
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Areas directly reachable from `area`.
    #[inline]
    pub fn out_areas(&self, area: AreaId) -> &[AreaId] {
        let i = area.index();
        if i + 1 >= self.area_out_start.len() {
            return &[];
        }
        let start = self.area_out_start[i] as usize;
        let end   = self.area_out_start[i + 1] as usize;
        &self.edge_to[start..end]
    }

    /// Breadth-first reachability mask from `origin`.
    pub fn reachable_from(&self, origin: AreaId) -> Vec<bool> {
        let mut seen = vec![false; self.area_count()];
        if origin.index() >= seen.len() {
            return seen;
        }
        let mut queue = VecDeque::from([origin]);
        seen[origin.index()] = true;
        while let Some(a) = queue.pop_front() {
            for &next in self.out_areas(a) {
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Check the structural guarantees the simulation relies on: every
    /// required area exists and is reachable from the entrance.
    pub fn validate(&self) -> FacilityResult<()> {
        let entrance = self.require(names::ENTRANCE)?;
        let reachable = self.reachable_from(entrance);
        for name in names::REQUIRED {
            let id = self.require(name)?;
            if !reachable[id.index()] {
                return Err(FacilityError::Unreachable(name));
            }
        }
        Ok(())
    }
}

// ── TopologyBuilder ───────────────────────────────────────────────────────────

/// Construct a [`FacilityTopology`] incrementally, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use vf_core::Position;
/// use vf_facility::{AreaKind, AreaSpec, TopologyBuilder};
///
/// let mut b = TopologyBuilder::new();
/// for (name, kind) in [
///     ("entrance", AreaKind::Access),
///     ("reception", AreaKind::Admin),
///     ("waiting_room", AreaKind::Waiting),
///     ("discharge", AreaKind::Access),
/// ] {
///     b.add_area(AreaSpec::new(name, kind, 10, Position::default())).unwrap();
/// }
/// b.connect("entrance", "reception").unwrap();
/// b.connect("reception", "waiting_room").unwrap();
/// b.connect("waiting_room", "discharge").unwrap();
/// let topo = b.build().unwrap();
/// assert_eq!(topo.area_count(), 4);
/// ```
pub struct TopologyBuilder {
    areas:     Vec<AreaSpec>,
    by_name:   HashMap<String, AreaId>,
    raw_edges: Vec<(AreaId, AreaId)>,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self { areas: Vec::new(), by_name: HashMap::new(), raw_edges: Vec::new() }
    }

    pub fn with_capacity(areas: usize, edges: usize) -> Self {
        Self {
            areas:     Vec::with_capacity(areas),
            by_name:   HashMap::with_capacity(areas),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Declare an area and return its `AreaId` (sequential from 0).
    pub fn add_area(&mut self, spec: AreaSpec) -> FacilityResult<AreaId> {
        if self.by_name.contains_key(&spec.name) {
            return Err(FacilityError::DuplicateArea(spec.name));
        }
        if self.areas.len() >= (u16::MAX - 1) as usize {
            return Err(FacilityError::TooManyAreas);
        }
        Ok(self.push_unchecked(spec))
    }

    /// Add a directed walkway between two declared areas.
    pub fn connect(&mut self, from: &str, to: &str) -> FacilityResult<()> {
        let f = self.id_of(from)?;
        let t = self.id_of(to)?;
        self.raw_edges.push((f, t));
        Ok(())
    }

    pub fn area_count(&self) -> usize { self.areas.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder, assemble the CSR arrays, and validate.
    pub fn build(self) -> FacilityResult<FacilityTopology> {
        let topo = self.assemble();
        topo.validate()?;
        debug!(areas = topo.area_count(), edges = topo.edge_count(), "facility topology built");
        Ok(topo)
    }

    fn id_of(&self, name: &str) -> FacilityResult<AreaId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| FacilityError::UnknownArea(name.to_string()))
    }

    fn push_unchecked(&mut self, spec: AreaSpec) -> AreaId {
        let id = AreaId(self.areas.len() as u16);
        self.by_name.insert(spec.name.clone(), id);
        self.areas.push(spec);
        id
    }

    fn assemble(self) -> FacilityTopology {
        let area_count = self.areas.len();

        let mut raw = self.raw_edges;
        raw.sort_by_key(|&(from, _)| from.0);

        let edge_to: Vec<AreaId> = raw.iter().map(|&(_, to)| to).collect();

        let mut area_out_start = vec![0u32; area_count + 1];
        for &(from, _) in &raw {
            area_out_start[from.index() + 1] += 1;
        }
        for i in 1..=area_count {
            area_out_start[i] += area_out_start[i - 1];
        }

        let mut topo = FacilityTopology::empty();
        for spec in self.areas {
            topo.area_name.push(spec.name);
            topo.area_kind.push(spec.kind);
            topo.area_capacity.push(spec.capacity);
            topo.area_pos.push(spec.position);
        }
        topo.area_out_start = area_out_start;
        topo.edge_to = edge_to;
        topo.by_name = self.by_name;
        topo
    }
}

impl Default for TopologyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
