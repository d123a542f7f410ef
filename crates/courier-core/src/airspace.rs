//! The airspace the drone operates in: a rectangular confinement area and
//! the boundary edges of every no-fly zone.
//!
//! Built once before planning starts and read-only afterwards, so a single
//! instance can be shared across planning runs.

use crate::spatial::{segments_intersect, Position};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle the drone must always remain inside.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfinementArea {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl ConfinementArea {
    /// Whether `pos` lies within the confinement area, inclusive on all
    /// four bounds.
    pub fn contains(&self, pos: Position) -> bool {
        self.west <= pos.lng
            && pos.lng <= self.east
            && self.south <= pos.lat
            && pos.lat <= self.north
    }

    /// The four corners as a closed ring, for map rendering.
    pub fn ring(&self) -> Vec<Position> {
        vec![
            Position::new(self.west, self.north),
            Position::new(self.east, self.north),
            Position::new(self.east, self.south),
            Position::new(self.west, self.south),
            Position::new(self.west, self.north),
        ]
    }
}

/// A forbidden polygonal region, given as an ordered boundary ring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoFlyZone {
    #[serde(default)]
    pub name: String,
    pub ring: Vec<Position>,
}

impl NoFlyZone {
    /// Boundary segments of this zone: one per consecutive point pair,
    /// closing the ring if the source is not already closed.
    fn boundary_segments(&self) -> Vec<(Position, Position)> {
        let mut segments = Vec::new();
        for pair in self.ring.windows(2) {
            segments.push((pair[0], pair[1]));
        }
        if let (Some(&first), Some(&last)) = (self.ring.first(), self.ring.last()) {
            if self.ring.len() > 2 && first != last {
                segments.push((last, first));
            }
        }
        segments
    }
}

/// Immutable flight environment: confinement bounds plus the flattened
/// boundary-segment set of all no-fly zones.
#[derive(Debug, Clone)]
pub struct Airspace {
    confinement: ConfinementArea,
    segments: Vec<(Position, Position)>,
}

impl Airspace {
    pub fn new(confinement: ConfinementArea, zones: &[NoFlyZone]) -> Self {
        let segments = zones
            .iter()
            .flat_map(NoFlyZone::boundary_segments)
            .collect();
        Self {
            confinement,
            segments,
        }
    }

    pub fn confinement(&self) -> &ConfinementArea {
        &self.confinement
    }

    /// Whether the segment `from -> to` crosses any no-fly-zone boundary
    /// edge. Touching an edge counts as crossing.
    pub fn crosses_zone(&self, from: Position, to: Position) -> bool {
        self.segments
            .iter()
            .any(|&(s1, s2)| segments_intersect(from, to, s1, s2))
    }
}
