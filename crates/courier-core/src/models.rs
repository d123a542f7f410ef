//! Core data models for the courier planner.

use crate::airspace::Airspace;
use crate::spatial::{Heading, Position};
use serde::{Deserialize, Serialize};

/// One atomic drone action: a fixed-length hop in a quantized heading, or
/// a hover marking a pickup/drop-off. The destination is always derived
/// from the origin and heading, so the hop-length invariant holds by
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveStep {
    pub from: Position,
    pub to: Position,
    pub heading: Heading,
    /// The order this step serves, if any. Return-to-base legs are untagged.
    pub order_id: Option<String>,
}

impl MoveStep {
    pub fn new(from: Position, heading: Heading, hop: f64, order_id: Option<String>) -> Self {
        Self {
            from,
            to: from.step(heading, hop),
            heading,
            order_id,
        }
    }

    /// A zero-displacement step marking a pickup or delivery at `at`.
    pub fn hover(at: Position, order_id: Option<String>) -> Self {
        Self {
            from: at,
            to: at,
            heading: Heading::Hover,
            order_id,
        }
    }

    pub fn is_hover(&self) -> bool {
        self.heading == Heading::Hover
    }

    /// A step is valid iff its destination stays confined and its segment
    /// does not cross a no-fly-zone boundary. Hover steps are always valid.
    pub fn is_valid(&self, airspace: &Airspace) -> bool {
        if self.is_hover() {
            return true;
        }
        airspace.confinement().contains(self.to) && !airspace.crosses_zone(self.from, self.to)
    }
}

/// A delivery order: the stops to visit (pickup shops, then the delivery
/// address), already resolved to concrete positions by the catalog and
/// geocoding collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub stops: Vec<Position>,
    /// Delivery cost in pence; consumed only by the external stop
    /// sequencer, never by the planner itself.
    #[serde(default)]
    pub delivery_cost: u32,
    #[serde(default)]
    pub completed: bool,
}

impl Order {
    pub fn new(id: impl Into<String>, stops: Vec<Position>) -> Self {
        Self {
            id: id.into(),
            stops,
            delivery_cost: 0,
            completed: false,
        }
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }
}

/// The committed result of one planning run: every move made plus the ids
/// of the orders that were fully delivered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightPlan {
    pub moves: Vec<MoveStep>,
    pub completed_orders: Vec<String>,
}

impl FlightPlan {
    /// Positions visited along the path, hover steps excluded.
    pub fn path_positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();
        if let Some(first) = self.moves.first() {
            positions.push(first.from);
        }
        for step in &self.moves {
            if !step.is_hover() {
                positions.push(step.to);
            }
        }
        positions
    }

    /// Positions at which the drone hovered to pick up or drop off.
    pub fn hover_positions(&self) -> Vec<Position> {
        self.moves
            .iter()
            .filter(|step| step.is_hover())
            .map(|step| step.to)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airspace::{ConfinementArea, NoFlyZone};

    const HOP: f64 = 1.0;

    fn airspace(zones: &[NoFlyZone]) -> Airspace {
        Airspace::new(
            ConfinementArea {
                west: -10.0,
                east: 10.0,
                south: -10.0,
                north: 10.0,
            },
            zones,
        )
    }

    #[test]
    fn destination_is_derived_from_heading() {
        let step = MoveStep::new(Position::new(0.0, 0.0), Heading::Deg(90), HOP, None);
        assert!((step.to.lat - 1.0).abs() < 1e-12);
        assert!(step.to.lng.abs() < 1e-12);
    }

    #[test]
    fn step_leaving_confinement_is_invalid() {
        let airspace = airspace(&[]);
        let step = MoveStep::new(Position::new(9.5, 0.0), Heading::Deg(0), HOP, None);
        assert!(!step.is_valid(&airspace));
    }

    #[test]
    fn step_crossing_zone_edge_is_invalid() {
        let zone = NoFlyZone {
            name: String::new(),
            ring: vec![
                Position::new(0.5, -1.0),
                Position::new(0.5, 1.0),
                Position::new(1.5, 1.0),
                Position::new(1.5, -1.0),
                Position::new(0.5, -1.0),
            ],
        };
        let airspace = airspace(&[zone]);
        // Destination is confined, but the segment crosses the zone edge.
        let step = MoveStep::new(Position::new(0.0, 0.0), Heading::Deg(0), HOP, None);
        assert!(airspace.confinement().contains(step.to));
        assert!(!step.is_valid(&airspace));
    }

    #[test]
    fn hover_inside_zone_is_still_valid() {
        let zone = NoFlyZone {
            name: String::new(),
            ring: vec![
                Position::new(-1.0, -1.0),
                Position::new(1.0, -1.0),
                Position::new(1.0, 1.0),
                Position::new(-1.0, 1.0),
                Position::new(-1.0, -1.0),
            ],
        };
        let airspace = airspace(&[zone]);
        let hover = MoveStep::hover(Position::new(0.0, 0.0), None);
        assert!(hover.is_valid(&airspace));
    }

    #[test]
    fn plan_splits_path_and_hover_positions() {
        let mut plan = FlightPlan::default();
        let start = Position::new(0.0, 0.0);
        let step = MoveStep::new(start, Heading::Deg(0), HOP, Some("o1".to_string()));
        let arrived = step.to;
        plan.moves.push(step);
        plan.moves.push(MoveStep::hover(arrived, Some("o1".to_string())));

        assert_eq!(plan.path_positions().len(), 2);
        assert_eq!(plan.hover_positions(), vec![arrived]);
    }
}
