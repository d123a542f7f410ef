//! Planar geometry for flight planning.
//!
//! Coordinates are longitude/latitude pairs treated as points on a plane,
//! not on a sphere: distances are plain Euclidean distances on the raw
//! degree values. The hop length supplied by the caller is the single
//! tolerance constant used for step size, arrival radius and node
//! identity throughout the engine.

use serde::{Deserialize, Serialize};

/// Angle (in degrees) between consecutive quantized compass headings.
pub const HEADING_STEP_DEG: i32 = 10;

/// A planar longitude/latitude coordinate. Pure value type with no
/// identity beyond its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lng: f64,
    pub lat: f64,
}

/// Direction of one atomic drone move: either a compass heading quantized
/// to multiples of 10 degrees (0 = east, 90 = north), or the hover
/// sentinel meaning zero displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Heading {
    Deg(i32),
    Hover,
}

/// Integer encoding of the hover sentinel used in serialized move records.
pub const HOVER_HEADING_SENTINEL: i32 = -999;

impl From<i32> for Heading {
    fn from(value: i32) -> Self {
        if value == HOVER_HEADING_SENTINEL {
            Heading::Hover
        } else {
            Heading::Deg(value)
        }
    }
}

impl From<Heading> for i32 {
    fn from(value: Heading) -> Self {
        match value {
            Heading::Deg(deg) => deg,
            Heading::Hover => HOVER_HEADING_SENTINEL,
        }
    }
}

impl Position {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Euclidean distance to `other`, in degrees.
    pub fn distance_to(&self, other: Position) -> f64 {
        let dlng = self.lng - other.lng;
        let dlat = self.lat - other.lat;
        (dlng * dlng + dlat * dlat).sqrt()
    }

    /// Whether `other` is within arrival range: strictly less than one hop
    /// away. Deliberately not exact equality, so a path can terminate one
    /// hop before touching its target.
    pub fn is_close(&self, other: Position, hop: f64) -> bool {
        self.distance_to(other) < hop
    }

    /// Quantized heading from this position toward `other`: `atan2` in
    /// degrees, rounded half-away-from-zero to the nearest multiple of 10
    /// and normalized into (-180, 180] so due west is always 180.
    pub fn heading_to(&self, other: Position) -> Heading {
        let dlng = other.lng - self.lng;
        let dlat = other.lat - self.lat;
        let deg = dlat.atan2(dlng).to_degrees();
        let mut quantized = (deg / HEADING_STEP_DEG as f64).round() as i32 * HEADING_STEP_DEG;
        if quantized <= -180 {
            quantized += 360;
        }
        Heading::Deg(quantized)
    }

    /// Position after one hop of length `hop` in direction `heading`.
    /// Hover yields the identity.
    pub fn step(&self, heading: Heading, hop: f64) -> Position {
        match heading {
            Heading::Hover => *self,
            Heading::Deg(deg) => {
                let rad = f64::from(deg).to_radians();
                Position {
                    lng: self.lng + hop * rad.cos(),
                    lat: self.lat + hop * rad.sin(),
                }
            }
        }
    }

    /// Position after `count` hops in the same direction. Used for the
    /// straight-corridor lookahead probe during graph search.
    pub fn step_by(&self, heading: Heading, hop: f64, count: u32) -> Position {
        let mut pos = *self;
        for _ in 0..count {
            pos = pos.step(heading, hop);
        }
        pos
    }
}

/// Whether segments `a1->a2` and `b1->b2` intersect. Touching at a shared
/// point counts as an intersection, matching standard segment semantics.
pub fn segments_intersect(a1: Position, a2: Position, b1: Position, b2: Position) -> bool {
    // Tolerance in degrees; coordinates here are small offsets, so this only
    // absorbs floating-point error from the cross products.
    const EPS: f64 = 1e-12;

    fn orient(p: Position, q: Position, r: Position) -> f64 {
        (q.lng - p.lng) * (r.lat - p.lat) - (q.lat - p.lat) * (r.lng - p.lng)
    }

    fn within(a: f64, b: f64, value: f64) -> bool {
        value >= a.min(b) - EPS && value <= a.max(b) + EPS
    }

    fn on_segment(p: Position, q: Position, r: Position) -> bool {
        within(p.lng, q.lng, r.lng) && within(p.lat, q.lat, r.lat)
    }

    let o1 = orient(a1, a2, b1);
    let o2 = orient(a1, a2, b2);
    let o3 = orient(b1, b2, a1);
    let o4 = orient(b1, b2, a2);

    if o1.abs() <= EPS && on_segment(a1, a2, b1) {
        return true;
    }
    if o2.abs() <= EPS && on_segment(a1, a2, b2) {
        return true;
    }
    if o3.abs() <= EPS && on_segment(b1, b2, a1) {
        return true;
    }
    if o4.abs() <= EPS && on_segment(b1, b2, a2) {
        return true;
    }

    let a_crosses = (o1 > EPS && o2 < -EPS) || (o1 < -EPS && o2 > EPS);
    let b_crosses = (o3 > EPS && o4 < -EPS) || (o3 < -EPS && o4 > EPS);
    a_crosses && b_crosses
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOP: f64 = 0.00015;

    #[test]
    fn distance_is_planar_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn is_close_is_strict() {
        let p = Position::new(-3.186874, 55.944494);
        assert!(p.is_close(p, HOP));
        let exactly_one_hop = Position::new(p.lng + HOP, p.lat);
        assert!(!p.is_close(exactly_one_hop, HOP));
        let just_inside = Position::new(p.lng + HOP * 0.99, p.lat);
        assert!(p.is_close(just_inside, HOP));
    }

    #[test]
    fn heading_quantizes_to_ten_degrees() {
        let origin = Position::new(0.0, 0.0);
        assert_eq!(origin.heading_to(Position::new(1.0, 0.0)), Heading::Deg(0));
        assert_eq!(origin.heading_to(Position::new(0.0, 1.0)), Heading::Deg(90));
        // atan2(1, 1) = 45 degrees, rounds away from zero to 50
        assert_eq!(origin.heading_to(Position::new(1.0, 1.0)), Heading::Deg(50));
        assert_eq!(
            origin.heading_to(Position::new(1.0, -1.0)),
            Heading::Deg(-50)
        );
        // Due west normalizes to 180, never -180.
        assert_eq!(
            origin.heading_to(Position::new(-1.0, 0.0)),
            Heading::Deg(180)
        );
        assert_eq!(
            origin.heading_to(Position::new(-1.0, -1e-15)),
            Heading::Deg(180)
        );
    }

    #[test]
    fn step_moves_one_hop() {
        let p = Position::new(0.0, 0.0);
        let east = p.step(Heading::Deg(0), HOP);
        assert!((east.lng - HOP).abs() < 1e-18);
        assert!((p.distance_to(east) - HOP).abs() < 1e-18);

        let diagonal = p.step(Heading::Deg(30), HOP);
        assert!((p.distance_to(diagonal) - HOP).abs() < 1e-18);
    }

    #[test]
    fn hover_is_identity() {
        let p = Position::new(-3.19, 55.94);
        assert_eq!(p.step(Heading::Hover, HOP), p);
    }

    #[test]
    fn heading_serde_uses_hover_sentinel() {
        let json = serde_json::to_string(&Heading::Hover).unwrap();
        assert_eq!(json, "-999");
        let back: Heading = serde_json::from_str("-999").unwrap();
        assert_eq!(back, Heading::Hover);
        let deg: Heading = serde_json::from_str("270").unwrap();
        assert_eq!(deg, Heading::Deg(270));
    }

    #[test]
    fn crossing_segments_intersect() {
        let a1 = Position::new(0.0, 0.0);
        let a2 = Position::new(1.0, 1.0);
        let b1 = Position::new(0.0, 1.0);
        let b2 = Position::new(1.0, 0.0);
        assert!(segments_intersect(a1, a2, b1, b2));
    }

    #[test]
    fn touching_at_endpoint_intersects() {
        let a1 = Position::new(0.0, 0.0);
        let a2 = Position::new(1.0, 0.0);
        let b1 = Position::new(1.0, 0.0);
        let b2 = Position::new(1.0, 1.0);
        assert!(segments_intersect(a1, a2, b1, b2));
    }

    #[test]
    fn disjoint_segments_do_not_intersect() {
        let a1 = Position::new(0.0, 0.0);
        let a2 = Position::new(1.0, 0.0);
        let b1 = Position::new(0.0, 1.0);
        let b2 = Position::new(1.0, 1.0);
        assert!(!segments_intersect(a1, a2, b1, b2));
    }
}
