//! Renders a computed flight plan and its airspace to a GeoJSON
//! `FeatureCollection` suitable for any map viewer.
//!
//! The flight path becomes a single `LineString` (hover steps contribute
//! no vertex of their own), each hover becomes a `Point` marker, and the
//! no-fly zones and confinement rectangle are drawn as polygons.

use courier_core::{ConfinementArea, FlightPlan, NoFlyZone, Position};
use serde_json::{json, Value};

fn coords(positions: &[Position]) -> Vec<Value> {
    positions.iter().map(|p| json!([p.lng, p.lat])).collect()
}

fn line_string_feature(positions: &[Position]) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "LineString",
            "coordinates": coords(positions),
        },
        "properties": { "name": "flight path" },
    })
}

fn marker_feature(pos: Position) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [pos.lng, pos.lat],
        },
        "properties": { "marker-symbol": "marker" },
    })
}

fn zone_feature(zone: &NoFlyZone) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [coords(&zone.ring)],
        },
        "properties": { "name": zone.name, "fill": "#ff0000" },
    })
}

fn confinement_feature(area: &ConfinementArea) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [coords(&area.ring())],
        },
        "properties": { "name": "confinement area", "fill": "none" },
    })
}

/// Build the full map: hover markers, the flight path line, every no-fly
/// zone and the confinement rectangle, in that order. A plan with fewer
/// than two path vertices (hover-only or empty) gets no line feature; a
/// one-point `LineString` is not valid GeoJSON.
pub fn render_plan(plan: &FlightPlan, zones: &[NoFlyZone], confinement: &ConfinementArea) -> Value {
    let mut features: Vec<Value> = plan
        .hover_positions()
        .into_iter()
        .map(marker_feature)
        .collect();
    let path = plan.path_positions();
    if path.len() >= 2 {
        features.push(line_string_feature(&path));
    }
    features.extend(zones.iter().map(zone_feature));
    features.push(confinement_feature(confinement));

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
