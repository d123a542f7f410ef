//! Scenario runner: load a day's pre-resolved orders and airspace from a
//! JSON file, plan the flight, and write the resulting GeoJSON map.

use anyhow::{Context, Result};
use clap::Parser;
use courier_core::{
    Airspace, ConfinementArea, FlightPlanner, NoFlyZone, Order, PlannerConfig, Position,
};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "courier-plan", about = "Plan a courier drone's delivery day")]
struct Args {
    /// Scenario file: base, confinement, zones and the ordered order list.
    #[arg(long)]
    scenario: PathBuf,
    /// Where to write the GeoJSON map; stdout if omitted.
    #[arg(long)]
    output: Option<PathBuf>,
}

/// A full day's planning input. Orders arrive already sequenced and with
/// their stops resolved to coordinates by the upstream catalog and
/// geocoding services.
#[derive(Debug, Deserialize)]
struct Scenario {
    base: Position,
    confinement: ConfinementArea,
    #[serde(default)]
    zones: Vec<NoFlyZone>,
    orders: Vec<Order>,
    #[serde(default)]
    config: PlannerConfig,
}

fn pending_orders(orders: &[Order]) -> usize {
    orders.iter().filter(|order| !order.completed).count()
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("courier_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let raw = fs::read_to_string(&args.scenario)
        .with_context(|| format!("reading scenario {}", args.scenario.display()))?;
    let mut scenario: Scenario = serde_json::from_str(&raw).context("parsing scenario")?;

    let airspace = Airspace::new(scenario.confinement, &scenario.zones);
    let planner = FlightPlanner::new(&airspace, scenario.config.clone());
    // Orders already flagged completed are skipped, not attempted.
    let attempted = pending_orders(&scenario.orders);
    let day = planner.plan(scenario.base, &mut scenario.orders);

    tracing::info!(
        moves = day.plan.moves.len(),
        completed = day.plan.completed_orders.len(),
        attempted,
        returned_to_base = day.returned_to_base,
        "planning finished"
    );
    if !day.returned_to_base {
        tracing::warn!("drone could not return to base within the move budget");
    }

    let map = courier_geojson::render_plan(&day.plan, &scenario.zones, &scenario.confinement);
    let rendered = serde_json::to_string_pretty(&map)?;
    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("writing map to {}", path.display()))?,
        None => println!("{rendered}"),
    }

    Ok(())
}
