//! Planner configuration.

use serde::{Deserialize, Serialize};

/// How graph search samples candidate headings when expanding a node.
///
/// The narrow arc is cheaper; the full sweep can find detours that double
/// back past the goal heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SweepStrategy {
    /// Sample headings across `±half_arc_deg` around the straight-line
    /// heading to the goal, every `step_deg` degrees.
    GoalArc { half_arc_deg: i32, step_deg: i32 },
    /// Sample the full circle every `step_deg` degrees.
    FullCircle { step_deg: i32 },
}

/// Every field has a standalone default, so a scenario file may override
/// any subset and inherit the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Length of one drone move, in degrees. Also the arrival radius and
    /// the node-identity radius during graph search.
    pub hop_length: f64,
    /// Ceiling on the number of moves (hops and hovers) in a whole run.
    pub max_moves: u32,
    pub sweep: SweepStrategy,
    /// How many hops straight ahead of a candidate heading must stay clear
    /// of no-fly zones before graph search will commit to it. Zero
    /// disables the probe.
    pub lookahead_hops: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            hop_length: 0.00015,
            max_moves: 1500,
            sweep: SweepStrategy::GoalArc {
                half_arc_deg: 90,
                step_deg: 30,
            },
            lookahead_hops: 4,
        }
    }
}
