//! A* fallback pathfinder over quantized headings.
//!
//! Invoked by the direct router when a straight advance is blocked. Each
//! search run owns its open and closed sets and discards them on return.
//! The open set allows duplicate entries per node and skips stale ones on
//! pop (lazy deletion) instead of re-sorting on relaxation.

use crate::airspace::Airspace;
use crate::config::{PlannerConfig, SweepStrategy};
use crate::error::PathError;
use crate::models::MoveStep;
use crate::spatial::{Heading, Position};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Node identity during search: the position quantized to a hop-length
/// grid, so two positions within the same cell relax against each other
/// instead of spawning near-duplicate nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct NodeKey {
    ix: i64,
    iy: i64,
}

impl NodeKey {
    fn of(pos: Position, hop: f64) -> Self {
        Self {
            ix: (pos.lng / hop).round() as i64,
            iy: (pos.lat / hop).round() as i64,
        }
    }
}

/// Search bookkeeping for one node. Owns its position rather than being
/// one; the heuristic is fixed at creation.
#[derive(Debug, Clone)]
struct NodeRecord {
    pos: Position,
    heuristic: f64,
    actual: f64,
    /// Hop count from the start, root = 1. Used for budget pruning.
    depth: u32,
    parent: Option<(NodeKey, Heading)>,
}

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    total: FloatOrd,
    actual: FloatOrd,
    key: NodeKey,
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total
            .cmp(&other.total)
            .then_with(|| self.actual.cmp(&other.actual))
            .then_with(|| self.key.cmp(&other.key))
    }
}

fn candidate_headings(from: Position, goal: Position, sweep: SweepStrategy) -> Vec<Heading> {
    match sweep {
        SweepStrategy::GoalArc {
            half_arc_deg,
            step_deg,
        } => {
            let base = match from.heading_to(goal) {
                Heading::Deg(deg) => deg,
                Heading::Hover => 0,
            };
            let step = step_deg.max(1);
            let mut headings = Vec::new();
            let mut offset = -half_arc_deg;
            while offset <= half_arc_deg {
                headings.push(Heading::Deg(base + offset));
                offset += step;
            }
            headings
        }
        SweepStrategy::FullCircle { step_deg } => {
            let step = step_deg.max(1);
            (0..360)
                .step_by(step as usize)
                .map(Heading::Deg)
                .collect()
        }
    }
}

/// Find a move sequence from `start` to within arrival range of `goal`,
/// using at most `budget` hops. Returns `NoPathFound` when the open set
/// drains first; a budget of zero explores nothing beyond the root.
pub fn astar(
    start: Position,
    goal: Position,
    budget: u32,
    order_id: Option<&str>,
    airspace: &Airspace,
    config: &PlannerConfig,
) -> Result<Vec<MoveStep>, PathError> {
    let hop = config.hop_length;

    let mut records: HashMap<NodeKey, NodeRecord> = HashMap::new();
    let mut open: BinaryHeap<Reverse<OpenEntry>> = BinaryHeap::new();
    let mut closed: HashSet<NodeKey> = HashSet::new();

    let root_key = NodeKey::of(start, hop);
    let root = NodeRecord {
        pos: start,
        heuristic: start.distance_to(goal),
        actual: 0.0,
        depth: 1,
        parent: None,
    };
    open.push(Reverse(OpenEntry {
        total: FloatOrd(root.actual + root.heuristic),
        actual: FloatOrd(root.actual),
        key: root_key,
    }));
    records.insert(root_key, root);

    while let Some(Reverse(entry)) = open.pop() {
        if closed.contains(&entry.key) {
            continue;
        }
        let (current_pos, current_actual, current_depth) = {
            let record = &records[&entry.key];
            // A relaxed node leaves its superseded heap entries behind.
            if entry.actual.0 > record.actual + 1e-12 {
                continue;
            }
            (record.pos, record.actual, record.depth)
        };
        closed.insert(entry.key);

        if current_pos.is_close(goal, hop) {
            return Ok(reconstruct(&records, entry.key, hop, order_id));
        }

        for heading in candidate_headings(current_pos, goal, config.sweep) {
            let next = current_pos.step(heading, hop);
            let next_key = NodeKey::of(next, hop);
            if closed.contains(&next_key) {
                continue;
            }

            if !airspace.confinement().contains(next) || airspace.crosses_zone(current_pos, next) {
                continue;
            }
            if config.lookahead_hops > 0 {
                let probe = current_pos.step_by(heading, hop, config.lookahead_hops);
                if airspace.crosses_zone(current_pos, probe) {
                    continue;
                }
            }

            let tentative_actual = current_actual + hop;
            let depth = current_depth + 1;

            match records.get_mut(&next_key) {
                Some(existing) => {
                    if tentative_actual < existing.actual {
                        existing.pos = next;
                        existing.heuristic = next.distance_to(goal);
                        existing.actual = tentative_actual;
                        existing.depth = depth;
                        existing.parent = Some((entry.key, heading));
                        open.push(Reverse(OpenEntry {
                            total: FloatOrd(tentative_actual + existing.heuristic),
                            actual: FloatOrd(tentative_actual),
                            key: next_key,
                        }));
                    }
                }
                None => {
                    // Budget pruning: never open a node the drone cannot
                    // afford to reach.
                    if depth > budget {
                        continue;
                    }
                    let heuristic = next.distance_to(goal);
                    records.insert(
                        next_key,
                        NodeRecord {
                            pos: next,
                            heuristic,
                            actual: tentative_actual,
                            depth,
                            parent: Some((entry.key, heading)),
                        },
                    );
                    open.push(Reverse(OpenEntry {
                        total: FloatOrd(tentative_actual + heuristic),
                        actual: FloatOrd(tentative_actual),
                        key: next_key,
                    }));
                }
            }
        }
    }

    Err(PathError::NoPathFound)
}

/// Walk parent links back to the root and re-emit one move per recorded
/// heading, in travel order.
fn reconstruct(
    records: &HashMap<NodeKey, NodeRecord>,
    goal_key: NodeKey,
    hop: f64,
    order_id: Option<&str>,
) -> Vec<MoveStep> {
    let mut moves = Vec::new();
    let mut key = goal_key;
    while let Some((parent_key, heading)) = records[&key].parent {
        let parent = &records[&parent_key];
        moves.push(MoveStep::new(
            parent.pos,
            heading,
            hop,
            order_id.map(str::to_string),
        ));
        key = parent_key;
    }
    moves.reverse();
    moves
}
