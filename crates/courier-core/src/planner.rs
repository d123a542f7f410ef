//! Per-order flight planning with all-or-nothing commit semantics.
//!
//! The planner owns the growing flight plan and the global move budget.
//! Orders are attempted in the sequence given by the caller (the external
//! stop sequencer), never reordered and never retried. An order either
//! contributes all of its stops' moves and is marked completed, or
//! contributes nothing at all.

use crate::airspace::Airspace;
use crate::config::PlannerConfig;
use crate::models::{FlightPlan, MoveStep, Order};
use crate::router;
use crate::spatial::Position;

/// Outcome of one planning run. The plan is valid even when the drone
/// could not make it back to base.
#[derive(Debug, Clone)]
pub struct DayPlan {
    pub plan: FlightPlan,
    pub returned_to_base: bool,
}

pub struct FlightPlanner<'a> {
    airspace: &'a Airspace,
    config: PlannerConfig,
}

impl<'a> FlightPlanner<'a> {
    pub fn new(airspace: &'a Airspace, config: PlannerConfig) -> Self {
        Self { airspace, config }
    }

    /// Plan a full run: attempt every order in sequence from `base`, then
    /// fly back to `base`. Completed orders are flagged in place.
    pub fn plan(&self, base: Position, orders: &mut [Order]) -> DayPlan {
        let mut moves: Vec<MoveStep> = Vec::new();
        let mut completed: Vec<String> = Vec::new();
        let mut pos = base;

        for order in orders.iter_mut() {
            if order.completed {
                continue;
            }
            match self.attempt_order(base, pos, moves.len() as u32, order) {
                Some((order_moves, end_pos)) => {
                    order.mark_completed();
                    tracing::info!(order = %order.id, moves = order_moves.len(), "order completed");
                    completed.push(order.id.clone());
                    moves.extend(order_moves);
                    pos = end_pos;
                }
                None => {
                    tracing::warn!(order = %order.id, "order abandoned");
                }
            }
        }

        let remaining = self.config.max_moves.saturating_sub(moves.len() as u32);
        let returned_to_base =
            match router::find_path(pos, base, remaining, None, self.airspace, &self.config) {
                Ok(path) => {
                    moves.extend(path);
                    true
                }
                Err(err) => {
                    tracing::warn!(error = %err, "final return to base failed");
                    false
                }
            };

        DayPlan {
            plan: FlightPlan {
                moves,
                completed_orders: completed,
            },
            returned_to_base,
        }
    }

    /// Try to visit every stop of `order` starting from `start_pos`, with
    /// `committed` moves already spent globally. Returns the order's move
    /// sequence and the drone's end position, or `None` if any stop is
    /// unreachable or would strand the drone — in which case nothing is
    /// committed.
    fn attempt_order(
        &self,
        base: Position,
        start_pos: Position,
        committed: u32,
        order: &Order,
    ) -> Option<(Vec<MoveStep>, Position)> {
        let mut local: Vec<MoveStep> = Vec::new();
        let mut pos = start_pos;

        for stop in &order.stops {
            let remaining = self
                .config
                .max_moves
                .saturating_sub(committed + local.len() as u32);

            let path = router::find_path(
                pos,
                *stop,
                remaining,
                Some(&order.id),
                self.airspace,
                &self.config,
            )
            .ok()?;

            // Room must be left for the hover at the stop itself.
            let used = path.len() as u32;
            if remaining <= used {
                return None;
            }

            // Feasibility lookahead: with the budget left after reaching
            // this stop, a return to base must still exist. Nothing is
            // committed if it does not.
            let arrived = path.last().map(|step| step.to).unwrap_or(pos);
            let after_arrival = remaining - used - 1;
            router::find_path(arrived, base, after_arrival, None, self.airspace, &self.config)
                .ok()?;

            pos = arrived;
            local.extend(path);
            local.push(MoveStep::hover(pos, Some(order.id.clone())));
        }

        Some((local, pos))
    }
}
