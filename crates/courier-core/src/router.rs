//! Direct router: straight-line advance toward a target, one hop at a
//! time, deferring to A* the moment a hop is blocked.

use crate::airspace::Airspace;
use crate::config::PlannerConfig;
use crate::error::PathError;
use crate::models::MoveStep;
use crate::search;
use crate::spatial::Position;

/// Compute a move sequence from `from` to within arrival range of `to`,
/// spending at most `budget` moves.
///
/// Hops are committed greedily on the quantized heading to the target for
/// as long as they are valid. The first invalid hop hands the current
/// position and the remaining budget to graph search; its result (if any)
/// is appended to the hops already taken. An empty sequence means `from`
/// is already in range.
pub fn find_path(
    from: Position,
    to: Position,
    budget: u32,
    order_id: Option<&str>,
    airspace: &Airspace,
    config: &PlannerConfig,
) -> Result<Vec<MoveStep>, PathError> {
    let hop = config.hop_length;

    if from.is_close(to, hop) {
        return Ok(Vec::new());
    }
    if budget == 0 {
        return Err(PathError::BudgetExhausted);
    }

    let mut moves = Vec::new();
    let mut pos = from;
    let mut remaining = budget;

    while remaining > 0 && !pos.is_close(to, hop) {
        let step = MoveStep::new(pos, pos.heading_to(to), hop, order_id.map(str::to_string));
        if step.is_valid(airspace) {
            pos = step.to;
            moves.push(step);
            remaining -= 1;
        } else {
            let detour = search::astar(pos, to, remaining, order_id, airspace, config)?;
            moves.extend(detour);
            return Ok(moves);
        }
    }

    if pos.is_close(to, hop) {
        Ok(moves)
    } else {
        Err(PathError::BudgetExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airspace::{ConfinementArea, NoFlyZone};
    use crate::config::SweepStrategy;
    use crate::spatial::Heading;

    fn config() -> PlannerConfig {
        PlannerConfig {
            hop_length: 1.0,
            max_moves: 1500,
            sweep: SweepStrategy::GoalArc {
                half_arc_deg: 90,
                step_deg: 30,
            },
            lookahead_hops: 2,
        }
    }

    fn open_airspace() -> Airspace {
        Airspace::new(
            ConfinementArea {
                west: -10.0,
                east: 10.0,
                south: -10.0,
                north: 10.0,
            },
            &[],
        )
    }

    #[test]
    fn straight_run_is_exact_hop_count() {
        let path = find_path(
            Position::new(0.0, 0.0),
            Position::new(5.0, 0.0),
            1000,
            None,
            &open_airspace(),
            &config(),
        )
        .unwrap();
        assert_eq!(path.len(), 5);
        assert!(path.iter().all(|m| m.heading == Heading::Deg(0)));
    }

    #[test]
    fn already_in_range_yields_empty_path() {
        let from = Position::new(0.0, 0.0);
        let to = Position::new(0.5, 0.0);
        let path = find_path(from, to, 10, None, &open_airspace(), &config()).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn exhausted_budget_is_reported() {
        let result = find_path(
            Position::new(0.0, 0.0),
            Position::new(8.0, 0.0),
            3,
            None,
            &open_airspace(),
            &config(),
        );
        assert!(matches!(result, Err(PathError::BudgetExhausted)));
    }

    #[test]
    fn blocked_corridor_falls_back_to_search() {
        let zone = NoFlyZone {
            name: "wall".to_string(),
            ring: vec![
                Position::new(2.0, -2.0),
                Position::new(3.0, -2.0),
                Position::new(3.0, 2.0),
                Position::new(2.0, 2.0),
                Position::new(2.0, -2.0),
            ],
        };
        let airspace = Airspace::new(
            ConfinementArea {
                west: -10.0,
                east: 10.0,
                south: -10.0,
                north: 10.0,
            },
            &[zone],
        );
        let from = Position::new(0.0, 0.0);
        let to = Position::new(6.0, 0.0);
        let path = find_path(from, to, 500, None, &airspace, &config()).unwrap();
        assert!(path.len() > 6, "detour must be longer than the direct line");
        for step in &path {
            assert!(step.is_valid(&airspace));
        }
        assert!(path.last().unwrap().to.is_close(to, 1.0));
        // Moves must chain: each hop starts where the previous one ended.
        for pair in path.windows(2) {
            assert_eq!(pair[1].from, pair[0].to);
        }
    }
}
