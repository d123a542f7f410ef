//! Flight-planning engine for a single battery-limited courier drone.
//!
//! The drone moves in fixed-length hops along compass headings quantized
//! to 10 degrees, must stay inside a rectangular confinement area, and may
//! never cross the boundary of a no-fly zone. Orders are attempted in the
//! sequence given by the caller; each is delivered completely or not at
//! all, and the drone keeps enough of its move budget to get home.

pub mod airspace;
pub mod config;
pub mod error;
pub mod models;
pub mod planner;
pub mod router;
pub mod search;
pub mod spatial;

pub use airspace::{Airspace, ConfinementArea, NoFlyZone};
pub use config::{PlannerConfig, SweepStrategy};
pub use error::PathError;
pub use models::{FlightPlan, MoveStep, Order};
pub use planner::{DayPlan, FlightPlanner};
pub use spatial::{Heading, Position};
