//! Path-search failure taxonomy.
//!
//! Every failure here is recoverable at the order level: the planner treats
//! any of them as "abandon the current order" (or "final return
//! unreachable") and carries on. None of them abort a run.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    /// The remaining move budget ran out before the target came in range.
    #[error("move budget exhausted before reaching target")]
    BudgetExhausted,
    /// Graph search drained its open set without reaching the target
    /// within the move budget.
    #[error("no path to target within move budget")]
    NoPathFound,
}
