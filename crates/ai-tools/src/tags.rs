//! Tags emitted by the goal selector.
//!
//! For every goal event `a` is the goal id and `b` is the entry priority (two's complement for
//! negative priorities), except where noted.

/// Entry transitioned Idle -> Running.
pub const GOAL_START: &str = "goal.start";
/// Entry stopped because `should_continue` returned false.
pub const GOAL_STOP: &str = "goal.stop";
/// Entry stopped to make room for a higher-priority conflicting entry. `b` is the preempting
/// goal id.
pub const GOAL_PREEMPT: &str = "goal.preempt";
/// A lifecycle call failed.
pub const GOAL_FAULT: &str = "goal.fault";
/// Entry removed through the mutation API (or a queued command).
pub const GOAL_REMOVE: &str = "goal.remove";

pub const ALL: &[&str] = &[GOAL_START, GOAL_STOP, GOAL_PREEMPT, GOAL_FAULT, GOAL_REMOVE];
