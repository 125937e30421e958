use std::fmt;

use crate::{GoalId, GoalType, SelectorId};

/// Invalid-state errors from the selector mutation API. These are caller bugs, not runtime
/// faults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("{goal} ({goal_type}) is already running in {running_in}")]
    GoalRunningElsewhere {
        goal: GoalId,
        goal_type: GoalType,
        running_in: SelectorId,
    },
}

/// Lifecycle method that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    ShouldStart,
    ShouldContinue,
    Start,
    Tick,
    End,
}

impl LifecyclePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            LifecyclePhase::ShouldStart => "should_start",
            LifecyclePhase::ShouldContinue => "should_continue",
            LifecyclePhase::Start => "start",
            LifecyclePhase::Tick => "tick",
            LifecyclePhase::End => "end",
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A goal lifecycle call that returned an error.
///
/// The selector contains the failure to the entry (it is forced out of the Running state) and
/// keeps scheduling the other entries.
#[derive(Debug, thiserror::Error)]
#[error("{goal} ({goal_type}, priority {priority}) failed in {phase} on tick {tick}: {error:#}")]
pub struct GoalFault {
    pub goal: GoalId,
    pub goal_type: GoalType,
    pub priority: i32,
    pub phase: LifecyclePhase,
    pub tick: u64,
    pub error: anyhow::Error,
}
