use std::collections::BTreeMap;

use ai_core::{WorldMut, WorldView};
use ai_goal::GoalType;
use serde::Serialize;

/// What the scripted goals did to each agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentActivity {
    /// Ticks spent per goal type, keyed by catalog id.
    pub busy_ticks: BTreeMap<&'static str, u64>,
    /// Completed runs per goal type (the goal ran out its duration).
    pub completed: BTreeMap<&'static str, u64>,
}

/// Minimal world for scripted scenarios: it only records activity.
#[derive(Debug, Default)]
pub struct SimWorld {
    activity: BTreeMap<u64, AgentActivity>,
}

impl SimWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activity(&self, agent: u64) -> Option<&AgentActivity> {
        self.activity.get(&agent)
    }

    pub(crate) fn record_tick(&mut self, agent: u64, goal_type: GoalType) {
        *self
            .activity
            .entry(agent)
            .or_default()
            .busy_ticks
            .entry(goal_type.id())
            .or_default() += 1;
    }

    pub(crate) fn record_completion(&mut self, agent: u64, goal_type: GoalType) {
        *self
            .activity
            .entry(agent)
            .or_default()
            .completed
            .entry(goal_type.id())
            .or_default() += 1;
    }
}

impl WorldView for SimWorld {
    type Agent = u64;
}

impl WorldMut for SimWorld {}
