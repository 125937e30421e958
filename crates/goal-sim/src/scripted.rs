use ai_core::DeterministicRng;
use ai_goal::{CategoryFlags, Goal, GoalContext, GoalResult, GoalType};
use anyhow::Result;

use crate::scenario::GoalSpec;
use crate::world::SimWorld;

/// Goal driven by a [`GoalSpec`] instead of game logic.
#[derive(Debug, Clone)]
pub struct ScriptedGoal {
    goal_type: GoalType,
    flags: CategoryFlags,
    start_after: u64,
    duration: u64,
    start_chance: f32,
    fail_on_tick: Option<u64>,
    interruptible: bool,
    stream: u64,
    started_at: Option<u64>,
}

impl ScriptedGoal {
    /// `stream` selects the goal's RNG stream; give every goal of an agent a distinct one.
    pub fn from_spec(spec: &GoalSpec, stream: u64) -> Result<Self> {
        Ok(Self {
            goal_type: spec.resolve_type()?,
            flags: spec.resolve_flags()?,
            start_after: spec.start_after,
            duration: spec.duration,
            start_chance: spec.start_chance,
            fail_on_tick: spec.fail_on_tick,
            interruptible: spec.interruptible,
            stream,
            started_at: None,
        })
    }

    fn finished(&self, tick: u64) -> bool {
        match self.started_at {
            Some(started) if self.duration > 0 => tick.saturating_sub(started) >= self.duration,
            _ => false,
        }
    }
}

impl Goal<SimWorld> for ScriptedGoal {
    fn goal_type(&self) -> GoalType {
        self.goal_type
    }

    fn category_flags(&self) -> CategoryFlags {
        self.flags.clone()
    }

    fn can_be_interrupted(&self) -> bool {
        self.interruptible
    }

    fn should_start(&mut self, cx: &mut GoalContext<'_, SimWorld>) -> GoalResult<bool> {
        let tick = cx.tick.tick;
        Ok(tick >= self.start_after && cx.rng(self.stream).chance(self.start_chance))
    }

    fn should_continue(&mut self, cx: &mut GoalContext<'_, SimWorld>) -> GoalResult<bool> {
        if self.finished(cx.tick.tick) {
            cx.world.record_completion(cx.owner, self.goal_type);
            return Ok(false);
        }
        Ok(true)
    }

    fn start(&mut self, cx: &mut GoalContext<'_, SimWorld>) -> GoalResult {
        self.started_at = Some(cx.tick.tick);
        Ok(())
    }

    fn tick(&mut self, cx: &mut GoalContext<'_, SimWorld>) -> GoalResult {
        if self.fail_on_tick == Some(cx.tick.tick) {
            anyhow::bail!("scripted failure");
        }
        cx.world.record_tick(cx.owner, self.goal_type);
        Ok(())
    }

    fn end(&mut self, _cx: &mut GoalContext<'_, SimWorld>) -> GoalResult {
        self.started_at = None;
        Ok(())
    }
}
