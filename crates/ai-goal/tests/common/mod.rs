#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ai_core::{TickContext, WorldMut, WorldView};
use ai_goal::{
    goal_types, CategoryFlags, Goal, GoalCategoryFlag, GoalContext, GoalHandle, GoalResult,
    GoalSelector, GoalType, LifecyclePhase, TickReport,
};

pub const SEED: u64 = 0xC0FF_EE00;

pub fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, SEED)
}

/// World that records every `start`/`tick`/`end` call as `"<goal>:<phase>"`.
#[derive(Debug, Default)]
pub struct LogWorld {
    pub log: Vec<String>,
}

impl LogWorld {
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.log)
    }

    pub fn count(&self, line: &str) -> usize {
        self.log.iter().filter(|l| *l == line).count()
    }
}

impl WorldView for LogWorld {
    type Agent = u64;
}

impl WorldMut for LogWorld {}

/// Shared boolean the test flips while the goal lives inside a selector.
#[derive(Debug, Clone)]
pub struct Switch(Arc<AtomicBool>);

impl Switch {
    pub fn new(on: bool) -> Self {
        Self(Arc::new(AtomicBool::new(on)))
    }

    pub fn set(&self, on: bool) {
        self.0.store(on, Ordering::SeqCst);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct Probe {
    name: &'static str,
    goal_type: GoalType,
    flags: CategoryFlags,
    pub want: Switch,
    pub interruptible: Switch,
    fail_in: Option<LifecyclePhase>,
}

impl Probe {
    pub fn new(name: &'static str, flags: &[GoalCategoryFlag]) -> Self {
        Self {
            name,
            goal_type: goal_types::WANDER,
            flags: flags.iter().copied().collect(),
            want: Switch::new(true),
            interruptible: Switch::new(true),
            fail_in: None,
        }
    }

    pub fn of_type(mut self, goal_type: GoalType) -> Self {
        self.goal_type = goal_type;
        self
    }

    pub fn failing_in(mut self, phase: LifecyclePhase) -> Self {
        self.fail_in = Some(phase);
        self
    }

    pub fn handle(self) -> GoalHandle<LogWorld> {
        GoalHandle::new(self)
    }

    fn check(&self, phase: LifecyclePhase) -> GoalResult {
        if self.fail_in == Some(phase) {
            anyhow::bail!("{} refused in {phase}", self.name);
        }
        Ok(())
    }
}

impl Goal<LogWorld> for Probe {
    fn goal_type(&self) -> GoalType {
        self.goal_type
    }

    fn category_flags(&self) -> CategoryFlags {
        self.flags.clone()
    }

    fn can_be_interrupted(&self) -> bool {
        self.interruptible.get()
    }

    fn should_start(&mut self, _cx: &mut GoalContext<'_, LogWorld>) -> GoalResult<bool> {
        self.check(LifecyclePhase::ShouldStart)?;
        Ok(self.want.get())
    }

    fn should_continue(&mut self, _cx: &mut GoalContext<'_, LogWorld>) -> GoalResult<bool> {
        self.check(LifecyclePhase::ShouldContinue)?;
        Ok(self.want.get())
    }

    fn start(&mut self, cx: &mut GoalContext<'_, LogWorld>) -> GoalResult {
        self.check(LifecyclePhase::Start)?;
        cx.world.log.push(format!("{}:start", self.name));
        Ok(())
    }

    fn tick(&mut self, cx: &mut GoalContext<'_, LogWorld>) -> GoalResult {
        self.check(LifecyclePhase::Tick)?;
        cx.world.log.push(format!("{}:tick", self.name));
        Ok(())
    }

    fn end(&mut self, cx: &mut GoalContext<'_, LogWorld>) -> GoalResult {
        self.check(LifecyclePhase::End)?;
        cx.world.log.push(format!("{}:end", self.name));
        Ok(())
    }
}

pub fn run(
    selector: &mut GoalSelector<LogWorld>,
    world: &mut LogWorld,
    ticks: std::ops::Range<u64>,
) -> Vec<TickReport> {
    ticks.map(|t| selector.tick(&ctx(t), world)).collect()
}
