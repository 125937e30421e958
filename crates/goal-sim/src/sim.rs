use ai_core::{TickClock, TickContext};
use ai_goal::{tick_selectors, GoalHandle, GoalSelector, SelectorConfig, TickReport};
use ai_tools::{TraceEvent, TraceLog, TraceSink, TracingSink, TRACE_LOG, TRACE_SINK};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::scenario::ScenarioConfig;
use crate::scripted::ScriptedGoal;
use crate::world::{AgentActivity, SimWorld};

/// Totals for one agent over a whole run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AgentSummary {
    pub agent: u64,
    pub started: usize,
    pub stopped: usize,
    pub preempted: usize,
    pub ticked: usize,
    pub faults: Vec<String>,
    /// Goal type ids still running after the last tick, in priority order.
    pub running: Vec<&'static str>,
    pub activity: AgentActivity,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentTrace {
    pub agent: u64,
    pub events: Vec<TraceEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub seed: u64,
    pub ticks: u64,
    pub agents: Vec<AgentSummary>,
    pub traces: Vec<AgentTrace>,
}

/// A scenario instantiated into selectors over a [`SimWorld`].
pub struct Simulation {
    world: SimWorld,
    selectors: Vec<GoalSelector<SimWorld>>,
    clock: TickClock,
    seed: u64,
}

impl Simulation {
    pub fn from_scenario(scenario: &ScenarioConfig) -> Result<Self> {
        scenario.validate()?;

        let mut selectors = Vec::with_capacity(scenario.agents.len());
        for agent in &scenario.agents {
            let config = if scenario.selector.reconcile_every_ticks > 1 {
                SelectorConfig::deterministic(agent.id, scenario.selector.reconcile_every_ticks)
                    .with_retry_faulted(scenario.selector.retry_faulted)
            } else {
                scenario.selector
            };

            let mut selector = GoalSelector::new(agent.id).with_config(config);
            selector.blackboard_mut().set(TRACE_LOG, TraceLog::default());
            for (stream, spec) in agent.goals.iter().enumerate() {
                let goal = ScriptedGoal::from_spec(spec, stream as u64)
                    .with_context(|| format!("agent {} goal #{stream}", agent.id))?;
                selector.add_task(spec.priority, GoalHandle::new(goal))?;
            }
            debug!(agent = agent.id, goals = selector.len(), "agent ready");
            selectors.push(selector);
        }

        Ok(Self {
            world: SimWorld::new(),
            selectors,
            clock: TickClock::new(scenario.seed),
            seed: scenario.seed,
        })
    }

    /// Also stream every trace event to `tracing` as it happens (visible at TRACE level).
    pub fn with_live_trace(mut self) -> Self {
        for selector in &mut self.selectors {
            let sink: Box<dyn TraceSink + Send> = Box::new(TracingSink::new(selector.owner()));
            selector.blackboard_mut().set(TRACE_SINK, sink);
        }
        self
    }

    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    /// Advances every agent by one tick.
    pub fn step(&mut self) -> (TickContext, Vec<(u64, TickReport)>) {
        let ctx = self.clock.advance();
        let reports = tick_selectors(&ctx, &mut self.world, &mut self.selectors);
        (ctx, reports)
    }

    pub fn run(&mut self, ticks: u64) -> SimReport {
        let mut summaries: Vec<AgentSummary> = self
            .selectors
            .iter()
            .map(|selector| AgentSummary {
                agent: selector.owner(),
                ..AgentSummary::default()
            })
            .collect();
        summaries.sort_by_key(|s| s.agent);

        for _ in 0..ticks {
            let (_, reports) = self.step();
            for (agent, report) in reports {
                let Some(summary) = summaries.iter_mut().find(|s| s.agent == agent) else {
                    continue;
                };
                summary.started += report.started;
                summary.stopped += report.stopped;
                summary.preempted += report.preempted;
                summary.ticked += report.ticked;
                summary
                    .faults
                    .extend(report.faults.iter().map(|fault| fault.to_string()));
            }
        }

        let mut traces = Vec::with_capacity(self.selectors.len());
        for selector in &mut self.selectors {
            let agent = selector.owner();
            if let Some(summary) = summaries.iter_mut().find(|s| s.agent == agent) {
                summary.running = selector
                    .running_tasks()
                    .map(|entry| entry.goal_type().id())
                    .collect();
                summary.activity = self.world.activity(agent).cloned().unwrap_or_default();
            }
            let events = selector
                .blackboard_mut()
                .get_mut(TRACE_LOG)
                .map(TraceLog::drain)
                .unwrap_or_default();
            traces.push(AgentTrace { agent, events });
        }

        info!(
            agents = summaries.len(),
            ticks,
            faults = summaries.iter().map(|s| s.faults.len()).sum::<usize>(),
            "simulation finished"
        );

        SimReport {
            seed: self.seed,
            ticks,
            agents: summaries,
            traces,
        }
    }
}
