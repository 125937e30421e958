//! Scripted scenario runner for the goal scheduler.
//!
//! A scenario (YAML) declares agents and the scripted goals each one registers. The runner builds
//! one [`ai_goal::GoalSelector`] per agent, ticks them all, and summarizes starts, stops,
//! preemptions and faults, optionally with the full trace log.

#![forbid(unsafe_code)]

pub mod scenario;
pub mod scripted;
pub mod sim;
pub mod world;

pub use scenario::{AgentSpec, GoalSpec, ScenarioConfig, BUILTIN_SCENARIO};
pub use scripted::ScriptedGoal;
pub use sim::{AgentSummary, AgentTrace, SimReport, Simulation};
pub use world::{AgentActivity, SimWorld};
