//! Scenario files: which agents exist and which scripted goals each one registers.

use std::path::Path;

use ai_goal::{category_flags, goal_types, CategoryFlags, GoalType, SelectorConfig};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// The scenario used when no file is given.
pub const BUILTIN_SCENARIO: &str = include_str!("../scenarios/village.yaml");

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Global seed; every goal draws from its own stream of it.
    pub seed: u64,

    /// Number of ticks to simulate.
    pub ticks: u64,

    /// Applied to every agent's selector. The reconcile offset is derived per agent when
    /// `reconcile_every_ticks > 1`.
    pub selector: SelectorConfig,

    pub agents: Vec<AgentSpec>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            ticks: default_ticks(),
            selector: SelectorConfig::default(),
            agents: Vec::new(),
        }
    }
}

fn default_seed() -> u64 {
    0x5EED
}
fn default_ticks() -> u64 {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSpec {
    pub id: u64,

    #[serde(default)]
    pub goals: Vec<GoalSpec>,
}

/// One scripted goal. Times are in ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSpec {
    /// Catalog id, e.g. `minecraft:wander`.
    #[serde(rename = "type")]
    pub goal_type: String,

    pub priority: i32,

    /// Category flag ids (`move`, `look`, `jump`, `target`).
    #[serde(default)]
    pub flags: Vec<String>,

    /// Earliest tick the goal may start.
    #[serde(default)]
    pub start_after: u64,

    /// How long a run lasts before the goal gives up on its own. 0 runs until preempted.
    #[serde(default)]
    pub duration: u64,

    /// Chance per reconciliation that an idle goal wants to start.
    #[serde(default = "default_start_chance")]
    pub start_chance: f32,

    /// Tick on which the goal's `tick()` fails, to exercise fault handling.
    #[serde(default)]
    pub fail_on_tick: Option<u64>,

    #[serde(default = "default_interruptible")]
    pub interruptible: bool,
}

fn default_start_chance() -> f32 {
    1.0
}
fn default_interruptible() -> bool {
    true
}

impl GoalSpec {
    pub fn resolve_type(&self) -> Result<GoalType> {
        goal_types::by_id(&self.goal_type)
            .ok_or_else(|| anyhow!("unknown goal type `{}`", self.goal_type))
    }

    pub fn resolve_flags(&self) -> Result<CategoryFlags> {
        self.flags
            .iter()
            .map(|id| {
                category_flags::by_id(id).ok_or_else(|| anyhow!("unknown category flag `{id}`"))
            })
            .collect()
    }
}

impl ScenarioConfig {
    /// Load a scenario from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))
    }

    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_SCENARIO).context("Failed to parse built-in scenario")
    }

    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every goal type and flag resolves against the catalogs and agent ids are
    /// unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::BTreeSet::new();
        for agent in &self.agents {
            if !seen.insert(agent.id) {
                anyhow::bail!("agent {} is declared twice", agent.id);
            }
            for (i, goal) in agent.goals.iter().enumerate() {
                goal.resolve_type()
                    .and_then(|_| goal.resolve_flags())
                    .with_context(|| format!("agent {} goal #{i}", agent.id))?;
                if !(0.0..=1.0).contains(&goal.start_chance) {
                    anyhow::bail!(
                        "agent {} goal #{i}: start_chance {} is outside [0, 1]",
                        agent.id,
                        goal.start_chance
                    );
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_scenario_is_valid() {
        let config = ScenarioConfig::builtin().unwrap();
        assert_eq!(config.agents.len(), 3);
        assert_eq!(config.selector.reconcile_every_ticks, 2);
        assert!(!config.selector.retry_faulted);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = ScenarioConfig::parse(
            "agents:\n  - id: 4\n    goals:\n      - type: minecraft:wander\n        priority: 3\n",
        )
        .unwrap();
        assert_eq!(config.seed, 0x5EED);
        assert_eq!(config.ticks, 100);
        let goal = &config.agents[0].goals[0];
        assert_eq!(goal.start_chance, 1.0);
        assert!(goal.interruptible);
        assert!(goal.resolve_flags().unwrap().is_empty());
    }

    #[test]
    fn unknown_catalog_ids_are_rejected() {
        let err = ScenarioConfig::parse(
            "agents:\n  - id: 1\n    goals:\n      - type: minecraft:fly\n        priority: 0\n",
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("unknown goal type `minecraft:fly`"));

        let err = ScenarioConfig::parse(
            "agents:\n  - id: 1\n    goals:\n      - type: minecraft:wander\n        priority: 0\n        flags: [hover]\n",
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("unknown category flag `hover`"));
    }

    #[test]
    fn duplicate_agents_are_rejected() {
        let err = ScenarioConfig::parse("agents:\n  - id: 1\n  - id: 1\n").unwrap_err();
        assert!(err.to_string().contains("declared twice"));
    }
}
