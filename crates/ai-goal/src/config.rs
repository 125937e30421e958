#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ai_core::AgentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectorConfig {
    /// Full reconciliation (preemption and new starts) runs every N ticks. On the ticks in
    /// between, running goals are still checked with `should_continue` and ticked.
    pub reconcile_every_ticks: u32,
    pub reconcile_offset_ticks: u32,

    /// Whether an entry whose lifecycle call failed may start again on a later reconciliation.
    ///
    /// When `false` the entry stays quarantined until
    /// [`GoalSelector::reset_faults`](crate::GoalSelector::reset_faults).
    pub retry_faulted: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            reconcile_every_ticks: 1,
            reconcile_offset_ticks: 0,
            retry_faulted: false,
        }
    }
}

impl SelectorConfig {
    /// Reconcile every `every` ticks, with the phase derived from the agent id so that agents
    /// created together do not all reconcile on the same tick.
    pub fn deterministic(agent: impl AgentId, every: u32) -> Self {
        let every = every.max(1);
        let offset = (agent.stable_id() % (every as u64)) as u32;
        Self {
            reconcile_every_ticks: every,
            reconcile_offset_ticks: offset,
            ..Self::default()
        }
    }

    pub fn with_retry_faulted(mut self, retry_faulted: bool) -> Self {
        self.retry_faulted = retry_faulted;
        self
    }

    pub fn should_reconcile(&self, tick: u64) -> bool {
        let every = self.reconcile_every_ticks.max(1) as u64;
        tick.wrapping_add(self.reconcile_offset_ticks as u64) % every == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reconciles_every_tick() {
        let config = SelectorConfig::default();
        assert!((0..10).all(|t| config.should_reconcile(t)));
    }

    #[test]
    fn deterministic_spreads_agents() {
        let a = SelectorConfig::deterministic(0u64, 3);
        let b = SelectorConfig::deterministic(1u64, 3);

        let a_ticks: Vec<u64> = (0..6).filter(|&t| a.should_reconcile(t)).collect();
        let b_ticks: Vec<u64> = (0..6).filter(|&t| b.should_reconcile(t)).collect();
        assert_eq!(a_ticks, vec![0, 3]);
        assert_eq!(b_ticks, vec![2, 5]);
    }

    #[test]
    fn zero_interval_is_treated_as_one() {
        let config = SelectorConfig {
            reconcile_every_ticks: 0,
            ..SelectorConfig::default()
        };
        assert!(config.should_reconcile(7));
    }

    #[test]
    fn offset_wraps_at_the_end_of_the_tick_range() {
        let config = SelectorConfig {
            reconcile_every_ticks: 2,
            reconcile_offset_ticks: 1,
            ..SelectorConfig::default()
        };
        assert!(config.should_reconcile(u64::MAX));
        assert!(!config.should_reconcile(u64::MAX - 1));
    }
}
