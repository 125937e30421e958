#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{rng, AgentId, SplitMix64};

/// Default step length: 20 simulation ticks per second.
pub const DEFAULT_DT_SECONDS: f32 = 0.05;

/// Per-step inputs shared by every selector ticked during one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
    pub seed: u64,
}

impl TickContext {
    pub fn new(tick: u64, seed: u64) -> Self {
        Self {
            tick,
            dt_seconds: DEFAULT_DT_SECONDS,
            seed,
        }
    }

    /// Deterministic RNG stream for one agent on this tick.
    ///
    /// The same `(seed, tick, agent, stream)` always yields the same sequence, regardless of the
    /// order agents are ticked in.
    pub fn rng_for_agent<A: AgentId>(&self, agent: A, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed ^ rng::mix64(self.tick), agent.stable_id(), stream);
        SplitMix64::new(seed)
    }
}

/// Monotonic source of [`TickContext`]s for drivers and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickClock {
    next_tick: u64,
    dt_seconds: f32,
    seed: u64,
}

impl TickClock {
    pub fn new(seed: u64) -> Self {
        Self {
            next_tick: 0,
            dt_seconds: DEFAULT_DT_SECONDS,
            seed,
        }
    }

    pub fn with_dt(mut self, dt_seconds: f32) -> Self {
        self.dt_seconds = dt_seconds;
        self
    }

    pub fn starting_at(mut self, tick: u64) -> Self {
        self.next_tick = tick;
        self
    }

    /// Tick number the next call to [`advance`](Self::advance) will produce.
    pub fn peek(&self) -> u64 {
        self.next_tick
    }

    pub fn advance(&mut self) -> TickContext {
        let ctx = TickContext {
            tick: self.next_tick,
            dt_seconds: self.dt_seconds,
            seed: self.seed,
        };
        self.next_tick = self.next_tick.wrapping_add(1);
        ctx
    }
}
