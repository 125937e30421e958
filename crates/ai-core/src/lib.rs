//! Deterministic, engine-agnostic kernel primitives.
//!
//! Everything here is shared by the goal scheduler and its tooling: agent identity, the per-step
//! tick context, the world access traits, the per-agent blackboard and a small seeded RNG.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod blackboard;
pub mod rng;
pub mod tick;
pub mod world;

pub use agent::AgentId;
pub use blackboard::{BbKey, Blackboard, BlackboardError};
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::{TickClock, TickContext};
pub use world::{WorldMut, WorldView};
