//! Umbrella crate that re-exports the `ai-*` building blocks.
//!
//! Most users only need [`goal`]: a per-agent [`goal::GoalSelector`] plus the [`goal::Goal`]
//! trait. [`core`] holds the world traits and tick context goals are written against, and
//! [`tools`] the trace events the selector records.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use ai_core as core;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use ai_tools as tools;

#[cfg(feature = "goal")]
#[cfg_attr(docsrs, doc(cfg(feature = "goal")))]
pub use ai_goal as goal;
