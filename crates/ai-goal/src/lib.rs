//! Goal scheduling for autonomous agents.
//!
//! Each agent owns a [`GoalSelector`] holding prioritized [`GoalEntry`]s. Every tick the selector
//! decides which goals run: lower priority values win, and two running goals never share a
//! [`GoalCategoryFlag`] (movement, look, jump, ...). A goal takes a flag away from a running goal
//! only when it has strictly higher priority and the running goal reports itself interruptible.
//!
//! Goals are plain trait objects ([`Goal`]) behind shared [`GoalHandle`]s. Lifecycle calls return
//! [`GoalResult`]; an error is contained to the failing entry and reported as a [`GoalFault`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod category_flags;
mod commands;
mod config;
mod driver;
mod entry;
mod error;
mod flags;
mod fn_goal;
mod goal;
mod goal_type;
pub mod goal_types;
mod ids;
mod report;
mod selector;

pub use commands::{SelectorCommand, SelectorCommands};
pub use config::SelectorConfig;
pub use driver::tick_selectors;
pub use entry::GoalEntry;
pub use error::{GoalFault, LifecyclePhase, SelectorError};
pub use flags::{CategoryFlags, GoalCategoryFlag};
pub use fn_goal::FnGoal;
pub use goal::{Goal, GoalContext, GoalHandle, GoalResult};
pub use goal_type::GoalType;
pub use ids::{GoalId, SelectorId};
pub use report::TickReport;
pub use selector::GoalSelector;
