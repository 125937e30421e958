//! Tooling primitives for deterministic goal scheduling.
//!
//! Trace events are recorded during simulation (into the agent blackboard) and rendered later by
//! tooling. They are independent of the `tracing` logs libraries emit; [`TracingSink`] bridges
//! the two when a live log view is wanted.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod tags;
pub mod trace;

pub use trace::{emit, TraceEvent, TraceLog, TraceSink, TracingSink, TRACE_LOG, TRACE_SINK};
