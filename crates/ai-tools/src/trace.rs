#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use ai_core::{BbKey, Blackboard};

/// A small, allocation-friendly trace event.
///
/// "Dumb data": recorded during simulation and rendered later. The meaning of `a` and `b` is
/// fixed per tag (see [`crate::tags`]).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub a: u64,
    pub b: u64,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            a: 0,
            b: 0,
        }
    }

    pub fn with_a(mut self, a: u64) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: u64) -> Self {
        self.b = b;
        self
    }

    /// Store a signed value in `b` (priorities can be negative).
    pub fn with_b_signed(self, b: i64) -> Self {
        self.with_b(b as u64)
    }

    pub fn b_signed(&self) -> i64 {
        self.b as i64
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

/// Forwards events to `tracing` at TRACE level, tagged with the agent they belong to.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink {
    pub agent: u64,
}

impl TracingSink {
    pub fn new(agent: u64) -> Self {
        Self { agent }
    }
}

impl TraceSink for TracingSink {
    fn emit(&mut self, event: TraceEvent) {
        tracing::trace!(
            agent = self.agent,
            tick = event.tick,
            tag = %event.tag,
            a = event.a,
            b = event.b,
            "trace event"
        );
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }

    pub fn count(&self, tag: &str) -> usize {
        self.with_tag(tag).count()
    }

    pub fn drain(&mut self) -> Vec<TraceEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Blackboard key for collecting events in-memory.
pub const TRACE_LOG: BbKey<TraceLog> = BbKey::new(0xA11D_7ACE_0000_0001);
/// Blackboard key for streaming events into a user-provided sink.
pub const TRACE_SINK: BbKey<Box<dyn TraceSink + Send>> = BbKey::new(0xA11D_7ACE_0000_0002);

/// Records `event` into whichever of [`TRACE_LOG`] / [`TRACE_SINK`] the blackboard holds.
pub fn emit(blackboard: &mut Blackboard, event: TraceEvent) {
    if let Some(log) = blackboard.get_mut(TRACE_LOG) {
        log.push(event.clone());
    }
    if let Some(sink) = blackboard.get_mut(TRACE_SINK) {
        sink.emit(event);
    }
}
