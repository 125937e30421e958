use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SELECTOR_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_GOAL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`GoalSelector`](crate::GoalSelector).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectorId(u64);

impl SelectorId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SELECTOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SelectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "selector#{}", self.0)
    }
}

/// Process-unique identity of a goal instance (one per [`GoalHandle`](crate::GoalHandle)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GoalId(u64);

impl GoalId {
    pub(crate) fn next() -> Self {
        Self(NEXT_GOAL_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "goal#{}", self.0)
    }
}
