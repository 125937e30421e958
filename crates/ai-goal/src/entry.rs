use std::cmp::Ordering;
use std::fmt;

use ai_core::WorldMut;

use crate::{GoalHandle, GoalId, GoalType, SelectorId};

/// One registration of a goal inside a selector.
///
/// Lower `priority` values run first. Entries with equal priority keep insertion order: each
/// entry carries the selector-local insertion sequence, which breaks ties.
pub struct GoalEntry<W>
where
    W: WorldMut + 'static,
{
    priority: i32,
    sequence: u64,
    goal: GoalHandle<W>,
    selector: SelectorId,
}

impl<W> GoalEntry<W>
where
    W: WorldMut + 'static,
{
    pub(crate) fn new(
        priority: i32,
        sequence: u64,
        goal: GoalHandle<W>,
        selector: SelectorId,
    ) -> Self {
        Self {
            priority,
            sequence,
            goal,
            selector,
        }
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Insertion sequence within the owning selector.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn goal(&self) -> &GoalHandle<W> {
        &self.goal
    }

    pub fn goal_id(&self) -> GoalId {
        self.goal.id()
    }

    pub fn goal_type(&self) -> GoalType {
        self.goal.goal_type()
    }

    pub fn selector(&self) -> SelectorId {
        self.selector
    }

    /// `true` when this entry is scheduled ahead of `other`.
    pub fn precedes(&self, other: &GoalEntry<W>) -> bool {
        self.order_key() < other.order_key()
    }

    pub(crate) fn order_key(&self) -> (i32, u64) {
        (self.priority, self.sequence)
    }
}

impl<W> Clone for GoalEntry<W>
where
    W: WorldMut + 'static,
{
    fn clone(&self) -> Self {
        Self {
            priority: self.priority,
            sequence: self.sequence,
            goal: self.goal.clone(),
            selector: self.selector,
        }
    }
}

impl<W> PartialEq for GoalEntry<W>
where
    W: WorldMut + 'static,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W> Eq for GoalEntry<W> where W: WorldMut + 'static {}

impl<W> PartialOrd for GoalEntry<W>
where
    W: WorldMut + 'static,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W> Ord for GoalEntry<W>
where
    W: WorldMut + 'static,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.sequence.cmp(&other.sequence))
            .then(self.selector.cmp(&other.selector))
    }
}

impl<W> fmt::Debug for GoalEntry<W>
where
    W: WorldMut + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoalEntry")
            .field("priority", &self.priority)
            .field("sequence", &self.sequence)
            .field("goal", &self.goal)
            .field("selector", &self.selector)
            .finish()
    }
}
