use std::fmt;

use ai_core::WorldMut;

use crate::{GoalHandle, GoalType};

/// A selector mutation requested from inside a lifecycle call.
pub enum SelectorCommand<W>
where
    W: WorldMut + 'static,
{
    Add { priority: i32, goal: GoalHandle<W> },
    Remove(GoalHandle<W>),
    RemoveType(GoalType),
    Clear,
}

impl<W> fmt::Debug for SelectorCommand<W>
where
    W: WorldMut + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add { priority, goal } => f
                .debug_struct("Add")
                .field("priority", priority)
                .field("goal", goal)
                .finish(),
            Self::Remove(goal) => f.debug_tuple("Remove").field(goal).finish(),
            Self::RemoveType(goal_type) => f.debug_tuple("RemoveType").field(goal_type).finish(),
            Self::Clear => f.write_str("Clear"),
        }
    }
}

/// Queue of selector mutations.
///
/// A selector cannot be mutated while it reconciles, so goals queue changes here instead. The
/// queue is applied in order right after the update pass of the same tick; removals still call
/// `end()` on running entries. Commands queued while the queue is being applied (for example by
/// an `end()` hook) wait for the next tick.
pub struct SelectorCommands<W>
where
    W: WorldMut + 'static,
{
    queue: Vec<SelectorCommand<W>>,
}

impl<W> SelectorCommands<W>
where
    W: WorldMut + 'static,
{
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn add_task(&mut self, priority: i32, goal: GoalHandle<W>) -> &mut Self {
        self.queue.push(SelectorCommand::Add { priority, goal });
        self
    }

    pub fn remove_task(&mut self, goal: &GoalHandle<W>) -> &mut Self {
        self.queue.push(SelectorCommand::Remove(goal.clone()));
        self
    }

    pub fn remove_tasks(&mut self, goal_type: GoalType) -> &mut Self {
        self.queue.push(SelectorCommand::RemoveType(goal_type));
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.queue.push(SelectorCommand::Clear);
        self
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectorCommand<W>> + '_ {
        self.queue.iter()
    }

    pub(crate) fn take(&mut self) -> Vec<SelectorCommand<W>> {
        std::mem::take(&mut self.queue)
    }
}

impl<W> Default for SelectorCommands<W>
where
    W: WorldMut + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
