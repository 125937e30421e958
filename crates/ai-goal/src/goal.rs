use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ai_core::{Blackboard, SplitMix64, TickContext, WorldMut};

use crate::{CategoryFlags, GoalId, GoalType, SelectorCommands, SelectorId};

/// Result type of goal lifecycle calls. Any error counts as a fault of that goal.
pub type GoalResult<T = ()> = anyhow::Result<T>;

/// Everything a goal can touch during one lifecycle call.
pub struct GoalContext<'a, W>
where
    W: WorldMut + 'static,
{
    pub tick: &'a TickContext,
    pub owner: W::Agent,
    pub selector: SelectorId,
    pub world: &'a mut W,
    /// Blackboard of the owning selector, shared by all of its goals.
    pub blackboard: &'a mut Blackboard,
    /// Mutations of the owning selector, applied after this tick's update pass.
    pub commands: &'a mut SelectorCommands<W>,
}

impl<W> GoalContext<'_, W>
where
    W: WorldMut + 'static,
{
    /// Deterministic RNG for the owner on this tick.
    pub fn rng(&self, stream: u64) -> SplitMix64 {
        self.tick.rng_for_agent(self.owner, stream)
    }
}

/// A schedulable behavior of one agent.
///
/// A goal entry is either Idle or Running. The selector calls `should_start` only while Idle and
/// `should_continue` only while Running; `start` and `end` bracket every run, with `tick` called
/// once per simulation step in between.
///
/// `category_flags` is read when the entry starts and held for the whole run.
/// `can_be_interrupted` is re-read every tick.
pub trait Goal<W>: Send + 'static
where
    W: WorldMut + 'static,
{
    fn goal_type(&self) -> GoalType;

    fn category_flags(&self) -> CategoryFlags {
        CategoryFlags::new()
    }

    fn can_be_interrupted(&self) -> bool {
        true
    }

    fn should_start(&mut self, cx: &mut GoalContext<'_, W>) -> GoalResult<bool>;

    fn should_continue(&mut self, cx: &mut GoalContext<'_, W>) -> GoalResult<bool> {
        self.should_start(cx)
    }

    fn start(&mut self, _cx: &mut GoalContext<'_, W>) -> GoalResult {
        Ok(())
    }

    fn tick(&mut self, _cx: &mut GoalContext<'_, W>) -> GoalResult {
        Ok(())
    }

    fn end(&mut self, _cx: &mut GoalContext<'_, W>) -> GoalResult {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct Claim {
    selector: SelectorId,
    entries: u32,
}

struct GoalInner<W>
where
    W: WorldMut + 'static,
{
    goal: Box<dyn Goal<W>>,
    claim: Option<Claim>,
}

struct GoalCell<W>
where
    W: WorldMut + 'static,
{
    id: GoalId,
    goal_type: GoalType,
    inner: Mutex<GoalInner<W>>,
}

/// Shared handle to one goal instance.
///
/// Handle identity is goal identity: clones refer to the same instance, and
/// [`GoalSelector::remove_task`](crate::GoalSelector::remove_task) matches by it. The same
/// instance may be registered several times, but only one selector can run it at a time.
///
/// Calls into the goal lock it, so a goal must not query its own handle from inside a lifecycle
/// method.
pub struct GoalHandle<W>
where
    W: WorldMut + 'static,
{
    cell: Arc<GoalCell<W>>,
}

impl<W> GoalHandle<W>
where
    W: WorldMut + 'static,
{
    pub fn new(goal: impl Goal<W>) -> Self {
        Self::from_box(Box::new(goal))
    }

    pub fn from_box(goal: Box<dyn Goal<W>>) -> Self {
        let goal_type = goal.goal_type();
        Self {
            cell: Arc::new(GoalCell {
                id: GoalId::next(),
                goal_type,
                inner: Mutex::new(GoalInner { goal, claim: None }),
            }),
        }
    }

    pub fn id(&self) -> GoalId {
        self.cell.id
    }

    /// Type reported by the goal at construction. Goal types never change.
    pub fn goal_type(&self) -> GoalType {
        self.cell.goal_type
    }

    /// Selector currently running this goal, if any.
    pub fn running_in(&self) -> Option<SelectorId> {
        self.lock().claim.map(|c| c.selector)
    }

    pub fn is_running(&self) -> bool {
        self.running_in().is_some()
    }

    pub fn category_flags(&self) -> CategoryFlags {
        self.lock().goal.category_flags()
    }

    pub fn can_be_interrupted(&self) -> bool {
        self.lock().goal.can_be_interrupted()
    }

    pub fn same_goal(&self, other: &GoalHandle<W>) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }

    /// Direct access to the goal, e.g. to reconfigure it between ticks.
    pub fn with_goal<R>(&self, f: impl FnOnce(&mut dyn Goal<W>) -> R) -> R {
        let mut inner = self.lock();
        f(inner.goal.as_mut())
    }

    // A goal that panicked mid-call leaves the mutex poisoned; its bookkeeping is still usable.
    fn lock(&self) -> MutexGuard<'_, GoalInner<W>> {
        self.cell.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks one more entry of `selector` as running this goal. Fails when another selector holds
    /// the goal.
    pub(crate) fn try_claim(&self, selector: SelectorId) -> bool {
        let mut inner = self.lock();
        match inner.claim.as_mut() {
            None => {
                inner.claim = Some(Claim {
                    selector,
                    entries: 1,
                });
                true
            }
            Some(claim) if claim.selector == selector => {
                claim.entries += 1;
                true
            }
            Some(_) => false,
        }
    }

    pub(crate) fn release(&self, selector: SelectorId) {
        let mut inner = self.lock();
        let Some(claim) = inner.claim.as_mut() else {
            return;
        };
        if claim.selector != selector {
            return;
        }
        claim.entries = claim.entries.saturating_sub(1);
        if claim.entries == 0 {
            inner.claim = None;
        }
    }

    pub(crate) fn should_start(&self, cx: &mut GoalContext<'_, W>) -> GoalResult<bool> {
        self.lock().goal.should_start(cx)
    }

    pub(crate) fn should_continue(&self, cx: &mut GoalContext<'_, W>) -> GoalResult<bool> {
        self.lock().goal.should_continue(cx)
    }

    pub(crate) fn start(&self, cx: &mut GoalContext<'_, W>) -> GoalResult {
        self.lock().goal.start(cx)
    }

    pub(crate) fn tick(&self, cx: &mut GoalContext<'_, W>) -> GoalResult {
        self.lock().goal.tick(cx)
    }

    pub(crate) fn end(&self, cx: &mut GoalContext<'_, W>) -> GoalResult {
        self.lock().goal.end(cx)
    }
}

impl<W> Clone for GoalHandle<W>
where
    W: WorldMut + 'static,
{
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<W> PartialEq for GoalHandle<W>
where
    W: WorldMut + 'static,
{
    fn eq(&self, other: &Self) -> bool {
        self.same_goal(other)
    }
}

impl<W> Eq for GoalHandle<W> where W: WorldMut + 'static {}

impl<W> fmt::Debug for GoalHandle<W>
where
    W: WorldMut + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoalHandle")
            .field("id", &self.cell.id)
            .field("goal_type", &self.cell.goal_type)
            .finish()
    }
}
