use ai_core::WorldMut;

use crate::{CategoryFlags, Goal, GoalCategoryFlag, GoalContext, GoalResult, GoalType};

type Predicate<W> = Box<dyn FnMut(&mut GoalContext<'_, W>) -> GoalResult<bool> + Send>;
type Hook<W> = Box<dyn FnMut(&mut GoalContext<'_, W>) -> GoalResult + Send>;

/// Goal assembled from closures.
///
/// Handy for small or data-driven goals that do not warrant their own type:
///
/// ```
/// use ai_core::{WorldMut, WorldView};
/// use ai_goal::{category_flags::LOOK, goal_types, FnGoal};
///
/// struct World;
/// impl WorldView for World {
///     type Agent = u64;
/// }
/// impl WorldMut for World {}
///
/// let look_idle = FnGoal::<World>::new(goal_types::LOOK_IDLE)
///     .flags([LOOK])
///     .should_start(|cx| Ok(cx.tick.tick % 20 == 0))
///     .should_continue(|_| Ok(false));
/// # let _ = look_idle;
/// ```
pub struct FnGoal<W>
where
    W: WorldMut + 'static,
{
    goal_type: GoalType,
    flags: CategoryFlags,
    interruptible: Box<dyn Fn() -> bool + Send + Sync>,
    should_start: Predicate<W>,
    should_continue: Option<Predicate<W>>,
    on_start: Option<Hook<W>>,
    on_tick: Option<Hook<W>>,
    on_end: Option<Hook<W>>,
}

impl<W> FnGoal<W>
where
    W: WorldMut + 'static,
{
    /// A goal of `goal_type` that claims no flags and never wants to start.
    pub fn new(goal_type: GoalType) -> Self {
        Self {
            goal_type,
            flags: CategoryFlags::new(),
            interruptible: Box::new(|| true),
            should_start: Box::new(|_| Ok(false)),
            should_continue: None,
            on_start: None,
            on_tick: None,
            on_end: None,
        }
    }

    pub fn flags(mut self, flags: impl IntoIterator<Item = GoalCategoryFlag>) -> Self {
        self.flags = flags.into_iter().collect();
        self
    }

    pub fn interruptible(mut self, interruptible: bool) -> Self {
        self.interruptible = Box::new(move || interruptible);
        self
    }

    /// Interruptibility re-evaluated every tick, e.g. from a shared atomic.
    pub fn interruptible_when(mut self, f: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.interruptible = Box::new(f);
        self
    }

    pub fn should_start(
        mut self,
        f: impl FnMut(&mut GoalContext<'_, W>) -> GoalResult<bool> + Send + 'static,
    ) -> Self {
        self.should_start = Box::new(f);
        self
    }

    /// Without this, continuation re-uses the `should_start` predicate.
    pub fn should_continue(
        mut self,
        f: impl FnMut(&mut GoalContext<'_, W>) -> GoalResult<bool> + Send + 'static,
    ) -> Self {
        self.should_continue = Some(Box::new(f));
        self
    }

    pub fn on_start(
        mut self,
        f: impl FnMut(&mut GoalContext<'_, W>) -> GoalResult + Send + 'static,
    ) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    pub fn on_tick(
        mut self,
        f: impl FnMut(&mut GoalContext<'_, W>) -> GoalResult + Send + 'static,
    ) -> Self {
        self.on_tick = Some(Box::new(f));
        self
    }

    pub fn on_end(
        mut self,
        f: impl FnMut(&mut GoalContext<'_, W>) -> GoalResult + Send + 'static,
    ) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }
}

impl<W> Goal<W> for FnGoal<W>
where
    W: WorldMut + 'static,
{
    fn goal_type(&self) -> GoalType {
        self.goal_type
    }

    fn category_flags(&self) -> CategoryFlags {
        self.flags.clone()
    }

    fn can_be_interrupted(&self) -> bool {
        (self.interruptible)()
    }

    fn should_start(&mut self, cx: &mut GoalContext<'_, W>) -> GoalResult<bool> {
        (self.should_start)(cx)
    }

    fn should_continue(&mut self, cx: &mut GoalContext<'_, W>) -> GoalResult<bool> {
        match self.should_continue.as_mut() {
            Some(f) => f(cx),
            None => (self.should_start)(cx),
        }
    }

    fn start(&mut self, cx: &mut GoalContext<'_, W>) -> GoalResult {
        match self.on_start.as_mut() {
            Some(f) => f(cx),
            None => Ok(()),
        }
    }

    fn tick(&mut self, cx: &mut GoalContext<'_, W>) -> GoalResult {
        match self.on_tick.as_mut() {
            Some(f) => f(cx),
            None => Ok(()),
        }
    }

    fn end(&mut self, cx: &mut GoalContext<'_, W>) -> GoalResult {
        match self.on_end.as_mut() {
            Some(f) => f(cx),
            None => Ok(()),
        }
    }
}
