use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use ai_core::{Blackboard, TickContext, WorldMut};
use ai_tools::{emit as trace_emit, tags, TraceEvent};
use tracing::{debug, trace, warn};

use crate::{
    CategoryFlags, GoalCategoryFlag, GoalContext, GoalEntry, GoalFault, GoalHandle, GoalId,
    GoalType, LifecyclePhase, SelectorCommand, SelectorCommands, SelectorConfig, SelectorError,
    SelectorId, TickReport,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum SlotState {
    Idle,
    /// Flags are the snapshot taken at start; they stay claimed until the entry stops.
    Running { claimed: CategoryFlags },
    Faulted,
}

struct Slot<W>
where
    W: WorldMut + 'static,
{
    entry: GoalEntry<W>,
    state: SlotState,
}

impl<W> Slot<W>
where
    W: WorldMut + 'static,
{
    fn is_running(&self) -> bool {
        matches!(self.state, SlotState::Running { .. })
    }
}

/// Why a running slot is being stopped this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopCause {
    Yielded,
    Faulted,
    Preempted { by: GoalId },
}

/// Per-agent goal container and scheduler.
///
/// Entries are kept sorted by `(priority, insertion sequence)`; lower priorities run first. Each
/// call to [`tick`](Self::tick) reconciles which entries run:
///
/// 1. running entries that no longer want to continue are marked for stopping;
/// 2. marked entries are ended and their flags released;
/// 3. idle entries are started highest priority first when their flags are free, or held only by
///    lower-priority interruptible entries, which are ended once the new entry has started;
/// 4. every running entry is ticked.
///
/// No two running entries ever share a category flag between ticks.
pub struct GoalSelector<W>
where
    W: WorldMut + 'static,
{
    id: SelectorId,
    owner: W::Agent,
    config: SelectorConfig,
    slots: Vec<Slot<W>>,
    next_sequence: u64,
    blackboard: Blackboard,
    commands: SelectorCommands<W>,
}

impl<W> GoalSelector<W>
where
    W: WorldMut + 'static,
{
    pub fn new(owner: W::Agent) -> Self {
        Self {
            id: SelectorId::next(),
            owner,
            config: SelectorConfig::default(),
            slots: Vec::new(),
            next_sequence: 0,
            blackboard: Blackboard::new(),
            commands: SelectorCommands::new(),
        }
    }

    pub fn with_config(mut self, config: SelectorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn id(&self) -> SelectorId {
        self.id
    }

    pub fn owner(&self) -> W::Agent {
        self.owner
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SelectorConfig) {
        self.config = config;
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All entries in scheduling order.
    pub fn tasks(&self) -> impl Iterator<Item = &GoalEntry<W>> + '_ {
        self.slots.iter().map(|s| &s.entry)
    }

    pub fn tasks_by_type(&self, goal_type: GoalType) -> impl Iterator<Item = &GoalEntry<W>> + '_ {
        self.tasks().filter(move |e| e.goal_type() == goal_type)
    }

    pub fn running_tasks(&self) -> impl Iterator<Item = &GoalEntry<W>> + '_ {
        self.slots
            .iter()
            .filter(|s| s.is_running())
            .map(|s| &s.entry)
    }

    /// `true` when any entry of `goal` is running in this selector.
    pub fn is_running(&self, goal: &GoalHandle<W>) -> bool {
        self.slots
            .iter()
            .any(|s| s.is_running() && s.entry.goal().same_goal(goal))
    }

    /// `true` when any entry of `goal` is quarantined after a lifecycle fault.
    pub fn is_faulted(&self, goal: &GoalHandle<W>) -> bool {
        self.slots
            .iter()
            .any(|s| s.state == SlotState::Faulted && s.entry.goal().same_goal(goal))
    }

    /// Returns every quarantined entry to Idle. Returns how many were reset.
    pub fn reset_faults(&mut self) -> usize {
        let mut reset = 0;
        for slot in &mut self.slots {
            if slot.state == SlotState::Faulted {
                slot.state = SlotState::Idle;
                reset += 1;
            }
        }
        reset
    }

    /// Registers `goal` at `priority`. The entry is first considered on the next tick.
    ///
    /// Fails when the goal is currently running in another selector.
    pub fn add_task(
        &mut self,
        priority: i32,
        goal: GoalHandle<W>,
    ) -> Result<&mut Self, SelectorError> {
        if let Some(running_in) = goal.running_in().filter(|&s| s != self.id) {
            return Err(SelectorError::GoalRunningElsewhere {
                goal: goal.id(),
                goal_type: goal.goal_type(),
                running_in,
            });
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        debug!(
            selector = %self.id,
            owner = ?self.owner,
            goal = %goal.id(),
            goal_type = %goal.goal_type(),
            priority,
            "goal added"
        );

        let index = self.slots.partition_point(|s| s.entry.priority() <= priority);
        self.slots.insert(
            index,
            Slot {
                entry: GoalEntry::new(priority, sequence, goal, self.id),
                state: SlotState::Idle,
            },
        );
        Ok(self)
    }

    /// Removes the first entry (in scheduling order) of `goal`, ending it first if it runs.
    pub fn remove_task(
        &mut self,
        goal: &GoalHandle<W>,
        ctx: &TickContext,
        world: &mut W,
    ) -> Option<GoalEntry<W>> {
        let index = self
            .slots
            .iter()
            .position(|s| s.entry.goal().same_goal(goal))?;
        let (entry, _) = self.evict(index, ctx, world, &mut Vec::new());
        Some(entry)
    }

    /// Removes every entry of `goal_type` in scheduling order, ending the running ones.
    pub fn remove_tasks(
        &mut self,
        goal_type: GoalType,
        ctx: &TickContext,
        world: &mut W,
    ) -> Vec<GoalEntry<W>> {
        self.evict_type(goal_type, ctx, world, &mut Vec::new())
    }

    /// Ends every running entry in scheduling order and removes all entries. Returns the number
    /// of entries that were ended.
    pub fn clear(&mut self, ctx: &TickContext, world: &mut W) -> usize {
        self.evict_all(ctx, world, &mut Vec::new())
    }

    /// Runs one reconciliation for this agent.
    pub fn tick(&mut self, ctx: &TickContext, world: &mut W) -> TickReport {
        let reconcile = self.config.should_reconcile(ctx.tick);
        let mut report = TickReport::new(ctx.tick, reconcile);

        {
            let Self {
                id,
                owner,
                config,
                slots,
                blackboard,
                commands,
                ..
            } = self;
            let mut cx = GoalContext {
                tick: ctx,
                owner: *owner,
                selector: *id,
                world: &mut *world,
                blackboard,
                commands,
            };
            let mut pass = Reconciler {
                selector: *id,
                config: *config,
                slots,
                report: &mut report,
            };

            let stops = pass.continuation(&mut cx);
            pass.stop(&mut cx, &stops);
            if reconcile {
                pass.start(&mut cx);
            }
            pass.update(&mut cx);
        }

        self.apply_commands(ctx, world, &mut report);

        trace!(
            selector = %self.id,
            owner = ?self.owner,
            tick = ctx.tick,
            reconciled = report.reconciled,
            started = report.started,
            stopped = report.stopped,
            ticked = report.ticked,
            faults = report.faults.len(),
            "selector ticked"
        );
        report
    }

    fn apply_commands(&mut self, ctx: &TickContext, world: &mut W, report: &mut TickReport) {
        for command in self.commands.take() {
            match command {
                SelectorCommand::Add { priority, goal } => {
                    let added = self.add_task(priority, goal).map(|_| ());
                    if let Err(err) = added {
                        warn!(selector = %self.id, owner = ?self.owner, %err, "queued add rejected");
                        report.rejected.push(err);
                    }
                }
                SelectorCommand::Remove(goal) => {
                    let index = self
                        .slots
                        .iter()
                        .position(|s| s.entry.goal().same_goal(&goal));
                    if let Some(index) = index {
                        self.evict(index, ctx, world, &mut report.faults);
                        report.removed += 1;
                    }
                }
                SelectorCommand::RemoveType(goal_type) => {
                    let removed = self.evict_type(goal_type, ctx, world, &mut report.faults);
                    report.removed += removed.len();
                }
                SelectorCommand::Clear => {
                    report.removed += self.slots.len();
                    self.evict_all(ctx, world, &mut report.faults);
                }
            }
        }
    }

    fn evict_type(
        &mut self,
        goal_type: GoalType,
        ctx: &TickContext,
        world: &mut W,
        faults: &mut Vec<GoalFault>,
    ) -> Vec<GoalEntry<W>> {
        let mut removed = Vec::new();
        while let Some(index) = self
            .slots
            .iter()
            .position(|s| s.entry.goal_type() == goal_type)
        {
            let (entry, _) = self.evict(index, ctx, world, faults);
            removed.push(entry);
        }
        removed
    }

    fn evict_all(
        &mut self,
        ctx: &TickContext,
        world: &mut W,
        faults: &mut Vec<GoalFault>,
    ) -> usize {
        let mut ended = 0;
        while !self.slots.is_empty() {
            let (_, was_running) = self.evict(0, ctx, world, faults);
            if was_running {
                ended += 1;
            }
        }
        ended
    }

    /// Removes the slot at `index`, ending it first when it is running.
    fn evict(
        &mut self,
        index: usize,
        ctx: &TickContext,
        world: &mut W,
        faults: &mut Vec<GoalFault>,
    ) -> (GoalEntry<W>, bool) {
        let slot = self.slots.remove(index);
        let was_running = slot.is_running();
        let mut cx = GoalContext {
            tick: ctx,
            owner: self.owner,
            selector: self.id,
            world,
            blackboard: &mut self.blackboard,
            commands: &mut self.commands,
        };

        if was_running {
            let goal = slot.entry.goal();
            if let Err(error) = goal.end(&mut cx) {
                record_fault(faults, &mut cx, &slot.entry, LifecyclePhase::End, error);
            }
            goal.release(self.id);
        }

        trace_emit(
            cx.blackboard,
            TraceEvent::new(ctx.tick, tags::GOAL_REMOVE)
                .with_a(slot.entry.goal_id().get())
                .with_b_signed(slot.entry.priority() as i64),
        );
        debug!(
            selector = %self.id,
            owner = ?self.owner,
            goal = %slot.entry.goal_id(),
            goal_type = %slot.entry.goal_type(),
            priority = slot.entry.priority(),
            was_running,
            "goal removed"
        );

        (slot.entry, was_running)
    }
}

impl<W> Drop for GoalSelector<W>
where
    W: WorldMut + 'static,
{
    // Dropping cannot call `end()` (no world), but it must not leave goals claimed.
    fn drop(&mut self) {
        for slot in &self.slots {
            if slot.is_running() {
                slot.entry.goal().release(self.id);
            }
        }
    }
}

impl<W> fmt::Debug for GoalSelector<W>
where
    W: WorldMut + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoalSelector")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("config", &self.config)
            .field("entries", &self.slots.len())
            .field("running", &self.slots.iter().filter(|s| s.is_running()).count())
            .finish()
    }
}

struct Reconciler<'s, W>
where
    W: WorldMut + 'static,
{
    selector: SelectorId,
    config: SelectorConfig,
    slots: &'s mut Vec<Slot<W>>,
    report: &'s mut TickReport,
}

impl<W> Reconciler<'_, W>
where
    W: WorldMut + 'static,
{
    /// Returns the running slots that must stop before anything is started.
    fn continuation(&mut self, cx: &mut GoalContext<'_, W>) -> Vec<(usize, StopCause)> {
        let mut stops = Vec::new();
        for (i, slot) in self.slots.iter().enumerate() {
            if !slot.is_running() {
                continue;
            }
            match slot.entry.goal().should_continue(cx) {
                Ok(true) => {}
                Ok(false) => stops.push((i, StopCause::Yielded)),
                Err(error) => {
                    record_fault(
                        &mut self.report.faults,
                        cx,
                        &slot.entry,
                        LifecyclePhase::ShouldContinue,
                        error,
                    );
                    stops.push((i, StopCause::Faulted));
                }
            }
        }
        stops
    }

    fn stop(&mut self, cx: &mut GoalContext<'_, W>, stops: &[(usize, StopCause)]) {
        for &(i, cause) in stops {
            self.end_slot(i, cx, cause);
        }
    }

    /// Starts idle entries in scheduling order against a table of flag holders.
    ///
    /// An entry may take a flag from a holder only if the holder has strictly lower priority and
    /// currently reports itself interruptible. Entries started earlier in the pass always have
    /// equal or higher priority, so they are never taken from. `should_start` is asked only once
    /// all of the entry's flags are obtainable, and holders are ended only after the entry's
    /// `start()` succeeded. A start that fails or loses its claim leaves the table untouched, so
    /// the entries behind it are evaluated as if it had never been a candidate.
    fn start(&mut self, cx: &mut GoalContext<'_, W>) {
        let mut locks: BTreeMap<GoalCategoryFlag, usize> = BTreeMap::new();
        for (i, slot) in self.slots.iter().enumerate() {
            if let SlotState::Running { claimed } = &slot.state {
                for flag in claimed {
                    locks.insert(flag, i);
                }
            }
        }

        let mut interruptible: Vec<Option<bool>> = vec![None; self.slots.len()];

        for i in 0..self.slots.len() {
            let eligible = match self.slots[i].state {
                SlotState::Idle => true,
                SlotState::Faulted => self.config.retry_faulted,
                SlotState::Running { .. } => false,
            };
            if !eligible {
                continue;
            }

            let goal = self.slots[i].entry.goal().clone();
            let priority = self.slots[i].entry.priority();
            if goal.running_in().is_some_and(|s| s != self.selector) {
                continue;
            }

            let flags = goal.category_flags();
            let holders: BTreeSet<usize> =
                flags.iter().filter_map(|f| locks.get(&f).copied()).collect();

            let slots = &*self.slots;
            let blocked = holders.iter().any(|&h| {
                slots[h].entry.priority() <= priority
                    || !*interruptible[h]
                        .get_or_insert_with(|| slots[h].entry.goal().can_be_interrupted())
            });
            if blocked {
                continue;
            }

            match goal.should_start(cx) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(error) => {
                    record_fault(
                        &mut self.report.faults,
                        cx,
                        &self.slots[i].entry,
                        LifecyclePhase::ShouldStart,
                        error,
                    );
                    self.slots[i].state = SlotState::Faulted;
                    continue;
                }
            }

            if !self.commit_start(i, cx, &flags) {
                continue;
            }

            for &h in &holders {
                self.end_slot(h, cx, StopCause::Preempted { by: goal.id() });
                locks.retain(|_, holder| *holder != h);
            }
            for flag in &flags {
                locks.insert(flag, i);
            }
        }
    }

    /// Claims and starts the slot at `i`; returns whether it is now running.
    fn commit_start(
        &mut self,
        i: usize,
        cx: &mut GoalContext<'_, W>,
        flags: &CategoryFlags,
    ) -> bool {
        let slot = &mut self.slots[i];
        let goal = slot.entry.goal().clone();
        if !goal.try_claim(self.selector) {
            debug!(
                selector = %self.selector,
                goal = %goal.id(),
                "goal was claimed by another selector before it could start"
            );
            return false;
        }

        if let Err(error) = goal.start(cx) {
            goal.release(self.selector);
            record_fault(
                &mut self.report.faults,
                cx,
                &slot.entry,
                LifecyclePhase::Start,
                error,
            );
            slot.state = SlotState::Faulted;
            return false;
        }

        slot.state = SlotState::Running {
            claimed: flags.clone(),
        };
        self.report.started += 1;
        debug!(
            selector = %self.selector,
            goal = %goal.id(),
            goal_type = %goal.goal_type(),
            priority = slot.entry.priority(),
            flags = %flags,
            "goal started"
        );
        trace_emit(
            cx.blackboard,
            TraceEvent::new(cx.tick.tick, tags::GOAL_START)
                .with_a(goal.id().get())
                .with_b_signed(slot.entry.priority() as i64),
        );
        true
    }

    /// Ends the running slot at `i` and releases its claim.
    fn end_slot(&mut self, i: usize, cx: &mut GoalContext<'_, W>, cause: StopCause) {
        let slot = &mut self.slots[i];
        let goal = slot.entry.goal().clone();
        let end_failed = match goal.end(cx) {
            Ok(()) => false,
            Err(error) => {
                record_fault(
                    &mut self.report.faults,
                    cx,
                    &slot.entry,
                    LifecyclePhase::End,
                    error,
                );
                true
            }
        };
        goal.release(self.selector);
        let faulted = cause == StopCause::Faulted;
        slot.state = if faulted || end_failed {
            SlotState::Faulted
        } else {
            SlotState::Idle
        };
        self.report.stopped += 1;

        let event = match cause {
            StopCause::Preempted { by } => {
                self.report.preempted += 1;
                debug!(
                    selector = %self.selector,
                    goal = %goal.id(),
                    goal_type = %goal.goal_type(),
                    priority = slot.entry.priority(),
                    preempted_by = %by,
                    "goal preempted"
                );
                TraceEvent::new(cx.tick.tick, tags::GOAL_PREEMPT)
                    .with_a(goal.id().get())
                    .with_b(by.get())
            }
            StopCause::Yielded | StopCause::Faulted => {
                debug!(
                    selector = %self.selector,
                    goal = %goal.id(),
                    goal_type = %goal.goal_type(),
                    priority = slot.entry.priority(),
                    faulted,
                    "goal stopped"
                );
                TraceEvent::new(cx.tick.tick, tags::GOAL_STOP)
                    .with_a(goal.id().get())
                    .with_b_signed(slot.entry.priority() as i64)
            }
        };
        trace_emit(cx.blackboard, event);
    }

    fn update(&mut self, cx: &mut GoalContext<'_, W>) {
        for slot in self.slots.iter_mut() {
            if !slot.is_running() {
                continue;
            }
            let goal = slot.entry.goal().clone();
            self.report.ticked += 1;
            let Err(error) = goal.tick(cx) else {
                continue;
            };

            record_fault(
                &mut self.report.faults,
                cx,
                &slot.entry,
                LifecyclePhase::Tick,
                error,
            );
            if let Err(error) = goal.end(cx) {
                record_fault(
                    &mut self.report.faults,
                    cx,
                    &slot.entry,
                    LifecyclePhase::End,
                    error,
                );
            }
            goal.release(self.selector);
            slot.state = SlotState::Faulted;
            self.report.stopped += 1;
        }
    }
}

fn record_fault<W>(
    faults: &mut Vec<GoalFault>,
    cx: &mut GoalContext<'_, W>,
    entry: &GoalEntry<W>,
    phase: LifecyclePhase,
    error: anyhow::Error,
) where
    W: WorldMut + 'static,
{
    warn!(
        selector = %cx.selector,
        owner = ?cx.owner,
        tick = cx.tick.tick,
        goal = %entry.goal_id(),
        goal_type = %entry.goal_type(),
        priority = entry.priority(),
        %phase,
        error = %format!("{error:#}"),
        "goal lifecycle call failed"
    );
    trace_emit(
        cx.blackboard,
        TraceEvent::new(cx.tick.tick, tags::GOAL_FAULT)
            .with_a(entry.goal_id().get())
            .with_b_signed(entry.priority() as i64),
    );
    faults.push(GoalFault {
        goal: entry.goal_id(),
        goal_type: entry.goal_type(),
        priority: entry.priority(),
        phase,
        tick: cx.tick.tick,
        error,
    });
}
