use crate::{GoalFault, SelectorError};

/// Outcome of one [`GoalSelector::tick`](crate::GoalSelector::tick).
#[derive(Debug, Default)]
pub struct TickReport {
    pub tick: u64,
    /// `false` on decimated ticks that skipped preemption and new starts.
    pub reconciled: bool,
    pub started: usize,
    /// Every Running -> Idle transition of the tick, preemptions and faults included.
    pub stopped: usize,
    pub preempted: usize,
    /// Number of `tick()` calls made in the update pass.
    pub ticked: usize,
    /// Entries removed by queued commands.
    pub removed: usize,
    pub faults: Vec<GoalFault>,
    /// Queued commands that could not be applied.
    pub rejected: Vec<SelectorError>,
}

impl TickReport {
    pub fn new(tick: u64, reconciled: bool) -> Self {
        Self {
            tick,
            reconciled,
            ..Self::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        self.faults.is_empty() && self.rejected.is_empty()
    }
}
