use ai_core::{AgentId, TickContext, WorldMut};

use crate::{GoalSelector, TickReport};

/// Ticks every selector once, in a stable order (owner stable id, then selector id), so the
/// outcome does not depend on how the caller stored them.
///
/// Reports are returned in the order the selectors were ticked.
pub fn tick_selectors<W>(
    ctx: &TickContext,
    world: &mut W,
    selectors: &mut [GoalSelector<W>],
) -> Vec<(W::Agent, TickReport)>
where
    W: WorldMut + 'static,
{
    selectors.sort_by_key(|s| (s.owner().stable_id(), s.id()));
    selectors
        .iter_mut()
        .map(|selector| (selector.owner(), selector.tick(ctx, world)))
        .collect()
}
