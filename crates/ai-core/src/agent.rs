use core::fmt::Debug;

/// Opaque handle for the agent that owns a goal selector.
///
/// The scheduler never looks inside the handle. It needs:
/// - `Copy` so every lifecycle call can receive the owner by value
/// - stable ordering (`Ord`) so drivers tick agents in a reproducible order
/// - a stable numeric ID (`stable_id`) for seeding, tick spreading and logs
pub trait AgentId: Copy + Ord + Eq + Debug + Send + Sync + 'static {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

impl AgentId for usize {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

/// Generational entity handles: `(index, generation)`.
impl AgentId for (u32, u32) {
    fn stable_id(self) -> u64 {
        ((self.1 as u64) << 32) | self.0 as u64
    }
}

#[cfg(test)]
mod tests {
    use super::AgentId;

    #[test]
    fn generational_handles_pack_generation_high() {
        assert_eq!((7u32, 0u32).stable_id(), 7);
        assert_eq!((7u32, 1u32).stable_id(), (1u64 << 32) | 7);
        assert_ne!((1u32, 2u32).stable_id(), (2u32, 1u32).stable_id());
    }
}
