use crate::AgentId;

/// Read-only world access.
///
/// Goals receive the world through their lifecycle calls. The kernel does not prescribe any
/// queries; games define extension traits (navigation, targeting, inventories) on top.
pub trait WorldView {
    type Agent: AgentId;
}

/// Write access for goals that act on the world while running.
pub trait WorldMut: WorldView {}
