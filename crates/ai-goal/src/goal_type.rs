use std::fmt;

/// Catalog identity for a kind of goal.
///
/// Used only for classification: bulk queries and removal by type. Carries no behavior and says
/// nothing about the flags a goal claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GoalType(&'static str);

impl GoalType {
    /// Namespaced id, e.g. `"minecraft:wander"` or `"myplugin:guard_post"`.
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub const fn id(self) -> &'static str {
        self.0
    }

    /// Part before the first `:`, or `""` when the id has no namespace.
    pub fn namespace(self) -> &'static str {
        match self.0.split_once(':') {
            Some((namespace, _)) => namespace,
            None => "",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
