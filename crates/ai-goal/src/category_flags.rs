//! Standard category flags.

use crate::GoalCategoryFlag;

/// Pathing and locomotion.
pub const MOVE: GoalCategoryFlag = GoalCategoryFlag::new("move");
/// Head rotation / gaze.
pub const LOOK: GoalCategoryFlag = GoalCategoryFlag::new("look");
/// Jumping (also swimming upwards).
pub const JUMP: GoalCategoryFlag = GoalCategoryFlag::new("jump");
/// Attack-target selection.
pub const TARGET: GoalCategoryFlag = GoalCategoryFlag::new("target");

pub const ALL: &[GoalCategoryFlag] = &[JUMP, LOOK, MOVE, TARGET];

pub fn by_id(id: &str) -> Option<GoalCategoryFlag> {
    ALL.iter().copied().find(|flag| flag.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        assert_eq!(by_id("move"), Some(MOVE));
        assert_eq!(by_id("target"), Some(TARGET));
        assert_eq!(by_id("fly"), None);
    }
}
