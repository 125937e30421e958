use std::collections::BTreeSet;
use std::fmt;

/// A resource class a running goal claims exclusively ("movement", "look", ...).
///
/// Two goals whose flag sets intersect can never run at the same time in one selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GoalCategoryFlag(&'static str);

impl GoalCategoryFlag {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub const fn id(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for GoalCategoryFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Set of category flags. Ordered so iteration (and therefore logs and lock tables) is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CategoryFlags(BTreeSet<GoalCategoryFlag>);

impl CategoryFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, flag: GoalCategoryFlag) -> bool {
        self.0.insert(flag)
    }

    pub fn with(mut self, flag: GoalCategoryFlag) -> Self {
        self.0.insert(flag);
        self
    }

    pub fn contains(&self, flag: GoalCategoryFlag) -> bool {
        self.0.contains(&flag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = GoalCategoryFlag> + '_ {
        self.0.iter().copied()
    }

    /// `true` when both sets claim at least one common flag.
    pub fn conflicts_with(&self, other: &CategoryFlags) -> bool {
        !self.0.is_disjoint(&other.0)
    }
}

impl FromIterator<GoalCategoryFlag> for CategoryFlags {
    fn from_iter<I: IntoIterator<Item = GoalCategoryFlag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<GoalCategoryFlag> for CategoryFlags {
    fn extend<I: IntoIterator<Item = GoalCategoryFlag>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<const N: usize> From<[GoalCategoryFlag; N]> for CategoryFlags {
    fn from(flags: [GoalCategoryFlag; N]) -> Self {
        flags.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a CategoryFlags {
    type Item = GoalCategoryFlag;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, GoalCategoryFlag>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl fmt::Display for CategoryFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, flag) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(flag.id())?;
        }
        f.write_str("}")
    }
}
