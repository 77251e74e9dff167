//! The two synchronized collections.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Trees,
    Meadows,
}

impl Collection {
    /// Server-side table name.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Trees => "trees",
            Collection::Meadows => "meadows",
        }
    }

    /// Key of the local snapshot entry.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Collection::Trees => "bk_trees",
            Collection::Meadows => "bk_meadows",
        }
    }

    /// Returns the filename for this collection's snapshot.
    pub fn filename(&self) -> String {
        format!("{}.json", self.storage_key())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
