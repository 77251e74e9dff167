use crate::models::{default_meadows, default_trees, CollectionRecord, Meadow, Tree};

/// In-memory trees and meadows the session works on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingSet {
    pub trees: Vec<Tree>,
    pub meadows: Vec<Meadow>,
}

impl WorkingSet {
    pub fn new(trees: Vec<Tree>, meadows: Vec<Meadow>) -> Self {
        Self { trees, meadows }
    }

    /// The built-in first-run data set.
    pub fn defaults() -> Self {
        Self::new(default_trees(), default_meadows())
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty() && self.meadows.is_empty()
    }

    pub fn clear(&mut self) {
        self.trees.clear();
        self.meadows.clear();
    }

    pub fn tree(&self, id: &str) -> Option<&Tree> {
        self.trees.iter().find(|t| t.id == id)
    }

    pub fn meadow(&self, id: &str) -> Option<&Meadow> {
        self.meadows.iter().find(|m| m.id == id)
    }

    /// Inserts the tree, or replaces the one with the same id in place.
    pub fn upsert_tree(&mut self, tree: Tree) {
        upsert(&mut self.trees, tree);
    }

    pub fn upsert_meadow(&mut self, meadow: Meadow) {
        upsert(&mut self.meadows, meadow);
    }

    /// Removes a tree. Returns false if it wasn't present.
    pub fn remove_tree(&mut self, id: &str) -> bool {
        remove(&mut self.trees, id)
    }

    /// Removes a meadow and every tree planted on it.
    ///
    /// Returns the number of trees removed along with the meadow.
    pub fn remove_meadow(&mut self, id: &str) -> usize {
        remove(&mut self.meadows, id);
        let before = self.trees.len();
        self.trees.retain(|t| t.meadow_id != id);
        before - self.trees.len()
    }

    /// Trees whose variety contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&Tree> {
        let query = query.to_lowercase();
        self.trees
            .iter()
            .filter(|t| t.variety.to_lowercase().contains(&query))
            .collect()
    }

    pub fn trees_on(&self, meadow_id: &str) -> Vec<&Tree> {
        self.trees.iter().filter(|t| t.meadow_id == meadow_id).collect()
    }

    /// Every meadow with its trees, in meadow order.
    pub fn by_meadow(&self) -> Vec<(&Meadow, Vec<&Tree>)> {
        self.meadows
            .iter()
            .map(|m| (m, self.trees_on(&m.id)))
            .collect()
    }

    /// Trees that reference a meadow not in the working set.
    pub fn orphans(&self) -> Vec<&Tree> {
        self.trees
            .iter()
            .filter(|t| self.meadow(&t.meadow_id).is_none())
            .collect()
    }
}

fn upsert<T: CollectionRecord>(records: &mut Vec<T>, record: T) {
    match records.iter_mut().find(|r| r.id() == record.id()) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

fn remove<T: CollectionRecord>(records: &mut Vec<T>, id: &str) -> bool {
    let before = records.len();
    records.retain(|r| r.id() != id);
    records.len() != before
}
