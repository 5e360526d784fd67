//! Dead-column bookkeeping
//!
//! One flag per column. A miss kills the column under the outline for the
//! rest of the run; only a restart brings it back.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOccupancy {
    dead: Vec<bool>,
}

impl ColumnOccupancy {
    /// All columns alive
    pub fn new(columns: usize) -> Self {
        Self {
            dead: vec![false; columns],
        }
    }

    pub fn columns(&self) -> usize {
        self.dead.len()
    }

    /// Out-of-range indices read as alive
    pub fn is_dead(&self, column: usize) -> bool {
        self.dead.get(column).copied().unwrap_or(false)
    }

    /// Kill a column. Returns false if it was already dead or out of range.
    pub fn mark_dead(&mut self, column: usize) -> bool {
        match self.dead.get_mut(column) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    pub fn all_dead(&self) -> bool {
        self.dead.iter().all(|&d| d)
    }

    pub fn dead_count(&self) -> usize {
        self.dead.iter().filter(|&&d| d).count()
    }

    /// Live column indices in ascending order
    pub fn available(&self) -> Vec<usize> {
        self.dead
            .iter()
            .enumerate()
            .filter(|(_, dead)| !**dead)
            .map(|(i, _)| i)
            .collect()
    }

    /// Dead column indices in ascending order
    pub fn dead_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.dead
            .iter()
            .enumerate()
            .filter(|(_, dead)| **dead)
            .map(|(i, _)| i)
    }

    /// Bring every column back (restart only)
    pub fn clear(&mut self) {
        self.dead.iter_mut().for_each(|d| *d = false);
    }
}
