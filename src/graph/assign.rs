//! Column and series assignment for a linear commit history.
//!
//! History arrives newest first, the order rows are drawn in. Each commit
//! keeps the column its child handed it; a commit nobody handed a column
//! opens a new lane (reusing a freed column when one exists) with a fresh
//! series. Columns are freed when a branch rejoins a lane to its left.

#[cfg(test)]
#[path = "assign_test.rs"]
mod assign_test;

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Deserialize;
use tracing::debug;

use super::node::{CommitGraph, CommitId, CommitNode};

/// A commit as listed by the repository, before layout slots exist.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommitRecord {
    pub id: CommitId,
    #[serde(default)]
    pub parents: Vec<CommitId>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    column: u32,
    series: u32,
}

/// Assign row, column and series to every commit in `history`.
///
/// Parents outside `history` are dropped from the resulting nodes so the
/// graph is always self-contained.
#[must_use]
pub fn assign_slots(history: &[CommitRecord]) -> CommitGraph {
    let mut slots: HashMap<&str, Slot> = HashMap::new();
    let mut free_columns: BTreeSet<u32> = BTreeSet::new();
    let mut next_column = 0_u32;
    let mut next_series = 0_u32;

    for record in history {
        let slot = match slots.get(record.id.as_str()) {
            Some(slot) => *slot,
            None => {
                let column = free_columns.pop_first().unwrap_or_else(|| {
                    let column = next_column;
                    next_column += 1;
                    column
                });
                let slot = Slot { column, series: next_series };
                next_series += 1;
                slots.insert(&record.id, slot);
                slot
            }
        };

        for (index, parent) in record.parents.iter().enumerate() {
            let placed = slots.get(parent.as_str()).copied();
            let placed_right = placed.filter(|p| p.column > slot.column);

            if index == 0 && (placed.is_none() || placed_right.is_some()) {
                // The first parent continues this lane; a lane it held to the
                // right is now free.
                if let Some(p) = placed_right {
                    free_columns.insert(p.column);
                }
                slots.insert(parent, slot);
            } else if placed.is_some_and(|p| p.column < slot.column) {
                // This lane merges back into one on the left.
                free_columns.insert(slot.column);
            }
        }
    }

    let known: HashSet<&str> = history.iter().map(|r| r.id.as_str()).collect();
    let nodes = (0_u32..)
        .zip(history)
        .map(|(row, record)| {
            let slot = slots.get(record.id.as_str()).copied().unwrap_or(Slot { column: 0, series: 0 });
            let node = CommitNode {
                id: record.id.clone(),
                row,
                column: slot.column,
                series: slot.series,
                parents: record
                    .parents
                    .iter()
                    .filter(|p| known.contains(p.as_str()))
                    .cloned()
                    .collect(),
                message: record.message.clone(),
                url: record.url.clone(),
            };
            (record.id.clone(), node)
        })
        .collect();

    debug!(commits = history.len(), columns = next_column, "commit slots assigned");
    CommitGraph { nodes, max_row: u32::try_from(history.len()).unwrap_or(u32::MAX), next_column }
}
