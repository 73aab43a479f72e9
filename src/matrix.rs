//! Matrix Assignment
//!
//! Ordered task ids per quadrant. This is the model the board renders
//! from; the persisted snapshot is written from here, never from the DOM.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::Quadrant;

/// Quadrant -> ordered task ids.
///
/// An id is in at most one quadrant. Ids in no quadrant are "unassigned".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatrixAssignment {
    quadrants: BTreeMap<Quadrant, Vec<String>>,
}

impl MatrixAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids placed in `quadrant`, in placement order
    pub fn ids(&self, quadrant: Quadrant) -> &[String] {
        self.quadrants.get(&quadrant).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn quadrant_of(&self, task_id: &str) -> Option<Quadrant> {
        self.quadrants
            .iter()
            .find(|(_, ids)| ids.iter().any(|id| id == task_id))
            .map(|(q, _)| *q)
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.quadrant_of(task_id).is_some()
    }

    pub fn assigned_ids(&self) -> HashSet<&str> {
        self.quadrants.values().flatten().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.quadrants.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move `task_id` to the end of `quadrant`, removing it from wherever
    /// it was. Returns the quadrant it came from.
    pub fn place(&mut self, task_id: &str, quadrant: Quadrant) -> Option<Quadrant> {
        let previous = self.remove(task_id);
        self.quadrants.entry(quadrant).or_default().push(task_id.to_string());
        previous
    }

    /// Take `task_id` out of the matrix (back to the unassigned pool)
    pub fn remove(&mut self, task_id: &str) -> Option<Quadrant> {
        let mut found = None;
        for (q, ids) in self.quadrants.iter_mut() {
            let before = ids.len();
            ids.retain(|id| id != task_id);
            if ids.len() != before && found.is_none() {
                found = Some(*q);
            }
        }
        found
    }

    /// Remove every id in `task_ids`; returns how many were placed.
    pub fn remove_all<'a, I>(&mut self, task_ids: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        task_ids
            .into_iter()
            .filter(|id| self.remove(id).is_some())
            .count()
    }

    /// Drop ids that are not in `known` and keep only the first placement of
    /// any id repeated across quadrants. Returns the number of ids dropped.
    pub fn retain_known(&mut self, known: &HashSet<&str>) -> usize {
        let mut seen: HashSet<String> = HashSet::new();
        let mut dropped = 0;
        for q in Quadrant::ALL {
            if let Some(ids) = self.quadrants.get_mut(&q) {
                let before = ids.len();
                ids.retain(|id| known.contains(id.as_str()) && seen.insert(id.clone()));
                dropped += before - ids.len();
            }
        }
        dropped
    }
}
