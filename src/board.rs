//! Board State
//!
//! The task board as one explicit state object: fetched lists and tasks,
//! the quadrant assignment, the cleared-completed set and the list filter.
//! Components read views from it and mutate it through its methods; it
//! never touches the DOM, the network or storage itself.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::card::CardView;
use crate::filter::ListFilter;
use crate::matrix::MatrixAssignment;
use crate::models::{due_order, Quadrant, Task, TaskList, TaskStatus};
use crate::persistence::ClearedCompleted;

#[derive(Debug, Clone, Default)]
pub struct Board {
    lists: Vec<TaskList>,
    tasks: Vec<Task>,
    matrix: MatrixAssignment,
    cleared: ClearedCompleted,
    filter: ListFilter,
}

impl Board {
    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn matrix(&self) -> &MatrixAssignment {
        &self.matrix
    }

    pub fn cleared(&self) -> &ClearedCompleted {
        &self.cleared
    }

    pub fn filter(&self) -> &ListFilter {
        &self.filter
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Status the completion checkbox shows; unknown ids read as open
    pub fn is_completed(&self, task_id: &str) -> bool {
        self.task(task_id).is_some_and(Task::is_completed)
    }

    pub fn set_lists(&mut self, lists: Vec<TaskList>) {
        self.lists = lists;
    }

    /// Replace the task collection and rebuild the matrix from the stored
    /// assignment. Ids that are no longer fetched are dropped silently;
    /// returns how many were dropped.
    pub fn load(
        &mut self,
        tasks: Vec<Task>,
        stored: MatrixAssignment,
        cleared: ClearedCompleted,
    ) -> usize {
        self.tasks = tasks;
        self.matrix = stored;
        self.cleared = cleared;
        let known: HashSet<&str> = self.tasks.iter().map(|t| t.id.as_str()).collect();
        self.matrix.retain_known(&known)
    }

    /// Tasks placed in `quadrant` that pass the filter, earliest due first.
    /// Placement order only breaks ties.
    pub fn quadrant_view(&self, quadrant: Quadrant) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .matrix
            .ids(quadrant)
            .iter()
            .filter_map(|id| self.task(id))
            .filter(|t| self.filter.admits(t))
            .collect();
        tasks.sort_by(|a, b| due_order(a, b));
        tasks
    }

    /// Unplaced, not cleared, passing the filter, in collection order
    pub fn pool_view(&self) -> Vec<&Task> {
        let assigned = self.matrix.assigned_ids();
        self.tasks
            .iter()
            .filter(|t| !assigned.contains(t.id.as_str()))
            .filter(|t| !self.cleared.contains(&t.id))
            .filter(|t| self.filter.admits(t))
            .collect()
    }

    /// Every task currently visible on the board, matrix first
    pub fn visible_ids(&self) -> Vec<&str> {
        Quadrant::ALL
            .iter()
            .flat_map(|q| self.quadrant_view(*q))
            .chain(self.pool_view())
            .map(|t| t.id.as_str())
            .collect()
    }

    pub fn cards(&self, quadrant: Option<Quadrant>, now: DateTime<Utc>) -> Vec<CardView> {
        let tasks = match quadrant {
            Some(q) => self.quadrant_view(q),
            None => self.pool_view(),
        };
        tasks
            .into_iter()
            .map(|t| CardView::new(t, quadrant, now))
            .collect()
    }

    /// Move a dropped task into `quadrant`. Unknown ids are ignored.
    /// Returns whether the assignment changed.
    pub fn drop_task(&mut self, task_id: &str, quadrant: Quadrant) -> bool {
        if self.task(task_id).is_none() {
            return false;
        }
        let previous = self.matrix.place(task_id, quadrant);
        previous != Some(quadrant) || self.matrix.ids(quadrant).len() > 1
    }

    pub fn remove_from_matrix(&mut self, task_id: &str) -> bool {
        self.matrix.remove(task_id).is_some()
    }

    /// Completed tasks currently shown, matrix first
    pub fn visible_completed_ids(&self) -> Vec<String> {
        Quadrant::ALL
            .iter()
            .flat_map(|q| self.quadrant_view(*q))
            .chain(self.pool_view())
            .filter(|t| t.is_completed())
            .map(|t| t.id.clone())
            .collect()
    }

    pub fn has_visible_completed(&self) -> bool {
        !self.visible_completed_ids().is_empty()
    }

    /// Dismiss every visible completed task: it leaves the matrix and is
    /// added to the cleared set. Returns the dismissed ids.
    pub fn clear_completed(&mut self) -> Vec<String> {
        let completed = self.visible_completed_ids();
        self.matrix.remove_all(completed.iter().map(String::as_str));
        self.cleared.extend(completed.iter().cloned());
        completed
    }

    /// Local-only status change after the server confirmed it
    pub fn set_status(&mut self, task_id: &str, status: TaskStatus) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.status = status;
                true
            }
            None => false,
        }
    }

    pub fn toggle_filter(&mut self, list_id: &str) -> bool {
        self.filter.toggle(list_id)
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{completed, task};
    use crate::persistence::{MatrixStore, MemoryStore};

    fn ids(tasks: Vec<&Task>) -> Vec<&str> {
        tasks.into_iter().map(|t| t.id.as_str()).collect()
    }

    fn board_with(tasks: Vec<Task>) -> Board {
        let mut board = Board::default();
        board.load(tasks, MatrixAssignment::default(), ClearedCompleted::new());
        board
    }

    fn sorted(mut tasks: Vec<Task>) -> Vec<Task> {
        crate::models::sort_by_due(&mut tasks);
        tasks
    }

    #[test]
    fn test_pool_order_follows_due_dates() {
        let board = board_with(sorted(vec![
            task("A", "l1", Some((2024, 1, 5))),
            task("B", "l1", Some((2024, 1, 1))),
            task("C", "l1", None),
        ]));
        assert_eq!(ids(board.pool_view()), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_quadrant_view_sorted_by_due_not_placement() {
        let mut board = board_with(vec![
            task("late", "l1", Some((2024, 6, 1))),
            task("none", "l1", None),
            task("early", "l1", Some((2024, 1, 1))),
        ]);
        for id in ["none", "late", "early"] {
            board.drop_task(id, Quadrant::UrgentImportant);
        }
        assert_eq!(ids(board.quadrant_view(Quadrant::UrgentImportant)), vec!["early", "late", "none"]);
        assert!(board.pool_view().is_empty());
    }

    #[test]
    fn test_drop_moves_out_of_pool_and_other_quadrant() {
        let mut board = board_with(vec![task("a", "l1", None), task("b", "l1", None)]);
        assert!(board.drop_task("a", Quadrant::UrgentImportant));
        assert_eq!(ids(board.pool_view()), vec!["b"]);

        assert!(board.drop_task("a", Quadrant::NotUrgentImportant));
        assert!(board.quadrant_view(Quadrant::UrgentImportant).is_empty());
        assert_eq!(ids(board.quadrant_view(Quadrant::NotUrgentImportant)), vec!["a"]);

        let visible = board.visible_ids();
        assert_eq!(visible.iter().filter(|id| **id == "a").count(), 1);
    }

    #[test]
    fn test_drop_same_quadrant_alone_is_unchanged() {
        let mut board = board_with(vec![task("a", "l1", None)]);
        assert!(board.drop_task("a", Quadrant::UrgentImportant));
        assert!(!board.drop_task("a", Quadrant::UrgentImportant));
    }

    #[test]
    fn test_drop_unknown_task_is_noop() {
        let mut board = board_with(vec![task("a", "l1", None)]);
        assert!(!board.drop_task("ghost", Quadrant::UrgentImportant));
        assert!(board.matrix().is_empty());
    }

    #[test]
    fn test_placement_survives_reload() {
        let backing = MemoryStore::default();
        let fetched = vec![task("A", "l1", Some((2024, 1, 5))), task("B", "l1", None)];

        let mut board = board_with(fetched.clone());
        board.drop_task("A", Quadrant::UrgentImportant);
        MatrixStore::new(backing.clone()).write_assignment(board.matrix()).unwrap();

        let store = MatrixStore::new(backing);
        let mut reloaded = Board::default();
        reloaded.load(
            fetched,
            store.read_assignment().unwrap(),
            store.read_cleared_completed().unwrap(),
        );
        assert_eq!(ids(reloaded.quadrant_view(Quadrant::UrgentImportant)), vec!["A"]);
        assert_eq!(ids(reloaded.pool_view()), vec!["B"]);
    }

    #[test]
    fn test_reload_drops_deleted_task() {
        let backing = MemoryStore::default();
        let mut board = board_with(vec![task("A", "l1", None), task("B", "l1", None)]);
        board.drop_task("A", Quadrant::UrgentImportant);
        MatrixStore::new(backing.clone()).write_assignment(board.matrix()).unwrap();

        let store = MatrixStore::new(backing);
        let mut reloaded = Board::default();
        let dropped = reloaded.load(
            vec![task("B", "l1", None)],
            store.read_assignment().unwrap(),
            ClearedCompleted::new(),
        );
        assert_eq!(dropped, 1);
        for q in Quadrant::ALL {
            assert!(reloaded.quadrant_view(q).is_empty());
        }
        assert!(!reloaded.matrix().contains("A"));
    }

    #[test]
    fn test_cleared_task_never_in_pool() {
        let backing = MemoryStore::default();
        let store = MatrixStore::new(backing);
        store.add_cleared_completed(vec!["done".to_string()]).unwrap();

        let mut board = Board::default();
        board.load(
            vec![completed(task("done", "l1", None)), task("open", "l1", None)],
            MatrixAssignment::default(),
            store.read_cleared_completed().unwrap(),
        );
        assert_eq!(ids(board.pool_view()), vec!["open"]);
        board.toggle_filter("l1");
        assert_eq!(ids(board.pool_view()), vec!["open"]);
    }

    #[test]
    fn test_filter_round_trip_restores_visible_set() {
        let mut board = board_with(vec![
            task("a", "l1", Some((2024, 1, 2))),
            task("b", "l2", Some((2024, 1, 1))),
            task("c", "l2", None),
        ]);
        board.drop_task("c", Quadrant::UrgentNotImportant);
        let before: Vec<String> = board.visible_ids().into_iter().map(String::from).collect();

        board.toggle_filter("l1");
        assert_eq!(board.visible_ids(), vec!["a"]);
        board.toggle_filter("l1");

        let after: Vec<String> = board.visible_ids().into_iter().map(String::from).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_filter_applies_to_matrix() {
        let mut board = board_with(vec![task("a", "l1", None), task("b", "l2", None)]);
        board.drop_task("a", Quadrant::UrgentImportant);
        board.drop_task("b", Quadrant::UrgentImportant);
        board.toggle_filter("l2");
        assert_eq!(ids(board.quadrant_view(Quadrant::UrgentImportant)), vec!["b"]);
        // hidden placements are kept
        assert!(board.matrix().contains("a"));
        board.clear_filter();
        assert_eq!(board.quadrant_view(Quadrant::UrgentImportant).len(), 2);
    }

    #[test]
    fn test_complete_keeps_quadrant() {
        let mut board = board_with(vec![task("a", "l1", None)]);
        board.drop_task("a", Quadrant::NotUrgentImportant);
        assert!(board.set_status("a", TaskStatus::Completed));
        let view = board.quadrant_view(Quadrant::NotUrgentImportant);
        assert_eq!(ids(view.clone()), vec!["a"]);
        assert!(view[0].is_completed());
        assert!(!board.set_status("ghost", TaskStatus::Completed));
    }

    #[test]
    fn test_clear_completed() {
        let mut board = board_with(vec![
            completed(task("m", "l1", None)),
            completed(task("p", "l1", None)),
            completed(task("hidden", "l2", None)),
            task("open", "l1", None),
        ]);
        board.drop_task("m", Quadrant::UrgentImportant);
        board.drop_task("open", Quadrant::UrgentImportant);
        board.toggle_filter("l1");

        let cleared = board.clear_completed();
        assert_eq!(cleared, vec!["m".to_string(), "p".to_string()]);
        assert!(!board.matrix().contains("m"));
        assert!(board.matrix().contains("open"));
        assert!(board.cleared().contains("p"));
        assert!(!board.cleared().contains("hidden"));

        board.clear_filter();
        assert_eq!(ids(board.pool_view()), vec!["hidden"]);
        assert!(board.clear_completed().len() == 1);
        assert!(board.clear_completed().is_empty());
    }

    #[test]
    fn test_has_visible_completed_respects_filter() {
        let mut board = board_with(vec![completed(task("done", "l2", None)), task("open", "l1", None)]);
        assert!(board.has_visible_completed());

        board.toggle_filter("l1");
        assert!(!board.has_visible_completed());
        assert!(board.clear_completed().is_empty());
        assert!(board.cleared().is_empty());
    }
}
