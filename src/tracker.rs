/*
Task list and completion progress.
Kept free of HTTP / Axum so it can be tested directly.
*/

use uuid::Uuid;

use crate::models::{now_fixed_offset, Task, TaskProgress};

#[derive(Debug, Default)]
pub struct TaskTracker {
    tasks: Vec<Task>, // insertion order == display order
}

impl TaskTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // Append a task. Blank titles are ignored and return None.
    pub fn add_task(&mut self, title: &str) -> Option<&Task> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        self.tasks.push(Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            completed: false,
            created_at: now_fixed_offset(),
        });
        tracing::debug!(title, "task added");
        self.tasks.last()
    }

    // Flip the completion flag. Unknown ids are tolerated and return None.
    pub fn toggle_task(&mut self, id: Uuid) -> Option<&Task> {
        let Some(t) = self.tasks.iter_mut().find(|t| t.id == id) else {
            tracing::debug!(%id, "toggle ignored, no such task");
            return None;
        };
        t.completed = !t.completed;
        tracing::debug!(%id, completed = t.completed, "task toggled");
        Some(t)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn progress(&self) -> TaskProgress {
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        let total = self.tasks.len();
        let percent = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        TaskProgress {
            completed,
            total,
            percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_titles_are_ignored() {
        let mut tracker = TaskTracker::new();
        assert!(tracker.add_task("").is_none());
        assert!(tracker.add_task("   ").is_none());
        assert!(tracker.add_task("\t\n").is_none());
        assert!(tracker.tasks().is_empty());
    }

    #[test]
    fn add_appends_one_open_task_with_trimmed_title() {
        let mut tracker = TaskTracker::new();
        tracker.add_task("Read");
        tracker.add_task("  Journal  ");

        let tasks = tracker.tasks();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Read");
        assert_eq!(tasks[1].title, "Journal");
        assert!(tasks.iter().all(|t| !t.completed));
        assert_ne!(tasks[0].id, tasks[1].id);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut tracker = TaskTracker::new();
        let id = tracker.add_task("Meditate").map(|t| t.id).unwrap();

        assert_eq!(tracker.toggle_task(id).map(|t| t.completed), Some(true));
        assert_eq!(tracker.toggle_task(id).map(|t| t.completed), Some(false));
        assert!(!tracker.tasks()[0].completed);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let mut tracker = TaskTracker::new();
        tracker.add_task("Walk");
        let before = tracker.tasks().to_vec();

        assert!(tracker.toggle_task(Uuid::new_v4()).is_none());
        assert_eq!(tracker.tasks(), before.as_slice());
    }

    #[test]
    fn progress_of_empty_list_is_zero() {
        let tracker = TaskTracker::new();
        let p = tracker.progress();
        assert_eq!((p.completed, p.total), (0, 0));
        assert_eq!(p.percent, 0.0);
    }

    #[test]
    fn progress_counts_completed_tasks() {
        let mut tracker = TaskTracker::new();
        let ids: Vec<Uuid> = ["a", "b", "c", "d"]
            .iter()
            .filter_map(|t| tracker.add_task(t).map(|t| t.id))
            .collect();
        tracker.toggle_task(ids[0]);
        tracker.toggle_task(ids[3]);

        let p = tracker.progress();
        assert_eq!((p.completed, p.total), (2, 4));
        assert!((p.percent - 50.0).abs() < f64::EPSILON);
    }
}
