//! To-do tasks (the local board)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How urgent a task is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

/// A to-do task
///
/// Completing a task also archives it, and un-completing it pulls it back onto
/// the active board. The two flags only come apart through [`Task::archive`],
/// which stashes a task away regardless of its completion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Persistent, globally unique identifier for this task
    id: String,
    /// The display name of the task
    title: String,
    completed: bool,
    priority: Priority,
    /// An optional date this task should be surfaced again on
    reminder: Option<NaiveDate>,
    tags: Vec<String>,
    archived: bool,
}

impl Task {
    /// Creates a brand new task
    pub fn new(title: String, priority: Priority) -> Self {
        Self::new_with_parameters(title, priority, None, Vec::new())
    }

    /// Creates a brand new task, with extra parameters
    pub fn new_with_parameters(
        title: String,
        priority: Priority,
        reminder: Option<NaiveDate>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_hyphenated().to_string(),
            title,
            completed: false,
            priority,
            reminder,
            tags,
            archived: false,
        }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn completed(&self) -> bool { self.completed }
    pub fn priority(&self) -> Priority { self.priority }
    pub fn reminder(&self) -> Option<NaiveDate> { self.reminder }
    pub fn tags(&self) -> &[String] { &self.tags }
    pub fn archived(&self) -> bool { self.archived }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }
    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }
    pub fn set_reminder(&mut self, reminder: Option<NaiveDate>) {
        self.reminder = reminder;
    }
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }

    /// Marks this task completed or not. Completed tasks leave the active board,
    /// and un-completing a task restores it
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
        self.archived = completed;
    }

    /// Stashes this task away, marking it done along the way
    pub fn archive(&mut self) {
        self.completed = true;
        self.archived = true;
    }
}

/// The set of tasks the app displays, with its search box and archive toggle
#[derive(Clone, Debug, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    search: String,
    show_archived: bool,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every task on the board, archived or not
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Removes a task for good. Returns false in case this id does not exist
    pub fn remove(&mut self, id: &str) -> bool {
        match self.tasks.iter().position(|task| task.id() == id) {
            Some(index) => {
                self.tasks.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: String) {
        self.search = search;
    }

    pub fn show_archived(&self) -> bool {
        self.show_archived
    }

    /// Switches the board between its active and its archived side
    pub fn set_show_archived(&mut self, show_archived: bool) {
        self.show_archived = show_archived;
    }

    /// Marks a task completed or not. Returns false in case this id does not exist
    pub fn set_completed(&mut self, id: &str, completed: bool) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.set_completed(completed);
                true
            }
            None => false,
        }
    }

    /// Archives a task. Returns false in case this id does not exist
    pub fn archive(&mut self, id: &str) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.archive();
                true
            }
            None => false,
        }
    }

    /// The tasks the current side of the board shows, narrowed down by the search text
    pub fn visible(&self) -> Vec<&Task> {
        let needle = self.search.to_lowercase();
        self.tasks
            .iter()
            .filter(|task| task.archived() == self.show_archived)
            .filter(|task| needle.is_empty() || task.title().to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn completing_a_task_also_archives_it() {
        let mut task = Task::new("Order supplies".to_string(), Priority::High);
        assert_eq!(task.completed(), false);
        assert_eq!(task.archived(), false);

        task.set_completed(true);
        assert_eq!(task.completed(), true);
        assert_eq!(task.archived(), true);

        task.set_completed(false);
        assert_eq!(task.completed(), false);
        assert_eq!(task.archived(), false);
    }

    #[test]
    fn archiving_marks_the_task_done() {
        let mut task = Task::new("Order supplies".to_string(), Priority::Low);
        task.archive();
        assert_eq!(task.completed(), true);
        assert_eq!(task.archived(), true);
    }

    #[test]
    fn every_new_task_gets_its_own_id() {
        let left = Task::new("a".to_string(), Priority::Medium);
        let right = Task::new("a".to_string(), Priority::Medium);
        assert!(left.id() != right.id());
    }
}
