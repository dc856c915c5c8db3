//! Task Row Model
//! One schedule row: a task placed on up to three resources.

use serde::Deserialize;
use std::fmt;

pub const TASK_COLUMN: &str = "Task";
pub const START_COLUMN: &str = "Start";
pub const DURATION_COLUMN: &str = "Duration";
pub const BATCH_COLUMN: &str = "Batch";
pub const RESOURCE_COLUMNS: [&str; 3] = ["Resource 1", "Resource 2", "Resource 3"];

/// Batch identifier shared by the data rows and the color map.
///
/// Integer and label keys never compare equal, so `Int(1)` does not match
/// `Label("1")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum BatchKey {
    Int(i64),
    Label(String),
}

impl fmt::Display for BatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchKey::Int(n) => write!(f, "{}", n),
            BatchKey::Label(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for BatchKey {
    fn from(n: i64) -> Self {
        BatchKey::Int(n)
    }
}

impl From<&str> for BatchKey {
    fn from(s: &str) -> Self {
        BatchKey::Label(s.to_string())
    }
}

/// A single scheduled task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub task: String,
    pub start: f64,
    pub duration: f64,
    pub batch: Option<BatchKey>,
    pub resources: [Option<String>; 3],
}

impl TaskRow {
    pub fn new(task: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            task: task.into(),
            start,
            duration,
            batch: None,
            resources: [None, None, None],
        }
    }

    pub fn with_batch(mut self, batch: impl Into<BatchKey>) -> Self {
        self.batch = Some(batch.into());
        self
    }

    /// Assign `resource` to column `slot` (0-based, `Resource 1` is 0).
    /// Slots past the third column are ignored.
    pub fn with_resource(mut self, slot: usize, resource: impl Into<String>) -> Self {
        if let Some(cell) = self.resources.get_mut(slot) {
            *cell = Some(resource.into());
        }
        self
    }

    /// Non-empty resource names in column order.
    pub fn assigned_resources(&self) -> impl Iterator<Item = &str> {
        self.resources
            .iter()
            .filter_map(|r| r.as_deref())
            .filter(|r| !r.is_empty())
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_keys_of_different_kinds_differ() {
        assert_ne!(BatchKey::Int(1), BatchKey::from("1"));
        assert_eq!(BatchKey::from(3), BatchKey::Int(3));
        assert_eq!(BatchKey::Int(7).to_string(), "7");
        assert_eq!(BatchKey::from("cleanup").to_string(), "cleanup");
    }

    #[test]
    fn assigned_resources_skip_gaps_and_empty_names() {
        let row = TaskRow::new("Mix", 0.0, 4.0)
            .with_resource(0, "Tank A")
            .with_resource(1, "")
            .with_resource(2, "Pump");
        let names: Vec<&str> = row.assigned_resources().collect();
        assert_eq!(names, vec!["Tank A", "Pump"]);
        assert_eq!(row.end(), 4.0);
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let row = TaskRow::new("Mix", 0.0, 1.0).with_resource(3, "Nowhere");
        assert_eq!(row.assigned_resources().count(), 0);
    }
}
