// File: ./src/store.rs
// Owns the task collection; every mutation goes through here.
use crate::model::Task;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no task with id {0}")]
    UnknownId(String),
}

/// The single owner of the task collection. Views never hold a mutable
/// reference; they read the slice and derive what they need from it.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a fully-formed task. Insertion order is preserved; the caller
    /// guarantees validated fields and a fresh id (see `Task::new`).
    pub fn create(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Replace the entry whose id matches `task.id` wholesale.
    pub fn update(&mut self, task: Task) -> Result<(), StoreError> {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                Ok(())
            }
            None => Err(StoreError::UnknownId(task.id)),
        }
    }

    /// Remove the entry with the given id, returning it.
    pub fn delete(&mut self, id: &str) -> Result<Task, StoreError> {
        match self.tasks.iter().position(|t| t.id == id) {
            Some(idx) => Ok(self.tasks.remove(idx)),
            None => Err(StoreError::UnknownId(id.to_string())),
        }
    }
}
