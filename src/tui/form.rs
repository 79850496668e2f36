// File: ./src/tui/form.rs
// Field-focused form used both for creating tasks and for the edit modal.
use crate::model::{Priority, Status, Task};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Due,
    Priority,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Description => "Description",
            Field::Due => "Due (YYYY-MM-DD)",
            Field::Priority => "Priority",
        }
    }

    fn next(self) -> Self {
        match self {
            Field::Title => Field::Description,
            Field::Description => Field::Due,
            Field::Due => Field::Priority,
            Field::Priority => Field::Title,
        }
    }

    fn previous(self) -> Self {
        match self {
            Field::Title => Field::Priority,
            Field::Description => Field::Title,
            Field::Due => Field::Description,
            Field::Priority => Field::Due,
        }
    }
}

#[derive(Debug, Clone)]
struct EditTarget {
    id: String,
    status: Status,
}

/// Form state for the entry form and the edit modal. An edit form carries
/// the target's id and status untouched through submit; everything else is
/// whatever the user typed.
#[derive(Debug)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub due: String,
    pub priority: Priority,
    pub focus: Field,
    pub cursor: usize,
    target: Option<EditTarget>,
}

impl TaskForm {
    /// A blank entry form: empty fields, priority defaulting to low.
    pub fn create() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            due: String::new(),
            priority: Priority::default(),
            focus: Field::Title,
            cursor: 0,
            target: None,
        }
    }

    /// An edit form initialized from the target's current values.
    pub fn edit(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due: task.due_string(),
            priority: task.priority,
            focus: Field::Title,
            cursor: task.title.chars().count(),
            target: Some(EditTarget {
                id: task.id.clone(),
                status: task.status,
            }),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.target.is_some()
    }

    pub fn heading(&self) -> &'static str {
        if self.is_edit() { " Edit Task " } else { " New Task " }
    }

    /// The text buffer behind the focused field, if it is a text field.
    pub fn buffer(&self) -> Option<&str> {
        match self.focus {
            Field::Title => Some(&self.title),
            Field::Description => Some(&self.description),
            Field::Due => Some(&self.due),
            Field::Priority => None,
        }
    }

    fn buffer_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Title => Some(&mut self.title),
            Field::Description => Some(&mut self.description),
            Field::Due => Some(&mut self.due),
            Field::Priority => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.cursor_to_end();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
        self.cursor_to_end();
    }

    fn cursor_to_end(&mut self) {
        self.cursor = self.buffer().map_or(0, |b| b.chars().count());
    }

    /// Byte offset of the cursor within the focused buffer.
    fn byte_index(&self) -> usize {
        let buf = self.buffer().unwrap_or("");
        buf.char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor)
            .unwrap_or(buf.len())
    }

    pub fn enter_char(&mut self, new_char: char) {
        let idx = self.byte_index();
        if let Some(buf) = self.buffer_mut() {
            buf.insert(idx, new_char);
            self.move_right();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let current = self.cursor;
        if let Some(buf) = self.buffer_mut() {
            let edited: String = buf
                .chars()
                .take(current - 1)
                .chain(buf.chars().skip(current))
                .collect();
            *buf = edited;
            self.move_left();
        }
    }

    /// Left arrow: cursor movement on text fields, selection on priority.
    pub fn left(&mut self) {
        if self.focus == Field::Priority {
            self.priority = self.priority.previous();
        } else {
            self.move_left();
        }
    }

    pub fn right(&mut self) {
        if self.focus == Field::Priority {
            self.priority = self.priority.next();
        } else {
            self.move_right();
        }
    }

    fn move_left(&mut self) {
        self.cursor = self.clamp_cursor(self.cursor.saturating_sub(1));
    }

    fn move_right(&mut self) {
        self.cursor = self.clamp_cursor(self.cursor.saturating_add(1));
    }

    fn clamp_cursor(&self, new_cursor: usize) -> usize {
        new_cursor.clamp(0, self.buffer().map_or(0, |b| b.chars().count()))
    }

    /// Validate and build the resulting task. All three text fields are
    /// required and the due date must parse; nothing reaches the store
    /// until every check passes.
    pub fn submit(&self) -> Result<Task, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required.".to_string());
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err("Description is required.".to_string());
        }
        let due_raw = self.due.trim();
        if due_raw.is_empty() {
            return Err("Due date is required.".to_string());
        }
        let due = NaiveDate::parse_from_str(due_raw, "%Y-%m-%d")
            .map_err(|_| "Due date must be YYYY-MM-DD.".to_string())?;

        Ok(match &self.target {
            Some(target) => Task {
                id: target.id.clone(),
                title: title.to_string(),
                description: description.to_string(),
                due,
                priority: self.priority,
                status: target.status,
            },
            None => Task::new(title, description, due, self.priority),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> TaskForm {
        let mut form = TaskForm::create();
        form.title = "Write report".to_string();
        form.description = "Quarterly numbers".to_string();
        form.due = "2099-01-01".to_string();
        form
    }

    #[test]
    fn create_submit_produces_in_progress_task() {
        let form = filled_form();
        let task = form.submit().unwrap();
        assert_eq!(task.title, "Write report");
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.priority, Priority::Low);
        assert!(!task.id.is_empty());
    }

    #[test]
    fn empty_required_field_blocks_submit() {
        let mut form = filled_form();
        form.title.clear();
        assert_eq!(form.submit().unwrap_err(), "Title is required.");

        let mut form = filled_form();
        form.description = "   ".to_string();
        assert_eq!(form.submit().unwrap_err(), "Description is required.");

        let mut form = filled_form();
        form.due.clear();
        assert_eq!(form.submit().unwrap_err(), "Due date is required.");
    }

    #[test]
    fn malformed_date_blocks_submit() {
        let mut form = filled_form();
        form.due = "tomorrow".to_string();
        assert!(form.submit().is_err());
    }

    #[test]
    fn edit_submit_preserves_id_and_status() {
        let mut original = Task::new(
            "Old title",
            "Old description",
            NaiveDate::from_ymd_opt(2099, 6, 1).unwrap(),
            Priority::High,
        );
        original.status = Status::Completed;

        let mut form = TaskForm::edit(&original);
        assert!(form.is_edit());
        form.title = "New title".to_string();
        form.priority = Priority::Medium;

        let updated = form.submit().unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.status, Status::Completed);
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.priority, Priority::Medium);
        assert_eq!(updated.description, "Old description");
    }

    #[test]
    fn cursor_editing_respects_char_boundaries() {
        let mut form = TaskForm::create();
        for c in "héllo".chars() {
            form.enter_char(c);
        }
        assert_eq!(form.title, "héllo");
        form.delete_char();
        form.delete_char();
        assert_eq!(form.title, "hél");
        assert_eq!(form.cursor, 3);
    }

    #[test]
    fn priority_field_cycles_with_arrows() {
        let mut form = TaskForm::create();
        form.focus = Field::Priority;
        form.right();
        assert_eq!(form.priority, Priority::Medium);
        form.right();
        assert_eq!(form.priority, Priority::High);
        form.left();
        assert_eq!(form.priority, Priority::Medium);
    }
}
