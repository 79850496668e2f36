// File: ./src/tui/state.rs
use crate::config::Config;
use crate::model::Task;
use crate::notify::Notifier;
use crate::store::TaskStore;
use crate::tui::form::TaskForm;
use crate::view::{Filter, SortMode, build_view};
use chrono::{DateTime, Utc};
use ratatui::widgets::ListState;
use std::time::Instant;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Mode {
    Normal,
    Searching,
}

pub struct AppState {
    pub store: TaskStore,
    pub view_indices: Vec<usize>,
    pub filter: Filter,
    pub search: String,
    pub sort: SortMode,
    pub mode: Mode,
    /// The entry/edit modal. `None` means closed: nothing of it is rendered
    /// and closing drops both the open flag and the target reference at once.
    pub form: Option<TaskForm>,
    pub list_state: ListState,
    pub notifier: Notifier,
    pub cursor_position: usize,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let mut l_state = ListState::default();
        l_state.select(Some(0));
        Self {
            store: TaskStore::new(),
            view_indices: vec![],
            filter: config.filter,
            search: String::new(),
            sort: config.sort,
            mode: Mode::Normal,
            form: None,
            list_state: l_state,
            notifier: Notifier::new(),
            cursor_position: 0,
        }
    }

    /// Rebuild the derived view from current store state. Called every loop
    /// tick, so filter/search/sort changes and store mutations all take
    /// effect on the next draw without any subscription machinery.
    pub fn recalculate_view(&mut self, now: DateTime<Utc>) {
        self.view_indices = build_view(self.store.tasks(), self.filter, &self.search, self.sort, now);

        let sel = self.list_state.selected().unwrap_or(0);
        if self.view_indices.is_empty() {
            self.list_state.select(Some(0));
        } else if sel >= self.view_indices.len() {
            self.list_state.select(Some(self.view_indices.len() - 1));
        }
    }

    pub fn get_selected_master_index(&self) -> Option<usize> {
        if let Some(view_idx) = self.list_state.selected()
            && view_idx < self.view_indices.len()
        {
            return Some(self.view_indices[view_idx]);
        }
        None
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.get_selected_master_index()
            .and_then(|idx| self.store.tasks().get(idx))
    }

    // --- List navigation ---

    pub fn next(&mut self) {
        let len = self.view_indices.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= len - 1 { 0 } else { i + 1 }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.view_indices.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 { len - 1 } else { i - 1 }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn jump_forward(&mut self, step: usize) {
        if self.view_indices.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        // Clamp to the last item (don't wrap around like next())
        let new_index = (current + step).min(self.view_indices.len() - 1);
        self.list_state.select(Some(new_index));
    }

    pub fn jump_backward(&mut self, step: usize) {
        if self.view_indices.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let new_index = current.saturating_sub(step);
        self.list_state.select(Some(new_index));
    }

    // --- Search input ---

    pub fn enter_char(&mut self, new_char: char) {
        let idx = self.search_byte_index();
        self.search.insert(idx, new_char);
        self.move_cursor_right();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let before = self.search.chars().take(current_index - 1);
            let after = self.search.chars().skip(current_index);
            self.search = before.chain(after).collect();
            self.move_cursor_left();
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.clamp_cursor(self.cursor_position.saturating_sub(1));
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor_position = self.clamp_cursor(self.cursor_position.saturating_add(1));
    }

    pub fn reset_search(&mut self) {
        self.search.clear();
        self.cursor_position = 0;
    }

    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.search.chars().count())
    }

    fn search_byte_index(&self) -> usize {
        self.search
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.search.len())
    }

    // --- Store actions (each pairs the mutation with its notification) ---

    pub fn open_create(&mut self) {
        self.form = Some(TaskForm::create());
    }

    pub fn open_edit(&mut self, now: Instant) {
        match self.selected_task() {
            Some(task) => self.form = Some(TaskForm::edit(task)),
            None => self.notifier.error("No task selected.", now),
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Validate the open form and apply it. A validation failure keeps the
    /// form open with its state intact; a successful submit closes it.
    pub fn submit_form(&mut self, now: Instant) {
        let Some(form) = &self.form else { return };
        match form.submit() {
            Ok(task) => {
                if form.is_edit() {
                    match self.store.update(task) {
                        Ok(()) => self.notifier.success("Task updated.", now),
                        Err(e) => self.notifier.error(e.to_string(), now),
                    }
                } else {
                    self.store.create(task);
                    self.notifier.success("Task added.", now);
                }
                self.form = None;
            }
            Err(msg) => self.notifier.error(msg, now),
        }
    }

    pub fn toggle_selected(&mut self, now: Instant) {
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        let mut updated = task;
        updated.status = updated.status.toggled();
        let label = updated.status.label();
        match self.store.update(updated) {
            Ok(()) => self.notifier.success(format!("Task marked {label}."), now),
            Err(e) => self.notifier.error(e.to_string(), now),
        }
    }

    pub fn delete_selected(&mut self, now: Instant) {
        let Some(id) = self.selected_task().map(|t| t.id.clone()) else {
            return;
        };
        match self.store.delete(&id) {
            Ok(_) => self.notifier.success("Task deleted.", now),
            Err(e) => self.notifier.error(e.to_string(), now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Status, Task};
    use crate::notify::Kind;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state_with_tasks(tasks: Vec<Task>) -> AppState {
        let mut state = AppState::new(Config::default());
        for task in tasks {
            state.store.create(task);
        }
        state.recalculate_view(Utc::now());
        state
    }

    #[test]
    fn toggle_twice_round_trips_status_and_nothing_else() {
        let task = Task::new("A", "B", date(2099, 1, 1), Priority::High);
        let snapshot = task.clone();
        let mut state = state_with_tasks(vec![task]);

        let t0 = Instant::now();
        state.toggle_selected(t0);
        assert_eq!(state.store.tasks()[0].status, Status::Completed);
        assert_eq!(
            state.notifier.latest().map(|n| n.text.as_str()),
            Some("Task marked completed.")
        );

        state.toggle_selected(t0);
        assert_eq!(state.store.tasks()[0], snapshot);
        assert_eq!(
            state.notifier.latest().map(|n| n.text.as_str()),
            Some("Task marked in-progress.")
        );
    }

    #[test]
    fn delete_selected_removes_and_notifies() {
        let mut state = state_with_tasks(vec![
            Task::new("A", "a", date(2099, 1, 1), Priority::Low),
            Task::new("B", "b", date(2099, 1, 2), Priority::Low),
        ]);
        state.delete_selected(Instant::now());
        assert_eq!(state.store.len(), 1);
        assert_eq!(state.store.tasks()[0].title, "B");
        assert_eq!(
            state.notifier.latest().map(|n| n.text.as_str()),
            Some("Task deleted.")
        );
    }

    #[test]
    fn edit_flow_merges_fields_and_closes_form() {
        let task = Task::new("Old", "desc", date(2099, 1, 1), Priority::Low);
        let id = task.id.clone();
        let mut state = state_with_tasks(vec![task]);

        let t0 = Instant::now();
        state.open_edit(t0);
        state.form.as_mut().unwrap().title = "New".to_string();
        state.submit_form(t0);

        assert!(state.form.is_none());
        let stored = state.store.get(&id).unwrap();
        assert_eq!(stored.title, "New");
        assert_eq!(stored.status, Status::InProgress);
        assert_eq!(
            state.notifier.latest().map(|n| n.text.as_str()),
            Some("Task updated.")
        );
    }

    #[test]
    fn invalid_submit_keeps_form_open_and_reports_error() {
        let mut state = state_with_tasks(vec![]);
        state.open_create();
        state.submit_form(Instant::now());

        assert!(state.form.is_some());
        assert_eq!(state.store.len(), 0);
        assert_eq!(state.notifier.latest().map(|n| n.kind), Some(Kind::Error));
    }

    #[test]
    fn open_edit_without_selection_reports_error() {
        let mut state = state_with_tasks(vec![]);
        state.open_edit(Instant::now());
        assert!(state.form.is_none());
        assert_eq!(state.notifier.latest().map(|n| n.kind), Some(Kind::Error));
    }

    #[test]
    fn selection_is_clamped_when_the_view_shrinks() {
        let mut state = state_with_tasks(vec![
            Task::new("A", "a", date(2099, 1, 1), Priority::Low),
            Task::new("B", "b", date(2099, 1, 2), Priority::Low),
            Task::new("C", "c", date(2099, 1, 3), Priority::Low),
        ]);
        state.list_state.select(Some(2));
        state.delete_selected(Instant::now());
        state.recalculate_view(Utc::now());
        assert_eq!(state.list_state.selected(), Some(1));
    }
}
