//! Application state for the Notes TUI.
//!
//! The list shown is always the result of the last successful fetch:
//! every mutation is followed by a full re-fetch, never a local patch.

use crossterm::event::KeyCode;
use notes_core::models::{MissingFields, Note, NoteInput, ValidNote};
use uuid::Uuid;

use crate::client::NotesApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Title,
    Content,
}

/// Title/content pair being typed into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextForm {
    pub title: String,
    pub content: String,
    pub field: Field,
}

impl TextForm {
    fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            field: Field::Title,
        }
    }

    fn active(&mut self) -> &mut String {
        match self.field {
            Field::Title => &mut self.title,
            Field::Content => &mut self.content,
        }
    }

    pub fn push(&mut self, c: char) {
        self.active().push(c);
    }

    pub fn backspace(&mut self) {
        self.active().pop();
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            Field::Title => Field::Content,
            Field::Content => Field::Title,
        };
    }

    /// Blank fields are refused here; the values sent are left untrimmed.
    fn to_note(&self) -> Result<ValidNote, MissingFields> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(MissingFields);
        }
        NoteInput::new(self.title.as_str(), self.content.as_str()).validate()
    }
}

/// Mutable copy of a note open in the edit modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub id: Uuid,
    pub form: TextForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading,
    Ready,
    Editing(Draft),
    ConfirmDelete(Note),
}

/// Which part of the ready screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    CreateForm,
}

pub struct App<A> {
    api: A,
    pub view: View,
    pub focus: Focus,
    pub notes: Vec<Note>,
    pub selected: usize,
    pub create_form: TextForm,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl<A: NotesApi> App<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            view: View::Loading,
            focus: Focus::List,
            notes: Vec::new(),
            selected: 0,
            create_form: TextForm::default(),
            status: None,
            should_quit: false,
        }
    }

    /// Initial fetch: `Loading` -> `Ready`, even if the fetch fails.
    pub fn load(&mut self) {
        self.refresh();
        self.view = View::Ready;
    }

    /// Replace the list with a fresh server read. On failure the previous
    /// list stays on screen.
    pub fn refresh(&mut self) -> bool {
        match self.api.list() {
            Ok(notes) => {
                self.notes = notes;
                self.selected = self.selected.min(self.notes.len().saturating_sub(1));
                true
            }
            Err(e) => {
                self.status = Some(format!("fetch failed: {e}"));
                false
            }
        }
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.notes.get(self.selected)
    }

    pub fn submit_create(&mut self) {
        let note = match self.create_form.to_note() {
            Ok(note) => note,
            Err(e) => {
                self.status = Some(e.to_string());
                return;
            }
        };

        match self.api.create(&note) {
            Ok(created) => {
                self.create_form = TextForm::default();
                self.focus = Focus::List;
                self.status = Some(format!("created \"{}\"", created.title));
                self.refresh();
            }
            Err(e) => self.status = Some(format!("create failed: {e}")),
        }
    }

    pub fn start_edit(&mut self) {
        if let Some(note) = self.selected_note() {
            self.view = View::Editing(Draft {
                id: note.id,
                form: TextForm::from_note(note),
            });
        }
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.view, View::Editing(_)) {
            self.view = View::Ready;
        }
    }

    pub fn submit_edit(&mut self) {
        let View::Editing(draft) = &self.view else {
            return;
        };

        let note = match draft.form.to_note() {
            Ok(note) => note,
            Err(e) => {
                self.status = Some(e.to_string());
                return;
            }
        };

        match self.api.update(draft.id, &note) {
            Ok(updated) => {
                self.view = View::Ready;
                self.status = Some(format!("updated \"{}\"", updated.title));
                self.refresh();
            }
            Err(e) => self.status = Some(format!("update failed: {e}")),
        }
    }

    /// Ask for confirmation before deleting the selected note.
    pub fn request_delete(&mut self) {
        if let Some(note) = self.selected_note() {
            self.view = View::ConfirmDelete(note.clone());
        }
    }

    pub fn answer_delete(&mut self, confirmed: bool) {
        let View::ConfirmDelete(note) = std::mem::replace(&mut self.view, View::Ready) else {
            return;
        };
        if !confirmed {
            return;
        }

        match self.api.delete(note.id) {
            Ok(()) => {
                self.status = Some(format!("deleted \"{}\"", note.title));
                self.refresh();
            }
            Err(e) => self.status = Some(format!("delete failed: {e}")),
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected < self.notes.len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match &mut self.view {
            View::Loading => {
                if code == KeyCode::Esc {
                    self.quit();
                }
            }
            View::Editing(draft) => match code {
                KeyCode::Esc => self.cancel_edit(),
                KeyCode::Enter => self.submit_edit(),
                KeyCode::Tab | KeyCode::BackTab => draft.form.next_field(),
                KeyCode::Backspace => draft.form.backspace(),
                KeyCode::Char(c) => draft.form.push(c),
                _ => {}
            },
            View::ConfirmDelete(_) => match code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.answer_delete(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.answer_delete(false),
                _ => {}
            },
            View::Ready => match self.focus {
                Focus::CreateForm => match code {
                    KeyCode::Esc => self.focus = Focus::List,
                    KeyCode::Enter => self.submit_create(),
                    KeyCode::Tab | KeyCode::BackTab => self.create_form.next_field(),
                    KeyCode::Backspace => self.create_form.backspace(),
                    KeyCode::Char(c) => self.create_form.push(c),
                    _ => {}
                },
                Focus::List => match code {
                    KeyCode::Esc | KeyCode::Char('q') => self.quit(),
                    KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
                    KeyCode::Down | KeyCode::Char('j') => self.select_next(),
                    KeyCode::Char('n') => self.focus = Focus::CreateForm,
                    KeyCode::Enter | KeyCode::Char('e') => self.start_edit(),
                    KeyCode::Char('d') => self.request_delete(),
                    KeyCode::Char('r') => {
                        if self.refresh() {
                            self.status = None;
                        }
                    }
                    _ => {}
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use chrono::Utc;
    use reqwest::StatusCode;
    use std::cell::{Cell, RefCell};

    /// In-memory stand-in for the server that records each call.
    #[derive(Default)]
    struct FakeApi {
        notes: RefCell<Vec<Note>>,
        calls: RefCell<Vec<&'static str>>,
        failing: Cell<bool>,
    }

    impl FakeApi {
        fn with_notes(titles: &[&str]) -> Self {
            let api = Self::default();
            for title in titles {
                api.insert(title, "body");
            }
            api
        }

        fn insert(&self, title: &str, content: &str) -> Note {
            let now = Utc::now();
            let note = Note {
                id: Uuid::new_v4(),
                title: title.into(),
                content: content.into(),
                created_at: now,
                updated_at: now,
            };
            self.notes.borrow_mut().push(note.clone());
            note
        }

        fn record(&self, call: &'static str) -> Result<(), ClientError> {
            self.calls.borrow_mut().push(call);
            if self.failing.get() {
                Err(ClientError::Status {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "boom".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    impl NotesApi for &FakeApi {
        fn list(&self) -> Result<Vec<Note>, ClientError> {
            self.record("list")?;
            Ok(self.notes.borrow().clone())
        }

        fn create(&self, note: &ValidNote) -> Result<Note, ClientError> {
            self.record("create")?;
            Ok(self.insert(&note.title, &note.content))
        }

        fn update(&self, id: Uuid, note: &ValidNote) -> Result<Note, ClientError> {
            self.record("update")?;
            let mut notes = self.notes.borrow_mut();
            let stored = notes.iter_mut().find(|n| n.id == id).ok_or_else(|| {
                ClientError::Status {
                    status: StatusCode::NOT_FOUND,
                    message: "Note not found".into(),
                }
            })?;
            stored.title = note.title.clone();
            stored.content = note.content.clone();
            stored.updated_at = Utc::now();
            Ok(stored.clone())
        }

        fn delete(&self, id: Uuid) -> Result<(), ClientError> {
            self.record("delete")?;
            self.notes.borrow_mut().retain(|n| n.id != id);
            Ok(())
        }
    }

    fn type_text(app: &mut App<&FakeApi>, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn load_fetches_and_becomes_ready() {
        let api = FakeApi::with_notes(&["a", "b"]);
        let mut app = App::new(&api);
        assert_eq!(app.view, View::Loading);

        app.load();

        assert_eq!(app.view, View::Ready);
        assert_eq!(app.notes.len(), 2);
        assert_eq!(*api.calls.borrow(), vec!["list"]);
    }

    #[test]
    fn load_failure_still_reaches_ready() {
        let api = FakeApi::with_notes(&["a"]);
        api.failing.set(true);
        let mut app = App::new(&api);

        app.load();

        assert_eq!(app.view, View::Ready);
        assert!(app.notes.is_empty());
        assert!(app.status.is_some());
    }

    #[test]
    fn create_posts_then_refetches() {
        let api = FakeApi::default();
        let mut app = App::new(&api);
        app.load();

        app.handle_key(KeyCode::Char('n'));
        type_text(&mut app, "Title");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "Body");
        app.handle_key(KeyCode::Enter);

        assert_eq!(*api.calls.borrow(), vec!["list", "create", "list"]);
        assert_eq!(app.notes.len(), 1);
        assert_eq!(app.notes[0].title, "Title");
        assert_eq!(app.notes[0].content, "Body");
        assert_eq!(app.create_form, TextForm::default());
        assert_eq!(app.focus, Focus::List);
    }

    #[test]
    fn create_with_blank_field_makes_no_call() {
        let api = FakeApi::default();
        let mut app = App::new(&api);
        app.load();

        app.handle_key(KeyCode::Char('n'));
        type_text(&mut app, "Title only");
        app.handle_key(KeyCode::Enter);

        assert_eq!(*api.calls.borrow(), vec!["list"]);
        assert_eq!(app.create_form.title, "Title only");
        assert_eq!(app.status.as_deref(), Some("Title and content are required"));
    }

    #[test]
    fn create_refuses_blank_but_sends_untrimmed_values() {
        let api = FakeApi::default();
        let mut app = App::new(&api);
        app.load();

        app.handle_key(KeyCode::Char('n'));
        type_text(&mut app, "   ");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "x");
        app.handle_key(KeyCode::Enter);
        assert_eq!(*api.calls.borrow(), vec!["list"]);

        app.create_form.title = " A ".into();
        app.handle_key(KeyCode::Enter);

        assert_eq!(*api.calls.borrow(), vec!["list", "create", "list"]);
        assert_eq!(app.notes[0].title, " A ");
    }

    #[test]
    fn edit_submit_puts_then_refetches() {
        let api = FakeApi::with_notes(&["old"]);
        let mut app = App::new(&api);
        app.load();

        app.handle_key(KeyCode::Char('e'));
        assert!(matches!(app.view, View::Editing(_)));
        for _ in 0.."old".len() {
            app.handle_key(KeyCode::Backspace);
        }
        type_text(&mut app, "new");
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.view, View::Ready);
        assert_eq!(*api.calls.borrow(), vec!["list", "update", "list"]);
        assert_eq!(app.notes[0].title, "new");
    }

    #[test]
    fn cancel_edit_discards_draft_without_calls() {
        let api = FakeApi::with_notes(&["keep"]);
        let mut app = App::new(&api);
        app.load();

        app.handle_key(KeyCode::Enter);
        type_text(&mut app, "zzz");
        app.handle_key(KeyCode::Esc);

        assert_eq!(app.view, View::Ready);
        assert_eq!(*api.calls.borrow(), vec!["list"]);
        assert_eq!(app.notes[0].title, "keep");
    }

    #[test]
    fn failed_edit_keeps_modal_open() {
        let api = FakeApi::with_notes(&["old"]);
        let mut app = App::new(&api);
        app.load();
        app.start_edit();
        api.failing.set(true);

        app.submit_edit();

        assert!(matches!(app.view, View::Editing(_)));
        assert_eq!(app.notes[0].title, "old");
        assert!(app.status.as_deref().unwrap().starts_with("update failed"));
    }

    #[test]
    fn delete_requires_confirmation() {
        let api = FakeApi::with_notes(&["a", "b"]);
        let mut app = App::new(&api);
        app.load();

        app.handle_key(KeyCode::Char('d'));
        assert!(matches!(app.view, View::ConfirmDelete(_)));
        app.handle_key(KeyCode::Char('n'));

        assert_eq!(app.view, View::Ready);
        assert_eq!(app.notes.len(), 2);
        assert_eq!(*api.calls.borrow(), vec!["list"]);

        app.handle_key(KeyCode::Char('d'));
        app.handle_key(KeyCode::Char('y'));

        assert_eq!(*api.calls.borrow(), vec!["list", "delete", "list"]);
        assert_eq!(app.notes.len(), 1);
        assert_eq!(app.notes[0].title, "b");
    }

    #[test]
    fn selection_stays_in_bounds_after_refetch() {
        let api = FakeApi::with_notes(&["a", "b"]);
        let mut app = App::new(&api);
        app.load();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 1);

        app.request_delete();
        app.answer_delete(true);

        assert_eq!(app.selected, 0);
        assert_eq!(app.selected_note().unwrap().title, "a");
    }

    #[test]
    fn quit_from_list() {
        let api = FakeApi::default();
        let mut app = App::new(&api);
        app.load();

        app.handle_key(KeyCode::Char('q'));

        assert!(app.should_quit);
    }
}
