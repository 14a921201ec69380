use std::collections::BTreeSet;
use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::book::Notebook;
use crate::calc::Calculator;
use crate::error::{exit_codes, Error, Result};
use crate::search::SearchOutcome;

use super::view;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Notes,
    Calculator,
    Todo,
    Search,
    Help,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Notes, Tab::Calculator, Tab::Todo, Tab::Search, Tab::Help];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Notes => "Notes",
            Tab::Calculator => "Calculator",
            Tab::Todo => "To-Do",
            Tab::Search => "Search",
            Tab::Help => "Help",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteFocus {
    Title,
    Content,
    List,
}

impl NoteFocus {
    fn next(self) -> Self {
        match self {
            NoteFocus::Title => NoteFocus::Content,
            NoteFocus::Content => NoteFocus::List,
            NoteFocus::List => NoteFocus::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            NoteFocus::Title => NoteFocus::List,
            NoteFocus::Content => NoteFocus::Title,
            NoteFocus::List => NoteFocus::Content,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

pub struct AppState {
    pub(crate) tab: Tab,
    pub(crate) book: Notebook,
    pub(crate) calculator: Calculator,
    pub(crate) note_title: String,
    pub(crate) note_content: String,
    pub(crate) note_focus: NoteFocus,
    pub(crate) note_selected: Option<usize>,
    pub(crate) todo_input: String,
    pub(crate) todo_cursor: Option<usize>,
    pub(crate) todo_marked: BTreeSet<usize>,
    pub(crate) search_input: String,
    pub(crate) search_outcome: Option<SearchOutcome>,
    status: Option<(StatusKind, String)>,
}

impl AppState {
    pub fn new(book: Notebook) -> Self {
        let note_selected = if book.notes.is_empty() { None } else { Some(0) };
        let todo_cursor = if book.tasks.is_empty() { None } else { Some(0) };
        Self {
            tab: Tab::Notes,
            book,
            calculator: Calculator::new(),
            note_title: String::new(),
            note_content: String::new(),
            note_focus: NoteFocus::Title,
            note_selected,
            todo_input: String::new(),
            todo_cursor,
            todo_marked: BTreeSet::new(),
            search_input: String::new(),
            search_outcome: None,
            status: None,
        }
    }

    pub(crate) fn status(&self) -> Option<(StatusKind, &str)> {
        self.status
            .as_ref()
            .map(|(kind, message)| (*kind, message.as_str()))
    }

    fn info(&mut self, message: impl Into<String>) {
        self.status = Some((StatusKind::Info, message.into()));
    }

    /// Show user errors in the status line; anything else is fatal.
    fn report(&mut self, result: Result<String>) -> Result<()> {
        match result {
            Ok(message) => {
                self.info(message);
                Ok(())
            }
            Err(err) if err.exit_code() == exit_codes::USER_ERROR => {
                self.status = Some((StatusKind::Error, user_message(&err)));
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Apply one key press. Returns `Ok(true)` when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => return Ok(true),
            KeyCode::F(n @ 1..=5) => {
                self.tab = Tab::ALL[usize::from(n) - 1];
                return Ok(false);
            }
            KeyCode::Right if ctrl => {
                self.tab = self.tab.next();
                return Ok(false);
            }
            KeyCode::Left if ctrl => {
                self.tab = self.tab.prev();
                return Ok(false);
            }
            _ => {}
        }

        match self.tab {
            Tab::Notes => self.handle_notes_key(key, ctrl)?,
            Tab::Calculator => self.handle_calculator_key(key),
            Tab::Todo => self.handle_todo_key(key, ctrl)?,
            Tab::Search => self.handle_search_key(key)?,
            Tab::Help => {}
        }
        Ok(false)
    }

    // =========================================================================
    // Notes
    // =========================================================================

    fn handle_notes_key(&mut self, key: KeyEvent, ctrl: bool) -> Result<()> {
        match key.code {
            KeyCode::Char('s') if ctrl => self.save_note(),
            KeyCode::Char('l') if ctrl => {
                self.load_note();
                Ok(())
            }
            KeyCode::Char('n') if ctrl => {
                self.new_note();
                Ok(())
            }
            KeyCode::Char('d') if ctrl => self.delete_note(),
            KeyCode::Tab => {
                self.note_focus = self.note_focus.next();
                Ok(())
            }
            KeyCode::BackTab => {
                self.note_focus = self.note_focus.prev();
                Ok(())
            }
            _ if ctrl => Ok(()),
            code => {
                match self.note_focus {
                    NoteFocus::Title => match code {
                        KeyCode::Char(ch) => self.note_title.push(ch),
                        KeyCode::Backspace => {
                            self.note_title.pop();
                        }
                        KeyCode::Enter => self.note_focus = NoteFocus::Content,
                        _ => {}
                    },
                    NoteFocus::Content => match code {
                        KeyCode::Char(ch) => self.note_content.push(ch),
                        KeyCode::Enter => self.note_content.push('\n'),
                        KeyCode::Backspace => {
                            self.note_content.pop();
                        }
                        _ => {}
                    },
                    NoteFocus::List => match code {
                        KeyCode::Up => {
                            self.note_selected = step(self.note_selected, self.book.notes.len(), -1)
                        }
                        KeyCode::Down => {
                            self.note_selected = step(self.note_selected, self.book.notes.len(), 1)
                        }
                        KeyCode::Enter => self.select_note(),
                        _ => {}
                    },
                }
                Ok(())
            }
        }
    }

    fn save_note(&mut self) -> Result<()> {
        let title = self.note_title.trim().to_string();
        let content = self.note_content.trim().to_string();
        let result = self
            .book
            .notes
            .put(&title, &content)
            .map(|()| format!("Note '{title}' saved successfully!"));
        let saved = result.is_ok();
        self.report(result)?;
        if saved {
            self.note_title = title.clone();
            self.note_selected = self.book.notes.list().iter().position(|t| *t == title);
        }
        Ok(())
    }

    fn load_note(&mut self) {
        let title = self.note_title.trim().to_string();
        match self.book.notes.get(&title) {
            Ok(content) => {
                self.note_content = content.to_string();
                self.info(format!("Loaded '{title}'"));
            }
            Err(_) => {
                self.status = Some((StatusKind::Error, "Note not found.".to_string()));
            }
        }
    }

    fn new_note(&mut self) {
        self.note_title.clear();
        self.note_content.clear();
        self.note_focus = NoteFocus::Title;
    }

    fn delete_note(&mut self) -> Result<()> {
        let title = self.note_title.trim().to_string();
        let result = self
            .book
            .notes
            .delete(&title)
            .map(|()| format!("Note '{title}' deleted."));
        let deleted = result.is_ok();
        self.report(result)?;
        if deleted {
            self.note_title.clear();
            self.note_content.clear();
            self.note_focus = NoteFocus::Title;
            self.note_selected = clamp(self.note_selected, self.book.notes.len());
        }
        Ok(())
    }

    fn select_note(&mut self) {
        let title = self
            .note_selected
            .and_then(|idx| self.book.notes.list().get(idx).map(|t| t.to_string()));
        if let Some(title) = title {
            self.note_title = title;
            self.load_note();
        }
    }

    // =========================================================================
    // Calculator
    // =========================================================================

    fn handle_calculator_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('=') => {
                self.calculator.evaluate();
            }
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Delete => {
                self.calculator.clear_all()
            }
            KeyCode::Backspace => self.calculator.clear_last(),
            KeyCode::Char(ch) => {
                self.calculator.push(ch);
            }
            _ => {}
        }
    }

    // =========================================================================
    // To-Do
    // =========================================================================

    fn handle_todo_key(&mut self, key: KeyEvent, ctrl: bool) -> Result<()> {
        match key.code {
            KeyCode::Char('d') if ctrl => self.mark_selected_done(),
            _ if ctrl => Ok(()),
            KeyCode::Enter => self.add_todo(),
            KeyCode::Delete => self.delete_selected(),
            KeyCode::Up => {
                self.todo_cursor = step(self.todo_cursor, self.book.tasks.len(), -1);
                Ok(())
            }
            KeyCode::Down => {
                self.todo_cursor = step(self.todo_cursor, self.book.tasks.len(), 1);
                Ok(())
            }
            KeyCode::Char(' ') if self.todo_input.is_empty() => {
                if let Some(idx) = self.todo_cursor {
                    if !self.todo_marked.remove(&idx) {
                        self.todo_marked.insert(idx);
                    }
                }
                Ok(())
            }
            KeyCode::Char(ch) => {
                self.todo_input.push(ch);
                Ok(())
            }
            KeyCode::Backspace => {
                self.todo_input.pop();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Rows to delete: the marked ones, or the cursor row when nothing is marked
    fn delete_targets(&self) -> Vec<usize> {
        if self.todo_marked.is_empty() {
            self.todo_cursor.into_iter().collect()
        } else {
            self.todo_marked.iter().copied().collect()
        }
    }

    fn add_todo(&mut self) -> Result<()> {
        let result = self
            .book
            .tasks
            .add(&self.todo_input)
            .map(|task| format!("Task added: {}", task.description));
        let added = result.is_ok();
        self.report(result)?;
        if added {
            self.todo_input.clear();
            if self.todo_cursor.is_none() {
                self.todo_cursor = Some(0);
            }
        }
        Ok(())
    }

    /// Only marked rows; the cursor row alone is never marked done
    fn mark_selected_done(&mut self) -> Result<()> {
        let selection: Vec<usize> = self.todo_marked.iter().copied().collect();
        let result = self
            .book
            .tasks
            .mark_done(&selection)
            .map(|applied| format!("Marked {applied} task(s) done"));
        self.report(result)?;
        self.todo_marked.clear();
        Ok(())
    }

    fn delete_selected(&mut self) -> Result<()> {
        let selection = self.delete_targets();
        let result = self
            .book
            .tasks
            .delete(&selection)
            .map(|removed| format!("Deleted {} task(s)", removed.len()));
        self.report(result)?;
        self.todo_marked.clear();
        self.todo_cursor = clamp(self.todo_cursor, self.book.tasks.len());
        Ok(())
    }

    // =========================================================================
    // Search
    // =========================================================================

    fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => match self.book.search(&self.search_input) {
                Ok(outcome) => {
                    let message = format!("{} match(es)", outcome.hits().len());
                    self.search_outcome = Some(outcome);
                    self.info(message);
                    Ok(())
                }
                Err(err) => {
                    self.search_outcome = None;
                    self.report(Err(err))
                }
            },
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_input.push(ch);
                Ok(())
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

fn user_message(err: &Error) -> String {
    match err {
        Error::NoteNotFound(_) => "Note not found.".to_string(),
        other => other.to_string(),
    }
}

/// Move a list selection by `delta`, staying within `len` rows
fn step(selected: Option<usize>, len: usize, delta: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = selected.unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, len as isize - 1);
    Some(next as usize)
}

fn clamp(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(selected.unwrap_or(0).min(len - 1))
    }
}

pub fn run(book: Notebook) -> Result<()> {
    let mut app = AppState::new(book);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| view::render(frame, app))?;
            dirty = false;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key)? {
                    break;
                }
                dirty = true;
            }
            Event::Resize(_, _) => dirty = true,
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn app(temp: &TempDir) -> AppState {
        AppState::new(Notebook::open(temp.path()).expect("open notebook"))
    }

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .expect("key handled")
    }

    fn ctrl(app: &mut AppState, ch: char) -> bool {
        app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
            .expect("key handled")
    }

    fn type_str(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn status_text(app: &AppState) -> Option<(StatusKind, String)> {
        app.status().map(|(kind, text)| (kind, text.to_string()))
    }

    #[test]
    fn tabs_switch_with_function_keys_and_ctrl_arrows() {
        let temp = TempDir::new().unwrap();
        let mut app = app(&temp);

        press(&mut app, KeyCode::F(2));
        assert_eq!(app.tab, Tab::Calculator);
        app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(app.tab, Tab::Todo);
        app.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL))
            .unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(app.tab, Tab::Notes);
        app.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(app.tab, Tab::Help);
    }

    #[test]
    fn ctrl_q_quits() {
        let temp = TempDir::new().unwrap();
        let mut app = app(&temp);
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(ctrl(&mut app, 'q'));
    }

    #[test]
    fn save_and_reload_note() {
        let temp = TempDir::new().unwrap();
        let mut app = app(&temp);

        type_str(&mut app, "Ideas");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "  build a boat ");
        ctrl(&mut app, 's');

        assert_eq!(app.book.notes.get("Ideas").unwrap(), "build a boat");
        assert_eq!(
            status_text(&app),
            Some((StatusKind::Info, "Note 'Ideas' saved successfully!".to_string()))
        );

        ctrl(&mut app, 'n');
        assert!(app.note_title.is_empty() && app.note_content.is_empty());

        type_str(&mut app, "Ideas");
        ctrl(&mut app, 'l');
        assert_eq!(app.note_content, "build a boat");
    }

    #[test]
    fn save_without_title_reports_error() {
        let temp = TempDir::new().unwrap();
        let mut app = app(&temp);

        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "orphan text");
        ctrl(&mut app, 's');

        assert!(app.book.notes.is_empty());
        assert_eq!(
            status_text(&app),
            Some((StatusKind::Error, "Enter a note title.".to_string()))
        );
    }

    #[test]
    fn load_and_delete_missing_note_report_not_found() {
        let temp = TempDir::new().unwrap();
        let mut app = app(&temp);

        type_str(&mut app, "ghost");
        ctrl(&mut app, 'l');
        assert_eq!(
            status_text(&app),
            Some((StatusKind::Error, "Note not found.".to_string()))
        );
        ctrl(&mut app, 'd');
        assert_eq!(
            status_text(&app),
            Some((StatusKind::Error, "Note not found.".to_string()))
        );
    }

    #[test]
    fn list_selection_loads_note() {
        let temp = TempDir::new().unwrap();
        let mut book = Notebook::open(temp.path()).unwrap();
        book.notes.put("first", "one").unwrap();
        book.notes.put("second", "two").unwrap();
        let mut app = AppState::new(book);

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.note_focus, NoteFocus::List);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.note_title, "second");
        assert_eq!(app.note_content, "two");
    }

    #[test]
    fn delete_clears_fields_and_clamps_selection() {
        let temp = TempDir::new().unwrap();
        let mut book = Notebook::open(temp.path()).unwrap();
        book.notes.put("only", "note").unwrap();
        let mut app = AppState::new(book);

        type_str(&mut app, "only");
        ctrl(&mut app, 'd');

        assert!(app.book.notes.is_empty());
        assert!(app.note_title.is_empty());
        assert_eq!(app.note_selected, None);
    }

    #[test]
    fn calculator_keys() {
        let temp = TempDir::new().unwrap();
        let mut app = app(&temp);
        press(&mut app, KeyCode::F(2));

        type_str(&mut app, "12+3x");
        assert_eq!(app.calculator.display(), "12+3");
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "2*1");
        press(&mut app, KeyCode::Char('='));
        assert_eq!(app.calculator.display(), "14");

        press(&mut app, KeyCode::Char('c'));
        type_str(&mut app, "1/0");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.calculator.display(), "Error");
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.calculator.display(), "");
    }

    #[test]
    fn todo_add_mark_and_delete() {
        let temp = TempDir::new().unwrap();
        let mut app = app(&temp);
        press(&mut app, KeyCode::F(3));

        for task in ["one", "two", "three"] {
            type_str(&mut app, task);
            press(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.book.tasks.len(), 3);
        assert!(app.todo_input.is_empty());

        // mark rows 0 and 2
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        ctrl(&mut app, 'd');
        let flags: Vec<bool> = app.book.tasks.list().iter().map(|t| t.done).collect();
        assert_eq!(flags, vec![true, false, true]);
        assert!(app.todo_marked.is_empty());

        // cursor row only
        press(&mut app, KeyCode::Delete);
        let left: Vec<&str> = app
            .book
            .tasks
            .list()
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(left, vec!["one", "two"]);
        assert_eq!(app.todo_cursor, Some(1));
    }

    #[test]
    fn todo_mark_done_without_selection_changes_nothing() {
        let temp = TempDir::new().unwrap();
        let mut app = app(&temp);
        press(&mut app, KeyCode::F(3));
        type_str(&mut app, "only");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.todo_cursor, Some(0));

        ctrl(&mut app, 'd');

        assert!(!app.book.tasks.list()[0].done);
        assert_eq!(
            status_text(&app),
            Some((StatusKind::Info, "Marked 0 task(s) done".to_string()))
        );
    }

    #[test]
    fn todo_space_types_when_input_not_empty() {
        let temp = TempDir::new().unwrap();
        let mut app = app(&temp);
        press(&mut app, KeyCode::F(3));

        type_str(&mut app, "buy milk");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.book.tasks.list()[0].description, "buy milk");
        assert!(app.todo_marked.is_empty());
    }

    #[test]
    fn todo_blank_input_reports_error() {
        let temp = TempDir::new().unwrap();
        let mut app = app(&temp);
        press(&mut app, KeyCode::F(3));

        press(&mut app, KeyCode::Enter);
        assert!(app.book.tasks.is_empty());
        assert_eq!(
            status_text(&app),
            Some((StatusKind::Error, "Enter a task.".to_string()))
        );
    }

    #[test]
    fn search_tab_runs_search() {
        let temp = TempDir::new().unwrap();
        let mut book = Notebook::open(temp.path()).unwrap();
        book.notes.put("Greeting", "Hello there").unwrap();
        let mut app = AppState::new(book);
        press(&mut app, KeyCode::F(4));

        press(&mut app, KeyCode::Enter);
        assert_eq!(
            status_text(&app),
            Some((StatusKind::Error, "Enter a keyword.".to_string()))
        );

        type_str(&mut app, "HELLO");
        press(&mut app, KeyCode::Enter);
        let outcome = app.search_outcome.as_ref().expect("outcome");
        assert_eq!(outcome.hits()[0].title, "Greeting");

        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "zzz");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.search_outcome, Some(SearchOutcome::NoMatches));
    }

    #[test]
    fn step_and_clamp_bounds() {
        assert_eq!(step(None, 0, 1), None);
        assert_eq!(step(Some(0), 3, -1), Some(0));
        assert_eq!(step(Some(2), 3, 1), Some(2));
        assert_eq!(clamp(Some(5), 2), Some(1));
        assert_eq!(clamp(Some(0), 0), None);
    }
}
