mod support;

use std::fs;

use notebook::notes::NoteStore;
use notebook::storage::{load_json, save_json};
use notebook::todo::{Task, TaskList};
use notebook::{Error, Notebook};

use support::TestDir;

#[test]
fn missing_file_returns_default_without_creating_it() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;
    let path = dir.path().join("absent.json");

    let tasks: Vec<Task> = load_json(&path, Vec::new())?;
    assert!(tasks.is_empty());
    assert!(!path.exists());
    Ok(())
}

#[test]
fn save_creates_parent_directories() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;
    let path = dir.path().join("nested").join("deeper").join("data.json");

    save_json(&path, &vec![1, 2, 3])?;
    let loaded: Vec<i32> = load_json(&path, Vec::new())?;
    assert_eq!(loaded, vec![1, 2, 3]);
    Ok(())
}

#[test]
fn files_are_pretty_printed() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;
    let mut store = NoteStore::open(dir.path().join("notes.json"))?;
    store.put("a", "1")?;

    assert_eq!(dir.read_file("notes.json")?, "{\n  \"a\": \"1\"\n}");
    Ok(())
}

#[test]
fn notebook_reload_reproduces_collections() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;
    {
        let mut book = Notebook::open(dir.path())?;
        for (title, content) in [("z", "last letter"), ("a", "first"), ("m", "middle")] {
            book.notes.put(title, content)?;
        }
        for task in ["one", "two", "three"] {
            book.tasks.add(task)?;
        }
        book.tasks.mark_done(&[1])?;
    }

    let book = Notebook::open(dir.path())?;
    assert_eq!(book.notes.list(), vec!["z", "a", "m"]);
    assert_eq!(book.notes.get("a")?, "first");
    let tasks: Vec<(&str, bool)> = book
        .tasks
        .list()
        .iter()
        .map(|task| (task.description.as_str(), task.done))
        .collect();
    assert_eq!(tasks, vec![("one", false), ("two", true), ("three", false)]);
    Ok(())
}

#[test]
fn hand_written_files_load() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;
    dir.write_file("notes.json", r#"{"Second": "b", "First": "a"}"#)?;
    dir.write_file(
        "todos.json",
        r#"[{"task": "buy bread", "done": false}, {"task": "pay rent", "done": true}]"#,
    )?;

    let book = Notebook::open(dir.path())?;
    assert_eq!(book.notes.list(), vec!["Second", "First"]);
    assert_eq!(book.tasks.list()[1].description, "pay rent");
    assert!(book.tasks.list()[1].done);
    Ok(())
}

#[test]
fn malformed_tasks_file_is_parse_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;
    let path = dir.write_file("todos.json", "[{\"task\": 1}]")?;

    let err = TaskList::open(&path).unwrap_err();
    match err {
        Error::Parse { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(fs::read_to_string(&path)?, "[{\"task\": 1}]");
    Ok(())
}

#[test]
fn failed_validation_does_not_touch_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;
    let mut book = Notebook::open(dir.path())?;

    assert!(book.notes.put("  ", "orphan").is_err());
    assert!(book.tasks.add("").is_err());
    assert!(book.notes.delete("ghost").is_err());

    assert!(!dir.path().join("notes.json").exists());
    assert!(!dir.path().join("todos.json").exists());
    Ok(())
}
