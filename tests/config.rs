mod support;

use notebook::config::Config;
use notebook::Notebook;
use predicates::str::contains;

use support::TestDir;

#[test]
fn missing_config_uses_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;
    let config = Config::load_from_dir(dir.path())?;
    assert_eq!(config.storage.notes_file, "notes.json");
    assert_eq!(config.search.snippet_chars, 150);
    assert!(!dir.path().join(".notebook.toml").exists());
    Ok(())
}

#[test]
fn partial_config_keeps_other_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;
    dir.write_config("[storage]\nnotes_file = \"journal.json\"\n\n[search]\nsnippet_chars = 60\n")?;

    let loaded = Config::load_from_dir(dir.path())?;
    assert_eq!(loaded.storage.notes_file, "journal.json");
    assert_eq!(loaded.storage.todos_file, "todos.json");
    assert_eq!(loaded.search.snippet_chars, 60);
    Ok(())
}

#[test]
fn custom_file_names_are_used() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;
    dir.write_config("[storage]\nnotes_file = \"journal.json\"\ntodos_file = \"chores.json\"\n")?;

    dir.cmd()
        .args(["note", "save", "Mon", "rainy"])
        .assert()
        .success();
    dir.cmd().args(["todo", "add", "dishes"]).assert().success();

    assert!(dir.path().join("journal.json").exists());
    assert!(dir.path().join("chores.json").exists());
    assert!(!dir.path().join("notes.json").exists());
    assert!(!dir.path().join("todos.json").exists());

    let book = Notebook::open(dir.path())?;
    assert_eq!(book.notes.get("Mon")?, "rainy");
    assert_eq!(book.tasks.len(), 1);
    Ok(())
}

#[test]
fn path_in_file_name_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;
    dir.write_config("[storage]\nnotes_file = \"../escape.json\"\n")?;

    let err = Notebook::open(dir.path()).unwrap_err();
    assert!(matches!(err, notebook::Error::InvalidConfig(_)));
    Ok(())
}

#[test]
fn unparsable_config_fails_operation() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;
    dir.write_config("[search\nsnippet_chars = ")?;

    dir.cmd()
        .args(["note", "ls"])
        .assert()
        .failure()
        .code(4)
        .stderr(contains("TOML parse error"));
    Ok(())
}
