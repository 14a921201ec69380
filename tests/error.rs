use std::path::PathBuf;

use notebook::error::{exit_codes, Error};

#[test]
fn exit_codes_map_correctly() {
    let user = Error::Validation("Enter a task.".to_string());
    assert_eq!(user.exit_code(), exit_codes::USER_ERROR);

    let missing = Error::NoteNotFound("ghost".to_string());
    assert_eq!(missing.exit_code(), exit_codes::USER_ERROR);

    let config = Error::InvalidConfig("bad".to_string());
    assert_eq!(config.exit_code(), exit_codes::USER_ERROR);

    let io = Error::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
    assert_eq!(io.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn parse_error_names_file() {
    let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = Error::Parse {
        path: PathBuf::from("/data/notes.json"),
        source,
    };
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
    assert!(err.to_string().contains("/data/notes.json"));
    assert_eq!(
        err.details(),
        Some(serde_json::json!({ "path": "/data/notes.json" }))
    );
}

#[test]
fn not_found_details_carry_title() {
    let err = Error::NoteNotFound("ghost".to_string());
    assert!(err.to_string().contains("Note not found"));
    assert_eq!(err.details(), Some(serde_json::json!({ "title": "ghost" })));
}

#[test]
fn validation_displays_message_only() {
    let err = Error::Validation("Enter a keyword.".to_string());
    assert_eq!(err.to_string(), "Enter a keyword.");
}
