use std::path::PathBuf;

use super::source_loader::SourceInput;

#[test]
fn inline_text_wins() {
    let input = SourceInput::new(
        Some(PathBuf::from("ignored.grm")),
        Some("x = 'a';".to_string()),
    );
    assert_eq!(input.load(), Ok("x = 'a';".to_string()));
    assert_eq!(input.display_name(), "<expr>");
}

#[test]
fn display_names() {
    let stdin = SourceInput::new(Some(PathBuf::from("-")), None);
    assert_eq!(stdin.display_name(), "<stdin>");

    let file = SourceInput::new(Some(PathBuf::from("digits.grm")), None);
    assert_eq!(file.display_name(), "digits.grm");
}

#[test]
fn missing_input() {
    let input = SourceInput::new(None, None);
    let err = input.load().unwrap_err();
    assert!(err.starts_with("grammar is required"));
}

#[test]
fn missing_file() {
    let input = SourceInput::new(Some(PathBuf::from("does/not/exist.grm")), None);
    let err = input.load().unwrap_err();
    assert!(err.starts_with("failed to read 'does/not/exist.grm'"));
}
