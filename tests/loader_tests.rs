use dirgrep::error::DirgrepError;
use dirgrep::loader::{load_file_lines, LINE_PROGRESS_INTERVAL};
use dirgrep::progress::CancelToken;
use std::fs;
use tempfile::TempDir;

#[test]
fn loads_all_lines_with_total_count() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preview.txt");
    fs::write(&path, "one\ntwo\r\nthree").unwrap();

    let (lines, total) =
        load_file_lines(&path, &CancelToken::new(), &mut |_| {}).unwrap();

    assert_eq!(total, 3);
    assert_eq!(lines, vec!["one", "two", "three"]);
}

#[test]
fn missing_file_fails_without_partial_reads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gone.txt");

    let mut progress_calls = 0usize;
    let result = load_file_lines(&path, &CancelToken::new(), &mut |_| progress_calls += 1);

    assert!(matches!(result, Err(DirgrepError::FileNotFound(_))));
    assert_eq!(progress_calls, 0);
}

#[test]
fn reports_progress_every_interval() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("long.txt");
    let body: String = (0..450).map(|i| format!("line {i}\n")).collect();
    fs::write(&path, body).unwrap();

    let mut reported = Vec::new();
    let (lines, total) =
        load_file_lines(&path, &CancelToken::new(), &mut |count| reported.push(count)).unwrap();

    assert_eq!(total, 450);
    assert_eq!(lines.len(), 450);
    assert_eq!(
        reported,
        vec![LINE_PROGRESS_INTERVAL, 2 * LINE_PROGRESS_INTERVAL]
    );
}

#[test]
fn cancelled_token_aborts_the_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("any.txt");
    fs::write(&path, "a\nb\n").unwrap();

    let cancel = CancelToken::new();
    cancel.cancel();
    let result = load_file_lines(&path, &cancel, &mut |_| {});

    assert!(matches!(result, Err(DirgrepError::Cancelled)));
}
