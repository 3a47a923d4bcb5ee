//! Integration tests for the summarization handoff.
//!
//! The collaborator stubs are small `sh` scripts, so these tests are
//! Unix-only.

#![cfg(unix)]

use std::time::{Duration, Instant};

use pdfbrief::{
    build_outline, summarize_outline, DocumentOutline, Error, ProgramEntry, Summarizer, Token,
};

fn sample_outline() -> DocumentOutline {
    DocumentOutline {
        title: "Report".to_string(),
        programs: vec![
            ProgramEntry::new("1", "Intro to Systems"),
            ProgramEntry::new("2", "Design"),
        ],
        body_text: "Report 1. Intro to Systems 2. Design lorem ipsum".to_string(),
    }
}

fn stub(script: &str, scratch: &tempfile::TempDir) -> Summarizer {
    Summarizer::new("sh")
        .arg("-c")
        .arg(script)
        .with_scratch_dir(scratch.path())
}

fn scratch_file_count(scratch: &tempfile::TempDir) -> usize {
    std::fs::read_dir(scratch.path()).unwrap().count()
}

#[test]
fn test_success_trims_stdout() {
    let scratch = tempfile::tempdir().unwrap();
    let summarizer = stub("echo '   OK   '", &scratch);

    let summary = summarizer.summarize(&sample_outline()).unwrap();
    assert_eq!(summary, "OK");
    assert_eq!(scratch_file_count(&scratch), 0);
}

#[test]
fn test_positional_arguments_in_order() {
    let scratch = tempfile::tempdir().unwrap();
    // With `sh -c SCRIPT`, the appended positionals arrive as $0, $1, $2.
    let summarizer = stub(r#"printf '%s|%s|' "$0" "$1"; cat "$2""#, &scratch);

    let outline = sample_outline();
    let summary = summarizer.summarize(&outline).unwrap();
    assert_eq!(
        summary,
        format!(
            "{}|{}|{}",
            outline.title,
            "Intro to Systems; Design",
            outline.body_text
        )
    );
}

#[test]
fn test_nonzero_exit_fails_and_cleans_up() {
    let scratch = tempfile::tempdir().unwrap();
    let summarizer = stub("echo boom >&2; exit 3", &scratch);

    let result = summarizer.summarize(&sample_outline());
    match result {
        Err(Error::Summarization(message)) => {
            assert!(message.contains("boom"), "message: {}", message);
        }
        other => panic!("expected summarization failure, got {:?}", other),
    }

    // The transient body file is gone even though the collaborator failed.
    assert_eq!(scratch_file_count(&scratch), 0);
}

#[test]
fn test_launch_error_fails_and_cleans_up() {
    let scratch = tempfile::tempdir().unwrap();
    let summarizer = Summarizer::new("pdfbrief-test-missing-binary")
        .with_scratch_dir(scratch.path());

    let result = summarizer.summarize(&sample_outline());
    assert!(matches!(result, Err(Error::Summarization(_))));
    assert_eq!(scratch_file_count(&scratch), 0);
}

#[test]
fn test_timeout_kills_collaborator_and_cleans_up() {
    let scratch = tempfile::tempdir().unwrap();
    let summarizer = stub("sleep 5", &scratch).with_timeout(Duration::from_millis(200));

    let started = Instant::now();
    let result = summarizer.summarize(&sample_outline());
    assert!(started.elapsed() < Duration::from_secs(4));

    match result {
        Err(Error::Summarization(message)) => {
            assert!(message.contains("timed out"), "message: {}", message);
        }
        other => panic!("expected timeout failure, got {:?}", other),
    }
    assert_eq!(scratch_file_count(&scratch), 0);
}

#[test]
fn test_end_to_end_pipeline_with_stub() {
    let tokens = vec![
        Token::new("Report", 24),
        Token::new("1.", 14),
        Token::new("Intro", 14),
        Token::new("to", 14),
        Token::new("Systems", 14),
        Token::new("assorted body text", 11),
        Token::new("2.", 14),
        Token::new("Design", 14),
        Token::new("closing remarks", 10),
    ];

    let scratch = tempfile::tempdir().unwrap();
    let brief = summarize_outline(build_outline(&tokens), &stub("echo OK", &scratch)).unwrap();

    assert_eq!(brief.title, "Report");
    assert_eq!(
        brief.programs,
        vec![
            ProgramEntry::new("1", "Intro to Systems"),
            ProgramEntry::new("2", "Design"),
        ]
    );
    assert_eq!(brief.summary, "OK");
    assert_eq!(scratch_file_count(&scratch), 0);
}
