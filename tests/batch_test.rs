//! Integration tests for directory processing.

mod common;

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use docoutline::batch::process_directory_with_progress;
use docoutline::{process_directory, BatchOptions, DocumentOutline, OutlineOptions};
use tempfile::TempDir;

fn input_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("report.pdf"), common::report_pdf()).unwrap();
    fs::write(
        dir.path().join("flyer.v2.pdf"),
        common::build_pdf(&[vec![
            ("RSVP: 555-0100", 20.0, 760.0),
            ("YOU ARE INVITED!", 14.0, 700.0),
        ]]),
    )
    .unwrap();
    fs::write(dir.path().join("garbage.pdf"), b"not a pdf at all").unwrap();
    fs::write(dir.path().join("readme.txt"), b"ignored").unwrap();
    dir
}

fn read_outline(path: &std::path::Path) -> DocumentOutline {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_process_directory_writes_one_json_per_pdf() {
    let input = input_dir();
    let output = TempDir::new().unwrap();
    let out_dir = output.path().join("out");

    let summary = process_directory(input.path(), &out_dir, &BatchOptions::default()).unwrap();

    assert_eq!(summary.processed(), 3);
    let mut written: Vec<_> = fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    written.sort();
    assert_eq!(written, vec!["flyer.v2.json", "garbage.json", "report.json"]);

    let report = read_outline(&out_dir.join("report.json"));
    assert_eq!(report.title, "Quarterly Report  ");
    assert_eq!(report.outline.len(), 3);

    let flyer = read_outline(&out_dir.join("flyer.v2.json"));
    assert_eq!(flyer.title, "");
    assert_eq!(flyer.outline[0].text, "YOU ARE INVITED! ");
    assert_eq!(flyer.outline[0].page, 0);
}

#[test]
fn test_unreadable_pdf_gets_empty_outline() {
    let input = input_dir();
    let output = TempDir::new().unwrap();

    let summary = process_directory(input.path(), output.path(), &BatchOptions::default()).unwrap();

    let failed: Vec<_> = summary.failed().collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].input.ends_with("garbage.pdf"));
    assert_eq!(failed[0].outline, DocumentOutline::empty());

    let json = fs::read_to_string(output.path().join("garbage.json")).unwrap();
    assert_eq!(json, "{\n  \"title\": \"\",\n  \"outline\": []\n}");
}

#[test]
fn test_sequential_matches_parallel() {
    let input = input_dir();
    let parallel_out = TempDir::new().unwrap();
    let sequential_out = TempDir::new().unwrap();

    let parallel = process_directory(input.path(), parallel_out.path(), &BatchOptions::default())
        .unwrap();
    let sequential = process_directory(
        input.path(),
        sequential_out.path(),
        &BatchOptions::new().sequential(),
    )
    .unwrap();

    let outlines = |summary: &docoutline::BatchSummary| {
        summary
            .items
            .iter()
            .map(|item| (item.input.clone(), item.outline.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(outlines(&parallel), outlines(&sequential));

    for name in ["report.json", "flyer.v2.json", "garbage.json"] {
        assert_eq!(
            fs::read(parallel_out.path().join(name)).unwrap(),
            fs::read(sequential_out.path().join(name)).unwrap()
        );
    }
}

#[test]
fn test_progress_callback_sees_every_file() {
    let input = input_dir();
    let output = TempDir::new().unwrap();
    let seen = AtomicUsize::new(0);

    process_directory_with_progress(input.path(), output.path(), &BatchOptions::default(), |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    assert_eq!(seen.load(Ordering::SeqCst), 3);
}

#[test]
fn test_outline_options_are_applied() {
    let input = TempDir::new().unwrap();
    fs::write(
        input.path().join("labels.pdf"),
        common::build_pdf(&[
            vec![("Pathways Handbook", 20.0, 760.0), ("Regular Pathway", 14.0, 700.0)],
            vec![("Program Outcomes", 14.0, 760.0)],
            vec![("Contact Us", 14.0, 760.0)],
        ]),
    )
    .unwrap();
    let output = TempDir::new().unwrap();

    let with_rules = process_directory(input.path(), output.path(), &BatchOptions::default())
        .unwrap();
    assert_eq!(with_rules.items[0].outline.outline.len(), 2);

    let options =
        BatchOptions::new().with_outline_options(OutlineOptions::new().without_corpus_rules());
    let without = process_directory(input.path(), output.path(), &options).unwrap();
    assert_eq!(without.items[0].outline.outline.len(), 3);
}

#[test]
fn test_missing_input_directory() {
    let output = TempDir::new().unwrap();
    let result = process_directory("/nonexistent/input", output.path(), &BatchOptions::default());
    assert!(result.is_err());
}
