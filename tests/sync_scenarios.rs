//! End-to-end sync scenarios against the in-memory store

use mdefaults::backend::{write_args, MemoryBackend};
use mdefaults::storage::{parse, render, EntryFile};
use mdefaults::sync::{pull, push, SyncError};
use mdefaults::{ConfigEntry, ValueType};
use tempfile::TempDir;

#[test]
fn push_then_pull_yields_canonical_booleans() {
    let backend = MemoryBackend::new();

    push(&parse("com.apple.dock autohide true\n"), &backend);
    // The store keeps booleans as digits
    assert_eq!(
        backend.get("com.apple.dock", "autohide"),
        Some(("1".to_string(), ValueType::Boolean))
    );

    let report = pull(&parse("com.apple.dock autohide\n"), &backend);
    assert_eq!(
        render(&report.entries),
        "com.apple.dock autohide -boolean true\n"
    );
}

#[test]
fn typed_file_survives_push_and_pull() {
    let backend = MemoryBackend::new();
    let text = "\
com.apple.dock autohide -boolean false
com.apple.dock tilesize -integer 48
com.apple.dock magnification-scale -float 1.5
com.apple.finder FXPreferredViewStyle Nlsv
com.example.app Greeting hello big world
";

    let entries = parse(text);
    let push_report = push(&entries, &backend);
    assert_eq!(push_report.written, 5);

    let pulled = pull(&entries, &backend);
    assert!(pulled.aggregate_error().is_none());
    assert_eq!(render(&pulled.entries), text);
}

#[test]
fn pull_isolates_failing_entry() {
    let backend = MemoryBackend::new();
    for (i, key) in ["a", "b", "c", "d", "e"].iter().enumerate() {
        backend.set("com.example.app", key, &i.to_string(), ValueType::Integer);
    }
    backend.fail_reads("com.example.app", "c");

    let entries: Vec<_> = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|key| ConfigEntry::new("com.example.app", *key).with_type(ValueType::Integer))
        .collect();

    let report = pull(&entries, &backend);

    assert_eq!(report.entries.len(), 5);
    for (i, entry) in report.entries.iter().enumerate() {
        if entry.key == "c" {
            assert_eq!(entry.value, None);
        } else {
            assert_eq!(entry.value, Some(i.to_string()));
        }
    }
    assert_eq!(
        report.aggregate_error(),
        Some(SyncError::PartialPull { failed: 1, total: 5 })
    );

    // The tracked key stays in the file, typed and without a value
    assert!(render(&report.entries).contains("com.example.app c -integer\n"));
}

#[test]
fn pull_picks_up_new_values_for_tracked_keys() {
    let dir = TempDir::new().unwrap();
    let file = EntryFile::new(dir.path().join(".mdefaults"));
    std::fs::write(
        file.path(),
        "com.apple.dock tilesize\ncom.apple.screencapture location ~/Desktop\n",
    )
    .unwrap();

    let backend = MemoryBackend::new();
    backend.set("com.apple.dock", "tilesize", "64", ValueType::Integer);
    backend.set(
        "com.apple.screencapture",
        "location",
        "~/Pictures/Screenshots",
        ValueType::String,
    );

    let report = pull(&file.read_all().unwrap(), &backend);
    file.write_all(&report.entries).unwrap();

    assert_eq!(
        std::fs::read_to_string(file.path()).unwrap(),
        "com.apple.dock tilesize -integer 64\n\
         com.apple.screencapture location ~/Pictures/Screenshots\n"
    );
}

#[test]
fn push_reports_failures_without_stopping() {
    let backend = MemoryBackend::new();
    backend.fail_writes("com.example.app", "Broken");

    let entries = parse(
        "com.example.app Broken 1\ncom.example.app Working 2\ncom.example.app Pending\n",
    );
    let report = push(&entries, &backend);

    assert_eq!(report.written, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(
        backend.get("com.example.app", "Working"),
        Some(("2".to_string(), ValueType::Integer))
    );
}

#[test]
fn pulled_collections_push_back_as_plist_text() {
    let backend = MemoryBackend::new();
    backend.set("com.example.app", "Tags", "(\n    a,\n    b\n)", ValueType::Array);
    backend.set(
        "com.example.app",
        "Window",
        "{\n    height = 600;\n    width = 800;\n}",
        ValueType::Dict,
    );

    let tracked = parse("com.example.app Tags\ncom.example.app Window\n");
    let text = render(&pull(&tracked, &backend).entries);
    assert_eq!(
        text,
        "com.example.app Tags -array ( a, b)\n\
         com.example.app Window -dict { height = 600; width = 800;}\n"
    );

    let target = MemoryBackend::new();
    let report = push(&parse(&text), &target);
    assert!(report.is_success());

    let args: Vec<_> = target
        .writes()
        .iter()
        .map(|(domain, key, value, value_type)| write_args(domain, key, value, *value_type))
        .collect();
    assert_eq!(
        args,
        vec![
            vec!["write", "com.example.app", "Tags", "( a, b)"],
            vec!["write", "com.example.app", "Window", "{ height = 600; width = 800;}"],
        ]
    );
}
