// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;

#[test]
fn write_appends_one_flushed_entry() {
    let project = Project::empty();

    project
        .cli()
        .args(&["write", "-n", "main", "-m", "Test message"])
        .passes()
        .stderr_eq("");

    similar_asserts::assert_eq!(entries(&project.log("main")), vec!["[INFO] Test message"]);
}

#[test]
fn write_uses_configured_level_as_severity() {
    let project = Project::empty();

    project
        .cli()
        .args(&["-l", "1", "write", "-n", "main", "-m", "boom"])
        .passes();

    assert_eq!(entries(&project.log("main")), vec!["[ERROR] boom"]);
}

#[test]
fn write_defaults_to_system_stream() {
    let project = Project::empty();

    project.cli().args(&["write", "-m", "hello"]).passes();

    assert_eq!(entries(&project.log("system")), vec!["[INFO] hello"]);
}

#[test]
fn repeated_writes_append_in_order() {
    let project = Project::empty();

    for message in ["one", "two", "three"] {
        project
            .cli()
            .args(&["write", "-n", "main", "-m", message])
            .passes();
    }

    assert_eq!(
        entries(&project.log("main")),
        vec!["[INFO] one", "[INFO] two", "[INFO] three"]
    );
}

#[test]
fn out_of_range_level_warns_and_uses_info() {
    let project = Project::empty();

    project
        .cli()
        .args(&["-l", "7", "write", "-n", "main", "-m", "hello"])
        .passes()
        .stderr_has("log level must be between 1-4, using INFO");

    assert_eq!(entries(&project.log("main")), vec!["[INFO] hello"]);
}

#[test]
fn write_without_message_exits_1() {
    let project = Project::empty();

    project
        .cli()
        .args(&["write", "-n", "main"])
        .fails()
        .stderr_has("requires a message (-m)");

    assert!(!project.exists("main.log"));
}

#[test]
fn oversized_log_is_rotated_on_next_write() {
    let project = Project::empty();
    let big = "x".repeat(102_401);
    std::fs::create_dir_all(project.logs()).unwrap();
    std::fs::write(project.logs().join("main.log"), &big).unwrap();

    project
        .cli()
        .args(&["write", "-n", "main", "-m", "fresh"])
        .passes();

    let old = std::fs::read_to_string(project.logs().join("main.log.old")).unwrap();
    assert_eq!(old.len(), big.len());
    assert_eq!(entries(&project.log("main")), vec!["[INFO] fresh"]);
}

#[test]
fn stream_name_with_path_separator_exits_1() {
    let project = Project::empty();

    project
        .cli()
        .args(&["write", "-n", "../escape", "-m", "hi"])
        .fails()
        .stderr_has("invalid stream name '../escape'");

    assert!(!project.path().join("escape.log").exists());
}
