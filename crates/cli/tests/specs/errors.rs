// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;

#[test]
fn non_integer_level_exits_1() {
    let project = Project::empty();

    project
        .cli()
        .args(&["-l", "loud", "write", "-m", "hi"])
        .fails();

    assert!(!project.exists("system.log"));
}

#[test]
fn unknown_command_exits_1() {
    CliBuilder::new().args(&["rotate"]).fails();
}

#[test]
fn help_exits_0() {
    CliBuilder::new()
        .args(&["--help"])
        .passes()
        .stdout_has("--low-power");
}

#[test]
fn file_in_place_of_log_dir_falls_back_to_local_logs() {
    let project = Project::empty();
    let blocker = project.file("blocker", "not a dir");

    CliBuilder::new()
        .pwd(project.path())
        .args(&["-d", &blocker.to_string_lossy(), "write", "-m", "hi"])
        .passes()
        .stderr_has("not a directory");

    assert_eq!(entries(&project.log("system")), vec!["[INFO] hi"]);
}

#[test]
fn unusable_fallback_exits_1() {
    let project = Project::empty();
    let blocker = project.file("blocker", "not a dir");
    project.file("logs", "also not a dir");

    CliBuilder::new()
        .pwd(project.path())
        .args(&["-d", &blocker.to_string_lossy(), "flush"])
        .fails()
        .stderr_has("failed to initialize logging system");
}
