// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;

#[test]
fn clean_removes_only_log_files() {
    let project = Project::empty();
    project.file("logs/a.log", "a\n");
    project.file("logs/a.log.old", "old\n");
    project.file("logs/b.txt", "keep\n");

    project.cli().args(&["clean"]).passes();

    assert!(!project.exists("a.log"));
    assert!(!project.exists("a.log.old"));
    assert!(project.exists("b.txt"));
}

#[test]
fn flush_succeeds_on_empty_directory() {
    let project = Project::empty();

    project.cli().args(&["flush"]).passes();

    assert!(project.logs().is_dir());
}
