// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;

#[test]
fn batch_ingests_valid_lines_and_warns_on_bad_ones() {
    let project = Project::empty();
    let input = project.file(
        "batch.txt",
        "# comment\n\n1|disk failure\nmissing separator\nWARN|low space\n 3 |  started\nloud|odd\n",
    );

    project
        .cli()
        .args(&["batch", "-n", "errors", "-b", &input.to_string_lossy()])
        .passes()
        .stderr_has("line 4")
        .stderr_has("missing '|'")
        .stderr_has("line 7: unrecognized level (loud), using INFO");

    similar_asserts::assert_eq!(
        entries(&project.log("errors")),
        vec![
            "[ERROR] disk failure",
            "[WARN] low space",
            "[INFO] started",
            "[INFO] odd",
        ]
    );
}

#[test]
fn batch_entries_share_one_timestamp() {
    let project = Project::empty();
    let input = project.file("batch.txt", "2|a\n2|b\n2|c\n");

    project
        .cli()
        .args(&["batch", "-n", "main", "-b", &input.to_string_lossy()])
        .passes();

    let log = project.log("main");
    let stamps: Vec<&str> = log.lines().map(|l| &l[..19]).collect();
    assert_eq!(stamps.len(), 3);
    assert!(stamps.iter().all(|s| *s == stamps[0]));
}

#[test]
fn batch_without_file_flag_exits_1() {
    let project = Project::empty();

    project
        .cli()
        .args(&["batch", "-n", "main"])
        .fails()
        .stderr_has("requires an input file (-b)");
}

#[test]
fn missing_batch_file_exits_1() {
    let project = Project::empty();

    project
        .cli()
        .args(&["batch", "-b", "does-not-exist.txt"])
        .fails()
        .stderr_has("cannot open batch file");
}
