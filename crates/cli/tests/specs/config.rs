// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;

#[test]
fn config_file_sets_stream_and_level() {
    let project = Project::empty();
    let config = project.file("logmon.toml", "name = \"from-config\"\nlevel = 2\n");

    project
        .cli()
        .args(&["--config", &config.to_string_lossy(), "write", "-m", "hi"])
        .passes();

    assert_eq!(entries(&project.log("from-config")), vec!["[WARN] hi"]);
}

#[test]
fn env_config_path_is_honoured() {
    let project = Project::empty();
    let config = project.file("logmon.toml", "name = \"env-config\"\n");

    project
        .cli()
        .env("LOGMON_CONFIG", &config)
        .args(&["write", "-m", "hi"])
        .passes();

    assert_eq!(entries(&project.log("env-config")), vec!["[INFO] hi"]);
}

#[test]
fn env_dir_is_used_without_flag() {
    let project = Project::empty();

    CliBuilder::new()
        .pwd(project.path())
        .env("LOGMON_DIR", project.logs())
        .args(&["write", "-m", "hi"])
        .passes();

    assert_eq!(entries(&project.log("system")), vec!["[INFO] hi"]);
}

#[test]
fn unknown_config_key_exits_1() {
    let project = Project::empty();
    let config = project.file("logmon.toml", "colour = \"blue\"\n");

    project
        .cli()
        .args(&["--config", &config.to_string_lossy(), "flush"])
        .fails()
        .stderr_has("invalid config file");
}

#[test]
fn missing_config_file_exits_1() {
    let project = Project::empty();

    project
        .cli()
        .args(&["--config", "nope.toml", "flush"])
        .fails()
        .stderr_has("failed to read config file");
}

#[test]
fn zero_flush_interval_warns_and_uses_default() {
    let project = Project::empty();
    let config = project.file("logmon.toml", "flush_interval_secs = 0\n");

    project
        .cli()
        .args(&["--config", &config.to_string_lossy(), "flush"])
        .passes()
        .stderr_has("flush interval must be positive");
}
