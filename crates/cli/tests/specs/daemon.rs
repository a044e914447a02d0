// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use crate::prelude::*;

/// Start the daemon and block until its signal handlers are installed.
fn start_daemon(project: &Project, extra: &[&str]) -> Child {
    let mut child = project
        .cli()
        .args(extra)
        .command()
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let stderr = child.stderr.take().unwrap();
    let mut lines = BufReader::new(stderr).lines();
    loop {
        match lines.next() {
            Some(Ok(line)) if line.contains("daemon ready") => break,
            Some(Ok(_)) => continue,
            _ => panic!("daemon exited before becoming ready"),
        }
    }
    // Keep draining stderr so the daemon never blocks on a full pipe.
    std::thread::spawn(move || for _ in lines {});
    child
}

fn signal(child: &Child, name: &str) {
    let status = Command::new("kill")
        .args([&format!("-{name}"), &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());
}

fn wait_exit(mut child: Child) -> Option<i32> {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(status) = child.try_wait().unwrap() {
            return status.code();
        }
        if Instant::now() > deadline {
            child.kill().ok();
            panic!("daemon did not exit after signal");
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

#[yare::parameterized(
    sigterm = { "TERM" },
    sigint  = { "INT" },
)]
fn daemon_logs_lifecycle_and_exits_0(sig: &str) {
    let project = Project::empty();
    let child = start_daemon(&project, &["daemon"]);

    signal(&child, sig);

    assert_eq!(wait_exit(child), Some(0));
    similar_asserts::assert_eq!(
        entries(&project.log("system")),
        vec![
            "[INFO] Logging system daemon started",
            "[INFO] Logging system daemon is stopping...",
        ]
    );
}

#[test]
fn daemon_is_the_default_command() {
    let project = Project::empty();
    let child = start_daemon(&project, &["-p"]);

    signal(&child, "TERM");

    assert_eq!(wait_exit(child), Some(0));
    assert_eq!(
        entries(&project.log("system"))[0],
        "[INFO] Logging system daemon started (Low power mode)"
    );
}
