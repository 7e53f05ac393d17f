// RoutingLab: black-box test lab for a link-state routing engine
// Copyright (C) 2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use std::time::Duration;

use crate::config::{Config, TopologyConfig};
use crate::process::{ManagedProcess, ProcessError, ProcessState};
use crate::supervisor::Supervisor;

const BOUND: Duration = Duration::from_secs(5);

/// Wait until the drain task publishes `Terminated`, bounded so a broken transition fails the
/// test instead of hanging it.
async fn wait_terminated(process: &ManagedProcess) {
    tokio::time::timeout(BOUND, async {
        while process.status() != ProcessState::Terminated {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("`{}` never reached TERMINATED", process.command()));
}

#[tokio::test]
async fn starts_in_init() {
    let process = ManagedProcess::new("echo hello");
    assert_eq!(process.status(), ProcessState::Init);
}

#[tokio::test]
async fn short_lived_process_reaches_terminated() {
    let mut process = ManagedProcess::new("echo hello");
    process.start().await.unwrap();
    wait_terminated(&process).await;
}

#[tokio::test]
async fn terminate_before_start_is_a_noop() {
    let mut process = ManagedProcess::new("echo hello");
    process.terminate(BOUND).await.unwrap();
    assert_eq!(process.status(), ProcessState::Init);
}

#[tokio::test]
async fn terminate_after_exit_is_a_noop() {
    let mut process = ManagedProcess::new("true");
    process.start().await.unwrap();
    wait_terminated(&process).await;
    process.terminate(BOUND).await.unwrap();
}

#[tokio::test]
async fn terminate_kills_a_running_process() {
    let mut process = ManagedProcess::new("sleep 30");
    process.start().await.unwrap();
    assert_eq!(process.status(), ProcessState::Running);
    process.terminate(BOUND).await.unwrap();
    assert_eq!(process.status(), ProcessState::Terminated);
}

#[tokio::test]
async fn spawning_a_missing_binary_fails() {
    let mut process = ManagedProcess::new("./does-not-exist-anywhere --really");
    let err = process.start().await.unwrap_err();
    assert!(matches!(err, ProcessError::Spawn(_, _)));
    assert_eq!(process.status(), ProcessState::Init);
}

#[tokio::test]
async fn spawning_an_empty_command_fails() {
    let mut process = ManagedProcess::new("  ");
    let err = process.start().await.unwrap_err();
    assert!(matches!(err, ProcessError::EmptyCommand));
}

#[tokio::test]
async fn starting_twice_fails() {
    let mut process = ManagedProcess::new("sleep 30");
    process.start().await.unwrap();
    let err = process.start().await.unwrap_err();
    assert!(matches!(err, ProcessError::AlreadyStarted(_)));
    process.terminate(BOUND).await.unwrap();
}

fn topology_config(dir: &tempfile::TempDir) -> Config {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.path().join("svc");
    std::fs::write(&path, "#!/bin/sh\nexec sleep 30\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

    Config {
        builddir: dir.path().display().to_string(),
        engine: Default::default(),
        topology: TopologyConfig {
            router_manager: "svc".to_string(),
            coordinator: "svc".to_string(),
            test_peer: "svc".to_string(),
            peers: vec!["p1".to_string(), "p2".to_string()],
            settle_delay_secs: 0,
            terminate_timeout_secs: 5,
        },
    }
}

#[tokio::test]
async fn supervisor_check_is_vacuously_true_before_start() {
    let supervisor = Supervisor::with_config(topology_config(&tempfile::tempdir().unwrap()));
    assert!(supervisor.check());
    assert_eq!(supervisor.statuses().count(), 0);
}

#[tokio::test]
async fn supervisor_topology_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let mut supervisor = Supervisor::with_config(topology_config(&dir));

    supervisor.start().await.unwrap();
    assert!(supervisor.check());

    // manager, coordinator, one process per peer, in start order
    let statuses: Vec<_> = supervisor.statuses().collect();
    assert_eq!(statuses.len(), 4);
    assert!(statuses.iter().all(|(_, s)| *s == ProcessState::Running));
    assert!(statuses[2].0.ends_with("-s p1"));
    assert!(statuses[3].0.ends_with("-s p2"));

    supervisor.terminate().await.unwrap();
    assert!(!supervisor.check());
    assert!(supervisor
        .statuses()
        .all(|(_, s)| s == ProcessState::Terminated));
}
