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

use std::path::PathBuf;

use crate::runner::ScenarioRunner;
use crate::scenario::{catalog, Scenario, ScenarioKind};
use crate::script::Script;
use crate::LabError;

fn fake_binary(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// An engine stand-in that consumes its whole input (so the script write never hits a broken
/// pipe) and exits with the given status.
fn fake_engine(dir: &tempfile::TempDir, name: &str, exit_code: u8) -> PathBuf {
    fake_binary(
        dir,
        name,
        &format!("#!/bin/sh\ncat > /dev/null\nexit {exit_code}\n"),
    )
}

fn from_catalog(name: &str) -> Scenario {
    catalog().into_iter().find(|s| s.name == name).unwrap()
}

#[tokio::test]
async fn passing_engine_yields_a_pass() {
    let dir = tempfile::tempdir().unwrap();
    let engine = fake_engine(&dir, "engine", 0);
    let builder = fake_engine(&dir, "builder", 0);
    let runner = ScenarioRunner::with_paths(engine, builder, false);
    assert!(runner.run(&from_catalog("r1V2")).await.unwrap());
}

#[tokio::test]
async fn failing_engine_yields_a_verdict_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let engine = fake_engine(&dir, "engine", 1);
    let builder = fake_engine(&dir, "builder", 0);
    let runner = ScenarioRunner::with_paths(engine, builder, false);
    assert!(!runner.run(&from_catalog("test1")).await.unwrap());
}

#[tokio::test]
async fn print_lsas_drives_the_lsa_builder() {
    let dir = tempfile::tempdir().unwrap();
    let engine = fake_engine(&dir, "engine", 0);
    let builder = fake_binary(&dir, "builder", "#!/bin/sh\nexit 0\n");
    let runner = ScenarioRunner::with_paths(engine, builder, false);
    assert!(runner.run(&from_catalog("print_lsasV2")).await.unwrap());
    assert!(runner.run(&from_catalog("print_lsasV3")).await.unwrap());
}

#[tokio::test]
async fn print_lsas_fails_when_the_builder_rejects() {
    let dir = tempfile::tempdir().unwrap();
    let engine = fake_engine(&dir, "engine", 0);
    let builder = fake_binary(&dir, "builder", "#!/bin/sh\nexit 1\n");
    let runner = ScenarioRunner::with_paths(engine, builder, false);
    assert!(!runner.run(&from_catalog("print_lsasV2")).await.unwrap());
}

#[tokio::test]
async fn run_all_stops_at_the_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let engine = fake_engine(&dir, "engine", 1);
    let builder = fake_engine(&dir, "builder", 0);
    let runner = ScenarioRunner::with_paths(engine, builder, false);

    let test1 = from_catalog("test1");
    let test2 = from_catalog("test2");
    let err = runner.run_all(&[&test1, &test2]).await.unwrap_err();
    assert!(matches!(err, LabError::ScenarioFailed(name) if name == "test1"));
}

#[tokio::test]
async fn run_all_passes_when_every_scenario_passes() {
    let dir = tempfile::tempdir().unwrap();
    let engine = fake_engine(&dir, "engine", 0);
    let builder = fake_engine(&dir, "builder", 0);
    let runner = ScenarioRunner::with_paths(engine, builder, false);

    let test1 = from_catalog("test1");
    let r1_v3 = from_catalog("r1V3");
    runner.run_all(&[&test1, &r1_v3]).await.unwrap();
}

#[tokio::test]
async fn missing_engine_is_a_harness_error() {
    let dir = tempfile::tempdir().unwrap();
    let builder = fake_engine(&dir, "builder", 0);
    let runner =
        ScenarioRunner::with_paths(dir.path().join("does-not-exist"), builder, false);
    let err = runner.run(&from_catalog("test1")).await.unwrap_err();
    assert!(matches!(err, LabError::Io(_)));
}

#[tokio::test]
async fn scenario_without_a_protocol_is_rejected() {
    fn empty() -> ScenarioKind {
        ScenarioKind::Interactive(Script::new())
    }
    let dir = tempfile::tempdir().unwrap();
    let engine = fake_engine(&dir, "engine", 0);
    let builder = fake_engine(&dir, "builder", 0);
    let runner = ScenarioRunner::with_paths(engine, builder, false);

    let scenario = Scenario::new("no-protocol", true, None, empty);
    let err = runner.run(&scenario).await.unwrap_err();
    assert!(matches!(err, LabError::ProtocolUnset(_)));
}
