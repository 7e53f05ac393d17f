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

//! Execution of the selected scenarios against the external binaries.

use std::{io::ErrorKind, path::PathBuf, process::Stdio};

use tokio::{io::AsyncWriteExt, process::Command};

use crate::{
    config::CONFIG,
    lsa::{Lsa, OspfVersion},
    scenario::{Scenario, ScenarioKind},
    script::Script,
    LabError,
};

/// Runs scenarios by launching the routing-computation engine (or the LSA builder) and
/// interpreting the subprocess exit status as the verdict.
pub struct ScenarioRunner {
    engine: PathBuf,
    lsa_builder: PathBuf,
    verbose: bool,
}

impl ScenarioRunner {
    /// Create a runner using the binary paths from the global configuration.
    pub fn new(verbose: bool) -> Self {
        Self::with_paths(CONFIG.engine_path(), CONFIG.build_lsa_path(), verbose)
    }

    /// Create a runner with explicit binary paths.
    pub fn with_paths(engine: PathBuf, lsa_builder: PathBuf, verbose: bool) -> Self {
        Self {
            engine,
            lsa_builder,
            verbose,
        }
    }

    /// Run all selected scenarios in order, stopping at the first failure. The failing scenario
    /// is reported in the returned error; scenarios after it are not evaluated.
    pub async fn run_all(&self, scenarios: &[&Scenario]) -> Result<(), LabError> {
        for scenario in scenarios {
            println!("Running: {}", scenario.name);
            if !self.run(scenario).await? {
                println!("FAILED");
                return Err(LabError::ScenarioFailed(scenario.name.to_string()));
            }
        }
        Ok(())
    }

    /// Run a single scenario. `Ok(false)` is a scenario verdict (the subprocess exited nonzero);
    /// `Err` is a harness-level failure (missing binary, invalid catalog entry, encoding error).
    pub async fn run(&self, scenario: &Scenario) -> Result<bool, LabError> {
        let version = scenario
            .protocol
            .ok_or(LabError::ProtocolUnset(scenario.name))?;
        match scenario.build() {
            ScenarioKind::Interactive(script) => self.run_interactive(&script, version).await,
            ScenarioKind::PrintLsas(lsas) => self.run_print_lsas(&lsas, version).await,
        }
    }

    /// Launch the engine, stream the script to its input, close the input to signal the end of
    /// the script, and wait for the verdict.
    async fn run_interactive(
        &self,
        script: &Script,
        version: OspfVersion,
    ) -> Result<bool, LabError> {
        let text = script.render(version)?;

        let mut cmd = Command::new(&self.engine);
        cmd.arg(version.flag());
        if self.verbose {
            cmd.arg("-v");
        }
        log::debug!("{} {}", self.engine.display(), version.flag());

        let mut child = cmd.stdin(Stdio::piped()).kill_on_drop(true).spawn()?;
        let mut stdin = child.stdin.take().unwrap();

        // A broken pipe means the engine gave up mid-script; its exit status still decides.
        match stdin.write_all(text.as_bytes()).await {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                log::debug!("engine closed its input early")
            }
            other => other?,
        }
        drop(stdin);

        let status = child.wait().await?;
        Ok(status.success())
    }

    /// Feed each LSA to the LSA builder; every invocation must exit 0.
    async fn run_print_lsas(&self, lsas: &[Lsa], version: OspfVersion) -> Result<bool, LabError> {
        for lsa in lsas {
            let text = lsa.encode(version)?;
            log::debug!("{} {} -l \"{text}\"", self.lsa_builder.display(), version.flag());
            let status = Command::new(&self.lsa_builder)
                .arg(version.flag())
                .arg("-l")
                .arg(&text)
                .kill_on_drop(true)
                .status()
                .await?;
            if !status.success() {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
