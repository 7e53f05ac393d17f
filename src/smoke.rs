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

//! Smoke test for the process topology: start the router manager, the coordinator and the test
//! peers, keep them running until the user hits return, and tear everything down.

use tokio::io::AsyncBufReadExt;

use routing_lab::{ProcessState, Supervisor};

fn main() {
    pretty_env_logger::init_timed();

    let exit_code = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(run());

    std::process::exit(exit_code);
}

async fn run() -> i32 {
    let mut supervisor = Supervisor::new();

    if let Err(e) = supervisor.start().await {
        eprintln!("{e}");
        teardown(&mut supervisor).await;
        return -1;
    }

    if !supervisor.check() {
        println!("Processes did not start");
        report_down(&supervisor);
        teardown(&mut supervisor).await;
        return -1;
    }

    println!("Hit return to kill processes");
    let mut line = String::new();
    let _ = tokio::io::BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await;

    println!("About to terminate processes");
    if !supervisor.check() {
        println!("Processes no longer running");
        report_down(&supervisor);
        teardown(&mut supervisor).await;
        return -1;
    }

    teardown(&mut supervisor).await;
    0
}

fn report_down(supervisor: &Supervisor) {
    for (command, state) in supervisor.statuses() {
        if state != ProcessState::Running {
            println!("{state}: {command}");
        }
    }
}

async fn teardown(supervisor: &mut Supervisor) {
    if let Err(e) = supervisor.terminate().await {
        eprintln!("{e}");
    }
}
