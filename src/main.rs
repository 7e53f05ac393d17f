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

use clap::Parser;
use itertools::Itertools;

use routing_lab::{catalog, select, ScenarioRunner};

/// Run the scenario catalog against the routing-computation engine.
#[derive(Debug, Parser)]
struct Cli {
    /// Pass the verbose flag to the engine.
    #[clap(short, long)]
    verbose: bool,
    /// Run only the named scenarios, in the order given, regardless of the enabled flag.
    #[clap(short = 't', long = "test")]
    tests: Vec<String>,
    /// Run the known-broken scenarios instead of the known-good ones.
    #[clap(short, long)]
    bad: bool,
}

fn main() {
    pretty_env_logger::init_timed();

    let args = Cli::parse();

    let catalog = catalog();
    let selection = match select(&catalog, &args.tests, args.bad) {
        Ok(selection) => selection,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(-1);
        }
    };
    println!("[{}]", selection.iter().map(|s| s.name).join(", "));

    let runner = ScenarioRunner::new(args.verbose);
    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(runner.run_all(&selection));

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(-1);
    }
}
