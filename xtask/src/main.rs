// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Content maintenance tasks for tether
// Run with: cargo xtask <command>

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use helpers::print_error;
use std::path::PathBuf;
use tether_io::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(name = "xtask", version, about = "Content maintenance tasks")]
struct Cli {
    /// Content configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolution table maintenance
    #[command(subcommand)]
    Manifest(commands::manifest::ManifestCommand),
}

fn main() {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Manifest(command) => commands::manifest::run(&cli.config, command),
    }
}
