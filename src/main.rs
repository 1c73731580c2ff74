// Copyright (c) 2025 Sean McNamara <smcnam@gmail.com>
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

mod cli;
mod commands;
mod config;
mod constants;
mod router;
mod store;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use cli::{Cli, Commands};
use config::Config;
use constants::{DEFAULT_LOCK_TIMEOUT_SECONDS, DEFAULT_LOG_DIR};

fn merged_dir(config: &Config, cli_dir: PathBuf) -> PathBuf {
    config.merge_with_cli(
        cli_dir,
        config.dir.clone().map(PathBuf::from),
        PathBuf::from(DEFAULT_LOG_DIR),
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config from specified path or default daylog.toml
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("daylog.toml"));
    let config = Config::load(&config_path)?;

    match cli.command {
        Commands::Write {
            message,
            dir,
            no_lock,
            lock_timeout,
        } => {
            let merged_lock_timeout = config.merge_with_cli(
                lock_timeout,
                config.lock_timeout_seconds,
                DEFAULT_LOCK_TIMEOUT_SECONDS,
            );
            let use_lock = if no_lock {
                false
            } else {
                config.lock.unwrap_or(true)
            };

            commands::cmd_write(
                merged_dir(&config, dir),
                message,
                use_lock,
                merged_lock_timeout,
            )
        }
        Commands::Path { dir } => commands::cmd_path(merged_dir(&config, dir)),
        Commands::List { dir } => commands::cmd_list(merged_dir(&config, dir)),
    }
}
