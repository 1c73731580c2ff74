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

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::{DEFAULT_LOCK_TIMEOUT_SECONDS, DEFAULT_LOG_DIR};

#[derive(Parser)]
#[command(name = "daylog")]
#[command(about = "Date-routed log writer: one file per weekday, one shared weekend file")]
#[command(version)]
pub struct Cli {
    /// Path to config file (defaults to daylog.toml in current directory if it exists)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append a message to today's log file
    Write {
        /// Message to append
        message: String,

        /// Directory the log files live in
        #[arg(long, default_value = DEFAULT_LOG_DIR)]
        dir: PathBuf,

        /// Skip the per-directory writer lock
        #[arg(long)]
        no_lock: bool,

        /// Seconds to wait for the writer lock
        #[arg(long, default_value_t = DEFAULT_LOCK_TIMEOUT_SECONDS)]
        lock_timeout: u64,
    },

    /// Print the file a message would be appended to today
    Path {
        /// Directory the log files live in
        #[arg(long, default_value = DEFAULT_LOG_DIR)]
        dir: PathBuf,
    },

    /// List the log files currently in the directory
    List {
        /// Directory the log files live in
        #[arg(long, default_value = DEFAULT_LOG_DIR)]
        dir: PathBuf,
    },
}
