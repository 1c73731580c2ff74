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

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DAILY_LOG_STEM, LOG_EXTENSION, WEEKEND_LOG_STEM};
use crate::router::{self, Clock, LogRouter};
use crate::store::{DiskStore, SystemClock, WriterLock};

pub fn cmd_write(dir: PathBuf, message: String, use_lock: bool, lock_timeout: u64) -> Result<()> {
    let store = DiskStore::open(&dir)?;

    // Concurrent writers to one directory are serialized here; the router
    // itself assumes it is the only writer while it runs.
    let _lock_guard = if use_lock {
        Some(WriterLock::acquire(&dir, Duration::from_secs(lock_timeout))?)
    } else {
        None
    };

    let target = router::file_name_for(SystemClock.today());

    let mut log_router = LogRouter::new(store, SystemClock);
    log_router.log(&message)?;

    println!("Appended to: {}", dir.join(target).display());

    Ok(())
}

pub fn cmd_path(dir: PathBuf) -> Result<()> {
    let target = router::file_name_for(SystemClock.today());
    println!("{}", dir.join(target).display());

    Ok(())
}

pub fn cmd_list(dir: PathBuf) -> Result<()> {
    let entries = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read log directory: {}", dir.display()))?;

    let mut rows = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !is_log_file_name(&name) {
            continue;
        }

        let modified = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .with_context(|| format!("Failed to read modification time: {}", name))?;
        rows.push((DateTime::<Local>::from(modified).date_naive(), name));
    }

    if rows.is_empty() {
        println!("No log files in {}", dir.display());
        return Ok(());
    }

    rows.sort();
    for (written, name) in rows {
        println!("{}  {}", written.format("%Y-%m-%d"), name);
    }

    Ok(())
}

/// True for the names the router produces: daily files, the active weekend
/// file, and archived weekend files. Everything else in the directory
/// (including the writer lock file) is ignored.
fn is_log_file_name(name: &str) -> bool {
    let Some(stem) = name.strip_suffix(&format!(".{}", LOG_EXTENSION)) else {
        return false;
    };

    if stem == WEEKEND_LOG_STEM {
        return true;
    }
    if let Some(suffix) = stem.strip_prefix(&format!("{}-", WEEKEND_LOG_STEM)) {
        return is_file_date(suffix);
    }
    if let Some(suffix) = stem.strip_prefix(DAILY_LOG_STEM) {
        return is_file_date(suffix);
    }

    false
}

fn is_file_date(s: &str) -> bool {
    s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit())
}
