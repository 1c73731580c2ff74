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

//! Production collaborators for the router: a real-directory file store, the
//! system clock, and the file lock that serializes writers per directory.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::constants::LOCK_FILE_NAME;
use crate::router::{Clock, FileStore};

/// Local calendar date, day granularity.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// `FileStore` backed by a single directory on disk. File names from the
/// router are resolved relative to that directory and never escape it.
pub struct DiskStore {
    dir: PathBuf,
}

impl DiskStore {
    /// Open a store rooted at `dir`, creating the directory if missing.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl FileStore for DiskStore {
    fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    fn create(&mut self, name: &str) -> Result<()> {
        let path = self.path(name);
        File::create(&path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        Ok(())
    }

    fn append(&mut self, name: &str, text: &str) -> Result<()> {
        let path = self.path(name);
        let mut file = OpenOptions::new()
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;

        // One line per message.
        file.write_all(text.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    fn last_write_date(&self, name: &str) -> Result<NaiveDate> {
        let path = self.path(name);
        let modified = fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("Failed to read modification time: {}", path.display()))?;

        Ok(DateTime::<Local>::from(modified).date_naive())
    }

    fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        let from = self.path(old);
        let to = self.path(new);

        if !from.exists() {
            anyhow::bail!("Cannot rename missing file: {}", from.display());
        }
        if to.exists() {
            anyhow::bail!("Rename target already exists: {}", to.display());
        }

        fs::rename(&from, &to)
            .with_context(|| format!("Failed to rename {} to {}", from.display(), to.display()))
    }
}

/// Exclusive per-directory lock serializing log writers.
///
/// The router is single-writer by contract; concurrent `daylog write`
/// invocations against the same directory queue up here. Released on drop.
pub struct WriterLock {
    #[allow(dead_code)]
    lock_file: File,
}

impl WriterLock {
    /// Acquire the lock, blocking up to `timeout`.
    pub fn acquire(dir: &Path, timeout: Duration) -> Result<Self> {
        let lock_path = dir.join(LOCK_FILE_NAME);

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;

        let start = Instant::now();
        loop {
            match lock_file.try_lock_exclusive() {
                Ok(()) => return Ok(Self { lock_file }),
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    if start.elapsed() >= timeout {
                        anyhow::bail!("Timeout acquiring writer lock after {:?}", start.elapsed());
                    }
                    std::thread::sleep(Duration::from_millis(50));
                }
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to lock: {}", lock_path.display()));
                }
            }
        }
    }
}

impl Drop for WriterLock {
    fn drop(&mut self) {
        let _ = self.lock_file.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_then_append_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = DiskStore::open(dir.path()).unwrap();

        store.create("log20220311.txt").unwrap();
        store.append("log20220311.txt", "first").unwrap();
        store.append("log20220311.txt", "second").unwrap();

        let content = fs::read_to_string(dir.path().join("log20220311.txt")).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_append_requires_existing_file() {
        let dir = TempDir::new().unwrap();
        let mut store = DiskStore::open(dir.path()).unwrap();

        assert!(store.append("log20220311.txt", "orphan").is_err());
    }

    #[test]
    fn test_exists_reflects_creation() {
        let dir = TempDir::new().unwrap();
        let mut store = DiskStore::open(dir.path()).unwrap();

        assert!(!store.exists("weekend.txt"));
        store.create("weekend.txt").unwrap();
        assert!(store.exists("weekend.txt"));
    }

    #[test]
    fn test_last_write_date_of_fresh_file_is_today() {
        let dir = TempDir::new().unwrap();
        let mut store = DiskStore::open(dir.path()).unwrap();

        store.create("weekend.txt").unwrap();
        store.append("weekend.txt", "entry").unwrap();

        let written = store.last_write_date("weekend.txt").unwrap();
        assert_eq!(written, Local::now().date_naive());
    }

    #[test]
    fn test_rename_moves_content() {
        let dir = TempDir::new().unwrap();
        let mut store = DiskStore::open(dir.path()).unwrap();

        store.create("weekend.txt").unwrap();
        store.append("weekend.txt", "old weekend").unwrap();
        store.rename("weekend.txt", "weekend-20220219.txt").unwrap();

        assert!(!store.exists("weekend.txt"));
        let content = fs::read_to_string(dir.path().join("weekend-20220219.txt")).unwrap();
        assert_eq!(content, "old weekend\n");
    }

    #[test]
    fn test_rename_refuses_missing_source() {
        let dir = TempDir::new().unwrap();
        let mut store = DiskStore::open(dir.path()).unwrap();

        assert!(store.rename("weekend.txt", "weekend-20220219.txt").is_err());
    }

    #[test]
    fn test_rename_refuses_existing_target() {
        let dir = TempDir::new().unwrap();
        let mut store = DiskStore::open(dir.path()).unwrap();

        store.create("weekend.txt").unwrap();
        store.create("weekend-20220219.txt").unwrap();

        assert!(store.rename("weekend.txt", "weekend-20220219.txt").is_err());
    }

    #[test]
    fn test_writer_lock_is_exclusive() {
        let dir = TempDir::new().unwrap();

        // First lock should succeed
        let lock1 = WriterLock::acquire(dir.path(), Duration::from_millis(100));
        assert!(lock1.is_ok());

        // Second lock should fail (timeout)
        let lock2 = WriterLock::acquire(dir.path(), Duration::from_millis(100));
        assert!(lock2.is_err());

        // Drop first lock
        drop(lock1);

        // Now second lock should succeed
        let lock3 = WriterLock::acquire(dir.path(), Duration::from_millis(100));
        assert!(lock3.is_ok());
    }
}
