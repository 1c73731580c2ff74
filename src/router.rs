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

//! Date-based log routing.
//!
//! `LogRouter` picks the log file a message belongs to (one file per weekday,
//! a single shared file across a weekend), archives a weekend file left over
//! from an earlier weekend, and appends the message. File-system access and
//! the current date come in through the `FileStore` and `Clock` traits so the
//! routing rules can be exercised without touching a real disk.

use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::constants::{
    DAILY_LOG_STEM, FILE_DATE_FORMAT, LOG_EXTENSION, WEEKEND_LOG_STEM, WEEKEND_STALE_DAYS,
};

/// Source of the current calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// File operations the router drives. Implementations own all I/O; the
/// router only decides which operations to issue and in what order.
pub trait FileStore {
    fn exists(&self, name: &str) -> bool;

    /// Create an empty file. Behavior is undefined if the file already exists.
    fn create(&mut self, name: &str) -> Result<()>;

    /// Append text to an existing file.
    fn append(&mut self, name: &str, text: &str) -> Result<()>;

    /// Calendar date of the file's last modification.
    fn last_write_date(&self, name: &str) -> Result<NaiveDate>;

    /// Rename a file. `old` must exist and `new` must not.
    fn rename(&mut self, old: &str, new: &str) -> Result<()>;
}

/// Routes messages to date-named log files.
///
/// Stateless between calls: everything the router needs to remember lives in
/// the file store's last-write dates. Errors raised by the collaborators
/// propagate unchanged; the router performs no recovery of its own.
pub struct LogRouter<C, S> {
    clock: C,
    store: S,
}

impl<C: Clock, S: FileStore> LogRouter<C, S> {
    pub fn new(store: S, clock: C) -> Self {
        Self { clock, store }
    }

    /// Append `message` to today's log file, creating it if absent.
    ///
    /// On Saturdays and Sundays the target is the shared weekend file; if the
    /// one currently on disk was last written more than two days ago it is
    /// first archived under the Saturday of the weekend it belongs to. The
    /// message is passed through to the store verbatim.
    pub fn log(&mut self, message: &str) -> Result<()> {
        let today = self.clock.today();
        let active = file_name_for(today);

        // The rename must land before the existence check: once the stale
        // file is archived away, nothing exists under the active name.
        if self.should_archive(today, &active)? {
            self.archive_weekend_log()?;
        }

        if !self.store.exists(&active) {
            self.store.create(&active)?;
        }

        self.store.append(&active, message)
    }

    /// Staleness check for the weekend file. Only meaningful when `active`
    /// is the weekend name; on weekdays this answers false without touching
    /// the store. Strict threshold: a file exactly two days old stays.
    fn should_archive(&self, today: NaiveDate, active: &str) -> Result<bool> {
        if !is_weekend(today) || !self.store.exists(active) {
            return Ok(false);
        }

        let written = self.store.last_write_date(active)?;
        Ok((today - written).num_days() > WEEKEND_STALE_DAYS)
    }

    /// Rename the current weekend file to its archive name, derived from the
    /// Saturday that started the weekend it was last written in.
    fn archive_weekend_log(&mut self) -> Result<()> {
        let weekend = weekend_file_name();

        let written = self.store.last_write_date(&weekend)?;
        let archived = archived_weekend_file_name(weekend_start(written));

        self.store.rename(&weekend, &archived)
    }
}

/// Name of the log file a message dated `date` belongs to.
///
/// Pure: the same date always yields the same name.
pub fn file_name_for(date: NaiveDate) -> String {
    if is_weekend(date) {
        weekend_file_name()
    } else {
        format!(
            "{}{}.{}",
            DAILY_LOG_STEM,
            date.format(FILE_DATE_FORMAT),
            LOG_EXTENSION
        )
    }
}

/// Single source of truth for the active weekend file name.
pub fn weekend_file_name() -> String {
    format!("{}.{}", WEEKEND_LOG_STEM, LOG_EXTENSION)
}

fn archived_weekend_file_name(saturday: NaiveDate) -> String {
    format!(
        "{}-{}.{}",
        WEEKEND_LOG_STEM,
        saturday.format(FILE_DATE_FORMAT),
        LOG_EXTENSION
    )
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Saturday of the weekend `written` falls in. A Sunday write still belongs
/// to the weekend that began the day before.
fn weekend_start(written: NaiveDate) -> NaiveDate {
    if written.weekday() == Weekday::Sun {
        written - Duration::days(1)
    } else {
        written
    }
}
