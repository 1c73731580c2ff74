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

/// Stem of weekday log files (`log20220311.txt`).
pub const DAILY_LOG_STEM: &str = "log";

/// Stem of the shared weekend log file and its archives.
pub const WEEKEND_LOG_STEM: &str = "weekend";

pub const LOG_EXTENSION: &str = "txt";

/// Date suffix format used in file names (yyyyMMdd).
pub const FILE_DATE_FORMAT: &str = "%Y%m%d";

/// A weekend file older than this many days is archived before reuse.
/// Strictly greater-than: a file exactly this old is still appended to.
pub const WEEKEND_STALE_DAYS: i64 = 2;

pub const DEFAULT_LOG_DIR: &str = ".";

pub const LOCK_FILE_NAME: &str = ".daylog.lock";

pub const DEFAULT_LOCK_TIMEOUT_SECONDS: u64 = 10;
