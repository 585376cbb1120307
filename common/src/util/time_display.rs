// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Formats instants for log lines and location reports.
pub struct TimeDisplay {
    /// `None` when the timestamp is out of chrono's range.
    datetime: Option<DateTime<Utc>>,
}

impl TimeDisplay {
    /// Creates a new TimeDisplay with given secs and nsecs
    ///
    /// # Arguments
    ///
    /// * `secs` - seconds since std::time::UNIX_EPOCH
    /// * `nsecs` - nano sub seconds since std::time::UNIX_EPOCH
    pub fn new(secs: i64, nsecs: u32) -> TimeDisplay {
        TimeDisplay { datetime: DateTime::<Utc>::from_timestamp(secs, nsecs) }
    }

    pub fn from_datetime(datetime: DateTime<Utc>) -> TimeDisplay {
        TimeDisplay { datetime: Some(datetime) }
    }

    /// Displays date & time in UTC with a format YYYY-MM-DD HH:MM:SS
    pub fn utc_display(&self) -> String {
        match self.datetime {
            Some(datetime) => format!(
                "{}-{:02}-{:02} {:02}:{:02}:{:02}",
                datetime.year(),
                datetime.month(),
                datetime.day(),
                datetime.hour(),
                datetime.minute(),
                datetime.second()
            ),
            None => "INVALID-TIMESTAMP".to_string(),
        }
    }

    /// Displays time in UTC for logs, with millisecond precision.
    fn utc_display_log(&self) -> String {
        match self.datetime {
            Some(datetime) => format!(
                "{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
                datetime.month(),
                datetime.day(),
                datetime.hour(),
                datetime.minute(),
                datetime.second(),
                datetime.timestamp_subsec_millis(),
            ),
            None => "INVALID-TIMESTAMP".to_string(),
        }
    }
}

pub fn log_current_time() -> String {
    TimeDisplay::from_datetime(Utc::now()).utc_display_log()
}

#[cfg(test)]
mod tests {
    use super::TimeDisplay;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_utc_display_ok() {
        let epoch_time = TimeDisplay::new(0, 0);
        assert_eq!(epoch_time.utc_display(), "1970-01-01 00:00:00");
        let twok_time = TimeDisplay::new(946684900, 0);
        assert_eq!(twok_time.utc_display(), "2000-01-01 00:01:40");
    }

    #[test]
    fn test_utc_display_err() {
        let max_seconds = TimeDisplay::new(i64::MAX, 0);
        assert_eq!("INVALID-TIMESTAMP", max_seconds.utc_display());
        let max_nanos = TimeDisplay::new(0, 2_000_000_000);
        assert_eq!("INVALID-TIMESTAMP", max_nanos.utc_display());
    }

    #[test]
    fn test_utc_display_log() {
        let epoch_time = TimeDisplay::new(0, 0);
        assert_eq!(epoch_time.utc_display_log(), "01-01 00:00:00.000");
        let twok_time = TimeDisplay::new(946684900, 200_000_000);
        assert_eq!(twok_time.utc_display_log(), "01-01 00:01:40.200");
    }

    #[test]
    fn test_from_datetime() {
        let datetime = Utc.with_ymd_and_hms(2016, 4, 12, 9, 30, 5).unwrap();
        assert_eq!(TimeDisplay::from_datetime(datetime).utc_display(), "2016-04-12 09:30:05");
    }
}
