// Filename convention: <prefix>_YYMMDD_NNNN.ext

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::constants::*;
use crate::core::error::{NavError, Result};

/// Date and line identifier embedded in a navigation-class filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStamp {
    pub date: NaiveDate,
    pub line: String,
    pub extension: String,
}

impl FileStamp {
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let invalid = |reason: &str| NavError::InvalidFilenameConvention {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| invalid("file name is missing or not UTF-8"))?;

        let bytes = name.as_bytes();
        if bytes.len() < STAMP_LEN {
            return Err(invalid("file name is too short"));
        }
        let at = |offset: usize| bytes[bytes.len() - offset];

        if at(DATE_SEPARATOR_OFFSET) != b'_' || at(LINE_SEPARATOR_OFFSET) != b'_' {
            return Err(invalid("expected '_' before the date and the line number"));
        }
        if at(EXTENSION_DOT_OFFSET) != b'.' {
            return Err(invalid("expected '.' before a three character extension"));
        }

        let start = bytes.len() - DATE_SEPARATOR_OFFSET + 1;
        let digits = &bytes[start..start + 6];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(invalid("date is not six digits"));
        }
        let two = |i: usize| ((digits[i] - b'0') * 10 + (digits[i + 1] - b'0')) as u32;
        let (year, month, day) = (2000 + two(0) as i32, two(2), two(4));

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| invalid("date is not a calendar date"))?;

        // Everything after the date is ASCII-delimited, so these slices stay on char boundaries
        let line_start = bytes.len() - LINE_SEPARATOR_OFFSET + 1;
        let line = name[line_start..bytes.len() - EXTENSION_DOT_OFFSET].to_string();
        let extension = name[bytes.len() - EXTENSION_DOT_OFFSET + 1..].to_string();

        Ok(Self {
            date,
            line,
            extension,
        })
    }

    /// Unix seconds at the Sunday 00:00 UTC that starts the GPS week holding this date.
    pub fn reference_week_epoch(&self) -> i64 {
        let midnight = self.date.and_hms_opt(0, 0, 0).unwrap_or_default();
        let days_since_sunday = self.date.weekday().num_days_from_sunday() as i64;
        midnight.and_utc().timestamp() - days_since_sunday * SECONDS_PER_DAY
    }
}
