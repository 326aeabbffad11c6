use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::td_exception::{ErrCode, TdException};

/// Bar timestamp, unix seconds (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time {
    pub timestamp: i64,
}

impl Time {
    pub fn new(timestamp: i64) -> Self {
        Self { timestamp }
    }

    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self::new(datetime.and_utc().timestamp())
    }

    pub fn datetime(&self) -> Option<NaiveDateTime> {
        DateTime::from_timestamp(self.timestamp, 0).map(|dt| dt.naive_utc())
    }

    pub fn to_str(&self) -> String {
        match self.datetime() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => self.timestamp.to_string(),
        }
    }

    pub fn to_date_str(&self) -> String {
        match self.datetime() {
            Some(dt) => dt.format("%Y%m%d").to_string(),
            None => self.timestamp.to_string(),
        }
    }
}

impl FromStr for Time {
    type Err = TdException;

    /// Supports "YYYY-MM-DD HH:MM:SS", "YYYY-MM-DD", "YYYYMMDD", RFC 3339 and unix seconds
    fn from_str(time_str: &str) -> Result<Self, Self::Err> {
        let s = time_str.trim();
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            return Ok(Self::from_datetime(dt));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::new(dt.timestamp()));
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::from_datetime(date.and_time(NaiveTime::MIN)));
        }
        // 8 digits is a date, anything else numeric is epoch seconds
        if s.len() == 8 {
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y%m%d") {
                return Ok(Self::from_datetime(date.and_time(NaiveTime::MIN)));
            }
        }
        if let Ok(ts) = s.parse::<i64>() {
            return Ok(Self::new(ts));
        }
        Err(TdException::new(
            format!("can't parse time: {}", time_str),
            ErrCode::SrcDataFormatError,
        ))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
