/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use std::error::Error;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Instant {
    seconds: i64,
    subsecond_nanos: u32,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Format {
    DateTime,
    EpochSeconds,
}

#[derive(Debug)]
pub struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse timestamp: {}", self.message)
    }
}

impl Error for ParseError {}

impl Instant {
    pub fn from_epoch_seconds(epoch_seconds: i64) -> Self {
        Instant {
            seconds: epoch_seconds,
            subsecond_nanos: 0,
        }
    }

    pub fn from_secs_and_nanos(seconds: i64, subsecond_nanos: u32) -> Self {
        Instant {
            seconds,
            subsecond_nanos,
        }
    }

    pub fn from_f64(epoch_seconds: f64) -> Self {
        let seconds = epoch_seconds.floor();
        let nanos = ((epoch_seconds - seconds) * 1_000_000_000_f64).round() as u32;
        Instant::from_secs_and_nanos(seconds as i64, nanos.min(999_999_999))
    }

    pub fn from_system_time(system_time: SystemTime) -> Self {
        match system_time.duration_since(UNIX_EPOCH) {
            Ok(duration) => Instant {
                seconds: duration.as_secs() as i64,
                subsecond_nanos: duration.subsec_nanos(),
            },
            Err(before_epoch) => {
                let duration = before_epoch.duration();
                Instant::from_f64(-duration.as_secs_f64())
            }
        }
    }

    pub fn from_str(s: &str, format: Format) -> Result<Self, ParseError> {
        match format {
            Format::DateTime => {
                let parsed = DateTime::parse_from_rfc3339(s).map_err(|err| ParseError {
                    message: format!("`{}` is not an RFC-3339 date-time: {}", s, err),
                })?;
                Ok(Instant::from_secs_and_nanos(
                    parsed.timestamp(),
                    parsed.timestamp_subsec_nanos(),
                ))
            }
            Format::EpochSeconds => s
                .parse::<f64>()
                .map(Instant::from_f64)
                .map_err(|err| ParseError {
                    message: format!("`{}` is not an epoch-seconds value: {}", s, err),
                }),
        }
    }

    fn to_chrono(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.seconds, self.subsecond_nanos).single()
    }

    pub fn has_nanos(&self) -> bool {
        self.subsecond_nanos != 0
    }

    pub fn epoch_seconds(&self) -> i64 {
        self.seconds
    }

    pub fn fmt(&self, format: Format) -> String {
        match format {
            Format::DateTime => match self.to_chrono() {
                Some(date_time) => date_time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
                None => self.fmt(Format::EpochSeconds),
            },
            Format::EpochSeconds => {
                if self.subsecond_nanos == 0 {
                    format!("{}", self.seconds)
                } else {
                    let fraction = format!("{:0>9}", self.subsecond_nanos);
                    format!("{}.{}", self.seconds, fraction.trim_end_matches('0'))
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Format, Instant};

    #[test]
    fn date_time_round_trips_through_route53_format() {
        let instant = Instant::from_str("2017-03-15T01:36:41.958Z", Format::DateTime)
            .expect("valid timestamp");
        assert_eq!(instant.epoch_seconds(), 1489541801);
        assert!(instant.has_nanos());
        assert_eq!(instant.fmt(Format::DateTime), "2017-03-15T01:36:41.958Z");
    }

    #[test]
    fn epoch_seconds_formatting() {
        let instant = Instant::from_epoch_seconds(1576540098);
        assert_eq!(instant.fmt(Format::EpochSeconds), "1576540098");
        assert_eq!(instant.fmt(Format::DateTime), "2019-12-16T23:48:18Z");
        let instant = Instant::from_str("1576540098.5", Format::EpochSeconds).unwrap();
        assert_eq!(instant.fmt(Format::EpochSeconds), "1576540098.5");
    }

    #[test]
    fn invalid_date_time() {
        Instant::from_str("yesterday", Format::DateTime).expect_err("not a timestamp");
    }
}
