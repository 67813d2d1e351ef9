//! Timetable time-of-day handling.
//!
//! GTFS stop times are "HH:MM:SS" strings measured from the start of the
//! service day, and the hour field may exceed 23 for trips that run past
//! midnight ("24:10:00" is ten past midnight at the end of the same service
//! day). This module provides a type that preserves that convention instead
//! of wrapping, so durations across midnight come out correct.

use std::cmp::Ordering;
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day on the GTFS service-day clock.
///
/// Hours run from 0 with no upper bound at 24, so "25:04:00" is a valid
/// time (04:04 the next calendar day, still on the same service day).
/// Minutes and seconds are validated to 0-59.
///
/// The engine works in whole minutes; seconds are kept for faithful
/// display but do not take part in duration arithmetic.
///
/// # Examples
///
/// ```
/// use route_planner::domain::TimetableTime;
///
/// let t = TimetableTime::parse("11:30:00").unwrap();
/// assert_eq!(t.minutes_since_midnight(), 11 * 60 + 30);
///
/// // Past-midnight times do not wrap
/// let late = TimetableTime::parse("24:10:00").unwrap();
/// assert_eq!(late.minutes_since_midnight(), 24 * 60 + 10);
/// assert!(late > t);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimetableTime {
    total_seconds: u32,
}

impl TimetableTime {
    /// Parse a time from "HH:MM:SS" format.
    ///
    /// The hour field accepts one to three digits and has no 24-hour cap;
    /// minutes and seconds must be exactly two digits, 00-59.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let mut parts = s.split(':');
        let (Some(hour), Some(minute), Some(second), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TimeError::new("expected HH:MM:SS format"));
        };

        let hour = parse_digits(hour, 1, 3).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute =
            parse_digits(minute, 2, 2).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        let second =
            parse_digits(second, 2, 2).ok_or_else(|| TimeError::new("invalid second digits"))?;
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        Ok(Self {
            total_seconds: hour * 3600 + minute * 60 + second,
        })
    }

    /// Returns the hour on the service-day clock (may be ≥ 24).
    pub fn hour(&self) -> u32 {
        self.total_seconds / 3600
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.total_seconds / 60 % 60
    }

    /// Returns the second (0-59).
    pub fn second(&self) -> u32 {
        self.total_seconds % 60
    }

    /// Whole minutes elapsed since the start of the service day.
    ///
    /// Seconds are truncated, which is the resolution edge weights are
    /// computed at.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.total_seconds / 60
    }
}

impl Ord for TimetableTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_seconds.cmp(&other.total_seconds)
    }
}

impl PartialOrd for TimetableTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for TimetableTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimetableTime({self})")
    }
}

impl fmt::Display for TimetableTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

/// Parse an all-digit field of bounded width into a u32.
fn parse_digits(s: &str, min_len: usize, max_len: usize) -> Option<u32> {
    if s.len() < min_len || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
