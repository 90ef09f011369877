//! Time keeping module for PineTime

use chrono::{NaiveDateTime, Timelike};
use embassy_time::Instant;

/// Time shown by the hands, on a 12 hour dial
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClockTime {
    /// Hours (0–11)
    pub hours: u8,
    /// Minutes (0–59)
    pub minutes: u8,
}

impl ClockTime {
    /// Create clock time from 24 hour wall clock values
    pub fn new(hours: u8, minutes: u8) -> Self {
        Self {
            hours: hours % 12,
            minutes: minutes % 60,
        }
    }
    /// Clock time of a wall clock reading
    pub fn from_datetime(time: &NaiveDateTime) -> Self {
        Self::new(time.hour() as u8, time.minute() as u8)
    }
    /// Hours expressed as sixtieths of a turn (0–55)
    pub fn hours_in_sixtieths(&self) -> u8 {
        (u16::from(self.hours) * 60 / 12) as u8
    }
}

/// Source of local wall clock time
pub trait WallClock {
    /// Current local time
    fn now(&self) -> NaiveDateTime;
}

pub struct TimeReference {
    /// Clock time (UTC)
    time: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            time: NaiveDateTime::UNIX_EPOCH,
            instant: Instant::from_ticks(0),
        }
    }
}

impl TimeReference {
    /// Create new time reference from NaiveDateTime taken at `instant`
    pub fn new(time: NaiveDateTime, instant: Instant) -> Self {
        Self { time, instant }
    }
    /// Create new time reference from a UNIX timestamp taken at `instant`
    pub fn from_timestamp(secs: i64, instant: Instant) -> Self {
        Self {
            time: NaiveDateTime::from_timestamp_opt(secs, 0).unwrap_or(NaiveDateTime::UNIX_EPOCH),
            instant,
        }
    }
}

pub struct TimeManager {
    reference: TimeReference,
    /// Offset of local time from UTC in seconds
    utc_offset: i32,
}

impl TimeManager {
    /// Initialize time measurement on boot
    pub fn init(utc_offset: i32) -> Self {
        Self {
            reference: TimeReference::default(),
            utc_offset,
        }
    }
    /// Local time at the given system time
    pub fn time_at(&self, now: Instant) -> NaiveDateTime {
        let elapsed = now
            .checked_duration_since(self.reference.instant)
            .map(|d| d.as_micros() as i64)
            .unwrap_or(0);
        NaiveDateTime::from_timestamp_micros(
            self.reference.time.timestamp_micros()
                + elapsed
                + self.utc_offset as i64 * 1_000_000,
        )
        .unwrap_or(self.reference.time)
    }
    /// Update time reference
    pub fn set_time(&mut self, reference: TimeReference) {
        debug!("Time reference set to {}", reference.time.timestamp());
        self.reference = reference;
    }
}

impl WallClock for TimeManager {
    fn now(&self) -> NaiveDateTime {
        self.time_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    #[test]
    fn converts_wall_clock_to_twelve_hours() {
        assert_eq!(ClockTime::new(0, 0), ClockTime { hours: 0, minutes: 0 });
        assert_eq!(ClockTime::new(9, 30), ClockTime { hours: 9, minutes: 30 });
        assert_eq!(ClockTime::new(12, 5), ClockTime { hours: 0, minutes: 5 });
        assert_eq!(ClockTime::new(23, 59), ClockTime { hours: 11, minutes: 59 });
    }

    #[test]
    fn clock_time_from_datetime() {
        let time = NaiveDate::from_ymd_opt(2024, 3, 3)
            .unwrap()
            .and_hms_opt(21, 30, 12)
            .unwrap();
        assert_eq!(ClockTime::from_datetime(&time), ClockTime::new(9, 30));
    }

    #[test]
    fn hours_in_sixtieths() {
        assert_eq!(ClockTime::new(0, 0).hours_in_sixtieths(), 0);
        assert_eq!(ClockTime::new(3, 0).hours_in_sixtieths(), 15);
        assert_eq!(ClockTime::new(11, 0).hours_in_sixtieths(), 55);
    }

    #[test]
    fn time_manager_advances_with_uptime() {
        let mut manager = TimeManager::init(3_600);
        // 2024-03-03 10:00:00 UTC
        manager.set_time(TimeReference::from_timestamp(1_709_460_000, Instant::from_secs(5)));

        let local = manager.time_at(Instant::from_secs(5 + 90));
        assert_eq!(local.hour(), 11);
        assert_eq!(local.minute(), 1);
        assert_eq!(local.second(), 30);
        assert_eq!(local.day(), 3);
    }

    #[test]
    fn time_manager_ignores_instants_before_reference() {
        let mut manager = TimeManager::init(0);
        manager.set_time(TimeReference::from_timestamp(1_709_460_000, Instant::from_secs(10)));

        assert_eq!(manager.time_at(Instant::from_secs(1)).timestamp(), 1_709_460_000);
    }
}
