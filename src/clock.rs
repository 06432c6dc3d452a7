//! Wall-clock time kept from the periodic tick.

use crate::config::TICKS_PER_SECOND;

/// Hour, minute and second of the wall clock.
///
/// Fields may be out of range between an increment (or a serial time-set)
/// and the next [`ClockTime::correct`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl ClockTime {
    /// Midnight.
    pub const MIDNIGHT: Self = Self::new(0, 0, 0);

    /// Creates a time without validating the fields.
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Propagates carries until every field is in range.
    ///
    /// Loops, so values far out of range (e.g. a raw serial time-set of
    /// `255:255:255`) normalize in a single call.
    pub fn correct(&mut self) {
        let mut minute = self.minute as u16 + (self.second / 60) as u16;
        let second = self.second % 60;
        let mut hour = self.hour as u16 + minute / 60;
        minute %= 60;
        hour %= 24;

        self.hour = hour as u8;
        self.minute = minute as u8;
        self.second = second;
    }

    /// Returns the corrected copy.
    #[must_use]
    pub fn corrected(mut self) -> Self {
        self.correct();
        self
    }

    /// True when every field is within its range.
    pub fn is_normalized(&self) -> bool {
        self.hour < 24 && self.minute < 60 && self.second < 60
    }
}

impl core::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Uptime tick counter plus the wall-clock time it drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Clock {
    ticks: u64,
    time: ClockTime,
}

impl Clock {
    /// Clock at midnight with zero uptime.
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            time: ClockTime::MIDNIGHT,
        }
    }

    /// Counts one periodic tick.
    ///
    /// Every [`TICKS_PER_SECOND`]th tick advances the second and corrects
    /// the time. Returns `true` when a second elapsed.
    pub fn advance_one_tick(&mut self) -> bool {
        self.ticks = self.ticks.wrapping_add(1);
        if self.ticks % TICKS_PER_SECOND != 0 {
            return false;
        }

        self.time.second = self.time.second.wrapping_add(1);
        self.time.correct();
        true
    }

    /// Ticks counted since start-up.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Current wall-clock time.
    pub fn time(&self) -> ClockTime {
        self.time
    }

    /// Replaces the wall-clock time as received, without correction.
    pub fn set_time(&mut self, time: ClockTime) {
        self.time = time;
    }
}
