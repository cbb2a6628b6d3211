use chrono::{Local, Timelike};

/// Wall-clock time of day with second resolution.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Timestamp {
    hour: u32,
    minute: u32,
    second: u32,
}

impl Timestamp {
    /// Returns `None` unless `hour < 24`, `minute < 60` and `second < 60`.
    pub fn new(hour: u32, minute: u32, second: u32) -> Option<Self> {
        (hour < 24 && minute < 60 && second < 60).then_some(Self { hour, minute, second })
    }

    /// Hour of the day, 0 to 23.
    #[inline]
    pub fn hour(self) -> u32 {
        self.hour
    }

    #[inline]
    pub fn minute(self) -> u32 {
        self.minute
    }

    #[inline]
    pub fn second(self) -> u32 {
        self.second
    }

    /// Converts any chrono time-of-day value. Sub-second precision is dropped.
    pub fn from_timelike(t: &impl Timelike) -> Self {
        Self {
            hour: t.hour(),
            minute: t.minute(),
            second: t.second(),
        }
    }
}

/// Source of the current time of day.
pub trait TimeSource {
    fn now(&self) -> Timestamp;
}

/// The system clock in the local time zone.
#[derive(Debug, Default, Copy, Clone)]
pub struct LocalClock;

impl TimeSource for LocalClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_timelike(&Local::now())
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Copy, Clone)]
pub struct FixedClock(pub Timestamp);

impl TimeSource for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(Timestamp::new(23, 59, 59).is_some());
        assert!(Timestamp::new(24, 0, 0).is_none());
        assert!(Timestamp::new(0, 60, 0).is_none());
        assert!(Timestamp::new(0, 0, 60).is_none());
    }

    #[test]
    fn converts_from_chrono() {
        let t = NaiveTime::from_hms_opt(15, 4, 5).unwrap();
        assert_eq!(Timestamp::from_timelike(&t), Timestamp::new(15, 4, 5).unwrap());
    }

    #[test]
    fn fixed_clock_returns_its_instant() {
        let ts = Timestamp::new(3, 0, 0).unwrap();
        assert_eq!(FixedClock(ts).now(), ts);
    }

    #[test]
    fn local_clock_yields_valid_fields() {
        let now = LocalClock.now();
        assert!(Timestamp::new(now.hour(), now.minute(), now.second()).is_some());
    }
}
