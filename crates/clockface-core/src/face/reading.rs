use chrono::Timelike;
use clockface_proto::{config::ReadingMode, ports::wall_clock::WallClock};

/// Wrap applied to every value of a legacy reading.
const LEGACY_WRAP: i64 = 3600;

/// Hand values on the 60-step dial scale.
///
/// Values are not guaranteed to lie in `0..60`; the hand angle formulas rely
/// on the periodicity of sine and cosine instead of range reduction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClockReading {
    pub hours: f32,
    pub minutes: f32,
    pub seconds: f32,
}

impl ClockReading {
    pub fn read(mode: ReadingMode, clock: &dyn WallClock) -> Self {
        match mode {
            ReadingMode::Legacy => Self::from_epoch_millis(clock.now_millis()),
            ReadingMode::Civil => Self::from_time_of_day(&clock.now()),
        }
    }

    /// Whole seconds, minutes and hours since the epoch, each taken modulo
    /// 3600.
    ///
    /// # Examples
    ///
    /// ```
    /// use clockface_core::face::ClockReading;
    ///
    /// let reading = ClockReading::from_epoch_millis(900_000);
    /// assert_eq!(reading.seconds, 900.0);
    /// assert_eq!(reading.minutes, 15.0);
    /// assert_eq!(reading.hours, 0.0);
    /// ```
    pub fn from_epoch_millis(millis: i64) -> Self {
        let seconds = millis.div_euclid(1000);
        let minutes = seconds.div_euclid(60);
        let hours = minutes.div_euclid(60);

        Self {
            hours: hours.rem_euclid(LEGACY_WRAP) as f32,
            minutes: minutes.rem_euclid(LEGACY_WRAP) as f32,
            seconds: seconds.rem_euclid(LEGACY_WRAP) as f32,
        }
    }

    /// Time of day placed on the dial.
    ///
    /// The hour formula sweeps the opposite way from the minute and second
    /// formulas, so the hour position is stored mirrored as `60 - position`.
    pub fn from_time_of_day<T: Timelike>(time: &T) -> Self {
        let seconds = time.second() as f32;
        let minutes = time.minute() as f32 + seconds / 60.0;
        let position = (time.hour() % 12) as f32 * 5.0 + minutes / 12.0;

        Self {
            hours: (60.0 - position) % 60.0,
            minutes,
            seconds,
        }
    }
}
