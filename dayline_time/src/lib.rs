// Copyright 2025 the Dayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dayline Time: pure conversions between calendar time and day-column pixels.
//!
//! A day column renders a fixed range of hours at a fixed vertical scale
//! (pixels per minute). This crate owns the math that maps between the two
//! spaces:
//!
//! - [`DayAxis::time_to_offset`]: instant → vertical pixel offset within a day.
//! - [`DayAxis::offset_to_time`]: vertical pixel offset → instant, rounded to
//!   the nearest 5-minute tick.
//! - [`DayAxis::pixel_to_day_index`] / [`DayAxis::nearest_day_index`]:
//!   horizontal pan offset → day index within a materialized window, using
//!   floor division and rounding respectively.
//!
//! All functions are pure and total: out-of-range hours extrapolate rather
//! than error, and callers clamp at display bounds. The hour range may extend
//! past midnight (for example `8..26` for a schedule that runs until 02:00);
//! offsets past 24:00 simply resolve to instants on the following calendar
//! day.
//!
//! ## Minimal example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use dayline_time::DayAxis;
//!
//! let axis = DayAxis::default();
//! let day = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
//!
//! // 10:30 on the 4th, with the default 08:00 day start.
//! let t = day.and_hms_opt(10, 30, 0).unwrap();
//! let y = axis.time_to_offset(day, t);
//! assert_eq!(y, 150.0);
//!
//! // And back, at 5-minute resolution.
//! assert_eq!(axis.offset_to_time(day, y), t);
//! ```

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Vertical time scale of a day column plus horizontal day indexing helpers.
///
/// `day_start_hour..day_end_hour` is the displayed hour range. `day_end_hour`
/// may exceed 24 for schedules that run past midnight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayAxis {
    /// First displayed hour of the day (offset zero).
    pub day_start_hour: u32,
    /// One past the last displayed hour. May exceed 24.
    pub day_end_hour: u32,
    /// Vertical scale in pixels per minute.
    pub px_per_minute: f64,
}

impl Default for DayAxis {
    fn default() -> Self {
        Self {
            day_start_hour: 8,
            day_end_hour: 26,
            px_per_minute: 1.0,
        }
    }
}

/// Granularity, in minutes, that [`DayAxis::offset_to_time`] rounds to.
pub const TICK_MINUTES: f64 = 5.0;

impl DayAxis {
    /// Returns the instant at which day `day`'s column begins.
    #[must_use]
    pub fn day_start(&self, day: NaiveDate) -> NaiveDateTime {
        day.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(self.day_start_hour) * 60)
    }

    /// Converts an instant into a vertical pixel offset within `day`'s column.
    ///
    /// Instants before the day start yield negative offsets; instants past the
    /// displayed range extrapolate. Callers clamp at display bounds.
    #[must_use]
    pub fn time_to_offset(&self, day: NaiveDate, time: NaiveDateTime) -> f64 {
        let minutes = (time - self.day_start(day)).num_seconds() as f64 / 60.0;
        minutes * self.px_per_minute
    }

    /// Converts a vertical pixel offset within `day`'s column into an instant,
    /// rounding the minute component to the nearest [`TICK_MINUTES`] tick.
    #[must_use]
    pub fn offset_to_time(&self, day: NaiveDate, pixel_y: f64) -> NaiveDateTime {
        let minutes = pixel_y / self.px_per_minute;
        let snapped = (minutes / TICK_MINUTES).round() * TICK_MINUTES;
        self.day_start(day) + Duration::minutes(snapped as i64)
    }

    /// Returns the day index under a horizontal pan offset, via floor division.
    ///
    /// The index is relative to whatever origin `pan_x` is measured from
    /// (conventionally the start of a materialized day window) and may be
    /// negative. A non-positive `day_width` yields index `0`.
    #[must_use]
    pub fn pixel_to_day_index(&self, pan_x: f64, day_width: f64) -> i64 {
        if day_width <= 0.0 {
            return 0;
        }
        (pan_x / day_width).floor() as i64
    }

    /// Returns the day index whose boundary is nearest to `pan_x`.
    ///
    /// Used for magnetic day snapping after scrolling settles.
    #[must_use]
    pub fn nearest_day_index(&self, pan_x: f64, day_width: f64) -> i64 {
        if day_width <= 0.0 {
            return 0;
        }
        (pan_x / day_width).round() as i64
    }

    /// Total rendered height of one day column in pixels.
    #[must_use]
    pub fn day_height(&self) -> f64 {
        f64::from(self.day_end_hour.saturating_sub(self.day_start_hour)) * 60.0
            * self.px_per_minute
    }

    /// Maximum vertical scroll offset for a viewport of the given height.
    ///
    /// Zero when the whole column fits inside the viewport.
    #[must_use]
    pub fn max_scroll_y(&self, viewport_height: f64) -> f64 {
        (self.day_height() - viewport_height).max(0.0)
    }
}
