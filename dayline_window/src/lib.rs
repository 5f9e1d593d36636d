// Copyright 2025 the Dayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dayline Window: a bounded, materialized day window over an unbounded
//! date axis.
//!
//! A schedule grid can be panned across an effectively unbounded range of
//! dates, but only a bounded run of day columns should ever be materialized.
//! [`DayWindow`] owns that run — a [`VirtualWindow`] of contiguous dates —
//! together with the continuous [`PanOffset`] measured from the window's
//! start, and rebalances the window as panning approaches either edge:
//!
//! - Approaching the leading (left) edge **prepends** a step of days and
//!   compensates the pan offset, so nothing on screen moves.
//! - Approaching the trailing (right) edge **appends** a step of days.
//! - Whenever the window grows past its maximum, days are **trimmed** from
//!   the far edge; trimming the leading edge shifts `start_date` and the pan
//!   offset in lockstep, again leaving the visible pixels untouched.
//!
//! The net effect is the window invariant: after any sequence of pans the
//! window size stays within configured bounds and the visible viewport is
//! always fully materialized, while extend/trim never causes a visible jump.
//!
//! All thresholds and step sizes are empirically chosen tunables on
//! [`WindowConfig`], not semantic invariants.
//!
//! ## Minimal example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use dayline_window::{DayWindow, WindowConfig};
//!
//! let day0 = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
//! let mut window = DayWindow::new(day0, WindowConfig::default());
//!
//! // Pan one day to the right at 100px per day column. The window may
//! // rebalance underneath, but the date at the leading edge is unaffected.
//! window.pan_x(100.0, 100.0);
//! let leading = window.leading_day_index(100.0);
//! assert_eq!(
//!     window.window().date_at(leading),
//!     day0 + chrono::Duration::days(1),
//! );
//! assert!(window.window().size_days <= WindowConfig::default().max_window_days);
//! ```

use chrono::{Duration, NaiveDate};

/// Tunables governing window sizing and rebalancing.
///
/// The defaults mirror a seven-day viewport: extend by a week whenever fewer
/// than three materialized days remain off-screen at the approached edge, and
/// cap the window at thirty days.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    /// Number of day columns visible at once.
    pub viewport_days: u32,
    /// Extend when fewer than this many days remain beyond an edge.
    pub extend_threshold: u32,
    /// Number of days added per extension.
    pub extend_step: u32,
    /// Hard cap on the materialized day count.
    pub max_window_days: u32,
    /// Minimum off-screen slack preserved at a trimmed edge.
    pub trim_threshold: u32,
    /// Materialized day count of a freshly created or recentered window.
    pub initial_days: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            viewport_days: 7,
            extend_threshold: 3,
            extend_step: 7,
            max_window_days: 30,
            trim_threshold: 2,
            initial_days: 21,
        }
    }
}

impl WindowConfig {
    /// Smallest window size the rebalancer will trim down to.
    #[must_use]
    pub fn min_window_days(&self) -> u32 {
        self.viewport_days + self.trim_threshold
    }
}

/// The contiguous run of dates currently materialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VirtualWindow {
    /// First materialized date.
    pub start_date: NaiveDate,
    /// Number of materialized days.
    pub size_days: u32,
}

impl VirtualWindow {
    /// Returns the date at a day index within the window.
    ///
    /// Indices outside `0..size_days` extrapolate; callers that need
    /// materialized days check [`Self::day_index_of`] instead.
    #[must_use]
    pub fn date_at(&self, index: i64) -> NaiveDate {
        self.start_date + Duration::days(index)
    }

    /// Returns the day index of a date, if it is materialized.
    #[must_use]
    pub fn day_index_of(&self, date: NaiveDate) -> Option<u32> {
        let offset = (date - self.start_date).num_days();
        if offset >= 0 && offset < i64::from(self.size_days) {
            Some(offset as u32)
        } else {
            None
        }
    }

    /// Returns `true` if the date is materialized.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.day_index_of(date).is_some()
    }
}

/// Continuous pan position, measured from the window's start.
///
/// `x` is unbounded in principle (rebalancing keeps it within the window in
/// practice); `y` is clamped by the caller against the day column height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanOffset {
    /// Horizontal offset in pixels from the first materialized day.
    pub x: f64,
    /// Vertical offset in pixels from the top of the day columns.
    pub y: f64,
}

/// Owns the [`VirtualWindow`] and [`PanOffset`] and keeps them balanced.
#[derive(Clone, Debug)]
pub struct DayWindow {
    window: VirtualWindow,
    offset: PanOffset,
    config: WindowConfig,
}

impl DayWindow {
    /// Creates a window of [`WindowConfig::initial_days`] days with
    /// `start_date` as its first materialized date and a zero pan offset.
    #[must_use]
    pub fn new(start_date: NaiveDate, config: WindowConfig) -> Self {
        let size = config
            .initial_days
            .clamp(config.min_window_days(), config.max_window_days);
        Self {
            window: VirtualWindow {
                start_date,
                size_days: size,
            },
            offset: PanOffset::default(),
            config,
        }
    }

    /// Returns the current window.
    #[must_use]
    pub fn window(&self) -> &VirtualWindow {
        &self.window
    }

    /// Returns the current pan offset.
    #[must_use]
    pub fn offset(&self) -> PanOffset {
        self.offset
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Index of the day column at the viewport's leading edge.
    #[must_use]
    pub fn leading_day_index(&self, day_width: f64) -> i64 {
        if day_width <= 0.0 {
            return 0;
        }
        (self.offset.x / day_width).floor() as i64
    }

    /// Pans horizontally by `delta` pixels, then rebalances.
    ///
    /// Returns the compensation applied to the pan offset by any extend or
    /// trim, in pixels. The visible position moves by exactly `delta`; the
    /// compensation only re-expresses it relative to the shifted window
    /// start, so callers animating absolute offsets must shift their targets
    /// by the returned amount.
    pub fn pan_x(&mut self, delta: f64, day_width: f64) -> f64 {
        self.offset.x += delta;
        self.rebalance(day_width)
    }

    /// Replaces the horizontal pan offset, then rebalances.
    ///
    /// Returns the same compensation as [`Self::pan_x`].
    pub fn set_pan_x(&mut self, x: f64, day_width: f64) -> f64 {
        self.offset.x = x;
        self.rebalance(day_width)
    }

    /// Accumulates a vertical scroll delta, clamped to `[0, max_scroll_y]`.
    pub fn scroll_y(&mut self, delta: f64, max_scroll_y: f64) {
        self.offset.y = (self.offset.y + delta).clamp(0.0, max_scroll_y.max(0.0));
    }

    /// Replaces the vertical scroll offset, clamped to `[0, max_scroll_y]`.
    pub fn set_scroll_y(&mut self, y: f64, max_scroll_y: f64) {
        self.offset.y = y.clamp(0.0, max_scroll_y.max(0.0));
    }

    /// Recenters the window on a date that lies outside it.
    ///
    /// The window keeps its size; `start_date` moves so that `target` sits at
    /// the window's midpoint. The pan offset is left for the caller to place
    /// (alignment is a navigation concern), so geometry must be known before
    /// anything is derived from the offset again.
    pub fn recenter_on(&mut self, target: NaiveDate) {
        let half = i64::from(self.window.size_days / 2);
        self.window.start_date = target - Duration::days(half);
    }

    /// Grows or shrinks the window so the pan offset keeps comfortable
    /// off-screen slack at both edges. Returns the pixel compensation applied
    /// to the offset.
    fn rebalance(&mut self, day_width: f64) -> f64 {
        if day_width <= 0.0 || self.config.extend_step == 0 {
            // Geometry not ready, or a config that cannot make progress;
            // leave the window untouched.
            return 0.0;
        }
        let mut compensation = 0.0;

        loop {
            let leading = (self.offset.x / day_width).floor() as i64;
            let trailing = i64::from(self.window.size_days)
                - (leading + i64::from(self.config.viewport_days));

            if leading < i64::from(self.config.extend_threshold) {
                compensation += self.extend_leading(day_width);
            } else if trailing < i64::from(self.config.extend_threshold) {
                compensation += self.extend_trailing(day_width);
            } else {
                break;
            }
        }

        compensation
    }

    /// Prepends `extend_step` days, compensating the offset so the visible
    /// position is unchanged, then trims overflow from the trailing edge.
    fn extend_leading(&mut self, day_width: f64) -> f64 {
        let step = i64::from(self.config.extend_step);
        self.window.start_date -= Duration::days(step);
        self.window.size_days += self.config.extend_step;
        self.offset.x += step as f64 * day_width;

        let trim = self.trim_budget(day_width, Edge::Trailing);
        self.window.size_days -= trim;
        step as f64 * day_width
    }

    /// Appends `extend_step` days, then trims overflow from the leading edge,
    /// shifting `start_date` and the offset in lockstep.
    fn extend_trailing(&mut self, day_width: f64) -> f64 {
        self.window.size_days += self.config.extend_step;

        let trim = self.trim_budget(day_width, Edge::Leading);
        self.window.size_days -= trim;
        self.window.start_date += Duration::days(i64::from(trim));
        let compensation = -f64::from(trim) * day_width;
        self.offset.x += compensation;
        compensation
    }

    /// Number of days to trim from `edge` after an extension: enough to get
    /// back under the maximum, never more than one extend step, and never so
    /// many that the trimmed edge's remaining slack drops below the extend
    /// threshold (which would make extend and trim chase each other).
    fn trim_budget(&self, day_width: f64, edge: Edge) -> u32 {
        let floor = self
            .config
            .max_window_days
            .max(self.config.min_window_days());
        let over = self.window.size_days.saturating_sub(floor);
        if over == 0 {
            return 0;
        }

        let leading = (self.offset.x / day_width).floor() as i64;
        let trailing = i64::from(self.window.size_days)
            - (leading + i64::from(self.config.viewport_days));
        let slack = match edge {
            Edge::Leading => leading,
            Edge::Trailing => trailing,
        };
        let spare = (slack - i64::from(self.config.extend_threshold)).max(0) as u32;

        over.min(self.config.extend_step).min(spare)
    }
}

#[derive(Clone, Copy)]
enum Edge {
    Leading,
    Trailing,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::{DayWindow, WindowConfig};

    const DAY_W: f64 = 100.0;

    fn day0() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 4).unwrap()
    }

    fn window_with_size(size: u32) -> DayWindow {
        let config = WindowConfig {
            initial_days: size,
            ..WindowConfig::default()
        };
        DayWindow::new(day0(), config)
    }

    /// Screen position of a fixed reference date, independent of how the
    /// window is currently anchored.
    fn screen_x_of(window: &DayWindow, date: NaiveDate) -> f64 {
        let index = (date - window.window().start_date).num_days() as f64;
        index * DAY_W - window.offset().x
    }

    #[test]
    fn new_window_clamps_initial_size() {
        let w = window_with_size(100);
        assert_eq!(w.window().size_days, 30);
        let w = window_with_size(1);
        assert_eq!(w.window().size_days, 9);
    }

    #[test]
    fn panning_left_past_threshold_prepends_and_trims() {
        // Spec scenario: {day0, 28}, pan until 2 days remain leading.
        let mut w = window_with_size(28);
        w.set_pan_x(10.0 * DAY_W, DAY_W);
        assert_eq!(w.window().size_days, 28);

        // Leading slack becomes 2 (< 3): prepend 7 → 35, trim 5 → 30.
        w.set_pan_x(2.5 * DAY_W, DAY_W);
        assert_eq!(w.window().start_date, day0() - Duration::days(7));
        assert_eq!(w.window().size_days, 30);
        // Offset compensated by the full prepend.
        assert_eq!(w.offset().x, 9.5 * DAY_W);
    }

    #[test]
    fn panning_right_past_threshold_appends_and_trims_leading() {
        let mut w = window_with_size(30);
        // Trailing slack = 30 - (21 + 7) = 2 (< 3) at x = 21.5 days.
        let comp = w.set_pan_x(21.5 * DAY_W, DAY_W);
        // Append 7 → 37, trim 7 leading → 30 with start and offset shifted.
        assert_eq!(w.window().size_days, 30);
        assert_eq!(w.window().start_date, day0() + Duration::days(7));
        assert_eq!(w.offset().x, 14.5 * DAY_W);
        assert_eq!(comp, -7.0 * DAY_W);
    }

    #[test]
    fn extend_and_trim_never_move_the_screen() {
        let mut w = window_with_size(21);
        let reference = day0() + Duration::days(10);
        w.set_pan_x(5.0 * DAY_W, DAY_W);
        let before = screen_x_of(&w, reference);

        // Pan hard left, then hard right, in fractional steps.
        let mut x = 5.0 * DAY_W;
        for _ in 0..40 {
            x -= 0.7 * DAY_W;
            let expected = screen_x_of(&w, reference) + 0.7 * DAY_W;
            w.pan_x(-0.7 * DAY_W, DAY_W);
            assert!((screen_x_of(&w, reference) - expected).abs() < 1e-9);
        }
        for _ in 0..80 {
            x += 0.7 * DAY_W;
            let expected = screen_x_of(&w, reference) - 0.7 * DAY_W;
            w.pan_x(0.7 * DAY_W, DAY_W);
            assert!((screen_x_of(&w, reference) - expected).abs() < 1e-9);
        }

        // Net movement equals the net pan delta, nothing more.
        let net = before - (x - 5.0 * DAY_W);
        assert!((screen_x_of(&w, reference) - net).abs() < 1e-9);
    }

    #[test]
    fn window_size_stays_bounded_under_arbitrary_pans() {
        let config = WindowConfig::default();
        let mut w = window_with_size(21);
        let deltas = [
            3.3, -9.1, 0.4, -22.8, 14.9, 5.5, -1.2, 40.0, -40.0, 7.7, -3.0, 2.2,
        ];
        for (i, d) in deltas.iter().cycle().take(200).enumerate() {
            let signed = if i % 3 == 0 { -d } else { *d };
            w.pan_x(signed * DAY_W * 0.1, DAY_W);
            let size = w.window().size_days;
            assert!(size >= config.min_window_days(), "size {size} under min");
            assert!(size <= config.max_window_days, "size {size} over max");

            // The visible 7-day range is always materialized.
            let leading = w.leading_day_index(DAY_W);
            assert!(leading >= 0, "viewport ran off the leading edge");
            assert!(
                leading + i64::from(config.viewport_days) <= i64::from(size),
                "viewport ran off the trailing edge"
            );
        }
    }

    #[test]
    fn pan_without_geometry_leaves_window_untouched() {
        let mut w = window_with_size(21);
        let before = *w.window();
        let comp = w.pan_x(-500.0, 0.0);
        assert_eq!(comp, 0.0);
        assert_eq!(*w.window(), before);
        assert_eq!(w.offset().x, -500.0);
    }

    #[test]
    fn vertical_scroll_clamps_to_range() {
        let mut w = window_with_size(21);
        w.scroll_y(300.0, 480.0);
        assert_eq!(w.offset().y, 300.0);
        w.scroll_y(300.0, 480.0);
        assert_eq!(w.offset().y, 480.0);
        w.scroll_y(-1_000.0, 480.0);
        assert_eq!(w.offset().y, 0.0);
        // A shrinking viewport can reduce the clamp below the current offset.
        w.set_scroll_y(480.0, 480.0);
        w.scroll_y(0.0, 100.0);
        assert_eq!(w.offset().y, 100.0);
    }

    #[test]
    fn recenter_places_target_at_the_midpoint() {
        let mut w = window_with_size(30);
        let target = day0() + Duration::days(120);
        w.recenter_on(target);
        assert_eq!(w.window().start_date, target - Duration::days(15));
        assert!(w.window().contains(target));
    }

    #[test]
    fn date_indexing_roundtrips_inside_the_window() {
        let w = window_with_size(21);
        let window = w.window();
        assert_eq!(window.day_index_of(day0()), Some(0));
        assert_eq!(window.day_index_of(day0() + Duration::days(20)), Some(20));
        assert_eq!(window.day_index_of(day0() + Duration::days(21)), None);
        assert_eq!(window.day_index_of(day0() - Duration::days(1)), None);
        assert_eq!(window.date_at(5), day0() + Duration::days(5));
    }
}
