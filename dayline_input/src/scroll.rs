// Copyright 2025 the Dayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll settle detection and magnetic day snapping.
//!
//! Wheel events stream in while the user scrolls; once they pause for
//! [`ScrollConfig::settle_ms`], the pan offset should glide to the nearest
//! whole-day boundary. [`ScrollController`] tracks only the timing and
//! animation state — the host owns the pan offset itself and applies the
//! positions the controller hands back from [`ScrollController::poll`].
//!
//! Any wheel event cancels a pending or running snap and restarts the settle
//! deadline: snapping only ever happens after a genuine pause, and a new pan
//! always supersedes a pending snap.
//!
//! ## Usage
//!
//! ```
//! use dayline_input::scroll::{ScrollConfig, ScrollController, SnapStep};
//!
//! let mut scroll = ScrollController::new(ScrollConfig::default());
//! let day_width = 100.0;
//!
//! // Wheel activity at t=0; the host pans by the wheel delta itself.
//! scroll.on_wheel(0);
//! assert!(scroll.is_scrolling());
//!
//! // 60ms later the settle deadline has passed; polling starts the snap.
//! let step = scroll.poll(60, 130.0, day_width);
//! assert!(matches!(step, SnapStep::Glide { .. }));
//!
//! // Well past the animation, the offset lands on the day boundary.
//! let step = scroll.poll(60 + 500, 130.0, day_width);
//! assert_eq!(step, SnapStep::Settled { x: 100.0, leading_day: 1 });
//! assert!(!scroll.is_scrolling());
//! ```

/// Timing tunables for settle detection and the snap animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollConfig {
    /// Quiet time after the last wheel event before snapping begins.
    pub settle_ms: u64,
    /// Duration of the eased snap animation.
    pub snap_duration_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            settle_ms: 50,
            snap_duration_ms: 180,
        }
    }
}

/// One step of snap progress, returned by [`ScrollController::poll`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SnapStep {
    /// Nothing to do; the pan offset is wherever the host left it.
    Idle,
    /// Snap in flight: the host should move the pan offset to `x`.
    Glide {
        /// Eased pan offset for this frame.
        x: f64,
    },
    /// Snap finished: the offset sits on a day boundary.
    Settled {
        /// Final pan offset, an exact multiple of the day width.
        x: f64,
        /// Index of the day column now at the viewport's leading edge.
        leading_day: i64,
    },
}

#[derive(Clone, Copy, Debug)]
struct SnapAnimation {
    from: f64,
    to: f64,
    start_ms: u64,
    duration_ms: u64,
}

/// Settle/snap state machine over host-owned pan offsets.
#[derive(Clone, Debug)]
pub struct ScrollController {
    config: ScrollConfig,
    settle_deadline: Option<u64>,
    snap: Option<SnapAnimation>,
    scrolling: bool,
}

impl ScrollController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            settle_deadline: None,
            snap: None,
            scrolling: false,
        }
    }

    /// Records wheel activity at `now_ms`.
    ///
    /// Cancels any pending or in-flight snap (last writer wins) and restarts
    /// the settle deadline.
    pub fn on_wheel(&mut self, now_ms: u64) {
        self.scrolling = true;
        self.snap = None;
        self.settle_deadline = Some(now_ms + self.config.settle_ms);
    }

    /// Returns `true` between the first wheel event and the end of the snap.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// Cancels any pending settle or in-flight snap without settling.
    ///
    /// Used when navigation takes over the pan offset.
    pub fn cancel(&mut self) {
        self.settle_deadline = None;
        self.snap = None;
        self.scrolling = false;
    }

    /// Shifts the animation endpoints by `delta` pixels.
    ///
    /// Called when the day window rebalances underneath a snap: the pan
    /// offset is re-expressed relative to a shifted window start, and the
    /// animation must move with it or it would glide to a stale position.
    pub fn shift(&mut self, delta: f64) {
        if delta == 0.0 {
            return;
        }
        if let Some(snap) = &mut self.snap {
            snap.from += delta;
            snap.to += delta;
        }
    }

    /// Advances the machine to `now_ms` against the current pan offset.
    ///
    /// `current_x` is the host's pan offset at poll time; the settle deadline
    /// computes the snap target from it, so interleaved pans are picked up at
    /// their latest committed value rather than a stale capture.
    pub fn poll(&mut self, now_ms: u64, current_x: f64, day_width: f64) -> SnapStep {
        if let Some(deadline) = self.settle_deadline {
            if now_ms >= deadline {
                self.settle_deadline = None;
                if day_width > 0.0 {
                    let nearest = (current_x / day_width).round();
                    self.snap = Some(SnapAnimation {
                        from: current_x,
                        to: nearest * day_width,
                        start_ms: now_ms,
                        duration_ms: self.config.snap_duration_ms,
                    });
                } else {
                    // Geometry not ready; give up on this settle quietly.
                    self.scrolling = false;
                }
            }
        }

        let Some(snap) = self.snap else {
            return SnapStep::Idle;
        };

        let elapsed = now_ms.saturating_sub(snap.start_ms);
        if elapsed >= snap.duration_ms || snap.duration_ms == 0 {
            self.snap = None;
            self.scrolling = false;
            // Derived at settle time: a window rebalance may have shifted the
            // target since the animation started.
            let leading_day = if day_width > 0.0 {
                (snap.to / day_width).round() as i64
            } else {
                0
            };
            return SnapStep::Settled {
                x: snap.to,
                leading_day,
            };
        }

        let t = elapsed as f64 / snap.duration_ms as f64;
        let eased = ease_out_cubic(t);
        SnapStep::Glide {
            x: snap.from + (snap.to - snap.from) * eased,
        }
    }
}

/// Cubic ease-out: fast start, gentle landing on the day boundary.
fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

#[cfg(test)]
mod tests {
    use super::{ScrollConfig, ScrollController, SnapStep, ease_out_cubic};

    const DAY_W: f64 = 100.0;

    fn controller() -> ScrollController {
        ScrollController::new(ScrollConfig::default())
    }

    #[test]
    fn idle_controller_polls_idle() {
        let mut s = controller();
        assert_eq!(s.poll(1_000, 250.0, DAY_W), SnapStep::Idle);
        assert!(!s.is_scrolling());
    }

    #[test]
    fn snap_waits_for_the_settle_deadline() {
        let mut s = controller();
        s.on_wheel(0);
        // Before the deadline nothing snaps.
        assert_eq!(s.poll(49, 130.0, DAY_W), SnapStep::Idle);
        assert!(s.is_scrolling());
        // At the deadline the glide starts from the current offset.
        assert!(matches!(s.poll(50, 130.0, DAY_W), SnapStep::Glide { .. }));
    }

    #[test]
    fn wheel_activity_cancels_a_pending_snap() {
        let mut s = controller();
        s.on_wheel(0);
        // New wheel event just before the deadline restarts it.
        s.on_wheel(49);
        assert_eq!(s.poll(50, 130.0, DAY_W), SnapStep::Idle);
        // Only after the refreshed deadline does the snap begin.
        assert!(matches!(s.poll(99, 130.0, DAY_W), SnapStep::Glide { .. }));
    }

    #[test]
    fn wheel_activity_cancels_a_running_snap() {
        let mut s = controller();
        s.on_wheel(0);
        let _ = s.poll(50, 130.0, DAY_W);
        s.on_wheel(60);
        // The in-flight glide is gone; a fresh settle period runs instead.
        assert_eq!(s.poll(70, 155.0, DAY_W), SnapStep::Idle);
        assert!(matches!(s.poll(110, 155.0, DAY_W), SnapStep::Glide { .. }));
        let step = s.poll(110 + 180, 155.0, DAY_W);
        assert_eq!(
            step,
            SnapStep::Settled {
                x: 2.0 * DAY_W,
                leading_day: 2
            }
        );
    }

    #[test]
    fn snap_lands_exactly_on_the_nearest_day() {
        let mut s = controller();
        s.on_wheel(0);
        // 130px rounds to day 1; 170px would round to day 2.
        let _ = s.poll(50, 130.0, DAY_W);
        let step = s.poll(50 + 180, 130.0, DAY_W);
        assert_eq!(
            step,
            SnapStep::Settled {
                x: DAY_W,
                leading_day: 1
            }
        );
        assert!(!s.is_scrolling());
    }

    #[test]
    fn glide_moves_monotonically_toward_the_target() {
        let mut s = controller();
        s.on_wheel(0);
        let _ = s.poll(50, 170.0, DAY_W);
        let mut last = 170.0;
        for t in [80_u64, 110, 140, 170] {
            match s.poll(t, last, DAY_W) {
                SnapStep::Glide { x } => {
                    assert!(x >= last, "glide reversed direction");
                    assert!(x <= 200.0, "glide overshot the day boundary");
                    last = x;
                }
                step => panic!("expected glide, got {step:?}"),
            }
        }
        assert_eq!(
            s.poll(50 + 180, last, DAY_W),
            SnapStep::Settled {
                x: 200.0,
                leading_day: 2
            }
        );
    }

    #[test]
    fn shift_keeps_the_snap_target_aligned_after_rebalance() {
        let mut s = controller();
        s.on_wheel(0);
        let _ = s.poll(50, 130.0, DAY_W);
        // The window prepended a week: offsets grew by 7 day widths.
        s.shift(7.0 * DAY_W);
        let step = s.poll(50 + 180, 130.0 + 7.0 * DAY_W, DAY_W);
        assert_eq!(
            step,
            SnapStep::Settled {
                x: 8.0 * DAY_W,
                leading_day: 8
            }
        );
    }

    #[test]
    fn settle_without_geometry_goes_quietly_idle() {
        let mut s = controller();
        s.on_wheel(0);
        assert_eq!(s.poll(100, 130.0, 0.0), SnapStep::Idle);
        assert!(!s.is_scrolling());
    }

    #[test]
    fn cancel_discards_all_pending_state() {
        let mut s = controller();
        s.on_wheel(0);
        let _ = s.poll(50, 130.0, DAY_W);
        s.cancel();
        assert_eq!(s.poll(1_000, 130.0, DAY_W), SnapStep::Idle);
        assert!(!s.is_scrolling());
    }

    #[test]
    fn ease_out_cubic_hits_both_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }
}
