// Copyright 2025 the Dayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag selection: pointer sequences over day columns become time ranges.
//!
//! A primary-button press on empty day-column space starts a selection; the
//! pointer then sweeps over day/Y positions, which are kept as raw pixels to
//! avoid repeated rounding; releasing the pointer commits a `(start, end)`
//! time range via [`DayAxis`]. Releasing outside the tracked region still
//! commits (hosts route the global pointer-up here); leaving the tracked
//! region cancels without committing.
//!
//! The committed range is always ordered: dragging upward or onto an earlier
//! day swaps the bounds rather than producing an inverted range. Each commit
//! arms a short click-suppression window so the same pointer-up is not also
//! interpreted as a click on whatever was underneath.
//!
//! ## Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use dayline_input::drag::{DragConfig, DragSelect};
//! use dayline_time::DayAxis;
//!
//! let axis = DayAxis::default();
//! let mut drag = DragSelect::new(DragConfig::default());
//! let day = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
//!
//! assert!(drag.pointer_down(true, false, day, 120.0));
//! drag.pointer_move(day, 180.0);
//! let (start, end) = drag.pointer_up(1_000, &axis).unwrap();
//! assert_eq!(start, day.and_hms_opt(10, 0, 0).unwrap());
//! assert_eq!(end, day.and_hms_opt(11, 0, 0).unwrap());
//! assert!(drag.suppresses_click(1_200));
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use dayline_time::DayAxis;

/// Timing tunables for the drag machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragConfig {
    /// How long clicks stay suppressed after a commit.
    pub suppress_click_ms: u64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            suppress_click_ms: 300,
        }
    }
}

/// The transient pixel state of an active drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSelection {
    /// Day column the drag started on.
    pub anchor_day: NaiveDate,
    /// Vertical pixel position of the press within the day column.
    pub anchor_y: f64,
    /// Day column currently under the pointer.
    pub current_day: NaiveDate,
    /// Vertical pixel position currently under the pointer.
    pub current_y: f64,
}

/// Drag-selection state machine: `Idle → Dragging → Idle`.
#[derive(Clone, Debug)]
pub struct DragSelect {
    config: DragConfig,
    selection: Option<DragSelection>,
    suppress_until: Option<u64>,
}

impl DragSelect {
    /// Creates an idle machine.
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            selection: None,
            suppress_until: None,
        }
    }

    /// Handles a pointer press over a day column; returns `true` if a drag
    /// started.
    ///
    /// Only a primary-button press on empty column space starts a drag:
    /// presses on existing session blocks (`on_block`) have their own click
    /// handling and are ignored here.
    pub fn pointer_down(
        &mut self,
        primary_button: bool,
        on_block: bool,
        day: NaiveDate,
        local_y: f64,
    ) -> bool {
        if !primary_button || on_block {
            return false;
        }
        self.selection = Some(DragSelection {
            anchor_day: day,
            anchor_y: local_y,
            current_day: day,
            current_y: local_y,
        });
        true
    }

    /// Updates the pointer position while dragging; a no-op when idle.
    ///
    /// Positions stay as raw pixels until commit, so no rounding accumulates.
    pub fn pointer_move(&mut self, day: NaiveDate, local_y: f64) {
        if let Some(selection) = &mut self.selection {
            selection.current_day = day;
            selection.current_y = local_y;
        }
    }

    /// Handles pointer release, committing the selection if one is active.
    ///
    /// The earlier of the two day columns provides the start day and the
    /// smaller Y the start offset, so the range is ordered regardless of the
    /// drag direction. A successful commit arms the click-suppression window
    /// at `now_ms`.
    pub fn pointer_up(
        &mut self,
        now_ms: u64,
        axis: &DayAxis,
    ) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let selection = self.selection.take()?;

        let (start_day, end_day) = if selection.anchor_day <= selection.current_day {
            (selection.anchor_day, selection.current_day)
        } else {
            (selection.current_day, selection.anchor_day)
        };
        let start_y = selection.anchor_y.min(selection.current_y);
        let end_y = selection.anchor_y.max(selection.current_y);

        let start = axis.offset_to_time(start_day, start_y);
        let end = axis.offset_to_time(end_day, end_y);

        self.suppress_until = Some(now_ms + self.config.suppress_click_ms);
        Some((start, end))
    }

    /// Cancels the drag without committing, as when the pointer leaves the
    /// tracked region.
    pub fn pointer_leave(&mut self) {
        self.selection = None;
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.selection.is_some()
    }

    /// Returns the raw pixel state of the active drag, for preview rendering.
    #[must_use]
    pub fn selection(&self) -> Option<&DragSelection> {
        self.selection.as_ref()
    }

    /// Returns `true` while the post-commit click-suppression window is open.
    #[must_use]
    pub fn suppresses_click(&self, now_ms: u64) -> bool {
        self.suppress_until.is_some_and(|until| now_ms < until)
    }
}
