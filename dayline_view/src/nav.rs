// Copyright 2025 the Dayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation commands and alignment for bringing targets into view.

use chrono::NaiveDate;
use dayline_layout::SessionId;

/// Where a targeted day column lands within the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollAlign {
    /// Place the day at the viewport's leading (left) column.
    Start,
    /// Place the day at the viewport's trailing (right) column.
    End,
    /// Place the day a few columns in from the leading edge.
    #[default]
    Center,
}

impl ScrollAlign {
    /// Viewport column index the aligned day occupies.
    #[must_use]
    pub fn column(self, viewport_days: u32) -> u32 {
        match self {
            Self::Start => 0,
            Self::End => viewport_days.saturating_sub(1),
            Self::Center => viewport_days / 2,
        }
    }
}

/// A discrete navigation request, handed to
/// [`CalendarView::navigate`](crate::CalendarView::navigate) by the host.
///
/// Commands are delivered by direct method call; the engine deliberately has
/// no ambient event bus, so hosts own the wiring between their UI and this
/// entry point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavCommand {
    /// Bring a date's column into view with the given alignment.
    ToDate {
        /// Target day.
        date: NaiveDate,
        /// Placement of the target column.
        align: ScrollAlign,
    },
    /// Center the view on a session's start time.
    ToSession(SessionId),
    /// Center the view on the current instant.
    ToNow,
}
