// Copyright 2025 the Dayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The assembled viewport engine: window, controllers, targeting, render
//! model.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use kurbo::{Point, Vec2};

use dayline_input::drag::{DragConfig, DragSelect, DragSelection};
use dayline_input::scroll::{ScrollConfig, ScrollController, SnapStep};
use dayline_layout::{FilmTable, Session, SessionId, StackConfig, block_layout};
use dayline_time::DayAxis;
use dayline_window::{DayWindow, WindowConfig};

use crate::nav::{NavCommand, ScrollAlign};
use crate::render::{DayColumn, RenderModel, SessionBlock};

/// All engine tunables in one place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    /// Vertical time scale of the day columns.
    pub axis: DayAxis,
    /// Day-window sizing and rebalancing.
    pub window: WindowConfig,
    /// Settle/snap timing.
    pub scroll: ScrollConfig,
    /// Drag-selection timing.
    pub drag: DragConfig,
    /// Overlap stacking geometry.
    pub stack: StackConfig,
    /// Width of the hour-label gutter left of the day columns.
    pub time_axis_width: f64,
    /// Period of the free-running "now" refresh tick.
    pub now_tick_ms: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            axis: DayAxis::default(),
            window: WindowConfig::default(),
            scroll: ScrollConfig::default(),
            drag: DragConfig::default(),
            stack: StackConfig::default(),
            time_axis_width: 60.0,
            now_tick_ms: 60_000,
        }
    }
}

/// Something the host should react to, drained from input and poll calls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewEvent {
    /// A magnetic snap finished; this date now sits at the viewport's
    /// leading edge. Hosts use it for "which week is active" bookkeeping.
    SnapSettled {
        /// Date of the leading visible day column.
        leading_date: NaiveDate,
    },
    /// A drag selection was committed.
    SelectionCommitted {
        /// Inclusive start of the selected range; never after `end`.
        start: NaiveDateTime,
        /// End of the selected range.
        end: NaiveDateTime,
    },
    /// The periodic "now" refresh fired; the host should re-supply the
    /// current instant via [`CalendarView::set_now`].
    NowTick,
}

/// Free-running periodic tick driven by host polling.
#[derive(Clone, Copy, Debug)]
struct NowTicker {
    period_ms: u64,
    next_ms: Option<u64>,
}

impl NowTicker {
    fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            next_ms: None,
        }
    }

    fn poll(&mut self, now_ms: u64) -> bool {
        let Some(mut next) = self.next_ms else {
            self.next_ms = Some(now_ms + self.period_ms);
            return false;
        };
        if now_ms < next {
            return false;
        }
        while next <= now_ms {
            next += self.period_ms;
        }
        self.next_ms = Some(next);
        true
    }
}

/// The headless schedule-grid viewport engine.
///
/// Owns the virtual day window, pan state, interaction machines, and the
/// supplied film/session collections, and derives the per-frame
/// [`RenderModel`]. All input arrives through explicit method calls on the
/// UI thread; timers are advanced by [`CalendarView::poll`] with a
/// host-supplied monotonic timestamp.
#[derive(Debug)]
pub struct CalendarView {
    axis: DayAxis,
    stack: StackConfig,
    time_axis_width: f64,
    window: DayWindow,
    scroll: ScrollController,
    drag: DragSelect,
    films: FilmTable,
    by_day: HashMap<NaiveDate, Vec<Session>>,
    viewport_width: f64,
    viewport_height: f64,
    pending_nav: Option<NavCommand>,
    focused: Option<SessionId>,
    now: NaiveDateTime,
    now_tick: NowTicker,
}

impl CalendarView {
    /// Creates an engine showing the week of `now`.
    ///
    /// The initial "scroll to today" is parked as a pending navigation until
    /// the host reports viewport geometry via [`Self::set_viewport`].
    #[must_use]
    pub fn new(now: NaiveDateTime, config: ViewConfig) -> Self {
        Self {
            axis: config.axis,
            stack: config.stack,
            time_axis_width: config.time_axis_width,
            window: DayWindow::new(now.date(), config.window),
            scroll: ScrollController::new(config.scroll),
            drag: DragSelect::new(config.drag),
            films: FilmTable::new(),
            by_day: HashMap::new(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            pending_nav: Some(NavCommand::ToDate {
                date: now.date(),
                align: ScrollAlign::Start,
            }),
            focused: None,
            now,
            now_tick: NowTicker::new(config.now_tick_ms),
        }
    }

    /// Width of one day column, or `0.0` while geometry is unknown.
    #[must_use]
    pub fn day_width(&self) -> f64 {
        let days = f64::from(self.window.config().viewport_days);
        if days <= 0.0 {
            return 0.0;
        }
        ((self.viewport_width - self.time_axis_width) / days).max(0.0)
    }

    /// Returns the day window, for inspection.
    #[must_use]
    pub fn window(&self) -> &DayWindow {
        &self.window
    }

    /// Reports the measured size of the scrollable region.
    ///
    /// Re-clamps the vertical offset and flushes any navigation intent that
    /// was waiting for geometry.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
        let y = self.window.offset().y;
        self.window.set_scroll_y(y, self.axis.max_scroll_y(height));
        if self.day_width() > 0.0 {
            if let Some(command) = self.pending_nav.take() {
                self.navigate(command);
            }
        }
    }

    /// Replaces the film and session collections wholesale.
    ///
    /// There is no incremental diffing contract; the data layer re-supplies
    /// everything on change. Sessions are grouped by their start date, which
    /// is the column they render on even when they run past midnight.
    pub fn set_schedule(&mut self, films: FilmTable, sessions: Vec<Session>) {
        self.films = films;
        self.by_day.clear();
        for session in sessions {
            self.by_day
                .entry(session.start.date())
                .or_default()
                .push(session);
        }
    }

    /// Re-supplies the current instant, the target of [`NavCommand::ToNow`].
    pub fn set_now(&mut self, now: NaiveDateTime) {
        self.now = now;
    }

    /// Marks a session whose block paints above its overlap stack, or clears
    /// the mark. Focus affects paint order only, never block offsets.
    pub fn set_focused(&mut self, session: Option<SessionId>) {
        self.focused = session;
    }

    /// Executes a navigation command, or parks it until geometry is known.
    ///
    /// At most one intent is parked; a newer command replaces an older one.
    pub fn navigate(&mut self, command: NavCommand) {
        if self.day_width() <= 0.0 {
            self.pending_nav = Some(command);
            return;
        }
        let (target, align) = match command {
            NavCommand::ToDate { date, align } => (self.axis.day_start(date), align),
            NavCommand::ToSession(id) => {
                let Some(start) = self.session_start(id) else {
                    log::debug!("navigation target session is not in the schedule");
                    return;
                };
                (start, ScrollAlign::Center)
            }
            NavCommand::ToNow => (self.now, ScrollAlign::Center),
        };
        self.scroll_to_time(target, align);
    }

    /// Convenience for [`NavCommand::ToDate`].
    pub fn scroll_to_date(&mut self, date: NaiveDate, align: ScrollAlign) {
        self.navigate(NavCommand::ToDate { date, align });
    }

    /// Convenience for [`NavCommand::ToSession`].
    pub fn scroll_to_session(&mut self, session: SessionId) {
        self.navigate(NavCommand::ToSession(session));
    }

    /// Convenience for [`NavCommand::ToNow`].
    pub fn scroll_to_now(&mut self) {
        self.navigate(NavCommand::ToNow);
    }

    /// Consumes a wheel event with separate X/Y deltas at `now_ms`.
    ///
    /// Horizontal deltas pan the day window (which may extend/trim
    /// underneath); vertical deltas accumulate into the clamped scroll
    /// offset. Any pending snap is superseded.
    pub fn on_wheel(&mut self, delta: Vec2, now_ms: u64) {
        self.scroll.on_wheel(now_ms);
        let day_width = self.day_width();
        let _ = self.window.pan_x(delta.x, day_width);
        self.window
            .scroll_y(delta.y, self.axis.max_scroll_y(self.viewport_height));
    }

    /// Handles a pointer press at a grid-local position; returns `true` if a
    /// drag selection started.
    pub fn on_pointer_down(&mut self, primary_button: bool, on_block: bool, pos: Point) -> bool {
        let Some((day, local_y)) = self.day_under(pos) else {
            return false;
        };
        self.drag.pointer_down(primary_button, on_block, day, local_y)
    }

    /// Handles pointer movement while a drag may be active.
    pub fn on_pointer_move(&mut self, pos: Point) {
        let Some((day, local_y)) = self.day_under(pos) else {
            return;
        };
        self.drag.pointer_move(day, local_y);
    }

    /// Handles pointer release, anywhere — hosts route the global pointer-up
    /// here so drags commit even when released outside the grid.
    pub fn on_pointer_up(&mut self, now_ms: u64) -> Option<ViewEvent> {
        let (start, end) = self.drag.pointer_up(now_ms, &self.axis)?;
        Some(ViewEvent::SelectionCommitted { start, end })
    }

    /// Handles the pointer leaving the tracked region, cancelling any drag.
    pub fn on_pointer_leave(&mut self) {
        self.drag.pointer_leave();
    }

    /// Returns `true` while clicks should be ignored after a drag commit.
    #[must_use]
    pub fn suppresses_click(&self, now_ms: u64) -> bool {
        self.drag.suppresses_click(now_ms)
    }

    /// Returns the raw pixel state of an active drag, for preview rendering.
    #[must_use]
    pub fn drag_selection(&self) -> Option<&DragSelection> {
        self.drag.selection()
    }

    /// Advances timers to `now_ms` and drains resulting events.
    ///
    /// Drives the scroll settle/snap machine against the latest committed
    /// pan offset, flushes a parked navigation if geometry has become
    /// available, and fires the periodic now tick.
    pub fn poll(&mut self, now_ms: u64) -> Vec<ViewEvent> {
        let mut events = Vec::new();
        let day_width = self.day_width();

        if day_width > 0.0 {
            if let Some(command) = self.pending_nav.take() {
                self.navigate(command);
            }
        }

        match self.scroll.poll(now_ms, self.window.offset().x, day_width) {
            SnapStep::Idle => {}
            SnapStep::Glide { x } => {
                let compensation = self.window.set_pan_x(x, day_width);
                self.scroll.shift(compensation);
            }
            SnapStep::Settled { x, leading_day } => {
                let compensation = self.window.set_pan_x(x, day_width);
                let shifted = if day_width > 0.0 {
                    leading_day + (compensation / day_width).round() as i64
                } else {
                    leading_day
                };
                let size = i64::from(self.window.window().size_days);
                if shifted >= 0 && shifted < size {
                    events.push(ViewEvent::SnapSettled {
                        leading_date: self.window.window().date_at(shifted),
                    });
                } else {
                    log::warn!("snap settled on unmaterialized day index {shifted}");
                }
            }
        }

        if self.now_tick.poll(now_ms) {
            events.push(ViewEvent::NowTick);
        }

        events
    }

    /// Derives the per-frame render model.
    ///
    /// Day columns are emitted for every materialized day; session blocks
    /// only for columns intersecting the viewport. Sessions referencing an
    /// unknown film are not renderable and are skipped.
    #[must_use]
    pub fn render_model(&self) -> RenderModel {
        let day_width = self.day_width();
        if day_width <= 0.0 {
            return RenderModel::default();
        }
        let offset = self.window.offset();
        let window = *self.window.window();
        let grid_width = day_width * f64::from(self.window.config().viewport_days);

        let mut days = Vec::with_capacity(window.size_days as usize);
        let mut blocks = Vec::new();
        for i in 0..window.size_days {
            let date = window.date_at(i64::from(i));
            let x = f64::from(i) * day_width - offset.x;
            days.push(DayColumn { date, x });

            if x + day_width <= 0.0 || x >= grid_width {
                continue;
            }
            let Some(day_sessions) = self.by_day.get(&date) else {
                continue;
            };
            for session in day_sessions {
                let focused = self.focused == Some(session.id);
                let Some(layout) = block_layout(
                    session,
                    day_sessions,
                    &self.films,
                    day_width,
                    &self.stack,
                    focused,
                ) else {
                    continue;
                };
                let Some(minutes) = self.films.duration_minutes(session.film) else {
                    continue;
                };
                blocks.push(SessionBlock {
                    session: session.id,
                    film: session.film,
                    top: self.axis.time_to_offset(date, session.start),
                    height: f64::from(minutes) * self.axis.px_per_minute,
                    left: x + layout.left,
                    width: layout.width,
                    z: layout.z,
                });
            }
        }

        RenderModel {
            days,
            blocks,
            scroll_y: offset.y,
        }
    }

    /// Maps a grid-local pointer position to a materialized day column and a
    /// column-local Y. Positions over unmaterialized days degrade to `None`
    /// with a diagnostic: a missed press beats a crash in an interactive
    /// surface.
    fn day_under(&self, pos: Point) -> Option<(NaiveDate, f64)> {
        let day_width = self.day_width();
        if day_width <= 0.0 {
            return None;
        }
        let offset = self.window.offset();
        let index = self.axis.pixel_to_day_index(offset.x + pos.x, day_width);
        let size = i64::from(self.window.window().size_days);
        if index < 0 || index >= size {
            log::warn!("pointer over unmaterialized day index {index} of {size}");
            return None;
        }
        Some((self.window.window().date_at(index), pos.y + offset.y))
    }

    fn session_start(&self, id: SessionId) -> Option<NaiveDateTime> {
        self.by_day
            .values()
            .flatten()
            .find(|s| s.id == id)
            .map(|s| s.start)
    }

    fn scroll_to_time(&mut self, target: NaiveDateTime, align: ScrollAlign) {
        let day_width = self.day_width();
        let day = target.date();
        if !self.window.window().contains(day) {
            self.window.recenter_on(day);
        }
        let Some(index) = self.window.window().day_index_of(day) else {
            log::warn!("navigation target {day} fell outside the window after recenter");
            return;
        };
        self.scroll.cancel();

        let column = i64::from(align.column(self.window.config().viewport_days));
        let x = (i64::from(index) - column) as f64 * day_width;
        let _ = self.window.set_pan_x(x, day_width);

        let target_y = self.axis.time_to_offset(day, target) - self.viewport_height / 2.0;
        self.window
            .set_scroll_y(target_y, self.axis.max_scroll_y(self.viewport_height));
    }
}
