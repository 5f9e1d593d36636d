// Copyright 2025 the Dayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dayline View: the assembled headless viewport engine for a festival
//! schedule grid.
//!
//! [`CalendarView`] wires the workspace's pieces together: the virtual day
//! window from `dayline_window`, the time axis from `dayline_time`, the
//! overlap stacking from `dayline_layout`, and the scroll/drag machines from
//! `dayline_input`. Hosts feed it wheel and pointer events plus viewport
//! geometry, poll it with a monotonic timestamp, and draw whatever
//! [`CalendarView::render_model`] returns.
//!
//! The engine renders nothing itself and owns no timers, threads, or event
//! bus. Navigation arrives as explicit [`NavCommand`]s; results flow back as
//! drained [`ViewEvent`]s. Everything runs on the UI thread; handlers always
//! read the latest committed state, so interleaved wheel, settle, and resize
//! handling cannot act on stale captures.
//!
//! ## Minimal example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use dayline_layout::{Film, FilmId, FilmTable, Session};
//! use dayline_view::{CalendarView, ViewConfig};
//! use kurbo::Vec2;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
//! let mut view = CalendarView::new(today.and_hms_opt(12, 0, 0).unwrap(), ViewConfig::default());
//!
//! // Geometry first: 60px gutter + 7 day columns of 100px.
//! view.set_viewport(760.0, 500.0);
//!
//! // Schedule data arrives wholesale from the data layer.
//! let mut films = FilmTable::new();
//! films.insert(Film::new(FilmId(1), "Opening Night", 105));
//! let sessions = vec![Session::new(
//!     FilmId(1),
//!     today.and_hms_opt(20, 0, 0).unwrap(),
//!     "Main Hall",
//! )];
//! view.set_schedule(films, sessions);
//!
//! // Pan a little, let scrolling settle, then draw.
//! view.on_wheel(Vec2::new(42.0, 0.0), 0);
//! let _events = view.poll(1_000);
//! let model = view.render_model();
//! assert!(!model.days.is_empty());
//! assert_eq!(model.blocks.len(), 1);
//! ```

mod nav;
mod render;
mod view;

pub use nav::{NavCommand, ScrollAlign};
pub use render::{DayColumn, RenderModel, SessionBlock};
pub use view::{CalendarView, ViewConfig, ViewEvent};
