// Copyright 2025 the Dayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dayline Layout: session data model and overlap stacking for day columns.
//!
//! A festival schedule renders [`Session`]s as blocks inside a day column.
//! Sessions reference a [`Film`] for their duration; two sessions of
//! different films can occupy overlapping time spans in the same venue
//! column, and the layout must stagger them so neither is fully covered.
//!
//! The core is the overlap stacking algorithm:
//!
//! - [`overlap_index`]: a session's rank among the time-intersecting sessions
//!   of one day, ordered by film duration ascending (shorter sessions stack
//!   in front), with ties keeping input order.
//! - [`block_layout`]: turns that rank into a horizontal offset, width, and
//!   paint order for the block.
//!
//! For `N` mutually overlapping sessions the computed indices are exactly
//! `0..N`, so no two of them share an offset. Sessions whose film is missing
//! from the [`FilmTable`] are not renderable and are excluded throughout.
//!
//! ## Minimal example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use dayline_layout::{Film, FilmId, FilmTable, Session, StackConfig, block_layout};
//!
//! let mut films = FilmTable::new();
//! films.insert(Film::new(FilmId(1), "Short", 30));
//! films.insert(Film::new(FilmId(2), "Long", 90));
//!
//! let start = NaiveDate::from_ymd_opt(2025, 7, 4)
//!     .unwrap()
//!     .and_hms_opt(20, 0, 0)
//!     .unwrap();
//! let day = vec![
//!     Session::new(FilmId(2), start, "Main Hall"),
//!     Session::new(FilmId(1), start, "Main Hall"),
//! ];
//!
//! let cfg = StackConfig::default();
//! // The shorter session stacks in front: index 0, smallest offset.
//! let short = block_layout(&day[1], &day, &films, 200.0, &cfg, false).unwrap();
//! let long = block_layout(&day[0], &day, &films, 200.0, &cfg, false).unwrap();
//! assert_eq!(short.left, cfg.stack_step);
//! assert_eq!(long.left, 2.0 * cfg.stack_step);
//! assert!(short.z > long.z);
//! ```

mod overlap;
mod session;

pub use overlap::{BlockLayout, StackConfig, block_layout, overlap_index};
pub use session::{Film, FilmId, FilmTable, Session, SessionId};
