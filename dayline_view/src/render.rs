// Copyright 2025 the Dayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame render model consumed by the presentation layer.

use chrono::NaiveDate;
use dayline_layout::{FilmId, SessionId};

/// One materialized day column and its horizontal transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayColumn {
    /// The column's date.
    pub date: NaiveDate,
    /// Left edge in pixels, relative to the viewport's leading edge.
    /// Off-screen columns have negative or past-viewport values.
    pub x: f64,
}

/// One renderable session block, positioned within the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionBlock {
    /// Identity of the session, passed through for hit testing.
    pub session: SessionId,
    /// The film the block represents, passed through for labeling.
    pub film: FilmId,
    /// Top edge in pixels from the top of the day column (before vertical
    /// scroll; the host applies [`RenderModel::scroll_y`]).
    pub top: f64,
    /// Block height in pixels, derived from the film duration.
    pub height: f64,
    /// Left edge in pixels, relative to the viewport's leading edge
    /// (column transform plus overlap stagger).
    pub left: f64,
    /// Block width in pixels.
    pub width: f64,
    /// Paint order; larger paints above smaller.
    pub z: i32,
}

/// Everything the presentation layer needs to draw one frame.
///
/// The model is a pure function of the engine state: day columns for every
/// materialized day, blocks for the sessions on columns near the viewport,
/// and the vertical scroll offset.
#[derive(Clone, Debug, Default)]
pub struct RenderModel {
    /// All materialized day columns, leading to trailing.
    pub days: Vec<DayColumn>,
    /// Renderable session blocks on columns intersecting the viewport.
    pub blocks: Vec<SessionBlock>,
    /// Vertical scroll offset the host applies to column content.
    pub scroll_y: f64,
}
