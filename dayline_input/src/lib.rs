// Copyright 2025 the Dayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dayline Input: stateful interaction machines for the schedule grid.
//!
//! This crate provides small state machines for the two pointer-driven
//! interactions the grid needs, in the same host-polled style as the rest of
//! the workspace:
//!
//! - [`scroll::ScrollController`]: consumes wheel activity, detects when
//!   scrolling has settled, and drives an eased magnetic snap of the pan
//!   offset to the nearest whole-day boundary.
//! - [`drag::DragSelect`]: converts pointer down/move/up sequences over day
//!   columns into a committed `(start, end)` time range, with a short
//!   click-suppression window after each commit.
//!
//! Neither machine owns a timer or clock. Hosts pass a monotonic timestamp
//! in milliseconds into every call that needs one and advance the machines
//! with an explicit poll, so the crate stays free of any runtime or UI
//! framework.

pub mod drag;
pub mod scroll;
