// Copyright 2025 the Dayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlap stacking: horizontal offset, width, and paint order for blocks
//! that share a time span within one day column.

use smallvec::SmallVec;

use crate::session::{FilmTable, Session};

/// Tunables for the stacking geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackConfig {
    /// Horizontal indent per stacking level, in pixels.
    pub stack_step: f64,
    /// Paint order of the front-most (index 0) block; deeper blocks paint
    /// below it. A focused block paints at `base_z + 1`, above everything.
    pub base_z: i32,
    /// Smallest width a block may shrink to, in pixels.
    pub min_width: f64,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            stack_step: 10.0,
            base_z: 100,
            min_width: 1.0,
        }
    }
}

/// Computed horizontal geometry and paint order of one session block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockLayout {
    /// Offset from the day column's left edge, in pixels.
    pub left: f64,
    /// Block width in pixels, never below [`StackConfig::min_width`].
    pub width: f64,
    /// Paint order; larger paints above smaller.
    pub z: i32,
}

/// Returns `target`'s rank among the sessions of `day_sessions` whose time
/// interval intersects its own, or `None` if `target`'s film is unknown.
///
/// Intersection is inclusive at both boundaries: a session ending exactly
/// when another starts still counts as overlapping, which keeps back-to-back
/// blocks visually staggered. The overlapping set is ordered by film duration
/// ascending — shorter sessions stack in front — with ties keeping the input
/// order of `day_sessions`. Sessions with unknown films are skipped.
///
/// For `N` mutually overlapping sessions the ranks are a permutation of
/// `0..N`; non-overlapping sessions are ranked independently and may reuse
/// ranks.
#[must_use]
pub fn overlap_index(
    target: &Session,
    day_sessions: &[Session],
    films: &FilmTable,
) -> Option<usize> {
    let (start, end) = target.interval(films)?;

    // (input position, duration) per overlapping session; the position makes
    // the duration sort reproducible regardless of sort stability.
    let mut overlapping: SmallVec<[(usize, i64, bool); 8]> = SmallVec::new();
    for (pos, other) in day_sessions.iter().enumerate() {
        let Some((other_start, other_end)) = other.interval(films) else {
            continue;
        };
        if other_start <= end && other_end >= start {
            let duration = (other_end - other_start).num_minutes();
            overlapping.push((pos, duration, other.id == target.id));
        }
    }

    overlapping.sort_by_key(|&(pos, duration, _)| (duration, pos));
    overlapping.iter().position(|&(_, _, is_target)| is_target)
}

/// Computes the horizontal geometry and paint order of `target` within its
/// day column, or `None` if `target`'s film is unknown.
///
/// The block indents one [`StackConfig::stack_step`] per stacking level and
/// gives up the same amount of width on its right edge, so every block in a
/// stack stays partially visible. `focused` forces the block's paint order to
/// the top of the stack without changing its overlap index — the offsets of
/// the surrounding blocks are unaffected.
#[must_use]
pub fn block_layout(
    target: &Session,
    day_sessions: &[Session],
    films: &FilmTable,
    container_width: f64,
    config: &StackConfig,
    focused: bool,
) -> Option<BlockLayout> {
    let index = overlap_index(target, day_sessions, films)?;
    let left = (index as f64 + 1.0) * config.stack_step;
    let width = (container_width - left - config.stack_step).max(config.min_width);
    let z = if focused {
        config.base_z + 1
    } else {
        config.base_z - index as i32
    };
    Some(BlockLayout { left, width, z })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::{StackConfig, block_layout, overlap_index};
    use crate::session::{Film, FilmId, FilmTable, Session};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, 4)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn films(durations: &[u32]) -> FilmTable {
        durations
            .iter()
            .enumerate()
            .map(|(i, &d)| Film::new(FilmId(i as u64), format!("Film {i}"), d))
            .collect()
    }

    #[test]
    fn fully_overlapping_pair_orders_short_in_front() {
        // Spec scenario: 30 and 90 minute sessions overlapping fully.
        let films = films(&[30, 90]);
        let day = vec![
            Session::new(FilmId(1), at(20, 0), "Main"),
            Session::new(FilmId(0), at(20, 0), "Main"),
        ];

        assert_eq!(overlap_index(&day[1], &day, &films), Some(0));
        assert_eq!(overlap_index(&day[0], &day, &films), Some(1));

        let cfg = StackConfig::default();
        let short = block_layout(&day[1], &day, &films, 200.0, &cfg, false).unwrap();
        let long = block_layout(&day[0], &day, &films, 200.0, &cfg, false).unwrap();
        assert_eq!(short.left, cfg.stack_step);
        assert_eq!(long.left, 2.0 * cfg.stack_step);
        assert_eq!(short.z, cfg.base_z);
        assert_eq!(long.z, cfg.base_z - 1);
    }

    #[test]
    fn mutually_overlapping_indices_are_a_permutation() {
        let films = films(&[45, 60, 30, 90, 60]);
        // All start within a common hour, so every pair overlaps.
        let day: Vec<Session> = (0..5)
            .map(|i| Session::new(FilmId(i), at(19, 5 * i as u32), "Main"))
            .collect();

        let mut indices: Vec<usize> = day
            .iter()
            .map(|s| overlap_index(s, &day, &films).unwrap())
            .collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn equal_durations_keep_input_order() {
        let films = films(&[60, 60, 60]);
        let day: Vec<Session> = (0..3)
            .map(|i| Session::new(FilmId(i), at(20, i as u32), "Main"))
            .collect();
        for (pos, session) in day.iter().enumerate() {
            assert_eq!(overlap_index(session, &day, &films), Some(pos));
        }
    }

    #[test]
    fn touching_boundaries_count_as_overlap() {
        let films = films(&[60, 60]);
        let day = vec![
            Session::new(FilmId(0), at(18, 0), "Main"),
            // Starts exactly when the first ends.
            Session::new(FilmId(1), at(19, 0), "Main"),
        ];
        assert_eq!(overlap_index(&day[0], &day, &films), Some(0));
        assert_eq!(overlap_index(&day[1], &day, &films), Some(1));
    }

    #[test]
    fn disjoint_sessions_reuse_rank_zero() {
        let films = films(&[60, 60]);
        let day = vec![
            Session::new(FilmId(0), at(12, 0), "Main"),
            Session::new(FilmId(1), at(20, 0), "Main"),
        ];
        assert_eq!(overlap_index(&day[0], &day, &films), Some(0));
        assert_eq!(overlap_index(&day[1], &day, &films), Some(0));
    }

    #[test]
    fn unknown_film_is_not_renderable_and_not_a_candidate() {
        let films = films(&[30]);
        let known = Session::new(FilmId(0), at(20, 0), "Main");
        let unknown = Session::new(FilmId(99), at(20, 0), "Main");
        let day = vec![unknown.clone(), known.clone()];

        assert_eq!(overlap_index(&unknown, &day, &films), None);
        assert_eq!(block_layout(&unknown, &day, &films, 200.0, &StackConfig::default(), false), None);
        // The unknown session does not inflate the known one's rank.
        assert_eq!(overlap_index(&known, &day, &films), Some(0));
    }

    #[test]
    fn width_never_drops_below_minimum() {
        let films = films(&[30, 60, 90]);
        let day: Vec<Session> = (0..3)
            .map(|i| Session::new(FilmId(i), at(20, 0), "Main"))
            .collect();
        let cfg = StackConfig::default();
        // Container narrower than two stack steps.
        let layout = block_layout(&day[2], &day, &films, 15.0, &cfg, false).unwrap();
        assert_eq!(layout.width, cfg.min_width);
    }

    #[test]
    fn focused_block_paints_on_top_without_moving() {
        let films = films(&[30, 90]);
        let day = vec![
            Session::new(FilmId(0), at(20, 0), "Main"),
            Session::new(FilmId(1), at(20, 0), "Main"),
        ];
        let cfg = StackConfig::default();
        let plain = block_layout(&day[1], &day, &films, 200.0, &cfg, false).unwrap();
        let focused = block_layout(&day[1], &day, &films, 200.0, &cfg, true).unwrap();
        assert_eq!(focused.left, plain.left);
        assert_eq!(focused.width, plain.width);
        assert!(focused.z > cfg.base_z);
    }

    #[test]
    fn spanning_past_midnight_still_overlaps_late_sessions() {
        let films = films(&[240, 30]);
        let day = vec![
            // 23:00 + 4h runs to 03:00 next day.
            Session::new(FilmId(0), at(23, 0), "Main"),
            Session::new(FilmId(1), at(23, 30), "Main"),
        ];
        assert_eq!(overlap_index(&day[1], &day, &films), Some(0));
        assert_eq!(overlap_index(&day[0], &day, &films), Some(1));
    }

    #[test]
    fn duplicate_structural_sessions_rank_once() {
        let films = films(&[60]);
        let a = Session::new(FilmId(0), at(20, 0), "Main");
        let day = vec![a.clone()];
        assert_eq!(overlap_index(&a, &day, &films), Some(0));
    }
}
