// Copyright 2025 the Dayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session and film value types plus the film lookup table.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

/// Identifier of a [`Film`], assigned by the external data layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilmId(pub u64);

/// A film: the subject a [`Session`] schedules a screening of.
///
/// The layout engine only reads `duration_minutes`; everything else is
/// pass-through for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Film {
    /// Stable identifier referenced by sessions.
    pub id: FilmId,
    /// Display title.
    pub title: String,
    /// Running time in minutes; drives the block's vertical extent.
    pub duration_minutes: u32,
}

impl Film {
    /// Creates a new film.
    #[must_use]
    pub fn new(id: FilmId, title: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            id,
            title: title.into(),
            duration_minutes,
        }
    }
}

/// Deterministic identity of a [`Session`].
///
/// The id is a 64-bit FNV-1a fingerprint of `(film, start, venue)`, so
/// structurally identical sessions always collapse to the same identity no
/// matter where or when they were constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl SessionId {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    /// Computes the fingerprint for a `(film, start, venue)` triple.
    #[must_use]
    pub fn fingerprint(film: FilmId, start: NaiveDateTime, venue: &str) -> Self {
        let mut hash = Self::FNV_OFFSET;
        let mut mix = |bytes: &[u8]| {
            for &b in bytes {
                hash ^= u64::from(b);
                hash = hash.wrapping_mul(Self::FNV_PRIME);
            }
        };
        mix(&film.0.to_le_bytes());
        mix(&start.and_utc().timestamp().to_le_bytes());
        mix(venue.as_bytes());
        Self(hash)
    }
}

/// One scheduled screening: a film at a start time in a venue.
///
/// Duration is not stored here; it is looked up from the referenced [`Film`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Structural fingerprint of the fields below.
    pub id: SessionId,
    /// The film being screened.
    pub film: FilmId,
    /// Start instant.
    pub start: NaiveDateTime,
    /// Venue name; one venue renders as one column lane.
    pub venue: String,
}

impl Session {
    /// Creates a session, deriving its [`SessionId`] from the fields.
    #[must_use]
    pub fn new(film: FilmId, start: NaiveDateTime, venue: impl Into<String>) -> Self {
        let venue = venue.into();
        Self {
            id: SessionId::fingerprint(film, start, &venue),
            film,
            start,
            venue,
        }
    }

    /// Returns the end instant, if the film is known.
    #[must_use]
    pub fn end(&self, films: &FilmTable) -> Option<NaiveDateTime> {
        let minutes = films.duration_minutes(self.film)?;
        Some(self.start + Duration::minutes(i64::from(minutes)))
    }

    /// Returns the `[start, end)` interval, if the film is known.
    #[must_use]
    pub fn interval(&self, films: &FilmTable) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.start, self.end(films)?))
    }
}

/// Lookup table of films by id, supplied wholesale by the data layer.
#[derive(Clone, Debug, Default)]
pub struct FilmTable {
    films: HashMap<FilmId, Film>,
}

impl FilmTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a film, replacing any previous entry with the same id.
    pub fn insert(&mut self, film: Film) {
        self.films.insert(film.id, film);
    }

    /// Looks up a film by id.
    #[must_use]
    pub fn get(&self, id: FilmId) -> Option<&Film> {
        self.films.get(&id)
    }

    /// Returns a film's duration in minutes, if present.
    #[must_use]
    pub fn duration_minutes(&self, id: FilmId) -> Option<u32> {
        self.films.get(&id).map(|f| f.duration_minutes)
    }

    /// Number of films in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.films.len()
    }

    /// Returns `true` if the table holds no films.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }
}

impl FromIterator<Film> for FilmTable {
    fn from_iter<I: IntoIterator<Item = Film>>(iter: I) -> Self {
        Self {
            films: iter.into_iter().map(|f| (f.id, f)).collect(),
        }
    }
}
