use std::fmt::{Display, Formatter};

use casting_core::{AppError, AppResult, NonEmptyString};

/// Persistence-assigned movie identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MovieId(i64);

impl MovieId {
    /// Wraps a stored identifier.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for MovieId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated input for a movie that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    name: NonEmptyString,
    release_date: Option<NonEmptyString>,
}

impl NewMovie {
    /// Creates a movie draft; the name is required, the release date is not.
    pub fn new(name: impl Into<String>, release_date: Option<String>) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)
                .map_err(|_| AppError::Validation("movie name is required".to_owned()))?,
            release_date: release_date.map(release_date_value).transpose()?,
        })
    }

    /// Returns the movie name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the release date, if supplied.
    #[must_use]
    pub fn release_date(&self) -> Option<&str> {
        self.release_date.as_ref().map(NonEmptyString::as_str)
    }

    /// Binds the draft to the identifier assigned by persistence.
    #[must_use]
    pub fn into_movie(self, id: MovieId) -> Movie {
        Movie {
            id,
            name: self.name,
            release_date: self.release_date,
        }
    }
}

/// Stored movie record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    id: MovieId,
    name: NonEmptyString,
    release_date: Option<NonEmptyString>,
}

impl Movie {
    /// Rebuilds a movie from stored values.
    pub fn new(
        id: MovieId,
        name: impl Into<String>,
        release_date: Option<String>,
    ) -> AppResult<Self> {
        Ok(NewMovie::new(name, release_date)?.into_movie(id))
    }

    /// Returns the immutable identifier.
    #[must_use]
    pub fn id(&self) -> MovieId {
        self.id
    }

    /// Returns the movie name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the release date, if known.
    #[must_use]
    pub fn release_date(&self) -> Option<&str> {
        self.release_date.as_ref().map(NonEmptyString::as_str)
    }

    /// Applies a partial update. The identifier never changes.
    pub fn apply(&mut self, update: &MovieUpdate) {
        self.release_date = Some(update.release_date.clone());
    }
}

/// Validated PATCH payload for a movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieUpdate {
    release_date: NonEmptyString,
}

impl MovieUpdate {
    /// Creates an update; a missing or null release date is rejected.
    pub fn new(release_date: Option<String>) -> AppResult<Self> {
        let release_date = release_date
            .ok_or_else(|| AppError::Validation("rdate is required".to_owned()))?;

        Ok(Self {
            release_date: release_date_value(release_date)?,
        })
    }

    /// Returns the new release date.
    #[must_use]
    pub fn release_date(&self) -> &str {
        self.release_date.as_str()
    }
}

fn release_date_value(value: String) -> AppResult<NonEmptyString> {
    NonEmptyString::new(value)
        .map_err(|_| AppError::Validation("rdate must not be empty".to_owned()))
}
