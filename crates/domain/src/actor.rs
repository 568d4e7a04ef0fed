use std::fmt::{Display, Formatter};

use casting_core::{AppError, AppResult, NonEmptyString};

/// Persistence-assigned actor identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(i64);

impl ActorId {
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

impl Display for ActorId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated input for an actor that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActor {
    name: NonEmptyString,
    age: Option<i32>,
    gender: Option<NonEmptyString>,
}

impl NewActor {
    /// Creates an actor draft; only the name is required.
    pub fn new(
        name: impl Into<String>,
        age: Option<i32>,
        gender: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)
                .map_err(|_| AppError::Validation("actor name is required".to_owned()))?,
            age: age.map(age_value).transpose()?,
            gender: gender.map(gender_value).transpose()?,
        })
    }

    /// Returns the actor name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the age, if supplied.
    #[must_use]
    pub fn age(&self) -> Option<i32> {
        self.age
    }

    /// Returns the gender, if supplied.
    #[must_use]
    pub fn gender(&self) -> Option<&str> {
        self.gender.as_ref().map(NonEmptyString::as_str)
    }

    /// Binds the draft to the identifier assigned by persistence.
    #[must_use]
    pub fn into_actor(self, id: ActorId) -> Actor {
        Actor {
            id,
            name: self.name,
            age: self.age,
            gender: self.gender,
        }
    }
}

/// Stored actor record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    id: ActorId,
    name: NonEmptyString,
    age: Option<i32>,
    gender: Option<NonEmptyString>,
}

impl Actor {
    /// Rebuilds an actor from stored values.
    pub fn new(
        id: ActorId,
        name: impl Into<String>,
        age: Option<i32>,
        gender: Option<String>,
    ) -> AppResult<Self> {
        Ok(NewActor::new(name, age, gender)?.into_actor(id))
    }

    /// Returns the immutable identifier.
    #[must_use]
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Returns the actor name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the age, if known.
    #[must_use]
    pub fn age(&self) -> Option<i32> {
        self.age
    }

    /// Returns the gender, if known.
    #[must_use]
    pub fn gender(&self) -> Option<&str> {
        self.gender.as_ref().map(NonEmptyString::as_str)
    }

    /// Applies the supplied fields; omitted fields keep their values.
    pub fn apply(&mut self, update: &ActorUpdate) {
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(gender) = &update.gender {
            self.gender = Some(gender.clone());
        }
    }
}

/// Validated PATCH payload for an actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorUpdate {
    age: Option<i32>,
    gender: Option<NonEmptyString>,
}

impl ActorUpdate {
    /// Creates an update; at least one of age or gender must be supplied.
    pub fn new(age: Option<i32>, gender: Option<String>) -> AppResult<Self> {
        if age.is_none() && gender.is_none() {
            return Err(AppError::Validation(
                "at least one of age or gender is required".to_owned(),
            ));
        }

        Ok(Self {
            age: age.map(age_value).transpose()?,
            gender: gender.map(gender_value).transpose()?,
        })
    }

    /// Returns the new age, if supplied.
    #[must_use]
    pub fn age(&self) -> Option<i32> {
        self.age
    }

    /// Returns the new gender, if supplied.
    #[must_use]
    pub fn gender(&self) -> Option<&str> {
        self.gender.as_ref().map(NonEmptyString::as_str)
    }
}

fn age_value(age: i32) -> AppResult<i32> {
    if age < 0 {
        return Err(AppError::Validation(format!(
            "age must not be negative, got {age}"
        )));
    }

    Ok(age)
}

fn gender_value(gender: String) -> AppResult<NonEmptyString> {
    NonEmptyString::new(gender)
        .map_err(|_| AppError::Validation("gender must not be empty".to_owned()))
}
