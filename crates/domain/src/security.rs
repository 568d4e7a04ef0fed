use std::collections::BTreeSet;
use std::str::FromStr;

use casting_core::AppError;

/// Permissions carried in bearer tokens and enforced per route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    /// Allows listing movies.
    GetMovies,
    /// Allows listing actors.
    GetActors,
    /// Allows creating movies.
    PostMovies,
    /// Allows creating actors.
    PostActors,
    /// Allows updating movies.
    ModifyMovies,
    /// Allows updating actors.
    ModifyActors,
    /// Allows deleting movies.
    DeleteMovies,
    /// Allows deleting actors.
    DeleteActors,
}

impl Permission {
    /// Returns the permission string as it appears in token claims.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetMovies => "get:movies",
            Self::GetActors => "get:actors",
            Self::PostMovies => "post:movies",
            Self::PostActors => "post:actors",
            Self::ModifyMovies => "modify:movies",
            Self::ModifyActors => "modify:actors",
            Self::DeleteMovies => "delete:movies",
            Self::DeleteActors => "delete:actors",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::GetMovies,
            Permission::GetActors,
            Permission::PostMovies,
            Permission::PostActors,
            Permission::ModifyMovies,
            Permission::ModifyActors,
            Permission::DeleteMovies,
            Permission::DeleteActors,
        ];

        ALL
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}

/// Permission strings granted by a verified token.
///
/// Entries are kept verbatim: identity providers may grant strings this API
/// does not know about, and those never satisfy a route requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet(BTreeSet<String>);

impl PermissionSet {
    /// Creates a permission set from raw claim values.
    #[must_use]
    pub fn from_claims<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(values.into_iter().map(Into::into).collect())
    }

    /// Returns whether the set grants the permission.
    #[must_use]
    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(permission.as_str())
    }
}

/// Casting agency roles configured in the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Read-only access to movies and actors.
    CastingAssistant,
    /// Manages actors and may update movies.
    CastingDirector,
    /// Full access, including creating and deleting movies.
    ExecutiveProducer,
}

impl Role {
    /// Returns a stable identifier for the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CastingAssistant => "casting_assistant",
            Self::CastingDirector => "casting_director",
            Self::ExecutiveProducer => "executive_producer",
        }
    }

    /// Returns the permissions granted to the role.
    #[must_use]
    pub fn permissions(&self) -> &'static [Permission] {
        const ASSISTANT: &[Permission] = &[Permission::GetMovies, Permission::GetActors];
        const DIRECTOR: &[Permission] = &[
            Permission::GetMovies,
            Permission::GetActors,
            Permission::PostActors,
            Permission::DeleteActors,
            Permission::ModifyActors,
            Permission::ModifyMovies,
        ];

        match self {
            Self::CastingAssistant => ASSISTANT,
            Self::CastingDirector => DIRECTOR,
            Self::ExecutiveProducer => Permission::all(),
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "casting_assistant" => Ok(Self::CastingAssistant),
            "casting_director" => Ok(Self::CastingDirector),
            "executive_producer" => Ok(Self::ExecutiveProducer),
            _ => Err(AppError::Validation(format!("unknown role '{value}'"))),
        }
    }
}
