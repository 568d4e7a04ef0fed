use thiserror::Error;

/// Coarse classification of authorization failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorKind {
    /// No `Authorization` header was sent.
    MissingHeader,
    /// The header is not of the form `Bearer <token>`.
    MalformedHeader,
    /// The token signature is valid but its expiry has passed.
    Expired,
    /// The token or its claims failed verification.
    InvalidClaims,
    /// The token is valid but lacks the required permission.
    Forbidden,
}

/// Failure raised while authorizing a bearer token for one permission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `Authorization` header was sent.
    #[error("authorization header is expected")]
    MissingHeader,

    /// The header is not of the form `Bearer <token>`.
    #[error("{0}")]
    MalformedHeader(String),

    /// The token expiry has passed.
    #[error("token expired")]
    Expired,

    /// Signature, issuer, audience or payload verification failed.
    #[error("unable to verify token: {0}")]
    InvalidClaims(String),

    /// The token verified but carries no `permissions` claim.
    #[error("permissions not included in token")]
    MissingPermissions,

    /// The token verified but the permission set lacks the required entry.
    #[error("permission '{0}' not granted")]
    Forbidden(String),
}

impl AuthError {
    /// Returns the coarse failure classification.
    #[must_use]
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            Self::MissingHeader => AuthErrorKind::MissingHeader,
            Self::MalformedHeader(_) => AuthErrorKind::MalformedHeader,
            Self::Expired => AuthErrorKind::Expired,
            Self::InvalidClaims(_) | Self::MissingPermissions => AuthErrorKind::InvalidClaims,
            Self::Forbidden(_) => AuthErrorKind::Forbidden,
        }
    }

    /// Returns the stable machine-readable code sent to clients.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingHeader => "authorization_header_missing",
            Self::MalformedHeader(_) => "invalid_header",
            Self::Expired => "token_expired",
            Self::InvalidClaims(_) | Self::MissingPermissions => "invalid_claims",
            Self::Forbidden(_) => "unauthorized",
        }
    }

    /// Returns whether the failure is a malformed request rather than a
    /// credential problem.
    ///
    /// A verified token without a permission list is reported as a bad
    /// request; every other credential failure is unauthenticated or
    /// forbidden.
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::MissingPermissions)
    }
}
