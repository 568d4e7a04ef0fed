use std::sync::Arc;

use casting_core::AuthError;
use casting_domain::{Permission, PermissionSet};

const BEARER_PREFIX: &str = "Bearer ";

/// Claims produced by a verified token, before permission checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject the identity provider issued the token for.
    pub subject: String,
    /// Raw `permissions` claim; `None` when the claim is absent.
    pub permissions: Option<Vec<String>>,
}

/// Port for bearer token verification.
///
/// Implementations check the signature, issuer, audience and expiry and map
/// failures to [`AuthError::Expired`] or [`AuthError::InvalidClaims`].
pub trait TokenDecoder: Send + Sync {
    /// Verifies a raw token and returns its claims.
    fn decode(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Verified caller identity and granted permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessClaims {
    subject: String,
    permissions: PermissionSet,
}

impl AccessClaims {
    /// Returns the token subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the granted permission set.
    #[must_use]
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }
}

/// Stateless bearer-token authorization for route permissions.
#[derive(Clone)]
pub struct AuthorizationService {
    decoder: Arc<dyn TokenDecoder>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a token decoder.
    #[must_use]
    pub fn new(decoder: Arc<dyn TokenDecoder>) -> Self {
        Self { decoder }
    }

    /// Authorizes an `Authorization` header value for one permission.
    pub fn authorize(
        &self,
        header_value: Option<&str>,
        required_permission: Permission,
    ) -> Result<AccessClaims, AuthError> {
        let token = bearer_token(header_value)?;
        let claims = self.decoder.decode(token)?;
        let permissions = claims
            .permissions
            .map(PermissionSet::from_claims)
            .ok_or(AuthError::MissingPermissions)?;

        if !permissions.contains(required_permission) {
            return Err(AuthError::Forbidden(
                required_permission.as_str().to_owned(),
            ));
        }

        Ok(AccessClaims {
            subject: claims.subject,
            permissions,
        })
    }
}

/// Extracts the token from a `Bearer <token>` header value.
///
/// The scheme is case-sensitive and must be followed by exactly one space and
/// a non-empty token without whitespace.
pub fn bearer_token(header_value: Option<&str>) -> Result<&str, AuthError> {
    let value = header_value.ok_or(AuthError::MissingHeader)?;
    let token = value.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        AuthError::MalformedHeader("authorization header must start with \"Bearer\"".to_owned())
    })?;

    if token.is_empty() {
        return Err(AuthError::MalformedHeader("token not found".to_owned()));
    }

    if token.chars().any(char::is_whitespace) {
        return Err(AuthError::MalformedHeader(
            "authorization header must be a single bearer token".to_owned(),
        ));
    }

    Ok(token)
}
