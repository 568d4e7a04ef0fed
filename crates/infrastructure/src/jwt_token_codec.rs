//! Bearer token verification (and development issuance) with `jsonwebtoken`.

use casting_application::{TokenClaims, TokenDecoder};
use casting_core::{AppError, AppResult, AuthError};
use casting_domain::Role;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Claims written into development tokens.
#[derive(Debug, Serialize)]
struct IssuedClaims<'a> {
    sub: &'a str,
    iss: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
    jti: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    permissions: Option<&'a [String]>,
}

/// Claims read from verified tokens.
///
/// `exp`, `iss` and `aud` are checked by the validation rules and are not kept.
#[derive(Debug, Deserialize)]
struct VerifiedClaims {
    sub: String,
    #[serde(default)]
    permissions: Option<Vec<String>>,
}

/// Request for a signed development token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    /// Token subject.
    pub subject: String,
    /// Permission claim; `None` omits the claim entirely.
    pub permissions: Option<Vec<String>>,
    /// Issue time.
    pub issued_at: DateTime<Utc>,
    /// Lifetime added to the issue time to compute `exp`.
    pub lifetime: Duration,
}

impl TokenGrant {
    /// Creates a grant carrying every permission of a role, issued now.
    #[must_use]
    pub fn for_role(subject: impl Into<String>, role: Role, lifetime: Duration) -> Self {
        Self {
            subject: subject.into(),
            permissions: Some(
                role.permissions()
                    .iter()
                    .map(|permission| permission.as_str().to_owned())
                    .collect(),
            ),
            issued_at: Utc::now(),
            lifetime,
        }
    }
}

/// JWT verifier bound to one signing key, issuer and audience.
#[derive(Clone)]
pub struct JwtTokenCodec {
    decoding_key: DecodingKey,
    encoding_key: Option<EncodingKey>,
    validation: Validation,
    issuer: String,
    audience: String,
}

impl JwtTokenCodec {
    /// Creates a codec for HS256 tokens signed with a shared secret.
    ///
    /// Shared-secret codecs can also issue tokens.
    #[must_use]
    pub fn hs256(secret: &str, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        let issuer = issuer.into();
        let audience = audience.into();

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            encoding_key: Some(EncodingKey::from_secret(secret.as_bytes())),
            validation: validation(Algorithm::HS256, &issuer, &audience),
            issuer,
            audience,
        }
    }

    /// Creates a verify-only codec for RS256 tokens from a PEM public key.
    pub fn rs256_from_pem(
        public_key_pem: &str,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> AppResult<Self> {
        let issuer = issuer.into();
        let audience = audience.into();
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|error| AppError::Validation(format!("invalid RS256 public key: {error}")))?;

        Ok(Self {
            decoding_key,
            encoding_key: None,
            validation: validation(Algorithm::RS256, &issuer, &audience),
            issuer,
            audience,
        })
    }

    /// Signs a token for the grant.
    pub fn issue(&self, grant: &TokenGrant) -> AppResult<String> {
        let encoding_key = self.encoding_key.as_ref().ok_or_else(|| {
            AppError::Validation("token issuance requires an HS256 shared secret".to_owned())
        })?;

        let issued_at = grant.issued_at.timestamp();
        let claims = IssuedClaims {
            sub: grant.subject.as_str(),
            iss: self.issuer.as_str(),
            aud: self.audience.as_str(),
            iat: issued_at,
            exp: issued_at + grant.lifetime.num_seconds(),
            jti: Uuid::new_v4().to_string(),
            permissions: grant.permissions.as_deref(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, encoding_key)
            .map_err(|error| AppError::Internal(format!("failed to sign token: {error}")))
    }
}

impl TokenDecoder for JwtTokenCodec {
    fn decode(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let data =
            jsonwebtoken::decode::<VerifiedClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|error| {
                    debug!(error = %error, "bearer token verification failed");
                    match error.kind() {
                        ErrorKind::ExpiredSignature => AuthError::Expired,
                        _ => AuthError::InvalidClaims(error.to_string()),
                    }
                })?;

        Ok(TokenClaims {
            subject: data.claims.sub,
            permissions: data.claims.permissions,
        })
    }
}

fn validation(algorithm: Algorithm, issuer: &str, audience: &str) -> Validation {
    let mut validation = Validation::new(algorithm);
    validation.leeway = 0;
    validation.set_issuer(&[issuer]);
    validation.set_audience(&[audience]);
    validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
    validation
}
