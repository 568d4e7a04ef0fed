use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use casting_core::AppError;
use casting_domain::Role;
use tracing_subscriber::EnvFilter;

const MIN_SIGNING_SECRET_LENGTH: usize = 32;

/// Process mode selected by the first command-line argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    Serve,
    Migrate,
    IssueToken { role: Role, subject: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKeyConfig {
    Hs256 { signing_secret: String },
    Rs256 { public_key_pem: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub issuer: String,
    pub audience: String,
    pub key: TokenKeyConfig,
}

/// How persistence backend failures are reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceErrorPolicy {
    /// Backend failures are reported as 404 responses.
    MaskAsNotFound,
    /// Backend failures surface as 500 responses.
    Surface,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub command: ApiCommand,
    pub storage: StorageConfig,
    pub api_host: String,
    pub api_port: u16,
    pub auth: AuthConfig,
    pub cors_allowed_origin: Option<String>,
    pub persistence_error_policy: PersistenceErrorPolicy,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let arguments: Vec<String> = env::args().skip(1).collect();
        Self::from_sources(&arguments, |name| env::var(name).ok())
    }

    /// Builds the configuration from command-line arguments and a variable lookup.
    pub fn from_sources(
        arguments: &[String],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let command = parse_command(arguments)?;

        let storage = match optional_var(&lookup, "STORAGE_BACKEND")
            .unwrap_or_else(|| "postgres".to_owned())
            .as_str()
        {
            "postgres" => StorageConfig::Postgres {
                database_url: required_var(&lookup, "DATABASE_URL")?,
                max_connections: optional_var(&lookup, "DATABASE_MAX_CONNECTIONS")
                    .map(|value| {
                        value.parse::<u32>().map_err(|error| {
                            AppError::Validation(format!(
                                "invalid DATABASE_MAX_CONNECTIONS: {error}"
                            ))
                        })
                    })
                    .transpose()?
                    .unwrap_or(10),
            },
            "memory" => StorageConfig::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "STORAGE_BACKEND must be either 'postgres' or 'memory', got '{other}'"
                )));
            }
        };

        if command == ApiCommand::Migrate && storage == StorageConfig::Memory {
            return Err(AppError::Validation(
                "migrate requires STORAGE_BACKEND=postgres".to_owned(),
            ));
        }

        let api_host = optional_var(&lookup, "API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = optional_var(&lookup, "API_PORT")
            .map(|value| {
                value
                    .parse::<u16>()
                    .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))
            })
            .transpose()?
            .unwrap_or(8080);

        let key = match optional_var(&lookup, "AUTH_ALGORITHM")
            .unwrap_or_else(|| "HS256".to_owned())
            .as_str()
        {
            "HS256" => {
                let signing_secret = required_var(&lookup, "AUTH_SIGNING_SECRET")?;
                if signing_secret.len() < MIN_SIGNING_SECRET_LENGTH {
                    return Err(AppError::Validation(format!(
                        "AUTH_SIGNING_SECRET must be at least {MIN_SIGNING_SECRET_LENGTH} characters"
                    )));
                }
                TokenKeyConfig::Hs256 { signing_secret }
            }
            "RS256" => TokenKeyConfig::Rs256 {
                public_key_pem: required_var(&lookup, "AUTH_PUBLIC_KEY_PEM")?,
            },
            other => {
                return Err(AppError::Validation(format!(
                    "AUTH_ALGORITHM must be either 'HS256' or 'RS256', got '{other}'"
                )));
            }
        };

        if matches!(command, ApiCommand::IssueToken { .. })
            && !matches!(key, TokenKeyConfig::Hs256 { .. })
        {
            return Err(AppError::Validation(
                "issue-token requires AUTH_ALGORITHM=HS256".to_owned(),
            ));
        }

        let auth = AuthConfig {
            issuer: required_var(&lookup, "AUTH_ISSUER")?,
            audience: required_var(&lookup, "AUTH_AUDIENCE")?,
            key,
        };

        let cors_allowed_origin =
            optional_var(&lookup, "CORS_ALLOWED_ORIGIN").filter(|origin| origin != "*");

        let persistence_error_policy = match optional_var(&lookup, "PERSISTENCE_ERROR_POLICY")
            .unwrap_or_else(|| "mask_as_not_found".to_owned())
            .as_str()
        {
            "surface" => PersistenceErrorPolicy::Surface,
            "mask_as_not_found" => PersistenceErrorPolicy::MaskAsNotFound,
            other => {
                return Err(AppError::Validation(format!(
                    "PERSISTENCE_ERROR_POLICY must be either 'surface' or 'mask_as_not_found', got '{other}'"
                )));
            }
        };

        Ok(Self {
            command,
            storage,
            api_host,
            api_port,
            auth,
            cors_allowed_origin,
            persistence_error_policy,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_command(arguments: &[String]) -> Result<ApiCommand, AppError> {
    match arguments.first().map(String::as_str) {
        None | Some("serve") => Ok(ApiCommand::Serve),
        Some("migrate") => Ok(ApiCommand::Migrate),
        Some("issue-token") => {
            let role = arguments
                .get(1)
                .ok_or_else(|| {
                    AppError::Validation(
                        "usage: issue-token <casting_assistant|casting_director|executive_producer> [subject]"
                            .to_owned(),
                    )
                })?
                .parse::<Role>()?;
            let subject = arguments
                .get(2)
                .cloned()
                .unwrap_or_else(|| format!("dev|{}", role.as_str()));

            Ok(ApiCommand::IssueToken { role, subject })
        }
        Some(other) => Err(AppError::Validation(format!(
            "unknown command '{other}', expected 'migrate' or 'issue-token'"
        ))),
    }
}

fn optional_var(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.trim().is_empty())
}

fn required_var(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, AppError> {
    optional_var(lookup, name).ok_or_else(|| AppError::Validation(format!("{name} is required")))
}
