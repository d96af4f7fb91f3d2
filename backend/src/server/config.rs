//! Server settings loaded via OrthoConfig and the runtime configuration built
//! from them.
//!
//! Every setting can come from the command line, a configuration file, or an
//! `ADVICE_API_*` environment variable. Validation happens once, at startup,
//! so a misconfigured deployment fails before it binds a socket.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroize;

use advice_api::domain::Secret;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing session key.
    Debug,
    /// Release builds require an explicit key unless ephemeral keys are allowed.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Raw settings as loaded from the CLI, files, and environment.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADVICE_API")]
pub struct ServerSettings {
    /// Socket address to bind, for example `127.0.0.1:8080`.
    pub bind_addr: Option<String>,
    /// File holding the session signing and encryption key material.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to a random per-process key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub allow_ephemeral_key: bool,
    /// Mark session cookies `Secure`; defaults to on.
    pub cookie_secure: Option<bool>,
    /// `SameSite` policy for the session cookie.
    pub same_site: Option<String>,
    /// Email of an administrator account seeded at startup.
    pub bootstrap_admin_email: Option<String>,
    /// Plaintext password for the seeded administrator.
    pub bootstrap_admin_password: Option<String>,
    /// Postal code recorded for the seeded administrator.
    pub bootstrap_admin_postal_code: Option<i64>,
}

/// Errors raised while validating server settings.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The bind address does not parse as `host:port`.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// A setting is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file holds too little key material.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` requires a secure cookie.
    #[error("same_site=None requires cookie_secure=true")]
    InsecureSameSiteNone,
    /// Only part of the bootstrap administrator was configured.
    #[error("bootstrap administrator needs both an email and a password")]
    IncompleteBootstrapAdmin,
}

/// Administrator account seeded into an empty user store.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub(crate) email: String,
    pub(crate) password: Secret,
    pub(crate) postal_code: i64,
}

impl ServerSettings {
    /// Parsed bind address, defaulting to all interfaces on port 8080.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| ConfigError::InvalidBindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Whether session cookies carry the `Secure` attribute.
    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Parsed `SameSite` policy; defaults to `Lax`.
    pub fn same_site(&self) -> Result<SameSite, ConfigError> {
        let same_site = match self.same_site.as_deref().map(str::trim) {
            None => SameSite::Lax,
            Some(value) if value.eq_ignore_ascii_case("strict") => SameSite::Strict,
            Some(value) if value.eq_ignore_ascii_case("lax") => SameSite::Lax,
            Some(value) if value.eq_ignore_ascii_case("none") => SameSite::None,
            Some(value) => {
                return Err(ConfigError::InvalidValue {
                    name: "same_site",
                    value: value.to_owned(),
                    expected: SAMESITE_EXPECTED,
                });
            }
        };
        if same_site == SameSite::None && !self.cookie_secure() {
            return Err(ConfigError::InsecureSameSiteNone);
        }
        Ok(same_site)
    }

    /// Path of the session key file.
    #[must_use]
    pub fn session_key_path(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH))
    }

    /// Bootstrap administrator, when one is configured.
    pub fn bootstrap_admin(&self) -> Result<Option<BootstrapAdmin>, ConfigError> {
        let email = self
            .bootstrap_admin_email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty());
        let password = self
            .bootstrap_admin_password
            .as_deref()
            .filter(|password| !password.is_empty());
        match (email, password) {
            (None, None) => Ok(None),
            (Some(email), Some(password)) => Ok(Some(BootstrapAdmin {
                email: email.to_owned(),
                password: Secret::new(password),
                postal_code: self.bootstrap_admin_postal_code.unwrap_or(0),
            })),
            _ => Err(ConfigError::IncompleteBootstrapAdmin),
        }
    }
}

/// Load the session key from `path`, falling back to a random key when the
/// build mode or the settings allow it.
pub fn load_session_key(
    path: &Path,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, ConfigError> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(ConfigError::KeyTooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(source) if mode.is_debug() || allow_ephemeral => {
            warn!(path = %path.display(), error = %source, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(source) => Err(ConfigError::KeyRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Validated configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) bootstrap_admin: Option<BootstrapAdmin>,
}

impl ServerConfig {
    /// Validate `settings` and resolve the session key.
    pub fn from_settings(settings: &ServerSettings, mode: BuildMode) -> Result<Self, ConfigError> {
        let key = load_session_key(
            &settings.session_key_path(),
            mode,
            settings.allow_ephemeral_key,
        )?;
        Ok(Self {
            key,
            cookie_secure: settings.cookie_secure(),
            same_site: settings.same_site()?,
            bind_addr: settings.bind_addr()?,
            bootstrap_admin: settings.bootstrap_admin()?,
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
