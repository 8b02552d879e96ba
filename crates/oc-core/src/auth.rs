//! Gateway authentication primitives
//!
//! The gateway is protected by a shared secret: a token, a password, or
//! both. Remote clients present one of them; the pairing payload hands
//! the full configured set to a client that has already been trusted.
//!
//! # Security Model
//!
//! - Generated tokens are 32 bytes of cryptographically random data,
//!   hex-encoded (64 chars)
//! - Secret comparison is constant-time for equal-length inputs
//! - Empty strings are treated as "not configured"
//! - `Debug` output never contains secret values

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Length of a generated token in bytes (before hex encoding)
const TOKEN_BYTES: usize = 32;

/// The gateway's configured authorization policy
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared token accepted from clients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Shared password accepted from clients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl AuthConfig {
    /// Configured token, if non-empty
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Configured password, if non-empty
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }

    /// Whether any secret is configured
    pub fn has_secret(&self) -> bool {
        self.token().is_some() || self.password().is_some()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token().map(|_| "<redacted>"))
            .field("password", &self.password().map(|_| "<redacted>"))
            .finish()
    }
}

/// Credentials supplied by a connecting client
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectAuth {
    pub token: Option<String>,
    pub password: Option<String>,
}

impl ConnectAuth {
    /// Use one bearer value as both the candidate token and password.
    ///
    /// The pairing endpoint has no separate password field, so the single
    /// credential fills both slots and the authorizer decides which one
    /// it matches.
    pub fn from_bearer(value: &str) -> Self {
        Self {
            token: Some(value.to_string()),
            password: Some(value.to_string()),
        }
    }
}

impl fmt::Debug for ConnectAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectAuth")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Input to an authorization decision
#[derive(Debug, Clone, Copy)]
pub struct ConnectRequest<'a> {
    /// Configured policy
    pub auth: &'a AuthConfig,
    /// Supplied credentials, `None` when the client presented none
    pub connect_auth: Option<&'a ConnectAuth>,
    /// Transport peer of the request
    pub peer: Option<IpAddr>,
    /// Configured trusted proxies
    pub trusted_proxies: &'a [String],
}

/// Why a request was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No token or password is configured
    NotConfigured,
    /// The client supplied no credentials
    CredentialsMissing,
    /// The supplied credentials matched nothing
    Mismatch,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFailure::NotConfigured => write!(f, "no gateway secret configured"),
            AuthFailure::CredentialsMissing => write!(f, "no credentials supplied"),
            AuthFailure::Mismatch => write!(f, "credentials mismatch"),
        }
    }
}

/// Outcome of an authorization decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthDecision {
    pub ok: bool,
    pub reason: Option<AuthFailure>,
}

impl AuthDecision {
    pub fn allow() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    pub fn deny(reason: AuthFailure) -> Self {
        Self {
            ok: false,
            reason: Some(reason),
        }
    }
}

/// Generate a new random gateway token
///
/// Returns a 64-character hex string (32 random bytes)
pub fn generate_token() -> String {
    use rand::Rng;
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill(&mut bytes);
    hex::encode(bytes)
}

/// Compare a supplied secret against the expected one
///
/// Uses constant-time comparison for equal-length inputs to prevent
/// timing attacks.
pub fn secrets_match(provided: &str, expected: &str) -> bool {
    if provided.len() != expected.len() {
        return false;
    }

    let mut result = 0u8;
    for (a, b) in provided.bytes().zip(expected.bytes()) {
        result |= a ^ b;
    }
    result == 0
}
