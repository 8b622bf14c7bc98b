//! Error types for guard.
//!
//! Token exchange failures are reported through [`RefreshError`], CA bootstrap
//! failures through [`PkiError`]. [`GuardError`] wraps both for callers that
//! drive the whole workspace.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for guard operations.
#[derive(Error, Debug)]
pub enum GuardError {
    /// Token exchange failed.
    #[error(transparent)]
    Refresh(#[from] RefreshError),

    /// CA bootstrap or certificate store failure.
    #[error(transparent)]
    Pki(#[from] PkiError),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias using GuardError.
pub type Result<T> = std::result::Result<T, GuardError>;

/// Errors returned by a token refresher.
///
/// Every variant carries the request path so operators can tell which
/// endpoint misbehaved. None of them are retried internally.
#[derive(Error, Debug)]
pub enum RefreshError {
    /// The request could not be built, usually a malformed login URL.
    #[error("failed to create request: {0}")]
    RequestConstruction(String),

    /// Connection, DNS, timeout or body read failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The identity provider answered with a non-200 status.
    #[error("request {path} failed with status code: {status} and response: {body}")]
    Provider {
        /// Path of the token endpoint.
        path: String,
        /// HTTP status code.
        status: u16,
        /// Raw response body, verbatim.
        body: String,
    },

    /// A 200 response whose body is not a token payload.
    #[error("failed to decode response for request {path}: {source}")]
    Decode {
        /// Path of the token endpoint.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl RefreshError {
    /// Create a request construction error.
    pub fn request_construction(message: impl Into<String>) -> Self {
        Self::RequestConstruction(message.into())
    }

    /// Create a provider error.
    pub fn provider(path: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Provider {
            path: path.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    /// Only transport failures may succeed when repeated unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// HTTP status returned by the provider, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw provider response body, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Provider { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Network-level failure talking to the token endpoint.
#[derive(Error, Debug, Clone)]
pub struct TransportError {
    /// Error message.
    pub message: String,
    /// Path of the token endpoint.
    pub path: String,
    /// Whether this is a timeout.
    pub is_timeout: bool,
    /// Whether this is a connection error.
    pub is_connection_error: bool,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_timeout {
            write!(f, "request {} timed out: {}", self.path, self.message)
        } else if self.is_connection_error {
            write!(f, "failed to connect for request {}: {}", self.path, self.message)
        } else {
            write!(f, "failed to send request {}: {}", self.path, self.message)
        }
    }
}

impl TransportError {
    /// Create a new transport error.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
            is_timeout: false,
            is_connection_error: false,
        }
    }

    /// Mark as a timeout.
    pub fn timeout(mut self) -> Self {
        self.is_timeout = true;
        self
    }

    /// Mark as a connection error.
    pub fn connection(mut self) -> Self {
        self.is_connection_error = true;
        self
    }
}

/// Errors from CA bootstrap and certificate storage.
#[derive(Error, Debug)]
pub enum PkiError {
    /// The operator declined to overwrite an existing CA.
    #[error("user declined to overwrite the existing CA")]
    UserDeclined,

    /// Private key generation failed.
    #[error("failed to generate private key: {0}")]
    KeyGeneration(String),

    /// Self-signing the certificate failed.
    #[error("failed to generate self-signed certificate: {0}")]
    CertGeneration(String),

    /// Writing key or certificate failed.
    #[error("failed to write {}: {source}", path.display())]
    Persistence {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Reading or parsing a stored key or certificate failed.
    #[error("failed to load {}: {message}", path.display())]
    Load {
        /// File being read.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },
}

impl PkiError {
    /// Create a persistence error.
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }

    /// Create a load error.
    pub fn load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Declining is a clean exit, everything else aborts the operation.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::UserDeclined)
    }
}

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable: {0}")]
    MissingEnv(String),

    /// A configuration value is present but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
