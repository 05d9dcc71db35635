use hyper::StatusCode;
use thiserror::Error;

/// Errors raised while loading configuration or preparing server state
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration source could not be read or deserialized
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// Host/port pair does not form a socket address
    #[error("invalid listen address {0}")]
    InvalidAddress(String),

    /// A setting holds a value the server cannot run with
    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        reason: &'static str,
    },

    /// Public root directory is missing or unusable
    #[error("public directory '{path}' is not usable: {source}")]
    PublicDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors starting the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Errors produced while serving a static file
#[derive(Debug, Error)]
pub enum StaticFileError {
    /// Nothing to serve at the requested path (includes rejected traversal)
    #[error("not found")]
    NotFound,

    /// Any other failure reading the file
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
}

impl StaticFileError {
    /// Classify an I/O error; only `NotFound` maps to 404
    pub fn from_io(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound
        } else {
            Self::Io(err)
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain text body sent to the client
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::NotFound => "Not Found",
            Self::Io(_) => "Internal Server Error",
        }
    }
}

/// Errors produced by the `/calculate` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculateError {
    /// `left` or `right` is missing or not a finite number
    #[error("Both operands must be numbers.")]
    InvalidOperands,

    /// `operation` is neither `add` nor `subtract`
    #[error("Only add and subtract operations are supported.")]
    UnsupportedOperation,

    /// Body could not be read or is not a usable JSON document
    #[error("Invalid request payload.")]
    InvalidPayload,

    /// Body exceeded the configured size cap
    #[error("Payload too large.")]
    PayloadTooLarge,
}

impl CalculateError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidOperands | Self::UnsupportedOperation | Self::InvalidPayload => {
                StatusCode::BAD_REQUEST
            }
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}
