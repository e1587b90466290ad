use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
pub type SerializationResult<T> = std::result::Result<T, SerializationError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration : {0}")]
    Config(#[from] ConfigError),
    #[error("request body serialization failed : {0}")]
    Serialization(#[from] SerializationError),
    #[error("{0}")]
    Protocol(#[from] ProtocolError),
    #[error("query serialization failed : {0}")]
    Query(#[from] serde_urlencoded::ser::Error),
    #[error("invalid argument : {0}")]
    InvalidArgument(String),
    #[error("request failed : {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl Error {
    /// Returns the HTTP status carried by a protocol error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Protocol(e) => Some(e.status),
            Error::Reqwest(e) => e.status(),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("credential {0} is empty, refusing to sign the request.")]
    MissingCredential(&'static str),
    #[error("missing environment variable `{0}`")]
    MissingEnvironmentVariable(String),
    #[error("invalid url : {0}")]
    InvalidUrl(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SerializationError {
    #[error("request body must be a mapping, but got a {0}.")]
    NotAMapping(&'static str),
    #[error("xml writer failed : {0}")]
    Xml(String),
    #[error("xml writer produced invalid utf-8")]
    Utf8,
}

/// The server answered with a status outside of `200..=299`.
#[derive(Error, Debug, Clone)]
#[error("request failed with status {status} ({reason}) : {body}")]
pub struct ProtocolError {
    pub status: StatusCode,
    pub reason: String,
    pub body: String,
}
