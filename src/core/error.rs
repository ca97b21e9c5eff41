use std::fmt;
use std::io;
use std::result;

#[derive(Debug)]
pub enum Error {
    Argument(String),
    Io(String),
    Network(String),
    State(String),
    Protocol(String),
    Permission(String),
    NotFound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Argument(msg)    => write!(f, "{}", msg),
            Error::State(msg)       => write!(f, "{}", msg),
            Error::Io(msg)          => write!(f, "{}", msg),
            Error::Network(msg)     => write!(f, "{}", msg),
            Error::Protocol(msg)    => write!(f, "{}", msg),
            Error::Permission(msg)  => write!(f, "{}", msg),
            Error::NotFound(msg)    => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(format!("IO error: {}", err))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Argument(format!("Invalid url: {}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Protocol(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Error::Protocol(format!("Http error: deserialize json error {err}"));
        }
        match err.status() {
            Some(status) => Error::from_status(status.as_u16(), &err.to_string()),
            None => Error::Network(format!("Http error: sending http request error {err}")),
        }
    }
}

impl Error {
    /// Maps a non-success HTTP status onto the error taxonomy.
    pub(crate) fn from_status(status: u16, detail: &str) -> Self {
        match status {
            400 | 422   => Error::Argument(format!("Http error: rejected by server ({status}) {detail}")),
            401 | 403   => Error::Permission(format!("Http error: unauthorized ({status}) {detail}")),
            404         => Error::NotFound(format!("Http error: resource not found {detail}")),
            _           => Error::Protocol(format!("Http error: invalid http response ({status}) {detail}")),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
