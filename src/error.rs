use std::borrow::Cow;

use crate::http::api::ResponseFail;
pub type Result<T> = std::result::Result<T, Error>;
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    context: Cow<'static, str>,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.context, self.kind)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            context: context.into(),
        }
    }
    pub const fn context<K: Into<ErrorKind>>(
        context: impl Into<Cow<'static, str>>,
    ) -> impl FnOnce(K) -> Error {
        move |kind| Error::new(kind.into(), context)
    }
    pub fn unexpected(context: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unexpected, context)
    }
    pub fn invalid_envelope(context: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidEnvelope, context)
    }
    pub fn unknown_message_type(message_type: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::UnknownMessageType(message_type.into()),
            "routing envelope",
        )
    }
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl From<serde_json::Error> for ErrorKind {
    fn from(err: serde_json::Error) -> Self {
        Self::SerdeJson(err)
    }
}

impl From<std::io::Error> for ErrorKind {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<reqwest::Error> for ErrorKind {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Reqwest(err)
        }
    }
}

impl From<rusqlite::Error> for ErrorKind {
    fn from(err: rusqlite::Error) -> Self {
        Self::Sqlite(err)
    }
}

impl From<r2d2::Error> for ErrorKind {
    fn from(err: r2d2::Error) -> Self {
        Self::Pool(err)
    }
}

impl From<ResponseFail> for ErrorKind {
    fn from(err: ResponseFail) -> Self {
        Self::ResponseFail(err)
    }
}

impl From<tokio::time::error::Elapsed> for ErrorKind {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::Timeout
    }
}

#[derive(Debug)]
pub enum ErrorKind {
    SerdeJson(serde_json::Error),
    Io(std::io::Error),
    Reqwest(reqwest::Error),
    Sqlite(rusqlite::Error),
    Pool(r2d2::Error),
    ResponseFail(ResponseFail),
    /// No route matched the envelope's `message_type`
    UnknownMessageType(String),
    InvalidEnvelope,
    Unexpected,
    Timeout,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unexpected => write!(f, "unexpected error"),
            Self::SerdeJson(err) => write!(f, "serde_json error: {}", err),
            Self::Io(err) => write!(f, "io error: {}", err),
            Self::Reqwest(err) => write!(f, "reqwest error: {}", err),
            Self::Sqlite(err) => write!(f, "sqlite error: {}", err),
            Self::Pool(err) => write!(f, "connection pool error: {}", err),
            Self::Timeout => write!(f, "timeout"),
            Self::InvalidEnvelope => write!(f, "invalid envelope"),
            Self::UnknownMessageType(message_type) => {
                write!(f, "unknown message type: {}", message_type)
            }
            Self::ResponseFail(err) => {
                write!(f, "response fail: {}({})", err.description, err.error_code)
            }
        }
    }
}
