use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("client failed: {0}")]
    Client(#[from] ClientError),
    #[error("form error: {0}")]
    Form(#[from] FormError),
    #[error("config error: {0}")]
    Config(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("http error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status {status} for {url}: {body}")]
    Status {
        status: u16,
        url: String,
        /// Truncated response body, for diagnostics only.
        body: String,
    },
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid base url: {0}")]
    BaseUrl(String),
}

impl ClientError {
    /// True for transport-level failures (connect, timeout), as opposed to
    /// responses the server actually produced.
    pub fn is_transport(&self) -> bool {
        match self {
            ClientError::Http { source, .. } => source.is_timeout() || source.is_connect(),
            _ => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum FormError {
    #[error("argument #{index} has no name")]
    MissingName { index: usize },
    #[error("duplicate argument name: {name}")]
    DuplicateName { name: String },
    #[error("argument {name}: invalid pattern {pattern}: {source}")]
    BadPattern {
        name: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
