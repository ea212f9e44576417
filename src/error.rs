use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    #[error("invalid name {0:?}")]
    InvalidName(String),

    #[error("unsupported query class {0}")]
    UnsupportedClass(u16),

    #[error("could not resolve: {0}")]
    ResolveFailure(String),
}

impl ProxyError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        ProxyError::MalformedMessage(reason.into())
    }

    #[cfg(test)]
    pub fn is_malformed(&self) -> bool {
        matches!(self, ProxyError::MalformedMessage(_))
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
