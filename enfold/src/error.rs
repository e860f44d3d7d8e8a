//! Errors produced by the rendering pipeline.
//!
//! Every failure that can come out of a render call is classifiable:
//! [`Error::code`] always produces an HTTP status code, defaulting to 500
//! for anything that isn't a missing template. The fallback cascade relies
//! on this to pick an error page for any failure value, and response
//! handlers use it to set the outward status code.
use thiserror::Error;

/// Status code for a missing page or template.
pub const NOT_FOUND: u16 = 404;

/// Status code for any other rendering failure.
pub const INTERNAL_ERROR: u16 = 500;

/// A rendering error.
#[derive(Error, Debug)]
pub enum Error {
    /// The path, or a template the path expands to, is not registered.
    #[error("template \"{0}\" does not exist")]
    NotFound(String),

    /// The template exists but the engine failed to execute it.
    #[error("template \"{name}\" failed to render: {source}")]
    Execution {
        name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A failure promoted to an internal error by the fallback cascade.
    #[error("internal rendering error: {0}")]
    Escalated(Box<Error>),
}

impl Error {
    /// Wrap a template engine failure for the given template name.
    pub fn execution(
        name: impl ToString,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Execution {
            name: name.to_string(),
            source: Box::new(err),
        }
    }

    /// HTTP status code for this error. Anything that isn't a missing
    /// template classifies as an internal error.
    pub fn code(&self) -> u16 {
        match self {
            Self::NotFound(_) => NOT_FOUND,
            _ => INTERNAL_ERROR,
        }
    }
}

/// Status code a response handler should set for this error.
pub fn error_code(err: &Error) -> u16 {
    err.code()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::NotFound("index".into()).code(), 404);
        assert_eq!(
            Error::execution("index", std::fmt::Error).code(),
            500
        );
        assert_eq!(
            Error::Escalated(Box::new(Error::NotFound("404".into()))).code(),
            500
        );
    }
}
