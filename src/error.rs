//! Crate-level error types.

use std::fmt;

/// Errors produced by the scroll-reveal crate.
///
/// Missing host capabilities are not errors: they degrade to the
/// non-animated fallback. These variants cover genuine failures.
#[derive(Debug)]
pub enum RevealError {
    /// TOML/JSON options parsing or serialization failure.
    OptionsParse(String),
    /// Generic I/O failure while reading or writing options files.
    Io(std::io::Error),
    /// A host API call failed (e.g. constructing a browser observer).
    Host(String),
}

impl fmt::Display for RevealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for RevealError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RevealError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn display_includes_context() {
        let err = RevealError::OptionsParse("bad key".to_owned());
        assert_eq!(err.to_string(), "options parse error: bad key");
        let err = RevealError::Host("IntersectionObserver threw".to_owned());
        assert_eq!(err.to_string(), "host error: IntersectionObserver threw");
    }

    #[test]
    fn io_errors_expose_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = RevealError::from(io);
        assert!(err.source().is_some());
        assert!(RevealError::Host(String::new()).source().is_none());
    }
}
