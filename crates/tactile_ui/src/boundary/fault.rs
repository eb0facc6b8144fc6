//! Render fault descriptor.

use std::any::Any;
use std::error::Error;
use std::fmt;

/// A failure raised while producing a subtree.
///
/// Carries a human-readable message and, optionally, a trace of where the
/// failure originated (component path, backtrace, panic location).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    message: String,
    trace: Option<String>,
}

impl Fault {
    /// Creates a fault with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace: None,
        }
    }

    /// Attaches an origin trace.
    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Builds a fault from a caught panic payload.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "subtree panicked".to_string()
        };
        Self::new(message).with_trace("panic")
    }

    /// Returns the fault message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the origin trace, if any.
    #[must_use]
    pub fn trace(&self) -> Option<&str> {
        self.trace.as_deref()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Fault {}

impl From<&str> for Fault {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Fault {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<Box<dyn Error + Send + Sync>> for Fault {
    fn from(err: Box<dyn Error + Send + Sync>) -> Self {
        let mut trace = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            trace.push(cause.to_string());
            source = cause.source();
        }

        let fault = Self::new(err.to_string());
        if trace.is_empty() {
            fault
        } else {
            fault.with_trace(trace.join(": "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("image decode failed")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_chain_becomes_trace() {
        let err: Box<dyn Error + Send + Sync> = Box::new(Outer(std::io::Error::other("eof")));
        let fault = Fault::from(err);

        assert_eq!(fault.message(), "image decode failed");
        assert_eq!(fault.trace(), Some("eof"));
    }

    #[test]
    fn test_panic_payload_message() {
        let payload: Box<dyn Any + Send> = Box::new("card layout exploded");
        let fault = Fault::from_panic(payload.as_ref());
        assert_eq!(fault.message(), "card layout exploded");
        assert_eq!(fault.trace(), Some("panic"));

        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(Fault::from_panic(payload.as_ref()).message(), "subtree panicked");
    }
}
