//! Error types for paramsuite

use thiserror::Error;

/// Result type alias for suite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for suite operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Installing a class filter left no runnable children
    #[error("no tests remain after applying the class filter")]
    NoTestsRemain,

    /// First-time environment setup failed
    #[error("first start of '{class_name}' on '{config}' failed: {message}")]
    FirstStart {
        config: String,
        class_name: String,
        message: String,
    },

    /// A child's execution machinery broke outside the reporting channel
    #[error("child '{child}' aborted: {message}")]
    ChildAborted { child: String, message: String },

    /// A child referenced a test class with no registered test function
    #[error("unknown test class: {class_name}")]
    UnknownTestClass { class_name: String },

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

impl Error {
    /// Create a first-start error
    pub fn first_start(
        config: impl Into<String>,
        class_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::FirstStart {
            config: config.into(),
            class_name: class_name.into(),
            message: message.into(),
        }
    }

    /// Create a child-abort error
    pub fn child_aborted(child: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ChildAborted {
            child: child.into(),
            message: message.into(),
        }
    }
}
