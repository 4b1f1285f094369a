use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{context} expected {expected} but received {actual}")]
    TypeMismatch {
        context: String,
        expected: String,
        actual: String,
    },

    #[error("invalid type, should be {expected} but receive {actual}")]
    InvalidElement { expected: String, actual: String },

    #[error("{message}")]
    InvalidValue { message: String },

    #[error("invalid JSON on line {line}: {source}")]
    InvalidJson {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("customer file path is required")]
    MissingPath,

    #[error("invalid file key : \"{key}\" not found")]
    MissingKey { key: String },

    #[error("No such file or directory: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },
}

/// Python-style error kinds the tools report against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Type,
    Value,
    Key,
    FileNotFound,
    Io,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Filesystem,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ToolError {
    pub fn type_mismatch(
        context: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        ToolError::TypeMismatch {
            context: context.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_value(message: impl Into<String>) -> Self {
        ToolError::InvalidValue {
            message: message.into(),
        }
    }

    pub fn missing_key(key: impl Into<String>) -> Self {
        ToolError::MissingKey { key: key.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolError::TypeMismatch { .. } | ToolError::InvalidElement { .. } => ErrorKind::Type,
            ToolError::InvalidValue { .. }
            | ToolError::InvalidJson { .. }
            | ToolError::MissingPath => ErrorKind::Value,
            ToolError::MissingKey { .. } => ErrorKind::Key,
            ToolError::FileNotFound { .. } => ErrorKind::FileNotFound,
            ToolError::IoError(_) => ErrorKind::Io,
            ToolError::ConfigError { .. } => ErrorKind::Config,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.kind() {
            ErrorKind::Type | ErrorKind::Value => ErrorCategory::Input,
            ErrorKind::Key => ErrorCategory::Data,
            ErrorKind::FileNotFound | ErrorKind::Io => ErrorCategory::Filesystem,
            ErrorKind::Config => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.kind() {
            ErrorKind::Type | ErrorKind::Value | ErrorKind::Config => ErrorSeverity::High,
            ErrorKind::Key => ErrorSeverity::Medium,
            ErrorKind::FileNotFound => ErrorSeverity::High,
            ErrorKind::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ToolError::TypeMismatch { .. } => {
                "Pass coordinates as a (latitude, longitude) pair of numbers and a numeric limit"
            }
            ToolError::InvalidElement { .. } => "Only integers and nested arrays can be flattened",
            ToolError::InvalidValue { .. } => "Check the value format and try again",
            ToolError::InvalidJson { .. } => {
                "Every line of the customer file must be a standalone JSON object"
            }
            ToolError::MissingPath => "Provide a path with --customers-path-name",
            ToolError::MissingKey { .. } => {
                "Each customer needs user_id, name, latitude and longitude fields"
            }
            ToolError::FileNotFound { .. } => "Make sure the file exists and the path is correct",
            ToolError::IoError(_) => "Check file permissions and available disk space",
            ToolError::ConfigError { .. } => "Fix the configuration file or command-line flags",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        let prefix = match self.kind() {
            ErrorKind::Type => "TypeError",
            ErrorKind::Value => "ValueError",
            ErrorKind::Key => "KeyError",
            ErrorKind::FileNotFound => "FileNotFoundError",
            ErrorKind::Io => "IOError",
            ErrorKind::Config => "ConfigError",
        };
        format!("{}: {}", prefix, self)
    }

    /// Exit code used by the binaries for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;
