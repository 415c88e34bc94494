use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("Malformed frame at byte {offset}: {reason}")]
    MalformedFrame { offset: u64, reason: String },

    #[error("Frame of {length} bytes exceeds the limit of {limit} bytes")]
    FrameTooLarge { length: usize, limit: usize },

    #[error("Record in frame #{frame} could not be decoded: {source}")]
    RecordDecode {
        frame: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to load {role} template from {path}: {message}")]
    TemplateLoad {
        role: String,
        path: String,
        message: String,
    },

    #[error("Rendering endpoint {endpoint:?} of zone {zone:?} failed: {message}")]
    Render {
        zone: String,
        endpoint: String,
        message: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Template,
    Config,
    Io,
}

impl TopologyError {
    pub fn malformed(offset: u64, reason: impl Into<String>) -> Self {
        Self::MalformedFrame {
            offset,
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedFrame { .. } | Self::FrameTooLarge { .. } | Self::RecordDecode { .. } => {
                ErrorCategory::Input
            }
            Self::TemplateLoad { .. } | Self::Render { .. } => ErrorCategory::Template,
            Self::Configuration { .. } => ErrorCategory::Config,
            Self::Io(_) => ErrorCategory::Io,
        }
    }

    /// Process exit status for this error. Never zero.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input => 1,
            ErrorCategory::Template => 2,
            ErrorCategory::Config => 3,
            ErrorCategory::Io => 4,
        }
    }

    /// The single diagnostic line written to stderr before exiting.
    pub fn user_friendly_message(&self) -> String {
        self.to_string().replace(['\n', '\r'], " ")
    }
}

pub type Result<T> = std::result::Result<T, TopologyError>;
