/// Convenience result type used across yanzhi.
pub type YanzhiResult<T> = Result<T, YanzhiError>;

/// Top-level error taxonomy used by the sequencing engine.
#[derive(thiserror::Error, Debug)]
pub enum YanzhiError {
    /// An asset directory or image is missing, empty, or undecodable.
    #[error("resource load error: {0}")]
    ResourceLoad(String),

    /// Authoring bug in a position descriptor, show file, or timeline.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A frame index outside `[-len, len)` was requested.
    #[error("frame index {index} out of range for {len} frames")]
    IndexOutOfRange {
        /// Requested (possibly negative) index.
        index: i64,
        /// Number of frames in the set.
        len: usize,
    },

    /// One command of a cue batch failed. Logged and dropped by the director.
    #[error("dispatch error at {position} ms: {message}")]
    Dispatch {
        /// Playback position the batch was dispatched for.
        position: u64,
        /// Rendered cause.
        message: String,
    },

    /// Errors when serializing or deserializing show files.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl YanzhiError {
    /// Build a [`YanzhiError::ResourceLoad`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::ResourceLoad(msg.into())
    }

    /// Build a [`YanzhiError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`YanzhiError::Dispatch`] value.
    pub fn dispatch(position: u64, msg: impl Into<String>) -> Self {
        Self::Dispatch {
            position,
            message: msg.into(),
        }
    }

    /// Build a [`YanzhiError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
