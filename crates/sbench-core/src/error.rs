//! Error types shared by the engine, the experiment runners and the CLI.

/// Failure raised by a task while it runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("task failed: {message}")]
pub struct TaskError {
    pub message: String,
}

impl TaskError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SbenchError {
    #[error("repetition count must be at least 1, got {0}")]
    InvalidRepetitionCount(usize),

    #[error("unsupported data size {size}: expected a power of two between {min} and {max}")]
    UnsupportedDataSize { size: usize, min: usize, max: usize },

    #[error("invalid sweep: {0}")]
    InvalidSweep(String),

    #[error("array length must be at least 1")]
    InvalidArrayLength,

    #[error(
        "class and struct series differ at index {index}: class size {class_size:?}, struct size {struct_size:?}"
    )]
    MismatchedSeries {
        index: usize,
        class_size: Option<usize>,
        struct_size: Option<usize>,
    },

    #[error("config: {0}")]
    Config(String),

    /// The task's own failure, passed through untouched.
    #[error(transparent)]
    Task(#[from] TaskError),
}

impl SbenchError {
    /// Whether the error comes from bad input rather than from a workload.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, Self::Task(_))
    }
}

#[cfg(test)]
mod tests {
    use super::{SbenchError, TaskError};

    #[test]
    fn task_error_is_transparent() {
        let err = SbenchError::from(TaskError::new("boom"));
        assert_eq!(err.to_string(), "task failed: boom");
        assert!(!err.is_precondition());
    }

    #[test]
    fn precondition_errors_render_their_input() {
        let err = SbenchError::InvalidRepetitionCount(0);
        assert_eq!(err.to_string(), "repetition count must be at least 1, got 0");
        assert!(err.is_precondition());

        let err = SbenchError::UnsupportedDataSize {
            size: 48,
            min: 1,
            max: 4096,
        };
        assert!(err.to_string().contains("48"));
    }
}
