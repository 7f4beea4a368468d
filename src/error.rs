use thiserror::Error;

pub type Result<T> = std::result::Result<T, EliminationError>;

#[derive(Error, Debug)]
pub enum EliminationError {
    #[error("unknown team '{0}'")]
    InvalidTeam(String),

    #[error("malformed input{}: {reason}", line_suffix(.line))]
    MalformedInput { line: Option<usize>, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl EliminationError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        EliminationError::MalformedInput {
            line: None,
            reason: reason.into(),
        }
    }

    pub fn malformed_at(line: usize, reason: impl Into<String>) -> Self {
        EliminationError::MalformedInput {
            line: Some(line),
            reason: reason.into(),
        }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" at line {line}"),
        None => String::new(),
    }
}
