use schemakernel_layout::PlacementError;
use thiserror::Error;

/// Fatal outcome of parsing or running an instruction script.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    /// Malformed script text. Positions are 1-based.
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
    /// A well-formed statement the engine refused.
    #[error("line {line}: {source}")]
    Placement {
        line: usize,
        #[source]
        source: PlacementError,
    },
}

impl ScriptError {
    /// Line of the offending text or statement.
    pub fn line(&self) -> usize {
        match self {
            ScriptError::Parse { line, .. } | ScriptError::Placement { line, .. } => *line,
        }
    }
}
