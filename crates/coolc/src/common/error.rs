//! Error types for the compilation pipeline

use thiserror::Error;

/// Pipeline-level failure.
///
/// Individual semantic diagnostics are not errors in this sense: they are
/// accumulated by the [`Diagnostics`](crate::sema::Diagnostics) sink and only
/// surface here as the final `Semantic` verdict once the pass is complete.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("malformed syntax tree: {0}")]
    Load(#[from] serde_json::Error),

    #[error("{errors} static semantic error(s)")]
    Semantic { errors: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    pub fn semantic(errors: usize) -> Self {
        Self::Semantic { errors }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;
