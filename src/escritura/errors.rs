//! Workflow error types

use std::path::PathBuf;
use thiserror::Error;

use crate::models::StatusEscritura;

#[derive(Error, Debug)]
pub enum EscrituraError {
    #[error("Escritura não encontrada: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Escritura {id} já está {} e não aceita novas alterações", .status.label())]
    TerminalState { id: String, status: StatusEscritura },

    #[error("Por favor, envie apenas arquivos PDF: {}", .0.display())]
    NotPdf(PathBuf),

    #[error("Arquivo PDF inválido ou corrompido: {}: {reason}", .path.display())]
    InvalidPdf { path: PathBuf, reason: String },

    #[error("Máximo de {limit} arquivos permitido")]
    TooManyAttachments { limit: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Storage(String),
}

// Storage helpers report through anyhow; flatten those into the workflow error.
impl From<anyhow::Error> for EscrituraError {
    fn from(err: anyhow::Error) -> Self {
        EscrituraError::Storage(err.to_string())
    }
}
