use icoolgen::core::error::InputError;
use icoolgen::core::io::problem::ProblemLoadError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Problem(#[from] ProblemLoadError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Unknown model family '{0}'. Run `icoolgen models` to list the families.")]
    UnknownFamily(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
