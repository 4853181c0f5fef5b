use super::value::ParamType;
use thiserror::Error;

/// Validation and output failures raised while building or writing a problem.
///
/// Every variant is recoverable: a failed construction returns no object and a
/// failed update leaves the previous state untouched.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Unknown {family} model '{key}'")]
    UnknownModel { family: &'static str, key: String },

    #[error("No '{discriminator}' given for {family}")]
    ModelNotSpecified {
        family: &'static str,
        discriminator: &'static str,
    },

    #[error(
        "Input arguments error.\nReceived:\n{}\nExpected:\n{}",
        .received.join(" "),
        .expected.join(" ")
    )]
    ParameterSetMismatch {
        received: Vec<String>,
        expected: Vec<String>,
    },

    #[error("No {family} model has been selected yet")]
    NoModelSelected { family: &'static str },

    #[error("Incorrect type for '{name}'. Expected {expected} but instead got {actual}")]
    IncorrectType {
        name: String,
        expected: ParamType,
        actual: &'static str,
    },

    #[error("Non-finite value {value} for '{name}'")]
    NonFiniteReal { name: String, value: f64 },

    #[error("'{key}' is given more than once for {owner}")]
    DuplicateKey { owner: &'static str, key: String },

    #[error("'{field}' of {command} must not contain line breaks")]
    LineBreak {
        command: &'static str,
        field: &'static str,
    },

    #[error("Unknown parameter '{field}' for command {command}")]
    UnknownField {
        command: &'static str,
        field: String,
    },

    #[error("Missing required parameter '{field}' for command {command}")]
    MissingRequiredField {
        command: &'static str,
        field: &'static str,
    },

    #[error("Command {child} is not allowed inside {container}")]
    DisallowedChild {
        container: &'static str,
        child: &'static str,
    },

    #[error("Unknown material tag '{0}'")]
    UnknownMaterialTag(String),

    #[error("Cannot insert into {container} at position {index} (holds {len} commands)")]
    InsertOutOfRange {
        container: &'static str,
        index: usize,
        len: usize,
    },

    #[error("{command} declares {param}={declared} but encloses {actual} commands")]
    CountMismatch {
        command: &'static str,
        param: &'static str,
        declared: i64,
        actual: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
