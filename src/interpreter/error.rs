use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    #[error("Dialogue {0} is not wrapped in quote markers")]
    MalformedDialogue(CompactString),
    #[error("Command `{command}` requires the argument `{key}`")]
    MissingArgument {
        command: CompactString,
        key: &'static str,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("[line {line}] {kind}")]
pub struct RuntimeError {
    #[source]
    pub kind: RuntimeErrorKind,
    pub line: u32,
}

/// A value could not be read as the requested kind. Coercion then falls back
/// to `0` or `false`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoercionError {
    #[error("`{0}` is not a number, using 0")]
    NonNumeric(CompactString),
    #[error("`{0}` is not a boolean, using false")]
    NonBoolean(CompactString),
}
