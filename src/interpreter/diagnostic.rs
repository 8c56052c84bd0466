use compact_str::CompactString;

use super::error::{CoercionError, RuntimeError};

/// Warnings raised while a script runs. None of them stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    UnknownCommand { name: CompactString, line: u32 },
    UnknownFunction { name: CompactString, line: u32 },
    Coercion { error: CoercionError, line: u32 },
    IgnoredJump { label: CompactString, line: u32 },
    Failed(RuntimeError),
}

impl Diagnostic {
    pub fn line(&self) -> u32 {
        match self {
            Diagnostic::UnknownCommand { line, .. }
            | Diagnostic::UnknownFunction { line, .. }
            | Diagnostic::Coercion { line, .. }
            | Diagnostic::IgnoredJump { line, .. } => *line,
            Diagnostic::Failed(error) => error.line,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnknownCommand { name, line } => {
                write!(f, "[line {line}] Unknown command `{name}`")
            }
            Diagnostic::UnknownFunction { name, line } => {
                write!(f, "[line {line}] Unknown function `{name}`, using 0")
            }
            Diagnostic::Coercion { error, line } => write!(f, "[line {line}] {error}"),
            Diagnostic::IgnoredJump { label, line } => {
                write!(f, "[line {line}] Jump to `{label}` is not supported")
            }
            Diagnostic::Failed(error) => write!(f, "{error}"),
        }
    }
}
