pub mod command;
pub mod context;
pub mod diagnostic;
pub mod error;
mod expression;
pub mod native;
mod tree;
pub mod value;

use crate::parser::{error::ParserError, Parser};
use diagnostic::Diagnostic;
pub use expression::ExpressionEvaluator;
pub use tree::{RunReport, StatementOutcome, TreeWalkInterpreter};

/// Receives every line the character says.
pub trait DialogueSink {
    fn on_dialogue(&mut self, text: &str);
}

/// OS-level effects. Implementations report their own failures and never
/// hand them back to the interpreter.
pub trait ActionSink {
    fn set_input_blocked(&mut self, blocked: bool);
    fn open_path(&mut self, path: &str);
}

/// Read-only questions about the machine the script runs on.
pub trait EnvironmentQuery {
    /// Number of entries in the directory at `path`, `0` when it cannot be read.
    fn count_directory_entries(&mut self, path: &str) -> f64;
    /// Local time as an `HHmm` number.
    fn current_time(&mut self) -> f64;
}

pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Everything a script can reach.
pub trait SystemContext: DialogueSink + ActionSink + EnvironmentQuery + DiagnosticSink {}

impl<T> SystemContext for T where T: DialogueSink + ActionSink + EnvironmentQuery + DiagnosticSink {}

/// Parses `source` and runs it against `context`.
pub fn run_source<C: SystemContext>(source: &str, context: &mut C) -> Result<RunReport, ParserError> {
    let program = Parser::new_without_file(source).parse()?;
    Ok(TreeWalkInterpreter::new(context).execute(&program))
}
