use log::{debug, info, log_enabled, Level};

use super::{
    command::{self, CommandArguments},
    diagnostic::Diagnostic,
    error::{RuntimeError, RuntimeErrorKind},
    ExpressionEvaluator, SystemContext,
};
use crate::parser::{
    formatter::{ProgramFormatter, SExpressionFormatter},
    statement::{CommandStatement, ConditionalStatement, DialogueStatement, Program, Statement},
};
use crate::string::strip_quotes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementOutcome {
    /// The statement ran and reached its sink.
    Executed,
    /// A guard was false, so the body was not visited.
    Skipped,
    /// The command name is unknown; nothing happened.
    Ignored,
}

/// Tally of one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub executed: usize,
    pub skipped: usize,
    pub ignored: usize,
    pub failed: usize,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.executed + self.skipped + self.ignored + self.failed
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} statements: {} executed, {} skipped, {} ignored, {} failed",
            self.total(),
            self.executed,
            self.skipped,
            self.ignored,
            self.failed
        )
    }
}

/// Walks a program once, top to bottom. Holds nothing but its context.
pub struct TreeWalkInterpreter<'ctx, C: SystemContext> {
    context: &'ctx mut C,
}

impl<'ctx, C> TreeWalkInterpreter<'ctx, C>
where
    C: SystemContext,
{
    pub fn new(context: &'ctx mut C) -> Self {
        Self { context }
    }

    /// Runs every top-level statement in order. A failing statement is
    /// reported to the diagnostic sink and the run carries on.
    pub fn execute(&mut self, program: &Program) -> RunReport {
        let mut report = RunReport::default();
        for statement in program.iter() {
            match self.interpret_statement(statement) {
                Ok(StatementOutcome::Executed) => report.executed += 1,
                Ok(StatementOutcome::Skipped) => report.skipped += 1,
                Ok(StatementOutcome::Ignored) => report.ignored += 1,
                Err(error) => {
                    report.failed += 1;
                    self.context.report(Diagnostic::Failed(error));
                }
            }
        }
        info!("{report}");
        report
    }

    pub fn interpret_statement(
        &mut self,
        statement: &Statement,
    ) -> Result<StatementOutcome, RuntimeError> {
        match statement {
            Statement::Dialogue(stmt) => self.interpret_dialogue(stmt),
            Statement::Command(stmt) => self.interpret_command(stmt),
            Statement::Conditional(stmt) => self.interpret_conditional(stmt),
        }
    }
}

// Statement interpreter
impl<'ctx, C> TreeWalkInterpreter<'ctx, C>
where
    C: SystemContext,
{
    fn interpret_dialogue(
        &mut self,
        stmt: &DialogueStatement,
    ) -> Result<StatementOutcome, RuntimeError> {
        let text = strip_quotes(&stmt.text).ok_or_else(|| RuntimeError {
            kind: RuntimeErrorKind::MalformedDialogue(stmt.text.clone()),
            line: stmt.line,
        })?;
        debug!("[line {}] dialogue: {text}", stmt.line);
        self.context.on_dialogue(text);
        Ok(StatementOutcome::Executed)
    }

    fn interpret_command(
        &mut self,
        stmt: &CommandStatement,
    ) -> Result<StatementOutcome, RuntimeError> {
        let Some(command) = command::lookup(&stmt.name) else {
            self.context.report(Diagnostic::UnknownCommand {
                name: stmt.name.clone(),
                line: stmt.line,
            });
            return Ok(StatementOutcome::Ignored);
        };

        let to_error = |kind| RuntimeError {
            kind,
            line: stmt.line,
        };
        let arguments = CommandArguments::resolve(&stmt.name, &stmt.arguments);
        command.check(&arguments).map_err(to_error)?;
        for key in arguments.keys().filter(|key| !command.accepts(key)) {
            debug!(
                "[line {}] {} ignores the argument `{key}`",
                stmt.line, command.name
            );
        }

        debug!("[line {}] command: {}", stmt.line, command.name);
        (command.action)(&arguments, &mut *self.context).map_err(to_error)?;
        Ok(StatementOutcome::Executed)
    }

    fn interpret_conditional(
        &mut self,
        stmt: &ConditionalStatement,
    ) -> Result<StatementOutcome, RuntimeError> {
        let value = ExpressionEvaluator::evaluate_expression(&stmt.condition, &mut *self.context);
        let flag = ExpressionEvaluator::coerce_bool(&value, stmt.line, &mut *self.context);

        if log_enabled!(Level::Debug) {
            let condition = SExpressionFormatter.format_expression(&stmt.condition);
            debug!("[line {}] condition {condition} -> {flag}", stmt.line);
        }

        if flag {
            return self.interpret_statement(&stmt.body);
        }

        if let Some(ref label) = stmt.jump {
            self.context.report(Diagnostic::IgnoredJump {
                label: label.clone(),
                line: stmt.line,
            });
        }
        Ok(StatementOutcome::Skipped)
    }
}
