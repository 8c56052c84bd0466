use super::{
    error::{ParserError, ParserErrorKind},
    expression::{Expression, ExpressionNode, ExpressionNodeRef, Literal, LiteralKind},
    statement::{Program, Statement},
    Parser,
};
use crate::lexer::{
    formatter::{PrettyFormatter as PrettyTokenFormatter, TokenFormatter},
    LexicalErrorKind,
};
use crate::string::normalize_width;
use std::fmt::Write;

const WRITE_FMT_MSG: &str = "Encountered an error while attempting to write format string to buffer.";

pub trait ProgramFormatter {
    fn format(&self, program: &Program) -> String;
    fn format_expression(&self, tree: &Expression) -> String;
}

pub struct DebugFormatter;

impl ProgramFormatter for DebugFormatter {
    fn format(&self, program: &Program) -> String {
        format!("{program:#?}")
    }

    fn format_expression(&self, tree: &Expression) -> String {
        format!("{tree:?}")
    }
}

/// Writes one S-expression per top-level statement.
pub struct SExpressionFormatter;

impl SExpressionFormatter {
    fn format_literal(literal: &Literal) -> String {
        match literal.kind {
            LiteralKind::Number => match normalize_width(&literal.text).parse::<f64>() {
                Ok(v) => format!("{v:?}"),
                Err(_) => literal.text.to_string(),
            },
            LiteralKind::String | LiteralKind::Word => literal.text.to_string(),
        }
    }

    fn format_node(tree: &Expression, node: ExpressionNodeRef) -> String {
        let current_node = tree
            .get_node(node)
            .expect("Caller should make sure the ref is valid.");

        match current_node {
            ExpressionNode::Atom(atom) => Self::format_literal(&atom.literal),
            ExpressionNode::Group { inner } => {
                format!("(group {})", Self::format_node(tree, *inner))
            }
            ExpressionNode::Relational { operator, lhs, rhs } => format!(
                "({} {} {})",
                operator.symbol(),
                Self::format_node(tree, *lhs),
                Self::format_node(tree, *rhs),
            ),
            ExpressionNode::Logical { operator, lhs, rhs } => format!(
                "({} {} {})",
                operator.symbol(),
                Self::format_node(tree, *lhs),
                Self::format_node(tree, *rhs),
            ),
            ExpressionNode::Call {
                name, arguments, ..
            } => {
                let mut buffer = format!("(call {name}");
                for argument in arguments.iter() {
                    let value = Self::format_node(tree, argument.value);
                    let written = match argument.key {
                        Some(ref key) => write!(buffer, " ({key} {value})"),
                        None => write!(buffer, " {value}"),
                    };
                    written.expect(WRITE_FMT_MSG);
                }
                buffer.push(')');
                buffer
            }
        }
    }

    fn format_statement(statement: &Statement) -> String {
        match statement {
            Statement::Dialogue(stmt) => format!("(say {})", stmt.text),
            Statement::Command(stmt) => {
                let mut buffer = format!("(command {}", stmt.name);
                for (key, value) in stmt.arguments.iter() {
                    write!(buffer, " ({key} {})", Self::format_literal(value))
                        .expect(WRITE_FMT_MSG);
                }
                buffer.push(')');
                buffer
            }
            Statement::Conditional(stmt) => {
                let mut buffer = format!(
                    "(if {} {}",
                    Self::format_node(&stmt.condition, stmt.condition.get_root_ref()),
                    Self::format_statement(&stmt.body),
                );
                if let Some(ref label) = stmt.jump {
                    write!(buffer, " (jump {label})").expect(WRITE_FMT_MSG);
                }
                buffer.push(')');
                buffer
            }
        }
    }
}

impl ProgramFormatter for SExpressionFormatter {
    fn format(&self, program: &Program) -> String {
        program
            .iter()
            .map(Self::format_statement)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_expression(&self, tree: &Expression) -> String {
        Self::format_node(tree, tree.get_root_ref())
    }
}

pub trait ParserFormatter {
    fn format_error(&self, error: &ParserError) -> String;
}

pub trait ToFormatter<F>
where
    F: ParserFormatter,
{
    fn create_formatter(&self) -> F;
}

/// `[line N] Error: ...` lines.
pub struct BasicParserFormatter;

impl<'src> ToFormatter<BasicParserFormatter> for Parser<'src> {
    fn create_formatter(&self) -> BasicParserFormatter {
        BasicParserFormatter
    }
}

impl ParserFormatter for BasicParserFormatter {
    fn format_error(&self, error: &ParserError) -> String {
        let line = error.line;
        match error.kind {
            ParserErrorKind::UnexpectedToken { actual, expected } => {
                format!("[line {line}] Error: Expected {expected} but got {actual}.")
            }
            ParserErrorKind::NonExpression(kind) => {
                format!("[line {line}] Error at {kind}: Expect expression.")
            }
            ParserErrorKind::NonValue(kind) => {
                format!("[line {line}] Error at {kind}: Expect argument value.")
            }
            ParserErrorKind::UnexpectedEof => format!("[line {line}] Error at end: Unexpected EOF."),
            ParserErrorKind::InvalidStatement(kind) => {
                format!("[line {line}] Error at {kind}: Expect statement.")
            }
            ParserErrorKind::LexicalError(ref err) => match err.kind {
                LexicalErrorKind::Unrecognized(c) => {
                    format!("[line {line}] Error: Unexpected character: {c}")
                }
                LexicalErrorKind::UnclosedString => {
                    format!("[line {line}] Error: Unterminated string.")
                }
            },
        }
    }
}

/// Annotated source reports rendered with ariadne.
pub struct PrettyParserFormatter<'src> {
    token_formatter: PrettyTokenFormatter<'src>,
}

impl<'src> ToFormatter<PrettyParserFormatter<'src>> for Parser<'src> {
    fn create_formatter(&self) -> PrettyParserFormatter<'src> {
        PrettyParserFormatter {
            token_formatter: PrettyTokenFormatter::new(self.get_source(), self.get_path()),
        }
    }
}

impl ParserFormatter for PrettyParserFormatter<'_> {
    fn format_error(&self, error: &ParserError) -> String {
        let span = &error.span;
        match error.kind {
            ParserErrorKind::UnexpectedToken { actual, expected } => self.token_formatter.report(
                span,
                "Expected a different token",
                &format!("Expected {expected} but got {actual}"),
            ),
            ParserErrorKind::NonExpression(kind) => self.token_formatter.report(
                span,
                "Expected a valid expression",
                &format!("Not an expression token {kind}"),
            ),
            ParserErrorKind::NonValue(kind) => self.token_formatter.report(
                span,
                "Expected an argument value",
                &format!("{kind} cannot be a command argument"),
            ),
            ParserErrorKind::UnexpectedEof => {
                self.token_formatter
                    .report(span, "Unexpected EOF", "File ends here...")
            }
            ParserErrorKind::InvalidStatement(kind) => self.token_formatter.report(
                span,
                "Expected a statement",
                &format!("A statement cannot start with {kind}"),
            ),
            ParserErrorKind::LexicalError(ref err) => {
                self.token_formatter.format_lexical_error(err)
            }
        }
    }
}
