use super::{
    token::{Span, Token, TokenKind},
    LineBreaks,
};
use crate::lexer::{Lexer, LexicalError, LexicalErrorKind};
use crate::string::normalize_width;
use ariadne::{Color, Label, Report, ReportKind, Source};
use std::path::Path;

const ARIADNE_MSG: &str = "Ariadne produces valid utf-8 strings";
const ARIADNE_WRITE_MSG: &str = "Write into buffer should not fail.";

/// Interface for creating new token formatters.
pub trait TokenFormatter {
    /// Formats a token into a string.
    fn format(&self, token: &Token) -> String;
    /// Formats a lexer error into a string.
    fn format_lexical_error(&self, error: &LexicalError) -> String;
}

pub trait ToFormatter<F>
where
    F: TokenFormatter,
{
    fn create_formatter(&self) -> F;
}

/// One token per line as `KIND lexeme literal`.
pub struct BasicFormatter<'src> {
    text: &'src str,
    line_breaks: LineBreaks,
}

impl<'src> ToFormatter<BasicFormatter<'src>> for Lexer<'src> {
    fn create_formatter(&self) -> BasicFormatter<'src> {
        BasicFormatter {
            text: self.get_source(),
            line_breaks: self.get_line_breaks(),
        }
    }
}

impl BasicFormatter<'_> {
    fn lexeme(&self, span: &Span) -> &str {
        self.text.get(span.range()).unwrap_or_default()
    }

    pub fn get_line_breaks(&self) -> &LineBreaks {
        &self.line_breaks
    }
}

impl TokenFormatter for BasicFormatter<'_> {
    fn format(&self, token: &Token) -> String {
        let lexeme = self.lexeme(&token.span);
        match token.kind {
            TokenKind::Newline | TokenKind::Eof => format!("{}  null", token.kind),
            TokenKind::NumericLiteral => match normalize_width(lexeme).parse::<f64>() {
                Ok(value) => format!("NUMBER {lexeme} {value:?}"),
                Err(_) => format!("NUMBER {lexeme} null"),
            },
            TokenKind::StringLiteral => {
                let value = crate::string::strip_quotes(lexeme).unwrap_or_default();
                format!("STRING {lexeme} {value}")
            }
            kind => format!("{kind} {lexeme} null"),
        }
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        let line = self.line_breaks.get_line_from_span(error.span);
        match error.kind {
            LexicalErrorKind::Unrecognized(c) => {
                format!("[line {line}] Error: Unexpected character: {c}")
            }
            LexicalErrorKind::UnclosedString => {
                format!("[line {line}] Error: Unterminated string.")
            }
        }
    }
}

pub struct DebugFormatter;

impl<'src> ToFormatter<DebugFormatter> for Lexer<'src> {
    fn create_formatter(&self) -> DebugFormatter {
        DebugFormatter {}
    }
}

impl TokenFormatter for DebugFormatter {
    fn format(&self, token: &Token) -> String {
        format!("{token:?}")
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        format!("{error:?}")
    }
}

/// Renders lexical errors as annotated source reports.
pub struct PrettyFormatter<'src> {
    text: &'src str,
    path: &'src Path,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self { text, path }
    }

    pub fn get_text(&self) -> &'src str {
        self.text
    }

    pub fn get_path(&self) -> &'src Path {
        self.path
    }

    /// Writes a single-label error report pointing at `span`.
    pub fn report(&self, span: &Span, message: &str, label: &str) -> String {
        let path = self.path.to_string_lossy();
        let path: &str = &path;
        let range = span.char_range(self.text);
        let mut output = std::io::Cursor::new(Vec::new());
        Report::build(ReportKind::Error, (path, range.clone()))
            .with_message(message)
            .with_label(
                Label::new((path, range))
                    .with_message(label)
                    .with_color(Color::BrightRed),
            )
            .finish()
            .write((path, Source::from(self.text)), &mut output)
            .expect(ARIADNE_WRITE_MSG);
        String::from_utf8(output.into_inner()).expect(ARIADNE_MSG)
    }
}

impl<'src> ToFormatter<PrettyFormatter<'src>> for Lexer<'src> {
    fn create_formatter(&self) -> PrettyFormatter<'src> {
        PrettyFormatter::new(self.get_source(), self.get_path())
    }
}

impl TokenFormatter for PrettyFormatter<'_> {
    fn format(&self, token: &Token) -> String {
        format!("{token:?}")
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        match error.kind {
            LexicalErrorKind::Unrecognized(c) => self.report(
                &error.span,
                "Unexpected character",
                &format!("`{c}` is not part of the script alphabet"),
            ),
            LexicalErrorKind::UnclosedString => self.report(
                &error.span,
                "Unterminated string",
                "This `「` is never closed on its line",
            ),
        }
    }
}
