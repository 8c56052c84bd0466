mod cursor;
mod error;
pub mod formatter;
mod token;

use crate::string;
use cursor::SourceChar;
pub use error::{LexicalError, LexicalErrorKind};
use std::{path::Path, rc::Rc, str::Chars};
pub use token::{Span, Token, TokenKind, KEYWORD_HASHMAP};

/// Byte offsets at which each line of the source starts.
#[derive(Debug, Clone)]
pub struct LineBreaks {
    line_starts: Rc<[usize]>,
}

impl LineBreaks {
    fn new(text: &str) -> Self {
        let line_starts: Vec<usize> = std::iter::once(0)
            .chain(
                text.bytes()
                    .enumerate()
                    .filter(|(_, byte)| *byte == b'\n')
                    .map(|(offset, _)| offset + 1),
            )
            .collect();
        Self {
            line_starts: line_starts.into(),
        }
    }

    pub fn get_max_line(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// One-based line number of the byte at `offset`.
    pub fn get_line(&self, offset: usize) -> u32 {
        let line = self.line_starts.partition_point(|start| *start <= offset);
        (line as u32).clamp(1, self.get_max_line())
    }

    pub fn get_line_from_span(&self, span: Span) -> u32 {
        self.get_line(span.start())
    }
}

#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    path: &'src Path,
    chars: Chars<'src>,
    offset: usize,
    line_breaks: LineBreaks,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, path: &'src Path) -> Self {
        Self {
            source,
            path,
            chars: source.chars(),
            offset: 0,
            line_breaks: LineBreaks::new(source),
        }
    }

    pub fn new_without_file(source: &'src str) -> Self {
        Self::new(source, "no_file".as_ref())
    }

    pub fn get_source(&self) -> &'src str {
        self.source
    }

    pub fn get_path(&self) -> &'src Path {
        self.path
    }

    pub fn get_line_breaks(&self) -> LineBreaks {
        self.line_breaks.clone()
    }

    pub fn get_lexeme(&self, span: &Span) -> Option<&'src str> {
        self.source.get(span.range())
    }
}

impl<'src> Lexer<'src> {
    fn next_char(&mut self) -> Option<SourceChar> {
        let value = self.chars.next()?;
        let offset = self.offset;
        self.offset += value.len_utf8();
        Some(SourceChar { value, offset })
    }

    fn peek_char(&self) -> Option<char> {
        self.chars.clone().next()
    }

    fn peek_second_char(&self) -> Option<char> {
        self.chars.clone().nth(1)
    }

    fn eat_if(&mut self, predicate: impl Fn(char) -> bool) -> bool {
        match self.peek_char() {
            Some(c) if predicate(c) => {
                let _ = self.next_char();
                true
            }
            _ => false,
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        loop {
            let Some(current) = self.next_char() else {
                let end = self.source.len();
                return Ok(Token {
                    kind: TokenKind::Eof,
                    span: Span::new(end, end),
                });
            };
            let start = current.offset;

            let kind = match current.value {
                '\n' => TokenKind::Newline,
                '#' | '＃' => {
                    self.skip_comment();
                    continue;
                }
                c if is_blank(c) => continue,
                '(' | '（' => TokenKind::LeftParenthesis,
                ')' | '）' => TokenKind::RightParenthesis,
                ':' | '：' => TokenKind::Colon,
                '※' => TokenKind::Guard,
                '→' => TokenKind::Arrow,
                '≠' => TokenKind::BangEqual,
                '≤' => TokenKind::LessThanEqual,
                '≥' => TokenKind::GreaterThanEqual,
                '=' | '＝' => {
                    // `==` is read as a single equality operator.
                    let _ = self.eat_if(is_equal_sign);
                    TokenKind::Equal
                }
                '!' | '！' => {
                    if self.eat_if(is_equal_sign) {
                        TokenKind::BangEqual
                    } else {
                        return Err(LexicalError {
                            kind: LexicalErrorKind::Unrecognized(current.value),
                            span: Span::new(start, current.next_offset()),
                        });
                    }
                }
                '<' | '＜' => {
                    if self.eat_if(is_equal_sign) {
                        TokenKind::LessThanEqual
                    } else {
                        TokenKind::LessThan
                    }
                }
                '>' | '＞' => {
                    if self.eat_if(is_equal_sign) {
                        TokenKind::GreaterThanEqual
                    } else {
                        TokenKind::GreaterThan
                    }
                }
                '「' => return self.lex_string(start),
                c if string::is_digit(c) => return Ok(self.lex_number(start)),
                c if is_ident_char(c) => return Ok(self.lex_ident(start)),
                c => {
                    return Err(LexicalError {
                        kind: LexicalErrorKind::Unrecognized(c),
                        span: Span::new(start, current.next_offset()),
                    })
                }
            };

            return Ok(Token {
                kind,
                span: Span::new(start, self.offset),
            });
        }
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            let _ = self.next_char();
        }
    }

    /// Strings are delimited by `「」` and may contain balanced inner pairs.
    fn lex_string(&mut self, start: usize) -> Result<Token, LexicalError> {
        let mut depth = 1usize;
        while let Some(c) = self.peek_char() {
            match c {
                '\n' => break,
                '「' => depth += 1,
                '」' => depth -= 1,
                _ => {}
            }
            let _ = self.next_char();
            if depth == 0 {
                return Ok(Token {
                    kind: TokenKind::StringLiteral,
                    span: Span::new(start, self.offset),
                });
            }
        }
        Err(LexicalError {
            kind: LexicalErrorKind::UnclosedString,
            span: Span::new(start, self.offset),
        })
    }

    fn lex_number(&mut self, start: usize) -> Token {
        while self.eat_if(string::is_digit) {}
        let has_fraction = matches!(
            (self.peek_char(), self.peek_second_char()),
            (Some(point), Some(digit)) if string::is_decimal_point(point) && string::is_digit(digit)
        );
        if has_fraction {
            let _ = self.next_char();
            while self.eat_if(string::is_digit) {}
        }
        Token {
            kind: TokenKind::NumericLiteral,
            span: Span::new(start, self.offset),
        }
    }

    fn lex_ident(&mut self, start: usize) -> Token {
        while self.eat_if(is_ident_char) {}
        let span = Span::new(start, self.offset);
        let lexeme = &self.source[span.range()];
        Token {
            kind: KEYWORD_HASHMAP
                .get(lexeme)
                .copied()
                .unwrap_or(TokenKind::Ident),
            span,
        }
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\u{3000}')
}

fn is_equal_sign(c: char) -> bool {
    matches!(c, '=' | '＝')
}

/// Anything that is not whitespace, a control character or punctuation the
/// grammar reserves can appear in an identifier.
fn is_ident_char(c: char) -> bool {
    !c.is_whitespace()
        && !c.is_control()
        && !matches!(
            c,
            '(' | ')'
                | '（'
                | '）'
                | ':'
                | '：'
                | '='
                | '＝'
                | '!'
                | '！'
                | '<'
                | '＜'
                | '>'
                | '＞'
                | '≠'
                | '≤'
                | '≥'
                | '※'
                | '→'
                | '#'
                | '＃'
                | '「'
                | '」'
        )
}
