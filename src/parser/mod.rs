pub mod error;
pub mod expression;
pub mod formatter;
pub mod statement;

use std::path::Path;

use crate::lexer::{Lexer, LineBreaks, Token, TokenKind};
use error::{ParserError, ParserErrorKind};
use expression::{
    CallArgument, Expression, ExpressionNode, ExpressionNodeRef, IncompleteExpression,
    InfixOperator, Literal, LogicalOperator, RelationalOperator,
};
use statement::{
    ArgKey, Arguments, CommandStatement, ConditionalStatement, DialogueStatement, Program,
    Statement,
};

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    line_breaks: LineBreaks,
    lookahead: Option<Result<Token, ParserError>>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, path: &'src Path) -> Self {
        let lexer = Lexer::new(source, path);
        Self {
            line_breaks: lexer.get_line_breaks(),
            lexer,
            lookahead: None,
        }
    }

    pub fn new_without_file(source: &'src str) -> Self {
        Self::new(source, "no_file".as_ref())
    }

    pub fn get_source(&self) -> &'src str {
        self.lexer.get_source()
    }

    pub fn get_path(&self) -> &'src Path {
        self.lexer.get_path()
    }

    fn line_of(&self, token: &Token) -> u32 {
        self.line_breaks.get_line_from_span(token.span)
    }

    fn lexeme(&self, token: &Token) -> &'src str {
        self.lexer
            .get_lexeme(&token.span)
            .expect("Lexed token has a valid span")
    }

    fn error(&self, kind: ParserErrorKind, token: &Token) -> ParserError {
        ParserError {
            kind,
            span: token.span,
            line: self.line_of(token),
        }
    }

    fn peek(&mut self) -> Result<Token, ParserError> {
        match self.lookahead {
            Some(ref token_or_error) => token_or_error.clone(),
            None => {
                let next_token = self.next_token();
                self.lookahead = Some(next_token.clone());
                next_token
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, ParserError> {
        match self.lookahead.take() {
            Some(token_or_error) => token_or_error,
            None => self.lexer.next_token().map_err(|e| ParserError {
                span: e.span,
                line: self.line_breaks.get_line_from_span(e.span),
                kind: ParserErrorKind::LexicalError(e),
            }),
        }
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token, ParserError> {
        let next_token = self.next_token()?;
        if next_token.kind != expected {
            Err(self.error(
                ParserErrorKind::UnexpectedToken {
                    actual: next_token.kind,
                    expected,
                },
                &next_token,
            ))
        } else {
            Ok(next_token)
        }
    }

    fn eat_if(&mut self, next: TokenKind) -> Result<Option<Token>, ParserError> {
        let next_token = self.peek()?;
        if next_token.kind != next {
            Ok(None)
        } else {
            let _ = self.next_token().expect("Just peeked.");
            Ok(Some(next_token))
        }
    }

    fn skip_newlines(&mut self) -> Result<(), ParserError> {
        while self.eat_if(TokenKind::Newline)?.is_some() {}
        Ok(())
    }

    /// A statement ends at a newline or at the end of the file. The EOF token
    /// is left in place for the caller.
    fn expect_terminator(&mut self) -> Result<(), ParserError> {
        let next_token = self.peek()?;
        match next_token.kind {
            TokenKind::Eof => Ok(()),
            TokenKind::Newline => {
                let _ = self.next_token()?;
                Ok(())
            }
            actual => Err(self.error(
                ParserErrorKind::UnexpectedToken {
                    actual,
                    expected: TokenKind::Newline,
                },
                &next_token,
            )),
        }
    }
}

// Pratt parser for expressions
impl<'src> Parser<'src> {
    pub fn parse_expression(&mut self) -> Result<Expression, ParserError> {
        let mut tree = IncompleteExpression::new();
        let root = self.parse_expression_pratt(0, &mut tree)?;

        Ok(Expression::new(tree, root)
            .expect("Root was obtained from the tree itself so it must be valid."))
    }

    fn peek_infix_operator(&mut self) -> Result<Option<InfixOperator>, ParserError> {
        let token = self.peek()?;

        let operator = match token.kind {
            TokenKind::Equal => InfixOperator::Relational(RelationalOperator::Equal),
            TokenKind::BangEqual => InfixOperator::Relational(RelationalOperator::NotEqual),
            TokenKind::LessThan => InfixOperator::Relational(RelationalOperator::LessThan),
            TokenKind::LessThanEqual => {
                InfixOperator::Relational(RelationalOperator::LessThanEqual)
            }
            TokenKind::GreaterThan => InfixOperator::Relational(RelationalOperator::GreaterThan),
            TokenKind::GreaterThanEqual => {
                InfixOperator::Relational(RelationalOperator::GreaterThanEqual)
            }
            TokenKind::KeywordAnd => InfixOperator::Logical(LogicalOperator::And),
            TokenKind::KeywordOr => InfixOperator::Logical(LogicalOperator::Or),
            _ => return Ok(None),
        };
        Ok(Some(operator))
    }

    fn expect_left_expression(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let token = self.next_token()?;
        let line = self.line_of(&token);

        let node = match token.kind {
            TokenKind::NumericLiteral => tree.atom(Literal::number(self.lexeme(&token)), line),
            TokenKind::StringLiteral => tree.atom(Literal::string(self.lexeme(&token)), line),
            TokenKind::Ident => self.finish_identifier(&token, tree)?,
            // Bracketed expression
            TokenKind::LeftParenthesis => {
                let inner = self.parse_expression_pratt(0, tree)?;
                self.expect(TokenKind::RightParenthesis)?;
                tree.push(ExpressionNode::Group { inner })
            }
            TokenKind::Eof => return Err(self.error(ParserErrorKind::UnexpectedEof, &token)),
            kind => return Err(self.error(ParserErrorKind::NonExpression(kind), &token)),
        };
        Ok(node)
    }

    /// An identifier is either a function call, when followed by a
    /// parenthesis, or a bare word value.
    fn finish_identifier(
        &mut self,
        ident: &Token,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let name = self.lexeme(ident);
        let line = self.line_of(ident);
        if self.eat_if(TokenKind::LeftParenthesis)?.is_none() {
            return Ok(tree.atom(Literal::word(name), line));
        }

        let mut arguments = Vec::new();
        loop {
            let token = self.peek()?;
            match token.kind {
                TokenKind::RightParenthesis => {
                    let _ = self.next_token()?;
                    break;
                }
                TokenKind::Eof => {
                    return Err(self.error(ParserErrorKind::UnexpectedEof, &token));
                }
                TokenKind::Ident => {
                    let ident = self.next_token()?;
                    if self.eat_if(TokenKind::Colon)?.is_some() {
                        let value = self.parse_expression_pratt(0, tree)?;
                        arguments.push(CallArgument {
                            key: Some(self.lexeme(&ident).into()),
                            value,
                        });
                    } else {
                        let lhs = self.finish_identifier(&ident, tree)?;
                        let value = self.parse_infix(lhs, 0, tree)?;
                        arguments.push(CallArgument { key: None, value });
                    }
                }
                _ => {
                    let value = self.parse_expression_pratt(0, tree)?;
                    arguments.push(CallArgument { key: None, value });
                }
            }
        }

        Ok(tree.push(ExpressionNode::Call {
            name: name.into(),
            arguments,
            line,
        }))
    }

    fn parse_expression_pratt(
        &mut self,
        min_bp: u8,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let lhs = self.expect_left_expression(tree)?;
        self.parse_infix(lhs, min_bp, tree)
    }

    fn parse_infix(
        &mut self,
        mut lhs: ExpressionNodeRef,
        min_bp: u8,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        while let Some(operator) = self.peek_infix_operator()? {
            let (lbp, rbp) = operator.get_binding_power();
            if lbp < min_bp {
                break;
            }
            let _ = self.next_token()?;

            let rhs = self.parse_expression_pratt(rbp, tree)?;
            lhs = tree.push(match operator {
                InfixOperator::Relational(operator) => {
                    ExpressionNode::Relational { operator, lhs, rhs }
                }
                InfixOperator::Logical(operator) => ExpressionNode::Logical { operator, lhs, rhs },
            });
        }
        Ok(lhs)
    }
}

// Parse program/statements
impl<'src> Parser<'src> {
    pub fn parse(&mut self) -> Result<Program, ParserError> {
        let mut statements = Vec::new();

        loop {
            let first = self.peek()?;
            match first.kind {
                TokenKind::Newline => {
                    let _ = self.next_token()?;
                }
                TokenKind::Eof => {
                    break;
                }
                _ => statements.push(self.parse_statement()?),
            }
        }

        Ok(Program::new(statements))
    }

    pub fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        let first = self.next_token()?;
        let line = self.line_of(&first);

        match first.kind {
            TokenKind::StringLiteral => {
                let text = self.lexeme(&first).into();
                self.expect_terminator()?;
                Ok(Statement::Dialogue(DialogueStatement { text, line }))
            }
            TokenKind::Ident => {
                let name = self.lexeme(&first).into();
                let arguments = self.parse_command_arguments()?;
                self.expect_terminator()?;
                Ok(Statement::Command(CommandStatement {
                    name,
                    arguments,
                    line,
                }))
            }
            TokenKind::Guard => {
                let condition = self.parse_expression()?;
                self.skip_newlines()?;
                let body = Box::new(self.parse_statement()?);
                self.skip_newlines()?;
                let jump = match self.eat_if(TokenKind::Arrow)? {
                    Some(_) => {
                        let label = self.expect(TokenKind::Ident)?;
                        self.expect_terminator()?;
                        Some(self.lexeme(&label).into())
                    }
                    None => None,
                };
                Ok(Statement::Conditional(ConditionalStatement {
                    condition,
                    body,
                    jump,
                    line,
                }))
            }
            TokenKind::Eof => Err(self.error(ParserErrorKind::UnexpectedEof, &first)),
            kind => Err(self.error(ParserErrorKind::InvalidStatement(kind), &first)),
        }
    }

    fn parse_command_arguments(&mut self) -> Result<Arguments, ParserError> {
        let mut arguments = Arguments::new();
        loop {
            let token = self.peek()?;
            match token.kind {
                TokenKind::Ident => {
                    let ident = self.next_token()?;
                    if self.eat_if(TokenKind::Colon)?.is_some() {
                        let value = self.expect_value()?;
                        arguments.insert(ArgKey::named(self.lexeme(&ident)), value);
                    } else {
                        arguments.insert(ArgKey::default_key(), Literal::word(self.lexeme(&ident)));
                    }
                }
                TokenKind::NumericLiteral | TokenKind::StringLiteral => {
                    let value = self.expect_value()?;
                    arguments.insert(ArgKey::default_key(), value);
                }
                _ => break,
            }
        }
        Ok(arguments)
    }

    fn expect_value(&mut self) -> Result<Literal, ParserError> {
        let token = self.next_token()?;
        let lexeme = self.lexeme(&token);
        match token.kind {
            TokenKind::NumericLiteral => Ok(Literal::number(lexeme)),
            TokenKind::StringLiteral => Ok(Literal::string(lexeme)),
            TokenKind::Ident => Ok(Literal::word(lexeme)),
            TokenKind::Eof => Err(self.error(ParserErrorKind::UnexpectedEof, &token)),
            kind => Err(self.error(ParserErrorKind::NonValue(kind), &token)),
        }
    }
}
