use std::mem;

use thiserror::Error;

use crate::frontend::{
    ast::{AstNode, Program},
    lexer::{LexError, Lexer, Span, SpannedToken, Token, TokenKind},
};

// Few errors here to characterize what went wrong during the
// parsing process. Every one of them aborts the parse.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum ParserError {
    #[error("{span}: unexpected token {found}, expected {expected}")]
    UnexpectedToken {
        found: TokenKind,
        expected: TokenKind,
        span: Span,
    },

    #[error("{span}: expected a number, identifier or '(', found {found}")]
    ExpectedFactor { found: TokenKind, span: Span },

    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParserError {
    pub fn span(&self) -> Span {
        match self {
            ParserError::UnexpectedToken { span, .. } | ParserError::ExpectedFactor { span, .. } => {
                *span
            }
            ParserError::Lex(err) => err.span(),
        }
    }
}

// Small alias for fallible returns of parsing expressions
type ParseResult<'src> = Result<AstNode<'src>, ParserError>;

/// Recursive descent parser holding exactly one token of lookahead.
///
/// Operators form a single flat, left-associative level: `2+3*4` is
/// `(2+3)*4`. There is no precedence table on purpose.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: SpannedToken<'src>,
}

impl<'src> Parser<'src> {
    /// Takes ownership of the lexer and primes the lookahead.
    pub fn new(mut lexer: Lexer<'src>) -> Result<Self, ParserError> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    pub fn current(&self) -> &SpannedToken<'src> {
        &self.current
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current.kind() == kind
    }

    /// Consumes the lookahead if it is of the expected kind, returning it.
    /// This is the only place a token-kind mismatch is reported.
    pub fn eat(&mut self, expected: TokenKind) -> Result<SpannedToken<'src>, ParserError> {
        if !self.at(expected) {
            return Err(ParserError::UnexpectedToken {
                found: self.current.kind(),
                expected,
                span: self.current.span,
            });
        }

        let next = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.current, next))
    }

    // An identifier's lexeme is its name.
    fn eat_identifier(&mut self) -> Result<&'src str, ParserError> {
        Ok(self.eat(TokenKind::Identifier)?.lexeme)
    }

    /// definition ::= 'def' identifier '(' params ')' expression
    ///
    /// Only one definition is parsed, anything after its body is left
    /// unread.
    pub fn parse_function(&mut self) -> ParseResult<'src> {
        self.eat(TokenKind::Def)?;
        let name = self.eat_identifier()?;

        self.eat(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.eat(TokenKind::RParen)?;

        let body = self.parse_expression()?;

        Ok(AstNode::FunctionDef {
            name,
            params,
            body: Box::new(body),
        })
    }

    /// params ::= [ identifier (',' identifier)* ]
    pub fn parse_params(&mut self) -> Result<Vec<&'src str>, ParserError> {
        let mut params = vec![];

        if !self.at(TokenKind::Identifier) {
            return Ok(params);
        }

        params.push(self.eat_identifier()?);

        while self.at(TokenKind::Comma) {
            self.eat(TokenKind::Comma)?;
            params.push(self.eat_identifier()?);
        }

        Ok(params)
    }

    /// expression
    ///   ::= ifexpr
    ///   ::= term
    pub fn parse_expression(&mut self) -> ParseResult<'src> {
        if self.at(TokenKind::If) {
            self.parse_if_statement()
        } else {
            self.parse_term()
        }
    }

    /// ifexpr ::= 'if' expression 'then' expression 'else' expression
    pub fn parse_if_statement(&mut self) -> ParseResult<'src> {
        self.eat(TokenKind::If)?;
        let condition = self.parse_expression()?;

        self.eat(TokenKind::Then)?;
        let then_branch = self.parse_expression()?;

        self.eat(TokenKind::Else)?;
        let else_branch = self.parse_expression()?;

        Ok(AstNode::if_expr(condition, then_branch, else_branch))
    }

    /// term ::= factor (operator factor)*
    pub fn parse_term(&mut self) -> ParseResult<'src> {
        let mut lhs = self.parse_factor()?;

        while let Token::Operator(op) = self.current.token {
            self.eat(TokenKind::Operator)?;
            let rhs = self.parse_factor()?;
            lhs = AstNode::binary(lhs, op, rhs);
        }

        Ok(lhs)
    }

    /// factor
    ///   ::= number
    ///   ::= identifier
    ///   ::= identifier '(' args ')'
    ///   ::= '(' expression ')'
    pub fn parse_factor(&mut self) -> ParseResult<'src> {
        match self.current.token {
            Token::Number(num) => {
                self.eat(TokenKind::Number)?;
                Ok(AstNode::NumberLiteral(num))
            }

            Token::Identifier(name) => {
                self.eat(TokenKind::Identifier)?;

                if self.at(TokenKind::LParen) {
                    self.parse_function_call(name)
                } else {
                    Ok(AstNode::Identifier(name))
                }
            }

            Token::LParen => {
                self.eat(TokenKind::LParen)?;
                let expr = self.parse_expression()?;
                self.eat(TokenKind::RParen)?;
                Ok(expr)
            }

            unexpected => Err(ParserError::ExpectedFactor {
                found: unexpected.kind(),
                span: self.current.span,
            }),
        }
    }

    /// call ::= '(' [ expression (',' expression)* ] ')'
    ///
    /// The callee name has already been consumed by the caller.
    pub fn parse_function_call(&mut self, name: &'src str) -> ParseResult<'src> {
        self.eat(TokenKind::LParen)?;

        let mut args = vec![];

        if !self.at(TokenKind::RParen) {
            args.push(self.parse_expression()?);

            while self.at(TokenKind::Comma) {
                self.eat(TokenKind::Comma)?;
                args.push(self.parse_expression()?);
            }
        }

        self.eat(TokenKind::RParen)?;

        Ok(AstNode::FunctionCall { name, args })
    }

    /// external ::= '?' identifier '(' params ')'
    pub fn parse_extern(&mut self) -> ParseResult<'src> {
        self.eat(TokenKind::Extern)?;
        let name = self.eat_identifier()?;

        self.eat(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.eat(TokenKind::RParen)?;

        Ok(AstNode::ExternDecl { name, params })
    }

    /// toplevel
    ///   ::= definition
    ///   ::= external
    ///   ::= expression
    pub fn parse_top_level(&mut self) -> ParseResult<'src> {
        match self.current.kind() {
            TokenKind::Def => self.parse_function(),
            TokenKind::Extern => self.parse_extern(),
            _ => self.parse_expression(),
        }
    }

    /// program ::= toplevel* end-of-input
    pub fn parse_program(&mut self) -> Result<Program<'src>, ParserError> {
        let mut program = Program::new();

        while !self.at(TokenKind::EndOfInput) {
            program.push(self.parse_top_level()?);
        }

        Ok(program)
    }
}
