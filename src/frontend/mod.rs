//! Lexing and parsing of Kaleidoscope-style source text into an AST.

pub mod ast;
pub mod diagnostic;
pub mod lexer;
pub mod parser;

use self::ast::{AstNode, Program};
use self::lexer::{LexError, Lexer, Token, UnknownCharPolicy};
use self::parser::{Parser, ParserError};

/// Scans the whole text, the final entry is always `EndOfInput`.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>, LexError> {
    tokenize_with(src, UnknownCharPolicy::default())
}

pub fn tokenize_with(src: &str, policy: UnknownCharPolicy) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::with_policy(src, policy)
        .map(|res| res.map(|spanned| spanned.token))
        .collect()
}

/// Parses a single function definition. Input after its body is ignored.
pub fn parse(src: &str) -> Result<AstNode<'_>, ParserError> {
    parse_with(src, UnknownCharPolicy::default())
}

pub fn parse_with(src: &str, policy: UnknownCharPolicy) -> Result<AstNode<'_>, ParserError> {
    Parser::new(Lexer::with_policy(src, policy))?.parse_function()
}

/// Parses every definition, extern and bare expression up to end of input.
pub fn parse_program(src: &str, policy: UnknownCharPolicy) -> Result<Program<'_>, ParserError> {
    Parser::new(Lexer::with_policy(src, policy))?.parse_program()
}
