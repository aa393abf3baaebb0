use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

// Reserved words. `extern` is deliberately absent, externs are introduced
// by the '?' character instead.
lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, Token<'static>> = {
        let mut map = HashMap::new();
        map.insert("def", Token::Def);
        map.insert("if", Token::If);
        map.insert("then", Token::Then);
        map.insert("else", Token::Else);
        map
    };
}

/// Position of a token in the source text. Lines and columns start at 1,
/// columns count characters rather than bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Default for Span {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'src> {
    EndOfInput = 0,
    Def = 1,
    Extern = 2,
    Identifier(&'src str) = 3,
    Number(f64) = 4,
    Operator(Ops) = 5,
    LParen = 6,
    RParen = 7,
    Comma = 8,
    If = 9,
    Then = 10,
    Else = 11,
}

/// Payload-free mirror of [`Token`], used wherever only the category
/// matters (the parser's `eat` and error reporting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    EndOfInput,
    Def,
    Extern,
    Identifier,
    Number,
    Operator,
    LParen,
    RParen,
    Comma,
    If,
    Then,
    Else,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ops {
    Plus = 0,
    Minus = 1,
    Mult = 2,
    Div = 3,
}

impl Ops {
    fn from_char(c: char) -> Option<Ops> {
        match c {
            '+' => Some(Ops::Plus),
            '-' => Some(Ops::Minus),
            '*' => Some(Ops::Mult),
            '/' => Some(Ops::Div),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ops::Plus => "+",
            Ops::Minus => "-",
            Ops::Mult => "*",
            Ops::Div => "/",
        }
    }
}

impl fmt::Display for Ops {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'src> Token<'src> {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::EndOfInput => TokenKind::EndOfInput,
            Token::Def => TokenKind::Def,
            Token::Extern => TokenKind::Extern,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::Number(_) => TokenKind::Number,
            Token::Operator(_) => TokenKind::Operator,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::Comma => TokenKind::Comma,
            Token::If => TokenKind::If,
            Token::Then => TokenKind::Then,
            Token::Else => TokenKind::Else,
        }
    }

    fn from_single_char(c: char) -> Option<Token<'src>> {
        if let Some(op) = Ops::from_char(c) {
            return Some(Token::Operator(op));
        }

        match c {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            ',' => Some(Token::Comma),
            '=' => Some(Token::Def),
            '?' => Some(Token::Extern),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::EndOfInput => "end of input",
            TokenKind::Def => "'def'",
            TokenKind::Extern => "'?'",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::Operator => "operator",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::If => "'if'",
            TokenKind::Then => "'then'",
            TokenKind::Else => "'else'",
        };
        f.write_str(text)
    }
}

/// A token together with where it came from and the exact text it was
/// scanned from (`=` and `def` both produce [`Token::Def`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpannedToken<'src> {
    pub token: Token<'src>,
    pub lexeme: &'src str,
    pub span: Span,
}

impl<'src> SpannedToken<'src> {
    pub fn kind(&self) -> TokenKind {
        self.token.kind()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("{span}: unknown character {ch:?}")]
    UnknownCharacter { ch: char, span: Span },

    #[error("{span}: malformed number literal '{text}'")]
    MalformedNumber { text: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnknownCharacter { span, .. } | LexError::MalformedNumber { span, .. } => {
                *span
            }
        }
    }
}

/// What the lexer does with a character outside the token vocabulary.
///
/// The default is `Reject`, so `tokenize("a < b")` fails on the `<` instead
/// of quietly yielding `a` and `b`. `Skip` restores the permissive scan that
/// drops such characters without a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownCharPolicy {
    #[default]
    Reject,
    Skip,
}

/// Hand written scanner over a borrowed source string.
///
/// The lexer only ever moves forward. Cloning it is cheap (a reference plus a
/// few counters), and a clone continues independently from the same position,
/// so the same text can be scanned for a token listing and again for parsing.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    src: &'src str,
    pos: usize,
    current: Option<char>,
    line: usize,
    column: usize,
    policy: UnknownCharPolicy,
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self::with_policy(src, UnknownCharPolicy::default())
    }

    pub fn with_policy(src: &'src str, policy: UnknownCharPolicy) -> Self {
        Self {
            src,
            pos: 0,
            current: src.chars().next(),
            line: 1,
            column: 1,
            policy,
            done: false,
        }
    }

    pub fn current_char(&self) -> Option<char> {
        self.current
    }

    pub fn span(&self) -> Span {
        Span {
            offset: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    /// Moves one character forward. Past the last character the current
    /// character becomes `None` and stays there.
    pub fn advance(&mut self) {
        let Some(c) = self.current else {
            return;
        };

        self.pos += c.len_utf8();

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        self.current = self.src[self.pos..].chars().next();
    }

    pub fn skip_whitespace(&mut self) {
        while matches!(self.current, Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn skip_comment(&mut self) {
        while matches!(self.current, Some(c) if c != '\n') {
            self.advance();
        }
    }

    fn scan_while(&mut self, pred: impl Fn(char) -> bool) -> &'src str {
        let start = self.pos;

        while matches!(self.current, Some(c) if pred(c)) {
            self.advance();
        }

        &self.src[start..self.pos]
    }

    fn spanned(&self, token: Token<'src>, start: Span) -> SpannedToken<'src> {
        SpannedToken {
            token,
            lexeme: &self.src[start.offset..self.pos],
            span: start,
        }
    }

    /// Scans the next token, skipping whitespace and `#` comments first.
    /// Once the input is exhausted every call returns `EndOfInput`.
    pub fn next_token(&mut self) -> Result<SpannedToken<'src>, LexError> {
        loop {
            let start = self.span();

            let Some(c) = self.current else {
                return Ok(self.spanned(Token::EndOfInput, start));
            };

            if c.is_whitespace() {
                self.skip_whitespace();
                continue;
            }

            if c == '#' {
                self.skip_comment();
                continue;
            }

            if c.is_alphabetic() || c == '_' {
                let text = self.scan_while(|c| c.is_alphanumeric() || c == '_');
                let token = match KEYWORDS.get(text) {
                    Some(&keyword) => keyword,
                    None => Token::Identifier(text),
                };

                return Ok(self.spanned(token, start));
            }

            // Only ASCII digits start a number, `f64` parsing accepts nothing else.
            if c.is_ascii_digit() || c == '.' {
                let text = self.scan_while(|c| c.is_ascii_digit() || c == '.');

                return match text.parse::<f64>() {
                    Ok(num) => Ok(self.spanned(Token::Number(num), start)),
                    Err(_) => Err(LexError::MalformedNumber {
                        text: text.to_string(),
                        span: start,
                    }),
                };
            }

            self.advance();

            if let Some(token) = Token::from_single_char(c) {
                return Ok(self.spanned(token, start));
            }

            if self.policy == UnknownCharPolicy::Reject {
                return Err(LexError::UnknownCharacter { ch: c, span: start });
            }
        }
    }
}

/// Yields every token including the terminal `EndOfInput`, then `None`.
/// Nothing further is yielded after an error.
impl<'src> Iterator for Lexer<'src> {
    type Item = Result<SpannedToken<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let next = self.next_token();

        self.done = match &next {
            Ok(t) => t.token == Token::EndOfInput,
            Err(_) => true,
        };

        Some(next)
    }
}

pub trait Lex {
    fn lex(&self) -> Lexer<'_>;
}

impl Lex for str {
    fn lex(&self) -> Lexer<'_> {
        Lexer::new(self)
    }
}
