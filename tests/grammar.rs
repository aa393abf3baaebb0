//! End-to-end checks of `tokenize`, `parse` and `parse_program` against
//! hand-derived trees.

use std::fs;

use kaleidparse::frontend::{
    ast::AstNode::{self, *},
    lexer::{LexError, Ops::*, Token, TokenKind, UnknownCharPolicy},
    parse, parse_program, parse_with,
    parser::ParserError,
    tokenize,
};
use rstest::rstest;

fn def<'a>(name: &'a str, params: Vec<&'a str>, body: AstNode<'a>) -> AstNode<'a> {
    FunctionDef {
        name,
        params,
        body: Box::new(body),
    }
}

fn num(value: f64) -> AstNode<'static> {
    NumberLiteral(value)
}

#[test]
fn add_definition() {
    assert_eq!(
        parse("def add(a,b) a+b"),
        Ok(def(
            "add",
            vec!["a", "b"],
            AstNode::binary(Identifier("a"), Plus, Identifier("b"))
        ))
    );
}

#[test]
fn operators_share_one_precedence_level() {
    assert_eq!(
        parse("def f() 2+3*4"),
        Ok(def(
            "f",
            vec![],
            AstNode::binary(AstNode::binary(num(2.0), Plus, num(3.0)), Mult, num(4.0))
        ))
    );
}

#[test]
fn nested_else_if_needs_no_parentheses() {
    assert_eq!(
        parse("def f(x) if x then 1 else if x then 2 else 3"),
        Ok(def(
            "f",
            vec!["x"],
            AstNode::if_expr(
                Identifier("x"),
                num(1.0),
                AstNode::if_expr(Identifier("x"), num(2.0), num(3.0)),
            )
        ))
    );
}

#[test]
fn zero_argument_calls() {
    assert_eq!(
        tokenize("f()"),
        Ok(vec![
            Token::Identifier("f"),
            Token::LParen,
            Token::RParen,
            Token::EndOfInput
        ])
    );

    assert_eq!(
        parse("def g() f()"),
        Ok(def(
            "g",
            vec![],
            FunctionCall {
                name: "f",
                args: vec![]
            }
        ))
    );
}

#[test]
fn comments_vanish() {
    assert_eq!(
        tokenize("1 # comment\n2"),
        Ok(vec![
            Token::Number(1.0),
            Token::Number(2.0),
            Token::EndOfInput
        ])
    );
}

#[test]
fn calls_take_arbitrary_expressions() {
    assert_eq!(
        parse("def h(x) g(x * 2, if x then 1 else 0, (x))"),
        Ok(def(
            "h",
            vec!["x"],
            FunctionCall {
                name: "g",
                args: vec![
                    AstNode::binary(Identifier("x"), Mult, num(2.0)),
                    AstNode::if_expr(Identifier("x"), num(1.0), num(0.0)),
                    Identifier("x"),
                ],
            }
        ))
    );
}

#[rstest]
#[case::unclosed_paren("def f(x) (x + 1", TokenKind::RParen, TokenKind::EndOfInput)]
#[case::params_without_comma("def f(x y) x", TokenKind::RParen, TokenKind::Identifier)]
#[case::missing_then("def f(x) if x 1 else 2", TokenKind::Then, TokenKind::Number)]
#[case::missing_else("def f(x) if x then 1", TokenKind::Else, TokenKind::EndOfInput)]
#[case::missing_def("f(x) x", TokenKind::Def, TokenKind::Identifier)]
#[case::missing_name("def (x) x", TokenKind::Identifier, TokenKind::LParen)]
#[case::unclosed_call("def f(x) g(x, 1", TokenKind::RParen, TokenKind::EndOfInput)]
#[case::number_param("def f(1) 1", TokenKind::RParen, TokenKind::Number)]
fn syntax_errors_name_the_expected_kind(
    #[case] src: &str,
    #[case] expected: TokenKind,
    #[case] found: TokenKind,
) {
    match parse(src) {
        Err(ParserError::UnexpectedToken {
            expected: e,
            found: f,
            ..
        }) => {
            assert_eq!(e, expected);
            assert_eq!(f, found);
        }
        other => panic!("expected a syntax error for {src:?}, got {other:?}"),
    }
}

#[rstest]
#[case::empty_body("def f(x)")]
#[case::dangling_operator("def f(x) x +")]
#[case::operator_first("def f(x) * x")]
#[case::empty_parens("def f(x) ()")]
fn missing_factor_is_an_error(#[case] src: &str) {
    assert!(matches!(parse(src), Err(ParserError::ExpectedFactor { .. })));
}

#[rstest]
#[case::two_dots("def f() 1.2.3")]
#[case::lone_dot("def f() .")]
fn malformed_numbers_are_rejected(#[case] src: &str) {
    assert!(matches!(
        parse(src),
        Err(ParserError::Lex(LexError::MalformedNumber { .. }))
    ));
}

#[test]
fn unknown_characters_follow_the_policy() {
    let src = "def f(x) x ! ";

    assert!(matches!(
        parse(src),
        Err(ParserError::Lex(LexError::UnknownCharacter { ch: '!', .. }))
    ));
    assert_eq!(
        parse_with(src, UnknownCharPolicy::Skip),
        Ok(def("f", vec!["x"], Identifier("x")))
    );
}

#[test]
fn trailing_input_is_ignored_by_parse() {
    assert_eq!(
        parse("def id(x) x\nid(40)"),
        Ok(def("id", vec!["x"], Identifier("x")))
    );
}

#[test]
fn repeated_runs_agree() {
    let src = "def f(a, b) if a then f(b, a - 1) else b * 2 # done";

    assert_eq!(tokenize(src), tokenize(src));
    assert_eq!(parse(src), parse(src));
}

#[test]
fn deep_nesting_is_not_capped() {
    let depth = 200;
    let src = format!("def f() {}1{}", "(".repeat(depth), ")".repeat(depth));

    assert_eq!(parse(&src), Ok(def("f", vec![], num(1.0))));
}

#[test]
fn fib_demo_program() {
    let src = fs::read_to_string("demos/fib.ks").expect("Failed to read demo file");
    let program = parse_program(&src, UnknownCharPolicy::Reject).expect("Parsing failed");

    assert_eq!(program.len(), 3);
    assert_eq!(
        program[0],
        ExternDecl {
            name: "printd",
            params: vec!["x"]
        }
    );
    assert!(matches!(program[1], FunctionDef { name: "fib", .. }));
    assert_eq!(
        program[2].to_string(),
        "FunctionCall(printd, [FunctionCall(fib, [Number(10)])])"
    );
}

#[test]
fn tokenize_rejects_unknown_characters_by_default() {
    assert!(matches!(
        tokenize("a < b"),
        Err(LexError::UnknownCharacter { ch: '<', .. })
    ));
    assert_eq!(
        kaleidparse::frontend::tokenize_with("a < b", UnknownCharPolicy::Skip),
        Ok(vec![
            Token::Identifier("a"),
            Token::Identifier("b"),
            Token::EndOfInput
        ])
    );
}
