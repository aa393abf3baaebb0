use std::fmt;

use itertools::Itertools;

use crate::frontend::lexer::Ops;

// Enum dispatch, every node owns its children outright. Names borrow
// from the source text so nothing is copied out of it.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode<'src> {
    NumberLiteral(f64),
    Identifier(&'src str),
    BinaryOp {
        left: Box<AstNode<'src>>,
        op: Ops,
        right: Box<AstNode<'src>>,
    },
    FunctionCall {
        name: &'src str,
        args: Vec<AstNode<'src>>,
    },
    FunctionDef {
        name: &'src str,
        params: Vec<&'src str>,
        body: Box<AstNode<'src>>,
    },
    IfExpr {
        condition: Box<AstNode<'src>>,
        then_branch: Box<AstNode<'src>>,
        else_branch: Box<AstNode<'src>>,
    },
    ExternDecl {
        name: &'src str,
        params: Vec<&'src str>,
    },
}

/// Every top-level form of a source text, in order.
pub type Program<'src> = Vec<AstNode<'src>>;

impl<'src> AstNode<'src> {
    pub fn binary(left: AstNode<'src>, op: Ops, right: AstNode<'src>) -> Self {
        AstNode::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn if_expr(
        condition: AstNode<'src>,
        then_branch: AstNode<'src>,
        else_branch: AstNode<'src>,
    ) -> Self {
        AstNode::IfExpr {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }
}

// Compact one-line rendering used by the REPL and the CLI, e.g.
// `FunctionDef(add, [a, b], BinaryOp(Identifier(a), +, Identifier(b)))`
impl<'src> fmt::Display for AstNode<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::NumberLiteral(num) => write!(f, "Number({num})"),
            AstNode::Identifier(name) => write!(f, "Identifier({name})"),
            AstNode::BinaryOp { left, op, right } => {
                write!(f, "BinaryOp({left}, {op}, {right})")
            }
            AstNode::FunctionCall { name, args } => {
                write!(f, "FunctionCall({name}, [{}])", args.iter().join(", "))
            }
            AstNode::FunctionDef { name, params, body } => {
                write!(
                    f,
                    "FunctionDef({name}, [{}], {body})",
                    params.iter().join(", ")
                )
            }
            AstNode::IfExpr {
                condition,
                then_branch,
                else_branch,
            } => write!(f, "IfExpr({condition}, {then_branch}, {else_branch})"),
            AstNode::ExternDecl { name, params } => {
                write!(f, "ExternDecl({name}, [{}])", params.iter().join(", "))
            }
        }
    }
}
