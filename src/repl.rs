use std::io::{self, BufRead, Write};

use crate::{
    cli::Cli,
    driver::print_node,
    frontend::{ast::AstNode, diagnostic, parse_program},
};

// Read-Parse-Print loop: every line is parsed on its own as a sequence of
// top-level forms and each resulting tree is printed. Nothing carries over
// from one line to the next.

fn describe(node: &AstNode) -> &'static str {
    match node {
        AstNode::FunctionDef { .. } => "Parsed a function definition.",
        AstNode::ExternDecl { .. } => "Parsed an extern.",
        _ => "Parsed a top-level expression.",
    }
}

pub fn ast_parser_driver(cli: &Cli, mut input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
    let mut input_buf = String::new();

    loop {
        write!(out, "Ready >> ")?;
        out.flush()?;

        input_buf.clear();
        if input.read_line(&mut input_buf)? == 0 {
            writeln!(out)?;
            return Ok(());
        }

        let line = input_buf.trim_end();

        match parse_program(line, cli.policy()) {
            Ok(program) => {
                for node in &program {
                    writeln!(out, "{}", describe(node))?;
                    print_node(node, cli, out)?;
                }
            }
            Err(err) => writeln!(out, "{}", diagnostic::render(&err, line))?,
        }
    }
}
