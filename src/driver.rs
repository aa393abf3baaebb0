use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    cli::Cli,
    frontend::{
        ast::AstNode,
        diagnostic,
        lexer::Lexer,
        parse_program, parse_with,
        parser::ParserError,
    },
};

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("error: failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error: failed to write output: {0}")]
    Write(#[from] io::Error),

    // Already rendered against the source text, caret and all
    #[error("{rendered}")]
    Frontend {
        error: ParserError,
        rendered: String,
    },
}

impl DriverError {
    fn frontend(error: ParserError, src: &str) -> Self {
        let rendered = diagnostic::render(&error, src);
        DriverError::Frontend { error, rendered }
    }
}

pub fn run_file(path: &Path, cli: &Cli, out: &mut impl Write) -> Result<(), DriverError> {
    let src = fs::read_to_string(path).map_err(|source| DriverError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    run_src(&src, cli, out)
}

/// Lists tokens (when asked) and prints the parsed tree(s) for one source
/// text. The first lexing or parsing error stops everything.
pub fn run_src(src: &str, cli: &Cli, out: &mut impl Write) -> Result<(), DriverError> {
    if cli.tokens {
        writeln!(out, "Tokens:")?;

        for res in Lexer::with_policy(src, cli.policy()) {
            let spanned = res.map_err(|e| DriverError::frontend(e.into(), src))?;
            writeln!(out, "{:>6}  {:?}", spanned.span.to_string(), spanned.token)?;
        }
    }

    if cli.program {
        let program =
            parse_program(src, cli.policy()).map_err(|e| DriverError::frontend(e, src))?;

        for node in &program {
            print_node(node, cli, out)?;
        }
    } else {
        let def = parse_with(src, cli.policy()).map_err(|e| DriverError::frontend(e, src))?;
        print_node(&def, cli, out)?;
    }

    Ok(())
}

pub(crate) fn print_node(node: &AstNode, cli: &Cli, out: &mut impl Write) -> io::Result<()> {
    if cli.inspect_tree {
        writeln!(out, "{node:#?}")
    } else {
        writeln!(out, "{node}")
    }
}
