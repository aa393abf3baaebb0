use std::path::PathBuf;

use clap::Parser;

use crate::frontend::lexer::UnknownCharPolicy;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// A positional file containing Kaleidoscope code to parse, if not given, starts interpreter instead
    pub file: Option<PathBuf>,

    /// Print the token listing before parsing
    #[arg(long)]
    pub tokens: bool,

    /// Parse every top-level definition, extern and expression instead of a single definition
    #[arg(long)]
    pub program: bool,

    /// Silently drop characters outside the language instead of reporting them
    #[arg(long)]
    pub permissive: bool,

    /// Print the Debug representation of the AST instead of the compact form
    #[arg(long)]
    pub inspect_tree: bool,
}

impl Cli {
    pub fn policy(&self) -> UnknownCharPolicy {
        if self.permissive {
            UnknownCharPolicy::Skip
        } else {
            UnknownCharPolicy::Reject
        }
    }
}
