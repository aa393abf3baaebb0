#[macro_use]
extern crate lazy_static;

pub mod cli;
pub mod driver;
pub mod frontend;
pub mod repl;

pub use frontend::{parse, parse_program, tokenize};
