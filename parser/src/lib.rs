// Allow large errors because this is a compiler - we expect large errors.
#![allow(clippy::result_large_err)]

mod lexer;
mod parser;
pub mod token;


use log::debug;
use nocap_codegen::Emitter;
use nocap_dsl::{core::FileId, diagnostic::Diagnostic};

pub use crate::lexer::{Lexer, TokenSource};
pub use crate::parser::Parser;
use crate::token::Token;

/// Tokenize a nocap program.
///
/// Returns the tokens up to end-of-file, including the newline that the
/// lexer adds after the last line, or the first lexical error.
pub fn tokenize_program(source: &str, file_id: &FileId) -> Result<Vec<Token>, Diagnostic> {
    lexer::tokenize(source, file_id)
}

/// Compiles a full nocap program into a C translation unit.
///
/// Returns the emitter holding the translation unit. Compilation stops at
/// the first error and nothing is returned for a program with an error.
pub fn compile_program(source: &str, file_id: &FileId) -> Result<Emitter, Diagnostic> {
    debug!("Compiling {}", file_id);

    let mut emitter = Emitter::new();
    {
        let mut parser = Parser::new(Lexer::new(source, file_id), &mut emitter)?;
        parser.program()?;
    }

    Ok(emitter)
}
