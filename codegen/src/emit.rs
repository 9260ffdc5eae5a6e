//! Low-level C text emitter.
//!
//! Provides a builder that appends text to two regions. The header region
//! holds the include, the opening of `main` and variable declarations. The
//! body region holds the statements. The final translation unit is the
//! header followed by the body.

use std::{fs, path::Path};

use log::trace;
use nocap_dsl::{
    core::FileId,
    diagnostic::{Diagnostic, Label},
};
use nocap_problems::Problem;

/// Accumulates C source text.
#[derive(Debug, Default)]
pub struct Emitter {
    header: String,
    code: String,
}

impl Emitter {
    pub fn new() -> Self {
        Emitter {
            header: String::new(),
            code: String::new(),
        }
    }

    /// Appends text to the body region.
    pub fn emit(&mut self, code: &str) {
        trace!("emit {:?}", code);
        self.code.push_str(code);
    }

    /// Appends text and a newline to the body region.
    pub fn emit_line(&mut self, code: &str) {
        trace!("emit_line {:?}", code);
        self.code.push_str(code);
        self.code.push('\n');
    }

    /// Appends text to the header region.
    pub fn header(&mut self, code: &str) {
        trace!("header {:?}", code);
        self.header.push_str(code);
    }

    /// Appends text and a newline to the header region.
    pub fn header_line(&mut self, code: &str) {
        trace!("header_line {:?}", code);
        self.header.push_str(code);
        self.header.push('\n');
    }

    /// Returns the translation unit: the header region then the body region.
    pub fn code(&self) -> String {
        let mut out = String::with_capacity(self.header.len() + self.code.len());
        out.push_str(&self.header);
        out.push_str(&self.code);
        out
    }

    /// Writes the translation unit to the path.
    pub fn write_file(&self, path: &Path) -> Result<(), Diagnostic> {
        fs::write(path, self.code()).map_err(|e| {
            Diagnostic::problem(
                Problem::CannotWriteFile,
                Label::file(
                    FileId::from_path(path),
                    format!("Unable to write {}. {}", path.display(), e),
                ),
            )
        })
    }
}
