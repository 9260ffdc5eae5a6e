//! Implements capabilities to read source files from disk.
//!
//! This module handles source encodings.

use std::path::Path;

use log::{debug, trace};
use nocap_dsl::{
    core::FileId,
    diagnostic::{Diagnostic, Label},
};
use nocap_problems::Problem;

/// The contents of a source file.
#[derive(Debug)]
pub struct Source {
    file_id: FileId,
    data: String,
}

impl Source {
    pub fn new(source: String, file_id: &FileId) -> Self {
        Self {
            file_id: file_id.clone(),
            data: source,
        }
    }

    /// Reads the file at the path.
    pub fn try_from_path(path: &Path) -> Result<Source, Diagnostic> {
        read_file_content(path).map(|src| Source::new(src, &FileId::from_path(path)))
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }

    pub fn file_id(&self) -> &FileId {
        &self.file_id
    }
}

fn read_file_content(path: &Path) -> Result<String, Diagnostic> {
    debug!("Reading file {}", path.display());

    let bytes = std::fs::read(path).map_err(|e| {
        diagnostic(
            Problem::CannotReadFile,
            path,
            format!("Unable to read {}. {}", path.display(), e),
        )
    })?;

    // Programs are expected to be UTF-8 but older files are often latin1.
    // Windows-1252 maps every byte so it never fails as the fallback. Only a
    // UTF-8 byte order mark is honored; other marks are read as text.
    let (res, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(&bytes);
    if !had_errors {
        trace!("Path {} matched encoding UTF-8", path.display());
        return Ok(res.into_owned());
    }

    trace!(
        "Path {} did not match encoding UTF-8, decoding as windows-1252",
        path.display()
    );
    let (res, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(&bytes);
    Ok(res.into_owned())
}

fn diagnostic(problem: Problem, path: &Path, message: String) -> Diagnostic {
    Diagnostic::problem(problem, Label::file(FileId::from_path(path), message))
}

#[cfg(test)]
mod tests {
    use nocap_test::shared_resource_path;

    use super::*;

    #[test]
    fn try_from_path_when_utf8_then_ok() {
        let path = shared_resource_path("fibonacci.nc");
        let source = Source::try_from_path(&path).unwrap();

        assert!(source.as_str().starts_with("PRINT"));
        assert_eq!(&FileId::from_path(&path), source.file_id());
    }

    #[test]
    fn try_from_path_when_latin1_then_decoded() {
        let source = Source::try_from_path(&shared_resource_path("latin1.nc")).unwrap();
        assert_eq!("PRINT \"café\"\n", source.as_str());
    }

    #[test]
    fn try_from_path_when_binary_then_decoded_as_windows_1252() {
        let source = Source::try_from_path(&shared_resource_path("binary.nc")).unwrap();
        assert_eq!("\u{ff}\u{fe}\0\0\u{1}\u{2}", source.as_str());
    }

    #[test]
    fn try_from_path_when_utf8_bom_then_bom_removed() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"\xef\xbb\xbfPRINT 1\n").unwrap();

        let source = Source::try_from_path(file.path()).unwrap();
        assert_eq!("PRINT 1\n", source.as_str());
    }

    #[test]
    fn try_from_path_when_missing_then_err() {
        let err = Source::try_from_path(Path::new("test/file/doesnt/exist.nc")).unwrap_err();
        assert_eq!(Problem::CannotReadFile.code(), err.code);
    }
}
