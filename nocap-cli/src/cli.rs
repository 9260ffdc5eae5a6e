//! Implements the command line behavior.

use codespan_reporting::{
    diagnostic::{Diagnostic, Label, LabelStyle, Severity},
    files::SimpleFiles,
    term::{
        self,
        termcolor::{ColorChoice, StandardStream},
    },
};
use log::debug;
use nocap_parser::{compile_program, tokenize_program};
use serde_json::json;
use std::path::Path;

use crate::source::Source;

/// Name of the output file when none is given.
pub const DEFAULT_OUTPUT: &str = "out.c";

/// Compiles the file and writes the C translation unit to the output path.
pub fn compile(path: &Path, output: &Path, annotate: bool) -> Result<(), String> {
    let source = read(path, annotate)?;
    let emitter = compile_program(source.as_str(), source.file_id())
        .map_err(|err| handle_diagnostic(err, Some(&source), annotate))?;

    debug!("Writing {}", output.display());
    emitter
        .write_file(output)
        .map_err(|err| handle_diagnostic(err, None, annotate))
}

/// Checks that the file compiles without writing any output.
pub fn check(path: &Path, annotate: bool) -> Result<(), String> {
    let source = read(path, annotate)?;
    compile_program(source.as_str(), source.file_id())
        .map_err(|err| handle_diagnostic(err, Some(&source), annotate))?;

    println!("OK");
    Ok(())
}

/// Prints the tokens of the file, one per line or as a JSON array.
pub fn tokenize(path: &Path, as_json: bool) -> Result<(), String> {
    let source = read(path, false)?;
    let tokens = tokenize_program(source.as_str(), source.file_id())
        .map_err(|err| handle_diagnostic(err, Some(&source), false))?;

    if as_json {
        let values: Vec<_> = tokens
            .iter()
            .map(|tok| {
                json!({
                    "type": tok.token_type.describe(),
                    "text": tok.text,
                    "line": tok.line,
                    "col": tok.col,
                    "start": tok.span.start,
                    "end": tok.span.end,
                })
            })
            .collect();
        let out = serde_json::to_string_pretty(&values).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        for token in tokens {
            println!("{}", token.describe());
        }
    }

    Ok(())
}

fn read(path: &Path, annotate: bool) -> Result<Source, String> {
    Source::try_from_path(path).map_err(|err| handle_diagnostic(err, None, annotate))
}

/// Optionally renders the diagnostic with source context and returns the
/// single line error message.
fn handle_diagnostic(
    diagnostic: nocap_dsl::diagnostic::Diagnostic,
    source: Option<&Source>,
    annotate: bool,
) -> String {
    let message = diagnostic.to_string();

    if annotate {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = term::Config::default();

        let mut files: SimpleFiles<String, &str> = SimpleFiles::new();
        let file = match source {
            Some(src) => files.add(src.file_id().to_string(), src.as_str()),
            None => files.add(diagnostic.primary.file_id.to_string(), ""),
        };

        let diagnostic = map_diagnostic(diagnostic, file);
        let _ = term::emit(&mut writer.lock(), &config, &files, &diagnostic).map_err(|err| {
            eprintln!("Failed writing to terminal: {}", err);
        });
    }

    message
}

fn map_label(
    label: nocap_dsl::diagnostic::Label,
    style: LabelStyle,
    file: usize,
) -> Label<usize> {
    Label::new(style, file, label.location.range()).with_message(label.message)
}

fn map_diagnostic(
    diagnostic: nocap_dsl::diagnostic::Diagnostic,
    file: usize,
) -> Diagnostic<usize> {
    let description = diagnostic.description().to_string();

    let mut labels = vec![map_label(diagnostic.primary, LabelStyle::Primary, file)];
    labels.extend(
        diagnostic
            .secondary
            .into_iter()
            .map(|lbl| map_label(lbl, LabelStyle::Secondary, file)),
    );

    Diagnostic::new(Severity::Error)
        .with_code(diagnostic.code)
        .with_message(description)
        .with_labels(labels)
}
