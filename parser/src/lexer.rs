//! Primary lexer for the nocap language. The lexer transforms text into
//! tokens (tokens are the input to the parser).
//!
//! The parser pulls tokens one at a time through [`TokenSource`]. After the
//! text is consumed, the lexer produces one synthetic newline, so that the
//! final statement does not need a trailing newline, and then produces
//! end-of-file forever.
use log::trace;
use logos::Logos;
use nocap_dsl::{
    core::{FileId, SourceSpan},
    diagnostic::{Diagnostic, Label},
};
use nocap_problems::Problem;

use crate::token::{LexicalError, Token, TokenType};

/// A pull interface over a stream of tokens.
///
/// Implementations must return an end-of-file token on every call after the
/// stream is exhausted.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Token, Diagnostic>;
}

enum State {
    Text,
    TrailingNewline,
    Finished,
}

pub struct Lexer<'source> {
    inner: logos::Lexer<'source, TokenType>,
    file_id: FileId,
    state: State,
    line: usize,
    line_start: usize,
    /// Byte offset where the text ended, once it has ended.
    end: usize,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str, file_id: &FileId) -> Self {
        Self {
            inner: TokenType::lexer(source),
            file_id: file_id.clone(),
            state: State::Text,
            line: 0,
            line_start: 0,
            end: 0,
        }
    }

    fn end_token(&self, token_type: TokenType) -> Token {
        Token {
            token_type,
            span: SourceSpan::range(self.end, self.end).with_file_id(&self.file_id),
            line: self.line,
            col: self.end - self.line_start,
            text: String::new(),
        }
    }

    fn error(&self, err: LexicalError) -> Diagnostic {
        let slice = self.inner.slice();
        let span = SourceSpan::range(self.inner.span().start, self.inner.span().end)
            .with_file_id(&self.file_id);
        let problem = match err {
            LexicalError::UnexpectedCharacter | LexicalError::ExpectedNotEqual => {
                Problem::UnexpectedCharacter
            }
            LexicalError::IllegalStringCharacter => Problem::IllegalStringCharacter,
            LexicalError::UnterminatedString => Problem::UnterminatedString,
            LexicalError::MalformedNumber => Problem::MalformedNumber,
        };
        let message = match err {
            LexicalError::ExpectedNotEqual => err.to_string(),
            _ => format!("{}: {}", err, slice),
        };
        Diagnostic::problem(problem, Label::span(&span, message))
    }
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> Result<Token, Diagnostic> {
        match self.state {
            State::Text => {}
            State::TrailingNewline => {
                self.state = State::Finished;
                return Ok(self.end_token(TokenType::Newline));
            }
            State::Finished => return Ok(self.end_token(TokenType::Eof)),
        }

        match self.inner.next() {
            Some(Ok(TokenType::Eof)) => {
                self.end = self.inner.span().start;
                self.state = State::TrailingNewline;
                self.next_token()
            }
            None => {
                self.end = self.inner.source().len();
                self.state = State::TrailingNewline;
                self.next_token()
            }
            Some(Ok(token_type)) => {
                let span = self.inner.span();
                let slice = self.inner.slice();
                let text = match token_type {
                    TokenType::String => slice[1..slice.len() - 1].to_string(),
                    _ => slice.to_string(),
                };
                let token = Token {
                    token_type,
                    span: SourceSpan::range(span.start, span.end).with_file_id(&self.file_id),
                    line: self.line,
                    col: span.start - self.line_start,
                    text,
                };

                if token_type == TokenType::Newline {
                    self.line += 1;
                    self.line_start = span.end;
                }

                trace!("{}", token);
                Ok(token)
            }
            Some(Err(err)) => Err(self.error(err)),
        }
    }
}

/// Tokenize a nocap program.
///
/// Returns every token up to, but not including, end-of-file. Stops at the
/// first lexical error.
pub fn tokenize(source: &str, file_id: &FileId) -> Result<Vec<Token>, Diagnostic> {
    let mut lexer = Lexer::new(source, file_id);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        if token.is_type(TokenType::Eof) {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}
