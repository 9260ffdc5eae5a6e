//! Provides definitions of tokens for the nocap language.
use core::fmt;

use logos::{Lexer, Logos};
use nocap_dsl::core::SourceSpan;
use thiserror::Error;

/// Errors the lexer reports for text that is not a token.
///
/// The lexer follows the message with the offending text, except for
/// [`LexicalError::ExpectedNotEqual`] which is complete on its own.
#[derive(Clone, Debug, Default, Error, PartialEq)]
pub enum LexicalError {
    #[default]
    #[error("Unknown token")]
    UnexpectedCharacter,
    #[error("Expected !=, got !")]
    ExpectedNotEqual,
    #[error("Illegal character in string")]
    IllegalStringCharacter,
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Illegal character in number")]
    MalformedNumber,
}

/// Validates a string literal. The regex accepts an unterminated string so
/// that the error can say so.
fn string_callback(lex: &mut Lexer<TokenType>) -> Result<(), LexicalError> {
    let slice = lex.slice();
    if slice.len() < 2 || !slice.ends_with('"') {
        return Err(LexicalError::UnterminatedString);
    }
    if slice[1..slice.len() - 1]
        .chars()
        .any(|c| matches!(c, '\r' | '\t' | '\\' | '%'))
    {
        return Err(LexicalError::IllegalStringCharacter);
    }
    Ok(())
}

fn malformed_number(_lex: &mut Lexer<TokenType>) -> Result<(), LexicalError> {
    Err(LexicalError::MalformedNumber)
}

fn lone_bang(_lex: &mut Lexer<TokenType>) -> Result<(), LexicalError> {
    Err(LexicalError::ExpectedNotEqual)
}

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[logos(error = LexicalError)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"#[^\n]*")]
pub enum TokenType {
    /// End of the token stream. A NUL character also ends the text. The
    /// lexer keeps producing this once the text is consumed.
    #[token("\0")]
    Eof,

    #[token("\n")]
    Newline,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    #[regex(r"[0-9]+\.", malformed_number)]
    Number,

    #[regex(r"[A-Za-z][A-Za-z0-9_]*")]
    Identifier,

    #[regex("\"[^\"\n\x00]*\"?", string_callback)]
    String,

    // Keywords
    #[token("LABEL")]
    Label,
    #[token("GOTO")]
    Goto,
    #[token("PRINT")]
    #[token("YAP")]
    Print,
    #[token("INPUT")]
    #[token("PREACH")]
    Input,
    #[token("LET")]
    #[token("NOCAP")]
    Let,
    #[token("IF")]
    If,
    #[token("THEN")]
    Then,
    #[token("ENDIF")]
    EndIf,
    #[token("WHILE")]
    #[token("COOKING")]
    While,
    #[token("DO")]
    #[token("RUNITBACK")]
    Do,
    #[token("ENDWHILE")]
    #[token("COOKED")]
    EndWhile,

    // Operators
    #[token("=")]
    Eq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("==")]
    EqEq,
    #[token("!=")]
    #[token("!", lone_bang)]
    NotEq,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEq,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEq,
}

impl TokenType {
    /// Returns the name of the token type as used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenType::Eof => "EOF",
            TokenType::Newline => "NEWLINE",
            TokenType::Number => "NUMBER",
            TokenType::Identifier => "IDENT",
            TokenType::String => "STRING",
            TokenType::Label => "LABEL",
            TokenType::Goto => "GOTO",
            TokenType::Print => "PRINT",
            TokenType::Input => "INPUT",
            TokenType::Let => "LET",
            TokenType::If => "IF",
            TokenType::Then => "THEN",
            TokenType::EndIf => "ENDIF",
            TokenType::While => "WHILE",
            TokenType::Do => "DO",
            TokenType::EndWhile => "ENDWHILE",
            TokenType::Eq => "EQ",
            TokenType::Plus => "PLUS",
            TokenType::Minus => "MINUS",
            TokenType::Asterisk => "ASTERISK",
            TokenType::Slash => "SLASH",
            TokenType::EqEq => "EQEQ",
            TokenType::NotEq => "NOTEQ",
            TokenType::Less => "LT",
            TokenType::LessEq => "LTEQ",
            TokenType::Greater => "GT",
            TokenType::GreaterEq => "GTEQ",
        }
    }

    /// Returns true if the token type is one of the comparison operators.
    pub fn is_comparison_operator(&self) -> bool {
        matches!(
            self,
            TokenType::EqEq
                | TokenType::NotEq
                | TokenType::Less
                | TokenType::LessEq
                | TokenType::Greater
                | TokenType::GreaterEq
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token produced by the lexer.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub span: SourceSpan,
    /// The line of the token (0-indexed).
    pub line: usize,
    /// The column of the token (0-indexed).
    pub col: usize,
    /// The lexeme. String tokens hold the text between the quotes.
    pub text: String,
}

impl Token {
    pub fn is_type(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }

    pub fn describe(&self) -> String {
        format!(
            "Type: {}, Value: '{}', At: Ln {},Col {}",
            self.token_type,
            self.text.escape_debug(),
            self.line,
            self.col
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
