//! Primary parser for the nocap language. The parser checks the token
//! stream against the grammar and emits C as each rule is recognized.
//!
//! Rules in the parser map 1:1 to the production rules of the grammar:
//!
//! ```text
//! program    ::= {statement}
//! statement  ::= "PRINT" (expression | string) nl
//!              | "IF" comparison "THEN" nl {statement} "ENDIF" nl
//!              | "WHILE" comparison "DO" nl {statement} "ENDWHILE" nl
//!              | "LABEL" ident nl
//!              | "GOTO" ident nl
//!              | "LET" ident "=" expression nl
//!              | "INPUT" ident nl
//! comparison ::= expression (("==" | "!=" | ">" | ">=" | "<" | "<=") expression)+
//! expression ::= term {( "-" | "+" ) term}
//! term       ::= unary {( "/" | "*" ) unary}
//! unary      ::= ["+" | "-"] primary
//! primary    ::= number | ident
//! nl         ::= '\n'+
//! ```
//!
//! Variables must be assigned before they are read and that is checked as
//! soon as the read is seen. Labels may be the target of a GOTO before they
//! are declared, so GOTO targets are only checked once the whole program is
//! parsed.
use std::collections::{BTreeMap, HashMap, HashSet};

use log::debug;
use nocap_codegen::Emitter;
use nocap_dsl::{
    core::SourceSpan,
    diagnostic::{Diagnostic, Label},
};
use nocap_problems::Problem;

use crate::lexer::TokenSource;
use crate::token::{Token, TokenType};

pub struct Parser<'a, S: TokenSource> {
    tokens: S,
    emitter: &'a mut Emitter,

    /// Variables assigned so far.
    symbols: HashSet<String>,
    /// Labels declared so far and where.
    labels_declared: HashMap<String, SourceSpan>,
    /// Labels that are GOTO targets and where each was first referenced.
    labels_gotoed: BTreeMap<String, SourceSpan>,

    current: Token,
    peek: Token,
}

impl<'a, S: TokenSource> Parser<'a, S> {
    /// Creates a parser that reads from the token source and writes to the
    /// emitter. Pulls the first two tokens.
    pub fn new(mut tokens: S, emitter: &'a mut Emitter) -> Result<Self, Diagnostic> {
        let current = tokens.next_token()?;
        let peek = tokens.next_token()?;
        Ok(Self {
            tokens,
            emitter,
            symbols: HashSet::new(),
            labels_declared: HashMap::new(),
            labels_gotoed: BTreeMap::new(),
            current,
            peek,
        })
    }

    /// Returns true if the current token is of the type.
    pub fn current_matches(&self, token_type: TokenType) -> bool {
        self.current.is_type(token_type)
    }

    /// Returns true if the token after the current token is of the type.
    pub fn peek_matches(&self, token_type: TokenType) -> bool {
        self.peek.is_type(token_type)
    }

    /// Moves the lookahead window one token forward.
    fn advance(&mut self) -> Result<(), Diagnostic> {
        let next = self.tokens.next_token()?;
        self.current = std::mem::replace(&mut self.peek, next);
        Ok(())
    }

    /// Consumes the current token if it is of the type, otherwise fails.
    fn expect(&mut self, token_type: TokenType) -> Result<(), Diagnostic> {
        if !self.current_matches(token_type) {
            return Err(self.error(
                Problem::SyntaxError,
                format!("Expected {}, got {}", token_type, self.current.token_type),
            ));
        }
        self.advance()
    }

    /// Consumes an identifier and returns it.
    fn expect_identifier(&mut self) -> Result<Token, Diagnostic> {
        let ident = self.current.clone();
        self.expect(TokenType::Identifier)?;
        Ok(ident)
    }

    fn error(&self, problem: Problem, message: String) -> Diagnostic {
        Diagnostic::problem(problem, Label::span(&self.current.span, message))
    }

    /// Declares the variable storage the first time a name is assigned.
    fn declare_variable(&mut self, name: &str) {
        if self.symbols.insert(name.to_string()) {
            debug!("Declaring variable {}", name);
            self.emitter.header_line(&format!("float {};", name));
        }
    }

    // program ::= {statement}
    pub fn program(&mut self) -> Result<(), Diagnostic> {
        self.emitter.header_line("#include <stdio.h>");
        self.emitter.header_line("int main(void) {");

        while self.current_matches(TokenType::Newline) {
            self.advance()?;
        }

        while !self.current_matches(TokenType::Eof) {
            self.statement()?;
        }

        self.emitter.emit_line("return 0;");
        self.emitter.emit_line("}");

        for (label, span) in &self.labels_gotoed {
            if !self.labels_declared.contains_key(label) {
                return Err(Diagnostic::problem(
                    Problem::GotoUndeclaredLabel,
                    Label::span(
                        span,
                        format!("Attempting to GOTO to undeclared label: {}", label),
                    ),
                ));
            }
        }

        Ok(())
    }

    fn statement(&mut self) -> Result<(), Diagnostic> {
        match self.current.token_type {
            // "PRINT" (expression | string)
            TokenType::Print => {
                self.advance()?;

                if self.current_matches(TokenType::String) {
                    self.emitter
                        .emit_line(&format!("printf(\"{}\\n\");", self.current.text));
                    self.advance()?;
                } else {
                    self.emitter.emit("printf(\"%.2f\\n\", (float)(");
                    self.expression()?;
                    self.emitter.emit_line("));");
                }
            }
            // "IF" comparison "THEN" nl {statement} "ENDIF"
            TokenType::If => {
                self.advance()?;
                self.emitter.emit("if (");
                self.comparison()?;

                self.expect(TokenType::Then)?;
                self.nl()?;
                self.emitter.emit_line(") {");

                while !self.current_matches(TokenType::EndIf) {
                    self.statement()?;
                }

                self.expect(TokenType::EndIf)?;
                self.emitter.emit_line("}");
            }
            // "WHILE" comparison "DO" nl {statement} "ENDWHILE"
            TokenType::While => {
                self.advance()?;
                self.emitter.emit("while (");
                self.comparison()?;

                self.expect(TokenType::Do)?;
                self.nl()?;
                self.emitter.emit_line(") {");

                while !self.current_matches(TokenType::EndWhile) {
                    self.statement()?;
                }

                self.expect(TokenType::EndWhile)?;
                self.emitter.emit_line("}");
            }
            // "LABEL" ident
            TokenType::Label => {
                self.advance()?;
                let ident = self.expect_identifier()?;

                if let Some(first) = self.labels_declared.get(&ident.text) {
                    return Err(Diagnostic::problem(
                        Problem::LabelAlreadyExists,
                        Label::span(&ident.span, format!("Label already exists: {}", ident.text)),
                    )
                    .with_secondary(Label::span(first, "First declared here")));
                }
                self.labels_declared
                    .insert(ident.text.clone(), ident.span.clone());

                self.emitter.emit_line(&format!("{}:", ident.text));
            }
            // "GOTO" ident
            TokenType::Goto => {
                self.advance()?;
                let ident = self.expect_identifier()?;

                self.labels_gotoed
                    .entry(ident.text.clone())
                    .or_insert_with(|| ident.span.clone());
                self.emitter.emit_line(&format!("goto {};", ident.text));
            }
            // "LET" ident "=" expression
            TokenType::Let => {
                self.advance()?;
                let ident = self.expect_identifier()?;
                self.expect(TokenType::Eq)?;

                self.declare_variable(&ident.text);
                self.emitter.emit(&format!("{} = ", ident.text));
                self.expression()?;
                self.emitter.emit_line(";");
            }
            // "INPUT" ident
            TokenType::Input => {
                self.advance()?;
                let ident = self.expect_identifier()?;
                let name = &ident.text;

                self.declare_variable(name);

                // A failed read, including end of input, zeroes the variable
                // and discards the rest of the input line.
                self.emitter
                    .emit_line(&format!("if (1 != scanf(\"%f\", &{})) {{", name));
                self.emitter.emit_line(&format!("{} = 0;", name));
                self.emitter.emit_line("scanf(\"%*[^\\n]\");");
                self.emitter.emit_line("}");
            }
            _ => {
                return Err(self.error(
                    Problem::InvalidStatement,
                    format!(
                        "Invalid statement at {} ({})",
                        self.current.text.escape_debug(),
                        self.current.token_type
                    ),
                ));
            }
        }

        self.nl()
    }

    // comparison ::= expression (("==" | "!=" | ">" | ">=" | "<" | "<=") expression)+
    fn comparison(&mut self) -> Result<(), Diagnostic> {
        self.expression()?;

        if !self.current.token_type.is_comparison_operator() {
            return Err(self.error(
                Problem::ExpectedComparisonOperator,
                format!(
                    "Expected comparison operator at: {}",
                    self.current.text.escape_debug()
                ),
            ));
        }

        while self.current.token_type.is_comparison_operator() {
            self.emitter.emit(&self.current.text);
            self.advance()?;
            self.expression()?;
        }

        Ok(())
    }

    // expression ::= term {( "-" | "+" ) term}
    fn expression(&mut self) -> Result<(), Diagnostic> {
        self.term()?;

        while self.current_matches(TokenType::Plus) || self.current_matches(TokenType::Minus) {
            self.emitter.emit(&self.current.text);
            self.advance()?;

            // A sign right after the operator would otherwise fuse into C's
            // `++` or `--`.
            if self.current_matches(TokenType::Plus) || self.current_matches(TokenType::Minus) {
                self.emitter.emit(" ");
            }
            self.term()?;
        }

        Ok(())
    }

    // term ::= unary {( "/" | "*" ) unary}
    fn term(&mut self) -> Result<(), Diagnostic> {
        self.unary()?;

        while self.current_matches(TokenType::Asterisk) || self.current_matches(TokenType::Slash)
        {
            self.emitter.emit(&self.current.text);
            self.advance()?;
            self.unary()?;
        }

        Ok(())
    }

    // unary ::= ["+" | "-"] primary
    fn unary(&mut self) -> Result<(), Diagnostic> {
        if self.current_matches(TokenType::Plus) || self.current_matches(TokenType::Minus) {
            self.emitter.emit(&self.current.text);
            self.advance()?;
        }
        self.primary()
    }

    // primary ::= number | ident
    fn primary(&mut self) -> Result<(), Diagnostic> {
        match self.current.token_type {
            TokenType::Number => {
                self.emitter.emit(decimal_literal(&self.current.text));
                return self.advance();
            }
            TokenType::Identifier => {
                if !self.symbols.contains(&self.current.text) {
                    return Err(self.error(
                        Problem::VariableBeforeAssignment,
                        format!(
                            "Referencing variable before assignment: {}",
                            self.current.text
                        ),
                    ));
                }
            }
            _ => {
                return Err(self.error(
                    Problem::UnexpectedToken,
                    format!("Unexpected token at {}", self.current.text.escape_debug()),
                ));
            }
        }

        self.emitter.emit(&self.current.text);
        self.advance()
    }

    // nl ::= '\n'+
    fn nl(&mut self) -> Result<(), Diagnostic> {
        self.expect(TokenType::Newline)?;

        while self.current_matches(TokenType::Newline) {
            self.advance()?;
        }

        Ok(())
    }
}

/// Removes leading zeros from a number so that C does not read it as octal.
fn decimal_literal(text: &str) -> &str {
    let trimmed = text.trim_start_matches('0');
    if trimmed.is_empty() || trimmed.starts_with('.') {
        // Keep one zero before the point or for zero itself.
        &text[text.len() - trimmed.len() - 1..]
    } else {
        trimmed
    }
}
