use std::fmt;

use crate::interpreter::RuntimeError;
use crate::parser::ParseError;
use crate::scanner::token::TokenType;
use crate::scanner::ScanError;

/// Which pipeline stage detected the failure. Lexical and syntax entries are
/// compile-time; runtime entries are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lexical,
    Syntax,
    Runtime,
}

/// The offending lexeme, or the end of input.
#[derive(Debug, Clone)]
pub enum Location {
    Lexeme(String),
    End,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub stage: Stage,
    pub line: usize,
    pub location: Option<Location>,
    pub message: String,
}

impl Diagnostic {
    pub fn is_compile_time(&self) -> bool {
        matches!(self.stage, Stage::Lexical | Stage::Syntax)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.stage {
            Stage::Lexical | Stage::Syntax => {
                let location = match &self.location {
                    Some(Location::Lexeme(lexeme)) => format!(" at '{}'", lexeme),
                    Some(Location::End) => " at end".to_string(),
                    None => String::new(),
                };
                write!(f, "[line {}] error{}: {}", self.line, location, self.message)
            }
            Stage::Runtime => write!(f, "{}\n[line {}]", self.message, self.line),
        }
    }
}

impl From<&ScanError> for Diagnostic {
    fn from(e: &ScanError) -> Self {
        Diagnostic {
            stage: Stage::Lexical,
            line: e.line,
            location: None,
            message: e.message.clone(),
        }
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(e: &ParseError) -> Self {
        let location = match e.token.token_type {
            TokenType::Eof => Location::End,
            _ => Location::Lexeme(e.token.lexeme.clone()),
        };
        Diagnostic {
            stage: Stage::Syntax,
            line: e.token.line,
            location: Some(location),
            message: e.message.clone(),
        }
    }
}

impl From<&RuntimeError> for Diagnostic {
    fn from(e: &RuntimeError) -> Self {
        Diagnostic {
            stage: Stage::Runtime,
            line: e.token.line,
            location: None,
            message: e.message.clone(),
        }
    }
}

/// Append-only record of everything a run reported. Owned by the driver and
/// rebuilt per run, so REPL lines and tests can't leak state into each other.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn had_compile_error(&self) -> bool {
        self.entries.iter().any(Diagnostic::is_compile_time)
    }

    pub fn had_runtime_error(&self) -> bool {
        self.entries.iter().any(|d| d.stage == Stage::Runtime)
    }
}
