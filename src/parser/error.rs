use crate::ast::Location;
use thiserror::Error;

/// Errors produced while parsing Java source
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token at line {line}, column {column}: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },

    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEndOfInput { expected: String },

    #[error("Invalid syntax at line {line}, column {column}: {message}")]
    InvalidSyntax {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Lexical error: {message}")]
    LexicalError { message: String },
}

impl ParseError {
    pub fn unexpected_token(
        expected: impl Into<String>,
        found: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            line: location.line,
            column: location.column,
        }
    }

    pub fn unexpected_end_of_input(expected: impl Into<String>) -> Self {
        Self::UnexpectedEndOfInput { expected: expected.into() }
    }

    pub fn invalid_syntax(message: impl Into<String>, location: Location) -> Self {
        Self::InvalidSyntax {
            message: message.into(),
            line: location.line,
            column: location.column,
        }
    }

    pub fn lexical_error(message: impl Into<String>) -> Self {
        Self::LexicalError { message: message.into() }
    }
}

impl From<ParseError> for crate::error::Error {
    fn from(err: ParseError) -> Self {
        match &err {
            ParseError::UnexpectedToken { line, column, .. }
            | ParseError::InvalidSyntax { line, column, .. } => crate::error::Error::Parse {
                line: *line,
                column: *column,
                message: err.to_string(),
            },
            ParseError::LexicalError { message } => crate::error::Error::Lexical {
                message: message.clone(),
            },
            ParseError::UnexpectedEndOfInput { .. } => crate::error::Error::Parse {
                line: 0,
                column: 0,
                message: err.to_string(),
            },
        }
    }
}

/// Result type for parse operations
pub type ParseResult<T> = Result<T, ParseError>;
