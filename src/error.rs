/*
 * Error taxonomy for the import parser. Every variant is local to one call
 * occurrence: the scanner records it as a diagnostic and keeps going, so none
 * of these ever abort a whole scan.
 */
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// No quote was found within the lexer's lookahead, or the literal was unterminated.
    #[error("expected a string literal at byte offset {offset}")]
    NotALiteral { offset: usize },

    /// The control-id argument was neither an integer literal nor an identifier.
    #[error("unrecognized control id form `{text}`")]
    UnrecognizedIdForm { text: String },

    /// The class or caption argument of a matched call could not be extracted.
    #[error("malformed window-creation call at byte offset {offset}: {reason}")]
    MalformedOccurrence { offset: usize, reason: String },
}

impl ImportError {
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        ImportError::MalformedOccurrence {
            offset,
            reason: reason.into(),
        }
    }

    /// True when the error caused the whole occurrence to be left out of the output.
    pub fn drops_occurrence(&self) -> bool {
        matches!(self, ImportError::MalformedOccurrence { .. })
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
