// SPDX-License-Identifier: Apache-2.0

use crate::nesting_stack::StackError;
use crate::slice_input_buffer;
use crate::value::ValueKind;

/// Internal invariants that should never be observed from the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnexpectedState {
    /// A container was expected on top of the nesting stack but none was there.
    MissingContainer,
    /// A dictionary value was completed without a pending key.
    MissingKey,
    /// The nesting stack could not be popped while closing a container.
    StackUnderflow,
    /// A slice of the input was requested outside of its bounds.
    InvalidSliceBounds,
}

/// Errors that can occur while parsing or reading a value tree
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// An accessor or append was used on a value of a different kind.
    TypeMismatch {
        expected: ValueKind,
        found: ValueKind,
    },
    /// A character appeared where the grammar does not allow it.
    Structure { character: u8, position: usize },
    /// Input ended while `open` containers were still unclosed.
    UnexpectedEnd { open: usize },
    /// Opening another container would exceed the nesting depth limit.
    DepthExceeded { limit: usize, position: usize },
    /// A `true`, `false` or `null` literal was misspelled.
    InvalidLiteral { position: usize },
    /// Input ended inside the string that starts at `position`.
    UnterminatedString { position: usize },
    /// A numeric literal starting at `position` is malformed.
    InvalidNumber { position: usize },
    /// A numeric literal starting at `position` does not fit its type.
    NumericOverflow { position: usize },
    /// A decoded string was not valid UTF-8.
    InvalidUtf8(core::str::Utf8Error),
    /// The input did not contain a root dictionary or list.
    EmptyDocument,
    /// The parser entered an unexpected internal state.
    Unexpected(UnexpectedState),
}

impl ParseError {
    /// True for errors caused by tokens out of place, including premature
    /// end of input.
    pub fn is_structure_error(&self) -> bool {
        matches!(
            self,
            ParseError::Structure { .. } | ParseError::UnexpectedEnd { .. }
        )
    }

    /// Byte offset in the input where the error was detected, if known.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::Structure { position, .. }
            | ParseError::DepthExceeded { position, .. }
            | ParseError::InvalidLiteral { position }
            | ParseError::UnterminatedString { position }
            | ParseError::InvalidNumber { position }
            | ParseError::NumericOverflow { position } => Some(*position),
            _ => None,
        }
    }

    pub(crate) fn mismatch(expected: ValueKind, found: ValueKind) -> Self {
        ParseError::TypeMismatch { expected, found }
    }
}

impl From<slice_input_buffer::Error> for ParseError {
    fn from(err: slice_input_buffer::Error) -> Self {
        match err {
            slice_input_buffer::Error::ReachedEnd => ParseError::EmptyDocument,
            slice_input_buffer::Error::InvalidSliceBounds => {
                UnexpectedState::InvalidSliceBounds.into()
            }
        }
    }
}

impl From<core::str::Utf8Error> for ParseError {
    fn from(err: core::str::Utf8Error) -> Self {
        ParseError::InvalidUtf8(err)
    }
}

impl From<UnexpectedState> for ParseError {
    fn from(info: UnexpectedState) -> Self {
        ParseError::Unexpected(info)
    }
}

impl From<StackError> for ParseError {
    fn from(err: StackError) -> Self {
        match err {
            StackError::DepthExceeded { limit } => ParseError::DepthExceeded { limit, position: 0 },
            StackError::Underflow => UnexpectedState::StackUnderflow.into(),
            StackError::Empty => UnexpectedState::MissingContainer.into(),
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {expected}, found {found}")
            }
            ParseError::Structure {
                character,
                position,
            } => write!(
                f,
                "Unexpected character '{}' at {position}",
                (*character as char).escape_default()
            ),
            ParseError::UnexpectedEnd { open } => {
                write!(f, "Input ended with {open} unclosed container(s)")
            }
            ParseError::DepthExceeded { limit, position } => {
                write!(f, "Nesting depth limit {limit} exceeded at {position}")
            }
            ParseError::InvalidLiteral { position } => write!(f, "Invalid literal at {position}"),
            ParseError::UnterminatedString { position } => {
                write!(f, "Unterminated string starting at {position}")
            }
            ParseError::InvalidNumber { position } => write!(f, "Invalid number at {position}"),
            ParseError::NumericOverflow { position } => {
                write!(f, "Number out of range at {position}")
            }
            ParseError::InvalidUtf8(e) => write!(f, "Invalid UTF-8: {e}"),
            _ => write!(f, "{self:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let error: ParseError = UnexpectedState::MissingKey.into();
        match error {
            ParseError::Unexpected(info) => {
                assert_eq!(info, UnexpectedState::MissingKey);
            }
            _ => panic!("Expected UnexpectedState error"),
        }

        let error = ParseError::mismatch(ValueKind::List, ValueKind::Integer);
        assert_eq!(
            error,
            ParseError::TypeMismatch {
                expected: ValueKind::List,
                found: ValueKind::Integer
            }
        );
    }

    #[test]
    fn test_stack_error_conversion() {
        let error: ParseError = StackError::DepthExceeded { limit: 3 }.into();
        assert_eq!(
            error,
            ParseError::DepthExceeded {
                limit: 3,
                position: 0
            }
        );
        let error: ParseError = StackError::Underflow.into();
        assert_eq!(
            error,
            ParseError::Unexpected(UnexpectedState::StackUnderflow)
        );
        let error: ParseError = StackError::Empty.into();
        assert_eq!(
            error,
            ParseError::Unexpected(UnexpectedState::MissingContainer)
        );
    }

    #[test]
    fn test_structure_classification() {
        assert!(ParseError::Structure {
            character: b',',
            position: 7
        }
        .is_structure_error());
        assert!(ParseError::UnexpectedEnd { open: 1 }.is_structure_error());
        assert!(!ParseError::InvalidLiteral { position: 0 }.is_structure_error());
        assert_eq!(ParseError::InvalidNumber { position: 4 }.position(), Some(4));
        assert_eq!(ParseError::EmptyDocument.position(), None);
    }

    #[test]
    fn test_display() {
        let error = ParseError::Structure {
            character: b'x',
            position: 2,
        };
        assert_eq!(error.to_string(), "Unexpected character 'x' at 2");
        let error = ParseError::mismatch(ValueKind::String, ValueKind::Null);
        assert_eq!(
            error.to_string(),
            "Type mismatch: expected string, found null"
        );
    }

    #[test]
    fn test_utf8_error_conversion() {
        use core::str;
        // Lone continuation byte, built at runtime to avoid the literal lint
        let mut invalid_utf8_array = [0u8; 1];
        invalid_utf8_array[0] = 0b10000000u8;

        match str::from_utf8(&invalid_utf8_array) {
            Err(utf8_error) => {
                let parse_error: ParseError = utf8_error.into();
                assert!(matches!(parse_error, ParseError::InvalidUtf8(_)));
            }
            Ok(_) => panic!("Expected UTF-8 validation to fail"),
        }
    }
}
