// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;

use crate::parse_error::ParseError;
use crate::slice_input_buffer::SliceInputBuffer;
use crate::string_builder::StringBuilder;

/// Escape-sequence table for string literals.
pub struct EscapeProcessor;

impl EscapeProcessor {
    /// Translate the character following a backslash.
    ///
    /// Returns `None` for sequences without a translation; those are kept
    /// verbatim, backslash included. The letters of `\n`, `\r` and `\t` are
    /// accepted in either case.
    ///
    /// # Examples
    /// ```ignore
    /// // Internal API - see unit tests for usage examples
    /// assert_eq!(EscapeProcessor::process_simple_escape(b'n'), Some(b'\n'));
    /// ```
    pub const fn process_simple_escape(escape_char: u8) -> Option<u8> {
        match escape_char {
            b'n' | b'N' => Some(b'\n'),
            b'r' | b'R' => Some(b'\r'),
            b't' | b'T' => Some(b'\t'),
            b'"' => Some(b'"'),
            b'\\' => Some(b'\\'),
            _ => None,
        }
    }
}

/// Decodes a string literal whose opening quote has just been consumed.
///
/// `quote_pos` is the offset of that opening quote and is reported if the
/// input ends before the closing quote. On success the cursor sits after the
/// closing quote.
pub fn decode_string(
    input: &mut SliceInputBuffer<'_>,
    builder: &mut StringBuilder,
    quote_pos: usize,
) -> Result<String, ParseError> {
    builder.clear();
    let unterminated = ParseError::UnterminatedString {
        position: quote_pos,
    };
    loop {
        let byte = input.consume_byte().map_err(|_| unterminated.clone())?;
        match byte {
            b'"' => return builder.finish(),
            b'\\' => {
                let escaped = input.consume_byte().map_err(|_| unterminated.clone())?;
                match EscapeProcessor::process_simple_escape(escaped) {
                    Some(translated) => builder.push(translated),
                    None => {
                        builder.push(b'\\');
                        builder.push(escaped);
                    }
                }
            }
            other => builder.push(other),
        }
    }
}
