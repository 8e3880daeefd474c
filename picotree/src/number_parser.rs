// SPDX-License-Identifier: Apache-2.0

use core::str::FromStr;

use crate::int_parser::{parse_decimal, IntError};
use crate::parse_error::ParseError;
use crate::slice_input_buffer::SliceInputBuffer;
use crate::value::{ConfiguredInt, Value};

/// Scanner position inside a numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Num {
    Start,
    Sign,
    IntegerDigits,
    Decimal,
    FractionDigits,
    Exponent,
    ExponentSign,
    ExponentDigits,
}

impl Num {
    /// Transition on `byte`, or `None` if the literal cannot continue with it.
    const fn next(self, byte: u8) -> Option<Num> {
        match (self, byte) {
            (Num::Start, b'-') => Some(Num::Sign),
            (Num::Start | Num::Sign | Num::IntegerDigits, b'0'..=b'9') => Some(Num::IntegerDigits),
            (Num::IntegerDigits, b'.') => Some(Num::Decimal),
            (Num::Decimal | Num::FractionDigits, b'0'..=b'9') => Some(Num::FractionDigits),
            (Num::IntegerDigits | Num::FractionDigits, b'e' | b'E') => Some(Num::Exponent),
            (Num::Exponent, b'+' | b'-') => Some(Num::ExponentSign),
            (Num::Exponent | Num::ExponentSign | Num::ExponentDigits, b'0'..=b'9') => {
                Some(Num::ExponentDigits)
            }
            _ => None,
        }
    }

    const fn is_complete(self) -> bool {
        matches!(
            self,
            Num::IntegerDigits | Num::FractionDigits | Num::ExponentDigits
        )
    }

    const fn is_float(self) -> bool {
        matches!(self, Num::FractionDigits | Num::ExponentDigits)
    }
}

/// Decodes the numeric literal under the cursor.
///
/// Consumes the longest run that can belong to a number. The run has to end
/// on a digit, otherwise the literal is reported as invalid. Literals with a
/// fraction or an exponent become [`Value::Float`], all others
/// [`Value::Integer`]. Values outside the target type are errors, never
/// clamped.
pub fn decode_number(input: &mut SliceInputBuffer<'_>) -> Result<Value, ParseError> {
    let start = input.current_pos();
    let mut state = Num::Start;
    while let Some(byte) = input.peek() {
        match state.next(byte) {
            Some(next) => {
                state = next;
                input.advance();
            }
            None => break,
        }
    }

    if !state.is_complete() {
        return Err(ParseError::InvalidNumber { position: start });
    }

    let bytes = input.slice(start, input.current_pos())?;
    let value = if state.is_float() {
        parse_float(bytes, start)?
    } else {
        parse_integer(bytes, start)?
    };
    log::trace!("number at {start}: {value}");
    Ok(value)
}

fn parse_integer(bytes: &[u8], position: usize) -> Result<Value, ParseError> {
    match parse_decimal::<ConfiguredInt>(bytes) {
        Ok(i) => Ok(Value::Integer(i)),
        Err(IntError::Overflow) => Err(ParseError::NumericOverflow { position }),
        Err(_) => Err(ParseError::InvalidNumber { position }),
    }
}

fn parse_float(bytes: &[u8], position: usize) -> Result<Value, ParseError> {
    // Scanned literals are pure ASCII
    let text = core::str::from_utf8(bytes)?;
    match f32::from_str(text) {
        Ok(f) if f.is_finite() => Ok(Value::Float(f)),
        Ok(_) => Err(ParseError::NumericOverflow { position }),
        Err(_) => Err(ParseError::InvalidNumber { position }),
    }
}
