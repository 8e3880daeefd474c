// SPDX-License-Identifier: Apache-2.0

// Panic-free base-10 integer conversion for the configured integer width

/// Reasons an integer literal could not be converted.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum IntError {
    /// No digits after the optional sign.
    NoDigits,
    /// A byte that is not an ASCII digit.
    InvalidDigit,
    /// The value does not fit the target type.
    Overflow,
}

/// Signed integer types the decoder can produce.
pub trait DecimalInt: Copy {
    const ZERO: Self;
    fn mul_ten(self) -> Option<Self>;
    fn add_digit(self, digit: u8) -> Option<Self>;
    fn sub_digit(self, digit: u8) -> Option<Self>;
}

macro_rules! impl_decimal_int {
    ($($t:ty),*) => {
        $(
            impl DecimalInt for $t {
                const ZERO: Self = 0;
                #[inline]
                fn mul_ten(self) -> Option<Self> { self.checked_mul(10) }
                #[inline]
                fn add_digit(self, digit: u8) -> Option<Self> { self.checked_add(digit as $t) }
                #[inline]
                fn sub_digit(self, digit: u8) -> Option<Self> { self.checked_sub(digit as $t) }
            }
        )*
    };
}

impl_decimal_int!(i32, i64);

/// Converts an optionally `-`/`+` signed run of ASCII digits.
///
/// Negative values are accumulated downwards so that `MIN` is reachable.
pub fn parse_decimal<T: DecimalInt>(src: &[u8]) -> Result<T, IntError> {
    let (negative, digits) = match src {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        _ => (false, src),
    };
    if digits.is_empty() {
        return Err(IntError::NoDigits);
    }

    let mut result = T::ZERO;
    for &byte in digits {
        if !byte.is_ascii_digit() {
            return Err(IntError::InvalidDigit);
        }
        let digit = byte - b'0';
        let shifted = result.mul_ten().ok_or(IntError::Overflow)?;
        let next = if negative {
            shifted.sub_digit(digit)
        } else {
            shifted.add_digit(digit)
        };
        result = next.ok_or(IntError::Overflow)?;
    }
    Ok(result)
}
