// SPDX-License-Identifier: Apache-2.0

//! A small JSON parser that builds an owned tree of typed values.
//!
//! ```
//! use picotree::{parse, Value};
//!
//! let tree = parse(r#"{"a": 1, "b": [true, false, null]}"#).unwrap();
//! let dict = tree.as_dict().unwrap();
//! assert_eq!(dict.get("a"), Some(&Value::Integer(1)));
//! assert_eq!(dict.get("b").unwrap().as_list().unwrap().len(), 3);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

// Compile-time configuration validation
mod config_check;

mod escape_processor;

mod int_parser;

mod nesting_stack;
pub use nesting_stack::{DepthCounter, NestingStack, StackError};

mod number_parser;

mod parse_error;
pub use parse_error::{ParseError, UnexpectedState};

mod slice_input_buffer;

mod string_builder;
pub use string_builder::StringBuilder;

mod tree_parser;
pub use tree_parser::TreeParser;

mod value;
pub use value::{ConfiguredInt, Dictionary, List, Value, ValueKind};

#[cfg(feature = "std")]
mod file_source;
#[cfg(feature = "std")]
pub use file_source::{parse_file, parse_file_with, read_file, FileError};

/// Parses `input` with the default, lenient [`TreeParser`].
pub fn parse(input: &str) -> Result<Value, ParseError> {
    TreeParser::new().parse(input)
}

/// Parses a byte slice with the default, lenient [`TreeParser`].
pub fn parse_slice(input: &[u8]) -> Result<Value, ParseError> {
    TreeParser::new().parse_slice(input)
}
