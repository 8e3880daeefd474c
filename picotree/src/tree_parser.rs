// SPDX-License-Identifier: Apache-2.0

//! Structural parser that turns JSON text into a [`Value`] tree.
//!
//! The parser walks the input one byte at a time. Each open container sits
//! on a [`NestingStack`] together with what it expects next; a container is
//! moved into its parent when it closes, so the stack is the only owner of
//! partially built data and an aborted parse drops it exactly once.

use alloc::string::String;

use crate::escape_processor::decode_string;
use crate::nesting_stack::{DepthCounter, NestingStack, StackError};
use crate::number_parser::decode_number;
use crate::parse_error::{ParseError, UnexpectedState};
use crate::slice_input_buffer::SliceInputBuffer;
use crate::string_builder::StringBuilder;
use crate::value::{Dictionary, List, Value};

/// What a dictionary accepts next.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Object {
    /// Right after `{`: a key or `}`.
    KeyOrEnd,
    /// After a comma: a key only.
    Key,
    Colon,
    Value,
    CommaOrEnd,
}

/// What a list accepts next.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Array {
    /// Right after `[`: a value or `]`.
    ItemOrEnd,
    /// After a comma: a value only.
    Item,
    CommaOrEnd,
}

/// A container under construction.
#[derive(Debug)]
enum Frame {
    Object {
        entries: Dictionary,
        key: Option<String>,
        expect: Object,
    },
    Array {
        items: List,
        expect: Array,
    },
}

impl Frame {
    fn open(bracket: u8) -> Self {
        if bracket == b'{' {
            Frame::Object {
                entries: Dictionary::new(),
                key: None,
                expect: Object::KeyOrEnd,
            }
        } else {
            Frame::Array {
                items: List::new(),
                expect: Array::ItemOrEnd,
            }
        }
    }

    fn accepts_key(&self) -> bool {
        matches!(
            self,
            Frame::Object {
                expect: Object::KeyOrEnd | Object::Key,
                ..
            }
        )
    }

    fn accepts_value(&self) -> bool {
        matches!(
            self,
            Frame::Object {
                expect: Object::Value,
                ..
            } | Frame::Array {
                expect: Array::ItemOrEnd | Array::Item,
                ..
            }
        )
    }

    fn accepts_close(&self, bracket: u8) -> bool {
        match self {
            Frame::Object { expect, .. } => {
                bracket == b'}' && matches!(expect, Object::KeyOrEnd | Object::CommaOrEnd)
            }
            Frame::Array { expect, .. } => {
                bracket == b']' && matches!(expect, Array::ItemOrEnd | Array::CommaOrEnd)
            }
        }
    }

    fn set_key(&mut self, new_key: String) {
        if let Frame::Object { key, expect, .. } = self {
            *key = Some(new_key);
            *expect = Object::Colon;
        }
    }

    /// `:` seen; returns false if it was not expected.
    fn colon(&mut self) -> bool {
        match self {
            Frame::Object { expect, .. } if *expect == Object::Colon => {
                *expect = Object::Value;
                true
            }
            _ => false,
        }
    }

    /// `,` seen; returns false if it was not expected.
    fn comma(&mut self) -> bool {
        match self {
            Frame::Object { expect, .. } if *expect == Object::CommaOrEnd => {
                *expect = Object::Key;
                true
            }
            Frame::Array { expect, .. } if *expect == Array::CommaOrEnd => {
                *expect = Array::Item;
                true
            }
            _ => false,
        }
    }

    /// Appends a completed value under the pending key or at the end.
    fn push_value(&mut self, value: Value) -> Result<(), ParseError> {
        match self {
            Frame::Object {
                entries,
                key,
                expect,
            } => {
                let key = key.take().ok_or(UnexpectedState::MissingKey)?;
                entries.append(key, value);
                *expect = Object::CommaOrEnd;
            }
            Frame::Array { items, expect } => {
                items.push(value);
                *expect = Array::CommaOrEnd;
            }
        }
        Ok(())
    }

    fn into_value(self) -> Value {
        match self {
            Frame::Object { entries, .. } => Value::Dictionary(entries),
            Frame::Array { items, .. } => Value::List(items),
        }
    }
}

const fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// A configurable JSON-to-tree parser.
///
/// Generic over the [`DepthCounter`] type, whose maximum value is the
/// default nesting limit (255 for the default `u8`).
///
/// By default the parser is lenient about the text around the root
/// container: anything before the first `{` or `[` is skipped and anything
/// after the matching close is ignored. [`strict`](Self::strict) turns both
/// into errors, except for whitespace.
///
/// # Example
/// ```
/// use picotree::TreeParser;
/// let tree = TreeParser::new().parse(r#"{"a": [1, 2.5, true]}"#).unwrap();
/// assert_eq!(tree.as_dict().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TreeParser<D: DepthCounter = u8> {
    depth_limit: D,
    strict: bool,
}

impl TreeParser<u8> {
    /// Creates a lenient parser allowing up to 255 nested containers.
    pub fn new() -> Self {
        Self::with_config()
    }
}

impl Default for TreeParser<u8> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DepthCounter> TreeParser<D> {
    /// Creates a parser whose depth limit is the largest value of `D`.
    ///
    /// ```
    /// # use picotree::TreeParser;
    /// let parser = TreeParser::<u16>::with_config();
    /// assert_eq!(parser.depth_limit(), 65535);
    /// ```
    pub fn with_config() -> Self {
        Self::with_depth_limit(D::max_value())
    }

    /// Creates a parser that accepts at most `limit` nested containers.
    pub fn with_depth_limit(limit: D) -> Self {
        TreeParser {
            depth_limit: limit,
            strict: false,
        }
    }

    /// Rejects non-whitespace text before and after the root container.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit.as_usize()
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn parse(&self, input: &str) -> Result<Value, ParseError> {
        self.parse_slice(input.as_bytes())
    }

    /// Parses a byte slice. Decoded strings must be valid UTF-8.
    pub fn parse_slice(&self, input: &[u8]) -> Result<Value, ParseError> {
        let run = ParseRun {
            input: SliceInputBuffer::new(input),
            stack: NestingStack::with_limit(self.depth_limit),
            builder: StringBuilder::new(),
            strict: self.strict,
        };
        run.run().inspect_err(|e| log::debug!("parse aborted: {e}"))
    }
}

/// State of a single parse; dropping it releases any partial tree.
struct ParseRun<'a, D: DepthCounter> {
    input: SliceInputBuffer<'a>,
    stack: NestingStack<Frame, D>,
    builder: StringBuilder,
    strict: bool,
}

impl<D: DepthCounter> ParseRun<'_, D> {
    fn run(mut self) -> Result<Value, ParseError> {
        self.find_root()?;
        loop {
            let pos = self.input.current_pos();
            let Some(byte) = self.input.peek() else {
                return Err(ParseError::UnexpectedEnd {
                    open: self.stack.depth(),
                });
            };
            match byte {
                _ if is_whitespace(byte) => self.input.advance(),
                b'{' | b'[' => {
                    self.require_value(byte, pos)?;
                    self.input.advance();
                    self.open_container(byte, pos)?;
                }
                b'}' | b']' => {
                    self.input.advance();
                    if let Some(root) = self.close_container(byte, pos)? {
                        self.check_trailing()?;
                        return Ok(root);
                    }
                }
                b',' => {
                    self.input.advance();
                    if !self.top_mut()?.comma() {
                        return Err(structure(byte, pos));
                    }
                }
                b':' => {
                    self.input.advance();
                    if !self.top_mut()?.colon() {
                        return Err(structure(byte, pos));
                    }
                }
                b'"' => {
                    self.input.advance();
                    self.string(pos)?;
                }
                b'-' | b'0'..=b'9' => {
                    self.require_value(byte, pos)?;
                    let number = decode_number(&mut self.input)?;
                    self.top_mut()?.push_value(number)?;
                }
                _ => {
                    let literal = match byte.to_ascii_lowercase() {
                        b't' => (b"true".as_slice(), Value::Boolean(true)),
                        b'f' => (b"false".as_slice(), Value::Boolean(false)),
                        b'n' => (b"null".as_slice(), Value::Null),
                        _ => return Err(structure(byte, pos)),
                    };
                    self.require_value(byte, pos)?;
                    self.match_literal(literal.0, pos)?;
                    self.top_mut()?.push_value(literal.1)?;
                }
            }
        }
    }

    /// Advances to the root's opening bracket and opens it.
    fn find_root(&mut self) -> Result<(), ParseError> {
        loop {
            let pos = self.input.current_pos();
            let byte = self.input.consume_byte()?;
            match byte {
                b'{' | b'[' => return self.open_container(byte, pos),
                _ if is_whitespace(byte) => {}
                _ if self.strict => return Err(structure(byte, pos)),
                _ => log::trace!("skipping {:?} before root", byte as char),
            }
        }
    }

    fn check_trailing(&mut self) -> Result<(), ParseError> {
        if !self.strict {
            return Ok(());
        }
        let start = self.input.current_pos();
        match self
            .input
            .remaining()
            .iter()
            .enumerate()
            .find(|&(_, &byte)| !is_whitespace(byte))
        {
            Some((offset, &byte)) => Err(structure(byte, start + offset)),
            None => Ok(()),
        }
    }

    fn top_mut(&mut self) -> Result<&mut Frame, ParseError> {
        Ok(self.stack.top_mut()?)
    }

    fn require_value(&self, byte: u8, pos: usize) -> Result<(), ParseError> {
        match self.stack.top() {
            Ok(frame) if frame.accepts_value() => Ok(()),
            _ => Err(structure(byte, pos)),
        }
    }

    fn open_container(&mut self, bracket: u8, pos: usize) -> Result<(), ParseError> {
        self.stack
            .push(Frame::open(bracket))
            .map_err(|e| match e {
                StackError::DepthExceeded { limit } => ParseError::DepthExceeded {
                    limit,
                    position: pos,
                },
                other => other.into(),
            })?;
        log::trace!(
            "open {:?} at {pos}, depth {}",
            bracket as char,
            self.stack.depth()
        );
        Ok(())
    }

    /// Closes the innermost container. Returns the root once the outermost
    /// container is closed.
    fn close_container(&mut self, bracket: u8, pos: usize) -> Result<Option<Value>, ParseError> {
        if !self.stack.top()?.accepts_close(bracket) {
            return Err(structure(bracket, pos));
        }
        let finished = self.stack.pop()?.into_value();
        log::trace!(
            "close {:?} at {pos}, depth {}",
            bracket as char,
            self.stack.depth()
        );
        if self.stack.is_empty() {
            return Ok(Some(finished));
        }
        self.top_mut()?.push_value(finished)?;
        Ok(None)
    }

    /// Handles a string whose opening quote at `pos` was just consumed.
    fn string(&mut self, pos: usize) -> Result<(), ParseError> {
        let (accepts_key, accepts_value) = {
            let top = self.stack.top()?;
            (top.accepts_key(), top.accepts_value())
        };
        if !accepts_key && !accepts_value {
            return Err(structure(b'"', pos));
        }
        let text = decode_string(&mut self.input, &mut self.builder, pos)?;
        let top = self.top_mut()?;
        if accepts_key {
            top.set_key(text);
            Ok(())
        } else {
            top.push_value(Value::String(text))
        }
    }

    /// Matches `word` case-insensitively at the cursor.
    fn match_literal(&mut self, word: &[u8], pos: usize) -> Result<(), ParseError> {
        for &expected in word {
            match self.input.consume_byte() {
                Ok(b) if b.to_ascii_lowercase() == expected => {}
                _ => return Err(ParseError::InvalidLiteral { position: pos }),
            }
        }
        Ok(())
    }
}

fn structure(character: u8, position: usize) -> ParseError {
    ParseError::Structure {
        character,
        position,
    }
}
