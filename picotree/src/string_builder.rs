// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;
use alloc::vec::Vec;

use crate::parse_error::ParseError;

/// Size of the staging area that absorbs single-byte appends.
pub const STAGING_SIZE: usize = 10;

/// Two-stage accumulator for decoded string contents.
///
/// Bytes land in a fixed staging area first and are moved into the backing
/// buffer one full staging area at a time, so the backing buffer only grows
/// every `STAGING_SIZE` bytes. `finish` copies the staged tail once.
#[derive(Debug, Default)]
pub struct StringBuilder {
    buffer: Vec<u8>,
    staging: [u8; STAGING_SIZE],
    staged: usize,
}

impl StringBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one byte.
    pub fn push(&mut self, byte: u8) {
        if let Some(slot) = self.staging.get_mut(self.staged) {
            *slot = byte;
            self.staged += 1;
        }
        if self.staged >= STAGING_SIZE {
            self.flush();
        }
    }

    pub fn push_slice(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push(b);
        }
    }

    fn flush(&mut self) {
        if let Some(staged) = self.staging.get(..self.staged) {
            self.buffer.extend_from_slice(staged);
        }
        self.staged = 0;
    }

    pub fn len(&self) -> usize {
        self.buffer.len() + self.staged
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.staged = 0;
    }

    /// Returns the accumulated bytes and leaves the builder empty.
    pub fn finish_bytes(&mut self) -> Vec<u8> {
        self.flush();
        core::mem::take(&mut self.buffer)
    }

    /// Returns the accumulated text and leaves the builder empty.
    ///
    /// Fails if the bytes pushed so far are not valid UTF-8. The builder is
    /// empty afterwards in either case.
    pub fn finish(&mut self) -> Result<String, ParseError> {
        let bytes = self.finish_bytes();
        String::from_utf8(bytes).map_err(|e| ParseError::InvalidUtf8(e.utf8_error()))
    }
}
