// SPDX-License-Identifier: Apache-2.0

//! Helpers for parsing documents stored in files.

use std::fs;
use std::io;
use std::path::Path;

use crate::parse_error::ParseError;
use crate::tree_parser::TreeParser;
use crate::value::Value;

/// Errors from reading and parsing a file
#[derive(Debug)]
pub enum FileError {
    /// The file could not be read.
    Io(io::Error),
    /// The file contents are not a valid document.
    Parse(ParseError),
}

impl From<io::Error> for FileError {
    fn from(err: io::Error) -> Self {
        FileError::Io(err)
    }
}

impl From<ParseError> for FileError {
    fn from(err: ParseError) -> Self {
        FileError::Parse(err)
    }
}

impl core::fmt::Display for FileError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FileError::Io(e) => write!(f, "I/O error: {e}"),
            FileError::Parse(e) => write!(f, "Parse error: {e}"),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::Io(e) => Some(e),
            FileError::Parse(e) => Some(e),
        }
    }
}

/// Reads the whole file at `path` as text.
pub fn read_file(path: impl AsRef<Path>) -> Result<String, FileError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    log::debug!("read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Reads and parses the file at `path` with the default parser.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Value, FileError> {
    parse_file_with(&TreeParser::new(), path)
}

/// Reads and parses the file at `path` with a configured parser.
pub fn parse_file_with<D: crate::DepthCounter>(
    parser: &TreeParser<D>,
    path: impl AsRef<Path>,
) -> Result<Value, FileError> {
    let bytes = fs::read(path.as_ref())?;
    Ok(parser.parse_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("picotree-{}-{name}", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_parse_file() {
        let path = temp_file("ok.json", br#"{"data": {"amount": "1.00"}}"#);
        let tree = parse_file(&path).unwrap();
        assert_eq!(
            tree.pointer(&["data", "amount"]).unwrap().as_str().unwrap(),
            "1.00"
        );
        assert_eq!(read_file(&path).unwrap(), r#"{"data": {"amount": "1.00"}}"#);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_parse_error_is_wrapped() {
        let path = temp_file("bad.json", b"[1 2]");
        let err = parse_file(&path).unwrap_err();
        assert!(matches!(
            err,
            FileError::Parse(ParseError::Structure {
                character: b'2',
                position: 3
            })
        ));
        assert!(err.to_string().starts_with("Parse error"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_parse_with_strict_parser() {
        let path = temp_file("strict.json", b"[1] trailing");
        assert!(parse_file(&path).is_ok());
        let strict = TreeParser::new().strict(true);
        assert!(matches!(
            parse_file_with(&strict, &path),
            Err(FileError::Parse(ParseError::Structure { .. }))
        ));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = parse_file("/nonexistent/picotree/missing.json").unwrap_err();
        assert!(matches!(err, FileError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
