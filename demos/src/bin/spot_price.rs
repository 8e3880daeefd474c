// SPDX-License-Identifier: Apache-2.0

//! Prints the Bitcoin spot price from a price API response.
//!
//! The response looks like
//! `{"data":{"base":"BTC","currency":"USD","amount":"27123.45"}}` and is read
//! from a file, or from a single line of stdin when no file is given.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use picotree::{FileError, ParseError, TreeParser, Value, ValueKind};

#[derive(Parser)]
#[command(name = "spot_price", version, about = "Extract the spot price from an API response")]
struct Cli {
    /// Response file (reads one line from stdin if omitted)
    input: Option<PathBuf>,

    /// Reject text around the JSON document
    #[arg(long)]
    strict: bool,

    /// Maximum container nesting depth
    #[arg(long, default_value_t = u8::MAX)]
    max_depth: u8,
}

/// Reasons the price could not be extracted.
#[derive(Debug, PartialEq)]
enum PriceError {
    Parse(ParseError),
    NotADictionary(&'static str, ValueKind),
    MissingKey(&'static str),
    NotAString(&'static str, ValueKind),
}

impl std::fmt::Display for PriceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceError::Parse(e) => write!(f, "Parse failed: {e}"),
            PriceError::NotADictionary("", found) => {
                write!(f, "Base is not a dictionary (found {found})!")
            }
            PriceError::NotADictionary(key, found) => write!(
                f,
                "Generic object at \"{key}\" key is not a dictionary (found {found})!"
            ),
            PriceError::MissingKey(key) => write!(f, "Missing \"{key}\" key in dictionary!"),
            PriceError::NotAString(key, found) => write!(
                f,
                "Generic object at \"{key}\" key is not a string (found {found})!"
            ),
        }
    }
}

impl From<ParseError> for PriceError {
    fn from(err: ParseError) -> Self {
        PriceError::Parse(err)
    }
}

fn child<'a>(
    node: &'a Value,
    parent: &'static str,
    key: &'static str,
) -> Result<&'a Value, PriceError> {
    let dict = node
        .as_dict()
        .map_err(|_| PriceError::NotADictionary(parent, node.kind()))?;
    dict.get(key).ok_or(PriceError::MissingKey(key))
}

/// Walks `data` -> `amount` and returns the amount text.
fn spot_price(root: &Value) -> Result<&str, PriceError> {
    let data = child(root, "", "data")?;
    let amount = child(data, "data", "amount")?;
    amount
        .as_str()
        .map_err(|_| PriceError::NotAString("amount", amount.kind()))
}

fn read_input(cli: &Cli) -> Result<Vec<u8>, FileError> {
    match &cli.input {
        Some(path) => Ok(picotree::read_file(path)?.into_bytes()),
        None => {
            eprint!("Enter string from price API: ");
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            Ok(line.into_bytes())
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let input = match read_input(&cli) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: Unable to read input: {e}");
            process::exit(1);
        }
    };
    log::debug!("read {} bytes", input.len());

    let parser = TreeParser::with_depth_limit(cli.max_depth).strict(cli.strict);
    let root = match parser.parse_slice(&input) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("{}", PriceError::from(e));
            process::exit(1);
        }
    };
    log::info!("parsed document of depth {}", root.depth());

    match spot_price(&root) {
        Ok(amount) => println!("Bitcoin value in USD: ${amount}"),
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    }
}
