// Copyright (c) 2015-2021 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Reading and writing transportation problems in a DIMACS-like format.
//!
//! The format follows the conventions of the DIMACS network flow
//! formats: every non-empty line starts with a one-character
//! descriptor, lines starting with `c` are comments.

pub mod transport;
pub use self::transport::{read, read_from_file, read_solution, write, write_solution};

use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::str::{FromStr, SplitWhitespace};
use thiserror::Error;

/// Error when reading a file in DIMACS format.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Format error on line {line}: {msg}")]
    Format { line: usize, msg: String },
    #[error("Data error on line {line}: {msg}")]
    Data { line: usize, msg: String },
    #[error("Invalid problem: {0}")]
    Problem(#[from] crate::transport::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Line-based reader skipping empty and comment lines.
pub struct DimacsReader<R: Read> {
    io: BufReader<R>,

    line: String,
    line_number: usize,
}

impl<R: Read> DimacsReader<R> {
    pub fn new(reader: R) -> Self {
        DimacsReader {
            io: BufReader::new(reader),
            line: String::new(),
            line_number: 0,
        }
    }

    /// The number of the most recently read line.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next non-comment line.
    ///
    /// Returns the line's descriptor and an iterator over the remaining
    /// tokens, or `None` at the end of the input.
    pub fn next_line(&mut self) -> Result<Option<(char, Tokens)>> {
        loop {
            self.line.clear();
            if self.io.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let start = match self.line.find(|c: char| !c.is_whitespace()) {
                Some(k) => k,
                None => continue,
            };
            let end = self.line[start..]
                .find(char::is_whitespace)
                .map(|k| start + k)
                .unwrap_or_else(|| self.line.len());

            let descriptor = self.line[start..].chars().next().unwrap_or('c');
            if descriptor == 'c' {
                continue;
            }
            if end - start != descriptor.len_utf8() {
                return Err(Error::Format {
                    line: self.line_number,
                    msg: format!("invalid line descriptor '{}'", &self.line[start..end]),
                });
            }

            return Ok(Some((
                descriptor,
                Tokens {
                    it: self.line[end..].split_whitespace(),
                    line: self.line_number,
                },
            )));
        }
    }

    /// Read the next line and require the given descriptor.
    pub fn expect_line(&mut self, descriptor: char) -> Result<Tokens> {
        let line_number = self.line_number;
        match self.next_line()? {
            Some((d, toks)) if d == descriptor => Ok(toks),
            Some((d, toks)) => Err(Error::Format {
                line: toks.line,
                msg: format!("unexpected line, expected '{}', got '{}'", descriptor, d),
            }),
            None => Err(Error::Format {
                line: line_number,
                msg: format!("unexpected end of file, expected '{}' line", descriptor),
            }),
        }
    }
}

/// Iterates over the tokens in a line.
pub struct Tokens<'a> {
    it: SplitWhitespace<'a>,
    pub line: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.it.next()
    }
}

impl<'a> Tokens<'a> {
    /// Return an error if the next token is not the given token.
    pub fn expect(&mut self, tok: &str) -> Result<()> {
        let nxt = self.str()?;
        if nxt == tok {
            Ok(())
        } else {
            Err(Error::Format {
                line: self.line,
                msg: format!("expected '{}', got '{}'", tok, nxt),
            })
        }
    }

    /// Returns the next token as `&str`.
    pub fn str(&mut self) -> Result<&'a str> {
        self.it.next().ok_or_else(|| Error::Format {
            line: self.line,
            msg: "expected token".to_string(),
        })
    }

    /// Returns the next token converted to a number.
    pub fn number<T>(&mut self) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let line = self.line;
        self.str()?.parse().map_err(|e| Error::Format {
            line,
            msg: format!("{}", e),
        })
    }

    /// Returns the next token as 0-based index.
    ///
    /// The token must be a 1-based index in `1..=n`.
    pub fn index(&mut self, n: usize, what: &str) -> Result<usize> {
        let k: usize = self.number()?;
        if k < 1 || k > n {
            return Err(Error::Data {
                line: self.line,
                msg: format!("invalid {} index {} (must be in 1..{})", what, k, n),
            });
        }
        Ok(k - 1)
    }

    /// Ensures that there is no next token.
    pub fn end(&mut self) -> Result<()> {
        if let Some(s) = self.it.next() {
            Err(Error::Format {
                line: self.line,
                msg: format!("unexpected token at end of line: {}", s),
            })
        } else {
            Ok(())
        }
    }
}
