//! Header scanning module for finding exported symbols.
//!
//! The header is read one line at a time. Each line is classified together
//! with the line before it (a one-line lookback) and yields at most one
//! [`Symbol`].
//!
//! ## Algorithm Overview
//!
//! 1. Read the next line, stripping its terminator (`\n`, `\r\n` or `\r`)
//!    and decoding it lossily so stray non-UTF-8 bytes never end the pass
//! 2. Try each rule in [`RULES`] against `(previous, current)`
//! 3. Emit the extracted symbol, if any
//! 4. Make the current line the new previous line, whether or not it matched
//!
//! ## Example
//!
//! ```
//! use defgen_core::scanner::HeaderScanner;
//!
//! let header = "void lsmash_foo\n(\n    void\n);\n";
//! let names = HeaderScanner::new(header.as_bytes())
//!     .map(|symbol| symbol.map(|s| s.name().to_string()))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! assert_eq!(names, ["lsmash_foo"]);
//! # Ok::<(), defgen_core::Error>(())
//! ```

mod rules;

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

pub use rules::{Rule, RULES};

/// The line being classified and the one immediately before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookback<'a> {
    /// The line before `current`; empty before the first line
    pub previous: &'a str,
    /// The line being classified
    pub current: &'a str,
}

impl<'a> Lookback<'a> {
    /// Creates a lookback from the previous and current lines
    pub fn new(previous: &'a str, current: &'a str) -> Self {
        Self { previous, current }
    }
}

/// An exported symbol found in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    name: String,
    rule: Rule,
    line_number: usize,
}

impl Symbol {
    /// Creates a new symbol
    pub fn new(name: impl Into<String>, rule: Rule, line_number: usize) -> Self {
        Self {
            name: name.into(),
            rule,
            line_number,
        }
    }

    /// The exported name, exactly as captured
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rule that produced this symbol
    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// 0-indexed header line the symbol was emitted on
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

/// Classifies one line against its lookback.
///
/// Rules are tried in priority order and the first whose guard holds decides
/// the outcome. Returns `Ok(None)` when no rule applies.
pub fn classify(lookback: &Lookback<'_>, line_number: usize) -> Result<Option<Symbol>> {
    for rule in RULES {
        if rule.guard(lookback) {
            return rule.extract(lookback, line_number).map(Some);
        }
    }
    Ok(None)
}

/// Streaming scanner over the lines of a header.
///
/// Yields symbols in header order. The first error ends the iteration.
pub struct HeaderScanner<R> {
    reader: R,
    buf: Vec<u8>,
    skip_lf: bool,
    previous: String,
    line_number: usize,
    path: Option<PathBuf>,
    finished: bool,
}

impl HeaderScanner<BufReader<File>> {
    /// Opens a header file for scanning
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::file_read(path, e))?;
        Ok(Self::new(BufReader::new(file)).with_path(path))
    }
}

impl<R: BufRead> HeaderScanner<R> {
    /// Creates a scanner over any buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            skip_lf: false,
            previous: String::new(),
            line_number: 0,
            path: None,
            finished: false,
        }
    }

    /// Attaches the source path used when reporting read errors
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    /// Reads one line, or `None` at end of input.
    ///
    /// A line ends at `\n`, `\r\n` or a bare `\r`. Invalid UTF-8 is
    /// replaced rather than rejected, and a leading byte order mark on the
    /// first line is dropped.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        let mut terminated = false;

        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }

            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    self.skip_lf = available[end] == b'\r';
                    self.buf.extend_from_slice(&available[..end]);
                    self.reader.consume(end + 1);
                    terminated = true;
                    break;
                }
                None => {
                    let len = available.len();
                    self.buf.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }

        if !terminated && self.buf.is_empty() {
            return Ok(None);
        }

        let mut line = String::from_utf8_lossy(&self.buf).into_owned();
        if self.line_number == 0 {
            if let Some(rest) = line.strip_prefix('\u{FEFF}') {
                line = rest.to_string();
            }
        }
        Ok(Some(line))
    }

    fn read_error(&self, source: std::io::Error) -> Error {
        match &self.path {
            Some(path) => Error::file_read(path, source),
            None => Error::Io(source),
        }
    }
}

impl<R: BufRead> Iterator for HeaderScanner<R> {
    type Item = Result<Symbol>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let line = match self.read_line() {
                Ok(Some(line)) => line,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(self.read_error(e)));
                }
                Ok(None) => {
                    debug!("Header exhausted after {} lines", self.line_number);
                    self.finished = true;
                    return None;
                }
            };

            let line_number = self.line_number;
            self.line_number += 1;
            trace!("Line {}: {:?}", line_number, line);

            let outcome = classify(&Lookback::new(&self.previous, &line), line_number);
            self.previous = line;

            match outcome {
                Ok(Some(symbol)) => {
                    debug!(
                        "Found {} symbol '{}' at line {}",
                        symbol.rule(),
                        symbol.name(),
                        line_number
                    );
                    return Some(Ok(symbol));
                }
                Ok(None) => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Scan a header file and collect its symbols
///
/// This is a convenience function that reads the whole file; generation
/// streams instead.
pub fn scan_file(path: impl AsRef<Path>) -> Result<Vec<Symbol>> {
    HeaderScanner::open(path)?.collect()
}
