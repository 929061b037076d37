//! Extensible export sinks.
//!
//! This module provides the [`ExportSink`] trait, the seam between the
//! header scanner and whatever consumes its symbols.

use crate::error::Result;
use crate::scanner::{Rule, Symbol};
use crate::statics::StaticSymbolList;

/// Trait for consuming exported symbols as they are found.
///
/// Symbols arrive one at a time in header order, followed by a single call
/// to [`append_static`](ExportSink::append_static) once the header is
/// exhausted.
pub trait ExportSink {
    /// Consume one symbol found in the header
    fn export(&mut self, symbol: &Symbol) -> Result<()>;

    /// Consume the fixed symbol list appended after the header symbols
    fn append_static(&mut self, list: &StaticSymbolList) -> Result<()> {
        let _ = list;
        Ok(())
    }
}

impl<S: ExportSink + ?Sized> ExportSink for &mut S {
    fn export(&mut self, symbol: &Symbol) -> Result<()> {
        (**self).export(symbol)
    }

    fn append_static(&mut self, list: &StaticSymbolList) -> Result<()> {
        (**self).append_static(list)
    }
}

/// A sink that keeps every name in memory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SymbolCollector {
    /// Names found in the header, in header order
    pub exports: Vec<String>,
    /// Names from the static list, in list order
    pub statics: Vec<String>,
}

impl SymbolCollector {
    /// Creates an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// All names in definition file order
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.exports
            .iter()
            .chain(self.statics.iter())
            .map(String::as_str)
    }
}

impl ExportSink for SymbolCollector {
    fn export(&mut self, symbol: &Symbol) -> Result<()> {
        self.exports.push(symbol.name().to_string());
        Ok(())
    }

    fn append_static(&mut self, list: &StaticSymbolList) -> Result<()> {
        self.statics.extend(list.iter().map(str::to_string));
        Ok(())
    }
}

/// A sink that counts symbols
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportStats {
    /// Symbols from function prototypes
    pub function_count: usize,
    /// Symbols from codec-type definitions
    pub codec_type_count: usize,
    /// Symbols from the static list
    pub static_count: usize,
}

impl ExportStats {
    /// Total number of names written
    pub fn total(&self) -> usize {
        self.function_count + self.codec_type_count + self.static_count
    }
}

impl ExportSink for ExportStats {
    fn export(&mut self, symbol: &Symbol) -> Result<()> {
        match symbol.rule() {
            Rule::FunctionPrototype => self.function_count += 1,
            Rule::CodecType => self.codec_type_count += 1,
        }
        Ok(())
    }

    fn append_static(&mut self, list: &StaticSymbolList) -> Result<()> {
        self.static_count += list.len();
        Ok(())
    }
}
