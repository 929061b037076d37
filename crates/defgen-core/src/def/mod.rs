//! Module-definition file output.
//!
//! [`DefWriter`] streams an `EXPORTS` section:
//!
//! ```text
//! EXPORTS
//!     lsmash_create_root
//!     ISOM_CODEC_TYPE_AC_3_AUDIO
//! lsmash_importer_open
//! ...
//! lsmash_win32_fopen
//! ```
//!
//! Header symbols are indented by four spaces; the static block follows
//! immediately, unindented, and its last name has no trailing newline.

mod sink;

use crate::error::{Error, Result};
use crate::scanner::Symbol;
use crate::statics::StaticSymbolList;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::trace;

pub use sink::{ExportSink, ExportStats, SymbolCollector};

/// First line of the output
pub const EXPORTS_MARKER: &str = "EXPORTS";

/// Prefix for each header symbol line
pub const EXPORT_INDENT: &str = "    ";

/// Writes symbols as a module-definition file
#[derive(Debug)]
pub struct DefWriter<W: Write> {
    out: W,
    path: Option<PathBuf>,
}

impl DefWriter<BufWriter<File>> {
    /// Creates (or truncates) the output file and writes the marker line
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::file_write(path, e))?;
        Self::with_path(BufWriter::new(file), Some(path.to_path_buf()))
    }
}

impl<W: Write> DefWriter<W> {
    /// Wraps a writer and writes the marker line
    pub fn new(out: W) -> Result<Self> {
        Self::with_path(out, None)
    }

    fn with_path(out: W, path: Option<PathBuf>) -> Result<Self> {
        let mut writer = Self { out, path };
        writer.write_line(EXPORTS_MARKER)?;
        Ok(writer)
    }

    fn write_error(&self, source: std::io::Error) -> Error {
        match &self.path {
            Some(path) => Error::file_write(path, source),
            None => Error::Io(source),
        }
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{}", line).map_err(|e| self.write_error(e))
    }

    /// Flushes everything written and returns the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.out.flush().map_err(|e| self.write_error(e))?;
        Ok(self.out)
    }
}

impl<W: Write> ExportSink for DefWriter<W> {
    fn export(&mut self, symbol: &Symbol) -> Result<()> {
        trace!("Writing export {}", symbol.name());
        writeln!(self.out, "{}{}", EXPORT_INDENT, symbol.name()).map_err(|e| self.write_error(e))
    }

    fn append_static(&mut self, list: &StaticSymbolList) -> Result<()> {
        let block = list.names.join("\n");
        self.out
            .write_all(block.as_bytes())
            .map_err(|e| self.write_error(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Rule;
    use crate::statics::CLI_SUPPORT_SYMBOLS;
    use pretty_assertions::assert_eq;

    fn render(symbols: &[Symbol], list: &StaticSymbolList) -> String {
        let mut writer = DefWriter::new(Vec::new()).unwrap();
        for symbol in symbols {
            writer.export(symbol).unwrap();
        }
        writer.append_static(list).unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_layout() {
        let list = StaticSymbolList {
            revision: 0,
            names: &["internal_a", "internal_b"],
        };
        let symbols = [
            Symbol::new("lsmash_foo", Rule::FunctionPrototype, 1),
            Symbol::new("ISOM_CODEC_TYPE_AVC1_VIDEO", Rule::CodecType, 3),
        ];

        assert_eq!(
            render(&symbols, &list),
            "EXPORTS\n    lsmash_foo\n    ISOM_CODEC_TYPE_AVC1_VIDEO\ninternal_a\ninternal_b"
        );
    }

    #[test]
    fn test_marker_only() {
        let writer = DefWriter::new(Vec::new()).unwrap();
        assert_eq!(writer.finish().unwrap(), b"EXPORTS\n");
    }

    #[test]
    fn test_static_block_follows_marker() {
        let output = render(&[], &CLI_SUPPORT_SYMBOLS);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], EXPORTS_MARKER);
        assert_eq!(lines[1..].to_vec(), CLI_SUPPORT_SYMBOLS.names.to_vec());
    }

    #[test]
    fn test_create_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("lsmash.def");

        match DefWriter::create(&path) {
            Err(Error::FileWrite { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
