//! The generation pass: header in, module-definition file out.

use crate::def::{DefWriter, ExportSink, ExportStats};
use crate::error::Result;
use crate::scanner::HeaderScanner;
use crate::statics::CLI_SUPPORT_SYMBOLS;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default header file name inside the source directory
pub const DEFAULT_HEADER_NAME: &str = "lsmash.h";

/// Default definition file name inside the source directory
pub const DEFAULT_DEF_NAME: &str = "lsmash.def";

/// Configuration for the generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Header file name, relative to the source directory
    pub header_name: String,
    /// Output file name, relative to the source directory
    pub def_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            header_name: DEFAULT_HEADER_NAME.to_string(),
            def_name: DEFAULT_DEF_NAME.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the header file name
    pub fn header_name(mut self, name: impl Into<String>) -> Self {
        self.header_name = name.into();
        self
    }

    /// Sets the output file name
    pub fn def_name(mut self, name: impl Into<String>) -> Self {
        self.def_name = name.into();
        self
    }
}

/// Outcome of a generation run on disk
#[derive(Debug, Clone)]
pub struct GenerateReport {
    /// Header that was scanned
    pub header_path: PathBuf,
    /// Definition file that was written
    pub def_path: PathBuf,
    /// Symbol counts
    pub stats: ExportStats,
}

/// Drives the scanner into a sink
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a new generator with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs one pass: every header symbol in order, then [`CLI_SUPPORT_SYMBOLS`].
    ///
    /// Symbols reach the sink as soon as they are found. The first error
    /// aborts the pass, leaving whatever the sink already received.
    pub fn run<R, S>(&self, scanner: HeaderScanner<R>, mut sink: S) -> Result<ExportStats>
    where
        R: BufRead,
        S: ExportSink,
    {
        let mut stats = ExportStats::default();

        for symbol in scanner {
            let symbol = symbol?;
            sink.export(&symbol)?;
            stats.export(&symbol)?;
        }

        sink.append_static(&CLI_SUPPORT_SYMBOLS)?;
        stats.append_static(&CLI_SUPPORT_SYMBOLS)?;

        Ok(stats)
    }

    /// Reads `<dir>/<header_name>` and writes `<dir>/<def_name>`.
    ///
    /// The output is created before scanning starts and is not replaced
    /// atomically; a failed run leaves a truncated file behind.
    pub fn run_in_dir(&self, dir: impl AsRef<Path>) -> Result<GenerateReport> {
        let dir = dir.as_ref();
        let header_path = dir.join(&self.config.header_name);
        let def_path = dir.join(&self.config.def_name);

        debug!(
            "Generating {} from {}",
            def_path.display(),
            header_path.display()
        );

        let scanner = HeaderScanner::open(&header_path)?;
        let mut writer = DefWriter::create(&def_path)?;
        let stats = self.run(scanner, &mut writer)?;
        writer.finish()?;

        debug!("Wrote {} names to {}", stats.total(), def_path.display());

        Ok(GenerateReport {
            header_path,
            def_path,
            stats,
        })
    }
}

/// Run a pass over any buffered reader with the default configuration
pub fn generate<R: BufRead>(reader: R, sink: impl ExportSink) -> Result<ExportStats> {
    Generator::new().run(HeaderScanner::new(reader), sink)
}

/// Generate `lsmash.def` from `lsmash.h` inside `dir`
pub fn generate_in_dir(dir: impl AsRef<Path>) -> Result<GenerateReport> {
    Generator::new().run_in_dir(dir)
}
