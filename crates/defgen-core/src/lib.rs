//! # defgen-core
//!
//! A library for generating the linker module-definition file (`lsmash.def`)
//! that lists what the L-SMASH DLL exports.
//!
//! The symbols come from the public header, `lsmash.h`, found with two
//! line-shape heuristics rather than a C parser:
//!
//! - a function prototype whose parameter list opens on a line of its own
//! - a `DEFINE_ISOM_CODEC_TYPE` / `DEFINE_QTFF_CODEC_TYPE` constant
//!
//! followed by a fixed list of internal symbols the command-line tools need.
//!
//! ## Architecture
//!
//! - [`scanner`]: Line classification and symbol extraction
//! - [`def`]: The `EXPORTS` writer and the [`ExportSink`] seam
//! - [`statics`]: Symbols appended regardless of the header
//! - [`generate`]: The pass that wires them together
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use defgen_core::generate_in_dir;
//!
//! let report = generate_in_dir("./include")?;
//! println!("wrote {} names to {}", report.stats.total(), report.def_path.display());
//! # Ok::<(), defgen_core::Error>(())
//! ```
//!
//! ## Extensibility
//!
//! Implement [`ExportSink`] to consume symbols some other way than writing
//! a `.def` file.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod def;
pub mod error;
pub mod generate;
pub mod scanner;
pub mod statics;

// Re-export primary types for convenience
pub use def::{DefWriter, ExportSink, ExportStats, SymbolCollector};
pub use error::{Error, Result};
pub use generate::{generate, generate_in_dir, GenerateReport, Generator, GeneratorConfig};
pub use scanner::{classify, HeaderScanner, Lookback, Rule, Symbol};
pub use statics::{StaticSymbolList, CLI_SUPPORT_SYMBOLS};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
