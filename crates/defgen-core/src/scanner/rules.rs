//! Recognition rules for the header scanner.
//!
//! Each rule is a guard (cheap test of the line shape) and an extraction
//! pattern (pulls the exported name out of the matched text). The patterns
//! are compiled once and shared by every line of every pass.
//!
//! These are formatting heuristics, not a C grammar. The header's layout
//! convention is what decides which symbols get exported, so the patterns
//! are kept exactly as lenient as they are.

use super::{Lookback, Symbol};
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Start of a codec-type constant definition, e.g. `DEFINE_ISOM_CODEC_TYPE(`
static CODEC_TYPE_GUARD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^DEFINE_(?:ISOM|QTFF)_CODEC_TYPE\(").unwrap());

/// Type/qualifier prefix, whitespace, at most one `*`, then the name verbatim
static FUNCTION_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.+\s+\*?(.+)").unwrap());

/// First macro argument up to the following comma
static CODEC_TYPE_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.+\s+((?:ISOM|QT|LSMASH)_CODEC_TYPE_.+?),\s+.+").unwrap()
});

/// Rules in the order they are tried against each line.
pub const RULES: [Rule; 2] = [Rule::FunctionPrototype, Rule::CodecType];

/// A line recognition rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// A lone `(` line closes a prototype whose name sits on the previous line:
    ///
    /// ```text
    /// lsmash_root_t *lsmash_create_root
    /// (
    /// ```
    FunctionPrototype,
    /// A codec-type constant definition:
    ///
    /// ```text
    /// DEFINE_ISOM_CODEC_TYPE( ISOM_CODEC_TYPE_AVC1_VIDEO, LSMASH_4CC( 'a', 'v', 'c', '1' ) );
    /// ```
    CodecType,
}

impl Rule {
    /// Human-readable rule name
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::FunctionPrototype => "function prototype",
            Rule::CodecType => "codec type",
        }
    }

    /// Returns true if the line shape selects this rule.
    ///
    /// A lone `(` with nothing buffered before it is not a prototype; that
    /// only happens when it is the first line of the header.
    pub fn guard(&self, lookback: &Lookback<'_>) -> bool {
        match self {
            Rule::FunctionPrototype => {
                lookback.current.trim() == "(" && !lookback.previous.is_empty()
            }
            Rule::CodecType => CODEC_TYPE_GUARD.is_match(lookback.current),
        }
    }

    /// The line the symbol is extracted from
    pub fn source<'a>(&self, lookback: &Lookback<'a>) -> &'a str {
        match self {
            Rule::FunctionPrototype => lookback.previous,
            Rule::CodecType => lookback.current,
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Rule::FunctionPrototype => &FUNCTION_NAME_PATTERN,
            Rule::CodecType => &CODEC_TYPE_NAME_PATTERN,
        }
    }

    /// Extracts the symbol for a line whose guard already matched.
    ///
    /// The capture is taken literally: trailing comments or other text after
    /// the name are kept. A guard-matching line the pattern cannot capture
    /// from is an error, not a skip.
    pub fn extract(&self, lookback: &Lookback<'_>, line_number: usize) -> Result<Symbol> {
        let source = self.source(lookback);
        let name = self
            .pattern()
            .captures(source)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| Error::missing_capture(*self, line_number, source))?;

        Ok(Symbol::new(name, *self, line_number))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(rule: Rule, previous: &str, current: &str) -> Result<Symbol> {
        rule.extract(&Lookback::new(previous, current), 1)
    }

    #[test]
    fn test_rule_priority() {
        assert_eq!(RULES, [Rule::FunctionPrototype, Rule::CodecType]);
    }

    #[test]
    fn test_function_guard() {
        let rule = Rule::FunctionPrototype;
        assert!(rule.guard(&Lookback::new("void lsmash_foo", "(")));
        assert!(rule.guard(&Lookback::new("void lsmash_foo", "  (\t")));
        assert!(!rule.guard(&Lookback::new("", "(")));
        assert!(!rule.guard(&Lookback::new("void lsmash_foo", "( void );")));
        assert!(!rule.guard(&Lookback::new("void lsmash_foo", ")")));
    }

    #[test]
    fn test_function_name_extraction() {
        let rule = Rule::FunctionPrototype;
        assert_eq!(extract(rule, "void lsmash_foo", "(").unwrap().name(), "lsmash_foo");
        assert_eq!(
            extract(rule, "lsmash_root_t *lsmash_create_root", "(").unwrap().name(),
            "lsmash_create_root"
        );
        assert_eq!(
            extract(rule, "const char *lsmash_get_name", "(").unwrap().name(),
            "lsmash_get_name"
        );
        assert_eq!(
            extract(rule, "int64_t lsmash_read_file", "(").unwrap().name(),
            "lsmash_read_file"
        );
    }

    #[test]
    fn test_function_name_keeps_trailing_text() {
        let symbol = extract(Rule::FunctionPrototype, "int lsmash_bar /* note", "(").unwrap();
        assert_eq!(symbol.name(), "note");

        let symbol = extract(Rule::FunctionPrototype, "void **lsmash_baz", "(").unwrap();
        assert_eq!(symbol.name(), "*lsmash_baz");
    }

    #[test]
    fn test_function_name_lenient_on_non_declarations() {
        let symbol = extract(Rule::FunctionPrototype, "/* a comment */", "(").unwrap();
        assert_eq!(symbol.name(), "/");

        let symbol = extract(Rule::FunctionPrototype, "   ", "(").unwrap();
        assert_eq!(symbol.name(), " ");
    }

    #[test]
    fn test_function_name_missing_capture() {
        let err = extract(Rule::FunctionPrototype, "lsmash_bare", "(").unwrap_err();
        match err {
            Error::MissingCapture { rule, line, .. } => {
                assert_eq!(rule, Rule::FunctionPrototype);
                assert_eq!(line, "lsmash_bare");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_codec_guard() {
        let rule = Rule::CodecType;
        assert!(rule.guard(&Lookback::new("", "DEFINE_ISOM_CODEC_TYPE( X, Y )")));
        assert!(rule.guard(&Lookback::new("", "DEFINE_QTFF_CODEC_TYPE( X, Y )")));
        assert!(!rule.guard(&Lookback::new("", "#define DEFINE_ISOM_CODEC_TYPE( A, B ) \\")));
        assert!(!rule.guard(&Lookback::new("", " DEFINE_ISOM_CODEC_TYPE( X, Y )")));
        assert!(!rule.guard(&Lookback::new("", "DEFINE_MP4_CODEC_TYPE( X, Y )")));
        assert!(!rule.guard(&Lookback::new("", "DEFINE_ISOM_CODEC_TYPE ( X, Y )")));
    }

    #[test]
    fn test_codec_name_extraction() {
        let rule = Rule::CodecType;
        let symbol = extract(
            rule,
            "",
            "DEFINE_ISOM_CODEC_TYPE( ISOM_CODEC_TYPE_AVC1_VIDEO, some_value )",
        )
        .unwrap();
        assert_eq!(symbol.name(), "ISOM_CODEC_TYPE_AVC1_VIDEO");

        let symbol = extract(
            rule,
            "",
            "DEFINE_QTFF_CODEC_TYPE( QT_CODEC_TYPE_APCH_VIDEO,   LSMASH_4CC( 'a', 'p', 'c', 'h' ) );    /* Apple ProRes 422 High Quality */",
        )
        .unwrap();
        assert_eq!(symbol.name(), "QT_CODEC_TYPE_APCH_VIDEO");

        let symbol = extract(
            rule,
            "",
            "DEFINE_ISOM_CODEC_TYPE( LSMASH_CODEC_TYPE_RAW, LSMASH_4CC( 'r', 'a', 'w', ' ' ) );",
        )
        .unwrap();
        assert_eq!(symbol.name(), "LSMASH_CODEC_TYPE_RAW");
    }

    #[test]
    fn test_codec_name_missing_capture() {
        for line in [
            "DEFINE_ISOM_CODEC_TYPE( MP4_CODEC_TYPE_FOO, bar )",
            "DEFINE_ISOM_CODEC_TYPE( ISOM_CODEC_TYPE_FOO )",
            "DEFINE_ISOM_CODEC_TYPE(ISOM_CODEC_TYPE_FOO, bar )",
        ] {
            let err = extract(Rule::CodecType, "", line).unwrap_err();
            assert!(matches!(err, Error::MissingCapture { rule: Rule::CodecType, .. }));
        }
    }
}
