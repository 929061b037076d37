//! Symbols exported in addition to what the public header declares.

/// A fixed, ordered list of symbol names appended to every definition file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticSymbolList {
    /// Bumped whenever the list changes
    pub revision: u32,
    /// Symbol names, in output order
    pub names: &'static [&'static str],
}

impl StaticSymbolList {
    /// Number of names in the list
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the list has no names
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates the names in output order
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }
}

/// Importer and utility entry points the command-line tools link against.
///
/// None of these appear in `lsmash.h`, so the scanner never finds them.
pub const CLI_SUPPORT_SYMBOLS: StaticSymbolList = StaticSymbolList {
    revision: 1,
    names: &[
        "lsmash_importer_open",
        "lsmash_importer_get_access_unit",
        "lsmash_importer_close",
        "lsmash_importer_get_track_count",
        "lsmash_importer_get_last_delta",
        "lsmash_importer_construct_timeline",
        "lsmash_duplicate_summary",
        "lsmash_string_from_wchar",
        "lsmash_win32_fopen",
    ],
};
