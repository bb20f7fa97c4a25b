//! Target languages and their T5 instruction prefixes.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetLanguage {
    French,
    German,
    Romanian,
}

impl TargetLanguage {
    /// Selector order.
    pub const ALL: [TargetLanguage; 3] = [Self::French, Self::German, Self::Romanian];

    pub fn name(self) -> &'static str {
        match self {
            Self::French => "French",
            Self::German => "German",
            Self::Romanian => "Romanian",
        }
    }

    /// Instruction prefix that steers the model to this translation direction.
    pub fn prefix(self) -> &'static str {
        LanguagePrefixTable::global()
            .entry_for(self)
            .map(|entry| entry.prefix)
            .unwrap_or_default()
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixEntry {
    pub key: &'static str,
    pub language: TargetLanguage,
    pub prefix: &'static str,
}

/// Immutable mapping from lower-cased language name to instruction prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguagePrefixTable {
    entries: &'static [PrefixEntry],
}

static PREFIX_ENTRIES: [PrefixEntry; 3] = [
    PrefixEntry {
        key: "french",
        language: TargetLanguage::French,
        prefix: "translate English to French: ",
    },
    PrefixEntry {
        key: "german",
        language: TargetLanguage::German,
        prefix: "translate English to German: ",
    },
    PrefixEntry {
        key: "romanian",
        language: TargetLanguage::Romanian,
        prefix: "translate English to Romanian: ",
    },
];

static GLOBAL_TABLE: LanguagePrefixTable = LanguagePrefixTable {
    entries: &PREFIX_ENTRIES,
};

impl LanguagePrefixTable {
    pub fn global() -> &'static Self {
        &GLOBAL_TABLE
    }

    pub fn entries(&self) -> &'static [PrefixEntry] {
        self.entries
    }

    /// Case-insensitive lookup. Whitespace is significant.
    pub fn lookup(&self, language: &str) -> Option<&'static PrefixEntry> {
        let normalized = language.to_lowercase();
        self.entries.iter().find(|entry| entry.key == normalized)
    }

    fn entry_for(&self, language: TargetLanguage) -> Option<&'static PrefixEntry> {
        self.entries.iter().find(|entry| entry.language == language)
    }
}

pub fn resolve_language(language: &str) -> Option<TargetLanguage> {
    LanguagePrefixTable::global()
        .lookup(language)
        .map(|entry| entry.language)
}

/// Prefix-conditioned model input for `text`.
pub fn build_model_input(language: TargetLanguage, text: &str) -> String {
    let prefix = language.prefix();
    let mut input = String::with_capacity(prefix.len() + text.len());
    input.push_str(prefix);
    input.push_str(text);
    input
}

/// Comma-joined display names of every supported language.
pub fn available_languages() -> String {
    TargetLanguage::ALL
        .iter()
        .map(|language| language.name())
        .collect::<Vec<_>>()
        .join(", ")
}
