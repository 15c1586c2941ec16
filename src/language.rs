// Language detection: a script check that tells Gujarati input apart from
// English so the backend can answer in the same language.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language tag sent along with a question.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    English,
    Gujarati,
}

impl LanguageTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::English => "english",
            LanguageTag::Gujarati => "gujarati",
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return `Gujarati` when any character falls in the Gujarati block
/// (U+0A80..=U+0AFF), `English` otherwise. Empty input is English.
pub fn detect(text: &str) -> LanguageTag {
    if text.chars().any(is_gujarati) {
        LanguageTag::Gujarati
    } else {
        LanguageTag::English
    }
}

fn is_gujarati(c: char) -> bool {
    ('\u{0A80}'..='\u{0AFF}').contains(&c)
}
