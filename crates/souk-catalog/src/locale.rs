use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Display language for marketplace labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    /// Picks the language for a BCP 47-ish locale tag ("ar", "ar-LB", "ar_LB").
    pub fn from_locale(locale: &str) -> Self {
        let language = locale.split(['-', '_']).next().unwrap_or(locale);
        if language.eq_ignore_ascii_case("ar") {
            Language::Ar
        } else {
            Language::En
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// Arabic renders right-to-left.
    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Ar)
    }
}
