use serde::{Deserialize, Serialize};

use crate::error::{ExplainError, Result};

/// Inclusive bounds of the CJK Unified Ideographs block.
const CJK_START: char = '\u{4e00}';
const CJK_END: char = '\u{9fff}';

/// Whether a codepoint falls in U+4E00..=U+9FFF.
pub fn is_cjk(c: char) -> bool {
    (CJK_START..=CJK_END).contains(&c)
}

/// Exactly one codepoint in the CJK Unified Ideographs range.
///
/// Construction is the only validation point; once a value exists it is
/// guaranteed to be a single Chinese character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalCharacter(char);

impl CanonicalCharacter {
    pub fn new(c: char) -> Result<Self> {
        if is_cjk(c) {
            Ok(Self(c))
        } else {
            Err(ExplainError::Extraction(format!(
                "'{c}' is not a CJK unified ideograph"
            )))
        }
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

impl std::fmt::Display for CanonicalCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CanonicalCharacter {
    type Error = ExplainError;

    fn try_from(value: String) -> Result<Self> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => Err(ExplainError::Extraction(format!(
                "expected exactly one character, got '{value}'"
            ))),
        }
    }
}

impl From<CanonicalCharacter> for String {
    fn from(value: CanonicalCharacter) -> Self {
        value.0.to_string()
    }
}

/// Explanation facet. Selects the prompt template, the configured model,
/// and the cache field consulted first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Pronunciation,
    Stroke,
    Meaning,
    Idioms,
    Culture,
    Practice,
}

impl Scenario {
    pub const ALL: [Scenario; 6] = [
        Scenario::Pronunciation,
        Scenario::Stroke,
        Scenario::Meaning,
        Scenario::Idioms,
        Scenario::Culture,
        Scenario::Practice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pronunciation => "pronunciation",
            Self::Stroke => "stroke",
            Self::Meaning => "meaning",
            Self::Idioms => "idioms",
            Self::Culture => "culture",
            Self::Practice => "practice",
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pronunciation" => Ok(Self::Pronunciation),
            "stroke" => Ok(Self::Stroke),
            "meaning" => Ok(Self::Meaning),
            "idioms" => Ok(Self::Idioms),
            "culture" => Ok(Self::Culture),
            "practice" => Ok(Self::Practice),
            _ => Err(format!("Unknown scenario: {s}")),
        }
    }
}
