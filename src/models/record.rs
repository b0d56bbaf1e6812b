use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Scenario;

/// A persisted explanation row keyed by `(character, locale)`, one text
/// field per scenario.
///
/// The pipeline only ever reads these rows; curation of the store is an
/// external concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: i64,
    pub character: String,
    pub locale: String,
    pub pronunciation: Option<String>,
    pub stroke: Option<String>,
    pub meaning: Option<String>,
    pub idioms: Option<String>,
    pub culture: Option<String>,
    pub practice: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CharacterRecord {
    pub fn field(&self, scenario: Scenario) -> Option<&str> {
        let value = match scenario {
            Scenario::Pronunciation => &self.pronunciation,
            Scenario::Stroke => &self.stroke,
            Scenario::Meaning => &self.meaning,
            Scenario::Idioms => &self.idioms,
            Scenario::Culture => &self.culture,
            Scenario::Practice => &self.practice,
        };
        value.as_deref()
    }

    /// Full-row completeness gate: the record is usable only when every
    /// scenario field is present and non-empty. A single missing field
    /// discards the whole row; rows under active curation never reach
    /// callers half-filled.
    pub fn is_complete(&self) -> bool {
        Scenario::ALL
            .iter()
            .all(|scenario| self.field(*scenario).is_some_and(|v| !v.trim().is_empty()))
    }

    /// First non-empty field in priority order: the requested scenario
    /// first, then the remaining scenarios in their fixed order.
    pub fn content_for(&self, scenario: Scenario) -> String {
        std::iter::once(scenario)
            .chain(Scenario::ALL.into_iter().filter(|s| *s != scenario))
            .find_map(|s| self.field(s).filter(|v| !v.trim().is_empty()))
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> CharacterRecord {
        let now = Utc::now();
        CharacterRecord {
            id: 1,
            character: "好".to_string(),
            locale: "en".to_string(),
            pronunciation: Some("hǎo".to_string()),
            stroke: Some("six strokes".to_string()),
            meaning: Some("good".to_string()),
            idioms: Some("好事多磨".to_string()),
            culture: Some("common in greetings".to_string()),
            practice: Some("write it ten times".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_complete_record_passes_gate() {
        assert!(full_record().is_complete());
    }

    #[test]
    fn test_any_missing_field_fails_gate() {
        let mut record = full_record();
        record.idioms = None;
        assert!(!record.is_complete());
    }

    #[test]
    fn test_empty_string_field_fails_gate() {
        let mut record = full_record();
        record.culture = Some("   ".to_string());
        assert!(!record.is_complete());
    }

    #[test]
    fn test_content_for_prefers_requested_scenario() {
        let record = full_record();
        assert_eq!(record.content_for(Scenario::Stroke), "six strokes");
        assert_eq!(record.content_for(Scenario::Meaning), "good");
    }

    #[test]
    fn test_content_for_falls_back_in_fixed_order() {
        let mut record = full_record();
        record.stroke = None;
        assert_eq!(record.content_for(Scenario::Stroke), "hǎo");
    }
}
