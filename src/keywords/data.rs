use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchIntent {
    Informational,
    Navigational,
    Transactional,
    Commercial,
}

impl SearchIntent {
    pub const ALL: [SearchIntent; 4] = [
        Self::Informational,
        Self::Navigational,
        Self::Transactional,
        Self::Commercial,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Informational => "informational",
            Self::Navigational => "navigational",
            Self::Transactional => "transactional",
            Self::Commercial => "commercial",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Informational => "Informational",
            Self::Navigational => "Navigational",
            Self::Transactional => "Transactional",
            Self::Commercial => "Commercial",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRecord {
    pub text: String,
    pub size: f32,
    #[serde(alias = "relevanceScore")]
    pub importance_score: f32,
    pub search_intent: SearchIntent,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub variations: Vec<String>,
}
