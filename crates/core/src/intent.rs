use serde::{Deserialize, Serialize};

/// What a traveler's chat message is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatIntent {
    CrowdUpdate,
    Alternative,
    Weather,
    RoadStatus,
    HiddenGem,
    General,
}

impl ChatIntent {
    pub fn confidence(self) -> f32 {
        match self {
            Self::CrowdUpdate => 0.84,
            Self::Alternative => 0.80,
            Self::Weather => 0.78,
            Self::RoadStatus => 0.82,
            Self::HiddenGem => 0.76,
            Self::General => 0.70,
        }
    }
}

/// Evaluated top to bottom; the first rule with a matching keyword wins.
const CHAT_RULES: &[(ChatIntent, &[&str])] = &[
    (ChatIntent::CrowdUpdate, &["crowd", "busy"]),
    (ChatIntent::Alternative, &["alternate", "instead", "option"]),
    (ChatIntent::Weather, &["weather", "rain", "snow"]),
    (ChatIntent::RoadStatus, &["road", "closure", "traffic"]),
    (ChatIntent::HiddenGem, &["hidden gem", "offbeat"]),
];

pub fn normalize_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn classify_chat(text: &str) -> ChatIntent {
    let lower = normalize_text(text);
    CHAT_RULES
        .iter()
        .find(|(_, needles)| contains_any(&lower, needles))
        .map(|(intent, _)| *intent)
        .unwrap_or(ChatIntent::General)
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}
