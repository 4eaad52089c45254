use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Admin-applied hidden-gem tags: destination id -> tagged scraped item ids.
pub type HiddenGemTags = HashMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    HillStationsMountains,
    HillStations,
    NatureTrekking,
    BeachesBackwaters,
    CoastalAreas,
    Islands,
    CulturalHistorical,
    CulturalHeritage,
    CitiesCulture,
    MajorCities,
    HeritageTemples,
    DesertHeritage,
    MountainsNature,
    Other(String),
}

impl Category {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "Hill Stations & Mountain Regions" => Self::HillStationsMountains,
            "Hill Stations" => Self::HillStations,
            "Nature & Trekking Spots" => Self::NatureTrekking,
            "Beaches & Backwaters" => Self::BeachesBackwaters,
            "Coastal Areas" => Self::CoastalAreas,
            "Islands" => Self::Islands,
            "Cultural & Historical" => Self::CulturalHistorical,
            "Cultural & Heritage" => Self::CulturalHeritage,
            "Cities & Culture" => Self::CitiesCulture,
            "Major Cities" => Self::MajorCities,
            "Heritage & Temple Destinations" => Self::HeritageTemples,
            "Desert & Heritage" => Self::DesertHeritage,
            "Mountains & Nature" => Self::MountainsNature,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::HillStationsMountains => "Hill Stations & Mountain Regions",
            Self::HillStations => "Hill Stations",
            Self::NatureTrekking => "Nature & Trekking Spots",
            Self::BeachesBackwaters => "Beaches & Backwaters",
            Self::CoastalAreas => "Coastal Areas",
            Self::Islands => "Islands",
            Self::CulturalHistorical => "Cultural & Historical",
            Self::CulturalHeritage => "Cultural & Heritage",
            Self::CitiesCulture => "Cities & Culture",
            Self::MajorCities => "Major Cities",
            Self::HeritageTemples => "Heritage & Temple Destinations",
            Self::DesertHeritage => "Desert & Heritage",
            Self::MountainsNature => "Mountains & Nature",
            Self::Other(value) => value.as_str(),
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.label().to_string()
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub region: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub primary_category: Category,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub best_time: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const ORIGIN: Coordinates = Coordinates { lat: 0.0, lng: 0.0 };

    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub id: String,
    pub name: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub opening_hours: String,
    #[serde(default = "default_entry_fee")]
    pub entry_fee: String,
    #[serde(default = "default_crowd_score")]
    pub crowd_score: u8,
    #[serde(default, deserialize_with = "flag_from_bool_or_int")]
    pub is_hidden_gem: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub best_time: Option<String>,
}

impl Spot {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

fn default_entry_fee() -> String {
    "Free".to_string()
}

fn default_crowd_score() -> u8 {
    5
}

fn flag_from_bool_or_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub affected_areas: Vec<String>,
    pub timestamp: String,
    #[serde(default)]
    pub destination_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub destination_id: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstaPost {
    pub id: String,
    pub source: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub geo_tags: Vec<String>,
    #[serde(default)]
    pub destination_id: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapedSource {
    Blog,
    Instagram,
    Alert,
}

/// Borrowed view over any scraped record, used for admin tagging.
#[derive(Debug, Clone, Copy)]
pub enum ScrapedItem<'a> {
    Blog(&'a BlogPost),
    Instagram(&'a InstaPost),
    Alert(&'a Alert),
}

impl<'a> ScrapedItem<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Self::Blog(post) => &post.id,
            Self::Instagram(post) => &post.id,
            Self::Alert(alert) => &alert.id,
        }
    }

    pub fn source(&self) -> ScrapedSource {
        match self {
            Self::Blog(_) => ScrapedSource::Blog,
            Self::Instagram(_) => ScrapedSource::Instagram,
            Self::Alert(_) => ScrapedSource::Alert,
        }
    }

    pub fn destination_id(&self) -> Option<&'a str> {
        match self {
            Self::Blog(post) => post.destination_id.as_deref(),
            Self::Instagram(post) => post.destination_id.as_deref(),
            Self::Alert(alert) => alert.destination_id.as_deref(),
        }
    }

    pub fn destination_text(&self) -> Option<&'a str> {
        match self {
            Self::Blog(post) => post.destination.as_deref(),
            Self::Instagram(post) => post.destination.as_deref(),
            Self::Alert(_) => None,
        }
    }

    /// Serialised record with a `sourceType` label merged in.
    pub fn to_json(&self) -> serde_json::Value {
        let mut value = match self {
            Self::Blog(post) => serde_json::to_value(post),
            Self::Instagram(post) => serde_json::to_value(post),
            Self::Alert(alert) => serde_json::to_value(alert),
        }
        .unwrap_or(serde_json::Value::Null);

        if let Some(object) = value.as_object_mut() {
            object.insert("sourceType".to_string(), serde_json::json!(self.source()));
        }
        value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    Medium,
    High,
}

impl Budget {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Rough daily spend in rupees.
    pub fn daily_rupees(self) -> u32 {
        match self {
            Self::Low => 1500,
            Self::Medium => 2500,
            Self::High => 3800,
        }
    }

    pub fn daily_cost_text(self) -> &'static str {
        match self {
            Self::Low => "₹1.2k–₹1.8k / day · homestays + shared cabs",
            Self::Medium => "₹2k–₹3k / day · boutique stays + mix of taxis",
            Self::High => "₹3.5k+ / day · chauffeured drives + premium dining",
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }

    pub fn start_time(self) -> &'static str {
        match self {
            Self::Morning => "08:30",
            Self::Afternoon => "13:00",
            Self::Evening => "17:30",
        }
    }

    pub fn duration_hours(self) -> f64 {
        match self {
            Self::Morning => 3.0,
            Self::Afternoon => 3.5,
            Self::Evening => 3.0,
        }
    }

    /// Light-of-day word used in synthesized titles.
    pub fn mood(self) -> &'static str {
        match self {
            Self::Morning => "sunrise",
            Self::Afternoon => "midday",
            Self::Evening => "twilight",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    pub destination: String,
    pub days: u8,
    pub budget: Budget,
    #[serde(alias = "traveler_type")]
    pub traveler_type: String,
    pub interests: Vec<String>,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default, alias = "use_llm", alias = "use_external_model")]
    pub use_external_model: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItinerarySegment {
    pub time_of_day: TimeSlot,
    pub start_time: String,
    pub duration_hours: f64,
    pub spot_id: String,
    pub title: String,
    pub description: String,
    pub coordinates: Coordinates,
    pub entry_fee: String,
    pub travel_distance_km: f64,
    pub travel_suggestion: String,
    pub food_stop: String,
    pub interest_match_score: u8,
    pub notes: String,
}

impl ItinerarySegment {
    pub fn mentions_hidden_gem(&self) -> bool {
        self.notes.to_lowercase().contains("hidden gem")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRationale {
    pub cost_estimate: String,
    pub safety: String,
    pub road_trip: String,
    pub bike_route: String,
    pub hidden_gem: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: u8,
    pub theme: String,
    pub segments: Vec<ItinerarySegment>,
    pub why_plan: DayRationale,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItinerarySummary {
    pub destination_id: String,
    pub traveler_type: String,
    pub budget: Budget,
    pub interests: Vec<String>,
    pub cost_estimate: String,
    pub road_trip_plan: String,
    pub bike_plan: String,
    pub adventure_highlights: String,
    pub food_highlights: String,
    pub photo_highlights: String,
    pub nature_highlights: String,
    pub shopping_highlights: String,
    pub hidden_gem_callout: String,
    pub tagged_hidden_gems: usize,
    pub hidden_gem_count: usize,
    pub alerts_applied: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResponse {
    pub destination: String,
    pub month: Option<String>,
    pub days: Vec<DayPlan>,
    pub summary: ItinerarySummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationSnapshot {
    pub name: String,
    pub region: String,
    pub best_time: Option<String>,
    pub summary: Option<String>,
    pub interests: Vec<String>,
    pub tagline: String,
    pub hero_copy: String,
    pub top_spots: Vec<Spot>,
    pub experience_ideas: Vec<String>,
    pub alerts: Vec<Alert>,
    pub road_trip_plan: String,
    pub bike_plan: String,
    pub adventure_highlights: String,
    pub food_highlights: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    #[serde(default, alias = "destination_id")]
    pub destination_id: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl SourceRef {
    pub fn new(kind: &str, id: &str) -> Self {
        Self {
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub sources: Vec<SourceRef>,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagOutcome {
    pub tagged_item_id: String,
    pub destination_id: String,
    pub note: String,
}
