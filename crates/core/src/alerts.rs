use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::models::{Alert, Category, Destination};
use crate::template::{render, TemplateVars};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Road,
    Weather,
    Event,
}

impl AlertKind {
    pub const ALL: [AlertKind; 3] = [AlertKind::Road, AlertKind::Weather, AlertKind::Event];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Road => "road",
            Self::Weather => "weather",
            Self::Event => "event",
        }
    }

    fn severity(self) -> &'static str {
        match self {
            Self::Road | Self::Weather => "medium",
            Self::Event => "low",
        }
    }

    fn offset_hours(self) -> i64 {
        match self {
            Self::Road => 0,
            Self::Weather => 1,
            Self::Event => 2,
        }
    }
}

struct AlertTemplates {
    road: &'static str,
    weather: &'static str,
    event: &'static str,
}

impl AlertTemplates {
    fn text(&self, kind: AlertKind) -> &'static str {
        match kind {
            AlertKind::Road => self.road,
            AlertKind::Weather => self.weather,
            AlertKind::Event => self.event,
        }
    }
}

const DEFAULT_TEMPLATES: AlertTemplates = AlertTemplates {
    road: "Local authorities report intermittent slowdowns en route. Keep 30 min buffer.",
    weather: "Seasonal conditions stable; pack a light layer for evenings.",
    event: "Weekly pop-up market adds buzz near the main square each Friday.",
};

fn templates_for(category: &Category) -> &'static AlertTemplates {
    match category {
        Category::HillStationsMountains => &AlertTemplates {
            road: "Hairpin resurfacing on the approach road into {name}. Expect 25–30 min single-lane holds during daylight.",
            weather: "Evening drizzle forecast this week; pack shells and expect temperatures to dip to 8 °C after sunset.",
            event: "Local folk music circle at the heritage ridge every Saturday 6–8 PM. Arrive early for seating.",
        },
        Category::NatureTrekking => &AlertTemplates {
            road: "Forest department restricts vehicle entry past the last village between 10 AM–4 PM. Hire local jeeps or trek the final stretch.",
            weather: "Misty mornings likely; trails stay slick until late morning. Micro-spikes recommended.",
            event: "Community eco-walk with naturalists on weekends. Slots open on the tourism kiosk the prior evening.",
        },
        Category::BeachesBackwaters => &AlertTemplates {
            road: "Coastal road diversions near {name} due to promenade upgrade. Follow detour boards via village lanes.",
            weather: "Moderate swells expected midweek. Lifeguards hoisting yellow flags from noon to 3 PM.",
            event: "Sundowner flea market with live music on Friday evenings at the main shack belt.",
        },
        Category::CoastalAreas => &AlertTemplates {
            road: "NH66 night-time restrictions for bridge works. Day drives unaffected but speed capped at 60 kmph.",
            weather: "Sea breeze carries humidity spikes; hydrate and carry reef-safe sunscreen.",
            event: "Harbor cruise parade scheduled Saturday 7 PM. Book tickets before noon.",
        },
        Category::Islands => &AlertTemplates {
            road: "Jetty maintenance limits ferries post 4 PM. Plan island hops earlier in the day.",
            weather: "Light showers expected; seas slight, snorkeling visibility 15 m.",
            event: "Bioluminescence kayak tours running nightly around new moon.",
        },
        Category::CulturalHistorical => &AlertTemplates {
            road: "Old city streets partially pedestrianized for heritage week. Park outside the walled core and walk in.",
            weather: "Cool dry winds; perfect for rooftop walks but carry light layers for late evenings.",
            event: "Sound-and-light show at the fort nightly 7:30 PM. Tickets sell out by afternoon.",
        },
        Category::CitiesCulture => &AlertTemplates {
            road: "Metro repair work adds 15 min to CBD commutes; use app cabs or metro where available.",
            weather: "Pleasant evenings around 20 °C. Afternoon UV still high—carry hats.",
            event: "Pop-up art + food night market over the weekend warehouse district.",
        },
        Category::HeritageTemples => &AlertTemplates {
            road: "Temple town one-way system active during aarti hours. Follow police guidance or park before core zone.",
            weather: "Humid afternoons; mornings remain misty and photogenic.",
            event: "Special aarati + cultural procession announced for Saturday dawn. Modest attire enforced.",
        },
        Category::DesertHeritage => &AlertTemplates {
            road: "Dune safari route shifted due to mild sandstorm forecasts. Operators using the east ridge loop.",
            weather: "Day highs touch 32 °C, but desert nights dip below 12 °C—pack layers.",
            event: "Folk dance + astro photography campfire at Sam dunes 8 PM nightly.",
        },
        Category::MountainsNature => &AlertTemplates {
            road: "Landslide clearance along the gorge road 7–10 AM daily. Buffer an hour for transfers.",
            weather: "Morning fog lifts by 9 AM; afternoons breezy with scattered showers.",
            event: "Community harvest market + bamboo craft demos in the main square this Sunday.",
        },
        Category::MajorCities => &AlertTemplates {
            road: "Flyover resurfacing adds 20 min to airport run—leave earlier during peak hours.",
            weather: "Air quality moderate; keep reusable masks handy for evening traffic corridors.",
            event: "Night cycling + street food crawl curated by locals every Saturday midnight.",
        },
        _ => &DEFAULT_TEMPLATES,
    }
}

fn synthesize_alert(kind: AlertKind, text: String, destination: &Destination, now: DateTime<Utc>) -> Alert {
    let timestamp = (now + Duration::hours(kind.offset_hours()))
        .to_rfc3339_opts(SecondsFormat::Micros, true);
    let title = text.split('.').next().unwrap_or_default().to_string();

    Alert {
        id: format!("synthetic-{}-{}", destination.id, kind.as_str()),
        kind: kind.as_str().to_string(),
        severity: kind.severity().to_string(),
        title,
        description: text,
        affected_areas: vec![destination.name.clone()],
        timestamp,
        destination_id: Some(destination.id.clone()),
    }
}

/// Curated alerts for the destination, or a synthesized road/weather/event trio when none exist.
/// Synthesized alerts are returned only and never written back to `curated`.
pub fn destination_alerts(destination: &Destination, curated: &[Alert], now: DateTime<Utc>) -> Vec<Alert> {
    let matching = curated
        .iter()
        .filter(|alert| alert.destination_id.as_deref() == Some(destination.id.as_str()))
        .cloned()
        .collect::<Vec<_>>();
    if !matching.is_empty() {
        return matching;
    }

    let templates = templates_for(&destination.primary_category);
    let vars = TemplateVars::name(&destination.name);
    AlertKind::ALL
        .iter()
        .map(|&kind| synthesize_alert(kind, render(templates.text(kind), &vars), destination, now))
        .collect()
}

pub fn summarize_alerts(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return "No live advisories; continue to monitor local police and IMD handles.".to_string();
    }
    alerts
        .iter()
        .take(2)
        .map(|alert| format!("{} ({})", alert.title, alert.severity))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{curated_alert, destination};
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 6, 0, 0).unwrap()
    }

    #[test]
    fn curated_alerts_win() {
        let shimla = destination("shimla", "Shimla", "Hill Stations & Mountain Regions");
        let pool = vec![
            curated_alert("a1", "road_closure", "shimla"),
            curated_alert("a2", "weather", "goa"),
        ];
        let alerts = destination_alerts(&shimla, &pool, fixed_now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "a1");
    }

    #[test]
    fn synthesizes_three_when_none_match() {
        let goa = destination("goa", "Goa", "Beaches & Backwaters");
        let pool = vec![curated_alert("a1", "road_closure", "shimla")];
        let alerts = destination_alerts(&goa, &pool, fixed_now());

        let kinds = alerts.iter().map(|a| a.kind.as_str()).collect::<Vec<_>>();
        assert_eq!(kinds, vec!["road", "weather", "event"]);
        assert!(alerts.iter().all(|a| a.destination_id.as_deref() == Some("goa")));
        assert!(alerts.iter().all(|a| a.affected_areas == vec!["Goa".to_string()]));
        assert_eq!(alerts[0].id, "synthetic-goa-road");
        assert_eq!(alerts[0].title, "Coastal road diversions near Goa due to promenade upgrade");
        assert_eq!(alerts[0].severity, "medium");
        assert_eq!(alerts[2].severity, "low");
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn synthesized_timestamps_are_offset_per_kind() {
        let goa = destination("goa", "Goa", "Beaches & Backwaters");
        let alerts = destination_alerts(&goa, &[], fixed_now());
        assert_eq!(alerts[0].timestamp, "2026-03-14T06:00:00.000000Z");
        assert_eq!(alerts[1].timestamp, "2026-03-14T07:00:00.000000Z");
        assert_eq!(alerts[2].timestamp, "2026-03-14T08:00:00.000000Z");
    }

    #[test]
    fn unknown_category_uses_default_templates() {
        let ziro = destination("ziro-valley", "Ziro Valley", "Hill Stations");
        let alerts = destination_alerts(&ziro, &[], fixed_now());
        assert_eq!(
            alerts[0].title,
            "Local authorities report intermittent slowdowns en route"
        );
    }

    #[test]
    fn summary_lists_first_two() {
        assert!(summarize_alerts(&[]).starts_with("No live advisories"));
        let goa = destination("goa", "Goa", "Beaches & Backwaters");
        let alerts = destination_alerts(&goa, &[], fixed_now());
        let summary = summarize_alerts(&alerts);
        assert_eq!(summary.matches(';').count(), 1);
        assert!(summary.ends_with("(medium)"));
    }
}
