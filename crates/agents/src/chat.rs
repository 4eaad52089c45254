use chrono::{DateTime, Utc};
use yatra_core::{
    classify_chat, destination_alerts, normalize_text, Alert, CatalogSnapshot, ChatContext,
    ChatIntent, ChatReply, Destination, PlanError, SourceRef, Spot,
};

const FIELD_NOTE_CHARS: usize = 160;

/// Rule-based travel assistant answering from one catalog snapshot.
pub struct ChatResponder<'a> {
    snapshot: &'a CatalogSnapshot,
    now: DateTime<Utc>,
}

struct Turn<'a> {
    text: String,
    destination: &'a Destination,
    flagship: bool,
    spot: Option<&'a Spot>,
    interests: Vec<String>,
    alerts: Vec<Alert>,
}

impl<'a> ChatResponder<'a> {
    pub fn new(snapshot: &'a CatalogSnapshot, now: DateTime<Utc>) -> Self {
        Self { snapshot, now }
    }

    pub fn respond(&self, message: &str, context: Option<&ChatContext>) -> Result<ChatReply, PlanError> {
        let destination = self.resolve_destination(context)?;
        let flagship = self.snapshot.is_flagship(destination);
        let text = normalize_text(message);
        let spot = if flagship { self.detect_spot(&text) } else { None };

        let turn = Turn {
            destination,
            flagship,
            spot,
            interests: context
                .map(|ctx| ctx.interests.iter().map(|i| i.to_lowercase()).collect())
                .unwrap_or_default(),
            alerts: destination_alerts(destination, &self.snapshot.alerts, self.now),
            text,
        };

        let intent = classify_chat(&turn.text);
        let (reply, source) = match intent {
            ChatIntent::CrowdUpdate => self.crowd_update(&turn),
            ChatIntent::Alternative => self.suggest_alternative(&turn),
            ChatIntent::Weather => weather_brief(&turn),
            ChatIntent::RoadStatus => road_status(&turn),
            ChatIntent::HiddenGem => self.hidden_gem_tip(&turn),
            ChatIntent::General => (general_answer(&turn), None),
        };

        Ok(ChatReply {
            reply,
            sources: source.into_iter().collect(),
            confidence: intent.confidence(),
        })
    }

    /// Context destination, else the flagship, else the first catalog record.
    fn resolve_destination(&self, context: Option<&ChatContext>) -> Result<&'a Destination, PlanError> {
        let snapshot = self.snapshot;
        context
            .and_then(|ctx| ctx.destination_id.as_deref().or(ctx.destination.as_deref()))
            .and_then(|reference| snapshot.destination(reference))
            .or_else(|| snapshot.flagship())
            .or_else(|| snapshot.destinations.first())
            .ok_or_else(|| PlanError::DataIntegrity("destination catalog is empty".to_string()))
    }

    fn detect_spot(&self, text: &str) -> Option<&'a Spot> {
        self.snapshot
            .spots
            .iter()
            .find(|spot| text.contains(&spot.name.to_lowercase()) || text.contains(&spot.id.to_lowercase()))
    }

    fn first_gem(&self) -> Option<&'a Spot> {
        self.snapshot
            .spots
            .iter()
            .find(|spot| spot.is_hidden_gem)
            .or_else(|| self.snapshot.spots.first())
    }

    fn crowd_update(&self, turn: &Turn<'a>) -> (String, Option<SourceRef>) {
        let Some(spot) = turn.spot.filter(|_| turn.flagship) else {
            let best_time = turn
                .destination
                .best_time
                .as_deref()
                .unwrap_or("typical shoulder months");
            return (
                format!(
                    "{} is calmest on weekday mornings before 10 AM. Peak window noted in our guide: {best_time}. \
                     Book key attractions in advance and keep a backup cafe/park in mind.",
                    turn.destination.name
                ),
                Some(SourceRef::new("destination", &turn.destination.id)),
            );
        };

        let advice = if spot.crowd_score >= 7 {
            "Go before 9 AM to beat the rush."
        } else {
            "Expect relaxed flows for most of the day."
        };
        let mut reply = format!(
            "{} is currently rated {}/10 on crowd scale. {advice}",
            spot.name, spot.crowd_score
        );

        let related = self
            .snapshot
            .insta_posts
            .iter()
            .find(|post| post.geo_tags.iter().any(|tag| tag == &spot.name));
        match related {
            Some(post) => {
                let excerpt = post.content.chars().take(FIELD_NOTE_CHARS).collect::<String>();
                reply.push_str(&format!(" Latest field note ({}): {excerpt}...", post.source));
                (reply, Some(SourceRef::new("insta", &post.id)))
            }
            None => (reply, None),
        }
    }

    fn suggest_alternative(&self, turn: &Turn<'a>) -> (String, Option<SourceRef>) {
        if turn.flagship {
            let current = turn.spot.map(|spot| spot.id.as_str());
            let candidate = self
                .snapshot
                .spots
                .iter()
                .find(|spot| {
                    Some(spot.id.as_str()) != current
                        && spot.is_hidden_gem
                        && spot.tags.iter().any(|tag| turn.interests.contains(&tag.to_lowercase()))
                })
                .or_else(|| self.first_gem());

            if let Some(candidate) = candidate {
                let replaced = turn.spot.map(|spot| spot.name.as_str()).unwrap_or("the busy stop");
                return (
                    format!(
                        "Swap {replaced} for {} — {} Crowd score {}/10 with easier access.",
                        candidate.name, candidate.description, candidate.crowd_score
                    ),
                    Some(SourceRef::new("spot", &candidate.id)),
                );
            }
        }

        let replaced = turn.spot.map(|spot| spot.name.as_str()).unwrap_or("the main attraction");
        let noted = if turn.interests.is_empty() {
            "general blend".to_string()
        } else {
            turn.interests.join(", ")
        };
        (
            format!(
                "Instead of {replaced}, detour to a local-led hidden gem near {}. \
                 Look for artisan lanes and community-run cafes — fewer crowds, richer stories. Interests noted: {noted}.",
                turn.destination.name
            ),
            Some(SourceRef::new("destination", &turn.destination.id)),
        )
    }

    fn hidden_gem_tip(&self, turn: &Turn<'a>) -> (String, Option<SourceRef>) {
        if let Some(gem) = self.first_gem().filter(|_| turn.flagship) {
            return (
                format!("Hidden gem pick: {} — {}", gem.name, gem.description),
                Some(SourceRef::new("spot", &gem.id)),
            );
        }
        (
            format!(
                "Hidden gem cue for {}: explore side streets highlighted in the region brief and ask homestay hosts about community-run spots.",
                turn.destination.name
            ),
            Some(SourceRef::new("destination", &turn.destination.id)),
        )
    }
}

fn first_alert<'t>(turn: &'t Turn<'_>, kind: &str) -> Option<&'t Alert> {
    turn.alerts.iter().find(|alert| alert.kind == kind)
}

fn weather_brief(turn: &Turn<'_>) -> (String, Option<SourceRef>) {
    match first_alert(turn, "weather") {
        Some(alert) => (
            format!("Weather desk: {} — {}", alert.title, alert.description),
            Some(SourceRef::new("alert", &alert.id)),
        ),
        None => (
            format!(
                "No live weather advisory for {}. Still pack a light layer and keep an eye on IMD updates.",
                turn.destination.name
            ),
            Some(SourceRef::new("destination", &turn.destination.id)),
        ),
    }
}

fn road_status(turn: &Turn<'_>) -> (String, Option<SourceRef>) {
    match first_alert(turn, "road_closure") {
        Some(alert) => (
            format!("Road ops: {} — {}", alert.title, alert.description),
            Some(SourceRef::new("alert", &alert.id)),
        ),
        None => (
            format!(
                "All arterial routes into {} currently open. Buffer 20 minutes for checkpoints and photo halts.",
                turn.destination.name
            ),
            Some(SourceRef::new("destination", &turn.destination.id)),
        ),
    }
}

fn general_answer(turn: &Turn<'_>) -> String {
    if let Some(spot) = turn.spot.filter(|_| turn.flagship) {
        return format!(
            "{} opens {} with entry fee {}. Best window: {}.",
            spot.name,
            spot.opening_hours,
            spot.entry_fee,
            spot.best_time.as_deref().unwrap_or("early morning")
        );
    }
    let destination = turn.destination;
    format!(
        "{} intel active. Expect best conditions around {}. {} Ask about road, weather, or alternate experiences for deeper cuts.",
        destination.name,
        destination.best_time.as_deref().unwrap_or("peak season"),
        destination.summary.as_deref().unwrap_or_default()
    )
}
