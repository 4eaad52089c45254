pub mod chat;
pub mod external;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument, warn};
use yatra_core::{
    ChatContext, ChatReply, Destination, DestinationSnapshot, ItineraryRequest, ItineraryResponse,
    PlanError, TagOutcome,
};
use yatra_observability::AppMetrics;
use yatra_storage::{CatalogRepository, ScrapedFeed, TagError};

pub use chat::ChatResponder;
pub use external::{ExternalModelError, ExternalPlanner, OpenAiConfig};

/// Catalog counts reported by the health endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatus {
    pub primary_destination: Option<String>,
    pub spots_loaded: usize,
    pub destinations_loaded: usize,
    pub catalog_version: u64,
    pub external_model: Option<String>,
}

pub struct TravelAgent<S>
where
    S: CatalogRepository,
{
    store: Arc<S>,
    external: ExternalPlanner,
    metrics: Arc<AppMetrics>,
}

impl<S> Clone for TravelAgent<S>
where
    S: CatalogRepository,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            external: self.external.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

impl<S> TravelAgent<S>
where
    S: CatalogRepository,
{
    pub fn new(store: Arc<S>, external: ExternalPlanner, metrics: Arc<AppMetrics>) -> Self {
        Self {
            store,
            external,
            metrics,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    /// Builds an itinerary. The external model is tried only when the request
    /// asks for it; its failures fall back to the deterministic plan silently.
    #[instrument(skip(self, request), fields(destination = %request.destination, days = request.days))]
    pub async fn generate_itinerary(
        &self,
        request: &ItineraryRequest,
    ) -> Result<ItineraryResponse, PlanError> {
        let started = Instant::now();
        let snapshot = self.store.snapshot();
        let tags = self.store.hidden_gem_tags();
        let draft = yatra_core::generate_itinerary(&snapshot, &tags, request, Utc::now())?;

        let (response, path) = if request.use_external_model {
            match self.external.refine(request, &draft).await {
                Ok(refined) => (refined, "external"),
                Err(err) => {
                    self.metrics.inc_external_fallback();
                    warn!(error = %err, "external itinerary unavailable, using deterministic plan");
                    (draft, "deterministic")
                }
            }
        } else {
            (draft, "deterministic")
        };

        self.metrics.inc_itinerary(path);
        self.metrics.observe_latency(started.elapsed());
        info!(
            path,
            destination_id = %response.summary.destination_id,
            hidden_gems = response.summary.hidden_gem_count,
            alerts = response.summary.alerts_applied,
            "itinerary generated"
        );
        Ok(response)
    }

    pub fn destination_snapshot(&self, slug: &str) -> Result<DestinationSnapshot, PlanError> {
        yatra_core::destination_snapshot(&self.store.snapshot(), slug, Utc::now())
    }

    pub fn list_destinations(&self) -> Vec<Destination> {
        self.store.snapshot().destinations.clone()
    }

    #[instrument(skip(self, message, context))]
    pub fn chat(&self, message: &str, context: Option<&ChatContext>) -> Result<ChatReply, PlanError> {
        let snapshot = self.store.snapshot();
        let reply = ChatResponder::new(&snapshot, Utc::now()).respond(message, context)?;
        self.metrics.inc_chat_reply();
        info!(confidence = reply.confidence, sources = reply.sources.len(), "chat handled");
        Ok(reply)
    }

    pub fn scraped_feed(&self, destination: Option<&str>) -> ScrapedFeed {
        self.store.scraped_feed(destination)
    }

    pub fn scraped_items(&self) -> Vec<serde_json::Value> {
        self.store.scraped_items()
    }

    pub fn mark_hidden_gem(
        &self,
        item_id: &str,
        destination_id: Option<&str>,
    ) -> Result<TagOutcome, TagError> {
        self.store.mark_hidden_gem(item_id, destination_id)
    }

    #[instrument(skip(self))]
    pub fn reload(&self) -> Result<u64> {
        let version = self.store.reload()?;
        self.metrics.inc_reload();
        Ok(version)
    }

    pub fn status(&self) -> CatalogStatus {
        let snapshot = self.store.snapshot();
        CatalogStatus {
            primary_destination: snapshot.flagship().map(|d| d.name.clone()),
            spots_loaded: snapshot.spots.len(),
            destinations_loaded: snapshot.destinations.len(),
            catalog_version: snapshot.version,
            external_model: self.external.model().map(str::to_string),
        }
    }
}
