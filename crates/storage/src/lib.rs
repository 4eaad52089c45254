use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use yatra_core::{
    Alert, BlogPost, CatalogSnapshot, Destination, HiddenGemTags, InstaPost, ScrapedItem, Spot,
    TagOutcome,
};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_FLAGSHIP: &str = "shimla";
const TAG_NOTE: &str = "Hidden gem boost applied to itinerary scoring.";

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub flagship_id: String,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>, flagship_id: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            flagship_id: flagship_id.into(),
        }
    }

    pub fn from_env() -> Self {
        let data_dir = std::env::var("YATRA_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        let flagship_id = std::env::var("YATRA_FLAGSHIP_DESTINATION")
            .unwrap_or_else(|_| DEFAULT_FLAGSHIP.to_string());
        Self::new(data_dir, flagship_id)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join("destinations_catalog.json")
    }

    pub fn spots_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}_spots.json", self.flagship_id))
    }

    pub fn scraped_path(&self, name: &str) -> PathBuf {
        self.data_dir.join("scraped").join(format!("{name}.json"))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("data file missing: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed parsing {}", path.display()))
}

pub fn read_snapshot(config: &StoreConfig) -> Result<CatalogSnapshot> {
    let destinations: Vec<Destination> = read_json(&config.catalog_path())?;
    let spots: Vec<Spot> = read_json(&config.spots_path())?;
    let blog_posts: Vec<BlogPost> = read_json(&config.scraped_path("blog_posts"))?;
    let insta_posts: Vec<InstaPost> = read_json(&config.scraped_path("insta_posts"))?;
    let alerts: Vec<Alert> = read_json(&config.scraped_path("alerts"))?;

    Ok(CatalogSnapshot::new(
        config.flagship_id.clone(),
        destinations,
        spots,
        blog_posts,
        insta_posts,
        alerts,
    ))
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("No scraped item with id '{0}'")]
    UnknownItem(String),
    #[error("Destination not resolved for hidden gem tagging; provide destinationId.")]
    UnresolvedDestination,
}

/// Scraped records for the admin feed, optionally narrowed to one destination.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapedFeed {
    pub blogs: Vec<BlogPost>,
    pub insta: Vec<InstaPost>,
    pub alerts: Vec<Alert>,
}

impl ScrapedFeed {
    pub fn from_snapshot(snapshot: &CatalogSnapshot, destination: Option<&str>) -> Self {
        let keep = |item: ScrapedItem<'_>| match destination {
            None => true,
            Some(wanted) => {
                item.destination_id() == Some(wanted) || item.destination_text() == Some(wanted)
            }
        };

        Self {
            blogs: snapshot
                .blog_posts
                .iter()
                .filter(|post| keep(ScrapedItem::Blog(post)))
                .cloned()
                .collect(),
            insta: snapshot
                .insta_posts
                .iter()
                .filter(|post| keep(ScrapedItem::Instagram(post)))
                .cloned()
                .collect(),
            alerts: snapshot
                .alerts
                .iter()
                .filter(|alert| keep(ScrapedItem::Alert(alert)))
                .cloned()
                .collect(),
        }
    }
}

/// Read access to the active catalog plus the admin mutations that touch it.
pub trait CatalogRepository: Send + Sync {
    fn snapshot(&self) -> Arc<CatalogSnapshot>;
    fn hidden_gem_tags(&self) -> HiddenGemTags;
    fn reload(&self) -> Result<u64>;
    fn mark_hidden_gem(&self, item_id: &str, destination_id: Option<&str>)
        -> Result<TagOutcome, TagError>;

    fn scraped_feed(&self, destination: Option<&str>) -> ScrapedFeed {
        ScrapedFeed::from_snapshot(&self.snapshot(), destination)
    }

    /// Every scraped record flattened with its `sourceType`.
    fn scraped_items(&self) -> Vec<serde_json::Value> {
        self.snapshot()
            .scraped_items()
            .iter()
            .map(ScrapedItem::to_json)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub enum CatalogSource {
    Files(StoreConfig),
    /// Pre-built snapshot, reinstalled as-is on reload.
    Fixed(Arc<CatalogSnapshot>),
}

impl CatalogSource {
    fn build(&self) -> Result<CatalogSnapshot> {
        match self {
            Self::Files(config) => read_snapshot(config),
            Self::Fixed(snapshot) => Ok(snapshot.as_ref().clone()),
        }
    }
}

#[derive(Debug)]
struct StoreState {
    snapshot: Arc<CatalogSnapshot>,
    hidden_gems: HiddenGemTags,
}

/// Holds the active catalog snapshot. Readers clone the `Arc` and never see a
/// half-loaded dataset; reload and tagging serialise on the same lock.
#[derive(Debug)]
pub struct DataStore {
    source: CatalogSource,
    state: RwLock<StoreState>,
}

impl DataStore {
    pub fn load(config: StoreConfig) -> Result<Self> {
        Self::open(CatalogSource::Files(config))
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        let snapshot = Arc::new(snapshot.with_version(1));
        Self {
            source: CatalogSource::Fixed(snapshot.clone()),
            state: RwLock::new(StoreState {
                snapshot,
                hidden_gems: HiddenGemTags::new(),
            }),
        }
    }

    pub fn open(source: CatalogSource) -> Result<Self> {
        let snapshot = source.build()?.with_version(1);
        info!(
            destinations = snapshot.destinations.len(),
            spots = snapshot.spots.len(),
            flagship = %snapshot.flagship_id,
            "catalog loaded"
        );
        Ok(Self {
            source,
            state: RwLock::new(StoreState {
                snapshot: Arc::new(snapshot),
                hidden_gems: HiddenGemTags::new(),
            }),
        })
    }

    pub fn version(&self) -> u64 {
        self.state.read().snapshot.version
    }
}

impl CatalogRepository for DataStore {
    fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.state.read().snapshot.clone()
    }

    fn hidden_gem_tags(&self) -> HiddenGemTags {
        self.state.read().hidden_gems.clone()
    }

    /// Rebuilds from the source off-lock, then swaps it in and clears admin tags.
    fn reload(&self) -> Result<u64> {
        let fresh = self.source.build().context("catalog reload failed")?;

        let mut state = self.state.write();
        let version = state.snapshot.version + 1;
        state.snapshot = Arc::new(fresh.with_version(version));
        state.hidden_gems.clear();
        drop(state);

        info!(version, "catalog reloaded");
        Ok(version)
    }

    fn mark_hidden_gem(
        &self,
        item_id: &str,
        destination_id: Option<&str>,
    ) -> Result<TagOutcome, TagError> {
        let mut state = self.state.write();
        let snapshot = state.snapshot.clone();

        let item = snapshot
            .scraped_item(item_id)
            .ok_or_else(|| TagError::UnknownItem(item_id.to_string()))?;
        let target = destination_id
            .filter(|value| !value.is_empty())
            .or_else(|| item.destination_id())
            .or_else(|| item.destination_text());
        let destination = target
            .and_then(|reference| snapshot.destination(reference))
            .ok_or(TagError::UnresolvedDestination)?;

        state
            .hidden_gems
            .entry(destination.id.clone())
            .or_default()
            .push(item_id.to_string());
        info!(item_id, destination = %destination.id, "hidden gem tagged");

        Ok(TagOutcome {
            tagged_item_id: item_id.to_string(),
            destination_id: destination.id.clone(),
            note: TAG_NOTE.to_string(),
        })
    }
}
