use std::collections::HashMap;

use crate::models::{Alert, BlogPost, Destination, InstaPost, ScrapedItem, Spot};

/// Lower-cases and maps spaces/underscores to `-` so slugs and display names share one key space.
pub fn normalize_destination_key(value: &str) -> String {
    value.replace('_', "-").replace(' ', "-").to_lowercase()
}

/// What a destination can offer the planner.
#[derive(Debug, Clone, Copy)]
pub enum DestinationCatalog<'a> {
    /// Individually scoreable points of interest.
    RichSpots(&'a [Spot]),
    /// Only category-level profile data; segments are synthesized.
    GenericCategory,
}

/// Immutable view of every dataset the engine reads. Replaced wholesale on reload.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub version: u64,
    pub flagship_id: String,
    pub destinations: Vec<Destination>,
    pub spots: Vec<Spot>,
    pub blog_posts: Vec<BlogPost>,
    pub insta_posts: Vec<InstaPost>,
    pub alerts: Vec<Alert>,
    index: HashMap<String, usize>,
}

impl CatalogSnapshot {
    pub fn new(
        flagship_id: impl Into<String>,
        destinations: Vec<Destination>,
        spots: Vec<Spot>,
        blog_posts: Vec<BlogPost>,
        insta_posts: Vec<InstaPost>,
        alerts: Vec<Alert>,
    ) -> Self {
        let mut index = HashMap::new();
        for (position, record) in destinations.iter().enumerate() {
            index.insert(record.id.clone(), position);
            index.insert(normalize_destination_key(&record.name), position);
        }

        Self {
            version: 0,
            flagship_id: flagship_id.into(),
            destinations,
            spots,
            blog_posts,
            insta_posts,
            alerts,
            index,
        }
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Resolves a slug or display name, trying the raw value before the normalised key.
    pub fn destination(&self, reference: &str) -> Option<&Destination> {
        if reference.trim().is_empty() {
            return None;
        }
        self.index
            .get(reference)
            .or_else(|| self.index.get(&normalize_destination_key(reference)))
            .map(|&position| &self.destinations[position])
    }

    pub fn flagship(&self) -> Option<&Destination> {
        self.destination(&self.flagship_id)
    }

    pub fn is_flagship(&self, destination: &Destination) -> bool {
        destination.id == self.flagship_id
    }

    pub fn catalog_for(&self, destination: &Destination) -> DestinationCatalog<'_> {
        if self.is_flagship(destination) {
            DestinationCatalog::RichSpots(&self.spots)
        } else {
            DestinationCatalog::GenericCategory
        }
    }

    pub fn alerts_for(&self, destination_id: &str) -> Vec<Alert> {
        self.alerts
            .iter()
            .filter(|alert| alert.destination_id.as_deref() == Some(destination_id))
            .cloned()
            .collect()
    }

    pub fn scraped_items(&self) -> Vec<ScrapedItem<'_>> {
        self.blog_posts
            .iter()
            .map(ScrapedItem::Blog)
            .chain(self.insta_posts.iter().map(ScrapedItem::Instagram))
            .chain(self.alerts.iter().map(ScrapedItem::Alert))
            .collect()
    }

    pub fn scraped_item(&self, item_id: &str) -> Option<ScrapedItem<'_>> {
        self.scraped_items()
            .into_iter()
            .find(|item| item.id() == item_id)
    }

    pub fn spot_by_name(&self, name: &str) -> Option<&Spot> {
        let search = name.trim().to_lowercase();
        self.spots
            .iter()
            .find(|spot| spot.name.to_lowercase() == search || spot.id.to_lowercase() == search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_snapshot;

    #[test]
    fn resolves_by_slug_and_display_name() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.destination("goa").map(|d| d.id.as_str()), Some("goa"));
        assert_eq!(
            snapshot.destination("Ziro Valley").map(|d| d.id.as_str()),
            Some("ziro-valley")
        );
        assert_eq!(
            snapshot.destination("ZIRO_VALLEY").map(|d| d.id.as_str()),
            Some("ziro-valley")
        );
        assert!(snapshot.destination("atlantis").is_none());
        assert!(snapshot.destination("").is_none());
    }

    #[test]
    fn only_flagship_has_rich_spots() {
        let snapshot = sample_snapshot();
        let shimla = snapshot.destination("shimla").unwrap();
        let goa = snapshot.destination("goa").unwrap();
        assert!(matches!(snapshot.catalog_for(shimla), DestinationCatalog::RichSpots(_)));
        assert!(matches!(snapshot.catalog_for(goa), DestinationCatalog::GenericCategory));
    }

    #[test]
    fn finds_spot_by_name_or_id() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.spot_by_name(" kufri ").map(|s| s.id.as_str()), Some("kufri"));
        assert_eq!(snapshot.spot_by_name("JAKHU-TEMPLE").map(|s| s.id.as_str()), Some("jakhu-temple"));
    }
}
