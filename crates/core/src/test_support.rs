use crate::catalog::CatalogSnapshot;
use crate::models::{
    Alert, BlogPost, Budget, Category, Destination, InstaPost, ItineraryRequest, Spot,
};
use crate::template::title_case;

pub fn destination(id: &str, name: &str, category: &str) -> Destination {
    Destination {
        id: id.to_string(),
        name: name.to_string(),
        region: "North India".to_string(),
        state: None,
        primary_category: Category::parse(category),
        categories: vec![category.to_string()],
        interests: vec!["culture".to_string(), "food".to_string()],
        best_time: Some("Mar–Jun".to_string()),
        summary: Some(format!("{name} in brief.")),
    }
}

pub fn spot(id: &str, tags: &[&str], crowd: u8, fee: &str) -> Spot {
    Spot {
        id: id.to_string(),
        name: title_case(&id.replace('-', " ")),
        description: format!("About {id}."),
        lat: 31.10,
        lng: 77.17,
        opening_hours: "9 AM - 6 PM".to_string(),
        entry_fee: fee.to_string(),
        crowd_score: crowd,
        is_hidden_gem: false,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        best_time: None,
    }
}

fn placed(mut spot: Spot, lat: f64, lng: f64) -> Spot {
    spot.lat = lat;
    spot.lng = lng;
    spot
}

pub fn curated_alert(id: &str, kind: &str, destination_id: &str) -> Alert {
    Alert {
        id: id.to_string(),
        kind: kind.to_string(),
        severity: "high".to_string(),
        title: format!("{kind} advisory for {destination_id}"),
        description: "Details from the district office.".to_string(),
        affected_areas: vec![destination_id.to_string()],
        timestamp: "2026-01-05T08:00:00Z".to_string(),
        destination_id: Some(destination_id.to_string()),
    }
}

pub fn request(destination: &str, days: u8, interests: &[&str]) -> ItineraryRequest {
    ItineraryRequest {
        destination: destination.to_string(),
        days,
        budget: Budget::Low,
        traveler_type: "solo".to_string(),
        interests: interests.iter().map(|i| i.to_string()).collect(),
        month: None,
        use_external_model: false,
    }
}

pub fn sample_spots() -> Vec<Spot> {
    let kufri = placed(spot("kufri", &["trekking", "adventure"], 8, "Free"), 31.0977, 77.2676);
    let mut chadwick = placed(
        spot("chadwick-falls", &["nature", "photography", "trekking"], 3, "Free"),
        31.1003,
        77.1257,
    );
    chadwick.is_hidden_gem = true;

    vec![
        placed(spot("the-ridge", &["culture", "photography"], 9, "Free"), 31.1048, 77.1734),
        placed(spot("jakhu-temple", &["culture", "trekking"], 7, "Free"), 31.1014, 77.1847),
        kufri,
        chadwick,
        placed(spot("mall-road", &["shopping", "food"], 9, "Free"), 31.1040, 77.1720),
        placed(spot("glen-forest", &["trekking", "nature"], 4, "Free"), 31.1000, 77.1490),
        placed(spot("summer-hill", &["photography", "relaxation"], 4, "Free"), 31.1060, 77.1470),
        placed(spot("viceregal-lodge", &["culture", "photography"], 6, "₹50"), 31.1037, 77.1447),
    ]
}

pub fn sample_snapshot() -> CatalogSnapshot {
    let destinations = vec![
        destination("shimla", "Shimla", "Hill Stations & Mountain Regions"),
        destination("goa", "Goa", "Beaches & Backwaters"),
        destination("ziro-valley", "Ziro Valley", "Hill Stations"),
    ];
    let blog_posts = vec![BlogPost {
        id: "blog-1".to_string(),
        title: "Winter in Shimla".to_string(),
        author: Some("Asha".to_string()),
        content: "Snow on the ridge.".to_string(),
        tags: vec!["snow".to_string()],
        destination_id: Some("shimla".to_string()),
        destination: None,
    }];
    let insta_posts = vec![
        InstaPost {
            id: "insta-1".to_string(),
            source: "@hillwanderer".to_string(),
            content: "Kufri was packed by 10 AM, go early.".to_string(),
            geo_tags: vec!["Kufri".to_string()],
            destination_id: None,
            destination: Some("Shimla".to_string()),
        },
        InstaPost {
            id: "insta-2".to_string(),
            source: "@coastlines".to_string(),
            content: "Quiet sandbar at low tide.".to_string(),
            geo_tags: vec!["Palolem".to_string()],
            destination_id: Some("goa".to_string()),
            destination: None,
        },
    ];
    let alerts = vec![
        curated_alert("alert-road", "road_closure", "shimla"),
        curated_alert("alert-weather", "weather", "shimla"),
    ];

    CatalogSnapshot::new("shimla", destinations, sample_spots(), blog_posts, insta_posts, alerts)
}
