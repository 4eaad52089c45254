use crate::models::{Category, Destination};
use crate::template::{render, TemplateVars};

/// Thematic content for a destination category. `road_trip` and `bike_route`
/// keep their `{name}` placeholder until [`CategoryProfile::road_trip_for`] is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryProfile {
    pub terrain: &'static str,
    pub road_trip: &'static str,
    pub bike_route: &'static str,
    pub adventure_highlights: &'static str,
    pub food_highlights: &'static str,
    pub photo_highlights: &'static str,
    pub nature_highlights: &'static str,
    pub shopping_highlights: &'static str,
    pub hidden_gem: &'static str,
    pub food_stops: &'static [&'static str],
}

impl CategoryProfile {
    pub fn road_trip_for(&self, destination_name: &str) -> String {
        render(self.road_trip, &TemplateVars::name(destination_name))
    }

    pub fn bike_route_for(&self, destination_name: &str) -> String {
        render(self.bike_route, &TemplateVars::name(destination_name))
    }

    /// Food stop for a sequence position, cycling through the rotation.
    pub fn food_stop(&self, sequence: usize) -> &'static str {
        self.food_stops[sequence % self.food_stops.len()]
    }
}

pub const DEFAULT_PROFILE: CategoryProfile = CategoryProfile {
    terrain: "city promenades",
    road_trip: "Easy access by national highway; buffer 30 mins for toll queues.",
    bike_route: "Rent scooters in-town for last-mile hops; helmets mandatory.",
    adventure_highlights: "Guided walking tours and rooftop sundowners keep energy moderate.",
    food_highlights: "Street food crawls, craft coffee, and regional thalis.",
    photo_highlights: "Colonial boulevards with string lights at dusk.",
    nature_highlights: "Garden strolls and riverside bike tracks for slower hours.",
    shopping_highlights: "Night markets featuring indie designers and souvenir pop-ups.",
    hidden_gem: "Sneak into the old printing-press lane for quiet photo ops.",
    food_stops: &["Local bazaar chaat stall", "Indie coffee lab", "Artisanal dessert bar"],
};

const HILL_STATIONS_MOUNTAINS: CategoryProfile = CategoryProfile {
    terrain: "cedar ridgelines",
    road_trip: "Chandigarh–{name} expressway flows into pine hairpins; fuel up before Parwanoo and carry motion bands.",
    bike_route: "Rent Royal Enfields at the base town and chase sunrise loops to orchard villages; pack rain shells.",
    adventure_highlights: "Paragliding windows over meadow bowls + downhill MTB shuttles near ridge farms.",
    food_highlights: "Himachali dham thalis, Tibetan broth bowls, and bakery jalebis along Mall Road.",
    photo_highlights: "Golden-hour ridge decks, colonial bungalows, and misty forests.",
    nature_highlights: "Deodar forest baths, waterfall scrambles, cloud inversions after noon showers.",
    shopping_highlights: "Wood-carved souvenirs, handwoven shawls, and boutique teas.",
    hidden_gem: "Sunset clearing behind the forest rest house where locals picnic with kahwa.",
    food_stops: &["Foxhill Bakery", "Old Mall Diner", "Ridge Chai Cart", "Pinecone Cafe"],
};

const NATURE_TREKKING: CategoryProfile = CategoryProfile {
    terrain: "alpine meadows and hanging bridges",
    road_trip: "Plan for winding valley roads with single-lane bridges; refuel at the last market town.",
    bike_route: "Hire 4x4 taxis for luggage and trek the final ascent light.",
    adventure_highlights: "Waterfall rappels, multi-day hikes, and hot-spring dips.",
    food_highlights: "Trail kitchens serving millet rotis, bamboo shoots, and mountain honey.",
    photo_highlights: "Living root bridges, sunrise meadows, and starry skies.",
    nature_highlights: "Moss-laden forests, turquoise plunge pools, and bird calls.",
    shopping_highlights: "Tribal handicrafts, bamboo art, and spice blends at weekly haats.",
    hidden_gem: "A fern-laced pool downstream where only locals swim.",
    food_stops: &["Trail Tiffin Shack", "Valley Millet Kitchen", "Bamboo Cafe"],
};

const BEACHES_BACKWATERS: CategoryProfile = CategoryProfile {
    terrain: "palm-lined coves and canals",
    road_trip: "NH66 coastal drive with sea breezes—avoid late-night freight convoys.",
    bike_route: "Rent retro scooters to hop beaches; carry dry bags for sudden sprays.",
    adventure_highlights: "Dawn surf lessons, SUP sessions, and mangrove kayak cruises.",
    food_highlights: "Toddy shop seafood, shack-grilled snapper, and sunset gelato.",
    photo_highlights: "Golden dunes, fishing piers, and lighthouse silhouettes.",
    nature_highlights: "Backwater cruises with kingfishers, lagoon hammocks, and estuary walks.",
    shopping_highlights: "Handwoven mats, shell art, and designer resort wear pop-ups.",
    hidden_gem: "Lagoon sandbar that emerges during low tide—best for barefoot sunsets.",
    food_stops: &["Artjuna Shack", "Toddy Tree Kitchen", "Lagoon Gelato Cart"],
};

const COASTAL_AREAS: CategoryProfile = CategoryProfile {
    terrain: "cliff-hugging highways and fishing hamlets",
    road_trip: "Coastal highway features sea-facing ghats; buffer for monsoon potholes.",
    bike_route: "Motorcycle rentals let you link viewpoints and fort stops with ease.",
    adventure_highlights: "Parasailing, scuba tasters, and mangrove ziplines.",
    food_highlights: "Kokum curries, grill shacks, and Portuguese-era bakeries.",
    photo_highlights: "Clifftop forts, harbor sunsets, and colorful fishing nets.",
    nature_highlights: "Estuary birding, bioluminescent creeks, and casuarina groves.",
    shopping_highlights: "Beach bazaars selling shell jewelry, linen, and organic oils.",
    hidden_gem: "Abandoned lighthouse terrace perfect for blue-hour frames.",
    food_stops: &["Surfside Shack", "Port Cafe", "Spice Lane Bakery"],
};

const ISLANDS: CategoryProfile = CategoryProfile {
    terrain: "lagoon islands and coral beaches",
    road_trip: "Island hops via ferries—book morning slots before winds pick up.",
    bike_route: "Rent e-bikes for coastal loops; recharge at harbor cafes.",
    adventure_highlights: "Reef dives, snorkeling sandbars, and night-kayak bioluminescence.",
    food_highlights: "Grilled octopus, coconut kulfi, and beachside BBQs.",
    photo_highlights: "Turquoise lagoons, mangrove tunnels, and star trails.",
    nature_highlights: "Turtle nesting walks and hammock siestas in breadfruit groves.",
    shopping_highlights: "Shell craft collectives and slow-fashion island boutiques.",
    hidden_gem: "Secret sand spit accessible at low tide for sunset picnics.",
    food_stops: &["Lagoon Grill", "Harbor Coffee Lab", "Sunset Sorbet Bike"],
};

const CULTURAL_HISTORICAL: CategoryProfile = CategoryProfile {
    terrain: "fortified quarters and palace corridors",
    road_trip: "Golden Triangle-style drives on smooth expressways; plan dawn departures.",
    bike_route: "Sunrise cycling tours weave through bazaar alleys before traffic builds.",
    adventure_highlights: "Hot-air balloons over forts and heritage zip lines.",
    food_highlights: "Royal thalis, kachori trails, and century-old coffee houses.",
    photo_highlights: "Havelis, mirrored halls, and pastel doorways.",
    nature_highlights: "Palace gardens, stepwells, and lakeside ghats.",
    shopping_highlights: "Block prints, gemstones, blue pottery, and leather ateliers.",
    hidden_gem: "Courtyard cafe tucked behind an antique store—live sitar at dusk.",
    food_stops: &["Royal Thali House", "Hawa Cafe", "Amer Kulfi Cart"],
};

const CITIES_CULTURE: CategoryProfile = CategoryProfile {
    terrain: "design districts and riverfront promenades",
    road_trip: "Access via expressways + metro links; best to arrive off-peak.",
    bike_route: "Public bike docks connect murals, breweries, and science parks.",
    adventure_highlights: "Night cycling, craft brewery crawls, and VR museums.",
    food_highlights: "Glocal brunch spots, micro roasteries, and midnight dosa carts.",
    photo_highlights: "Street-art alleys, skyline lookouts, and neon bridges.",
    nature_highlights: "Urban forests, botanical lakes, and rooftop farms.",
    shopping_highlights: "Concept stores, sneaker culture drops, and indie labels.",
    hidden_gem: "An old warehouse now hosting vinyl bars and ceramic studios.",
    food_stops: &["Third Wave Brew Lab", "Indie Brunch House", "Midnight Dosa Cart"],
};

const MAJOR_CITIES: CategoryProfile = CategoryProfile {
    food_stops: &["Art District Cafe", "Midnight Frankie Truck", "Cold Brew Cart"],
    ..DEFAULT_PROFILE
};

const HERITAGE_TEMPLES: CategoryProfile = CategoryProfile {
    terrain: "sacred tanks and stone corridors",
    road_trip: "Chennai–Madurai style highways; arrive before aarti rush.",
    bike_route: "Rent e-bikes to cover temple corridors quickly between rituals.",
    adventure_highlights: "Pilgrim climbs, coracle rides, and heritage photo walks.",
    food_highlights: "Prasadam kitchens, filter coffee, and banana-leaf feasts.",
    photo_highlights: "Gopuram silhouettes, oil-lamp rituals, and chariot streets.",
    nature_highlights: "Sacred groves and coastal estuaries attached to temples.",
    shopping_highlights: "Brassware, silk looms, and hand-carved icons.",
    hidden_gem: "Temple tank steps where locals feed koi at sunrise.",
    food_stops: &["Temple Prasadam Hall", "Filter Coffee Counter", "Banana Leaf Mess"],
};

const DESERT_HERITAGE: CategoryProfile = CategoryProfile {
    terrain: "sand dunes and fort ramparts",
    road_trip: "Jaipur–Jaisalmer routes offer desert expressways; fuel at last major town.",
    bike_route: "Camel safaris + ATV rentals for dunes; sunset jeep convoys.",
    adventure_highlights: "Dune bashing, camel rides, and night-star photo walks.",
    food_highlights: "Ker sangri, bajra rotis, and bhang lassi counters.",
    photo_highlights: "Golden fort walls and Orion-filled skies.",
    nature_highlights: "Oasis birding and desert nurseries.",
    shopping_highlights: "Mirror-work textiles, silver trinkets, and leather mojris.",
    hidden_gem: "Abandoned caravanserai now used for astro hangs.",
    food_stops: &["Dune Dhaba", "Mirage Cafe", "Fort Kulfi Cart"],
};

const MOUNTAINS_NATURE: CategoryProfile = CategoryProfile {
    terrain: "cloud forests and tea ridges",
    road_trip: "Shillong-style hill drives with living root bridge detours.",
    bike_route: "Hire local cabbies for ghat sections; mountain bikes for village loops.",
    adventure_highlights: "Canyoning, caving, and glass-bottom boat rides at Dawki.",
    food_highlights: "Tribal BBQs, bamboo pork, and Khasi rice cakes.",
    photo_highlights: "Living root engineering, canyons, and sunlit lakes.",
    nature_highlights: "Plunge pools, rolling clouds, and clean rivers.",
    shopping_highlights: "Handwoven shawls, black pepper, and bamboo crafts.",
    hidden_gem: "A lesser-known waterfalls amphitheater outside the tourist map.",
    food_stops: &["Khasi Barbecue Stall", "Root Bridge Cafe", "Laitlum Tea Shack"],
};

const CULTURAL_HERITAGE: CategoryProfile = CategoryProfile {
    terrain: "temple boulevards and coastal promenades",
    road_trip: "Puri–Konark marine drive best tackled at sunrise before buses roll in.",
    bike_route: "Rent cycles for heritage precinct loops and craft villages.",
    adventure_highlights: "Sand art workshops, rustic boat rides, and heritage walks.",
    food_highlights: "Mahaprasad meals, rasgulla trails, and chai under banyan trees.",
    photo_highlights: "Sun temple bas reliefs, chariot festivals, and beach sunrises.",
    nature_highlights: "Olive ridley nesting beaches and mangrove wetlands.",
    shopping_highlights: "Pattachitra art, applique textiles, and brass idols.",
    hidden_gem: "Quiet fisherman lane serving chai with temple bells in the backdrop.",
    food_stops: &["Jagannath Mahaprasad Hall", "Beachside Chai Cart", "Sweet Factory"],
};

fn category_overlay(category: &Category) -> Option<&'static CategoryProfile> {
    match category {
        Category::HillStationsMountains => Some(&HILL_STATIONS_MOUNTAINS),
        Category::NatureTrekking => Some(&NATURE_TREKKING),
        Category::BeachesBackwaters => Some(&BEACHES_BACKWATERS),
        Category::CoastalAreas => Some(&COASTAL_AREAS),
        Category::Islands => Some(&ISLANDS),
        Category::CulturalHistorical => Some(&CULTURAL_HISTORICAL),
        Category::CitiesCulture => Some(&CITIES_CULTURE),
        Category::MajorCities => Some(&MAJOR_CITIES),
        Category::HeritageTemples => Some(&HERITAGE_TEMPLES),
        Category::DesertHeritage => Some(&DESERT_HERITAGE),
        Category::MountainsNature => Some(&MOUNTAINS_NATURE),
        Category::CulturalHeritage => Some(&CULTURAL_HERITAGE),
        Category::HillStations | Category::Other(_) => None,
    }
}

/// Default profile overlaid with the destination's category profile, if one exists.
pub fn resolve_profile(destination: &Destination) -> CategoryProfile {
    let mut profile = category_overlay(&destination.primary_category)
        .copied()
        .unwrap_or(DEFAULT_PROFILE);
    if profile.food_stops.is_empty() {
        profile.food_stops = DEFAULT_PROFILE.food_stops;
    }
    profile
}
