//! Static category knowledge: buyer motivations, trust signals, price norms and category copy.

use serde::Serialize;

use crate::listing::MarketplaceCategory;

/// Buyer-facing signals shown next to the form for a category.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInsight {
    /// Why buyers in this category purchase.
    pub buyer_motivations: &'static [&'static str],
    /// What makes buyers trust a listing in this category.
    pub trust_signals: &'static [&'static str],
}

/// Copy and pricing reference used by the engines for a category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryProfile {
    /// Noun used in generated sentences.
    pub noun: &'static str,
    /// Typical asking price in INR for a mid-range item.
    pub price_norm_inr: f64,
    /// Category-specific selling angle appended to the copy hook.
    pub selling_angle: &'static str,
    /// Seed terms for hero tags, most salient first.
    pub seed_tags: &'static [&'static str],
    /// CamelCase stem for the category hashtag.
    pub hashtag: &'static str,
    /// Best posting window for the timing card.
    pub peak_window: &'static str,
}

const ELECTRONICS_INSIGHT: CategoryInsight = CategoryInsight {
    buyer_motivations: &[
        "Latest features at a lower price than retail",
        "Quick replacement for a broken or lost device",
        "Upgrading without paying showroom markup",
    ],
    trust_signals: &[
        "Original bill or warranty card",
        "Live demo video or in-person testing",
        "Clear photos of ports, screen and serial number",
    ],
};

const HOME_FURNITURE_INSIGHT: CategoryInsight = CategoryInsight {
    buyer_motivations: &[
        "Furnishing a new flat on a budget",
        "Solid wood or branded pieces below showroom price",
        "Immediate availability without delivery waits",
    ],
    trust_signals: &[
        "Exact dimensions and material details",
        "Photos in daylight from multiple angles",
        "Clear pickup or delivery arrangement",
    ],
};

const FASHION_INSIGHT: CategoryInsight = CategoryInsight {
    buyer_motivations: &[
        "Branded pieces at thrift prices",
        "Occasion wear needed for a single event",
        "Trend pieces without full retail cost",
    ],
    trust_signals: &[
        "Size chart with real measurements",
        "Close-up photos of fabric, tags and stitching",
        "Honest notes on wear or alterations",
    ],
};

const VEHICLES_INSIGHT: CategoryInsight = CategoryInsight {
    buyer_motivations: &[
        "Reliable daily commute at a fair price",
        "Avoiding new-vehicle depreciation",
        "Specific model or variant hunting",
    ],
    trust_signals: &[
        "Service history and valid insurance papers",
        "Odometer photo and accident disclosure",
        "Test ride offered at a public location",
    ],
};

const SPORTS_OUTDOORS_INSIGHT: CategoryInsight = CategoryInsight {
    buyer_motivations: &[
        "Trying a new sport without a big investment",
        "Upgrading gear for the season",
        "Kids outgrowing equipment quickly",
    ],
    trust_signals: &[
        "Usage frequency and storage conditions",
        "Photos showing grips, straps and wear points",
        "Brand and model details buyers can look up",
    ],
};

const APPLIANCES_INSIGHT: CategoryInsight = CategoryInsight {
    buyer_motivations: &[
        "Replacing a failed appliance urgently",
        "Energy-efficient models at second-hand prices",
        "Setting up a rental home quickly",
    ],
    trust_signals: &[
        "Working demo video with power on",
        "Energy rating, capacity and purchase year",
        "Remaining warranty or service records",
    ],
};

const TOYS_GAMES_INSIGHT: CategoryInsight = CategoryInsight {
    buyer_motivations: &[
        "Gifts for birthdays and festivals",
        "Complete sets at a fraction of retail",
        "Collectible or discontinued editions",
    ],
    trust_signals: &[
        "All pieces present and counted",
        "Hygiene and cleaning notes",
        "Photos of the box, manuals and accessories",
    ],
};

const OTHER_INSIGHT: CategoryInsight = CategoryInsight {
    buyer_motivations: &[
        "Unique finds not available in stores",
        "Good value compared to buying new",
        "Convenient local pickup",
    ],
    trust_signals: &[
        "Detailed description with measurements",
        "Multiple clear photos",
        "Fast, polite replies to questions",
    ],
};

/// Buyer motivations and trust signals for a category.
#[must_use]
pub const fn category_insights(category: MarketplaceCategory) -> &'static CategoryInsight {
    match category {
        MarketplaceCategory::Electronics => &ELECTRONICS_INSIGHT,
        MarketplaceCategory::HomeFurniture => &HOME_FURNITURE_INSIGHT,
        MarketplaceCategory::Fashion => &FASHION_INSIGHT,
        MarketplaceCategory::Vehicles => &VEHICLES_INSIGHT,
        MarketplaceCategory::SportsOutdoors => &SPORTS_OUTDOORS_INSIGHT,
        MarketplaceCategory::Appliances => &APPLIANCES_INSIGHT,
        MarketplaceCategory::ToysGames => &TOYS_GAMES_INSIGHT,
        MarketplaceCategory::Other => &OTHER_INSIGHT,
    }
}

/// Pricing norm and copy for a category.
#[must_use]
pub const fn category_profile(category: MarketplaceCategory) -> &'static CategoryProfile {
    match category {
        MarketplaceCategory::Electronics => &CategoryProfile {
            noun: "gadget",
            price_norm_inr: 9_000.0,
            selling_angle: "tested, ready to use, and far below retail",
            seed_tags: &["electronics deal", "gadget", "tech"],
            hashtag: "Electronics",
            peak_window: "weekday evenings between 7 and 10 pm",
        },
        MarketplaceCategory::HomeFurniture => &CategoryProfile {
            noun: "furniture piece",
            price_norm_inr: 12_000.0,
            selling_angle: "sturdy, spacious, and ready for its next home",
            seed_tags: &["home decor", "furniture", "home essentials"],
            hashtag: "HomeAndFurniture",
            peak_window: "weekend mornings when buyers plan pickups",
        },
        MarketplaceCategory::Fashion => &CategoryProfile {
            noun: "outfit",
            price_norm_inr: 1_500.0,
            selling_angle: "styled to turn heads without the boutique price",
            seed_tags: &["fashion", "style", "wardrobe"],
            hashtag: "Fashion",
            peak_window: "Friday and Saturday evenings",
        },
        MarketplaceCategory::Vehicles => &CategoryProfile {
            noun: "ride",
            price_norm_inr: 350_000.0,
            selling_angle: "well maintained with papers in order",
            seed_tags: &["vehicle", "used car", "bike"],
            hashtag: "Vehicles",
            peak_window: "Saturday and Sunday mornings for test rides",
        },
        MarketplaceCategory::SportsOutdoors => &CategoryProfile {
            noun: "gear",
            price_norm_inr: 4_000.0,
            selling_angle: "trail-ready gear at a fraction of store prices",
            seed_tags: &["sports gear", "fitness", "outdoor"],
            hashtag: "SportsAndOutdoors",
            peak_window: "early mornings and Sunday afternoons",
        },
        MarketplaceCategory::Appliances => &CategoryProfile {
            noun: "appliance",
            price_norm_inr: 15_000.0,
            selling_angle: "working perfectly and cheaper than a new purchase",
            seed_tags: &["home appliance", "appliance", "kitchen"],
            hashtag: "Appliances",
            peak_window: "month start when buyers have salaries in hand",
        },
        MarketplaceCategory::ToysGames => &CategoryProfile {
            noun: "toy",
            price_norm_inr: 1_200.0,
            selling_angle: "complete, clean, and gift-ready",
            seed_tags: &["toys", "games", "kids"],
            hashtag: "ToysAndGames",
            peak_window: "two weeks before festivals and birthdays",
        },
        MarketplaceCategory::Other => &CategoryProfile {
            noun: "find",
            price_norm_inr: 3_000.0,
            selling_angle: "a rare find at a fair local price",
            seed_tags: &["local deal", "marketplace find", "bargain"],
            hashtag: "LocalFinds",
            peak_window: "weekday evenings after office hours",
        },
    }
}
