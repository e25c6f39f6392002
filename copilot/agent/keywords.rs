use indexmap::IndexSet;
use serde::Serialize;

use crate::{
    catalog::category_profile,
    config::KeywordConfig,
    lexicon::{matches_in, FEATURE_KEYWORDS, MATERIAL_WORDS},
    listing::{ListingCondition, TargetAudience, ValidatedListing},
};

/// Tag plan and hook suggested for a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordStrategy {
    /// Primary, high-salience tags.
    pub hero_tags: IndexSet<String>,
    /// Secondary descriptive tags.
    pub supporting_tags: IndexSet<String>,
    /// Social-style hashtags.
    pub hashtags: IndexSet<String>,
    /// One-line promotional sentence.
    pub copy_hook: String,
}

/// Derives tags and the copy hook from listing attributes.
#[derive(Debug, Clone, Default)]
pub struct KeywordStrategist {
    config: KeywordConfig,
}

impl KeywordStrategist {
    /// Strategist with explicit hero tag bounds.
    #[must_use]
    pub const fn new(config: KeywordConfig) -> Self {
        Self { config }
    }

    /// Builds the full keyword strategy.
    #[must_use]
    pub fn generate(&self, listing: &ValidatedListing) -> KeywordStrategy {
        let hero_tags = self.hero_tags(listing);
        let supporting_tags = supporting_tags(listing, &hero_tags);
        KeywordStrategy {
            hashtags: hashtags(listing),
            copy_hook: copy_hook(listing),
            hero_tags,
            supporting_tags,
        }
    }

    /// Category seed, condition, then standout features from the title and the description.
    #[must_use]
    pub fn hero_tags(&self, listing: &ValidatedListing) -> IndexSet<String> {
        let profile = category_profile(listing.category);
        let max = self.config.max_hero_tags.max(1);
        let mut tags = IndexSet::new();
        tags.insert(profile.seed_tags[0].to_string());
        tags.insert(condition_tag(listing.condition).to_string());
        let standout = matches_in(&listing.title, FEATURE_KEYWORDS)
            .into_iter()
            .chain(matches_in(&listing.description, FEATURE_KEYWORDS));
        for feature in standout {
            if tags.len() >= max {
                break;
            }
            tags.insert(feature);
        }
        for seed in &profile.seed_tags[1..] {
            if tags.len() >= self.config.min_hero_tags.min(max) {
                break;
            }
            tags.insert((*seed).to_string());
        }
        tags.truncate(max);
        tags
    }
}

fn condition_tag(condition: ListingCondition) -> &'static str {
    match condition {
        ListingCondition::New => "brand new",
        ListingCondition::LikeNew => "like new",
        ListingCondition::Good => "good condition",
        ListingCondition::Fair => "budget pick",
        ListingCondition::NeedsRepair => "fixer upper",
    }
}

fn audience_tag(audience: TargetAudience) -> &'static str {
    match audience {
        TargetAudience::BudgetBuyers => "budget friendly",
        TargetAudience::MidRange => "value for money",
        TargetAudience::PremiumCollectors => "collector grade",
    }
}

fn audience_hashtag(audience: TargetAudience) -> &'static str {
    match audience {
        TargetAudience::BudgetBuyers => "#BudgetFinds",
        TargetAudience::MidRange => "#SmartBuys",
        TargetAudience::PremiumCollectors => "#CollectorsItem",
    }
}

fn supporting_tags(listing: &ValidatedListing, hero: &IndexSet<String>) -> IndexSet<String> {
    let mut tags: IndexSet<String> = matches_in(&listing.searchable_text(), MATERIAL_WORDS);
    tags.insert(audience_tag(listing.target_audience).to_string());
    tags.insert(format!("{} pickup", listing.location.to_lowercase()));
    tags.insert(if listing.shipping_available {
        "home delivery".to_string()
    } else {
        "local pickup only".to_string()
    });
    if listing.stock_units > 1 {
        tags.insert("bulk available".to_string());
    }
    for seed in category_profile(listing.category).seed_tags {
        tags.insert((*seed).to_string());
    }
    tags.retain(|tag| !hero.contains(tag));
    tags
}

/// Joins words into `CamelCase`, dropping punctuation.
fn camel_case(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect()
            })
        })
        .collect()
}

fn hashtags(listing: &ValidatedListing) -> IndexSet<String> {
    let mut tags = IndexSet::new();
    tags.insert(format!("#{}", category_profile(listing.category).hashtag));
    let location = camel_case(&listing.location);
    if !location.is_empty() {
        tags.insert(format!("#{location}Deals"));
    }
    tags.insert(audience_hashtag(listing.target_audience).to_string());
    if matches!(
        listing.condition,
        ListingCondition::New | ListingCondition::LikeNew
    ) {
        tags.insert(format!("#{}", camel_case(listing.condition.label())));
    }
    if listing.shipping_available {
        tags.insert("#DeliveryAvailable".to_string());
    }
    tags.insert("#MarketplaceFinds".to_string());
    tags
}

fn copy_hook(listing: &ValidatedListing) -> String {
    let profile = category_profile(listing.category);
    let reach = if listing.shipping_available {
        format!("with delivery from {}", listing.location)
    } else {
        format!("pickup in {}", listing.location)
    };
    format!(
        "{} {} for {}: {}, {reach}.",
        listing.condition.label(),
        profile.noun,
        listing.display_price(),
        profile.selling_angle,
    )
}
