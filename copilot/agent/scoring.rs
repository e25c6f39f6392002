use serde::Serialize;

use crate::{
    catalog::category_profile,
    config::{PricingConfig, ScoringConfig},
    lexicon::{matches_in, tokens, BENEFIT_WORDS, FEATURE_KEYWORDS},
    listing::{Currency, ListingCondition, TargetAudience, ValidatedListing},
};

/// Gauge label for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreBand {
    /// 0-49.
    #[serde(rename = "Needs Work")]
    NeedsWork,
    /// 50-74.
    #[serde(rename = "On Track")]
    OnTrack,
    /// 75-89.
    #[serde(rename = "Market Ready")]
    MarketReady,
    /// 90-100.
    #[serde(rename = "Top Performer")]
    TopPerformer,
}

impl ScoreBand {
    /// Band containing `score`.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..=49 => Self::NeedsWork,
            50..=74 => Self::OnTrack,
            75..=89 => Self::MarketReady,
            _ => Self::TopPerformer,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NeedsWork => "Needs Work",
            Self::OnTrack => "On Track",
            Self::MarketReady => "Market Ready",
            Self::TopPerformer => "Top Performer",
        }
    }
}

/// Per-factor points behind a listing power score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Description richness points.
    pub description: f64,
    /// Title quality points.
    pub title: f64,
    /// Price positioning points.
    pub price: f64,
    /// Condition tier points.
    pub condition: f64,
    /// Shipping points.
    pub shipping: f64,
    /// Rounded, clamped total.
    pub total: u8,
    /// Gauge band of the total.
    pub band: ScoreBand,
}

/// Where the asking price sits against the category norm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PricePosition {
    /// Listed for free.
    Free,
    /// Far enough below the norm to raise doubts.
    Underpriced,
    /// Inside the fair window.
    Fair,
    /// Moderately above the window.
    Stretched,
    /// Well above the window.
    Overpriced,
}

/// Weighted, band-clamped listing power score.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    scoring: ScoringConfig,
    pricing: PricingConfig,
}

impl ScoringEngine {
    /// Engine with explicit configuration.
    #[must_use]
    pub const fn new(scoring: ScoringConfig, pricing: PricingConfig) -> Self {
        Self { scoring, pricing }
    }

    /// Listing power score in `0..=100`.
    #[must_use]
    pub fn score(&self, listing: &ValidatedListing) -> u8 {
        self.breakdown(listing).total
    }

    /// Score with per-factor points.
    #[must_use]
    pub fn breakdown(&self, listing: &ValidatedListing) -> ScoreBreakdown {
        let description = self.description_points(listing);
        let title = self.title_points(listing);
        let price = self.price_points(listing);
        let condition = self.condition_points(listing.condition);
        let shipping = if listing.shipping_available {
            self.scoring.shipping_band
        } else {
            0.0
        };
        let sum = description + title + price + condition + shipping;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let total = sum.round().clamp(0.0, 100.0) as u8;
        ScoreBreakdown {
            description,
            title,
            price,
            condition,
            shipping,
            total,
            band: ScoreBand::from_score(total),
        }
    }

    /// Price positioning parameters in use.
    #[must_use]
    pub const fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    /// Price converted to INR.
    #[must_use]
    pub fn price_in_inr(&self, listing: &ValidatedListing) -> f64 {
        match listing.currency {
            Currency::Inr => listing.price,
            Currency::Usd => listing.price * self.pricing.usd_to_inr,
        }
    }

    /// Ratio of the INR price to the category norm.
    #[must_use]
    pub fn price_ratio(&self, listing: &ValidatedListing) -> f64 {
        self.price_in_inr(listing) / category_profile(listing.category).price_norm_inr
    }

    /// Classifies the price against the audience-adjusted fair window.
    #[must_use]
    pub fn price_position(&self, listing: &ValidatedListing) -> PricePosition {
        if listing.price <= 0.0 {
            return PricePosition::Free;
        }
        let ratio = self.price_ratio(listing);
        let high = self.fair_ceiling(listing.target_audience);
        if ratio < self.pricing.fair_ratio_low {
            PricePosition::Underpriced
        } else if ratio <= high {
            PricePosition::Fair
        } else if ratio <= high * 1.3 {
            PricePosition::Stretched
        } else {
            PricePosition::Overpriced
        }
    }

    /// Upper bound of the fair window for an audience.
    #[must_use]
    pub fn fair_ceiling(&self, audience: TargetAudience) -> f64 {
        match audience {
            TargetAudience::PremiumCollectors => {
                self.pricing.fair_ratio_high + self.pricing.premium_headroom
            }
            TargetAudience::BudgetBuyers | TargetAudience::MidRange => {
                self.pricing.fair_ratio_high
            }
        }
    }

    fn description_points(&self, listing: &ValidatedListing) -> f64 {
        let band = self.scoring.description_band;
        let saturation = self.scoring.description_saturation_words;
        let words = tokens(&listing.description).len().min(saturation);
        let length = ratio(words, saturation) * band * 0.5;
        let features = matches_in(&listing.description, FEATURE_KEYWORDS).len();
        let feature_points = count_f64(features) * self.scoring.feature_keyword_points;
        (length + feature_points).clamp(0.0, band)
    }

    fn title_points(&self, listing: &ValidatedListing) -> f64 {
        let band = self.scoring.title_band;
        let saturation = self.scoring.title_saturation_chars;
        let chars = listing.title.chars().count().min(saturation);
        let length = ratio(chars, saturation) * band * 0.5;
        let benefits = matches_in(&listing.title, BENEFIT_WORDS).len();
        let benefit_points = count_f64(benefits) * self.scoring.benefit_word_points;
        (length + benefit_points).clamp(0.0, band)
    }

    fn price_points(&self, listing: &ValidatedListing) -> f64 {
        let share = match self.price_position(listing) {
            PricePosition::Fair => 1.0,
            PricePosition::Underpriced => 0.7,
            PricePosition::Stretched => 0.6,
            PricePosition::Overpriced => 0.3,
            PricePosition::Free => 0.25,
        };
        share * self.scoring.price_band
    }

    fn condition_points(&self, condition: ListingCondition) -> f64 {
        condition_weight(condition) * self.scoring.condition_band
    }
}

/// Share of the condition band earned by each tier.
#[must_use]
pub const fn condition_weight(condition: ListingCondition) -> f64 {
    match condition {
        ListingCondition::New => 1.0,
        ListingCondition::LikeNew => 0.85,
        ListingCondition::Good => 0.65,
        ListingCondition::Fair => 0.4,
        ListingCondition::NeedsRepair => 0.2,
    }
}

#[allow(clippy::cast_precision_loss)]
fn count_f64(count: usize) -> f64 {
    count as f64
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        count_f64(part) / count_f64(whole)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{validated_with, MarketplaceCategory};
    use serde_json::Value;

    #[test]
    fn reference_listing_scores_high() {
        let engine = ScoringEngine::default();
        let listing = validated_with(|_| {});
        let breakdown = engine.breakdown(&listing);
        assert!(breakdown.total >= 75, "{breakdown:?}");
        assert_eq!(engine.price_position(&listing), PricePosition::Fair);
        assert!((breakdown.shipping - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn score_stays_in_range_for_every_enum_combination() {
        let engine = ScoringEngine::default();
        for category in MarketplaceCategory::ALL {
            for condition in ListingCondition::ALL {
                for audience in TargetAudience::ALL {
                    for price in [0, 10, 6_499, 10_000_000] {
                        let listing = validated_with(|raw| {
                            raw.category = Some(category.label().into());
                            raw.condition = Some(condition.label().into());
                            raw.target_audience = Some(audience.label().into());
                            raw.price = Some(Value::from(price));
                        });
                        assert!(engine.score(&listing) <= 100);
                    }
                }
            }
        }
    }

    #[test]
    fn shipping_never_lowers_score() {
        let engine = ScoringEngine::default();
        for condition in ListingCondition::ALL {
            let with = validated_with(|raw| {
                raw.condition = Some(condition.label().into());
                raw.shipping_available = Some(true.into());
            });
            let without = validated_with(|raw| {
                raw.condition = Some(condition.label().into());
                raw.shipping_available = Some(false.into());
            });
            assert!(engine.score(&with) >= engine.score(&without));
        }
    }

    #[test]
    fn better_condition_never_lowers_score() {
        let engine = ScoringEngine::default();
        let scores: Vec<u8> = ListingCondition::ALL
            .iter()
            .map(|condition| {
                engine.score(&validated_with(|raw| {
                    raw.condition = Some(condition.label().into());
                }))
            })
            .collect();
        assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]), "{scores:?}");
    }

    #[test]
    fn more_detail_never_lowers_score() {
        let engine = ScoringEngine::default();
        let sparse = validated_with(|raw| {
            raw.title = Some("Speaker".into());
            raw.description = Some("Works.".into());
            raw.shipping_available = Some(false.into());
        });
        let detailed = validated_with(|raw| {
            raw.title = Some("Speaker premium".into());
            raw.description =
                Some("Works. Includes warranty card, charger and original box.".into());
            raw.shipping_available = Some(false.into());
        });
        let sparse_score = engine.breakdown(&sparse);
        let detailed_score = engine.breakdown(&detailed);
        assert!(detailed_score.description > sparse_score.description);
        assert!(detailed_score.title > sparse_score.title);
        assert!(detailed_score.total >= sparse_score.total);
    }

    #[test]
    fn factors_are_clamped_to_bands() {
        let engine = ScoringEngine::default();
        let listing = validated_with(|raw| {
            raw.description = Some(FEATURE_KEYWORDS.join(" ").into());
            raw.title = Some(BENEFIT_WORDS[..8].join(" ").into());
        });
        let breakdown = engine.breakdown(&listing);
        assert!((breakdown.description - 30.0).abs() < f64::EPSILON);
        assert!((breakdown.title - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn usd_prices_are_converted() {
        let engine = ScoringEngine::default();
        let listing = validated_with(|raw| {
            raw.currency = Some("USD".into());
            raw.price = Some(Value::from(100));
        });
        assert!((engine.price_in_inr(&listing) - 8_300.0).abs() < 1e-9);
        assert_eq!(engine.price_position(&listing), PricePosition::Fair);
    }

    #[test]
    fn premium_collectors_tolerate_higher_prices() {
        let engine = ScoringEngine::default();
        let mid = validated_with(|raw| raw.price = Some(Value::from(12_000)));
        let premium = validated_with(|raw| {
            raw.price = Some(Value::from(12_000));
            raw.target_audience = Some("Premium Collectors".into());
        });
        assert_eq!(engine.price_position(&mid), PricePosition::Stretched);
        assert_eq!(engine.price_position(&premium), PricePosition::Fair);
    }

    #[test]
    fn bands_follow_gauge_thresholds() {
        assert_eq!(ScoreBand::from_score(0), ScoreBand::NeedsWork);
        assert_eq!(ScoreBand::from_score(49), ScoreBand::NeedsWork);
        assert_eq!(ScoreBand::from_score(50), ScoreBand::OnTrack);
        assert_eq!(ScoreBand::from_score(75), ScoreBand::MarketReady);
        assert_eq!(ScoreBand::from_score(90).label(), "Top Performer");
    }

    #[test]
    fn free_listings_are_flagged() {
        let engine = ScoringEngine::default();
        let listing = validated_with(|raw| raw.price = Some(Value::from(0)));
        assert_eq!(engine.price_position(&listing), PricePosition::Free);
    }
}
