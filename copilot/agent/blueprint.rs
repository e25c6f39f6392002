use crate::{
    catalog::{category_insights, category_profile},
    listing::{Currency, ListingCondition, TargetAudience, ValidatedListing},
    report::AgentInsight,
    scoring::{PricePosition, ScoringEngine},
};

/// Priority tiers, in the order cards are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlueprintTier {
    /// Price against the category norm.
    Pricing,
    /// Trust signals and condition disclosure.
    Trust,
    /// Delivery coverage and discovery.
    Reach,
    /// Posting and response timing.
    Timing,
}

impl BlueprintTier {
    /// Fixed card order.
    pub const ORDER: [Self; 4] = [Self::Pricing, Self::Trust, Self::Reach, Self::Timing];
}

/// Builds the sales blueprint and the next-steps queue.
#[derive(Debug, Clone, Default)]
pub struct BlueprintPlanner {
    scoring: ScoringEngine,
}

impl BlueprintPlanner {
    /// Planner reusing the scoring engine's price positioning.
    #[must_use]
    pub const fn new(scoring: ScoringEngine) -> Self {
        Self { scoring }
    }

    /// One card per tier, in [`BlueprintTier::ORDER`].
    #[must_use]
    pub fn generate(&self, listing: &ValidatedListing) -> Vec<AgentInsight> {
        BlueprintTier::ORDER
            .iter()
            .map(|tier| self.card(*tier, listing))
            .collect()
    }

    /// Card for a single tier.
    #[must_use]
    pub fn card(&self, tier: BlueprintTier, listing: &ValidatedListing) -> AgentInsight {
        match tier {
            BlueprintTier::Pricing => self.pricing_card(listing),
            BlueprintTier::Trust => trust_card(listing),
            BlueprintTier::Reach => reach_card(listing),
            BlueprintTier::Timing => timing_card(listing),
        }
    }

    /// Between three and five steps, most urgent first.
    #[must_use]
    pub fn next_steps(&self, listing: &ValidatedListing) -> Vec<String> {
        let profile = category_profile(listing.category);
        let mut steps = Vec::with_capacity(5);
        match self.scoring.price_position(listing) {
            PricePosition::Fair => steps.push(format!(
                "Hold the price at {} and decide your lowest acceptable offer now.",
                listing.display_price()
            )),
            PricePosition::Underpriced | PricePosition::Free => steps.push(format!(
                "Re-check the price against similar {} listings before buyers start haggling.",
                listing.category
            )),
            PricePosition::Stretched | PricePosition::Overpriced => steps.push(format!(
                "Trim the price toward {} or justify it with proof of condition.",
                self.norm_in_currency(listing)
            )),
        }
        steps.push(format!(
            "Upload 5-8 daylight photos of the {} from every side.",
            profile.noun
        ));
        if !listing.shipping_available {
            steps.push(
                "Enable delivery or name a courier partner to reach buyers outside your area."
                    .into(),
            );
        }
        if listing.description.split_whitespace().count() < 40 {
            steps.push(
                "Expand the description with specs, accessories, and the reason for selling."
                    .into(),
            );
        }
        steps.push(
            "Reply to every buyer message within 15 minutes while the listing is fresh.".into(),
        );
        steps.truncate(5);
        steps
    }

    fn norm_in_currency(&self, listing: &ValidatedListing) -> String {
        let norm_inr = category_profile(listing.category).price_norm_inr;
        let converted = match listing.currency {
            Currency::Inr => norm_inr,
            Currency::Usd => norm_inr / self.scoring.pricing().usd_to_inr,
        };
        listing.currency.format_amount(converted.round())
    }

    fn pricing_card(&self, listing: &ValidatedListing) -> AgentInsight {
        let position = self.scoring.price_position(listing);
        let norm = self.norm_in_currency(listing);
        let price = listing.display_price();
        let percent = (self.scoring.price_ratio(listing) * 100.0).round();
        let headline = match position {
            PricePosition::Fair => "Price sits in the sweet spot",
            PricePosition::Underpriced => "Price looks too good to be true",
            PricePosition::Stretched => "Price runs above the category norm",
            PricePosition::Overpriced => "Price will scare off most buyers",
            PricePosition::Free => "Free listings attract no-shows",
        };
        let insight = format!(
            "At {price} you are at {percent}% of the typical {} price of {norm} for {} buyers.",
            listing.category,
            listing.target_audience.label().to_lowercase()
        );
        let mut action_items = match position {
            PricePosition::Fair => vec![
                format!("Mention \"fair price, firm\" to anchor negotiations at {price}."),
                "Keep a 5-10% buffer for buyers who ask for the best price.".to_string(),
            ],
            PricePosition::Underpriced | PricePosition::Free => vec![
                format!("Test a price closer to {norm}; low prices make buyers suspect defects."),
                "Explain the quick-sale reason so the low price feels credible.".to_string(),
            ],
            PricePosition::Stretched | PricePosition::Overpriced => vec![
                format!("Move toward {norm} or bundle accessories to justify the premium."),
                "Show receipts or warranty to back the higher ask.".to_string(),
            ],
        };
        if listing.target_audience == TargetAudience::BudgetBuyers {
            action_items
                .push("Offer a small cash-pickup discount to close budget buyers fast.".into());
        }
        AgentInsight {
            headline: headline.into(),
            insight,
            action_items,
        }
    }
}

fn trust_card(listing: &ValidatedListing) -> AgentInsight {
    let profile = category_profile(listing.category);
    let signals = category_insights(listing.category).trust_signals;
    let condition_note = match listing.condition {
        ListingCondition::New => "Show the sealed box or unused tags up front.",
        ListingCondition::LikeNew => {
            "Prove the like-new claim with close-ups of edges and surfaces."
        }
        ListingCondition::Good => "Point out normal wear honestly before buyers find it.",
        ListingCondition::Fair => "List every flaw with a photo; honesty beats haggling later.",
        ListingCondition::NeedsRepair => "State exactly what is broken and a repair estimate.",
    };
    let mut action_items: Vec<String> = signals
        .iter()
        .take(2)
        .map(|signal| format!("Add: {}", signal.to_lowercase()))
        .collect();
    action_items.push(condition_note.to_string());
    AgentInsight {
        headline: format!(
            "Lead with trust for a {} {}",
            listing.condition.label().to_lowercase(),
            profile.noun
        ),
        insight: format!(
            "{} buyers decide on trust signals first: {}.",
            listing.category,
            signals.join(", ").to_lowercase()
        ),
        action_items,
    }
}

fn reach_card(listing: &ValidatedListing) -> AgentInsight {
    let location = &listing.location;
    if listing.shipping_available {
        AgentInsight {
            headline: "Delivery widens your buyer pool".into(),
            insight: format!(
                "Offering delivery lets buyers beyond {location} commit without travelling."
            ),
            action_items: vec![
                "State delivery charges and timelines in the first line of the description.".into(),
                format!("Share the listing in two {location} buy-and-sell groups today."),
                "Ask serious buyers for a small advance before dispatch.".into(),
            ],
        }
    } else {
        AgentInsight {
            headline: "Shipping coverage gap".into(),
            insight: format!(
                "Pickup-only listings reach buyers within {location}; delivery-ready sellers get more enquiries."
            ),
            action_items: vec![
                "Offer delivery through a local courier or a paid pickup slot.".into(),
                format!("Name a landmark in {location} so buyers can plan pickup."),
                format!("Share the listing in two {location} buy-and-sell groups today."),
            ],
        }
    }
}

fn timing_card(listing: &ValidatedListing) -> AgentInsight {
    let profile = category_profile(listing.category);
    let mut action_items = vec![
        format!("Publish or renew during {}.", profile.peak_window),
        "Renew the listing after 48 hours if enquiries slow down.".to_string(),
    ];
    if listing.stock_units > 1 {
        action_items.push(format!(
            "Advertise all {} units and offer a multi-buy price.",
            listing.stock_units
        ));
    } else {
        action_items.push("Mark the item as single-piece stock to create urgency.".to_string());
    }
    AgentInsight {
        headline: format!("Post when {} buyers browse", listing.category),
        insight: format!(
            "{} listings get the most views during {}.",
            listing.category, profile.peak_window
        ),
        action_items,
    }
}
