use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    catalog::{category_insights, category_profile},
    lexicon::tokens,
    listing::{ListingCondition, ValidatedListing},
    scoring::{PricePosition, ScoringEngine},
};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The seller typing into the chat.
    User,
    /// The copilot.
    Assistant,
}

/// One chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique id, `msg-<uuid>`.
    pub id: String,
    /// Author.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: format!("msg-{}", Uuid::new_v4()),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Message typed by the seller.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Message produced by the copilot.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// Topic a seller message is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatIntent {
    /// Price, discounts, negotiation.
    Price,
    /// Delivery and pickup.
    Shipping,
    /// Photos and videos.
    Photos,
    /// Wear, defects, warranty.
    Condition,
    /// Stock and availability.
    Availability,
    /// Nothing recognised.
    General,
}

impl fmt::Display for ChatIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Price => "price",
            Self::Shipping => "shipping",
            Self::Photos => "photos",
            Self::Condition => "condition",
            Self::Availability => "availability",
            Self::General => "general",
        };
        f.write_str(name)
    }
}

/// Whole-word triggers per intent.
pub const INTENT_TABLE: &[(ChatIntent, &[&str])] = &[
    (
        ChatIntent::Price,
        &[
            "price", "prices", "pricing", "cost", "costs", "discount", "discounts", "negotiate",
            "negotiable", "bargain", "cheap", "cheaper", "expensive", "lowest", "kitna", "daam",
            "rate",
        ],
    ),
    (
        ChatIntent::Shipping,
        &[
            "ship", "shipping", "shipped", "deliver", "delivers", "delivery", "courier", "pickup",
            "pick", "pick-up", "dispatch", "transport",
        ],
    ),
    (
        ChatIntent::Photos,
        &[
            "photo", "photos", "pic", "pics", "picture", "pictures", "image", "images", "video",
            "videos",
        ],
    ),
    (
        ChatIntent::Condition,
        &[
            "condition", "scratch", "scratches", "scratched", "damage", "damaged", "dent", "dents",
            "working", "works", "warranty", "repair", "repaired", "defect", "defects",
        ],
    ),
    (
        ChatIntent::Availability,
        &["available", "availability", "stock", "sold", "still"],
    ),
];

/// Prior seller turns after which replies nudge toward closing.
pub const CLOSING_NUDGE_TURNS: usize = 3;

/// Opening message shown when a listing unlocks the chat.
pub const GREETING: &str = "Namaste! I'm your Marketplace growth co-pilot. Ask me how to \
                            answer a buyer and I'll suggest a strategy right away.";

/// Intent with the most trigger words in `message`; ties go to the earlier table row.
#[must_use]
pub fn classify(message: &str) -> ChatIntent {
    let words = tokens(message);
    let mut best = (ChatIntent::General, 0);
    for (intent, triggers) in INTENT_TABLE {
        let hits = words
            .iter()
            .filter(|word| triggers.contains(&word.as_str()))
            .count();
        if hits > best.1 {
            best = (*intent, hits);
        }
    }
    best.0
}

/// Picks a templated reply for a seller message.
#[derive(Debug, Clone, Default)]
pub struct ChatResponder {
    scoring: ScoringEngine,
}

impl ChatResponder {
    /// Responder using the given engine for price wording.
    #[must_use]
    pub const fn new(scoring: ScoringEngine) -> Self {
        Self { scoring }
    }

    /// Returns exactly one assistant message. `history` is read, never changed.
    #[must_use]
    pub fn reply(
        &self,
        listing: &ValidatedListing,
        history: &[ChatMessage],
        user_message: &str,
    ) -> ChatMessage {
        let intent = classify(user_message);
        let mut content = self.template(intent, listing);
        let prior_turns = history
            .iter()
            .filter(|message| message.role == ChatRole::User)
            .count();
        if prior_turns >= CLOSING_NUDGE_TURNS {
            content.push_str(&format!(
                " The buyer has asked {prior_turns} questions already, so propose a pickup or \
                 delivery slot and close the deal."
            ));
        }
        ChatMessage::assistant(content)
    }

    /// Reply body for an intent, before any closing nudge.
    #[must_use]
    pub fn template(&self, intent: ChatIntent, listing: &ValidatedListing) -> String {
        let profile = category_profile(listing.category);
        let price = listing.display_price();
        match intent {
            ChatIntent::Price => {
                let floor = listing.currency.format_amount((listing.price * 0.9).round());
                let stance = match self.scoring.price_position(listing) {
                    PricePosition::Fair => "already fair for the category",
                    PricePosition::Underpriced | PricePosition::Free => {
                        "below what similar listings ask"
                    }
                    PricePosition::Stretched | PricePosition::Overpriced => {
                        "on the higher side, so lean on proof of condition"
                    }
                };
                format!(
                    "Anchor at {price}; it is {stance}. Go no lower than {floor}, and only for \
                     same-day pickup or full advance payment."
                )
            }
            ChatIntent::Shipping if listing.shipping_available => format!(
                "Confirm delivery from {}: share the charges up front and ask for a small \
                 advance before dispatch.",
                listing.location
            ),
            ChatIntent::Shipping => format!(
                "You only offer pickup in {}. Suggest a public meeting spot, or offer a courier \
                 at the buyer's cost to keep the deal alive.",
                listing.location
            ),
            ChatIntent::Photos => {
                let signal = category_insights(listing.category)
                    .trust_signals
                    .first()
                    .map_or_else(String::new, |signal| signal.to_lowercase());
                format!(
                    "Send 3-4 fresh daylight photos of the {}, including {signal}. A short video \
                     of it working clears doubts fastest.",
                    profile.noun
                )
            }
            ChatIntent::Condition => {
                let detail = match listing.condition {
                    ListingCondition::New => "it is unused, so share the sealed box or tags",
                    ListingCondition::LikeNew => {
                        "mention how rarely it was used and show close-ups"
                    }
                    ListingCondition::Good => "be upfront about normal wear and show it in photos",
                    ListingCondition::Fair => "list every flaw before they ask",
                    ListingCondition::NeedsRepair => {
                        "explain exactly what needs fixing and price it in"
                    }
                };
                format!(
                    "Describe it honestly as {}: {detail}.",
                    listing.condition.label().to_lowercase()
                )
            }
            ChatIntent::Availability if listing.stock_units > 1 => format!(
                "Yes, {} units are available. Offer a multi-buy price to move more than one.",
                listing.stock_units
            ),
            ChatIntent::Availability => "Confirm it is still available and ask when they can \
                                         pick it up; single-piece stock moves fast."
                .to_string(),
            ChatIntent::General => format!(
                "Thank the buyer, remind them it is {}, and ask one question that moves toward \
                 a pickup time.",
                profile.selling_angle
            ),
        }
    }
}
