//! Listing data model: closed enumerations, the raw form payload, and the validated listing.

use std::{fmt, ops::Deref};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lowercases and strips everything but ASCII alphanumerics so that
/// `"Home & Furniture"`, `"home_furniture"` and `"HomeFurniture"` compare equal.
fn normalize_label(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Human-readable label shown in the form.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Resolves a label or variant identifier, ignoring case, spacing and punctuation.
            #[must_use]
            pub fn from_label(raw: &str) -> Option<Self> {
                let wanted = normalize_label(raw);
                if wanted.is_empty() {
                    return None;
                }
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| {
                        normalize_label(variant.label()) == wanted
                            || normalize_label(&format!("{variant:?}")) == wanted
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum! {
    /// Marketplace category a listing is filed under.
    MarketplaceCategory {
        /// Phones, audio, computing.
        Electronics => "Electronics",
        /// Furniture and decor.
        HomeFurniture => "Home & Furniture",
        /// Clothing, footwear, accessories.
        Fashion => "Fashion",
        /// Cars, bikes, scooters.
        Vehicles => "Vehicles",
        /// Fitness and outdoor gear.
        SportsOutdoors => "Sports & Outdoors",
        /// Kitchen and home appliances.
        Appliances => "Appliances",
        /// Toys, board games, consoles.
        ToysGames => "Toys & Games",
        /// Anything else.
        Other => "Other",
    }
}

labelled_enum! {
    /// Physical condition declared by the seller.
    ListingCondition {
        /// Sealed or unused.
        New => "New",
        /// Barely used, no visible wear.
        LikeNew => "Like New",
        /// Normal signs of use.
        Good => "Good",
        /// Visible wear, fully working.
        Fair => "Fair",
        /// Requires repair.
        NeedsRepair => "Needs Repair",
    }
}

labelled_enum! {
    /// Currency the price is quoted in.
    Currency {
        /// Indian rupee.
        Inr => "INR",
        /// US dollar.
        Usd => "USD",
    }
}

labelled_enum! {
    /// Buyer segment the seller is aiming for.
    TargetAudience {
        /// Price-sensitive shoppers.
        BudgetBuyers => "Budget Buyers",
        /// Value seekers.
        MidRange => "Mid-Range",
        /// Buyers paying for quality or rarity.
        PremiumCollectors => "Premium Collectors",
    }
}

impl Currency {
    /// Symbol prefixed to formatted prices.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Inr => "₹",
            Self::Usd => "$",
        }
    }

    /// Formats an amount with thousands separators, e.g. `₹6,499` or `$1,250.50`.
    #[must_use]
    pub fn format_amount(self, amount: f64) -> String {
        let cents = (amount.max(0.0) * 100.0).round();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let cents = cents as u64;
        let whole = cents / 100;
        let fraction = cents % 100;
        let digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if fraction == 0 {
            format!("{}{grouped}", self.symbol())
        } else {
            format!("{}{grouped}.{fraction:02}", self.symbol())
        }
    }
}

/// Listing exactly as submitted by the form. Every field may be absent or carry the
/// wrong JSON type; [`crate::validation::ListingValidator`] reports each problem.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RawListing {
    /// Listing title.
    pub title: Option<Value>,
    /// Free-form description.
    pub description: Option<Value>,
    /// Category label.
    pub category: Option<Value>,
    /// Condition label.
    pub condition: Option<Value>,
    /// Price as a JSON number or numeric string.
    pub price: Option<Value>,
    /// Currency code.
    pub currency: Option<Value>,
    /// Pickup city or area.
    pub location: Option<Value>,
    /// Whether delivery is offered; absent means no.
    pub shipping_available: Option<Value>,
    /// Units in stock as a JSON number or numeric string.
    pub stock_units: Option<Value>,
    /// Audience label.
    pub target_audience: Option<Value>,
}

impl From<&Listing> for RawListing {
    fn from(listing: &Listing) -> Self {
        Self {
            title: Some(listing.title.as_str().into()),
            description: Some(listing.description.as_str().into()),
            category: Some(listing.category.label().into()),
            condition: Some(listing.condition.label().into()),
            price: Some(Value::from(listing.price)),
            currency: Some(listing.currency.label().into()),
            location: Some(listing.location.as_str().into()),
            shipping_available: Some(Value::Bool(listing.shipping_available)),
            stock_units: Some(Value::from(listing.stock_units)),
            target_audience: Some(listing.target_audience.label().into()),
        }
    }
}

/// Typed listing fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Trimmed title.
    pub title: String,
    /// Trimmed description.
    pub description: String,
    /// Marketplace category.
    pub category: MarketplaceCategory,
    /// Declared condition.
    pub condition: ListingCondition,
    /// Non-negative asking price.
    pub price: f64,
    /// Quote currency.
    pub currency: Currency,
    /// Trimmed pickup location.
    pub location: String,
    /// Delivery offered.
    pub shipping_available: bool,
    /// Units in stock, at least one.
    pub stock_units: u32,
    /// Intended buyer segment.
    pub target_audience: TargetAudience,
}

impl Listing {
    /// Title and description joined, lowercased, for keyword scans.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }

    /// Formatted asking price.
    #[must_use]
    pub fn display_price(&self) -> String {
        self.currency.format_amount(self.price)
    }
}

/// Listing that passed validation. Only [`crate::validation::ListingValidator`] builds one.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ValidatedListing(Listing);

impl ValidatedListing {
    pub(crate) const fn new(listing: Listing) -> Self {
        Self(listing)
    }

    /// Unwraps the typed fields.
    #[must_use]
    pub fn into_inner(self) -> Listing {
        self.0
    }
}

impl Deref for ValidatedListing {
    type Target = Listing;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Reference listing shown before the seller submits anything.
#[must_use]
pub fn default_listing() -> RawListing {
    RawListing {
        title: Some("Premium Bluetooth Speaker with Deep Bass".into()),
        description: Some(
            "Selling my portable Bluetooth speaker with 24-hour battery life, IPX7 waterproof \
             rating, dual sub-woofers, and party lights. Used sparingly, sounds amazing, includes \
             retail packaging and AUX cable."
                .into(),
        ),
        category: Some("Electronics".into()),
        condition: Some("Like New".into()),
        price: Some(Value::from(6499)),
        currency: Some("INR".into()),
        location: Some("Mumbai".into()),
        shipping_available: Some(Value::Bool(true)),
        stock_units: Some(Value::from(1)),
        target_audience: Some("Mid-Range".into()),
    }
}

/// Validates a tweaked copy of the reference listing.
#[cfg(test)]
pub(crate) fn validated_with(edit: impl FnOnce(&mut RawListing)) -> ValidatedListing {
    let mut raw = default_listing();
    edit(&mut raw);
    crate::validation::ListingValidator::default()
        .validate(&raw)
        .expect("fixture listing should validate")
}
