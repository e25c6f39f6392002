#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Marketplace listing copilot: validation, listing power score, keyword strategy,
//! sales blueprint and templated buyer-chat replies.

/// Listing form types and closed option sets.
pub mod listing;

/// Per-category buyer motivations, trust signals and tuning profiles.
pub mod catalog;

/// Word lists and tokenizing helpers.
pub mod lexicon;

/// Aggregate response types.
pub mod report;

/// Field-level validation of raw form input.
#[path = "../validation.rs"]
pub mod validation;

/// Listing power score.
#[path = "../scoring.rs"]
pub mod scoring;

/// Hero tags, supporting tags, hashtags and the copy hook.
#[path = "../keywords.rs"]
pub mod keywords;

/// Sales blueprint cards and next steps.
#[path = "../blueprint.rs"]
pub mod blueprint;

/// Templated chat replies.
#[path = "../chat.rs"]
pub mod chat;

/// Chat history gated on a validated listing.
#[path = "../session.rs"]
pub mod session;

/// TOML configuration.
#[path = "../config.rs"]
pub mod config;

/// Telemetry helpers.
#[path = "../telemetry.rs"]
pub mod telemetry;

/// High-level runtime entrypoints.
#[path = "../main.rs"]
pub mod runtime;

pub use blueprint::{BlueprintPlanner, BlueprintTier};
pub use catalog::{category_insights, CategoryInsight};
pub use chat::{ChatIntent, ChatMessage, ChatResponder, ChatRole};
pub use config::AgentConfig;
pub use keywords::{KeywordStrategist, KeywordStrategy};
pub use listing::{
    default_listing, Currency, Listing, ListingCondition, MarketplaceCategory, RawListing,
    TargetAudience, ValidatedListing,
};
pub use report::{AgentInsight, AgentResponse, ListingReport};
pub use runtime::{
    build_agent_response, chat_reply, sample_report, validate_listing, ListingAgent,
};
pub use scoring::{ScoreBand, ScoreBreakdown, ScoringEngine};
pub use session::{ChatError, ConversationSession, ConversationState};
pub use telemetry::{AgentTelemetry, AgentTelemetryBuilder};
pub use validation::{FieldIssue, ListingField, ListingValidator, ValidationError};
