//! High-level entry points wiring validation, scoring, keywords, blueprint and chat.

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use shared_event_bus::EventPublisher;
use shared_logging::LogLevel;

use crate::{
    blueprint::BlueprintPlanner,
    chat::{classify, ChatMessage, ChatResponder},
    config::AgentConfig,
    keywords::KeywordStrategist,
    listing::{default_listing, RawListing, ValidatedListing},
    report::{AgentResponse, ListingReport},
    scoring::ScoringEngine,
    session::ConversationSession,
    telemetry::{AgentTelemetry, AgentTelemetryBuilder},
    validation::{ListingValidator, ValidationError},
};

/// Owns one instance of every engine plus optional telemetry.
#[derive(Debug, Clone, Default)]
pub struct ListingAgent {
    validator: ListingValidator,
    scoring: ScoringEngine,
    keywords: KeywordStrategist,
    blueprint: BlueprintPlanner,
    responder: ChatResponder,
    telemetry: Option<AgentTelemetry>,
}

impl ListingAgent {
    /// Builds the engines and telemetry sinks described by `config`.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        Self::from_config_with(config, Vec::new())
    }

    /// Like [`Self::from_config`], with `extra` publishers receiving events alongside
    /// the configured event log.
    pub fn from_config_with(
        config: &AgentConfig,
        extra: Vec<Arc<dyn EventPublisher>>,
    ) -> Result<Self> {
        config.check()?;
        let scoring = ScoringEngine::new(config.scoring.clone(), config.pricing.clone());
        let sinks = &config.telemetry;
        let wanted = sinks.log_path.is_some() || sinks.event_log.is_some() || !extra.is_empty();
        let telemetry = if wanted {
            let builder = extra.into_iter().fold(
                AgentTelemetryBuilder::from_config("agent", sinks)?,
                AgentTelemetryBuilder::event_publisher,
            );
            Some(builder.build()?)
        } else {
            None
        };
        Ok(Self {
            validator: ListingValidator::new(config.validation),
            keywords: KeywordStrategist::new(config.keywords.clone()),
            blueprint: BlueprintPlanner::new(scoring.clone()),
            responder: ChatResponder::new(scoring.clone()),
            scoring,
            telemetry,
        })
    }

    /// Attaches telemetry sinks for observability.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: AgentTelemetry) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Returns the telemetry handle if configured.
    #[must_use]
    pub const fn telemetry(&self) -> Option<&AgentTelemetry> {
        self.telemetry.as_ref()
    }

    /// Checks raw form input, logging the outcome.
    pub fn validate(&self, raw: &RawListing) -> Result<ValidatedListing, ValidationError> {
        let outcome = self.validator.validate(raw);
        if let Some(tel) = &self.telemetry {
            match &outcome {
                Ok(listing) => {
                    let _ = tel.log(
                        LogLevel::Info,
                        "agent.listing.validated",
                        json!({ "title": listing.title, "category": listing.category }),
                    );
                    let _ = tel.event(
                        "agent.listing.validated",
                        json!({ "title": listing.title, "category": listing.category }),
                    );
                }
                Err(err) => {
                    let _ = tel.log(
                        LogLevel::Warn,
                        "agent.listing.rejected",
                        json!({ "issues": err.messages() }),
                    );
                    let _ = tel.event("agent.listing.rejected", json!({ "issues": err.issues() }));
                }
            }
        }
        outcome
    }

    /// Score, keyword strategy, blueprint and next steps for a listing.
    #[must_use]
    pub fn build_response(&self, listing: &ValidatedListing) -> AgentResponse {
        self.build_report(listing).response
    }

    /// [`Self::build_response`] plus the per-factor score breakdown.
    #[must_use]
    pub fn build_report(&self, listing: &ValidatedListing) -> ListingReport {
        let score_breakdown = self.scoring.breakdown(listing);
        let response = AgentResponse {
            listing_score: score_breakdown.total,
            keyword_strategy: self.keywords.generate(listing),
            sales_blueprint: self.blueprint.generate(listing),
            next_steps: self.blueprint.next_steps(listing),
        };
        if let Some(tel) = &self.telemetry {
            let _ = tel.log(
                LogLevel::Info,
                "agent.report.generated",
                json!({
                    "title": listing.title,
                    "score": response.listing_score,
                    "band": score_breakdown.band,
                    "heroTags": response.keyword_strategy.hero_tags.len(),
                }),
            );
            let _ = tel.event(
                "agent.report.generated",
                json!({ "title": listing.title, "score": response.listing_score }),
            );
        }
        ListingReport {
            response,
            score_breakdown,
        }
    }

    /// Validates and reports in one step.
    pub fn evaluate(&self, raw: &RawListing) -> Result<ListingReport, ValidationError> {
        let listing = self.validate(raw)?;
        Ok(self.build_report(&listing))
    }

    /// One assistant reply; `history` is left untouched.
    #[must_use]
    pub fn chat_reply(
        &self,
        listing: &ValidatedListing,
        history: &[ChatMessage],
        user_message: &str,
    ) -> ChatMessage {
        let reply = self.responder.reply(listing, history, user_message);
        if let Some(tel) = &self.telemetry {
            let intent = classify(user_message).to_string();
            let _ = tel.log(
                LogLevel::Debug,
                "agent.chat.replied",
                json!({
                    "intent": intent,
                    "historyLen": history.len(),
                    "replyId": reply.id,
                }),
            );
            let _ = tel.event(
                "agent.chat.replied",
                json!({ "intent": intent, "replyId": reply.id }),
            );
        }
        reply
    }

    /// Idle chat session sharing this agent's responder.
    #[must_use]
    pub fn session(&self) -> ConversationSession {
        ConversationSession::new(self.responder.clone())
    }
}

/// Validates a raw listing with default limits.
pub fn validate_listing(raw: &RawListing) -> Result<ValidatedListing, ValidationError> {
    ListingValidator::default().validate(raw)
}

/// Builds the aggregate response with default tuning.
#[must_use]
pub fn build_agent_response(listing: &ValidatedListing) -> AgentResponse {
    ListingAgent::default().build_response(listing)
}

/// Produces one chat reply with default tuning.
#[must_use]
pub fn chat_reply(
    listing: &ValidatedListing,
    history: &[ChatMessage],
    user_message: &str,
) -> ChatMessage {
    ChatResponder::default().reply(listing, history, user_message)
}

/// Report for the built-in reference listing.
pub fn sample_report() -> Result<ListingReport, ValidationError> {
    ListingAgent::default().evaluate(&default_listing())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{listing::validated_with, validation::ListingField};
    use serde_json::Value;
    use shared_event_bus::MemoryEventBus;
    use tempfile::tempdir;

    #[test]
    fn sample_report_scores_reference_listing() {
        let report = sample_report().unwrap();
        let response = &report.response;
        assert!(response.listing_score >= 75, "{}", response.listing_score);
        assert!(!response.keyword_strategy.hero_tags.is_empty());
        assert!(response.sales_blueprint.len() >= 3);
        assert!((3..=5).contains(&response.next_steps.len()));
        assert_eq!(report.score_breakdown.total, response.listing_score);
    }

    #[test]
    fn responses_are_deterministic() {
        let listing = validated_with(|_| {});
        assert_eq!(build_agent_response(&listing), build_agent_response(&listing));
        let json = serde_json::to_string(&build_agent_response(&listing)).unwrap();
        assert_eq!(json, serde_json::to_string(&build_agent_response(&listing)).unwrap());
    }

    #[test]
    fn response_serializes_in_camel_case() {
        let json = serde_json::to_value(sample_report().unwrap()).unwrap();
        assert!(json["listingScore"].is_u64());
        assert!(json["keywordStrategy"]["heroTags"].is_array());
        assert!(json["salesBlueprint"][0]["actionItems"].is_array());
        assert!(json["scoreBreakdown"]["total"].is_u64());
    }

    #[test]
    fn evaluate_surfaces_every_issue() {
        let mut raw = default_listing();
        raw.title = Some("  ".into());
        raw.price = Some(Value::from(-5));
        let err = ListingAgent::default().evaluate(&raw).unwrap_err();
        assert!(err.has_field(ListingField::Title));
        assert!(err.has_field(ListingField::Price));
        assert_eq!(err.issues().len(), 2);
    }

    #[test]
    fn telemetry_records_reports_and_rejections() {
        let bus = Arc::new(MemoryEventBus::new(16));
        let telemetry = AgentTelemetry::builder("agent")
            .event_publisher(bus.clone())
            .build()
            .unwrap();
        let agent = ListingAgent::default().with_telemetry(telemetry);
        agent.evaluate(&default_listing()).unwrap();
        let mut broken = default_listing();
        broken.location = None;
        assert!(agent.evaluate(&broken).is_err());
        assert_eq!(bus.of_type("agent.report.generated").len(), 1);
        assert_eq!(bus.of_type("agent.listing.rejected").len(), 1);
        assert_eq!(bus.of_type("agent.listing.validated").len(), 1);
    }

    #[test]
    fn chat_replies_are_published() {
        let bus = Arc::new(MemoryEventBus::new(16));
        let telemetry = AgentTelemetry::builder("agent")
            .event_publisher(bus.clone())
            .build()
            .unwrap();
        let agent = ListingAgent::default().with_telemetry(telemetry);
        let listing = agent.validate(&default_listing()).unwrap();
        let reply = agent.chat_reply(&listing, &[], "Can you send photos?");
        let events = bus.of_type("agent.chat.replied");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].payload["intent"], "photos");
        assert_eq!(events[0].payload["replyId"], reply.id.as_str());
    }

    #[test]
    fn extra_publishers_join_the_configured_event_log() {
        let dir = tempdir().unwrap();
        let mut config = AgentConfig::default();
        config.telemetry.event_log = Some(dir.path().join("events.jsonl"));
        let bus = Arc::new(MemoryEventBus::new(16));
        let agent = ListingAgent::from_config_with(&config, vec![bus.clone() as Arc<dyn EventPublisher>]).unwrap();
        agent.evaluate(&default_listing()).unwrap();
        assert_eq!(bus.of_type("agent.report.generated").len(), 1);
        let events = std::fs::read_to_string(dir.path().join("events.jsonl")).unwrap();
        assert!(events.contains("agent.report.generated"));
        assert!(events.contains("agent.listing.validated"));
    }

    #[test]
    fn config_sinks_write_to_disk() {
        let dir = tempdir().unwrap();
        let mut config = AgentConfig::default();
        config.telemetry.log_path = Some(dir.path().join("logs/agent.log"));
        config.telemetry.event_log = Some(dir.path().join("events.jsonl"));
        let agent = ListingAgent::from_config(&config).unwrap();
        assert!(agent.telemetry().is_some());
        agent.evaluate(&default_listing()).unwrap();
        let log = std::fs::read_to_string(dir.path().join("logs/agent.log")).unwrap();
        assert!(log.contains("agent.report.generated"));
        let events = std::fs::read_to_string(dir.path().join("events.jsonl")).unwrap();
        assert!(events.contains("agent.report.generated"));
    }

    #[test]
    fn config_without_sinks_has_no_telemetry() {
        let agent = ListingAgent::from_config(&AgentConfig::default()).unwrap();
        assert!(agent.telemetry().is_none());
    }

    #[test]
    fn chat_reply_matches_free_function() {
        let listing = validated_with(|_| {});
        let agent = ListingAgent::default();
        let ours = agent.chat_reply(&listing, &[], "is it still available?");
        let free = chat_reply(&listing, &[], "is it still available?");
        assert_eq!(ours.content, free.content);
    }

    #[test]
    fn agent_session_starts_idle() {
        let mut session = ListingAgent::default().session();
        session.attach_listing(validated_with(|_| {}));
        assert!(session.send("photos please").is_ok());
    }
}
