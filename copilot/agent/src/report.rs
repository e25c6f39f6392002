//! Report types returned to the UI.

use serde::Serialize;

use crate::{keywords::KeywordStrategy, scoring::ScoreBreakdown};

/// One blueprint card: an observation paired with concrete actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentInsight {
    /// Card title.
    pub headline: String,
    /// Observation about the listing.
    pub insight: String,
    /// Concrete actions, most important first.
    pub action_items: Vec<String>,
}

impl AgentInsight {
    /// Badge shown on the card at `index` (zero based), e.g. `Play #1`.
    #[must_use]
    pub fn play_label(index: usize) -> String {
        format!("Play #{}", index + 1)
    }
}

/// Everything derived from one validated listing. Contains no timestamps or random values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    /// Listing power score, 0-100.
    pub listing_score: u8,
    /// Tags and hook.
    pub keyword_strategy: KeywordStrategy,
    /// Cards in fixed priority order.
    pub sales_blueprint: Vec<AgentInsight>,
    /// Ordered action queue.
    pub next_steps: Vec<String>,
}

/// Response plus the score breakdown, as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingReport {
    /// Aggregate response.
    #[serde(flatten)]
    pub response: AgentResponse,
    /// Points per scoring factor.
    pub score_breakdown: ScoreBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_labels_are_one_based() {
        assert_eq!(AgentInsight::play_label(0), "Play #1");
        assert_eq!(AgentInsight::play_label(3), "Play #4");
    }
}
