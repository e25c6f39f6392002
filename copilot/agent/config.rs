use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use shared_logging::LogLevel;

use crate::validation::ValidationLimits;

/// Tunable runtime configuration, usually read from `copilot.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentConfig {
    /// Free-text length limits.
    pub validation: ValidationLimits,
    /// Score band caps and saturation points.
    pub scoring: ScoringConfig,
    /// Price positioning parameters.
    pub pricing: PricingConfig,
    /// Keyword generation limits.
    pub keywords: KeywordConfig,
    /// Log and event sinks.
    pub telemetry: TelemetryConfig,
}

impl AgentConfig {
    /// Loads configuration from a TOML file. Relative telemetry paths resolve
    /// against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading agent config {}", path.display()))?;
        let mut config: Self =
            toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        config.telemetry.resolve_relative_to(&base);
        config.check()?;
        Ok(config)
    }

    /// Rejects values the engines cannot work with.
    pub fn check(&self) -> Result<()> {
        let scoring = &self.scoring;
        let bands = [
            scoring.description_band,
            scoring.title_band,
            scoring.price_band,
            scoring.condition_band,
            scoring.shipping_band,
        ];
        if bands.iter().any(|band| !band.is_finite() || *band < 0.0) {
            bail!("score bands must be finite and non-negative");
        }
        if scoring.description_saturation_words == 0 || scoring.title_saturation_chars == 0 {
            bail!("saturation points must be positive");
        }
        if !(self.pricing.usd_to_inr.is_finite() && self.pricing.usd_to_inr > 0.0) {
            bail!("pricing.usd_to_inr must be positive");
        }
        if !(0.0..self.pricing.fair_ratio_high).contains(&self.pricing.fair_ratio_low) {
            bail!("invalid fair price ratio bounds: low must be in [0, high)");
        }
        if self.keywords.min_hero_tags == 0 || self.keywords.min_hero_tags > self.keywords.max_hero_tags {
            bail!(
                "keywords.min_hero_tags ({}) must be between 1 and max_hero_tags ({})",
                self.keywords.min_hero_tags,
                self.keywords.max_hero_tags
            );
        }
        if LogLevel::parse(&self.telemetry.min_level).is_none() {
            bail!("unknown telemetry.min_level '{}'", self.telemetry.min_level);
        }
        Ok(())
    }
}

/// Score band caps; each factor is clamped to its cap before summation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Cap for description richness.
    pub description_band: f64,
    /// Cap for title quality.
    pub title_band: f64,
    /// Cap for price positioning.
    pub price_band: f64,
    /// Cap for condition tier.
    pub condition_band: f64,
    /// Points for offering delivery.
    pub shipping_band: f64,
    /// Word count at which description length stops earning points.
    pub description_saturation_words: usize,
    /// Points per distinct feature keyword in the listing text.
    pub feature_keyword_points: f64,
    /// Title length at which length stops earning points.
    pub title_saturation_chars: usize,
    /// Points per distinct benefit word in the title.
    pub benefit_word_points: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            description_band: 30.0,
            title_band: 20.0,
            price_band: 20.0,
            condition_band: 20.0,
            shipping_band: 10.0,
            description_saturation_words: 60,
            feature_keyword_points: 3.0,
            title_saturation_chars: 40,
            benefit_word_points: 4.0,
        }
    }
}

/// Price positioning relative to the category norm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingConfig {
    /// Conversion applied to USD prices before comparing with INR norms.
    pub usd_to_inr: f64,
    /// Lowest price/norm ratio still considered fair.
    pub fair_ratio_low: f64,
    /// Highest price/norm ratio considered fair for mid-range buyers.
    pub fair_ratio_high: f64,
    /// Extra headroom above `fair_ratio_high` tolerated by premium collectors.
    pub premium_headroom: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            usd_to_inr: 83.0,
            fair_ratio_low: 0.6,
            fair_ratio_high: 1.15,
            premium_headroom: 0.35,
        }
    }
}

/// Hero tag bounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeywordConfig {
    /// Fewest hero tags emitted.
    pub min_hero_tags: usize,
    /// Most hero tags emitted.
    pub max_hero_tags: usize,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            min_hero_tags: 3,
            max_hero_tags: 6,
        }
    }
}

/// Telemetry sinks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TelemetryConfig {
    /// JSON-lines log file; logging is off when unset.
    pub log_path: Option<PathBuf>,
    /// Minimum level written to the log.
    pub min_level: String,
    /// JSON-lines event file; events are off when unset.
    pub event_log: Option<PathBuf>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            min_level: "info".into(),
            event_log: None,
        }
    }
}

impl TelemetryConfig {
    /// Parsed minimum level, falling back to info.
    #[must_use]
    pub fn level(&self) -> LogLevel {
        LogLevel::parse(&self.min_level).unwrap_or_default()
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [&mut self.log_path, &mut self.event_log].into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
