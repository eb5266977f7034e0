//! AI service: prompt → model → clamp, with deterministic fallbacks

use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::clamp::{allowed_slug, percentage, score_1_10, string_list, text};
use crate::client::ChatClient;
use crate::fallback::{analysis_fallback, comparison_fallback, enhanced_fallback, insights_fallback};
use crate::models::{
    CategoryWinners, EnhancedMobileData, MarketInsights, MarketTrend, PhoneAnalysis,
    PhoneComparison,
};
use crate::prompts::{analysis_prompt, comparison_prompt, enhance_prompt, insights_prompt};
use mpc_common::db::Mobile;

#[derive(Debug, Clone)]
pub struct AiConfig {
    /// `None` or blank disables model calls entirely
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct AiService {
    client: Option<ChatClient>,
}

/// camelCase key, falling back to its snake_case spelling
fn field<'a>(value: &'a Value, camel: &str) -> Option<&'a Value> {
    value.get(camel).or_else(|| {
        let mut snake = String::with_capacity(camel.len() + 4);
        for ch in camel.chars() {
            if ch.is_ascii_uppercase() {
                snake.push('_');
                snake.push(ch.to_ascii_lowercase());
            } else {
                snake.push(ch);
            }
        }
        value.get(snake.as_str())
    })
}

impl AiService {
    pub fn new(config: AiConfig) -> Self {
        let client = config.api_key.as_deref().and_then(|key| {
            match ChatClient::new(key, config.model.clone(), &config.base_url, config.timeout) {
                Ok(client) => Some(client),
                Err(e) => {
                    debug!(error = %e, "AI client disabled");
                    None
                }
            }
        });
        Self { client }
    }

    /// Service that always answers from fallbacks
    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    async fn ask(&self, operation: &str, prompt: String) -> Option<Value> {
        let Some(client) = &self.client else {
            debug!(operation, "No OpenAI key configured, using fallback");
            return None;
        };
        match client.complete_json(&prompt).await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(operation, error = %e, "AI request failed, using fallback");
                None
            }
        }
    }

    pub async fn enhance_mobile_data(&self, mobile: &Mobile) -> EnhancedMobileData {
        let fallback = enhanced_fallback(mobile);
        let Some(value) = self.ask("enhance", enhance_prompt(mobile)).await else {
            return fallback;
        };

        EnhancedMobileData {
            marketing_description: text(
                field(&value, "marketingDescription"),
                &fallback.marketing_description,
            ),
            key_features: string_list(field(&value, "keyFeatures"), &fallback.key_features),
            target_audience: text(field(&value, "targetAudience"), &fallback.target_audience),
            pros: string_list(field(&value, "pros"), &fallback.pros),
            cons: string_list(field(&value, "cons"), &fallback.cons),
            seo_keywords: string_list(field(&value, "seoKeywords"), &fallback.seo_keywords),
            value_score: score_1_10(field(&value, "valueScore"), fallback.value_score),
        }
    }

    pub async fn analyze_phone(&self, mobile: &Mobile) -> PhoneAnalysis {
        let fallback = analysis_fallback(mobile);
        let Some(value) = self.ask("analysis", analysis_prompt(mobile)).await else {
            return fallback;
        };

        PhoneAnalysis {
            overall_score: score_1_10(field(&value, "overallScore"), fallback.overall_score),
            camera_score: score_1_10(field(&value, "cameraScore"), fallback.camera_score),
            performance_score: score_1_10(
                field(&value, "performanceScore"),
                fallback.performance_score,
            ),
            battery_score: score_1_10(field(&value, "batteryScore"), fallback.battery_score),
            display_score: score_1_10(field(&value, "displayScore"), fallback.display_score),
            value_score: score_1_10(field(&value, "valueScore"), fallback.value_score),
            summary: text(field(&value, "summary"), &fallback.summary),
            strengths: string_list(field(&value, "strengths"), &fallback.strengths),
            weaknesses: string_list(field(&value, "weaknesses"), &fallback.weaknesses),
            best_for: string_list(field(&value, "bestFor"), &fallback.best_for),
        }
    }

    /// Winners are restricted to the compared slugs; a missing or foreign
    /// slug takes the fallback pick
    pub async fn compare_phones(&self, mobiles: &[Mobile]) -> PhoneComparison {
        let fallback = comparison_fallback(mobiles);
        let Some(value) = self.ask("compare", comparison_prompt(mobiles)).await else {
            return fallback;
        };

        let slugs: Vec<&str> = mobiles.iter().map(|m| m.slug.as_str()).collect();
        let winners = field(&value, "categoryWinners");
        let category = |key: &str, default: Option<String>| {
            allowed_slug(winners.and_then(|w| w.get(key)), &slugs).or(default)
        };
        let defaults = fallback.category_winners;

        PhoneComparison {
            summary: text(field(&value, "summary"), &fallback.summary),
            winner: allowed_slug(field(&value, "winner"), &slugs).or(fallback.winner),
            category_winners: CategoryWinners {
                camera: category("camera", defaults.camera),
                performance: category("performance", defaults.performance),
                battery: category("battery", defaults.battery),
                display: category("display", defaults.display),
                value: category("value", defaults.value),
            },
            recommendation: text(field(&value, "recommendation"), &fallback.recommendation),
        }
    }

    pub async fn market_insights(&self, brand: &str) -> MarketInsights {
        let fallback = insights_fallback(brand);
        let Some(value) = self.ask("insights", insights_prompt(brand)).await else {
            return fallback;
        };

        MarketInsights {
            market_share: percentage(field(&value, "marketShare"), fallback.market_share),
            popularity_score: percentage(field(&value, "popularityScore"), fallback.popularity_score),
            customer_satisfaction: percentage(
                field(&value, "customerSatisfaction"),
                fallback.customer_satisfaction,
            ),
            trend: field(&value, "trend")
                .and_then(Value::as_str)
                .and_then(MarketTrend::parse)
                .unwrap_or(fallback.trend),
            summary: text(field(&value, "summary"), &fallback.summary),
            key_strengths: string_list(field(&value, "keyStrengths"), &fallback.key_strengths),
            brand: fallback.brand,
        }
    }
}
