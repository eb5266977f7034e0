//! AI output shapes returned to the web client

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedMobileData {
    pub marketing_description: String,
    pub key_features: Vec<String>,
    pub target_audience: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub seo_keywords: Vec<String>,
    /// 1–10
    pub value_score: u8,
}

/// Per-phone scorecard; every score is 1–10
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneAnalysis {
    pub overall_score: u8,
    pub camera_score: u8,
    pub performance_score: u8,
    pub battery_score: u8,
    pub display_score: u8,
    pub value_score: u8,
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub best_for: Vec<String>,
}

/// Slugs of the winning phone per category (`None` when undecided)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryWinners {
    pub camera: Option<String>,
    pub performance: Option<String>,
    pub battery: Option<String>,
    pub display: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneComparison {
    pub summary: String,
    /// Always one of the compared slugs, or `None`
    pub winner: Option<String>,
    pub category_winners: CategoryWinners,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTrend {
    Rising,
    Stable,
    Declining,
}

impl MarketTrend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rising" | "up" | "growing" => Some(MarketTrend::Rising),
            "stable" | "flat" => Some(MarketTrend::Stable),
            "declining" | "down" | "falling" => Some(MarketTrend::Declining),
            _ => None,
        }
    }
}

/// Brand-level market view; percentages are 0–100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsights {
    pub brand: String,
    pub market_share: u8,
    pub popularity_score: u8,
    pub customer_satisfaction: u8,
    pub trend: MarketTrend,
    pub summary: String,
    pub key_strengths: Vec<String>,
}
