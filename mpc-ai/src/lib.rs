//! mpc-ai: LLM-generated marketing copy and phone analysis
//!
//! Every public operation on [`AiService`] is infallible: when no API key is
//! configured, or the upstream call fails in any way, a deterministic
//! brand-keyed fallback is returned instead.

pub mod clamp;
pub mod client;
pub mod error;
pub mod fallback;
pub mod models;
pub mod prompts;
pub mod service;

pub use error::AiError;
pub use models::{
    CategoryWinners, EnhancedMobileData, MarketInsights, MarketTrend, PhoneAnalysis,
    PhoneComparison,
};
pub use service::{AiConfig, AiService};
