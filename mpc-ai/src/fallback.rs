//! Static brand-keyed fallbacks
//!
//! Used when no API key is configured or the model call fails. Output depends
//! only on the input phones, so repeated calls return identical data.

use mpc_common::db::Mobile;
use mpc_common::slug::slugify;

use crate::models::{
    CategoryWinners, EnhancedMobileData, MarketInsights, MarketTrend, PhoneAnalysis,
    PhoneComparison,
};

pub struct BrandProfile {
    pub key: &'static str,
    pub display_name: &'static str,
    pub target_audience: &'static str,
    pub pros: &'static [&'static str],
    pub cons: &'static [&'static str],
    pub best_for: &'static [&'static str],
    /// overall, camera, performance, battery, display, value
    pub scores: [u8; 6],
    pub market_share: u8,
    pub popularity_score: u8,
    pub customer_satisfaction: u8,
    pub trend: MarketTrend,
    pub market_summary: &'static str,
    pub key_strengths: &'static [&'static str],
}

const PROFILES: &[BrandProfile] = &[
    BrandProfile {
        key: "apple",
        display_name: "Apple",
        target_audience: "Users invested in the Apple ecosystem who value long software support",
        pros: &["Polished software with long update support", "Excellent video recording", "Strong resale value"],
        cons: &["Premium pricing", "Slower charging than rivals"],
        best_for: &["Ecosystem users", "Content creators", "Long-term ownership"],
        scores: [9, 9, 9, 7, 9, 7],
        market_share: 28,
        popularity_score: 92,
        customer_satisfaction: 88,
        trend: MarketTrend::Stable,
        market_summary: "Apple holds a dominant premium position with a loyal, high-spending customer base.",
        key_strengths: &["Brand loyalty", "Ecosystem integration", "Chip performance", "Software updates"],
    },
    BrandProfile {
        key: "samsung",
        display_name: "Samsung",
        target_audience: "Android users who want a feature-rich phone at any price point",
        pros: &["Bright, vivid AMOLED display", "Versatile camera system", "Wide range of models"],
        cons: &["Bundled duplicate apps", "Flagships are expensive"],
        best_for: &["Media consumption", "Photography", "Productivity"],
        scores: [8, 8, 8, 8, 9, 7],
        market_share: 22,
        popularity_score: 88,
        customer_satisfaction: 84,
        trend: MarketTrend::Stable,
        market_summary: "Samsung leads Android globally with a lineup spanning budget to foldable flagships.",
        key_strengths: &["Display technology", "Foldables", "Global distribution", "Product range"],
    },
    BrandProfile {
        key: "google",
        display_name: "Google",
        target_audience: "Photography enthusiasts who want clean Android and fast updates",
        pros: &["Class-leading computational photography", "Clean Android with fast updates", "Useful on-device AI features"],
        cons: &["Tensor chips run warm under load", "Limited retail availability"],
        best_for: &["Point-and-shoot photography", "Stock Android fans"],
        scores: [8, 9, 7, 7, 8, 8],
        market_share: 4,
        popularity_score: 72,
        customer_satisfaction: 82,
        trend: MarketTrend::Rising,
        market_summary: "Google is growing steadily on the strength of Pixel cameras and software features.",
        key_strengths: &["Camera processing", "Software experience", "AI features"],
    },
    BrandProfile {
        key: "oneplus",
        display_name: "OnePlus",
        target_audience: "Enthusiasts who want flagship speed and fast charging for less",
        pros: &["Very fast wired charging", "Smooth, responsive software", "Strong value for money"],
        cons: &["Cameras trail the best flagships", "Shorter update policy than some rivals"],
        best_for: &["Gaming", "Power users", "Value seekers"],
        scores: [8, 7, 9, 8, 8, 9],
        market_share: 3,
        popularity_score: 68,
        customer_satisfaction: 80,
        trend: MarketTrend::Stable,
        market_summary: "OnePlus keeps a loyal enthusiast following by pricing flagship hardware aggressively.",
        key_strengths: &["Charging speed", "Performance per dollar", "Clean software"],
    },
    BrandProfile {
        key: "xiaomi",
        display_name: "Xiaomi",
        target_audience: "Value-focused buyers who want high specifications at low prices",
        pros: &["Aggressive pricing", "High-resolution cameras", "Large batteries"],
        cons: &["Ads in some system apps", "Inconsistent update timelines"],
        best_for: &["Budget buyers", "Spec enthusiasts"],
        scores: [8, 8, 8, 8, 8, 9],
        market_share: 13,
        popularity_score: 80,
        customer_satisfaction: 78,
        trend: MarketTrend::Rising,
        market_summary: "Xiaomi competes on value across every segment and keeps gaining share outside China.",
        key_strengths: &["Price to performance", "Fast release cadence", "Broad lineup"],
    },
];

const DEFAULT_PROFILE: BrandProfile = BrandProfile {
    key: "default",
    display_name: "This brand",
    target_audience: "Everyday smartphone users looking for a dependable device",
    pros: &["Solid everyday performance", "Competitive price"],
    cons: &["Limited brand ecosystem", "Fewer accessories available"],
    best_for: &["Everyday use", "Budget-conscious buyers"],
    scores: [7, 7, 7, 7, 7, 7],
    market_share: 2,
    popularity_score: 50,
    customer_satisfaction: 70,
    trend: MarketTrend::Stable,
    market_summary: "A smaller player competing on price and regional availability.",
    key_strengths: &["Pricing", "Regional availability"],
};

/// Profile for a brand name or slug; unknown brands get the default row
pub fn profile_for(brand: &str) -> &'static BrandProfile {
    let key = slugify(&brand.to_lowercase());
    PROFILES
        .iter()
        .find(|p| p.key == key)
        .unwrap_or(&DEFAULT_PROFILE)
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn known(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && !value.eq_ignore_ascii_case("n/a")).then_some(value)
}

/// Feature bullets built from the phone's short specs
pub fn spec_features(mobile: &Mobile) -> Vec<String> {
    let specs = &mobile.short_specs;
    let mut features = Vec::new();
    if let Some(ram) = known(&specs.ram) {
        features.push(format!("{} RAM", ram));
    }
    if let Some(storage) = known(&specs.storage) {
        features.push(format!("{} storage", storage));
    }
    if let Some(camera) = known(&specs.camera) {
        features.push(format!("{} main camera", camera));
    }
    if let Some(battery) = specs.battery.as_deref().and_then(known) {
        features.push(format!("{} battery", battery));
    }
    if let Some(display) = specs.display.as_deref().and_then(known) {
        features.push(format!("{} display", display));
    }
    if let Some(processor) = specs.processor.as_deref().and_then(known) {
        features.push(processor.to_string());
    }
    features
}

pub fn enhanced_fallback(mobile: &Mobile) -> EnhancedMobileData {
    let profile = profile_for(&mobile.brand);
    let features = spec_features(mobile);
    let highlights = if features.is_empty() {
        "a balanced set of features".to_string()
    } else {
        features.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
    };

    EnhancedMobileData {
        marketing_description: format!(
            "The {} brings {} together in one device, released {}.",
            mobile.name, highlights, mobile.release_date
        ),
        key_features: features,
        target_audience: profile.target_audience.to_string(),
        pros: owned(profile.pros),
        cons: owned(profile.cons),
        seo_keywords: vec![
            mobile.name.to_lowercase(),
            format!("{} price", mobile.name.to_lowercase()),
            format!("{} specs", mobile.name.to_lowercase()),
            format!("{} smartphone", mobile.brand.to_lowercase()),
        ],
        value_score: profile.scores[5],
    }
}

pub fn analysis_fallback(mobile: &Mobile) -> PhoneAnalysis {
    let profile = profile_for(&mobile.brand);
    let [overall, camera, performance, battery, display, value] = profile.scores;
    PhoneAnalysis {
        overall_score: overall,
        camera_score: camera,
        performance_score: performance,
        battery_score: battery,
        display_score: display,
        value_score: value,
        summary: format!(
            "The {} is a well-rounded {} phone with {} RAM and a {} camera.",
            mobile.name, profile.display_name, mobile.short_specs.ram, mobile.short_specs.camera
        ),
        strengths: owned(profile.pros),
        weaknesses: owned(profile.cons),
        best_for: owned(profile.best_for),
    }
}

fn battery_mah(mobile: &Mobile) -> Option<u32> {
    let battery = mobile.short_specs.battery.as_deref()?;
    let digits: String = battery.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Slug of the phone with the highest key (first wins ties)
fn best_by<K: PartialOrd>(mobiles: &[Mobile], key: impl Fn(&Mobile) -> K) -> Option<String> {
    let mut best: Option<(&Mobile, K)> = None;
    for mobile in mobiles {
        let k = key(mobile);
        let better = match &best {
            Some((_, current)) => k > *current,
            None => true,
        };
        if better {
            best = Some((mobile, k));
        }
    }
    best.map(|(m, _)| m.slug.clone())
}

pub fn comparison_fallback(mobiles: &[Mobile]) -> PhoneComparison {
    let score = |index: usize| move |m: &Mobile| profile_for(&m.brand).scores[index];
    let names: Vec<&str> = mobiles.iter().map(|m| m.name.as_str()).collect();

    let winner = best_by(mobiles, score(0));
    let battery = if mobiles.iter().any(|m| battery_mah(m).is_some()) {
        best_by(mobiles, |m| battery_mah(m).unwrap_or(0))
    } else {
        best_by(mobiles, score(3))
    };

    let winner_name = winner
        .as_deref()
        .and_then(|slug| mobiles.iter().find(|m| m.slug == slug))
        .map(|m| m.name.clone())
        .unwrap_or_default();

    PhoneComparison {
        summary: format!("Comparing {}.", names.join(" vs ")),
        category_winners: CategoryWinners {
            camera: best_by(mobiles, score(1)),
            performance: best_by(mobiles, score(2)),
            battery,
            display: best_by(mobiles, score(4)),
            value: best_by(mobiles, score(5)),
        },
        recommendation: if winner_name.is_empty() {
            "Pick the phone whose strengths match how you use your device.".to_string()
        } else {
            format!(
                "The {} offers the best overall balance; pick another only if its category win matters most to you.",
                winner_name
            )
        },
        winner,
    }
}

pub fn insights_fallback(brand: &str) -> MarketInsights {
    let profile = profile_for(brand);
    let display = if profile.key == DEFAULT_PROFILE.key {
        brand.trim().to_string()
    } else {
        profile.display_name.to_string()
    };
    MarketInsights {
        brand: display,
        market_share: profile.market_share,
        popularity_score: profile.popularity_score,
        customer_satisfaction: profile.customer_satisfaction,
        trend: profile.trend,
        summary: profile.market_summary.to_string(),
        key_strengths: owned(profile.key_strengths),
    }
}
