//! Prompt construction
//!
//! Each prompt names the exact JSON keys expected back so the response can be
//! read field by field.

use mpc_common::db::Mobile;

use crate::fallback::spec_features;

pub const SYSTEM_PROMPT: &str = "You are a smartphone market analyst writing for a price comparison \
website. Respond with a single JSON object only, using exactly the keys requested.";

fn phone_block(mobile: &Mobile) -> String {
    let mut lines = vec![
        format!("Name: {}", mobile.name),
        format!("Brand: {}", mobile.brand),
        format!("Model: {}", mobile.model),
        format!("Release date: {}", mobile.release_date),
    ];
    if let Some(price) = &mobile.price {
        lines.push(format!("Price: {}", price));
    }
    let features = spec_features(mobile);
    if !features.is_empty() {
        lines.push(format!("Key specs: {}", features.join(", ")));
    }
    for category in &mobile.specifications {
        let specs: Vec<String> = category
            .specs
            .iter()
            .map(|s| format!("{}: {}", s.feature, s.value))
            .collect();
        lines.push(format!("{}: {}", category.category, specs.join("; ")));
    }
    lines.join("\n")
}

pub fn enhance_prompt(mobile: &Mobile) -> String {
    format!(
        "Write marketing content for this phone.\n\n{}\n\n\
         Return JSON with keys: marketingDescription (string, 2-3 sentences), \
         keyFeatures (array of strings), targetAudience (string), pros (array of strings), \
         cons (array of strings), seoKeywords (array of strings), valueScore (integer 1-10).",
        phone_block(mobile)
    )
}

pub fn analysis_prompt(mobile: &Mobile) -> String {
    format!(
        "Analyze this phone.\n\n{}\n\n\
         Return JSON with keys: overallScore, cameraScore, performanceScore, batteryScore, \
         displayScore, valueScore (integers 1-10), summary (string), strengths (array of strings), \
         weaknesses (array of strings), bestFor (array of strings).",
        phone_block(mobile)
    )
}

pub fn comparison_prompt(mobiles: &[Mobile]) -> String {
    let blocks: Vec<String> = mobiles
        .iter()
        .map(|m| format!("Slug: {}\n{}", m.slug, phone_block(m)))
        .collect();
    format!(
        "Compare these phones.\n\n{}\n\n\
         Return JSON with keys: summary (string), winner (slug of the best phone), \
         categoryWinners (object with keys camera, performance, battery, display, value, each a slug), \
         recommendation (string). Only use the slugs listed above.",
        blocks.join("\n\n---\n\n")
    )
}

pub fn insights_prompt(brand: &str) -> String {
    format!(
        "Give a market overview of the smartphone brand \"{}\".\n\n\
         Return JSON with keys: marketShare (global percentage 0-100), popularityScore (0-100), \
         customerSatisfaction (0-100), trend (one of \"rising\", \"stable\", \"declining\"), \
         summary (string), keyStrengths (array of strings).",
        brand.trim()
    )
}
