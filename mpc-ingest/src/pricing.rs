//! Price estimation for imported phones without an upstream price
//!
//! Model names are bucketed into a tier by keyword, then priced from a
//! per-brand USD table.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTier {
    Budget,
    Mid,
    UpperMid,
    Flagship,
}

/// Entry-level series such as Galaxy A15, M34, Realme C55
static BUDGET_SERIES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[amc]\d{1,3}[a-z]?$").expect("valid regex"));

/// [budget, mid, upper-mid, flagship] in whole US dollars
const BRAND_PRICES: &[(&str, [u32; 4])] = &[
    ("apple", [429, 799, 999, 1199]),
    ("samsung", [199, 449, 999, 1299]),
    ("google", [349, 499, 799, 999]),
    ("oneplus", [299, 499, 699, 899]),
    ("xiaomi", [149, 299, 499, 999]),
    ("motorola", [149, 299, 499, 899]),
    ("nothing", [299, 349, 449, 699]),
];

const DEFAULT_PRICES: [u32; 4] = [149, 299, 599, 999];

fn tokens(name: &str) -> Vec<String> {
    name.to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Classify a model name
///
/// Checked in order: flagship keywords ("pro max", "ultra", "fold", "flip"),
/// upper-mid ("pro", "plus", "+"), budget ("lite", "go", "mini", "neo", A/M/C series),
/// else mid.
pub fn classify_tier(model_name: &str) -> PriceTier {
    let lower = model_name.to_ascii_lowercase();
    let tokens = tokens(model_name);
    let has = |word: &str| tokens.iter().any(|t| t == word);

    if lower.contains("pro max")
        || has("ultra")
        || tokens.iter().any(|t| t.starts_with("fold") || t.starts_with("flip"))
    {
        return PriceTier::Flagship;
    }
    if has("pro") || has("plus") || lower.contains('+') {
        return PriceTier::UpperMid;
    }
    if has("lite")
        || has("go")
        || has("mini")
        || has("neo")
        || tokens.iter().any(|t| BUDGET_SERIES.is_match(t))
    {
        return PriceTier::Budget;
    }
    PriceTier::Mid
}

/// Estimated price string such as "$1,199"
pub fn estimate_price(brand: &str, model_name: &str) -> String {
    let brand_slug = mpc_common::slug::slugify(brand);
    let prices = BRAND_PRICES
        .iter()
        .find(|(b, _)| *b == brand_slug)
        .map(|(_, p)| *p)
        .unwrap_or(DEFAULT_PRICES);

    let amount = match classify_tier(model_name) {
        PriceTier::Budget => prices[0],
        PriceTier::Mid => prices[1],
        PriceTier::UpperMid => prices[2],
        PriceTier::Flagship => prices[3],
    };
    format_usd(amount)
}

/// "$1,299" style thousands formatting
pub fn format_usd(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("${}", out)
}
