//! Coercion of loosely-typed LLM JSON into bounded values
//!
//! Models return numbers as floats, strings, or not at all. Each helper takes
//! the raw field and a fallback and always yields an in-range value.

use serde_json::Value;

/// Maximum list length kept from a model response
pub const MAX_LIST_ITEMS: usize = 8;

fn as_number(value: Option<&Value>) -> Option<f64> {
    let number: Option<f64> = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Round and clamp into `[min, max]`; non-numeric input yields `fallback`
pub fn clamp_score(value: Option<&Value>, min: u8, max: u8, fallback: u8) -> u8 {
    match as_number(value) {
        Some(n) => n.round().clamp(min as f64, max as f64) as u8,
        None => fallback.clamp(min, max),
    }
}

/// 1–10 score
pub fn score_1_10(value: Option<&Value>, fallback: u8) -> u8 {
    clamp_score(value, 1, 10, fallback)
}

/// 0–100 percentage
pub fn percentage(value: Option<&Value>, fallback: u8) -> u8 {
    clamp_score(value, 0, 100, fallback)
}

/// Non-empty trimmed string, else `fallback`
pub fn text(value: Option<&Value>, fallback: &str) -> String {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

/// String array truncated to [`MAX_LIST_ITEMS`]; empty or missing yields `fallback`
pub fn string_list(value: Option<&Value>, fallback: &[String]) -> Vec<String> {
    let items: Vec<String> = value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .take(MAX_LIST_ITEMS)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if items.is_empty() {
        fallback.iter().take(MAX_LIST_ITEMS).cloned().collect()
    } else {
        items
    }
}

/// Slug restricted to an allowed set (case-insensitive match, canonical casing kept)
pub fn allowed_slug(value: Option<&Value>, allowed: &[&str]) -> Option<String> {
    let candidate = value?.as_str()?.trim();
    allowed
        .iter()
        .find(|slug| slug.eq_ignore_ascii_case(candidate))
        .map(|slug| slug.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_score_clamping() {
        assert_eq!(score_1_10(Some(&json!(15)), 5), 10);
        assert_eq!(score_1_10(Some(&json!(-3)), 5), 1);
        assert_eq!(score_1_10(Some(&json!(7.6)), 5), 8);
        assert_eq!(score_1_10(Some(&json!("9")), 5), 9);
        assert_eq!(score_1_10(Some(&json!("great")), 6), 6);
        assert_eq!(score_1_10(None, 0), 1);
    }

    #[test]
    fn test_percentage_clamping() {
        assert_eq!(percentage(Some(&json!(140)), 50), 100);
        assert_eq!(percentage(Some(&json!("23%")), 50), 23);
        assert_eq!(percentage(Some(&json!(null)), 50), 50);
    }

    #[test]
    fn test_string_list_truncates_and_falls_back() {
        let long = json!(["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
        assert_eq!(string_list(Some(&long), &[]).len(), MAX_LIST_ITEMS);

        let fallback = vec!["x".to_string()];
        assert_eq!(string_list(Some(&json!([" ", 3])), &fallback), fallback);
        assert_eq!(string_list(None, &fallback), fallback);
    }

    #[test]
    fn test_allowed_slug() {
        let allowed = ["pixel-8", "iphone-15"];
        assert_eq!(allowed_slug(Some(&json!("Pixel-8")), &allowed), Some("pixel-8".to_string()));
        assert_eq!(allowed_slug(Some(&json!("galaxy-s24")), &allowed), None);
        assert_eq!(allowed_slug(Some(&json!(1)), &allowed), None);
    }

    #[test]
    fn test_text_trims_and_falls_back() {
        assert_eq!(text(Some(&json!("  hi ")), "fb"), "hi");
        assert_eq!(text(Some(&json!("")), "fb"), "fb");
    }
}
