//! Text extraction helpers shared by the vendor transformers

use once_cell::sync::Lazy;
use regex::Regex;

use mpc_common::db::{BuildMaterials, Dimensions};

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

static BR_TAG: Lazy<Regex> = Lazy::new(|| re(r"(?i)<br\s*/?>"));
static HTML_TAG: Lazy<Regex> = Lazy::new(|| re(r"<[^>]*>"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| re(r"\s+"));
static STORAGE_WITH_RAM: Lazy<Regex> =
    Lazy::new(|| re(r"(?i)(\d+(?:\.\d+)?)\s*(GB|TB)\s+(\d+(?:\.\d+)?)\s*GB\s+RAM"));
static RAM_ONLY: Lazy<Regex> = Lazy::new(|| re(r"(?i)(\d+(?:\.\d+)?)\s*GB(?:\s+RAM)?"));
static STORAGE_ONLY: Lazy<Regex> = Lazy::new(|| re(r"(?i)(\d+(?:\.\d+)?)\s*(GB|TB)"));
static CAMERA_MP: Lazy<Regex> = Lazy::new(|| re(r"(?i)(\d+(?:\.\d+)?)\s*MP"));
static BATTERY_MAH: Lazy<Regex> = Lazy::new(|| re(r"(?i)(\d{3,5})\s*mAh"));
static DISPLAY_INCHES: Lazy<Regex> =
    Lazy::new(|| re(r#"(?i)(\d+(?:\.\d+)?)\s*(?:"|″|inches|inch)"#));
static RELEASE_YEAR_MONTH: Lazy<Regex> = Lazy::new(|| re(r"(\d{4}),\s*([A-Za-z]+)"));
static ISO_DATE: Lazy<Regex> = Lazy::new(|| re(r"^(\d{4})-(\d{2})(?:-\d{2})?$"));
static DIMENSIONS_MM: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)(\d+(?:\.\d+)?)\s*x\s*(\d+(?:\.\d+)?)\s*x\s*(\d+(?:\.\d+)?)\s*mm")
});
static WEIGHT_G: Lazy<Regex> = Lazy::new(|| re(r"(?i)(\d+(?:\.\d+)?)\s*g\b"));

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Strip tags, turn `<br>` into ", ", decode common entities, collapse whitespace
pub fn strip_html(input: &str) -> String {
    let with_breaks = BR_TAG.replace_all(input, ", ");
    let without_tags = HTML_TAG.replace_all(&with_breaks, "");
    let decoded = decode_entities(&without_tags);
    let collapsed = WHITESPACE.replace_all(&decoded, " ");
    collapsed
        .trim()
        .trim_start_matches(',')
        .trim_end_matches(',')
        .trim()
        .to_string()
}

fn decode_entities(input: &str) -> String {
    input
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// (ram, storage) from strings like "128GB 8GB RAM"
pub fn extract_ram_storage(input: &str) -> (Option<String>, Option<String>) {
    if let Some(caps) = STORAGE_WITH_RAM.captures(input) {
        let storage = format!("{}{}", &caps[1], caps[2].to_ascii_uppercase());
        let ram = format!("{}GB", &caps[3]);
        return (Some(ram), Some(storage));
    }
    (None, extract_storage(input))
}

/// "8GB" from "8 GB RAM" / "8GB"
pub fn extract_ram(input: &str) -> Option<String> {
    if let (Some(ram), _) = extract_ram_storage(input) {
        return Some(ram);
    }
    RAM_ONLY
        .captures(input)
        .map(|caps| format!("{}GB", &caps[1]))
}

/// "256GB" / "1TB" from the first capacity mentioned
pub fn extract_storage(input: &str) -> Option<String> {
    STORAGE_ONLY
        .captures(input)
        .map(|caps| format!("{}{}", &caps[1], caps[2].to_ascii_uppercase()))
}

/// "50MP" from the first megapixel figure
pub fn extract_camera(input: &str) -> Option<String> {
    CAMERA_MP.captures(input).map(|caps| format!("{}MP", &caps[1]))
}

/// "5000mAh"
pub fn extract_battery(input: &str) -> Option<String> {
    BATTERY_MAH.captures(input).map(|caps| format!("{}mAh", &caps[1]))
}

/// "6.2 inches"
pub fn extract_display_size(input: &str) -> Option<String> {
    DISPLAY_INCHES
        .captures(input)
        .map(|caps| format!("{} inches", &caps[1]))
}

/// Normalize a launch string to "Month YYYY"
///
/// "Released 2024, January 24" → "January 2024";
/// "Exp. release 2025, March" → "March 2025"; "2023-10-04" → "October 2023";
/// empty → "TBA". Unrecognized text is returned cleaned but otherwise as-is.
pub fn normalize_release_date(input: &str) -> String {
    let cleaned = strip_html(input);
    if cleaned.is_empty() {
        return "TBA".to_string();
    }

    if let Some(caps) = RELEASE_YEAR_MONTH.captures(&cleaned) {
        let month = &caps[2];
        if let Some(full) = MONTHS
            .iter()
            .find(|m| m.to_ascii_lowercase().starts_with(&month.to_ascii_lowercase()) && month.len() >= 3)
        {
            return format!("{} {}", full, &caps[1]);
        }
    }

    if let Some(caps) = ISO_DATE.captures(&cleaned) {
        let month_index = caps[2].parse::<usize>().unwrap_or(0);
        if (1..=12).contains(&month_index) {
            return format!("{} {}", MONTHS[month_index - 1], &caps[1]);
        }
    }

    let lower = cleaned.to_ascii_lowercase();
    for prefix in ["released ", "exp. release ", "expected "] {
        if lower.starts_with(prefix) {
            return cleaned[prefix.len()..].trim().to_string();
        }
    }
    cleaned
}

/// Dimensions from "147 x 70.6 x 7.6 mm" plus an optional weight string
pub fn parse_dimensions(dimensions: &str, weight: Option<&str>) -> Option<Dimensions> {
    let caps = DIMENSIONS_MM.captures(dimensions)?;
    let weight = weight
        .and_then(|w| WEIGHT_G.captures(w))
        .map(|c| format!("{} g", &c[1]))
        .unwrap_or_default();
    Some(Dimensions {
        height: format!("{} mm", &caps[1]),
        width: format!("{} mm", &caps[2]),
        thickness: format!("{} mm", &caps[3]),
        weight,
    })
}

/// Build materials from "Glass front (Gorilla Glass Victus 2), aluminum frame, glass back"
pub fn parse_build(build: &str) -> Option<BuildMaterials> {
    let mut materials = BuildMaterials::default();
    let mut found = false;

    for part in build.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let lower = part.to_ascii_lowercase();
        for (keyword, slot) in [
            ("front", &mut materials.front),
            ("back", &mut materials.back),
            ("frame", &mut materials.frame),
        ] {
            if !slot.is_empty() {
                continue;
            }
            if let Some(pos) = lower.find(keyword) {
                let remainder = format!("{}{}", &part[..pos], &part[pos + keyword.len()..]);
                let value = WHITESPACE.replace_all(remainder.trim(), " ").to_string();
                if !value.is_empty() {
                    *slot = capitalize(&value);
                    found = true;
                    break;
                }
            }
        }
    }

    found.then_some(materials)
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Model name with a leading brand name removed ("Samsung Galaxy S24" → "Galaxy S24")
pub fn strip_brand_prefix(name: &str, brand: &str) -> String {
    let name = name.trim();
    let brand = brand.trim();
    if brand.is_empty() {
        return name.to_string();
    }
    let lower = name.to_ascii_lowercase();
    let prefix = format!("{} ", brand.to_ascii_lowercase());
    if lower.starts_with(&prefix) && name.is_char_boundary(prefix.len()) {
        name[prefix.len()..].trim().to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("Nano-SIM<br>eSIM &amp; <b>dual</b>&nbsp;standby"),
            "Nano-SIM, eSIM & dual standby"
        );
        assert_eq!(strip_html("<br/>  "), "");
    }

    #[test]
    fn test_extract_ram_storage() {
        assert_eq!(
            extract_ram_storage("128GB 8GB RAM, 256GB 8GB RAM"),
            (Some("8GB".to_string()), Some("128GB".to_string()))
        );
        assert_eq!(extract_ram_storage("1TB"), (None, Some("1TB".to_string())));
        assert_eq!(extract_ram("12 GB RAM"), Some("12GB".to_string()));
    }

    #[test]
    fn test_extract_units() {
        assert_eq!(extract_camera("50 MP, f/1.8"), Some("50MP".to_string()));
        assert_eq!(extract_battery("Li-Ion 5000 mAh, non-removable"), Some("5000mAh".to_string()));
        assert_eq!(extract_display_size("6.2\""), Some("6.2 inches".to_string()));
        assert_eq!(extract_display_size("6.7 inches, 110.2 cm2"), Some("6.7 inches".to_string()));
        assert_eq!(extract_camera("no camera"), None);
    }

    #[test]
    fn test_normalize_release_date() {
        assert_eq!(normalize_release_date("Released 2024, January 24"), "January 2024");
        assert_eq!(normalize_release_date("Exp. release 2025, March"), "March 2025");
        assert_eq!(normalize_release_date("2023, Sep"), "September 2023");
        assert_eq!(normalize_release_date("2023-10-04"), "October 2023");
        assert_eq!(normalize_release_date(""), "TBA");
        assert_eq!(normalize_release_date("Cancelled"), "Cancelled");
    }

    #[test]
    fn test_parse_dimensions() {
        let dims = parse_dimensions("147 x 70.6 x 7.6 mm (5.79 x 2.78 x 0.30 in)", Some("167 g (5.89 oz)")).unwrap();
        assert_eq!(dims.height, "147 mm");
        assert_eq!(dims.width, "70.6 mm");
        assert_eq!(dims.thickness, "7.6 mm");
        assert_eq!(dims.weight, "167 g");
        assert!(parse_dimensions("unknown", None).is_none());
    }

    #[test]
    fn test_parse_build() {
        let build = parse_build("Glass front (Gorilla Glass Victus 2), aluminum frame, glass back (Gorilla Glass Victus 2)").unwrap();
        assert_eq!(build.front, "Glass (Gorilla Glass Victus 2)");
        assert_eq!(build.frame, "Aluminum");
        assert_eq!(build.back, "Glass (Gorilla Glass Victus 2)");
        assert!(parse_build("IP68 dust/water resistant").is_none());
    }

    #[test]
    fn test_strip_brand_prefix() {
        assert_eq!(strip_brand_prefix("Samsung Galaxy S24", "Samsung"), "Galaxy S24");
        assert_eq!(strip_brand_prefix("iPhone 15", "Apple"), "iPhone 15");
        assert_eq!(strip_brand_prefix("OnePlus 12", "oneplus"), "12");
    }
}
