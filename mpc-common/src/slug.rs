//! URL slug helpers
//!
//! Slugs are the natural keys for brands and mobiles (`/mobile/{brand}/{slug}`).

/// Derive a URL-safe slug from a display name
///
/// Lowercases ASCII alphanumerics, collapses every other run of characters
/// into a single `-`, and trims leading/trailing dashes.
///
/// ```
/// use mpc_common::slug::slugify;
///
/// assert_eq!(slugify("Galaxy S24 Ultra"), "galaxy-s24-ultra");
/// assert_eq!(slugify("  iPhone 15 Pro (Max)! "), "iphone-15-pro-max");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch == '+' {
            // "Galaxy S24+" and "Galaxy S24" must not collide
            if !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push_str("plus");
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Check that a string is already slug-shaped (`[a-z0-9]+(-[a-z0-9]+)*`)
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Apple"), "apple");
        assert_eq!(slugify("OnePlus 12R"), "oneplus-12r");
        assert_eq!(slugify("Pixel 8a"), "pixel-8a");
    }

    #[test]
    fn test_slugify_punctuation_runs() {
        assert_eq!(slugify("Xiaomi -- Redmi   Note 13"), "xiaomi-redmi-note-13");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_slugify_plus_suffix() {
        assert_eq!(slugify("Galaxy S24+"), "galaxy-s24-plus");
        assert_ne!(slugify("Galaxy S24+"), slugify("Galaxy S24"));
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("Moto G Power 5G (2024) ™"), "moto-g-power-5g-2024");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("galaxy-s24"));
        assert!(is_valid_slug("x100"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Galaxy"));
        assert!(!is_valid_slug("-lead"));
        assert!(!is_valid_slug("double--dash"));
        assert!(!is_valid_slug("with space"));
    }
}
