//! Brand logos and product image selection
//!
//! Randomness is injected so callers (and tests) control reproducibility.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::pricing::{classify_tier, PriceTier};
use mpc_common::slug::slugify;

const BRAND_LOGOS: &[(&str, &str)] = &[
    ("apple", "https://upload.wikimedia.org/wikipedia/commons/f/fa/Apple_logo_black.svg"),
    ("samsung", "https://upload.wikimedia.org/wikipedia/commons/2/24/Samsung_Logo.svg"),
    ("google", "https://upload.wikimedia.org/wikipedia/commons/2/2f/Google_2015_logo.svg"),
    ("oneplus", "https://upload.wikimedia.org/wikipedia/commons/f/f8/OnePlus_logo.svg"),
    ("xiaomi", "https://upload.wikimedia.org/wikipedia/commons/2/29/Xiaomi_logo.svg"),
    ("motorola", "https://upload.wikimedia.org/wikipedia/commons/4/45/Motorola-logo-black-and-white.png"),
    ("nokia", "https://upload.wikimedia.org/wikipedia/commons/0/02/Nokia_wordmark.svg"),
    ("sony", "https://upload.wikimedia.org/wikipedia/commons/c/ca/Sony_logo.svg"),
    ("oppo", "https://upload.wikimedia.org/wikipedia/commons/a/a2/OPPO_LOGO_2019.svg"),
    ("vivo", "https://upload.wikimedia.org/wikipedia/commons/e/e5/Vivo_mobile_logo.png"),
    ("realme", "https://upload.wikimedia.org/wikipedia/commons/9/91/Realme_logo.svg"),
    ("nothing", "https://upload.wikimedia.org/wikipedia/commons/6/6a/Nothing_Logo.svg"),
];

/// Stock product shots used for flagship models without an upstream image
const FLAGSHIP_IMAGES: &[(&str, &[&str])] = &[
    (
        "apple",
        &[
            "https://images.unsplash.com/photo-1695048133142-1a20484d2569",
            "https://images.unsplash.com/photo-1696446701796-da61225697cc",
        ],
    ),
    (
        "samsung",
        &[
            "https://images.unsplash.com/photo-1610945265064-0e34e5519bbf",
            "https://images.unsplash.com/photo-1705530292519-ec81f2ace70d",
        ],
    ),
    (
        "google",
        &["https://images.unsplash.com/photo-1598327105666-5b89351aff97"],
    ),
];

/// Logo URL for a brand; placeholder text image for unknown brands
pub fn brand_logo_url(brand: &str) -> String {
    let slug = slugify(brand);
    BRAND_LOGOS
        .iter()
        .find(|(b, _)| *b == slug)
        .map(|(_, url)| url.to_string())
        .unwrap_or_else(|| format!("https://placehold.co/200x200/png?text={}", placeholder_text(brand)))
}

/// Pick the main image for a phone
///
/// Upstream image wins; flagships of known brands get a random stock shot;
/// everything else gets a text placeholder.
pub fn generate_image_url<R: Rng + ?Sized>(
    brand: &str,
    name: &str,
    upstream: Option<&str>,
    rng: &mut R,
) -> String {
    if let Some(url) = upstream.map(str::trim).filter(|u| u.starts_with("http")) {
        return url.to_string();
    }

    if classify_tier(name) == PriceTier::Flagship {
        let slug = slugify(brand);
        let candidate = FLAGSHIP_IMAGES
            .iter()
            .find(|(b, _)| *b == slug)
            .and_then(|(_, urls)| urls.choose(rng));
        if let Some(url) = candidate {
            return url.to_string();
        }
    }

    format!("https://placehold.co/400x600/png?text={}", placeholder_text(name))
}

fn placeholder_text(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '.')
                .collect::<String>()
        })
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("+")
}
