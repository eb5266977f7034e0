//! RapidAPI (GSMArena-style) record transformer

use rand::Rng;

use super::text::{
    extract_battery, extract_camera, extract_display_size, extract_ram, extract_ram_storage,
    normalize_release_date, parse_build, parse_dimensions, strip_brand_prefix, strip_html,
};
use super::{mobile_slug, transform_brand, TransformedPhone, UNKNOWN_SPEC};
use crate::error::TransformError;
use crate::images::generate_image_url;
use crate::pricing::estimate_price;
use crate::sources::rapidapi::{GsmPhoneDetails, GsmSpecCategory, GsmSpecPair};
use mpc_common::db::{NewMobile, ShortSpecs, SpecCategory, SpecItem};

/// Cleaned specification tree; empty values and empty categories dropped
fn convert_detail_spec(categories: &[GsmSpecCategory]) -> Vec<SpecCategory> {
    categories
        .iter()
        .filter_map(|category| {
            let name = strip_html(&category.category);
            let specs: Vec<SpecItem> = category
                .specifications
                .iter()
                .filter_map(|pair| {
                    let feature = strip_html(&pair.name);
                    let value = strip_html(&pair.value);
                    (!feature.is_empty() && !value.is_empty()).then_some(SpecItem { feature, value })
                })
                .collect();
            (!name.is_empty() && !specs.is_empty()).then_some(SpecCategory {
                category: name,
                specs,
            })
        })
        .collect()
}

struct SpecLookup<'a> {
    quick: &'a [GsmSpecPair],
    detail: &'a [SpecCategory],
}

impl<'a> SpecLookup<'a> {
    /// First quick spec whose name contains `key` (case-insensitive)
    fn quick(&self, key: &str) -> Option<String> {
        self.quick
            .iter()
            .find(|pair| pair.name.to_ascii_lowercase().contains(key))
            .map(|pair| strip_html(&pair.value))
            .filter(|v| !v.is_empty())
    }

    fn detail(&self, category: &str, feature: &str) -> Option<String> {
        self.detail
            .iter()
            .filter(|c| c.category.eq_ignore_ascii_case(category))
            .flat_map(|c| c.specs.iter())
            .find(|s| s.feature.eq_ignore_ascii_case(feature))
            .map(|s| s.value.clone())
    }

    /// First value in any category whose name starts with `prefix`
    fn detail_any(&self, prefix: &str) -> Option<String> {
        let prefix = prefix.to_ascii_lowercase();
        self.detail
            .iter()
            .filter(|c| c.category.to_ascii_lowercase().starts_with(&prefix))
            .flat_map(|c| c.specs.iter())
            .map(|s| s.value.clone())
            .next()
    }
}

pub fn transform_gsm_phone<R: Rng + ?Sized>(
    details: &GsmPhoneDetails,
    rng: &mut R,
) -> Result<TransformedPhone, TransformError> {
    let brand_name = strip_html(&details.brand);
    if brand_name.is_empty() {
        return Err(TransformError::MissingField("brand"));
    }
    let name = strip_html(&details.name);
    if name.is_empty() {
        return Err(TransformError::MissingField("name"));
    }
    let model = strip_brand_prefix(&name, &brand_name);

    let specifications = convert_detail_spec(&details.detail_spec);
    let lookup = SpecLookup {
        quick: &details.quick_spec,
        detail: &specifications,
    };

    let memory = lookup
        .quick("storage")
        .or_else(|| lookup.detail("Memory", "Internal"));
    let (mut ram, storage) = memory
        .as_deref()
        .map(extract_ram_storage)
        .unwrap_or((None, None));
    if ram.is_none() {
        ram = lookup.quick("ram size").as_deref().and_then(extract_ram);
    }

    let camera = lookup
        .quick("camera pixels")
        .or_else(|| lookup.detail_any("Main Camera"))
        .as_deref()
        .and_then(extract_camera);
    let battery = lookup
        .quick("battery")
        .or_else(|| lookup.detail_any("Battery"))
        .as_deref()
        .and_then(extract_battery);
    let display = lookup
        .quick("display size")
        .or_else(|| lookup.detail("Display", "Size"))
        .as_deref()
        .and_then(extract_display_size);
    let processor = lookup
        .quick("chipset")
        .or_else(|| lookup.detail("Platform", "Chipset"));

    let release_date = details
        .released
        .clone()
        .or_else(|| lookup.detail("Launch", "Status"))
        .map(|r| normalize_release_date(&r))
        .unwrap_or_else(|| "TBA".to_string());

    let price = details
        .price
        .as_deref()
        .map(strip_html)
        .filter(|p| !p.is_empty())
        .or_else(|| lookup.detail("Misc", "Price"))
        .unwrap_or_else(|| estimate_price(&brand_name, &model));

    let dimensions = lookup.detail("Body", "Dimensions").and_then(|d| {
        let weight = lookup.detail("Body", "Weight");
        parse_dimensions(&d, weight.as_deref())
    });
    let build_materials = lookup.detail("Body", "Build").and_then(|b| parse_build(&b));

    let image_url = generate_image_url(&brand_name, &model, details.img.as_deref(), rng);
    let mut carousel_images: Vec<String> = Vec::new();
    for url in details.images.iter().map(|u| u.trim()) {
        if url.starts_with("http") && url != image_url && !carousel_images.iter().any(|c| c == url) {
            carousel_images.push(url.to_string());
        }
    }

    let brand = transform_brand(&brand_name);
    let mobile = NewMobile {
        slug: mobile_slug(&brand_name, &model),
        name,
        brand: brand.slug.clone(),
        model,
        image_url,
        imagekit_path: None,
        release_date,
        price: Some(price),
        short_specs: ShortSpecs {
            ram: ram.unwrap_or_else(|| UNKNOWN_SPEC.to_string()),
            storage: storage.unwrap_or_else(|| UNKNOWN_SPEC.to_string()),
            camera: camera.unwrap_or_else(|| UNKNOWN_SPEC.to_string()),
            battery,
            display,
            processor,
        },
        carousel_images,
        specifications,
        dimensions,
        build_materials,
    };

    Ok(TransformedPhone { brand, mobile })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpc_common::validation::Validate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pair(name: &str, value: &str) -> GsmSpecPair {
        GsmSpecPair {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn galaxy_s24() -> GsmPhoneDetails {
        GsmPhoneDetails {
            brand: "Samsung".to_string(),
            name: "Samsung Galaxy S24".to_string(),
            img: Some("https://cdn.example/s24.jpg".to_string()),
            images: vec![
                "https://cdn.example/s24.jpg".to_string(),
                "https://cdn.example/s24-back.jpg".to_string(),
            ],
            released: Some("Released 2024, January 24".to_string()),
            price: None,
            quick_spec: vec![
                pair("Display size", "6.2\""),
                pair("Camera pixels", "50 MP"),
                pair("RAM size", "8GB RAM"),
                pair("Storage", "128GB 8GB RAM"),
                pair("Battery size", "4000 mAh"),
                pair("Chipset", "Exynos 2400"),
            ],
            detail_spec: vec![
                GsmSpecCategory {
                    category: "Body".to_string(),
                    specifications: vec![
                        pair("Dimensions", "147 x 70.6 x 7.6 mm"),
                        pair("Weight", "167 g (5.89 oz)"),
                        pair("Build", "Glass front (Gorilla Glass Victus 2), aluminum frame, glass back"),
                        pair("SIM", "Nano-SIM<br>eSIM"),
                    ],
                },
                GsmSpecCategory {
                    category: "Misc".to_string(),
                    specifications: vec![pair("Colors", "")],
                },
            ],
        }
    }

    #[test]
    fn test_transform_full_record() {
        let mut rng = StdRng::seed_from_u64(3);
        let phone = transform_gsm_phone(&galaxy_s24(), &mut rng).unwrap();

        assert_eq!(phone.brand.slug, "samsung");
        let mobile = phone.mobile;
        assert_eq!(mobile.slug, "samsung-galaxy-s24");
        assert_eq!(mobile.brand, "samsung");
        assert_eq!(mobile.model, "Galaxy S24");
        assert_eq!(mobile.release_date, "January 2024");
        assert_eq!(mobile.short_specs.ram, "8GB");
        assert_eq!(mobile.short_specs.storage, "128GB");
        assert_eq!(mobile.short_specs.camera, "50MP");
        assert_eq!(mobile.short_specs.battery.as_deref(), Some("4000mAh"));
        assert_eq!(mobile.short_specs.display.as_deref(), Some("6.2 inches"));
        assert_eq!(mobile.short_specs.processor.as_deref(), Some("Exynos 2400"));
        assert_eq!(mobile.image_url, "https://cdn.example/s24.jpg");
        assert_eq!(mobile.carousel_images, vec!["https://cdn.example/s24-back.jpg"]);
        assert_eq!(mobile.price.as_deref(), Some("$449"));
        assert_eq!(mobile.dimensions.unwrap().thickness, "7.6 mm");
        assert_eq!(mobile.build_materials.unwrap().frame, "Aluminum");

        // empty "Misc" category dropped, HTML cleaned
        assert_eq!(mobile.specifications.len(), 1);
        let sim = &mobile.specifications[0].specs[3];
        assert_eq!(sim.value, "Nano-SIM, eSIM");
    }

    #[test]
    fn test_sparse_record_still_validates() {
        let details = GsmPhoneDetails {
            brand: "Nothing".to_string(),
            name: "Phone (2a)".to_string(),
            ..Default::default()
        };
        let phone = transform_gsm_phone(&details, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(phone.mobile.release_date, "TBA");
        assert_eq!(phone.mobile.short_specs.ram, UNKNOWN_SPEC);
        assert!(phone.mobile.image_url.starts_with("https://placehold.co/"));
        assert!(phone.mobile.validate().is_empty());
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let details = GsmPhoneDetails {
            brand: "Samsung".to_string(),
            name: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            transform_gsm_phone(&details, &mut StdRng::seed_from_u64(0)).unwrap_err(),
            TransformError::MissingField("name")
        );
    }
}
