//! Sample catalog seeding
//!
//! Run once at startup (when enabled) so a fresh install has something to
//! browse. Only acts on an empty `brands` table.

use sqlx::SqlitePool;
use tracing::info;

use super::brands::create_brand;
use super::mobiles::create_mobile;
use super::models::{BuildMaterials, Dimensions, NewBrand, NewMobile, ShortSpecs, SpecCategory, SpecItem};
use crate::Result;

struct SampleBrand {
    name: &'static str,
    logo: &'static str,
    description: &'static str,
}

const SAMPLE_BRANDS: &[SampleBrand] = &[
    SampleBrand {
        name: "Apple",
        logo: "https://upload.wikimedia.org/wikipedia/commons/f/fa/Apple_logo_black.svg",
        description: "Premium smartphones running iOS with tight hardware and software integration.",
    },
    SampleBrand {
        name: "Samsung",
        logo: "https://upload.wikimedia.org/wikipedia/commons/2/24/Samsung_Logo.svg",
        description: "Android phones across every price tier, from the Galaxy A series to the S Ultra.",
    },
    SampleBrand {
        name: "Google",
        logo: "https://upload.wikimedia.org/wikipedia/commons/2/2f/Google_2015_logo.svg",
        description: "Pixel phones with clean Android and computational photography.",
    },
    SampleBrand {
        name: "OnePlus",
        logo: "https://upload.wikimedia.org/wikipedia/commons/f/f8/OnePlus_logo.svg",
        description: "Fast-charging Android flagships and value performers.",
    },
    SampleBrand {
        name: "Xiaomi",
        logo: "https://upload.wikimedia.org/wikipedia/commons/a/ae/Xiaomi_logo_%282021-%29.svg",
        description: "Feature-packed phones with aggressive pricing.",
    },
];

#[allow(clippy::too_many_arguments)]
fn sample_mobile(
    brand: &str,
    name: &str,
    model: &str,
    release_date: &str,
    price: &str,
    ram: &str,
    storage: &str,
    camera: &str,
    battery: &str,
    display: &str,
    processor: &str,
) -> NewMobile {
    NewMobile {
        slug: String::new(),
        name: name.to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        image_url: format!(
            "https://placehold.co/400x600/png?text={}",
            name.replace(' ', "+")
        ),
        imagekit_path: None,
        release_date: release_date.to_string(),
        price: Some(price.to_string()),
        short_specs: ShortSpecs {
            ram: ram.to_string(),
            storage: storage.to_string(),
            camera: camera.to_string(),
            battery: Some(battery.to_string()),
            display: Some(display.to_string()),
            processor: Some(processor.to_string()),
        },
        carousel_images: Vec::new(),
        specifications: vec![
            SpecCategory {
                category: "Platform".to_string(),
                specs: vec![SpecItem {
                    feature: "Chipset".to_string(),
                    value: processor.to_string(),
                }],
            },
            SpecCategory {
                category: "Battery".to_string(),
                specs: vec![SpecItem {
                    feature: "Capacity".to_string(),
                    value: battery.to_string(),
                }],
            },
        ],
        dimensions: None,
        build_materials: None,
    }
    .normalize()
}

fn sample_mobiles() -> Vec<NewMobile> {
    let mut iphone = sample_mobile(
        "apple", "iPhone 15 Pro", "15 Pro", "September 2023", "$999",
        "8GB", "128GB", "48MP", "3274mAh", "6.1 inches", "Apple A17 Pro",
    );
    iphone.dimensions = Some(Dimensions {
        height: "146.6 mm".to_string(),
        width: "70.6 mm".to_string(),
        thickness: "8.3 mm".to_string(),
        weight: "187 g".to_string(),
    });
    iphone.build_materials = Some(BuildMaterials {
        frame: "Titanium".to_string(),
        back: "Glass".to_string(),
        front: "Ceramic Shield".to_string(),
    });

    vec![
        iphone,
        sample_mobile(
            "samsung", "Galaxy S24 Ultra", "S24 Ultra", "January 2024", "$1,299",
            "12GB", "256GB", "200MP", "5000mAh", "6.8 inches", "Snapdragon 8 Gen 3",
        ),
        sample_mobile(
            "samsung", "Galaxy A55", "A55", "March 2024", "$449",
            "8GB", "128GB", "50MP", "5000mAh", "6.6 inches", "Exynos 1480",
        ),
        sample_mobile(
            "google", "Pixel 8", "Pixel 8", "October 2023", "$699",
            "8GB", "128GB", "50MP", "4575mAh", "6.2 inches", "Google Tensor G3",
        ),
        sample_mobile(
            "oneplus", "OnePlus 12", "12", "January 2024", "$799",
            "12GB", "256GB", "50MP", "5400mAh", "6.82 inches", "Snapdragon 8 Gen 3",
        ),
        sample_mobile(
            "xiaomi", "Xiaomi 14", "14", "February 2024", "$899",
            "12GB", "256GB", "50MP", "4610mAh", "6.36 inches", "Snapdragon 8 Gen 3",
        ),
    ]
}

/// Insert sample brands and mobiles when the catalog is empty
///
/// Returns `true` when data was inserted.
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<bool> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brands")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(false);
    }

    for sample in SAMPLE_BRANDS {
        let mut brand = NewBrand::named(sample.name);
        brand.logo = sample.logo.to_string();
        brand.description = sample.description.to_string();
        create_brand(pool, &brand).await?;
    }

    let mobiles = sample_mobiles();
    for mobile in &mobiles {
        create_mobile(pool, mobile).await?;
    }

    info!(
        brands = SAMPLE_BRANDS.len(),
        mobiles = mobiles.len(),
        "Seeded sample catalog"
    );
    Ok(true)
}
