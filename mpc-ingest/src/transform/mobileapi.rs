//! MobileAPI.dev device transformer

use rand::Rng;

use super::text::{
    extract_battery, extract_camera, extract_display_size, extract_ram, extract_storage,
    normalize_release_date, parse_build, parse_dimensions, strip_brand_prefix, strip_html,
};
use super::{mobile_slug, transform_brand, TransformedPhone, UNKNOWN_SPEC};
use crate::error::TransformError;
use crate::images::generate_image_url;
use crate::pricing::estimate_price;
use crate::sources::mobileapi::MobileApiDevice;
use mpc_common::db::{NewMobile, ShortSpecs, SpecCategory, SpecItem};

fn clean(value: &Option<String>) -> Option<String> {
    value.as_deref().map(strip_html).filter(|v| !v.is_empty())
}

/// Bare numbers are taken as mAh
fn battery_from(value: &str) -> Option<String> {
    extract_battery(value).or_else(|| {
        let digits = value.trim();
        (!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
            .then(|| format!("{}mAh", digits))
    })
}

/// Bare numbers are taken as inches
fn display_from(value: &str) -> Option<String> {
    extract_display_size(value).or_else(|| {
        value
            .trim()
            .parse::<f32>()
            .ok()
            .map(|_| format!("{} inches", value.trim()))
    })
}

fn category(name: &str, items: &[(&str, Option<String>)]) -> Option<SpecCategory> {
    let specs: Vec<SpecItem> = items
        .iter()
        .filter_map(|(feature, value)| {
            value.clone().map(|value| SpecItem {
                feature: feature.to_string(),
                value,
            })
        })
        .collect();
    (!specs.is_empty()).then(|| SpecCategory {
        category: name.to_string(),
        specs,
    })
}

pub fn transform_mobileapi_device<R: Rng + ?Sized>(
    device: &MobileApiDevice,
    rng: &mut R,
) -> Result<TransformedPhone, TransformError> {
    let brand_name = strip_html(&device.manufacturer_name);
    if brand_name.is_empty() {
        return Err(TransformError::MissingField("manufacturer_name"));
    }
    let name = strip_html(&device.name);
    if name.is_empty() {
        return Err(TransformError::MissingField("name"));
    }
    let model = strip_brand_prefix(&name, &brand_name);

    let ram_text = clean(&device.ram);
    let storage_text = clean(&device.storage);
    let camera_text = clean(&device.main_camera);
    let battery_text = clean(&device.battery_capacity);
    let display_text = clean(&device.screen_size);
    let dimensions_text = clean(&device.dimensions);
    let weight_text = clean(&device.weight);
    let build_text = clean(&device.build);
    let chipset = clean(&device.chipset);

    let specifications: Vec<SpecCategory> = [
        category(
            "Display",
            &[
                ("Size", display_text.clone()),
                ("Resolution", clean(&device.screen_resolution)),
            ],
        ),
        category(
            "Platform",
            &[("Chipset", chipset.clone()), ("OS", clean(&device.os))],
        ),
        category(
            "Memory",
            &[("RAM", ram_text.clone()), ("Storage", storage_text.clone())],
        ),
        category(
            "Camera",
            &[
                ("Main", camera_text.clone()),
                ("Selfie", clean(&device.selfie_camera)),
            ],
        ),
        category("Battery", &[("Capacity", battery_text.clone())]),
        category(
            "Body",
            &[
                ("Dimensions", dimensions_text.clone()),
                ("Weight", weight_text.clone()),
                ("Build", build_text.clone()),
            ],
        ),
    ]
    .into_iter()
    .flatten()
    .collect();

    let release_date = device
        .release_date
        .as_deref()
        .map(normalize_release_date)
        .unwrap_or_else(|| "TBA".to_string());

    let price = clean(&device.price).unwrap_or_else(|| estimate_price(&brand_name, &model));
    let image_url = generate_image_url(&brand_name, &model, device.image_url.as_deref(), rng);
    let carousel_images: Vec<String> = device
        .images
        .iter()
        .map(|u| u.trim().to_string())
        .filter(|u| u.starts_with("http") && *u != image_url)
        .collect();

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
            ram: ram_text
                .as_deref()
                .and_then(extract_ram)
                .unwrap_or_else(|| UNKNOWN_SPEC.to_string()),
            storage: storage_text
                .as_deref()
                .and_then(extract_storage)
                .unwrap_or_else(|| UNKNOWN_SPEC.to_string()),
            camera: camera_text
                .as_deref()
                .and_then(extract_camera)
                .unwrap_or_else(|| UNKNOWN_SPEC.to_string()),
            battery: battery_text.as_deref().and_then(battery_from),
            display: display_text.as_deref().and_then(display_from),
            processor: chipset,
        },
        carousel_images,
        specifications,
        dimensions: dimensions_text
            .as_deref()
            .and_then(|d| parse_dimensions(d, weight_text.as_deref())),
        build_materials: build_text.as_deref().and_then(parse_build),
    };

    Ok(TransformedPhone { brand, mobile })
}
