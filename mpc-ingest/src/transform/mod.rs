//! Vendor record → catalog record mapping
//!
//! Transformers are pure apart from the injected RNG used for image
//! selection. Storage writes happen in the import service.

pub mod gsm;
pub mod mobileapi;
pub mod text;

use rand::Rng;

use crate::error::TransformError;
use crate::images::brand_logo_url;
use crate::sources::RawPhone;
use mpc_common::db::{NewBrand, NewMobile};
use mpc_common::slug::{is_valid_slug, slugify};
use mpc_common::validation::Validate;

/// Placeholder for short-spec fields the vendor did not provide
pub const UNKNOWN_SPEC: &str = "N/A";

/// A transformed phone plus the brand it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedPhone {
    pub brand: NewBrand,
    pub mobile: NewMobile,
}

impl TransformedPhone {
    /// Same checks the admin write path applies, plus routable slugs
    pub fn check(&self) -> Result<(), TransformError> {
        if !is_valid_slug(&self.brand.slug) {
            return Err(TransformError::InvalidSlug(self.brand.name.clone()));
        }
        if !is_valid_slug(&self.mobile.slug) {
            return Err(TransformError::InvalidSlug(format!(
                "{} {}",
                self.brand.name, self.mobile.name
            )));
        }

        let errors: Vec<String> = self
            .brand
            .validate()
            .into_iter()
            .chain(self.mobile.validate())
            .map(|e| format!("{} {}", e.field, e.message.to_lowercase()))
            .collect();
        if !errors.is_empty() {
            return Err(TransformError::Invalid(errors.join(", ")));
        }
        Ok(())
    }
}

/// Map a vendor record and reject anything storage should not hold
pub fn transform_phone<R: Rng + ?Sized>(
    raw: &RawPhone,
    rng: &mut R,
) -> Result<TransformedPhone, TransformError> {
    let phone = match raw {
        RawPhone::Gsm(details) => gsm::transform_gsm_phone(details, rng)?,
        RawPhone::MobileApi(device) => mobileapi::transform_mobileapi_device(device, rng)?,
    };
    phone.check()?;
    Ok(phone)
}

/// Brand record created on first import of one of its phones
pub fn transform_brand(name: &str) -> NewBrand {
    let mut brand = NewBrand::named(name.trim());
    brand.logo = brand_logo_url(name);
    brand.description = format!(
        "Explore the latest {} smartphones with detailed specifications, prices and comparisons.",
        brand.name
    );
    brand
}

/// Brand-prefixed slug so models with the same name under different brands never collide
pub fn mobile_slug(brand: &str, model: &str) -> String {
    slugify(&format!("{} {}", brand.trim(), model.trim()))
}
