//! Database models
//!
//! JSON field names are camelCase to match what the web client consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::slug::slugify;
use crate::validation::{require, require_slug, FieldError, Validate};

// ============================================================================
// Brands
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub logo: String,
    /// Number of mobiles under this brand slug, maintained by the storage layer
    pub phone_count: String,
    pub description: String,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBrand {
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_visible: bool,
}

fn default_true() -> bool {
    true
}

impl NewBrand {
    /// Minimal brand with a derived slug
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            slug: slugify(&name),
            name,
            logo: String::new(),
            description: String::new(),
            is_visible: true,
        }
    }

    /// Fill derived fields (slug from name when absent)
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        if self.slug.trim().is_empty() {
            self.slug = slugify(&self.name);
        }
        self
    }
}

impl Validate for NewBrand {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        require_slug(&mut errors, "slug", &self.slug);
        errors
    }
}

/// Partial brand update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub is_visible: Option<bool>,
}

impl BrandPatch {
    pub fn apply(self, brand: &mut Brand) {
        if let Some(name) = self.name {
            brand.name = name;
        }
        if let Some(slug) = self.slug {
            brand.slug = slug;
        }
        if let Some(logo) = self.logo {
            brand.logo = logo;
        }
        if let Some(description) = self.description {
            brand.description = description;
        }
        if let Some(is_visible) = self.is_visible {
            brand.is_visible = is_visible;
        }
    }
}

impl Validate for BrandPatch {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            require(&mut errors, "name", name);
        }
        if let Some(slug) = &self.slug {
            require_slug(&mut errors, "slug", slug);
        }
        errors
    }
}

// ============================================================================
// Mobiles
// ============================================================================

/// Compact spec summary shown on listing cards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortSpecs {
    pub ram: String,
    pub storage: String,
    pub camera: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecItem {
    pub feature: String,
    pub value: String,
}

/// One category of the detailed specification tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecCategory {
    pub category: String,
    pub specs: Vec<SpecItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: String,
    pub width: String,
    pub thickness: String,
    #[serde(default)]
    pub weight: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMaterials {
    #[serde(default)]
    pub frame: String,
    #[serde(default)]
    pub back: String,
    #[serde(default)]
    pub front: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mobile {
    pub id: i64,
    pub slug: String,
    pub name: String,
    /// Brand slug (convention only, no foreign key)
    pub brand: String,
    pub model: String,
    pub image_url: String,
    pub imagekit_path: Option<String>,
    /// Free text ("January 2024", "TBA")
    pub release_date: String,
    pub price: Option<String>,
    pub short_specs: ShortSpecs,
    pub carousel_images: Vec<String>,
    pub specifications: Vec<SpecCategory>,
    pub dimensions: Option<Dimensions>,
    pub build_materials: Option<BuildMaterials>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMobile {
    #[serde(default)]
    pub slug: String,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub image_url: String,
    #[serde(default)]
    pub imagekit_path: Option<String>,
    pub release_date: String,
    #[serde(default)]
    pub price: Option<String>,
    pub short_specs: ShortSpecs,
    #[serde(default)]
    pub carousel_images: Vec<String>,
    #[serde(default)]
    pub specifications: Vec<SpecCategory>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub build_materials: Option<BuildMaterials>,
}

impl NewMobile {
    /// Fill derived fields (slug from name when absent, trimmed brand)
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.brand = self.brand.trim().to_string();
        if self.slug.trim().is_empty() {
            self.slug = slugify(&self.name);
        }
        self
    }
}

impl Validate for NewMobile {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        require_slug(&mut errors, "slug", &self.slug);
        require(&mut errors, "brand", &self.brand);
        require(&mut errors, "model", &self.model);
        require(&mut errors, "imageUrl", &self.image_url);
        require(&mut errors, "releaseDate", &self.release_date);
        require(&mut errors, "shortSpecs.ram", &self.short_specs.ram);
        require(&mut errors, "shortSpecs.storage", &self.short_specs.storage);
        require(&mut errors, "shortSpecs.camera", &self.short_specs.camera);
        for (i, category) in self.specifications.iter().enumerate() {
            require(
                &mut errors,
                &format!("specifications[{}].category", i),
                &category.category,
            );
        }
        errors
    }
}

/// Partial mobile update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobilePatch {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub image_url: Option<String>,
    pub imagekit_path: Option<String>,
    pub release_date: Option<String>,
    pub price: Option<String>,
    pub short_specs: Option<ShortSpecs>,
    pub carousel_images: Option<Vec<String>>,
    pub specifications: Option<Vec<SpecCategory>>,
    pub dimensions: Option<Dimensions>,
    pub build_materials: Option<BuildMaterials>,
}

impl MobilePatch {
    pub fn apply(self, mobile: &mut Mobile) {
        if let Some(slug) = self.slug {
            mobile.slug = slug;
        }
        if let Some(name) = self.name {
            mobile.name = name;
        }
        if let Some(brand) = self.brand {
            mobile.brand = brand;
        }
        if let Some(model) = self.model {
            mobile.model = model;
        }
        if let Some(image_url) = self.image_url {
            mobile.image_url = image_url;
        }
        if self.imagekit_path.is_some() {
            mobile.imagekit_path = self.imagekit_path;
        }
        if let Some(release_date) = self.release_date {
            mobile.release_date = release_date;
        }
        if self.price.is_some() {
            mobile.price = self.price;
        }
        if let Some(short_specs) = self.short_specs {
            mobile.short_specs = short_specs;
        }
        if let Some(carousel_images) = self.carousel_images {
            mobile.carousel_images = carousel_images;
        }
        if let Some(specifications) = self.specifications {
            mobile.specifications = specifications;
        }
        if self.dimensions.is_some() {
            mobile.dimensions = self.dimensions;
        }
        if self.build_materials.is_some() {
            mobile.build_materials = self.build_materials;
        }
    }
}

impl From<NewMobile> for MobilePatch {
    /// Full overwrite used by import re-runs
    fn from(new: NewMobile) -> Self {
        Self {
            slug: Some(new.slug),
            name: Some(new.name),
            brand: Some(new.brand),
            model: Some(new.model),
            image_url: Some(new.image_url),
            imagekit_path: new.imagekit_path,
            release_date: Some(new.release_date),
            price: new.price,
            short_specs: Some(new.short_specs),
            carousel_images: Some(new.carousel_images),
            specifications: Some(new.specifications),
            dimensions: new.dimensions,
            build_materials: new.build_materials,
        }
    }
}

impl Validate for MobilePatch {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(slug) = &self.slug {
            require_slug(&mut errors, "slug", slug);
        }
        for (field, value) in [
            ("name", &self.name),
            ("brand", &self.brand),
            ("model", &self.model),
            ("imageUrl", &self.image_url),
            ("releaseDate", &self.release_date),
        ] {
            if let Some(value) = value {
                require(&mut errors, field, value);
            }
        }
        errors
    }
}

// ============================================================================
// Users and settings
// ============================================================================

/// Stored user account (password material never serialized)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub password_salt: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

/// Row counts for the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub brands: i64,
    pub visible_brands: i64,
    pub mobiles: i64,
}
