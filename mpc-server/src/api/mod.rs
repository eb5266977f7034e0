//! HTTP API handlers for mpc-server
//!
//! Each submodule exposes a `*_routes()` builder; `build_router` decides
//! which of them sit behind the admin session check.

pub mod admin;
pub mod ai;
pub mod auth;
pub mod catalog;
pub mod export;
pub mod health;
pub mod import;
pub mod index;
pub mod seo;
pub mod settings;

pub use admin::admin_routes;
pub use ai::{ai_admin_routes, ai_routes};
pub use auth::auth_routes;
pub use catalog::catalog_routes;
pub use export::export_routes;
pub use health::health_routes;
pub use import::import_routes;
pub use index::index_routes;
pub use seo::seo_routes;
pub use settings::settings_routes;
