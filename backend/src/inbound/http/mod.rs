//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// JSON extractor configuration that reports body errors in the shared
/// error envelope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use accounts::inbound::http::{json_config, users};
///
/// let app = App::new().app_data(json_config()).service(users::scope());
/// ```
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(error::json_error_handler)
}
