pub mod auth;
pub mod json;
pub mod panic;

pub use auth::{AdminUser, AuthUser};
pub use json::{JsonBody, ValidatedJson};
