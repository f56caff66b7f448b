use serde::Deserialize;
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::portfolio::{PortfolioContent, PortfolioContentPatch};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(max = 100, message = "Name is too long"), custom(function = "not_blank"))]
    pub name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "Password must be 6 to 128 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(max = 100, message = "Name is too long"), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 128, message = "Password must be 6 to 128 characters"))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TemplateFiles {
    #[validate(length(min = 1, message = "Template HTML is required"))]
    pub html: String,
    pub css: String,
    pub js: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TemplateForm {
    #[validate(length(max = 100, message = "Name is too long"), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(url(message = "Invalid preview URL"))]
    pub preview_url: String,
    #[serde(default)]
    pub is_premium: bool,
    #[validate(nested)]
    pub files: TemplateFiles,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePatch {
    #[validate(length(max = 100, message = "Name is too long"), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    #[validate(url(message = "Invalid preview URL"))]
    pub preview_url: Option<String>,
    pub is_premium: Option<bool>,
    #[validate(nested)]
    pub files: Option<TemplateFiles>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioForm {
    pub template_id: Uuid,
    #[serde(flatten)]
    #[validate(nested)]
    pub content: PortfolioContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPatch {
    pub template_id: Option<Uuid>,
    #[serde(flatten)]
    pub content: PortfolioContentPatch,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentForm {
    pub template_id: Option<Uuid>,
    #[validate(range(min = 0.0, message = "Amount must not be negative"))]
    pub amount: f64,
}

/// Names must hold something besides whitespace; they are stored trimmed.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some(Cow::from("Name is required"));
        return Err(err);
    }
    Ok(())
}
