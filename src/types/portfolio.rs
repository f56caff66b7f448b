use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Everything a user fills in through the portfolio form.
///
/// Stored per section as JSON text; list order is kept as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioContent {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(nested)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "About is required"))]
    pub about: String,
    pub profile_picture: String,
    #[validate(nested)]
    pub contact: Contact,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Contact {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    pub phone: String,
    pub location: String,
    #[validate(custom(function = "optional_url"))]
    pub linkedin: String,
    #[validate(custom(function = "optional_url"))]
    pub github: String,
    #[validate(custom(function = "optional_url"))]
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub start_year: String,
    pub end_year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub link: String,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioContentPatch {
    pub title: Option<String>,
    pub personal_info: Option<PersonalInfo>,
    pub education: Option<Vec<Education>>,
    pub experience: Option<Vec<Experience>>,
    pub projects: Option<Vec<Project>>,
    pub skills: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

impl PortfolioContent {
    pub fn apply(&mut self, patch: PortfolioContentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(personal_info) = patch.personal_info {
            self.personal_info = personal_info;
        }
        if let Some(education) = patch.education {
            self.education = education;
        }
        if let Some(experience) = patch.experience {
            self.experience = experience;
        }
        if let Some(projects) = patch.projects {
            self.projects = projects;
        }
        if let Some(skills) = patch.skills {
            self.skills = skills;
        }
        if let Some(is_public) = patch.is_public {
            self.is_public = is_public;
        }
    }
}

/// Empty means "not provided"; anything else must parse as an absolute URL.
fn optional_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || url::Url::parse(value).is_ok() {
        return Ok(());
    }
    let mut err = ValidationError::new("url");
    err.message = Some(Cow::from("Invalid URL"));
    Err(err)
}
