//! Request bodies and the portfolio document shape shared by storage and export.

pub mod forms;
pub mod portfolio;

pub use forms::TemplateFiles;
pub use portfolio::{Contact, Education, Experience, PersonalInfo, PortfolioContent, Project};
