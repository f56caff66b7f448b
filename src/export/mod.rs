//! Portfolio export: template rendering, staging, ZIP archiving and PDF printing.

pub mod archive;
pub mod body;
pub mod pdf;
pub mod render;
pub mod staging;

pub use archive::SiteFiles;
pub use pdf::{ChromePdfRenderer, PdfRenderer};
pub use render::TemplateRenderer;
pub use staging::StagingDir;
