use handlebars::{Handlebars, handlebars_helper};
use serde::Serialize;

use crate::error::PortagenError;
use crate::types::{Education, Experience, PersonalInfo, PortfolioContent, Project, TemplateFiles};

const PDF_DOCUMENT: &str = "pdf_document";

/// Shell for PDF export: the rendered body plus the template's CSS and JS inlined.
const PDF_DOCUMENT_SOURCE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{title}}</title>
<style>
{{{css}}}
</style>
</head>
<body>
{{{body}}}
<script>
{{{js}}}
</script>
</body>
</html>
"#;

handlebars_helper!(add: |a: i64, b: i64| a.saturating_add(b));

/// Data a template sees: `{{personalInfo.fullName}}`, `{{#each projects}}`, ...
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PortfolioContext<'a> {
    personal_info: &'a PersonalInfo,
    education: &'a [Education],
    experience: &'a [Experience],
    projects: &'a [Project],
    skills: &'a [String],
}

#[derive(Serialize)]
struct PdfDocumentContext<'a> {
    title: &'a str,
    css: &'a str,
    body: &'a str,
    js: &'a str,
}

/// Handlebars registry shared by every export.
///
/// `{{value}}` is HTML-escaped, `{{{value}}}` is emitted raw, and missing
/// fields render as empty strings.
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self, PortagenError> {
        let mut registry = Handlebars::new();
        registry.register_helper("add", Box::new(add));
        registry.register_template_string(PDF_DOCUMENT, PDF_DOCUMENT_SOURCE)?;
        Ok(Self { registry })
    }

    /// Compile-check template HTML without rendering it.
    pub fn check(&self, html: &str) -> Result<(), PortagenError> {
        handlebars::Template::compile(html)
            .map(|_| ())
            .map_err(|e| PortagenError::BadRequest(format!("Invalid template HTML: {e}")))
    }

    pub fn render_portfolio(
        &self,
        html: &str,
        content: &PortfolioContent,
    ) -> Result<String, PortagenError> {
        let ctx = PortfolioContext {
            personal_info: &content.personal_info,
            education: &content.education,
            experience: &content.experience,
            projects: &content.projects,
            skills: &content.skills,
        };
        Ok(self.registry.render_template(html, &ctx)?)
    }

    pub fn render_pdf_document(
        &self,
        title: &str,
        body: &str,
        files: &TemplateFiles,
    ) -> Result<String, PortagenError> {
        let ctx = PdfDocumentContext {
            title,
            css: &files.css,
            body,
            js: &files.js,
        };
        Ok(self.registry.render(PDF_DOCUMENT, &ctx)?)
    }
}
