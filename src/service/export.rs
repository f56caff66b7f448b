use axum::body::Body;
use tracing::info;
use uuid::Uuid;

use crate::db::{Portfolio, Template, User};
use crate::error::PortagenError;
use crate::export::archive::{self, INDEX_HTML};
use crate::export::{SiteFiles, StagingDir, body};
use crate::router::PortagenState;
use crate::service::access::{self, PortfolioAction};

pub struct ZipDownload {
    pub body: Body,
    pub len: u64,
    pub filename: String,
}

pub struct PdfDownload {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Render the portfolio into a static site and stream it as a ZIP.
///
/// The staging directory rides along with the response body and is
/// removed when the body finishes or is dropped.
#[tracing::instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn export_zip(
    state: &PortagenState,
    user: &User,
    portfolio_id: Uuid,
) -> Result<ZipDownload, PortagenError> {
    let (portfolio, template) = load_for_export(state, user, portfolio_id).await?;
    let filename = attachment_filename(&portfolio.content.title, "zip");
    let renderer = state.renderer.clone();
    let staging_base = state.config.export.staging_dir.clone();

    let (archive_path, staging) = tokio::task::spawn_blocking(move || {
        let index_html = renderer.render_portfolio(&template.files.html, &portfolio.content)?;
        let staging = StagingDir::create(&staging_base, portfolio.id)?;
        let site = SiteFiles {
            index_html,
            css: template.files.css,
            js: template.files.js,
        };
        let path =
            archive::build_site_archive(&staging, &site, &format!("{}.zip", portfolio.id))?;
        Ok::<_, PortagenError>((path, staging))
    })
    .await??;

    let (body, len) = body::staged_file_body(&archive_path, staging).await?;
    info!(bytes = len, "zip export ready");
    Ok(ZipDownload {
        body,
        len,
        filename,
    })
}

/// Render the portfolio with inlined assets and print it to PDF.
#[tracing::instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn export_pdf(
    state: &PortagenState,
    user: &User,
    portfolio_id: Uuid,
) -> Result<PdfDownload, PortagenError> {
    let (portfolio, template) = load_for_export(state, user, portfolio_id).await?;
    let filename = attachment_filename(&portfolio.content.title, "pdf");
    let renderer = state.renderer.clone();
    let pdf = state.pdf.clone();
    let staging_base = state.config.export.staging_dir.clone();

    let bytes = tokio::task::spawn_blocking(move || {
        let body = renderer.render_portfolio(&template.files.html, &portfolio.content)?;
        let document = renderer.render_pdf_document(
            document_title(&portfolio.content.title),
            &body,
            &template.files,
        )?;
        let staging = StagingDir::create(&staging_base, portfolio.id)?;
        let path = staging.write(INDEX_HTML, document)?;
        pdf.render(&path)
    })
    .await??;

    info!(bytes = bytes.len(), "pdf export ready");
    Ok(PdfDownload { bytes, filename })
}

async fn load_for_export(
    state: &PortagenState,
    user: &User,
    portfolio_id: Uuid,
) -> Result<(Portfolio, Template), PortagenError> {
    let portfolio = state
        .storage
        .find_portfolio(portfolio_id)
        .await?
        .ok_or(PortagenError::NotFound("Portfolio not found"))?;
    access::authorize(&portfolio, user, PortfolioAction::Download)?;

    let template = match portfolio.template_id {
        Some(template_id) => state.storage.find_template(template_id).await?,
        None => None,
    }
    .ok_or_else(|| {
        PortagenError::BadRequest("Template not found for this portfolio".to_string())
    })?;

    Ok((portfolio, template))
}

fn document_title(title: &str) -> &str {
    if title.trim().is_empty() {
        "Portfolio"
    } else {
        title
    }
}

/// `<title>.<ext>` reduced to characters that are safe in a quoted header value.
pub fn attachment_filename(title: &str, ext: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = cleaned.trim_matches(|c| c == '.' || c == ' ');
    if stem.is_empty() {
        format!("portfolio.{ext}")
    } else {
        format!("{stem}.{ext}")
    }
}
