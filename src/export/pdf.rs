use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use std::error::Error as StdError;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

use crate::config::ExportConfig;
use crate::error::PortagenError;

/// A4 in inches.
const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.69;
/// 20 CSS pixels at 96 dpi.
const MARGIN_IN: f64 = 20.0 / 96.0;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Turns a staged HTML document into PDF bytes. Called on the blocking pool.
pub trait PdfRenderer: Send + Sync {
    fn render(&self, document: &Path) -> Result<Vec<u8>, PortagenError>;
}

/// Launches a fresh headless Chrome per document.
///
/// The browser process belongs to the `Browser` handle and is killed when
/// it drops, on success and on error alike.
#[derive(Debug, Clone)]
pub struct ChromePdfRenderer {
    chrome_path: Option<PathBuf>,
    sandbox: bool,
}

impl ChromePdfRenderer {
    pub fn new(cfg: &ExportConfig) -> Self {
        Self {
            chrome_path: cfg.chrome_path.clone(),
            sandbox: cfg.chrome_sandbox,
        }
    }

    fn print(&self, document: &Path) -> Result<Vec<u8>, BoxError> {
        let absolute = std::fs::canonicalize(document)?;
        let url = Url::from_file_path(&absolute)
            .map_err(|()| format!("not a file path: {}", absolute.display()))?;

        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(self.sandbox)
            .path(self.chrome_path.clone())
            .build()?;
        let browser = Browser::new(options)?;
        let tab = browser.new_tab()?;
        tab.navigate_to(url.as_str())?.wait_until_navigated()?;
        debug!(%url, "document loaded, printing");

        let pdf = tab.print_to_pdf(Some(a4_options()))?;
        Ok(pdf)
    }
}

impl PdfRenderer for ChromePdfRenderer {
    fn render(&self, document: &Path) -> Result<Vec<u8>, PortagenError> {
        self.print(document)
            .map_err(|e| PortagenError::Pdf(e.to_string()))
    }
}

fn a4_options() -> PrintToPdfOptions {
    PrintToPdfOptions {
        print_background: Some(true),
        paper_width: Some(A4_WIDTH_IN),
        paper_height: Some(A4_HEIGHT_IN),
        margin_top: Some(MARGIN_IN),
        margin_bottom: Some(MARGIN_IN),
        margin_left: Some(MARGIN_IN),
        margin_right: Some(MARGIN_IN),
        ..Default::default()
    }
}
