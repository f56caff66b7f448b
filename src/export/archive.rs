use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::PortagenError;
use crate::export::staging::StagingDir;

pub const INDEX_HTML: &str = "index.html";
pub const STYLE_CSS: &str = "style.css";
pub const SCRIPT_JS: &str = "script.js";

const SITE_DIR: &str = "site";

/// The three files of an exported static site.
#[derive(Debug, Clone)]
pub struct SiteFiles {
    pub index_html: String,
    pub css: String,
    pub js: String,
}

/// Write the site under `<staging>/site/` and zip it to `<staging>/<archive_name>`.
///
/// Returns the archive path; it lives as long as `staging`.
pub fn build_site_archive(
    staging: &StagingDir,
    site: &SiteFiles,
    archive_name: &str,
) -> Result<PathBuf, PortagenError> {
    staging.write(&format!("{SITE_DIR}/{INDEX_HTML}"), &site.index_html)?;
    staging.write(&format!("{SITE_DIR}/{STYLE_CSS}"), &site.css)?;
    staging.write(&format!("{SITE_DIR}/{SCRIPT_JS}"), &site.js)?;

    let archive_path = staging.path().join(archive_name);
    zip_directory(&staging.path().join(SITE_DIR), &archive_path)?;
    Ok(archive_path)
}

/// Zip the contents of `src` (not `src` itself) into `dest`, deflate level 9.
pub fn zip_directory(src: &Path, dest: &Path) -> Result<(), PortagenError> {
    let mut files = Vec::new();
    collect_files(src, src, &mut files)?;
    files.sort();

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    let mut zip = ZipWriter::new(BufWriter::new(File::create(dest)?));
    for relative in files {
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        zip.start_file(name, options)?;
        let mut source = File::open(src.join(&relative))?;
        io::copy(&mut source, &mut zip)?;
    }
    let mut writer = zip.finish()?;
    writer.flush()?;
    Ok(())
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), PortagenError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(root, &path, out)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            out.push(relative.to_path_buf());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use uuid::Uuid;
    use zip::ZipArchive;

    #[test]
    fn archive_holds_the_three_site_files() {
        let base = tempfile::tempdir().unwrap();
        let staging = StagingDir::create(base.path(), Uuid::new_v4()).unwrap();
        let site = SiteFiles {
            index_html: "<h1>hi</h1>".into(),
            css: "h1{}".into(),
            js: "1;".into(),
        };

        let path = build_site_archive(&staging, &site, "out.zip").unwrap();
        let mut archive = ZipArchive::new(File::open(&path).unwrap()).unwrap();

        let mut names: Vec<_> = archive.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(names, vec![INDEX_HTML, SCRIPT_JS, STYLE_CSS]);

        let mut html = String::new();
        archive
            .by_name(INDEX_HTML)
            .unwrap()
            .read_to_string(&mut html)
            .unwrap();
        assert_eq!(html, "<h1>hi</h1>");
    }

    #[test]
    fn nested_entries_use_forward_slashes() {
        let src = tempfile::tempdir().unwrap();
        fs::create_dir_all(src.path().join("assets")).unwrap();
        fs::write(src.path().join("assets").join("a.txt"), "a").unwrap();
        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("x.zip");

        zip_directory(src.path(), &dest).unwrap();
        let archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let names: Vec<_> = archive.file_names().collect();
        assert_eq!(names, vec!["assets/a.txt"]);
    }
}
