// src/config.rs

use std::path::PathBuf;

/// Japan Post's nationwide postal-code list, UTF-8 edition.
pub const SOURCE_URL: &str = "https://www.post.japanpost.jp/zipcode/dl/utf/zip/utf_ken_all.zip";
/// Name of the downloaded archive inside the temp directory.
pub const DOWNLOAD_FILE: &str = "download.zip";
/// Name of the CSV entry inside the archive.
pub const CSV_FILE: &str = "utf_ken_all.csv";
pub const OUTPUT_DIR: &str = "data";

/// Where a run reads from and writes to.
///
/// The binary always runs with [`PipelineConfig::default`]; the fields are
/// public so tests can point a run at a local server and scratch dirs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source_url: String,
    pub download_path: PathBuf,
    pub extract_dir: PathBuf,
    pub csv_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let tmp = std::env::temp_dir();
        Self {
            source_url: SOURCE_URL.to_string(),
            download_path: tmp.join(DOWNLOAD_FILE),
            csv_path: tmp.join(CSV_FILE),
            extract_dir: tmp,
            output_dir: PathBuf::from(OUTPUT_DIR),
        }
    }
}
