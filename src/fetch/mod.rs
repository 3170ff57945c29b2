// src/fetch/mod.rs

/// Downloading the source archive to disk
pub mod zips;

/// Unpacking the downloaded archive
pub mod extract;

pub use extract::unzip;
pub use zips::{download_zip, http_client};
