// src/fetch/zips.rs

use reqwest::blocking::Client;
use std::{fs::File, io::BufWriter, io::Write, path::Path};
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::{Error, Result};

/// Blocking client used for the single download of a run.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|source| Error::Transport {
            url: "(client init)".to_string(),
            source,
        })
}

/// Download `url_str` and stream the body into `dest`, replacing any existing file.
/// Returns the number of bytes written.
#[instrument(level = "info", skip(client, dest), fields(dest = %dest.as_ref().display()))]
pub fn download_zip(client: &Client, url_str: &str, dest: impl AsRef<Path>) -> Result<u64> {
    let dest = dest.as_ref();
    let url = Url::parse(url_str).map_err(|source| Error::InvalidUrl {
        url: url_str.to_string(),
        source,
    })?;
    let transport = |source| Error::Transport {
        url: url.to_string(),
        source,
    };

    debug!(host = url.host_str().unwrap_or(""), "sending GET");
    let mut resp = client
        .get(url.as_str())
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(transport)?;

    let file = File::create(dest).map_err(|e| Error::fs(dest, e))?;
    let mut out = BufWriter::new(file);
    let bytes = resp.copy_to(&mut out).map_err(transport)?;
    out.flush().map_err(|e| Error::fs(dest, e))?;

    info!(bytes, "downloaded");
    Ok(bytes)
}
