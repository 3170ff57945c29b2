// src/test_support.rs
//! Fixtures shared by the unit tests: in-memory ZIPs and a mock archive host.

use std::io::{Cursor, Write};
use tokio::runtime::Runtime;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

/// Path the mock server answers on, mirroring Japan Post's layout.
pub const ARCHIVE_PATH: &str = "/zipcode/dl/utf/zip/utf_ken_all.zip";

/// Build a ZIP archive holding `entries` as `(name, contents)` pairs.
pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, contents) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(contents).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// A mock HTTP host serving one archive.
///
/// The server lives on its own runtime so the blocking client under test is
/// called from the plain test thread, outside any async context.
pub struct ArchiveHost {
    server: MockServer,
    _rt: Runtime,
}

impl ArchiveHost {
    /// Answer `GET` [`ARCHIVE_PATH`] with `status` and `body`.
    pub fn start(status: u16, body: Vec<u8>) -> Self {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let server = rt.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path(ARCHIVE_PATH))
                .respond_with(ResponseTemplate::new(status).set_body_bytes(body))
                .mount(&server)
                .await;
            server
        });
        Self { server, _rt: rt }
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.server.uri(), ARCHIVE_PATH)
    }
}

/// Rows in the Japan Post layout (15 columns, no header).
pub const SAMPLE_CSV: &str = "\
13110,\"152  \",\"1520000\",\"ﾄｳｷｮｳﾄ\",\"ﾒｸﾞﾛｸ\",\"ｲｶﾆｹｲｻｲｶﾞﾅｲﾊﾞｱｲ\",\"東京都\",\"目黒区\",\"以下に掲載がない場合\",0,0,0,0,0,0
01101,\"060  \",\"0600000\",\"ﾎｯｶｲﾄﾞｳ\",\"ｻｯﾎﾟﾛｼﾁｭｳｵｳｸ\",\"ｲｶﾆｹｲｻｲｶﾞﾅｲﾊﾞｱｲ\",\"北海道\",\"札幌市中央区\",\"以下に掲載がない場合\",0,0,0,0,0,0
13110,\"152  \",\"1520001\",\"ﾄｳｷｮｳﾄ\",\"ﾒｸﾞﾛｸ\",\"ﾅｶﾁｮｳ\",\"東京都\",\"目黒区\",\"中央町\",0,0,1,0,0,0
";
